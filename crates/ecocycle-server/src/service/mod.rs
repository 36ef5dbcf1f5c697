//! Application state and dependency injection.

mod classifier;
mod config;

use ecocycle_core::{InferenceService, PricingTable};
pub use ecocycle_core::{Error, Result};

pub use crate::service::classifier::{ClassificationReport, WasteClassifier};
pub use crate::service::config::ClassifierConfig;

/// Application state.
///
/// Used for the [`State`] extraction (dependency injection).
///
/// [`State`]: axum::extract::State
#[must_use = "state does nothing unless you use it"]
#[derive(Debug, Clone)]
pub struct ServiceState {
    classifier: WasteClassifier,
}

impl ServiceState {
    /// Initializes application state with the default price table.
    pub fn new(config: &ClassifierConfig, inference: InferenceService) -> Result<Self> {
        Self::with_pricing(config, PricingTable::default(), inference)
    }

    /// Initializes application state with a custom price table.
    pub fn with_pricing(
        config: &ClassifierConfig,
        pricing: PricingTable,
        inference: InferenceService,
    ) -> Result<Self> {
        let classifier = WasteClassifier::new(config.clone(), pricing, inference)?;

        Ok(Self { classifier })
    }
}

macro_rules! impl_di {
    ($($f:ident: $t:ty),+) => {$(
        impl axum::extract::FromRef<ServiceState> for $t {
            fn from_ref(state: &ServiceState) -> Self {
                state.$f.clone()
            }
        }
    )+};
}

impl_di!(classifier: WasteClassifier);
