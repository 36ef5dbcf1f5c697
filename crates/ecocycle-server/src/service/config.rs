use std::time::Duration;

#[cfg(feature = "config")]
use clap::Args;
use ecocycle_core::{Error, Result};
use serde::{Deserialize, Serialize};

/// Default values for configuration options.
mod defaults {
    /// Default classification model.
    pub const VISION_MODEL: &str = "meta-llama/llama-4-scout-17b-16e-instruct";

    /// Default detailed analysis model.
    pub const DETAILED_MODEL: &str = "llava-v1.5-7b-4096-preview";

    /// Default timeout for image prompts in seconds.
    pub const INFERENCE_TIMEOUT_SECS: u64 = 60;

    /// Default timeout for the connection probe in seconds.
    pub const PROBE_TIMEOUT_SECS: u64 = 30;

    pub fn vision_models() -> Vec<String> {
        vec![VISION_MODEL.to_owned()]
    }

    pub fn detailed_model() -> String {
        DETAILED_MODEL.to_owned()
    }

    pub fn probe_model() -> String {
        VISION_MODEL.to_owned()
    }

    pub fn inference_timeout_secs() -> u64 {
        INFERENCE_TIMEOUT_SECS
    }

    pub fn probe_timeout_secs() -> u64 {
        PROBE_TIMEOUT_SECS
    }
}

/// Models and deadlines used by the [`WasteClassifier`].
///
/// [`WasteClassifier`]: crate::service::WasteClassifier
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
#[must_use = "config does nothing unless you use it"]
pub struct ClassifierConfig {
    /// Classification models, tried in order until one answers.
    #[cfg_attr(
        feature = "config",
        arg(
            long = "vision-models",
            env = "VISION_MODELS",
            value_delimiter = ',',
            default_value = defaults::VISION_MODEL
        )
    )]
    #[serde(default = "defaults::vision_models")]
    pub vision_models: Vec<String>,

    /// Model used for free-form detailed analysis.
    #[cfg_attr(
        feature = "config",
        arg(long = "detailed-model", env = "DETAILED_MODEL", default_value = defaults::DETAILED_MODEL)
    )]
    #[serde(default = "defaults::detailed_model")]
    pub detailed_model: String,

    /// Model used by the connection test.
    #[cfg_attr(
        feature = "config",
        arg(long = "probe-model", env = "PROBE_MODEL", default_value = defaults::VISION_MODEL)
    )]
    #[serde(default = "defaults::probe_model")]
    pub probe_model: String,

    /// Deadline for each image prompt in seconds.
    #[cfg_attr(
        feature = "config",
        arg(long = "inference-timeout", env = "INFERENCE_TIMEOUT", default_value_t = defaults::INFERENCE_TIMEOUT_SECS)
    )]
    #[serde(default = "defaults::inference_timeout_secs")]
    pub inference_timeout_secs: u64,

    /// Deadline for the connection probe in seconds.
    #[cfg_attr(
        feature = "config",
        arg(long = "probe-timeout", env = "PROBE_TIMEOUT", default_value_t = defaults::PROBE_TIMEOUT_SECS)
    )]
    #[serde(default = "defaults::probe_timeout_secs")]
    pub probe_timeout_secs: u64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            vision_models: defaults::vision_models(),
            detailed_model: defaults::detailed_model(),
            probe_model: defaults::probe_model(),
            inference_timeout_secs: defaults::INFERENCE_TIMEOUT_SECS,
            probe_timeout_secs: defaults::PROBE_TIMEOUT_SECS,
        }
    }
}

impl ClassifierConfig {
    /// Returns the image prompt deadline as a Duration.
    pub fn inference_timeout(&self) -> Duration {
        Duration::from_secs(self.inference_timeout_secs)
    }

    /// Returns the probe deadline as a Duration.
    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout_secs)
    }

    /// Replaces the classification model list.
    pub fn with_vision_models<I, S>(mut self, models: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.vision_models = models.into_iter().map(Into::into).collect();
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        let invalid = |message: &str| Error::configuration().with_message(message.to_owned());

        if self.vision_models.iter().all(|model| model.trim().is_empty()) {
            return Err(invalid("At least one vision model must be configured"));
        }

        if self.detailed_model.trim().is_empty() {
            return Err(invalid("Detailed analysis model cannot be empty"));
        }

        if self.probe_model.trim().is_empty() {
            return Err(invalid("Probe model cannot be empty"));
        }

        if self.inference_timeout_secs == 0 {
            return Err(invalid("Inference timeout must be greater than 0"));
        }

        if self.probe_timeout_secs == 0 {
            return Err(invalid("Probe timeout must be greater than 0"));
        }

        Ok(())
    }

    /// Returns the classification models with blank entries removed.
    pub fn candidates(&self) -> impl Iterator<Item = &str> {
        self.vision_models
            .iter()
            .map(|model| model.trim())
            .filter(|model| !model.is_empty())
    }
}
