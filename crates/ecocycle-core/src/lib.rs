#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod error;

pub mod inference;
pub mod prompt;
pub mod waste;

pub use error::{BoxedError, Error, ErrorKind, Result};
pub use inference::{ImageData, InferenceService, VisionProvider, VisionRequest, VisionResponse};
#[cfg(any(test, feature = "test-utils"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-utils")))]
pub use inference::{MockConfig, MockProvider};
pub use waste::{
    Category, Classification, NON_RECYCLABLE_LABEL, ParseMethod, PriceQuote, PricingTable,
    parse_classification,
};
