#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod api;
mod client;
mod config;
mod error;

pub use crate::client::{GroqClient, TRACING_TARGET};
pub use crate::config::{DEFAULT_BASE_URL, GroqConfig, GroqConfigBuilder, PLACEHOLDER_API_KEY};
pub use crate::error::{Error, Result};
