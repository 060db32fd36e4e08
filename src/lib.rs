pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::UltralyticsExporter;
pub use config::toml_config::TomlConfig;
pub use core::converter::BatchConverter;
pub use domain::model::{ConversionOutcome, ConversionReport, RunOutcome};
pub use utils::error::{ConvertError, Result};
