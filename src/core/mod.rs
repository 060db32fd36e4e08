pub mod converter;
pub mod report;
pub mod scanner;

pub use crate::domain::model::{Checkpoint, ConversionOutcome, ConversionReport, RunOutcome};
pub use crate::domain::ports::{ConfigProvider, ModelExporter};
pub use crate::utils::error::Result;
