// Adapters layer: concrete implementations of the domain ports.

pub mod ultralytics;

pub use ultralytics::UltralyticsExporter;
