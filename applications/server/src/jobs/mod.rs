/// Background jobs
pub mod export_consumer;

pub use export_consumer::{ConsumerSettings, ExportConsumer, Outcome};
