pub mod config;
pub mod field;

pub use config::{AppConfig, UiConfig};
pub use field::{FieldName, FieldWrite, TagSet};
