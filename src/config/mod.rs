//! Configuration loading and validation
//!
//! Webstash is configured through a TOML file naming the database location
//! and the export output directory. The loader also computes a content hash
//! so configuration changes can be spotted in the logs.

mod parser;
mod types;
mod validation;

pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use types::{Config, ExportConfig, StorageConfig};
pub use validation::validate;
