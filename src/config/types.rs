use serde::Deserialize;

/// Main configuration structure for webstash
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub storage: StorageConfig,
    pub export: ExportConfig,
}

/// Storage configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Path to the SQLite database file
    #[serde(rename = "database-path")]
    pub database_path: String,
}

/// Export configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ExportConfig {
    /// Directory where export artifacts are written
    #[serde(rename = "output-dir")]
    pub output_dir: String,

    /// Default filename prefix for export artifacts
    #[serde(rename = "default-prefix", default = "default_prefix")]
    pub default_prefix: String,
}

fn default_prefix() -> String {
    "webstash".to_string()
}
