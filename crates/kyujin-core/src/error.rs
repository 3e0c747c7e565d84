use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read site config {path}: {source}")]
    SiteConfigIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse site config {path}: {source}")]
    SiteConfigParse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to read site config directory {path}: {source}")]
    ConfigDirIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("config validation error: {0}")]
    Validation(String),
}
