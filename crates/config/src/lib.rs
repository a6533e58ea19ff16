use serde::{Deserialize, Serialize};

pub mod defaults;
pub mod parser;
pub mod substitution;
pub mod validator;

pub use defaults::*;
pub use parser::*;
pub use substitution::*;
pub use validator::*;

/// Top-level configuration for the Crossbook service
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default = "default_service")]
    pub service: ServiceConfig,
    pub engine: EngineConfig,
    #[serde(default = "default_server")]
    pub server: ServerConfig,
    #[serde(default = "default_logging")]
    pub logging: LoggingConfig,
}

/// Service identity
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServiceConfig {
    pub name: String,
}

/// Matching engine settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EngineConfig {
    /// Symbols registered at startup; orders for anything else are rejected
    pub symbols: Vec<String>,
    /// Default depth of book views when the caller gives no size
    #[serde(default = "default_view_depth")]
    pub view_depth: usize,
}

/// HTTP listener settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Logging settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// One of `pretty`, `json`, `compact`
    pub format: String,
    /// Default `EnvFilter` directive when `RUST_LOG` is unset
    pub level: String,
}
