use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Logger {
    pub level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mock {
    pub host: String,
    pub port: u16,
    /// Total SD job size the simulated print advances towards.
    pub sd_bytes_total: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub logger: Logger,
    pub mock: Mock,
}

impl Settings {
    pub fn new() -> Result<Self, toml::de::Error> {
        toml::from_str(include_str!(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/../",
            "configs/default.toml"
        )))
    }
}
