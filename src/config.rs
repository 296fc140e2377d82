use anyhow::Context;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::quiz::generator::QuizSettings;

#[derive(Debug, Deserialize)]
pub struct Config {
    pub version: u32,
    pub catalog: CatalogSource,
    #[serde(default)]
    pub quiz: QuizSettings,
    pub http: HttpConfig,
}

impl Config {
    pub fn load(path: &Path) -> anyhow::Result<Config> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.to_string_lossy()))?;
        toml::from_str(&contents).with_context(|| "Failed to parse config TOML")
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct HttpConfig {
    pub bind_addr: String,
    pub port: u16,
}

#[derive(Debug, Deserialize)]
pub struct CatalogSource {
    /// JSON file with the artist/album/track tree
    pub path: PathBuf,
}
