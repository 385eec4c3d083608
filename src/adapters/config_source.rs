//! JSON configuration source.
//!
//! Implements [`ConfigPort`] over an optional JSON document. In the browser
//! the document is the text of `<script id="folio-config"
//! type="application/json">`; no such element means defaults.

use log::warn;

use crate::app::ports::{ConfigError, ConfigPort};
use crate::config::PageConfig;

/// DOM id of the embedded configuration document.
pub const CONFIG_ELEMENT_ID: &str = "folio-config";

#[derive(Debug, Default)]
pub struct JsonConfigSource {
    raw: Option<String>,
}

impl JsonConfigSource {
    pub fn new(raw: Option<String>) -> Self {
        Self { raw }
    }
}

impl ConfigPort for JsonConfigSource {
    fn load(&self) -> Result<PageConfig, ConfigError> {
        let Some(raw) = self.raw.as_deref() else {
            return Ok(PageConfig::default());
        };
        if raw.trim().is_empty() {
            return Ok(PageConfig::default());
        }
        serde_json::from_str(raw).map_err(|e| {
            warn!("Config: {e}");
            ConfigError::Corrupted
        })
    }
}
