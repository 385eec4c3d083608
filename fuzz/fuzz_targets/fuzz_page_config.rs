//! Fuzz target: embedded page configuration
//!
//! Feeds arbitrary text through `JsonConfigSource` and `load_config`:
//! - No panics on malformed JSON, wrong types or huge numbers
//! - Anything `load_config` accepts also passes `validate`
//!
//! cargo fuzz run fuzz_page_config

#![no_main]

use folio::adapters::config_source::JsonConfigSource;
use folio::config::load_config;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data).into_owned();
    if let Ok(config) = load_config(&JsonConfigSource::new(Some(text))) {
        assert!(config.validate().is_ok());
    }
});
