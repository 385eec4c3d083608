//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter         | Implements   | Connects to                        |
//! |-----------------|--------------|------------------------------------|
//! | `config_source` | ConfigPort   | Embedded JSON `<script>` document  |
//! | `log_sink`      | EventSink    | `log` facade / browser console     |
//! | `relay`         | SubmitPort   | Simulated message relay            |
//! | `storage`       | StoragePort  | In-memory store (host, fallback)   |
//! | `time`          | none         | `Date.now()` / `Instant`           |
//! | `web`           | DomPort      | `web_sys` document                 |
//! |                 | StoragePort  | `localStorage`                     |
//! |                 | SubmitPort   | Simulated relay                    |
//!
//! Everything except `web` builds on the host and backs the tests.

pub mod config_source;
pub mod log_sink;
pub mod relay;
pub mod storage;
pub mod time;
#[cfg(feature = "web")]
pub mod web;
