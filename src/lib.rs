//! Folio page behaviour library.
//!
//! Exposes the pure-logic modules (controllers, scheduler, ports) for
//! integration testing on the host. All browser-specific code lives in
//! [`adapters::web`] and is only compiled with the `web` feature.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod carousel;
pub mod config;
pub mod events;
pub mod observers;
pub mod scheduler;
pub mod widgets;

mod error;

pub use error::{Error, Result};
