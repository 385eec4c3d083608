//! Application core: pure page logic, zero browser I/O.
//!
//! This module wires the page behaviours together: the feature table that
//! starts them, the service that routes events and timers to them, and the
//! **port traits** in [`ports`] through which everything reaches the page.
//! Nothing here touches `web_sys`, so the whole layer runs in host tests.

pub mod commands;
pub mod events;
pub mod layout;
pub mod ports;
pub mod service;
pub mod startup;
