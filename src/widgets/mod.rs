//! Page behaviours other than the carousel.
//!
//! Each widget owns its private state and its own timers, and writes to the
//! page only through [`DomPort`](crate::app::ports::DomPort). None of them
//! knows about the others; the [`AppService`](crate::app::service::AppService)
//! routes events and fired timers to the right one.

pub mod filter;
pub mod form;
pub mod loader;
pub mod nav;
pub mod particles;
pub mod scroll;
pub mod theme;
pub mod typing;
