//! Integration test driver for the `tests/integration/` submodules.
//!
//! Each `mod` below maps to a file that exercises one slice of the page
//! against the recording mock page. Everything runs on the host; no
//! browser is involved.

mod app_service_tests;
mod form_flow_tests;
mod mock_page;
mod startup_tests;
