//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Logging backend
//! - The JS-facing run handle (web only)

#[cfg(target_arch = "wasm32")]
pub mod web;

/// Install the logger for this platform. Safe to call more than once.
#[cfg(target_arch = "wasm32")]
pub fn init_logging() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}

/// Install the logger for this platform. Safe to call more than once.
#[cfg(not(target_arch = "wasm32"))]
pub fn init_logging() {
    let _ = env_logger::try_init();
}
