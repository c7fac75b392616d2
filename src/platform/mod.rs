//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Time/ticks (fixed-step scheduling from variable frame times)
//! - Storage (LocalStorage on web)
//! - Logging setup on web

#[cfg(target_arch = "wasm32")]
pub mod storage;
pub mod time;

pub use time::FixedStepper;

/// Route `log` output and panics to the browser console. Safe to call twice.
#[cfg(target_arch = "wasm32")]
pub fn init_web_logging() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        log::debug!("Console logger already installed");
    }
}
