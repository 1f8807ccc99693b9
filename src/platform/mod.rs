//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Logging backend
//! - Storage (LocalStorage on web, in-memory elsewhere)

use crate::storage::{MemoryStorage, Storage};

/// Install the log backend. Safe to call more than once.
#[cfg(not(target_arch = "wasm32"))]
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).try_init();
}

/// Install the log backend. Safe to call more than once.
#[cfg(target_arch = "wasm32")]
pub fn init_logging() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}

/// Best available key/value store for this platform
pub fn default_storage() -> Box<dyn Storage> {
    #[cfg(target_arch = "wasm32")]
    {
        match crate::storage::LocalStorage::open() {
            Ok(storage) => return Box::new(storage),
            Err(e) => log::warn!("{}; falling back to in-memory storage", e),
        }
    }
    Box::new(MemoryStorage::new())
}
