use std::sync::{Arc, OnceLock};

use arc_swap::ArcSwap;

use super::StaticConfig;

static CONFIG: OnceLock<ArcSwap<StaticConfig>> = OnceLock::new();

/// Get the global configuration instance
///
/// Falls back to in-memory defaults when `init_config` was never called.
pub fn get_config() -> Arc<StaticConfig> {
    CONFIG
        .get_or_init(|| ArcSwap::from_pointee(StaticConfig::default()))
        .load_full()
}

/// Initialize the global configuration
///
/// Loads from `path` (or `config.toml` in the current directory) and the
/// `QRYFT__*` environment. A second call replaces the stored configuration.
pub fn init_config(path: Option<&str>) -> Arc<StaticConfig> {
    let loaded = Arc::new(StaticConfig::load(path));
    match CONFIG.get() {
        Some(current) => current.store(loaded.clone()),
        None => {
            let _ = CONFIG.set(ArcSwap::new(loaded.clone()));
        }
    }
    get_config()
}
