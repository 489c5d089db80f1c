//! Command-line command handlers for sunfocus.
//!
//! Each command lives in its own submodule. Shared setup (logging flags,
//! configuration, the location store) is done here.

pub mod help;
pub mod location;
pub mod sun;
pub mod timer;

use anyhow::Result;
use chrono::{NaiveDateTime, Utc};

use crate::config::{self, Config};
use crate::logger::Log;
use crate::state::{self, FileStore};
use crate::time::convert;

/// Enable debug output, apply `--config` and load the configuration.
pub(crate) fn prepare(debug_enabled: bool, config_dir: Option<String>) -> Result<Config> {
    Log::set_debug(debug_enabled);
    config::set_config_dir(config_dir)?;

    let config = Config::load()?;
    if debug_enabled {
        let path = config::get_config_path()
            .ok()
            .filter(|path| path.exists());
        config.log_config(path.as_deref());
    }
    Ok(config)
}

/// Open the location store, seeding it from the configured boot location.
pub(crate) fn open_store(config: &Config) -> Result<FileStore> {
    let mut store = FileStore::open_default();
    if let Some(location) = config.default_location() {
        state::seed_location(&mut store, location)?;
    }
    Ok(store)
}

/// Current local time and offset, or the given local time with the offset in
/// effect at that moment.
pub(crate) fn local_now(config: &Config, at: Option<NaiveDateTime>) -> Result<(NaiveDateTime, i32)> {
    match at {
        None => {
            let utc_now = Utc::now().naive_utc();
            let offset = config.offset_minutes_at(utc_now)?;
            Ok((convert::from_utc(utc_now, offset), offset))
        }
        Some(local) => {
            // The offset depends on the instant, which depends on the offset: one
            // refinement settles it except inside a DST gap
            let guess = config.offset_minutes_at(local)?;
            let offset = config.offset_minutes_at(convert::to_utc(local, guess))?;
            Ok((local, offset))
        }
    }
}
