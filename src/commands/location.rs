//! Implementation of the `location` command: show or store the location register.

use anyhow::{Context, Result};

use crate::geo::{Location, LocationStore};

/// Handle `sunfocus location [<latitude> <longitude>]`.
pub fn handle_location_command(
    debug_enabled: bool,
    config_dir: Option<String>,
    coordinates: Option<(f64, f64)>,
) -> Result<()> {
    let config = super::prepare(debug_enabled, config_dir)?;
    let mut store = super::open_store(&config)?;

    log_version!();

    let Some((latitude, longitude)) = coordinates else {
        let location = store.location()?;
        if location.is_configured() {
            log_block_start!("Stored location: {location}");
        } else {
            log_block_start!("No location stored");
        }
        log_indented!("Backup file: {}", store.path().display());
        log_end!();
        return Ok(());
    };

    let location = Location::from_degrees(latitude, longitude).with_context(|| {
        format!(
            "Coordinates {latitude}, {longitude} are out of range (latitude ±90, longitude ±180)"
        )
    })?;

    if !location.is_configured() {
        log_warning!("0.00°, 0.00° is the 'no location' value and will read back as unset");
    }

    store.save_location(location.pack())?;
    log_block_start!("Stored location: {location}");
    if (location.latitude_degrees() - latitude).abs() > 1e-9
        || (location.longitude_degrees() - longitude).abs() > 1e-9
    {
        log_indented!("Rounded to hundredths of a degree");
    }
    log_indented!("Backup file: {}", store.path().display());
    log_end!();

    Ok(())
}

/// Display detailed help for the location command.
pub fn display_help() {
    log_version!();
    log_block_start!("location - Show or store the location");
    log_block_start!("Usage: sunfocus location [<latitude> <longitude>]");
    log_block_start!("Arguments:");
    log_indented!("latitude   Degrees north, -90 to 90");
    log_indented!("longitude  Degrees east, -180 to 180");
    log_indented!("Without arguments the stored location is shown");
    log_block_start!("Examples:");
    log_indented!("sunfocus location");
    log_indented!("sunfocus location 49.84 24.01");
    log_indented!("sunfocus location -36.85 174.78");
    log_end!();
}
