//! Help command implementation for sunfocus.
//!
//! Dispatches `sunfocus help [COMMAND]` to the command's own help page, or shows
//! the command overview.

use anyhow::Result;

/// Run the help command (dispatcher)
///
/// # Arguments
/// * `command` - Optional command name to get help for (None = general help)
pub fn run_help_command(command: Option<&str>) -> Result<()> {
    match command {
        None => display_general_help(),
        Some("help") | Some("h") => display_help_help(),
        Some("location") | Some("l") => super::location::display_help(),
        Some("sun") | Some("s") => super::sun::display_help(),
        Some("timer") | Some("t") => super::timer::display_help(),
        Some(unknown) => {
            log_warning!("Unknown command: {}", unknown);
            display_general_help();
        }
    }
    Ok(())
}

/// Display general help focused on commands (for the help command)
fn display_general_help() {
    log_version!();
    log_block_start!("Available Commands:");
    log_indented!("help, h [COMMAND]      Show detailed help for a command");
    log_indented!("location, l [lat lon]  Show or store the location");
    log_indented!("sun, s                 Show the next sunrise or sunset");
    log_indented!("timer, t               Simulate an interval timer session");
    log_pipe!();
    log_info!("Use 'sunfocus help <command>' to see detailed help for a specific command.");
    log_indented!("Use 'sunfocus --help' to see all options and general usage.");
    log_end!();
}

fn display_help_help() {
    log_version!();
    log_block_start!("help - Display help information");
    log_block_start!("Usage: sunfocus help [COMMAND]");
    log_block_start!("Arguments:");
    log_indented!("COMMAND  Optional command to get help for");
    log_indented!("         If omitted, shows general help");
    log_block_start!("Examples:");
    log_indented!("sunfocus help");
    log_indented!("sunfocus help timer");
    log_end!();
}
