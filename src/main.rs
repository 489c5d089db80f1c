//! Binary entry point: parse arguments and dispatch to the command handlers.
//!
//! All behavior lives in the library. Errors from a handler are reported through
//! the logger and turned into a non-zero exit code.

use sunfocus::args::{self, CliAction, ParsedArgs};
use sunfocus::commands;
use sunfocus::common::constants::EXIT_FAILURE;
use sunfocus::log_error_exit;

fn main() {
    let parsed_args = ParsedArgs::from_env();

    let result = match parsed_args.action {
        CliAction::ShowVersion => {
            args::display_version_info();
            Ok(())
        }
        CliAction::ShowHelp => {
            args::display_help();
            Ok(())
        }
        CliAction::ShowHelpDueToError => {
            args::display_help();
            std::process::exit(EXIT_FAILURE);
        }
        CliAction::HelpCommand { command } => {
            commands::help::run_help_command(command.as_deref())
        }
        CliAction::SunCommand {
            debug_enabled,
            config_dir,
            at,
            following,
            json,
        } => commands::sun::handle_sun_command(debug_enabled, config_dir, at, following, json),
        CliAction::LocationCommand {
            debug_enabled,
            config_dir,
            coordinates,
        } => commands::location::handle_location_command(debug_enabled, config_dir, coordinates),
        CliAction::TimerCommand {
            debug_enabled,
            config_dir,
            autorun,
            cycles,
            log_file,
        } => commands::timer::handle_timer_command(
            debug_enabled,
            config_dir,
            autorun,
            cycles,
            log_file,
        ),
    };

    if let Err(e) = result {
        // `sun --json` silences the logger; errors must still reach the user
        sunfocus::logger::Log::set_enabled(true);
        log_error_exit!("{:#}", e);
        std::process::exit(EXIT_FAILURE);
    }
}
