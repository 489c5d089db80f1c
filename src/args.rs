//! Command-line argument parsing and processing.
//!
//! Global flags (`--debug`, `--config <dir>`, `--help`, `--version`) may appear
//! anywhere. The first non-flag argument selects the command; everything after it
//! belongs to that command, which lets `location -36.85 174.78` take negative
//! numbers without mistaking them for flags.

/// Represents the parsed command-line arguments and their intended actions.
#[derive(Debug, PartialEq)]
pub enum CliAction {
    /// Show the next sunrise or sunset
    SunCommand {
        debug_enabled: bool,
        config_dir: Option<String>,
        at: Option<String>,
        following: bool,
        json: bool,
    },
    /// Show or store the location
    LocationCommand {
        debug_enabled: bool,
        config_dir: Option<String>,
        coordinates: Option<(f64, f64)>,
    },
    /// Fast-forward simulation of an interval timer session
    TimerCommand {
        debug_enabled: bool,
        config_dir: Option<String>,
        autorun: bool,
        cycles: u32,
        log_file: Option<String>,
    },
    /// Detailed help for one command, or the command overview
    HelpCommand { command: Option<String> },

    /// Display help information and exit
    ShowHelp,
    /// Display version information and exit
    ShowVersion,
    /// Show help due to unknown arguments and exit
    ShowHelpDueToError,
}

/// Result of parsing command-line arguments.
pub struct ParsedArgs {
    pub action: CliAction,
}

impl ParsedArgs {
    /// Parse command-line arguments into a structured result.
    ///
    /// The first item is the program name and is skipped.
    pub fn parse<I, S>(args: I) -> ParsedArgs
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let args_vec: Vec<String> = args
            .into_iter()
            .skip(1)
            .map(|s| s.as_ref().to_string())
            .collect();

        // Help and version take precedence over everything else
        if args_vec.iter().any(|arg| arg == "--version" || arg == "-V") {
            return ParsedArgs {
                action: CliAction::ShowVersion,
            };
        }
        if args_vec.iter().any(|arg| arg == "--help" || arg == "-h") {
            return ParsedArgs {
                action: CliAction::ShowHelp,
            };
        }

        let mut debug_enabled = false;
        let mut config_dir: Option<String> = None;
        let mut command: Option<String> = None;
        let mut command_args: Vec<String> = Vec::new();

        let mut i = 0;
        while i < args_vec.len() {
            let arg = &args_vec[i];
            match arg.as_str() {
                "--debug" | "-d" => debug_enabled = true,
                "--config" | "-c" => {
                    // Parse: --config <directory>
                    if i + 1 < args_vec.len() && !args_vec[i + 1].starts_with('-') {
                        config_dir = Some(args_vec[i + 1].clone());
                        i += 1;
                    } else {
                        log_warning!("Missing directory for --config. Usage: --config <directory>");
                        return ParsedArgs {
                            action: CliAction::ShowHelpDueToError,
                        };
                    }
                }
                _ if command.is_none() && !arg.starts_with('-') => command = Some(arg.clone()),
                _ if command.is_none() => {
                    log_warning!("Unknown option: {}", arg);
                    return ParsedArgs {
                        action: CliAction::ShowHelpDueToError,
                    };
                }
                _ => command_args.push(arg.clone()),
            }
            i += 1;
        }

        let Some(command) = command else {
            return ParsedArgs {
                action: CliAction::ShowHelp,
            };
        };

        let action = match command.as_str() {
            "sun" | "s" => parse_sun_args(&command_args, debug_enabled, config_dir),
            "location" | "l" => parse_location_args(&command_args, debug_enabled, config_dir),
            "timer" | "t" => parse_timer_args(&command_args, debug_enabled, config_dir),
            "help" | "h" => Ok(CliAction::HelpCommand {
                command: command_args.first().cloned(),
            }),
            _ => Err(format!("Unknown command: {command}")),
        };

        match action {
            Ok(action) => ParsedArgs { action },
            Err(message) => {
                log_warning!("{}", message);
                ParsedArgs {
                    action: CliAction::ShowHelpDueToError,
                }
            }
        }
    }

    /// Convenience method to parse from std::env::args()
    pub fn from_env() -> ParsedArgs {
        Self::parse(std::env::args())
    }
}

fn parse_sun_args(
    args: &[String],
    debug_enabled: bool,
    config_dir: Option<String>,
) -> Result<CliAction, String> {
    let mut at = None;
    let mut following = false;
    let mut json = false;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--at" | "-a" => {
                let value = args
                    .get(i + 1)
                    .ok_or("Missing time for --at. Usage: --at \"YYYY-MM-DD HH:MM:SS\"")?;
                at = Some(value.clone());
                i += 1;
            }
            "--following" | "-f" => following = true,
            "--json" | "-j" => json = true,
            other => return Err(format!("Unknown argument for sun: {other}")),
        }
        i += 1;
    }

    Ok(CliAction::SunCommand {
        debug_enabled,
        config_dir,
        at,
        following,
        json,
    })
}

fn parse_location_args(
    args: &[String],
    debug_enabled: bool,
    config_dir: Option<String>,
) -> Result<CliAction, String> {
    let coordinates = match args {
        [] => None,
        [latitude, longitude] => {
            let latitude = latitude
                .parse::<f64>()
                .map_err(|_| format!("Invalid latitude: {latitude}"))?;
            let longitude = longitude
                .parse::<f64>()
                .map_err(|_| format!("Invalid longitude: {longitude}"))?;
            Some((latitude, longitude))
        }
        _ => return Err("Usage: sunfocus location [<latitude> <longitude>]".to_string()),
    };

    Ok(CliAction::LocationCommand {
        debug_enabled,
        config_dir,
        coordinates,
    })
}

fn parse_timer_args(
    args: &[String],
    debug_enabled: bool,
    config_dir: Option<String>,
) -> Result<CliAction, String> {
    let mut autorun = false;
    let mut cycles = 1;
    let mut log_file = None;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--autorun" | "-a" => autorun = true,
            "--cycles" | "-n" => {
                let value = args.get(i + 1).ok_or("Missing count for --cycles")?;
                cycles = value
                    .parse::<u32>()
                    .ok()
                    .filter(|n| *n > 0)
                    .ok_or_else(|| format!("Invalid cycle count: {value}"))?;
                i += 1;
            }
            "--log" | "-l" => {
                let value = args.get(i + 1).ok_or("Missing file for --log")?;
                log_file = Some(value.clone());
                i += 1;
            }
            other => return Err(format!("Unknown argument for timer: {other}")),
        }
        i += 1;
    }

    Ok(CliAction::TimerCommand {
        debug_enabled,
        config_dir,
        autorun,
        cycles,
        log_file,
    })
}

/// Displays version information using custom logging style.
pub fn display_version_info() {
    log_version!();
    log_pipe!();
    println!("┗ {}", env!("CARGO_PKG_DESCRIPTION"));
}

/// Displays custom help message using logger methods.
pub fn display_help() {
    log_version!();
    log_block_start!(env!("CARGO_PKG_DESCRIPTION"));
    log_block_start!("Usage:");
    log_indented!("sunfocus [OPTIONS] [COMMAND]");
    log_block_start!("Options:");
    log_indented!("-c, --config <dir>     Use custom configuration directory");
    log_indented!("-d, --debug            Enable detailed debug output");
    log_indented!("-h, --help             Print help information");
    log_indented!("-V, --version          Print version information");
    log_block_start!("Commands:");
    log_indented!("sun, s                 Show the next sunrise or sunset");
    log_indented!("location, l [lat lon]  Show or store the location");
    log_indented!("timer, t               Simulate an interval timer session");
    log_indented!("help, h [COMMAND]      Show detailed help for a command");
    log_end!();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliAction {
        ParsedArgs::parse(args.iter()).action
    }

    #[test]
    fn test_parse_no_args_shows_help() {
        assert_eq!(parse(&["sunfocus"]), CliAction::ShowHelp);
    }

    #[test]
    fn test_parse_version_and_help_flags() {
        assert_eq!(parse(&["sunfocus", "--version"]), CliAction::ShowVersion);
        assert_eq!(parse(&["sunfocus", "sun", "-V"]), CliAction::ShowVersion);
        assert_eq!(parse(&["sunfocus", "timer", "-h"]), CliAction::ShowHelp);
    }

    #[test]
    fn test_parse_lowercase_v_is_not_version() {
        assert_eq!(parse(&["sunfocus", "-v"]), CliAction::ShowHelpDueToError);
        assert_eq!(
            parse(&["sunfocus", "sun", "-v"]),
            CliAction::ShowHelpDueToError
        );
    }

    #[test]
    fn test_parse_sun_command() {
        assert_eq!(
            parse(&[
                "sunfocus",
                "-d",
                "sun",
                "--at",
                "2024-06-01 05:00:00",
                "--following",
                "--json"
            ]),
            CliAction::SunCommand {
                debug_enabled: true,
                config_dir: None,
                at: Some("2024-06-01 05:00:00".to_string()),
                following: true,
                json: true,
            }
        );
    }

    #[test]
    fn test_parse_global_flags_after_command() {
        assert_eq!(
            parse(&["sunfocus", "sun", "--config", "/tmp/sf", "--debug"]),
            CliAction::SunCommand {
                debug_enabled: true,
                config_dir: Some("/tmp/sf".to_string()),
                at: None,
                following: false,
                json: false,
            }
        );
    }

    #[test]
    fn test_parse_location_with_negative_coordinates() {
        assert_eq!(
            parse(&["sunfocus", "location", "-36.85", "174.78"]),
            CliAction::LocationCommand {
                debug_enabled: false,
                config_dir: None,
                coordinates: Some((-36.85, 174.78)),
            }
        );
        assert_eq!(
            parse(&["sunfocus", "l"]),
            CliAction::LocationCommand {
                debug_enabled: false,
                config_dir: None,
                coordinates: None,
            }
        );
    }

    #[test]
    fn test_parse_location_rejects_single_value() {
        assert_eq!(
            parse(&["sunfocus", "location", "40.7"]),
            CliAction::ShowHelpDueToError
        );
        assert_eq!(
            parse(&["sunfocus", "location", "north", "east"]),
            CliAction::ShowHelpDueToError
        );
    }

    #[test]
    fn test_parse_timer_command() {
        assert_eq!(
            parse(&["sunfocus", "timer", "--autorun", "-n", "3", "--log", "run.log"]),
            CliAction::TimerCommand {
                debug_enabled: false,
                config_dir: None,
                autorun: true,
                cycles: 3,
                log_file: Some("run.log".to_string()),
            }
        );
    }

    #[test]
    fn test_parse_timer_rejects_zero_cycles() {
        assert_eq!(
            parse(&["sunfocus", "timer", "--cycles", "0"]),
            CliAction::ShowHelpDueToError
        );
        assert_eq!(
            parse(&["sunfocus", "timer", "--cycles"]),
            CliAction::ShowHelpDueToError
        );
    }

    #[test]
    fn test_parse_help_command() {
        assert_eq!(
            parse(&["sunfocus", "help", "timer"]),
            CliAction::HelpCommand {
                command: Some("timer".to_string())
            }
        );
    }

    #[test]
    fn test_parse_unknown_command_and_option() {
        assert_eq!(parse(&["sunfocus", "moon"]), CliAction::ShowHelpDueToError);
        assert_eq!(parse(&["sunfocus", "--fast"]), CliAction::ShowHelpDueToError);
        assert_eq!(
            parse(&["sunfocus", "sun", "--fast"]),
            CliAction::ShowHelpDueToError
        );
    }

    #[test]
    fn test_parse_missing_config_dir() {
        assert_eq!(
            parse(&["sunfocus", "sun", "--config"]),
            CliAction::ShowHelpDueToError
        );
    }
}
