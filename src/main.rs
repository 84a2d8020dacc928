//! hipnotify - Nagios to HipChat notifier
//!
//! A command-line tool invoked by Nagios notification commands to post
//! host and service alerts to a HipChat room.

use clap::Parser;
use hipnotify::cli::args::{generate_completions, Cli, Commands};
use hipnotify::commands::{run_colors, run_send};
use hipnotify::error::AppError;

fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging; --verbose wins over RUST_LOG
    init_logger(cli.verbose);

    // Run the appropriate command
    let result = run(&cli);

    if let Err(e) = result {
        log::error!("{}", e);
        print_error(&e);
        std::process::exit(1);
    }
}

fn init_logger(verbose: bool) {
    logger_builder(verbose).init();
}

fn logger_builder(verbose: bool) -> env_logger::Builder {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    builder.format_timestamp(None);
    if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder
}

fn run(cli: &Cli) -> Result<(), AppError> {
    let config_path = cli.config.as_deref();

    match &cli.command {
        Commands::Send(args) => run_send(args, config_path, cli.format, cli.dry_run),

        Commands::Colors => run_colors(config_path, cli.format),

        Commands::Completions { shell } => {
            generate_completions(*shell);
            Ok(())
        }
    }
}

fn print_error(err: &AppError) {
    eprintln!("Error: {}", err);

    // Print helpful hints for common errors
    match err {
        AppError::Payload(hipnotify::error::PayloadError::MalformedPayload { kind, .. }) => {
            eprintln!();
            eprintln!("Hint: Check the field order of the Nagios notification command.");
            if kind.ends_with("host") {
                eprintln!("      host: HOSTNAME|LONGDATETIME|NOTIFICATIONTYPE|HOSTADDRESS|HOSTSTATE|HOSTOUTPUT");
            } else {
                eprintln!("      service: SERVICEDESC|HOSTALIAS|LONGDATETIME|NOTIFICATIONTYPE|HOSTADDRESS|SERVICESTATE|SERVICEOUTPUT");
            }
            eprintln!("      A literal '|' inside plugin output breaks the field count.");
        }
        AppError::Config(hipnotify::error::ConfigError::MissingField(_)) => {
            eprintln!();
            eprintln!("Hint: Pass --token and --room, or set them under [hipchat] in the config file.");
        }
        AppError::Template(hipnotify::error::TemplateError::TemplateNotFound(_)) => {
            eprintln!();
            eprintln!("Hint: Use --template-dir or [templates] dir to point at the template directory.");
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbose_enables_debug() {
        let logger = logger_builder(true).build();
        assert_eq!(logger.filter(), log::LevelFilter::Debug);
    }

    #[test]
    fn test_quiet_keeps_default_filter() {
        std::env::remove_var("RUST_LOG");
        let logger = logger_builder(false).build();
        assert_eq!(logger.filter(), log::LevelFilter::Warn);
    }
}
