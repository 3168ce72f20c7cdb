use std::process;

use clap::error::ErrorKind;
use clap::Parser;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

use grind75::cli::commands::execute_command;
use grind75::cli::{output, Cli};
use grind75::config::Settings;
use grind75::exitcode;
use grind75::infrastructure::di::ServiceContainer;

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // clap exits with 2 on usage errors; this tool reports every failure as 1
            let code = match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => exitcode::OK,
                _ => exitcode::USAGE,
            };
            let _ = e.print();
            process::exit(code);
        }
    };

    let mut settings = match Settings::load(cli.project_dir.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            output::error(&e);
            process::exit(exitcode::FAILURE);
        }
    };
    settings.debug |= cli.verbose;

    setup_logging(settings.debug);

    let container = ServiceContainer::new(settings);
    if let Err(e) = execute_command(&cli, &container) {
        output::error(&e);
        process::exit(e.exit_code());
    }
}

/// Diagnostic traces go to stdout next to normal output; silent unless debug.
fn setup_logging(debug: bool) {
    let filter = if debug {
        LevelFilter::DEBUG
    } else {
        LevelFilter::OFF
    };

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(true)
        .with_thread_names(false)
        .with_span_events(FmtSpan::CLOSE);

    tracing_subscriber::registry()
        .with(fmt_layer.with_filter(filter))
        .init();

    tracing::debug!("Debug mode: on");
}

#[cfg(test)]
mod tests {
    use super::*;

    // https://docs.rs/clap/latest/clap/_derive/_tutorial/index.html#testing
    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn given_new_without_name_when_parse_then_missing_argument() {
        let err = Cli::try_parse_from(["grind75", "new", "42"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn given_no_arguments_when_parse_then_usage_error() {
        let err = Cli::try_parse_from(["grind75"]).unwrap_err();
        assert_eq!(
            err.kind(),
            ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
        );
    }
}
