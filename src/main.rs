use std::io::{self, Write};
use std::process;

use clap::{CommandFactory, Parser};
use clap_complete::generate;
use googlecl::application::shell::INTERRUPT_MESSAGE;
use googlecl::cli::args::Cli;
use googlecl::cli::commands::execute;
use googlecl::cli::output;
use googlecl::exitcode;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::filter::filter_fn;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

fn main() {
    let cli = Cli::parse();

    if let Some(shell) = cli.completions {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(shell, &mut cmd, name, &mut io::stdout());
        return;
    }

    setup_logging(cli.verbose);
    install_interrupt_handler(cli.task.words.is_empty());

    match execute(cli) {
        Ok(code) => process::exit(code),
        Err(e) => {
            output::error(&e);
            process::exit(e.exit_code());
        }
    }
}

/// Ctrl-C while a prompt blocks on stdin ends the program quietly.
fn install_interrupt_handler(interactive: bool) {
    let result = ctrlc::set_handler(move || {
        let mut stdout = io::stdout();
        let _ = writeln!(stdout);
        if interactive {
            let _ = writeln!(stdout, "{INTERRUPT_MESSAGE}");
        }
        let _ = stdout.flush();
        process::exit(exitcode::OK);
    });
    if let Err(e) = result {
        tracing::warn!("could not install Ctrl-C handler: {}", e);
    }
}

fn setup_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        3 => LevelFilter::TRACE,
        _ => {
            eprintln!("Don't be crazy, max is -v -v -v");
            LevelFilter::TRACE
        }
    };

    // rustyline logs every keystroke at trace
    let noisy_modules = ["rustyline"];
    let module_filter = filter_fn(move |metadata| {
        !noisy_modules
            .iter()
            .any(|name| metadata.target().starts_with(name))
    });

    let fmt_layer = fmt::layer()
        .with_writer(io::stderr)
        .with_target(true)
        .with_thread_names(false)
        .with_span_events(FmtSpan::CLOSE);

    let filtered_layer = fmt_layer.with_filter(filter).with_filter(module_filter);

    tracing_subscriber::registry().with(filtered_layer).init();

    match filter {
        LevelFilter::INFO => tracing::info!("Debug mode: info"),
        LevelFilter::DEBUG => tracing::debug!("Debug mode: debug"),
        LevelFilter::TRACE => tracing::debug!("Debug mode: trace"),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use googlecl::util::testing;
    use tracing::info;

    #[test]
    fn verify_cli() {
        testing::init_test_logging();
        Cli::command().debug_assert();
        info!("Debug mode: info");
    }
}
