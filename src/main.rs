//! qlcomplete - query completion from the command line
//!
//! Runs the completion engine once on a query (`complete`, `explain`) or
//! opens an interactive shell with Tab completion.
//!
//! # Usage
//!
//! ```bash
//! # Interactive mode
//! qlcomplete --dialect sql
//!
//! # One-shot completion at the end of a query
//! qlcomplete -l logs complete 'fields @message | stats '
//! ```

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use qlcomplete::cli::CliInterface;
use qlcomplete::error::Result;
use qlcomplete::repl::{ReplCommand, ReplContext, ReplEngine};

/// Application entry point
#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Main application logic
///
/// 1. Parse command-line arguments and load configuration
/// 2. Initialize logging
/// 3. Handle subcommands or start the interactive shell
async fn run() -> Result<()> {
    let cli = CliInterface::new()?;

    initialize_logging(&cli);

    if cli.handle_subcommand().await? {
        return Ok(());
    }

    cli.print_banner();

    run_interactive_mode(&cli).await
}

/// Run application in interactive REPL mode
async fn run_interactive_mode(cli: &CliInterface) -> Result<()> {
    let context = ReplContext::new(Arc::new(cli.build_engine()), cli.dialect());
    let mut repl = ReplEngine::new(&context, &cli.config().repl)?;

    run_repl_loop(&mut repl, &context).await?;

    println!("Goodbye!");
    Ok(())
}

/// Main REPL loop
async fn run_repl_loop(repl: &mut ReplEngine, context: &ReplContext) -> Result<()> {
    loop {
        let input = match repl.read_line()? {
            Some(line) if !line.trim().is_empty() => line,
            Some(_) => continue,
            None => break,
        };

        let command = match ReplCommand::parse(&input) {
            Ok(cmd) => cmd,
            Err(e) => {
                eprintln!("{}", e);
                continue;
            }
        };

        if command == ReplCommand::Quit {
            break;
        }

        let output = context.execute(&command).await;
        if !output.is_empty() {
            println!("{}", output);
        }
    }

    Ok(())
}

/// Initialize logging from the configured level
///
/// `RUST_LOG` overrides the level. Output goes to stderr so JSON written by
/// the one-shot commands stays parseable.
fn initialize_logging(cli: &CliInterface) {
    let level = cli.config().logging.level.to_tracing_level();
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_str().to_ascii_lowercase()));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    if cli.config().logging.timestamps {
        subscriber.init();
    } else {
        subscriber.without_time().init();
    }
}
