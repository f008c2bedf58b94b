//! jtreg-launch - create a debug launch config for a JTREG test run
//!
//! Runs the given build command, scrapes the JVM invocation from its
//! "rerun" output and adds it to `.vscode/launch.json`.

use clap::{CommandFactory, Parser};
use jtreg_launch::cli;
use jtreg_launch::commands::GenerateArgs;
use jtreg_launch::common::{config::Config, logging};

#[derive(Parser)]
#[command(
    name = "jtreg-launch",
    about = "Create a debug launch config for a JTREG test run"
)]
#[command(version, long_about = None)]
struct Cli {
    #[command(flatten)]
    args: GenerateArgs,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if e.use_stderr() => {
            // Usage errors: show the full help, exit with 2
            let _ = e.print();
            eprintln!();
            let _ = Cli::command().write_help(&mut std::io::stderr());
            std::process::exit(2);
        }
        Err(e) => e.exit(),
    };

    logging::init_cli();

    let result = match Config::load() {
        Ok(config) => cli::dispatch(cli.args, &config).await,
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
