//! cardsearch CLI - card search from the terminal
//!
//! This is the main entry point for the cardsearch command-line tool, which provides:
//! - Sample query preview, rendered by the same components the web page mounts
//! - Natural-language card search with the server warm-up indicator
//! - Config inspection and initialization
//! - Shell completions

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};

mod commands;
mod config;
mod tracing_setup;
mod ui;

#[derive(Parser, Debug)]
#[command(
    name = "cardsearch",
    author,
    version,
    about = "Natural-language card search and sample query browser",
    long_about = "Search the card database in plain English, preview the sample query \
                  catalog, and watch for server cold starts."
)]
struct Cli {
    /// Suppress progress spinners (for script consumption)
    #[arg(long, short = 'q', global = true)]
    quiet: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Export traces over OTLP (requires the telemetry feature)
    #[arg(long, global = true)]
    otel: bool,

    /// Base URL of the search API
    #[arg(long, global = true, env = "CARDSEARCH_API_URL", value_name = "URL")]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Preview the sample query catalog (text, JSON or rendered HTML)
    Samples(commands::samples::SamplesArgs),
    /// Search cards with a natural-language query
    Search(commands::search::SearchArgs),
    /// Manage cardsearch configuration (path, show, init)
    Config(config::ConfigArgs),
    /// Generate shell completion scripts
    Completions(CompletionsArgs),
}

#[derive(Parser, Debug)]
struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    shell: Shell,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)] // PowerShell is a proper noun, not a suffix
enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // .env must be loaded before parsing so CARDSEARCH_API_URL can come from it
    load_dotenv();
    let cli = Cli::parse();

    tracing_setup::init(&tracing_setup::TracingConfig {
        debug: cli.debug,
        otel: cli.otel,
    })
    .ok();
    ui::init_quiet_mode(cli.quiet);

    let api_url = cli.api_url.as_deref();
    let result = match cli.command {
        Commands::Samples(args) => commands::run_samples(args, &config::load(api_url)).await,
        Commands::Search(args) => commands::run_search(args, &config::load(api_url)).await,
        Commands::Config(args) => config::run_config(args, api_url),
        Commands::Completions(args) => run_completions(args),
    };

    tracing_setup::shutdown_otel();
    result
}

fn load_dotenv() {
    if let Some(home) = dirs::home_dir() {
        let _ = dotenvy::from_path(home.join(".cardsearch/.env"));
    }
    let _ = dotenvy::dotenv(); // Also check cwd
}

fn run_completions(args: CompletionsArgs) -> Result<()> {
    use clap::CommandFactory;
    use clap_complete::{generate, Shell as CompletionShell};
    use std::io;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();

    let shell = match args.shell {
        Shell::Bash => CompletionShell::Bash,
        Shell::Zsh => CompletionShell::Zsh,
        Shell::Fish => CompletionShell::Fish,
        Shell::PowerShell => CompletionShell::PowerShell,
        Shell::Elvish => CompletionShell::Elvish,
    };

    generate(shell, &mut cmd, bin_name, &mut io::stdout());

    Ok(())
}
