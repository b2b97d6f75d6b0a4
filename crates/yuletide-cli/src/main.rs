use clap::{CommandFactory, Parser, Subcommand};
use yuletide_core::Config;

mod commands;
mod console;
mod logging;

#[derive(Parser)]
#[command(name = "yuletide", version, about = "Is it Christmas yet?")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive check session
    Check(commands::check::CheckArgs),
    /// Run a single check and exit
    Once(commands::check::OnceArgs),
    /// List the Christmas recognition patterns
    Patterns {
        /// Show which patterns match this text
        text: Option<String>,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Generate shell completions
    Completions {
        shell: clap_complete::Shell,
    },
}

fn main() {
    let cli = Cli::parse();

    let config = Config::load();
    let log_level = config
        .as_ref()
        .map(|c| c.log.level.clone())
        .unwrap_or_else(|_| Config::default().log.level);
    logging::init(&log_level);
    let config = config.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "using default configuration");
        Config::default()
    });

    let result = match cli.command {
        Commands::Check(args) => commands::check::run(args, &config),
        Commands::Once(args) => commands::check::run_once(args, &config),
        Commands::Patterns { text } => commands::patterns::run(text),
        Commands::Config { action } => commands::config::run(action),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "yuletide", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
