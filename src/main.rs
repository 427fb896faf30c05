use clap::{Parser, Subcommand};
use portfolio_behavior::{config, output};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "portfolio-behavior")]
#[command(about = "Configuration tooling for the portfolio page behavior layer")]
#[command(long_about = "\
Configuration tooling for the portfolio page behavior layer

The behavior layer ships as WebAssembly and reads its settings from a JSON
block embedded in the page:

  <script type=\"application/json\" id=\"behavior-config\">
    ...output of `portfolio-behavior export`...
  </script>

Settings are authored as a sparse behavior.toml merged over stock defaults.
Without the block, the page runs on the stock defaults.

Run 'portfolio-behavior gen-config' to generate a documented behavior.toml.")]
#[command(version)]
struct Cli {
    /// Behavior config file (missing file = stock defaults)
    #[arg(long, default_value = "behavior.toml", global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print a stock behavior.toml with all options documented
    GenConfig,
    /// Load and validate the config, then summarize it
    Check,
    /// Print the resolved config as JSON for embedding in the page
    Export,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
        Command::Check => {
            let resolved = config::load_config(&cli.config)?;
            let source = cli.config.exists().then_some(cli.config.as_path());
            output::print_config_summary(&resolved, source);
            println!("==> Config is valid");
        }
        Command::Export => {
            let resolved = config::load_config(&cli.config)?;
            println!("{}", config::to_json(&resolved)?);
        }
    }

    Ok(())
}
