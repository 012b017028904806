use clap::Parser;
use crypto_ticker::cli::{Cli, Commands};
use crypto_ticker::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration, falling back to the bundled defaults
    let config = Config::load(&cli.config).unwrap_or_else(|e| {
        eprintln!("Warning: Could not load config from {}: {}", cli.config, e);
        eprintln!("Using default configuration");
        toml::from_str(include_str!("../config.toml.example")).expect("Invalid default config")
    });

    // Initialize telemetry
    crypto_ticker::telemetry::init_telemetry(&config.telemetry)?;

    match cli.command {
        Commands::Price(args) => {
            args.execute(&config).await?;
        }
        Commands::History(args) => {
            args.execute(&config).await?;
        }
        Commands::Config => {
            println!("Current configuration:");
            println!(
                "  Feed: {} (timeout {}s)",
                config.feed.base_url, config.feed.timeout_secs
            );
            println!("  Store: {:?}", config.store.data_dir);
            println!("  Log level: {}", config.telemetry.log_level);
        }
    }

    Ok(())
}
