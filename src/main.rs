use clap::Parser;
use vobreakout::cli::{Cli, Commands};
use vobreakout::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(&cli.config).unwrap_or_else(|e| {
        eprintln!("Warning: Could not load config from {}: {}", cli.config, e);
        eprintln!("Using default configuration");
        toml::from_str(include_str!("../config.toml.example")).expect("Invalid default config")
    });

    // Initialize telemetry
    let _guard = vobreakout::telemetry::init_telemetry(&config.telemetry)?;

    match cli.command {
        Commands::Rebalance(args) => {
            args.execute(&config).await?;
        }
        Commands::Backtest(args) => {
            args.execute(&config).await?;
        }
        Commands::Config => {
            println!("Current configuration:");
            println!(
                "  Signal: breakout={} vol_mult={}",
                config.signal.breakout_threshold, config.signal.vol_multiplier
            );
            println!(
                "  Risk: per_trade={} max_positions={} gross_cap={} per_name_cap={:?}",
                config.risk.per_trade_risk,
                config.risk.max_positions,
                config.risk.max_gross_exposure,
                config.risk.per_name_cap
            );
            println!("  Execution: {:?}", config.execution.mode);
            println!("  Data: {} ({}d lookback)", config.data.base_url, config.data.days_back);
        }
    }

    Ok(())
}
