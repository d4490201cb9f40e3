//! Command-line front end for the supply-risk SDK.
//!
//! ## Commands
//!
//! - `supply-scan scan` - Analyze all tracked commodities, save the snapshot, alert on CRITICAL
//! - `supply-scan investigate <commodity>` - Live analysis of one commodity
//! - `supply-scan compare <commodity>...` - Comparative summary
//! - `supply-scan report` - Print the saved snapshot
//! - `supply-scan list` - Print the tracked commodities
//! - `supply-scan tools` - Print the tool definitions
//! - `supply-scan call <tool> [args]` - Invoke a tool with JSON arguments

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use supply_risk::tools::ToolKit;
use supply_risk::{CollectStrategy, SeverityFilter, SupplyRisk};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "supply-scan")]
#[command(about = "Commodity price volatility scanner")]
struct Cli {
    /// Directory holding latest_report.json
    #[arg(long, env = "SUPPLY_RISK_DATA_DIR", global = true)]
    data_dir: Option<PathBuf>,

    /// Resolve keywords to product codes first (default) or filter by name
    #[arg(long, value_enum, default_value = "two-step", global = true)]
    strategy: Strategy,

    /// Upstream request timeout in seconds
    #[arg(long, default_value_t = 30, global = true)]
    timeout_secs: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum Strategy {
    Direct,
    TwoStep,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze all tracked commodities, save the snapshot and alert on CRITICAL
    Scan {
        /// Recipient for CRITICAL alerts; no alert is sent when unset
        #[arg(long, env = "ALERT_EMAIL")]
        alert_email: Option<String>,
    },
    /// Fetch live prices for one commodity and compute its risk
    Investigate { commodity: String },
    /// Analyze several commodities and summarize them side by side
    Compare {
        #[arg(required = true)]
        commodities: Vec<String>,
    },
    /// Print the latest saved report
    Report,
    /// Print the tracked commodity list
    List,
    /// Print the tool definitions
    Tools,
    /// Invoke a tool by name with JSON arguments
    Call {
        tool: String,
        #[arg(default_value = "{}")]
        arguments: String,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("supply_risk=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut builder = SupplyRisk::builder()
        .timeout(Duration::from_secs(cli.timeout_secs))
        .strategy(match cli.strategy {
            Strategy::Direct => CollectStrategy::Direct,
            Strategy::TwoStep => CollectStrategy::TwoStep,
        });
    if let Some(dir) = cli.data_dir {
        builder = builder.data_dir(dir);
    }
    let risk = builder.build().context("Failed to initialize SDK")?;
    tracing::debug!(%risk, "sdk ready");

    match cli.command {
        Commands::Scan { alert_email } => {
            let snapshot = risk.scan().context("Failed to save snapshot")?;
            if let Some(recipient) = alert_email {
                let critical = SeverityFilter::Critical.select(&snapshot.commodities);
                if !critical.is_empty() {
                    let outcome = risk.alerts().send_report_alert(
                        &critical,
                        &recipient,
                        None,
                        SeverityFilter::Critical,
                    );
                    if let Some(err) = &outcome.error {
                        tracing::warn!(error = %err, "alert not sent");
                    }
                }
            }
            print_json(&snapshot)
        }
        Commands::Investigate { commodity } => print_json(&risk.analyze_commodity(&commodity)),
        Commands::Compare { commodities } => print_json(&risk.compare(&commodities)),
        Commands::Report => print_json(&risk.tools().get_supply_chain_report()?),
        Commands::List => print_json(&risk.commodities()),
        Commands::Tools => print_json(&ToolKit::definitions()),
        Commands::Call { tool, arguments } => {
            let args: serde_json::Value =
                serde_json::from_str(&arguments).context("Tool arguments must be JSON")?;
            print_json(&risk.tools().call(&tool, args)?)
        }
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
