use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use trail_alert::{evaluate, pick_most_severe};
use trail_config::{AppConfig, ConfigLoader};
use trail_notify::{ApnsFactory, PushDispatcher};
use trail_server::{init_logging, send_connectivity_test, send_test_alert, AlertPipeline};
use trail_types::{DeviceDirectory, FileDirectory, SensorPayload, SensorSnapshot};

#[derive(Parser, Debug)]
#[command(author, version, about = "Smart Trails hazard alerts", long_about = None)]
struct Args {
    /// Config file path
    #[arg(short, long, default_value = "smart-trails.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Evaluate a station snapshot and print the alerts
    Evaluate {
        /// Snapshot JSON file (station payload)
        #[arg(short, long)]
        snapshot: PathBuf,
        /// Station label used in alert messages
        #[arg(short, long)]
        label: Option<String>,
    },
    /// Evaluate a snapshot and push the most severe alert to subscribed devices
    Notify {
        #[arg(short, long)]
        snapshot: PathBuf,
        #[arg(short, long)]
        label: Option<String>,
        /// Device list JSON file
        #[arg(short, long)]
        devices: PathBuf,
    },
    /// Send a random sample alert to active devices
    TestAlert {
        #[arg(short, long)]
        devices: PathBuf,
        /// Only send to this device token
        #[arg(short, long)]
        token: Option<String>,
    },
    /// Send a connectivity test notification to one device
    TestPush {
        #[arg(short, long)]
        devices: PathBuf,
        #[arg(short, long)]
        token: String,
    },
    /// Print the effective configuration
    ShowConfig,
}

fn load_snapshot(path: &Path) -> Result<SensorSnapshot> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read snapshot {}", path.display()))?;
    let payload: SensorPayload = serde_json::from_str(&content)
        .with_context(|| format!("invalid snapshot {}", path.display()))?;
    Ok(SensorSnapshot::from_payload(&payload))
}

fn build_dispatcher(config: &AppConfig) -> Result<PushDispatcher> {
    config.validate()?;

    let timeout = config.dispatch.timeout();
    let dispatcher = PushDispatcher::new(ApnsFactory::new(config.apns.clone(), timeout), timeout)?;

    // 配置错误在启动时暴露
    dispatcher.connect()?;
    Ok(dispatcher)
}

fn run(args: Args, config: AppConfig) -> Result<bool> {
    match args.command {
        Command::Evaluate { snapshot, label } => {
            let snapshot = load_snapshot(&snapshot)?;
            let label = label.unwrap_or_else(|| snapshot.label().to_string());

            let alerts = evaluate(&snapshot, &label);
            let output = serde_json::json!({
                "station": label,
                "alerts": alerts,
                "most_severe": pick_most_severe(&alerts),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
            Ok(true)
        }
        Command::Notify {
            snapshot,
            label,
            devices,
        } => {
            let snapshot = load_snapshot(&snapshot)?;
            let label = label.unwrap_or_else(|| snapshot.label().to_string());
            let directory = Arc::new(FileDirectory::load(&devices)?);
            let dispatcher = Arc::new(build_dispatcher(&config)?);

            let outcome = AlertPipeline::new(dispatcher, directory).process(&snapshot, &label);
            match &outcome.chosen {
                Some(alert) => println!(
                    "{} alert(s). Sent to {} devices. Failed: {}. Alert: {}",
                    outcome.alerts.len(),
                    outcome.report.sent,
                    outcome.report.failed,
                    alert.title
                ),
                None => println!("No alerts for {}", label),
            }
            Ok(outcome.report.all_sent())
        }
        Command::TestAlert { devices, token } => {
            let directory = FileDirectory::load(&devices)?;
            let targets = match token {
                Some(token) => vec![directory
                    .find_active(&token)
                    .ok_or_else(|| anyhow!("Device not found or inactive"))?],
                None => directory.active_targets(None),
            };

            if targets.is_empty() {
                println!("No active devices selected");
                return Ok(true);
            }

            let dispatcher = build_dispatcher(&config)?;
            let outcome = send_test_alert(&dispatcher, &targets);
            println!("{}", outcome.summary());
            Ok(outcome.report.all_sent())
        }
        Command::TestPush { devices, token } => {
            let directory = FileDirectory::load(&devices)?;
            let target = directory
                .find_active(&token)
                .ok_or_else(|| anyhow!("Device not found or inactive"))?;

            let dispatcher = build_dispatcher(&config)?;
            if send_connectivity_test(&dispatcher, &target) {
                println!("Notification sent");
                Ok(true)
            } else {
                println!("Failed to send notification");
                Ok(false)
            }
        }
        Command::ShowConfig => {
            print!("{}", config.to_toml()?);
            Ok(true)
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    let config = match ConfigLoader::new(&args.config).load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config {}: {:#}", args.config.display(), e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = init_logging(&config.logging) {
        eprintln!("{:#}", e);
        return ExitCode::FAILURE;
    }

    tracing::info!("Starting Smart Trails with config: {}", args.config.display());

    match run(args, config) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(2),
        Err(e) => {
            tracing::error!(error = %e, "Command failed");
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
