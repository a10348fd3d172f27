//! Imagify command line.

use std::io::{self, IsTerminal};

use anyhow::Context;
use app_core::PRESETS;
use app_state::AppConfig;
use clap::Parser;
use imagify::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use imagify::demo::run_demo;
use imagify::logging::{init_logging, LogConfig, LogFormat};
use tracing::level_filters::LevelFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(&log_config_from_cli(&cli)).context("failed to initialize logging")?;

    let config = match &cli.config {
        Some(path) => AppConfig::load(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => AppConfig::default(),
    };

    match cli.command {
        Command::Demo(args) => {
            let summary = run_demo(config, &args).await?;
            println!("original:  {}", summary.original);
            println!("processed: {}", summary.processed);
            println!("prompt:    {}", summary.prompt);
            if !summary.shared {
                println!("share:     unavailable");
            }
            Ok(())
        }
        Command::Presets => {
            for preset in &PRESETS {
                println!("{:<12} {:<12} {}", preset.id.as_str(), preset.name, preset.prompt);
            }
            Ok(())
        }
    }
}

fn log_config_from_cli(cli: &Cli) -> LogConfig {
    LogConfig {
        level: match cli.log_level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        },
        format: match cli.log_format {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Compact => LogFormat::Compact,
            LogFormatArg::Json => LogFormat::Json,
        },
        with_ansi: io::stderr().is_terminal(),
    }
}
