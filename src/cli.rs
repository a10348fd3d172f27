//! Command line definitions.

use std::path::PathBuf;

use app_core::PresetId;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(
    name = "imagify",
    version,
    about = "Imagify - drive the photo-editing flows from the terminal",
    long_about = "Runs the headless Imagify app: pick an image, upload it, describe a \
                  transformation and review the result.\n\n\
                  Uploads and processing are simulated; no image data is read or written."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Runtime configuration file (JSON). Defaults apply when omitted.
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Log output format.
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Log level used when RUST_LOG is not set.
    #[arg(long = "log-level", value_enum, default_value = "info", global = true)]
    pub log_level: LogLevelArg,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Walk one image through upload, edit and result.
    Demo(DemoArgs),

    /// List the transformation presets.
    Presets,
}

#[derive(Debug, Clone, Parser)]
pub struct DemoArgs {
    /// File name reported by the picker.
    #[arg(long = "file-name", default_value = "photo.jpg")]
    pub file_name: String,

    /// MIME type reported by the picker.
    #[arg(long = "mime", default_value = "image/jpeg")]
    pub mime_type: String,

    /// File size in bytes.
    #[arg(long = "size", default_value_t = 2 * 1024 * 1024)]
    pub size: u64,

    /// Preset to apply before processing.
    #[arg(long = "preset", value_name = "ID", default_value = "vintage")]
    pub preset: PresetId,

    /// Instruction text; replaces the preset's text when both are given.
    #[arg(long = "prompt")]
    pub prompt: Option<String>,

    /// Behave as a platform without a share sheet.
    #[arg(long = "no-share")]
    pub no_share: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}
