//! Command line tests
//!
//! Parse real argument lists and run the demo session on a paused tokio
//! clock, so the simulated upload and processing finish instantly.

use app_core::{Error, PresetId};
use app_state::AppConfig;
use app_ui::AppError;
use clap::Parser;
use imagify::cli::{Cli, Command, DemoArgs, LogFormatArg};
use imagify::demo::run_demo;

fn demo_args(args: &[&str]) -> DemoArgs {
    let argv = ["imagify", "demo"].iter().chain(args).copied();
    match Cli::try_parse_from(argv).unwrap().command {
        Command::Demo(args) => args,
        other => panic!("expected demo, got {:?}", other),
    }
}

/// Bare `demo` picks the vintage preset so processing has something to apply
#[test]
fn test_demo_defaults() {
    let args = demo_args(&[]);
    assert_eq!(args.preset, PresetId::Vintage);
    assert_eq!(args.prompt, None);
    assert_eq!(args.mime_type, "image/jpeg");
    assert!(!args.no_share);
}

/// Unknown preset ids are rejected by the parser
#[test]
fn test_unknown_preset_rejected() {
    let err = Cli::try_parse_from(["imagify", "demo", "--preset", "bogus"]).unwrap_err();
    assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
}

/// Global flags are accepted after the subcommand
#[test]
fn test_global_flags_after_subcommand() {
    let cli = Cli::try_parse_from(["imagify", "presets", "--log-format", "json"]).unwrap();
    assert_eq!(cli.log_format, LogFormatArg::Json);
    assert!(matches!(cli.command, Command::Presets));
}

/// The default invocation runs to a saved, shared result
#[tokio::test(start_paused = true)]
async fn test_default_demo_succeeds() {
    let summary = run_demo(AppConfig::default(), &demo_args(&[]))
        .await
        .unwrap();

    assert_eq!(summary.prompt, PresetId::Vintage.preset().prompt);
    assert_eq!(summary.original, summary.processed);
    assert!(summary.original.as_str().starts_with("blob:"));
    assert!(summary.shared);
}

/// `--prompt` replaces the preset's text
#[tokio::test(start_paused = true)]
async fn test_prompt_overrides_preset() {
    let args = demo_args(&["--preset", "noir", "--prompt", "Paint it gold"]);
    let summary = run_demo(AppConfig::default(), &args).await.unwrap();
    assert_eq!(summary.prompt, "Paint it gold");
}

/// Without a share sheet the demo still succeeds
#[tokio::test(start_paused = true)]
async fn test_no_share_is_not_a_failure() {
    let args = demo_args(&["--preset", "cyberpunk", "--no-share"]);
    let summary = run_demo(AppConfig::default(), &args).await.unwrap();

    assert!(!summary.shared);
    assert_eq!(summary.prompt, PresetId::Cyberpunk.preset().prompt);
}

/// A non-image file stops the demo before any upload starts
#[tokio::test(start_paused = true)]
async fn test_non_image_rejected() {
    let args = demo_args(&["--file-name", "notes.pdf", "--mime", "application/pdf"]);
    let err = run_demo(AppConfig::default(), &args).await.unwrap_err();

    assert_eq!(err.to_string(), "file rejected");
    assert!(matches!(
        err.downcast_ref::<AppError>(),
        Some(AppError::Flow(Error::InvalidFileType { .. }))
    ));
}

/// A blank prompt leaves nothing to process
#[tokio::test(start_paused = true)]
async fn test_blank_prompt_fails() {
    let args = demo_args(&["--prompt", "   "]);
    let err = run_demo(AppConfig::default(), &args).await.unwrap_err();

    assert!(matches!(
        err.downcast_ref::<AppError>(),
        Some(AppError::Flow(Error::EmptyPrompt))
    ));
}
