//! `pio-uploadfs`: build and upload the LittleFS image of a PlatformIO project.

mod cli;

use anyhow::Context;
use clap::Parser;
use cli::Cli;
use pio_uploadfs::{
    locate, prompt_for_command, upload_filesystem, Resolution, SystemRunner, UploadError,
};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli);

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            if let Some(upload) = e.downcast_ref::<UploadError>() {
                eprintln!("Error: {upload}");
                if let Some(command) = upload.failed_command() {
                    eprintln!("Failed command: {command}");
                }
                eprintln!("To fix: {}", upload.fix_suggestion());
            } else {
                eprintln!("Error: {e:#}");
            }
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(cli: &Cli) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_filter()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let project_dir = match &cli.project_dir {
        Some(dir) => dir.clone(),
        None => std::env::current_dir().context("cannot determine current directory")?,
    };
    let options = cli.upload_options(project_dir);
    let candidates = cli.candidates();

    if cli.locate_only {
        let resolution = locate(&candidates, &SystemRunner, &options.locate).await;
        print_resolution(&resolution, cli.json)?;
        return Ok(if resolution.is_found() {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        });
    }

    let no_prompt = cli.no_prompt;
    let fallback = || ask_operator(no_prompt);

    let tool = upload_filesystem(&candidates, &SystemRunner, &options, fallback, |progress| {
        tracing::debug!(stage = progress.description(), "progress");
    })
    .await?;

    let tool = tool.to_string_lossy();
    println!("LittleFS filesystem uploaded with {tool}.");
    Ok(ExitCode::SUCCESS)
}

/// Ask on the terminal for a substitute build tool.
///
/// Stdin is read on the blocking pool so the runtime thread stays free.
async fn ask_operator(no_prompt: bool) -> Option<String> {
    if no_prompt {
        return None;
    }
    let prompt = || prompt_for_command(std::io::stdin().lock(), std::io::stdout());
    match tokio::task::spawn_blocking(prompt).await {
        Ok(Ok(answer)) => answer,
        Ok(Err(e)) => {
            tracing::warn!(error = %e, "failed to read answer");
            None
        }
        Err(e) => {
            tracing::warn!(error = %e, "prompt task failed");
            None
        }
    }
}

fn print_resolution(resolution: &Resolution, json: bool) -> anyhow::Result<()> {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(resolution).context("cannot serialize resolution")?
        );
        return Ok(());
    }

    match resolution {
        Resolution::FoundByPath { path } => println!("{}", path.display()),
        Resolution::FoundByProbe {
            command,
            path,
            version,
        } => {
            let location = path
                .as_ref()
                .map(|p| format!(" ({})", p.display()))
                .unwrap_or_default();
            let version = version
                .as_ref()
                .map(|v| format!(", version {v}"))
                .unwrap_or_default();
            println!("{command}{location}{version}");
        }
        Resolution::NotFound => println!("not found"),
    }
    Ok(())
}
