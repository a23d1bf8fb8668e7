//! Announce CLI: run the announcement pipeline on a request JSON file.

use std::env;
use std::path::PathBuf;

use anyhow::Result;
use announce_core::{AnnounceConfig, AnnouncementRequest, Pipeline};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    let (request_path, config_path, text_only) = parse_args(&args);

    let config = match config_path {
        Some(p) => AnnounceConfig::load_path(&p)?,
        None => AnnounceConfig::default(),
    }
    .apply_env();

    let request = AnnouncementRequest::load_path(&request_path)?;
    let pipeline = Pipeline::from_config(&config)
        .map_err(|e| anyhow::anyhow!("{} stage failed: {e}", e.stage()))?;

    if text_only {
        let text = pipeline
            .generate_text(&request)
            .map_err(|e| anyhow::anyhow!("{} stage failed: {e}", e.stage()))?;
        println!("{text}");
        return Ok(());
    }

    let artifact = pipeline
        .run(&request)
        .map_err(|e| anyhow::anyhow!("{} stage failed: {e}", e.stage()))?;

    println!("Announcement:\n{}", artifact.final_text);
    if let Some(path) = artifact.primary_audio() {
        eprintln!("Saved audio -> {}", path.display());
    }
    for (fmt, path) in &artifact.exports {
        eprintln!("Exported {} -> {}", fmt, path.display());
    }
    Ok(())
}

fn parse_args(args: &[String]) -> (PathBuf, Option<PathBuf>, bool) {
    let mut request = PathBuf::from("request.json");
    let mut config = None;
    let mut text_only = false;
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "run" => {
                i += 1;
                if i < args.len() && !args[i].starts_with('-') {
                    request = PathBuf::from(&args[i]);
                    i += 1;
                }
            }
            "--config" | "-c" => {
                i += 1;
                if i < args.len() {
                    config = Some(PathBuf::from(&args[i]));
                    i += 1;
                }
            }
            "--text-only" | "-t" => {
                text_only = true;
                i += 1;
            }
            _ => {
                if !args[i].starts_with('-') {
                    request = PathBuf::from(&args[i]);
                }
                i += 1;
            }
        }
    }
    (request, config, text_only)
}
