//! astro CLI - phone camera settings for the night sky
//!
//! Thin wrapper over the `astro_guide` library:
//!
//! - One-shot mode: `astro --phone "Pixel 8 Pro" --target moon`
//! - Server mode: `astro --server` (JSON-RPC over stdio)
//!
//! Logs go to stderr; stdout carries only the guide (or JSON).

// Exclude from coverage - CLI binary tested via integration tests
#![cfg_attr(tarpaulin, ignore)]

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::warn;

use astro_guide::ai::{explainer_from_config, Explainer, OfflineExplainer};
use astro_guide::core::config::AiBackend;
use astro_guide::server::GuideServer;
use astro_guide::{AnalyzeRequest, AnalyzeResponse, GuideConfig, GuideEngine};

/// 🔭 Astro Guide: camera settings for photographing the night sky with a phone.
#[derive(Parser, Debug)]
#[command(name = "astro")]
#[command(version = astro_guide::VERSION)]
#[command(about = "🔭 Astro Guide: phone camera settings for the night sky")]
#[command(after_help = "EXAMPLES:
  # Settings for the Moon on a flagship phone
  astro --phone \"Galaxy S24 Ultra\" --target moon

  # Typos are fine
  astro --phone \"glaxy s24\" --target \"milky way\"

  # Machine-readable output, no network
  astro --phone \"Pixel 8\" --target jupiter --json --offline

  # Serve JSON-RPC on stdin/stdout
  astro --server
")]
struct Cli {
    // ═══════════════════════════════════════════════════════════════════════════
    // 🔭 REQUEST
    // ═══════════════════════════════════════════════════════════════════════════

    /// Phone model (fuzzy matched against the catalog)
    #[arg(short = 'p', long = "phone", value_name = "MODEL", help_heading = "🔭 REQUEST")]
    phone: Option<String>,

    /// Celestial target (moon, jupiter, andromeda, meteor, ...)
    #[arg(short = 't', long = "target", value_name = "TARGET", help_heading = "🔭 REQUEST")]
    target: Option<String>,

    // ═══════════════════════════════════════════════════════════════════════════
    // 📤 OUTPUT
    // ═══════════════════════════════════════════════════════════════════════════

    /// Print the full response as JSON
    #[arg(long = "json", help_heading = "📤 OUTPUT")]
    json: bool,

    /// List catalog phones and exit
    #[arg(long = "list-phones", help_heading = "📤 OUTPUT")]
    list_phones: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, help_heading = "📤 OUTPUT")]
    verbose: u8,

    // ═══════════════════════════════════════════════════════════════════════════
    // ⚙️ CONFIGURATION
    // ═══════════════════════════════════════════════════════════════════════════

    /// Config file path (default: per-user config dir)
    #[arg(short = 'c', long = "config", value_name = "FILE", help_heading = "⚙️ CONFIGURATION")]
    config: Option<PathBuf>,

    /// Phone catalog JSON (default: bundled catalog)
    #[arg(long = "catalog", value_name = "FILE", help_heading = "⚙️ CONFIGURATION")]
    catalog: Option<PathBuf>,

    /// Never call a remote model
    #[arg(long = "offline", help_heading = "⚙️ CONFIGURATION")]
    offline: bool,

    // ═══════════════════════════════════════════════════════════════════════════
    // 🛰️ SERVER
    // ═══════════════════════════════════════════════════════════════════════════

    /// Run as a JSON-RPC server on stdio
    #[arg(long = "server", help_heading = "🛰️ SERVER")]
    server: bool,
}

fn main() {
    let cli = Cli::parse();
    astro_guide::logging::init(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = match &cli.config {
        Some(path) => GuideConfig::from_file(path)?,
        None => GuideConfig::load_default(),
    }
    .with_env_overrides();

    if let Some(catalog) = &cli.catalog {
        config.catalog_path = Some(catalog.clone());
    }
    if cli.offline {
        config.ai.backend = AiBackend::Offline;
    }

    let catalog = Arc::new(config.load_catalog().context("loading phone catalog")?);

    if cli.list_phones {
        for name in catalog.names() {
            println!("{}", name);
        }
        return Ok(());
    }

    let explainer: Arc<dyn Explainer> = explainer_from_config(&config.ai).unwrap_or_else(|e| {
        warn!("{}; using offline explanations", e);
        Arc::new(OfflineExplainer::new())
    });
    let engine = Arc::new(GuideEngine::new(catalog).with_explainer(explainer));

    if cli.server {
        GuideServer::new(engine).run().context("server I/O")?;
        return Ok(());
    }

    let (Some(phone), Some(target)) = (cli.phone, cli.target) else {
        anyhow::bail!("--phone and --target are required (or use --list-phones / --server)");
    };

    let response = engine.analyze(&AnalyzeRequest::new(phone, target))?;
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        print_guide(&response);
    }
    Ok(())
}

fn print_guide(response: &AnalyzeResponse) {
    let phone = response
        .resolved_phone
        .as_deref()
        .unwrap_or("unknown phone (generic defaults)");

    println!("🔭 {} with {}", response.target, phone);
    println!("   {}", response.explanation.summary);
    println!();

    println!("📷 Camera setup ({})", response.category);
    println!("   Lens:    {}", response.lens.label());
    println!("   Mode:    {}", response.settings.mode);
    println!("   ISO:     {}", response.settings.iso);
    println!("   Shutter: {}", response.settings.shutter);
    println!("   Focus:   {}", response.settings.focus);
    println!("   Tripod:  {}", if response.settings.tripod { "Yes" } else { "No" });
    if let Some(warning) = &response.settings.warning {
        println!("   ⚠️  {}", warning);
    }
    println!();

    println!("🪜 Steps");
    for (i, step) in response.explanation.steps.iter().enumerate() {
        println!("   {}. {}: {}", i + 1, step.title, step.instruction);
    }
    println!();

    let direction = &response.direction.data;
    println!("🧭 Where to look");
    println!("   Direction: {}", direction.look_direction);
    println!("   Altitude:  {}", direction.altitude);
    println!("   Best time: {}", direction.best_time);
    println!("   Tip:       {}", direction.tip);
    println!("   {}", response.direction.explanation);
    println!();

    println!("🧭 How to find {}", response.target);
    let how_to_find = response.direction_ai.explanation.trim();
    if how_to_find.is_empty() {
        println!("   No location data available.");
    } else {
        for line in how_to_find.lines() {
            println!("   {}", line);
        }
    }
    println!();

    println!("🤖 Why these settings");
    for line in response.ai_summary.trim().lines() {
        println!("   {}", line);
    }
    println!();

    println!("✨ {}", response.explanation.expectation);
    println!("   Confidence: {}", response.explanation.confidence);
}
