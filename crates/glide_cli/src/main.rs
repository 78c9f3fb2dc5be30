//! Glide CLI
//!
//! Relocate elements of a scene and print the resulting layout.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use glide_animation::{Easing, TweenScheduler};
use glide_dom::{Document, NodeId, Tree};
use glide_relocate::{Dispatch, RelocationRequest, Relocator, RelocatorConfig};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod scene;

use scene::Scene;

#[derive(Parser)]
#[command(name = "glide")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Move document elements with animated transitions", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Relocate the elements matching a selector and print the result
    Run(RunArgs),

    /// Print the built-in scene
    Scene,
}

#[derive(Args)]
struct RunArgs {
    /// Scene file (TOML). Defaults to the built-in scene.
    #[arg(long)]
    scene: Option<PathBuf>,

    /// Selector of the elements to move
    #[arg(short, long)]
    source: String,

    /// Selector of the element to move to
    #[arg(short, long)]
    target: String,

    /// appendTo, prependTo, insertBefore or insertAfter (kebab and snake case accepted)
    #[arg(short, long)]
    mode: Option<String>,

    /// relativeToTarget, relativeToSource or absolute (kebab and snake case accepted)
    #[arg(short, long)]
    position: Option<String>,

    /// Transition duration in milliseconds
    #[arg(short, long)]
    duration: Option<u64>,

    /// linear, swing, ease-in, ease-out or ease-in-out
    #[arg(short, long)]
    easing: Option<String>,

    /// Frame delta in milliseconds
    #[arg(long, default_value = "16")]
    frame: u64,

    /// Move the elements back afterwards
    #[arg(long)]
    back: bool,

    /// Relocator configuration file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print every document mutation
    #[arg(long)]
    journal: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins over the defaults
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    match cli.command {
        Commands::Run(args) => cmd_run(&args),
        Commands::Scene => cmd_scene(),
    }
}

/// `insert-after` and `insert_after` become `insertAfter`; other names pass through
fn camel_case(name: &str) -> String {
    if !name.contains(['-', '_']) {
        return name.to_string();
    }
    let mut out = String::with_capacity(name.len());
    for (i, part) in name.split(['-', '_']).enumerate() {
        if i == 0 {
            out.push_str(&part.to_lowercase());
            continue;
        }
        let mut chars = part.chars();
        if let Some(head) = chars.next() {
            out.extend(head.to_uppercase());
            out.push_str(&chars.as_str().to_lowercase());
        }
    }
    out
}

fn build_request(args: &RunArgs) -> Result<RelocationRequest<Tree>> {
    let mut request = RelocationRequest::new(args.target.as_str());
    if let Some(mode) = &args.mode {
        request = request.mode_named(camel_case(mode));
    }
    if let Some(position) = &args.position {
        request = request.position_named(camel_case(position));
    }
    if let Some(ms) = args.duration {
        request = request.duration_ms(ms);
    }
    if let Some(easing) = &args.easing {
        let easing: Easing = easing.parse().map_err(anyhow::Error::msg)?;
        request = request.easing(easing);
    }
    Ok(request.on_complete(|doc: &mut Tree, node| info!("Landed {}", doc.describe(node))))
}

fn settle(tweens: &mut TweenScheduler<Tree>, doc: &mut Tree, frame: Duration) {
    let frames = tweens.run_until_idle(doc, frame);
    info!("Settled after {} frames ({:?})", frames, frame * frames as u32);
}

fn cmd_run(args: &RunArgs) -> Result<()> {
    let config = match &args.config {
        Some(path) => RelocatorConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => RelocatorConfig::default(),
    };
    let scene = match &args.scene {
        Some(path) => Scene::load(path)?,
        None => Scene::builtin()?,
    };
    let frame = Duration::from_millis(args.frame.max(1));

    let mut doc = scene.build()?;
    let mut tweens = TweenScheduler::new();
    let relocator = Relocator::new(config);

    let request = build_request(args)?;
    let results = relocator
        .relocate_matching(&mut doc, &mut tweens, &args.source, request)
        .with_context(|| format!("Cannot relocate '{}'", args.source))?;

    let mut moved: Vec<NodeId> = Vec::new();
    for (node, result) in results {
        match result {
            Ok(Dispatch::Started(position)) => {
                info!("Moving {} ({})", doc.describe(node), position);
                moved.push(node);
            }
            Ok(Dispatch::Queued { position }) => info!("Queued {} at {}", doc.describe(node), position),
            Err(err) => warn!("Skipped {}: {}", doc.describe(node), err),
        }
    }
    settle(&mut tweens, &mut doc, frame);

    if args.back {
        for node in &moved {
            relocator
                .relocate_back(&mut doc, &mut tweens, *node)
                .with_context(|| format!("Cannot move {} back", doc.describe(*node)))?;
        }
        settle(&mut tweens, &mut doc, frame);
    }

    print!("{}", doc.outline());

    if args.journal {
        println!();
        for mutation in doc.journal() {
            println!("{:?}", mutation);
        }
    }

    Ok(())
}

fn cmd_scene() -> Result<()> {
    print!("{}", scene::BUILTIN);
    Ok(())
}
