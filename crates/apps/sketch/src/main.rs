//! Sketch CLI - generate tower scenes from random color palettes

use anyhow::Context;
use clap::{Parser, Subcommand};
use palette::PaletteSource;
use scene::{draw_scene, RegenerateOutcome, ShapeKind};
use sketch::{build_controller, build_session, FrameStats, OrbitCamera, SceneArgs};
use tokio::io::BufReader;
use tracing_subscriber::EnvFilter;

/// Sketch CLI - procedural tower scenes
#[derive(Parser)]
#[command(name = "sketch")]
#[command(about = "Generate tower scenes colored by random palettes", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate one scene and print a summary
    Generate {
        #[command(flatten)]
        scene: SceneArgs,

        /// Print the full scene as JSON
        #[arg(long)]
        json: bool,
    },

    /// Fetch palettes and print them
    Palettes {
        #[command(flatten)]
        scene: SceneArgs,

        /// Print palettes as JSON
        #[arg(long)]
        json: bool,
    },

    /// Regenerate and render scenes from commands on stdin
    Interactive {
        #[command(flatten)]
        scene: SceneArgs,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate { scene, json } => generate_command(scene, json).await,
        Commands::Palettes { scene, json } => palettes_command(scene, json).await,
        Commands::Interactive { scene } => interactive_command(scene).await,
    }
}

async fn generate_command(args: SceneArgs, json: bool) -> anyhow::Result<()> {
    let config = args.load()?;
    let controller = build_controller(&config)?;

    if let RegenerateOutcome::AlreadyInProgress = controller.regenerate().await {
        anyhow::bail!("regeneration did not run");
    }
    let scene = controller.current_scene();

    if json {
        let text = serde_json::to_string_pretty(&*scene).context("failed to encode scene")?;
        println!("{}", text);
        return Ok(());
    }

    let mut frame = FrameStats::new();
    OrbitCamera::new(config.render.camera).apply(&mut frame);
    draw_scene(&scene, &config.render_style(), &mut frame);

    println!("Towerscape");
    println!("==========");
    println!("Preset: {}", config.generator.preset);
    if let Some(seed) = config.seed {
        println!("Seed: {}", seed);
    }
    println!("Palettes: {}", scene.palettes.len());
    println!("Towers: {}", scene.towers.len());
    println!("Shapes: {}", scene.shape_count());
    for kind in ShapeKind::ALL {
        println!("  {}: {}", kind.name(), scene.count_kind(kind));
    }
    println!("Floor blocks: {}", scene.floor.len());
    println!("Frame: {}", frame);

    Ok(())
}

async fn palettes_command(args: SceneArgs, json: bool) -> anyhow::Result<()> {
    let config = args.load()?;
    let palettes = config.palette.build_source().fetch_palettes().await;

    if json {
        let text = serde_json::to_string_pretty(&palettes).context("failed to encode palettes")?;
        println!("{}", text);
        return Ok(());
    }

    for (index, palette) in palettes.iter().enumerate() {
        let colors: Vec<String> = palette.colors().iter().map(|c| c.to_string()).collect();
        println!("{:>2}: {}", index, colors.join(" "));
    }

    Ok(())
}

async fn interactive_command(args: SceneArgs) -> anyhow::Result<()> {
    let config = args.load()?;
    let mut session = build_session(&config)?;

    eprintln!("Commands: <enter>/space/r regenerate, c cycle palette, m <x> mouse, f frame, s status, q quit");

    let input = BufReader::new(tokio::io::stdin());
    session.run(input, tokio::io::stdout()).await
}
