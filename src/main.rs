//! Carousel - builds the demo scene and optionally exports it as RON
//!
//! Usage: `carousel [OUTPUT.ron]`

use std::process::ExitCode;

use carousel::config::AppConfig;
use carousel::scene::{CameraRole, DemoScene, SceneBuilder};
use carousel_core::SceneDocument;

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = match AppConfig::load() {
        Ok(config) => {
            init_logging(&config.debug.log_level);
            config
        }
        Err(e) => {
            let config = AppConfig::default();
            init_logging(&config.debug.log_level);
            log::warn!("Failed to load config: {}. Using defaults.", e);
            config
        }
    };
    log::info!("Starting carousel");

    let fonts = config.fonts.font_library()?;
    let scene = SceneBuilder::new()
        .with_params(config.scene_params())
        .with_fonts(fonts)
        .build()?;

    log_summary(&scene);

    let output = std::env::args().nth(1).or_else(|| config.output.scene_path.clone());
    if let Some(path) = output {
        SceneDocument::from_graph("carousel", &scene.graph)?.save(&path)?;
        log::info!("Wrote scene to {}", path);
    }

    Ok(())
}

fn init_logging(level: &str) {
    // RUST_LOG still takes precedence over the configured level
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn log_summary(scene: &DemoScene) {
    let graph = &scene.graph;
    log::info!(
        "Scene has {} nodes and {} materials",
        graph.node_count(),
        graph.material_count()
    );

    let names: Vec<_> = scene.primitives.iter().map(|(kind, _)| kind.name()).collect();
    log::info!("Carousel primitives: {}", names.join(", "));

    if let Some(period) = graph
        .node(scene.carousel)
        .and_then(|node| node.actions.first())
        .and_then(|action| action.revolution_period())
    {
        log::info!("Carousel turns once every {:.1}s", period);
    }

    for role in [CameraRole::Overhead, CameraRole::Fixed, CameraRole::Follow] {
        if let Some(camera) = graph.node(scene.camera(role)).and_then(|node| node.camera) {
            log::info!("{}: {}x{} degrees", role.name(), camera.x_fov, camera.y_fov);
        }
    }

    if let Some(name) = scene
        .follow_target()
        .and_then(|key| graph.node(key))
        .and_then(|node| node.name.as_deref())
    {
        log::info!("Follow camera tracks '{}'", name);
    }
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
