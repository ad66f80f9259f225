use engine::{LoopConfig, Scene};
use tracing::info;
use tracing_subscriber::EnvFilter;

use super::config::{self, ConfigError, GameConfig};
use super::gameplay::PlatformerScene;

pub(crate) struct AppWiring {
    pub(crate) config: LoopConfig,
    pub(crate) scene: Box<dyn Scene>,
}

pub(crate) fn build_app() -> Result<AppWiring, ConfigError> {
    info!("=== Questrun Startup ===");

    let game_config = config::load_from_env()?;
    info!(
        viewport_width = game_config.viewport.width,
        viewport_height = game_config.viewport.height,
        world_width = game_config.world_width,
        camera_mode = ?game_config.camera_mode,
        fps_cap = ?game_config.fps_cap,
        "config_loaded"
    );

    Ok(wire(&game_config))
}

fn wire(game_config: &GameConfig) -> AppWiring {
    let scene = PlatformerScene::new(game_config.scene_settings());
    let config = LoopConfig {
        viewport: game_config.viewport,
        window_scale: game_config.window_scale,
        max_render_fps: game_config.fps_cap,
        overlay_visible: game_config.show_overlay,
        ..LoopConfig::default()
    };

    AppWiring {
        config,
        scene: Box::new(scene),
    }
}

pub(crate) fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_names(true)
        .compact()
        .init();
}
