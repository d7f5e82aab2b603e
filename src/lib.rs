pub mod annotations;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod error;
pub mod geometry;
pub mod layout_dump;
pub mod mohr;
pub mod render;
pub mod scene;
pub mod surface;
pub mod text_metrics;
pub mod theme;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{AnnotationConfig, BridgeConfig, Config, Language, SceneOptions, load_config};
pub use error::ConfigError;
pub use geometry::{Layout, Point, derive_layout};
pub use render::{SvgSurface, render_svg};
pub use scene::{Stage, compose, render};
pub use surface::{Recorder, Surface};
pub use theme::Theme;

/// Presentation settings for [`render_with_options`].
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub theme: Theme,
    pub scene: SceneOptions,
    pub annotations: AnnotationConfig,
    pub language: Language,
}

impl RenderOptions {
    pub fn classic() -> Self {
        Self {
            theme: Theme::classic(),
            scene: SceneOptions::default(),
            annotations: AnnotationConfig::default(),
            language: Language::default(),
        }
    }

    pub fn blueprint() -> Self {
        Self {
            theme: Theme::blueprint(),
            ..Self::classic()
        }
    }

    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::classic()
    }
}

/// Validates `bridge` and the option steps, then renders an SVG document.
pub fn render_with_options(
    bridge: &BridgeConfig,
    options: RenderOptions,
) -> Result<String, ConfigError> {
    let mut config = Config {
        bridge: *bridge,
        theme: options.theme,
        annotations: options.annotations,
        scene: options.scene,
        language: options.language,
        ..Config::default()
    };
    config.validate()?;
    config.sync_render();
    Ok(render_svg(&config))
}
