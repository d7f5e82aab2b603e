use crate::error::ConfigError;
use crate::theme::Theme;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Structural parameters of one diagram instance.
///
/// A config is replaced wholesale to trigger a redraw; nothing downstream
/// mutates it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BridgeConfig {
    pub width: f32,
    pub height: f32,
    pub deck_length: f32,
    pub deck_width: f32,
    /// Top edge of the undeflected deck.
    pub deck_y: f32,
    pub tower_height: f32,
    pub tower_top_width: f32,
    pub tower_bottom_width: f32,
    pub main_cable_sag: f32,
    pub hanger_spacing: f32,
    pub max_deflection: f32,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        let width = 1000.0;
        let height = 600.0;
        let deck_length = 800.0;
        let deck_width = 60.0;
        Self {
            width,
            height,
            deck_length,
            deck_width,
            deck_y: centered_deck_y(height, deck_width),
            tower_height: proportional_tower_height(deck_length),
            tower_top_width: 40.0,
            tower_bottom_width: 50.0,
            main_cable_sag: 80.0,
            hanger_spacing: 60.0,
            max_deflection: 30.0,
        }
    }
}

impl BridgeConfig {
    /// Checks the structural invariants the geometry engine assumes.
    ///
    /// Geometry itself never calls this: degenerate inputs produce degenerate
    /// drawings, and rejecting them is the host's decision.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("width", self.width),
            ("height", self.height),
            ("deckLength", self.deck_length),
            ("deckWidth", self.deck_width),
            ("towerHeight", self.tower_height),
            ("towerTopWidth", self.tower_top_width),
            ("towerBottomWidth", self.tower_bottom_width),
            ("mainCableSag", self.main_cable_sag),
            ("hangerSpacing", self.hanger_spacing),
            ("maxDeflection", self.max_deflection),
        ];
        for (field, value) in positive {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { field });
            }
            if value <= 0.0 {
                return Err(ConfigError::NonPositive { field, value });
            }
        }
        if !self.deck_y.is_finite() {
            return Err(ConfigError::NonFinite { field: "deckY" });
        }
        if self.tower_top_width >= self.tower_bottom_width {
            return Err(ConfigError::InvertedTaper {
                top: self.tower_top_width,
                bottom: self.tower_bottom_width,
            });
        }
        if self.deck_length > self.width {
            tracing::warn!(
                deck_length = self.deck_length,
                width = self.width,
                "deck is wider than the drawing surface and will be clipped"
            );
        }
        if self.hanger_spacing >= self.deck_length * 0.5 {
            tracing::warn!(
                hanger_spacing = self.hanger_spacing,
                "hanger spacing exceeds the cable span; no hangers will be drawn"
            );
        }
        Ok(())
    }

    pub fn apply(&mut self, overrides: &BridgeOverrides) {
        if let Some(v) = overrides.width {
            self.width = v;
        }
        if let Some(v) = overrides.height {
            self.height = v;
        }
        if let Some(v) = overrides.deck_length {
            self.deck_length = v;
        }
        if let Some(v) = overrides.deck_width {
            self.deck_width = v;
        }
        if let Some(v) = overrides.tower_top_width {
            self.tower_top_width = v;
        }
        if let Some(v) = overrides.tower_bottom_width {
            self.tower_bottom_width = v;
        }
        if let Some(v) = overrides.main_cable_sag {
            self.main_cable_sag = v;
        }
        if let Some(v) = overrides.hanger_spacing {
            self.hanger_spacing = v;
        }
        if let Some(v) = overrides.max_deflection {
            self.max_deflection = v;
        }

        // Positions derived from other fields follow them unless pinned.
        match overrides.deck_y {
            Some(v) => self.deck_y = v,
            None if overrides.height.is_some() || overrides.deck_width.is_some() => {
                self.deck_y = centered_deck_y(self.height, self.deck_width);
            }
            None => {}
        }
        match overrides.tower_height {
            Some(v) => self.tower_height = v,
            None if overrides.deck_length.is_some() => {
                self.tower_height = proportional_tower_height(self.deck_length);
            }
            None => {}
        }
    }
}

fn centered_deck_y(height: f32, deck_width: f32) -> f32 {
    height / 2.0 - deck_width / 2.0
}

fn proportional_tower_height(deck_length: f32) -> f32 {
    deck_length / 5.0
}

/// Partial [`BridgeConfig`] as it appears in config files and on the command line.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BridgeOverrides {
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub deck_length: Option<f32>,
    pub deck_width: Option<f32>,
    pub deck_y: Option<f32>,
    pub tower_height: Option<f32>,
    pub tower_top_width: Option<f32>,
    pub tower_bottom_width: Option<f32>,
    pub main_cable_sag: Option<f32>,
    pub hanger_spacing: Option<f32>,
    pub max_deflection: Option<f32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Ko,
}

/// Fixed pixel offsets of annotations. They do not scale with
/// [`BridgeConfig`] dimensions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnnotationConfig {
    pub critical_deck_radius: f32,
    pub critical_deck_margin_top: f32,
    pub critical_deck_extra_height: f32,
    pub critical_tower_radius: f32,
    pub critical_tower_half_height: f32,
    pub stress_arrow_inset: f32,
    pub stress_arrow_spacing: f32,
    pub stress_arrow_offset: f32,
    pub stress_arrow_reach: f32,
    pub stress_arrow_gap: f32,
    pub stress_head_length: f32,
    pub stress_head_half_width: f32,
    pub tension_arrow_length: f32,
    pub tension_head_length: f32,
    pub tension_head_half_width: f32,
    pub hanger_marker_offset_x: f32,
    pub hanger_marker_gap: f32,
    pub hanger_marker_length: f32,
    pub hanger_marker_head_length: f32,
    pub hanger_marker_head_half_width: f32,
    pub roller_gap: f32,
    pub load_arrow_inset: f32,
    pub load_arrow_spacing: f32,
    pub load_arrow_length: f32,
    pub load_head_length: f32,
    pub load_head_half_width: f32,
    pub cable_pull_length: f32,
    pub cable_pull_angle_deg: f32,
    pub cable_pull_head_length: f32,
    pub cable_pull_head_half_width: f32,
    pub reaction_length: f32,
    pub reaction_offset: f32,
    pub reaction_head_length: f32,
    pub reaction_head_half_width: f32,
    pub mohr_offset_x: f32,
    pub mohr_offset_y: f32,
    pub mohr_radius: f32,
    pub legend_x: f32,
    pub legend_y: f32,
    pub legend_row_height: f32,
}

impl Default for AnnotationConfig {
    fn default() -> Self {
        Self {
            critical_deck_radius: 100.0,
            critical_deck_margin_top: 20.0,
            critical_deck_extra_height: 80.0,
            critical_tower_radius: 60.0,
            critical_tower_half_height: 30.0,
            stress_arrow_inset: 60.0,
            stress_arrow_spacing: 80.0,
            stress_arrow_offset: 15.0,
            stress_arrow_reach: 20.0,
            stress_arrow_gap: 5.0,
            stress_head_length: 5.0,
            stress_head_half_width: 4.0,
            tension_arrow_length: 35.0,
            tension_head_length: 8.0,
            tension_head_half_width: 5.0,
            hanger_marker_offset_x: 8.0,
            hanger_marker_gap: 15.0,
            hanger_marker_length: 10.0,
            hanger_marker_head_length: 7.0,
            hanger_marker_head_half_width: 3.0,
            roller_gap: 5.0,
            load_arrow_inset: 20.0,
            load_arrow_spacing: 40.0,
            load_arrow_length: 30.0,
            load_head_length: 8.0,
            load_head_half_width: 4.0,
            cable_pull_length: 50.0,
            cable_pull_angle_deg: 30.0,
            cable_pull_head_length: 10.0,
            cable_pull_head_half_width: 5.0,
            reaction_length: 50.0,
            reaction_offset: 35.0,
            reaction_head_length: 12.0,
            reaction_head_half_width: 6.0,
            mohr_offset_x: 180.0,
            mohr_offset_y: -80.0,
            mohr_radius: 40.0,
            legend_x: 20.0,
            legend_y: 30.0,
            legend_row_height: 18.0,
        }
    }
}

impl AnnotationConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_step("stressArrowSpacing", self.stress_arrow_spacing)?;
        check_step("loadArrowSpacing", self.load_arrow_spacing)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SceneOptions {
    pub mohr_circle: bool,
    pub legend: bool,
    pub grid_spacing: f32,
    pub deck_sample_step: f32,
    pub cable_sample_step: f32,
    pub centerline_dash: Vec<f32>,
}

impl Default for SceneOptions {
    fn default() -> Self {
        Self {
            mohr_circle: true,
            legend: true,
            grid_spacing: 50.0,
            deck_sample_step: 10.0,
            cable_sample_step: 5.0,
            centerline_dash: vec![10.0, 5.0],
        }
    }
}

impl SceneOptions {
    /// Rejects sampling and grid steps fine enough to stall a render.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_step("gridSpacing", self.grid_spacing)?;
        check_step("deckSampleStep", self.deck_sample_step)?;
        check_step("cableSampleStep", self.cable_sample_step)
    }
}

/// Smallest step, in pixels, accepted for sampling, grid and arrow spacing.
pub const MIN_STEP: f32 = 0.5;

fn check_step(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if !value.is_finite() {
        return Err(ConfigError::NonFinite { field });
    }
    if value < MIN_STEP {
        return Err(ConfigError::StepTooSmall {
            field,
            value,
            min: MIN_STEP,
        });
    }
    Ok(())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    pub width: f32,
    pub height: f32,
    pub background: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        let bridge = BridgeConfig::default();
        Self {
            width: bridge.width,
            height: bridge.height,
            background: Theme::classic().background,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub bridge: BridgeConfig,
    pub theme: Theme,
    pub annotations: AnnotationConfig,
    pub scene: SceneOptions,
    pub language: Language,
    pub render: RenderConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    theme: Option<String>,
    theme_variables: Option<ThemeVariables>,
    bridge: Option<BridgeOverrides>,
    annotations: Option<AnnotationConfig>,
    scene: Option<SceneFile>,
    language: Option<Language>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThemeVariables {
    font_family: Option<String>,
    symbol_font_family: Option<String>,
    background: Option<String>,
    text_color: Option<String>,
    deck_fill: Option<String>,
    tower_fill: Option<String>,
    cable_color: Option<String>,
    compression_color: Option<String>,
    tension_color: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SceneFile {
    mohr_circle: Option<bool>,
    legend: Option<bool>,
    grid_spacing: Option<f32>,
    deck_sample_step: Option<f32>,
    cable_sample_step: Option<f32>,
    centerline_dash: Option<Vec<f32>>,
}

/// Loads a JSON or JSON5 config file over the built-in defaults.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let contents = std::fs::read_to_string(path)?;
    parse_config(&contents)
}

pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let mut config = Config::default();
    let parsed: ConfigFile = json5::from_str(contents)?;

    if let Some(theme_name) = parsed.theme.as_deref() {
        match Theme::by_name(theme_name) {
            Some(theme) => config.theme = theme,
            None => tracing::warn!(theme = theme_name, "unknown theme, keeping classic"),
        }
    }

    if let Some(vars) = parsed.theme_variables {
        if let Some(v) = vars.font_family {
            config.theme.font_family = v;
        }
        if let Some(v) = vars.symbol_font_family {
            config.theme.symbol_font_family = v;
        }
        if let Some(v) = vars.background {
            config.theme.background = v;
        }
        if let Some(v) = vars.text_color {
            config.theme.text = v;
        }
        if let Some(v) = vars.deck_fill {
            config.theme.deck_fill = v;
        }
        if let Some(v) = vars.tower_fill {
            config.theme.tower_fill = v;
        }
        if let Some(v) = vars.cable_color {
            config.theme.cable = v;
        }
        if let Some(v) = vars.compression_color {
            config.theme.compression = v;
        }
        if let Some(v) = vars.tension_color {
            config.theme.tension = v;
        }
    }

    if let Some(bridge) = parsed.bridge {
        config.bridge.apply(&bridge);
    }

    if let Some(annotations) = parsed.annotations {
        config.annotations = annotations;
    }

    if let Some(scene) = parsed.scene {
        if let Some(v) = scene.mohr_circle {
            config.scene.mohr_circle = v;
        }
        if let Some(v) = scene.legend {
            config.scene.legend = v;
        }
        if let Some(v) = scene.grid_spacing {
            config.scene.grid_spacing = v;
        }
        if let Some(v) = scene.deck_sample_step {
            config.scene.deck_sample_step = v;
        }
        if let Some(v) = scene.cable_sample_step {
            config.scene.cable_sample_step = v;
        }
        if let Some(v) = scene.centerline_dash {
            config.scene.centerline_dash = v;
        }
    }

    if let Some(language) = parsed.language {
        config.language = language;
    }

    config.scene.validate()?;
    config.annotations.validate()?;
    config.sync_render();
    Ok(config)
}

impl Config {
    /// Bridge invariants plus the scene and annotation step limits.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.bridge.validate()?;
        self.scene.validate()?;
        self.annotations.validate()
    }

    /// Keeps the raster target in step with the bridge surface and theme.
    pub fn sync_render(&mut self) {
        self.render.width = self.bridge.width;
        self.render.height = self.bridge.height;
        self.render.background = self.theme.background.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_follow_the_reference_drawing() {
        let cfg = BridgeConfig::default();
        assert_eq!(cfg.deck_y, 270.0);
        assert_eq!(cfg.tower_height, 160.0);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn validate_rejects_non_positive_lengths() {
        let cfg = BridgeConfig {
            hanger_spacing: 0.0,
            ..Default::default()
        };
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::NonPositive {
                field: "hangerSpacing",
                value: 0.0
            })
        );
    }

    #[test]
    fn validate_rejects_inverted_taper() {
        let cfg = BridgeConfig {
            tower_top_width: 60.0,
            ..Default::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::InvertedTaper { .. })
        ));
    }

    #[test]
    fn validate_rejects_nan() {
        let cfg = BridgeConfig {
            deck_y: f32::NAN,
            ..Default::default()
        };
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::NonFinite { field: "deckY" })
        );
    }

    #[test]
    fn overrides_rederive_unpinned_positions() {
        let mut cfg = BridgeConfig::default();
        cfg.apply(&BridgeOverrides {
            height: Some(800.0),
            deck_length: Some(600.0),
            ..Default::default()
        });
        assert_eq!(cfg.deck_y, 370.0);
        assert_eq!(cfg.tower_height, 120.0);

        let mut pinned = BridgeConfig::default();
        pinned.apply(&BridgeOverrides {
            height: Some(800.0),
            deck_y: Some(100.0),
            ..Default::default()
        });
        assert_eq!(pinned.deck_y, 100.0);
        assert_eq!(pinned.tower_height, 160.0);
    }

    #[test]
    fn parses_json5_config() {
        let config = parse_config(
            r##"{
                // comments and trailing commas are fine
                theme: "blueprint",
                language: "ko",
                bridge: { hangerSpacing: 40, maxDeflection: 12.5, },
                scene: { mohrCircle: false },
                themeVariables: { textColor: "#000000" },
            }"##,
        )
        .expect("config should parse");
        assert_eq!(config.bridge.hanger_spacing, 40.0);
        assert_eq!(config.bridge.max_deflection, 12.5);
        assert_eq!(config.language, Language::Ko);
        assert!(!config.scene.mohr_circle);
        assert!(config.scene.legend);
        assert_eq!(config.theme.text, "#000000");
        assert_eq!(config.render.background, Theme::blueprint().background);
    }

    #[test]
    fn partial_annotation_block_keeps_other_defaults() {
        let config = parse_config(r#"{ "annotations": { "tensionArrowLength": 50 } }"#)
            .expect("config should parse");
        assert_eq!(config.annotations.tension_arrow_length, 50.0);
        assert_eq!(config.annotations.reaction_length, 50.0);
    }

    #[test]
    fn scene_centerline_dash_is_read_from_file() {
        let config = parse_config(r#"{ scene: { centerlineDash: [4, 2] } }"#)
            .expect("config should parse");
        assert_eq!(config.scene.centerline_dash, vec![4.0, 2.0]);
        assert_eq!(config.scene.grid_spacing, 50.0);
    }

    #[test]
    fn rejects_vanishing_sample_steps() {
        let err = parse_config(r#"{ scene: { deckSampleStep: 1e-30 } }"#)
            .expect_err("tiny step must be rejected");
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::StepTooSmall {
                field: "deckSampleStep",
                ..
            })
        ));

        let err = parse_config(r#"{ annotations: { loadArrowSpacing: 0 } }"#)
            .expect_err("zero spacing must be rejected");
        assert!(err.to_string().contains("loadArrowSpacing"));
    }

    #[test]
    fn config_validate_covers_scene_steps() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());
        config.scene.grid_spacing = 0.1;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::StepTooSmall { field: "gridSpacing", .. })
        ));
    }

    #[test]
    fn rejects_malformed_file() {
        assert!(parse_config("{ bridge: ").is_err());
    }
}
