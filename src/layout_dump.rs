use crate::annotations::{Annotations, LabelSet, annotate};
use crate::config::{BridgeConfig, Config};
use crate::geometry::{Hanger, Layout, Point, cable_curve, deck_outline, derive_layout, hanger_positions};
use crate::mohr::MohrInset;
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneDump {
    pub bridge: BridgeConfig,
    pub layout: LayoutDump,
    pub hangers: Vec<HangerDump>,
    pub deck_outline: Vec<[f32; 2]>,
    pub cable: Vec<[f32; 2]>,
    pub annotations: Annotations,
    pub mohr: Option<MohrInset>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutDump {
    pub deck_x: f32,
    pub deck_center_y: f32,
    pub tower_xs: [f32; 2],
    pub tower_top_y: f32,
    pub tower_bottom_y: f32,
    pub cable_span: f32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HangerDump {
    pub x: f32,
    pub cable_y: f32,
    pub deck_top_y: f32,
    pub length: f32,
}

impl From<&Layout> for LayoutDump {
    fn from(layout: &Layout) -> Self {
        Self {
            deck_x: layout.deck_x,
            deck_center_y: layout.deck_center_y,
            tower_xs: layout.tower_xs(),
            tower_top_y: layout.tower_top_y,
            tower_bottom_y: layout.tower_bottom_y,
            cable_span: layout.cable_span(),
        }
    }
}

impl From<Hanger> for HangerDump {
    fn from(hanger: Hanger) -> Self {
        Self {
            x: hanger.x,
            cable_y: hanger.cable_y,
            deck_top_y: hanger.deck_top_y,
            length: hanger.deck_top_y - hanger.cable_y,
        }
    }
}

impl SceneDump {
    pub fn from_config(config: &Config) -> Self {
        let bridge = &config.bridge;
        let layout = derive_layout(bridge);
        let text = LabelSet::for_language(config.language);
        let annotations = annotate(bridge, &layout, &config.annotations, &text);
        let mohr = config.scene.mohr_circle.then(|| {
            MohrInset::new(
                annotations.mohr_center,
                config.annotations.mohr_radius,
                &text.mohr_title,
                &text.mohr_caption,
            )
        });
        let points =
            |pts: Vec<Point>| -> Vec<[f32; 2]> { pts.into_iter().map(|p| [p.x, p.y]).collect() };

        SceneDump {
            bridge: *bridge,
            layout: LayoutDump::from(&layout),
            hangers: hanger_positions(bridge, &layout).map(HangerDump::from).collect(),
            deck_outline: points(deck_outline(bridge, &layout, config.scene.deck_sample_step)),
            cable: points(cable_curve(bridge, &layout, config.scene.cable_sample_step)),
            annotations,
            mohr,
        }
    }
}

pub fn write_layout_dump(path: &Path, config: &Config) -> anyhow::Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let dump = SceneDump::from_config(config);
    serde_json::to_writer_pretty(writer, &dump)?;
    tracing::debug!(path = %path.display(), hangers = dump.hangers.len(), "wrote layout dump");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dump_reports_derived_layout() {
        let dump = SceneDump::from_config(&Config::default());
        assert_eq!(dump.layout.deck_x, 100.0);
        assert_eq!(dump.layout.tower_xs, [300.0, 700.0]);
        assert_eq!(dump.hangers.len(), 6);
        assert!(dump.hangers.iter().all(|h| h.length > 0.0));
        assert!(dump.mohr.is_some());
    }

    #[test]
    fn dump_serializes_camel_case() {
        let dump = SceneDump::from_config(&Config::default());
        let value = serde_json::to_value(&dump).expect("dump serializes");
        assert_eq!(value["layout"]["deckCenterY"], serde_json::json!(300.0));
        assert_eq!(value["bridge"]["deckLength"], serde_json::json!(800.0));
        assert!(value["hangers"][0]["cableY"].is_number());
    }

    #[test]
    fn disabled_mohr_is_absent_from_dump() {
        let mut config = Config::default();
        config.scene.mohr_circle = false;
        let dump = SceneDump::from_config(&config);
        assert!(dump.mohr.is_none());
    }
}
