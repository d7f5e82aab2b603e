use bridge_diagram_renderer::config::BridgeOverrides;
use bridge_diagram_renderer::{BridgeConfig, Language, RenderOptions, render_with_options};
use serde::Deserialize;
use wasm_bindgen::prelude::*;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BridgeRenderOptions {
    theme: Option<String>,
    font_family: Option<String>,
    language: Option<Language>,
    mohr_circle: Option<bool>,
    legend: Option<bool>,
}

fn build_render_options(options: BridgeRenderOptions) -> RenderOptions {
    let mut render_options = if options.theme.as_deref() == Some("blueprint") {
        RenderOptions::blueprint()
    } else {
        RenderOptions::classic()
    };

    if let Some(font_family) = options.font_family {
        render_options.theme.font_family = font_family;
    }
    if let Some(language) = options.language {
        render_options.language = language;
    }
    if let Some(mohr_circle) = options.mohr_circle {
        render_options.scene.mohr_circle = mohr_circle;
    }
    if let Some(legend) = options.legend {
        render_options.scene.legend = legend;
    }

    render_options
}

fn build_bridge(config_json: Option<&str>) -> Result<BridgeConfig, serde_json::Error> {
    let mut bridge = BridgeConfig::default();
    if let Some(raw) = config_json {
        let overrides: BridgeOverrides = serde_json::from_str(raw)?;
        bridge.apply(&overrides);
    }
    Ok(bridge)
}

/// Renders a bridge diagram to SVG.
///
/// `config_json` holds partial bridge dimensions (camelCase keys, missing
/// fields keep their defaults); `options_json` holds presentation options.
#[wasm_bindgen]
pub fn render_bridge_svg(
    config_json: Option<String>,
    options_json: Option<String>,
) -> Result<String, JsValue> {
    let bridge = build_bridge(config_json.as_deref())
        .map_err(|error| JsValue::from_str(&error.to_string()))?;
    let options = if let Some(raw_options) = options_json {
        serde_json::from_str::<BridgeRenderOptions>(&raw_options)
            .map_err(|error| JsValue::from_str(&error.to_string()))?
    } else {
        BridgeRenderOptions::default()
    };

    let render_options = build_render_options(options);
    render_with_options(&bridge, render_options).map_err(|error| JsValue::from_str(&error.to_string()))
}

#[cfg(test)]
mod tests {
    use bridge_diagram_renderer::render_with_options;

    use crate::{BridgeRenderOptions, build_bridge, build_render_options};

    #[test]
    fn renders_partial_bridge_with_korean_labels() {
        let bridge = build_bridge(Some(r#"{"deckLength": 600, "maxDeflection": 20}"#))
            .expect("partial config should parse");
        assert_eq!(bridge.tower_height, 120.0);

        let options: BridgeRenderOptions =
            serde_json::from_str(r#"{"theme": "blueprint", "language": "ko", "legend": false}"#)
                .expect("options should parse");
        let svg = render_with_options(&bridge, build_render_options(options))
            .expect("bridge should render");

        assert!(svg.contains("<svg"));
        assert!(svg.contains("처짐: 20mm"));
        assert!(!svg.contains("이동 지점"));
    }
}
