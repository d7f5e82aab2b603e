//! Anchor points for arrows, support symbols and text labels.
//!
//! Offsets come from [`AnnotationConfig`] and stay in pixels whatever the
//! bridge dimensions are; only the anchors move with the geometry.

use crate::config::{AnnotationConfig, BridgeConfig, Language};
use crate::geometry::{
    Layout, Point, TOWER_SPAN_FRACTIONS, cable_y, deck_bottom_y, deck_deflection, deck_top_y,
    hanger_positions,
};
use crate::surface::{Font, Rect, TextAlign};
use crate::text_metrics::measure_text_width;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ArrowHead {
    pub length: f32,
    pub half_width: f32,
}

/// Straight arrow from `tail` along the unit vector `direction`; the head
/// sits at the far end.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Arrow {
    pub tail: Point,
    pub direction: Point,
    pub length: f32,
    pub head: ArrowHead,
}

impl Arrow {
    pub fn tip(&self) -> Point {
        Point::new(
            self.tail.x + self.direction.x * self.length,
            self.tail.y + self.direction.y * self.length,
        )
    }
}

const RIGHT: Point = Point::new(1.0, 0.0);
const LEFT: Point = Point::new(-1.0, 0.0);
const UP: Point = Point::new(0.0, -1.0);
const DOWN: Point = Point::new(0.0, 1.0);

/// Radial highlight clipped to `rect`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CriticalZone {
    pub center: Point,
    pub radius: f32,
    pub rect: Rect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LabelRole {
    Text,
    Tension,
    Compression,
    Energy,
    EnergyCaption,
    CablePull,
    Reaction,
    Critical,
    Deflection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Typeface {
    /// Italic serif used for σ, τ, w and R.
    Symbol,
    Body,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Label {
    pub text: String,
    pub position: Point,
    pub size: f32,
    pub bold: bool,
    pub typeface: Typeface,
    pub align: TextAlign,
    pub role: LabelRole,
}

impl Label {
    fn body(text: &str, x: f32, y: f32, size: f32, bold: bool, role: LabelRole) -> Self {
        Self {
            text: text.to_string(),
            position: Point::new(x, y),
            size,
            bold,
            typeface: Typeface::Body,
            align: TextAlign::Center,
            role,
        }
    }

    fn symbol(text: &str, x: f32, y: f32, size: f32, role: LabelRole) -> Self {
        Self {
            text: text.to_string(),
            position: Point::new(x, y),
            size,
            bold: true,
            typeface: Typeface::Symbol,
            align: TextAlign::Center,
            role,
        }
    }

    pub fn font(&self, body_family: &str, symbol_family: &str) -> Font {
        Font {
            family: match self.typeface {
                Typeface::Symbol => symbol_family.to_string(),
                Typeface::Body => body_family.to_string(),
            },
            size: self.size,
            bold: self.bold,
            italic: self.typeface == Typeface::Symbol,
        }
    }
}

/// Caption strings for one language.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelSet {
    pub tension: String,
    pub compression: String,
    pub elastic_energy: String,
    pub elastic_energy_caption: String,
    pub distributed_load: String,
    pub cable_tension: String,
    pub critical_zone: String,
    pub max_bending: String,
    pub max_compression: String,
    pub deflection: String,
    pub mohr_title: String,
    pub mohr_caption: String,
    pub legend_roller: String,
    pub legend_pin: String,
    pub legend_load: String,
    pub legend_compression: String,
    pub legend_tension: String,
}

impl LabelSet {
    pub fn for_language(language: Language) -> Self {
        match language {
            Language::En => Self::english(),
            Language::Ko => Self::korean(),
        }
    }

    pub fn english() -> Self {
        Self {
            tension: "tension".to_string(),
            compression: "compression".to_string(),
            elastic_energy: "⚡ storing elastic energy".to_string(),
            elastic_energy_caption: "(cable in tension)".to_string(),
            distributed_load: "(distributed load)".to_string(),
            cable_tension: "cable tension".to_string(),
            critical_zone: "Critical Zone".to_string(),
            max_bending: "(max bending moment)".to_string(),
            max_compression: "(max compressive stress)".to_string(),
            deflection: "deflection".to_string(),
            mohr_title: "Mohr's Circle".to_string(),
            mohr_caption: "(stress state)".to_string(),
            legend_roller: "Roller support".to_string(),
            legend_pin: "Pin support".to_string(),
            legend_load: "Distributed load (w)".to_string(),
            legend_compression: "Compressive stress".to_string(),
            legend_tension: "Tensile stress".to_string(),
        }
    }

    pub fn korean() -> Self {
        Self {
            tension: "인장".to_string(),
            compression: "압축".to_string(),
            elastic_energy: "⚡ 탄성 에너지 저장 중".to_string(),
            elastic_energy_caption: "(케이블 인장 상태)".to_string(),
            distributed_load: "(등분포 하중)".to_string(),
            cable_tension: "케이블 장력".to_string(),
            critical_zone: "Critical Zone".to_string(),
            max_bending: "(최대 굽힘 모멘트)".to_string(),
            max_compression: "(최대 압축 응력)".to_string(),
            deflection: "처짐".to_string(),
            mohr_title: "Mohr's Circle".to_string(),
            mohr_caption: "(응력 상태)".to_string(),
            legend_roller: "이동 지점 (Roller)".to_string(),
            legend_pin: "회전 지점 (Pin)".to_string(),
            legend_load: "등분포 하중 (w)".to_string(),
            legend_compression: "압축 응력".to_string(),
            legend_tension: "인장 응력".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LegendSwatch {
    Roller,
    Pin,
    Load,
    Compression,
    Tension,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendEntry {
    pub swatch: LegendSwatch,
    pub anchor: Point,
    pub label: Label,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Legend {
    pub panel: Rect,
    pub entries: Vec<LegendEntry>,
}

/// Everything drawn on top of the bare structure.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Annotations {
    pub critical_zones: Vec<CriticalZone>,
    pub compression_arrows: Vec<Arrow>,
    pub tension_arrows: Vec<Arrow>,
    pub tower_tension_arrows: Vec<Arrow>,
    pub hanger_markers: Vec<Arrow>,
    pub rollers: Vec<Point>,
    pub pins: Vec<Point>,
    pub load_arrows: Vec<Arrow>,
    pub cable_pulls: Vec<Arrow>,
    pub reactions: Vec<Arrow>,
    pub mohr_center: Point,
    pub labels: Vec<Label>,
}

pub fn annotate(
    config: &BridgeConfig,
    layout: &Layout,
    offsets: &AnnotationConfig,
    text: &LabelSet,
) -> Annotations {
    Annotations {
        critical_zones: critical_zones(config, layout, offsets),
        compression_arrows: compression_arrows(config, layout, offsets),
        tension_arrows: tension_arrows(config, layout, offsets),
        tower_tension_arrows: tower_tension_arrows(layout, offsets),
        hanger_markers: hanger_markers(config, layout, offsets),
        rollers: roller_anchors(config, layout, offsets),
        pins: pin_anchors(config, layout),
        load_arrows: load_arrows(config, layout, offsets),
        cable_pulls: cable_pull_arrows(layout, offsets),
        reactions: reaction_arrows(config, layout, offsets),
        mohr_center: mohr_center(config, layout, offsets),
        labels: labels(config, layout, offsets, text),
    }
}

/// Midspan of the deck, where deflection peaks.
fn midspan_x(config: &BridgeConfig, layout: &Layout) -> f32 {
    layout.deck_x + config.deck_length / 2.0
}

fn deck_end_xs(config: &BridgeConfig, layout: &Layout) -> [f32; 2] {
    [layout.deck_x, layout.deck_x + config.deck_length]
}

pub fn critical_zones(
    config: &BridgeConfig,
    layout: &Layout,
    offsets: &AnnotationConfig,
) -> Vec<CriticalZone> {
    let mid_x = midspan_x(config, layout);
    let center_deflection = deck_deflection(config, config.deck_length / 2.0);
    let deck_radius = offsets.critical_deck_radius;
    let mut zones = vec![CriticalZone {
        center: Point::new(mid_x, layout.deck_center_y + center_deflection),
        radius: deck_radius,
        rect: Rect::new(
            mid_x - deck_radius,
            config.deck_y - offsets.critical_deck_margin_top,
            deck_radius * 2.0,
            config.deck_width + offsets.critical_deck_extra_height,
        ),
    }];
    let tower_radius = offsets.critical_tower_radius;
    for tower_x in layout.tower_xs() {
        let center = Point::new(tower_x, layout.tower_bottom_y);
        zones.push(CriticalZone {
            center,
            radius: tower_radius,
            rect: Rect::centered(center, tower_radius, offsets.critical_tower_half_height),
        });
    }
    zones
}

/// Deck positions carrying an internal-stress arrow pair.
pub fn stress_sample_xs(config: &BridgeConfig, layout: &Layout, offsets: &AnnotationConfig) -> Vec<f32> {
    stepped(
        layout.deck_x + offsets.stress_arrow_inset,
        layout.deck_x + config.deck_length - offsets.stress_arrow_inset,
        offsets.stress_arrow_spacing,
    )
}

/// `start`, `start + step`, ... strictly before `end`.
fn stepped(start: f32, end: f32, step: f32) -> Vec<f32> {
    if !(step.is_finite() && step > 0.0) {
        return Vec::new();
    }
    (0u32..)
        .map(|i| start + i as f32 * step)
        .take_while(|x| *x < end)
        .collect()
}

fn compression_arrows(config: &BridgeConfig, layout: &Layout, offsets: &AnnotationConfig) -> Vec<Arrow> {
    let head = ArrowHead {
        length: offsets.stress_head_length,
        half_width: offsets.stress_head_half_width,
    };
    let length = offsets.stress_arrow_reach - offsets.stress_arrow_gap;
    let mut arrows = Vec::new();
    for x in stress_sample_xs(config, layout, offsets) {
        let y = deck_top_y(config, layout, x) - offsets.stress_arrow_offset;
        // Pair pushes inward, toward the sample point.
        arrows.push(Arrow {
            tail: Point::new(x - offsets.stress_arrow_reach, y),
            direction: RIGHT,
            length,
            head,
        });
        arrows.push(Arrow {
            tail: Point::new(x + offsets.stress_arrow_reach, y),
            direction: LEFT,
            length,
            head,
        });
    }
    arrows
}

fn tension_arrows(config: &BridgeConfig, layout: &Layout, offsets: &AnnotationConfig) -> Vec<Arrow> {
    let head = ArrowHead {
        length: offsets.stress_head_length,
        half_width: offsets.stress_head_half_width,
    };
    let length = offsets.stress_arrow_reach - offsets.stress_arrow_gap;
    let mut arrows = Vec::new();
    for x in stress_sample_xs(config, layout, offsets) {
        let y = deck_bottom_y(config, layout, x) + offsets.stress_arrow_offset;
        arrows.push(Arrow {
            tail: Point::new(x - offsets.stress_arrow_gap, y),
            direction: LEFT,
            length,
            head,
        });
        arrows.push(Arrow {
            tail: Point::new(x + offsets.stress_arrow_gap, y),
            direction: RIGHT,
            length,
            head,
        });
    }
    arrows
}

fn tower_tension_arrows(layout: &Layout, offsets: &AnnotationConfig) -> Vec<Arrow> {
    let head = ArrowHead {
        length: offsets.tension_head_length,
        half_width: offsets.tension_head_half_width,
    };
    vec![
        Arrow {
            tail: Point::new(layout.tower1_x, layout.tower_top_y),
            direction: LEFT,
            length: offsets.tension_arrow_length,
            head,
        },
        Arrow {
            tail: Point::new(layout.tower2_x, layout.tower_top_y),
            direction: RIGHT,
            length: offsets.tension_arrow_length,
            head,
        },
    ]
}

/// Up/down pulls beside every second hanger (1, 3, 5, ...).
fn hanger_markers(config: &BridgeConfig, layout: &Layout, offsets: &AnnotationConfig) -> Vec<Arrow> {
    let head = ArrowHead {
        length: offsets.hanger_marker_head_length,
        half_width: offsets.hanger_marker_head_half_width,
    };
    let mut arrows = Vec::new();
    for hanger in hanger_positions(config, layout).skip(1).step_by(2) {
        let x = hanger.x + offsets.hanger_marker_offset_x;
        let mid = hanger.mid_y();
        arrows.push(Arrow {
            tail: Point::new(x, mid - offsets.hanger_marker_gap),
            direction: UP,
            length: offsets.hanger_marker_length,
            head,
        });
        arrows.push(Arrow {
            tail: Point::new(x, mid + offsets.hanger_marker_gap),
            direction: DOWN,
            length: offsets.hanger_marker_length,
            head,
        });
    }
    arrows
}

/// Apex of each roller triangle, just under the deck ends.
pub fn roller_anchors(config: &BridgeConfig, layout: &Layout, offsets: &AnnotationConfig) -> Vec<Point> {
    deck_end_xs(config, layout)
        .into_iter()
        .map(|x| Point::new(x, deck_bottom_y(config, layout, x) + offsets.roller_gap))
        .collect()
}

/// Pins where each tower crosses the deflected deck centreline.
pub fn pin_anchors(config: &BridgeConfig, layout: &Layout) -> Vec<Point> {
    layout
        .tower_xs()
        .into_iter()
        .zip(TOWER_SPAN_FRACTIONS)
        .map(|(x, fraction)| {
            Point::new(
                x,
                layout.deck_center_y + deck_deflection(config, config.deck_length * fraction),
            )
        })
        .collect()
}

fn load_arrows(config: &BridgeConfig, layout: &Layout, offsets: &AnnotationConfig) -> Vec<Arrow> {
    let head = ArrowHead {
        length: offsets.load_head_length,
        half_width: offsets.load_head_half_width,
    };
    stepped(
        layout.deck_x + offsets.load_arrow_inset,
        layout.deck_x + config.deck_length,
        offsets.load_arrow_spacing,
    )
    .into_iter()
    .map(|x| Arrow {
        tail: Point::new(x, deck_top_y(config, layout, x) - offsets.load_arrow_length),
        direction: DOWN,
        length: offsets.load_arrow_length,
        head,
    })
    .collect()
}

fn cable_pull_arrows(layout: &Layout, offsets: &AnnotationConfig) -> Vec<Arrow> {
    let angle = offsets.cable_pull_angle_deg.to_radians();
    let (sin, cos) = angle.sin_cos();
    let head = ArrowHead {
        length: offsets.cable_pull_head_length,
        half_width: offsets.cable_pull_head_half_width,
    };
    vec![
        Arrow {
            tail: Point::new(layout.tower1_x, layout.tower_top_y),
            direction: Point::new(-cos, -sin),
            length: offsets.cable_pull_length,
            head,
        },
        Arrow {
            tail: Point::new(layout.tower2_x, layout.tower_top_y),
            direction: Point::new(cos, -sin),
            length: offsets.cable_pull_length,
            head,
        },
    ]
}

fn reaction_arrows(config: &BridgeConfig, layout: &Layout, offsets: &AnnotationConfig) -> Vec<Arrow> {
    let head = ArrowHead {
        length: offsets.reaction_head_length,
        half_width: offsets.reaction_head_half_width,
    };
    deck_end_xs(config, layout)
        .into_iter()
        .map(|x| Arrow {
            tail: Point::new(x, deck_bottom_y(config, layout, x) + offsets.reaction_offset),
            direction: UP,
            length: offsets.reaction_length,
            head,
        })
        .collect()
}

pub fn mohr_center(config: &BridgeConfig, layout: &Layout, offsets: &AnnotationConfig) -> Point {
    Point::new(
        config.width / 2.0 + offsets.mohr_offset_x,
        layout.deck_center_y + offsets.mohr_offset_y,
    )
}

fn labels(
    config: &BridgeConfig,
    layout: &Layout,
    offsets: &AnnotationConfig,
    text: &LabelSet,
) -> Vec<Label> {
    use LabelRole::*;

    let mut labels = Vec::new();
    let top = layout.tower_top_y;
    let mid_x = midspan_x(config, layout);
    let center_deflection = deck_deflection(config, config.deck_length / 2.0);

    // Cable tension at the tower tops, beyond the arrow tips.
    let reach = offsets.tension_arrow_length + 15.0;
    for x in [layout.tower1_x - reach, layout.tower2_x + reach] {
        labels.push(Label::symbol("σ", x, top - 8.0, 13.0, Tension));
        labels.push(Label::body(&text.tension, x, top + 5.0, 10.0, false, Tension));
    }

    let cable_mid_x = (layout.tower1_x + layout.tower2_x) / 2.0;
    let cable_mid_y = cable_y(config, layout, cable_mid_x);
    labels.push(Label::body(&text.elastic_energy, cable_mid_x, cable_mid_y - 15.0, 13.0, true, Energy));
    labels.push(Label::body(
        &text.elastic_energy_caption,
        cable_mid_x,
        cable_mid_y - 3.0,
        10.0,
        false,
        EnergyCaption,
    ));

    labels.push(Label::body(
        &text.compression,
        mid_x - 100.0,
        config.deck_y - 20.0,
        11.0,
        true,
        Compression,
    ));
    labels.push(Label::body(
        &text.tension,
        mid_x - 100.0,
        config.deck_y + config.deck_width + center_deflection + 35.0,
        11.0,
        true,
        Tension,
    ));

    let load_top = config.deck_y + center_deflection - offsets.load_arrow_length;
    labels.push(Label::symbol("w", mid_x, load_top - 20.0, 16.0, Tension));
    labels.push(Label::body(&text.distributed_load, mid_x, load_top - 5.0, 12.0, false, Tension));

    labels.push(Label::body(&text.cable_tension, layout.tower1_x - 50.0, top - 50.0, 12.0, true, CablePull));
    labels.push(Label::body(&text.cable_tension, layout.tower2_x + 50.0, top - 50.0, 12.0, true, CablePull));

    for (idx, arrow) in reaction_arrows(config, layout, offsets).iter().enumerate() {
        let tip = arrow.tip();
        labels.push(Label::symbol("R", tip.x, tip.y - 15.0, 16.0, Reaction));
        labels.push(Label::body(&(idx + 1).to_string(), tip.x, tip.y - 2.0, 10.0, false, Reaction));
    }

    let zone_y = layout.deck_center_y + center_deflection;
    labels.push(Label::body(&text.critical_zone, mid_x, zone_y + 60.0, 12.0, true, Critical));
    labels.push(Label::body(&text.max_bending, mid_x, zone_y + 75.0, 10.0, false, Critical));
    labels.push(Label::body(
        &text.critical_zone,
        layout.tower1_x,
        layout.tower_bottom_y + 45.0,
        12.0,
        true,
        Critical,
    ));
    labels.push(Label::body(
        &text.max_compression,
        layout.tower1_x,
        layout.tower_bottom_y + 58.0,
        10.0,
        false,
        Critical,
    ));

    labels.push(Label::body(
        &format!("{}: {}mm", text.deflection, format_measure(config.max_deflection)),
        mid_x + 100.0,
        zone_y,
        11.0,
        true,
        Deflection,
    ));

    labels
}

/// Whole numbers print without decimals, everything else with two.
pub fn format_measure(value: f32) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    if (rounded - rounded.round()).abs() < 0.001 {
        format!("{:.0}", rounded)
    } else {
        format!("{:.2}", rounded)
    }
}

/// Legend rows in the top-left corner on a panel wide enough for the
/// longest caption.
pub fn legend(offsets: &AnnotationConfig, text: &LabelSet, body_family: &str) -> Legend {
    const SWATCH_TEXT_GAP: f32 = 15.0;
    const PADDING: f32 = 12.0;

    let rows = [
        (LegendSwatch::Roller, &text.legend_roller, 8.0),
        (LegendSwatch::Pin, &text.legend_pin, 4.0),
        (LegendSwatch::Load, &text.legend_load, 0.0),
        (LegendSwatch::Compression, &text.legend_compression, 4.0),
        (LegendSwatch::Tension, &text.legend_tension, 4.0),
    ];

    let mut entries = Vec::with_capacity(rows.len());
    let mut widest: f32 = 0.0;
    for (idx, (swatch, caption, baseline)) in rows.into_iter().enumerate() {
        let anchor = Point::new(
            offsets.legend_x,
            offsets.legend_y + idx as f32 * offsets.legend_row_height,
        );
        let mut label = Label::body(
            caption,
            anchor.x + SWATCH_TEXT_GAP,
            anchor.y + baseline,
            12.0,
            false,
            LabelRole::Text,
        );
        label.align = TextAlign::Left;
        widest = widest.max(measure_text_width(caption, &label.font(body_family, body_family)));
        entries.push(LegendEntry {
            swatch,
            anchor,
            label,
        });
    }

    let panel_x = offsets.legend_x - PADDING;
    let panel_y = offsets.legend_y - PADDING;
    let panel = Rect::new(
        panel_x,
        panel_y,
        PADDING + SWATCH_TEXT_GAP + widest + PADDING,
        (entries.len() as f32 - 1.0) * offsets.legend_row_height + 8.0 + PADDING * 2.0,
    );
    Legend { panel, entries }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::derive_layout;

    fn default_annotations() -> (BridgeConfig, Layout, Annotations) {
        let config = BridgeConfig::default();
        let layout = derive_layout(&config);
        let ann = annotate(&config, &layout, &AnnotationConfig::default(), &LabelSet::english());
        (config, layout, ann)
    }

    #[test]
    fn stress_samples_skip_the_deck_ends() {
        let config = BridgeConfig::default();
        let layout = derive_layout(&config);
        let xs = stress_sample_xs(&config, &layout, &AnnotationConfig::default());
        assert_eq!(xs, vec![160.0, 240.0, 320.0, 400.0, 480.0, 560.0, 640.0, 720.0, 800.0]);
    }

    #[test]
    fn compression_points_inward_and_tension_outward() {
        let (_, _, ann) = default_annotations();
        assert_eq!(ann.compression_arrows.len(), 18);
        assert_eq!(ann.tension_arrows.len(), 18);
        for pair in ann.compression_arrows.chunks(2) {
            let center = (pair[0].tail.x + pair[1].tail.x) / 2.0;
            assert!((pair[0].tip().x - center).abs() < (pair[0].tail.x - center).abs());
            assert!((pair[1].tip().x - center).abs() < (pair[1].tail.x - center).abs());
        }
        for pair in ann.tension_arrows.chunks(2) {
            let center = (pair[0].tail.x + pair[1].tail.x) / 2.0;
            assert!((pair[0].tip().x - center).abs() > (pair[0].tail.x - center).abs());
            assert!((pair[1].tip().x - center).abs() > (pair[1].tail.x - center).abs());
        }
    }

    #[test]
    fn compression_sits_above_deck_and_tension_below() {
        let (config, layout, ann) = default_annotations();
        let first = ann.compression_arrows[0];
        assert_eq!(first.tail.y, deck_top_y(&config, &layout, 160.0) - 15.0);
        let first = ann.tension_arrows[0];
        assert_eq!(first.tail.y, deck_bottom_y(&config, &layout, 160.0) + 15.0);
    }

    #[test]
    fn load_arrows_land_on_the_deflected_deck() {
        let (config, layout, ann) = default_annotations();
        assert_eq!(ann.load_arrows.len(), 20);
        assert_eq!(ann.load_arrows[0].tail.x, 120.0);
        for arrow in &ann.load_arrows {
            let tip = arrow.tip();
            assert!((tip.y - deck_top_y(&config, &layout, tip.x)).abs() < 1e-3);
            assert!(tip.x < layout.deck_x + config.deck_length);
        }
    }

    #[test]
    fn supports_follow_the_deck() {
        let (_, _, ann) = default_annotations();
        assert_eq!(ann.rollers, vec![Point::new(100.0, 335.0), Point::new(900.0, 335.0)]);
        // d(200) = d(600) = 30 * 4 * 0.25 * 0.75 = 22.5
        assert_eq!(ann.pins, vec![Point::new(300.0, 322.5), Point::new(700.0, 322.5)]);
    }

    #[test]
    fn reactions_point_up_from_below_the_rollers() {
        let (_, _, ann) = default_annotations();
        assert_eq!(ann.reactions.len(), 2);
        assert_eq!(ann.reactions[0].tail, Point::new(100.0, 365.0));
        assert_eq!(ann.reactions[0].tip(), Point::new(100.0, 315.0));
    }

    #[test]
    fn hanger_markers_on_every_second_hanger() {
        let (config, layout, ann) = default_annotations();
        let hangers: Vec<_> = hanger_positions(&config, &layout).collect();
        assert_eq!(hangers.len(), 6);
        assert_eq!(ann.hanger_markers.len(), 6);
        assert_eq!(ann.hanger_markers[0].tail.x, hangers[1].x + 8.0);
        assert_eq!(ann.hanger_markers[2].tail.x, hangers[3].x + 8.0);
    }

    #[test]
    fn cable_pulls_rise_outward_at_thirty_degrees() {
        let (_, layout, ann) = default_annotations();
        let left = ann.cable_pulls[0].tip();
        let right = ann.cable_pulls[1].tip();
        assert!((left.x - (layout.tower1_x - 50.0 * 30f32.to_radians().cos())).abs() < 1e-3);
        assert!((left.y - (layout.tower_top_y - 25.0)).abs() < 1e-3);
        assert!(right.x > layout.tower2_x);
        assert!((right.y - left.y).abs() < 1e-4);
    }

    #[test]
    fn critical_zones_cover_midspan_and_tower_bases() {
        let (_, layout, ann) = default_annotations();
        assert_eq!(ann.critical_zones.len(), 3);
        assert_eq!(ann.critical_zones[0].center, Point::new(500.0, 330.0));
        assert_eq!(ann.critical_zones[0].rect, Rect::new(400.0, 250.0, 200.0, 140.0));
        assert_eq!(ann.critical_zones[1].center, Point::new(layout.tower1_x, layout.tower_bottom_y));
        assert_eq!(ann.critical_zones[2].rect, Rect::new(640.0, 350.0, 120.0, 60.0));
    }

    #[test]
    fn annotation_offsets_do_not_scale_with_the_bridge() {
        let config = BridgeConfig {
            deck_length: 400.0,
            ..Default::default()
        };
        let layout = derive_layout(&config);
        let ann = annotate(&config, &layout, &AnnotationConfig::default(), &LabelSet::english());
        assert_eq!(ann.tower_tension_arrows[0].length, 35.0);
        assert_eq!(ann.reactions[0].length, 50.0);
    }

    #[test]
    fn deflection_label_reports_configured_value() {
        let (_, _, ann) = default_annotations();
        assert!(ann.labels.iter().any(|l| l.text == "deflection: 30mm"));
        let config = BridgeConfig {
            max_deflection: 12.345,
            ..Default::default()
        };
        let layout = derive_layout(&config);
        let ann = annotate(&config, &layout, &AnnotationConfig::default(), &LabelSet::korean());
        assert!(ann.labels.iter().any(|l| l.text == "처짐: 12.35mm" || l.text == "처짐: 12.34mm"));
    }

    #[test]
    fn mohr_inset_sits_right_of_center_above_deck() {
        let (_, _, ann) = default_annotations();
        assert_eq!(ann.mohr_center, Point::new(680.0, 220.0));
    }

    #[test]
    fn legend_panel_contains_every_caption() {
        let legend = legend(&AnnotationConfig::default(), &LabelSet::english(), "sans-serif");
        assert_eq!(legend.entries.len(), 5);
        for entry in &legend.entries {
            assert!(entry.label.position.x > legend.panel.x);
            assert!(entry.label.position.y < legend.panel.y + legend.panel.height);
        }
        assert_eq!(legend.entries[4].anchor.y, 30.0 + 4.0 * 18.0);
    }
}
