//! Fixed-order scene composition over a [`Surface`].
//!
//! Each pass clears the surface and redraws everything from a fresh
//! [`derive_layout`]; later stages paint over earlier ones.

use crate::annotations::{
    Annotations, Arrow, ArrowHead, Label, LabelRole, LabelSet, Legend, LegendSwatch, annotate,
    legend,
};
use crate::config::Config;
use crate::geometry::{
    Layout, Point, cable_curve, deck_outline, derive_layout, hanger_positions, tower_outline,
};
use crate::mohr::{MARKER_RADIUS, MohrInset};
use crate::surface::{Paint, Path, Rect, Stroke, Surface, TextRun};
use crate::theme::Theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Background,
    Grid,
    CriticalZones,
    Centerline,
    Deck,
    InternalStress,
    Towers,
    MainCable,
    Hangers,
    CableTension,
    Supports,
    DistributedLoad,
    Reactions,
    MohrCircle,
    Labels,
    Legend,
}

impl Stage {
    pub const ORDER: [Stage; 16] = [
        Stage::Background,
        Stage::Grid,
        Stage::CriticalZones,
        Stage::Centerline,
        Stage::Deck,
        Stage::InternalStress,
        Stage::Towers,
        Stage::MainCable,
        Stage::Hangers,
        Stage::CableTension,
        Stage::Supports,
        Stage::DistributedLoad,
        Stage::Reactions,
        Stage::MohrCircle,
        Stage::Labels,
        Stage::Legend,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Stage::Background => "background",
            Stage::Grid => "grid",
            Stage::CriticalZones => "critical-zones",
            Stage::Centerline => "centerline",
            Stage::Deck => "deck",
            Stage::InternalStress => "internal-stress",
            Stage::Towers => "towers",
            Stage::MainCable => "main-cable",
            Stage::Hangers => "hangers",
            Stage::CableTension => "cable-tension",
            Stage::Supports => "supports",
            Stage::DistributedLoad => "distributed-load",
            Stage::Reactions => "reactions",
            Stage::MohrCircle => "mohr-circle",
            Stage::Labels => "labels",
            Stage::Legend => "legend",
        }
    }
}

/// Colour and line width shared by an arrow's shaft and head.
#[derive(Debug, Clone)]
pub struct ArrowStyle {
    pub color: String,
    pub width: f32,
}

impl ArrowStyle {
    pub fn new(color: &str, width: f32) -> Self {
        Self {
            color: color.to_string(),
            width,
        }
    }
}

/// Strokes the shaft from `arrow.tail` to its tip, then fills a triangular
/// head at the tip rotated to `arrow.direction`.
pub fn draw_arrow(surface: &mut dyn Surface, arrow: &Arrow, style: &ArrowStyle) {
    let tip = arrow.tip();
    surface.stroke_path(&Path::line(arrow.tail, tip), &Stroke::new(&style.color, style.width));

    let ArrowHead {
        length,
        half_width,
    } = arrow.head;
    surface.save();
    surface.translate(tip.x, tip.y);
    surface.rotate(arrow.direction.y.atan2(arrow.direction.x));
    let head = Path::new()
        .move_to(0.0, 0.0)
        .line_to(-length, -half_width)
        .line_to(-length, half_width)
        .close();
    surface.fill_path(&head, &Paint::solid(&style.color));
    surface.restore();
}

/// Draws the full scene when a surface is available.
///
/// Returns `false` without touching anything when `surface` is `None`, which
/// is how hosts call it before their drawing target exists.
pub fn render<S: Surface>(surface: Option<&mut S>, config: &Config) -> bool {
    let Some(surface) = surface else {
        tracing::debug!("rendering surface unavailable, skipping render");
        return false;
    };
    compose(surface, config);
    true
}

/// Clears `surface` and draws every enabled stage in [`Stage::ORDER`].
/// Returns the stages drawn.
pub fn compose<S: Surface>(surface: &mut S, config: &Config) -> Vec<Stage> {
    let scene = Scene::new(config);
    let bridge = &config.bridge;
    surface.clear(Rect::new(0.0, 0.0, bridge.width, bridge.height));

    let mut drawn = Vec::with_capacity(Stage::ORDER.len());
    for stage in Stage::ORDER {
        if !scene.enabled(stage) {
            continue;
        }
        tracing::trace!(stage = stage.name(), "drawing stage");
        scene.draw(stage, surface);
        drawn.push(stage);
    }
    tracing::debug!(
        stages = drawn.len(),
        hangers = hanger_positions(bridge, &scene.layout).count(),
        "scene composed"
    );
    drawn
}

struct Scene<'a> {
    config: &'a Config,
    layout: Layout,
    text: LabelSet,
    annotations: Annotations,
}

impl<'a> Scene<'a> {
    fn new(config: &'a Config) -> Self {
        let layout = derive_layout(&config.bridge);
        let text = LabelSet::for_language(config.language);
        let annotations = annotate(&config.bridge, &layout, &config.annotations, &text);
        Self {
            config,
            layout,
            text,
            annotations,
        }
    }

    fn theme(&self) -> &Theme {
        &self.config.theme
    }

    fn enabled(&self, stage: Stage) -> bool {
        match stage {
            Stage::MohrCircle => self.config.scene.mohr_circle,
            Stage::Legend => self.config.scene.legend,
            _ => true,
        }
    }

    fn draw(&self, stage: Stage, surface: &mut dyn Surface) {
        match stage {
            Stage::Background => self.background(surface),
            Stage::Grid => self.grid(surface),
            Stage::CriticalZones => self.critical_zones(surface),
            Stage::Centerline => self.centerline(surface),
            Stage::Deck => self.deck(surface),
            Stage::InternalStress => self.internal_stress(surface),
            Stage::Towers => self.towers(surface),
            Stage::MainCable => self.main_cable(surface),
            Stage::Hangers => self.hangers(surface),
            Stage::CableTension => self.cable_tension(surface),
            Stage::Supports => self.supports(surface),
            Stage::DistributedLoad => self.distributed_load(surface),
            Stage::Reactions => self.reactions(surface),
            Stage::MohrCircle => self.mohr_circle(surface),
            Stage::Labels => self.labels(surface),
            Stage::Legend => self.legend(surface),
        }
    }

    fn background(&self, surface: &mut dyn Surface) {
        let bridge = &self.config.bridge;
        surface.fill_rect(
            Rect::new(0.0, 0.0, bridge.width, bridge.height),
            &Paint::solid(&self.theme().background),
        );
    }

    fn grid(&self, surface: &mut dyn Surface) {
        let bridge = &self.config.bridge;
        let spacing = self.config.scene.grid_spacing;
        if !(spacing.is_finite() && spacing > 0.0) {
            return;
        }
        let mut path = Path::new();
        let mut x = 0.0;
        while x < bridge.width {
            path = path.move_to(x, 0.0).line_to(x, bridge.height);
            x += spacing;
        }
        let mut y = 0.0;
        while y < bridge.height {
            path = path.move_to(0.0, y).line_to(bridge.width, y);
            y += spacing;
        }
        surface.stroke_path(&path, &Stroke::new(&self.theme().grid, 1.0));
    }

    fn critical_zones(&self, surface: &mut dyn Surface) {
        let theme = self.theme();
        for zone in &self.annotations.critical_zones {
            let paint = Paint::radial_fade(
                zone.center,
                zone.radius,
                &theme.critical_zone,
                &theme.critical_zone_edge,
            );
            surface.fill_rect(zone.rect, &paint);
        }
    }

    fn centerline(&self, surface: &mut dyn Surface) {
        let y = self.layout.deck_center_y;
        let stroke = Stroke::new(&self.theme().centerline, 2.0)
            .dashed(&self.config.scene.centerline_dash);
        surface.stroke_path(
            &Path::line(Point::new(0.0, y), Point::new(self.config.bridge.width, y)),
            &stroke,
        );
    }

    fn deck(&self, surface: &mut dyn Surface) {
        let outline = deck_outline(
            &self.config.bridge,
            &self.layout,
            self.config.scene.deck_sample_step,
        );
        surface.fill_and_stroke_path(
            &Path::polygon(&outline),
            &Paint::solid(&self.theme().deck_fill),
            &Stroke::new(&self.theme().deck_stroke, 2.0),
        );
    }

    fn internal_stress(&self, surface: &mut dyn Surface) {
        let compression = ArrowStyle::new(&self.theme().compression, 2.0);
        for arrow in &self.annotations.compression_arrows {
            draw_arrow(surface, arrow, &compression);
        }
        let tension = ArrowStyle::new(&self.theme().tension, 2.0);
        for arrow in &self.annotations.tension_arrows {
            draw_arrow(surface, arrow, &tension);
        }
    }

    fn towers(&self, surface: &mut dyn Surface) {
        let fill = Paint::solid(&self.theme().tower_fill);
        let stroke = Stroke::new(&self.theme().tower_stroke, 2.0);
        for tower_x in self.layout.tower_xs() {
            let corners = tower_outline(&self.config.bridge, &self.layout, tower_x);
            surface.fill_and_stroke_path(&Path::polygon(&corners), &fill, &stroke);
        }
    }

    fn main_cable(&self, surface: &mut dyn Surface) {
        let curve = cable_curve(
            &self.config.bridge,
            &self.layout,
            self.config.scene.cable_sample_step,
        );
        let path = Path::polyline(&curve);
        surface.stroke_path(&path, &Stroke::new(&self.theme().cable_aura, 12.0));
        surface.stroke_path(&path, &Stroke::new(&self.theme().cable, 4.0));
    }

    fn hangers(&self, surface: &mut dyn Surface) {
        let aura = Stroke::new(&self.theme().cable_aura, 8.0);
        let solid = Stroke::new(&self.theme().hanger, 2.0);
        for hanger in hanger_positions(&self.config.bridge, &self.layout) {
            let path = Path::line(
                Point::new(hanger.x, hanger.cable_y),
                Point::new(hanger.x, hanger.deck_top_y),
            );
            surface.stroke_path(&path, &aura);
            surface.stroke_path(&path, &solid);
        }
    }

    fn cable_tension(&self, surface: &mut dyn Surface) {
        let tower = ArrowStyle::new(&self.theme().tension, 2.5);
        for arrow in &self.annotations.tower_tension_arrows {
            draw_arrow(surface, arrow, &tower);
        }
        let marker = ArrowStyle::new(&self.theme().tension, 1.5);
        for arrow in &self.annotations.hanger_markers {
            draw_arrow(surface, arrow, &marker);
        }
    }

    fn supports(&self, surface: &mut dyn Surface) {
        for anchor in &self.annotations.rollers {
            self.roller(surface, *anchor);
        }
        for anchor in &self.annotations.pins {
            self.pin(surface, *anchor);
        }
    }

    /// Triangle on three rollers over a ground line, apex at `apex`.
    fn roller(&self, surface: &mut dyn Surface, apex: Point) {
        let theme = self.theme();
        let Point { x, y } = apex;
        let triangle = Path::new()
            .move_to(x, y)
            .line_to(x - 15.0, y + 20.0)
            .line_to(x + 15.0, y + 20.0)
            .close();
        surface.fill_and_stroke_path(
            &triangle,
            &Paint::solid(&theme.roller_fill),
            &Stroke::new(&theme.roller_stroke, 2.0),
        );
        let wheel = Paint::solid(&theme.roller_fill);
        for i in -1..=1 {
            surface.fill_path(&Path::circle(Point::new(x + i as f32 * 10.0, y + 25.0), 4.0), &wheel);
        }
        surface.stroke_path(
            &Path::line(Point::new(x - 20.0, y + 30.0), Point::new(x + 20.0, y + 30.0)),
            &Stroke::new(&theme.roller_stroke, 2.0),
        );
    }

    /// Hinge disc with a cross.
    fn pin(&self, surface: &mut dyn Surface, center: Point) {
        let theme = self.theme();
        surface.fill_and_stroke_path(
            &Path::circle(center, 8.0),
            &Paint::solid(&theme.pin_fill),
            &Stroke::new(&theme.pin_stroke, 2.0),
        );
        let Point { x, y } = center;
        let cross = Path::new()
            .move_to(x - 5.0, y)
            .line_to(x + 5.0, y)
            .move_to(x, y - 5.0)
            .line_to(x, y + 5.0);
        surface.stroke_path(&cross, &Stroke::new(&theme.pin_cross, 1.5));
    }

    fn distributed_load(&self, surface: &mut dyn Surface) {
        let style = ArrowStyle::new(&self.theme().tension, 1.5);
        for arrow in &self.annotations.load_arrows {
            draw_arrow(surface, arrow, &style);
        }
    }

    fn reactions(&self, surface: &mut dyn Surface) {
        let pull = ArrowStyle::new(&self.theme().cable_pull, 2.5);
        for arrow in &self.annotations.cable_pulls {
            draw_arrow(surface, arrow, &pull);
        }
        let reaction = ArrowStyle::new(&self.theme().reaction, 3.0);
        for arrow in &self.annotations.reactions {
            draw_arrow(surface, arrow, &reaction);
        }
    }

    fn mohr_circle(&self, surface: &mut dyn Surface) {
        let theme = self.theme();
        let inset = MohrInset::new(
            self.annotations.mohr_center,
            self.config.annotations.mohr_radius,
            &self.text.mohr_title,
            &self.text.mohr_caption,
        );
        surface.fill_rect(inset.panel, &Paint::solid(&theme.mohr_panel));
        surface.stroke_rect(inset.panel, &Stroke::new(&theme.mohr_border, 2.0));

        let axis = Stroke::new(&theme.mohr_axis, 1.0);
        surface.stroke_path(&Path::line(inset.sigma_axis[0], inset.sigma_axis[1]), &axis);
        surface.stroke_path(&Path::line(inset.tau_axis[0], inset.tau_axis[1]), &axis);

        surface.stroke_path(
            &Path::circle(inset.center, inset.radius),
            &Stroke::new(&theme.mohr_circle, 2.0),
        );
        surface.fill_path(
            &Path::circle(inset.stress_point, MARKER_RADIUS),
            &Paint::solid(&theme.mohr_stress_point),
        );
        let principal = Paint::solid(&theme.mohr_principal);
        for point in inset.principal_points {
            surface.fill_path(&Path::circle(point, MARKER_RADIUS), &principal);
        }
        for label in &inset.labels {
            surface.fill_text(&self.text_run(label));
        }
    }

    fn labels(&self, surface: &mut dyn Surface) {
        for label in &self.annotations.labels {
            surface.fill_text(&self.text_run(label));
        }
    }

    fn legend(&self, surface: &mut dyn Surface) {
        let theme = self.theme();
        let Legend { panel, entries } =
            legend(&self.config.annotations, &self.text, &theme.font_family);
        surface.fill_rect(panel, &Paint::solid(&theme.legend_panel));

        for entry in &entries {
            let Point { x, y } = entry.anchor;
            match entry.swatch {
                LegendSwatch::Roller => {
                    let triangle = Path::new()
                        .move_to(x, y)
                        .line_to(x - 8.0, y + 10.0)
                        .line_to(x + 8.0, y + 10.0)
                        .close();
                    surface.fill_path(&triangle, &Paint::solid(&theme.roller_fill));
                }
                LegendSwatch::Pin => {
                    surface.fill_path(&Path::circle(entry.anchor, 5.0), &Paint::solid(&theme.pin_fill));
                }
                LegendSwatch::Load => {
                    let arrow = Arrow {
                        tail: Point::new(x, y - 10.0),
                        direction: Point::new(0.0, 1.0),
                        length: 10.0,
                        head: ArrowHead {
                            length: 6.0,
                            half_width: 3.0,
                        },
                    };
                    draw_arrow(surface, &arrow, &ArrowStyle::new(&theme.tension, 1.5));
                }
                LegendSwatch::Compression => {
                    let style = ArrowStyle::new(&theme.compression, 1.5);
                    for arrow in legend_pair(entry.anchor, true) {
                        draw_arrow(surface, &arrow, &style);
                    }
                }
                LegendSwatch::Tension => {
                    let style = ArrowStyle::new(&theme.tension, 1.5);
                    for arrow in legend_pair(entry.anchor, false) {
                        draw_arrow(surface, &arrow, &style);
                    }
                }
            }
            surface.fill_text(&self.text_run(&entry.label));
        }
    }

    fn text_run(&self, label: &Label) -> TextRun {
        let theme = self.theme();
        let color = match label.role {
            LabelRole::Text => &theme.text,
            LabelRole::Tension => &theme.tension,
            LabelRole::Compression => &theme.compression,
            LabelRole::Energy => &theme.energy_label,
            LabelRole::EnergyCaption => &theme.energy_caption,
            LabelRole::CablePull => &theme.cable_pull,
            LabelRole::Reaction => &theme.reaction,
            LabelRole::Critical => &theme.critical_label,
            LabelRole::Deflection => &theme.deflection_label,
        };
        TextRun {
            text: label.text.clone(),
            position: label.position,
            font: label.font(&theme.font_family, &theme.symbol_font_family),
            align: label.align,
            color: color.clone(),
        }
    }
}

/// Small horizontal arrow pair: heads meet in the middle for compression,
/// point away from it for tension.
fn legend_pair(center: Point, inward: bool) -> [Arrow; 2] {
    let head = ArrowHead {
        length: 3.0,
        half_width: 3.0,
    };
    let right = Point::new(1.0, 0.0);
    let left = Point::new(-1.0, 0.0);
    if inward {
        [
            Arrow {
                tail: Point::new(center.x - 8.0, center.y),
                direction: right,
                length: 6.0,
                head,
            },
            Arrow {
                tail: Point::new(center.x + 8.0, center.y),
                direction: left,
                length: 6.0,
                head,
            },
        ]
    } else {
        [
            Arrow {
                tail: Point::new(center.x - 2.0, center.y),
                direction: left,
                length: 8.0,
                head,
            },
            Arrow {
                tail: Point::new(center.x + 2.0, center.y),
                direction: right,
                length: 8.0,
                head,
            },
        ]
    }
}
