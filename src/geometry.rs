//! Closed-form bridge geometry.
//!
//! Every function here is pure: the same [`BridgeConfig`] always yields the
//! same coordinates, and nothing is cached between calls. Inputs are not
//! validated; see [`BridgeConfig::validate`].

use crate::config::BridgeConfig;
use serde::Serialize;

/// Towers stand at these fractions of the deck span.
pub const TOWER_SPAN_FRACTIONS: [f32; 2] = [0.25, 0.75];

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Placement values every drawing stage starts from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Layout {
    pub deck_x: f32,
    pub deck_center_y: f32,
    pub tower1_x: f32,
    pub tower2_x: f32,
    pub tower_top_y: f32,
    pub tower_bottom_y: f32,
}

impl Layout {
    pub fn cable_span(&self) -> f32 {
        self.tower2_x - self.tower1_x
    }

    pub fn tower_xs(&self) -> [f32; 2] {
        [self.tower1_x, self.tower2_x]
    }
}

pub fn derive_layout(config: &BridgeConfig) -> Layout {
    let deck_x = (config.width - config.deck_length) / 2.0;
    let deck_center_y = config.deck_y + config.deck_width / 2.0;
    Layout {
        deck_x,
        deck_center_y,
        tower1_x: deck_x + TOWER_SPAN_FRACTIONS[0] * config.deck_length,
        tower2_x: deck_x + TOWER_SPAN_FRACTIONS[1] * config.deck_length,
        tower_top_y: deck_center_y - config.tower_height / 2.0,
        tower_bottom_y: deck_center_y + config.tower_height / 2.0,
    }
}

/// Downward deck deflection at deck-local position `local_x`.
///
/// Zero at both supports and `max_deflection` at midspan. Outside
/// `[0, deck_length]` the parabola is extrapolated (negative values), which
/// is not treated as an error.
pub fn deck_deflection(config: &BridgeConfig, local_x: f32) -> f32 {
    let n = local_x / config.deck_length;
    config.max_deflection * 4.0 * n * (1.0 - n)
}

/// Main-cable sag below the tower tops at absolute position `x`.
///
/// Zero at both tower tops and `main_cable_sag` halfway between them;
/// extrapolated outside `[tower1_x, tower2_x]`.
pub fn cable_sag(config: &BridgeConfig, layout: &Layout, x: f32) -> f32 {
    let u = (x - layout.tower1_x) / layout.cable_span();
    config.main_cable_sag * 4.0 * u * (1.0 - u)
}

/// Deflected top edge of the deck at absolute `x`.
pub fn deck_top_y(config: &BridgeConfig, layout: &Layout, x: f32) -> f32 {
    config.deck_y + deck_deflection(config, x - layout.deck_x)
}

/// Deflected bottom edge of the deck at absolute `x`.
pub fn deck_bottom_y(config: &BridgeConfig, layout: &Layout, x: f32) -> f32 {
    deck_top_y(config, layout, x) + config.deck_width
}

pub fn cable_y(config: &BridgeConfig, layout: &Layout, x: f32) -> f32 {
    layout.tower_top_y + cable_sag(config, layout, x)
}

/// Samples `f` over `[start, end]`.
///
/// Yields `start + i * step` while strictly before `end`, then `end` itself,
/// so the last segment may be shorter than `step`. The iterator is finite and
/// can be restarted by cloning it before consumption. A non-positive or
/// non-finite `step` degenerates to the two boundary points.
pub fn sample_curve<F>(f: F, start: f32, end: f32, step: f32) -> CurveSamples<F>
where
    F: Fn(f32) -> f32,
{
    CurveSamples {
        f,
        start,
        end,
        step,
        index: 0,
        done: false,
    }
}

#[derive(Debug, Clone)]
pub struct CurveSamples<F> {
    f: F,
    start: f32,
    end: f32,
    step: f32,
    index: u32,
    done: bool,
}

impl<F> CurveSamples<F> {
    /// Points closer than this to `end` are folded into the final sample.
    fn boundary_slack(&self) -> f32 {
        self.step * 1e-4
    }
}

impl<F> Iterator for CurveSamples<F>
where
    F: Fn(f32) -> f32,
{
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        if self.done {
            return None;
        }
        if self.index == 0 {
            self.index = 1;
            if self.start == self.end {
                self.done = true;
            }
            return Some(Point::new(self.start, (self.f)(self.start)));
        }
        if self.step.is_finite() && self.step > 0.0 {
            let x = self.start + self.index as f32 * self.step;
            if self.end - x > self.boundary_slack() {
                self.index += 1;
                return Some(Point::new(x, (self.f)(x)));
            }
        }
        self.done = true;
        Some(Point::new(self.end, (self.f)(self.end)))
    }
}

/// One vertical hanger from the main cable down to the deflected deck top.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Hanger {
    pub x: f32,
    pub cable_y: f32,
    pub deck_top_y: f32,
}

impl Hanger {
    pub fn mid_y(&self) -> f32 {
        (self.cable_y + self.deck_top_y) / 2.0
    }
}

/// Hangers at `tower1_x + k * hanger_spacing` (k = 1, 2, ...) strictly before
/// `tower2_x`, in ascending order. Empty when the spacing reaches the span.
pub fn hanger_positions<'a>(config: &'a BridgeConfig, layout: &'a Layout) -> Hangers<'a> {
    Hangers {
        config,
        layout,
        index: 1,
    }
}

#[derive(Debug, Clone)]
pub struct Hangers<'a> {
    config: &'a BridgeConfig,
    layout: &'a Layout,
    index: u32,
}

impl Iterator for Hangers<'_> {
    type Item = Hanger;

    fn next(&mut self) -> Option<Hanger> {
        let spacing = self.config.hanger_spacing;
        if !(spacing.is_finite() && spacing > 0.0) {
            return None;
        }
        let x = self.layout.tower1_x + self.index as f32 * spacing;
        if x >= self.layout.tower2_x {
            return None;
        }
        self.index += 1;
        Some(Hanger {
            x,
            cable_y: cable_y(self.config, self.layout, x),
            deck_top_y: deck_top_y(self.config, self.layout, x),
        })
    }
}

/// Closed deck polygon: deflected top edge left to right, then the bottom
/// edge right to left.
pub fn deck_outline(config: &BridgeConfig, layout: &Layout, step: f32) -> Vec<Point> {
    let deflection = |x: f32| deck_deflection(config, x);
    let top = sample_curve(deflection, 0.0, config.deck_length, step)
        .map(|p| Point::new(layout.deck_x + p.x, config.deck_y + p.y));
    let bottom: Vec<Point> = sample_curve(deflection, 0.0, config.deck_length, step)
        .map(|p| Point::new(layout.deck_x + p.x, config.deck_y + config.deck_width + p.y))
        .collect();
    top.chain(bottom.into_iter().rev()).collect()
}

/// Main cable from tower top to tower top.
pub fn cable_curve(config: &BridgeConfig, layout: &Layout, step: f32) -> Vec<Point> {
    sample_curve(
        |x| cable_y(config, layout, x),
        layout.tower1_x,
        layout.tower2_x,
        step,
    )
    .collect()
}

/// Tapered tower trapezoid centred on `center_x`: top-left, top-right,
/// bottom-right, bottom-left.
pub fn tower_outline(config: &BridgeConfig, layout: &Layout, center_x: f32) -> [Point; 4] {
    let top = config.tower_top_width / 2.0;
    let bottom = config.tower_bottom_width / 2.0;
    [
        Point::new(center_x - top, layout.tower_top_y),
        Point::new(center_x + top, layout.tower_top_y),
        Point::new(center_x + bottom, layout.tower_bottom_y),
        Point::new(center_x - bottom, layout.tower_bottom_y),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;
    use proptest::prelude::*;

    fn span_config(tower1_x: f32, tower2_x: f32) -> (BridgeConfig, Layout) {
        // Towers sit at 25%/75%, so a 200..600 cable span means an 800 deck at x=0.
        let deck_length = (tower2_x - tower1_x) * 2.0;
        let config = BridgeConfig {
            width: deck_length,
            deck_length,
            ..Default::default()
        };
        let layout = derive_layout(&config);
        assert_eq!(layout.tower1_x, tower1_x);
        assert_eq!(layout.tower2_x, tower2_x);
        (config, layout)
    }

    #[test]
    fn layout_centers_deck_and_towers() {
        let config = BridgeConfig::default();
        let layout = derive_layout(&config);
        assert_eq!(layout.deck_x, 100.0);
        assert_eq!(layout.deck_center_y, 300.0);
        assert_eq!(layout.tower1_x, 300.0);
        assert_eq!(layout.tower2_x, 700.0);
        assert_eq!(layout.tower_top_y, 220.0);
        assert_eq!(layout.tower_bottom_y, 380.0);
    }

    #[test]
    fn deflection_scenario() {
        let config = BridgeConfig {
            deck_length: 800.0,
            max_deflection: 30.0,
            ..Default::default()
        };
        assert_eq!(deck_deflection(&config, 400.0), 30.0);
        assert_eq!(deck_deflection(&config, 0.0), 0.0);
        assert_eq!(deck_deflection(&config, 800.0), 0.0);
    }

    #[test]
    fn deflection_extrapolates_outside_the_span() {
        let config = BridgeConfig::default();
        assert!(deck_deflection(&config, -100.0) < 0.0);
        assert!(deck_deflection(&config, 900.0) < 0.0);
    }

    #[test]
    fn cable_sag_extrapolates_outside_the_span() {
        let config = BridgeConfig::default();
        let layout = derive_layout(&config);
        let before = cable_sag(&config, &layout, layout.tower1_x - 100.0);
        let after = cable_sag(&config, &layout, layout.tower2_x + 100.0);
        assert!(approx_eq!(f32, before, -100.0, epsilon = 1e-3));
        assert!(approx_eq!(f32, after, -100.0, epsilon = 1e-3));
    }

    #[test]
    fn cable_sag_scenario() {
        let (config, layout) = span_config(200.0, 600.0);
        assert_eq!(config.main_cable_sag, 80.0);
        assert_eq!(cable_sag(&config, &layout, 400.0), 80.0);
        assert_eq!(cable_sag(&config, &layout, 200.0), 0.0);
        assert_eq!(cable_sag(&config, &layout, 600.0), 0.0);
    }

    #[test]
    fn hanger_scenario() {
        let (config, layout) = span_config(200.0, 600.0);
        let xs: Vec<f32> = hanger_positions(&config, &layout).map(|h| h.x).collect();
        assert_eq!(xs, vec![260.0, 320.0, 380.0, 440.0, 500.0, 560.0]);
    }

    #[test]
    fn hangers_connect_cable_to_deck_top() {
        let config = BridgeConfig::default();
        let layout = derive_layout(&config);
        for hanger in hanger_positions(&config, &layout) {
            assert_eq!(hanger.cable_y, layout.tower_top_y + cable_sag(&config, &layout, hanger.x));
            assert_eq!(
                hanger.deck_top_y,
                config.deck_y + deck_deflection(&config, hanger.x - layout.deck_x)
            );
            assert!(hanger.cable_y < hanger.deck_top_y);
        }
    }

    #[test]
    fn wide_spacing_yields_no_hangers() {
        let (mut config, layout) = span_config(200.0, 600.0);
        config.hanger_spacing = 500.0;
        assert_eq!(hanger_positions(&config, &layout).count(), 0);
        config.hanger_spacing = 400.0;
        assert_eq!(hanger_positions(&config, &layout).count(), 0);
        config.hanger_spacing = 0.0;
        assert_eq!(hanger_positions(&config, &layout).count(), 0);
    }

    #[test]
    fn sample_curve_includes_short_final_segment() {
        let xs: Vec<f32> = sample_curve(|x| x, 0.0, 25.0, 10.0).map(|p| p.x).collect();
        assert_eq!(xs, vec![0.0, 10.0, 20.0, 25.0]);
    }

    #[test]
    fn sample_curve_exact_multiple_has_no_duplicate_end() {
        let xs: Vec<f32> = sample_curve(|x| x, 0.0, 30.0, 10.0).map(|p| p.x).collect();
        assert_eq!(xs, vec![0.0, 10.0, 20.0, 30.0]);
    }

    #[test]
    fn sample_curve_is_restartable() {
        let samples = sample_curve(|x| x * x, 1.0, 2.0, 0.3);
        let first: Vec<Point> = samples.clone().collect();
        let second: Vec<Point> = samples.collect();
        assert_eq!(first, second);
        assert_eq!(first.last().map(|p| p.y), Some(4.0));
    }

    #[test]
    fn sample_curve_degenerate_step_returns_bounds() {
        let xs: Vec<f32> = sample_curve(|x| x, 0.0, 5.0, 0.0).map(|p| p.x).collect();
        assert_eq!(xs, vec![0.0, 5.0]);
        let xs: Vec<f32> = sample_curve(|x| x, 3.0, 3.0, 1.0).map(|p| p.x).collect();
        assert_eq!(xs, vec![3.0]);
    }

    #[test]
    fn deck_outline_closes_forward_then_backward() {
        let config = BridgeConfig::default();
        let layout = derive_layout(&config);
        let outline = deck_outline(&config, &layout, 10.0);
        // 81 samples along the top, 81 back along the bottom.
        assert_eq!(outline.len(), 162);
        assert_eq!(outline[0], Point::new(100.0, 270.0));
        assert_eq!(outline[80], Point::new(900.0, 270.0));
        assert_eq!(outline[81], Point::new(900.0, 330.0));
        assert_eq!(outline[161], Point::new(100.0, 330.0));
        assert_eq!(outline[40], Point::new(500.0, 300.0));
    }

    #[test]
    fn tower_outline_tapers_upward() {
        let config = BridgeConfig::default();
        let layout = derive_layout(&config);
        let [tl, tr, br, bl] = tower_outline(&config, &layout, layout.tower1_x);
        assert_eq!(tr.x - tl.x, 40.0);
        assert_eq!(br.x - bl.x, 50.0);
        assert_eq!(tl.y, layout.tower_top_y);
        assert_eq!(bl.y, layout.tower_bottom_y);
    }

    #[test]
    fn geometry_is_idempotent() {
        let config = BridgeConfig::default();
        let a = derive_layout(&config);
        let b = derive_layout(&config);
        assert_eq!(a, b);
        let ha: Vec<Hanger> = hanger_positions(&config, &a).collect();
        let hb: Vec<Hanger> = hanger_positions(&config, &b).collect();
        assert_eq!(ha, hb);
        assert_eq!(cable_curve(&config, &a, 5.0), cable_curve(&config, &b, 5.0));
    }

    proptest! {
        #[test]
        fn deflection_vanishes_at_supports_and_peaks_midspan(
            deck_length in 10.0f32..4000.0,
            max_deflection in 0.1f32..200.0,
        ) {
            let config = BridgeConfig { deck_length, max_deflection, ..Default::default() };
            prop_assert_eq!(deck_deflection(&config, 0.0), 0.0);
            prop_assert_eq!(deck_deflection(&config, deck_length), 0.0);
            prop_assert!(approx_eq!(
                f32,
                deck_deflection(&config, deck_length / 2.0),
                max_deflection,
                ulps = 2
            ));
        }

        #[test]
        fn deflection_is_symmetric(
            deck_length in 10.0f32..4000.0,
            max_deflection in 0.1f32..200.0,
            t in 0.0f32..1.0,
        ) {
            let config = BridgeConfig { deck_length, max_deflection, ..Default::default() };
            let x = t * deck_length;
            prop_assert!(approx_eq!(
                f32,
                deck_deflection(&config, x),
                deck_deflection(&config, deck_length - x),
                epsilon = max_deflection * 1e-4
            ));
        }

        #[test]
        fn cable_sag_vanishes_at_tower_tops(
            deck_length in 10.0f32..4000.0,
            main_cable_sag in 0.1f32..400.0,
        ) {
            let config = BridgeConfig { deck_length, main_cable_sag, ..Default::default() };
            let layout = derive_layout(&config);
            prop_assert!(cable_sag(&config, &layout, layout.tower1_x).abs() <= main_cable_sag * 1e-4);
            prop_assert!(cable_sag(&config, &layout, layout.tower2_x).abs() <= main_cable_sag * 1e-4);
            let mid = (layout.tower1_x + layout.tower2_x) / 2.0;
            prop_assert!(approx_eq!(
                f32,
                cable_sag(&config, &layout, mid),
                main_cable_sag,
                epsilon = main_cable_sag * 1e-4
            ));
        }

        #[test]
        fn hangers_ascend_strictly_inside_the_span(
            deck_length in 100.0f32..4000.0,
            hanger_spacing in 5.0f32..600.0,
        ) {
            let config = BridgeConfig { deck_length, hanger_spacing, ..Default::default() };
            let layout = derive_layout(&config);
            let xs: Vec<f32> = hanger_positions(&config, &layout).map(|h| h.x).collect();
            for pair in xs.windows(2) {
                prop_assert!(pair[1] > pair[0]);
                prop_assert!(approx_eq!(f32, pair[1] - pair[0], hanger_spacing, epsilon = 1e-2));
            }
            for x in &xs {
                prop_assert!(*x > layout.tower1_x && *x < layout.tower2_x);
            }
            if let Some(last) = xs.last() {
                prop_assert!(layout.tower2_x - last <= hanger_spacing + 1e-2);
            }
            if hanger_spacing > layout.cable_span() + 1e-2 {
                prop_assert!(xs.is_empty());
            }
        }

        #[test]
        fn samples_end_exactly_on_the_boundary(
            start in -500.0f32..500.0,
            len in 0.5f32..1000.0,
            step in 0.5f32..100.0,
        ) {
            let end = start + len;
            let points: Vec<Point> = sample_curve(|x| x, start, end, step).collect();
            prop_assert_eq!(points.first().map(|p| p.x), Some(start));
            prop_assert_eq!(points.last().map(|p| p.x), Some(end));
            for pair in points.windows(2) {
                prop_assert!(pair[1].x > pair[0].x);
                prop_assert!(pair[1].x - pair[0].x <= step * 1.001);
            }
        }
    }
}
