//! Mohr's-circle inset.
//!
//! A fixed-size decorative panel: only its centre comes from the bridge
//! layout, nothing inside it depends on bridge geometry.

use std::f32::consts::FRAC_PI_4;

use crate::annotations::{Label, LabelRole, Typeface};
use crate::geometry::Point;
use crate::surface::{Rect, TextAlign};
use serde::Serialize;

const PANEL_HALF_SIZE: f32 = 65.0;
const AXIS_HALF_LENGTH: f32 = 55.0;
/// Angle of the plotted stress state on the circle.
const STRESS_STATE_ANGLE: f32 = FRAC_PI_4;
pub const MARKER_RADIUS: f32 = 4.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MohrInset {
    pub center: Point,
    pub radius: f32,
    pub panel: Rect,
    pub sigma_axis: [Point; 2],
    pub tau_axis: [Point; 2],
    pub stress_point: Point,
    /// Principal stresses σ1 and σ2 where the circle meets the σ axis.
    pub principal_points: [Point; 2],
    pub labels: Vec<Label>,
}

impl MohrInset {
    pub fn new(center: Point, radius: f32, title: &str, caption: &str) -> Self {
        let Point { x: cx, y: cy } = center;
        let (sin, cos) = STRESS_STATE_ANGLE.sin_cos();
        Self {
            center,
            radius,
            panel: Rect::centered(center, PANEL_HALF_SIZE, PANEL_HALF_SIZE),
            sigma_axis: [
                Point::new(cx - AXIS_HALF_LENGTH, cy),
                Point::new(cx + AXIS_HALF_LENGTH, cy),
            ],
            tau_axis: [
                Point::new(cx, cy - AXIS_HALF_LENGTH),
                Point::new(cx, cy + AXIS_HALF_LENGTH),
            ],
            // Screen y grows downward, so positive shear plots upward.
            stress_point: Point::new(cx + radius * cos, cy - radius * sin),
            principal_points: [Point::new(cx + radius, cy), Point::new(cx - radius, cy)],
            labels: vec![
                axis_label("σ", cx + AXIS_HALF_LENGTH, cy + 15.0),
                axis_label("τ", cx + 10.0, cy - AXIS_HALF_LENGTH + 5.0),
                Label {
                    text: title.to_string(),
                    position: Point::new(cx, cy - PANEL_HALF_SIZE - 5.0),
                    size: 11.0,
                    bold: true,
                    typeface: Typeface::Body,
                    align: TextAlign::Center,
                    role: LabelRole::Text,
                },
                Label {
                    text: caption.to_string(),
                    position: Point::new(cx, cy + PANEL_HALF_SIZE + 10.0),
                    size: 9.0,
                    bold: false,
                    typeface: Typeface::Body,
                    align: TextAlign::Center,
                    role: LabelRole::Text,
                },
            ],
        }
    }
}

fn axis_label(text: &str, x: f32, y: f32) -> Label {
    Label {
        text: text.to_string(),
        position: Point::new(x, y),
        size: 12.0,
        bold: false,
        typeface: Typeface::Symbol,
        align: TextAlign::Center,
        role: LabelRole::Text,
    }
}
