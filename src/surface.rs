//! Drawing-surface contract consumed by the scene composer.
//!
//! Every call carries its own style. Surfaces keep no current fill, stroke or
//! line width between calls; the only state they hold is the save/restore
//! transform stack used to orient arrowheads.

use crate::geometry::Point;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn centered(center: Point, half_width: f32, half_height: f32) -> Self {
        Self::new(
            center.x - half_width,
            center.y - half_height,
            half_width * 2.0,
            half_height * 2.0,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradientStop {
    pub offset: f32,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Paint {
    Solid(String),
    LinearGradient {
        from: Point,
        to: Point,
        stops: Vec<GradientStop>,
    },
    /// Two-circle radial gradient; both circles share a centre in this crate.
    RadialGradient {
        center: Point,
        inner_radius: f32,
        outer_radius: f32,
        stops: Vec<GradientStop>,
    },
}

impl Paint {
    pub fn solid(color: &str) -> Self {
        Paint::Solid(color.to_string())
    }

    /// Radial fade from `inner` at the centre to `outer` at `radius`.
    pub fn radial_fade(center: Point, radius: f32, inner: &str, outer: &str) -> Self {
        Paint::RadialGradient {
            center,
            inner_radius: 0.0,
            outer_radius: radius,
            stops: vec![
                GradientStop {
                    offset: 0.0,
                    color: inner.to_string(),
                },
                GradientStop {
                    offset: 1.0,
                    color: outer.to_string(),
                },
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stroke {
    pub color: String,
    pub width: f32,
    pub dash: Option<Vec<f32>>,
}

impl Stroke {
    pub fn new(color: &str, width: f32) -> Self {
        Self {
            color: color.to_string(),
            width,
            dash: None,
        }
    }

    pub fn dashed(mut self, pattern: &[f32]) -> Self {
        self.dash = Some(pattern.to_vec());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum PathSegment {
    MoveTo(Point),
    LineTo(Point),
    /// Circular arc around `center`, angles in radians, clockwise in screen space.
    Arc {
        center: Point,
        radius: f32,
        start_angle: f32,
        end_angle: f32,
    },
    Close,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Path {
    pub segments: Vec<PathSegment>,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_to(mut self, x: f32, y: f32) -> Self {
        self.segments.push(PathSegment::MoveTo(Point::new(x, y)));
        self
    }

    pub fn line_to(mut self, x: f32, y: f32) -> Self {
        self.segments.push(PathSegment::LineTo(Point::new(x, y)));
        self
    }

    pub fn arc(mut self, center: Point, radius: f32, start_angle: f32, end_angle: f32) -> Self {
        self.segments.push(PathSegment::Arc {
            center,
            radius,
            start_angle,
            end_angle,
        });
        self
    }

    pub fn close(mut self) -> Self {
        self.segments.push(PathSegment::Close);
        self
    }

    pub fn line(from: Point, to: Point) -> Self {
        Self::new().move_to(from.x, from.y).line_to(to.x, to.y)
    }

    pub fn circle(center: Point, radius: f32) -> Self {
        Self::new().arc(center, radius, 0.0, std::f32::consts::TAU)
    }

    /// Open polyline through `points`.
    pub fn polyline(points: &[Point]) -> Self {
        let mut path = Self::new();
        let mut iter = points.iter();
        if let Some(first) = iter.next() {
            path = path.move_to(first.x, first.y);
        }
        for p in iter {
            path = path.line_to(p.x, p.y);
        }
        path
    }

    pub fn polygon(points: &[Point]) -> Self {
        Self::polyline(points).close()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Font {
    pub family: String,
    pub size: f32,
    pub bold: bool,
    pub italic: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextRun {
    pub text: String,
    pub position: Point,
    pub font: Font,
    pub align: TextAlign,
    pub color: String,
}

pub trait Surface {
    fn clear(&mut self, region: Rect);
    fn fill_rect(&mut self, rect: Rect, paint: &Paint);
    fn stroke_rect(&mut self, rect: Rect, stroke: &Stroke);
    fn fill_path(&mut self, path: &Path, paint: &Paint);
    fn stroke_path(&mut self, path: &Path, stroke: &Stroke);
    /// Fill, then stroke the same closed outline.
    fn fill_and_stroke_path(&mut self, path: &Path, paint: &Paint, stroke: &Stroke);
    fn fill_text(&mut self, text: &TextRun);
    fn save(&mut self);
    fn restore(&mut self);
    fn translate(&mut self, dx: f32, dy: f32);
    /// Rotation in radians, clockwise in screen space.
    fn rotate(&mut self, angle: f32);
}

/// One recorded surface call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum DrawCommand {
    Clear(Rect),
    FillRect(Rect, Paint),
    StrokeRect(Rect, Stroke),
    FillPath(Path, Paint),
    StrokePath(Path, Stroke),
    FillAndStrokePath(Path, Paint, Stroke),
    FillText(TextRun),
    Save,
    Restore,
    Translate(f32, f32),
    Rotate(f32),
}

/// Surface that keeps every call in order instead of drawing it.
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    pub commands: Vec<DrawCommand>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn texts(&self) -> impl Iterator<Item = &TextRun> {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCommand::FillText(run) => Some(run),
            _ => None,
        })
    }
}

impl Surface for Recorder {
    fn clear(&mut self, region: Rect) {
        self.commands.push(DrawCommand::Clear(region));
    }

    fn fill_rect(&mut self, rect: Rect, paint: &Paint) {
        self.commands.push(DrawCommand::FillRect(rect, paint.clone()));
    }

    fn stroke_rect(&mut self, rect: Rect, stroke: &Stroke) {
        self.commands
            .push(DrawCommand::StrokeRect(rect, stroke.clone()));
    }

    fn fill_path(&mut self, path: &Path, paint: &Paint) {
        self.commands
            .push(DrawCommand::FillPath(path.clone(), paint.clone()));
    }

    fn stroke_path(&mut self, path: &Path, stroke: &Stroke) {
        self.commands
            .push(DrawCommand::StrokePath(path.clone(), stroke.clone()));
    }

    fn fill_and_stroke_path(&mut self, path: &Path, paint: &Paint, stroke: &Stroke) {
        self.commands.push(DrawCommand::FillAndStrokePath(
            path.clone(),
            paint.clone(),
            stroke.clone(),
        ));
    }

    fn fill_text(&mut self, text: &TextRun) {
        self.commands.push(DrawCommand::FillText(text.clone()));
    }

    fn save(&mut self) {
        self.commands.push(DrawCommand::Save);
    }

    fn restore(&mut self) {
        self.commands.push(DrawCommand::Restore);
    }

    fn translate(&mut self, dx: f32, dy: f32) {
        self.commands.push(DrawCommand::Translate(dx, dy));
    }

    fn rotate(&mut self, angle: f32) {
        self.commands.push(DrawCommand::Rotate(angle));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn polygon_closes_path() {
        let path = Path::polygon(&[
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(5.0, 5.0),
        ]);
        assert_eq!(path.segments.len(), 4);
        assert_eq!(path.segments[0], PathSegment::MoveTo(Point::new(0.0, 0.0)));
        assert_eq!(path.segments[3], PathSegment::Close);
    }

    #[test]
    fn empty_polyline_is_empty() {
        assert!(Path::polyline(&[]).is_empty());
    }

    #[test]
    fn recorder_keeps_call_order() {
        let mut rec = Recorder::new();
        rec.save();
        rec.translate(1.0, 2.0);
        rec.fill_rect(Rect::new(0.0, 0.0, 1.0, 1.0), &Paint::solid("#000"));
        rec.restore();
        assert_eq!(rec.commands.len(), 4);
        assert_eq!(rec.commands[0], DrawCommand::Save);
        assert_eq!(rec.commands[3], DrawCommand::Restore);
    }

    #[test]
    fn centered_rect_spans_both_halves() {
        let rect = Rect::centered(Point::new(50.0, 40.0), 10.0, 5.0);
        assert_eq!(rect, Rect::new(40.0, 35.0, 20.0, 10.0));
    }
}
