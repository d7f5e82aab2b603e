use crate::config::{Config, RenderConfig};
use crate::scene;
use crate::surface::{Paint, Path, PathSegment, Rect, Stroke, Surface, TextAlign, TextRun};
use anyhow::Result;
use std::f32::consts::{PI, TAU};
use std::fmt::Write as _;
use std::path::Path as FsPath;

/// Composes the bridge scene into a standalone SVG document.
pub fn render_svg(config: &Config) -> String {
    let mut surface = SvgSurface::new(
        config.bridge.width,
        config.bridge.height,
        &config.theme.background,
    );
    scene::compose(&mut surface, config);
    surface.finish()
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Transform {
    a: f32,
    b: f32,
    c: f32,
    d: f32,
    e: f32,
    f: f32,
}

impl Transform {
    const IDENTITY: Transform = Transform {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        e: 0.0,
        f: 0.0,
    };

    fn translate(&mut self, dx: f32, dy: f32) {
        self.e += self.a * dx + self.c * dy;
        self.f += self.b * dx + self.d * dy;
    }

    fn rotate(&mut self, angle: f32) {
        let (sin, cos) = angle.sin_cos();
        let Transform { a, b, c, d, .. } = *self;
        self.a = a * cos + c * sin;
        self.b = b * cos + d * sin;
        self.c = c * cos - a * sin;
        self.d = d * cos - b * sin;
    }
}

/// [`Surface`] that serialises every call as an SVG element.
pub struct SvgSurface {
    width: f32,
    height: f32,
    clear_color: String,
    defs: String,
    body: String,
    gradients: usize,
    transform: Transform,
    saved: Vec<Transform>,
}

impl SvgSurface {
    pub fn new(width: f32, height: f32, clear_color: &str) -> Self {
        Self {
            width,
            height,
            clear_color: clear_color.to_string(),
            defs: String::new(),
            body: String::new(),
            gradients: 0,
            transform: Transform::IDENTITY,
            saved: Vec::new(),
        }
    }

    pub fn finish(self) -> String {
        let (width, height) = (self.width, self.height);
        let mut svg = String::with_capacity(self.defs.len() + self.body.len() + 256);
        svg.push_str(&format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">",
        ));
        if !self.defs.is_empty() {
            svg.push_str("<defs>");
            svg.push_str(&self.defs);
            svg.push_str("</defs>");
        }
        svg.push_str(&self.body);
        svg.push_str("</svg>");
        svg
    }

    fn covers_surface(&self, region: Rect) -> bool {
        region.x <= 0.0
            && region.y <= 0.0
            && region.x + region.width >= self.width
            && region.y + region.height >= self.height
    }

    fn transform_attr(&self) -> String {
        if self.transform == Transform::IDENTITY {
            return String::new();
        }
        let Transform { a, b, c, d, e, f } = self.transform;
        format!(" transform=\"matrix({a:.4} {b:.4} {c:.4} {d:.4} {e:.2} {f:.2})\"")
    }

    /// Resolves a paint to an SVG paint value, registering gradients in `<defs>`.
    fn paint_value(&mut self, paint: &Paint) -> String {
        match paint {
            Paint::Solid(color) => escape_xml(color),
            Paint::LinearGradient { from, to, stops } => {
                let id = self.next_gradient_id();
                let _ = write!(
                    self.defs,
                    "<linearGradient id=\"{id}\" gradientUnits=\"userSpaceOnUse\" x1=\"{:.2}\" y1=\"{:.2}\" x2=\"{:.2}\" y2=\"{:.2}\">",
                    from.x, from.y, to.x, to.y
                );
                self.push_stops(stops);
                self.defs.push_str("</linearGradient>");
                format!("url(#{id})")
            }
            Paint::RadialGradient {
                center,
                inner_radius,
                outer_radius,
                stops,
            } => {
                let id = self.next_gradient_id();
                let _ = write!(
                    self.defs,
                    "<radialGradient id=\"{id}\" gradientUnits=\"userSpaceOnUse\" cx=\"{:.2}\" cy=\"{:.2}\" r=\"{:.2}\" fx=\"{:.2}\" fy=\"{:.2}\" fr=\"{:.2}\">",
                    center.x, center.y, outer_radius, center.x, center.y, inner_radius
                );
                self.push_stops(stops);
                self.defs.push_str("</radialGradient>");
                format!("url(#{id})")
            }
        }
    }

    fn next_gradient_id(&mut self) -> String {
        self.gradients += 1;
        format!("gradient-{}", self.gradients)
    }

    fn push_stops(&mut self, stops: &[crate::surface::GradientStop]) {
        for stop in stops {
            let _ = write!(
                self.defs,
                "<stop offset=\"{:.3}\" stop-color=\"{}\"/>",
                stop.offset,
                escape_xml(&stop.color)
            );
        }
    }
}

fn stroke_attrs(stroke: &Stroke) -> String {
    let mut attrs = format!(
        " stroke=\"{}\" stroke-width=\"{}\"",
        escape_xml(&stroke.color),
        stroke.width
    );
    if let Some(dash) = stroke.dash.as_ref().filter(|dash| !dash.is_empty()) {
        let pattern: Vec<String> = dash.iter().map(|v| v.to_string()).collect();
        let _ = write!(attrs, " stroke-dasharray=\"{}\"", pattern.join(" "));
    }
    attrs
}

fn path_data(path: &Path) -> String {
    let mut d = String::new();
    let mut has_current = false;
    for segment in &path.segments {
        if !d.is_empty() {
            d.push(' ');
        }
        match *segment {
            PathSegment::MoveTo(p) => {
                let _ = write!(d, "M {:.2} {:.2}", p.x, p.y);
                has_current = true;
            }
            PathSegment::LineTo(p) => {
                let cmd = if has_current { 'L' } else { 'M' };
                let _ = write!(d, "{cmd} {:.2} {:.2}", p.x, p.y);
                has_current = true;
            }
            PathSegment::Arc {
                center,
                radius,
                start_angle,
                end_angle,
            } => {
                let start = (
                    center.x + radius * start_angle.cos(),
                    center.y + radius * start_angle.sin(),
                );
                let lead = if has_current { 'L' } else { 'M' };
                let _ = write!(d, "{lead} {:.2} {:.2}", start.0, start.1);
                let sweep = end_angle - start_angle;
                let sweep_flag = u8::from(sweep > 0.0);
                if sweep.abs() >= TAU - 1e-4 {
                    // A single SVG arc cannot close on itself; split into halves.
                    let opposite = (2.0 * center.x - start.0, 2.0 * center.y - start.1);
                    let _ = write!(
                        d,
                        " A {radius:.2} {radius:.2} 0 1 {sweep_flag} {:.2} {:.2} A {radius:.2} {radius:.2} 0 1 {sweep_flag} {:.2} {:.2}",
                        opposite.0, opposite.1, start.0, start.1
                    );
                } else {
                    let end = (
                        center.x + radius * end_angle.cos(),
                        center.y + radius * end_angle.sin(),
                    );
                    let large_arc = u8::from(sweep.abs() > PI);
                    let _ = write!(
                        d,
                        " A {radius:.2} {radius:.2} 0 {large_arc} {sweep_flag} {:.2} {:.2}",
                        end.0, end.1
                    );
                }
                has_current = true;
            }
            PathSegment::Close => {
                d.push('Z');
                has_current = false;
            }
        }
    }
    d
}

impl Surface for SvgSurface {
    fn clear(&mut self, region: Rect) {
        if self.covers_surface(region) {
            self.defs.clear();
            self.body.clear();
            self.gradients = 0;
            return;
        }
        let fill = escape_xml(&self.clear_color);
        let _ = write!(
            self.body,
            "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" fill=\"{fill}\"/>",
            region.x, region.y, region.width, region.height
        );
    }

    fn fill_rect(&mut self, rect: Rect, paint: &Paint) {
        let fill = self.paint_value(paint);
        let transform = self.transform_attr();
        let _ = write!(
            self.body,
            "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" fill=\"{fill}\"{transform}/>",
            rect.x, rect.y, rect.width, rect.height
        );
    }

    fn stroke_rect(&mut self, rect: Rect, stroke: &Stroke) {
        let transform = self.transform_attr();
        let _ = write!(
            self.body,
            "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" fill=\"none\"{}{transform}/>",
            rect.x,
            rect.y,
            rect.width,
            rect.height,
            stroke_attrs(stroke)
        );
    }

    fn fill_path(&mut self, path: &Path, paint: &Paint) {
        if path.is_empty() {
            return;
        }
        let fill = self.paint_value(paint);
        let transform = self.transform_attr();
        let _ = write!(
            self.body,
            "<path d=\"{}\" fill=\"{fill}\"{transform}/>",
            path_data(path)
        );
    }

    fn stroke_path(&mut self, path: &Path, stroke: &Stroke) {
        if path.is_empty() {
            return;
        }
        let transform = self.transform_attr();
        let _ = write!(
            self.body,
            "<path d=\"{}\" fill=\"none\"{}{transform}/>",
            path_data(path),
            stroke_attrs(stroke)
        );
    }

    fn fill_and_stroke_path(&mut self, path: &Path, paint: &Paint, stroke: &Stroke) {
        if path.is_empty() {
            return;
        }
        let fill = self.paint_value(paint);
        let transform = self.transform_attr();
        let _ = write!(
            self.body,
            "<path d=\"{}\" fill=\"{fill}\"{}{transform}/>",
            path_data(path),
            stroke_attrs(stroke)
        );
    }

    fn fill_text(&mut self, text: &TextRun) {
        let anchor = match text.align {
            TextAlign::Left => "start",
            TextAlign::Center => "middle",
            TextAlign::Right => "end",
        };
        let weight = if text.font.bold { " font-weight=\"bold\"" } else { "" };
        let style = if text.font.italic { " font-style=\"italic\"" } else { "" };
        let transform = self.transform_attr();
        let _ = write!(
            self.body,
            "<text x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"{anchor}\" font-family=\"{}\" font-size=\"{}\"{weight}{style} fill=\"{}\"{transform}>{}</text>",
            text.position.x,
            text.position.y,
            escape_xml(&text.font.family),
            text.font.size,
            escape_xml(&text.color),
            escape_xml(&text.text)
        );
    }

    fn save(&mut self) {
        self.saved.push(self.transform);
    }

    fn restore(&mut self) {
        if let Some(transform) = self.saved.pop() {
            self.transform = transform;
        }
    }

    fn translate(&mut self, dx: f32, dy: f32) {
        self.transform.translate(dx, dy);
    }

    fn rotate(&mut self, angle: f32) {
        self.transform.rotate(angle);
    }
}

pub fn write_output_svg(svg: &str, output: Option<&FsPath>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, svg)?;
        }
        None => {
            print!("{}", svg);
        }
    }
    Ok(())
}

#[cfg(feature = "png")]
pub fn write_output_png(
    svg: &str,
    output: &FsPath,
    render_cfg: &RenderConfig,
    font_family: &str,
) -> Result<()> {
    let mut opt = usvg::Options::default();
    opt.font_family = font_family
        .split(',')
        .map(|name| name.trim().trim_matches('"'))
        .find(|name| !name.is_empty())
        .unwrap_or("sans-serif")
        .to_string();
    opt.fontdb_mut().load_system_fonts();
    opt.default_size = usvg::Size::from_wh(render_cfg.width, render_cfg.height)
        .ok_or_else(|| {
            anyhow::anyhow!(
                "invalid render size {}x{}",
                render_cfg.width,
                render_cfg.height
            )
        })?;

    let tree = usvg::Tree::from_str(svg, &opt)?;
    let size = tree.size().to_int_size();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| anyhow::anyhow!("Failed to allocate pixmap"))?;

    let mut pixmap_mut = pixmap.as_mut();
    resvg::render(&tree, resvg::tiny_skia::Transform::default(), &mut pixmap_mut);
    pixmap.save_png(output)?;
    tracing::debug!(
        path = %output.display(),
        width = size.width(),
        height = size.height(),
        "wrote png"
    );
    Ok(())
}

#[cfg(not(feature = "png"))]
pub fn write_output_png(
    _svg: &str,
    _output: &FsPath,
    _render_cfg: &RenderConfig,
    _font_family: &str,
) -> Result<()> {
    Err(anyhow::anyhow!(
        "PNG output requires building with the `png` feature"
    ))
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
