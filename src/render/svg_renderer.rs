use std::f64::consts::FRAC_PI_2;
use std::path::Path;

use plotters::backend::DrawingBackend;
use plotters_backend::{BackendCoord, DrawingErrorKind};
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::{FontDesc, FontFamily, FontStyle, RGBAColor, ShapeStyle, TextStyle};
use plotters_svg::SVGBackend;
use tracing::debug;

use crate::core::curve::PathCommand;
use crate::core::types::Point;
use crate::error::{ChartError, ChartResult};
use crate::render::{
    CirclePrimitive, Color, LinePrimitive, LineStrokeStyle, PathPrimitive, Primitive,
    RectPrimitive, RenderFrame, Renderer, TextHAlign, TextPrimitive,
};

/// Segments used to flatten one cubic curve.
const CUBIC_STEPS: usize = 12;
/// Segments used for one quarter-circle corner.
const CORNER_STEPS: usize = 6;

/// Draws frames through `plotters-svg` into standalone SVG documents.
///
/// The most recent document is kept in memory; `write_to` persists it.
#[derive(Debug, Default)]
pub struct SvgRenderer {
    document: String,
    frames_rendered: usize,
}

impl SvgRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn document(&self) -> &str {
        &self.document
    }

    #[must_use]
    pub fn into_document(self) -> String {
        self.document
    }

    #[must_use]
    pub fn frames_rendered(&self) -> usize {
        self.frames_rendered
    }

    pub fn write_to(&self, path: &Path) -> ChartResult<()> {
        std::fs::write(path, &self.document).map_err(|err| {
            ChartError::Backend(format!("failed to write {}: {err}", path.display()))
        })?;
        debug!(path = %path.display(), bytes = self.document.len(), "wrote svg");
        Ok(())
    }
}

impl Renderer for SvgRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;

        let mut document = String::new();
        {
            let size = (frame.viewport.width, frame.viewport.height);
            let mut backend = SVGBackend::with_string(&mut document, size);
            for primitive in &frame.primitives {
                match primitive {
                    Primitive::Line(line) => draw_line(&mut backend, line),
                    Primitive::Rect(rect) => draw_rect(&mut backend, rect),
                    Primitive::Circle(circle) => draw_circle(&mut backend, circle),
                    Primitive::Path(path) => draw_path(&mut backend, path),
                    Primitive::Text(text) => draw_text(&mut backend, text),
                }
                .map_err(map_backend_error)?;
            }
            backend.present().map_err(map_backend_error)?;
        }

        self.document = document;
        self.frames_rendered += 1;
        Ok(())
    }
}

type DrawResult = Result<(), DrawingErrorKind<std::io::Error>>;

fn map_backend_error(err: DrawingErrorKind<std::io::Error>) -> ChartError {
    ChartError::Backend(format!("svg backend error: {err}"))
}

fn rgba(color: Color) -> RGBAColor {
    let (red, green, blue) = color.to_rgb8();
    RGBAColor(red, green, blue, color.alpha)
}

fn stroke(color: Color, width: f64) -> ShapeStyle {
    ShapeStyle {
        color: rgba(color),
        filled: false,
        stroke_width: width.round().max(1.0) as u32,
    }
}

fn fill(color: Color) -> ShapeStyle {
    ShapeStyle {
        color: rgba(color),
        filled: true,
        stroke_width: 0,
    }
}

fn coord(x: f64, y: f64) -> BackendCoord {
    (x.round() as i32, y.round() as i32)
}

fn draw_line(backend: &mut SVGBackend<'_>, line: &LinePrimitive) -> DrawResult {
    let style = stroke(line.color, line.stroke_width);
    let from = Point::new(line.x1, line.y1);
    let to = Point::new(line.x2, line.y2);
    match line.stroke_style {
        LineStrokeStyle::Solid => {
            backend.draw_line(coord(from.x, from.y), coord(to.x, to.y), &style)
        }
        LineStrokeStyle::Dashed { dash, gap } => {
            for (start, end) in dash_segments(from, to, dash, gap) {
                backend.draw_line(coord(start.x, start.y), coord(end.x, end.y), &style)?;
            }
            Ok(())
        }
    }
}

fn draw_rect(backend: &mut SVGBackend<'_>, rect: &RectPrimitive) -> DrawResult {
    let radius = rect.corner_radius.min(rect.width / 2.0).min(rect.height / 2.0);
    if radius > 0.0 {
        let outline: Vec<BackendCoord> =
            rounded_rect_outline(rect.x, rect.y, rect.width, rect.height, radius)
                .into_iter()
                .map(|point| coord(point.x, point.y))
                .collect();
        if rect.fill_color.alpha > 0.0 {
            backend.fill_polygon(outline.iter().copied(), &fill(rect.fill_color))?;
        }
        if rect.border_width > 0.0 {
            let closed = outline.iter().chain(outline.first()).copied();
            backend.draw_path(closed, &stroke(rect.border_color, rect.border_width))?;
        }
        return Ok(());
    }

    let upper_left = coord(rect.x, rect.y);
    let bottom_right = coord(rect.x + rect.width, rect.y + rect.height);
    if rect.fill_color.alpha > 0.0 {
        backend.draw_rect(upper_left, bottom_right, &fill(rect.fill_color), true)?;
    }
    if rect.border_width > 0.0 {
        backend.draw_rect(
            upper_left,
            bottom_right,
            &stroke(rect.border_color, rect.border_width),
            false,
        )?;
    }
    Ok(())
}

fn draw_circle(backend: &mut SVGBackend<'_>, circle: &CirclePrimitive) -> DrawResult {
    let center = coord(circle.cx, circle.cy);
    let radius = circle.radius.round() as u32;
    if circle.fill_color.alpha > 0.0 {
        backend.draw_circle(center, radius, &fill(circle.fill_color), true)?;
    }
    if circle.stroke_width > 0.0 {
        backend.draw_circle(
            center,
            radius,
            &stroke(circle.stroke_color, circle.stroke_width),
            false,
        )?;
    }
    Ok(())
}

fn draw_path(backend: &mut SVGBackend<'_>, path: &PathPrimitive) -> DrawResult {
    let points: Vec<BackendCoord> = flatten_path(&path.commands)
        .into_iter()
        .map(|point| coord(point.x, point.y))
        .collect();
    backend.draw_path(points, &stroke(path.stroke_color, path.stroke_width))
}

fn draw_text(backend: &mut SVGBackend<'_>, text: &TextPrimitive) -> DrawResult {
    let h_pos = match text.h_align {
        TextHAlign::Left => HPos::Left,
        TextHAlign::Center => HPos::Center,
        TextHAlign::Right => HPos::Right,
    };
    let weight = if text.bold {
        FontStyle::Bold
    } else {
        FontStyle::Normal
    };
    let color = rgba(text.color);
    let font = FontDesc::new(FontFamily::SansSerif, text.font_size_px, weight);
    let style = TextStyle::from(font)
        .color(&color)
        .pos(Pos::new(h_pos, VPos::Bottom));
    backend.draw_text(&text.text, &style, coord(text.x, text.y))
}

/// Dash runs along `from -> to`; the last run is clipped at the end point.
fn dash_segments(from: Point, to: Point, dash: f64, gap: f64) -> Vec<(Point, Point)> {
    let (dx, dy) = (to.x - from.x, to.y - from.y);
    let length = dx.hypot(dy);
    if length == 0.0 || dash <= 0.0 {
        return vec![(from, to)];
    }

    let at = |distance: f64| {
        let t = distance / length;
        Point::new(from.x + dx * t, from.y + dy * t)
    };
    let period = dash + gap.max(0.0);
    let mut segments = Vec::with_capacity((length / period).ceil() as usize);
    let mut start = 0.0;
    while start < length {
        segments.push((at(start), at((start + dash).min(length))));
        start += period;
    }
    segments
}

/// Polygon outline of a rounded rect, clockwise from the top-right corner.
fn rounded_rect_outline(x: f64, y: f64, width: f64, height: f64, radius: f64) -> Vec<Point> {
    let corners = [
        (Point::new(x + width - radius, y + radius), -FRAC_PI_2),
        (Point::new(x + width - radius, y + height - radius), 0.0),
        (Point::new(x + radius, y + height - radius), FRAC_PI_2),
        (Point::new(x + radius, y + radius), 2.0 * FRAC_PI_2),
    ];
    let mut outline = Vec::with_capacity(corners.len() * (CORNER_STEPS + 1));
    for (center, start_angle) in corners {
        for step in 0..=CORNER_STEPS {
            let angle = start_angle + FRAC_PI_2 * step as f64 / CORNER_STEPS as f64;
            outline.push(Point::new(
                center.x + radius * angle.cos(),
                center.y + radius * angle.sin(),
            ));
        }
    }
    outline
}

/// Polyline through every command, with cubic curves sampled evenly.
fn flatten_path(commands: &[PathCommand]) -> Vec<Point> {
    let mut points = Vec::with_capacity(commands.len() * CUBIC_STEPS);
    let mut current = Point::new(0.0, 0.0);
    for command in commands {
        match *command {
            PathCommand::MoveTo(point) | PathCommand::LineTo(point) => points.push(point),
            PathCommand::CubicTo {
                control1,
                control2,
                to,
            } => {
                for step in 1..=CUBIC_STEPS {
                    let t = step as f64 / CUBIC_STEPS as f64;
                    points.push(cubic_point(current, control1, control2, to, t));
                }
            }
        }
        current = command.end_point();
    }
    points
}

fn cubic_point(p0: Point, p1: Point, p2: Point, p3: Point, t: f64) -> Point {
    let u = 1.0 - t;
    let (a, b, c, d) = (u * u * u, 3.0 * u * u * t, 3.0 * u * t * t, t * t * t);
    Point::new(
        a * p0.x + b * p1.x + c * p2.x + d * p3.x,
        a * p0.y + b * p1.y + c * p2.y + d * p3.y,
    )
}
