use egui::epaint::{CubicBezierShape, QuadraticBezierShape};
use egui::{Color32, Painter, Pos2, Rect, Shape, Stroke as EguiStroke, Vec2};

use super::{PathCommand, PathStrategy};
use crate::stroke::StrokePoint;

/// A complete, self-contained vector path
#[derive(Debug, Clone, PartialEq)]
pub struct VectorPath {
    pub stroke_color: Color32,
    /// Uniform width for the whole path
    pub stroke_width: f32,
    /// Always starts with a single `MoveTo`
    pub commands: Vec<PathCommand>,
    pub view_box: Rect,
}

impl VectorPath {
    /// SVG path data
    pub fn d(&self) -> String {
        self.commands
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// A standalone SVG document holding this path
    pub fn to_svg(&self) -> String {
        let [r, g, b, _] = self.stroke_color.to_array();
        format!(
            concat!(
                r#"<svg xmlns="http://www.w3.org/2000/svg" class="rendered-svg" "#,
                r#"viewBox="{} {} {} {}" version="1.1" width="100%" height="100%">"#,
                r##"<path fill="none" stroke="#{:02x}{:02x}{:02x}" stroke-width="{}" "##,
                r#"stroke-linecap="round" d="{}"/></svg>"#
            ),
            self.view_box.min.x,
            self.view_box.min.y,
            self.view_box.width(),
            self.view_box.height(),
            r,
            g,
            b,
            self.stroke_width,
            self.d()
        )
    }

    /// Draw the path into `target`, scaled uniformly and centered like an
    /// SVG viewBox with the default aspect ratio handling
    pub fn paint(&self, painter: &Painter, target: Rect) {
        let view = self.view_box;
        if view.width() <= 0.0 || view.height() <= 0.0 {
            return;
        }
        let scale = (target.width() / view.width()).min(target.height() / view.height());
        let offset = target.center() - view.center().to_vec2() * scale;
        let map = |p: Pos2| offset + p.to_vec2() * scale;

        let stroke = EguiStroke::new(self.stroke_width * scale, self.stroke_color);
        let mut pen = Pos2::ZERO;
        for command in &self.commands {
            match *command {
                PathCommand::MoveTo { .. } => {}
                PathCommand::LineTo { to } => {
                    painter.add(Shape::line_segment([map(pen), map(to)], stroke));
                }
                PathCommand::QuadraticTo { control, end } => {
                    painter.add(QuadraticBezierShape::from_points_stroke(
                        [map(pen), map(control), map(end)],
                        false,
                        Color32::TRANSPARENT,
                        stroke,
                    ));
                }
                PathCommand::CubicTo {
                    control1,
                    control2,
                    end,
                } => {
                    painter.add(CubicBezierShape::from_points_stroke(
                        [map(pen), map(control1), map(control2), map(end)],
                        false,
                        Color32::TRANSPARENT,
                        stroke,
                    ));
                }
            }
            pen = command.end();
        }
    }
}

/// Builds vector paths for a capture surface of a fixed size
#[derive(Debug, Clone, Copy)]
pub struct PathBuilder {
    view_box: Rect,
}

impl PathBuilder {
    pub fn new(surface_size: Vec2) -> Self {
        Self {
            view_box: Rect::from_min_size(Pos2::ZERO, surface_size),
        }
    }

    /// Build a path for `points` with the given strategy.
    ///
    /// The first point is the `MoveTo` origin and supplies the path's uniform
    /// width; the rest is handed to the strategy. Returns `None` for an empty
    /// sequence.
    pub fn build(&self, points: &[StrokePoint], strategy: PathStrategy) -> Option<VectorPath> {
        let (first, tail) = points.split_first()?;

        let mut commands = Vec::with_capacity(points.len());
        commands.push(PathCommand::MoveTo { to: first.pos });
        commands.extend(strategy.fit(tail));

        Some(VectorPath {
            stroke_color: strategy.stroke_color(),
            stroke_width: first.line_width,
            commands,
            view_box: self.view_box,
        })
    }
}
