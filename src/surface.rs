use egui::epaint::QuadraticBezierShape;
use egui::{Color32, Painter, Pos2, Rect, Stroke as EguiStroke, Vec2};

/// The raster surface live feedback is drawn on.
///
/// Implementors only composite; every coordinate and width has already been
/// decided by the caller.
pub trait RasterSurface {
    /// Current pen position
    fn pen(&self) -> Pos2;

    /// Lift the pen and put it down at `to`
    fn move_pen(&mut self, to: Pos2);

    /// Stroke a quadratic curve from the pen to `end`. The pen ends up at `end`.
    fn quadratic_to(&mut self, control: Pos2, end: Pos2, width: f32);

    /// Fill a square marker centered on `center`
    fn point_marker(&mut self, center: Pos2, size: f32, color: Color32);
}

/// A single retained draw call
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawInstruction {
    MovePen {
        to: Pos2,
    },
    QuadraticSegment {
        from: Pos2,
        control: Pos2,
        end: Pos2,
        width: f32,
    },
    PointMarker {
        rect: Rect,
        color: Color32,
    },
}

/// A retained raster surface.
///
/// egui redraws every frame, so the live ink is kept as a list of draw
/// instructions and replayed onto the painter each frame.
#[derive(Debug, Clone)]
pub struct LiveCanvas {
    instructions: Vec<DrawInstruction>,
    pen: Pos2,
    ink: Color32,
}

impl Default for LiveCanvas {
    fn default() -> Self {
        Self::new(Color32::BLACK)
    }
}

impl LiveCanvas {
    pub fn new(ink: Color32) -> Self {
        Self {
            instructions: Vec::new(),
            pen: Pos2::ZERO,
            ink,
        }
    }

    pub fn instructions(&self) -> &[DrawInstruction] {
        &self.instructions
    }

    pub fn segments(&self) -> impl Iterator<Item = &DrawInstruction> {
        self.instructions
            .iter()
            .filter(|i| matches!(i, DrawInstruction::QuadraticSegment { .. }))
    }

    pub fn markers(&self) -> impl Iterator<Item = &DrawInstruction> {
        self.instructions
            .iter()
            .filter(|i| matches!(i, DrawInstruction::PointMarker { .. }))
    }

    pub fn clear(&mut self) {
        self.instructions.clear();
        self.pen = Pos2::ZERO;
    }

    /// Replay the instructions with surface coordinates offset by `origin`
    pub fn paint(&self, painter: &Painter, origin: Pos2) {
        let offset = origin.to_vec2();
        for instruction in &self.instructions {
            match *instruction {
                DrawInstruction::MovePen { .. } => {}
                DrawInstruction::QuadraticSegment {
                    from,
                    control,
                    end,
                    width,
                } => {
                    let shape = QuadraticBezierShape::from_points_stroke(
                        [from + offset, control + offset, end + offset],
                        false,
                        Color32::TRANSPARENT,
                        EguiStroke::new(width, self.ink),
                    );
                    painter.add(shape);
                    // Round caps and joins
                    painter.circle_filled(from + offset, width / 2.0, self.ink);
                    painter.circle_filled(end + offset, width / 2.0, self.ink);
                }
                DrawInstruction::PointMarker { rect, color } => {
                    painter.rect_filled(rect.translate(offset), 0.0, color);
                }
            }
        }
    }
}

impl RasterSurface for LiveCanvas {
    fn pen(&self) -> Pos2 {
        self.pen
    }

    fn move_pen(&mut self, to: Pos2) {
        self.pen = to;
        self.instructions.push(DrawInstruction::MovePen { to });
    }

    fn quadratic_to(&mut self, control: Pos2, end: Pos2, width: f32) {
        self.instructions.push(DrawInstruction::QuadraticSegment {
            from: self.pen,
            control,
            end,
            width,
        });
        self.pen = end;
    }

    fn point_marker(&mut self, center: Pos2, size: f32, color: Color32) {
        let rect = Rect::from_center_size(center, Vec2::splat(size));
        self.instructions
            .push(DrawInstruction::PointMarker { rect, color });
    }
}
