use egui::Pos2;
use serde::{Deserialize, Serialize};

/// A captured point with the line width resolved at capture time
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrokePoint {
    pub pos: Pos2,
    pub line_width: f32,
}

impl StrokePoint {
    pub fn new(x: f32, y: f32, line_width: f32) -> Self {
        Self {
            pos: Pos2::new(x, y),
            line_width,
        }
    }

    pub fn midpoint(&self, other: &StrokePoint) -> Pos2 {
        Pos2::new((self.pos.x + other.pos.x) / 2.0, (self.pos.y + other.pos.y) / 2.0)
    }
}

/// The append-only point sequence of a capture session.
///
/// Successive gestures append to the same sequence; only an explicit
/// session reset empties it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Stroke {
    points: Vec<StrokePoint>,
}

impl Stroke {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, point: StrokePoint) {
        self.points.push(point);
    }

    pub fn points(&self) -> &[StrokePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn last(&self) -> Option<&StrokePoint> {
        self.points.last()
    }

    pub(crate) fn clear(&mut self) {
        self.points.clear();
    }
}
