//! Incremental curve segments for live feedback.
//!
//! Each appended point turns into exactly one quadratic segment that ends on
//! the midpoint between the two newest points and uses the previous point as
//! its control. This is the same construction as
//! [`PathStrategy::QuadraticMidpoint`](crate::path::PathStrategy), evaluated
//! one sample at a time so history never has to be redrawn.

use egui::Pos2;
use log::trace;

use crate::stroke::StrokePoint;
use crate::surface::RasterSurface;

/// Points needed before the first live segment can be drawn
pub const MIN_LIVE_POINTS: usize = 3;

#[derive(Debug, Clone, Copy, Default)]
pub struct IncrementalRenderer {
    /// Width the surface is currently stroking with
    stroke_width: f32,
}

impl IncrementalRenderer {
    pub fn stroke_width(&self) -> f32 {
        self.stroke_width
    }

    /// Put the pen down where a gesture starts
    pub fn begin(&mut self, surface: &mut dyn RasterSurface, pos: Pos2, width: f32) {
        self.stroke_width = width;
        surface.move_pen(pos);
    }

    /// Draw the segment for the most recently appended point
    pub fn extend(&mut self, points: &[StrokePoint], surface: &mut dyn RasterSurface) {
        if points.len() < MIN_LIVE_POINTS {
            return;
        }
        let last = points.len() - 1;
        let control = &points[last - 1];
        let mid = points[last].midpoint(control);

        trace!("live segment to {:?} (width {:.3})", mid, control.line_width);
        self.stroke_width = control.line_width;
        surface.quadratic_to(control.pos, mid, control.line_width);
        surface.move_pen(mid);
    }

    /// Close the gesture exactly at the release position
    ///
    /// A gesture without drawn segments closes with the width it started with.
    pub fn finish(&self, points: &[StrokePoint], release: Pos2, surface: &mut dyn RasterSurface) {
        if points.len() < MIN_LIVE_POINTS {
            return;
        }
        let last = &points[points.len() - 1];
        trace!("closing live segment at {:?} (width {:.3})", release, self.stroke_width);
        surface.quadratic_to(last.pos, release, self.stroke_width);
    }
}
