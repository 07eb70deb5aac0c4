use egui::Color32;
use log::info;

use crate::stroke::StrokePoint;
use crate::surface::RasterSurface;

/// Debug overlay marking every recorded point.
///
/// Revealing is one-way: once shown, further reveals do nothing until the
/// session is reset.
#[derive(Debug, Clone)]
pub struct PointsOverlay {
    shown: bool,
    marker_size: f32,
    color: Color32,
}

impl Default for PointsOverlay {
    fn default() -> Self {
        Self::new(20.0, Color32::RED)
    }
}

impl PointsOverlay {
    pub fn new(marker_size: f32, color: Color32) -> Self {
        Self {
            shown: false,
            marker_size,
            color,
        }
    }

    pub fn is_shown(&self) -> bool {
        self.shown
    }

    /// Draw a marker on every point, once. Returns whether anything was drawn.
    pub fn reveal(&mut self, points: &[StrokePoint], surface: &mut dyn RasterSurface) -> bool {
        if self.shown {
            return false;
        }
        info!("Revealing {} point markers", points.len());
        for point in points {
            surface.point_marker(point.pos, self.marker_size, self.color);
        }
        self.shown = true;
        true
    }

    pub(crate) fn reset(&mut self) {
        self.shown = false;
    }
}
