use log::info;

use crate::path::{PathBuilder, PathStrategy, VectorPath};
use crate::stroke::StrokePoint;

/// Receives finished vector paths for display next to each other
pub trait DocumentSink {
    fn present(&mut self, label: &'static str, path: VectorPath);
}

/// A labeled path collected by the in-memory sink
#[derive(Debug, Clone, PartialEq)]
pub struct ExportedPath {
    pub label: &'static str,
    pub path: VectorPath,
}

impl DocumentSink for Vec<ExportedPath> {
    fn present(&mut self, label: &'static str, path: VectorPath) {
        self.push(ExportedPath { label, path });
    }
}

/// Renders the same stroke with every fitting strategy for comparison
#[derive(Debug, Clone, Copy)]
pub struct ExportRenderer {
    builder: PathBuilder,
}

impl ExportRenderer {
    pub fn new(builder: PathBuilder) -> Self {
        Self { builder }
    }

    /// Hand one path per strategy to the sink. Returns how many were presented.
    pub fn render_all(&self, points: &[StrokePoint], sink: &mut dyn DocumentSink) -> usize {
        if points.is_empty() {
            return 0;
        }
        let mut presented = 0;
        for strategy in PathStrategy::ALL {
            if let Some(path) = self.builder.build(points, strategy) {
                sink.present(strategy.name(), path);
                presented += 1;
            }
        }
        info!("Exported {} points as {} paths", points.len(), presented);
        presented
    }
}
