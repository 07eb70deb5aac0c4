use std::sync::Arc;

use log::info;
use parking_lot::{RwLock, RwLockWriteGuard};
use uuid::Uuid;

use crate::config::CaptureConfig;
use crate::diagnostics::DiagnosticsSender;
use crate::export::{DocumentSink, ExportRenderer};
use crate::input::{InputEvent, InputSource, Sample};
use crate::overlay::PointsOverlay;
use crate::path::PathBuilder;
use crate::recorder::StrokeRecorder;
use crate::stroke::StrokePoint;
use crate::surface::RasterSurface;

/// One capture session: the recorded points plus the overlay state.
///
/// Callers own the session and hand it to their input handling; nothing here
/// is global.
#[derive(Debug)]
pub struct CaptureSession {
    id: Uuid,
    recorder: StrokeRecorder,
    overlay: PointsOverlay,
}

impl Default for CaptureSession {
    fn default() -> Self {
        Self::new(&CaptureConfig::default())
    }
}

impl CaptureSession {
    pub fn new(config: &CaptureConfig) -> Self {
        Self {
            id: Uuid::new_v4(),
            recorder: StrokeRecorder::new(config.pressure),
            overlay: PointsOverlay::new(config.marker_size, config.marker_color),
        }
    }

    pub fn with_diagnostics(mut self, sender: DiagnosticsSender) -> Self {
        self.recorder = self.recorder.with_diagnostics(sender);
        self
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn points(&self) -> &[StrokePoint] {
        self.recorder.points()
    }

    pub fn recorder(&self) -> &StrokeRecorder {
        &self.recorder
    }

    pub fn is_recording(&self) -> bool {
        self.recorder.is_recording()
    }

    pub fn overlay_shown(&self) -> bool {
        self.overlay.is_shown()
    }

    pub fn record_start(&mut self, sample: &Sample, surface: &mut dyn RasterSurface) {
        self.recorder.record_start(sample, surface);
    }

    pub fn record_move(&mut self, sample: &Sample, surface: &mut dyn RasterSurface) {
        self.recorder.record_move(sample, surface);
    }

    pub fn record_end(&mut self, sample: &Sample, surface: &mut dyn RasterSurface) {
        self.recorder.record_end(sample, surface);
    }

    pub fn handle(&mut self, event: &InputEvent, surface: &mut dyn RasterSurface) {
        match event {
            InputEvent::Start(sample) => self.record_start(sample, surface),
            InputEvent::Move(sample) => self.record_move(sample, surface),
            InputEvent::End(sample) => self.record_end(sample, surface),
        }
    }

    /// Drain an input source. Returns the number of events handled.
    pub fn pump(&mut self, source: &mut dyn InputSource, surface: &mut dyn RasterSurface) -> usize {
        let mut handled = 0;
        while let Some(event) = source.poll() {
            self.handle(&event, surface);
            handled += 1;
        }
        handled
    }

    pub fn reveal_points(&mut self, surface: &mut dyn RasterSurface) -> bool {
        self.overlay.reveal(self.recorder.points(), surface)
    }

    pub fn export(&self, builder: PathBuilder, sink: &mut dyn DocumentSink) -> usize {
        ExportRenderer::new(builder).render_all(self.points(), sink)
    }

    /// Forget every point and the overlay state. The caller is responsible
    /// for clearing its raster surface.
    pub fn reset(&mut self) {
        info!("Resetting capture session {} ({} points)", self.id, self.points().len());
        self.recorder.reset();
        self.overlay.reset();
    }
}

/// A capture session shared across threads.
///
/// There is a single writer (the input side) at a time; readers take a
/// snapshot of the point sequence under a read lock so they never see a
/// half-applied sample.
#[derive(Debug, Clone, Default)]
pub struct SharedSession {
    inner: Arc<RwLock<CaptureSession>>,
}

impl SharedSession {
    pub fn new(session: CaptureSession) -> Self {
        Self {
            inner: Arc::new(RwLock::new(session)),
        }
    }

    pub fn write(&self) -> RwLockWriteGuard<'_, CaptureSession> {
        self.inner.write()
    }

    /// Copy of the current point sequence
    pub fn snapshot(&self) -> Vec<StrokePoint> {
        self.inner.read().points().to_vec()
    }

    pub fn export(&self, builder: PathBuilder, sink: &mut dyn DocumentSink) -> usize {
        let points = self.snapshot();
        ExportRenderer::new(builder).render_all(&points, sink)
    }
}
