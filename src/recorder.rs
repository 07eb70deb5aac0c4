use egui::Pos2;
use log::{debug, trace};

use crate::config::PressureConfig;
use crate::diagnostics::{ContactDiagnostics, DiagnosticsSender};
use crate::input::Sample;
use crate::live::IncrementalRenderer;
use crate::stroke::{Stroke, StrokePoint};
use crate::surface::RasterSurface;

/// Turns gesture samples into stroke points.
///
/// The recorder owns the session's point sequence and the running smoothed
/// width. Widths follow `ln(pressure + 1) * gain`; moves blend that raw width
/// into the previous one as an exponential moving average.
#[derive(Debug)]
pub struct StrokeRecorder {
    stroke: Stroke,
    /// Last emitted smoothed width; 0 between gestures
    line_width: f32,
    /// Whether a start has been seen without a matching end
    in_gesture: bool,
    config: PressureConfig,
    live: IncrementalRenderer,
    diagnostics: Option<DiagnosticsSender>,
}

impl Default for StrokeRecorder {
    fn default() -> Self {
        Self::new(PressureConfig::default())
    }
}

impl StrokeRecorder {
    pub fn new(config: PressureConfig) -> Self {
        Self {
            stroke: Stroke::new(),
            line_width: 0.0,
            in_gesture: false,
            config,
            live: IncrementalRenderer::default(),
            diagnostics: None,
        }
    }

    /// Post a contact report for every recorded move
    pub fn with_diagnostics(mut self, sender: DiagnosticsSender) -> Self {
        self.diagnostics = Some(sender);
        self
    }

    pub fn points(&self) -> &[StrokePoint] {
        self.stroke.points()
    }

    /// The running smoothed width
    pub fn line_width(&self) -> f32 {
        self.line_width
    }

    pub fn is_recording(&self) -> bool {
        self.in_gesture
    }

    /// Begin a gesture. The point is appended to the running sequence.
    pub fn record_start(&mut self, sample: &Sample, surface: &mut dyn RasterSurface) {
        let pressure = sample.pressure_or_default(&self.config);
        self.line_width = self.config.line_width(pressure);
        self.in_gesture = true;

        debug!(
            "Gesture started at {:?}: pressure {}, width {:.3}",
            sample.pos, pressure, self.line_width
        );

        self.live.begin(surface, sample.pos, self.line_width);
        self.append(sample.pos);
    }

    /// Continue the gesture with a smoothed width and one live segment
    pub fn record_move(&mut self, sample: &Sample, surface: &mut dyn RasterSurface) {
        if !self.in_gesture {
            debug!("record_move: no active gesture, ignoring");
            return;
        }

        let pressure = sample.pressure_or_default(&self.config);
        self.line_width = self.config.smoothed_width(pressure, self.line_width);
        trace!("move to {:?}: pressure {}, width {:.3}", sample.pos, pressure, self.line_width);

        self.append(sample.pos);
        self.live.extend(self.stroke.points(), surface);

        if let Some(diagnostics) = &mut self.diagnostics {
            diagnostics.post(ContactDiagnostics {
                pressure,
                touch: sample.touch,
            });
        }
    }

    /// Finish the gesture at the release position.
    ///
    /// No point is appended; the accumulated sequence is left intact and only
    /// the width accumulator is reset.
    pub fn record_end(&mut self, sample: &Sample, surface: &mut dyn RasterSurface) {
        if !self.in_gesture {
            debug!("record_end: no active gesture, ignoring");
            return;
        }

        let pressure = sample.pressure_or_default(&self.config);
        debug!(
            "Gesture ended at {:?} (pressure {}), {} points recorded",
            sample.pos,
            pressure,
            self.stroke.len()
        );

        self.live.finish(self.stroke.points(), sample.pos, surface);
        self.line_width = 0.0;
        self.in_gesture = false;
    }

    /// Drop every recorded point and any gesture in progress
    pub fn reset(&mut self) {
        self.stroke.clear();
        self.line_width = 0.0;
        self.in_gesture = false;
    }

    fn append(&mut self, pos: Pos2) {
        self.stroke.push(StrokePoint {
            pos,
            line_width: self.line_width,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics;
    use crate::surface::{DrawInstruction, LiveCanvas};

    const EPSILON: f32 = 1e-3;

    #[test]
    fn test_mouse_start_uses_full_pressure() {
        let mut recorder = StrokeRecorder::default();
        let mut canvas = LiveCanvas::default();
        recorder.record_start(&Sample::pointer(Pos2::new(0.0, 0.0)), &mut canvas);

        let point = recorder.points()[0];
        assert!((point.line_width - 27.726).abs() < EPSILON);
        assert_eq!(canvas.pen(), Pos2::new(0.0, 0.0));
    }

    #[test]
    fn test_zero_force_touch_falls_back() {
        let mut recorder = StrokeRecorder::default();
        let mut canvas = LiveCanvas::default();
        recorder.record_start(&Sample::touch(Pos2::ZERO, Some(0.0)), &mut canvas);
        assert!((recorder.points()[0].line_width - 3.812).abs() < EPSILON);
    }

    #[test]
    fn test_move_smooths_width() {
        let mut recorder = StrokeRecorder::default();
        let mut canvas = LiveCanvas::default();
        recorder.record_start(&Sample::touch(Pos2::ZERO, Some(1.0)), &mut canvas);
        let start_width = recorder.line_width();

        recorder.record_move(&Sample::touch(Pos2::new(1.0, 0.0), Some(0.1)), &mut canvas);
        let expected = 1.1f32.ln() * 40.0 * 0.2 + start_width * 0.8;
        assert!((recorder.points()[1].line_width - expected).abs() < EPSILON);
    }

    #[test]
    fn test_end_resets_accumulator_but_keeps_points() {
        let mut recorder = StrokeRecorder::default();
        let mut canvas = LiveCanvas::default();
        recorder.record_start(&Sample::pointer(Pos2::ZERO), &mut canvas);
        recorder.record_move(&Sample::pointer(Pos2::new(5.0, 5.0)), &mut canvas);
        recorder.record_end(&Sample::pointer(Pos2::new(6.0, 6.0)), &mut canvas);

        assert_eq!(recorder.line_width(), 0.0);
        assert_eq!(recorder.points().len(), 2);
        assert!(!recorder.is_recording());
    }

    #[test]
    fn test_stray_move_is_ignored() {
        let mut recorder = StrokeRecorder::default();
        let mut canvas = LiveCanvas::default();
        recorder.record_move(&Sample::pointer(Pos2::new(5.0, 5.0)), &mut canvas);
        recorder.record_end(&Sample::pointer(Pos2::new(5.0, 5.0)), &mut canvas);
        assert!(recorder.points().is_empty());
        assert!(canvas.instructions().is_empty());
    }

    #[test]
    fn test_moves_post_diagnostics() {
        let (tx, mut rx) = diagnostics::channel(4);
        let mut recorder = StrokeRecorder::default().with_diagnostics(tx);
        let mut canvas = LiveCanvas::default();

        recorder.record_start(&Sample::touch(Pos2::ZERO, Some(0.4)), &mut canvas);
        assert!(rx.drain().is_none());

        recorder.record_move(&Sample::touch(Pos2::new(1.0, 1.0), Some(0.0)), &mut canvas);
        let report = rx.drain().copied().unwrap();
        assert_eq!(report.pressure, 0.1);
        assert!(report.touch.is_some());
    }

    #[test]
    fn test_reset_clears_points() {
        let mut recorder = StrokeRecorder::default();
        let mut canvas = LiveCanvas::default();
        recorder.record_start(&Sample::pointer(Pos2::ZERO), &mut canvas);
        recorder.reset();
        assert!(recorder.points().is_empty());
        assert_eq!(recorder.line_width(), 0.0);
        assert!(!recorder.is_recording());
    }

    #[test]
    fn test_tap_closes_with_its_own_width() {
        let mut recorder = StrokeRecorder::default();
        let mut canvas = LiveCanvas::default();
        recorder.record_start(&Sample::touch(Pos2::ZERO, Some(0.05)), &mut canvas);
        recorder.record_move(&Sample::touch(Pos2::new(10.0, 0.0), Some(0.05)), &mut canvas);
        recorder.record_move(&Sample::touch(Pos2::new(20.0, 0.0), Some(0.05)), &mut canvas);
        recorder.record_end(&Sample::touch(Pos2::new(21.0, 0.0), Some(0.05)), &mut canvas);

        let tap = Sample::pointer(Pos2::new(100.0, 100.0));
        recorder.record_start(&tap, &mut canvas);
        let start_width = recorder.points()[3].line_width;
        assert_eq!(recorder.live.stroke_width(), start_width);
        recorder.record_end(&tap, &mut canvas);

        match canvas.segments().last() {
            Some(DrawInstruction::QuadraticSegment { from, end, width, .. }) => {
                assert_eq!(*from, Pos2::new(100.0, 100.0));
                assert_eq!(*end, Pos2::new(100.0, 100.0));
                assert!((*width - 27.726).abs() < EPSILON);
            }
            other => panic!("expected a closing segment, got {:?}", other),
        }
    }
}
