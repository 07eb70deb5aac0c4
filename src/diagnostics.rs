//! Best-effort contact diagnostics.
//!
//! The recorder posts a report for every move without waiting; the UI picks
//! up whatever arrived once the frame's geometry is done. Reports that do not
//! fit in the channel are dropped.

use futures::channel::mpsc;
use log::trace;

use crate::input::{ContactType, TouchContact};

/// What the input device reported for one sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactDiagnostics {
    /// Resolved pressure (after fallbacks)
    pub pressure: f32,
    pub touch: Option<TouchContact>,
}

impl ContactDiagnostics {
    /// Human-readable lines for a diagnostics panel
    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![format!("force = {}", self.pressure)];
        if let Some(touch) = &self.touch {
            let kind = match touch.contact_type {
                ContactType::Direct => "direct 👆",
                ContactType::Stylus => "stylus ✍️",
                ContactType::Unknown => "unknown",
            };
            lines.push(format!("touchType = {}", kind));
            let fmt = |v: Option<f32>| v.map_or_else(|| "n/a".to_owned(), |v| v.to_string());
            lines.push(format!("radiusX = {}", fmt(touch.radius.map(|r| r.x))));
            lines.push(format!("radiusY = {}", fmt(touch.radius.map(|r| r.y))));
            lines.push(format!("rotationAngle = {}", fmt(touch.rotation_angle)));
            lines.push(format!("altitudeAngle = {}", fmt(touch.altitude_angle)));
            lines.push(format!("azimuthAngle = {}", fmt(touch.azimuth_angle)));
        }
        lines
    }
}

/// Producer half, owned by the recorder
#[derive(Debug)]
pub struct DiagnosticsSender {
    tx: mpsc::Sender<ContactDiagnostics>,
}

impl DiagnosticsSender {
    /// Queue a report without blocking. Returns false if it was dropped.
    pub fn post(&mut self, report: ContactDiagnostics) -> bool {
        match self.tx.try_send(report) {
            Ok(()) => true,
            Err(err) => {
                trace!("dropping contact report: {}", err);
                false
            }
        }
    }
}

/// Consumer half, drained by the UI at idle time
#[derive(Debug)]
pub struct DiagnosticsReceiver {
    rx: mpsc::Receiver<ContactDiagnostics>,
    latest: Option<ContactDiagnostics>,
}

impl DiagnosticsReceiver {
    /// Pull everything queued so far and return the newest report seen
    pub fn drain(&mut self) -> Option<&ContactDiagnostics> {
        while let Ok(Some(report)) = self.rx.try_next() {
            self.latest = Some(report);
        }
        self.latest.as_ref()
    }

    pub fn latest(&self) -> Option<&ContactDiagnostics> {
        self.latest.as_ref()
    }
}

/// Create a diagnostics channel holding at most `capacity` pending reports
pub fn channel(capacity: usize) -> (DiagnosticsSender, DiagnosticsReceiver) {
    // A futures channel guarantees one extra slot per sender
    let (tx, rx) = mpsc::channel(capacity.saturating_sub(1));
    (
        DiagnosticsSender { tx },
        DiagnosticsReceiver { rx, latest: None },
    )
}
