use egui::{Pos2, Vec2};
use serde::{Deserialize, Serialize};

use crate::config::PressureConfig;
use crate::error::SampleError;

mod handler;
pub use handler::InputHandler;

/// How a touch contact is touching the surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ContactType {
    /// A finger on the screen
    Direct,
    /// A pen or stylus
    Stylus,
    #[default]
    Unknown,
}

/// Metadata reported by a touch contact. Every field is optional because
/// platforms report wildly different subsets.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TouchContact {
    /// Contact ellipse radii
    pub radius: Option<Vec2>,
    pub rotation_angle: Option<f32>,
    pub altitude_angle: Option<f32>,
    pub azimuth_angle: Option<f32>,
    pub contact_type: ContactType,
}

/// A single normalized input observation, in capture surface coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub pos: Pos2,
    /// Raw force reported by a touch contact
    pub pressure: Option<f32>,
    /// Seconds, on whatever clock the input source uses
    pub timestamp: Option<f64>,
    pub touch: Option<TouchContact>,
}

impl Sample {
    /// A pointer (mouse) sample: no force, no touch metadata
    pub fn pointer(pos: Pos2) -> Self {
        Self {
            pos,
            pressure: None,
            timestamp: None,
            touch: None,
        }
    }

    /// A touch sample carrying the given force, if the device reports one
    pub fn touch(pos: Pos2, force: Option<f32>) -> Self {
        Self {
            pos,
            pressure: force,
            timestamp: None,
            touch: Some(TouchContact::default()),
        }
    }

    pub fn with_timestamp(mut self, timestamp: f64) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    pub fn with_contact(mut self, contact: TouchContact) -> Self {
        self.touch = Some(contact);
        self
    }

    /// Resolve the pressure used for width computation.
    ///
    /// Touch samples with a reported force use it when positive and the touch
    /// fallback otherwise. Samples without touch data, or touches whose device
    /// reports no force, use the pointer pressure. Values above 1 are kept as-is.
    pub fn pressure_or_default(&self, config: &PressureConfig) -> f32 {
        match (self.touch, self.pressure) {
            (Some(_), Some(force)) if force > 0.0 => force,
            (Some(_), Some(_)) => config.touch_fallback,
            _ => config.pointer,
        }
    }

    /// Reject samples whose numbers would poison the point sequence
    pub fn validate(self) -> Result<Self, SampleError> {
        if !(self.pos.x.is_finite() && self.pos.y.is_finite()) {
            return Err(SampleError::NonFiniteCoordinate {
                x: self.pos.x,
                y: self.pos.y,
            });
        }
        if let Some(pressure) = self.pressure {
            if !pressure.is_finite() {
                return Err(SampleError::NonFinitePressure(pressure));
            }
        }
        Ok(self)
    }
}

/// One step of a gesture, as delivered by an input source
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    Start(Sample),
    Move(Sample),
    End(Sample),
}

impl InputEvent {
    pub fn sample(&self) -> &Sample {
        match self {
            InputEvent::Start(sample) | InputEvent::Move(sample) | InputEvent::End(sample) => {
                sample
            }
        }
    }
}

/// A pull-based stream of input events.
///
/// The capture session drains whatever source it is handed; it has no
/// knowledge of how the events were produced.
pub trait InputSource {
    fn poll(&mut self) -> Option<InputEvent>;
}

impl<I> InputSource for I
where
    I: Iterator<Item = InputEvent>,
{
    fn poll(&mut self) -> Option<InputEvent> {
        self.next()
    }
}
