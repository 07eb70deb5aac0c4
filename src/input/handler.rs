use egui::{Context, Event, PointerButton, Pos2, Rect, TouchId, TouchPhase};
use log::{debug, warn};

use super::{ContactType, InputEvent, Sample, TouchContact};
use crate::util::time;

/// Which device currently owns the gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Gesture {
    Idle,
    Pointer,
    Touch(TouchId),
}

/// Handles converting raw egui input into canvas-local gesture events.
///
/// Only one gesture is followed at a time. Platforms that synthesize pointer
/// events for the first finger would otherwise record every touch twice, so
/// pointer events are ignored while a touch owns the gesture. The web backend
/// queues the synthesized pointer events ahead of the touch itself, which is
/// why whole frames carrying touch input skip their pointer events.
pub struct InputHandler {
    canvas_rect: Rect,
    gesture: Gesture,
    /// Last accepted position, in canvas coordinates
    last_pos: Pos2,
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new(Rect::NOTHING)
    }
}

impl InputHandler {
    pub fn new(canvas_rect: Rect) -> Self {
        Self {
            canvas_rect,
            gesture: Gesture::Idle,
            last_pos: Pos2::ZERO,
        }
    }

    /// Update the canvas rectangle (e.g. if window is resized)
    pub fn set_canvas_rect(&mut self, rect: Rect) {
        self.canvas_rect = rect;
    }

    pub fn is_drawing(&self) -> bool {
        self.gesture != Gesture::Idle
    }

    /// Process this frame's raw egui input and generate gesture events
    pub fn process_input(&mut self, ctx: &Context) -> Vec<InputEvent> {
        let now = time::current_time_secs();
        ctx.input(|input| self.handle_frame(&input.raw.events, now))
    }

    /// Translate one frame worth of raw events
    pub fn handle_frame(&mut self, events: &[Event], now: f64) -> Vec<InputEvent> {
        let has_touch = events.iter().any(|e| matches!(e, Event::Touch { .. }));
        events
            .iter()
            .filter(|event| {
                !(has_touch
                    && matches!(event, Event::PointerButton { .. } | Event::PointerMoved(_)))
            })
            .filter_map(|event| self.handle_raw(event, now))
            .collect()
    }

    /// Translate a single raw event. Exposed for replaying recorded input.
    pub fn handle_raw(&mut self, event: &Event, now: f64) -> Option<InputEvent> {
        let event = match *event {
            Event::PointerButton {
                pos,
                button: PointerButton::Primary,
                pressed,
                ..
            } => self.on_pointer_button(pos, pressed, now),
            Event::PointerMoved(pos) if self.gesture == Gesture::Pointer => {
                Some(InputEvent::Move(self.pointer_sample(pos, now)))
            }
            Event::Touch {
                id,
                phase,
                pos,
                force,
                ..
            } => self.on_touch(id, phase, pos, force, now),
            _ => None,
        }?;

        match event.sample().validate() {
            Ok(_) => {
                self.last_pos = event.sample().pos;
                Some(event)
            }
            Err(err) => {
                warn!("Dropping input sample: {}", err);
                match event {
                    // A rejected start must not leave a gesture open
                    InputEvent::Start(_) => {
                        self.gesture = Gesture::Idle;
                        None
                    }
                    // The gesture is over either way, so close it where it was last seen
                    InputEvent::End(sample) => Some(InputEvent::End(Sample {
                        pos: self.last_pos,
                        pressure: sample.pressure.filter(|p| p.is_finite()),
                        ..sample
                    })),
                    InputEvent::Move(_) => None,
                }
            }
        }
    }

    fn on_pointer_button(&mut self, pos: Pos2, pressed: bool, now: f64) -> Option<InputEvent> {
        match (self.gesture, pressed) {
            (Gesture::Idle, true) if self.canvas_rect.contains(pos) => {
                debug!("Pointer gesture started at {:?}", pos);
                self.gesture = Gesture::Pointer;
                Some(InputEvent::Start(self.pointer_sample(pos, now)))
            }
            (Gesture::Pointer, false) => {
                debug!("Pointer gesture ended at {:?}", pos);
                self.gesture = Gesture::Idle;
                Some(InputEvent::End(self.pointer_sample(pos, now)))
            }
            _ => None,
        }
    }

    fn on_touch(
        &mut self,
        id: TouchId,
        phase: TouchPhase,
        pos: Pos2,
        force: Option<f32>,
        now: f64,
    ) -> Option<InputEvent> {
        let sample = self.touch_sample(pos, force, now);
        match (self.gesture, phase) {
            (Gesture::Idle, TouchPhase::Start) if self.canvas_rect.contains(pos) => {
                debug!("Touch gesture {:?} started at {:?}", id, pos);
                self.gesture = Gesture::Touch(id);
                Some(InputEvent::Start(sample))
            }
            (Gesture::Touch(active), TouchPhase::Move) if active == id => {
                Some(InputEvent::Move(sample))
            }
            (Gesture::Touch(active), TouchPhase::End | TouchPhase::Cancel) if active == id => {
                debug!("Touch gesture {:?} ended at {:?}", id, pos);
                self.gesture = Gesture::Idle;
                Some(InputEvent::End(sample))
            }
            _ => None,
        }
    }

    fn to_canvas(&self, pos: Pos2) -> Pos2 {
        (pos - self.canvas_rect.min).to_pos2()
    }

    fn pointer_sample(&self, pos: Pos2, now: f64) -> Sample {
        Sample::pointer(self.to_canvas(pos)).with_timestamp(now)
    }

    fn touch_sample(&self, pos: Pos2, force: Option<f32>, now: f64) -> Sample {
        // egui does not expose contact geometry, only the force
        let contact = TouchContact {
            contact_type: ContactType::Direct,
            ..TouchContact::default()
        };
        Sample::touch(self.to_canvas(pos), force)
            .with_contact(contact)
            .with_timestamp(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{Modifiers, TouchDeviceId};

    fn handler() -> InputHandler {
        InputHandler::new(Rect::from_min_max(Pos2::new(100.0, 50.0), Pos2::new(500.0, 450.0)))
    }

    fn button(pos: Pos2, pressed: bool) -> Event {
        Event::PointerButton {
            pos,
            button: PointerButton::Primary,
            pressed,
            modifiers: Modifiers::NONE,
        }
    }

    fn touch(phase: TouchPhase, pos: Pos2, force: Option<f32>) -> Event {
        Event::Touch {
            device_id: TouchDeviceId(0),
            id: TouchId(7),
            phase,
            pos,
            force,
        }
    }

    #[test]
    fn test_pointer_gesture_is_canvas_local() {
        let mut handler = handler();
        let start = handler.handle_raw(&button(Pos2::new(110.0, 60.0), true), 0.0);
        assert_eq!(
            start.map(|e| e.sample().pos),
            Some(Pos2::new(10.0, 10.0))
        );
        assert!(handler.is_drawing());

        let moved = handler.handle_raw(&Event::PointerMoved(Pos2::new(120.0, 60.0)), 0.1);
        assert!(matches!(moved, Some(InputEvent::Move(s)) if s.pos == Pos2::new(20.0, 10.0)));

        let end = handler.handle_raw(&button(Pos2::new(130.0, 60.0), false), 0.2);
        assert!(matches!(end, Some(InputEvent::End(_))));
        assert!(!handler.is_drawing());
    }

    #[test]
    fn test_moves_without_gesture_are_ignored() {
        let mut handler = handler();
        assert!(handler.handle_raw(&Event::PointerMoved(Pos2::new(120.0, 60.0)), 0.0).is_none());
        assert!(handler.handle_raw(&button(Pos2::new(120.0, 60.0), false), 0.0).is_none());
    }

    #[test]
    fn test_press_outside_canvas_does_not_start() {
        let mut handler = handler();
        assert!(handler.handle_raw(&button(Pos2::new(10.0, 10.0), true), 0.0).is_none());
        assert!(!handler.is_drawing());
    }

    #[test]
    fn test_synthesized_pointer_events_are_ignored_during_touch() {
        let mut handler = handler();
        let pos = Pos2::new(200.0, 200.0);

        let start = handler.handle_raw(&touch(TouchPhase::Start, pos, Some(0.5)), 0.0);
        let sample = *start.unwrap().sample();
        assert_eq!(sample.pressure, Some(0.5));
        assert!(sample.touch.is_some());

        assert!(handler.handle_raw(&button(pos, true), 0.0).is_none());
        assert!(handler.handle_raw(&Event::PointerMoved(pos), 0.0).is_none());

        let end = handler.handle_raw(&touch(TouchPhase::End, pos, Some(0.0)), 0.1);
        assert!(matches!(end, Some(InputEvent::End(_))));
        assert!(handler.handle_raw(&button(pos, false), 0.1).is_none());
    }

    #[test]
    fn test_non_finite_samples_are_dropped() {
        let mut handler = handler();
        let pos = Pos2::new(200.0, 200.0);
        assert!(handler.handle_raw(&touch(TouchPhase::Start, pos, Some(f32::NAN)), 0.0).is_none());
        assert!(!handler.is_drawing());
    }

    #[test]
    fn test_web_touch_ordering_keeps_force() {
        let mut handler = handler();
        let a = Pos2::new(200.0, 200.0);
        let b = Pos2::new(210.0, 205.0);

        // The web backend pushes the synthesized pointer event before the touch
        let frame = [button(a, true), touch(TouchPhase::Start, a, Some(0.4))];
        let started = handler.handle_frame(&frame, 0.0);
        assert_eq!(started.len(), 1);
        let start = *started[0].sample();
        assert!(matches!(started[0], InputEvent::Start(_)));
        assert_eq!(start.pressure, Some(0.4));
        assert!(start.touch.is_some());

        let frame = [Event::PointerMoved(b), touch(TouchPhase::Move, b, Some(0.7))];
        let moved = handler.handle_frame(&frame, 0.1);
        assert_eq!(moved.len(), 1);
        let sample = *moved[0].sample();
        assert!(matches!(moved[0], InputEvent::Move(_)));
        assert_eq!(sample.pressure, Some(0.7));
        assert!(sample.touch.is_some());

        let frame = [button(b, false), touch(TouchPhase::End, b, None)];
        let ended = handler.handle_frame(&frame, 0.2);
        assert!(matches!(ended[..], [InputEvent::End(_)]));
        assert!(!handler.is_drawing());
    }

    #[test]
    fn test_mouse_frames_are_unaffected() {
        let mut handler = handler();
        let events = [
            button(Pos2::new(110.0, 60.0), true),
            Event::PointerMoved(Pos2::new(120.0, 60.0)),
            button(Pos2::new(120.0, 60.0), false),
        ];
        let out = handler.handle_frame(&events, 0.0);
        assert!(matches!(
            out[..],
            [InputEvent::Start(_), InputEvent::Move(_), InputEvent::End(_)]
        ));
    }

    #[test]
    fn test_rejected_end_still_closes_gesture() {
        let mut handler = handler();
        let pos = Pos2::new(200.0, 200.0);
        handler.handle_raw(&touch(TouchPhase::Start, pos, Some(0.5)), 0.0);

        let end = handler.handle_raw(&touch(TouchPhase::End, pos, Some(f32::NAN)), 0.1);
        match end {
            Some(InputEvent::End(sample)) => {
                assert_eq!(sample.pos, Pos2::new(100.0, 150.0));
                assert!(sample.validate().is_ok());
            }
            other => panic!("expected an end event, got {:?}", other),
        }
        assert!(!handler.is_drawing());
    }
}
