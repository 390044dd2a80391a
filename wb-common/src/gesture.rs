//! Touch gesture recognition
//!
//! Turns raw touch-start/move/end samples into swipe, pinch and double-tap
//! intents. The recognizer knows nothing about what the intents do.

/// A single touch point in client coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchPoint {
    pub x: f64,
    pub y: f64,
}

impl TouchPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    fn distance_to(&self, other: &TouchPoint) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// What a touch sequence meant
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureIntent {
    /// Finger moved right-to-left: show the next image
    SwipeLeft,
    /// Finger moved left-to-right: show the previous image
    SwipeRight,
    /// Incremental scale since the previous move sample
    Pinch(f64),
    DoubleTap,
}

/// Scratch state for one gesture sequence
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct TouchState {
    start: Option<TouchPoint>,
    end: Option<TouchPoint>,
    /// Finger spread at the last pinch sample
    pinch_distance: Option<f64>,
    /// Survives across gestures; cleared after a double tap fires
    last_tap_ms: Option<f64>,
}

/// Swipe / pinch / double-tap recognizer
#[derive(Debug, Clone, PartialEq)]
pub struct GestureRecognizer {
    swipe_threshold: f64,
    double_tap_ms: f64,
    state: TouchState,
}

impl Default for GestureRecognizer {
    fn default() -> Self {
        Self::new(50.0, 300.0)
    }
}

impl GestureRecognizer {
    pub fn new(swipe_threshold: f64, double_tap_ms: f64) -> Self {
        Self {
            swipe_threshold,
            double_tap_ms,
            state: TouchState::default(),
        }
    }

    pub fn from_config(config: &crate::config::GalleryConfig) -> Self {
        Self::new(config.swipe_threshold, config.double_tap_ms)
    }

    /// Begin a sequence. `now_ms` is any monotonic millisecond clock.
    pub fn touch_start(&mut self, touches: &[TouchPoint], now_ms: f64) -> Option<GestureIntent> {
        let last_tap_ms = self.state.last_tap_ms;
        self.state = TouchState {
            last_tap_ms,
            ..TouchState::default()
        };

        if let Some(first) = touches.first() {
            self.state.start = Some(*first);
            self.state.end = Some(*first);
        }
        if let [a, b, ..] = touches {
            self.state.pinch_distance = Some(a.distance_to(b));
        }

        match last_tap_ms {
            Some(last) if now_ms - last < self.double_tap_ms => {
                // Consumed: a third quick tap starts a new pair.
                self.state.last_tap_ms = None;
                Some(GestureIntent::DoubleTap)
            }
            _ => {
                self.state.last_tap_ms = Some(now_ms);
                None
            }
        }
    }

    /// Track movement. Two or more points emit an incremental pinch scale.
    pub fn touch_move(&mut self, touches: &[TouchPoint]) -> Option<GestureIntent> {
        if let Some(first) = touches.first() {
            self.state.end = Some(*first);
        }

        let [a, b, ..] = touches else {
            return None;
        };
        let current = a.distance_to(b);
        let previous = self.state.pinch_distance.replace(current);

        match previous {
            Some(previous) if previous > 0.0 => Some(GestureIntent::Pinch(current / previous)),
            _ => None,
        }
    }

    /// Finish a sequence and classify any swipe.
    pub fn touch_end(&mut self) -> Option<GestureIntent> {
        let (start, end) = (self.state.start.take(), self.state.end.take());
        self.state.pinch_distance = None;

        let (start, end) = (start?, end?);
        let delta_x = start.x - end.x;
        let delta_y = start.y - end.y;

        let is_horizontal = delta_x.abs() > delta_y.abs();
        if !is_horizontal || delta_x.abs() <= self.swipe_threshold {
            return None;
        }

        if delta_x > 0.0 {
            Some(GestureIntent::SwipeLeft)
        } else {
            Some(GestureIntent::SwipeRight)
        }
    }
}

type Callback = Box<dyn FnMut()>;

/// Optional intent callbacks. Unwired ones are skipped.
#[derive(Default)]
pub struct GestureHandlers {
    pub on_swipe_left: Option<Callback>,
    pub on_swipe_right: Option<Callback>,
    pub on_pinch: Option<Box<dyn FnMut(f64)>>,
    pub on_double_tap: Option<Callback>,
}

impl GestureHandlers {
    pub fn dispatch(&mut self, intent: GestureIntent) {
        match intent {
            GestureIntent::SwipeLeft => {
                if let Some(cb) = self.on_swipe_left.as_mut() {
                    cb();
                }
            }
            GestureIntent::SwipeRight => {
                if let Some(cb) = self.on_swipe_right.as_mut() {
                    cb();
                }
            }
            GestureIntent::Pinch(scale) => {
                if let Some(cb) = self.on_pinch.as_mut() {
                    cb(scale);
                }
            }
            GestureIntent::DoubleTap => {
                if let Some(cb) = self.on_double_tap.as_mut() {
                    cb();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn p(x: f64, y: f64) -> TouchPoint {
        TouchPoint::new(x, y)
    }

    fn swipe(r: &mut GestureRecognizer, from: TouchPoint, to: TouchPoint) -> Option<GestureIntent> {
        r.touch_start(&[from], 0.0);
        r.touch_move(&[to]);
        r.touch_end()
    }

    #[test]
    fn test_swipe_at_threshold_does_nothing() {
        let mut r = GestureRecognizer::default();
        assert_eq!(swipe(&mut r, p(200.0, 100.0), p(150.0, 100.0)), None);
        assert_eq!(swipe(&mut r, p(150.0, 100.0), p(200.0, 100.0)), None);
    }

    #[test]
    fn test_swipe_just_over_threshold() {
        let mut r = GestureRecognizer::default();
        assert_eq!(
            swipe(&mut r, p(200.0, 100.0), p(149.0, 100.0)),
            Some(GestureIntent::SwipeLeft)
        );
        assert_eq!(
            swipe(&mut r, p(149.0, 100.0), p(200.0, 100.0)),
            Some(GestureIntent::SwipeRight)
        );
    }

    #[test]
    fn test_vertical_drag_never_swipes() {
        let mut r = GestureRecognizer::default();
        assert_eq!(swipe(&mut r, p(300.0, 0.0), p(100.0, 400.0)), None);
        // Equal magnitudes are not "more horizontal"
        assert_eq!(swipe(&mut r, p(300.0, 0.0), p(200.0, 100.0)), None);
    }

    #[test]
    fn test_tap_without_move_is_not_swipe() {
        let mut r = GestureRecognizer::default();
        r.touch_start(&[p(10.0, 10.0)], 0.0);
        assert_eq!(r.touch_end(), None);
    }

    #[test]
    fn test_end_without_start_is_noop() {
        let mut r = GestureRecognizer::default();
        assert_eq!(r.touch_end(), None);
    }

    #[test]
    fn test_pinch_emits_incremental_scale() {
        let mut r = GestureRecognizer::default();
        r.touch_start(&[p(0.0, 0.0), p(100.0, 0.0)], 0.0);

        assert_eq!(
            r.touch_move(&[p(0.0, 0.0), p(150.0, 0.0)]),
            Some(GestureIntent::Pinch(1.5))
        );
        assert_eq!(
            r.touch_move(&[p(0.0, 0.0), p(300.0, 0.0)]),
            Some(GestureIntent::Pinch(2.0))
        );
        assert_eq!(
            r.touch_move(&[p(0.0, 0.0), p(150.0, 0.0)]),
            Some(GestureIntent::Pinch(0.5))
        );
    }

    #[test]
    fn test_second_finger_mid_gesture_starts_pinch_on_next_sample() {
        let mut r = GestureRecognizer::default();
        r.touch_start(&[p(0.0, 0.0)], 0.0);
        assert_eq!(r.touch_move(&[p(0.0, 0.0), p(30.0, 40.0)]), None);
        assert_eq!(
            r.touch_move(&[p(0.0, 0.0), p(60.0, 80.0)]),
            Some(GestureIntent::Pinch(2.0))
        );
    }

    #[test]
    fn test_double_tap_consumed() {
        let mut r = GestureRecognizer::default();
        assert_eq!(r.touch_start(&[p(0.0, 0.0)], 1000.0), None);
        r.touch_end();
        assert_eq!(
            r.touch_start(&[p(0.0, 0.0)], 1200.0),
            Some(GestureIntent::DoubleTap)
        );
        r.touch_end();
        assert_eq!(r.touch_start(&[p(0.0, 0.0)], 1300.0), None);
    }

    #[test]
    fn test_slow_taps_are_not_double() {
        let mut r = GestureRecognizer::default();
        r.touch_start(&[p(0.0, 0.0)], 0.0);
        assert_eq!(r.touch_start(&[p(0.0, 0.0)], 300.0), None);
        assert_eq!(
            r.touch_start(&[p(0.0, 0.0)], 450.0),
            Some(GestureIntent::DoubleTap)
        );
    }

    #[test]
    fn test_unwired_handlers_are_skipped() {
        let mut handlers = GestureHandlers::default();
        handlers.dispatch(GestureIntent::SwipeLeft);
        handlers.dispatch(GestureIntent::Pinch(1.2));
        handlers.dispatch(GestureIntent::DoubleTap);
    }

    #[test]
    fn test_dispatch_routes_to_matching_handler() {
        let nexts = Rc::new(Cell::new(0));
        let scale = Rc::new(Cell::new(1.0));
        let (n, s) = (nexts.clone(), scale.clone());
        let mut handlers = GestureHandlers {
            on_swipe_left: Some(Box::new(move || n.set(n.get() + 1))),
            on_pinch: Some(Box::new(move |k| s.set(s.get() * k))),
            ..Default::default()
        };

        handlers.dispatch(GestureIntent::SwipeLeft);
        handlers.dispatch(GestureIntent::SwipeRight);
        handlers.dispatch(GestureIntent::Pinch(2.0));
        assert_eq!(nexts.get(), 1);
        assert_eq!(scale.get(), 2.0);
    }
}
