use crate::config::GalleryConfig;

/// Zoom level and pan offset of the image in the lightbox
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomState {
    zoom: f64,
    position: (f64, f64),
    min: f64,
    max: f64,
}

impl Default for ZoomState {
    fn default() -> Self {
        Self::new(1.0, 3.0)
    }
}

impl ZoomState {
    /// Zoom level a double tap jumps to
    const DOUBLE_TAP_ZOOM: f64 = 2.0;

    pub fn new(min: f64, max: f64) -> Self {
        Self {
            zoom: min,
            position: (0.0, 0.0),
            min,
            max,
        }
    }

    pub fn from_config(config: &GalleryConfig) -> Self {
        Self::new(config.min_zoom, config.max_zoom)
    }

    /// Multiply by an incremental pinch scale, clamped to `[min, max]`.
    pub fn pinch(&mut self, scale: f64) {
        if !scale.is_finite() || scale <= 0.0 {
            return;
        }
        self.zoom = (self.zoom * scale).clamp(self.min, self.max);
        if !self.is_zoomed() {
            self.position = (0.0, 0.0);
        }
    }

    /// Toggle between fit-to-screen and 2×.
    pub fn double_tap(&mut self) {
        if self.is_zoomed() {
            self.reset();
        } else {
            self.zoom = Self::DOUBLE_TAP_ZOOM.clamp(self.min, self.max);
        }
    }

    /// Pan only while zoomed in.
    pub fn pan(&mut self, dx: f64, dy: f64) {
        if self.is_zoomed() {
            self.position.0 += dx;
            self.position.1 += dy;
        }
    }

    pub fn reset(&mut self) {
        self.zoom = self.min;
        self.position = (0.0, 0.0);
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn position(&self) -> (f64, f64) {
        self.position
    }

    pub fn is_zoomed(&self) -> bool {
        self.zoom > self.min
    }

    /// CSS transform for the zoomed image
    pub fn css_transform(&self) -> String {
        let (x, y) = self.position;
        format!("translate({x}px, {y}px) scale({})", self.zoom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pinch_clamps() {
        let mut z = ZoomState::default();
        z.pinch(2.0);
        z.pinch(2.0);
        assert_eq!(z.zoom(), 3.0);
        z.pinch(0.1);
        assert_eq!(z.zoom(), 1.0);
    }

    #[test]
    fn test_pinch_accumulates_incremental_scales() {
        let mut z = ZoomState::default();
        z.pinch(1.5);
        z.pinch(1.5);
        assert_eq!(z.zoom(), 2.25);
    }

    #[test]
    fn test_bad_scale_ignored() {
        let mut z = ZoomState::default();
        z.pinch(f64::NAN);
        z.pinch(0.0);
        z.pinch(-2.0);
        assert_eq!(z.zoom(), 1.0);
    }

    #[test]
    fn test_double_tap_toggles() {
        let mut z = ZoomState::default();
        z.double_tap();
        assert_eq!(z.zoom(), 2.0);
        z.pan(10.0, -5.0);
        assert_eq!(z.position(), (10.0, -5.0));
        z.double_tap();
        assert_eq!(z.zoom(), 1.0);
        assert_eq!(z.position(), (0.0, 0.0));
    }

    #[test]
    fn test_pan_ignored_at_fit() {
        let mut z = ZoomState::default();
        z.pan(40.0, 40.0);
        assert_eq!(z.position(), (0.0, 0.0));
    }

    #[test]
    fn test_css_transform() {
        let mut z = ZoomState::default();
        z.double_tap();
        z.pan(3.0, 4.0);
        assert_eq!(z.css_transform(), "translate(3px, 4px) scale(2)");
    }
}
