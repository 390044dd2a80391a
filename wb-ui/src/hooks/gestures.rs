use dioxus::prelude::*;
use wb_common::gesture::TouchPoint as GesturePoint;
use wb_common::{GalleryConfig, GestureRecognizer};

pub fn use_touch_gestures(config: &GalleryConfig) -> Signal<GestureRecognizer> {
    use_signal(|| GestureRecognizer::from_config(config))
}

/// Active touches of an event in client coordinates
pub fn touch_points(evt: &TouchEvent) -> Vec<GesturePoint> {
    evt.data()
        .touches()
        .iter()
        .map(|touch| {
            let point = touch.client_coordinates();
            GesturePoint::new(point.x, point.y)
        })
        .collect()
}
