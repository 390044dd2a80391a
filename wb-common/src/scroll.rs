//! Scroll restoration on route change
//!
//! The fixed header overlaps content at scroll position zero on every page
//! but home (whose header is transparent), so each navigation forces a
//! deterministic offset instead of trusting the browser's restoration.
//! Mobile browser chrome can reflow after the route change, hence the
//! repeated attempts. The delays are tunable; only the final offset matters.

use crate::config::GalleryConfig;
use crate::timer::Sleeper;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceClass {
    Mobile,
    Desktop,
}

impl DeviceClass {
    pub fn from_viewport_width(width: f64, breakpoint: f64) -> Self {
        if width < breakpoint {
            DeviceClass::Mobile
        } else {
            DeviceClass::Desktop
        }
    }
}

/// CSS `scroll-behavior` as set inline on the root element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollBehavior {
    /// No inline value
    #[default]
    Unset,
    Auto,
    Smooth,
}

impl ScrollBehavior {
    pub fn from_css(value: &str) -> Self {
        match value.trim() {
            "auto" => ScrollBehavior::Auto,
            "smooth" => ScrollBehavior::Smooth,
            _ => ScrollBehavior::Unset,
        }
    }

    pub fn as_css(&self) -> &'static str {
        match self {
            ScrollBehavior::Unset => "",
            ScrollBehavior::Auto => "auto",
            ScrollBehavior::Smooth => "smooth",
        }
    }
}

/// One scroll attempt, timed relative to the previous one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollStep {
    Immediate,
    NextFrame,
    After(Duration),
}

/// Where to scroll and when to try
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollPlan {
    pub target: f64,
    pub steps: Vec<ScrollStep>,
    /// Wait after the last attempt before restoring the saved behavior
    pub restore_after: Duration,
}

/// Header geometry and retry timing
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollPolicy {
    pub mobile_header_px: f64,
    pub desktop_header_px: f64,
    pub buffer_px: f64,
    pub mobile_breakpoint_px: f64,
    pub retry_delays: Vec<Duration>,
    pub restore_after: Duration,
}

impl Default for ScrollPolicy {
    fn default() -> Self {
        Self::from_config(&GalleryConfig::default())
    }
}

impl ScrollPolicy {
    pub fn from_config(config: &GalleryConfig) -> Self {
        Self {
            mobile_header_px: config.mobile_header_px,
            desktop_header_px: config.desktop_header_px,
            buffer_px: config.header_buffer_px,
            mobile_breakpoint_px: config.mobile_breakpoint_px,
            retry_delays: config
                .scroll_retry_delays_ms
                .iter()
                .map(|ms| Duration::from_millis(*ms))
                .collect(),
            restore_after: Duration::from_millis(config.scroll_restore_delay_ms),
        }
    }

    pub fn device_for_width(&self, viewport_width: f64) -> DeviceClass {
        DeviceClass::from_viewport_width(viewport_width, self.mobile_breakpoint_px)
    }

    pub fn target_offset(&self, is_home: bool, device: DeviceClass) -> f64 {
        if is_home {
            return 0.0;
        }
        let header = match device {
            DeviceClass::Mobile => self.mobile_header_px,
            DeviceClass::Desktop => self.desktop_header_px,
        };
        header + self.buffer_px
    }

    pub fn plan(&self, is_home: bool, device: DeviceClass) -> ScrollPlan {
        let mut steps = vec![ScrollStep::Immediate, ScrollStep::NextFrame];
        steps.extend(self.retry_delays.iter().map(|d| ScrollStep::After(*d)));
        ScrollPlan {
            target: self.target_offset(is_home, device),
            steps,
            restore_after: self.restore_after,
        }
    }

    pub fn plan_for_path(&self, path: &str, viewport_width: f64) -> ScrollPlan {
        self.plan(is_home_path(path), self.device_for_width(viewport_width))
    }
}

/// `/`, the empty path, and query/fragment-only variants of them
pub fn is_home_path(path: &str) -> bool {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    path.is_empty() || path == "/"
}

/// The page's scrolling root
pub trait ScrollSurface {
    fn scroll_to(&self, y: f64);
    fn scroll_behavior(&self) -> ScrollBehavior;
    fn set_scroll_behavior(&self, behavior: ScrollBehavior);
}

/// Puts the saved behavior back on drop, so a sequence cancelled by the
/// next navigation doesn't leave `auto` stuck on the root element.
struct BehaviorGuard<'a, S: ScrollSurface + ?Sized> {
    surface: &'a S,
    saved: ScrollBehavior,
}

impl<S: ScrollSurface + ?Sized> Drop for BehaviorGuard<'_, S> {
    fn drop(&mut self) {
        self.surface.set_scroll_behavior(self.saved);
    }
}

/// Run a plan: force `auto`, scroll at every step, then restore.
pub async fn restore_scroll<S, T>(surface: &S, sleeper: &T, plan: &ScrollPlan)
where
    S: ScrollSurface + ?Sized,
    T: Sleeper + ?Sized,
{
    let _guard = BehaviorGuard {
        surface,
        saved: surface.scroll_behavior(),
    };
    surface.set_scroll_behavior(ScrollBehavior::Auto);

    for step in &plan.steps {
        match step {
            ScrollStep::Immediate => {}
            ScrollStep::NextFrame => sleeper.next_frame().await,
            ScrollStep::After(delay) => sleeper.sleep(*delay).await,
        }
        surface.scroll_to(plan.target);
    }

    sleeper.sleep(plan.restore_after).await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::PlatformSleeper;
    use std::cell::RefCell;

    #[derive(Default)]
    struct RecordingSurface {
        behavior: RefCell<ScrollBehavior>,
        log: RefCell<Vec<String>>,
    }

    impl ScrollSurface for RecordingSurface {
        fn scroll_to(&self, y: f64) {
            let behavior = self.behavior.borrow().as_css();
            self.log.borrow_mut().push(format!("scroll {y} ({behavior})"));
        }

        fn scroll_behavior(&self) -> ScrollBehavior {
            *self.behavior.borrow()
        }

        fn set_scroll_behavior(&self, behavior: ScrollBehavior) {
            *self.behavior.borrow_mut() = behavior;
            self.log
                .borrow_mut()
                .push(format!("behavior {}", behavior.as_css()));
        }
    }

    #[test]
    fn test_offsets() {
        let policy = ScrollPolicy::default();
        assert_eq!(policy.target_offset(true, DeviceClass::Mobile), 0.0);
        assert_eq!(policy.target_offset(true, DeviceClass::Desktop), 0.0);
        assert_eq!(policy.target_offset(false, DeviceClass::Mobile), 64.0);
        assert_eq!(policy.target_offset(false, DeviceClass::Desktop), 72.0);
    }

    #[test]
    fn test_device_class_breakpoint() {
        let policy = ScrollPolicy::default();
        assert_eq!(policy.device_for_width(375.0), DeviceClass::Mobile);
        assert_eq!(policy.device_for_width(600.0), DeviceClass::Desktop);
    }

    #[test]
    fn test_home_path() {
        assert!(is_home_path("/"));
        assert!(is_home_path(""));
        assert!(is_home_path("/?ref=ad"));
        assert!(!is_home_path("/gallery"));
        assert!(!is_home_path("/spaces/loft"));
    }

    #[test]
    fn test_plan_steps() {
        let plan = ScrollPolicy::default().plan_for_path("/gallery", 1280.0);
        assert_eq!(plan.target, 72.0);
        assert_eq!(
            plan.steps,
            vec![
                ScrollStep::Immediate,
                ScrollStep::NextFrame,
                ScrollStep::After(Duration::from_millis(50)),
                ScrollStep::After(Duration::from_millis(150)),
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_restore_forces_auto_then_restores() {
        let surface = RecordingSurface {
            behavior: RefCell::new(ScrollBehavior::Smooth),
            ..Default::default()
        };
        let plan = ScrollPolicy::default().plan_for_path("/", 375.0);

        restore_scroll(&surface, &PlatformSleeper, &plan).await;

        assert_eq!(
            *surface.log.borrow(),
            vec![
                "behavior auto",
                "scroll 0 (auto)",
                "scroll 0 (auto)",
                "scroll 0 (auto)",
                "scroll 0 (auto)",
                "behavior smooth",
            ]
        );
        assert_eq!(surface.scroll_behavior(), ScrollBehavior::Smooth);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_sequence_still_restores() {
        let surface = RecordingSurface::default();
        let plan = ScrollPolicy::default().plan_for_path("/gallery", 1280.0);

        {
            let fut = restore_scroll(&surface, &PlatformSleeper, &plan);
            futures::pin_mut!(fut);
            // Poll once: runs the immediate step, then parks on the frame wait
            assert!(futures::poll!(fut.as_mut()).is_pending());
            assert_eq!(surface.scroll_behavior(), ScrollBehavior::Auto);
        }

        assert_eq!(surface.scroll_behavior(), ScrollBehavior::Unset);
        assert_eq!(surface.log.borrow().len(), 3);
    }
}
