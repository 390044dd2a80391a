//! Dot indicator for the lightbox position

use std::ops::Range;

use dioxus::prelude::*;

/// Window of at most `max` dots around `current`, pinned to the ends.
fn visible_range(total: usize, current: usize, max: usize) -> Range<usize> {
    if max == 0 || total <= max {
        return 0..total;
    }
    let start = current.saturating_sub(max / 2).min(total - max);
    start..start + max
}

#[component]
pub fn NavigationDots(
    total: usize,
    current: usize,
    on_select: EventHandler<usize>,
    /// 0 shows every dot
    #[props(default = 10)]
    max_dots: usize,
) -> Element {
    let range = visible_range(total, current, max_dots);
    let clipped_left = range.start > 0;
    let clipped_right = range.end < total;
    let last = range.end.saturating_sub(1);

    rsx! {
        div { class: "flex items-center justify-center gap-2 px-4 py-2 rounded-full bg-black/30",
            for index in range.clone() {
                {
                    let is_current = index == current;
                    // Edge dots shrink when more images lie beyond them
                    let is_edge = !is_current
                        && ((index == range.start && clipped_left)
                            || (index == last && clipped_right));
                    let size = if is_edge { "w-1.5 h-1.5 opacity-70" } else { "w-2 h-2" };
                    let color = if is_current { "bg-white" } else { "bg-white/50 hover:bg-white" };
                    rsx! {
                        button {
                            key: "{index}",
                            class: "rounded-full transition-all duration-300 {size} {color}",
                            aria_label: "Go to image {index + 1}",
                            aria_current: if is_current { "true" } else { "false" },
                            onclick: move |evt| {
                                evt.stop_propagation();
                                on_select.call(index);
                            },
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_pinned_to_start() {
        assert_eq!(visible_range(44, 0, 10), 0..10);
        assert_eq!(visible_range(44, 3, 10), 0..10);
    }

    #[test]
    fn test_window_pinned_to_end() {
        assert_eq!(visible_range(44, 43, 10), 34..44);
        assert_eq!(visible_range(44, 40, 10), 34..44);
    }

    #[test]
    fn test_window_centres_on_current() {
        assert_eq!(visible_range(44, 20, 10), 15..25);
        assert!(visible_range(44, 20, 10).contains(&20));
    }

    #[test]
    fn test_small_collection_shows_every_dot() {
        assert_eq!(visible_range(7, 6, 10), 0..7);
        assert_eq!(visible_range(10, 9, 10), 0..10);
    }

    #[test]
    fn test_zero_max_shows_every_dot() {
        assert_eq!(visible_range(44, 12, 0), 0..44);
    }

    #[test]
    fn test_window_always_holds_current() {
        for current in 0..25 {
            let range = visible_range(25, current, 6);
            assert_eq!(range.len(), 6);
            assert!(range.contains(&current), "{current}");
        }
    }
}
