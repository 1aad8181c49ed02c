pub const REVEAL_LEAD_PX: f64 = 150.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavFrame {
    pub shadow: bool,
    pub hidden: bool,
}

impl NavFrame {
    pub fn transform(self) -> &'static str {
        if self.hidden {
            "translateY(-100%)"
        } else {
            "translateY(0)"
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct NavState {
    last_scroll: f64,
}

impl NavState {
    pub fn on_scroll(&mut self, current: f64, hide_after: f64) -> NavFrame {
        let frame = NavFrame {
            shadow: current > 0.0,
            hidden: current > self.last_scroll && current > hide_after,
        };
        self.last_scroll = current;
        frame
    }
}

pub fn scroll_progress(scroll_y: f64, scroll_height: f64, client_height: f64) -> f64 {
    let scrollable = scroll_height - client_height;
    if scrollable <= 0.0 {
        return 0.0;
    }

    (scroll_y / scrollable * 100.0).clamp(0.0, 100.0)
}

pub fn back_to_top_visible(scroll_y: f64, threshold: f64) -> bool {
    scroll_y > threshold
}

pub fn should_reveal(element_top: f64, viewport_height: f64) -> bool {
    element_top < viewport_height - REVEAL_LEAD_PX
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportRect {
    pub top: f64,
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
}

pub fn is_in_viewport(rect: ViewportRect, viewport_width: f64, viewport_height: f64) -> bool {
    rect.top >= 0.0
        && rect.left >= 0.0
        && rect.bottom <= viewport_height
        && rect.right <= viewport_width
}

pub fn anchor_target(href: &str) -> Option<&str> {
    match href {
        "#" | "#!" => None,
        _ if href.starts_with('#') => Some(href),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn navbar_hides_only_while_scrolling_down_past_offset() {
        let mut nav = NavState::default();

        assert_eq!(nav.on_scroll(0.0, 100.0), NavFrame { shadow: false, hidden: false });
        assert_eq!(nav.on_scroll(80.0, 100.0), NavFrame { shadow: true, hidden: false });
        assert_eq!(nav.on_scroll(150.0, 100.0), NavFrame { shadow: true, hidden: true });
        assert_eq!(nav.on_scroll(150.0, 100.0), NavFrame { shadow: true, hidden: false });
        assert_eq!(nav.on_scroll(120.0, 100.0), NavFrame { shadow: true, hidden: false });
        assert_eq!(nav.on_scroll(400.0, 100.0), NavFrame { shadow: true, hidden: true });
    }

    #[test]
    fn nav_frame_maps_to_transform() {
        assert_eq!(NavFrame { shadow: true, hidden: true }.transform(), "translateY(-100%)");
        assert_eq!(NavFrame { shadow: false, hidden: false }.transform(), "translateY(0)");
    }

    #[test]
    fn progress_is_bounded_and_safe_on_short_pages() {
        assert_eq!(scroll_progress(0.0, 2_000.0, 1_000.0), 0.0);
        assert_eq!(scroll_progress(500.0, 2_000.0, 1_000.0), 50.0);
        assert_eq!(scroll_progress(1_200.0, 2_000.0, 1_000.0), 100.0);
        assert_eq!(scroll_progress(10.0, 800.0, 800.0), 0.0);
    }

    #[test]
    fn back_to_top_threshold_is_exclusive() {
        assert!(!back_to_top_visible(300.0, 300.0));
        assert!(back_to_top_visible(301.0, 300.0));
    }

    #[test]
    fn reveal_leads_viewport_bottom() {
        assert!(should_reveal(649.0, 800.0));
        assert!(!should_reveal(650.0, 800.0));
    }

    #[test]
    fn viewport_check_requires_full_containment() {
        let inside = ViewportRect { top: 0.0, left: 10.0, bottom: 700.0, right: 1_000.0 };
        let clipped = ViewportRect { top: -1.0, ..inside };

        assert!(is_in_viewport(inside, 1_024.0, 768.0));
        assert!(!is_in_viewport(clipped, 1_024.0, 768.0));
        assert!(!is_in_viewport(inside, 900.0, 768.0));
    }

    #[test]
    fn placeholder_anchors_are_ignored() {
        assert_eq!(anchor_target("#"), None);
        assert_eq!(anchor_target("#!"), None);
        assert_eq!(anchor_target("#projects"), Some("#projects"));
        assert_eq!(anchor_target("/resume.pdf"), None);
    }
}
