//! Before/after comparison slider state machine.
//!
//! This is the authoritative contract for the widget; the embedded
//! `static/public/app.js` mirrors it in the browser. Position is a
//! percentage in `[0, 100]` of the container width, measured from the left
//! edge; the "after" image is clipped from the right by `100 - position`.

/// Horizontal placement of the mounted container in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContainerBounds {
    pub left: f64,
    pub width: f64,
}

pub const INITIAL_POSITION: f64 = 50.0;

#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonSlider {
    position: f64,
    dragging: bool,
    scroll_locked: bool,
    bounds: Option<ContainerBounds>,
}

impl Default for ComparisonSlider {
    fn default() -> Self {
        ComparisonSlider::new()
    }
}

impl ComparisonSlider {
    pub fn new() -> ComparisonSlider {
        ComparisonSlider {
            position: INITIAL_POSITION,
            dragging: false,
            scroll_locked: false,
            bounds: None,
        }
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn dragging(&self) -> bool {
        self.dragging
    }

    pub fn scroll_locked(&self) -> bool {
        self.scroll_locked
    }

    /// Percentage clipped off the right edge of the "after" layer.
    pub fn clip_right_percent(&self) -> f64 {
        100.0 - self.position
    }

    /// Left offset of the divider handle.
    pub fn divider_left_percent(&self) -> f64 {
        self.position
    }

    /// Easing applies to programmatic jumps only, never mid-drag.
    pub fn eases(&self) -> bool {
        !self.dragging
    }

    pub fn mount(&mut self, bounds: ContainerBounds) {
        self.bounds = Some(bounds);
    }

    /// Unmounting mid-drag must still restore page scroll.
    pub fn unmount(&mut self) {
        self.bounds = None;
        self.dragging = false;
        self.scroll_locked = false;
    }

    /// Map a viewport X coordinate onto the position. No-op while unmounted
    /// or when the container has no measurable width, so the position can
    /// never become NaN or infinite.
    pub fn set_from_pointer(&mut self, client_x: f64) {
        let Some(bounds) = self.bounds else {
            return;
        };
        if !(bounds.width > 0.0) || !client_x.is_finite() || !bounds.left.is_finite() {
            return;
        }
        let percent = (client_x - bounds.left) / bounds.width * 100.0;
        self.position = percent.clamp(0.0, 100.0);
    }

    pub fn pointer_down(&mut self, client_x: f64) {
        if self.bounds.is_none() {
            return;
        }
        self.dragging = true;
        self.scroll_locked = true;
        self.set_from_pointer(client_x);
    }

    /// Document-level move: coordinates outside the container still apply,
    /// clamped to the edges. Ignored unless a drag is active.
    pub fn pointer_move(&mut self, client_x: f64) {
        if !self.dragging {
            return;
        }
        self.set_from_pointer(client_x);
    }

    pub fn pointer_up(&mut self) {
        self.dragging = false;
        self.scroll_locked = false;
    }

    /// Interrupted gestures (pointercancel, focus loss) end like a release.
    pub fn cancel(&mut self) {
        self.pointer_up();
    }

    /// Click-to-jump. Ignored mid-drag; the release already positioned us.
    pub fn click(&mut self, client_x: f64) {
        if self.dragging {
            return;
        }
        self.set_from_pointer(client_x);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mounted() -> ComparisonSlider {
        let mut slider = ComparisonSlider::new();
        slider.mount(ContainerBounds {
            left: 100.0,
            width: 400.0,
        });
        slider
    }

    #[test]
    fn starts_centered() {
        let slider = ComparisonSlider::new();
        assert_eq!(slider.position(), 50.0);
        assert!(!slider.dragging());
        assert!(!slider.scroll_locked());
    }

    #[test]
    fn pointer_maps_linearly_within_bounds() {
        let mut slider = mounted();
        slider.pointer_down(200.0);
        assert_eq!(slider.position(), 25.0);
        slider.pointer_move(400.0);
        assert_eq!(slider.position(), 75.0);
    }

    #[test]
    fn out_of_bounds_coordinates_clamp_to_edges() {
        let mut slider = mounted();
        slider.pointer_down(-50.0);
        assert_eq!(slider.position(), 0.0);
        slider.pointer_move(10_000.0);
        assert_eq!(slider.position(), 100.0);
    }

    #[test]
    fn unmounted_slider_ignores_pointer_input() {
        let mut slider = ComparisonSlider::new();
        slider.set_from_pointer(500.0);
        slider.pointer_down(500.0);
        assert_eq!(slider.position(), 50.0);
        assert!(!slider.dragging());
    }

    #[test]
    fn zero_width_container_never_produces_nan() {
        let mut slider = ComparisonSlider::new();
        slider.mount(ContainerBounds {
            left: 10.0,
            width: 0.0,
        });
        slider.pointer_down(300.0);
        assert_eq!(slider.position(), 50.0);
        assert!(slider.position().is_finite());
    }

    #[test]
    fn drag_cycle_locks_and_restores_scroll() {
        let mut slider = mounted();
        slider.pointer_down(150.0);
        assert!(slider.scroll_locked());
        assert!(!slider.eases());
        slider.pointer_up();
        assert!(!slider.scroll_locked());
        assert!(slider.eases());

        // A second release stays unlocked.
        slider.pointer_up();
        assert!(!slider.scroll_locked());
    }

    #[test]
    fn cancel_and_unmount_restore_scroll() {
        let mut slider = mounted();
        slider.pointer_down(150.0);
        slider.cancel();
        assert!(!slider.scroll_locked());

        slider.pointer_down(150.0);
        slider.unmount();
        assert!(!slider.scroll_locked());
        assert!(!slider.dragging());
    }

    #[test]
    fn moves_without_a_drag_are_ignored() {
        let mut slider = mounted();
        slider.pointer_move(300.0);
        assert_eq!(slider.position(), 50.0);
    }

    #[test]
    fn click_jumps_only_outside_a_drag() {
        let mut slider = mounted();
        slider.click(300.0);
        assert_eq!(slider.position(), 50.0);
        slider.click(500.0);
        assert_eq!(slider.position(), 100.0);

        slider.pointer_down(200.0);
        slider.click(500.0);
        assert_eq!(slider.position(), 25.0);
    }

    #[test]
    fn rendering_helpers_complement_each_other() {
        let mut slider = mounted();
        slider.click(200.0);
        assert_eq!(slider.divider_left_percent(), 25.0);
        assert_eq!(slider.clip_right_percent(), 75.0);
    }
}
