use gpui::{Pixels, ScrollHandle, point};

/// Distance from the bottom beyond which scrolling counts as manual.
const MANUAL_SCROLL_THRESHOLD: f32 = 10.0;
/// Small delta used to ignore floating-point scroll jitter.
const SCROLL_DELTA_EPSILON: f32 = 1.0;

/// Distance in pixels between the scroll offset and the bottom edge.
///
/// GPUI scroll offsets go negative as content scrolls down, so the offset
/// plus the maximum offset approaches zero at the tail.
pub fn distance_from_bottom(offset_y: f32, max_offset: f32) -> f32 {
    (offset_y + max_offset).max(0.0)
}

/// True when a distance from the bottom reads as deliberate scrolling.
///
/// The tolerance band keeps sub-pixel scroll imprecision from oscillating
/// between follow and manual mode.
pub fn is_manual_distance(distance: f32) -> bool {
    distance > MANUAL_SCROLL_THRESHOLD
}

/// Pure follow-intent state over observed scroll geometry.
#[derive(Debug, Clone, Copy, Default)]
pub struct FollowTracker {
    has_user_scrolled: bool,
    last_offset: f32,
    last_max_offset: f32,
}

impl FollowTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_user_scrolled(&self) -> bool {
        self.has_user_scrolled
    }

    /// Feeds one observation of the current offset and scroll extent.
    ///
    /// Only offset movement against a stable extent reads as the user's
    /// scroll; content growth alone never flips follow intent.
    pub fn observe(&mut self, offset_y: f32, max_offset: f32) {
        let offset_changed = (offset_y - self.last_offset).abs() > SCROLL_DELTA_EPSILON;
        let content_changed = (max_offset - self.last_max_offset).abs() > SCROLL_DELTA_EPSILON;

        if offset_changed && !content_changed {
            self.has_user_scrolled = is_manual_distance(distance_from_bottom(offset_y, max_offset));
        }

        self.last_offset = offset_y;
        self.last_max_offset = max_offset;
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

/// Binds follow tracking to a live scroll container.
pub struct ScrollManager {
    scroll_handle: ScrollHandle,
    tracker: FollowTracker,
}

impl ScrollManager {
    pub fn new() -> Self {
        Self {
            scroll_handle: ScrollHandle::new(),
            tracker: FollowTracker::new(),
        }
    }

    pub fn handle(&self) -> &ScrollHandle {
        &self.scroll_handle
    }

    pub fn has_user_scrolled(&self) -> bool {
        self.tracker.has_user_scrolled()
    }

    /// Re-evaluates follow intent from the handle's current geometry.
    pub fn update_follow_state(&mut self) {
        let offset_y = f32::from(self.scroll_handle.offset().y);
        let max_offset = f32::from(self.scroll_handle.max_offset().height);
        self.tracker.observe(offset_y, max_offset);
    }

    /// Pins the viewport to the bottom unless the user scrolled away.
    ///
    /// A container that has no scrollable extent yet makes this a no-op.
    pub fn apply_auto_follow(&mut self) {
        if self.tracker.has_user_scrolled() {
            return;
        }

        let max_offset = self.scroll_handle.max_offset().height;
        if max_offset <= Pixels::ZERO {
            return;
        }

        let offset_x = self.scroll_handle.offset().x;
        self.scroll_handle.set_offset(point(offset_x, -max_offset));
    }

    pub fn reset(&mut self) {
        self.tracker.reset();
    }
}

impl Default for ScrollManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A tracker that has already seen a settled 500px extent at the tail.
    fn settled_tracker() -> FollowTracker {
        let mut tracker = FollowTracker::new();
        tracker.observe(-500.0, 500.0);
        tracker.observe(-500.0, 500.0);
        tracker
    }

    #[test]
    fn distances_at_or_below_threshold_keep_following() {
        let mut tracker = settled_tracker();
        tracker.observe(-491.0, 500.0);
        assert!(!tracker.has_user_scrolled(), "distance 9 must keep follow");

        let mut tracker = settled_tracker();
        tracker.observe(-490.0, 500.0);
        assert!(!tracker.has_user_scrolled(), "distance 10 must keep follow");
    }

    #[test]
    fn distances_beyond_threshold_read_as_manual() {
        let mut tracker = settled_tracker();
        tracker.observe(-489.0, 500.0);

        assert!(tracker.has_user_scrolled(), "distance 11 must pause follow");
    }

    #[test]
    fn content_growth_alone_never_pauses_follow() {
        let mut tracker = settled_tracker();

        // Appended content moves the extent while the offset stays put.
        tracker.observe(-500.0, 900.0);

        assert!(!tracker.has_user_scrolled());
    }

    #[test]
    fn returning_to_the_bottom_resumes_follow() {
        let mut tracker = settled_tracker();
        tracker.observe(-300.0, 500.0);
        assert!(tracker.has_user_scrolled());

        tracker.observe(-498.0, 500.0);
        assert!(!tracker.has_user_scrolled());
    }

    #[test]
    fn reset_restores_follow_mode() {
        let mut tracker = settled_tracker();
        tracker.observe(-100.0, 500.0);
        assert!(tracker.has_user_scrolled());

        tracker.reset();
        assert!(!tracker.has_user_scrolled());
    }
}
