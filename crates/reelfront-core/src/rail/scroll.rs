/// Live scroll offset of a rail container
///
/// `scroll_width` covers the doubled content, so one loop is half of it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollState {
    position: f64,
    scroll_width: f64,
    visible_width: f64,
}

impl ScrollState {
    pub fn new(scroll_width: f64, visible_width: f64) -> Self {
        Self {
            position: 0.0,
            scroll_width,
            visible_width,
        }
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn scroll_width(&self) -> f64 {
        self.scroll_width
    }

    pub fn visible_width(&self) -> f64 {
        self.visible_width
    }

    pub fn loop_width(&self) -> f64 {
        self.scroll_width / 2.0
    }

    /// Whether the container has a usable size
    pub fn is_measurable(&self) -> bool {
        self.scroll_width.is_finite() && self.scroll_width > 0.0
    }

    /// Update container metrics, keeping the position inside the new loop
    pub fn resize(&mut self, scroll_width: f64, visible_width: f64) {
        self.scroll_width = scroll_width;
        self.visible_width = visible_width;
        if self.is_measurable() {
            self.position = self.normalized(self.position);
        } else {
            self.position = 0.0;
        }
    }

    /// Map any offset onto the equivalent frame in `[0, loop_width)`
    pub fn normalized(&self, position: f64) -> f64 {
        let loop_width = self.loop_width();
        if !self.is_measurable() || !position.is_finite() {
            return 0.0;
        }
        let wrapped = position.rem_euclid(loop_width);
        // rem_euclid can round up to the modulus for tiny negative inputs
        if wrapped >= loop_width {
            0.0
        } else {
            wrapped
        }
    }

    /// Jump to an offset, wrapped onto the first loop
    pub fn set_position(&mut self, position: f64) {
        self.position = self.normalized(position);
    }

    /// Advance by `distance`, subtracting one loop width at the seam
    ///
    /// Returns `true` when the seam was crossed.
    pub fn advance(&mut self, distance: f64) -> bool {
        let loop_width = self.loop_width();
        self.position += distance;
        if self.position >= loop_width {
            self.position -= loop_width;
            if self.position >= loop_width {
                // More than one loop in a single frame (stalled terminal)
                self.position = self.normalized(self.position);
            }
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loop_width_is_half() {
        let state = ScrollState::new(200.0, 40.0);
        assert_eq!(state.loop_width(), 100.0);
    }

    #[test]
    fn test_advance_wraps_once() {
        let mut state = ScrollState::new(200.0, 40.0);
        state.set_position(99.5);
        assert!(state.advance(1.0));
        assert!((state.position() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_advance_never_leaves_position_past_loop() {
        let mut state = ScrollState::new(20.0, 5.0);
        assert!(state.advance(35.0));
        assert!(state.position() >= 0.0 && state.position() < state.loop_width());
    }

    #[test]
    fn test_normalized_negative() {
        let state = ScrollState::new(200.0, 40.0);
        assert!((state.normalized(-10.0) - 90.0).abs() < 1e-9);
        assert_eq!(state.normalized(f64::NAN), 0.0);
    }

    #[test]
    fn test_unmeasurable() {
        let mut state = ScrollState::new(0.0, 40.0);
        assert!(!state.is_measurable());
        state.set_position(12.0);
        assert_eq!(state.position(), 0.0);
        state.resize(f64::INFINITY, 40.0);
        assert!(!state.is_measurable());
    }

    #[test]
    fn test_resize_keeps_position_in_loop() {
        let mut state = ScrollState::new(200.0, 40.0);
        state.set_position(80.0);
        state.resize(100.0, 40.0);
        assert!((state.position() - 30.0).abs() < 1e-9);
    }
}
