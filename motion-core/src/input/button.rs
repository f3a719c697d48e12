//! Push-button edge debouncing

/// The two front-panel buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Button {
    /// Knob push (confirm / enter edit)
    Select,
    /// Stop / back
    Back,
}

/// Time-window debouncer shared by both buttons
///
/// An edge is accepted when strictly more than `window_ms` has elapsed since
/// the previous edge. Every edge, accepted or not, moves the reference
/// timestamp forward, so a burst of chatter keeps being rejected until the
/// line has been quiet for a full window. Timestamps come from a wrapping
/// millisecond clock.
#[derive(Debug, Clone)]
pub struct Debouncer {
    window_ms: u32,
    last_ms: Option<u32>,
}

impl Debouncer {
    /// Create a debouncer with the given window
    pub const fn new(window_ms: u32) -> Self {
        Self {
            window_ms,
            last_ms: None,
        }
    }

    /// Register an edge at `now_ms`, returning whether it is honored
    pub fn accept(&mut self, now_ms: u32) -> bool {
        let accepted = match self.last_ms {
            None => true,
            Some(last) => now_ms.wrapping_sub(last) > self.window_ms,
        };
        self.last_ms = Some(now_ms);
        accepted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_edge_inside_window_rejected() {
        let mut d = Debouncer::new(200);
        assert!(d.accept(0));
        assert!(!d.accept(150));
    }

    #[test]
    fn test_edge_after_window_accepted() {
        let mut d = Debouncer::new(200);
        assert!(d.accept(0));
        assert!(d.accept(250));
    }

    #[test]
    fn test_exact_window_rejected() {
        let mut d = Debouncer::new(200);
        assert!(d.accept(1000));
        assert!(!d.accept(1200));
    }

    #[test]
    fn test_rejected_edge_extends_window() {
        let mut d = Debouncer::new(200);
        assert!(d.accept(0));
        assert!(!d.accept(150));
        // 300 ms after the first edge but only 150 ms after the chatter
        assert!(!d.accept(300));
        assert!(d.accept(501));
    }

    #[test]
    fn test_wraparound() {
        let mut d = Debouncer::new(400);
        assert!(d.accept(u32::MAX - 100));
        assert!(!d.accept(100));
        assert!(d.accept(600));
    }

    proptest! {
        #[test]
        fn prop_accepted_edges_separated(
            start in any::<u32>(),
            gaps in proptest::collection::vec(0u32..1000, 1..100),
            window in 1u32..500,
        ) {
            let mut d = Debouncer::new(window);
            let mut now = start;
            let mut last_accepted: Option<u32> = None;
            for gap in gaps {
                now = now.wrapping_add(gap);
                if d.accept(now) {
                    if let Some(prev) = last_accepted {
                        prop_assert!(now.wrapping_sub(prev) > window);
                    }
                    last_accepted = Some(now);
                }
            }
        }
    }
}
