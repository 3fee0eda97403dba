//! Per-search mutable state.

/// State owned by exactly one search session.
///
/// `low`/`high`/`mid` are signed because the window legitimately passes one
/// below `min` when no candidate fits. The target dimensions are captured
/// once at session start: the container box is fixed for the lifetime of the
/// search while the inner content box varies with font size.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchSession {
    pub low: i32,
    pub high: i32,
    pub mid: i32,
    pub target_width: f32,
    pub target_height: f32,
}

impl SearchSession {
    pub fn new(min: u32, max: u32, target_width: f32, target_height: f32) -> Self {
        Self {
            low: min as i32,
            high: max as i32,
            mid: min as i32,
            target_width,
            target_height,
        }
    }

    /// Moves `mid` to the midpoint of the current window and returns it as
    /// the next candidate size to apply.
    pub fn bisect(&mut self) -> u32 {
        self.mid = (self.low + self.high) / 2;
        self.mid as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_spans_the_configured_window() {
        let s = SearchSession::new(1, 100, 320.0, 240.0);
        assert_eq!(s.low, 1);
        assert_eq!(s.high, 100);
        assert_eq!(s.target_width, 320.0);
        assert_eq!(s.target_height, 240.0);
    }

    #[test]
    fn test_bisect_truncates_toward_zero() {
        let mut s = SearchSession::new(1, 100, 0.0, 0.0);
        s.low = 30;
        s.high = 31;
        assert_eq!(s.bisect(), 30, "midpoint must truncate, not round");
        assert_eq!(s.mid, 30);
    }
}
