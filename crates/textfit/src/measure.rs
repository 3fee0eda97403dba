//! Measurement oracle: read-only layout queries against the host surface,
//! plus the per-axis fit predicates the search engine drives.
//!
//! All reads are against *current* layout state. Callers must ensure a layout
//! pass has happened since the last font-size write before reading; awaiting
//! [`TextSurface::set_font_size`] is that guarantee.

use std::fmt;

use async_trait::async_trait;

/// Sub-pixel rounding tolerance applied to every fit check, in pixels.
pub const FIT_TOLERANCE_PX: f32 = 1.0;

/// A measurement axis. Also names the missing dimension in precondition
/// warnings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Width,
    Height,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Width => write!(f, "width"),
            Axis::Height => write!(f, "height"),
        }
    }
}

/// The host-rendered text surface the search measures and mutates.
///
/// Implemented by the embedding host on top of its layout engine. The content
/// queries are cheap reads; `set_font_size` is the only mutation and must
/// resolve only after the new size is reflected in measurable layout.
#[async_trait]
pub trait TextSurface: Send + Sync {
    /// Content-box width of the container, border and padding excluded.
    fn content_width(&self) -> f32;

    /// Content-box height of the container, border and padding excluded.
    fn content_height(&self) -> f32;

    /// Rendered scrollable width of the inner text block.
    fn scroll_width(&self) -> f32;

    /// Rendered scrollable height of the inner text block.
    fn scroll_height(&self) -> f32;

    /// Applies a candidate font size. Resolves after the host's next layout
    /// pass, so a subsequent scroll read observes the new size.
    async fn set_font_size(&self, px: u32);
}

/// True iff the rendered content fits horizontally within `budget` pixels.
pub fn fits_width<S: TextSurface + ?Sized>(surface: &S, budget: f32) -> bool {
    surface.scroll_width() - FIT_TOLERANCE_PX <= budget
}

/// True iff the rendered content fits vertically within `budget` pixels.
pub fn fits_height<S: TextSurface + ?Sized>(surface: &S, budget: f32) -> bool {
    surface.scroll_height() - FIT_TOLERANCE_PX <= budget
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedSurface {
        scroll_w: f32,
        scroll_h: f32,
    }

    #[async_trait]
    impl TextSurface for FixedSurface {
        fn content_width(&self) -> f32 {
            100.0
        }
        fn content_height(&self) -> f32 {
            50.0
        }
        fn scroll_width(&self) -> f32 {
            self.scroll_w
        }
        fn scroll_height(&self) -> f32 {
            self.scroll_h
        }
        async fn set_font_size(&self, _px: u32) {}
    }

    #[test]
    fn test_fits_width_exact_budget() {
        let s = FixedSurface { scroll_w: 100.0, scroll_h: 0.0 };
        assert!(fits_width(&s, 100.0));
    }

    #[test]
    fn test_fits_width_within_tolerance() {
        // One pixel of overflow is absorbed by the sub-pixel tolerance.
        let s = FixedSurface { scroll_w: 101.0, scroll_h: 0.0 };
        assert!(fits_width(&s, 100.0));
    }

    #[test]
    fn test_fits_width_beyond_tolerance() {
        let s = FixedSurface { scroll_w: 101.5, scroll_h: 0.0 };
        assert!(!fits_width(&s, 100.0));
    }

    #[test]
    fn test_fits_height_mirrors_width() {
        let s = FixedSurface { scroll_w: 0.0, scroll_h: 51.0 };
        assert!(fits_height(&s, 50.0));
        let s = FixedSurface { scroll_w: 0.0, scroll_h: 51.5 };
        assert!(!fits_height(&s, 50.0));
    }

    #[test]
    fn test_axis_display_is_lowercase() {
        assert_eq!(Axis::Width.to_string(), "width");
        assert_eq!(Axis::Height.to_string(), "height");
    }
}
