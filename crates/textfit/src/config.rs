use serde::{Deserialize, Serialize};
use tracing::warn;

/// How the text is allowed to flow inside the container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FitMode {
    /// One line, no wrapping. The primary fit axis is width.
    Single,
    /// Text wraps across lines. The primary fit axis is height.
    Multi,
}

/// Configuration surface of the component. Every field is optional when
/// deserialized; missing fields take the defaults below.
///
/// `min <= max` is a caller obligation; the search does not validate it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FitConfig {
    /// Inclusive lower bound of the candidate window, in pixels.
    pub min: u32,
    /// Inclusive upper bound of the candidate window, in pixels.
    pub max: u32,
    pub mode: FitMode,
    /// In single-line mode, accept the width-fit size as final instead of
    /// shrinking further to also satisfy height.
    pub force_single_mode_width: bool,
    /// Minimum interval between resize-triggered searches, in milliseconds.
    pub throttle_ms: u64,
    /// Re-run the search on host resize notifications.
    pub auto_resize: bool,
}

impl Default for FitConfig {
    fn default() -> Self {
        Self {
            min: 1,
            max: 100,
            mode: FitMode::Multi,
            force_single_mode_width: true,
            throttle_ms: 50,
            auto_resize: true,
        }
    }
}

impl FitConfig {
    pub fn with_min(mut self, min: u32) -> Self {
        self.min = min;
        self
    }

    pub fn with_max(mut self, max: u32) -> Self {
        self.max = max;
        self
    }

    pub fn with_mode(mut self, mode: FitMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_force_single_mode_width(mut self, force: bool) -> Self {
        self.force_single_mode_width = force;
        self
    }

    pub fn with_throttle_ms(mut self, throttle_ms: u64) -> Self {
        self.throttle_ms = throttle_ms;
        self
    }

    pub fn with_auto_resize(mut self, auto_resize: bool) -> Self {
        self.auto_resize = auto_resize;
        self
    }

    /// The perfect-fit pass no longer exists; the option is kept so old
    /// call sites keep compiling and get a warning instead of an error.
    #[deprecated(note = "the perfect_fit option has been removed and is ignored")]
    pub fn with_perfect_fit(self, _enabled: bool) -> Self {
        warn!("the perfect_fit option has been removed and is ignored");
        self
    }
}
