//! Lock-loss edge detection.
//!
//! Detection is a strict single-sample edge trigger: only the poll at which
//! the PLL leaves `Locked` is reported. Repeated unlocked readings and the
//! return to `Locked` are not lock-loss events. There is no debounce window.

use crate::status::PllStatus;

/// Returns true iff `previous` is `Locked` and `current` is not.
#[must_use]
pub fn detect_lock_loss(previous: PllStatus, current: PllStatus) -> bool {
    previous.is_locked() && !current.is_locked()
}

/// Classification of one poll relative to the previous one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transition {
    /// Locked before and after.
    Steady,
    /// Locked before, unlocked now for a non-fatal reason.
    LockLost,
    /// Locked before, reference lost now.
    ReferenceLost,
    /// Unlocked before and after.
    StillUnlocked,
    /// Unlocked before, locked now.
    Recovered,
}

impl Transition {
    /// Classify the step from `previous` to `current`.
    #[must_use]
    pub fn classify(previous: PllStatus, current: PllStatus) -> Self {
        match (previous.is_locked(), current) {
            (true, PllStatus::Locked) => Self::Steady,
            (true, PllStatus::Unlocked { .. }) => Self::LockLost,
            (true, PllStatus::ReferenceLost) => Self::ReferenceLost,
            (false, PllStatus::Locked) => Self::Recovered,
            (false, PllStatus::Unlocked { .. } | PllStatus::ReferenceLost) => Self::StillUnlocked,
        }
    }

    /// Check if this step is a lock-loss edge of either class.
    #[must_use]
    pub fn is_lock_loss(self) -> bool {
        matches!(self, Self::LockLost | Self::ReferenceLost)
    }

    /// Get the transition as a string slice.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Steady => "Steady",
            Self::LockLost => "LockLost",
            Self::ReferenceLost => "ReferenceLost",
            Self::StillUnlocked => "StillUnlocked",
            Self::Recovered => "Recovered",
        }
    }
}

impl core::fmt::Display for Transition {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
