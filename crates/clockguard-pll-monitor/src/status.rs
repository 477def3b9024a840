//! PLL status values and their hardware encoding.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{PllMonitorError, PllMonitorResult};

/// Lock status of the PLL as decoded from the status register.
///
/// The set is closed: every raw code decodes to exactly one variant, and
/// codes without a dedicated class land in [`PllStatus::Unlocked`] with the
/// raw value preserved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PllStatus {
    /// PLL is stably synchronized to its reference.
    #[default]
    Locked,
    /// PLL is not locked for a reason without a dedicated class.
    Unlocked {
        /// Raw register code as read from hardware.
        raw: u32,
    },
    /// The reference signal itself is gone. Fatal.
    ReferenceLost,
}

impl PllStatus {
    /// Check if the PLL is locked.
    #[must_use]
    pub fn is_locked(self) -> bool {
        matches!(self, Self::Locked)
    }

    /// Check if this status is the fatal reference-lost class.
    #[must_use]
    pub fn is_reference_lost(self) -> bool {
        matches!(self, Self::ReferenceLost)
    }

    /// Raw register code for this status under `encoding`.
    #[must_use]
    pub fn to_raw(self, encoding: &StatusEncoding) -> u32 {
        match self {
            Self::Locked => encoding.locked,
            Self::Unlocked { raw } => raw,
            Self::ReferenceLost => encoding.reference_lost,
        }
    }

    /// Get the status class as a string slice.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Locked => "Locked",
            Self::Unlocked { .. } => "Unlocked",
            Self::ReferenceLost => "ReferenceLost",
        }
    }
}

impl fmt::Display for PllStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unlocked { raw } => write!(f, "Unlocked({raw:#x})"),
            Self::Locked | Self::ReferenceLost => f.write_str(self.as_str()),
        }
    }
}

/// Raw register codes with a dedicated [`PllStatus`] class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusEncoding {
    /// Code reported while the PLL is locked.
    pub locked: u32,
    /// Code reported when the reference signal is lost.
    pub reference_lost: u32,
}

impl StatusEncoding {
    /// Default locked code.
    pub const DEFAULT_LOCKED: u32 = 0x1;
    /// Reference-lost code of the observed hardware.
    pub const DEFAULT_REFERENCE_LOST: u32 = 0x3;

    /// Create an encoding from explicit codes.
    ///
    /// # Errors
    ///
    /// Returns an error if both codes are equal.
    pub fn new(locked: u32, reference_lost: u32) -> PllMonitorResult<Self> {
        let encoding = Self {
            locked,
            reference_lost,
        };
        encoding.validate()?;
        Ok(encoding)
    }

    /// Validate the encoding.
    ///
    /// # Errors
    ///
    /// Returns an error if both codes are equal, which would make the
    /// reference-lost class unreachable.
    pub fn validate(&self) -> PllMonitorResult<()> {
        if self.locked == self.reference_lost {
            return Err(PllMonitorError::encoding_conflict(self.locked));
        }
        Ok(())
    }

    /// Map a raw register value into the closed status set.
    #[must_use]
    pub fn decode(&self, raw: u32) -> PllStatus {
        if raw == self.locked {
            PllStatus::Locked
        } else if raw == self.reference_lost {
            PllStatus::ReferenceLost
        } else {
            PllStatus::Unlocked { raw }
        }
    }

    /// Check if `raw` has a dedicated class under this encoding.
    #[must_use]
    pub fn is_classified(&self, raw: u32) -> bool {
        raw == self.locked || raw == self.reference_lost
    }
}

impl Default for StatusEncoding {
    fn default() -> Self {
        Self {
            locked: Self::DEFAULT_LOCKED,
            reference_lost: Self::DEFAULT_REFERENCE_LOST,
        }
    }
}

/// Status assumed before the first poll.
///
/// A monitor can only be seeded as locked or as unlocked; seeding it as
/// reference-lost would describe a fault that was never observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Baseline {
    /// Hardware reset expectation.
    #[default]
    Locked,
    /// PLL not yet locked when monitoring starts.
    Unlocked {
        /// Raw code to report for the seeded status. Must not be a classified
        /// code of the active encoding.
        raw: u32,
    },
}

impl Baseline {
    /// Status this baseline seeds `last_status` with.
    #[must_use]
    pub fn status(self) -> PllStatus {
        match self {
            Self::Locked => PllStatus::Locked,
            Self::Unlocked { raw } => PllStatus::Unlocked { raw },
        }
    }

    /// Validate the baseline against `encoding`.
    ///
    /// # Errors
    ///
    /// Returns an error if an unlocked baseline uses a code that `encoding`
    /// decodes to another class.
    pub fn validate(self, encoding: &StatusEncoding) -> PllMonitorResult<()> {
        if let Self::Unlocked { raw } = self
            && encoding.is_classified(raw)
        {
            return Err(PllMonitorError::invalid_configuration(format!(
                "unlocked baseline must not use a classified status code ({raw:#x})"
            )));
        }
        Ok(())
    }
}

impl From<Baseline> for PllStatus {
    fn from(baseline: Baseline) -> Self {
        baseline.status()
    }
}

impl fmt::Display for Baseline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.status(), f)
    }
}
