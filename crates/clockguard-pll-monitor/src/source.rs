//! PLL status register access.
//!
//! This module provides the `PllStatusSource` trait through which the monitor
//! reads hardware, and `SoftwarePllRegister`, an atomic stand-in for testing
//! and hardware-free environments.

use std::sync::Arc;

use portable_atomic::{AtomicU32, AtomicU64, Ordering};

use crate::status::{PllStatus, StatusEncoding};

/// Access to the PLL status register.
///
/// Reads are synchronous and do not fail at this layer. A register access
/// path that can fail must handle that itself and report some raw code.
pub trait PllStatusSource {
    /// Read the raw status register value.
    fn read_raw_status(&mut self) -> u32;
}

/// Read the current PLL status.
///
/// Plain passthrough: no retries, no caching, no validation beyond mapping
/// the raw value into the closed status set.
pub fn read_pll_status<R>(source: &mut R, encoding: &StatusEncoding) -> PllStatus
where
    R: PllStatusSource + ?Sized,
{
    encoding.decode(source.read_raw_status())
}

/// Software PLL status register.
///
/// Holds a raw status code that tests or a simulator set and the monitor
/// reads. Access is lock-free, so a shared handle may be written from one
/// thread while the monitor polls from another.
///
/// # Example
///
/// ```rust
/// use clockguard_pll_monitor::{PllStatusSource, SoftwarePllRegister};
///
/// let mut register = SoftwarePllRegister::locked();
/// assert_eq!(register.read_raw_status(), 0x1);
///
/// register.set_raw(0x3);
/// assert_eq!(register.read_raw_status(), 0x3);
/// assert_eq!(register.read_count(), 2);
/// ```
#[derive(Debug)]
pub struct SoftwarePllRegister {
    /// Current raw status code.
    raw: AtomicU32,
    /// Number of reads served.
    reads: AtomicU64,
}

impl SoftwarePllRegister {
    /// Create a register holding `raw`.
    #[must_use]
    pub fn new(raw: u32) -> Self {
        Self {
            raw: AtomicU32::new(raw),
            reads: AtomicU64::new(0),
        }
    }

    /// Create a register holding the default locked code.
    #[must_use]
    pub fn locked() -> Self {
        Self::new(StatusEncoding::DEFAULT_LOCKED)
    }

    /// Create a shared register handle.
    #[must_use]
    pub fn shared(raw: u32) -> Arc<Self> {
        Arc::new(Self::new(raw))
    }

    /// Store a raw status code.
    pub fn set_raw(&self, raw: u32) {
        self.raw.store(raw, Ordering::Release);
    }

    /// Store the code for `status` under `encoding`.
    pub fn set_status(&self, status: PllStatus, encoding: &StatusEncoding) {
        self.set_raw(status.to_raw(encoding));
    }

    /// Current raw status code, without counting a read.
    #[must_use]
    pub fn raw(&self) -> u32 {
        self.raw.load(Ordering::Acquire)
    }

    /// Number of reads served so far.
    #[must_use]
    pub fn read_count(&self) -> u64 {
        self.reads.load(Ordering::Acquire)
    }

    fn read(&self) -> u32 {
        self.reads.fetch_add(1, Ordering::AcqRel);
        self.raw()
    }
}

impl Default for SoftwarePllRegister {
    fn default() -> Self {
        Self::locked()
    }
}

impl PllStatusSource for SoftwarePllRegister {
    fn read_raw_status(&mut self) -> u32 {
        self.read()
    }
}

impl PllStatusSource for Arc<SoftwarePllRegister> {
    fn read_raw_status(&mut self) -> u32 {
        self.read()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_pll_status_decodes() {
        let encoding = StatusEncoding::default();
        let mut register = SoftwarePllRegister::locked();
        assert_eq!(read_pll_status(&mut register, &encoding), PllStatus::Locked);

        register.set_raw(0x3);
        assert_eq!(
            read_pll_status(&mut register, &encoding),
            PllStatus::ReferenceLost
        );

        register.set_raw(0x0);
        assert_eq!(
            read_pll_status(&mut register, &encoding),
            PllStatus::Unlocked { raw: 0x0 }
        );
    }

    #[test]
    fn test_read_is_a_passthrough() {
        let encoding = StatusEncoding::default();
        let mut register = SoftwarePllRegister::new(0x2);

        for _ in 0..3 {
            assert_eq!(
                read_pll_status(&mut register, &encoding),
                PllStatus::Unlocked { raw: 0x2 }
            );
        }
        assert_eq!(register.read_count(), 3);
    }

    #[test]
    fn test_set_status_uses_encoding() -> Result<(), Box<dyn std::error::Error>> {
        let encoding = StatusEncoding::new(0x0, 0x5)?;
        let register = SoftwarePllRegister::default();

        register.set_status(PllStatus::Locked, &encoding);
        assert_eq!(register.raw(), 0x0);

        register.set_status(PllStatus::ReferenceLost, &encoding);
        assert_eq!(register.raw(), 0x5);
        assert_eq!(register.read_count(), 0);
        Ok(())
    }

    #[test]
    fn test_shared_handle_sees_writes() {
        let writer = SoftwarePllRegister::shared(0x1);
        let mut reader = Arc::clone(&writer);

        writer.set_raw(0x3);
        assert_eq!(reader.read_raw_status(), 0x3);
        assert_eq!(writer.read_count(), 1);
    }

    #[test]
    fn test_trait_object() {
        let mut register = SoftwarePllRegister::new(0x1);
        let source: &mut dyn PllStatusSource = &mut register;
        assert_eq!(
            read_pll_status(source, &StatusEncoding::default()),
            PllStatus::Locked
        );
    }
}
