//! Configuration types for the PLL monitor.

use serde::{Deserialize, Serialize};

use crate::error::{PllMonitorError, PllMonitorResult};
use crate::status::{Baseline, StatusEncoding};

/// PLL monitor configuration.
///
/// Missing fields take their defaults when deserialized, so a partial
/// document only needs to name what differs from the hardware reset values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    /// Subsystem tag carried by every diagnostic record.
    ///
    /// Default: `CLK`.
    pub subsystem: String,

    /// Raw register codes with a dedicated status class.
    pub encoding: StatusEncoding,

    /// Status assumed before the first poll.
    ///
    /// Default: `Locked`, matching the hardware reset expectation.
    pub baseline: Baseline,
}

impl MonitorConfig {
    /// Default subsystem tag.
    pub const DEFAULT_SUBSYSTEM: &'static str = "CLK";

    /// Create a configuration builder.
    #[must_use]
    pub fn builder() -> MonitorConfigBuilder {
        MonitorConfigBuilder::default()
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the subsystem tag is empty or contains
    /// whitespace, brackets or non-ASCII characters, if the encoding assigns
    /// one code to both classes, or if an unlocked baseline uses a
    /// classified code.
    pub fn validate(&self) -> PllMonitorResult<()> {
        if self.subsystem.is_empty() {
            return Err(PllMonitorError::invalid_configuration(
                "subsystem tag must not be empty",
            ));
        }
        // The tag is printed as `[TAG]`, so brackets would break the prefix.
        if !self
            .subsystem
            .chars()
            .all(|c| c.is_ascii_graphic() && c != '[' && c != ']')
        {
            return Err(PllMonitorError::invalid_configuration(
                "subsystem tag must be printable ASCII without whitespace or brackets",
            ));
        }
        self.encoding.validate()?;
        self.baseline.validate(&self.encoding)
    }
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            subsystem: Self::DEFAULT_SUBSYSTEM.to_string(),
            encoding: StatusEncoding::default(),
            baseline: Baseline::Locked,
        }
    }
}

/// Builder for `MonitorConfig`.
#[derive(Debug, Default)]
pub struct MonitorConfigBuilder {
    config: MonitorConfig,
}

impl MonitorConfigBuilder {
    /// Set the subsystem tag.
    #[must_use]
    pub fn subsystem(mut self, tag: impl Into<String>) -> Self {
        self.config.subsystem = tag.into();
        self
    }

    /// Set the whole status encoding.
    #[must_use]
    pub fn encoding(mut self, encoding: StatusEncoding) -> Self {
        self.config.encoding = encoding;
        self
    }

    /// Set the locked code.
    #[must_use]
    pub fn locked_code(mut self, code: u32) -> Self {
        self.config.encoding.locked = code;
        self
    }

    /// Set the reference-lost code.
    #[must_use]
    pub fn reference_lost_code(mut self, code: u32) -> Self {
        self.config.encoding.reference_lost = code;
        self
    }

    /// Set the status assumed before the first poll.
    #[must_use]
    pub fn baseline(mut self, baseline: Baseline) -> Self {
        self.config.baseline = baseline;
        self
    }

    /// Build the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn build(self) -> PllMonitorResult<MonitorConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    #[test]
    fn test_default_config() -> TestResult {
        let config = MonitorConfig::default();
        assert_eq!(config.subsystem, "CLK");
        assert_eq!(config.encoding.locked, 0x1);
        assert_eq!(config.encoding.reference_lost, 0x3);
        assert_eq!(config.baseline, Baseline::Locked);
        config.validate()?;
        Ok(())
    }

    #[test]
    fn test_config_builder() -> TestResult {
        let config = MonitorConfig::builder()
            .subsystem("CLK0")
            .locked_code(0x0)
            .reference_lost_code(0x3)
            .baseline(Baseline::Unlocked { raw: 0x2 })
            .build()?;
        assert_eq!(config.subsystem, "CLK0");
        assert_eq!(config.encoding.locked, 0x0);
        assert_eq!(config.baseline, Baseline::Unlocked { raw: 0x2 });
        Ok(())
    }

    #[test]
    fn test_subsystem_validation() {
        let result = MonitorConfig::builder().subsystem("").build();
        assert!(matches!(
            result,
            Err(PllMonitorError::InvalidConfiguration(_))
        ));

        let result = MonitorConfig::builder().subsystem("CLK A").build();
        assert!(matches!(
            result,
            Err(PllMonitorError::InvalidConfiguration(_))
        ));

        let result = MonitorConfig::builder().subsystem("TAKT\u{e4}").build();
        assert!(matches!(
            result,
            Err(PllMonitorError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_subsystem_rejects_brackets() -> TestResult {
        for tag in ["CLK]", "[CLK", "CL[K]"] {
            let result = MonitorConfig::builder().subsystem(tag).build();
            assert!(
                matches!(result, Err(PllMonitorError::InvalidConfiguration(_))),
                "tag {tag:?} accepted"
            );
        }
        MonitorConfig::builder().subsystem("PLL_SYS-0").build()?;
        Ok(())
    }

    #[test]
    fn test_encoding_conflict_rejected() {
        let result = MonitorConfig::builder()
            .locked_code(0x3)
            .reference_lost_code(0x3)
            .build();
        assert_eq!(result, Err(PllMonitorError::EncodingConflict { code: 0x3 }));
    }

    #[test]
    fn test_unlocked_baseline_with_classified_code_rejected() {
        let result = MonitorConfig::builder()
            .baseline(Baseline::Unlocked { raw: 0x3 })
            .build();
        assert!(matches!(
            result,
            Err(PllMonitorError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_partial_json_fills_defaults() -> TestResult {
        let config: MonitorConfig =
            serde_json::from_str(r#"{ "subsystem": "PLL1", "encoding": { "locked": 0 } }"#)?;
        assert_eq!(config.subsystem, "PLL1");
        assert_eq!(config.encoding.locked, 0);
        assert_eq!(config.encoding.reference_lost, 0x3);
        assert_eq!(config.baseline, Baseline::Locked);
        config.validate()?;
        Ok(())
    }

    #[test]
    fn test_reference_lost_baseline_rejected_from_json() {
        let result = serde_json::from_str::<MonitorConfig>(r#"{ "baseline": "ReferenceLost" }"#);
        assert!(result.is_err_and(|e| e.to_string().contains("ReferenceLost")));
    }

    #[test]
    fn test_unlocked_baseline_from_json() -> TestResult {
        let config: MonitorConfig =
            serde_json::from_str(r#"{ "baseline": { "Unlocked": { "raw": 0 } } }"#)?;
        assert_eq!(config.baseline, Baseline::Unlocked { raw: 0 });
        Ok(())
    }
}
