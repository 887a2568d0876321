//! Service configuration

use std::path::PathBuf;

use serde::Deserialize;

use crate::name::NamingPolicy;
use crate::physical::DEFAULT_PERIOD_MS;

/// Sysfs directory the kernel exports LED class devices under
const DEFAULT_CLASS_ROOT: &str = "/sys/class/leds";
/// External object path prefix for registered LEDs
const DEFAULT_OBJECT_ROOT: &str = "/org/sysled/led";

/// Host-supplied service configuration
///
/// Every field has a working default; a host process can run the
/// registry with `ServiceConfig::default()` or ship a partial TOML
/// file and let the rest fill in.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Directory LED device directories appear in
    pub class_root: PathBuf,
    /// External object path prefix registered LEDs are minted under
    pub object_root: String,
    /// Blink period adopted when hardware reports none, in ms
    pub default_period_ms: u64,
    /// Naming and write-ordering policy
    pub policy: NamingPolicy,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            class_root: PathBuf::from(DEFAULT_CLASS_ROOT),
            object_root: DEFAULT_OBJECT_ROOT.to_string(),
            default_period_ms: DEFAULT_PERIOD_MS,
            policy: NamingPolicy::default(),
        }
    }
}

impl ServiceConfig {
    /// Parse a TOML configuration document; absent keys keep their
    /// defaults.
    pub fn from_toml_str(raw: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServiceConfig::default();
        assert_eq!(config.class_root, PathBuf::from("/sys/class/leds"));
        assert_eq!(config.object_root, "/org/sysled/led");
        assert_eq!(config.default_period_ms, 1000);
        assert!(config.policy.write_trigger_before_delays);
        assert!(!config.policy.strict_segment_count);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = ServiceConfig::from_toml_str(
            r#"
            class_root = "/tmp/leds"

            [policy]
            include_device_name = true
            "#,
        )
        .unwrap();
        assert_eq!(config.class_root, PathBuf::from("/tmp/leds"));
        assert_eq!(config.object_root, "/org/sysled/led");
        assert!(config.policy.include_device_name);
        assert!(config.policy.write_trigger_before_delays);
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config = ServiceConfig::from_toml_str("").unwrap();
        assert_eq!(config.default_period_ms, 1000);
    }
}
