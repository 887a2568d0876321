//! LED name parsing and canonical identity derivation
//!
//! A sysfs LED name is colon-delimited and can be any of
//!
//! - `devicename:color:function`
//! - `devicename::function` (e.g. `input9::capslock`)
//! - `color:function` (e.g. `red:fault`)
//! - `:function` (e.g. `:boot`)
//! - `color:` (e.g. `green:`)
//! - a bare label (e.g. `identify`)
//!
//! Nothing stops a vendor from exporting a label with extra colons
//! inside, so segments past the third are ignored rather than
//! rejected. Fields carry exactly what the raw name spelled out;
//! nothing is inferred.

use serde::Deserialize;

use crate::error::LedError;

/// Naming and write-ordering policy
///
/// Deployments historically disagreed on whether the device name joins
/// the external identity, whether short names are accepted, and
/// whether the timer trigger is selected before the delay attributes
/// are written. One explicit struct makes each choice configuration
/// instead of accident.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NamingPolicy {
    /// Prepend the device name to the canonical identity
    pub include_device_name: bool,
    /// Reject names with fewer than three segments
    pub strict_segment_count: bool,
    /// Select the timer trigger before writing the delay attributes.
    /// The kernel creates `delay_on`/`delay_off` only once the timer
    /// trigger is active, so `false` reproduces a historical ordering
    /// bug where the delay writes can be lost.
    pub write_trigger_before_delays: bool,
}

impl Default for NamingPolicy {
    fn default() -> Self {
        Self {
            include_device_name: false,
            strict_segment_count: false,
            write_trigger_before_delays: true,
        }
    }
}

/// Structured form of a raw sysfs LED name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LedDescriptor {
    pub device_name: String,
    pub color: String,
    pub function: String,
}

impl LedDescriptor {
    /// Parse a raw sysfs LED name
    ///
    /// Two-segment names are `color:function`, not
    /// `devicename:color`. Under a strict policy anything shorter
    /// than three segments is malformed; the default policy accepts
    /// bare labels so LEDs like `identify` still register.
    pub fn parse(raw: &str, policy: &NamingPolicy) -> Result<Self, LedError> {
        if raw.is_empty() {
            return Err(LedError::MalformedName(raw.to_string()));
        }

        let segments: Vec<&str> = raw.split(':').collect();
        match segments.as_slice() {
            [label] => {
                if policy.strict_segment_count {
                    return Err(LedError::MalformedName(raw.to_string()));
                }
                Ok(Self {
                    device_name: (*label).to_string(),
                    ..Self::default()
                })
            }
            [color, function] => {
                if policy.strict_segment_count {
                    return Err(LedError::MalformedName(raw.to_string()));
                }
                Ok(Self {
                    device_name: String::new(),
                    color: (*color).to_string(),
                    function: (*function).to_string(),
                })
            }
            [device_name, color, function, ..] => Ok(Self {
                device_name: (*device_name).to_string(),
                color: (*color).to_string(),
                function: (*function).to_string(),
            }),
            [] => Err(LedError::MalformedName(raw.to_string())),
        }
    }

    /// Derive the stable external identity for this LED
    ///
    /// Non-empty parts join with `_`, function before color; a bare
    /// label falls back to the device name alone.
    pub fn canonical_identity(&self, policy: &NamingPolicy) -> String {
        let mut parts: Vec<&str> = Vec::new();
        if policy.include_device_name && !self.device_name.is_empty() {
            parts.push(&self.device_name);
        }
        if !self.function.is_empty() {
            parts.push(&self.function);
        }
        if !self.color.is_empty() {
            parts.push(&self.color);
        }
        if parts.is_empty() {
            return self.device_name.clone();
        }
        parts.join("_")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(raw: &str) -> LedDescriptor {
        LedDescriptor::parse(raw, &NamingPolicy::default()).unwrap()
    }

    #[test]
    fn test_three_parts() {
        let d = parse("devicename:color:function");
        assert_eq!(d.device_name, "devicename");
        assert_eq!(d.color, "color");
        assert_eq!(d.function, "function");
    }

    #[test]
    fn test_four_parts_ignores_tail() {
        assert_eq!(parse("devicename:color:function:part4"), parse("devicename:color:function"));
    }

    #[test]
    fn test_two_parts_is_color_function() {
        let d = parse("red:fault");
        assert_eq!(d.device_name, "");
        assert_eq!(d.color, "red");
        assert_eq!(d.function, "fault");
    }

    #[test]
    fn test_two_parts_devicename_function() {
        let d = parse("input9::capslock");
        assert_eq!(d.device_name, "input9");
        assert_eq!(d.color, "");
        assert_eq!(d.function, "capslock");
    }

    #[test]
    fn test_bare_label() {
        let d = parse("identify");
        assert_eq!(d.device_name, "identify");
        assert_eq!(d.color, "");
        assert_eq!(d.function, "");
    }

    #[test]
    fn test_function_only() {
        let d = parse(":boot");
        assert_eq!(d.device_name, "");
        assert_eq!(d.color, "");
        assert_eq!(d.function, "boot");
    }

    #[test]
    fn test_color_only() {
        let d = parse("green:");
        assert_eq!(d.device_name, "");
        assert_eq!(d.color, "green");
        assert_eq!(d.function, "");
    }

    #[test]
    fn test_empty_name_is_malformed() {
        assert!(matches!(
            LedDescriptor::parse("", &NamingPolicy::default()),
            Err(LedError::MalformedName(_))
        ));
    }

    #[test]
    fn test_strict_policy_rejects_short_names() {
        let strict = NamingPolicy {
            strict_segment_count: true,
            ..NamingPolicy::default()
        };
        assert!(LedDescriptor::parse("identify", &strict).is_err());
        assert!(LedDescriptor::parse("red:fault", &strict).is_err());
        assert!(LedDescriptor::parse("enclosure:red:fault", &strict).is_ok());
    }

    #[test]
    fn test_identity_function_before_color() {
        let policy = NamingPolicy::default();
        assert_eq!(parse("enclosure:green:power").canonical_identity(&policy), "power_green");
        assert_eq!(parse("red:fault").canonical_identity(&policy), "fault_red");
        assert_eq!(parse("green:").canonical_identity(&policy), "green");
        assert_eq!(parse(":boot").canonical_identity(&policy), "boot");
    }

    #[test]
    fn test_identity_falls_back_to_device_name() {
        let policy = NamingPolicy::default();
        assert_eq!(parse("identify").canonical_identity(&policy), "identify");
    }

    #[test]
    fn test_identity_with_device_name_prefix() {
        let policy = NamingPolicy {
            include_device_name: true,
            ..NamingPolicy::default()
        };
        assert_eq!(
            parse("enclosure:green:power").canonical_identity(&policy),
            "enclosure_power_green"
        );
    }
}
