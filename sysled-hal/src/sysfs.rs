//! Sysfs-backed LED control attributes

use std::fmt::Display;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use tracing::trace;

use crate::error::PortError;
use crate::LedPort;

/// Attribute file names under a LED device root
const BRIGHTNESS: &str = "brightness";
const MAX_BRIGHTNESS: &str = "max_brightness";
const TRIGGER: &str = "trigger";
const DELAY_ON: &str = "delay_on";
const DELAY_OFF: &str = "delay_off";

/// One LED class device directory
///
/// Every accessor opens the attribute file directly; the kernel is the
/// only source of truth and nothing is cached between calls.
pub struct SysfsLed {
    root: PathBuf,
}

impl SysfsLed {
    /// Bind to a device root, e.g. `/sys/class/leds/enclosure:green:power`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Device root this port operates on
    pub fn path(&self) -> &Path {
        &self.root
    }

    fn read_attr(&self, attr: &'static str) -> Result<String, PortError> {
        let path = self.root.join(attr);
        let content = fs::read_to_string(&path).map_err(|source| PortError::AttributeRead {
            attr,
            path: path.clone(),
            source,
        })?;
        Ok(content.trim().to_string())
    }

    fn read_num<T: FromStr>(&self, attr: &'static str) -> Result<T, PortError> {
        let raw = self.read_attr(attr)?;
        match raw.parse::<T>() {
            Ok(value) => Ok(value),
            Err(_) => Err(PortError::AttributeParse {
                attr,
                path: self.root.join(attr),
                value: raw,
            }),
        }
    }

    fn write_attr(&self, attr: &'static str, value: impl Display) -> Result<(), PortError> {
        let path = self.root.join(attr);
        trace!(path = %path.display(), %value, "sysfs write");
        fs::write(&path, value.to_string()).map_err(|source| PortError::AttributeWrite {
            attr,
            path,
            source,
        })
    }
}

/// Pick the active trigger out of the kernel's list format.
///
/// The trigger file lists every available trigger with brackets around
/// the active one, e.g. `none [timer] oneshot`. A single bare token is
/// taken as-is since that is what this service writes back itself.
fn active_trigger(raw: &str) -> String {
    let tokens: Vec<&str> = raw.split_whitespace().collect();
    if let Some(active) = tokens
        .iter()
        .find_map(|t| t.strip_prefix('[').and_then(|t| t.strip_suffix(']')))
    {
        return active.to_string();
    }
    match tokens.as_slice() {
        [single] => (*single).to_string(),
        _ => "none".to_string(),
    }
}

impl LedPort for SysfsLed {
    fn brightness(&self) -> Result<u32, PortError> {
        self.read_num(BRIGHTNESS)
    }

    fn set_brightness(&mut self, value: u32) -> Result<(), PortError> {
        self.write_attr(BRIGHTNESS, value)
    }

    fn max_brightness(&self) -> Result<u32, PortError> {
        self.read_num(MAX_BRIGHTNESS)
    }

    fn trigger(&self) -> Result<String, PortError> {
        Ok(active_trigger(&self.read_attr(TRIGGER)?))
    }

    fn set_trigger(&mut self, trigger: &str) -> Result<(), PortError> {
        self.write_attr(TRIGGER, trigger)
    }

    fn delay_on(&self) -> Result<u64, PortError> {
        self.read_num(DELAY_ON)
    }

    fn set_delay_on(&mut self, ms: u64) -> Result<(), PortError> {
        self.write_attr(DELAY_ON, ms)
    }

    fn delay_off(&self) -> Result<u64, PortError> {
        self.read_num(DELAY_OFF)
    }

    fn set_delay_off(&mut self, ms: u64) -> Result<(), PortError> {
        self.write_attr(DELAY_OFF, ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const MAX_BRIGHTNESS_VAL: u32 = 128;

    /// Build a fake LED device directory with the usual attribute set.
    fn fake_led() -> (TempDir, SysfsLed) {
        let dir = TempDir::new().unwrap();
        for attr in [BRIGHTNESS, TRIGGER, DELAY_ON, DELAY_OFF] {
            fs::write(dir.path().join(attr), "0").unwrap();
        }
        fs::write(
            dir.path().join(MAX_BRIGHTNESS),
            MAX_BRIGHTNESS_VAL.to_string(),
        )
        .unwrap();
        let led = SysfsLed::new(dir.path());
        (dir, led)
    }

    #[test]
    fn test_brightness_round_trip() {
        let (_dir, mut led) = fake_led();
        led.set_brightness(127).unwrap();
        assert_eq!(led.brightness().unwrap(), 127);
    }

    #[test]
    fn test_max_brightness() {
        let (_dir, led) = fake_led();
        assert_eq!(led.max_brightness().unwrap(), MAX_BRIGHTNESS_VAL);
    }

    #[test]
    fn test_trigger_round_trip() {
        let (_dir, mut led) = fake_led();
        led.set_trigger("timer").unwrap();
        assert_eq!(led.trigger().unwrap(), "timer");
    }

    #[test]
    fn test_trigger_bracket_list() {
        let (dir, led) = fake_led();
        fs::write(dir.path().join(TRIGGER), "none [timer] oneshot\n").unwrap();
        assert_eq!(led.trigger().unwrap(), "timer");

        fs::write(dir.path().join(TRIGGER), "[none] timer oneshot\n").unwrap();
        assert_eq!(led.trigger().unwrap(), "none");
    }

    #[test]
    fn test_trigger_garbage_defaults_to_none() {
        let (dir, led) = fake_led();
        fs::write(dir.path().join(TRIGGER), "timer oneshot heartbeat\n").unwrap();
        assert_eq!(led.trigger().unwrap(), "none");
    }

    #[test]
    fn test_delay_round_trips() {
        let (_dir, mut led) = fake_led();
        led.set_delay_on(250).unwrap();
        led.set_delay_off(750).unwrap();
        assert_eq!(led.delay_on().unwrap(), 250);
        assert_eq!(led.delay_off().unwrap(), 750);
    }

    #[test]
    fn test_missing_attribute_is_read_error() {
        let dir = TempDir::new().unwrap();
        let led = SysfsLed::new(dir.path());
        assert!(matches!(
            led.brightness(),
            Err(PortError::AttributeRead { attr: "brightness", .. })
        ));
    }

    #[test]
    fn test_garbage_attribute_is_parse_error() {
        let (dir, led) = fake_led();
        fs::write(dir.path().join(BRIGHTNESS), "not-a-number\n").unwrap();
        assert!(matches!(
            led.brightness(),
            Err(PortError::AttributeParse { attr: "brightness", .. })
        ));
    }

    #[test]
    fn test_unwritable_attribute_is_write_error() {
        let dir = TempDir::new().unwrap();
        let mut led = SysfsLed::new(dir.path().join("gone"));
        assert!(matches!(
            led.set_brightness(1),
            Err(PortError::AttributeWrite { attr: "brightness", .. })
        ));
    }
}
