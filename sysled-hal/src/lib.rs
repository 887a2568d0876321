//! Hardware access layer for Linux LED class devices
//!
//! The kernel exports each LED under `/sys/class/leds/<name>/` as a
//! small set of control attribute files. This crate wraps one such
//! device directory behind the [`LedPort`] trait:
//!
//! - `brightness` / `max_brightness`: static drive level
//! - `trigger`: which kernel driver owns the LED (`none`, `timer`, ...)
//! - `delay_on` / `delay_off`: timer trigger cycle times in ms
//!
//! Reads and writes are synchronous, local filesystem operations with
//! no caching and no retries; a failure surfaces immediately as a
//! [`PortError`].

pub mod error;
pub mod sysfs;

pub use error::PortError;
pub use sysfs::SysfsLed;

/// Capability set over one LED's control attributes
///
/// [`SysfsLed`] is the production implementation. Higher layers hold a
/// `Box<dyn LedPort>` so tests can substitute a double that records
/// writes instead of touching hardware. A port is owned by exactly one
/// consumer and is not safe for concurrent access.
pub trait LedPort: Send {
    /// Current drive level
    fn brightness(&self) -> Result<u32, PortError>;

    /// Set the drive level
    fn set_brightness(&mut self, value: u32) -> Result<(), PortError>;

    /// Largest value `brightness` accepts
    fn max_brightness(&self) -> Result<u32, PortError>;

    /// Active trigger name
    fn trigger(&self) -> Result<String, PortError>;

    /// Select a trigger
    fn set_trigger(&mut self, trigger: &str) -> Result<(), PortError>;

    /// Illuminated time per blink cycle, in milliseconds
    fn delay_on(&self) -> Result<u64, PortError>;

    /// Set the illuminated time per blink cycle
    fn set_delay_on(&mut self, ms: u64) -> Result<(), PortError>;

    /// Dark time per blink cycle, in milliseconds
    fn delay_off(&self) -> Result<u64, PortError>;

    /// Set the dark time per blink cycle
    fn set_delay_off(&mut self, ms: u64) -> Result<(), PortError>;
}
