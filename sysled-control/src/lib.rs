//! LED state machines and discovery-driven registration for Linux LED
//! class devices
//!
//! Layering mirrors the hardware crate split: `sysled-hal` moves bytes
//! in and out of the control attributes, this crate decides what to
//! write and when.
//!
//! - [`name`] turns raw colon-delimited sysfs names into structured
//!   descriptors and stable canonical identities, governed by an
//!   explicit [`NamingPolicy`].
//! - [`physical`] is the per-LED state machine: Off, On, and Blink
//!   requests become ordered attribute write sequences, and a
//!   read-only startup sync adopts whatever the hardware was already
//!   doing.
//! - [`registry`] owns every LED, deduplicates discovery events, and
//!   is the call surface a host bus layer dispatches onto.
//! - [`config`] is the host-supplied service configuration.
//!
//! The whole crate is single-threaded and blocking by design; the
//! only async-adjacent piece is the broadcast channel carrying
//! [`LedEvent`] notifications out to the host.

pub mod config;
pub mod error;
pub mod name;
pub mod physical;
pub mod registry;

pub use config::ServiceConfig;
pub use error::LedError;
pub use name::{LedDescriptor, NamingPolicy};
pub use physical::{Action, LedEvent, Palette, PhysicalLed, DEFAULT_DUTY_ON, DEFAULT_PERIOD_MS};
pub use registry::{AddOutcome, LedRecord, LedRegistry};
