//! Per-LED state machine over a hardware port
//!
//! A [`PhysicalLed`] owns one [`LedPort`] and translates requested
//! actions into the correct sequence of attribute writes. On and Off
//! are static brightness writes with the trigger cleared; Blink hands
//! the LED to the kernel timer trigger with delays derived from the
//! configured duty cycle and period.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::broadcast;
use tracing::debug;

use sysled_hal::LedPort;

use crate::error::LedError;
use crate::name::NamingPolicy;

/// Trigger selecting static brightness control
const TRIGGER_NONE: &str = "none";
/// Trigger handing the LED to the kernel timer driver
const TRIGGER_TIMER: &str = "timer";

/// Brightness written for the Off state
const DEASSERT: u32 = 0;

/// Blink period adopted when hardware reports none
pub const DEFAULT_PERIOD_MS: u64 = 1000;
/// Default illuminated fraction of the blink period, in percent
pub const DEFAULT_DUTY_ON: u8 = 50;

/// Externally requested operating mode of one LED
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Off,
    On,
    Blink,
}

/// Informational color tag, set once at construction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Palette {
    #[default]
    Unknown,
    Red,
    Green,
    Blue,
    Yellow,
}

impl Palette {
    /// Map a color hint onto the palette
    ///
    /// Unrecognized hints yield `None` so the caller keeps the
    /// default instead of failing construction.
    pub fn from_hint(hint: &str) -> Option<Self> {
        match hint.to_ascii_lowercase().as_str() {
            "red" => Some(Self::Red),
            "green" => Some(Self::Green),
            "blue" => Some(Self::Blue),
            "yellow" => Some(Self::Yellow),
            _ => None,
        }
    }
}

/// Property-change notifications emitted toward the host bus layer
#[derive(Debug, Clone)]
pub enum LedEvent {
    /// A registered LED adopted a new action
    ActionChanged {
        object_path: String,
        action: Action,
    },
    /// A LED finished registration and is externally visible
    LedAdded { object_path: String },
}

/// State machine for one hardware-backed LED
pub struct PhysicalLed {
    port: Box<dyn LedPort>,
    object_path: String,
    action: Action,
    duty_on: u8,
    period_ms: u64,
    color: Palette,
    max_brightness: u32,
    policy: NamingPolicy,
    lamp_test: Arc<AtomicBool>,
    events: broadcast::Sender<LedEvent>,
}

impl PhysicalLed {
    /// Bind a state machine to a hardware port
    ///
    /// Runs the read-only startup synchronization so the machine
    /// adopts whatever the hardware is already doing; the registry
    /// only exposes the LED once this has returned.
    pub fn new(
        port: Box<dyn LedPort>,
        object_path: String,
        color_hint: Option<&str>,
        default_period_ms: u64,
        policy: NamingPolicy,
        lamp_test: Arc<AtomicBool>,
        events: broadcast::Sender<LedEvent>,
    ) -> Result<Self, LedError> {
        let max_brightness = port.max_brightness()?;
        let mut led = Self {
            port,
            object_path,
            action: Action::Off,
            duty_on: DEFAULT_DUTY_ON,
            period_ms: default_period_ms,
            color: color_hint.and_then(Palette::from_hint).unwrap_or_default(),
            max_brightness,
            policy,
            lamp_test,
            events,
        };
        led.sync_initial_state()?;
        Ok(led)
    }

    /// Adopt the state the hardware is already in, without writing.
    ///
    /// An LED left blinking across a service restart keeps blinking;
    /// resetting it just to observe it would glitch the indicator.
    fn sync_initial_state(&mut self) -> Result<(), LedError> {
        if self.port.trigger()? == TRIGGER_TIMER {
            let delay_on = self.port.delay_on()?;
            let delay_off = self.port.delay_off()?;
            let period = delay_on + delay_off;
            if period > 0 {
                self.period_ms = period;
                self.duty_on = (delay_on * 100 / period) as u8;
            }
            self.action = Action::Blink;
        } else {
            let brightness = self.port.brightness()?;
            self.action = if brightness == self.max_brightness {
                Action::On
            } else {
                Action::Off
            };
        }
        debug!(path = %self.object_path, action = ?self.action, "adopted hardware state");
        Ok(())
    }

    /// External object path this LED is exposed under
    pub fn object_path(&self) -> &str {
        &self.object_path
    }

    /// Currently requested operating mode
    pub fn action(&self) -> Action {
        self.action
    }

    /// Request a new operating mode
    ///
    /// The visible action adopts the request before the hardware
    /// writes run, so a failed write returns an error while the
    /// property stays at the requested value. Requesting the current
    /// mode touches no hardware.
    pub fn set_action(&mut self, requested: Action) -> Result<Action, LedError> {
        if self.action == requested {
            return Ok(self.action);
        }
        self.action = requested;
        self.drive_led(requested)?;
        self.notify_action_changed();
        Ok(self.action)
    }

    /// Illuminated fraction of the blink period, in percent
    pub fn duty_on(&self) -> u8 {
        self.duty_on
    }

    /// Set the illuminated fraction of the blink period
    ///
    /// Takes effect at the next blink operation. Values above 100
    /// (including negative inputs wrapped to large unsigned values by
    /// the caller) are rejected and the prior value is kept.
    pub fn set_duty_on(&mut self, percent: u8) -> Result<(), LedError> {
        if percent > 100 {
            return Err(LedError::InvalidParameter(format!(
                "duty cycle {percent}% outside 0-100"
            )));
        }
        self.duty_on = percent;
        Ok(())
    }

    /// Blink period in milliseconds
    pub fn period_ms(&self) -> u64 {
        self.period_ms
    }

    /// Informational color tag
    pub fn color(&self) -> Palette {
        self.color
    }

    fn drive_led(&mut self, requested: Action) -> Result<(), LedError> {
        match requested {
            Action::On | Action::Off => self.stable_state_operation(requested),
            Action::Blink => self.blink_operation(),
        }
    }

    /// Produce a non-blinking On or Off LED.
    ///
    /// The trigger is cleared first so a stale timer driver cannot
    /// override the brightness write.
    fn stable_state_operation(&mut self, action: Action) -> Result<(), LedError> {
        self.port.set_trigger(TRIGGER_NONE)?;
        let brightness = if action == Action::On {
            self.max_brightness
        } else {
            DEASSERT
        };
        self.port.set_brightness(brightness)?;
        Ok(())
    }

    /// Hand the LED to the kernel timer driver at the configured duty.
    fn blink_operation(&mut self) -> Result<(), LedError> {
        let factor = self.period_ms / 100;
        let delay_on = u64::from(self.duty_on) * factor;
        let delay_off = u64::from(100 - self.duty_on) * factor;

        if self.policy.write_trigger_before_delays {
            self.port.set_trigger(TRIGGER_TIMER)?;
            self.port.set_delay_on(delay_on)?;
            self.port.set_delay_off(delay_off)?;
        } else {
            // Historical ordering: the delay files do not exist until
            // the timer trigger is active, so these writes can be lost.
            self.port.set_delay_on(delay_on)?;
            self.port.set_delay_off(delay_off)?;
            self.port.set_trigger(TRIGGER_TIMER)?;
        }
        Ok(())
    }

    fn notify_action_changed(&self) {
        if self.lamp_test.load(Ordering::Relaxed) {
            debug!(path = %self.object_path, "lamp test running, change signal suppressed");
            return;
        }
        // No receivers is fine; the host layer subscribes lazily.
        let _ = self.events.send(LedEvent::ActionChanged {
            object_path: self.object_path.clone(),
            action: self.action,
        });
    }
}
