//! Discovery-driven LED registration
//!
//! The registry is the single owner of every [`PhysicalLed`] and the
//! sole authority over canonical identities. Discovery notifications,
//! explicit add calls, and configuration-service records all funnel
//! into the same pipeline: parse, check the device exists, dedup,
//! construct, expose.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::Deserialize;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use sysled_hal::SysfsLed;

use crate::config::ServiceConfig;
use crate::error::LedError;
use crate::name::LedDescriptor;
use crate::physical::{LedEvent, PhysicalLed};

/// Capacity of the property-change broadcast channel
const EVENT_CHANNEL_CAPACITY: usize = 16;

/// Result of feeding one raw name through the registration pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    /// A new LED object was created under this identity
    Registered(String),
    /// The identity already had an object; nothing was created
    AlreadyRegistered(String),
}

/// Property-bag record delivered by the configuration service
///
/// Field names match the wire shape of the external record; only the
/// device name is mandatory.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LedRecord {
    #[serde(rename = "DeviceName")]
    pub device_name: String,
    #[serde(rename = "Color", default)]
    pub color: String,
    #[serde(rename = "Function", default)]
    pub function: String,
}

impl LedRecord {
    /// Reassemble the raw sysfs name shape the parser expects
    fn raw_name(&self) -> String {
        format!("{}:{}:{}", self.device_name, self.color, self.function)
    }
}

/// Owner of every registered LED, keyed by canonical identity
pub struct LedRegistry {
    config: ServiceConfig,
    leds: HashMap<String, PhysicalLed>,
    lamp_test: Arc<AtomicBool>,
    events: broadcast::Sender<LedEvent>,
}

impl LedRegistry {
    pub fn new(config: ServiceConfig) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            config,
            leds: HashMap::new(),
            lamp_test: Arc::new(AtomicBool::new(false)),
            events,
        }
    }

    /// Subscribe to property-change and registration events
    pub fn subscribe(&self) -> broadcast::Receiver<LedEvent> {
        self.events.subscribe()
    }

    /// Handle one discovery notification
    ///
    /// Bad events are logged and dropped so a single malformed or
    /// racing notification never halts the discovery stream.
    pub fn handle_discovered(&mut self, raw_name: &str) {
        match self.add_led(raw_name) {
            Ok(AddOutcome::Registered(identity)) => {
                info!(led = raw_name, identity, "registered LED");
            }
            Ok(AddOutcome::AlreadyRegistered(identity)) => {
                debug!(led = raw_name, identity, "duplicate discovery ignored");
            }
            Err(err) => {
                warn!(led = raw_name, error = %err, "dropping discovery event");
            }
        }
    }

    /// Explicit add-by-name entry point
    ///
    /// Same pipeline as [`handle_discovered`](Self::handle_discovered),
    /// but the outcome is returned so the host layer can answer its
    /// caller.
    pub fn add_led(&mut self, raw_name: &str) -> Result<AddOutcome, LedError> {
        let descriptor = LedDescriptor::parse(raw_name, &self.config.policy)?;

        // The device directory is keyed by the raw name, not the
        // parsed form.
        let device_root = self.config.class_root.join(raw_name);
        if !device_root.exists() {
            // Discovery can outrun device node creation; the external
            // caller is free to retry once the node shows up.
            return Err(LedError::DeviceNotFound(device_root));
        }

        let identity = descriptor.canonical_identity(&self.config.policy);
        if self.leds.contains_key(&identity) {
            return Ok(AddOutcome::AlreadyRegistered(identity));
        }

        let object_path = self.object_path(&descriptor, &identity);
        let color_hint = (!descriptor.color.is_empty()).then_some(descriptor.color.as_str());
        let led = PhysicalLed::new(
            Box::new(SysfsLed::new(device_root)),
            object_path.clone(),
            color_hint,
            self.config.default_period_ms,
            self.config.policy,
            Arc::clone(&self.lamp_test),
            self.events.clone(),
        )?;

        self.leds.insert(identity.clone(), led);
        let _ = self.events.send(LedEvent::LedAdded { object_path });
        Ok(AddOutcome::Registered(identity))
    }

    /// Configuration-service entry point
    ///
    /// Assembles the record back into the `device:color:function`
    /// shape and funnels it through the discovery pipeline.
    pub fn handle_config_record(&mut self, record: &LedRecord) {
        if record.device_name.is_empty() {
            warn!("configuration record without device name, ignoring");
            return;
        }
        self.handle_discovered(&record.raw_name());
    }

    /// Deregistration placeholder
    ///
    /// Accepted for interface completeness; removing a registered LED
    /// is not implemented.
    pub fn remove_led(&mut self, raw_name: &str) {
        warn!(led = raw_name, "RemoveLed requested, deregistration not implemented");
    }

    /// Assert or deassert the lamp-test flag observed by every LED
    pub fn set_lamp_test(&self, running: bool) {
        self.lamp_test.store(running, Ordering::Relaxed);
    }

    /// Whether the lamp test is currently asserted
    pub fn lamp_test_running(&self) -> bool {
        self.lamp_test.load(Ordering::Relaxed)
    }

    /// Look up a registered LED by canonical identity
    pub fn get(&self, identity: &str) -> Option<&PhysicalLed> {
        self.leds.get(identity)
    }

    /// Mutable lookup for property setters dispatched by the host
    pub fn get_mut(&mut self, identity: &str) -> Option<&mut PhysicalLed> {
        self.leds.get_mut(identity)
    }

    /// Canonical identities of every registered LED
    pub fn identities(&self) -> impl Iterator<Item = &str> {
        self.leds.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.leds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.leds.is_empty()
    }

    fn object_path(&self, descriptor: &LedDescriptor, identity: &str) -> String {
        let mut path = self.config.object_root.clone();
        if !descriptor.device_name.is_empty() {
            path.push('/');
            path.push_str(&descriptor.device_name);
        }
        path.push('/');
        path.push_str(identity);
        path
    }
}
