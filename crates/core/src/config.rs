//! Core runtime configuration.
//!
//! This module defines configuration that should be resolved once at process startup and then
//! passed into the symptom checker. The core never reads environment variables itself; binaries
//! collect the raw values and hand them to [`from_env_values`].

use crate::constants::{
    DEFAULT_EMERGENCY_LOCATION, DEFAULT_EMERGENCY_PHONE, DEFAULT_EMERGENCY_SERVICES,
    DEFAULT_EXCERPT_CHARS, DEFAULT_FACILITY_NAME,
};
use crate::{IntakeError, IntakeResult};

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    facility_name: String,
    emergency_location: String,
    emergency_phone: String,
    emergency_services: String,
    excerpt_chars: usize,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            facility_name: DEFAULT_FACILITY_NAME.into(),
            emergency_location: DEFAULT_EMERGENCY_LOCATION.into(),
            emergency_phone: DEFAULT_EMERGENCY_PHONE.into(),
            emergency_services: DEFAULT_EMERGENCY_SERVICES.into(),
            excerpt_chars: DEFAULT_EXCERPT_CHARS,
        }
    }
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// # Errors
    ///
    /// Returns [`IntakeError::InvalidConfig`] if `facility_name` is blank or `excerpt_chars`
    /// is zero.
    pub fn new(
        facility_name: String,
        emergency_location: String,
        emergency_phone: String,
        excerpt_chars: usize,
    ) -> IntakeResult<Self> {
        if facility_name.trim().is_empty() {
            return Err(IntakeError::InvalidConfig(
                "facility_name cannot be empty".into(),
            ));
        }
        if excerpt_chars == 0 {
            return Err(IntakeError::InvalidConfig(
                "excerpt_chars must be greater than zero".into(),
            ));
        }

        Ok(Self {
            facility_name,
            emergency_location,
            emergency_phone,
            emergency_services: DEFAULT_EMERGENCY_SERVICES.into(),
            excerpt_chars,
        })
    }

    /// Replace the emergency-services line named in the emergency template's call-to-action.
    pub fn with_emergency_services(mut self, emergency_services: String) -> Self {
        self.emergency_services = emergency_services;
        self
    }

    pub fn facility_name(&self) -> &str {
        &self.facility_name
    }

    pub fn emergency_location(&self) -> &str {
        &self.emergency_location
    }

    pub fn emergency_phone(&self) -> &str {
        &self.emergency_phone
    }

    pub fn emergency_services(&self) -> &str {
        &self.emergency_services
    }

    pub fn excerpt_chars(&self) -> usize {
        self.excerpt_chars
    }
}

/// Raw, optional values as read from the environment by a binary.
#[derive(Clone, Debug, Default)]
pub struct EnvValues {
    pub facility_name: Option<String>,
    pub emergency_location: Option<String>,
    pub emergency_phone: Option<String>,
    pub emergency_services: Option<String>,
    pub excerpt_chars: Option<String>,
}

/// Build a [`CoreConfig`] from optional string values.
///
/// Missing or whitespace-only values fall back to the defaults.
pub fn from_env_values(values: EnvValues) -> IntakeResult<CoreConfig> {
    fn non_blank(value: Option<String>) -> Option<String> {
        value
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    let defaults = CoreConfig::default();
    let excerpt_chars = non_blank(values.excerpt_chars)
        .map(|v| {
            v.parse::<usize>().map_err(|_| {
                IntakeError::InvalidConfig(format!("excerpt_chars is not a number: '{v}'"))
            })
        })
        .transpose()?
        .unwrap_or(defaults.excerpt_chars);

    let cfg = CoreConfig::new(
        non_blank(values.facility_name).unwrap_or(defaults.facility_name),
        non_blank(values.emergency_location).unwrap_or(defaults.emergency_location),
        non_blank(values.emergency_phone).unwrap_or(defaults.emergency_phone),
        excerpt_chars,
    )?;
    Ok(cfg.with_emergency_services(
        non_blank(values.emergency_services).unwrap_or(defaults.emergency_services),
    ))
}
