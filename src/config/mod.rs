//! Configuration model for dialplan.
//!
//! This module defines the ProvisionConfig struct that represents a
//! provisioning YAML file. It supports forward-compatible YAML parsing
//! (unknown fields are ignored), sensible defaults for optional fields,
//! and validation of config values.

mod model;
mod operations;
pub mod types;


// Re-export public API
pub use model::ProvisionConfig;
pub use types::{
    CallFlowAction, CallFlowSpec, Greeting, HolidayEntry, PhoneNumberType, QueuePolicy, TimeRange,
    WeeklySchedule,
};
