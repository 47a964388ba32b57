//! Configuration types and defaults for dialplan.
//!
//! This module defines the call-flow, queue-policy, schedule and holiday
//! types used by the ProvisionConfig struct, together with the default
//! value functions and well-known platform identifiers.

use chrono::{Days, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// Default overflow threshold in concurrent calls.
pub const DEFAULT_OVERFLOW_THRESHOLD: u32 = 15;

/// Default timeout threshold in seconds.
pub const DEFAULT_TIMEOUT_SECONDS: u32 = 30;

/// Lower bound for the timeout threshold in seconds.
pub const MIN_TIMEOUT_SECONDS: u32 = 15;

/// Greeting played at the top of a call flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Greeting {
    /// No greeting fragment is emitted.
    #[default]
    None,
    /// Play an uploaded audio file by its id.
    AudioFile { id: String },
    /// Speak a text-to-speech prompt.
    TextToSpeech { prompt: String },
}

/// What happens to a call after the greeting, and on queue policy triggers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CallFlowAction {
    /// Terminate the call.
    #[default]
    Disconnect,
    /// Terminate the call with a busy signal (queue overflow default).
    DisconnectWithBusy,
    /// Transfer to a user, resource account, or application endpoint.
    TransferToTarget { target: String },
    /// Transfer to voicemail (shared or personal, decided by target shape).
    TransferToVoicemail { target: String },
}

/// One call flow: greeting plus follow-up action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CallFlowSpec {
    #[serde(with = "serde_yaml::with::singleton_map")]
    pub greeting: Greeting,
    #[serde(with = "serde_yaml::with::singleton_map")]
    pub action: CallFlowAction,
}

/// Queue exception policy (overflow, timeout, no agents).
///
/// An unset threshold falls back to the per-policy default; an unset action
/// falls back to the per-policy default behavior. The no-agents policy has
/// no threshold and its default is to keep the call queued.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct QueuePolicy {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threshold: Option<u32>,

    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "serde_yaml::with::singleton_map"
    )]
    pub action: Option<CallFlowAction>,
}

impl QueuePolicy {
    /// Threshold for the overflow policy, in calls.
    pub fn overflow_threshold(&self) -> u32 {
        self.threshold.unwrap_or(DEFAULT_OVERFLOW_THRESHOLD)
    }

    /// Threshold for the timeout policy, in seconds.
    ///
    /// Values below the platform minimum are clamped up to it.
    pub fn timeout_seconds(&self) -> u32 {
        self.threshold
            .unwrap_or(DEFAULT_TIMEOUT_SECONDS)
            .max(MIN_TIMEOUT_SECONDS)
    }
}

/// How the phone number is assigned to the auto attendant's account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PhoneNumberType {
    #[default]
    CallingPlan,
    DirectRouting,
    OperatorConnect,
}

impl PhoneNumberType {
    /// Parse a phone number type from a string.
    ///
    /// Accepts both the YAML form (`direct_routing`) and the tabular-import
    /// form (`DirectRouting`).
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "calling_plan" | "CallingPlan" => Some(Self::CallingPlan),
            "direct_routing" | "DirectRouting" => Some(Self::DirectRouting),
            "operator_connect" | "OperatorConnect" => Some(Self::OperatorConnect),
            _ => None,
        }
    }

    /// The value expected by the number-assignment cmdlet.
    pub fn as_cmdlet_value(&self) -> &'static str {
        match self {
            Self::CallingPlan => "CallingPlan",
            Self::DirectRouting => "DirectRouting",
            Self::OperatorConnect => "OperatorConnect",
        }
    }
}

/// An opening-hours window within one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    #[serde(with = "hhmm")]
    pub start: NaiveTime,

    #[serde(with = "hhmm")]
    pub end: NaiveTime,
}

/// Opening hours per weekday. A day with no ranges is closed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct WeeklySchedule {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub monday: Vec<TimeRange>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tuesday: Vec<TimeRange>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub wednesday: Vec<TimeRange>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub thursday: Vec<TimeRange>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub friday: Vec<TimeRange>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub saturday: Vec<TimeRange>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sunday: Vec<TimeRange>,
}

impl WeeklySchedule {
    /// Fill Monday through Friday with the same ranges; weekend closed.
    pub fn business_days(ranges: Vec<TimeRange>) -> Self {
        WeeklySchedule {
            monday: ranges.clone(),
            tuesday: ranges.clone(),
            wednesday: ranges.clone(),
            thursday: ranges.clone(),
            friday: ranges,
            ..Default::default()
        }
    }

    /// All seven days in order with their cmdlet parameter day names.
    pub fn days(&self) -> [(&'static str, &[TimeRange]); 7] {
        [
            ("Monday", self.monday.as_slice()),
            ("Tuesday", self.tuesday.as_slice()),
            ("Wednesday", self.wednesday.as_slice()),
            ("Thursday", self.thursday.as_slice()),
            ("Friday", self.friday.as_slice()),
            ("Saturday", self.saturday.as_slice()),
            ("Sunday", self.sunday.as_slice()),
        ]
    }

    /// True when no day has any opening hours.
    pub fn is_empty(&self) -> bool {
        self.days().iter().all(|(_, ranges)| ranges.is_empty())
    }
}

/// One holiday closure, possibly spanning several days.
///
/// Display text is derived on demand via [`HolidayEntry::label`], never
/// stored alongside the dates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayEntry {
    pub date: chrono::NaiveDate,

    #[serde(with = "hhmm")]
    pub time: NaiveTime,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<chrono::NaiveDate>,

    #[serde(default, skip_serializing_if = "Option::is_none", with = "hhmm_opt")]
    pub end_time: Option<NaiveTime>,
}

impl HolidayEntry {
    /// Start of the closure.
    pub fn start(&self) -> NaiveDateTime {
        self.date.and_time(self.time)
    }

    /// End of the closure.
    ///
    /// Defaults: no end date and no end time means midnight of the following
    /// day; an end time alone ends the closure the same day.
    pub fn end(&self) -> NaiveDateTime {
        match (self.end_date, self.end_time) {
            (Some(date), Some(time)) => date.and_time(time),
            (Some(date), None) => date.and_time(NaiveTime::MIN),
            (None, Some(time)) => self.date.and_time(time),
            (None, None) => (self.date + Days::new(1)).and_time(NaiveTime::MIN),
        }
    }

    /// Display text for previews and schedule listings.
    pub fn label(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => format!("Holiday {}", self.date.format("%d.%m.%Y")),
        }
    }
}

/// Serde adapter storing times as `HH:MM`.
pub(crate) mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format("%H:%M").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let s = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&s, "%H:%M").map_err(serde::de::Error::custom)
    }
}

/// Serde adapter for optional `HH:MM` times.
pub(crate) mod hhmm_opt {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        time: &Option<NaiveTime>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match time {
            Some(time) => serializer.serialize_str(&time.format("%H:%M").to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveTime>, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            Some(s) => NaiveTime::parse_from_str(&s, "%H:%M")
                .map(Some)
                .map_err(serde::de::Error::custom),
            None => Ok(None),
        }
    }
}

// Default value functions for serde
pub(crate) fn default_language_id() -> String {
    "de-DE".to_string()
}
pub(crate) fn default_time_zone_id() -> String {
    "W. Europe Standard Time".to_string()
}
pub(crate) fn default_usage_location() -> String {
    "DE".to_string()
}
pub(crate) fn default_resource_account_sku() -> String {
    "PHONESYSTEM_VIRTUALUSER".to_string()
}
pub(crate) fn default_aa_app_id() -> String {
    "ce933385-9390-45d1-9512-c8d228074e07".to_string()
}
pub(crate) fn default_cq_app_id() -> String {
    "11cd3e2e-fccb-42ad-ad00-878b93575e07".to_string()
}
