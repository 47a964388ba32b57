//! ProvisionConfig struct definition and default implementation.

use super::types::*;
use serde::{Deserialize, Serialize};

/// Provisioning configuration for one customer group.
///
/// This struct represents the contents of a provisioning YAML file as edited
/// by the operator. Unknown fields in the YAML are ignored for forward
/// compatibility. Identifiers derived from the base fields (group name,
/// resource account UPNs, ...) are never stored here; they are recomputed
/// from the base fields wherever needed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProvisionConfig {
    // =========================================================================
    // Identity
    // =========================================================================
    /// Short customer code (e.g. "acm").
    pub customer: String,

    /// Customer group / site name (e.g. "luc").
    pub customer_group_name: String,

    /// Tenant fallback domain for resource account UPNs.
    pub ms_fallback_domain: String,

    /// Short tag naming the auto-attendant line (e.g. "hn" for Hotline).
    pub anr_name: String,

    /// BCP-47 language id used by queue and attendant prompts.
    #[serde(default = "default_language_id")]
    pub language_id: String,

    /// Windows time zone id for the attendant's schedules.
    #[serde(default = "default_time_zone_id")]
    pub time_zone_id: String,

    /// ISO country code for license usage location.
    #[serde(default = "default_usage_location")]
    pub usage_location: String,

    /// E.164 phone number assigned to the auto attendant.
    pub phone_number: String,

    /// How the phone number is assigned.
    pub phone_number_type: PhoneNumberType,

    // =========================================================================
    // Call flows
    // =========================================================================
    /// Flow during opening hours.
    pub business_hours_flow: CallFlowSpec,

    /// Flow outside opening hours.
    pub after_hours_flow: CallFlowSpec,

    // =========================================================================
    // Queue exception policies
    // =========================================================================
    /// Too many concurrent calls in the queue.
    pub overflow: QueuePolicy,

    /// A call waited longer than the threshold.
    pub timeout: QueuePolicy,

    /// No agent is opted in.
    pub no_agents: QueuePolicy,

    // =========================================================================
    // Schedules
    // =========================================================================
    /// Weekly opening hours.
    pub schedule: WeeklySchedule,

    /// Holiday closures, ordered by (date, time) on read.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub holidays: Vec<HolidayEntry>,

    /// Jurisdiction used by `holidays --fill` to pre-compute entries.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub holiday_country: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub holiday_region: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub holiday_subregion: Option<String>,

    // =========================================================================
    // Platform identifiers
    // =========================================================================
    /// License part number for resource accounts.
    #[serde(default = "default_resource_account_sku")]
    pub resource_account_sku: String,

    /// Application id of the auto-attendant application instance.
    #[serde(default = "default_aa_app_id")]
    pub aa_app_id: String,

    /// Application id of the call-queue application instance.
    #[serde(default = "default_cq_app_id")]
    pub cq_app_id: String,
}

impl Default for ProvisionConfig {
    fn default() -> Self {
        Self {
            customer: String::new(),
            customer_group_name: String::new(),
            ms_fallback_domain: String::new(),
            anr_name: String::new(),
            language_id: default_language_id(),
            time_zone_id: default_time_zone_id(),
            usage_location: default_usage_location(),
            phone_number: String::new(),
            phone_number_type: PhoneNumberType::default(),
            business_hours_flow: CallFlowSpec::default(),
            after_hours_flow: CallFlowSpec::default(),
            overflow: QueuePolicy::default(),
            timeout: QueuePolicy::default(),
            no_agents: QueuePolicy::default(),
            schedule: WeeklySchedule::default(),
            holidays: Vec::new(),
            holiday_country: None,
            holiday_region: None,
            holiday_subregion: None,
            resource_account_sku: default_resource_account_sku(),
            aa_app_id: default_aa_app_id(),
            cq_app_id: default_cq_app_id(),
        }
    }
}
