//! PowerShell script composition.
//!
//! `compose` turns a provisioning config and an operation selector into a
//! standalone script for the execution gateway. Free-text values are
//! sanitized before they reach a script; identifier-class values that cannot
//! be made safe abort composition instead of being emitted half-cleaned.
//! Scripts report results as tagged record lines (`GROUP:`, `CALLQUEUE:`,
//! `SUCCESS:`, `ERROR:`, ...) which the gateway parses back into typed
//! records.

mod fragments;
mod scripts;

#[cfg(test)]
mod tests;

use crate::config::ProvisionConfig;
use crate::error::Result;

/// Which resource account an operation addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountKind {
    CallQueue,
    AutoAttendant,
}

/// What a removal operation tears down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Group,
    ResourceAccounts,
    CallQueue,
    AutoAttendant,
    HolidaySchedule,
}

/// What a listing operation enumerates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityQuery {
    Groups,
    ResourceAccounts,
    CallQueues,
    AutoAttendants,
}

/// One composable provisioning operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    SessionSetup,
    CreateGroup,
    CreateResourceAccount(AccountKind),
    AssignLicense(AccountKind),
    AssignLicenseAndPhone,
    CreateCallQueue,
    CreateAutoAttendant,
    AttachHolidaySchedule,
    AssociateAccounts,
    RemoveEntity(EntityKind),
    ListEntities(EntityQuery),
}

impl Operation {
    /// Operation names accepted by `compose --op`.
    pub const NAMES: &'static [&'static str] = &[
        "session-setup",
        "create-group",
        "create-cq-account",
        "create-aa-account",
        "assign-cq-license",
        "assign-aa-license",
        "assign-aa-license-phone",
        "create-call-queue",
        "create-auto-attendant",
        "attach-holiday-schedule",
        "associate-accounts",
        "remove-group",
        "remove-resource-accounts",
        "remove-call-queue",
        "remove-auto-attendant",
        "remove-holiday-schedule",
        "list-groups",
        "list-resource-accounts",
        "list-call-queues",
        "list-auto-attendants",
    ];

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "session-setup" => Some(Self::SessionSetup),
            "create-group" => Some(Self::CreateGroup),
            "create-cq-account" => Some(Self::CreateResourceAccount(AccountKind::CallQueue)),
            "create-aa-account" => Some(Self::CreateResourceAccount(AccountKind::AutoAttendant)),
            "assign-cq-license" => Some(Self::AssignLicense(AccountKind::CallQueue)),
            "assign-aa-license" => Some(Self::AssignLicense(AccountKind::AutoAttendant)),
            "assign-aa-license-phone" => Some(Self::AssignLicenseAndPhone),
            "create-call-queue" => Some(Self::CreateCallQueue),
            "create-auto-attendant" => Some(Self::CreateAutoAttendant),
            "attach-holiday-schedule" => Some(Self::AttachHolidaySchedule),
            "associate-accounts" => Some(Self::AssociateAccounts),
            "remove-group" => Some(Self::RemoveEntity(EntityKind::Group)),
            "remove-resource-accounts" => Some(Self::RemoveEntity(EntityKind::ResourceAccounts)),
            "remove-call-queue" => Some(Self::RemoveEntity(EntityKind::CallQueue)),
            "remove-auto-attendant" => Some(Self::RemoveEntity(EntityKind::AutoAttendant)),
            "remove-holiday-schedule" => Some(Self::RemoveEntity(EntityKind::HolidaySchedule)),
            "list-groups" => Some(Self::ListEntities(EntityQuery::Groups)),
            "list-resource-accounts" => Some(Self::ListEntities(EntityQuery::ResourceAccounts)),
            "list-call-queues" => Some(Self::ListEntities(EntityQuery::CallQueues)),
            "list-auto-attendants" => Some(Self::ListEntities(EntityQuery::AutoAttendants)),
            _ => None,
        }
    }
}

/// Composes the script for one operation.
///
/// # Arguments
/// * `config` - Provisioning config the script is derived from
/// * `operation` - Which provisioning step to generate
///
/// # Returns
/// The script text, or an error when a config value cannot be sanitized into
/// a safe identifier or the operation is impossible for this config.
pub fn compose(config: &ProvisionConfig, operation: Operation) -> Result<String> {
    match operation {
        Operation::SessionSetup => Ok(scripts::session_setup()),
        Operation::CreateGroup => scripts::create_group(config),
        Operation::CreateResourceAccount(kind) => scripts::create_resource_account(config, kind),
        Operation::AssignLicense(kind) => scripts::assign_license(config, kind),
        Operation::AssignLicenseAndPhone => scripts::assign_license_and_phone(config),
        Operation::CreateCallQueue => scripts::create_call_queue(config),
        Operation::CreateAutoAttendant => scripts::create_auto_attendant(config),
        Operation::AttachHolidaySchedule => scripts::attach_holiday_schedule(config),
        Operation::AssociateAccounts => scripts::associate_accounts(config),
        Operation::RemoveEntity(kind) => scripts::remove_entity(config, kind),
        Operation::ListEntities(query) => Ok(scripts::list_entities(query)),
    }
}
