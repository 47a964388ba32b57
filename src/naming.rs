//! Derived identifier scheme for provisioned objects.
//!
//! Every object this tool provisions is named by a pure function of the base
//! config fields: customer, customer group, fallback domain, and the ANR tag
//! carried by the auto attendant. Names are recomputed wherever they are
//! needed and never stored, so editing a base field cannot leave a stale
//! name behind.
//!
//! Display names keep the operator's casing; UPN local parts and the group
//! mail nickname are lowercased with internal spaces replaced by `-`.

/// Display name of the backing Microsoft 365 group: `grp-{customer}-{group}`.
pub fn group_name(customer: &str, group: &str) -> String {
    format!("grp-{}-{}", customer, group)
}

/// Mail nickname of the backing group (lowercased group name).
pub fn group_mail_nickname(customer: &str, group: &str) -> String {
    upn_local(&group_name(customer, group))
}

/// Display name of the call queue: `cq-{customer}-{group}`.
pub fn call_queue_name(customer: &str, group: &str) -> String {
    format!("cq-{}-{}", customer, group)
}

/// Display name of the call queue's resource account.
pub fn call_queue_account_name(customer: &str, group: &str) -> String {
    format!("ra-cq-{}-{}", customer, group)
}

/// UPN of the call queue's resource account.
pub fn call_queue_account_upn(customer: &str, group: &str, domain: &str) -> String {
    format!(
        "{}@{}",
        upn_local(&call_queue_account_name(customer, group)),
        domain
    )
}

/// Display name of the auto attendant: `aa-{customer}-{anr}-{group}`.
pub fn auto_attendant_name(customer: &str, anr: &str, group: &str) -> String {
    format!("aa-{}-{}-{}", customer, anr, group)
}

/// Display name of the auto attendant's resource account.
pub fn auto_attendant_account_name(customer: &str, anr: &str, group: &str) -> String {
    format!("ra-aa-{}-{}-{}", customer, anr, group)
}

/// UPN of the auto attendant's resource account.
pub fn auto_attendant_account_upn(customer: &str, anr: &str, group: &str, domain: &str) -> String {
    format!(
        "{}@{}",
        upn_local(&auto_attendant_account_name(customer, anr, group)),
        domain
    )
}

/// Name of the holiday schedule attached to the auto attendant.
pub fn holiday_schedule_name(customer: &str, group: &str) -> String {
    format!("holidays-{}-{}", customer, group)
}

fn upn_local(name: &str) -> String {
    name.to_lowercase().replace(' ', "-")
}

/// The complete set of derived names for one customer group.
///
/// Bundles every row of the naming scheme so call sites that need several
/// names (script composition, the `names` command) derive them once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedNames {
    pub group_name: String,
    pub group_mail_nickname: String,
    pub call_queue_name: String,
    pub call_queue_account_name: String,
    pub call_queue_account_upn: String,
    pub auto_attendant_name: String,
    pub auto_attendant_account_name: String,
    pub auto_attendant_account_upn: String,
    pub holiday_schedule_name: String,
}

impl DerivedNames {
    /// Derive all names from the four base fields.
    pub fn derive(customer: &str, group: &str, domain: &str, anr: &str) -> Self {
        DerivedNames {
            group_name: group_name(customer, group),
            group_mail_nickname: group_mail_nickname(customer, group),
            call_queue_name: call_queue_name(customer, group),
            call_queue_account_name: call_queue_account_name(customer, group),
            call_queue_account_upn: call_queue_account_upn(customer, group, domain),
            auto_attendant_name: auto_attendant_name(customer, anr, group),
            auto_attendant_account_name: auto_attendant_account_name(customer, anr, group),
            auto_attendant_account_upn: auto_attendant_account_upn(customer, anr, group, domain),
            holiday_schedule_name: holiday_schedule_name(customer, group),
        }
    }
}
