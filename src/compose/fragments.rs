//! Shared PowerShell fragments used by the per-operation script builders.
//!
//! Every free-text value that lands inside a generated script passes through
//! the sanitizer before it is quoted. Closed-set values (enum codes, numbers,
//! formatted dates and times) are interpolated directly.

use crate::config::types::{
    CallFlowAction, CallFlowSpec, Greeting, HolidayEntry, QueuePolicy, WeeklySchedule,
};
use crate::error::Result;
use crate::sanitize::{sanitize_identifier, sanitize_text};
use regex::Regex;
use std::sync::LazyLock;

/// Seconds to wait after creating an M365 group before it is visible to Teams.
pub(super) const GROUP_PROPAGATION_WAIT_SECS: u32 = 10;

/// Seconds to wait after creating a resource account.
pub(super) const ACCOUNT_PROPAGATION_WAIT_SECS: u32 = 20;

/// Seconds to wait after a license assignment before the license is usable.
pub(super) const LICENSE_PROPAGATION_WAIT_SECS: u32 = 30;

static GUID_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$")
        .expect("Invalid GUID regex")
});

/// Returns true when the trimmed value looks like a directory object id.
pub(super) fn is_guid_shaped(value: &str) -> bool {
    GUID_REGEX.is_match(value.trim())
}

/// Returns true when the value is a UPN whose local part uses the resource
/// account prefix, e.g. `ra-cq-acme-berlin@contoso.com`.
pub(super) fn is_resource_account_upn(value: &str) -> bool {
    match value.split_once('@') {
        Some((local, domain)) => local.starts_with("ra-") && !domain.is_empty(),
        None => false,
    }
}

/// Quotes a free-text value as a PowerShell single-quoted literal.
pub(super) fn quote_text(value: &str) -> String {
    format!("'{}'", sanitize_text(value))
}

/// Quotes an identifier-class value, failing when disallowed characters remain.
pub(super) fn quote_identifier(value: &str) -> Result<String> {
    Ok(format!("'{}'", sanitize_identifier(value)?))
}

/// Sanitizes a value for a single-line context such as a script comment.
pub(super) fn single_line(value: &str) -> String {
    sanitize_text(value).replace(['\r', '\n', '\t'], " ")
}

pub(super) fn propagation_wait(seconds: u32) -> String {
    format!("Start-Sleep -Seconds {}\n", seconds)
}

/// The expression a queue policy target resolves to inside a script.
///
/// GUID-shaped targets are taken as object ids, resource account UPNs are
/// resolved through the application instance list, `+`-prefixed targets are
/// treated as external PSTN numbers and everything else as a user to look up.
pub(super) fn queue_target_expr(target: &str) -> Result<String> {
    let trimmed = target.trim();
    if is_guid_shaped(trimmed) {
        quote_identifier(trimmed)
    } else if is_resource_account_upn(trimmed) {
        Ok(format!(
            "(Get-CsOnlineApplicationInstance | Where-Object {{ $_.UserPrincipalName -eq {} }}).ObjectId",
            quote_identifier(trimmed)?
        ))
    } else if trimmed.starts_with('+') {
        Ok(format!("'tel:{}'", sanitize_text(trimmed)))
    } else {
        Ok(format!(
            "(Get-CsOnlineUser -Identity {}).Identity",
            quote_identifier(trimmed)?
        ))
    }
}

/// Builds one auto attendant call flow: greeting, menu option, menu and the
/// flow itself, bound to `$<prefix>Flow`.
///
/// A `Greeting::None` emits no prompt at all. Transfers with an empty target
/// degrade to a disconnect so a half-filled config still yields a runnable
/// script.
pub(super) fn call_flow_fragment(title: &str, prefix: &str, flow: &CallFlowSpec) -> Result<String> {
    let mut frag = String::new();
    let mut greetings_arg = String::new();

    match &flow.greeting {
        Greeting::None => {}
        Greeting::AudioFile { id } => {
            frag.push_str(&format!(
                "${}Greeting = New-CsAutoAttendantPrompt -AudioFilePrompt (Get-CsOnlineAudioFile -Identity {})\n",
                prefix,
                quote_identifier(id)?
            ));
            greetings_arg = format!(" -Greetings @(${}Greeting)", prefix);
        }
        Greeting::TextToSpeech { prompt } => {
            let text = if prompt.trim().is_empty() {
                "Welcome."
            } else {
                prompt.as_str()
            };
            frag.push_str(&format!(
                "${}Greeting = New-CsAutoAttendantPrompt -TextToSpeechPrompt {}\n",
                prefix,
                quote_text(text)
            ));
            greetings_arg = format!(" -Greetings @(${}Greeting)", prefix);
        }
    }

    frag.push_str(&menu_option_fragment(prefix, &flow.action)?);
    frag.push_str(&format!(
        "${}Menu = New-CsAutoAttendantMenu -Name '{} menu' -MenuOptions @(${}Option)\n",
        prefix, title, prefix
    ));
    frag.push_str(&format!(
        "${}Flow = New-CsAutoAttendantCallFlow -Name '{}'{} -Menu ${}Menu\n",
        prefix, title, greetings_arg, prefix
    ));
    Ok(frag)
}

fn menu_option_fragment(prefix: &str, action: &CallFlowAction) -> Result<String> {
    let disconnect = format!(
        "${}Option = New-CsAutoAttendantMenuOption -Action DisconnectCall -DtmfResponse Automatic\n",
        prefix
    );
    let transfer = |target_line: String| {
        format!(
            "{}${}Option = New-CsAutoAttendantMenuOption -Action TransferCallToTarget -DtmfResponse Automatic -CallTarget ${}Target\n",
            target_line, prefix, prefix
        )
    };

    match action {
        CallFlowAction::Disconnect | CallFlowAction::DisconnectWithBusy => Ok(disconnect),
        CallFlowAction::TransferToTarget { target } => {
            let trimmed = target.trim();
            if trimmed.is_empty() {
                return Ok(disconnect);
            }
            let entity = if is_guid_shaped(trimmed) {
                format!(
                    "${}Target = New-CsAutoAttendantCallableEntity -Identity {} -Type ApplicationEndpoint\n",
                    prefix,
                    quote_identifier(trimmed)?
                )
            } else if is_resource_account_upn(trimmed) {
                format!(
                    "${}Target = New-CsAutoAttendantCallableEntity -Identity (Get-CsOnlineApplicationInstance | Where-Object {{ $_.UserPrincipalName -eq {} }}).ObjectId -Type ApplicationEndpoint\n",
                    prefix,
                    quote_identifier(trimmed)?
                )
            } else if trimmed.starts_with('+') {
                format!(
                    "${}Target = New-CsAutoAttendantCallableEntity -Identity 'tel:{}' -Type ExternalPstn\n",
                    prefix,
                    sanitize_text(trimmed)
                )
            } else {
                format!(
                    "${}Target = New-CsAutoAttendantCallableEntity -Identity (Get-CsOnlineUser -Identity {}).Identity -Type User\n",
                    prefix,
                    quote_identifier(trimmed)?
                )
            };
            Ok(transfer(entity))
        }
        CallFlowAction::TransferToVoicemail { target } => {
            let trimmed = target.trim();
            if trimmed.is_empty() {
                return Ok(disconnect);
            }
            let entity = if is_guid_shaped(trimmed) {
                format!(
                    "# voicemail target {} is GUID-shaped; routing to the shared group mailbox\n${}Target = New-CsAutoAttendantCallableEntity -Identity {} -Type SharedVoicemail -EnableTranscription\n",
                    single_line(trimmed),
                    prefix,
                    quote_identifier(trimmed)?
                )
            } else {
                format!(
                    "# voicemail target {} resolves to a user; routing to personal voicemail\n${}Target = New-CsAutoAttendantCallableEntity -Identity (Get-CsOnlineUser -Identity {}).Identity -Type User\n",
                    single_line(trimmed),
                    prefix,
                    quote_identifier(trimmed)?
                )
            };
            Ok(transfer(entity))
        }
    }
}

/// Hashtable entries for the overflow policy. The threshold always appears;
/// an unset action falls back to a busy-signal disconnect.
pub(super) fn overflow_policy_lines(policy: &QueuePolicy) -> Result<Vec<String>> {
    let mut lines = vec![format!("OverflowThreshold = {}", policy.overflow_threshold())];
    match &policy.action {
        None | Some(CallFlowAction::DisconnectWithBusy) => {
            lines.push("OverflowAction = 'DisconnectWithBusy'".to_string());
        }
        Some(CallFlowAction::Disconnect) => {
            lines.push("OverflowAction = 'Disconnect'".to_string());
        }
        Some(CallFlowAction::TransferToTarget { target }) => {
            if target.trim().is_empty() {
                lines.push("OverflowAction = 'Disconnect'".to_string());
            } else {
                lines.push("OverflowAction = 'Forward'".to_string());
                lines.push(format!("OverflowActionTarget = {}", queue_target_expr(target)?));
            }
        }
        Some(CallFlowAction::TransferToVoicemail { target }) => {
            if target.trim().is_empty() {
                lines.push("OverflowAction = 'Disconnect'".to_string());
            } else if is_guid_shaped(target.trim()) {
                lines.push("OverflowAction = 'SharedVoicemail'".to_string());
                lines.push(format!("OverflowActionTarget = {}", quote_identifier(target.trim())?));
                lines.push("EnableOverflowSharedVoicemailTranscription = $true".to_string());
            } else {
                lines.push("OverflowAction = 'Voicemail'".to_string());
                lines.push(format!("OverflowActionTarget = {}", queue_target_expr(target)?));
            }
        }
    }
    Ok(lines)
}

/// Hashtable entries for the timeout policy. A busy-signal disconnect is not
/// a valid timeout action and degrades to a plain disconnect.
pub(super) fn timeout_policy_lines(policy: &QueuePolicy) -> Result<Vec<String>> {
    let mut lines = vec![format!("TimeoutThreshold = {}", policy.timeout_seconds())];
    match &policy.action {
        None | Some(CallFlowAction::Disconnect) | Some(CallFlowAction::DisconnectWithBusy) => {
            lines.push("TimeoutAction = 'Disconnect'".to_string());
        }
        Some(CallFlowAction::TransferToTarget { target }) => {
            if target.trim().is_empty() {
                lines.push("TimeoutAction = 'Disconnect'".to_string());
            } else {
                lines.push("TimeoutAction = 'Forward'".to_string());
                lines.push(format!("TimeoutActionTarget = {}", queue_target_expr(target)?));
            }
        }
        Some(CallFlowAction::TransferToVoicemail { target }) => {
            if target.trim().is_empty() {
                lines.push("TimeoutAction = 'Disconnect'".to_string());
            } else if is_guid_shaped(target.trim()) {
                lines.push("TimeoutAction = 'SharedVoicemail'".to_string());
                lines.push(format!("TimeoutActionTarget = {}", quote_identifier(target.trim())?));
                lines.push("EnableTimeoutSharedVoicemailTranscription = $true".to_string());
            } else {
                lines.push("TimeoutAction = 'Voicemail'".to_string());
                lines.push(format!("TimeoutActionTarget = {}", queue_target_expr(target)?));
            }
        }
    }
    Ok(lines)
}

/// Hashtable entries for the no-agents policy. When no policy is configured
/// the cmdlet default (keep queueing) applies and nothing is emitted.
pub(super) fn no_agents_policy_lines(policy: &QueuePolicy) -> Result<Vec<String>> {
    let action = match &policy.action {
        None => return Ok(Vec::new()),
        Some(action) => action,
    };
    let mut lines = vec!["NoAgentApplyTo = 'AllCalls'".to_string()];
    match action {
        CallFlowAction::Disconnect | CallFlowAction::DisconnectWithBusy => {
            lines.push("NoAgentAction = 'Disconnect'".to_string());
        }
        CallFlowAction::TransferToTarget { target } => {
            if target.trim().is_empty() {
                lines.push("NoAgentAction = 'Disconnect'".to_string());
            } else {
                lines.push("NoAgentAction = 'Forward'".to_string());
                lines.push(format!("NoAgentActionTarget = {}", queue_target_expr(target)?));
            }
        }
        CallFlowAction::TransferToVoicemail { target } => {
            if target.trim().is_empty() {
                lines.push("NoAgentAction = 'Disconnect'".to_string());
            } else if is_guid_shaped(target.trim()) {
                lines.push("NoAgentAction = 'SharedVoicemail'".to_string());
                lines.push(format!("NoAgentActionTarget = {}", quote_identifier(target.trim())?));
            } else {
                lines.push("NoAgentAction = 'Voicemail'".to_string());
                lines.push(format!("NoAgentActionTarget = {}", queue_target_expr(target)?));
            }
        }
    }
    Ok(lines)
}

/// Hashtable entries binding each non-empty weekday to its time ranges.
pub(super) fn weekly_schedule_param_lines(schedule: &WeeklySchedule) -> Vec<String> {
    let mut lines = Vec::new();
    for (day, ranges) in schedule.days() {
        if ranges.is_empty() {
            continue;
        }
        let items = ranges
            .iter()
            .map(|range| {
                format!(
                    "(New-CsOnlineTimeRange -Start '{}' -End '{}')",
                    range.start.format("%H:%M"),
                    range.end.format("%H:%M")
                )
            })
            .collect::<Vec<_>>()
            .join(", ");
        lines.push(format!("{}Hours = @({})", day, items));
    }
    lines
}

/// Builds the `$holidayRanges` array, one date-time range per entry.
///
/// Range boundaries always use `dd/MM/yyyy HH:mm`; the Teams cmdlets reject
/// every other format regardless of tenant locale.
pub(super) fn holiday_ranges_fragment(entries: &[HolidayEntry]) -> String {
    let mut frag = String::from("$holidayRanges = @()\n");
    for entry in entries {
        frag.push_str(&format!("# {}\n", single_line(&entry.label())));
        frag.push_str(&format!(
            "$holidayRanges += New-CsOnlineDateTimeRange -Start '{}' -End '{}'\n",
            entry.start().format("%d/%m/%Y %H:%M"),
            entry.end().format("%d/%m/%Y %H:%M")
        ));
    }
    frag
}
