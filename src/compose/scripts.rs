//! Per-operation script builders.
//!
//! Each builder returns a complete, standalone PowerShell script. Scripts
//! assume an established session (module imports, tenant context) except for
//! `session_setup`, which creates one. All fallible parts run inside a
//! try/catch that converts failures into `ERROR:` lines so the gateway can
//! classify the outcome without parsing stderr.

use super::fragments::{
    call_flow_fragment, holiday_ranges_fragment, no_agents_policy_lines, overflow_policy_lines,
    propagation_wait, quote_identifier, quote_text, single_line, timeout_policy_lines,
    weekly_schedule_param_lines, ACCOUNT_PROPAGATION_WAIT_SECS, GROUP_PROPAGATION_WAIT_SECS,
    LICENSE_PROPAGATION_WAIT_SECS,
};
use super::{AccountKind, EntityKind, EntityQuery};
use crate::config::ProvisionConfig;
use crate::error::{DialplanError, Result};

/// Indents every non-empty line of a multi-line fragment.
fn indent(fragment: &str, spaces: usize) -> String {
    let pad = " ".repeat(spaces);
    let mut out = String::new();
    for line in fragment.lines() {
        if !line.is_empty() {
            out.push_str(&pad);
            out.push_str(line);
        }
        out.push('\n');
    }
    out
}

fn catch_block(what: &str) -> String {
    format!(
        "}} catch {{\n    Write-Output (\"ERROR:{} failed: \" + $_.Exception.Message)\n}}\n",
        what
    )
}

pub(super) fn session_setup() -> String {
    let mut s = String::new();
    s.push_str("# Establish the provisioning session\n");
    s.push_str("$ErrorActionPreference = 'Stop'\n");
    s.push_str("Import-Module MicrosoftTeams -ErrorAction Stop\n");
    s.push_str("Import-Module Microsoft.Graph.Groups -ErrorAction Stop\n");
    s.push_str("Import-Module Microsoft.Graph.Users -ErrorAction Stop\n");
    s.push_str("Import-Module Microsoft.Graph.Users.Actions -ErrorAction Stop\n");
    s.push_str("try {\n");
    s.push_str("    $tenant = Get-CsTenant\n");
    s.push_str("    $account = (Get-MgContext).Account\n");
    s.push_str("    Write-Output (\"SESSION:{0}|{1}\" -f $tenant.TenantId, $account)\n");
    s.push_str(&catch_block("session probe"));
    s
}

pub(super) fn create_group(config: &ProvisionConfig) -> Result<String> {
    let names = config.derived_names();
    let group = quote_identifier(&names.group_name)?;
    let nickname = quote_identifier(&names.group_mail_nickname)?;
    let description = quote_text(&format!("Call distribution group for {}", names.call_queue_name));

    let mut s = String::new();
    s.push_str(&format!(
        "# Create the M365 group {} (reused when it already exists)\n",
        single_line(&names.group_name)
    ));
    s.push_str(&format!("$groupName = {}\n", group));
    s.push_str("try {\n");
    s.push_str("    $group = Get-MgGroup -Filter (\"displayName eq '{0}'\" -f $groupName) -ConsistencyLevel eventual -CountVariable groupCount | Select-Object -First 1\n");
    s.push_str("    if ($null -eq $group) {\n");
    s.push_str(&format!(
        "        $group = New-MgGroup -DisplayName $groupName -MailNickname {} -MailEnabled:$false -SecurityEnabled -Description {}\n",
        nickname, description
    ));
    s.push_str("        ");
    s.push_str(&propagation_wait(GROUP_PROPAGATION_WAIT_SECS));
    s.push_str("    }\n");
    s.push_str("    Write-Output (\"GROUP:{0}|{1}|{2}|{3}\" -f $group.DisplayName, $group.Id, $group.MailNickname, $group.Description)\n");
    s.push_str(&catch_block("create group"));
    Ok(s)
}

pub(super) fn create_resource_account(
    config: &ProvisionConfig,
    kind: AccountKind,
) -> Result<String> {
    let names = config.derived_names();
    let (upn, display, app_id, what) = match kind {
        AccountKind::CallQueue => (
            &names.call_queue_account_upn,
            &names.call_queue_account_name,
            &config.cq_app_id,
            "call queue",
        ),
        AccountKind::AutoAttendant => (
            &names.auto_attendant_account_upn,
            &names.auto_attendant_account_name,
            &config.aa_app_id,
            "auto attendant",
        ),
    };
    let upn_quoted = quote_identifier(upn)?;
    let display_quoted = quote_identifier(display)?;
    let app_id_quoted = quote_identifier(app_id)?;
    let location_quoted = quote_identifier(&config.usage_location)?;

    let mut s = String::new();
    s.push_str(&format!(
        "# Create the {} resource account {}\n",
        what,
        single_line(upn)
    ));
    s.push_str(&format!("$upn = {}\n", upn_quoted));
    s.push_str("try {\n");
    s.push_str("    $account = Get-CsOnlineApplicationInstance | Where-Object { $_.UserPrincipalName -eq $upn }\n");
    s.push_str("    if ($null -eq $account) {\n");
    s.push_str(&format!(
        "        New-CsOnlineApplicationInstance -UserPrincipalName $upn -ApplicationId {} -DisplayName {} | Out-Null\n",
        app_id_quoted, display_quoted
    ));
    s.push_str("        ");
    s.push_str(&propagation_wait(ACCOUNT_PROPAGATION_WAIT_SECS));
    s.push_str("    }\n");
    s.push_str(&format!(
        "    Update-MgUser -UserId $upn -UsageLocation {}\n",
        location_quoted
    ));
    s.push_str("    $account = Get-CsOnlineApplicationInstance | Where-Object { $_.UserPrincipalName -eq $upn }\n");
    s.push_str(&format!(
        "    Write-Output (\"RESOURCEACCOUNT:{{0}}|{{1}}|{{2}}|{{3}}\" -f $account.DisplayName, $account.UserPrincipalName, $account.ObjectId, {})\n",
        location_quoted
    ));
    s.push_str(&catch_block("create resource account"));
    Ok(s)
}

pub(super) fn assign_license(config: &ProvisionConfig, kind: AccountKind) -> Result<String> {
    license_script(config, kind, false)
}

/// License plus phone number in one script, used for the attendant account.
/// The phone assignment needs the license to have propagated first.
pub(super) fn assign_license_and_phone(config: &ProvisionConfig) -> Result<String> {
    license_script(config, AccountKind::AutoAttendant, true)
}

fn license_script(config: &ProvisionConfig, kind: AccountKind, with_phone: bool) -> Result<String> {
    let names = config.derived_names();
    let upn = match kind {
        AccountKind::CallQueue => &names.call_queue_account_upn,
        AccountKind::AutoAttendant => &names.auto_attendant_account_upn,
    };
    let upn_quoted = quote_identifier(upn)?;
    let sku_quoted = quote_identifier(&config.resource_account_sku)?;

    let mut s = String::new();
    s.push_str(&format!(
        "# Assign the {} license to {}\n",
        single_line(&config.resource_account_sku),
        single_line(upn)
    ));
    s.push_str(&format!("$upn = {}\n", upn_quoted));
    s.push_str("try {\n");
    s.push_str(&format!(
        "    $sku = Get-MgSubscribedSku -All | Where-Object {{ $_.SkuPartNumber -eq {} }}\n",
        sku_quoted
    ));
    s.push_str("    if ($null -eq $sku) {\n");
    s.push_str(&format!(
        "        throw (\"license sku {{0}} not found in tenant\" -f {})\n",
        sku_quoted
    ));
    s.push_str("    }\n");
    s.push_str("    Set-MgUserLicense -UserId $upn -AddLicenses @(@{ SkuId = $sku.SkuId }) -RemoveLicenses @() | Out-Null\n");
    s.push_str("    ");
    s.push_str(&propagation_wait(LICENSE_PROPAGATION_WAIT_SECS));
    s.push_str("    Write-Output (\"SUCCESS:license assigned to \" + $upn)\n");
    if with_phone {
        let phone = quote_text(&config.phone_number);
        s.push_str(&format!(
            "    Set-CsPhoneNumberAssignment -Identity $upn -PhoneNumber {} -PhoneNumberType {}\n",
            phone,
            config.phone_number_type.as_cmdlet_value()
        ));
        s.push_str(&format!(
            "    Write-Output (\"SUCCESS:phone {{0}} assigned to {{1}}\" -f {}, $upn)\n",
            phone
        ));
    }
    s.push_str(&catch_block("assign license"));
    Ok(s)
}

pub(super) fn create_call_queue(config: &ProvisionConfig) -> Result<String> {
    let names = config.derived_names();
    let group_quoted = quote_identifier(&names.group_name)?;
    let queue_quoted = quote_identifier(&names.call_queue_name)?;
    let language_quoted = quote_identifier(&config.language_id)?;

    let mut s = String::new();
    s.push_str(&format!(
        "# Create the call queue {}\n",
        single_line(&names.call_queue_name)
    ));
    s.push_str(&format!("$groupName = {}\n", group_quoted));
    s.push_str("try {\n");
    s.push_str("    $group = Get-MgGroup -Filter (\"displayName eq '{0}'\" -f $groupName) -ConsistencyLevel eventual -CountVariable groupCount | Select-Object -First 1\n");
    s.push_str("    if ($null -eq $group) {\n");
    s.push_str("        throw (\"distribution group {0} not found\" -f $groupName)\n");
    s.push_str("    }\n");
    s.push_str("    $queueParams = @{\n");
    s.push_str(&format!("        Name = {}\n", queue_quoted));
    s.push_str(&format!("        LanguageId = {}\n", language_quoted));
    s.push_str("        UseDefaultMusicOnHold = $true\n");
    s.push_str("        ConferenceMode = $true\n");
    s.push_str("        RoutingMethod = 'Attendant'\n");
    s.push_str("        DistributionLists = @($group.Id)\n");
    for line in overflow_policy_lines(&config.overflow)? {
        s.push_str(&format!("        {}\n", line));
    }
    for line in timeout_policy_lines(&config.timeout)? {
        s.push_str(&format!("        {}\n", line));
    }
    for line in no_agents_policy_lines(&config.no_agents)? {
        s.push_str(&format!("        {}\n", line));
    }
    s.push_str("    }\n");
    s.push_str("    $queue = New-CsCallQueue @queueParams\n");
    s.push_str(&format!(
        "    Write-Output (\"CALLQUEUE:{{0}}|{{1}}|{{2}}\" -f $queue.Name, $queue.Identity, {})\n",
        language_quoted
    ));
    s.push_str(&catch_block("create call queue"));
    Ok(s)
}

pub(super) fn create_auto_attendant(config: &ProvisionConfig) -> Result<String> {
    let names = config.derived_names();
    let aa_quoted = quote_identifier(&names.auto_attendant_name)?;
    let language_quoted = quote_identifier(&config.language_id)?;
    let tz_quoted = quote_identifier(&config.time_zone_id)?;
    let schedule_name_quoted = quote_identifier(&format!("bh-{}", names.auto_attendant_name))?;
    let holiday_name_quoted = quote_identifier(&names.holiday_schedule_name)?;

    let has_schedule = !config.schedule.is_empty();
    let holidays = config.sorted_holidays();
    let has_holidays = !holidays.is_empty();
    let needs_after_hours = has_schedule || has_holidays;

    let mut s = String::new();
    s.push_str(&format!(
        "# Create the auto attendant {}\n",
        single_line(&names.auto_attendant_name)
    ));
    s.push_str("try {\n");
    s.push_str(&indent(
        &call_flow_fragment("Business hours", "bh", &config.business_hours_flow)?,
        4,
    ));
    if needs_after_hours {
        s.push_str(&indent(
            &call_flow_fragment("After hours", "ah", &config.after_hours_flow)?,
            4,
        ));
    }

    if has_schedule {
        s.push_str("    $scheduleParams = @{\n");
        s.push_str(&format!("        Name = {}\n", schedule_name_quoted));
        s.push_str("        WeeklyRecurrentSchedule = $true\n");
        s.push_str("        Complement = $true\n");
        for line in weekly_schedule_param_lines(&config.schedule) {
            s.push_str(&format!("        {}\n", line));
        }
        s.push_str("    }\n");
        s.push_str("    $businessHours = New-CsOnlineSchedule @scheduleParams\n");
        s.push_str("    $afterHoursAssoc = New-CsAutoAttendantCallHandlingAssociation -Type AfterHours -ScheduleId $businessHours.Id -CallFlowIds @($ahFlow.Id)\n");
    }

    if has_holidays {
        s.push_str(&indent(&holiday_ranges_fragment(&holidays), 4));
        s.push_str(&format!(
            "    $holidaySchedule = New-CsOnlineSchedule -Name {} -FixedSchedule -DateTimeRanges $holidayRanges\n",
            holiday_name_quoted
        ));
        s.push_str("    $holidayAssoc = New-CsAutoAttendantCallHandlingAssociation -Type Holiday -ScheduleId $holidaySchedule.Id -CallFlowIds @($ahFlow.Id)\n");
    }

    s.push_str("    $aaParams = @{\n");
    s.push_str(&format!("        Name = {}\n", aa_quoted));
    s.push_str(&format!("        LanguageId = {}\n", language_quoted));
    s.push_str(&format!("        TimeZoneId = {}\n", tz_quoted));
    s.push_str("        DefaultCallFlow = $bhFlow\n");
    if needs_after_hours {
        s.push_str("        CallFlows = @($ahFlow)\n");
    }
    match (has_schedule, has_holidays) {
        (true, true) => {
            s.push_str("        CallHandlingAssociations = @($afterHoursAssoc, $holidayAssoc)\n");
        }
        (true, false) => {
            s.push_str("        CallHandlingAssociations = @($afterHoursAssoc)\n");
        }
        (false, true) => {
            s.push_str("        CallHandlingAssociations = @($holidayAssoc)\n");
        }
        (false, false) => {}
    }
    s.push_str("    }\n");
    s.push_str("    $aa = New-CsAutoAttendant @aaParams\n");
    s.push_str(&format!(
        "    Write-Output (\"AUTOATTENDANT:{{0}}|{{1}}|{{2}}|{{3}}\" -f $aa.Name, $aa.Identity, {}, {})\n",
        language_quoted, tz_quoted
    ));
    s.push_str(&catch_block("create auto attendant"));
    Ok(s)
}

pub(super) fn attach_holiday_schedule(config: &ProvisionConfig) -> Result<String> {
    let names = config.derived_names();
    let holidays = config.sorted_holidays();
    if holidays.is_empty() {
        return Err(DialplanError::Validation(
            "holiday schedule requested but no holiday entries are configured".to_string(),
        ));
    }
    let schedule_quoted = quote_identifier(&names.holiday_schedule_name)?;
    let aa_quoted = quote_identifier(&names.auto_attendant_name)?;

    let mut s = String::new();
    s.push_str(&format!(
        "# Attach the holiday schedule {} to {}\n",
        single_line(&names.holiday_schedule_name),
        single_line(&names.auto_attendant_name)
    ));
    s.push_str("try {\n");
    s.push_str(&indent(&holiday_ranges_fragment(&holidays), 4));
    s.push_str(&format!(
        "    $schedule = New-CsOnlineSchedule -Name {} -FixedSchedule -DateTimeRanges $holidayRanges\n",
        schedule_quoted
    ));
    s.push_str(&format!(
        "    $aa = Get-CsAutoAttendant -NameFilter {} | Select-Object -First 1\n",
        aa_quoted
    ));
    s.push_str("    if ($null -eq $aa) {\n");
    s.push_str(&format!(
        "        throw (\"auto attendant {{0}} not found\" -f {})\n",
        aa_quoted
    ));
    s.push_str("    }\n");
    s.push_str("    $closedFlow = $aa.CallFlows | Select-Object -First 1\n");
    s.push_str("    if ($null -eq $closedFlow) {\n");
    s.push_str("        $closedFlow = $aa.DefaultCallFlow\n");
    s.push_str("    }\n");
    s.push_str("    $assoc = New-CsAutoAttendantCallHandlingAssociation -Type Holiday -ScheduleId $schedule.Id -CallFlowIds @($closedFlow.Id)\n");
    s.push_str("    $aa.CallHandlingAssociations += $assoc\n");
    s.push_str("    Set-CsAutoAttendant -Instance $aa | Out-Null\n");
    s.push_str(&format!(
        "    Write-Output (\"SUCCESS:holiday schedule {{0}} attached to {{1}}\" -f {}, {})\n",
        schedule_quoted, aa_quoted
    ));
    s.push_str(&catch_block("attach holiday schedule"));
    Ok(s)
}

pub(super) fn associate_accounts(config: &ProvisionConfig) -> Result<String> {
    let names = config.derived_names();
    let cq_upn = quote_identifier(&names.call_queue_account_upn)?;
    let cq_name = quote_identifier(&names.call_queue_name)?;
    let aa_upn = quote_identifier(&names.auto_attendant_account_upn)?;
    let aa_name = quote_identifier(&names.auto_attendant_name)?;

    let mut s = String::new();
    s.push_str("# Associate the resource accounts with their call applications\n");
    s.push_str("try {\n");
    s.push_str(&format!(
        "    $cqAccount = Get-CsOnlineApplicationInstance | Where-Object {{ $_.UserPrincipalName -eq {} }}\n",
        cq_upn
    ));
    s.push_str("    if ($null -eq $cqAccount) {\n");
    s.push_str(&format!("        throw (\"resource account {{0}} not found\" -f {})\n", cq_upn));
    s.push_str("    }\n");
    s.push_str(&format!(
        "    $queue = Get-CsCallQueue -NameFilter {} | Select-Object -First 1\n",
        cq_name
    ));
    s.push_str("    if ($null -eq $queue) {\n");
    s.push_str(&format!("        throw (\"call queue {{0}} not found\" -f {})\n", cq_name));
    s.push_str("    }\n");
    s.push_str("    New-CsOnlineApplicationInstanceAssociation -Identities @($cqAccount.ObjectId) -ConfigurationId $queue.Identity -ConfigurationType CallQueue | Out-Null\n");
    s.push_str(&format!(
        "    Write-Output (\"SUCCESS:associated {{0}} with {{1}}\" -f {}, {})\n",
        cq_upn, cq_name
    ));
    s.push_str(&format!(
        "    $aaAccount = Get-CsOnlineApplicationInstance | Where-Object {{ $_.UserPrincipalName -eq {} }}\n",
        aa_upn
    ));
    s.push_str("    if ($null -eq $aaAccount) {\n");
    s.push_str(&format!("        throw (\"resource account {{0}} not found\" -f {})\n", aa_upn));
    s.push_str("    }\n");
    s.push_str(&format!(
        "    $aa = Get-CsAutoAttendant -NameFilter {} | Select-Object -First 1\n",
        aa_name
    ));
    s.push_str("    if ($null -eq $aa) {\n");
    s.push_str(&format!("        throw (\"auto attendant {{0}} not found\" -f {})\n", aa_name));
    s.push_str("    }\n");
    s.push_str("    New-CsOnlineApplicationInstanceAssociation -Identities @($aaAccount.ObjectId) -ConfigurationId $aa.Identity -ConfigurationType AutoAttendant | Out-Null\n");
    s.push_str(&format!(
        "    Write-Output (\"SUCCESS:associated {{0}} with {{1}}\" -f {}, {})\n",
        aa_upn, aa_name
    ));
    s.push_str(&catch_block("associate accounts"));
    Ok(s)
}

pub(super) fn remove_entity(config: &ProvisionConfig, kind: EntityKind) -> Result<String> {
    let names = config.derived_names();
    let mut s = String::new();
    match kind {
        EntityKind::Group => {
            let group = quote_identifier(&names.group_name)?;
            s.push_str(&format!("# Remove the M365 group {}\n", single_line(&names.group_name)));
            s.push_str(&format!("$groupName = {}\n", group));
            s.push_str("try {\n");
            s.push_str("    $group = Get-MgGroup -Filter (\"displayName eq '{0}'\" -f $groupName) -ConsistencyLevel eventual -CountVariable groupCount | Select-Object -First 1\n");
            s.push_str("    if ($null -eq $group) {\n");
            s.push_str("        Write-Output (\"SUCCESS:group {0} not present\" -f $groupName)\n");
            s.push_str("    } else {\n");
            s.push_str("        Remove-MgGroup -GroupId $group.Id\n");
            s.push_str("        Write-Output (\"SUCCESS:removed group {0}\" -f $groupName)\n");
            s.push_str("    }\n");
            s.push_str(&catch_block("remove group"));
        }
        EntityKind::ResourceAccounts => {
            let cq_upn = quote_identifier(&names.call_queue_account_upn)?;
            let aa_upn = quote_identifier(&names.auto_attendant_account_upn)?;
            s.push_str(&format!(
                "# Remove the resource accounts for {}\n",
                single_line(&names.call_queue_name)
            ));
            s.push_str("try {\n");
            s.push_str(&format!("    foreach ($upn in @({}, {})) {{\n", cq_upn, aa_upn));
            s.push_str("        $account = Get-CsOnlineApplicationInstance | Where-Object { $_.UserPrincipalName -eq $upn }\n");
            s.push_str("        if ($null -eq $account) {\n");
            s.push_str("            Write-Output (\"SUCCESS:resource account {0} not present\" -f $upn)\n");
            s.push_str("        } else {\n");
            s.push_str("            Remove-MgUser -UserId $account.ObjectId\n");
            s.push_str("            Write-Output (\"SUCCESS:removed resource account {0}\" -f $upn)\n");
            s.push_str("        }\n");
            s.push_str("    }\n");
            s.push_str(&catch_block("remove resource accounts"));
        }
        EntityKind::CallQueue => {
            let queue = quote_identifier(&names.call_queue_name)?;
            s.push_str(&format!(
                "# Remove the call queue {}\n",
                single_line(&names.call_queue_name)
            ));
            s.push_str("try {\n");
            s.push_str(&format!(
                "    $queue = Get-CsCallQueue -NameFilter {} | Select-Object -First 1\n",
                queue
            ));
            s.push_str("    if ($null -eq $queue) {\n");
            s.push_str(&format!(
                "        Write-Output (\"SUCCESS:call queue {{0}} not present\" -f {})\n",
                queue
            ));
            s.push_str("    } else {\n");
            s.push_str("        Remove-CsCallQueue -Identity $queue.Identity\n");
            s.push_str(&format!(
                "        Write-Output (\"SUCCESS:removed call queue {{0}}\" -f {})\n",
                queue
            ));
            s.push_str("    }\n");
            s.push_str(&catch_block("remove call queue"));
        }
        EntityKind::AutoAttendant => {
            let aa = quote_identifier(&names.auto_attendant_name)?;
            s.push_str(&format!(
                "# Remove the auto attendant {}\n",
                single_line(&names.auto_attendant_name)
            ));
            s.push_str("try {\n");
            s.push_str(&format!(
                "    $aa = Get-CsAutoAttendant -NameFilter {} | Select-Object -First 1\n",
                aa
            ));
            s.push_str("    if ($null -eq $aa) {\n");
            s.push_str(&format!(
                "        Write-Output (\"SUCCESS:auto attendant {{0}} not present\" -f {})\n",
                aa
            ));
            s.push_str("    } else {\n");
            s.push_str("        Remove-CsAutoAttendant -Identity $aa.Identity\n");
            s.push_str(&format!(
                "        Write-Output (\"SUCCESS:removed auto attendant {{0}}\" -f {})\n",
                aa
            ));
            s.push_str("    }\n");
            s.push_str(&catch_block("remove auto attendant"));
        }
        EntityKind::HolidaySchedule => {
            let schedule = quote_identifier(&names.holiday_schedule_name)?;
            s.push_str(&format!(
                "# Remove the holiday schedule {}\n",
                single_line(&names.holiday_schedule_name)
            ));
            s.push_str("try {\n");
            s.push_str(&format!(
                "    $schedule = Get-CsOnlineSchedule | Where-Object {{ $_.Name -eq {} }} | Select-Object -First 1\n",
                schedule
            ));
            s.push_str("    if ($null -eq $schedule) {\n");
            s.push_str(&format!(
                "        Write-Output (\"SUCCESS:holiday schedule {{0}} not present\" -f {})\n",
                schedule
            ));
            s.push_str("    } else {\n");
            s.push_str("        Remove-CsOnlineSchedule -Id $schedule.Id\n");
            s.push_str(&format!(
                "        Write-Output (\"SUCCESS:removed holiday schedule {{0}}\" -f {})\n",
                schedule
            ));
            s.push_str("    }\n");
            s.push_str(&catch_block("remove holiday schedule"));
        }
    }
    Ok(s)
}

pub(super) fn list_entities(query: EntityQuery) -> String {
    let mut s = String::new();
    match query {
        EntityQuery::Groups => {
            s.push_str("# List provisioned M365 groups\n");
            s.push_str("try {\n");
            s.push_str("    Get-MgGroup -Filter \"startswith(displayName,'grp-')\" -ConsistencyLevel eventual -CountVariable groupCount -All | ForEach-Object {\n");
            s.push_str("        Write-Output (\"GROUP:{0}|{1}|{2}|{3}\" -f $_.DisplayName, $_.Id, $_.MailNickname, $_.Description)\n");
            s.push_str("    }\n");
            s.push_str(&catch_block("list groups"));
        }
        EntityQuery::ResourceAccounts => {
            s.push_str("# List provisioned resource accounts\n");
            s.push_str("try {\n");
            s.push_str("    Get-CsOnlineApplicationInstance | Where-Object { $_.UserPrincipalName -like 'ra-*' } | ForEach-Object {\n");
            s.push_str("        $user = Get-MgUser -UserId $_.ObjectId -Property UsageLocation\n");
            s.push_str("        Write-Output (\"RESOURCEACCOUNT:{0}|{1}|{2}|{3}\" -f $_.DisplayName, $_.UserPrincipalName, $_.ObjectId, $user.UsageLocation)\n");
            s.push_str("    }\n");
            s.push_str(&catch_block("list resource accounts"));
        }
        EntityQuery::CallQueues => {
            s.push_str("# List provisioned call queues\n");
            s.push_str("try {\n");
            s.push_str("    Get-CsCallQueue | Where-Object { $_.Name -like 'cq-*' } | ForEach-Object {\n");
            s.push_str("        Write-Output (\"CALLQUEUE:{0}|{1}|{2}\" -f $_.Name, $_.Identity, $_.LanguageId)\n");
            s.push_str("    }\n");
            s.push_str(&catch_block("list call queues"));
        }
        EntityQuery::AutoAttendants => {
            s.push_str("# List provisioned auto attendants\n");
            s.push_str("try {\n");
            s.push_str("    Get-CsAutoAttendant | Where-Object { $_.Name -like 'aa-*' } | ForEach-Object {\n");
            s.push_str("        Write-Output (\"AUTOATTENDANT:{0}|{1}|{2}|{3}\" -f $_.Name, $_.Identity, $_.LanguageId, $_.TimeZoneId)\n");
            s.push_str("    }\n");
            s.push_str(&catch_block("list auto attendants"));
        }
    }
    s
}
