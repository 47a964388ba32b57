//! Tests for script composition.

use crate::compose::{compose, AccountKind, EntityKind, EntityQuery, Operation};
use crate::config::{
    CallFlowAction, CallFlowSpec, Greeting, HolidayEntry, ProvisionConfig, QueuePolicy, TimeRange,
    WeeklySchedule,
};
use chrono::{NaiveDate, NaiveTime};

fn hhmm(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn complete_config() -> ProvisionConfig {
    ProvisionConfig {
        customer: "acm".to_string(),
        customer_group_name: "luc".to_string(),
        ms_fallback_domain: "contoso.com".to_string(),
        anr_name: "hn".to_string(),
        phone_number: "+41441234567".to_string(),
        schedule: WeeklySchedule::business_days(vec![TimeRange {
            start: hhmm(8, 0),
            end: hhmm(17, 0),
        }]),
        ..Default::default()
    }
}

fn holiday(y: i32, m: u32, d: u32) -> HolidayEntry {
    HolidayEntry {
        date: date(y, m, d),
        time: hhmm(0, 0),
        name: None,
        end_date: None,
        end_time: None,
    }
}

#[test]
fn test_session_setup_imports_modules_and_probes_tenant() {
    let script = compose(&complete_config(), Operation::SessionSetup).unwrap();

    assert!(script.contains("$ErrorActionPreference = 'Stop'"));
    assert!(script.contains("Import-Module MicrosoftTeams"));
    assert!(script.contains("Get-CsTenant"));
    assert!(script.contains("SESSION:{0}|{1}"));
}

#[test]
fn test_create_group_reuses_an_existing_group() {
    let script = compose(&complete_config(), Operation::CreateGroup).unwrap();

    assert!(script.contains("$groupName = 'grp-acm-luc'"));
    assert!(script.contains("Get-MgGroup -Filter"));
    assert!(script.contains("if ($null -eq $group)"));
    assert!(script.contains("New-MgGroup -DisplayName $groupName"));
    assert!(script.contains("Start-Sleep -Seconds 10"));
    assert!(script.contains("GROUP:{0}|{1}|{2}|{3}"));
}

#[test]
fn test_create_group_rejects_metacharacters_in_identity() {
    let config = ProvisionConfig {
        customer: "acm;Remove-Item".to_string(),
        ..complete_config()
    };

    let err = compose(&config, Operation::CreateGroup).unwrap_err();
    assert!(err.to_string().contains("disallowed"));
}

#[test]
fn test_resource_account_uses_the_matching_app_id() {
    let config = complete_config();

    let cq = compose(&config, Operation::CreateResourceAccount(AccountKind::CallQueue)).unwrap();
    assert!(cq.contains("'ra-cq-acm-luc@contoso.com'"));
    assert!(cq.contains("'11cd3e2e-fccb-42ad-ad00-878b93575e07'"));
    assert!(cq.contains("Start-Sleep -Seconds 20"));
    assert!(cq.contains("-UsageLocation 'DE'"));
    assert!(cq.contains("RESOURCEACCOUNT:{0}|{1}|{2}|{3}"));

    let aa =
        compose(&config, Operation::CreateResourceAccount(AccountKind::AutoAttendant)).unwrap();
    assert!(aa.contains("'ra-aa-acm-hn-luc@contoso.com'"));
    assert!(aa.contains("'ce933385-9390-45d1-9512-c8d228074e07'"));
    assert!(!aa.contains("11cd3e2e"));
}

#[test]
fn test_assign_license_names_the_sku_and_waits() {
    let script =
        compose(&complete_config(), Operation::AssignLicense(AccountKind::CallQueue)).unwrap();

    assert!(script.contains("'PHONESYSTEM_VIRTUALUSER'"));
    assert!(script.contains("Set-MgUserLicense"));
    assert!(script.contains("Start-Sleep -Seconds 30"));
    assert!(script.contains("$upn = 'ra-cq-acm-luc@contoso.com'"));
}

#[test]
fn test_assign_license_and_phone_orders_phone_after_the_wait() {
    let script = compose(&complete_config(), Operation::AssignLicenseAndPhone).unwrap();

    assert!(script.contains("$upn = 'ra-aa-acm-hn-luc@contoso.com'"));
    assert!(script.contains("-PhoneNumber '+41441234567'"));
    assert!(script.contains("-PhoneNumberType CallingPlan"));

    let wait = script.find("Start-Sleep -Seconds 30").unwrap();
    let phone = script.find("Set-CsPhoneNumberAssignment").unwrap();
    assert!(wait < phone);
}

#[test]
fn test_call_queue_policies_default_when_unset() {
    let script = compose(&complete_config(), Operation::CreateCallQueue).unwrap();

    assert!(script.contains("Name = 'cq-acm-luc'"));
    assert!(script.contains("LanguageId = 'de-DE'"));
    assert!(script.contains("OverflowThreshold = 15"));
    assert!(script.contains("OverflowAction = 'DisconnectWithBusy'"));
    assert!(script.contains("TimeoutThreshold = 30"));
    assert!(script.contains("TimeoutAction = 'Disconnect'"));
    // No configured no-agents policy means the cmdlet default applies.
    assert!(!script.contains("NoAgentAction"));
}

#[test]
fn test_call_queue_timeout_threshold_is_clamped_to_the_floor() {
    let config = ProvisionConfig {
        timeout: QueuePolicy {
            threshold: Some(5),
            action: None,
        },
        ..complete_config()
    };

    let script = compose(&config, Operation::CreateCallQueue).unwrap();
    assert!(script.contains("TimeoutThreshold = 15"));
}

#[test]
fn test_call_queue_overflow_forwards_to_a_guid_target() {
    let config = ProvisionConfig {
        overflow: QueuePolicy {
            threshold: Some(20),
            action: Some(CallFlowAction::TransferToTarget {
                target: "0f9a3bce-24b8-4e6e-8b9f-3c5d2e3e9a01".to_string(),
            }),
        },
        ..complete_config()
    };

    let script = compose(&config, Operation::CreateCallQueue).unwrap();
    assert!(script.contains("OverflowThreshold = 20"));
    assert!(script.contains("OverflowAction = 'Forward'"));
    assert!(script.contains("OverflowActionTarget = '0f9a3bce-24b8-4e6e-8b9f-3c5d2e3e9a01'"));
}

#[test]
fn test_call_queue_voicemail_guid_routes_to_shared_mailbox() {
    let config = ProvisionConfig {
        overflow: QueuePolicy {
            threshold: None,
            action: Some(CallFlowAction::TransferToVoicemail {
                target: "0f9a3bce-24b8-4e6e-8b9f-3c5d2e3e9a01".to_string(),
            }),
        },
        ..complete_config()
    };

    let script = compose(&config, Operation::CreateCallQueue).unwrap();
    assert!(script.contains("OverflowAction = 'SharedVoicemail'"));
    assert!(script.contains("EnableOverflowSharedVoicemailTranscription = $true"));
}

#[test]
fn test_call_queue_voicemail_upn_routes_to_personal_mailbox() {
    let config = ProvisionConfig {
        timeout: QueuePolicy {
            threshold: None,
            action: Some(CallFlowAction::TransferToVoicemail {
                target: "max.muster@contoso.com".to_string(),
            }),
        },
        ..complete_config()
    };

    let script = compose(&config, Operation::CreateCallQueue).unwrap();
    assert!(script.contains("TimeoutAction = 'Voicemail'"));
    assert!(script.contains("Get-CsOnlineUser -Identity 'max.muster@contoso.com'"));
}

#[test]
fn test_attendant_without_greetings_emits_no_prompt() {
    let script = compose(&complete_config(), Operation::CreateAutoAttendant).unwrap();

    assert!(!script.contains("New-CsAutoAttendantPrompt"));
    assert!(!script.contains("-Greetings"));
}

#[test]
fn test_attendant_tts_greeting_appears_exactly_once() {
    let config = ProvisionConfig {
        business_hours_flow: CallFlowSpec {
            greeting: Greeting::TextToSpeech {
                prompt: "Willkommen bei Acme".to_string(),
            },
            action: CallFlowAction::Disconnect,
        },
        ..complete_config()
    };

    let script = compose(&config, Operation::CreateAutoAttendant).unwrap();
    assert_eq!(script.matches("Willkommen bei Acme").count(), 1);
    assert!(script.contains("-TextToSpeechPrompt 'Willkommen bei Acme'"));
    assert!(script.contains("-Greetings @($bhGreeting)"));
}

#[test]
fn test_attendant_empty_tts_prompt_gets_a_neutral_default() {
    let config = ProvisionConfig {
        business_hours_flow: CallFlowSpec {
            greeting: Greeting::TextToSpeech {
                prompt: "   ".to_string(),
            },
            action: CallFlowAction::Disconnect,
        },
        ..complete_config()
    };

    let script = compose(&config, Operation::CreateAutoAttendant).unwrap();
    assert!(script.contains("-TextToSpeechPrompt 'Welcome.'"));
}

#[test]
fn test_attendant_prompt_injection_is_neutralized() {
    let config = ProvisionConfig {
        business_hours_flow: CallFlowSpec {
            greeting: Greeting::TextToSpeech {
                prompt: "Hi $(Remove-Item C:)'; Invoke-Expression 'calc".to_string(),
            },
            action: CallFlowAction::Disconnect,
        },
        ..complete_config()
    };

    let script = compose(&config, Operation::CreateAutoAttendant).unwrap();
    assert!(!script.contains("$("));
    assert!(!script.contains(';'));
    assert!(!script.contains('`'));
    // The quote that would close the literal is padded into a harmless pair.
    assert!(script.contains("C:''"));
}

#[test]
fn test_attendant_audio_greeting_references_the_file() {
    let config = ProvisionConfig {
        after_hours_flow: CallFlowSpec {
            greeting: Greeting::AudioFile {
                id: "b0ac3e11-9a7e-4c8f-9d2e-5a6f7c8d9e0f".to_string(),
            },
            action: CallFlowAction::Disconnect,
        },
        ..complete_config()
    };

    let script = compose(&config, Operation::CreateAutoAttendant).unwrap();
    assert!(
        script.contains("Get-CsOnlineAudioFile -Identity 'b0ac3e11-9a7e-4c8f-9d2e-5a6f7c8d9e0f'")
    );
    assert!(script.contains("-Greetings @($ahGreeting)"));
}

#[test]
fn test_attendant_transfer_with_empty_target_degrades_to_disconnect() {
    let config = ProvisionConfig {
        business_hours_flow: CallFlowSpec {
            greeting: Greeting::None,
            action: CallFlowAction::TransferToTarget {
                target: "  ".to_string(),
            },
        },
        ..complete_config()
    };

    let script = compose(&config, Operation::CreateAutoAttendant).unwrap();
    assert!(script.contains("-Action DisconnectCall"));
    assert!(!script.contains("TransferCallToTarget"));
    assert!(!script.contains("New-CsAutoAttendantCallableEntity"));
}

#[test]
fn test_attendant_transfer_targets_are_classified() {
    let mut config = complete_config();

    config.business_hours_flow.action = CallFlowAction::TransferToTarget {
        target: "ra-cq-acm-luc@contoso.com".to_string(),
    };
    let script = compose(&config, Operation::CreateAutoAttendant).unwrap();
    assert!(script.contains("-Type ApplicationEndpoint"));

    config.business_hours_flow.action = CallFlowAction::TransferToTarget {
        target: "max.muster@contoso.com".to_string(),
    };
    let script = compose(&config, Operation::CreateAutoAttendant).unwrap();
    assert!(script.contains("(Get-CsOnlineUser -Identity 'max.muster@contoso.com').Identity"));
    assert!(script.contains("-Type User"));

    config.business_hours_flow.action = CallFlowAction::TransferToTarget {
        target: "+41449999999".to_string(),
    };
    let script = compose(&config, Operation::CreateAutoAttendant).unwrap();
    assert!(script.contains("'tel:+41449999999'"));
    assert!(script.contains("-Type ExternalPstn"));
}

#[test]
fn test_attendant_voicemail_guid_heuristic_is_recorded_in_the_script() {
    let mut config = complete_config();

    config.after_hours_flow.action = CallFlowAction::TransferToVoicemail {
        target: "0f9a3bce-24b8-4e6e-8b9f-3c5d2e3e9a01".to_string(),
    };
    let script = compose(&config, Operation::CreateAutoAttendant).unwrap();
    assert!(script.contains("-Type SharedVoicemail -EnableTranscription"));
    assert!(
        script.contains("# voicemail target 0f9a3bce-24b8-4e6e-8b9f-3c5d2e3e9a01 is GUID-shaped")
    );

    config.after_hours_flow.action = CallFlowAction::TransferToVoicemail {
        target: "max.muster@contoso.com".to_string(),
    };
    let script = compose(&config, Operation::CreateAutoAttendant).unwrap();
    assert!(script.contains("resolves to a user; routing to personal voicemail"));
    assert!(script.contains("-Type User"));
}

#[test]
fn test_attendant_weekly_schedule_covers_only_open_days() {
    let script = compose(&complete_config(), Operation::CreateAutoAttendant).unwrap();

    assert!(script.contains("WeeklyRecurrentSchedule = $true"));
    assert!(script.contains("Complement = $true"));
    for day in ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday"] {
        assert!(
            script.contains(&format!(
                "{}Hours = @((New-CsOnlineTimeRange -Start '08:00' -End '17:00'))",
                day
            )),
            "missing hours for {}",
            day
        );
    }
    assert!(!script.contains("SaturdayHours"));
    assert!(!script.contains("SundayHours"));
    assert!(script.contains("-Type AfterHours"));
}

#[test]
fn test_attendant_split_shift_emits_both_ranges() {
    let config = ProvisionConfig {
        schedule: WeeklySchedule::business_days(vec![
            TimeRange {
                start: hhmm(8, 0),
                end: hhmm(12, 0),
            },
            TimeRange {
                start: hhmm(13, 0),
                end: hhmm(17, 30),
            },
        ]),
        ..complete_config()
    };

    let script = compose(&config, Operation::CreateAutoAttendant).unwrap();
    assert!(script.contains(
        "MondayHours = @((New-CsOnlineTimeRange -Start '08:00' -End '12:00'), (New-CsOnlineTimeRange -Start '13:00' -End '17:30'))"
    ));
}

#[test]
fn test_attendant_holiday_schedule_appears_only_with_entries() {
    let config = complete_config();
    let script = compose(&config, Operation::CreateAutoAttendant).unwrap();
    assert!(!script.contains("New-CsOnlineDateTimeRange"));
    assert!(!script.contains("$holidayAssoc"));

    let config = ProvisionConfig {
        holidays: vec![holiday(2026, 8, 1)],
        ..complete_config()
    };
    let script = compose(&config, Operation::CreateAutoAttendant).unwrap();
    assert!(script.contains("-FixedSchedule -DateTimeRanges $holidayRanges"));
    assert!(script.contains("-Name 'holidays-acm-luc'"));
    assert!(script.contains("CallHandlingAssociations = @($afterHoursAssoc, $holidayAssoc)"));
}

#[test]
fn test_holiday_ranges_use_day_month_year_and_default_end() {
    let config = ProvisionConfig {
        holidays: vec![holiday(2026, 1, 1)],
        ..complete_config()
    };

    let script = compose(&config, Operation::CreateAutoAttendant).unwrap();
    assert!(script.contains("-Start '01/01/2026 00:00'"));
    assert!(script.contains("-End '02/01/2026 00:00'"));
}

#[test]
fn test_holiday_multi_day_range_ends_at_the_given_time() {
    let entry = HolidayEntry {
        date: date(2026, 12, 24),
        time: hhmm(12, 0),
        name: Some("Weihnachtspause".to_string()),
        end_date: Some(date(2027, 1, 2)),
        end_time: Some(hhmm(8, 0)),
    };
    let config = ProvisionConfig {
        holidays: vec![entry],
        ..complete_config()
    };

    let script = compose(&config, Operation::CreateAutoAttendant).unwrap();
    assert!(script.contains("# Weihnachtspause"));
    assert!(script.contains("-Start '24/12/2026 12:00' -End '02/01/2027 08:00'"));
}

#[test]
fn test_attach_holiday_schedule_requires_entries() {
    let err = compose(&complete_config(), Operation::AttachHolidaySchedule).unwrap_err();
    assert!(err.to_string().contains("no holiday entries"));
}

#[test]
fn test_attach_holiday_schedule_sorts_entries_by_date() {
    let config = ProvisionConfig {
        holidays: vec![holiday(2026, 12, 25), holiday(2026, 1, 1)],
        ..complete_config()
    };

    let script = compose(&config, Operation::AttachHolidaySchedule).unwrap();
    let first = script.find("'01/01/2026 00:00'").unwrap();
    let second = script.find("'25/12/2026 00:00'").unwrap();
    assert!(first < second);
    assert!(script.contains("-Type Holiday"));
}

#[test]
fn test_associate_accounts_covers_both_applications() {
    let script = compose(&complete_config(), Operation::AssociateAccounts).unwrap();

    assert!(script.contains("-ConfigurationType CallQueue"));
    assert!(script.contains("-ConfigurationType AutoAttendant"));
    assert_eq!(script.matches("New-CsOnlineApplicationInstanceAssociation").count(), 2);
    assert_eq!(script.matches("SUCCESS:associated").count(), 2);
}

#[test]
fn test_remove_scripts_tolerate_absent_entities() {
    let config = complete_config();
    let kinds = [
        EntityKind::Group,
        EntityKind::ResourceAccounts,
        EntityKind::CallQueue,
        EntityKind::AutoAttendant,
        EntityKind::HolidaySchedule,
    ];

    for kind in kinds {
        let script = compose(&config, Operation::RemoveEntity(kind)).unwrap();
        assert!(script.contains("not present"), "missing tolerance for {:?}", kind);
        assert!(script.contains("SUCCESS:"), "missing success line for {:?}", kind);
        assert!(script.contains("ERROR:"), "missing catch for {:?}", kind);
    }
}

#[test]
fn test_remove_resource_accounts_names_both_upns() {
    let script = compose(&complete_config(), Operation::RemoveEntity(EntityKind::ResourceAccounts))
        .unwrap();

    assert!(script.contains("'ra-cq-acm-luc@contoso.com'"));
    assert!(script.contains("'ra-aa-acm-hn-luc@contoso.com'"));
}

#[test]
fn test_list_scripts_emit_tagged_records() {
    let config = complete_config();
    let cases = [
        (EntityQuery::Groups, "GROUP:{0}|{1}|{2}|{3}"),
        (EntityQuery::ResourceAccounts, "RESOURCEACCOUNT:{0}|{1}|{2}|{3}"),
        (EntityQuery::CallQueues, "CALLQUEUE:{0}|{1}|{2}"),
        (EntityQuery::AutoAttendants, "AUTOATTENDANT:{0}|{1}|{2}|{3}"),
    ];

    for (query, tag) in cases {
        let script = compose(&config, Operation::ListEntities(query)).unwrap();
        assert!(script.contains(tag), "missing record tag for {:?}", query);
    }
}

#[test]
fn test_operation_names_all_parse() {
    for name in Operation::NAMES {
        assert!(Operation::from_str(name).is_some(), "unparsed op {}", name);
    }
    assert_eq!(Operation::from_str("frobnicate"), None);
    assert_eq!(
        Operation::from_str("create-call-queue"),
        Some(Operation::CreateCallQueue)
    );
}

#[test]
fn test_quoted_customer_name_cannot_escape_the_literal() {
    let config = ProvisionConfig {
        business_hours_flow: CallFlowSpec {
            greeting: Greeting::TextToSpeech {
                prompt: "it's open".to_string(),
            },
            action: CallFlowAction::Disconnect,
        },
        ..complete_config()
    };

    let script = compose(&config, Operation::CreateAutoAttendant).unwrap();
    assert!(script.contains("'it''s open'"));
}
