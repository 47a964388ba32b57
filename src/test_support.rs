use crate::config::{ProvisionConfig, TimeRange, WeeklySchedule};
use crate::error::{DialplanError, Result};
use crate::gateway::{ExecutionGateway, GatewayOutput, SessionState};
use chrono::NaiveTime;
use std::collections::VecDeque;

/// A complete config for one sample customer group.
pub(crate) fn sample_config() -> ProvisionConfig {
    sample_config_for("luc")
}

/// Like [`sample_config`], with a caller-chosen customer group name.
pub(crate) fn sample_config_for(group: &str) -> ProvisionConfig {
    ProvisionConfig {
        customer: "acm".to_string(),
        customer_group_name: group.to_string(),
        ms_fallback_domain: "contoso.com".to_string(),
        anr_name: "hn".to_string(),
        phone_number: "+41441234567".to_string(),
        schedule: WeeklySchedule::business_days(vec![TimeRange {
            start: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            end: NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
        }]),
        ..Default::default()
    }
}

/// Gateway double that replays canned outputs instead of running anything.
///
/// Outputs are consumed in push order, one per dispatch; once the queue is
/// empty every dispatch returns a plain `SUCCESS:done`. Session handling
/// mirrors the real shell gateway: an output carrying a SESSION record
/// flips the session to Ready.
pub(crate) struct ScriptedGateway {
    outputs: VecDeque<String>,
    pub(crate) dispatched: Vec<String>,
    pub(crate) session: SessionState,
    pub(crate) gateway_error: Option<String>,
}

impl ScriptedGateway {
    pub(crate) fn new() -> Self {
        ScriptedGateway {
            outputs: VecDeque::new(),
            dispatched: Vec::new(),
            session: SessionState::Disconnected,
            gateway_error: None,
        }
    }

    /// A gateway whose session is already established.
    pub(crate) fn ready() -> Self {
        ScriptedGateway {
            session: SessionState::Ready,
            ..Self::new()
        }
    }

    pub(crate) fn push_output(&mut self, raw: &str) {
        self.outputs.push_back(raw.to_string());
    }
}

impl ExecutionGateway for ScriptedGateway {
    fn dispatch(&mut self, script: &str) -> Result<GatewayOutput> {
        self.dispatched.push(script.to_string());

        if let Some(message) = &self.gateway_error {
            return Err(DialplanError::Gateway(message.clone()));
        }

        let raw = self
            .outputs
            .pop_front()
            .unwrap_or_else(|| "SUCCESS:done".to_string());
        let output = GatewayOutput::parse(raw);

        if output.session_record().is_some() {
            self.session = SessionState::Ready;
        }

        Ok(output)
    }

    fn session(&self) -> SessionState {
        self.session
    }
}
