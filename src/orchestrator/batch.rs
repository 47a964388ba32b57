//! Combined-script batch provisioning plan.

use super::PROVISION_SEQUENCE;
use crate::compose::{compose, Operation};
use crate::config::ProvisionConfig;
use crate::error::{DialplanError, Result};
use crate::gateway::{ExecutionGateway, GatewayOutput};
use crate::sanitize::sanitize_identifier;

/// A batch run: the full provisioning sequence for each config, combined
/// into one script and dispatched as a single unit.
///
/// The combined script carries one shared session-setup fragment, then
/// per config in input order a `PROGRESS:i/n|group-name` marker followed
/// by the whole sequence. There is no per-entry isolation: a failure in
/// entry N does not stop later entries from running, and failures are
/// discovered by scanning the output for ERROR records. At-least-attempt,
/// no rollback.
#[derive(Debug)]
pub struct BatchPlan {
    configs: Vec<ProvisionConfig>,
}

impl BatchPlan {
    pub fn new(configs: Vec<ProvisionConfig>) -> Self {
        BatchPlan { configs }
    }

    pub fn configs(&self) -> &[ProvisionConfig] {
        &self.configs
    }

    pub fn len(&self) -> usize {
        self.configs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.configs.is_empty()
    }

    /// Compose the combined script for the whole batch.
    ///
    /// Any composition failure aborts the whole batch before anything is
    /// dispatched; a partially composed script is never returned.
    pub fn combined_script(&self) -> Result<String> {
        if self.configs.is_empty() {
            return Err(DialplanError::UserError(
                "batch contains no rows to provision".to_string(),
            ));
        }

        let total = self.configs.len();
        let mut script = compose(&self.configs[0], Operation::SessionSetup)?;

        for (i, config) in self.configs.iter().enumerate() {
            let group_name = sanitize_identifier(&config.derived_names().group_name)?;

            script.push('\n');
            script.push_str(&format!(
                "Write-Output 'PROGRESS:{}/{}|{}'\n",
                i + 1,
                total,
                group_name
            ));

            for (_, operation) in PROVISION_SEQUENCE {
                script.push('\n');
                script.push_str(&compose(config, *operation)?);
            }
        }

        Ok(script)
    }

    /// Compose and dispatch the combined script as one gateway call.
    ///
    /// Returns the parsed output whether or not it contains ERROR
    /// records; the caller decides how to report partial failures. Only
    /// gateway-level problems (spawn, timeout) are errors here.
    pub fn dispatch(&self, gateway: &mut dyn ExecutionGateway) -> Result<GatewayOutput> {
        let script = self.combined_script()?;
        gateway.dispatch(&script)
    }
}
