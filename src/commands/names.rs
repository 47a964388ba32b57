//! Implementation of the `dialplan names` command.

use crate::cli::NamesArgs;
use crate::config::ProvisionConfig;
use crate::error::Result;

/// Execute the `dialplan names` command.
///
/// Prints the full derived-identifier table for a config. Read-only; no
/// audit event is written.
pub(super) fn cmd_names(args: NamesArgs) -> Result<()> {
    let config = ProvisionConfig::load(&args.config)?;
    let names = config.derived_names();

    println!(
        "Derived names for customer '{}', group '{}':",
        config.customer, config.customer_group_name
    );
    println!();
    println!("  Microsoft 365 group:   {}", names.group_name);
    println!("  Group mail nickname:   {}", names.group_mail_nickname);
    println!("  Call queue:            {}", names.call_queue_name);
    println!("  CQ resource account:   {}", names.call_queue_account_name);
    println!("  CQ account UPN:        {}", names.call_queue_account_upn);
    println!("  Auto attendant:        {}", names.auto_attendant_name);
    println!("  AA resource account:   {}", names.auto_attendant_account_name);
    println!("  AA account UPN:        {}", names.auto_attendant_account_upn);
    println!("  Holiday schedule:      {}", names.holiday_schedule_name);

    Ok(())
}
