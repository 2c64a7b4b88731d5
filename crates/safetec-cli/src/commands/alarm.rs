//! Alarm and lookup-table commands.

use safetec_core::model::lookup::{ALARM_CODES, VALVE_STATES};

use super::{connect, GlobalOpts};
use crate::cli::{AlarmArgs, AlarmCommands};
use crate::error::CliError;
use crate::output::get_formatter;

/// Run an alarm subcommand
pub async fn run_alarm(args: AlarmArgs, opts: &GlobalOpts) -> Result<(), CliError> {
    let formatter = get_formatter(opts.json);

    match args.command {
        AlarmCommands::Codes => {
            println!(
                "{}",
                formatter.format_code_table("Alarm codes", ALARM_CODES)
            );
        }
        AlarmCommands::Clear => {
            let (client, _info) = connect(opts).await?;
            let report = client.clear_ongoing_alarm().await;
            println!("{}", formatter.format_alarm_clear(&report));
        }
    }

    Ok(())
}

/// Print the valve state table. No device needed.
pub fn run_valve_states(opts: &GlobalOpts) -> Result<(), CliError> {
    let formatter = get_formatter(opts.json);
    println!(
        "{}",
        formatter.format_code_table("Valve states", VALVE_STATES)
    );
    Ok(())
}
