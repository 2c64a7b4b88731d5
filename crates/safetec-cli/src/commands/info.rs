//! Info command implementation.

use super::{connect, GlobalOpts};
use crate::error::CliError;
use crate::output::get_formatter;

/// Run the info command
pub async fn run_info(opts: &GlobalOpts) -> Result<(), CliError> {
    let formatter = get_formatter(opts.json);
    let (client, info) = connect(opts).await?;

    println!("{}", formatter.format_device_info(client.host(), &info));
    Ok(())
}
