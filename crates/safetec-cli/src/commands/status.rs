//! Status command implementation.

use super::{connect, GlobalOpts};
use crate::error::CliError;
use crate::output::get_formatter;

/// Run the status command
pub async fn run_status(opts: &GlobalOpts) -> Result<(), CliError> {
    let formatter = get_formatter(opts.json);
    let (client, info) = connect(opts).await?;

    let status = client.fetch_full_status().await;

    println!("{}", formatter.format_status(&info, &status));
    Ok(())
}
