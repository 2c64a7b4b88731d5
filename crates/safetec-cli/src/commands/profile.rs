//! Profile command implementations.

use safetec_core::ProfileIndex;

use super::{connect, GlobalOpts};
use crate::cli::{ProfileArgs, ProfileCommands};
use crate::error::CliError;
use crate::output::get_formatter;

/// Run a profile subcommand
pub async fn run_profile(args: ProfileArgs, opts: &GlobalOpts) -> Result<(), CliError> {
    // Reject a bad index before touching the network
    let requested = match &args.command {
        ProfileCommands::Select(a) => Some(ProfileIndex::new(a.index)?),
        ProfileCommands::Show(a) => a.index.map(ProfileIndex::new).transpose()?,
        ProfileCommands::Active | ProfileCommands::List => None,
    };

    let formatter = get_formatter(opts.json);
    let (client, _info) = connect(opts).await?;

    match args.command {
        ProfileCommands::Active => {
            let active = client.active_profile().await;
            println!("{}", formatter.format_active_profile(&active));
        }
        ProfileCommands::Select(_) => {
            let index = requested.ok_or_else(|| {
                CliError::InvalidArgument("profile number required".to_string())
            })?;
            let outcome = client.select_profile(index).await?;
            println!("{}", formatter.format_select(&outcome));
        }
        ProfileCommands::Show(_) => {
            let index = match requested {
                Some(index) => index,
                None => active_index(&client.active_profile().await)?,
            };
            let profile = client.fetch_profile(index, true).await;
            println!("{}", formatter.format_profile(&profile));
        }
        ProfileCommands::List => {
            let flags = client.profile_availability().await;
            let mut profiles = Vec::new();
            for flag in flags.iter().filter(|f| f.is_available()) {
                profiles.push(client.fetch_profile(flag.index, false).await);
            }
            println!("{}", formatter.format_profile_list(&flags, &profiles));
        }
    }

    Ok(())
}

/// Turn the active-profile register into an index.
fn active_index(active: &safetec_core::Reading) -> Result<ProfileIndex, CliError> {
    let value = active.value().ok_or_else(|| {
        CliError::InvalidArgument(format!(
            "active profile could not be read ({}); pass a profile number",
            active
        ))
    })?;

    let number: i64 = value.trim().parse().map_err(|_| {
        CliError::InvalidArgument(format!("device reported active profile '{}'", value))
    })?;
    Ok(ProfileIndex::new(number)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use safetec_core::Reading;

    #[test]
    fn test_active_index_parses_register() {
        let index = active_index(&Reading::Value("3".to_string())).unwrap();
        assert_eq!(index.get(), 3);
    }

    #[test]
    fn test_active_index_rejects_unreadable() {
        assert!(active_index(&Reading::Absent).is_err());
        assert!(active_index(&Reading::Value("9".to_string())).is_err());
        assert!(active_index(&Reading::Value("x".to_string())).is_err());
    }
}
