//! Profile queries and selection.

use serde::Serialize;

use crate::device::{DeviceClient, Reading, Transport};
use crate::error::DeviceError;
use crate::model::registers::mnemonic;
use crate::model::{ProfileField, ProfileIndex};
use crate::protocol::response::ParsedResponse;

/// Availability flag of one profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileAvailability {
    pub index: ProfileIndex,
    pub flag: Reading,
}

impl ProfileAvailability {
    /// Only the literal `"1"` counts as available.
    pub fn is_available(&self) -> bool {
        self.flag.value() == Some("1")
    }
}

/// One field of a profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileFieldValue {
    pub field: ProfileField,
    pub value: Reading,
}

/// The eight fields of a profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileSnapshot {
    pub index: ProfileIndex,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    pub fields: Vec<ProfileFieldValue>,
}

/// Result of a profile selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SelectOutcome {
    /// The requested profile was already active; nothing was written
    AlreadyActive { index: ProfileIndex },
    /// The profile was written
    Selected {
        index: ProfileIndex,
        response: ParsedResponse,
    },
}

impl<T: Transport> DeviceClient<T> {
    /// Read the availability flags of profiles 1 to 8, in order.
    pub async fn profile_availability(&self) -> Vec<ProfileAvailability> {
        let mut out = Vec::with_capacity(usize::from(ProfileIndex::MAX));
        for index in ProfileIndex::all() {
            let flag = self.reading(&index.availability_mnemonic()).await;
            out.push(ProfileAvailability { index, flag });
        }
        out
    }

    /// Indices whose availability flag reads `"1"`. A failed read counts as
    /// not available.
    pub async fn list_available_profiles(&self) -> Vec<ProfileIndex> {
        self.profile_availability()
            .await
            .into_iter()
            .filter(ProfileAvailability::is_available)
            .map(|p| p.index)
            .collect()
    }

    /// Read the eight fields of a profile.
    ///
    /// With `warn_if_unavailable` the availability flag is read first and a
    /// warning is attached when the profile is not available. The fields are
    /// read either way.
    pub async fn fetch_profile(
        &self,
        index: ProfileIndex,
        warn_if_unavailable: bool,
    ) -> ProfileSnapshot {
        let warning = if warn_if_unavailable {
            let flag = self.reading(&index.availability_mnemonic()).await;
            match flag {
                Reading::Value(ref v) if v == "1" => None,
                Reading::Failed(_) => Some(format!(
                    "Availability of profile {} could not be read",
                    index
                )),
                _ => Some(format!("Profile {} is not available", index)),
            }
        } else {
            None
        };

        let mut fields = Vec::with_capacity(ProfileField::ALL.len());
        for field in ProfileField::ALL {
            let value = self.reading(&field.mnemonic(index)).await;
            fields.push(ProfileFieldValue { field, value });
        }

        ProfileSnapshot {
            index,
            warning,
            fields,
        }
    }

    /// Read the active profile number.
    pub async fn active_profile(&self) -> Reading {
        self.reading(mnemonic::ACTIVE_PROFILE).await
    }

    /// Make `index` the active profile, unless it already is.
    pub async fn select_profile(&self, index: ProfileIndex) -> Result<SelectOutcome, DeviceError> {
        let current = self.active_profile().await;
        if current.value().map(str::trim) == Some(index.to_string().as_str()) {
            tracing::info!(%index, "profile already active");
            return Ok(SelectOutcome::AlreadyActive { index });
        }

        let response = self
            .write(mnemonic::ACTIVE_PROFILE, Some(&index.to_string()))
            .await?;
        tracing::info!(%index, %response, "profile selected");
        Ok(SelectOutcome::Selected { index, response })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::stub::StubTransport;

    fn idx(i: i64) -> ProfileIndex {
        ProfileIndex::new(i).unwrap()
    }

    #[tokio::test]
    async fn test_list_available_profiles() {
        let stub = StubTransport::new()
            .value("PA1", "1")
            .value("PA2", "0")
            .fail("get/PA3")
            .value("PA4", "1")
            .value("PA5", "true")
            .reply("get/PA6", r#"{"other":"1"}"#)
            .value("PA7", "0")
            .value("PA8", "1");
        let client = DeviceClient::new(stub);

        let available = client.list_available_profiles().await;
        assert_eq!(available, vec![idx(1), idx(4), idx(8)]);
        assert!(available.windows(2).all(|w| w[0] < w[1]));
    }

    #[tokio::test]
    async fn test_availability_marks_failures() {
        let stub = StubTransport::new().value("PA1", "1").fail("get/PA2");
        let client = DeviceClient::new(stub);

        let flags = client.profile_availability().await;
        assert_eq!(flags.len(), 8);
        assert!(flags[0].is_available());
        assert!(flags[1].flag.is_failed());
        assert_eq!(flags[1].flag.to_string(), "ERROR");
        assert_eq!(
            client.transport().requests().first().map(String::as_str),
            Some("get/PA1")
        );
    }

    #[tokio::test]
    async fn test_fetch_profile_warns_but_reads_all_fields() {
        let stub = StubTransport::new()
            .value("PA5", "0")
            .value("PN5", "Holiday")
            .value("PV5", "100");
        let client = DeviceClient::new(stub);

        let profile = client.fetch_profile(idx(5), true).await;

        assert_eq!(profile.warning.as_deref(), Some("Profile 5 is not available"));
        assert_eq!(profile.fields.len(), 8);
        assert_eq!(profile.fields[0].value.as_str(), "Holiday");
        assert_eq!(profile.fields[1].value.as_str(), "100");
        assert!(profile.fields[2].value.is_failed());
        assert_eq!(
            client.transport().requests(),
            vec![
                "get/PA5", "get/PN5", "get/PV5", "get/PT5", "get/PF5", "get/PM5", "get/PR5",
                "get/PB5", "get/PW5"
            ]
        );
    }

    #[tokio::test]
    async fn test_fetch_profile_without_warning_skips_flag() {
        let client = DeviceClient::new(StubTransport::new());
        let profile = client.fetch_profile(idx(1), false).await;

        assert!(profile.warning.is_none());
        assert_eq!(client.transport().count("get/PA1"), 0);
    }

    #[tokio::test]
    async fn test_select_profile_already_active() {
        let stub = StubTransport::new().value("PRF", "3");
        let client = DeviceClient::new(stub);

        let outcome = client.select_profile(idx(3)).await.unwrap();

        assert_eq!(outcome, SelectOutcome::AlreadyActive { index: idx(3) });
        assert!(client
            .transport()
            .requests()
            .iter()
            .all(|p| !p.starts_with("set/")));
    }

    #[tokio::test]
    async fn test_select_profile_writes_once() {
        let stub = StubTransport::new()
            .value("PRF", "1")
            .reply("set/PRF/3", r#"{"setPRF3":"OK"}"#);
        let client = DeviceClient::new(stub);

        let outcome = client.select_profile(idx(3)).await.unwrap();

        assert!(matches!(outcome, SelectOutcome::Selected { .. }));
        assert_eq!(client.transport().requests(), vec!["get/PRF", "set/PRF/3"]);
    }

    #[tokio::test]
    async fn test_select_profile_write_failure() {
        let stub = StubTransport::new().value("PRF", "1").fail("set/PRF/2");
        let client = DeviceClient::new(stub);

        assert!(client.select_profile(idx(2)).await.is_err());
    }
}
