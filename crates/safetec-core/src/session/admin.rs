//! Admin-mode bracket.
//!
//! Admin mode is device-held state. Entering is a write of `(1)` to `ADM`,
//! leaving is a clear of `ADM`. The client assumes exclusive access to the
//! device while a bracket is open.

use std::future::Future;

use crate::device::{DeviceClient, Transport};
use crate::model::registers::{mnemonic, ADMIN_ENTER_PARAM};

/// Open admin session. Must be closed with [`AdminGuard::exit`].
///
/// Dropping an unreleased guard (the surrounding future was cancelled)
/// cannot send the clear request and only logs a warning.
#[must_use = "an admin session must be closed with exit()"]
pub struct AdminGuard<'a, T: Transport> {
    client: &'a DeviceClient<T>,
    released: bool,
}

impl<'a, T: Transport> AdminGuard<'a, T> {
    /// Enter admin mode. A failed enter is logged; the session still counts
    /// as open so that the exit is always attempted.
    pub async fn enter(client: &'a DeviceClient<T>) -> AdminGuard<'a, T> {
        match client.write(mnemonic::ADMIN, Some(ADMIN_ENTER_PARAM)).await {
            Ok(response) => tracing::info!(host = client.host(), %response, "admin mode entered"),
            Err(e) => tracing::warn!(host = client.host(), error = %e, "failed to enter admin mode"),
        }
        AdminGuard {
            client,
            released: false,
        }
    }

    /// Leave admin mode.
    pub async fn exit(mut self) {
        self.released = true;
        match self.client.clear(mnemonic::ADMIN).await {
            Ok(_) => tracing::info!(host = self.client.host(), "admin mode left"),
            Err(e) => tracing::warn!(host = self.client.host(), error = %e, "failed to leave admin mode"),
        }
    }
}

impl<T: Transport> Drop for AdminGuard<'_, T> {
    fn drop(&mut self) {
        if !self.released {
            tracing::warn!(
                host = self.client.host(),
                "admin session dropped without exit; device may remain in admin mode"
            );
        }
    }
}

impl<T: Transport> DeviceClient<T> {
    /// Run `body` inside an admin session.
    ///
    /// Exactly one enter and one exit are sent, in that order, whatever the
    /// body's reads return.
    ///
    /// The exit is only sent if this future runs to completion. A panic in
    /// `body` or dropping the future (e.g. losing a `select!` race) leaves the
    /// device in admin mode and only logs a warning, so do not call this from
    /// a cancellable path such as the Ctrl-C race around the logging loop.
    pub async fn with_admin_session<F, Fut, R>(&self, body: F) -> R
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = R>,
    {
        let guard = AdminGuard::enter(self).await;
        let out = body().await;
        guard.exit().await;
        out
    }
}

#[cfg(test)]
mod tests {
    use crate::device::stub::StubTransport;
    use crate::device::DeviceClient;

    #[tokio::test]
    async fn test_bracket_order() {
        let stub = StubTransport::new()
            .reply("set/ADM/(1)", r#"{"setADM(1)":"SERVICE"}"#)
            .reply("clr/ADM", r#"{"clrADM":"OK"}"#)
            .value("ALM", "FF,A3");
        let client = DeviceClient::new(stub);

        let history = client
            .with_admin_session(|| async { client.reading("ALM").await })
            .await;

        assert_eq!(history.as_str(), "FF,A3");
        assert_eq!(
            client.transport().requests(),
            vec!["set/ADM/(1)", "get/ALM", "clr/ADM"]
        );
    }

    #[tokio::test]
    async fn test_exit_sent_when_body_reads_fail() {
        let stub = StubTransport::new()
            .reply("set/ADM/(1)", r#"{"setADM(1)":"SERVICE"}"#)
            .reply("clr/ADM", r#"{"clrADM":"OK"}"#)
            .fail("get/NET");
        let client = DeviceClient::new(stub);

        let supply = client
            .with_admin_session(|| async { client.reading("NET").await })
            .await;

        assert!(supply.is_failed());
        assert_eq!(client.transport().count("set/ADM/(1)"), 1);
        assert_eq!(client.transport().count("clr/ADM"), 1);
        assert_eq!(client.transport().requests().last().unwrap(), "clr/ADM");
    }

    #[tokio::test]
    async fn test_exit_sent_when_enter_fails() {
        let stub = StubTransport::new()
            .fail("set/ADM/(1)")
            .reply("clr/ADM", r#"{"clrADM":"OK"}"#);
        let client = DeviceClient::new(stub);

        client.with_admin_session(|| async {}).await;

        assert_eq!(
            client.transport().requests(),
            vec!["set/ADM/(1)", "clr/ADM"]
        );
    }
}
