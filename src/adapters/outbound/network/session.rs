use crate::errata::domain::{Advisory, PackageIdentity};
use crate::ports::outbound::{
    Credentials, ErrataPublisher, ErrataRpc, PackageCatalog, RpcResult, SessionToken,
};
use crate::shared::error::ErrataError;
use crate::shared::Result;
use anyhow::Context;
use async_trait::async_trait;
use std::future::Future;
use tokio::sync::RwLock;

/// SessionClient wraps an ErrataRpc transport with a logged-in session.
///
/// Every call runs through [`SessionClient::with_session`]: when the server
/// reports the session as expired the client logs in again and retries the
/// call exactly once. A second consecutive expiry, or any other fault, is
/// returned to the caller unchanged.
pub struct SessionClient<R: ErrataRpc> {
    rpc: R,
    credentials: Credentials,
    token: RwLock<SessionToken>,
}

impl<R: ErrataRpc> SessionClient<R> {
    /// Logs in and returns a client holding the new session
    ///
    /// # Errors
    /// Returns an error if the login is rejected or the server is unreachable
    pub async fn connect(rpc: R, credentials: Credentials) -> Result<Self> {
        let token = rpc
            .login(&credentials)
            .await
            .with_context(|| format!("Failed to log in as {}", credentials.login))?;
        log::info!("Logged in to errata server as {}", credentials.login);

        Ok(Self {
            rpc,
            credentials,
            token: RwLock::new(token),
        })
    }

    async fn relogin(&self) -> RpcResult<SessionToken> {
        let mut token = self.token.write().await;
        let fresh = self.rpc.login(&self.credentials).await?;
        *token = fresh.clone();
        Ok(fresh)
    }

    /// Runs `op` with the current session token, renewing the session and
    /// retrying once if it has expired.
    pub async fn with_session<T, F, Fut>(&self, op: F) -> RpcResult<T>
    where
        F: Fn(SessionToken) -> Fut,
        Fut: Future<Output = RpcResult<T>>,
    {
        let token = self.token.read().await.clone();
        match op(token).await {
            Err(e) if e.is_session_expired() => {
                log::info!("Session expired, logging in again");
                let token = self.relogin().await?;
                op(token).await
            }
            result => result,
        }
    }
}

#[async_trait]
impl<R: ErrataRpc> ErrataPublisher for SessionClient<R> {
    async fn advisory_exists(&self, advisory_name: &str) -> Result<bool> {
        let details = self
            .with_session(|token| async move {
                self.rpc.advisory_details(&token, advisory_name).await
            })
            .await
            .with_context(|| format!("Failed to look up advisory {}", advisory_name))?;
        Ok(details.is_some())
    }

    async fn find_package(&self, package: &PackageIdentity) -> Result<Option<PackageIdentity>> {
        let found = self
            .with_session(|token| async move {
                self.rpc.find_package_by_nvrea(&token, package).await
            })
            .await
            .with_context(|| format!("Failed to look up package {}", package.nvra()))?;
        Ok(found)
    }

    async fn create_advisory(&self, advisory: &Advisory) -> Result<()> {
        if !advisory.is_ready_to_publish() {
            return Err(ErrataError::NotReadyToPublish {
                advisory: advisory.name.clone(),
                missing: advisory.missing_fields().join(", "),
            }
            .into());
        }

        self.with_session(|token| async move { self.rpc.create_advisory(&token, advisory).await })
            .await
            .with_context(|| format!("Failed to create advisory {}", advisory.name))?;
        Ok(())
    }
}

#[async_trait]
impl<R: ErrataRpc> PackageCatalog for SessionClient<R> {
    async fn find_by_checksum(
        &self,
        name: &str,
        checksum: &str,
    ) -> Result<Option<PackageIdentity>> {
        let found = self
            .with_session(|token| async move {
                self.rpc
                    .find_package_by_name_and_checksum(&token, name, checksum)
                    .await
            })
            .await
            .with_context(|| format!("Failed to search for package {}", name))?;
        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errata::domain::AdvisoryType;
    use crate::ports::outbound::{RpcError, SESSION_EXPIRED_FAULT};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Transport that fails the first `expiries` advisory lookups with a
    /// session expiry fault
    struct ExpiringRpc {
        expiries: AtomicUsize,
        logins: AtomicUsize,
        tokens_seen: Mutex<Vec<String>>,
    }

    impl ExpiringRpc {
        fn new(expiries: usize) -> Self {
            Self {
                expiries: AtomicUsize::new(expiries),
                logins: AtomicUsize::new(0),
                tokens_seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ErrataRpc for ExpiringRpc {
        async fn login(&self, _credentials: &Credentials) -> RpcResult<SessionToken> {
            let n = self.logins.fetch_add(1, Ordering::SeqCst) + 1;
            Ok(SessionToken::new(format!("token-{}", n)))
        }

        async fn advisory_details(
            &self,
            token: &SessionToken,
            advisory_name: &str,
        ) -> RpcResult<Option<Advisory>> {
            self.tokens_seen
                .lock()
                .unwrap()
                .push(token.as_str().to_string());
            if self.expiries.load(Ordering::SeqCst) > 0 {
                self.expiries.fetch_sub(1, Ordering::SeqCst);
                return Err(RpcError::fault(SESSION_EXPIRED_FAULT, "Could not find session"));
            }
            Ok(Some(Advisory::new(advisory_name, AdvisoryType::Security)))
        }

        async fn find_package_by_nvrea(
            &self,
            _token: &SessionToken,
            _package: &PackageIdentity,
        ) -> RpcResult<Option<PackageIdentity>> {
            Err(RpcError::fault(-1, "No such package"))
        }

        async fn find_package_by_name_and_checksum(
            &self,
            _token: &SessionToken,
            _name: &str,
            _checksum: &str,
        ) -> RpcResult<Option<PackageIdentity>> {
            Ok(None)
        }

        async fn create_advisory(&self, _token: &SessionToken, _advisory: &Advisory) -> RpcResult<()> {
            Ok(())
        }
    }

    async fn client(expiries: usize) -> SessionClient<ExpiringRpc> {
        SessionClient::connect(ExpiringRpc::new(expiries), Credentials::new("admin", "secret"))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_call_without_expiry() {
        let client = client(0).await;

        assert!(client.advisory_exists("CESA-2024:0001").await.unwrap());
        assert_eq!(client.rpc.logins.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_single_expiry_is_retried_with_new_token() {
        let client = client(1).await;

        assert!(client.advisory_exists("CESA-2024:0001").await.unwrap());
        assert_eq!(client.rpc.logins.load(Ordering::SeqCst), 2);
        assert_eq!(
            *client.rpc.tokens_seen.lock().unwrap(),
            vec!["token-1".to_string(), "token-2".to_string()]
        );
    }

    #[tokio::test]
    async fn test_second_consecutive_expiry_propagates() {
        let client = client(2).await;

        let err = client.advisory_exists("CESA-2024:0001").await.unwrap_err();

        let rpc_error = err.downcast_ref::<RpcError>().unwrap();
        assert!(rpc_error.is_session_expired());
        assert_eq!(client.rpc.logins.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_other_faults_are_not_retried() {
        let client = client(0).await;
        let package = PackageIdentity::new("foo", "1.0", "1", None, "x86_64");

        let err = client.find_package(&package).await.unwrap_err();

        let rpc_error = err.downcast_ref::<RpcError>().unwrap();
        assert!(matches!(rpc_error, RpcError::Fault { code: -1, .. }));
        assert_eq!(client.rpc.logins.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_create_refuses_incomplete_advisory() {
        let client = client(0).await;
        let advisory = Advisory::new("CESA-2024:0001", AdvisoryType::Security);

        let err = client.create_advisory(&advisory).await.unwrap_err();

        match err.downcast_ref::<ErrataError>() {
            Some(ErrataError::NotReadyToPublish { missing, .. }) => {
                assert!(missing.contains("synopsis"));
            }
            other => panic!("Expected NotReadyToPublish, got {:?}", other),
        }
    }
}
