use async_trait::async_trait;
use errata_import::ports::outbound::{RpcError, RpcResult, SessionToken, SESSION_EXPIRED_FAULT};
use errata_import::prelude::*;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Scripted errata server.
///
/// Packages are known by NVREA or by name and checksum. Created advisories
/// are remembered, so a second run sees them as existing. `expire_sessions`
/// makes the next calls fail with a session expiry fault.
#[derive(Default, Clone)]
pub struct MockErrataRpc {
    by_nvra: HashMap<String, i64>,
    by_checksum: HashMap<(String, String), PackageIdentity>,
    pub advisories: Arc<Mutex<HashMap<String, Advisory>>>,
    pub created: Arc<Mutex<Vec<Advisory>>>,
    pub logins: Arc<AtomicUsize>,
    pending_expiries: Arc<AtomicUsize>,
}

#[allow(dead_code)]
impl MockErrataRpc {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_package(mut self, nvra: &str, id: i64) -> Self {
        self.by_nvra.insert(nvra.to_string(), id);
        self
    }

    pub fn with_checksum(mut self, name: &str, checksum: &str, package: PackageIdentity) -> Self {
        self.by_checksum
            .insert((name.to_string(), checksum.to_string()), package);
        self
    }

    /// The next `count` calls after login fail with an expired session
    pub fn expire_sessions(&self, count: usize) {
        self.pending_expiries.store(count, Ordering::SeqCst);
    }

    pub fn login_count(&self) -> usize {
        self.logins.load(Ordering::SeqCst)
    }

    pub fn created(&self) -> Vec<Advisory> {
        self.created.lock().unwrap().clone()
    }

    fn check_session(&self) -> RpcResult<()> {
        let expiring = self
            .pending_expiries
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if expiring {
            return Err(RpcError::fault(
                SESSION_EXPIRED_FAULT,
                "Could not find session",
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl ErrataRpc for MockErrataRpc {
    async fn login(&self, credentials: &Credentials) -> RpcResult<SessionToken> {
        if credentials.password != "secret" {
            return Err(RpcError::fault(
                2950,
                "Either the password or username is incorrect.",
            ));
        }
        let n = self.logins.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(SessionToken::new(format!("session-{}", n)))
    }

    async fn advisory_details(
        &self,
        _token: &SessionToken,
        advisory_name: &str,
    ) -> RpcResult<Option<Advisory>> {
        self.check_session()?;
        Ok(self.advisories.lock().unwrap().get(advisory_name).cloned())
    }

    async fn find_package_by_nvrea(
        &self,
        _token: &SessionToken,
        package: &PackageIdentity,
    ) -> RpcResult<Option<PackageIdentity>> {
        self.check_session()?;
        Ok(self
            .by_nvra
            .get(&package.nvra())
            .map(|id| package.clone().with_remote_id(*id)))
    }

    async fn find_package_by_name_and_checksum(
        &self,
        _token: &SessionToken,
        name: &str,
        checksum: &str,
    ) -> RpcResult<Option<PackageIdentity>> {
        self.check_session()?;
        Ok(self
            .by_checksum
            .get(&(name.to_string(), checksum.to_string()))
            .cloned())
    }

    async fn create_advisory(&self, _token: &SessionToken, advisory: &Advisory) -> RpcResult<()> {
        self.check_session()?;
        self.advisories
            .lock()
            .unwrap()
            .insert(advisory.name.clone(), advisory.clone());
        self.created.lock().unwrap().push(advisory.clone());
        Ok(())
    }
}
