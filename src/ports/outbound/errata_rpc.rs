use crate::errata::domain::{Advisory, PackageIdentity};
use async_trait::async_trait;
use thiserror::Error;

/// Fault code the errata server returns for an expired or invalid session
pub const SESSION_EXPIRED_FAULT: i32 = -20;

/// Fault code the errata server returns for an unknown advisory
pub const NO_SUCH_ADVISORY_FAULT: i32 = -208;

/// Opaque session token issued by the errata server
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SessionToken(***)")
    }
}

/// Login and password for the errata server
#[derive(Clone)]
pub struct Credentials {
    pub login: String,
    pub password: String,
}

impl Credentials {
    pub fn new(login: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            login: login.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("login", &self.login)
            .field("password", &"***")
            .finish()
    }
}

/// Errors raised at the RPC boundary
#[derive(Debug, Error)]
pub enum RpcError {
    /// The server answered with a fault
    #[error("Server fault {code}: {message}")]
    Fault { code: i32, message: String },

    /// The request did not reach the server or the answer was not readable
    #[error("Transport error: {details}")]
    Transport { details: String },

    /// The server answered with something other than what the call expects
    #[error("Unexpected response to {method}: {details}")]
    UnexpectedResponse { method: String, details: String },
}

impl RpcError {
    pub fn fault(code: i32, message: impl Into<String>) -> Self {
        Self::Fault {
            code,
            message: message.into(),
        }
    }

    pub fn is_session_expired(&self) -> bool {
        matches!(self, RpcError::Fault { code, .. } if *code == SESSION_EXPIRED_FAULT)
    }
}

pub type RpcResult<T> = std::result::Result<T, RpcError>;

/// ErrataRpc port - the remote errata-management API
///
/// Every call but `login` takes the session token explicitly; renewing the
/// token when it expires is the session client's job, not the transport's.
#[async_trait]
pub trait ErrataRpc: Send + Sync {
    /// Exchanges credentials for a session token
    async fn login(&self, credentials: &Credentials) -> RpcResult<SessionToken>;

    /// Looks up an advisory by name; `None` if the server does not know it
    async fn advisory_details(
        &self,
        token: &SessionToken,
        advisory_name: &str,
    ) -> RpcResult<Option<Advisory>>;

    /// Finds a package by name, version, release, epoch and architecture
    async fn find_package_by_nvrea(
        &self,
        token: &SessionToken,
        package: &PackageIdentity,
    ) -> RpcResult<Option<PackageIdentity>>;

    /// Finds a package by exact name whose checksum equals `checksum`
    async fn find_package_by_name_and_checksum(
        &self,
        token: &SessionToken,
        name: &str,
        checksum: &str,
    ) -> RpcResult<Option<PackageIdentity>>;

    /// Creates (and optionally publishes) an advisory
    async fn create_advisory(&self, token: &SessionToken, advisory: &Advisory) -> RpcResult<()>;
}
