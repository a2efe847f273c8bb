use super::xmlrpc::{decode_response, encode_call, Value};
use crate::errata::domain::{Advisory, AdvisoryType, PackageIdentity};
use crate::ports::outbound::{
    Credentials, ErrataRpc, RpcError, RpcResult, SessionToken, NO_SUCH_ADVISORY_FAULT,
};
use crate::shared::Result;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::time::Duration;

/// Path of the XML-RPC API on the errata server
pub const API_PATH: &str = "/rpc/api";

/// XmlRpcErrataClient adapter speaking XML-RPC to the errata server
///
/// This adapter implements the ErrataRpc port. It does not renew expired
/// sessions; see `SessionClient`.
pub struct XmlRpcErrataClient {
    client: reqwest::Client,
    endpoint: String,
}

impl XmlRpcErrataClient {
    /// Creates a client for `https://{host}/rpc/api`.
    ///
    /// A `host` that already carries a scheme is used as the full endpoint.
    pub fn new(host: &str) -> Result<Self> {
        let version = env!("CARGO_PKG_VERSION");
        let user_agent = format!("errata-import/{}", version);
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(60))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            endpoint: Self::endpoint_for(host),
        })
    }

    pub fn endpoint_for(host: &str) -> String {
        if host.contains("://") {
            host.to_string()
        } else {
            format!("https://{}{}", host.trim_end_matches('/'), API_PATH)
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn call(&self, method: &str, params: &[Value]) -> RpcResult<Value> {
        log::debug!("XML-RPC call {}", method);
        let transport = |e: reqwest::Error| RpcError::Transport {
            details: format!("{} failed: {}", method, e),
        };

        let response = self
            .client
            .post(&self.endpoint)
            .header(reqwest::header::CONTENT_TYPE, "text/xml")
            .body(encode_call(method, params))
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(RpcError::Transport {
                details: format!("{} failed: HTTP {}", method, status),
            });
        }

        let body = response.text().await.map_err(transport)?;
        decode_response(method, &body)
    }
}

fn token_param(token: &SessionToken) -> Value {
    Value::from(token.as_str())
}

fn unexpected(method: &str, details: &str) -> RpcError {
    RpcError::UnexpectedResponse {
        method: method.to_string(),
        details: details.to_string(),
    }
}

/// Builds a package identity from a package details struct
fn package_from_details(details: &Value) -> Option<PackageIdentity> {
    let mut package = PackageIdentity::new(
        details.get_str("name")?,
        details.get_str("version")?,
        details.get_str("release")?,
        details.get_text("epoch"),
        details.get_str("arch_label")?,
    );
    if let Some(id) = details.get("id").and_then(Value::as_i64) {
        package = package.with_remote_id(id);
    }
    package.path = details.get_str("path").map(str::to_string);
    package.provider = details.get_str("provider").map(str::to_string);
    Some(package)
}

/// Advisory fields in the layout `errata.create` expects
fn info_struct(advisory: &Advisory) -> Value {
    let text = |value: &Option<String>| Value::from(value.clone().unwrap_or_default());

    let mut info = BTreeMap::new();
    info.insert("synopsis".to_string(), text(&advisory.synopsis));
    info.insert("advisory_name".to_string(), Value::from(advisory.name.as_str()));
    info.insert("advisory_release".to_string(), Value::from(advisory.release));
    info.insert(
        "advisory_type".to_string(),
        Value::from(advisory.advisory_type.server_label()),
    );
    info.insert("product".to_string(), text(&advisory.product));
    info.insert("topic".to_string(), text(&advisory.topic));
    info.insert("description".to_string(), text(&advisory.description));
    info.insert("references".to_string(), Value::from(advisory.references.as_str()));
    info.insert("notes".to_string(), Value::from(advisory.notes.as_str()));
    info.insert("solution".to_string(), text(&advisory.solution));
    Value::Struct(info)
}

#[async_trait]
impl ErrataRpc for XmlRpcErrataClient {
    async fn login(&self, credentials: &Credentials) -> RpcResult<SessionToken> {
        let method = "auth.login";
        let value = self
            .call(
                method,
                &[
                    Value::from(credentials.login.as_str()),
                    Value::from(credentials.password.as_str()),
                ],
            )
            .await?;

        value
            .as_str()
            .map(SessionToken::new)
            .ok_or_else(|| unexpected(method, "session key is not a string"))
    }

    async fn advisory_details(
        &self,
        token: &SessionToken,
        advisory_name: &str,
    ) -> RpcResult<Option<Advisory>> {
        let result = self
            .call(
                "errata.getDetails",
                &[token_param(token), Value::from(advisory_name)],
            )
            .await;

        let details = match result {
            Ok(details) => details,
            Err(RpcError::Fault { code, .. }) if code == NO_SUCH_ADVISORY_FAULT => return Ok(None),
            Err(e) => return Err(e),
        };

        let advisory_type = details
            .get_str("type")
            .and_then(AdvisoryType::from_server_label)
            .unwrap_or(AdvisoryType::Security);
        let mut advisory = Advisory::new(advisory_name, advisory_type);
        advisory.synopsis = details.get_str("synopsis").map(str::to_string);
        advisory.topic = details.get_str("topic").map(str::to_string);
        advisory.description = details.get_str("description").map(str::to_string);
        advisory.solution = details.get_str("solution").map(str::to_string);
        advisory.references = details.get_text("references").unwrap_or_default();
        advisory.notes = details.get_text("notes").unwrap_or_default();
        Ok(Some(advisory))
    }

    async fn find_package_by_nvrea(
        &self,
        token: &SessionToken,
        package: &PackageIdentity,
    ) -> RpcResult<Option<PackageIdentity>> {
        let method = "packages.findByNvrea";
        let result = self
            .call(
                method,
                &[
                    token_param(token),
                    Value::from(package.name.as_str()),
                    Value::from(package.version.as_str()),
                    Value::from(package.release.as_str()),
                    Value::from(package.epoch.clone().unwrap_or_default()),
                    Value::from(package.architecture.as_str()),
                ],
            )
            .await?;

        let matches = result
            .as_array()
            .ok_or_else(|| unexpected(method, "expected an array of packages"))?;
        Ok(matches.first().and_then(package_from_details))
    }

    async fn find_package_by_name_and_checksum(
        &self,
        token: &SessionToken,
        name: &str,
        checksum: &str,
    ) -> RpcResult<Option<PackageIdentity>> {
        let method = "packages.search.name";
        let result = self
            .call(method, &[token_param(token), Value::from(name)])
            .await?;
        let candidates = result
            .as_array()
            .ok_or_else(|| unexpected(method, "expected an array of packages"))?;

        for candidate in candidates {
            if candidate.get_str("name") != Some(name) {
                continue;
            }
            let Some(id) = candidate.get("id").and_then(Value::as_i64) else {
                continue;
            };

            let details = self
                .call("packages.getDetails", &[token_param(token), Value::from(id)])
                .await?;
            if details.get_str("checksum") == Some(checksum) {
                return Ok(package_from_details(&details));
            }
        }

        Ok(None)
    }

    async fn create_advisory(&self, token: &SessionToken, advisory: &Advisory) -> RpcResult<()> {
        let params = [
            token_param(token),
            info_struct(advisory),
            Value::from(advisory.bugs.clone()),
            Value::from(advisory.keywords.clone()),
            Value::from(advisory.package_ids()),
            Value::from(advisory.publish),
            Value::from(advisory.channels().to_vec()),
        ];
        self.call("errata.create", &params).await?;
        Ok(())
    }
}
