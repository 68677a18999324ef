use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use jsonrpsee::core::ClientError;
use jsonrpsee::core::client::ClientT;
use jsonrpsee::http_client::{HttpClient, HttpClientBuilder};
use jsonrpsee::rpc_params;
use serde::Deserialize;

use crate::profile::credential::{CredentialOracle, CredentialOracleError};
use crate::profile::namespace::ServiceIdentifier;

const ISSUE_CREDENTIAL_METHOD: &str = "zkprofile_issueExpiringCredential";

/// JSON-RPC error code the oracle uses for requests it cannot parse.
pub const MALFORMED_REQUEST_CODE: i32 = -32602;
/// JSON-RPC error code the oracle uses when the request proof does not verify.
pub const VERIFICATION_FAILED_CODE: i32 = 4001;

/// Client for the zero-knowledge credential service.
#[derive(Clone)]
pub struct RpcCredentialOracle {
    inner: HttpClient,
    timeout: Duration,
}

impl RpcCredentialOracle {
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self> {
        assert!(!endpoint.is_empty(), "Oracle endpoint must be provided");
        assert!(
            timeout >= Duration::from_millis(100),
            "Timeout below 100ms is unsafe"
        );

        let client = HttpClientBuilder::default()
            .request_timeout(timeout)
            .build(endpoint)
            .with_context(|| format!("Failed to build oracle client for {endpoint}"))?;

        Ok(Self {
            inner: client,
            timeout,
        })
    }

    pub fn timeout(&self) -> Duration {
        assert!(
            self.timeout <= Duration::from_secs(60),
            "Timeout exceeds maximum bound"
        );
        self.timeout
    }
}

#[async_trait]
impl CredentialOracle for RpcCredentialOracle {
    async fn issue(
        &self,
        request: &[u8],
        commitment: &[u8],
        primary_identifier: &ServiceIdentifier,
        expiration: DateTime<Utc>,
    ) -> Result<Vec<u8>, CredentialOracleError> {
        let response: IssueCredentialResponse = self
            .inner
            .request(
                ISSUE_CREDENTIAL_METHOD,
                rpc_params![
                    hex::encode(request),
                    hex::encode(commitment),
                    primary_identifier.to_string(),
                    expiration.timestamp()
                ],
            )
            .await
            .map_err(map_client_error)?;

        hex::decode(response.credential.trim()).map_err(|err| {
            CredentialOracleError::Unavailable(format!("oracle returned undecodable credential: {err}"))
        })
    }
}

#[derive(Debug, Deserialize)]
struct IssueCredentialResponse {
    credential: String,
}

fn classify_call_error(code: i32, message: &str) -> CredentialOracleError {
    match code {
        MALFORMED_REQUEST_CODE => CredentialOracleError::Malformed,
        VERIFICATION_FAILED_CODE => CredentialOracleError::VerificationFailed,
        other => CredentialOracleError::Unavailable(format!(
            "oracle call failed with code {other}: {message}"
        )),
    }
}

fn map_client_error(err: ClientError) -> CredentialOracleError {
    match err {
        ClientError::Call(object) => classify_call_error(object.code(), object.message()),
        other => CredentialOracleError::Unavailable(format!(
            "RPC call {ISSUE_CREDENTIAL_METHOD} failed: {other}"
        )),
    }
}
