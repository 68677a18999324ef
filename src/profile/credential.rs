use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, NaiveTime, Utc};
use tracing::debug;
use uuid::Uuid;

use super::error::ProfileError;
use super::namespace::ServiceIdentifier;
use super::store::VersionedProfileStore;

pub const MAX_CREDENTIAL_REQUEST_BYTES: usize = 4_096;
pub const CREDENTIAL_LIFETIME_DAYS: i64 = 7;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CredentialOracleError {
    #[error("credential request is malformed")]
    Malformed,
    #[error("credential request failed verification")]
    VerificationFailed,
    #[error("credential oracle unavailable: {0}")]
    Unavailable(String),
}

impl From<CredentialOracleError> for ProfileError {
    fn from(err: CredentialOracleError) -> Self {
        match err {
            CredentialOracleError::Malformed | CredentialOracleError::VerificationFailed => {
                ProfileError::InvalidRequest
            }
            CredentialOracleError::Unavailable(reason) => ProfileError::Unavailable(reason),
        }
    }
}

/// Zero-knowledge operations for issuing expiring profile key credentials.
#[async_trait]
pub trait CredentialOracle: Send + Sync {
    async fn issue(
        &self,
        request: &[u8],
        commitment: &[u8],
        primary_identifier: &ServiceIdentifier,
        expiration: DateTime<Utc>,
    ) -> Result<Vec<u8>, CredentialOracleError>;
}

/// Credentials expire at a day boundary so the expiration does not reveal
/// the exact issuance time.
pub fn credential_expiration(now: DateTime<Utc>) -> DateTime<Utc> {
    now.date_naive().and_time(NaiveTime::MIN).and_utc() + Duration::days(CREDENTIAL_LIFETIME_DAYS)
}

#[derive(Clone)]
pub struct CredentialIssuanceService {
    profiles: Arc<dyn VersionedProfileStore>,
    oracle: Arc<dyn CredentialOracle>,
}

impl CredentialIssuanceService {
    pub fn new(profiles: Arc<dyn VersionedProfileStore>, oracle: Arc<dyn CredentialOracle>) -> Self {
        Self { profiles, oracle }
    }

    pub async fn issue(
        &self,
        target: Uuid,
        version: &str,
        raw_request: &[u8],
        now: DateTime<Utc>,
    ) -> Result<Vec<u8>, ProfileError> {
        let profile = self
            .profiles
            .get(target, version)
            .await?
            .ok_or(ProfileError::NotFound("profile version"))?;

        if raw_request.is_empty() || raw_request.len() > MAX_CREDENTIAL_REQUEST_BYTES {
            debug!(
                request_len = raw_request.len(),
                "Rejecting credential request outside size bounds"
            );
            return Err(ProfileError::InvalidRequest);
        }

        let credential = self
            .oracle
            .issue(
                raw_request,
                &profile.commitment,
                &ServiceIdentifier::primary(target),
                credential_expiration(now),
            )
            .await
            .inspect_err(|err| debug!(%target, "Credential issuance rejected: {err}"))?;

        Ok(credential)
    }
}
