use std::cmp::Ordering;

use axum::extract::{Path, Query, State};
use axum::http::header::ACCEPT_LANGUAGE;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use crate::models::profile::{CredentialResponseView, UnversionedProfileView, VersionedProfileView};
use crate::profile::account::Account;
use crate::profile::assembler::RequestContext;
use crate::profile::error::ProfileError;
use crate::profile::namespace::{IdentityNamespace, ServiceIdentifier};
use crate::state::AppState;

use super::HttpError;

/// Account id of the authenticated caller, attached by the gateway in front of this service.
pub const AUTHENTICATED_ACCOUNT_HEADER: &str = "x-authenticated-account";

const MAX_ACCEPTED_LOCALES: usize = 16;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{identifier}", get(get_unversioned_profile))
        .route("/{identifier}/{version}", get(get_versioned_profile))
        .route(
            "/{identifier}/{version}/credential",
            get(issue_profile_key_credential),
        )
}

async fn get_unversioned_profile(
    Path(identifier): Path<String>,
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<UnversionedProfileView>, HttpError> {
    let identifier = parse_identifier(&identifier)?;
    let account = resolve_account(&state, &identifier).await?;

    let context = RequestContext {
        requester: authenticated_requester(&headers)?,
        locales: headers
            .get(ACCEPT_LANGUAGE)
            .and_then(|value| value.to_str().ok())
            .map(parse_accept_language)
            .unwrap_or_default(),
    };

    let view = state
        .profiles
        .unversioned_profile(&account, identifier.namespace, &context, Utc::now())
        .await?;
    Ok(Json(view))
}

async fn get_versioned_profile(
    Path((identifier, version)): Path<(String, String)>,
    State(state): State<AppState>,
) -> Result<Json<VersionedProfileView>, HttpError> {
    let identifier = parse_primary_identifier(&identifier)?;
    let account = resolve_account(&state, &identifier).await?;
    let view = state.profiles.versioned_profile(&account, &version).await?;
    Ok(Json(view))
}

async fn issue_profile_key_credential(
    Path((identifier, version)): Path<(String, String)>,
    Query(params): Query<CredentialParams>,
    State(state): State<AppState>,
) -> Result<Json<CredentialResponseView>, HttpError> {
    let identifier = parse_primary_identifier(&identifier)?;
    let account = resolve_account(&state, &identifier).await?;

    // A missing or undecodable request is passed on empty so that it is
    // rejected after the version lookup, like any other malformed request.
    let raw_request = params
        .credential_request
        .as_deref()
        .and_then(|encoded| hex::decode(encoded.trim()).ok())
        .unwrap_or_default();
    let credential = state
        .credentials
        .issue(account.uuid, &version, &raw_request, Utc::now())
        .await?;
    Ok(Json(CredentialResponseView { credential }))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CredentialParams {
    credential_request: Option<String>,
}

fn parse_identifier(value: &str) -> Result<ServiceIdentifier, HttpError> {
    value
        .parse::<ServiceIdentifier>()
        .map_err(|err| HttpError::new(StatusCode::BAD_REQUEST, err.to_string()))
}

fn parse_primary_identifier(value: &str) -> Result<ServiceIdentifier, HttpError> {
    let identifier = parse_identifier(value)?;
    match identifier.namespace {
        IdentityNamespace::Primary => Ok(identifier),
        IdentityNamespace::Pseudonymous => Err(HttpError::new(
            StatusCode::BAD_REQUEST,
            "Versioned profiles are addressed by primary identifier".to_string(),
        )),
    }
}

async fn resolve_account(
    state: &AppState,
    identifier: &ServiceIdentifier,
) -> Result<Account, HttpError> {
    let account = state
        .accounts
        .get_by_service_identifier(identifier)
        .await
        .map_err(ProfileError::from)?
        .ok_or(ProfileError::NotFound("account"))?;
    Ok(account)
}

fn authenticated_requester(headers: &HeaderMap) -> Result<Option<Uuid>, HttpError> {
    let Some(value) = headers.get(AUTHENTICATED_ACCOUNT_HEADER) else {
        return Ok(None);
    };
    let text = value.to_str().map_err(|_| {
        HttpError::new(
            StatusCode::BAD_REQUEST,
            "Authenticated account header is not valid text".to_string(),
        )
    })?;
    let requester = Uuid::parse_str(text.trim()).map_err(|err| {
        HttpError::new(
            StatusCode::BAD_REQUEST,
            format!("Authenticated account header is not a UUID: {err}"),
        )
    })?;
    Ok(Some(requester))
}

/// Language tags from an `Accept-Language` header, most preferred first.
fn parse_accept_language(header: &str) -> Vec<String> {
    let mut weighted = Vec::new();
    for (position, entry) in header.split(',').enumerate() {
        let mut parts = entry.split(';');
        let tag = parts.next().unwrap_or_default().trim();
        if tag.is_empty() || tag == "*" {
            continue;
        }
        let quality = parts
            .find_map(|param| param.trim().strip_prefix("q="))
            .and_then(|q| q.trim().parse::<f32>().ok())
            .unwrap_or(1.0);
        if quality <= 0.0 {
            continue;
        }
        weighted.push((quality, position, tag.to_string()));
    }

    weighted.sort_by(|a, b| {
        b.0.partial_cmp(&a.0)
            .unwrap_or(Ordering::Equal)
            .then(a.1.cmp(&b.1))
    });
    weighted
        .into_iter()
        .take(MAX_ACCEPTED_LOCALES)
        .map(|(_, _, tag)| tag)
        .collect()
}
