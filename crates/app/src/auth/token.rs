//! Session token formatting, parsing, and verifier construction.

use std::{fmt, str::FromStr};

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::{RngCore, rngs::OsRng};
use sha2::{Digest, Sha256};
use thiserror::Error;
use uuid::Uuid;
use zeroize::Zeroize;

use crate::domain::companies::records::CompanyUuid;

/// Session token prefix.
pub const SESSION_TOKEN_PREFIX: &str = "pcm";

/// Number of secret bytes encoded in a token.
pub const SESSION_TOKEN_SECRET_BYTES: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionTokenVersion {
    V1,
}

impl SessionTokenVersion {
    #[must_use]
    pub const fn as_i16(self) -> i16 {
        match self {
            Self::V1 => 1,
        }
    }

    #[must_use]
    pub const fn segment(self) -> &'static str {
        match self {
            Self::V1 => "v1",
        }
    }
}

impl TryFrom<i16> for SessionTokenVersion {
    type Error = SessionTokenError;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::V1),
            _ => Err(SessionTokenError::UnsupportedVersion),
        }
    }
}

impl FromStr for SessionTokenVersion {
    type Err = SessionTokenError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "v1" => Ok(Self::V1),
            _ => Err(SessionTokenError::UnsupportedVersion),
        }
    }
}

#[derive(Clone)]
pub struct SessionSecret {
    bytes: [u8; SESSION_TOKEN_SECRET_BYTES],
}

impl SessionSecret {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; SESSION_TOKEN_SECRET_BYTES]) -> Self {
        Self { bytes }
    }

    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; SESSION_TOKEN_SECRET_BYTES] {
        &self.bytes
    }
}

impl fmt::Debug for SessionSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionSecret(**redacted**)")
    }
}

impl Drop for SessionSecret {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

#[derive(Debug, Clone)]
pub struct ParsedSessionToken {
    pub session_uuid: Uuid,
    pub version: SessionTokenVersion,
    pub secret: SessionSecret,
}

#[derive(Debug, Error)]
pub enum SessionTokenError {
    #[error("session token format is invalid")]
    InvalidFormat,

    #[error("session token uses an unsupported version")]
    UnsupportedVersion,

    #[error("session token secret encoding is invalid")]
    InvalidSecretEncoding,
}

#[must_use]
pub fn generate_session_secret() -> SessionSecret {
    let mut secret = [0_u8; SESSION_TOKEN_SECRET_BYTES];

    OsRng.fill_bytes(&mut secret);

    SessionSecret::from_bytes(secret)
}

/// Format a token as `pcm_v1_<uuid>.<secret>`.
#[must_use]
pub fn format_session_token(
    session_uuid: Uuid,
    version: SessionTokenVersion,
    secret: &SessionSecret,
) -> String {
    format!(
        "{SESSION_TOKEN_PREFIX}_{}_{}.{}",
        version.segment(),
        session_uuid.simple(),
        URL_SAFE_NO_PAD.encode(secret.as_bytes())
    )
}

/// Split a bearer token into its identifier and secret.
///
/// # Errors
///
/// Returns a [`SessionTokenError`] describing the first malformed part.
pub fn parse_session_token(token: &str) -> Result<ParsedSessionToken, SessionTokenError> {
    let (prefix_and_id, secret) = token
        .split_once('.')
        .ok_or(SessionTokenError::InvalidFormat)?;

    let mut id_parts = prefix_and_id.splitn(3, '_');

    let prefix = id_parts.next().ok_or(SessionTokenError::InvalidFormat)?;
    let version_segment = id_parts.next().ok_or(SessionTokenError::InvalidFormat)?;
    let uuid_segment = id_parts.next().ok_or(SessionTokenError::InvalidFormat)?;

    if prefix != SESSION_TOKEN_PREFIX {
        return Err(SessionTokenError::InvalidFormat);
    }

    let version = SessionTokenVersion::from_str(version_segment)?;

    let session_uuid =
        Uuid::try_parse(uuid_segment).map_err(|_error| SessionTokenError::InvalidFormat)?;

    let mut decoded = URL_SAFE_NO_PAD
        .decode(secret)
        .map_err(|_error| SessionTokenError::InvalidSecretEncoding)?;

    let bytes = <[u8; SESSION_TOKEN_SECRET_BYTES]>::try_from(decoded.as_slice())
        .map_err(|_error| SessionTokenError::InvalidSecretEncoding);

    decoded.zeroize();

    Ok(ParsedSessionToken {
        session_uuid,
        version,
        secret: SessionSecret::from_bytes(bytes?),
    })
}

/// Build the canonical verifier input for a token.
///
/// Format: `{session_uuid_hex}:{version_i16_decimal}:{tenant_uuid_hex}:{secret_base64url}`
#[must_use]
pub fn build_verifier_input(
    session_uuid: &Uuid,
    version: SessionTokenVersion,
    tenant_uuid: &CompanyUuid,
    secret: &SessionSecret,
) -> Vec<u8> {
    format!(
        "{}:{}:{}:{}",
        session_uuid.simple(),
        version.as_i16(),
        tenant_uuid.into_uuid().simple(),
        URL_SAFE_NO_PAD.encode(secret.as_bytes()),
    )
    .into_bytes()
}

/// Hex-encoded SHA-256 of the verifier input, as stored in `sessions.token_hash`.
#[must_use]
pub fn hash_verifier(input: &[u8]) -> String {
    format!("{:x}", Sha256::digest(input))
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn parse_and_format_round_trip() -> TestResult {
        let session_uuid = Uuid::now_v7();
        let secret = SessionSecret::from_bytes([0xAB; SESSION_TOKEN_SECRET_BYTES]);
        let token = format_session_token(session_uuid, SessionTokenVersion::V1, &secret);

        assert!(token.starts_with("pcm_v1_"), "unexpected token shape: {token}");

        let parsed = parse_session_token(&token)?;

        assert_eq!(parsed.session_uuid, session_uuid);
        assert_eq!(parsed.version, SessionTokenVersion::V1);
        assert_eq!(parsed.secret.as_bytes(), secret.as_bytes());

        Ok(())
    }

    #[test]
    fn parse_rejects_invalid_prefix() {
        assert!(matches!(
            parse_session_token("lt_v1_00000000000000000000000000000000.AAAA"),
            Err(SessionTokenError::InvalidFormat)
        ));
    }

    #[test]
    fn parse_rejects_unknown_version() {
        assert!(matches!(
            parse_session_token("pcm_v9_00000000000000000000000000000000.AAAA"),
            Err(SessionTokenError::UnsupportedVersion)
        ));
    }

    #[test]
    fn parse_rejects_short_secret() {
        assert!(matches!(
            parse_session_token("pcm_v1_00000000000000000000000000000000.AAAA"),
            Err(SessionTokenError::InvalidSecretEncoding)
        ));
    }

    #[test]
    fn verifier_hash_is_deterministic_and_tenant_bound() {
        let session_uuid = Uuid::nil();
        let secret = SessionSecret::from_bytes([0xCD; SESSION_TOKEN_SECRET_BYTES]);
        let tenant = CompanyUuid::from_uuid(Uuid::nil());
        let other_tenant = CompanyUuid::from_uuid(Uuid::max());

        let first = hash_verifier(&build_verifier_input(
            &session_uuid,
            SessionTokenVersion::V1,
            &tenant,
            &secret,
        ));
        let second = hash_verifier(&build_verifier_input(
            &session_uuid,
            SessionTokenVersion::V1,
            &tenant,
            &secret,
        ));
        let other = hash_verifier(&build_verifier_input(
            &session_uuid,
            SessionTokenVersion::V1,
            &other_tenant,
            &secret,
        ));

        assert_eq!(first, second, "verifier hash must be deterministic");
        assert_ne!(first, other, "verifier hash must depend on the tenant");
        assert_eq!(first.len(), 64);
    }
}
