//! Bearer token wire format and verifiers.
//!
//! A token reads `sf_v1_<token uuid, simple>.<secret, 64 lowercase hex>`.
//! The database only ever sees [`ApiToken::verifier`], a SHA-256 digest that
//! also binds the owning user.

use std::{fmt, fmt::Write as _, str::FromStr};

use rand::{RngCore, rngs::OsRng};
use sha2::{Digest, Sha256};
use thiserror::Error;
use uuid::Uuid;
use zeroize::{Zeroize, Zeroizing};

use crate::domain::users::records::UserUuid;

const PREFIX: &str = "sf";
const SECRET_LEN: usize = 32;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ApiTokenError {
    #[error("api token is not of the form sf_<version>_<uuid>.<secret>")]
    InvalidFormat,

    #[error("api token version is not supported")]
    UnsupportedVersion,

    #[error("api token secret is not {SECRET_LEN} hex-encoded bytes")]
    InvalidSecretEncoding,
}

/// Token format generation, stored alongside each token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiTokenVersion {
    V1,
}

impl ApiTokenVersion {
    #[must_use]
    pub const fn as_i16(self) -> i16 {
        match self {
            Self::V1 => 1,
        }
    }
}

impl TryFrom<i16> for ApiTokenVersion {
    type Error = ApiTokenError;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::V1),
            _ => Err(ApiTokenError::UnsupportedVersion),
        }
    }
}

impl fmt::Display for ApiTokenVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.as_i16())
    }
}

impl FromStr for ApiTokenVersion {
    type Err = ApiTokenError;

    fn from_str(segment: &str) -> Result<Self, Self::Err> {
        segment
            .strip_prefix('v')
            .and_then(|number| number.parse::<i16>().ok())
            .ok_or(ApiTokenError::UnsupportedVersion)
            .and_then(Self::try_from)
    }
}

/// Random token secret, wiped from memory on drop.
#[derive(Clone)]
pub struct ApiTokenSecret([u8; SECRET_LEN]);

impl ApiTokenSecret {
    #[must_use]
    pub fn generate() -> Self {
        let mut bytes = [0_u8; SECRET_LEN];

        OsRng.fill_bytes(&mut bytes);

        Self(bytes)
    }

    #[must_use]
    pub const fn from_bytes(bytes: [u8; SECRET_LEN]) -> Self {
        Self(bytes)
    }

    fn to_hex(&self) -> Zeroizing<String> {
        Zeroizing::new(hex(&self.0))
    }
}

impl PartialEq for ApiTokenSecret {
    fn eq(&self, other: &Self) -> bool {
        constant_time_eq(&self.0, &other.0)
    }
}

impl Eq for ApiTokenSecret {}

impl fmt::Debug for ApiTokenSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiTokenSecret(..)")
    }
}

impl Drop for ApiTokenSecret {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

impl FromStr for ApiTokenSecret {
    type Err = ApiTokenError;

    fn from_str(encoded: &str) -> Result<Self, Self::Err> {
        if encoded.len() != SECRET_LEN * 2 || !encoded.bytes().all(|byte| byte.is_ascii_hexdigit()) {
            return Err(ApiTokenError::InvalidSecretEncoding);
        }

        let mut bytes = [0_u8; SECRET_LEN];

        for (byte, pair) in bytes.iter_mut().zip(encoded.as_bytes().chunks_exact(2)) {
            let pair = std::str::from_utf8(pair).or(Err(ApiTokenError::InvalidSecretEncoding))?;

            *byte = u8::from_str_radix(pair, 16).or(Err(ApiTokenError::InvalidSecretEncoding))?;
        }

        Ok(Self(bytes))
    }
}

/// A complete bearer token: its public identifier plus the secret.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiToken {
    pub uuid: Uuid,
    pub version: ApiTokenVersion,
    pub secret: ApiTokenSecret,
}

impl ApiToken {
    /// A new current-version token with a fresh random secret.
    #[must_use]
    pub fn generate() -> Self {
        Self {
            uuid: Uuid::now_v7(),
            version: ApiTokenVersion::V1,
            secret: ApiTokenSecret::generate(),
        }
    }

    /// Hex SHA-256 of `{uuid}:{version}:{owner}:{secret}`.
    ///
    /// A verifier copied onto a token row owned by someone else never matches.
    #[must_use]
    pub fn verifier(&self, owner: UserUuid) -> String {
        let mut hasher = Sha256::new();

        hasher.update(self.uuid.simple().to_string());
        hasher.update(":");
        hasher.update(self.version.as_i16().to_string());
        hasher.update(":");
        hasher.update(owner.into_uuid().simple().to_string());
        hasher.update(":");
        hasher.update(self.secret.to_hex().as_bytes());

        hex(&hasher.finalize())
    }
}

impl fmt::Display for ApiToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{PREFIX}_{}_{}.{}",
            self.version,
            self.uuid.simple(),
            self.secret.to_hex().as_str()
        )
    }
}

impl FromStr for ApiToken {
    type Err = ApiTokenError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let (public, secret) = token.split_once('.').ok_or(ApiTokenError::InvalidFormat)?;

        let Some((PREFIX, rest)) = public.split_once('_') else {
            return Err(ApiTokenError::InvalidFormat);
        };

        let (version, uuid) = rest.split_once('_').ok_or(ApiTokenError::InvalidFormat)?;

        Ok(Self {
            version: version.parse()?,
            uuid: Uuid::try_parse(uuid).or(Err(ApiTokenError::InvalidFormat))?,
            secret: secret.parse()?,
        })
    }
}

/// Compare two verifiers without exiting early on the first difference.
#[must_use]
pub fn verifier_matches(computed: &str, stored: &str) -> bool {
    constant_time_eq(computed.as_bytes(), stored.as_bytes())
}

fn constant_time_eq(left: &[u8], right: &[u8]) -> bool {
    left.len() == right.len()
        && left
            .iter()
            .zip(right)
            .fold(0_u8, |diff, (a, b)| diff | (a ^ b))
            == 0
}

fn hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .fold(String::with_capacity(bytes.len() * 2), |mut out, byte| {
            let _infallible = write!(out, "{byte:02x}");

            out
        })
}
