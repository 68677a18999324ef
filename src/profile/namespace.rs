use std::fmt;
use std::str::FromStr;

use uuid::Uuid;

const PRIMARY_PREFIX: &str = "ACI:";
const PSEUDONYMOUS_PREFIX: &str = "PNI:";

/// The two addressing schemes under which the same account can be reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdentityNamespace {
    Primary,
    Pseudonymous,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ServiceIdentifier {
    pub namespace: IdentityNamespace,
    pub uuid: Uuid,
}

impl ServiceIdentifier {
    pub const fn primary(uuid: Uuid) -> Self {
        Self {
            namespace: IdentityNamespace::Primary,
            uuid,
        }
    }
}

impl fmt::Display for ServiceIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.namespace {
            // Primary identifiers are rendered without a prefix.
            IdentityNamespace::Primary => write!(f, "{}", self.uuid.hyphenated()),
            IdentityNamespace::Pseudonymous => {
                write!(f, "{}{}", PSEUDONYMOUS_PREFIX, self.uuid.hyphenated())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid service identifier: {0}")]
pub struct InvalidServiceIdentifier(String);

impl FromStr for ServiceIdentifier {
    type Err = InvalidServiceIdentifier;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(InvalidServiceIdentifier("identifier cannot be empty".to_string()));
        }

        let (namespace, raw_uuid) = if let Some(rest) = trimmed.strip_prefix(PSEUDONYMOUS_PREFIX) {
            (IdentityNamespace::Pseudonymous, rest)
        } else if let Some(rest) = trimmed.strip_prefix(PRIMARY_PREFIX) {
            (IdentityNamespace::Primary, rest)
        } else {
            (IdentityNamespace::Primary, trimmed)
        };

        let uuid = Uuid::parse_str(raw_uuid)
            .map_err(|err| InvalidServiceIdentifier(format!("{trimmed}: {err}")))?;
        Ok(Self { namespace, uuid })
    }
}
