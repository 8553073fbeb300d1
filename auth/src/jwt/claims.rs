use std::collections::HashMap;

use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use crate::identity::Identity;

/// Name of the name-identifier claim carried alongside `sub`.
pub const NAME_ID_CLAIM: &str = "nameid";

/// JWT claims structure.
///
/// Carries the time-based RFC 7519 claims and `sub`; anything else, such as
/// `nameid` or a foreign `iss`, lives in the `extra` map.
/// All standard fields are optional so foreign tokens still deserialize.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Claims {
    /// Subject (username of the authenticated principal)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,

    /// Expiration time (Unix timestamp)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,

    /// Issued at (Unix timestamp)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,

    /// Not before (Unix timestamp)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nbf: Option<i64>,

    /// Additional custom fields (flattened into token)
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl Claims {
    /// Create new empty claims.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create claims asserting an identity, valid from now for `lifetime`.
    ///
    /// # Arguments
    /// * `identity` - Authenticated principal
    /// * `lifetime` - Time until the token expires
    ///
    /// # Returns
    /// Claims with sub, nameid, iat, nbf and exp set
    pub fn for_identity(identity: &Identity, lifetime: Duration) -> Self {
        let now = Utc::now();
        let expiration = now + lifetime;

        Self::new()
            .with_subject(&identity.username)
            .with_issued_at(now.timestamp())
            .with_not_before(now.timestamp())
            .with_expiration(expiration.timestamp())
            .with_extra(NAME_ID_CLAIM, &identity.username)
    }

    /// Set subject.
    pub fn with_subject(mut self, sub: impl ToString) -> Self {
        self.sub = Some(sub.to_string());
        self
    }

    /// Set expiration (Unix timestamp).
    pub fn with_expiration(mut self, exp: i64) -> Self {
        self.exp = Some(exp);
        self
    }

    /// Set issued at (Unix timestamp).
    pub fn with_issued_at(mut self, iat: i64) -> Self {
        self.iat = Some(iat);
        self
    }

    /// Set not before (Unix timestamp).
    pub fn with_not_before(mut self, nbf: i64) -> Self {
        self.nbf = Some(nbf);
        self
    }

    /// Add a custom field.
    pub fn with_extra(mut self, key: impl ToString, value: impl Serialize) -> Self {
        if let Ok(json_value) = serde_json::to_value(value) {
            self.extra.insert(key.to_string(), json_value);
        }
        self
    }

    /// Name identifier from extra fields.
    pub fn name_id(&self) -> Option<String> {
        self.extra
            .get(NAME_ID_CLAIM)
            .and_then(|v| v.as_str())
            .map(|s| s.to_string())
    }

    /// Identity asserted by these claims, taken from `sub`.
    pub fn identity(&self) -> Option<Identity> {
        self.sub.as_ref().map(|sub| Identity::new(sub.clone()))
    }
}
