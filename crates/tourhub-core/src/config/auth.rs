//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// JWT and registration settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// HMAC secret used to sign JWTs.
    pub jwt_secret: String,
    /// Access token TTL in minutes.
    #[serde(default = "default_access_ttl")]
    pub jwt_access_ttl_minutes: u64,
    /// Registration code required to self-register as an administrator.
    #[serde(default)]
    pub admin_registration_code: String,
}

fn default_access_ttl() -> u64 {
    720
}
