//! Route image storage configuration.

use serde::{Deserialize, Serialize};

/// Settings for locally stored route images.
///
/// The core only persists reference strings; this config tells the catalog
/// where local references (paths under [`MediaConfig::local_prefix`]) live
/// on disk so they can be released when a route is deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaConfig {
    /// Directory holding locally uploaded route images.
    #[serde(default = "default_upload_dir")]
    pub upload_dir: String,
    /// URL path prefix identifying locally stored images.
    #[serde(default = "default_local_prefix")]
    pub local_prefix: String,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            upload_dir: default_upload_dir(),
            local_prefix: default_local_prefix(),
        }
    }
}

fn default_upload_dir() -> String {
    "data/uploads".to_string()
}

fn default_local_prefix() -> String {
    "/uploads/".to_string()
}
