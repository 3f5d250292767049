pub mod presence;
pub mod snapshot;

use serde::{Deserialize, Serialize};

/// Envelope returned by the relay's REST lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestEnvelope<T> {
    #[serde(default)]
    pub success: bool,
    pub data: Option<T>,
}
