//! Bodies for newsletter sign-up.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
pub struct SubscribeRequest {
    pub email: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SubscribeResponse {
    pub message: String,
}
