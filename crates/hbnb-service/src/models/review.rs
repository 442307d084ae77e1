//! Review payloads

use serde::Deserialize;

/// Create review request
#[derive(Debug, Clone, Deserialize)]
pub struct NewReview {
    pub text: String,
    pub rating: i64,
    pub place_id: String,
    pub user_id: String,
}

/// Update review request.
///
/// `place_id` and `user_id` are accepted only so that an attempt to change
/// them can be rejected.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReviewChanges {
    pub text: Option<String>,
    pub rating: Option<i64>,
    pub place_id: Option<String>,
    pub user_id: Option<String>,
}
