// SPDX-License-Identifier: MIT

//! Saved opportunity bookmarks.

use serde::{Deserialize, Serialize};

/// A per-user bookmark of an opportunity record.
///
/// `data` is the snapshot taken at save time; later changes to the source
/// analysis never alter what the user saved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedItem {
    pub user_id: String,
    pub opportunity_id: i64,
    pub data: serde_json::Value,
    /// When the item was (last) saved, RFC3339
    pub saved_at: String,
}
