// SPDX-License-Identifier: MIT

//! Named board collections.

use serde::{Deserialize, Serialize};

/// A user-named set of board identifiers used to scope browsing and search.
///
/// `(user_id, name)` is unique; re-creating a name replaces the previous
/// board list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collection {
    pub id: i64,
    pub user_id: String,
    pub name: String,
    pub boards: Vec<String>,
    /// When the collection was (last) created, RFC3339
    pub created_at: String,
}
