// SPDX-License-Identifier: MIT

//! Entitlement policy: plan tier → feature ceilings.
//!
//! This module is the single enforcement authority. Route handlers call the
//! check functions before writes; the client gets the same numbers through
//! `/api/me` and treats them strictly as display hints.

use serde::Serialize;

use crate::error::AppError;
use crate::models::PlanType;

/// Free-tier collection ceiling.
pub const FREE_MAX_COLLECTIONS: i64 = 1;
/// Free-tier saved-item ceiling.
pub const FREE_MAX_SAVED_ITEMS: i64 = 5;
/// How many results free users see in capped listings.
pub const FREE_VISIBLE_RESULTS: u32 = 3;

/// Concrete ceilings for a plan tier. `None` means unlimited.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PlanLimits {
    pub max_collections: Option<i64>,
    pub max_saved_items: Option<i64>,
    pub visible_results: Option<u32>,
    pub advanced_filters: bool,
    pub full_thread_context: bool,
}

impl PlanLimits {
    pub fn for_plan(plan: PlanType) -> Self {
        if plan.is_pro() {
            Self {
                max_collections: None,
                max_saved_items: None,
                visible_results: None,
                advanced_filters: true,
                full_thread_context: true,
            }
        } else {
            Self {
                max_collections: Some(FREE_MAX_COLLECTIONS),
                max_saved_items: Some(FREE_MAX_SAVED_ITEMS),
                visible_results: Some(FREE_VISIBLE_RESULTS),
                advanced_filters: false,
                full_thread_context: false,
            }
        }
    }
}

/// Reject collection creation once a non-pro user is at the ceiling.
pub fn check_collection_quota(plan: PlanType, current_count: i64) -> Result<(), AppError> {
    match PlanLimits::for_plan(plan).max_collections {
        Some(max) if current_count >= max => Err(AppError::PlanLimit(format!(
            "Free plan is limited to {max} collection. Upgrade to Pro for unlimited collections."
        ))),
        _ => Ok(()),
    }
}

/// Reject saving once a non-pro user is at the ceiling.
pub fn check_saved_quota(plan: PlanType, current_count: i64) -> Result<(), AppError> {
    match PlanLimits::for_plan(plan).max_saved_items {
        Some(max) if current_count >= max => Err(AppError::PlanLimit(format!(
            "Free plan is limited to {max} saved items. Upgrade to Pro for unlimited saves."
        ))),
        _ => Ok(()),
    }
}
