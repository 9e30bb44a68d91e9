// SPDX-License-Identifier: MIT

//! Services module - outbound collaborators and verification logic.

pub mod backend;
pub mod google;
pub mod payments;

pub use backend::BackendClient;
pub use google::{GoogleOAuthClient, GoogleProfile};
pub use payments::verify_payment_signature;
