// SPDX-License-Identifier: MIT

//! Session/identity bridge: token minting and verification.

pub mod tokens;

pub use tokens::{
    mint_backend_token, mint_session_token, verify_token, Claims, BACKEND_TOKEN_TTL_SECS,
    SESSION_TOKEN_TTL_SECS,
};
