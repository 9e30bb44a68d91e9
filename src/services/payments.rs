// SPDX-License-Identifier: MIT

//! Razorpay payment signature verification.
//!
//! The processor signs `"{order_id}|{payment_id}"` with the key secret
//! (HMAC-SHA256, hex). A verified signature is the trigger for the plan
//! upgrade; order creation itself happens on the backend.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

// Type alias for HMAC-SHA256
type HmacSha256 = Hmac<Sha256>;

/// Verify a payment signature against the key secret.
///
/// Returns false for malformed hex as well as mismatches; callers treat
/// both the same way (reject the payment).
pub fn verify_payment_signature(
    order_id: &str,
    payment_id: &str,
    signature_hex: &str,
    key_secret: &str,
) -> bool {
    let Ok(mut mac) = HmacSha256::new_from_slice(key_secret.as_bytes()) else {
        return false;
    };
    mac.update(format!("{order_id}|{payment_id}").as_bytes());
    let expected = mac.finalize().into_bytes();

    let Ok(provided) = hex::decode(signature_hex) else {
        return false;
    };

    provided.ct_eq(expected.as_slice()).into()
}
