//! RSA key-pair generation.
//!
//! Every issuance starts with a fresh key pair generated here. Keys are
//! handed to the caller and never cached or reused across issuances.

use crate::error::{Result, WebCaError};
use openssl::pkey::{PKey, Private};
use openssl::rsa::Rsa;

/// Default RSA modulus size in bits.
pub const DEFAULT_KEY_BITS: u32 = 2048;

/// Generate a fresh RSA key pair with a modulus of `bits` bits.
///
/// Key material is drawn from OpenSSL's secure random source. No minimum
/// size is enforced here; choosing a strength below 2048 bits is a caller
/// policy decision and produces weak keys.
///
/// # Errors
/// Returns [`WebCaError::KeyGeneration`] when the backend cannot produce a
/// key, e.g. the random source is unavailable. The failure is terminal for
/// the request; callers may retry the whole call.
pub fn generate_rsa_key(bits: u32) -> Result<PKey<Private>> {
    let rsa = Rsa::generate(bits)
        .map_err(|e| WebCaError::KeyGeneration(format!("Failed to generate RSA keypair: {}", e)))?;

    PKey::from_rsa(rsa)
        .map_err(|e| WebCaError::KeyGeneration(format!("Failed to create private key: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_key_default_bits() {
        let key = generate_rsa_key(DEFAULT_KEY_BITS).unwrap();
        assert_eq!(key.bits(), DEFAULT_KEY_BITS);
    }

    #[test]
    fn test_generated_keys_are_distinct() {
        let first = generate_rsa_key(DEFAULT_KEY_BITS).unwrap();
        let second = generate_rsa_key(DEFAULT_KEY_BITS).unwrap();
        assert!(!first.public_eq(&second));
    }
}
