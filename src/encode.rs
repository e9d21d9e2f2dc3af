//! PEM encoding of issued material.
//!
//! The library hands out two kinds of blocks: private key material (PKCS#8)
//! and certificates. Transport and display of the armored text is the
//! caller's concern.

use crate::error::{Result, WebCaError};
use openssl::pkey::{PKey, Private};
use openssl::x509::X509Ref;

/// Encode a private key as a PKCS#8 PEM block.
pub fn private_key_to_pem(key: &PKey<Private>) -> Result<String> {
    let pem = key
        .private_key_to_pem_pkcs8()
        .map_err(|e| WebCaError::Signing(format!("Failed to encode private key: {}", e)))?;
    String::from_utf8(pem)
        .map_err(|e| WebCaError::Signing(format!("Private key PEM is not UTF-8: {}", e)))
}

/// Encode a certificate as a PEM block.
pub fn certificate_to_pem(cert: &X509Ref) -> Result<String> {
    let pem = cert
        .to_pem()
        .map_err(|e| WebCaError::Signing(format!("Failed to encode certificate: {}", e)))?;
    String::from_utf8(pem)
        .map_err(|e| WebCaError::Signing(format!("Certificate PEM is not UTF-8: {}", e)))
}

/// Encode an issuance result as one text document: the private-key block,
/// a blank line, then the certificate block.
pub fn issuance_bundle(key: &PKey<Private>, cert: &X509Ref) -> Result<String> {
    let mut bundle = private_key_to_pem(key)?;
    bundle.push('\n');
    bundle.push_str(&certificate_to_pem(cert)?);
    Ok(bundle)
}
