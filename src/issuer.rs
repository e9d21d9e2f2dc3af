//! Certificate signing operations.
//!
//! Two explicit entry points cover the two trust shapes:
//!
//! - [`self_sign`] produces a root certificate whose issuer and subject are
//!   identical, signed by its own key pair.
//! - [`sign_with_parent`] produces a chained certificate whose subject
//!   belongs to the new request while the signature and issuer name come
//!   from an already-issued parent.
//!
//! Both consume a [`CertificateTemplate`] and return a DER-backed
//! [`X509`]. The caller is responsible for encoding the result (see
//! [`crate::encode`]); nothing is retained here after returning.

use crate::error::{Result, WebCaError};
use crate::template::{CertificateTemplate, SubjectAttributes};
use openssl::hash::MessageDigest;
use openssl::nid::Nid;
use openssl::pkey::{HasPublic, PKey, PKeyRef, Private};
use openssl::x509::extension::{BasicConstraints, KeyUsage};
use openssl::x509::{X509, X509Name, X509NameRef, X509Ref};

const X509_VERSION_3: i32 = 2; // X509 version 3 is represented by 2

/// Produce a self-signed certificate from `template`, signed by `keypair`.
///
/// The public half of `keypair` becomes the certificate key and the private
/// half computes the signature, so the result verifies against its own
/// public key. Issuer and subject names are identical.
///
/// # Errors
/// Returns [`WebCaError::Signing`] when name or extension encoding fails or
/// the signature cannot be computed.
pub fn self_sign(template: CertificateTemplate, keypair: &PKey<Private>) -> Result<X509> {
    let name = build_name(template.subject())?;
    issue(&template, &name, &name, keypair, keypair)
}

/// Produce a certificate for `template` signed by a parent's private key.
///
/// The issuer name is taken from `parent_cert`'s subject and the signature
/// is computed with `parent_key`; the subject name and `subject_key` belong
/// to the new request. The parent certificate's public key and `parent_key`
/// must correspond to the same key pair.
///
/// # Errors
/// Returns [`WebCaError::Signing`] when `parent_key` does not match
/// `parent_cert`'s public key (malformed chain), or when encoding or
/// signature computation fails.
pub fn sign_with_parent<T: HasPublic>(
    template: CertificateTemplate,
    subject_key: &PKeyRef<T>,
    parent_cert: &X509Ref,
    parent_key: &PKey<Private>,
) -> Result<X509> {
    let parent_public = parent_cert
        .public_key()
        .map_err(|e| WebCaError::Signing(format!("Failed to read parent public key: {}", e)))?;
    if !parent_public.public_eq(parent_key) {
        return Err(WebCaError::Signing(
            "signing key does not correspond to the parent certificate's public key".to_string(),
        ));
    }

    let subject_name = build_name(template.subject())?;
    issue(
        &template,
        &subject_name,
        parent_cert.subject_name(),
        subject_key,
        parent_key,
    )
}

/// Build an X.509 distinguished name from subject attributes.
///
/// Empty optional attributes are omitted; OpenSSL rejects empty name
/// entries, and a missing entry is the correct representation anyway.
fn build_name(subject: &SubjectAttributes) -> Result<X509Name> {
    let mut name_builder = X509Name::builder()
        .map_err(|e| WebCaError::Signing(format!("Failed to create name builder: {}", e)))?;

    name_builder
        .append_entry_by_nid(Nid::COMMONNAME, &subject.common_name)
        .map_err(|e| WebCaError::Signing(format!("Failed to set CN: {}", e)))?;

    if !subject.organization.is_empty() {
        name_builder
            .append_entry_by_nid(Nid::ORGANIZATIONNAME, &subject.organization)
            .map_err(|e| WebCaError::Signing(format!("Failed to set organization: {}", e)))?;
    }

    if !subject.organizational_unit.is_empty() {
        name_builder
            .append_entry_by_nid(Nid::ORGANIZATIONALUNITNAME, &subject.organizational_unit)
            .map_err(|e| {
                WebCaError::Signing(format!("Failed to set organizational unit: {}", e))
            })?;
    }

    if !subject.country.is_empty() {
        name_builder
            .append_entry_by_nid(Nid::COUNTRYNAME, &subject.country)
            .map_err(|e| WebCaError::Signing(format!("Failed to set country: {}", e)))?;
    }

    Ok(name_builder.build())
}

fn issue<T: HasPublic>(
    template: &CertificateTemplate,
    subject_name: &X509NameRef,
    issuer_name: &X509NameRef,
    subject_key: &PKeyRef<T>,
    signer_key: &PKey<Private>,
) -> Result<X509> {
    let mut builder = X509::builder()
        .map_err(|e| WebCaError::Signing(format!("Failed to create X509 builder: {}", e)))?;

    builder
        .set_version(X509_VERSION_3)
        .map_err(|e| WebCaError::Signing(format!("Failed to set version: {}", e)))?;

    let asn1_serial = template
        .serial()
        .to_asn1_integer()
        .map_err(|e| WebCaError::Signing(format!("Failed to encode serial number: {}", e)))?;
    builder
        .set_serial_number(&asn1_serial)
        .map_err(|e| WebCaError::Signing(format!("Failed to set serial number: {}", e)))?;

    builder
        .set_subject_name(subject_name)
        .map_err(|e| WebCaError::Signing(format!("Failed to set subject: {}", e)))?;

    builder
        .set_issuer_name(issuer_name)
        .map_err(|e| WebCaError::Signing(format!("Failed to set issuer: {}", e)))?;

    builder
        .set_not_before(template.not_before())
        .map_err(|e| WebCaError::Signing(format!("Failed to set not_before: {}", e)))?;

    builder
        .set_not_after(template.not_after())
        .map_err(|e| WebCaError::Signing(format!("Failed to set not_after: {}", e)))?;

    builder
        .set_pubkey(subject_key)
        .map_err(|e| WebCaError::Signing(format!("Failed to set public key: {}", e)))?;

    if template.is_ca() {
        let bc = BasicConstraints::new()
            .critical()
            .ca()
            .build()
            .map_err(|e| WebCaError::Signing(format!("Failed to build BasicConstraints: {}", e)))?;
        builder
            .append_extension(bc)
            .map_err(|e| WebCaError::Signing(format!("Failed to add BasicConstraints: {}", e)))?;

        let ku = KeyUsage::new()
            .critical()
            .key_cert_sign()
            .build()
            .map_err(|e| WebCaError::Signing(format!("Failed to build KeyUsage: {}", e)))?;
        builder
            .append_extension(ku)
            .map_err(|e| WebCaError::Signing(format!("Failed to add KeyUsage: {}", e)))?;
    }

    builder
        .sign(signer_key, MessageDigest::sha256())
        .map_err(|e| WebCaError::Signing(format!("Failed to sign certificate: {}", e)))?;

    Ok(builder.build())
}
