//! Certificate template construction.
//!
//! A [`CertificateTemplate`] is the unsigned half of an issuance: the serial
//! number, subject attributes, validity window, and CA flag that the signing
//! operations in [`crate::issuer`] turn into an X.509 certificate. Building a
//! template is pure construction with no signing and no I/O beyond reading
//! the random source for the serial number.

use crate::error::{Result, WebCaError};
use openssl::asn1::{Asn1Time, Asn1TimeRef};
use openssl::bn::{BigNum, BigNumRef, MsbOption};

/// Fixed validity window of ten years.
const VALIDITY_DAYS: u32 = 3650;

/// Serials stay below 2^63 so the DER integer is never negative.
const SERIAL_BITS: i32 = 63;

/// X.520 upper bound for CN, O, and OU attribute values.
const MAX_NAME_CHARS: usize = 64;

/// ISO 3166-1 alpha-2 country codes are exactly two characters.
const COUNTRY_CHARS: usize = 2;

/// Subject attributes for a certificate request.
///
/// The common name is mandatory. Country, organizational unit, and
/// organization may be left empty, in which case the corresponding entry is
/// omitted from the distinguished name entirely.
#[derive(Debug, Clone)]
pub struct SubjectAttributes {
    pub common_name: String,
    pub country: String,
    pub organizational_unit: String,
    pub organization: String,
}

impl SubjectAttributes {
    /// Check the attributes against the X.520 bounds.
    ///
    /// # Errors
    /// Returns [`WebCaError::Validation`] when the common name is empty, when
    /// CN/O/OU exceed 64 characters, or when a non-empty country code is not
    /// exactly two characters.
    pub fn validate(&self) -> Result<()> {
        if self.common_name.is_empty() {
            return Err(WebCaError::Validation(
                "common name must not be empty".to_string(),
            ));
        }
        if self.common_name.chars().count() > MAX_NAME_CHARS {
            return Err(WebCaError::Validation(format!(
                "common name exceeds {} characters",
                MAX_NAME_CHARS
            )));
        }
        if self.organization.chars().count() > MAX_NAME_CHARS {
            return Err(WebCaError::Validation(format!(
                "organization exceeds {} characters",
                MAX_NAME_CHARS
            )));
        }
        if self.organizational_unit.chars().count() > MAX_NAME_CHARS {
            return Err(WebCaError::Validation(format!(
                "organizational unit exceeds {} characters",
                MAX_NAME_CHARS
            )));
        }
        if !self.country.is_empty() && self.country.chars().count() != COUNTRY_CHARS {
            return Err(WebCaError::Validation(
                "country must be a two-letter ISO 3166-1 code".to_string(),
            ));
        }
        Ok(())
    }
}

/// An unsigned certificate descriptor.
///
/// Holds everything the signing operations need except the keys: a random
/// serial number, the subject, the validity window, and whether the
/// certificate carries CA constraints. Templates are consumed by a single
/// signing call and never reused.
pub struct CertificateTemplate {
    serial: BigNum,
    subject: SubjectAttributes,
    not_before: Asn1Time,
    not_after: Asn1Time,
    is_ca: bool,
}

impl CertificateTemplate {
    /// The random serial number assigned at construction.
    pub fn serial(&self) -> &BigNumRef {
        &self.serial
    }

    pub fn subject(&self) -> &SubjectAttributes {
        &self.subject
    }

    pub fn not_before(&self) -> &Asn1TimeRef {
        &self.not_before
    }

    pub fn not_after(&self) -> &Asn1TimeRef {
        &self.not_after
    }

    /// Whether the issued certificate will carry CA constraints
    /// (BasicConstraints CA=true and keyCertSign key usage, both critical).
    pub fn is_ca(&self) -> bool {
        self.is_ca
    }
}

/// Build a certificate template from validated subject attributes.
///
/// The validity window is fixed at `[now, now + 10 years)`. The serial
/// number is drawn uniformly from the 63-bit range using OpenSSL's secure
/// random source, so two templates built from identical inputs differ with
/// overwhelming probability.
///
/// With `is_ca` set the issued certificate may sign other certificates;
/// without it the certificate carries no constraint extensions at all.
///
/// # Errors
/// Returns [`WebCaError::Validation`] for rejected subject attributes and
/// [`WebCaError::Signing`] when the serial number or validity bounds cannot
/// be constructed.
pub fn build_template(subject: SubjectAttributes, is_ca: bool) -> Result<CertificateTemplate> {
    subject.validate()?;

    let mut serial = BigNum::new()
        .map_err(|e| WebCaError::Signing(format!("Failed to create serial number: {}", e)))?;
    serial
        .rand(SERIAL_BITS, MsbOption::MAYBE_ZERO, false)
        .map_err(|e| WebCaError::Signing(format!("Failed to randomize serial number: {}", e)))?;

    let not_before = Asn1Time::days_from_now(0)
        .map_err(|e| WebCaError::Signing(format!("Failed to create not_before: {}", e)))?;
    let not_after = Asn1Time::days_from_now(VALIDITY_DAYS)
        .map_err(|e| WebCaError::Signing(format!("Failed to create not_after: {}", e)))?;

    Ok(CertificateTemplate {
        serial,
        subject,
        not_before,
        not_after,
        is_ca,
    })
}
