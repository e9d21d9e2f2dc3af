//! webca - Self-Service Certificate Issuance Library
//!
//! A small certificate authority core: generate an RSA key pair and issue
//! either a self-signed root CA certificate or a leaf certificate chained to
//! an existing parent. The library is the issuance logic only; the binary in
//! this crate wraps it in a web form front-end.
//!
//! # Overview
//!
//! Issuance is a stateless, per-request computation with three steps:
//!
//! ```text
//! generate_rsa_key ──► build_template ──► self_sign / sign_with_parent
//!     (key pair)        (unsigned descriptor)     (signed X.509)
//! ```
//!
//! Nothing is cached or persisted between calls, and every call may run
//! concurrently with every other call. The only shared dependency is
//! OpenSSL's process-wide secure random source, which supplies both key
//! material and certificate serial numbers.
//!
//! # Quick Start
//!
//! ```no_run
//! use webca::encode;
//! use webca::issuer::self_sign;
//! use webca::keygen::{generate_rsa_key, DEFAULT_KEY_BITS};
//! use webca::template::{build_template, SubjectAttributes};
//!
//! fn main() -> webca::Result<()> {
//!     let key = generate_rsa_key(DEFAULT_KEY_BITS)?;
//!
//!     let subject = SubjectAttributes {
//!         common_name: "Example Root CA".to_string(),
//!         country: "US".to_string(),
//!         organizational_unit: String::new(),
//!         organization: "Example Corp".to_string(),
//!     };
//!
//!     let template = build_template(subject, true)?;
//!     let certificate = self_sign(template, &key)?;
//!
//!     print!("{}", encode::issuance_bundle(&key, &certificate)?);
//!     Ok(())
//! }
//! ```
//!
//! # Module Overview
//!
//! - [`keygen`]: RSA key-pair generation.
//! - [`template`]: subject validation and unsigned certificate templates
//!   (random serial number, ten-year validity window, CA flag).
//! - [`issuer`]: the two signing operations, [`issuer::self_sign`] for
//!   self-signed roots and [`issuer::sign_with_parent`] for chained
//!   issuance.
//! - [`encode`]: PEM encoding of keys and certificates.
//! - [`configs`]: TOML application configuration for the front-end.
//! - [`webserver`]: the axum form front-end.
//!
//! # Trust Semantics
//!
//! A root certificate is signed by its own key pair, so issuer and subject
//! are identical and the certificate verifies against its own public key. A
//! chained certificate carries the new request's subject and public key but
//! is signed by the parent's private key, with the issuer name copied from
//! the parent's subject. [`issuer::sign_with_parent`] refuses to sign when
//! the supplied private key does not correspond to the parent certificate's
//! public key.
//!
//! # Error Handling
//!
//! Fallible library operations return [`WebCaError`], split into
//! `KeyGeneration`, `Signing`, and `Validation` kinds. All failures are
//! terminal for the call; there are no internal retries.

pub mod configs;
pub mod encode;
pub mod error;
pub mod issuer;
pub mod keygen;
pub mod template;
pub mod webserver;

// Re-export commonly used types
pub use error::{Result, WebCaError};
