//! Integration tests for the complete issuance workflows.

use openssl::asn1::Asn1Time;
use openssl::nid::Nid;
use openssl::pkey::{PKey, Private};
use openssl::stack::Stack;
use openssl::x509::store::X509StoreBuilder;
use openssl::x509::{X509NameRef, X509StoreContext, X509};
use std::collections::HashSet;
use webca::issuer::{self_sign, sign_with_parent};
use webca::keygen::{generate_rsa_key, DEFAULT_KEY_BITS};
use webca::template::{build_template, SubjectAttributes};
use webca::WebCaError;

fn subject(cn: &str) -> SubjectAttributes {
    SubjectAttributes {
        common_name: cn.to_string(),
        country: "US".to_string(),
        organizational_unit: String::new(),
        organization: format!("{} root CA", cn),
    }
}

fn name_entries(name: &X509NameRef) -> Vec<(Nid, String)> {
    name.entries()
        .map(|entry| {
            (
                entry.object().nid(),
                entry.data().as_utf8().unwrap().to_string(),
            )
        })
        .collect()
}

fn issue_root(cn: &str) -> (PKey<Private>, X509) {
    let key = generate_rsa_key(DEFAULT_KEY_BITS).unwrap();
    let template = build_template(subject(cn), true).unwrap();
    let cert = self_sign(template, &key).unwrap();
    (key, cert)
}

#[test]
fn test_generated_key_halves_are_consistent() {
    // A signature made with the private half must verify against the
    // public half bound into the certificate.
    let (key, cert) = issue_root("Consistency");
    assert!(cert.verify(&key).unwrap());
    assert!(cert.verify(&cert.public_key().unwrap()).unwrap());
}

#[test]
fn test_serial_numbers_unique_over_ten_thousand_calls() {
    let mut seen = HashSet::new();
    for _ in 0..10_000 {
        let template = build_template(subject("collision"), true).unwrap();
        assert!(
            seen.insert(template.serial().to_vec()),
            "duplicate serial number"
        );
    }
}

#[test]
fn test_self_signed_root() {
    let (key, cert) = issue_root("Root");

    assert_eq!(
        name_entries(cert.subject_name()),
        name_entries(cert.issuer_name())
    );
    assert!(cert.verify(&key).unwrap());

    let (unrelated_key, _) = issue_root("Unrelated");
    assert!(!cert.verify(&unrelated_key).unwrap());
}

#[test]
fn test_chained_leaf_is_bound_to_parent() {
    let (root_key, root_cert) = issue_root("Chain Root");

    let leaf_key = generate_rsa_key(DEFAULT_KEY_BITS).unwrap();
    let leaf_template = build_template(subject("leaf.example.com"), false).unwrap();
    let leaf_cert = sign_with_parent(leaf_template, &leaf_key, &root_cert, &root_key).unwrap();

    // Issuer is the parent's subject, not the leaf's.
    assert_eq!(
        name_entries(leaf_cert.issuer_name()),
        name_entries(root_cert.subject_name())
    );

    // The signature verifies with the parent key and only the parent key.
    assert!(leaf_cert.verify(&root_key).unwrap());
    let (third_key, _) = issue_root("Third Party");
    assert!(!leaf_cert.verify(&third_key).unwrap());
}

#[test]
fn test_mismatched_parent_key_fails_with_signing_error() {
    let (_, root_cert) = issue_root("Mismatch Root");
    let (unrelated_key, _) = issue_root("Unrelated");

    let leaf_key = generate_rsa_key(DEFAULT_KEY_BITS).unwrap();
    let leaf_template = build_template(subject("leaf.example.com"), false).unwrap();

    let result = sign_with_parent(leaf_template, &leaf_key, &root_cert, &unrelated_key);
    assert!(matches!(result, Err(WebCaError::Signing(_))));
}

#[test]
fn test_chain_validates_against_trusted_root() {
    let (root_key, root_cert) = issue_root("Store Root");

    let leaf_key = generate_rsa_key(DEFAULT_KEY_BITS).unwrap();
    let leaf_template = build_template(subject("leaf.example.com"), false).unwrap();
    let leaf_cert = sign_with_parent(leaf_template, &leaf_key, &root_cert, &root_key).unwrap();

    let mut store_builder = X509StoreBuilder::new().unwrap();
    store_builder.add_cert(root_cert).unwrap();
    let store = store_builder.build();

    let chain = Stack::new().unwrap();
    let mut ctx = X509StoreContext::new().unwrap();
    let valid = ctx
        .init(&store, &leaf_cert, &chain, |c| c.verify_cert())
        .unwrap();
    assert!(valid);
}

#[test]
fn test_leaf_certificate_cannot_act_as_issuer() {
    // A leaf carries no CA constraints, so path validation must reject
    // anything it "signed" even though the signature itself is well formed.
    let (root_key, root_cert) = issue_root("Depth Root");

    let middle_key = generate_rsa_key(DEFAULT_KEY_BITS).unwrap();
    let middle_template = build_template(subject("middle.example.com"), false).unwrap();
    let middle_cert =
        sign_with_parent(middle_template, &middle_key, &root_cert, &root_key).unwrap();

    let end_key = generate_rsa_key(DEFAULT_KEY_BITS).unwrap();
    let end_template = build_template(subject("end.example.com"), false).unwrap();
    let end_cert = sign_with_parent(end_template, &end_key, &middle_cert, &middle_key).unwrap();

    let mut store_builder = X509StoreBuilder::new().unwrap();
    store_builder.add_cert(root_cert).unwrap();
    let store = store_builder.build();

    let mut chain = Stack::new().unwrap();
    chain.push(middle_cert).unwrap();
    let mut ctx = X509StoreContext::new().unwrap();
    let valid = ctx
        .init(&store, &end_cert, &chain, |c| c.verify_cert())
        .unwrap();
    assert!(!valid);
}

#[test]
fn test_validity_window_is_exactly_ten_years() {
    let (_, cert) = issue_root("Window");

    let diff = cert.not_before().diff(cert.not_after()).unwrap();
    assert_eq!(diff.days, 3650);
    assert_eq!(diff.secs, 0);

    let now = Asn1Time::days_from_now(0).unwrap();
    let from_now = now.diff(cert.not_before()).unwrap();
    assert_eq!(from_now.days, 0);
    assert!(from_now.secs.abs() <= 5);
}

#[test]
fn test_acme_example_scenario() {
    let key = generate_rsa_key(DEFAULT_KEY_BITS).unwrap();
    let attrs = SubjectAttributes {
        common_name: "Acme".to_string(),
        country: "US".to_string(),
        organizational_unit: String::new(),
        organization: "Acme root CA".to_string(),
    };
    let template = build_template(attrs, true).unwrap();
    assert!(template.is_ca());

    let cert = self_sign(template, &key).unwrap();

    let entries = name_entries(cert.subject_name());
    assert!(entries.contains(&(Nid::COMMONNAME, "Acme".to_string())));
    assert!(entries.contains(&(Nid::ORGANIZATIONNAME, "Acme root CA".to_string())));
    assert!(!entries.iter().any(|(nid, _)| *nid == Nid::ORGANIZATIONALUNITNAME));

    assert!(cert.verify(&key).unwrap());
}

#[test]
fn test_rejected_subjects() {
    let mut empty_cn = subject("x");
    empty_cn.common_name = String::new();
    assert!(matches!(
        build_template(empty_cn, true),
        Err(WebCaError::Validation(_))
    ));

    let mut overlong = subject("x");
    overlong.organization = "o".repeat(65);
    assert!(matches!(
        build_template(overlong, false),
        Err(WebCaError::Validation(_))
    ));

    let mut bad_country = subject("x");
    bad_country.country = "USA".to_string();
    assert!(matches!(
        build_template(bad_country, false),
        Err(WebCaError::Validation(_))
    ));
}
