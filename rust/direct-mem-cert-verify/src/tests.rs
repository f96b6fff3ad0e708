use std::collections::HashSet;
use std::error::Error as _;

use direct_mem_common::error::ErrorKind;

use crate::{CertificateVerifierError, VerificationCode};

#[test]
fn test_catalog_is_contiguous() {
    assert_eq!(VerificationCode::ALL.len(), 66);
    for (i, code) in VerificationCode::ALL.iter().enumerate() {
        assert_eq!(code.code(), i as i32);
    }
    assert_eq!(VerificationCode::ALL.first(), Some(&VerificationCode::Ok));
    assert_eq!(
        VerificationCode::ALL.last(),
        Some(&VerificationCode::DaneNoMatch)
    );
}

#[test]
fn test_catalog_names_are_unique() {
    let names: HashSet<&str> = VerificationCode::ALL.iter().map(|c| c.name()).collect();
    assert_eq!(names.len(), VerificationCode::ALL.len());
    assert!(names.iter().all(|n| n.starts_with("X509_V_")));
    assert!(
        VerificationCode::ALL
            .iter()
            .all(|c| !c.description().is_empty())
    );
}

#[test]
fn test_every_catalog_code_constructs() {
    for &code in VerificationCode::ALL {
        let err = CertificateVerifierError::new("verification failed", code.code())
            .expect("catalog code");
        assert_eq!(err.code(), code.code());
        assert_eq!(err.verification_code(), code);
        assert_eq!(VerificationCode::try_from(code.code()).unwrap(), code);
        assert!(VerificationCode::is_valid(code.code()));
    }
}

#[test]
fn test_unknown_codes_rejected() {
    for code in [-1, 66, 70, 75, 100, 9999, i32::MIN, i32::MAX] {
        assert!(!VerificationCode::is_valid(code));
        assert!(VerificationCode::from_code(code).is_none());

        let err = CertificateVerifierError::new("bad", code).unwrap_err();
        assert!(err.is_invalid_arg(), "{code}");
        let ErrorKind::InvalidArgument { name, message } = err.kind();
        assert_eq!(name, "code");
        assert!(message.contains(&code.to_string()));

        assert!(CertificateVerifierError::from_code(code).is_err());
        assert!(CertificateVerifierError::from_source("cause", code).is_err());
        assert!(CertificateVerifierError::with_source("bad", "cause", code).is_err());
    }
}

#[test]
fn test_self_signed_scenario() {
    let err = CertificateVerifierError::new("self-signed", 18).unwrap();
    assert_eq!(err.code(), 18);
    assert_eq!(
        err.verification_code(),
        VerificationCode::DepthZeroSelfSignedCert
    );
    assert_eq!(err.message(), Some("self-signed"));
    assert_eq!(err.to_string(), "self-signed");
    assert!(err.source().is_none());

    assert!(CertificateVerifierError::new("self-signed", 9999).is_err());
}

#[test]
fn test_ok_code() {
    let err = CertificateVerifierError::new("ok", 0).unwrap();
    assert_eq!(err.code(), 0);
    assert!(err.verification_code().is_ok());
    assert!(!VerificationCode::CertHasExpired.is_ok());
}

#[test]
fn test_source_chaining() {
    let cause = std::io::Error::other("chain lookup timed out");

    let err = CertificateVerifierError::with_source(
        "unable to build chain",
        cause,
        VerificationCode::UnableToGetIssuerCertLocally.code(),
    )
    .unwrap();
    assert_eq!(err.message(), Some("unable to build chain"));
    assert_eq!(
        err.source().map(|s| s.to_string()).as_deref(),
        Some("chain lookup timed out")
    );

    let err = CertificateVerifierError::from_source("not after 2020-01-01", 10).unwrap();
    assert_eq!(err.message(), None);
    assert_eq!(err.verification_code(), VerificationCode::CertHasExpired);
    assert_eq!(
        err.source().map(|s| s.to_string()).as_deref(),
        Some("not after 2020-01-01")
    );
    assert_eq!(err.to_string(), "certificate has expired");
}

#[test]
fn test_code_only_error() {
    let err = CertificateVerifierError::from_code(18).unwrap();
    assert_eq!(err.code(), 18);
    assert_eq!(err.message(), None);
    assert!(err.source().is_none());
    assert_eq!(err.to_string(), "self-signed certificate");

    let err = CertificateVerifierError::from_code(VerificationCode::DaneNoMatch.code()).unwrap();
    assert_eq!(err.to_string(), "no matching DANE TLSA records");
}

#[test]
fn test_code_display() {
    assert_eq!(
        VerificationCode::DepthZeroSelfSignedCert.to_string(),
        "X509_V_ERR_DEPTH_ZERO_SELF_SIGNED_CERT (18)"
    );
    assert_eq!(
        VerificationCode::DepthZeroSelfSignedCert.description(),
        "self-signed certificate"
    );
    assert_eq!(i32::from(VerificationCode::HostnameMismatch), 62);
}
