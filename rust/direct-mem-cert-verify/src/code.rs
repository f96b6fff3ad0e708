//! Catalog of X.509 certificate verification result codes.
//!
//! The numeric values follow OpenSSL's `X509_V_*` constants.

use direct_mem_common::error::Error;

macro_rules! verification_codes {
    ($($variant:ident = $code:literal, $name:literal, $description:literal;)+) => {
        /// An X.509 certificate chain verification result.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[repr(i32)]
        pub enum VerificationCode {
            $($variant = $code,)+
        }

        impl VerificationCode {
            /// Every legal verification code, in ascending numeric order.
            pub const ALL: &'static [VerificationCode] = &[$(VerificationCode::$variant,)+];

            /// Looks up the variant for a numeric code.
            pub fn from_code(code: i32) -> Option<VerificationCode> {
                match code {
                    $($code => Some(VerificationCode::$variant),)+
                    _ => None,
                }
            }

            /// The `X509_V_*` constant name.
            pub fn name(self) -> &'static str {
                match self {
                    $(VerificationCode::$variant => $name,)+
                }
            }

            /// The human-readable reason reported for the code.
            pub fn description(self) -> &'static str {
                match self {
                    $(VerificationCode::$variant => $description,)+
                }
            }
        }
    };
}

verification_codes! {
    Ok = 0, "X509_V_OK", "ok";
    Unspecified = 1, "X509_V_ERR_UNSPECIFIED", "unspecified certificate verification error";
    UnableToGetIssuerCert = 2, "X509_V_ERR_UNABLE_TO_GET_ISSUER_CERT", "unable to get issuer certificate";
    UnableToGetCrl = 3, "X509_V_ERR_UNABLE_TO_GET_CRL", "unable to get certificate CRL";
    UnableToDecryptCertSignature = 4, "X509_V_ERR_UNABLE_TO_DECRYPT_CERT_SIGNATURE", "unable to decrypt certificate's signature";
    UnableToDecryptCrlSignature = 5, "X509_V_ERR_UNABLE_TO_DECRYPT_CRL_SIGNATURE", "unable to decrypt CRL's signature";
    UnableToDecodeIssuerPublicKey = 6, "X509_V_ERR_UNABLE_TO_DECODE_ISSUER_PUBLIC_KEY", "unable to decode issuer public key";
    CertSignatureFailure = 7, "X509_V_ERR_CERT_SIGNATURE_FAILURE", "certificate signature failure";
    CrlSignatureFailure = 8, "X509_V_ERR_CRL_SIGNATURE_FAILURE", "CRL signature failure";
    CertNotYetValid = 9, "X509_V_ERR_CERT_NOT_YET_VALID", "certificate is not yet valid";
    CertHasExpired = 10, "X509_V_ERR_CERT_HAS_EXPIRED", "certificate has expired";
    CrlNotYetValid = 11, "X509_V_ERR_CRL_NOT_YET_VALID", "CRL is not yet valid";
    CrlHasExpired = 12, "X509_V_ERR_CRL_HAS_EXPIRED", "CRL has expired";
    ErrorInCertNotBeforeField = 13, "X509_V_ERR_ERROR_IN_CERT_NOT_BEFORE_FIELD", "format error in certificate's notBefore field";
    ErrorInCertNotAfterField = 14, "X509_V_ERR_ERROR_IN_CERT_NOT_AFTER_FIELD", "format error in certificate's notAfter field";
    ErrorInCrlLastUpdateField = 15, "X509_V_ERR_ERROR_IN_CRL_LAST_UPDATE_FIELD", "format error in CRL's lastUpdate field";
    ErrorInCrlNextUpdateField = 16, "X509_V_ERR_ERROR_IN_CRL_NEXT_UPDATE_FIELD", "format error in CRL's nextUpdate field";
    OutOfMem = 17, "X509_V_ERR_OUT_OF_MEM", "out of memory";
    DepthZeroSelfSignedCert = 18, "X509_V_ERR_DEPTH_ZERO_SELF_SIGNED_CERT", "self-signed certificate";
    SelfSignedCertInChain = 19, "X509_V_ERR_SELF_SIGNED_CERT_IN_CHAIN", "self-signed certificate in certificate chain";
    UnableToGetIssuerCertLocally = 20, "X509_V_ERR_UNABLE_TO_GET_ISSUER_CERT_LOCALLY", "unable to get local issuer certificate";
    UnableToVerifyLeafSignature = 21, "X509_V_ERR_UNABLE_TO_VERIFY_LEAF_SIGNATURE", "unable to verify the first certificate";
    CertChainTooLong = 22, "X509_V_ERR_CERT_CHAIN_TOO_LONG", "certificate chain too long";
    CertRevoked = 23, "X509_V_ERR_CERT_REVOKED", "certificate revoked";
    InvalidCa = 24, "X509_V_ERR_INVALID_CA", "invalid CA certificate";
    PathLengthExceeded = 25, "X509_V_ERR_PATH_LENGTH_EXCEEDED", "path length constraint exceeded";
    InvalidPurpose = 26, "X509_V_ERR_INVALID_PURPOSE", "unsupported certificate purpose";
    CertUntrusted = 27, "X509_V_ERR_CERT_UNTRUSTED", "certificate not trusted";
    CertRejected = 28, "X509_V_ERR_CERT_REJECTED", "certificate rejected";
    SubjectIssuerMismatch = 29, "X509_V_ERR_SUBJECT_ISSUER_MISMATCH", "subject issuer mismatch";
    AkidSkidMismatch = 30, "X509_V_ERR_AKID_SKID_MISMATCH", "authority and subject key identifier mismatch";
    AkidIssuerSerialMismatch = 31, "X509_V_ERR_AKID_ISSUER_SERIAL_MISMATCH", "authority and issuer serial number mismatch";
    KeyUsageNoCertSign = 32, "X509_V_ERR_KEYUSAGE_NO_CERTSIGN", "key usage does not include certificate signing";
    UnableToGetCrlIssuer = 33, "X509_V_ERR_UNABLE_TO_GET_CRL_ISSUER", "unable to get CRL issuer certificate";
    UnhandledCriticalExtension = 34, "X509_V_ERR_UNHANDLED_CRITICAL_EXTENSION", "unhandled critical extension";
    KeyUsageNoCrlSign = 35, "X509_V_ERR_KEYUSAGE_NO_CRL_SIGN", "key usage does not include CRL signing";
    UnhandledCriticalCrlExtension = 36, "X509_V_ERR_UNHANDLED_CRITICAL_CRL_EXTENSION", "unhandled critical CRL extension";
    InvalidNonCa = 37, "X509_V_ERR_INVALID_NON_CA", "invalid non-CA certificate (has CA markings)";
    ProxyPathLengthExceeded = 38, "X509_V_ERR_PROXY_PATH_LENGTH_EXCEEDED", "proxy path length constraint exceeded";
    KeyUsageNoDigitalSignature = 39, "X509_V_ERR_KEYUSAGE_NO_DIGITAL_SIGNATURE", "key usage does not include digital signature";
    ProxyCertificatesNotAllowed = 40, "X509_V_ERR_PROXY_CERTIFICATES_NOT_ALLOWED", "proxy certificates not allowed";
    InvalidExtension = 41, "X509_V_ERR_INVALID_EXTENSION", "invalid or inconsistent certificate extension";
    InvalidPolicyExtension = 42, "X509_V_ERR_INVALID_POLICY_EXTENSION", "invalid or inconsistent certificate policy extension";
    NoExplicitPolicy = 43, "X509_V_ERR_NO_EXPLICIT_POLICY", "no explicit policy";
    DifferentCrlScope = 44, "X509_V_ERR_DIFFERENT_CRL_SCOPE", "different CRL scope";
    UnsupportedExtensionFeature = 45, "X509_V_ERR_UNSUPPORTED_EXTENSION_FEATURE", "unsupported extension feature";
    UnnestedResource = 46, "X509_V_ERR_UNNESTED_RESOURCE", "RFC 3779 resource not subset of parent's resources";
    PermittedViolation = 47, "X509_V_ERR_PERMITTED_VIOLATION", "permitted subtree violation";
    ExcludedViolation = 48, "X509_V_ERR_EXCLUDED_VIOLATION", "excluded subtree violation";
    SubtreeMinMax = 49, "X509_V_ERR_SUBTREE_MINMAX", "name constraints minimum and maximum not supported";
    ApplicationVerification = 50, "X509_V_ERR_APPLICATION_VERIFICATION", "application verification failure";
    UnsupportedConstraintType = 51, "X509_V_ERR_UNSUPPORTED_CONSTRAINT_TYPE", "unsupported name constraint type";
    UnsupportedConstraintSyntax = 52, "X509_V_ERR_UNSUPPORTED_CONSTRAINT_SYNTAX", "unsupported or invalid name constraint syntax";
    UnsupportedNameSyntax = 53, "X509_V_ERR_UNSUPPORTED_NAME_SYNTAX", "unsupported or invalid name syntax";
    CrlPathValidationError = 54, "X509_V_ERR_CRL_PATH_VALIDATION_ERROR", "CRL path validation error";
    PathLoop = 55, "X509_V_ERR_PATH_LOOP", "path loop";
    SuiteBInvalidVersion = 56, "X509_V_ERR_SUITE_B_INVALID_VERSION", "Suite B: certificate version invalid";
    SuiteBInvalidAlgorithm = 57, "X509_V_ERR_SUITE_B_INVALID_ALGORITHM", "Suite B: invalid public key algorithm";
    SuiteBInvalidCurve = 58, "X509_V_ERR_SUITE_B_INVALID_CURVE", "Suite B: invalid ECC curve";
    SuiteBInvalidSignatureAlgorithm = 59, "X509_V_ERR_SUITE_B_INVALID_SIGNATURE_ALGORITHM", "Suite B: invalid signature algorithm";
    SuiteBLosNotAllowed = 60, "X509_V_ERR_SUITE_B_LOS_NOT_ALLOWED", "Suite B: curve not allowed for this LOS";
    SuiteBCannotSignP384WithP256 = 61, "X509_V_ERR_SUITE_B_CANNOT_SIGN_P_384_WITH_P_256", "Suite B: cannot sign P-384 with P-256";
    HostnameMismatch = 62, "X509_V_ERR_HOSTNAME_MISMATCH", "hostname mismatch";
    EmailMismatch = 63, "X509_V_ERR_EMAIL_MISMATCH", "email address mismatch";
    IpAddressMismatch = 64, "X509_V_ERR_IP_ADDRESS_MISMATCH", "IP address mismatch";
    DaneNoMatch = 65, "X509_V_ERR_DANE_NO_MATCH", "no matching DANE TLSA records";
}

impl VerificationCode {
    /// The numeric code.
    #[inline]
    pub fn code(self) -> i32 {
        self as i32
    }

    /// Returns `true` if `code` is in the catalog.
    #[inline]
    pub fn is_valid(code: i32) -> bool {
        Self::from_code(code).is_some()
    }

    /// Returns `true` for the successful verification result.
    #[inline]
    pub fn is_ok(self) -> bool {
        self == VerificationCode::Ok
    }
}

impl TryFrom<i32> for VerificationCode {
    type Error = Error;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        Self::from_code(code).ok_or_else(|| {
            Error::invalid_arg(
                "code",
                format!("{code} is not a known X.509 verification result code"),
            )
        })
    }
}

impl From<VerificationCode> for i32 {
    fn from(code: VerificationCode) -> i32 {
        code.code()
    }
}

impl std::fmt::Display for VerificationCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name(), self.code())
    }
}
