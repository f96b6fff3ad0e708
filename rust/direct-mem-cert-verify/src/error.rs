use direct_mem_common::error::StdErrorBoxed;
use thiserror::Error;

use crate::code::VerificationCode;

/// A certificate verification failure together with its verification result code.
///
/// The code is validated against [`VerificationCode`] at construction; an unknown
/// code is a caller bug and is rejected with an invalid-argument error. The message
/// is optional. Without one, the error displays the code's description.
#[derive(Debug, Error)]
#[error("{}", display_message(.message, .code))]
pub struct CertificateVerifierError {
    message: Option<String>,
    #[source]
    source: Option<StdErrorBoxed>,
    code: VerificationCode,
}

impl CertificateVerifierError {
    pub fn new(
        message: impl Into<String>,
        code: i32,
    ) -> direct_mem_common::Result<CertificateVerifierError> {
        Self::build(Some(message.into()), None, code)
    }

    /// Creates an error that carries only the verification code.
    pub fn from_code(code: i32) -> direct_mem_common::Result<CertificateVerifierError> {
        Self::build(None, None, code)
    }

    pub fn with_source(
        message: impl Into<String>,
        source: impl Into<StdErrorBoxed>,
        code: i32,
    ) -> direct_mem_common::Result<CertificateVerifierError> {
        Self::build(Some(message.into()), Some(source.into()), code)
    }

    /// Creates an error with an underlying cause and no message of its own.
    pub fn from_source(
        source: impl Into<StdErrorBoxed>,
        code: i32,
    ) -> direct_mem_common::Result<CertificateVerifierError> {
        Self::build(None, Some(source.into()), code)
    }

    fn build(
        message: Option<String>,
        source: Option<StdErrorBoxed>,
        code: i32,
    ) -> direct_mem_common::Result<CertificateVerifierError> {
        let code = VerificationCode::try_from(code)?;
        Ok(CertificateVerifierError {
            message,
            source,
            code,
        })
    }

    /// The numeric verification result code.
    #[inline]
    pub fn code(&self) -> i32 {
        self.code.code()
    }

    #[inline]
    pub fn verification_code(&self) -> VerificationCode {
        self.code
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

fn display_message<'a>(message: &'a Option<String>, code: &VerificationCode) -> &'a str {
    message.as_deref().unwrap_or(code.description())
}
