//! X.509 verification result codes and the error type that carries one.

pub mod code;
pub mod error;

pub use code::VerificationCode;
pub use error::CertificateVerifierError;

#[cfg(test)]
mod tests;
