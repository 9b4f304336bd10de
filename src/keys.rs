//! Thin owned-byte-vector wrappers around the packed key/signature frames
//! of §4.7, sized to whichever [`Level`] produced them.
//!
//! Each of the three frames gets its own type rather than a shared
//! `Vec<u8>`, so a public key can't be passed where a signature is expected.
//! Hex (de)serialization is deliberately not part of this surface: it stays
//! in the test/bench harness (`hex` is a dev-dependency, not a runtime one).
//! The secret key zeroizes its buffer on drop, so a panicking caller doesn't
//! leave key material sitting in a freed stack frame.

use zeroize::Zeroize;

use crate::error::DilithiumError;
use crate::params::Level;

/// A packed Dilithium public key: `rho || t1`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublicKey {
    level: Level,
    bytes: Vec<u8>,
}

/// A packed Dilithium secret key: `rho || key || tr || s1 || s2 || t0`.
///
/// Zeroizes its backing buffer on drop; does not implement `Debug` so a
/// stray `{:?}` in a log line can't leak it.
pub struct SecretKey {
    level: Level,
    bytes: Vec<u8>,
}

/// A packed Dilithium signature: `c~ || z || h`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Signature {
    level: Level,
    bytes: Vec<u8>,
}

impl Drop for SecretKey {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

impl Clone for SecretKey {
    fn clone(&self) -> Self {
        SecretKey {
            level: self.level,
            bytes: self.bytes.clone(),
        }
    }
}

macro_rules! byte_wrapper {
    ($ty:ident, $field:ident) => {
        impl $ty {
            pub(crate) fn from_parts(level: Level, bytes: Vec<u8>) -> Self {
                $ty { level, bytes }
            }

            /// Parse a byte buffer as a value of this level, checking its
            /// length against the declared size from §3. Any other defect
            /// (malformed hint encoding, bad challenge) surfaces later, from
            /// the operation that actually needs to interpret the bytes.
            pub fn from_bytes(level: Level, bytes: &[u8]) -> Result<Self, DilithiumError> {
                let params = level.params();
                if bytes.len() != params.$field {
                    return Err(DilithiumError::InvalidInputLength);
                }
                Ok($ty {
                    level,
                    bytes: bytes.to_vec(),
                })
            }

            pub fn level(&self) -> Level {
                self.level
            }

            pub fn as_bytes(&self) -> &[u8] {
                &self.bytes
            }
        }
    };
}

byte_wrapper!(PublicKey, public_key_bytes);
byte_wrapper!(SecretKey, secret_key_bytes);
byte_wrapper!(Signature, signature_bytes);
