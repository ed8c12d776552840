//! An incremental JSON syntax validator.
//!
//! Feed JSON text in chunks split at any byte boundary; each call reports
//! whether the input so far is still a valid JSON prefix and fails the moment
//! it is not. No values are built.
//!
//! ```rust
//! use jsonsift::{ErrorKind, StreamingValidator};
//!
//! let mut validator = StreamingValidator::default();
//! validator.feed("[123").unwrap();
//! validator.feed("456, \"foo").unwrap();
//! validator.feed("bar\"]").unwrap();
//!
//! let err = validator.feed("]").unwrap_err();
//! assert!(matches!(err.kind, ErrorKind::UnexpectedCharacter { .. }));
//!
//! validator.reset();
//! validator.feed("{}").unwrap();
//! ```

#![no_std]
extern crate alloc;

#[cfg(test)]
extern crate std;

/// Emits a `tracing` event when the `tracing` feature is enabled.
macro_rules! event {
    ($level:ident, $($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        tracing::$level!($($arg)*);
    };
}

mod error;
mod options;
mod validator;

#[cfg(test)]
mod tests;

pub use error::{ErrorKind, EscapeError, Found, TokenKind, ValidationError};
pub use options::{DEFAULT_MAX_DEPTH, SurrogatePolicy, ValidatorOptions};
pub use validator::{StreamingValidator, validate};
