//! Remote (asynchronous) field validation
//!
//! A field re-validates on every value change. A newer request cancels the pending one,
//! so the latest value always decides the field's validity.

pub mod field;
pub mod form;
pub mod remote_validator;

// Re-export main types
pub use field::ValidatedField;
pub use form::FormGroup;
pub use remote_validator::{RemoteValidator, ValidationFuture};
