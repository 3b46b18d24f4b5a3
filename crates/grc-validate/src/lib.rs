#![deny(unsafe_code)]

mod error;
mod summary;
mod validator;

pub use error::ValidateError;
pub use summary::error_summary;
pub use validator::validate_rows;
