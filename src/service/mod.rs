//! Auth gate primitives and request validation.

mod password;
mod token;
mod validation;
pub use password::{hash_password, verify_password, DUMMY_HASH};
pub use token::{AccessToken, Claims, TokenIssuer};
pub use validation::{RequestValidator, MAX_TEXT_LEN, MIN_PASSWORD_LEN};
