//! Authentication: password hashing, bearer tokens and the current-user extractor.

pub mod claims;
pub mod extractor;
pub mod password;

pub use claims::TokenKeys;
pub use extractor::CurrentUser;
pub use password::{hash_password, verify_password};
