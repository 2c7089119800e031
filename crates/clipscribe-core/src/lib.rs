//! Shared error contract for Clipscribe crates

mod error;

pub use error::{ErrorBody, HttpError};
