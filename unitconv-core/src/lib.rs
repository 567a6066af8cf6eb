//! unitconv Core - Shared error types
//!
//! This crate provides the types shared by the unit table, the engine and
//! the tool server:
//! - `ConvertError`: typed failures for lookups and conversions
//! - `ErrorReport`: structured, serializable form for tool clients

mod error;

pub use error::{codes, ConvertError, ErrorReport};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{ConvertError, ErrorReport};
    pub use crate::error::codes;
}
