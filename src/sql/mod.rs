//! Safe SQL builder: identifiers from constants only, values as parameters.

mod builder;
pub use builder::*;
