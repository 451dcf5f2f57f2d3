//! Session token types and the bearer attachment they feed.

pub mod bearer;
pub mod token;

pub use bearer::*;
pub use token::*;
