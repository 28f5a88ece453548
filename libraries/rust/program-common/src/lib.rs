pub mod accounts;
pub mod config;
pub mod error;
pub mod instruction;
pub mod programs;
pub mod seeds;
pub mod types;

#[doc(inline)]
pub use error::{Result, WireError};

#[doc(inline)]
pub use programs::ProgramIds;

#[doc(inline)]
pub use types::*;
