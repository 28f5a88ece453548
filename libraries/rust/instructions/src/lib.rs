pub mod controller;
pub mod derive;
pub mod drift;
pub mod error;
pub mod integration;
pub mod kamino;
pub mod oracle;
pub mod reserve;

pub use controller::ControllerIxBuilder;
pub use error::{AlmIxError, Result};

pub use alm_program_common as common;
