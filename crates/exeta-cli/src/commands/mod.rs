//! CLI command implementations

pub mod extract;
pub mod inspect;
pub mod locate;
