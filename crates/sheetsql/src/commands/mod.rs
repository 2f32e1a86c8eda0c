//! CLI command implementations

pub mod convert;
pub mod init;
pub mod load;
pub mod rename;
