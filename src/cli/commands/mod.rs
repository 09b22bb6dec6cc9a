//! CLI command modules

pub mod check;
pub mod enhance;
pub mod init;
pub mod validate;
