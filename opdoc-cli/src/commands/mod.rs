pub mod build;
pub mod diff;
pub mod init;
