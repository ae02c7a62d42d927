pub mod init;
pub mod roles;
pub mod serve;
