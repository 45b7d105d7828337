pub mod compare;
pub mod init;
pub mod score;
pub mod summary;
pub mod validate;
