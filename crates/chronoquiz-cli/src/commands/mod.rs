pub mod init;
pub mod load;
pub mod play;
pub mod tags;
pub mod validate;
