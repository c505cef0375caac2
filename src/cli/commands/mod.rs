pub mod add;
pub mod destroy;
pub mod edit;
pub mod generate;
pub mod get;
pub mod init;
pub mod list;
pub mod passwd;
pub mod remove;
pub mod strength;
