pub mod config;
pub mod edit;
pub mod info;
pub mod version;
