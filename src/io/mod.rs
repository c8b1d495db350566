pub mod config_io;
pub mod library;
pub mod memory;
pub mod store;
