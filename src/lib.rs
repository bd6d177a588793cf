pub mod config;
pub mod error;
pub mod playlist;
pub mod scan;
pub mod sync;
