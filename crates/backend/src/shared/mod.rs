pub mod config;
pub mod data;
pub mod error;
pub mod format;
pub mod json;
pub mod state;

#[cfg(test)]
pub mod testing;
