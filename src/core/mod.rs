pub mod assembler;
pub mod compression;
pub mod config;
pub mod constants;
pub mod data_handle;
pub mod decoder;
pub mod error;
pub mod filter;
pub mod format;
pub mod pipeline;
pub mod reader;
pub mod timestamp;
