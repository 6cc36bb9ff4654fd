pub mod config;
pub mod consts;
pub mod error;
pub mod generator;
pub mod handlers;
pub mod prompts;
pub mod server;
pub mod splitter;
pub mod store;
