//! Core library for the todo client (config, local store, remote backend, logging).

pub mod config;
pub mod logging;
pub mod remote;
pub mod store;
