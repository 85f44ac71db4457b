//! LiteClientAppSample
//!
//! Sample host application for the NEAR lite client. It keeps a
//! [`near_lite_client::LiteClient`] in sync with a chain over JSON-RPC and
//! exposes commands to inspect the state and verify transactions.

#![forbid(unsafe_code)]

pub mod application;
pub mod commands;
pub mod config;
pub mod error;
pub mod near_views;
pub mod prelude;
pub mod rpc;
pub mod state;
pub mod utils;
