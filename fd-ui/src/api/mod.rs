//! API Access
//!
//! The browser implementation of the FD gateway.

pub mod client;

pub use client::{get_api_base, set_api_base, GlooApi};
