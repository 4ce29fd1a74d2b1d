//! gxr - package repositories on IPFS
//!
//! Resolves repository roots (often mutable `/ipns/` names) to immutable
//! identifiers, caches those resolutions in `~/.gxcache`, and answers
//! "which repositories publish package X" across a configured registry.

pub mod cache;
pub mod cli;
pub mod client;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod repo;
pub mod ui;

pub use error::{GxrError, GxrResult};
