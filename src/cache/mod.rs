//! Persistent resolution cache
//!
//! Remembers the last identifier each symbolic path resolved to, so repeated
//! lookups skip the network.
//!
//! # Consistency Model
//!
//! - One JSON document (`~/.gxcache`) maps path to identifier
//! - Every update reads the whole document, sets one key and rewrites it
//! - Rewrites go through a temporary file and a rename, so readers never
//!   see a half-written document
//! - Writers within one process are serialised; separate processes may
//!   still overwrite each other's entries (last rename wins)
//!
//! # Failure Modes
//!
//! | Situation | `lookup` | `store` |
//! |-----------|----------|---------|
//! | File missing | `Ok(None)` | creates the file |
//! | Entry missing | `Ok(None)` | adds the entry |
//! | File not a flat string map | `CacheCorrupt` | `CacheCorrupt` |

pub mod resolution;

pub use resolution::{ResolutionCache, CACHE_FILE};
