//! Loading and serving the polyphone tables.
//!
//! `ZhuyinService` moves from unloaded to loaded exactly once, reading the
//! dictionary and tone table from local files, URLs or a compiled snapshot.

mod service;
mod source;
#[cfg(test)]
mod tests;
pub mod trace_init;

pub use service::{AnnotateError, LoadHandle, ZhuyinService};
pub use source::{LoadError, ResourceLocation, Resources};
