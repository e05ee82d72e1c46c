//! Embedded key-value store reader for content packs
//!
//! A content pack stores its documents in one LevelDB store per content
//! category, laid out as sibling subdirectories under a single store root:
//!
//! ```text
//! packs/
//!   actors/     <- LevelDB store, one JSON document per value
//!   items/
//!   journals/
//!   ...
//! ```
//!
//! Stored values are UTF-8 JSON documents. Values that fail to parse as
//! JSON are preserved by wrapping the raw text as `{"name": <text>}`; store
//! keys are discarded. Iteration order is the store's native key order and
//! is accepted as-is.
//!
//! The crate also reads the pack's `module.json` manifest, whose `id` names
//! the source version used for bundle file naming downstream.

mod dump;
mod manifest;
mod record;
mod store;

pub use dump::{dump_all, dump_category, to_pretty_vec, CategoryFailure, DumpOutcome, DumpReport};
pub use manifest::Manifest;
pub use record::decode_record;
pub use store::{list_categories, read_store};

/// Errors from pack store reading
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("failed to open store at {path}: {message}")]
    StoreOpen { path: std::path::PathBuf, message: String },

    #[error("store iteration failed at {path}: {message}")]
    StoreIter { path: std::path::PathBuf, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("no pack manifest at {0}")]
    ManifestMissing(std::path::PathBuf),
}

pub type Result<T> = std::result::Result<T, Error>;
