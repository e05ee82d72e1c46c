//! Translation bundle extraction core
//!
//! Takes the JSON dumps of a content pack's category stores and produces
//! one normalized translation bundle per category, in the
//! `{label, folders, entries, mapping}` schema consumed by compendium
//! translation layers.
//!
//! # Pipeline
//!
//! For each category dump:
//! 1. [`Collection`] loads the decoded records; the first record is the
//!    schema witness whose key set fixes the collection's shape.
//! 2. [`CollectionShape`] classifies the collection against the closed
//!    taxonomy of content shapes (folder-bearing, captioned adventure,
//!    description-bearing compendium, macro, linked-pages document).
//! 3. [`project`] re-projects every record into the uniform entry schema,
//!    recursing into nested sub-collections and accumulating the
//!    field-substitution [`MappingTable`].
//! 4. [`strip_reference_labels`] drops volatile display labels from inline
//!    cross-reference markers, keeping the stable identifier.
//! 5. [`clean`] sorts entry mappings, prunes empty nodes bottom-up, and
//!    scrubs embedded control characters.
//! 6. [`write_bundle`] serializes the result as
//!    `<version>.<category>.json`.
//!
//! The whole pipeline is single-pass and synchronous; each category is
//! owned by one bundle-construction run.

mod bundle;
mod clean;
mod collection;
mod mapping;
mod pipeline;
mod project;
mod refs;
mod shape;
mod write;

pub use bundle::{title_case, Bundle};
pub use clean::{clean, prune, scrub_text, sort_entries};
pub use collection::Collection;
pub use mapping::MappingTable;
pub use pipeline::{
    process_category, process_dir, BatchOutcome, CategoryFailure, CategoryReport,
};
pub use project::{project, Projection};
pub use refs::strip_reference_labels;
pub use shape::{CollectionShape, Fallback};
pub use write::{bundle_file_name, write_bundle};

/// Errors from bundle construction
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("cannot derive a category name from {0}")]
    DumpName(std::path::PathBuf),

    #[error("category '{category}': dump must be an array or object, got {found}")]
    InvalidDump { category: String, found: &'static str },

    #[error("category '{category}': record {index} has no usable name")]
    MissingName { category: String, index: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
