//! Metadata registry (§4.5): `files`/`imports`/`min_max` read-write
//! helpers over the shared metadatabase, plus dataset deletion and
//! wildcard drop.

mod rows;
mod util;

pub mod drop;
pub mod files;
pub mod imports;
pub mod min_max;

pub use drop::{drop_dataset, drop_matching, known_datasets, match_pattern};
pub use files::{already_imported, imported_paths, record_file};
pub use imports::{complete_import, latest_import, start_import};
pub use min_max::record as record_min_max;
pub use min_max::query as query_min_max;
