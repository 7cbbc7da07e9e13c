//! Persistence of target branch metadata for `bookkeeper` working copies.
//!
//! The metadata for a working copy lives at `<root>/.bookkeeper/metadata.yaml`. See
//! [metadata::load_target_branch_metadata] and [metadata::write_target_branch_metadata].

pub mod constants;
pub mod file;
pub mod metadata;
