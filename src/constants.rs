//! Constants for the `bookkeeper` application.

/// The name of the hidden directory, relative to the working copy root, that holds `bookkeeper` state.
pub const BOOKKEEPER_DIR: &str = ".bookkeeper";

/// The name of the target branch metadata file within [BOOKKEEPER_DIR].
pub const METADATA_FILE_NAME: &str = "metadata.yaml";
