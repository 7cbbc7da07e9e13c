//! Target branch metadata, persisted at a fixed location within a working copy.

use crate::{
    constants::{BOOKKEEPER_DIR, METADATA_FILE_NAME},
    file,
};
use anyhow::{Context, Result};
use serde::{de, Deserialize, Deserializer, Serialize};
use std::{
    io::Write,
    path::{Path, PathBuf},
};
use tracing::{debug, trace};

/// Metadata describing the state of a target branch.
#[derive(Default, Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TargetBranchMetadata {
    /// The identifier of the source commit the target branch's content was derived from.
    ///
    /// Opaque to `bookkeeper`; stored and returned verbatim.
    #[serde(deserialize_with = "scalar_or_default")]
    pub source_commit: String,
    /// Image substitutions applied when the target branch was rendered.
    #[serde(
        skip_serializing_if = "Vec::is_empty",
        deserialize_with = "null_as_default"
    )]
    pub image_substitutions: Vec<String>,
}

impl TargetBranchMetadata {
    /// Creates a new [TargetBranchMetadata] for the given source commit, with no image substitutions.
    pub fn new(source_commit: String) -> Self {
        Self {
            source_commit,
            ..Default::default()
        }
    }
}

/// Returns the path to the hidden `bookkeeper` directory within the working copy at `root`.
pub fn metadata_dir<P: AsRef<Path>>(root: P) -> PathBuf {
    root.as_ref().join(BOOKKEEPER_DIR)
}

/// Returns the path to the [TargetBranchMetadata] file within the working copy at `root`.
pub fn metadata_path<P: AsRef<Path>>(root: P) -> PathBuf {
    metadata_dir(root).join(METADATA_FILE_NAME)
}

/// Loads the [TargetBranchMetadata] for the working copy at `root`.
///
/// ## Takes
/// - `root` - The root of the working copy.
///
/// ## Returns
/// - `Ok(Some(TargetBranchMetadata))` - The metadata on disk. An empty file yields the default record.
/// - `Ok(None)` - No metadata has been recorded for the working copy.
/// - `Err(_)` - The metadata file could not be read, or its contents are malformed.
pub fn load_target_branch_metadata<P: AsRef<Path>>(
    root: P,
) -> Result<Option<TargetBranchMetadata>> {
    let path = metadata_path(root);

    let exists = file::exists(&path).with_context(|| {
        format!(
            "error checking for existence of branch metadata at {}",
            path.display()
        )
    })?;
    if !exists {
        debug!(path = %path.display(), "No branch metadata found");
        return Ok(None);
    }

    let contents = std::fs::read(&path)
        .with_context(|| format!("error reading branch metadata from {}", path.display()))?;
    trace!(path = %path.display(), bytes = contents.len(), "Read branch metadata");

    parse(&contents)
        .map(Some)
        .context("error unmarshaling branch metadata")
}

/// Persists `metadata` for the working copy at `root`, replacing any metadata already on disk.
///
/// The `.bookkeeper` directory is created if it does not exist. The file is written to a temporary
/// sibling and renamed into place, so readers never observe a partially written file.
///
/// ## Takes
/// - `metadata` - The metadata to persist.
/// - `root` - The root of the working copy.
///
/// ## Returns
/// - `Ok(())` - The metadata was persisted.
/// - `Err(_)` - The directory could not be created, or the metadata could not be serialized or written.
pub fn write_target_branch_metadata<P: AsRef<Path>>(
    metadata: &TargetBranchMetadata,
    root: P,
) -> Result<()> {
    let dir = metadata_dir(&root);
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("error creating directory {}", dir.display()))?;

    // Serialize before touching the file so a failure leaves the previous metadata intact.
    let contents =
        serde_yaml::to_string(metadata).context("error marshaling branch metadata")?;

    let path = dir.join(METADATA_FILE_NAME);
    replace_file(&dir, &path, contents.as_bytes())
        .with_context(|| format!("error writing branch metadata to {}", path.display()))?;
    debug!(path = %path.display(), source_commit = %metadata.source_commit, "Wrote branch metadata");

    Ok(())
}

/// Deserializes [TargetBranchMetadata], treating an empty or `null` document as the default record.
fn parse(contents: &[u8]) -> Result<TargetBranchMetadata, serde_yaml::Error> {
    let contents = std::str::from_utf8(contents)
        .map_err(<serde_yaml::Error as de::Error>::custom)?;
    if contents.trim().is_empty() {
        return Ok(TargetBranchMetadata::default());
    }

    let value: serde_yaml::Value = serde_yaml::from_str(contents)?;
    if value.is_null() {
        return Ok(TargetBranchMetadata::default());
    }
    serde_yaml::from_value(value)
}

/// Deserializes a field as `T`, mapping an explicit `null` to `T::default()`.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Deserializes any YAML scalar as its text, so `sourceCommit: 1234567` reads as `"1234567"`.
/// `null` reads as the empty string.
fn scalar_or_default<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_yaml::Value::deserialize(deserializer)? {
        serde_yaml::Value::Null => Ok(String::new()),
        serde_yaml::Value::String(s) => Ok(s),
        serde_yaml::Value::Number(n) => Ok(n.to_string()),
        serde_yaml::Value::Bool(b) => Ok(b.to_string()),
        other => Err(de::Error::invalid_type(
            unexpected(&other),
            &"a scalar source commit",
        )),
    }
}

fn unexpected(value: &serde_yaml::Value) -> de::Unexpected<'_> {
    match value {
        serde_yaml::Value::Sequence(_) => de::Unexpected::Seq,
        serde_yaml::Value::Mapping(_) => de::Unexpected::Map,
        _ => de::Unexpected::Other("non-scalar value"),
    }
}

/// Replaces the contents of `path` with `bytes` by writing a temporary file in `dir` and renaming it.
fn replace_file(dir: &Path, path: &Path, bytes: &[u8]) -> Result<()> {
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    // Keep the mode of the file being replaced rather than the temporary file's 0600.
    if let Ok(existing) = std::fs::metadata(path) {
        if existing.is_file() {
            tmp.as_file().set_permissions(existing.permissions())?;
        }
    }
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
