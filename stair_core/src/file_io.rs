//! # File I/O Module
//!
//! Persists [`UserPreferences`] between sessions with safety features:
//! - **Atomic saves**: Write to .tmp, sync, rename to prevent corruption
//! - **File locking**: Serialize concurrent saves from two running instances
//! - **Version validation**: Ensure schema compatibility
//!
//! ## File Format
//!
//! Preferences are saved as JSON with a small header:
//!
//! ```json
//! {
//!   "meta": { "version": "0.1.0", "saved": "2025-01-01T12:00:00Z" },
//!   "preferences": { "default_tread_depth": 9.25, "...": "..." }
//! }
//! ```
//!
//! ## Example
//!
//! ```rust,no_run
//! use stair_core::file_io::{load_or_default, save_preferences};
//! use std::path::Path;
//!
//! let path = Path::new("data/app_preferences.json");
//! let mut prefs = load_or_default(path);
//! prefs.default_tread_depth = 10.0;
//! save_preferences(&prefs, path)?;
//! # Ok::<(), stair_core::errors::StairError>(())
//! ```

use std::fs::{self, File, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use fs2::FileExt;
use serde::{Deserialize, Serialize};

use crate::errors::{StairError, StairResult};
use crate::preferences::UserPreferences;

/// Current schema version for preference files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Default location of the preferences file, relative to the working directory
pub const DEFAULT_PREFERENCES_PATH: &str = "data/app_preferences.json";

/// On-disk envelope around the preferences.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreferencesFile {
    /// File header
    pub meta: FileMeta,
    /// The stored preferences
    pub preferences: UserPreferences,
}

/// Header stored with every preferences file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileMeta {
    /// Schema version (for migration compatibility)
    pub version: String,
    /// When the file was last written
    pub saved: DateTime<Utc>,
}

/// Exclusive lock held while a preferences file is written.
///
/// Uses an OS-level lock (via fs2) on a sibling `.lock` file; the lock is
/// released and the lock file removed when the guard drops.
struct SaveLock {
    lock_path: PathBuf,
    file: File,
}

impl SaveLock {
    fn acquire(path: &Path) -> StairResult<Self> {
        let lock_path = lock_path_for(path);
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&lock_path)
            .map_err(|e| StairError::file_error("create lock", lock_path.display().to_string(), e.to_string()))?;

        // Blocks until another instance finishes its save
        file.lock_exclusive()
            .map_err(|e| StairError::file_error("lock", lock_path.display().to_string(), e.to_string()))?;

        Ok(SaveLock { lock_path, file })
    }
}

impl Drop for SaveLock {
    fn drop(&mut self) {
        let _ = self.file.unlock();
        let _ = fs::remove_file(&self.lock_path);
    }
}

/// Get the lock file path for a preferences file
fn lock_path_for(path: &Path) -> PathBuf {
    let mut lock_path = path.to_path_buf();
    let extension = lock_path
        .extension()
        .map(|e| format!("{}.lock", e.to_string_lossy()))
        .unwrap_or_else(|| "lock".to_string());
    lock_path.set_extension(extension);
    lock_path
}

/// Get the temporary file path used during an atomic save
fn tmp_path_for(path: &Path) -> PathBuf {
    let mut tmp_path = path.to_path_buf();
    let extension = tmp_path
        .extension()
        .map(|e| format!("{}.tmp", e.to_string_lossy()))
        .unwrap_or_else(|| "tmp".to_string());
    tmp_path.set_extension(extension);
    tmp_path
}

/// Save preferences with atomic write semantics.
///
/// The save process:
/// 1. Create the parent directory if needed
/// 2. Take the exclusive save lock
/// 3. Write JSON to a temporary file (.tmp) and sync it to disk
/// 4. Rename .tmp over the target (atomic on most filesystems)
pub fn save_preferences(preferences: &UserPreferences, path: &Path) -> StairResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|e| StairError::file_error("create directory", parent.display().to_string(), e.to_string()))?;
    }

    let _lock = SaveLock::acquire(path)?;

    let file = PreferencesFile {
        meta: FileMeta {
            version: SCHEMA_VERSION.to_string(),
            saved: Utc::now(),
        },
        preferences: preferences.clone(),
    };
    let json = serde_json::to_string_pretty(&file).map_err(|e| StairError::serialization(e.to_string()))?;

    let tmp_path = tmp_path_for(path);
    let mut tmp_file = File::create(&tmp_path)
        .map_err(|e| StairError::file_error("create temp file", tmp_path.display().to_string(), e.to_string()))?;

    tmp_file
        .write_all(json.as_bytes())
        .map_err(|e| StairError::file_error("write temp file", tmp_path.display().to_string(), e.to_string()))?;

    tmp_file
        .sync_all()
        .map_err(|e| StairError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string()))?;

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        StairError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    tracing::info!("Saved preferences to {}", path.display());
    Ok(())
}

/// Load preferences from a file.
///
/// # Returns
///
/// * `Ok(UserPreferences)` - Loaded preferences (missing keys take defaults)
/// * `Err(StairError::VersionMismatch)` - File version is incompatible
/// * `Err(StairError::SerializationError)` - Invalid JSON
/// * `Err(StairError::FileError)` - I/O error
pub fn load_preferences(path: &Path) -> StairResult<UserPreferences> {
    let mut file =
        File::open(path).map_err(|e| StairError::file_error("open", path.display().to_string(), e.to_string()))?;

    let mut contents = String::new();
    file.read_to_string(&mut contents)
        .map_err(|e| StairError::file_error("read", path.display().to_string(), e.to_string()))?;

    let stored: PreferencesFile = serde_json::from_str(&contents)
        .map_err(|e| StairError::serialization(format!("Invalid JSON in {}: {}", path.display(), e)))?;

    validate_version(&stored.meta.version)?;

    Ok(stored.preferences)
}

/// Load preferences, falling back to the defaults when the file is missing
/// or unreadable.
pub fn load_or_default(path: &Path) -> UserPreferences {
    if !path.exists() {
        tracing::debug!("No preferences at {}, using defaults", path.display());
        return UserPreferences::default();
    }
    match load_preferences(path) {
        Ok(preferences) => preferences,
        Err(e) => {
            tracing::warn!("Ignoring preferences file: {}. Using defaults.", e);
            UserPreferences::default()
        }
    }
}

/// Validate that a file version is compatible with the current schema.
fn validate_version(file_version: &str) -> StairResult<()> {
    let mismatch = || StairError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: SCHEMA_VERSION.to_string(),
    };

    let file_parts: Vec<u32> = file_version.split('.').filter_map(|p| p.parse().ok()).collect();
    let current_parts: Vec<u32> = SCHEMA_VERSION.split('.').filter_map(|p| p.parse().ok()).collect();

    if file_parts.is_empty() || current_parts.is_empty() {
        return Err(mismatch());
    }

    // Major version must match
    if file_parts[0] != current_parts[0] {
        return Err(mismatch());
    }

    // For 0.x versions, a newer minor version is not readable
    if current_parts[0] == 0 && file_parts.len() > 1 && current_parts.len() > 1 && file_parts[1] > current_parts[1] {
        return Err(mismatch());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::DisplayUnit;
    use std::env::temp_dir;

    fn temp_prefs_path(name: &str) -> PathBuf {
        temp_dir().join(format!("stair_test_{}_{}.json", name, std::process::id()))
    }

    #[test]
    fn test_lock_path_generation() {
        let path = Path::new("/path/to/prefs.json");
        assert_eq!(lock_path_for(path), Path::new("/path/to/prefs.json.lock"));
        assert_eq!(tmp_path_for(path), Path::new("/path/to/prefs.json.tmp"));
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let path = temp_prefs_path("roundtrip");

        let mut prefs = UserPreferences::default();
        prefs.default_tread_depth = 10.5;
        prefs.display_unit = DisplayUnit::Centimeters;
        save_preferences(&prefs, &path).unwrap();

        let loaded = load_preferences(&path).unwrap();
        assert_eq!(loaded, prefs);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_atomic_save_leaves_no_tmp_or_lock_file() {
        let path = temp_prefs_path("atomic");

        save_preferences(&UserPreferences::default(), &path).unwrap();

        assert!(path.exists());
        assert!(!tmp_path_for(&path).exists());
        assert!(!lock_path_for(&path).exists());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_save_creates_parent_directory() {
        let dir = temp_dir().join(format!("stair_test_dir_{}", std::process::id()));
        let path = dir.join("app_preferences.json");
        let _ = fs::remove_dir_all(&dir);

        save_preferences(&UserPreferences::default(), &path).unwrap();
        assert!(path.exists());

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_load_or_default_on_missing_and_corrupt() {
        let missing = temp_prefs_path("missing");
        let _ = fs::remove_file(&missing);
        assert_eq!(load_or_default(&missing), UserPreferences::default());

        let corrupt = temp_prefs_path("corrupt");
        fs::write(&corrupt, "{ not json").unwrap();
        assert!(matches!(
            load_preferences(&corrupt),
            Err(StairError::SerializationError { .. })
        ));
        assert_eq!(load_or_default(&corrupt), UserPreferences::default());

        let _ = fs::remove_file(&corrupt);
    }

    #[test]
    fn test_version_validation() {
        assert!(validate_version(SCHEMA_VERSION).is_ok());
        assert!(validate_version("0.1.5").is_ok());
        assert!(validate_version("1.0.0").is_err());
        assert!(validate_version("0.2.0").is_err());
        assert!(validate_version("garbage").is_err());
    }

    #[test]
    fn test_newer_file_is_rejected() {
        let path = temp_prefs_path("newer");
        fs::write(
            &path,
            r#"{"meta":{"version":"0.9.0","saved":"2025-01-01T00:00:00Z"},"preferences":{}}"#,
        )
        .unwrap();

        assert!(matches!(
            load_preferences(&path),
            Err(StairError::VersionMismatch { .. })
        ));

        let _ = fs::remove_file(&path);
    }
}
