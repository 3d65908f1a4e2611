#![forbid(unsafe_code)]

//! Persisted user preferences for the theme system.
//!
//! Preferences live in a string-keyed, JSON-valued store under two fixed
//! keys: `theme` (the bare theme identifier) and `theme-settings` (the full
//! record). Loading merges stored fields over hard-coded defaults and
//! ignores unknown keys; every mutation rewrites the record in full,
//! immediately.
//!
//! Persistence is best-effort by contract: a corrupt or unavailable store
//! logs a warning and degrades to in-memory defaults for the session. No
//! failure here ever reaches the caller.

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::palette::ThemeId;

/// Store key for the bare current-theme identifier.
pub const THEME_KEY: &str = "theme";
/// Store key for the full preferences record.
pub const SETTINGS_KEY: &str = "theme-settings";

/// User preferences, persisted across sessions.
///
/// Field names serialize in the store's camelCase convention.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    #[serde(default)]
    pub current_theme: Option<ThemeId>,
    #[serde(default = "default_true")]
    pub auto_theme: bool,
    #[serde(default = "default_true")]
    pub remember_theme: bool,
    #[serde(default = "default_true")]
    pub show_indicator: bool,
    #[serde(default = "default_animation_duration")]
    pub animation_duration: u64,
    #[serde(default = "default_true")]
    pub enable_decorations: bool,
}

fn default_true() -> bool {
    true
}

fn default_animation_duration() -> u64 {
    500
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            current_theme: None,
            auto_theme: true,
            remember_theme: true,
            show_indicator: true,
            animation_duration: 500,
            enable_decorations: true,
        }
    }
}

/// Errors surfaced by storage backends. These never propagate past the
/// [`PreferenceStore`]; they exist so backends can report what went wrong.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A string-keyed, string-valued durable store.
pub trait StorageBackend {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

/// In-memory backend: tests, and the session fallback when the file store
/// cannot be opened.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: BTreeMap<String, String>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBackend for MemoryBackend {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// File-backed store: one JSON object per namespace file, rewritten whole
/// on every mutation.
#[derive(Debug)]
pub struct FileBackend {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileBackend {
    /// Open (or create) the store at `path`. The parent directory is
    /// created on demand. A corrupt file is treated as empty.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let entries = match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<BTreeMap<String, String>>(&raw) {
                Ok(entries) => entries,
                Err(err) => {
                    tracing::warn!(path = %path.display(), %err, "preference file corrupt; starting empty");
                    BTreeMap::new()
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(err) => return Err(err.into()),
        };
        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), StorageError> {
        let raw = serde_json::to_string_pretty(&self.entries)?;
        let mut file = fs::File::create(&self.path)?;
        file.write_all(raw.as_bytes())?;
        Ok(())
    }
}

impl StorageBackend for FileBackend {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        self.flush()
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);
        self.flush()
    }
}

/// Preference store over a pluggable backend.
///
/// All operations are infallible at this level: failures are logged and
/// swallowed so loss of persistence never crashes the caller.
pub struct PreferenceStore {
    backend: Box<dyn StorageBackend>,
}

impl std::fmt::Debug for PreferenceStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreferenceStore").finish_non_exhaustive()
    }
}

impl PreferenceStore {
    pub fn new(backend: Box<dyn StorageBackend>) -> Self {
        Self { backend }
    }

    pub fn in_memory() -> Self {
        Self::new(Box::new(MemoryBackend::new()))
    }

    /// Open a file-backed store, falling back to an in-memory store for
    /// the session if the file cannot be opened.
    pub fn open_or_memory(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        match FileBackend::open(&path) {
            Ok(backend) => Self::new(Box::new(backend)),
            Err(err) => {
                tracing::warn!(path = %path.display(), %err, "preference store unavailable; using in-memory defaults");
                Self::in_memory()
            }
        }
    }

    /// Load preferences, merging stored fields over defaults. Any
    /// deserialization failure logs and yields defaults.
    pub fn load(&self) -> Preferences {
        let Some(raw) = self.backend.get(SETTINGS_KEY) else {
            return Preferences::default();
        };
        match serde_json::from_str(&raw) {
            Ok(prefs) => prefs,
            Err(err) => {
                tracing::warn!(%err, "failed to load theme settings; using defaults");
                Preferences::default()
            }
        }
    }

    /// Persist the full record. Failures are logged and swallowed.
    pub fn save(&mut self, prefs: &Preferences) {
        match serde_json::to_string(prefs) {
            Ok(raw) => {
                if let Err(err) = self.backend.set(SETTINGS_KEY, &raw) {
                    tracing::warn!(%err, "failed to save theme settings");
                }
            }
            Err(err) => tracing::warn!(%err, "failed to serialize theme settings"),
        }
    }

    /// The bare stored theme identifier, if any. Unknown identifiers are
    /// logged and ignored.
    pub fn stored_theme(&self) -> Option<ThemeId> {
        let raw = self.backend.get(THEME_KEY)?;
        match ThemeId::parse(&raw) {
            Some(id) => Some(id),
            None => {
                tracing::warn!(theme = %raw, "stored theme id unknown; ignoring");
                None
            }
        }
    }

    /// Persist the bare theme identifier. Failures are logged and
    /// swallowed.
    pub fn store_theme(&mut self, id: ThemeId) {
        if let Err(err) = self.backend.set(THEME_KEY, id.as_str()) {
            tracing::warn!(%err, theme = %id, "failed to save current theme");
        }
    }

    /// Remove the bare theme identifier.
    pub fn clear_theme(&mut self) {
        if let Err(err) = self.backend.remove(THEME_KEY) {
            tracing::warn!(%err, "failed to clear stored theme");
        }
    }

    /// A trivial boolean flag under its own key (e.g. first-visit).
    pub fn flag(&self, key: &str) -> bool {
        self.backend.get(key).as_deref() == Some("true")
    }

    /// Set a boolean flag, persisting immediately.
    pub fn set_flag(&mut self, key: &str, value: bool) {
        let raw = if value { "true" } else { "false" };
        if let Err(err) = self.backend.set(key, raw) {
            tracing::warn!(%err, key, "failed to save flag");
        }
    }
}
