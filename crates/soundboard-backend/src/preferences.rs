//! Persisted boolean preferences.
//!
//! Every toggle keeps an in-memory mirror next to its durable value. The
//! durable side is a string key/value store; values are written as `"true"`
//! or `"false"` and only the literal `"true"` reads back as set.

use std::{
    collections::{BTreeMap, HashMap},
    path::PathBuf,
    sync::{Arc, Mutex},
};

use soundboard_bridge::preference::{PreferenceKey, Preferences};

/// Errors reported by a [`PreferenceStorage`] backend.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The backing file could not be read or written.
    #[error("failed to access preference storage: {0}")]
    Io(#[from] std::io::Error),
    /// The backing file is not a flat TOML string table.
    #[error("failed to deserialize preferences: {0}")]
    Deserialize(#[from] toml::de::Error),
    #[error("failed to serialize preferences: {0}")]
    Serialize(#[from] toml::ser::Error),
    /// The storage cannot be used at all right now.
    #[error("preference storage is unavailable: {0}")]
    Unavailable(String),
}

/// Durable string key/value storage.
pub trait PreferenceStorage: Send + Sync {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Stores preferences as a TOML string table in a single file.
pub struct FileStorage {
    path: PathBuf,
    // serializes read-modify-write cycles of the file
    write_lock: Mutex<()>,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    fn read_table(&self) -> Result<BTreeMap<String, String>, StorageError> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => Ok(toml::from_str(&contents)?),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(error) => Err(error.into()),
        }
    }
}

impl PreferenceStorage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_table()?.remove(key))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| StorageError::Unavailable("write lock poisoned".to_owned()))?;

        let mut table = self.read_table()?;
        table.insert(key.to_owned(), value.to_owned());

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, toml::to_string(&table)?)?;
        Ok(())
    }
}

/// Volatile storage, used when no configuration directory is available.
#[derive(Default)]
pub struct MemoryStorage {
    items: Mutex<HashMap<String, String>>,
}

impl PreferenceStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let items = self
            .items
            .lock()
            .map_err(|_| StorageError::Unavailable("memory storage poisoned".to_owned()))?;
        Ok(items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut items = self
            .items
            .lock()
            .map_err(|_| StorageError::Unavailable("memory storage poisoned".to_owned()))?;
        items.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// A single boolean preference: its key and the in-memory mirror of the
/// durable value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreferenceToggle {
    key: PreferenceKey,
    value: bool,
}

impl PreferenceToggle {
    /// Seeds the mirror from storage. Unreadable storage reads as unset.
    pub fn load(key: PreferenceKey, storage: &dyn PreferenceStorage) -> Self {
        let raw = storage.get_item(key.storage_key()).unwrap_or_else(|error| {
            log::warn!("Failed to read preference {}: {error}", key.storage_key());
            None
        });
        Self {
            key,
            value: PreferenceKey::decode(raw.as_deref()),
        }
    }

    /// The mirrored value.
    pub fn value(&self) -> bool {
        self.value
    }

    /// Reads the durable value, falling back to the mirror when storage
    /// cannot be read.
    pub fn read(&self, storage: &dyn PreferenceStorage) -> bool {
        match storage.get_item(self.key.storage_key()) {
            Ok(raw) => PreferenceKey::decode(raw.as_deref()),
            Err(error) => {
                log::warn!("Failed to read preference {}: {error}", self.key.storage_key());
                self.value
            }
        }
    }

    /// Writes through to storage, then updates the mirror. A failed write is
    /// logged and the mirror still takes the new value.
    pub fn update(&mut self, storage: &dyn PreferenceStorage, value: bool) {
        if let Err(error) = storage.set_item(self.key.storage_key(), PreferenceKey::encode(value)) {
            log::warn!(
                "Failed to persist preference {}={value}: {error}",
                self.key.storage_key()
            );
        }
        self.value = value;
    }
}

/// Every preference toggle together with the storage backing them.
pub struct PreferenceStore {
    storage: Box<dyn PreferenceStorage>,
    muted: PreferenceToggle,
    play_send_sounds: PreferenceToggle,
}

impl PreferenceStore {
    pub fn load(storage: Box<dyn PreferenceStorage>) -> Self {
        let muted = PreferenceToggle::load(PreferenceKey::MuteSounds, storage.as_ref());
        let play_send_sounds =
            PreferenceToggle::load(PreferenceKey::PlaySendSounds, storage.as_ref());
        Self {
            storage,
            muted,
            play_send_sounds,
        }
    }

    fn toggle(&self, key: PreferenceKey) -> &PreferenceToggle {
        match key {
            PreferenceKey::MuteSounds => &self.muted,
            PreferenceKey::PlaySendSounds => &self.play_send_sounds,
        }
    }

    /// Returns the durable value of `key`.
    pub fn read(&self, key: PreferenceKey) -> bool {
        self.toggle(key).read(self.storage.as_ref())
    }

    pub fn update(&mut self, key: PreferenceKey, value: bool) {
        let toggle = match key {
            PreferenceKey::MuteSounds => &mut self.muted,
            PreferenceKey::PlaySendSounds => &mut self.play_send_sounds,
        };
        toggle.update(self.storage.as_ref(), value);
        log::debug!("Preference {} set to {value}", key.storage_key());
    }

    /// Mirrored values of every toggle.
    pub fn snapshot(&self) -> Preferences {
        let mut preferences = Preferences::default();
        for key in PreferenceKey::ALL {
            preferences.set(key, self.toggle(key).value());
        }
        preferences
    }
}

/// Preference store shared between the services and the playback
/// coordinator.
pub type SharedPreferences = Arc<tokio::sync::RwLock<PreferenceStore>>;
