//! Layered dictionary store.
//!
//! All interpreter state lives here: scalar variables, encoded lists, array
//! rows and user-defined functions are plain string entries.  The store has a
//! base layer (loaded once from source data) and an overlay layer that
//! collects session changes when overlay mode is on.  Each layer also keeps a
//! soft-delete set so a deleted key can be restored with [`Dictionary::undelete`].

use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

/// Sentinel for an explicitly empty value.  Normalized to `""` on write.
pub const NULL_VALUE: &str = "null";

/// Error raised for keys that cannot be normalized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("Key cannot be blank")]
    BlankKey,
    #[error("Invalid key: {0}")]
    InvalidKey(String),
}

/// Selects the layer(s) an operation applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Which {
    #[default]
    Both,
    Base,
    Overlay,
}

/// Lowercase and trim a key, rejecting blank keys and embedded whitespace.
pub fn normalize_key(key: &str) -> Result<String, StoreError> {
    let key = key.trim();
    if key.is_empty() {
        return Err(StoreError::BlankKey);
    }
    if key.chars().any(char::is_whitespace) {
        return Err(StoreError::InvalidKey(key.to_owned()));
    }
    Ok(key.to_lowercase())
}

// ── Layer ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Clone)]
struct Layer {
    values: BTreeMap<String, String>,
    deleted: BTreeSet<String>,
}

impl Layer {
    fn put(&mut self, key: String, value: String) {
        self.deleted.remove(&key);
        self.values.insert(key, value);
    }

    fn visible_keys(&self) -> impl Iterator<Item = &String> {
        self.values.keys().filter(|k| !self.deleted.contains(*k))
    }

    fn clear(&mut self) {
        self.values.clear();
        self.deleted.clear();
    }
}

/// One recorded change: the key and the value it had before.
#[derive(Debug, Clone)]
struct UndoItem {
    key: String,
    old_value: String,
}

// ── Dictionary ────────────────────────────────────────────────────────────────

/// Two-layer string dictionary with soft-delete and undo snapshots.
#[derive(Debug, Default, Clone)]
pub struct Dictionary {
    base: Layer,
    overlay: Layer,
    use_overlay: bool,
    allow_undo: bool,
    pending: Vec<UndoItem>,
    undo: Vec<Vec<UndoItem>>,
}

impl Dictionary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn use_overlay(&self) -> bool {
        self.use_overlay
    }

    /// Switch overlay mode.  While on, writes go to the overlay and reads
    /// consult it before the base layer.
    pub fn set_use_overlay(&mut self, on: bool) {
        self.use_overlay = on;
    }

    pub fn allow_undo(&self) -> bool {
        self.allow_undo
    }

    /// Enable or disable undo tracking.  Disabling drops any history.
    pub fn set_allow_undo(&mut self, on: bool) {
        self.allow_undo = on;
        if !on {
            self.pending.clear();
            self.undo.clear();
        }
    }

    fn active_mut(&mut self) -> &mut Layer {
        if self.use_overlay {
            &mut self.overlay
        } else {
            &mut self.base
        }
    }

    fn lookup(&self, key: &str) -> Option<&str> {
        if self.use_overlay {
            if self.overlay.deleted.contains(key) {
                return None;
            }
            if let Some(v) = self.overlay.values.get(key) {
                return Some(v.as_str());
            }
        }
        if self.base.deleted.contains(key) {
            return None;
        }
        self.base.values.get(key).map(String::as_str)
    }

    fn record(&mut self, key: &str) {
        if self.allow_undo {
            let old_value = self.lookup(key).unwrap_or_default().to_owned();
            self.pending.push(UndoItem { key: key.to_owned(), old_value });
        }
    }

    /// Get the visible value for `key`, or `""` when absent.
    pub fn get(&self, key: &str) -> Result<String, StoreError> {
        let key = normalize_key(key)?;
        Ok(match self.lookup(&key) {
            Some(v) if v != NULL_VALUE => v.to_owned(),
            _ => String::new(),
        })
    }

    /// Get the visible value, substituting `default` when it is empty.
    pub fn get_or_default(&self, key: &str, default: &str) -> Result<String, StoreError> {
        let value = self.get(key)?;
        Ok(if value.is_empty() { default.to_owned() } else { value })
    }

    /// Store `value` in the active layer.  `"null"` is stored as `""`.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let key = normalize_key(key)?;
        self.record(&key);
        let value = if value == NULL_VALUE { "" } else { value };
        self.active_mut().put(key, value.to_owned());
        Ok(())
    }

    /// Returns `true` if the key is present and not soft-deleted in any layer
    /// consulted by reads.
    pub fn contains_key(&self, key: &str) -> Result<bool, StoreError> {
        let key = normalize_key(key)?;
        Ok(self.lookup(&key).is_some())
    }

    /// Remove the key from both layers, including any soft-delete marks.
    pub fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        let key = normalize_key(key)?;
        self.record(&key);
        for layer in [&mut self.base, &mut self.overlay] {
            layer.values.remove(&key);
            layer.deleted.remove(&key);
        }
        Ok(())
    }

    /// Soft-delete the key in the active layer.  The stored value survives
    /// until [`Dictionary::undelete`] or a clear.
    pub fn delete(&mut self, key: &str) -> Result<(), StoreError> {
        let key = normalize_key(key)?;
        self.record(&key);
        self.active_mut().deleted.insert(key);
        Ok(())
    }

    /// Lift a soft-delete in the active layer.
    pub fn undelete(&mut self, key: &str) -> Result<(), StoreError> {
        let key = normalize_key(key)?;
        self.active_mut().deleted.remove(&key);
        Ok(())
    }

    /// Drop any overlay override or overlay delete for `key`, exposing the
    /// base value again.
    pub fn reset_value(&mut self, key: &str) -> Result<(), StoreError> {
        let key = normalize_key(key)?;
        self.overlay.values.remove(&key);
        self.overlay.deleted.remove(&key);
        Ok(())
    }

    /// Clear the selected layer(s).  Undo history is discarded.
    pub fn clear(&mut self, which: Which) {
        if matches!(which, Which::Both | Which::Base) {
            self.base.clear();
        }
        if matches!(which, Which::Both | Which::Overlay) {
            self.overlay.clear();
        }
        self.pending.clear();
        self.undo.clear();
    }

    /// Sorted visible keys of the selected layer(s).  `Both` is the union of
    /// base and overlay while overlay mode is on, else the base keys alone.
    pub fn keys(&self, which: Which) -> Vec<String> {
        let set: BTreeSet<&String> = match which {
            Which::Base => self.base.visible_keys().collect(),
            Which::Overlay => self.overlay.visible_keys().collect(),
            Which::Both if !self.use_overlay => self.base.visible_keys().collect(),
            Which::Both => self
                .base
                .visible_keys()
                .chain(self.overlay.values.keys())
                .filter(|k| !self.overlay.deleted.contains(*k))
                .collect(),
        };
        set.into_iter().cloned().collect()
    }

    /// Visible keys beginning with `prefix` (already normalized by the caller).
    pub fn keys_with_prefix(&self, prefix: &str) -> Vec<String> {
        self.keys(Which::Both)
            .into_iter()
            .filter(|k| k.starts_with(prefix))
            .collect()
    }

    /// Number of distinct visible keys in the selected layer(s).
    pub fn count(&self, which: Which) -> usize {
        self.keys(which).len()
    }

    /// Fold the overlay into the base layer and empty the overlay.
    pub fn merge_overlay(&mut self) {
        let overlay = std::mem::take(&mut self.overlay);
        debug!(
            values = overlay.values.len(),
            deleted = overlay.deleted.len(),
            "merging overlay"
        );
        for key in overlay.deleted {
            self.base.values.remove(&key);
            self.base.deleted.remove(&key);
        }
        for (key, value) in overlay.values {
            self.base.put(key, value);
        }
    }

    /// The overlay's changes in key order: `Some(value)` for an override,
    /// `None` for a soft-delete.
    pub fn overlay_diff(&self) -> Vec<(String, Option<String>)> {
        let mut diff: BTreeMap<&String, Option<String>> = BTreeMap::new();
        for (k, v) in &self.overlay.values {
            diff.insert(k, Some(v.clone()));
        }
        for k in &self.overlay.deleted {
            diff.insert(k, None);
        }
        diff.into_iter().map(|(k, v)| (k.clone(), v)).collect()
    }

    // ── Undo ──────────────────────────────────────────────────────────────────

    /// Push the changes recorded since the last snapshot onto the undo stack.
    pub fn save_snapshot(&mut self) {
        if self.allow_undo && !self.pending.is_empty() {
            let snapshot = std::mem::take(&mut self.pending);
            self.undo.push(snapshot);
        }
    }

    /// Restore the most recent snapshot into the active layer.  Returns
    /// `false` when there is nothing to undo.
    pub fn undo_snapshot(&mut self) -> bool {
        if !self.allow_undo {
            return false;
        }
        let Some(snapshot) = self.undo.pop() else { return false };
        for item in snapshot.into_iter().rev() {
            self.active_mut().put(item.key, item.old_value);
        }
        true
    }

    /// Number of snapshots available to [`Dictionary::undo_snapshot`].
    pub fn undo_depth(&self) -> usize {
        self.undo.len()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
