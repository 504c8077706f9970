use std::collections::BTreeMap;

/// Header key stamped by the poller with the name of the file that
/// triggered the event.
pub const FILE_NAME: &str = "file_name";

/// Header key set (copy-if-absent) by the transformer to tag the payload kind.
pub const MESSAGE_KIND: &str = "message_kind";

// ── Headers ────────────────────────────────────────────────────────────────────

/// Immutable header mapping carried alongside a payload through every
/// pipeline stage.
///
/// String keys, opaque string values. Every mutating operation returns a new
/// map, so a stage can never observe another stage's edits retroactively.
/// A `BTreeMap` keeps iteration order deterministic, which keeps the AMQP
/// header table stable across runs of the same input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers(BTreeMap<String, String>);

impl Headers {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Return a copy of this map with `key` set to `value`, overwriting any
    /// existing entry.
    pub fn with(&self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut map = self.0.clone();
        map.insert(key.into(), value.into());
        Self(map)
    }

    /// Union of `self` and `defaults`, with `self` winning on key collision.
    ///
    /// This is the copy-if-absent rule: a stage may propose headers, but it
    /// can never overwrite one that arrived with the event.
    pub fn merge_absent(&self, defaults: &Headers) -> Self {
        let mut map = defaults.0.clone();
        for (k, v) in &self.0 {
            map.insert(k.clone(), v.clone());
        }
        Self(map)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
