//! Record engine configuration.

/// How record IDs map onto world-state keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeySpace {
    /// Keys are `"<PREFIX>#<id>"` and listing scans only the collection's
    /// prefix, so several collections can share one namespace.
    #[default]
    Prefixed,
    /// Keys are the bare IDs and listing scans the whole keyspace. Only
    /// sound when the collection owns its namespace exclusively.
    Exclusive,
}

/// What `list` does with a value that does not decode as the collection's
/// record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ForeignValuePolicy {
    /// Abort the listing with a serialization error.
    #[default]
    Fail,
    /// Log the value and leave it out of the listing.
    Skip,
}

/// Configuration shared by the collections of a contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Config {
    /// Key layout.
    pub key_space: KeySpace,
    /// Listing behavior for undecodable values.
    pub foreign_values: ForeignValuePolicy,
}

impl Config {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the key layout.
    #[must_use]
    pub const fn key_space(mut self, key_space: KeySpace) -> Self {
        self.key_space = key_space;
        self
    }

    /// Sets the listing behavior for undecodable values.
    #[must_use]
    pub const fn foreign_values(mut self, policy: ForeignValuePolicy) -> Self {
        self.foreign_values = policy;
        self
    }
}
