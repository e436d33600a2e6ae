//! Generic record collection.
//!
//! A [`Collection`] is the CRUD engine for one record type. It holds no
//! state of its own: every operation receives the world state explicitly,
//! and the collection only decides keys, encodings and existence rules.

use crate::config::{Config, ForeignValuePolicy, KeySpace};
use crate::error::{CoreError, CoreResult};
use crate::field::Field;
use crate::record::Record;
use crate::schema::Schema;
use scholar_codec::CodecError;
use scholar_storage::StateAccessor;
use std::fmt;
use std::marker::PhantomData;
use tracing::{debug, warn};

/// CRUD operations for records of type `T`.
///
/// # State machine
///
/// Each key is either absent or holds exactly one encoded record:
/// - `create` moves absent to present and fails if the key is present
/// - `update` and `set_field` overwrite a present key
/// - `delete` moves present to absent
///
/// Every operation other than `create` fails with
/// [`CoreError::NotFound`] on an absent key.
///
/// # Example
///
/// ```rust
/// use scholar_core::{Collection, Config, Student};
/// use scholar_storage::InMemoryState;
///
/// let students = Collection::<Student>::new(Config::default());
/// let mut state = InMemoryState::new();
///
/// let student = Student {
///     id: "student7".into(),
///     full_name: "Amina".into(),
///     ..Student::default()
/// };
/// students.create(&mut state, &student).unwrap();
/// assert!(students.exists(&state, "student7").unwrap());
/// assert_eq!(students.read(&state, "student7").unwrap(), student);
/// ```
pub struct Collection<T> {
    config: Config,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Record> Collection<T> {
    /// Creates a collection using `config`.
    #[must_use]
    pub const fn new(config: Config) -> Self {
        Self {
            config,
            _marker: PhantomData,
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> Config {
        self.config
    }

    /// Returns the record schema.
    #[must_use]
    pub fn schema(&self) -> &'static Schema {
        T::SCHEMA
    }

    /// Returns the world-state key for `id`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidId`] if `id` is empty.
    pub fn key(&self, id: &str) -> CoreResult<String> {
        if id.is_empty() {
            return Err(CoreError::InvalidId {
                collection: T::SCHEMA.name,
                id: String::new(),
                reason: "record IDs must not be empty",
            });
        }
        Ok(self.storage_key(id))
    }

    /// Returns the `[start, end)` range holding this collection's records.
    ///
    /// Empty bounds are open, so the exclusive key space scans everything.
    #[must_use]
    pub fn key_range(&self) -> (String, String) {
        match self.config.key_space {
            KeySpace::Prefixed => (
                format!("{}#", T::SCHEMA.key_prefix),
                format!("{}$", T::SCHEMA.key_prefix),
            ),
            KeySpace::Exclusive => (String::new(), String::new()),
        }
    }

    /// Returns true if a record with `id` is stored.
    ///
    /// # Errors
    ///
    /// Returns an error if `id` is invalid or the state fails.
    pub fn exists<S>(&self, state: &S, id: &str) -> CoreResult<bool>
    where
        S: StateAccessor + ?Sized,
    {
        let key = self.key(id)?;
        Ok(state.get(&key)?.is_some())
    }

    /// Stores a new record.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::AlreadyExists`] if the ID is taken.
    pub fn create<S>(&self, state: &mut S, record: &T) -> CoreResult<()>
    where
        S: StateAccessor + ?Sized,
    {
        let id = record.id();
        if self.exists(&*state, id)? {
            return Err(CoreError::already_exists(T::SCHEMA.name, id));
        }
        self.write(state, record)?;
        debug!(collection = T::SCHEMA.name, id, "created record");
        Ok(())
    }

    /// Stores `record` whether or not its ID is taken.
    ///
    /// # Errors
    ///
    /// Returns an error if the ID is invalid, the record does not encode,
    /// or the state fails.
    pub fn put<S>(&self, state: &mut S, record: &T) -> CoreResult<()>
    where
        S: StateAccessor + ?Sized,
    {
        self.write(state, record)?;
        debug!(collection = T::SCHEMA.name, id = record.id(), "stored record");
        Ok(())
    }

    /// Reads the record stored under `id`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::NotFound`] if absent and
    /// [`CoreError::Serialization`] if the stored value is not a record of
    /// this type or belongs to another ID.
    pub fn read<S>(&self, state: &S, id: &str) -> CoreResult<T>
    where
        S: StateAccessor + ?Sized,
    {
        let key = self.key(id)?;
        let bytes = state
            .get(&key)?
            .ok_or_else(|| CoreError::not_found(T::SCHEMA.name, id))?;
        self.decode_at(&key, &bytes)
    }

    /// Replaces a stored record with `record`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::NotFound`] if no record has that ID.
    pub fn update<S>(&self, state: &mut S, record: &T) -> CoreResult<()>
    where
        S: StateAccessor + ?Sized,
    {
        let id = record.id();
        if !self.exists(&*state, id)? {
            return Err(CoreError::not_found(T::SCHEMA.name, id));
        }
        self.write(state, record)?;
        debug!(collection = T::SCHEMA.name, id, "updated record");
        Ok(())
    }

    /// Deletes the record stored under `id`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::NotFound`] if absent.
    pub fn delete<S>(&self, state: &mut S, id: &str) -> CoreResult<()>
    where
        S: StateAccessor + ?Sized,
    {
        if !self.exists(&*state, id)? {
            return Err(CoreError::not_found(T::SCHEMA.name, id));
        }
        state.delete(&self.storage_key(id))?;
        debug!(collection = T::SCHEMA.name, id, "deleted record");
        Ok(())
    }

    /// Lists every record in key order.
    ///
    /// Values that do not decode are handled by the configured
    /// [`ForeignValuePolicy`]. The scan is released before this returns.
    ///
    /// # Errors
    ///
    /// Returns an error if the scan fails or, under
    /// [`ForeignValuePolicy::Fail`], a value does not decode.
    pub fn list<S>(&self, state: &S) -> CoreResult<Vec<T>>
    where
        S: StateAccessor + ?Sized,
    {
        let (start, end) = self.key_range();
        let scan = state.range_scan(&start, &end)?;

        let mut records = Vec::new();
        let mut skipped = 0usize;
        for entry in scan {
            let (key, bytes) = entry?;
            match self.decode_at(&key, &bytes) {
                Ok(record) => records.push(record),
                Err(err) if self.config.foreign_values == ForeignValuePolicy::Skip => {
                    warn!(
                        collection = T::SCHEMA.name,
                        key = %key,
                        error = %err,
                        "skipping value that is not a record"
                    );
                    skipped += 1;
                }
                Err(err) => return Err(err),
            }
        }

        debug!(
            collection = T::SCHEMA.name,
            count = records.len(),
            skipped,
            "listed records"
        );
        Ok(records)
    }

    /// Overwrites one field of a stored record and returns its old value.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::NotFound`] if absent, or any error from reading
    /// or re-encoding the record.
    pub fn set_field<S, V>(
        &self,
        state: &mut S,
        id: &str,
        field: Field<T, V>,
        value: V,
    ) -> CoreResult<V>
    where
        S: StateAccessor + ?Sized,
    {
        let mut record = self.read(&*state, id)?;
        let old = field.replace(&mut record, value);
        self.write(state, &record)?;
        debug!(
            collection = T::SCHEMA.name,
            id,
            field = field.name(),
            "replaced field"
        );
        Ok(old)
    }

    fn storage_key(&self, id: &str) -> String {
        match self.config.key_space {
            KeySpace::Prefixed => format!("{}#{id}", T::SCHEMA.key_prefix),
            KeySpace::Exclusive => id.to_string(),
        }
    }

    fn write<S>(&self, state: &mut S, record: &T) -> CoreResult<()>
    where
        S: StateAccessor + ?Sized,
    {
        let key = self.key(record.id())?;
        let bytes = record
            .encode()
            .map_err(|e| CoreError::serialization(T::SCHEMA.name, key.as_str(), e))?;
        state.put(&key, bytes)?;
        Ok(())
    }

    fn decode_at(&self, key: &str, bytes: &[u8]) -> CoreResult<T> {
        let record =
            T::decode(bytes).map_err(|e| CoreError::serialization(T::SCHEMA.name, key, e))?;
        if self.storage_key(record.id()) != key {
            return Err(CoreError::serialization(
                T::SCHEMA.name,
                key,
                CodecError::invalid_structure(format!(
                    "record ID {:?} does not belong to this key",
                    record.id()
                )),
            ));
        }
        Ok(record)
    }
}

impl<T: Record> Default for Collection<T> {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl<T> Clone for Collection<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Collection<T> {}

impl<T: Record> fmt::Debug for Collection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collection")
            .field("schema", &T::SCHEMA.name)
            .field("config", &self.config)
            .finish()
    }
}
