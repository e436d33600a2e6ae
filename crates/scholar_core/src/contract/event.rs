//! Event participation contract.

use crate::collection::Collection;
use crate::config::Config;
use crate::entities::Event;
use crate::error::CoreResult;
use scholar_storage::{invoke, StateAccessor};

/// Event participation operations.
#[derive(Debug, Clone, Copy, Default)]
pub struct EventContract {
    events: Collection<Event>,
}

impl EventContract {
    /// Creates the contract.
    #[must_use]
    pub const fn new(config: Config) -> Self {
        Self {
            events: Collection::new(config),
        }
    }

    /// The underlying collection.
    #[must_use]
    pub const fn collection(&self) -> Collection<Event> {
        self.events
    }

    /// Records a new event participation.
    ///
    /// # Errors
    ///
    /// Fails with `AlreadyExists` if `id` is taken.
    pub fn create_event<S>(
        &self,
        state: &mut S,
        id: &str,
        student_id: &str,
        title: &str,
        location: &str,
        join_date: &str,
        organizer: &str,
        description: &str,
    ) -> CoreResult<()>
    where
        S: StateAccessor + ?Sized,
    {
        let event = build(id, student_id, title, location, join_date, organizer, description);
        invoke(state, |inv| self.events.create(inv, &event))
    }

    /// Returns the event stored under `id`.
    ///
    /// # Errors
    ///
    /// Fails with `NotFound` if absent.
    pub fn read_event<S>(&self, state: &S, id: &str) -> CoreResult<Event>
    where
        S: StateAccessor + ?Sized,
    {
        self.events.read(state, id)
    }

    /// Overwrites every field of an existing event.
    ///
    /// # Errors
    ///
    /// Fails with `NotFound` if absent.
    pub fn update_event<S>(
        &self,
        state: &mut S,
        id: &str,
        student_id: &str,
        title: &str,
        location: &str,
        join_date: &str,
        organizer: &str,
        description: &str,
    ) -> CoreResult<()>
    where
        S: StateAccessor + ?Sized,
    {
        let event = build(id, student_id, title, location, join_date, organizer, description);
        invoke(state, |inv| self.events.update(inv, &event))
    }

    /// Removes an event.
    ///
    /// # Errors
    ///
    /// Fails with `NotFound` if absent.
    pub fn delete_event<S>(&self, state: &mut S, id: &str) -> CoreResult<()>
    where
        S: StateAccessor + ?Sized,
    {
        invoke(state, |inv| self.events.delete(inv, id))
    }

    /// Returns true if an event with `id` exists.
    ///
    /// # Errors
    ///
    /// Fails if the world state cannot be read.
    pub fn event_exists<S>(&self, state: &S, id: &str) -> CoreResult<bool>
    where
        S: StateAccessor + ?Sized,
    {
        self.events.exists(state, id)
    }

    /// Returns every event in ID order.
    ///
    /// # Errors
    ///
    /// Fails if the scan fails or a stored value is not an event.
    pub fn get_all_events<S>(&self, state: &S) -> CoreResult<Vec<Event>>
    where
        S: StateAccessor + ?Sized,
    {
        self.events.list(state)
    }
}

fn build(
    id: &str,
    student_id: &str,
    title: &str,
    location: &str,
    join_date: &str,
    organizer: &str,
    description: &str,
) -> Event {
    Event {
        student_id: student_id.to_string(),
        id: id.to_string(),
        title: title.to_string(),
        location: location.to_string(),
        join_date: join_date.to_string(),
        organizer: organizer.to_string(),
        description: description.to_string(),
    }
}
