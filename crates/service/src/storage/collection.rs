use std::fmt::Display;

use models::{AppService, ServiceId, Team, TeamId, User, UserId};

use crate::errors::ServiceError;

/// A record addressable by a unique identifier.
pub trait Record: Clone {
    type Id: Copy + Eq + Display;

    fn id(&self) -> Self::Id;
}

impl Record for User {
    type Id = UserId;
    fn id(&self) -> UserId { self.id }
}

impl Record for Team {
    type Id = TeamId;
    fn id(&self) -> TeamId { self.id }
}

impl Record for AppService {
    type Id = ServiceId;
    fn id(&self) -> ServiceId { self.id }
}

/// Insertion-ordered set of records keyed by id.
///
/// Lookups are linear; the catalog holds at most a few thousand records.
#[derive(Clone, Debug)]
pub struct Collection<T> {
    items: Vec<T>,
}

impl<T> Default for Collection<T> {
    fn default() -> Self { Self { items: Vec::new() } }
}

impl<T: Record> Collection<T> {
    pub fn len(&self) -> usize { self.items.len() }

    pub fn is_empty(&self) -> bool { self.items.is_empty() }

    /// All records in insertion order.
    pub fn as_slice(&self) -> &[T] { &self.items }

    pub fn iter(&self) -> impl Iterator<Item = &T> { self.items.iter() }

    pub fn get(&self, id: T::Id) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn get_mut(&mut self, id: T::Id) -> Option<&mut T> {
        self.items.iter_mut().find(|item| item.id() == id)
    }

    pub fn contains(&self, id: T::Id) -> bool { self.get(id).is_some() }

    /// Append a record; a taken id is rejected and nothing is stored.
    pub fn insert(&mut self, item: T) -> Result<(), ServiceError> {
        let id = item.id();
        if self.contains(id) {
            return Err(ServiceError::InvalidInput(format!("duplicate id {id}")));
        }
        self.items.push(item);
        Ok(())
    }

    /// Remove a record by id, keeping the order of the rest.
    pub fn remove(&mut self, id: T::Id) -> Option<T> {
        let idx = self.items.iter().position(|item| item.id() == id)?;
        Some(self.items.remove(idx))
    }
}
