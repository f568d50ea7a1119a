//! Listener registry: event name to ordered listener records
//!
//! Every registered name maps to a non-empty vector of records in registration
//! order. When the last record for a name goes away the key is deleted, so
//! `name_count` always equals the number of keys.

use std::{
    collections::{hash_map::Entry, HashMap, HashSet},
    rc::Rc,
};

use crate::{
    listener::{Context, Listener, ListenerRecord},
    types::EventName,
};

/// Storage for listener records, keyed by event name
pub(crate) struct Registry<A: ?Sized> {
    entries: HashMap<EventName, Vec<Rc<ListenerRecord<A>>>>,
    name_count: usize,
    // names that already triggered a max-listeners warning
    warned: HashSet<EventName>,
}

impl<A: ?Sized> Registry<A> {
    pub(crate) fn new() -> Self {
        Self {
            entries: HashMap::new(),
            name_count: 0,
            warned: HashSet::new(),
        }
    }

    /// Append a record, returning the name's new listener count
    pub(crate) fn insert(&mut self, name: EventName, record: Rc<ListenerRecord<A>>) -> usize {
        let records = match self.entries.entry(name) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                self.name_count += 1;
                entry.insert(Vec::new())
            }
        };
        records.push(record);
        let count = records.len();
        self.check_invariants();
        count
    }

    /// Remove every record for a name; returns whether the name was present
    pub(crate) fn remove_all(&mut self, name: &EventName) -> bool {
        let removed = self.entries.remove(name).is_some();
        if removed {
            self.forget(name);
        }
        removed
    }

    /// Remove records matching a callback (and context / once-ness when asked)
    ///
    /// Returns the number of removed records. Survivors keep their order.
    pub(crate) fn remove_matching(
        &mut self,
        name: &EventName,
        listener: &Listener<A>,
        context: Option<&Context>,
        once_only: bool,
    ) -> usize {
        self.remove_where(name, |record| record.matches(listener, context, once_only))
    }

    /// Remove one specific record; returns whether it was still registered
    pub(crate) fn remove_record(&mut self, name: &EventName, record: &Rc<ListenerRecord<A>>) -> bool {
        self.remove_where(name, |candidate| Rc::ptr_eq(candidate, record)) > 0
    }

    pub(crate) fn contains_record(&self, name: &EventName, record: &Rc<ListenerRecord<A>>) -> bool {
        self.entries
            .get(name)
            .is_some_and(|records| records.iter().any(|r| Rc::ptr_eq(r, record)))
    }

    /// Records for a name as they are right now
    pub(crate) fn snapshot(&self, name: &EventName) -> Option<Vec<Rc<ListenerRecord<A>>>> {
        self.entries.get(name).cloned()
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
        self.warned.clear();
        self.name_count = 0;
    }

    pub(crate) fn names(&self) -> Vec<EventName> {
        if self.name_count == 0 {
            return Vec::new();
        }
        self.entries.keys().cloned().collect()
    }

    pub(crate) fn listeners(&self, name: &EventName) -> Vec<Listener<A>> {
        self.entries
            .get(name)
            .map(|records| records.iter().map(|r| r.listener().clone()).collect())
            .unwrap_or_default()
    }

    pub(crate) fn count(&self, name: &EventName) -> usize {
        self.entries.get(name).map_or(0, Vec::len)
    }

    pub(crate) fn name_count(&self) -> usize {
        self.name_count
    }

    /// Mark a name as warned; true only the first time
    pub(crate) fn mark_warned(&mut self, name: &EventName) -> bool {
        self.warned.insert(name.clone())
    }

    fn remove_where<F>(&mut self, name: &EventName, mut predicate: F) -> usize
    where
        F: FnMut(&Rc<ListenerRecord<A>>) -> bool,
    {
        let Some(records) = self.entries.get_mut(name) else {
            return 0;
        };

        let before = records.len();
        records.retain(|record| !predicate(record));
        let removed = before - records.len();

        if records.is_empty() {
            self.entries.remove(name);
            self.forget(name);
        }
        removed
    }

    fn forget(&mut self, name: &EventName) {
        self.warned.remove(name);
        self.name_count -= 1;
        self.check_invariants();
    }

    fn check_invariants(&self) {
        debug_assert_eq!(self.name_count, self.entries.len());
        debug_assert!(self.entries.values().all(|records| !records.is_empty()));
    }
}
