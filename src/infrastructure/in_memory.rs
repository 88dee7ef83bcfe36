use crate::domain::item::{ItemId, LibraryItem};
use crate::domain::patron::{Patron, PatronId};
use crate::domain::ports::{ItemStore, PatronStore};

/// An in-memory store for library items.
///
/// Keeps items in insertion order and searches linearly, so the first item
/// added under an id shadows any later duplicate.
#[derive(Debug, Default, Clone)]
pub struct InMemoryItemStore {
    items: Vec<LibraryItem>,
}

impl InMemoryItemStore {
    /// Creates a new, empty in-memory item store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl ItemStore for InMemoryItemStore {
    fn insert(&mut self, item: LibraryItem) {
        self.items.push(item);
    }

    fn get(&self, id: &ItemId) -> Option<&LibraryItem> {
        self.items.iter().find(|item| item.id() == id)
    }

    fn get_mut(&mut self, id: &ItemId) -> Option<&mut LibraryItem> {
        self.items.iter_mut().find(|item| item.id() == id)
    }

    fn all(&self) -> Vec<&LibraryItem> {
        self.items.iter().collect()
    }
}

/// An in-memory store for patrons, with the same ordering rules as
/// `InMemoryItemStore`.
#[derive(Debug, Default, Clone)]
pub struct InMemoryPatronStore {
    patrons: Vec<Patron>,
}

impl InMemoryPatronStore {
    /// Creates a new, empty in-memory patron store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl PatronStore for InMemoryPatronStore {
    fn insert(&mut self, patron: Patron) {
        self.patrons.push(patron);
    }

    fn get(&self, id: &PatronId) -> Option<&Patron> {
        self.patrons.iter().find(|patron| patron.id() == id)
    }

    fn get_mut(&mut self, id: &PatronId) -> Option<&mut Patron> {
        self.patrons.iter_mut().find(|patron| patron.id() == id)
    }

    fn all(&self) -> Vec<&Patron> {
        self.patrons.iter().collect()
    }

    fn all_mut(&mut self) -> Vec<&mut Patron> {
        self.patrons.iter_mut().collect()
    }
}
