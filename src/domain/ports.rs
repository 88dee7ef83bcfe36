use super::item::{ItemId, LibraryItem};
use super::patron::{Patron, PatronId};

/// Holdings owned by a library.
///
/// Lookups return the first entry added with a matching id, since ids are
/// not checked for uniqueness.
pub trait ItemStore: Send + Sync {
    fn insert(&mut self, item: LibraryItem);
    fn get(&self, id: &ItemId) -> Option<&LibraryItem>;
    fn get_mut(&mut self, id: &ItemId) -> Option<&mut LibraryItem>;
    fn all(&self) -> Vec<&LibraryItem>;
}

/// Members registered with a library. Same first-match rule as `ItemStore`.
pub trait PatronStore: Send + Sync {
    fn insert(&mut self, patron: Patron);
    fn get(&self, id: &PatronId) -> Option<&Patron>;
    fn get_mut(&mut self, id: &PatronId) -> Option<&mut Patron>;
    fn all(&self) -> Vec<&Patron>;
    fn all_mut(&mut self) -> Vec<&mut Patron>;
}

pub type ItemStoreBox = Box<dyn ItemStore>;
pub type PatronStoreBox = Box<dyn PatronStore>;
