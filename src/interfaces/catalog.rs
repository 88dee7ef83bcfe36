use crate::application::library::Library;
use crate::domain::item::LibraryItem;
use crate::domain::money::Amount;
use crate::domain::patron::Patron;
use crate::domain::ports::{ItemStoreBox, PatronStoreBox};
use crate::error::Result;
use serde::Deserialize;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// An item entry in the catalog. The creator field is named after what the
/// creator is for that kind of item.
#[derive(Debug, Deserialize, PartialEq, Clone)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ItemEntry {
    Book {
        id: String,
        title: String,
        author: String,
    },
    Album {
        id: String,
        title: String,
        artist: String,
    },
    Movie {
        id: String,
        title: String,
        director: String,
    },
}

impl From<ItemEntry> for LibraryItem {
    fn from(entry: ItemEntry) -> Self {
        match entry {
            ItemEntry::Book { id, title, author } => LibraryItem::book(id, title, author),
            ItemEntry::Album { id, title, artist } => LibraryItem::album(id, title, artist),
            ItemEntry::Movie {
                id,
                title,
                director,
            } => LibraryItem::movie(id, title, director),
        }
    }
}

#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct PatronEntry {
    pub id: String,
    pub name: String,
}

/// The library's starting holdings, members and settings, loaded from JSON.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct Catalog {
    #[serde(default)]
    pub fine_per_day: Amount,
    #[serde(default)]
    pub items: Vec<ItemEntry>,
    #[serde(default)]
    pub patrons: Vec<PatronEntry>,
}

impl Catalog {
    pub fn from_reader<R: Read>(source: R) -> Result<Self> {
        Ok(serde_json::from_reader(source)?)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Builds a library on day 0 holding everything in the catalog, in
    /// catalog order.
    pub fn into_library(self, items: ItemStoreBox, patrons: PatronStoreBox) -> Library {
        let mut library = Library::new(items, patrons, self.fine_per_day);
        for entry in self.items {
            library.add_item(entry.into());
        }
        for entry in self.patrons {
            library.add_patron(Patron::new(entry.id, entry.name));
        }
        library
    }
}
