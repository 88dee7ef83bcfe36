use super::patron::PatronId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Simulation day counter. Day 0 is the day the library opens.
pub type Day = u32;

/// Caller-assigned identifier of a library item. Uniqueness is not enforced.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub String);

impl ItemId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ItemId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// The kind of item, which fixes how long it may be kept.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Book,
    Album,
    Movie,
}

impl ItemKind {
    /// Days a patron may keep the item before fines start.
    pub const fn checkout_length(self) -> Day {
        match self {
            ItemKind::Book => 21,
            ItemKind::Album => 14,
            ItemKind::Movie => 7,
        }
    }

    /// What the item's creator is called for this kind.
    pub const fn creator_role(self) -> &'static str {
        match self {
            ItemKind::Book => "author",
            ItemKind::Album => "artist",
            ItemKind::Movie => "director",
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ItemKind::Book => "book",
            ItemKind::Album => "album",
            ItemKind::Movie => "movie",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Location {
    #[default]
    OnShelf,
    OnHoldShelf,
    CheckedOut,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Location::OnShelf => "ON_SHELF",
            Location::OnHoldShelf => "ON_HOLD_SHELF",
            Location::CheckedOut => "CHECKED_OUT",
        };
        f.write_str(name)
    }
}

/// An item in the library's holdings.
///
/// `checked_out_by` and `requested_by` refer to patrons by id; the library owns
/// both sides. Circulation state is only changed by the `Library`.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct LibraryItem {
    id: ItemId,
    title: String,
    kind: ItemKind,
    /// Author, artist or director depending on `kind`.
    creator: String,
    location: Location,
    checked_out_by: Option<PatronId>,
    requested_by: Option<PatronId>,
    date_checked_out: Option<Day>,
}

impl LibraryItem {
    pub fn new(
        kind: ItemKind,
        id: impl Into<ItemId>,
        title: impl Into<String>,
        creator: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            kind,
            creator: creator.into(),
            location: Location::OnShelf,
            checked_out_by: None,
            requested_by: None,
            date_checked_out: None,
        }
    }

    pub fn book(id: impl Into<ItemId>, title: impl Into<String>, author: impl Into<String>) -> Self {
        Self::new(ItemKind::Book, id, title, author)
    }

    pub fn album(id: impl Into<ItemId>, title: impl Into<String>, artist: impl Into<String>) -> Self {
        Self::new(ItemKind::Album, id, title, artist)
    }

    pub fn movie(
        id: impl Into<ItemId>,
        title: impl Into<String>,
        director: impl Into<String>,
    ) -> Self {
        Self::new(ItemKind::Movie, id, title, director)
    }

    pub fn id(&self) -> &ItemId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn kind(&self) -> ItemKind {
        self.kind
    }

    pub fn creator(&self) -> &str {
        &self.creator
    }

    pub fn location(&self) -> Location {
        self.location
    }

    pub fn checked_out_by(&self) -> Option<&PatronId> {
        self.checked_out_by.as_ref()
    }

    pub fn requested_by(&self) -> Option<&PatronId> {
        self.requested_by.as_ref()
    }

    pub fn date_checked_out(&self) -> Option<Day> {
        self.date_checked_out
    }

    pub fn checkout_length(&self) -> Day {
        self.kind.checkout_length()
    }

    /// Last day the item may be kept without a fine, if checked out.
    pub fn due_day(&self) -> Option<Day> {
        self.date_checked_out
            .map(|day| day.saturating_add(self.checkout_length()))
    }

    /// True once `current_day` is strictly past the due day.
    pub fn is_overdue(&self, current_day: Day) -> bool {
        self.due_day().is_some_and(|due| due < current_day)
    }

    /// Hands the item to `patron` on `day`, consuming any hold.
    pub(crate) fn mark_checked_out(&mut self, patron: PatronId, day: Day) {
        self.requested_by = None;
        self.checked_out_by = Some(patron);
        self.date_checked_out = Some(day);
        self.location = Location::CheckedOut;
    }

    /// Puts the item back in the library. A pending hold sends it to the hold shelf.
    pub(crate) fn mark_returned(&mut self) {
        self.checked_out_by = None;
        self.date_checked_out = None;
        self.location = if self.requested_by.is_some() {
            Location::OnHoldShelf
        } else {
            Location::OnShelf
        };
    }

    pub(crate) fn place_hold(&mut self, patron: PatronId) {
        self.requested_by = Some(patron);
        if self.location == Location::OnShelf {
            self.location = Location::OnHoldShelf;
        }
    }
}
