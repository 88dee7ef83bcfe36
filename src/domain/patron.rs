use super::item::ItemId;
use super::money::Money;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Caller-assigned identifier of a patron, assumed unique.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PatronId(pub String);

impl PatronId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PatronId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PatronId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for PatronId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A library member.
///
/// Tracks the items the patron currently has out (by id, in checkout order)
/// and the fine balance, which goes negative when the patron overpays.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Patron {
    id: PatronId,
    name: String,
    checked_out_items: Vec<ItemId>,
    fine: Money,
}

impl Patron {
    pub fn new(id: impl Into<PatronId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            checked_out_items: Vec::new(),
            fine: Money::ZERO,
        }
    }

    pub fn id(&self) -> &PatronId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn fine(&self) -> Money {
        self.fine
    }

    pub fn checked_out_items(&self) -> &[ItemId] {
        &self.checked_out_items
    }

    /// Changes the fine balance by a signed delta: positive charges, negative pays.
    pub fn amend_fine(&mut self, delta: Money) {
        self.fine += delta;
    }

    pub(crate) fn add_item(&mut self, item: ItemId) {
        self.checked_out_items.push(item);
    }

    /// Removes `item` from the checked-out set. Returns false if it was not there.
    pub(crate) fn remove_item(&mut self, item: &ItemId) -> bool {
        match self.checked_out_items.iter().position(|held| held == item) {
            Some(index) => {
                self.checked_out_items.remove(index);
                true
            }
            None => false,
        }
    }
}
