use crate::domain::command::Operation;
use crate::domain::item::{Day, ItemId, LibraryItem, Location};
use crate::domain::money::{Amount, Money};
use crate::domain::patron::{Patron, PatronId};
use crate::domain::ports::{ItemStoreBox, PatronStoreBox};
use crate::error::CirculationError;
use crate::infrastructure::in_memory::{InMemoryItemStore, InMemoryPatronStore};
use rust_decimal::Decimal;
use tracing::{debug, error};

/// Coordinates circulation for one library.
///
/// `Library` owns every item and patron and the simulation clock. All
/// changes to an item's location, its holder or hold, and to a patron's
/// checked-out set or fines go through the operations below. Each operation
/// either applies completely or rejects with a `CirculationError` and leaves
/// state untouched.
pub struct Library {
    items: ItemStoreBox,
    patrons: PatronStoreBox,
    current_day: Day,
    fine_per_day: Amount,
}

impl Default for Library {
    fn default() -> Self {
        Self::new(
            Box::new(InMemoryItemStore::new()),
            Box::new(InMemoryPatronStore::new()),
            Amount::default(),
        )
    }
}

impl Library {
    /// Creates a new `Library` on day 0.
    ///
    /// # Arguments
    ///
    /// * `items` - The store holding the library's items.
    /// * `patrons` - The store holding registered patrons.
    /// * `fine_per_day` - Charge per overdue item for each day it is late.
    pub fn new(items: ItemStoreBox, patrons: PatronStoreBox, fine_per_day: Amount) -> Self {
        Self {
            items,
            patrons,
            current_day: 0,
            fine_per_day,
        }
    }

    pub fn add_item(&mut self, item: LibraryItem) {
        self.items.insert(item);
    }

    pub fn add_patron(&mut self, patron: Patron) {
        self.patrons.insert(patron);
    }

    pub fn find_item(&self, id: &ItemId) -> Option<&LibraryItem> {
        self.items.get(id)
    }

    pub fn find_patron(&self, id: &PatronId) -> Option<&Patron> {
        self.patrons.get(id)
    }

    pub fn items(&self) -> Vec<&LibraryItem> {
        self.items.all()
    }

    pub fn patrons(&self) -> Vec<&Patron> {
        self.patrons.all()
    }

    pub fn current_day(&self) -> Day {
        self.current_day
    }

    pub fn fine_per_day(&self) -> Amount {
        self.fine_per_day
    }

    /// Lends an item to a patron.
    ///
    /// An item on the hold shelf can only go to the patron who requested it;
    /// doing so consumes the hold.
    pub fn check_out(
        &mut self,
        patron_id: &PatronId,
        item_id: &ItemId,
    ) -> Result<(), CirculationError> {
        let patron = self
            .patrons
            .get_mut(patron_id)
            .ok_or(CirculationError::PatronNotFound)?;
        let item = self
            .items
            .get_mut(item_id)
            .ok_or(CirculationError::ItemNotFound)?;

        match item.location() {
            Location::CheckedOut => return Err(CirculationError::AlreadyCheckedOut),
            Location::OnHoldShelf if item.requested_by() != Some(patron_id) => {
                return Err(CirculationError::OnHoldByOtherPatron);
            }
            Location::OnHoldShelf | Location::OnShelf => {}
        }

        item.mark_checked_out(patron.id().clone(), self.current_day);
        patron.add_item(item.id().clone());
        debug!(
            patron = %patron_id,
            item = %item_id,
            day = self.current_day,
            "Item checked out"
        );
        Ok(())
    }

    /// Takes an item back from whoever has it.
    ///
    /// The item goes to the hold shelf if someone requested it meanwhile,
    /// otherwise back on the shelf. The hold itself stays in place.
    pub fn return_item(&mut self, item_id: &ItemId) -> Result<(), CirculationError> {
        let item = self
            .items
            .get_mut(item_id)
            .ok_or(CirculationError::ItemNotFound)?;

        let holder = match (item.location(), item.checked_out_by()) {
            (Location::CheckedOut, Some(holder)) => holder.clone(),
            _ => return Err(CirculationError::NotCheckedOut),
        };

        let released = self
            .patrons
            .get_mut(&holder)
            .is_some_and(|patron| patron.remove_item(item.id()));
        if !released {
            error!(
                patron = %holder,
                item = %item_id,
                "Checked-out item missing from its holder"
            );
            return Err(CirculationError::HolderMismatch {
                item: item.id().clone(),
                patron: holder,
            });
        }

        item.mark_returned();
        debug!(
            patron = %holder,
            item = %item_id,
            location = %item.location(),
            "Item returned"
        );
        Ok(())
    }

    /// Places a hold on an item for a patron.
    ///
    /// Only one hold may exist per item. An item sitting on the shelf moves
    /// straight to the hold shelf; a checked-out item stays out until returned.
    pub fn request_item(
        &mut self,
        patron_id: &PatronId,
        item_id: &ItemId,
    ) -> Result<(), CirculationError> {
        let patron = self
            .patrons
            .get(patron_id)
            .ok_or(CirculationError::PatronNotFound)?;
        let item = self
            .items
            .get_mut(item_id)
            .ok_or(CirculationError::ItemNotFound)?;

        if item.requested_by().is_some() {
            return Err(CirculationError::AlreadyOnHold);
        }

        item.place_hold(patron.id().clone());
        debug!(
            patron = %patron_id,
            item = %item_id,
            location = %item.location(),
            "Item requested"
        );
        Ok(())
    }

    /// Credits a payment against a patron's fines.
    ///
    /// Overpaying is allowed and leaves a negative balance.
    pub fn pay_fine(&mut self, patron_id: &PatronId, amount: Money) -> Result<(), CirculationError> {
        let patron = self
            .patrons
            .get_mut(patron_id)
            .ok_or(CirculationError::PatronNotFound)?;

        patron.amend_fine(-amount);
        debug!(
            patron = %patron_id,
            paid = %amount,
            balance = %patron.fine(),
            "Fine paid"
        );
        Ok(())
    }

    /// Moves the clock forward one day and charges every overdue item.
    ///
    /// Each item past its due day adds one day's fine to its holder. Fines are
    /// only assessed here, so skipping ticks means skipping charges. Once the
    /// clock is at `Day::MAX` it stays there and nothing is charged.
    pub fn advance_day(&mut self) -> Result<(), CirculationError> {
        self.current_day = self
            .current_day
            .checked_add(1)
            .ok_or(CirculationError::ClockExhausted)?;
        let today = self.current_day;
        let rate = self.fine_per_day.value();

        for patron in self.patrons.all_mut() {
            let overdue = patron
                .checked_out_items()
                .iter()
                .filter_map(|id| self.items.get(id))
                .filter(|item| item.is_overdue(today))
                .count();

            if overdue > 0 {
                patron.amend_fine(Money::new(rate * Decimal::from(overdue)));
                debug!(
                    patron = %patron.id(),
                    overdue,
                    balance = %patron.fine(),
                    day = today,
                    "Overdue fines assessed"
                );
            }
        }
        Ok(())
    }

    /// Calls `advance_day` once per day, stopping at the first refusal.
    pub fn advance_days(&mut self, days: Day) -> Result<(), CirculationError> {
        for _ in 0..days {
            self.advance_day()?;
        }
        Ok(())
    }

    /// Applies a parsed command.
    pub fn execute(&mut self, operation: &Operation) -> Result<(), CirculationError> {
        match operation {
            Operation::CheckOut { patron, item } => self.check_out(patron, item),
            Operation::Return { item } => self.return_item(item),
            Operation::Request { patron, item } => self.request_item(patron, item),
            Operation::PayFine { patron, amount } => self.pay_fine(patron, *amount),
            Operation::AdvanceDay { days } => self.advance_days(*days),
        }
    }
}
