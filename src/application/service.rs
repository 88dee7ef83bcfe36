use super::library::Library;
use crate::domain::command::Operation;
use crate::domain::item::{Day, ItemId, LibraryItem};
use crate::domain::money::Money;
use crate::domain::patron::{Patron, PatronId};
use crate::error::{CirculationError, LibraryError, Result};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};

/// Queue depth between handles and the library task.
const CHANNEL_CAPACITY: usize = 64;

/// Point-in-time copy of the library's state.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub current_day: Day,
    pub items: Vec<LibraryItem>,
    pub patrons: Vec<Patron>,
}

enum Request {
    AddItem(LibraryItem),
    AddPatron(Patron),
    Execute {
        operation: Operation,
        reply: oneshot::Sender<std::result::Result<(), CirculationError>>,
    },
    Snapshot {
        reply: oneshot::Sender<Snapshot>,
    },
}

/// Runs a `Library` on its own task.
///
/// The task is the only owner of the library and handles one request at a
/// time, so operations coming from any number of handles never interleave.
pub struct LibraryService {
    library: Library,
    requests: mpsc::Receiver<Request>,
}

impl LibraryService {
    /// Spawns the library task and returns a handle to it.
    ///
    /// The task stops once every handle has been dropped.
    pub fn spawn(library: Library) -> LibraryHandle {
        let (sender, requests) = mpsc::channel(CHANNEL_CAPACITY);
        debug!(
            day = library.current_day(),
            fine_per_day = %library.fine_per_day().value(),
            "Starting library service"
        );
        let service = Self { library, requests };
        tokio::spawn(service.run());
        LibraryHandle { sender }
    }

    async fn run(mut self) {
        while let Some(request) = self.requests.recv().await {
            match request {
                Request::AddItem(item) => self.library.add_item(item),
                Request::AddPatron(patron) => self.library.add_patron(patron),
                Request::Execute { operation, reply } => {
                    let outcome = self.library.execute(&operation);
                    if let Err(rejection) = &outcome {
                        warn!(?operation, %rejection, "Command rejected");
                    }
                    // The caller may have stopped waiting; the operation still applied.
                    let _ = reply.send(outcome);
                }
                Request::Snapshot { reply } => {
                    let _ = reply.send(Snapshot {
                        current_day: self.library.current_day(),
                        items: self.library.items().into_iter().cloned().collect(),
                        patrons: self.library.patrons().into_iter().cloned().collect(),
                    });
                }
            }
        }
        debug!("All library handles dropped, stopping service");
    }
}

/// Cloneable front end to a running `LibraryService`.
#[derive(Clone)]
pub struct LibraryHandle {
    sender: mpsc::Sender<Request>,
}

impl LibraryHandle {
    async fn send(&self, request: Request) -> Result<()> {
        self.sender
            .send(request)
            .await
            .map_err(|_| LibraryError::ServiceUnavailable)
    }

    pub async fn add_item(&self, item: LibraryItem) -> Result<()> {
        self.send(Request::AddItem(item)).await
    }

    pub async fn add_patron(&self, patron: Patron) -> Result<()> {
        self.send(Request::AddPatron(patron)).await
    }

    /// Submits an operation and waits for the library's verdict.
    ///
    /// A refusal comes back as `LibraryError::Circulation`.
    pub async fn execute(&self, operation: Operation) -> Result<()> {
        let (reply, outcome) = oneshot::channel();
        self.send(Request::Execute { operation, reply }).await?;
        outcome
            .await
            .map_err(|_| LibraryError::ServiceUnavailable)?
            .map_err(LibraryError::from)
    }

    pub async fn check_out(&self, patron: PatronId, item: ItemId) -> Result<()> {
        self.execute(Operation::CheckOut { patron, item }).await
    }

    pub async fn return_item(&self, item: ItemId) -> Result<()> {
        self.execute(Operation::Return { item }).await
    }

    pub async fn request_item(&self, patron: PatronId, item: ItemId) -> Result<()> {
        self.execute(Operation::Request { patron, item }).await
    }

    pub async fn pay_fine(&self, patron: PatronId, amount: Money) -> Result<()> {
        self.execute(Operation::PayFine { patron, amount }).await
    }

    pub async fn advance_days(&self, days: Day) -> Result<()> {
        self.execute(Operation::AdvanceDay { days }).await
    }

    pub async fn snapshot(&self) -> Result<Snapshot> {
        let (reply, snapshot) = oneshot::channel();
        self.send(Request::Snapshot { reply }).await?;
        snapshot.await.map_err(|_| LibraryError::ServiceUnavailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::item::Location;
    use rust_decimal_macros::dec;

    async fn handle() -> LibraryHandle {
        let handle = LibraryService::spawn(Library::default());
        handle
            .add_item(LibraryItem::book("1111", "Phantom Tollbooth", "Juster"))
            .await
            .unwrap();
        handle
            .add_patron(Patron::new("aaa", "Felicity"))
            .await
            .unwrap();
        handle.add_patron(Patron::new("aab", "Waldo")).await.unwrap();
        handle
    }

    #[tokio::test]
    async fn test_operations_round_trip_through_service() {
        let handle = handle().await;

        handle
            .check_out(PatronId::from("aaa"), ItemId::from("1111"))
            .await
            .unwrap();
        handle.advance_days(22).await.unwrap();

        let snapshot = handle.snapshot().await.unwrap();
        assert_eq!(snapshot.current_day, 22);
        assert_eq!(snapshot.items[0].location(), Location::CheckedOut);
        assert_eq!(snapshot.patrons[0].fine(), Money::new(dec!(0.1)));
    }

    #[tokio::test]
    async fn test_rejections_come_back_as_circulation_errors() {
        let handle = handle().await;
        handle
            .check_out(PatronId::from("aaa"), ItemId::from("1111"))
            .await
            .unwrap();

        let result = handle
            .check_out(PatronId::from("aab"), ItemId::from("1111"))
            .await;
        assert!(matches!(
            result,
            Err(LibraryError::Circulation(CirculationError::AlreadyCheckedOut))
        ));

        let result = handle
            .pay_fine(PatronId::from("zzz"), Money::new(dec!(1)))
            .await;
        assert!(matches!(
            result,
            Err(LibraryError::Circulation(CirculationError::PatronNotFound))
        ));
    }

    #[tokio::test]
    async fn test_concurrent_handles_are_serialized() {
        let handle = handle().await;
        handle
            .add_item(LibraryItem::movie("1113", "Laputa", "Miyazaki"))
            .await
            .unwrap();

        // Several tasks race to place the same hold; exactly one may win.
        let mut tasks = Vec::new();
        for patron in ["aaa", "aab", "aaa", "aab"] {
            let handle = handle.clone();
            tasks.push(tokio::spawn(async move {
                handle
                    .request_item(PatronId::from(patron), ItemId::from("1113"))
                    .await
            }));
        }

        let mut granted = 0;
        for task in tasks {
            if task.await.unwrap().is_ok() {
                granted += 1;
            }
        }
        assert_eq!(granted, 1);
    }
}
