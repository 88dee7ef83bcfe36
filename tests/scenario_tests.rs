use circulation::application::library::Library;
use circulation::domain::item::{ItemId, Location};
use circulation::domain::money::Money;
use circulation::domain::patron::PatronId;
use circulation::error::CirculationError;
use rust_decimal_macros::dec;

mod common;

fn p(id: &str) -> PatronId {
    PatronId::from(id)
}

fn i(id: &str) -> ItemId {
    ItemId::from(id)
}

fn fine(library: &Library, patron: &str) -> Money {
    library.find_patron(&p(patron)).unwrap().fine()
}

/// Felicity takes a book and an album, Waldo a movie, and 60 days pass.
/// Felicity then returns the book and Ivy takes the other movie.
fn after_eighty_days() -> Library {
    let mut library = common::library();
    library.check_out(&p("aaa"), &i("1111")).unwrap();
    library.check_out(&p("aaa"), &i("1112")).unwrap();
    library.check_out(&p("aab"), &i("1113")).unwrap();
    library.advance_days(60).unwrap();
    library.return_item(&i("1111")).unwrap();
    library.check_out(&p("aac"), &i("1116")).unwrap();
    library.advance_days(20).unwrap();
    library
}

#[test]
fn test_fines_for_several_overdue_patrons() {
    let mut library = common::library();
    library.check_out(&p("aaa"), &i("1111")).unwrap();
    library.check_out(&p("aaa"), &i("1112")).unwrap();
    library.check_out(&p("aab"), &i("1113")).unwrap();

    library.advance_days(60).unwrap();
    assert_eq!(fine(&library, "aaa"), Money::new(dec!(8.50)));
    assert_eq!(fine(&library, "aab"), Money::new(dec!(5.30)));

    library.return_item(&i("1111")).unwrap();
    library.check_out(&p("aac"), &i("1116")).unwrap();
    library.advance_days(20).unwrap();
    assert_eq!(fine(&library, "aaa"), Money::new(dec!(10.50)));
    assert_eq!(fine(&library, "aab"), Money::new(dec!(7.30)));
    assert_eq!(fine(&library, "aac"), Money::new(dec!(1.30)));
}

#[test]
fn test_check_out_of_checked_out_item() {
    let mut library = after_eighty_days();
    assert_eq!(
        library.check_out(&p("aac"), &i("1112")),
        Err(CirculationError::AlreadyCheckedOut)
    );
}

#[test]
fn test_request_of_item_already_requested() {
    let mut library = after_eighty_days();
    library.request_item(&p("aac"), &i("1112")).unwrap();
    assert_eq!(
        library.request_item(&p("aab"), &i("1112")),
        Err(CirculationError::AlreadyOnHold)
    );

    let album = library.find_item(&i("1112")).unwrap();
    assert_eq!(album.location(), Location::CheckedOut);
    assert_eq!(album.requested_by(), Some(&p("aac")));
}

#[test]
fn test_check_out_of_item_held_for_someone_else() {
    let mut library = after_eighty_days();
    library.request_item(&p("aac"), &i("1112")).unwrap();
    library.return_item(&i("1112")).unwrap();

    assert_eq!(
        library.find_item(&i("1112")).unwrap().location(),
        Location::OnHoldShelf
    );
    assert_eq!(
        library.check_out(&p("aab"), &i("1112")),
        Err(CirculationError::OnHoldByOtherPatron)
    );

    // The requester collects it, which clears the hold
    library.check_out(&p("aac"), &i("1112")).unwrap();
    let album = library.find_item(&i("1112")).unwrap();
    assert_eq!(album.location(), Location::CheckedOut);
    assert!(album.requested_by().is_none());
}

#[test]
fn test_paying_more_than_owed_leaves_credit() {
    let mut library = after_eighty_days();
    library.pay_fine(&p("aaa"), Money::new(dec!(10))).unwrap();
    assert_eq!(fine(&library, "aaa"), Money::new(dec!(0.50)));
    assert_eq!(fine(&library, "aab"), Money::new(dec!(7.30)));
    assert_eq!(fine(&library, "aac"), Money::new(dec!(1.30)));

    library.pay_fine(&p("aab"), Money::new(dec!(8))).unwrap();
    assert_eq!(fine(&library, "aab"), Money::new(dec!(-0.70)));
    assert_eq!(fine(&library, "aac"), Money::new(dec!(1.30)));
}

#[test]
fn test_returns_of_unknown_and_unrequested_items() {
    let mut library = after_eighty_days();
    assert_eq!(
        library.return_item(&i("116")),
        Err(CirculationError::ItemNotFound)
    );

    library.return_item(&i("1116")).unwrap();
    assert_eq!(fine(&library, "aac"), Money::new(dec!(1.30)));
    assert_eq!(
        library.find_item(&i("1116")).unwrap().location(),
        Location::OnShelf
    );
    assert!(
        library
            .find_patron(&p("aac"))
            .unwrap()
            .checked_out_items()
            .is_empty()
    );
}
