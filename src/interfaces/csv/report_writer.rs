use crate::domain::item::{Day, LibraryItem};
use crate::domain::money::Money;
use crate::domain::patron::Patron;
use crate::error::Result;
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Serialize)]
struct PatronRow<'a> {
    patron: &'a str,
    name: &'a str,
    fine: Money,
    checked_out: String,
}

#[derive(Debug, Serialize)]
struct ItemRow<'a> {
    item: &'a str,
    kind: String,
    title: &'a str,
    creator: &'a str,
    creator_role: &'static str,
    location: String,
    checked_out_by: Option<&'a str>,
    requested_by: Option<&'a str>,
    date_checked_out: Option<Day>,
}

/// Writes end-of-run reports as CSV.
pub struct ReportWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> ReportWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    /// One row per patron: id, name, fine balance and the ids of the items
    /// they have out, space separated.
    pub fn write_patrons<'a>(&mut self, patrons: impl IntoIterator<Item = &'a Patron>) -> Result<()> {
        for patron in patrons {
            let checked_out = patron
                .checked_out_items()
                .iter()
                .map(|id| id.as_str())
                .collect::<Vec<_>>()
                .join(" ");
            self.writer.serialize(PatronRow {
                patron: patron.id().as_str(),
                name: patron.name(),
                fine: patron.fine().normalize(),
                checked_out,
            })?;
        }
        self.writer.flush()?;
        Ok(())
    }

    /// One row per item with its circulation state. `creator_role` names what
    /// the creator column holds for that kind (author, artist or director).
    pub fn write_items<'a>(&mut self, items: impl IntoIterator<Item = &'a LibraryItem>) -> Result<()> {
        for item in items {
            self.writer.serialize(ItemRow {
                item: item.id().as_str(),
                kind: item.kind().to_string(),
                title: item.title(),
                creator: item.creator(),
                creator_role: item.kind().creator_role(),
                location: item.location().to_string(),
                checked_out_by: item.checked_out_by().map(|id| id.as_str()),
                requested_by: item.requested_by().map(|id| id.as_str()),
                date_checked_out: item.date_checked_out(),
            })?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::patron::PatronId;
    use rust_decimal_macros::dec;

    #[test]
    fn test_write_patrons() {
        let mut patron = Patron::new("aaa", "Felicity");
        patron.amend_fine(Money::new(dec!(10.50)));
        patron.add_item("1112".into());
        patron.add_item("1114".into());
        let idle = Patron::new("aab", "Waldo");

        let mut buffer = Vec::new();
        ReportWriter::new(&mut buffer)
            .write_patrons([&patron, &idle])
            .unwrap();

        let output = String::from_utf8(buffer).unwrap();
        assert_eq!(
            output,
            "patron,name,fine,checked_out\naaa,Felicity,10.5,1112 1114\naab,Waldo,0,\n"
        );
    }

    #[test]
    fn test_write_items() {
        let shelf = LibraryItem::book("1111", "Phantom Tollbooth", "Juster");
        let mut out = LibraryItem::movie("1113", "Laputa", "Miyazaki");
        out.mark_checked_out(PatronId::from("aab"), 4);

        let mut buffer = Vec::new();
        ReportWriter::new(&mut buffer)
            .write_items([&shelf, &out])
            .unwrap();

        let output = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(
            lines[0],
            "item,kind,title,creator,creator_role,location,checked_out_by,requested_by,date_checked_out"
        );
        assert_eq!(lines[1], "1111,book,Phantom Tollbooth,Juster,author,ON_SHELF,,,");
        assert_eq!(lines[2], "1113,movie,Laputa,Miyazaki,director,CHECKED_OUT,aab,,4");
    }
}
