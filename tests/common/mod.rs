#![allow(dead_code)]

use circulation::application::library::Library;
use circulation::infrastructure::in_memory::{InMemoryItemStore, InMemoryPatronStore};
use circulation::interfaces::catalog::Catalog;
use std::io::Write;
use tempfile::NamedTempFile;

/// Six items (two of each kind) and three patrons.
pub const CATALOG: &str = r#"{
    "items": [
        {"kind": "book", "id": "1111", "title": "Phantom Tollbooth", "author": "Juster"},
        {"kind": "book", "id": "1114", "title": "Harry Potter", "author": "Rowling"},
        {"kind": "album", "id": "1112", "title": "...And His Orchestra", "artist": "The Fastbacks"},
        {"kind": "album", "id": "1115", "title": "Come Back", "artist": "Lil Yachty"},
        {"kind": "movie", "id": "1113", "title": "Laputa", "director": "Miyazaki"},
        {"kind": "movie", "id": "1116", "title": "Harry Potter", "director": "David Yates"}
    ],
    "patrons": [
        {"id": "aaa", "name": "Felicity"},
        {"id": "aab", "name": "Waldo"},
        {"id": "aac", "name": "Ivy"}
    ]
}"#;

pub const COMMAND_HEADER: &str = "type, patron, item, amount";

/// A fresh library built from `CATALOG`, on day 0.
pub fn library() -> Library {
    Catalog::from_reader(CATALOG.as_bytes())
        .expect("Failed to parse catalog")
        .into_library(
            Box::new(InMemoryItemStore::new()),
            Box::new(InMemoryPatronStore::new()),
        )
}

pub fn catalog_file() -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create catalog file");
    write!(file, "{CATALOG}").expect("Failed to write catalog");
    file
}

/// Writes a command script with the standard header followed by `rows`.
pub fn commands_file(rows: &[&str]) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create commands file");
    writeln!(file, "{COMMAND_HEADER}").expect("Failed to write header");
    for row in rows {
        writeln!(file, "{row}").expect("Failed to write command");
    }
    file
}
