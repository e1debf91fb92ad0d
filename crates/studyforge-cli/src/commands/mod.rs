//! Subcommand implementations.

pub mod concepts;
pub mod flashcards;
pub mod init;
pub mod merge;
pub mod questions;
pub mod summary;

use std::collections::BTreeMap;

use comfy_table::{Cell, Table};
use studyforge_core::model::Domain;

/// Per-domain counts as a table, with a total row.
pub(crate) fn distribution_table(dist: &BTreeMap<Domain, usize>) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Domain", "Name", "Count"]);
    for domain in Domain::ALL {
        table.add_row(vec![
            Cell::new(domain),
            Cell::new(domain.name()),
            Cell::new(dist.get(&domain).copied().unwrap_or(0)),
        ]);
    }
    table.add_row(vec![
        Cell::new("all"),
        Cell::new(""),
        Cell::new(dist.values().sum::<usize>()),
    ]);
    table
}
