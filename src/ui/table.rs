// TutorFinder - ui/table.rs
//
// Terminal rendering of search results and resource links.

use crate::core::model::{TutorField, TutorRecord};
use crate::platform::config::ResourceLink;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, ContentArrangement, Table};

fn header_cell(label: &str) -> Cell {
    Cell::new(label).add_attribute(Attribute::Bold)
}

fn base_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Build the results table: one row per tutor, searchable fields only.
pub fn records_table(records: &[&TutorRecord]) -> Table {
    let mut table = base_table();
    table.set_header(
        TutorField::all()
            .iter()
            .map(|f| header_cell(f.header()))
            .collect::<Vec<_>>(),
    );
    for record in records {
        table.add_row(
            TutorField::all()
                .iter()
                .map(|f| Cell::new(record.text(*f)))
                .collect::<Vec<_>>(),
        );
    }
    table
}

/// Build the resource links table.
pub fn links_table(links: &[ResourceLink]) -> Table {
    let mut table = base_table();
    table.set_header(vec![header_cell("Title"), header_cell("URL")]);
    for link in links {
        table.add_row(vec![Cell::new(&link.title), Cell::new(&link.url)]);
    }
    table
}
