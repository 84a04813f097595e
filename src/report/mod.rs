use std::collections::BTreeMap;
use comfy_table::{Cell, CellAlignment, Table, TableComponent};
use crate::ledger::LedgerEntry;

/// Total amount each person is responsible for across the given entries
pub(crate) fn sum_by_person(entries: &[LedgerEntry]) -> BTreeMap<String, f64> {
    let mut totals :BTreeMap<String, f64> = BTreeMap::new();
    for entry in entries {
        for (person, amount) in entry.assignment.iter() {
            *totals.entry(person.to_string()).or_insert(0.0) += amount;
        }
    }
    totals
}

/// Table without lines between rows, shared by all reports
pub(crate) fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table.set_header(header);
    table.remove_style(TableComponent::HorizontalLines);
    table.remove_style(TableComponent::MiddleIntersections);
    table.remove_style(TableComponent::LeftBorderIntersections);
    table.remove_style(TableComponent::RightBorderIntersections);
    table
}

pub(crate) fn totals_table(totals: &BTreeMap<String, f64>) -> Table {
    let mut table = new_table(vec!["Person", "Total"]);
    for (person, total) in totals {
        table.add_row(vec![
            Cell::new(person),
            Cell::new(format!("{:.2}", total)).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

pub(crate) fn print_totals(entries: &[LedgerEntry]) {
    let totals = sum_by_person(entries);
    println!("Total responsibilities:");
    if totals.is_empty() {
        println!("(none)");
    } else {
        println!("{}", totals_table(&totals));
    }
}
