use tracing::{debug, warn};

use crate::models::{PriceTable, Snapshot, DATE_KEY};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    /// The table already holds a column for the snapshot's date; nothing changed.
    AlreadyRecorded,
    /// One column was appended.
    Appended { added: usize, missing: usize },
}

/// Appends the snapshot as a new dated column.
///
/// Every tracked row first gets an empty cell for this run, then the cells of
/// products present in the snapshot are filled in. Products seen for the first
/// time are backfilled with empty cells for all earlier runs. Tracked products
/// absent from the snapshot keep the empty cell.
pub fn merge(table: &mut PriceTable, snapshot: &Snapshot) -> MergeOutcome {
    let date = snapshot.date_label();

    if table.last_date() == Some(date.as_str()) {
        return MergeOutcome::AlreadyRecorded;
    }

    table.normalize();

    let missing = table
        .rows()
        .iter()
        .filter(|row| snapshot.get(&row.name).is_none())
        .count();

    table.dates_mut().push(String::new());
    for row in table.rows_mut() {
        row.cells.push(String::new());
    }
    let prior_runs = table.runs() - 1;

    let mut added = 0;
    for (name, price) in snapshot.iter() {
        if name == DATE_KEY {
            warn!("Product named {:?} collides with the date row, skipping", DATE_KEY);
            continue;
        }

        if !table.contains(name) {
            debug!("Tracking new product: {}", name);
            table.upsert_row(name, vec![String::new(); prior_runs + 1]);
            added += 1;
        }

        if let Some(cell) = table.row_mut(name).and_then(|row| row.cells.last_mut()) {
            *cell = price.to_string();
        }
    }

    if let Some(cell) = table.dates_mut().last_mut() {
        *cell = date;
    }
    debug_assert!(table.is_rectangular());

    MergeOutcome::Appended { added, missing }
}
