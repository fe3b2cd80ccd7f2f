//! Semicolon-delimited wide table format.
//!
//! One line per product: the name followed by one cell per run. The `Date`
//! line holds the run dates. Names are not escaped, a `;` inside one shifts
//! its cells.

use crate::models::{PriceTable, DATE_KEY};

pub const DELIMITER: char = ';';

pub fn decode(contents: &str) -> PriceTable {
    let mut table = PriceTable::new();

    for line in contents.lines() {
        if line.is_empty() {
            continue;
        }

        let mut fields = line.split(DELIMITER);
        let name = fields.next().unwrap_or_default();
        let cells: Vec<String> = fields.map(str::to_string).collect();

        if name == DATE_KEY {
            table.set_date_position(Some(table.rows().len()));
            table.set_dates(cells);
        } else {
            table.upsert_row(name, cells);
        }
    }

    if table.date_position() == Some(table.rows().len()) {
        table.set_date_position(None);
    }

    table.normalize();
    table
}

/// Products in table order with the `Date` line where it was loaded, or last
/// for a new table. Rows with an empty name are dropped.
pub fn encode(table: &PriceTable) -> String {
    let mut out = String::new();
    let rows = table.rows();
    let date_at = table.date_position().unwrap_or(rows.len()).min(rows.len());

    for (i, row) in rows.iter().enumerate() {
        if i == date_at {
            push_dates(&mut out, table);
        }
        if !row.name.is_empty() {
            push_line(&mut out, &row.name, &row.cells);
        }
    }
    if date_at == rows.len() {
        push_dates(&mut out, table);
    }

    out
}

fn push_dates(out: &mut String, table: &PriceTable) {
    if table.runs() > 0 {
        push_line(out, DATE_KEY, table.dates());
    }
}

fn push_line(out: &mut String, name: &str, cells: &[String]) {
    out.push_str(name);
    for cell in cells {
        out.push(DELIMITER);
        out.push_str(cell);
    }
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::merge::merge;
    use crate::models::Snapshot;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    #[test]
    fn test_decode_rows_and_dates() {
        let table = decode("RTX 4090;45000;44000\nRX 7900;;39000\nDate;2024-01-01;2024-01-02\n");

        assert_eq!(table.dates(), &["2024-01-01", "2024-01-02"]);
        assert_eq!(table.row("RTX 4090").unwrap().cells, vec!["45000", "44000"]);
        assert_eq!(table.row("RX 7900").unwrap().cells, vec!["", "39000"]);
        assert!(table.row(DATE_KEY).is_none());
    }

    #[test]
    fn test_decode_date_row_first() {
        let table = decode("Date;2024-01-01\nRTX 4090;45000\n");

        assert_eq!(table.last_date(), Some("2024-01-01"));
        assert_eq!(table.date_position(), Some(0));
        assert_eq!(encode(&table), "Date;2024-01-01\nRTX 4090;45000\n");
    }

    #[test]
    fn test_date_row_keeps_its_place_across_runs() {
        let mut table = decode("Date;2024-01-01\nRTX 4090;45000\n");

        let mut next = Snapshot::new(day(2));
        next.insert("RTX 4090", "44000");
        next.insert("RX 7900", "39000");
        merge(&mut table, &next);

        assert_eq!(
            encode(&table),
            "Date;2024-01-01;2024-01-02\nRTX 4090;45000;44000\nRX 7900;;39000\n"
        );
    }

    #[test]
    fn test_date_row_between_products() {
        let text = "RTX 4090;45000\nDate;2024-01-01\nRX 7900;39000\n";

        assert_eq!(encode(&decode(text)), text);
    }

    #[test]
    fn test_decode_empty_input() {
        assert!(decode("").is_empty());
        assert!(decode("\n\n").is_empty());
    }

    #[test]
    fn test_decode_pads_short_rows() {
        let table = decode("RTX 4090;45000\nDate;2024-01-01;2024-01-02\n");

        assert!(table.is_rectangular());
        assert_eq!(table.row("RTX 4090").unwrap().cells, vec!["45000", ""]);
    }

    #[test]
    fn test_round_trip() {
        let text = "RTX 4090;45000;;44000\nRX 7900;;39000;\nRTX 4070;;;16000\nDate;2024-01-01;2024-01-02;2024-01-03\n";

        let table = decode(text);
        assert_eq!(decode(&encode(&table)), table);
        assert_eq!(encode(&table), text);
    }

    #[test]
    fn test_empty_name_never_written() {
        let mut snapshot = Snapshot::new(day(1));
        snapshot.insert("", "100");
        snapshot.insert("RTX 4090", "45000");
        let mut table = PriceTable::new();
        merge(&mut table, &snapshot);

        let text = encode(&table);

        assert_eq!(text, "RTX 4090;45000\nDate;2024-01-01\n");
        assert!(decode(&text).row("").is_none());
    }

    #[test]
    fn test_documented_three_runs() {
        let mut table = decode("");

        let mut first = Snapshot::new(day(1));
        first.insert("RTX 4090", "45000");
        merge(&mut table, &first);
        let after_first = encode(&table);
        assert_eq!(after_first, "RTX 4090;45000\nDate;2024-01-01\n");

        let mut table = decode(&after_first);
        let mut rerun = Snapshot::new(day(1));
        rerun.insert("RTX 4090", "44000");
        merge(&mut table, &rerun);
        assert_eq!(encode(&table), after_first);

        let mut next = Snapshot::new(day(2));
        next.insert("RTX 4090", "44000");
        next.insert("RX 7900", "39000");
        merge(&mut table, &next);
        assert_eq!(
            encode(&table),
            "RTX 4090;45000;44000\nRX 7900;;39000\nDate;2024-01-01;2024-01-02\n"
        );
    }
}
