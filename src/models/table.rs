use std::collections::HashMap;

/// One product's price history, one cell per recorded run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceRow {
    pub name: String,
    pub cells: Vec<String>,
}

/// Wide price history: product rows in first-seen order plus the run dates.
///
/// Once normalized, every row holds exactly `dates().len()` cells.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PriceTable {
    dates: Vec<String>,
    rows: Vec<PriceRow>,
    index: HashMap<String, usize>,
    /// Number of product rows preceding the date row; `None` puts it last.
    date_position: Option<usize>,
}

impl PriceTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dates(&self) -> &[String] {
        &self.dates
    }

    pub fn last_date(&self) -> Option<&str> {
        self.dates.last().map(String::as_str)
    }

    pub fn runs(&self) -> usize {
        self.dates.len()
    }

    pub fn rows(&self) -> &[PriceRow] {
        &self.rows
    }

    pub fn row(&self, name: &str) -> Option<&PriceRow> {
        self.index.get(name).map(|&pos| &self.rows[pos])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty() && self.rows.is_empty()
    }

    pub fn date_position(&self) -> Option<usize> {
        self.date_position
    }

    pub(crate) fn set_dates(&mut self, dates: Vec<String>) {
        self.dates = dates;
    }

    /// Pins the date row after the first `position` product rows.
    pub(crate) fn set_date_position(&mut self, position: Option<usize>) {
        self.date_position = position;
    }

    pub(crate) fn dates_mut(&mut self) -> &mut Vec<String> {
        &mut self.dates
    }

    pub(crate) fn rows_mut(&mut self) -> &mut [PriceRow] {
        &mut self.rows
    }

    pub(crate) fn row_mut(&mut self, name: &str) -> Option<&mut PriceRow> {
        let pos = *self.index.get(name)?;
        self.rows.get_mut(pos)
    }

    /// Adds or replaces a row, keeping the position of an existing one.
    pub(crate) fn upsert_row(&mut self, name: impl Into<String>, cells: Vec<String>) {
        let name = name.into();
        match self.index.get(&name) {
            Some(&pos) => self.rows[pos].cells = cells,
            None => {
                self.index.insert(name.clone(), self.rows.len());
                self.rows.push(PriceRow { name, cells });
            }
        }
    }

    /// Right-pads every row and the date column to the widest one.
    pub fn normalize(&mut self) {
        let width = self
            .rows
            .iter()
            .map(|row| row.cells.len())
            .chain(std::iter::once(self.dates.len()))
            .max()
            .unwrap_or(0);

        self.dates.resize(width, String::new());
        for row in &mut self.rows {
            row.cells.resize(width, String::new());
        }
    }

    pub fn is_rectangular(&self) -> bool {
        self.rows.iter().all(|row| row.cells.len() == self.dates.len())
    }
}
