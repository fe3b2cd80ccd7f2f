use chrono::NaiveDate;
use std::collections::HashMap;

use super::DATE_FORMAT;

/// Result of one scrape run: product name to raw price text, in first-seen order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    date: NaiveDate,
    entries: Vec<(String, String)>,
    index: HashMap<String, usize>,
}

impl Snapshot {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Records a price. A name seen again keeps its position and takes the new price.
    pub fn insert(&mut self, name: impl Into<String>, price: impl Into<String>) {
        let name = name.into();
        let price = price.into();

        match self.index.get(&name) {
            Some(&pos) => self.entries[pos].1 = price,
            None => {
                self.index.insert(name.clone(), self.entries.len());
                self.entries.push((name, price));
            }
        }
    }

    pub fn extend<I>(&mut self, products: I)
    where
        I: IntoIterator<Item = (String, String)>,
    {
        for (name, price) in products {
            self.insert(name, price);
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn date_label(&self) -> String {
        self.date().format(DATE_FORMAT).to_string()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.index.get(name).map(|&pos| self.entries[pos].1.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, p)| (n.as_str(), p.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
