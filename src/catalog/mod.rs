//! # Catalog
//!
//! In-memory owner of every price record loaded during ingestion. Records are
//! kept ordered by price per weight unit, with ties in insertion order, so both
//! the full listing and search results come out ready for presentation.

pub mod record;

use crate::catalog::record::PriceRecord;
use crate::helpers::string::char_width;
use crate::helpers::string::fold_case;

/// Append-only collection of price records.
#[derive(Debug, Default)]
pub struct Catalog {
    /// Records sorted by price per weight unit; equal values keep insertion order
    records: Vec<PriceRecord>,
    /// Longest product name seen so far, in characters
    max_name_length: usize,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds records and updates the longest product name.
    pub fn append<I>(&mut self, records: I)
    where
        I: IntoIterator<Item = PriceRecord>,
    {
        for record in records {
            self.max_name_length = self.max_name_length.max(char_width(record.product_name()));
            self.records.push(record);
        }
        // Stable sort, so equal values keep insertion order
        self.records
            .sort_by(|left, right| left.price_per_weight_unit().total_cmp(&right.price_per_weight_unit()));
    }

    /// All records ordered by price per weight unit ascending.
    pub fn all(&self) -> Vec<&PriceRecord> {
        self.records.iter().collect()
    }

    /// Records whose product name contains `text`, ignoring case, in the same order as [`Catalog::all`].
    pub fn search(&self, text: &str) -> Vec<&PriceRecord> {
        let needle = fold_case(text);
        self.records
            .iter()
            .filter(|record| fold_case(record.product_name()).contains(&needle))
            .collect()
    }

    /// Length in characters of the longest product name, for fixed-width rendering.
    pub fn max_name_length(&self) -> usize {
        self.max_name_length
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, price: f64, weight: f64, file: &str) -> PriceRecord {
        PriceRecord::new(name, price, weight, file).unwrap()
    }

    fn values(records: &[&PriceRecord]) -> Vec<f64> {
        records.iter().map(|record| record.price_per_weight_unit()).collect()
    }

    #[test]
    fn test_empty_catalog() {
        let catalog = Catalog::new();
        assert!(catalog.is_empty());
        assert!(catalog.all().is_empty());
        assert!(catalog.search("ябл").is_empty());
        assert_eq!(catalog.max_name_length(), 0);
    }

    #[test]
    fn test_all_sorted_across_appends() {
        let mut catalog = Catalog::new();
        catalog.append(vec![record("Сыр", 30.0, 1.0, "price_a.csv"), record("Мясо", 90.0, 2.0, "price_a.csv")]);
        catalog.append(vec![record("Хлеб", 10.0, 1.0, "price_b.csv")]);
        assert_eq!(values(&catalog.all()), vec![10.0, 30.0, 45.0]);
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn test_ties_keep_insertion_order() {
        let mut catalog = Catalog::new();
        catalog.append(vec![
            record("Первый", 20.0, 2.0, "price.csv"),
            record("Дешёвый", 1.0, 1.0, "price.csv"),
            record("Второй", 10.0, 1.0, "price.csv"),
        ]);
        catalog.append(vec![record("Третий", 30.0, 3.0, "price.csv")]);
        let names: Vec<&str> = catalog.all().iter().map(|record| record.product_name()).collect();
        assert_eq!(names, vec!["Дешёвый", "Первый", "Второй", "Третий"]);
    }

    #[test]
    fn test_large_batches_stay_sorted() {
        let mut catalog = Catalog::new();
        catalog.append((1..=500).rev().map(|price| record("Товар", price as f64, 1.0, "price_a.csv")));
        catalog.append((1..=500).map(|price| record("Товар", price as f64, 1.0, "price_b.csv")));

        let all = catalog.all();
        assert_eq!(all.len(), 1000);
        assert!(all.windows(2).all(|pair| pair[0].price_per_weight_unit() <= pair[1].price_per_weight_unit()));
        let files: Vec<&str> = all.iter().take(4).map(|record| record.source_file()).collect();
        assert_eq!(files, vec!["price_a.csv", "price_b.csv", "price_a.csv", "price_b.csv"]);
    }

    #[test]
    fn test_search_is_case_insensitive_subset() {
        let mut catalog = Catalog::new();
        catalog.append(vec![
            record("Яблоко", 100.0, 2.0, "price.csv"),
            record("Груша", 40.0, 2.0, "price.csv"),
            record("ЯБЛОКО зелёное", 30.0, 1.0, "price.csv"),
        ]);

        let found = catalog.search("ябл");
        let names: Vec<&str> = found.iter().map(|record| record.product_name()).collect();
        assert_eq!(names, vec!["ЯБЛОКО зелёное", "Яблоко"]);

        let all = catalog.all();
        let positions: Vec<usize> = found
            .iter()
            .map(|record| all.iter().position(|candidate| std::ptr::eq(*candidate, *record)).unwrap())
            .collect();
        assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn test_search_example() {
        let mut catalog = Catalog::new();
        catalog.append(vec![record("Яблоко", 100.0, 2.0, "price.csv"), record("Груша", 20.0, 1.0, "price.csv")]);
        let found = catalog.search("ябл");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].product_name(), "Яблоко");
        assert_eq!(found[0].price_per_weight_unit(), 50.0);
    }

    #[test]
    fn test_empty_query_matches_everything() {
        let mut catalog = Catalog::new();
        catalog.append(vec![record("Яблоко", 100.0, 2.0, "price.csv"), record("Груша", 20.0, 1.0, "price.csv")]);
        assert_eq!(catalog.search("").len(), 2);
    }

    #[test]
    fn test_max_name_length_counts_characters() {
        let mut catalog = Catalog::new();
        catalog.append(vec![record("Груша", 1.0, 1.0, "price.csv")]);
        assert_eq!(catalog.max_name_length(), 5);
        catalog.append(vec![record("Яблоко", 1.0, 1.0, "price.csv")]);
        assert_eq!(catalog.max_name_length(), 6);
        catalog.append(vec![record("Лук", 1.0, 1.0, "price.csv")]);
        assert_eq!(catalog.max_name_length(), 6);
    }
}
