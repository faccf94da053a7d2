use crate::categories::CategoryTable;
use std::collections::BTreeMap;

/// Per-category running totals with a fixed key set.
///
/// The key set is pinned to the table's label set at construction: a
/// document that contributes nothing still carries every category at
/// zero, and the batch fold never has to reconcile differing key sets.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotals {
    totals: BTreeMap<String, f64>,
}

impl CategoryTotals {
    pub fn zeroed(table: &CategoryTable) -> Self {
        let totals = table.labels().map(|label| (label.to_string(), 0.0)).collect();
        Self { totals }
    }

    /// Add a contribution to one category. Callers only pass labels
    /// resolved through the same table this was seeded from.
    pub fn add(&mut self, category: &str, contribution: f64) {
        debug_assert!(
            self.totals.contains_key(category),
            "category {category} missing from totals key set"
        );
        if let Some(total) = self.totals.get_mut(category) {
            *total += contribution;
        }
    }

    /// Element-wise fold step. Addition is associative and commutative,
    /// so merge order never affects the result.
    pub fn merge(&mut self, other: &CategoryTotals) {
        debug_assert_eq!(self.totals.len(), other.totals.len());
        for (category, value) in &other.totals {
            if let Some(total) = self.totals.get_mut(category) {
                *total += value;
            }
        }
    }

    pub fn get(&self, category: &str) -> Option<f64> {
        self.totals.get(category).copied()
    }

    /// Categories and totals, in label order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.totals.iter().map(|(category, total)| (category.as_str(), *total))
    }

    pub fn len(&self) -> usize {
        self.totals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> CategoryTable {
        CategoryTable::parse("1=Red\n2=Blue\n3=Green")
    }

    #[test]
    fn zeroed_carries_every_category() {
        let totals = CategoryTotals::zeroed(&table());
        assert_eq!(totals.len(), 3);
        assert!(!totals.is_empty());
        assert_eq!(totals.get("Red"), Some(0.0));
        assert_eq!(totals.get("Blue"), Some(0.0));
        assert_eq!(totals.get("Green"), Some(0.0));
    }

    #[test]
    fn duplicate_labels_collapse_into_one_category() {
        let table = CategoryTable::parse("14=szary\n18=szary");
        let totals = CategoryTotals::zeroed(&table);
        assert_eq!(totals.len(), 1);
        assert_eq!(totals.get("szary"), Some(0.0));
    }

    #[test]
    fn add_accumulates() {
        let mut totals = CategoryTotals::zeroed(&table());
        totals.add("Red", 55.0);
        totals.add("Red", 5.0);
        assert_eq!(totals.get("Red"), Some(60.0));
        assert_eq!(totals.get("Blue"), Some(0.0));
    }

    #[test]
    fn merge_is_commutative() {
        let table = table();
        let mut a = CategoryTotals::zeroed(&table);
        a.add("Red", 10.0);
        a.add("Blue", 2.5);
        let mut b = CategoryTotals::zeroed(&table);
        b.add("Red", 1.0);
        b.add("Green", 7.0);

        let mut ab = a.clone();
        ab.merge(&b);
        let mut ba = b.clone();
        ba.merge(&a);
        assert_eq!(ab, ba);
        assert_eq!(ab.get("Red"), Some(11.0));
        assert_eq!(ab.get("Blue"), Some(2.5));
        assert_eq!(ab.get("Green"), Some(7.0));
    }

    #[test]
    fn merge_is_associative() {
        let table = table();
        let mut a = CategoryTotals::zeroed(&table);
        a.add("Red", 1.0);
        let mut b = CategoryTotals::zeroed(&table);
        b.add("Red", 2.0);
        let mut c = CategoryTotals::zeroed(&table);
        c.add("Blue", 4.0);

        // (a + b) + c
        let mut left = a.clone();
        left.merge(&b);
        left.merge(&c);
        // a + (b + c)
        let mut bc = b.clone();
        bc.merge(&c);
        let mut right = a.clone();
        right.merge(&bc);

        assert_eq!(left, right);
    }
}
