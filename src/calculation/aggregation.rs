//! Grouping and summation over derived rows.
//!
//! A single generic fold backs every rollup the engine produces: category
//! totals on an invoice, route totals within a category, and driver-month
//! totals for payroll. Grouping is pure, stable, and deterministic —
//! output groups appear in first-seen key order, and the per-group figures
//! are plain additive folds with no weighting or exclusion.

use std::collections::HashMap;
use std::hash::Hash;

use rust_decimal::Decimal;

/// An extractor for one named amount summed per group.
pub type AmountFn<T> = fn(&T) -> Decimal;

/// The count and named sums accumulated for one group key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupSummary<K> {
    /// The group key.
    pub key: K,
    /// How many rows fell into the group.
    pub count: u32,
    /// The named sums, in the order the amount extractors were given.
    sums: Vec<(&'static str, Decimal)>,
}

impl<K> GroupSummary<K> {
    /// Returns the sum accumulated under `name`, or zero when no extractor
    /// of that name was registered.
    pub fn sum(&self, name: &str) -> Decimal {
        self.sums
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| *v)
            .unwrap_or(Decimal::ZERO)
    }
}

/// Groups rows by a key and accumulates a count plus named sums per group.
///
/// Output groups follow the first-seen order of keys in the input, which
/// keeps invoice lines and payroll records in a reproducible order without
/// a separate sort step.
///
/// # Examples
///
/// ```
/// use fleet_billing::calculation::group_and_sum;
/// use rust_decimal::Decimal;
///
/// struct Line { category: &'static str, amount: Decimal }
/// let lines = vec![
///     Line { category: "01", amount: Decimal::new(100, 0) },
///     Line { category: "02", amount: Decimal::new(50, 0) },
///     Line { category: "01", amount: Decimal::new(25, 0) },
/// ];
///
/// let groups = group_and_sum(&lines, |l| l.category, &[("amount", |l: &Line| l.amount)]);
/// assert_eq!(groups.len(), 2);
/// assert_eq!(groups[0].key, "01");
/// assert_eq!(groups[0].count, 2);
/// assert_eq!(groups[0].sum("amount"), Decimal::new(125, 0));
/// ```
pub fn group_and_sum<T, K>(
    rows: &[T],
    key_fn: impl Fn(&T) -> K,
    amount_fns: &[(&'static str, AmountFn<T>)],
) -> Vec<GroupSummary<K>>
where
    K: Eq + Hash + Clone,
{
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut groups: Vec<GroupSummary<K>> = Vec::new();

    for row in rows {
        let key = key_fn(row);
        let slot = *index.entry(key.clone()).or_insert_with(|| {
            groups.push(GroupSummary {
                key,
                count: 0,
                sums: amount_fns.iter().map(|(n, _)| (*n, Decimal::ZERO)).collect(),
            });
            groups.len() - 1
        });

        let group = &mut groups[slot];
        group.count += 1;
        for (i, (_, amount_fn)) in amount_fns.iter().enumerate() {
            group.sums[i].1 += amount_fn(row);
        }
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    struct Row {
        category: &'static str,
        route: &'static str,
        fee: Decimal,
        toll: Decimal,
    }

    fn rows() -> Vec<Row> {
        vec![
            Row { category: "02", route: "r1", fee: dec("100"), toll: dec("10") },
            Row { category: "01", route: "r2", fee: dec("200"), toll: dec("0") },
            Row { category: "02", route: "r1", fee: dec("100"), toll: dec("15") },
            Row { category: "02", route: "r3", fee: dec("300"), toll: dec("5") },
        ]
    }

    /// AG-001: groups appear in first-seen key order
    #[test]
    fn test_first_seen_order() {
        let groups = group_and_sum(&rows(), |r| r.category, &[("fee", |r: &Row| r.fee)]);
        let keys: Vec<_> = groups.iter().map(|g| g.key).collect();
        assert_eq!(keys, vec!["02", "01"]);
    }

    /// AG-002: counts and sums are plain additive folds
    #[test]
    fn test_counts_and_sums() {
        let groups = group_and_sum(
            &rows(),
            |r| r.category,
            &[("fee", |r: &Row| r.fee), ("toll", |r: &Row| r.toll)],
        );

        assert_eq!(groups[0].count, 3);
        assert_eq!(groups[0].sum("fee"), dec("500"));
        assert_eq!(groups[0].sum("toll"), dec("30"));
        assert_eq!(groups[1].count, 1);
        assert_eq!(groups[1].sum("fee"), dec("200"));
    }

    /// AG-003: compound keys group route-within-category
    #[test]
    fn test_compound_key() {
        let groups = group_and_sum(
            &rows(),
            |r| (r.category, r.route),
            &[("fee", |r: &Row| r.fee)],
        );

        let keys: Vec<_> = groups.iter().map(|g| g.key).collect();
        assert_eq!(keys, vec![("02", "r1"), ("01", "r2"), ("02", "r3")]);
        assert_eq!(groups[0].count, 2);
        assert_eq!(groups[0].sum("fee"), dec("200"));
    }

    /// AG-004: empty input yields no groups
    #[test]
    fn test_empty_input() {
        let groups = group_and_sum(&[], |r: &Row| r.category, &[("fee", |r: &Row| r.fee)]);
        assert!(groups.is_empty());
    }

    /// AG-005: an unregistered sum name reads as zero
    #[test]
    fn test_unknown_sum_name_is_zero() {
        let groups = group_and_sum(&rows(), |r| r.category, &[("fee", |r: &Row| r.fee)]);
        assert_eq!(groups[0].sum("nonexistent"), Decimal::ZERO);
    }

    /// AG-006: determinism — same input, same output
    #[test]
    fn test_deterministic() {
        let a = group_and_sum(&rows(), |r| r.category, &[("fee", |r: &Row| r.fee)]);
        let b = group_and_sum(&rows(), |r| r.category, &[("fee", |r: &Row| r.fee)]);
        assert_eq!(a, b);
    }
}
