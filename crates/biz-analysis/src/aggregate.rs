//! Column sums and group-by sums over a [`Table`].

use std::collections::HashMap;

use biz_core::GroupOrder;
use biz_core::entities::GroupTotal;

use crate::error::AnalysisError;
use crate::table::Table;

/// Sum of a numeric column, skipping missing cells, in row order.
///
/// # Errors
///
/// [`AnalysisError::MissingColumn`] if the column is absent,
/// [`AnalysisError::NonNumericValue`] for an unparseable cell,
/// [`AnalysisError::DataFormat`] when the sum exceeds the `f64` range.
pub fn column_sum(table: &Table, column: &str) -> Result<f64, AnalysisError> {
    let sum: f64 = table.numeric_column(column)?.into_iter().flatten().sum();
    finite(sum, column)
}

/// Number of non-missing cells in a numeric column.
///
/// # Errors
///
/// Same as [`Table::numeric_column`].
pub fn value_count(table: &Table, column: &str) -> Result<usize, AnalysisError> {
    Ok(table.numeric_column(column)?.iter().flatten().count())
}

/// Sum `value` per distinct `key`.
///
/// Rows with an empty key are left out. A group whose values are all missing
/// still appears, with a total of zero.
///
/// # Errors
///
/// [`AnalysisError::MissingColumn`] if either column is absent,
/// [`AnalysisError::NonNumericValue`] for an unparseable value cell,
/// [`AnalysisError::DataFormat`] when a group total exceeds the `f64` range.
pub fn grouped_sums(
    table: &Table,
    key: &str,
    value: &str,
    order: GroupOrder,
) -> Result<Vec<GroupTotal>, AnalysisError> {
    let keys = table
        .column(key)
        .ok_or_else(|| AnalysisError::MissingColumn(key.to_string()))?;
    let values = table.numeric_column(value)?;

    let mut groups: Vec<GroupTotal> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();
    for (key, value) in keys.into_iter().zip(values) {
        if key.is_empty() {
            continue;
        }
        let slot = *index.entry(key).or_insert_with(|| {
            groups.push(GroupTotal::new(key, 0.0));
            groups.len() - 1
        });
        if let Some(value) = value {
            groups[slot].total += value;
        }
    }

    for group in &groups {
        finite(group.total, value)?;
    }

    if order == GroupOrder::Sorted {
        groups.sort_by(|a, b| a.key.cmp(&b.key));
    }
    Ok(groups)
}

fn finite(sum: f64, column: &str) -> Result<f64, AnalysisError> {
    if sum.is_finite() {
        Ok(sum)
    } else {
        Err(AnalysisError::DataFormat(format!(
            "sum of column '{column}' is out of range"
        )))
    }
}

/// The group with the largest total. Ties go to the earliest group in the
/// slice, so the caller's [`GroupOrder`] decides the winner.
#[must_use]
pub fn top_group(groups: &[GroupTotal]) -> Option<&GroupTotal> {
    groups.iter().fold(None, |best: Option<&GroupTotal>, group| match best {
        Some(current) if group.total <= current.total => Some(current),
        _ => Some(group),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn table(text: &str) -> Table {
        Table::from_reader(text.as_bytes()).unwrap()
    }

    #[test]
    fn column_sum_skips_missing_cells() {
        let t = table("Sales\n10\n\n5.5\nNaN\n");
        assert!((column_sum(&t, "Sales").unwrap() - 15.5).abs() < f64::EPSILON);
    }

    #[test]
    fn column_sum_of_empty_table_is_zero() {
        let t = table("Sales\n");
        assert!(column_sum(&t, "Sales").unwrap().abs() < f64::EPSILON);
    }

    #[test]
    fn overflowing_sums_are_format_errors() {
        let t = table("Product,Sales\nA,1e308\nA,1e308\n");
        assert!(matches!(
            column_sum(&t, "Sales"),
            Err(AnalysisError::DataFormat(_))
        ));
        assert!(matches!(
            grouped_sums(&t, "Product", "Sales", GroupOrder::FirstSeen),
            Err(AnalysisError::DataFormat(_))
        ));
    }

    #[test]
    fn value_count_skips_missing_cells() {
        let t = table("Sales\n10\n\n5\nn/a\n");
        assert_eq!(value_count(&t, "Sales").unwrap(), 2);
    }

    #[test]
    fn grouped_sums_first_seen_order() {
        let t = table("Month,Sales\nMar,1\nJan,2\nMar,3\nFeb,4\n");
        let groups = grouped_sums(&t, "Month", "Sales", GroupOrder::FirstSeen).unwrap();
        assert_eq!(
            groups,
            vec![
                GroupTotal::new("Mar", 4.0),
                GroupTotal::new("Jan", 2.0),
                GroupTotal::new("Feb", 4.0),
            ]
        );
    }

    #[test]
    fn grouped_sums_sorted_order() {
        let t = table("Month,Sales\nMar,1\nJan,2\nFeb,4\n");
        let groups = grouped_sums(&t, "Month", "Sales", GroupOrder::Sorted).unwrap();
        let keys: Vec<&str> = groups.iter().map(|g| g.key.as_str()).collect();
        assert_eq!(keys, vec!["Feb", "Jan", "Mar"]);
    }

    #[test]
    fn grouped_sums_skip_empty_keys_and_keep_valueless_groups() {
        let t = table("Product,Sales\n,10\nA,\nB,2\n");
        let groups = grouped_sums(&t, "Product", "Sales", GroupOrder::FirstSeen).unwrap();
        assert_eq!(
            groups,
            vec![GroupTotal::new("A", 0.0), GroupTotal::new("B", 2.0)]
        );
    }

    #[test]
    fn grouped_sums_require_key_column() {
        let t = table("Sales\n1\n");
        let err = grouped_sums(&t, "Product", "Sales", GroupOrder::FirstSeen).unwrap_err();
        assert!(matches!(err, AnalysisError::MissingColumn(c) if c == "Product"));
    }

    #[test]
    fn top_group_breaks_ties_by_position() {
        let groups = vec![
            GroupTotal::new("B", 5.0),
            GroupTotal::new("A", 9.0),
            GroupTotal::new("C", 9.0),
        ];
        assert_eq!(top_group(&groups).unwrap().key, "A");
    }

    #[test]
    fn top_group_of_nothing_is_none() {
        assert!(top_group(&[]).is_none());
    }

    #[test]
    fn top_group_handles_all_negative() {
        let groups = vec![GroupTotal::new("X", -3.0), GroupTotal::new("Y", -1.0)];
        assert_eq!(top_group(&groups).unwrap().key, "Y");
    }
}
