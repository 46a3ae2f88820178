//! Projection of the to-map table onto the reference layout.

use polars::prelude::*;
use tracing::{debug, warn};

use colmap_model::{ColumnList, ValidatedMapping};

use crate::error::Result;
use crate::text::column_to_text;

/// Builds the output table.
///
/// The result has exactly the reference columns, in reference order, and
/// the same number of rows as `source`. Each column is `String` typed: the
/// mapped source column as text, or all null when the reference column has
/// no target or its target is missing from `source`.
pub fn project_table(
    reference: &ColumnList,
    source: &DataFrame,
    mapping: &ValidatedMapping,
) -> Result<DataFrame> {
    let row_count = source.height();
    let mut columns: Vec<Column> = Vec::with_capacity(reference.len());

    for name in reference.iter() {
        let column = match mapping.target(name) {
            Some(target) => match source.column(target) {
                Ok(source_col) => {
                    debug!(reference = %name, source = %target, "copying mapped column");
                    column_to_text(source_col, name)?
                }
                Err(_) => {
                    warn!(
                        reference = %name,
                        source = %target,
                        "mapped column not present in table; filling with nulls"
                    );
                    null_column(name, row_count)
                }
            },
            None => {
                debug!(reference = %name, "no mapping; filling with nulls");
                null_column(name, row_count)
            }
        };
        columns.push(column);
    }

    Ok(DataFrame::new(columns)?)
}

fn null_column(name: &str, row_count: usize) -> Column {
    Series::full_null(name.into(), row_count, &DataType::String).into_column()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    fn reference() -> ColumnList {
        ColumnList::new(vec!["Name".into(), "Age".into(), "City".into()]).unwrap()
    }

    fn source() -> DataFrame {
        df! {
            "full_name" => &["Ada", "Alan"],
            "years" => &[36i64, 41],
            "location" => &["London", "Wilmslow"],
            "notes" => &[Some("x"), None],
        }
        .unwrap()
    }

    fn mapping(pairs: &[(&str, Option<&str>)]) -> ValidatedMapping {
        ValidatedMapping::from_entries(
            pairs
                .iter()
                .map(|(k, v)| ((*k).to_string(), v.map(str::to_string)))
                .collect::<BTreeMap<_, _>>(),
        )
    }

    #[test]
    fn test_full_mapping() {
        let mapping = mapping(&[
            ("Name", Some("full_name")),
            ("Age", Some("years")),
            ("City", Some("location")),
        ]);
        let out = project_table(&reference(), &source(), &mapping).unwrap();

        let names: Vec<&str> = out.get_column_names().into_iter().map(|n| n.as_str()).collect();
        assert_eq!(names, vec!["Name", "Age", "City"]);
        assert_eq!(out.height(), 2);
        assert_eq!(out.column("Age").unwrap().get(1).unwrap(), AnyValue::String("41"));
        assert_eq!(
            out.column("City").unwrap().get(0).unwrap(),
            AnyValue::String("London")
        );
    }

    #[test]
    fn test_null_and_missing_targets() {
        let mapping = mapping(&[("Name", Some("full_name")), ("Age", None)]);
        let out = project_table(&reference(), &source(), &mapping).unwrap();

        for name in ["Age", "City"] {
            let col = out.column(name).unwrap();
            assert_eq!(col.len(), 2);
            assert_eq!(col.null_count(), 2);
            assert_eq!(col.dtype(), &DataType::String);
        }
    }

    #[test]
    fn test_target_absent_from_frame_degrades_to_null() {
        let mapping = mapping(&[("Name", Some("gone"))]);
        let out = project_table(&reference(), &source(), &mapping).unwrap();
        assert_eq!(out.column("Name").unwrap().null_count(), 2);
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let mapping = mapping(&[("Zip", Some("notes"))]);
        let out = project_table(&reference(), &source(), &mapping).unwrap();
        assert_eq!(out.width(), 3);
        assert!(out.column("Zip").is_err());
    }

    #[test]
    fn test_same_target_for_two_columns() {
        let mapping = mapping(&[("Name", Some("full_name")), ("City", Some("full_name"))]);
        let out = project_table(&reference(), &source(), &mapping).unwrap();
        let name = out.column("Name").unwrap();
        let city = out.column("City").unwrap();
        for idx in 0..out.height() {
            assert_eq!(name.get(idx).unwrap(), city.get(idx).unwrap());
        }
    }
}
