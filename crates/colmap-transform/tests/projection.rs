//! Property and scenario tests for table projection.


use polars::prelude::*;
use proptest::prelude::*;

use colmap_model::{ColumnList, ValidatedMapping};
use colmap_transform::{cell_to_text, project_table};

fn test_df(columns: Vec<(&str, Vec<Option<&str>>)>) -> DataFrame {
    let cols: Vec<Column> = columns
        .into_iter()
        .map(|(name, values)| Series::new(name.into(), values).into_column())
        .collect();
    DataFrame::new(cols).unwrap()
}

fn list(names: &[&str]) -> ColumnList {
    ColumnList::new(names.iter().map(|s| (*s).to_string()).collect()).unwrap()
}

fn mapping(pairs: &[(&str, Option<&str>)]) -> ValidatedMapping {
    ValidatedMapping::from_entries(
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), v.map(str::to_string)))
            .collect(),
    )
}

#[test]
fn test_rejected_mapping_yields_null_columns() {
    let source = test_df(vec![
        ("full_name", vec![Some("Ada"), Some("Alan"), None]),
        ("years", vec![Some("36"), Some("41"), Some("12")]),
        ("location", vec![Some("London"), None, Some("Paris")]),
        ("notes", vec![None, None, None]),
    ]);
    let mapping = mapping(&[("Name", Some("full_name")), ("Age", None), ("City", None)]);

    let out = project_table(&list(&["Name", "Age", "City"]), &source, &mapping).unwrap();

    assert_eq!(out.height(), 3);
    assert_eq!(out.column("Age").unwrap().null_count(), 3);
    assert_eq!(out.column("City").unwrap().null_count(), 3);
    let name = out.column("Name").unwrap();
    assert_eq!(name.get(0).unwrap(), AnyValue::String("Ada"));
    assert_eq!(name.get(2).unwrap(), AnyValue::Null);
}

#[test]
fn test_projection_is_repeatable() {
    let source = df! {
        "a" => &[1.5f64, 2.0, -0.25],
        "b" => &[true, false, true],
    }
    .unwrap();
    let reference = list(&["X", "Y", "Z"]);
    let mapping = mapping(&[("X", Some("a")), ("Y", Some("b"))]);

    let first = project_table(&reference, &source, &mapping).unwrap();
    let second = project_table(&reference, &source, &mapping).unwrap();

    assert!(first.equals_missing(&second));
    assert_eq!(first.column("X").unwrap().get(1).unwrap(), AnyValue::String("2"));
    assert_eq!(first.column("Y").unwrap().get(1).unwrap(), AnyValue::String("false"));
}

#[test]
fn test_empty_source_keeps_layout() {
    let source = test_df(vec![("a", vec![])]);
    let out = project_table(&list(&["X", "Y"]), &source, &mapping(&[("X", Some("a"))])).unwrap();

    assert_eq!(out.height(), 0);
    assert_eq!(out.width(), 2);
}

proptest! {
    #[test]
    fn mapped_columns_match_source_cells(
        ints in prop::collection::vec(prop::option::of(any::<i64>()), 0..40),
        flip in any::<bool>(),
    ) {
        let height = ints.len();
        let words: Vec<Option<String>> = (0..height)
            .map(|i| (i % 3 != 0).then(|| format!("w{i}")))
            .collect();
        let source = DataFrame::new(vec![
            Series::new("n".into(), ints.clone()).into_column(),
            Series::new("s".into(), words.clone()).into_column(),
        ])
        .unwrap();
        let (first, second) = if flip { ("s", "n") } else { ("n", "s") };
        let mapping = mapping(&[("A", Some(first)), ("B", Some(second)), ("C", None)]);

        let out = project_table(&list(&["A", "B", "C"]), &source, &mapping).unwrap();

        prop_assert_eq!(out.height(), height);
        prop_assert_eq!(out.column("C").unwrap().null_count(), height);
        for (reference, target) in [("A", first), ("B", second)] {
            let projected = out.column(reference).unwrap();
            let original = source.column(target).unwrap();
            for idx in 0..height {
                let expected = cell_to_text(original.get(idx).unwrap());
                let actual = cell_to_text(projected.get(idx).unwrap());
                prop_assert_eq!(actual, expected);
            }
        }
    }
}
