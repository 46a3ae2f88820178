//! Canonical text form of cell values.

use polars::prelude::*;

/// Converts a cell to its canonical text; null stays `None`.
///
/// Integers print in decimal, floats in their shortest round-trip form
/// (`1.0` becomes `1`), and booleans as `true`/`false`.
pub fn cell_to_text(value: AnyValue<'_>) -> Option<String> {
    let text = match value {
        AnyValue::Null => return None,
        AnyValue::Int8(v) => v.to_string(),
        AnyValue::Int16(v) => v.to_string(),
        AnyValue::Int32(v) => v.to_string(),
        AnyValue::Int64(v) => v.to_string(),
        AnyValue::UInt8(v) => v.to_string(),
        AnyValue::UInt16(v) => v.to_string(),
        AnyValue::UInt32(v) => v.to_string(),
        AnyValue::UInt64(v) => v.to_string(),
        AnyValue::Float32(v) => v.to_string(),
        AnyValue::Float64(v) => v.to_string(),
        AnyValue::String(s) => s.to_string(),
        AnyValue::StringOwned(s) => s.to_string(),
        AnyValue::Boolean(b) => b.to_string(),
        // Other types use Display without surrounding quotes
        other => {
            let s = other.to_string();
            match s.strip_prefix('"').and_then(|rest| rest.strip_suffix('"')) {
                Some(inner) => inner.to_string(),
                None => s,
            }
        }
    };
    Some(text)
}

/// Renders a whole column as nullable text under a new name.
pub fn column_to_text(column: &Column, name: &str) -> PolarsResult<Column> {
    if column.dtype() == &DataType::String {
        let mut out = column.clone();
        out.rename(name.into());
        return Ok(out);
    }

    let mut values: Vec<Option<String>> = Vec::with_capacity(column.len());
    for idx in 0..column.len() {
        values.push(cell_to_text(column.get(idx)?));
    }
    Ok(Series::new(name.into(), values).into_column())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbers() {
        assert_eq!(cell_to_text(AnyValue::Int64(42)).as_deref(), Some("42"));
        assert_eq!(cell_to_text(AnyValue::Int32(-7)).as_deref(), Some("-7"));
        assert_eq!(cell_to_text(AnyValue::Float64(1.0)).as_deref(), Some("1"));
        assert_eq!(cell_to_text(AnyValue::Float64(2.5)).as_deref(), Some("2.5"));
        assert_eq!(cell_to_text(AnyValue::Float64(100.0)).as_deref(), Some("100"));
        assert_eq!(cell_to_text(AnyValue::Float32(0.1)).as_deref(), Some("0.1"));
    }

    #[test]
    fn test_strings_bools_and_null() {
        assert_eq!(cell_to_text(AnyValue::String(" a ")).as_deref(), Some(" a "));
        assert_eq!(cell_to_text(AnyValue::String("")).as_deref(), Some(""));
        assert_eq!(cell_to_text(AnyValue::Boolean(true)).as_deref(), Some("true"));
        assert_eq!(cell_to_text(AnyValue::Null), None);
    }

    #[test]
    fn test_column_to_text_keeps_nulls() {
        let column = Series::new("n".into(), [Some(1i64), None, Some(3)]).into_column();
        let text = column_to_text(&column, "Age").unwrap();

        assert_eq!(text.name().as_str(), "Age");
        assert_eq!(text.dtype(), &DataType::String);
        assert_eq!(text.null_count(), 1);
        assert_eq!(text.get(2).unwrap(), AnyValue::String("3"));
    }
}
