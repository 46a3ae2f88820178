//! Natural-language request sent to the mapping oracle.

use colmap_model::ColumnList;

/// Builds the oracle request for mapping `to_map` columns onto `reference`.
///
/// Both lists are embedded as literal sequences. The oracle is asked for a
/// single literal dictionary keyed by reference column, with `None` for
/// columns that have no counterpart, and nothing else.
pub fn build_mapping_prompt(reference: &ColumnList, to_map: &ColumnList) -> String {
    format!(
        "You are matching spreadsheet column headers between two tables.\n\
         \n\
         Reference columns (X1): {reference}\n\
         Columns to map (X2): {to_map}\n\
         \n\
         For each X1 column, choose the X2 column whose name is most \
         semantically similar. Judge by the meaning of the names only; do not \
         match columns by their position or order in the lists. If no X2 \
         column is a reasonable match, use None.\n\
         \n\
         Reply with a single Python dictionary literal whose keys are the X1 \
         column names and whose values are X2 column names (as strings) or \
         None. Every X1 column must appear exactly once. Use only string \
         literals and None; do not include code, comments, or any explanation.",
        reference = reference.to_literal(),
        to_map = to_map.to_literal(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns(names: &[&str]) -> ColumnList {
        ColumnList::new(names.iter().map(|s| (*s).to_string()).collect()).unwrap()
    }

    #[test]
    fn embeds_both_column_lists() {
        let prompt = build_mapping_prompt(
            &columns(&["Name", "Age", "City"]),
            &columns(&["full_name", "years", "location", "notes"]),
        );

        assert!(prompt.contains("X1): ['Name', 'Age', 'City']"));
        assert!(prompt.contains("X2): ['full_name', 'years', 'location', 'notes']"));
        assert!(prompt.contains("position or order"));
        assert!(prompt.contains("None"));
    }

    #[test]
    fn quotes_awkward_names() {
        let prompt = build_mapping_prompt(&columns(&["Owner's name"]), &columns(&[]));
        assert!(prompt.contains(r"['Owner\'s name']"));
        assert!(prompt.contains("X2): []"));
    }
}
