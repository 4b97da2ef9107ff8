use crate::model::Record;

/// Lay one combination out in `output_columns` order. Each cell comes from
/// the first record in the combination that has the column; otherwise the
/// cell is empty.
pub fn project_row<'r>(combination: &[&'r Record], output_columns: &[String]) -> Vec<&'r [u8]> {
    output_columns
        .iter()
        .map(|col| {
            combination
                .iter()
                .find_map(|rec| rec.get(col))
                .unwrap_or_default()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(pairs: &[(&str, &str)]) -> Record {
        pairs.iter().map(|(k, v)| (*k, *v)).collect()
    }

    fn cols(names: &[&str]) -> Vec<String> {
        names.iter().map(|c| c.to_string()).collect()
    }

    fn text<'r>(row: Vec<&'r [u8]>) -> Vec<&'r str> {
        row.into_iter().map(|c| std::str::from_utf8(c).unwrap()).collect()
    }

    #[test]
    fn fills_from_each_record() {
        let a = rec(&[("id", "1"), ("name", "alice")]);
        let b = rec(&[("id", "1"), ("age", "30")]);
        let row = text(project_row(&[&a, &b], &cols(&["id", "name", "age"])));
        assert_eq!(row, vec!["1", "alice", "30"]);
    }

    #[test]
    fn first_record_wins_on_shared_column() {
        let a = rec(&[("id", "1"), ("note", "from a")]);
        let b = rec(&[("id", "1"), ("note", "from b")]);
        let row = text(project_row(&[&a, &b], &cols(&["id", "note"])));
        assert_eq!(row, vec!["1", "from a"]);
    }

    #[test]
    fn empty_value_is_still_a_value() {
        let a = rec(&[("id", "1"), ("note", "")]);
        let b = rec(&[("id", "1"), ("note", "from b")]);
        let row = text(project_row(&[&a, &b], &cols(&["id", "note"])));
        assert_eq!(row, vec!["1", ""]);
    }

    #[test]
    fn missing_column_is_blank() {
        let a = rec(&[("id", "2"), ("name", "bob")]);
        let row = text(project_row(&[&a], &cols(&["id", "name", "age"])));
        assert_eq!(row, vec!["2", "bob", ""]);
    }

    #[test]
    fn empty_combination_is_all_blank() {
        let row = text(project_row(&[], &cols(&["id", "name"])));
        assert_eq!(row, vec!["", ""]);
    }

    #[test]
    fn cell_bytes_pass_through() {
        let a = rec(&[("id", "1")]);
        let b: Record = [("name", &b"Jos\xe9"[..])].into_iter().collect();
        let row = project_row(&[&a, &b], &cols(&["id", "name"]));
        assert_eq!(row, vec![&b"1"[..], &b"Jos\xe9"[..]]);
    }
}
