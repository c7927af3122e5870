// Message filter: keep rows for one CAN identifier

use crate::core::format::RowTable;

/// Rows whose trimmed, uppercased identifier equals `target_id`, in file order.
pub fn filter_by_id(table: &RowTable, target_id: &str) -> RowTable {
    let target = target_id.trim().to_uppercase();

    RowTable {
        dialect: table.dialect,
        rows: table
            .rows
            .iter()
            .filter(|row| row.can_id().trim().to_uppercase() == target)
            .cloned()
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::constants::Dialect;
    use crate::core::format::RawRow;

    fn row(seq: &str, id: &str) -> RawRow {
        RawRow::new([
            "1".to_string(),
            seq.to_string(),
            "00:01.000".to_string(),
            "Rx".to_string(),
            id.to_string(),
            "2".to_string(),
            "00 10".to_string(),
            String::new(),
        ])
    }

    fn table(rows: Vec<RawRow>) -> RowTable {
        RowTable {
            dialect: Dialect::Comma,
            rows,
        }
    }

    #[test]
    fn test_normalizes_case_and_whitespace() {
        let t = table(vec![
            row("1", " 295 "),
            row("2", "1a0"),
            row("3", "295"),
            row("4", "2950"),
        ]);
        let filtered = filter_by_id(&t, "295");
        let seqs: Vec<&str> = filtered.rows.iter().map(|r| r.fields[1].as_str()).collect();
        assert_eq!(seqs, vec!["1", "3"]);

        let hex = filter_by_id(&t, " 1A0");
        assert_eq!(hex.len(), 1);
        assert_eq!(hex.rows[0].fields[1], "2");
    }

    #[test]
    fn test_idempotent() {
        let t = table(vec![row("1", "295"), row("2", "100"), row("3", " 295")]);
        let once = filter_by_id(&t, "295");
        let twice = filter_by_id(&once, "295");
        assert_eq!(once, twice);
    }

    #[test]
    fn test_no_match_is_empty() {
        let t = table(vec![row("1", "100")]);
        assert!(filter_by_id(&t, "295").is_empty());
    }
}
