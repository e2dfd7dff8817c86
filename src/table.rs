use std::collections::HashSet;

use crate::dialect::Dialect;
use crate::errors::FormatError;
use crate::scan::{segments, Segment};

/// One data row: an ordered sequence of verbatim field strings.
///
/// The first field is the row's primary key; there is no separate key
/// storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub fields: Vec<String>,
}

impl Row {
    /// The row's primary key, i.e. its first field.
    pub fn key(&self) -> &str {
        &self.fields[0]
    }
}

/// A parsed keyed-CSV document: header, ordered data rows, and whether
/// the source text ended with a row delimiter.
///
/// A table is never mutated after construction; `rename` returns a new
/// table. Serialization reproduces the source text byte-for-byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub header: Vec<String>,
    pub rows: Vec<Row>,
    pub(crate) trailing_newline: bool,
}

impl Table {
    /// Parses a whole document.
    ///
    /// Line 1 is the header; every later line is a data row whose field
    /// count must match the header's. Fields are stored verbatim, with no
    /// trimming and no interpretation of reference markup. A final row
    /// delimiter is remembered and re-emitted by `to_text`, not turned
    /// into a spurious empty row.
    ///
    /// # Errors
    ///
    /// `FieldCountMismatch` on an arity violation, `EmptyPrimaryKey` if a
    /// data row's first field is empty, `DuplicatePrimaryKey` if two rows
    /// share a key. All errors carry the 1-based line number.
    pub fn parse(text: &str, dialect: &Dialect) -> Result<Table, FormatError> {
        let mut lines: Vec<&str> = text.split(dialect.row_delimiter()).collect();
        let trailing_newline = lines.len() > 1 && lines.last().is_some_and(|l| l.is_empty());
        if trailing_newline {
            lines.pop();
        }

        let header: Vec<String> = lines[0]
            .split(dialect.field_delimiter())
            .map(str::to_string)
            .collect();

        let mut rows = Vec::with_capacity(lines.len() - 1);
        let mut seen: HashSet<String> = HashSet::new();
        for (i, line) in lines[1..].iter().enumerate() {
            let lineno = i + 2;
            let fields: Vec<String> = line
                .split(dialect.field_delimiter())
                .map(str::to_string)
                .collect();
            if fields.len() != header.len() {
                return Err(FormatError::FieldCountMismatch {
                    expected: header.len(),
                    actual: fields.len(),
                    line: lineno,
                });
            }
            if fields[0].is_empty() {
                return Err(FormatError::EmptyPrimaryKey { line: lineno });
            }
            if !seen.insert(fields[0].clone()) {
                return Err(FormatError::DuplicatePrimaryKey {
                    key: fields[0].clone(),
                    line: lineno,
                });
            }
            rows.push(Row { fields });
        }

        Ok(Table {
            header,
            rows,
            trailing_newline,
        })
    }

    /// Serializes the table back to document text.
    ///
    /// Exact inverse of `parse`: fields joined by the field delimiter,
    /// rows by the row delimiter, with the final row delimiter restored
    /// when the source had one. Row order is preserved.
    pub fn to_text(&self, dialect: &Dialect) -> String {
        let delim = dialect.field_delimiter().to_string();
        let mut lines = Vec::with_capacity(self.rows.len() + 1);
        lines.push(self.header.join(&delim));
        for row in &self.rows {
            lines.push(row.fields.join(&delim));
        }
        let mut text = lines.join(&dialect.row_delimiter().to_string());
        if self.trailing_newline {
            text.push(dialect.row_delimiter());
        }
        text
    }

    /// Iterates over the primary keys in row order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(Row::key)
    }

    /// Checks that every reference token names an existing primary key.
    ///
    /// `parse` deliberately treats reference markup as opaque; this is the
    /// opt-in integrity check for producers who want dangling references
    /// rejected.
    ///
    /// # Errors
    ///
    /// `UnknownReference` with the first dangling key and its line.
    pub fn validate_references(&self, dialect: &Dialect) -> Result<(), FormatError> {
        let keys: HashSet<&str> = self.keys().collect();
        for (i, row) in self.rows.iter().enumerate() {
            for field in &row.fields {
                for segment in segments(field, dialect) {
                    if let Segment::Reference(key) = segment {
                        if !keys.contains(key) {
                            return Err(FormatError::UnknownReference {
                                key: key.to_string(),
                                line: i + 2,
                            });
                        }
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keyed() -> Dialect {
        Dialect::default()
    }

    #[test]
    fn test_parse_simple_table() {
        let table = Table::parse("ID,name\n1,alpha\n2,beta", &keyed()).unwrap();
        assert_eq!(table.header, vec!["ID", "name"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0].key(), "1");
        assert_eq!(table.rows[1].fields, vec!["2", "beta"]);
    }

    #[test]
    fn test_parse_preserves_whitespace() {
        let table = Table::parse("ID,title 1,title2 \n , abc ,<1> ", &keyed()).unwrap();
        assert_eq!(table.header, vec!["ID", "title 1", "title2 "]);
        assert_eq!(table.rows[0].key(), " ");
        assert_eq!(table.rows[0].fields[1], " abc ");
        assert_eq!(table.rows[0].fields[2], "<1> ");
    }

    #[test]
    fn test_parse_header_only() {
        let table = Table::parse("ID,name", &keyed()).unwrap();
        assert!(table.rows.is_empty());
    }

    #[test]
    fn test_parse_empty_header_column_allowed() {
        let table = Table::parse("ID,,name\n1,x,y", &keyed()).unwrap();
        assert_eq!(table.header, vec!["ID", "", "name"]);
    }

    #[test]
    fn test_field_count_mismatch() {
        let err = Table::parse("a,b,c\n1,two", &keyed()).unwrap_err();
        assert_eq!(
            err,
            FormatError::FieldCountMismatch {
                expected: 3,
                actual: 2,
                line: 2,
            }
        );
    }

    #[test]
    fn test_empty_primary_key_rejected() {
        let err = Table::parse("a,b\n,x", &keyed()).unwrap_err();
        assert_eq!(err, FormatError::EmptyPrimaryKey { line: 2 });
    }

    #[test]
    fn test_whitespace_key_is_legal() {
        let table = Table::parse("a,b\n ,x", &keyed()).unwrap();
        assert_eq!(table.rows[0].key(), " ");
    }

    #[test]
    fn test_duplicate_primary_key_rejected() {
        let err = Table::parse("a,b\n1,x\n2,y\n1,z", &keyed()).unwrap_err();
        assert_eq!(
            err,
            FormatError::DuplicatePrimaryKey {
                key: "1".to_string(),
                line: 4,
            }
        );
    }

    #[test]
    fn test_round_trip_without_trailing_newline() {
        let text = "ID,name\n1,alpha\n2,beta";
        let table = Table::parse(text, &keyed()).unwrap();
        assert_eq!(table.to_text(&keyed()), text);
    }

    #[test]
    fn test_round_trip_with_trailing_newline() {
        let text = "ID,name\n1,alpha\n2,beta\n";
        let table = Table::parse(text, &keyed()).unwrap();
        assert_eq!(table.to_text(&keyed()), text);
    }

    #[test]
    fn test_round_trip_header_only_with_newline() {
        let text = "ID,name\n";
        let table = Table::parse(text, &keyed()).unwrap();
        assert!(table.rows.is_empty());
        assert_eq!(table.to_text(&keyed()), text);
    }

    #[test]
    fn test_interior_empty_line_is_structural_error() {
        // An empty line mid-document is a one-field row, not a skipped line
        let err = Table::parse("a,b\n1,x\n\n2,y", &keyed()).unwrap_err();
        assert_eq!(
            err,
            FormatError::FieldCountMismatch {
                expected: 2,
                actual: 1,
                line: 3,
            }
        );
    }

    #[test]
    fn test_keys_iterator() {
        let table = Table::parse("ID,name\n1,alpha\n2,beta", &keyed()).unwrap();
        assert_eq!(table.keys().collect::<Vec<_>>(), vec!["1", "2"]);
    }

    #[test]
    fn test_tsv_dialect_round_trip() {
        let dialect = Dialect::new('\t', '\n', '<', '>').unwrap();
        let text = "ID\tname\n1\tsee <2>\n2\tbeta";
        let table = Table::parse(text, &dialect).unwrap();
        assert_eq!(table.rows[0].fields[1], "see <2>");
        assert_eq!(table.to_text(&dialect), text);
    }

    #[test]
    fn test_validate_references_accepts_resolvable() {
        let table = Table::parse("ID,note\n1,see <2>\n2,see <1> and <2>", &keyed()).unwrap();
        assert!(table.validate_references(&keyed()).is_ok());
    }

    #[test]
    fn test_validate_references_rejects_dangling() {
        let table = Table::parse("ID,note\n1,see <9>\n2,fine", &keyed()).unwrap();
        let err = table.validate_references(&keyed()).unwrap_err();
        assert_eq!(
            err,
            FormatError::UnknownReference {
                key: "9".to_string(),
                line: 2,
            }
        );
    }
}
