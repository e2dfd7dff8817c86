use crate::dialect::Dialect;
use crate::errors::RenameError;
use crate::scan::rewrite_references;
use crate::table::{Row, Table};

/// Renames a primary key everywhere it is declared and referenced.
///
/// The row keyed `old` gets its first field replaced wholesale with `new`
/// (the declaration field is raw key text, never scanned as markup), and
/// every reference token `<old>` in every field of every row is rewritten
/// to `<new>`. All other content is byte-identical in the result.
///
/// Renaming a key to itself succeeds and returns an unchanged table.
/// The input table is never modified; errors leave nothing half-renamed.
///
/// # Errors
///
/// `KeyNotFound` if no row is keyed `old`, `EmptyKey` if `new` is empty,
/// `KeyCollision` if `new` already keys a different row.
pub fn rename(
    table: &Table,
    old: &str,
    new: &str,
    dialect: &Dialect,
) -> Result<Table, RenameError> {
    let target = table
        .rows
        .iter()
        .position(|row| row.key() == old)
        .ok_or_else(|| RenameError::KeyNotFound {
            key: old.to_string(),
        })?;

    if old == new {
        return Ok(table.clone());
    }
    if new.is_empty() {
        return Err(RenameError::EmptyKey);
    }
    if table
        .rows
        .iter()
        .enumerate()
        .any(|(i, row)| i != target && row.key() == new)
    {
        return Err(RenameError::KeyCollision {
            key: new.to_string(),
        });
    }

    let rows = table
        .rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let fields = row
                .fields
                .iter()
                .enumerate()
                .map(|(j, field)| {
                    if i == target && j == 0 {
                        new.to_string()
                    } else {
                        rewrite_references(field, old, new, dialect)
                    }
                })
                .collect();
            Row { fields }
        })
        .collect();

    Ok(Table {
        header: table.header.clone(),
        rows,
        trailing_newline: table.trailing_newline,
    })
}
