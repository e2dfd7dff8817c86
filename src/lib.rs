mod config;
mod dialect;
mod errors;
mod rename;
mod scan;
mod table;

pub use config::{DialectConfig, DialectRegistry};
pub use dialect::Dialect;
pub use errors::{FormatError, RenameError};
pub use scan::{render, segments, Segment};
pub use table::{Row, Table};

/// Parses keyed-CSV document text into a table.
pub fn parse(text: &str, dialect: &Dialect) -> Result<Table, FormatError> {
    Table::parse(text, dialect)
}

/// Serializes a table back to document text. Byte-exact inverse of `parse`.
pub fn serialize(table: &Table, dialect: &Dialect) -> String {
    table.to_text(dialect)
}

/// Renames a primary key across its declaration and every reference,
/// returning a new table.
pub use rename::rename;
