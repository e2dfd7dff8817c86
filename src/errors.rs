use std::fmt;

/// Errors that can occur while parsing or validating a keyed-CSV document.
///
/// Line numbers are 1-based over the whole document, so the header is
/// line 1 and the first data row is line 2.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// A data row's field count differs from the header's
    FieldCountMismatch {
        expected: usize,
        actual: usize,
        line: usize,
    },
    /// A data row's first field is empty
    EmptyPrimaryKey { line: usize },
    /// Two rows share the same primary key
    DuplicatePrimaryKey { key: String, line: usize },
    /// A reference token points at a key no row declares
    UnknownReference { key: String, line: usize },
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let use_color = should_use_color();

        match self {
            FormatError::FieldCountMismatch {
                expected,
                actual,
                line,
            } => {
                error_line(
                    f,
                    use_color,
                    &format!(
                        "line {}: expected {} fields but found {}",
                        line, expected, actual
                    ),
                )?;
                hint_line(
                    f,
                    use_color,
                    "every data row must match the header's field count",
                )
            }
            FormatError::EmptyPrimaryKey { line } => {
                error_line(f, use_color, &format!("line {}: empty primary key", line))?;
                hint_line(
                    f,
                    use_color,
                    "the first field of a data row is its key and must be non-empty",
                )
            }
            FormatError::DuplicatePrimaryKey { key, line } => {
                error_line(
                    f,
                    use_color,
                    &format!("line {}: duplicate primary key '{}'", line, key),
                )?;
                hint_line(f, use_color, "primary keys must be unique across rows")
            }
            FormatError::UnknownReference { key, line } => {
                error_line(
                    f,
                    use_color,
                    &format!("line {}: reference to unknown key '{}'", line, key),
                )?;
                hint_line(f, use_color, "every <key> must name some row's primary key")
            }
        }
    }
}

impl std::error::Error for FormatError {}

/// Errors that can occur during a primary-key rename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenameError {
    /// No row is keyed by the requested old key
    KeyNotFound { key: String },
    /// The new key already keys a different row
    KeyCollision { key: String },
    /// The new key is the empty string
    EmptyKey,
}

impl fmt::Display for RenameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let use_color = should_use_color();

        match self {
            RenameError::KeyNotFound { key } => {
                error_line(f, use_color, &format!("primary key '{}' not found", key))
            }
            RenameError::KeyCollision { key } => {
                error_line(
                    f,
                    use_color,
                    &format!("primary key '{}' is already used by another row", key),
                )?;
                hint_line(f, use_color, "pick a key no other row declares")
            }
            RenameError::EmptyKey => {
                error_line(f, use_color, "new primary key must be non-empty")
            }
        }
    }
}

impl std::error::Error for RenameError {}

fn error_line(f: &mut fmt::Formatter<'_>, use_color: bool, msg: &str) -> fmt::Result {
    if use_color {
        write!(f, "\x1b[1;31merror:\x1b[0m {}", msg)
    } else {
        write!(f, "error: {}", msg)
    }
}

fn hint_line(f: &mut fmt::Formatter<'_>, use_color: bool, msg: &str) -> fmt::Result {
    if use_color {
        write!(f, "\n\x1b[1;36mhint:\x1b[0m {}", msg)
    } else {
        write!(f, "\nhint: {}", msg)
    }
}

/// Check if colored output should be used
fn should_use_color() -> bool {
    // Respect NO_COLOR environment variable
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    use std::io::IsTerminal;
    std::io::stderr().is_terminal()
}
