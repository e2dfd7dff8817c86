use crate::config::DialectConfig;

/// The reserved characters of a keyed-CSV dialect.
///
/// A dialect is passed explicitly into parse, serialize, and rename rather
/// than living in a global, so alternate delimiters can be substituted
/// without touching the core logic. The default is the documented format:
/// comma fields, newline rows, `<`/`>` reference markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dialect {
    field_delimiter: char,
    row_delimiter: char,
    reference_open: char,
    reference_close: char,
}

impl Default for Dialect {
    fn default() -> Self {
        Dialect {
            field_delimiter: ',',
            row_delimiter: '\n',
            reference_open: '<',
            reference_close: '>',
        }
    }
}

impl Dialect {
    /// Creates a dialect from four reserved characters.
    ///
    /// # Errors
    ///
    /// Returns an error if any two of the characters coincide.
    pub fn new(
        field_delimiter: char,
        row_delimiter: char,
        reference_open: char,
        reference_close: char,
    ) -> Result<Self, String> {
        let chars = [
            field_delimiter,
            row_delimiter,
            reference_open,
            reference_close,
        ];
        for (i, a) in chars.iter().enumerate() {
            for b in &chars[i + 1..] {
                if a == b {
                    return Err(format!(
                        "dialect characters must be distinct, '{}' appears twice",
                        a.escape_default()
                    ));
                }
            }
        }
        Ok(Dialect {
            field_delimiter,
            row_delimiter,
            reference_open,
            reference_close,
        })
    }

    /// Creates a dialect from a deserialized config entry.
    ///
    /// # Errors
    ///
    /// Returns an error if any delimiter string is not exactly one
    /// character, or if the characters are not distinct.
    pub fn from_config(config: &DialectConfig) -> Result<Self, String> {
        Self::new(
            single_char("field_delimiter", &config.field_delimiter)?,
            single_char("row_delimiter", &config.row_delimiter)?,
            single_char("reference_open", &config.reference_open)?,
            single_char("reference_close", &config.reference_close)?,
        )
    }

    pub fn field_delimiter(&self) -> char {
        self.field_delimiter
    }

    pub fn row_delimiter(&self) -> char {
        self.row_delimiter
    }

    pub fn reference_open(&self) -> char {
        self.reference_open
    }

    pub fn reference_close(&self) -> char {
        self.reference_close
    }

    /// Renders a key as a reference token, e.g. `abc` -> `<abc>`.
    pub fn reference_token(&self, key: &str) -> String {
        let mut token = String::with_capacity(key.len() + 2);
        token.push(self.reference_open);
        token.push_str(key);
        token.push(self.reference_close);
        token
    }
}

fn single_char(name: &str, value: &str) -> Result<char, String> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(format!(
            "{} must be exactly one character, got {:?}",
            name, value
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_dialect() {
        let dialect = Dialect::default();
        assert_eq!(dialect.field_delimiter(), ',');
        assert_eq!(dialect.row_delimiter(), '\n');
        assert_eq!(dialect.reference_open(), '<');
        assert_eq!(dialect.reference_close(), '>');
    }

    #[test]
    fn test_duplicate_characters_rejected() {
        assert!(Dialect::new(',', '\n', '<', '<').is_err());
        assert!(Dialect::new(',', ',', '<', '>').is_err());
    }

    #[test]
    fn test_from_config() {
        let config = DialectConfig {
            field_delimiter: "\t".to_string(),
            row_delimiter: "\n".to_string(),
            reference_open: "<".to_string(),
            reference_close: ">".to_string(),
        };
        let dialect = Dialect::from_config(&config).unwrap();
        assert_eq!(dialect.field_delimiter(), '\t');
    }

    #[test]
    fn test_from_config_multichar_rejected() {
        let config = DialectConfig {
            field_delimiter: ",,".to_string(),
            row_delimiter: "\n".to_string(),
            reference_open: "<".to_string(),
            reference_close: ">".to_string(),
        };
        let err = Dialect::from_config(&config).unwrap_err();
        assert!(err.contains("field_delimiter"));
    }

    #[test]
    fn test_reference_token() {
        let dialect = Dialect::default();
        assert_eq!(dialect.reference_token("abc"), "<abc>");
        assert_eq!(dialect.reference_token(""), "<>");
    }
}
