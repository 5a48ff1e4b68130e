use crate::error::{Result, WellnusError};
use std::collections::HashMap;

pub const PARAMETER_DELIMITER: &str = "--";

/// Converts domain records to and from one-line `--key value` text.
pub trait Tokenizer<T> {
    /// One line per record, keys in schema order.
    fn tokenize(&self, records: &[T]) -> Vec<String>;

    /// Parse every line back into a record. The first bad line fails the call.
    fn detokenize(&self, lines: &[String]) -> Result<Vec<T>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Integer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub key: &'static str,
    pub required: bool,
    pub kind: FieldKind,
}

impl FieldSpec {
    pub const fn required(key: &'static str, kind: FieldKind) -> Self {
        Self {
            key,
            required: true,
            kind,
        }
    }
}

/// The exact set of keys a record line may carry.
#[derive(Debug, Clone, Copy)]
pub struct RecordSchema {
    fields: &'static [FieldSpec],
}

impl RecordSchema {
    pub const fn new(fields: &'static [FieldSpec]) -> Self {
        Self { fields }
    }

    fn field(&self, key: &str) -> Option<&'static FieldSpec> {
        self.fields.iter().find(|f| f.key == key)
    }

    /// Render values given in schema order. `None` skips an optional field.
    pub fn render(&self, values: &[Option<String>]) -> String {
        debug_assert_eq!(values.len(), self.fields.len());
        self.fields
            .iter()
            .zip(values)
            .filter_map(|(field, value)| {
                value
                    .as_ref()
                    .map(|v| format!("{}{} {}", PARAMETER_DELIMITER, field.key, v))
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Split a line and check it against the schema: no unknown or repeated
    /// keys, every required key present, integer fields parse.
    pub fn parse(&self, line: &str) -> Result<TokenFields> {
        let mut values = HashMap::new();
        for (key, value) in split_parameters(line)? {
            let field = self
                .field(key)
                .ok_or_else(|| corrupted(format!("unknown key '{}'", key)))?;
            if field.kind == FieldKind::Integer && value.parse::<i64>().is_err() {
                return Err(corrupted(format!(
                    "'{}' is not a whole number for key '{}'",
                    value, key
                )));
            }
            if values.insert(field.key, value.to_string()).is_some() {
                return Err(corrupted(format!("key '{}' appears twice", key)));
            }
        }
        if let Some(missing) = self
            .fields
            .iter()
            .find(|f| f.required && !values.contains_key(f.key))
        {
            return Err(corrupted(format!("missing key '{}'", missing.key)));
        }
        Ok(TokenFields { values })
    }
}

/// Schema-checked values of one record line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenFields {
    values: HashMap<&'static str, String>,
}

impl TokenFields {
    pub fn text(&self, key: &str) -> Result<&str> {
        self.values
            .get(key)
            .map(String::as_str)
            .ok_or_else(|| corrupted(format!("missing key '{}'", key)))
    }

    pub fn integer(&self, key: &str) -> Result<i64> {
        let raw = self.text(key)?;
        raw.parse::<i64>()
            .map_err(|_| corrupted(format!("'{}' is not a whole number for key '{}'", raw, key)))
    }
}

/// Split `--key value --key value` into trimmed pairs.
///
/// Text before the first delimiter and segments without a value are malformed.
pub fn split_parameters(line: &str) -> Result<Vec<(&str, &str)>> {
    let mut segments = line.trim().split(PARAMETER_DELIMITER);
    match segments.next() {
        Some(leading) if leading.trim().is_empty() => {}
        _ => return Err(corrupted("text before the first '--'")),
    }
    segments
        .map(|segment| {
            let segment = segment.trim();
            segment
                .split_once(char::is_whitespace)
                .map(|(key, value)| (key, value.trim()))
                .ok_or_else(|| corrupted(format!("no value for '{}'", segment)))
        })
        .collect()
}

pub fn corrupted(detail: impl Into<String>) -> WellnusError {
    WellnusError::Tokenizer(detail.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCHEMA: RecordSchema = RecordSchema::new(&[
        FieldSpec::required("name", FieldKind::Text),
        FieldSpec::required("size", FieldKind::Integer),
        FieldSpec {
            key: "note",
            required: false,
            kind: FieldKind::Text,
        },
    ]);

    #[test]
    fn test_split_parameters() {
        let pairs = split_parameters("--name a b  c --size 3").unwrap();
        assert_eq!(pairs, vec![("name", "a b  c"), ("size", "3")]);
    }

    #[test]
    fn test_split_rejects_leading_text() {
        assert!(split_parameters("name a --size 3").is_err());
    }

    #[test]
    fn test_split_rejects_segment_without_value() {
        assert!(split_parameters("--name a --size").is_err());
        assert!(split_parameters("--name a -- --size 3").is_err());
    }

    #[test]
    fn test_parse_with_optional_field() {
        let fields = SCHEMA.parse("--name box --size 2 --note fragile").unwrap();
        assert_eq!(fields.text("name").unwrap(), "box");
        assert_eq!(fields.integer("size").unwrap(), 2);
        assert_eq!(fields.text("note").unwrap(), "fragile");

        let fields = SCHEMA.parse("--size 2 --name box").unwrap();
        assert!(fields.text("note").is_err());
    }

    #[test]
    fn test_parse_rejects_schema_violations() {
        assert!(SCHEMA.parse("--name box").is_err());
        assert!(SCHEMA.parse("--name box --size 2 --colour red").is_err());
        assert!(SCHEMA.parse("--name box --size two").is_err());
        assert!(SCHEMA.parse("--name box --name bag --size 2").is_err());
        assert!(SCHEMA.parse("").is_err());
    }

    #[test]
    fn test_errors_mention_corruption() {
        let err = SCHEMA.parse("--name box").unwrap_err();
        assert!(err.to_string().contains("might be corrupted"));
        assert!(err.to_string().contains("missing key 'size'"));
    }

    #[test]
    fn test_render_skips_absent_optional() {
        let line = SCHEMA.render(&[Some("box".to_string()), Some("2".to_string()), None]);
        assert_eq!(line, "--name box --size 2");
    }
}
