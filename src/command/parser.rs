use super::ArgumentMap;
use crate::error::{Result, WellnusError};

pub const ARGUMENT_DELIMITER: &str = "--";

/// Parse a raw input line into an [`ArgumentMap`].
///
/// The line is split on `--`. The first segment is `keyword [payload]`, every
/// further segment is `argument [payload]`. Keys are lower-cased, payloads are
/// trimmed and may be empty.
pub fn parse(line: &str) -> Result<ArgumentMap> {
    let line = line.trim();
    if line.is_empty() {
        return Err(WellnusError::bad_command("Command is empty"));
    }

    let mut segments = line.split(ARGUMENT_DELIMITER);
    let main = segments.next().unwrap_or_default().trim();
    if main.is_empty() {
        return Err(WellnusError::bad_command(
            "A command must start with a keyword, not '--'",
        ));
    }

    let (keyword, payload) = split_key_payload(main);
    let mut arguments = ArgumentMap::new(keyword, payload);
    for segment in segments {
        let segment = segment.trim();
        if segment.is_empty() {
            return Err(WellnusError::bad_command(
                "Empty argument found, every '--' must be followed by a name",
            ));
        }
        let (key, payload) = split_key_payload(segment);
        arguments.insert(key, payload)?;
    }
    Ok(arguments)
}

fn split_key_payload(segment: &str) -> (String, String) {
    match segment.split_once(char::is_whitespace) {
        Some((key, payload)) => (key.to_lowercase(), payload.trim().to_string()),
        None => (segment.to_lowercase(), String::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bare_keyword() {
        let map = parse("next").unwrap();
        assert_eq!(map.main_keyword(), "next");
        assert_eq!(map.main_payload(), "");
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_parse_prefixed_command_with_arguments() {
        let map = parse("  hb add --name Read 10 pages  ").unwrap();
        assert_eq!(map.main_keyword(), "hb");
        assert_eq!(map.main_payload(), "add");
        assert_eq!(map.get("name"), Some("Read 10 pages"));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_parse_lowercases_keys_only() {
        let map = parse("HB Add --NAME Drink Water").unwrap();
        assert_eq!(map.main_keyword(), "hb");
        assert_eq!(map.main_payload(), "Add");
        assert_eq!(map.get("name"), Some("Drink Water"));
    }

    #[test]
    fn test_parse_argument_without_payload() {
        let map = parse("hb update --id 1 --by").unwrap();
        assert_eq!(map.get("by"), Some(""));
    }

    #[test]
    fn test_parse_rejects_empty_line() {
        assert!(parse("   ").unwrap_err().is_bad_command());
    }

    #[test]
    fn test_parse_rejects_leading_delimiter() {
        assert!(parse("--name Read").unwrap_err().is_bad_command());
    }

    #[test]
    fn test_parse_rejects_empty_argument() {
        assert!(parse("hb add -- --name Read").unwrap_err().is_bad_command());
        assert!(parse("hb add --").unwrap_err().is_bad_command());
    }

    #[test]
    fn test_parse_rejects_duplicate_argument() {
        let err = parse("hb update --id 1 --id 2").unwrap_err();
        assert!(err.to_string().contains("Duplicate"));
    }
}
