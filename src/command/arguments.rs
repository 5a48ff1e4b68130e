use crate::error::{Result, WellnusError};
use std::collections::BTreeMap;

/// A parsed input line: argument name to payload.
///
/// The line's leading keyword is stored as an argument like any other, with
/// the text that followed it as its payload. `hb add --name Read` becomes
/// `{hb: "add", name: "Read"}`, `next` becomes `{next: ""}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgumentMap {
    main_keyword: String,
    arguments: BTreeMap<String, String>,
}

impl ArgumentMap {
    pub fn new(main_keyword: impl Into<String>, payload: impl Into<String>) -> Self {
        let main_keyword = main_keyword.into();
        let mut arguments = BTreeMap::new();
        arguments.insert(main_keyword.clone(), payload.into());
        Self {
            main_keyword,
            arguments,
        }
    }

    /// Add an argument. Keys must be unique.
    pub fn insert(&mut self, key: impl Into<String>, payload: impl Into<String>) -> Result<()> {
        let key = key.into();
        if self.arguments.contains_key(&key) {
            return Err(WellnusError::BadCommand(format!(
                "Duplicate argument '--{}' given",
                key
            )));
        }
        self.arguments.insert(key, payload.into());
        Ok(())
    }

    pub fn main_keyword(&self) -> &str {
        &self.main_keyword
    }

    pub fn main_payload(&self) -> &str {
        self.get(&self.main_keyword).unwrap_or_default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.arguments.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.arguments.contains_key(key)
    }

    /// Number of arguments, the main keyword included.
    pub fn len(&self) -> usize {
        self.arguments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arguments.is_empty()
    }
}
