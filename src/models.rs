//! Data models for menu descriptors and index entries.
//!
//! This module contains the typed input read from each descriptor file
//! and the entries written to the autocomplete index.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Internal entry number of a menu option.
///
/// Descriptor files carry it either as a JSON string or as a JSON integer.
/// The original representation is kept so it is written back verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntryNumber {
    Integer(i64),
    Text(String),
}

impl EntryNumber {
    /// Numeric value, if the entry number is an integer or an integer-like string.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            EntryNumber::Integer(n) => Some(*n),
            EntryNumber::Text(s) => s.trim().parse().ok(),
        }
    }

    // Integer and Text with the same value must still order consistently with Eq.
    fn rank(&self) -> u8 {
        match self {
            EntryNumber::Integer(_) => 0,
            EntryNumber::Text(_) => 1,
        }
    }
}

impl fmt::Display for EntryNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryNumber::Integer(n) => write!(f, "{}", n),
            EntryNumber::Text(s) => write!(f, "{}", s),
        }
    }
}

impl Ord for EntryNumber {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.as_integer(), other.as_integer()) {
            (Some(a), Some(b)) => a
                .cmp(&b)
                .then_with(|| self.rank().cmp(&other.rank()))
                .then_with(|| self.to_string().cmp(&other.to_string())),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => self.to_string().cmp(&other.to_string()),
        }
    }
}

impl PartialOrd for EntryNumber {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A single menu option descriptor, as stored in `VistAMenu-*.json`.
///
/// Only the fields needed for the index are decoded; anything else in
/// the file is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct MenuDescriptor {
    /// Option code (e.g. "OR").
    pub option: String,
    /// Human-readable option name.
    pub name: String,
    /// Internal entry number.
    pub ien: EntryNumber,
}

impl MenuDescriptor {
    /// Display label shown in the autocomplete menu.
    pub fn label(&self) -> String {
        format!("{}: {}", self.option, self.name)
    }
}

/// One entry of the autocomplete index.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IndexEntry {
    /// `"<option>: <name>"`
    pub label: String,
    /// Entry number copied from the descriptor.
    pub id: EntryNumber,
}

impl From<MenuDescriptor> for IndexEntry {
    fn from(descriptor: MenuDescriptor) -> Self {
        Self {
            label: descriptor.label(),
            id: descriptor.ien,
        }
    }
}

/// Order applied to index entries before writing.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Keep directory listing order
    #[default]
    None,
    /// Sort by entry number
    Id,
    /// Sort by display label
    Label,
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortOrder::None => write!(f, "none"),
            SortOrder::Id => write!(f, "id"),
            SortOrder::Label => write!(f, "label"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_to_entry() {
        let descriptor: MenuDescriptor =
            serde_json::from_str(r#"{"option": "OR", "name": "ORDERS", "ien": "17"}"#).unwrap();
        let entry = IndexEntry::from(descriptor);

        assert_eq!(entry.label, "OR: ORDERS");
        assert_eq!(entry.id, EntryNumber::Text("17".to_string()));
        assert_eq!(
            serde_json::to_string(&entry).unwrap(),
            r#"{"label":"OR: ORDERS","id":"17"}"#
        );
    }

    #[test]
    fn test_integer_ien_kept_verbatim() {
        let descriptor: MenuDescriptor = serde_json::from_str(
            r#"{"option": "XUCORE", "name": "Core Applications", "ien": 42, "type": "menu"}"#,
        )
        .unwrap();
        let entry = IndexEntry::from(descriptor);

        assert_eq!(entry.id, EntryNumber::Integer(42));
        assert_eq!(
            serde_json::to_string(&entry).unwrap(),
            r#"{"label":"XUCORE: Core Applications","id":42}"#
        );
    }

    #[test]
    fn test_missing_field_rejected() {
        let result = serde_json::from_str::<MenuDescriptor>(r#"{"option": "OR", "ien": "17"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_wrong_type_rejected() {
        let result =
            serde_json::from_str::<MenuDescriptor>(r#"{"option": 5, "name": "X", "ien": "1"}"#);
        assert!(result.is_err());

        let result =
            serde_json::from_str::<MenuDescriptor>(r#"{"option": "A", "name": "X", "ien": null}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_entry_number_ordering() {
        let mut ids = vec![
            EntryNumber::Text("100".to_string()),
            EntryNumber::Integer(9),
            EntryNumber::Text("abc".to_string()),
            EntryNumber::Text("17".to_string()),
        ];
        ids.sort();

        assert_eq!(
            ids,
            vec![
                EntryNumber::Integer(9),
                EntryNumber::Text("17".to_string()),
                EntryNumber::Text("100".to_string()),
                EntryNumber::Text("abc".to_string()),
            ]
        );
    }

    #[test]
    fn test_sort_order_parse() {
        #[derive(Deserialize)]
        struct Wrapper {
            sort: SortOrder,
        }

        let w: Wrapper = toml::from_str(r#"sort = "label""#).unwrap();
        assert_eq!(w.sort, SortOrder::Label);
        assert_eq!(SortOrder::default(), SortOrder::None);
    }
}
