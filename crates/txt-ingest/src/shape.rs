//! Raw tables and the shaped values built from them.

use serde::ser::{Serialize, SerializeMap, Serializer};

/// One logical row of input: its fields in order.
pub type Record = Vec<String>;

/// Records in input order. Rows may differ in length.
pub type RawTable = Vec<Record>;

/// A record keyed by header names, in header order.
///
/// Assigning a name that is already present overwrites its value in place,
/// so a duplicated header name keeps the value of its last position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    entries: Vec<(String, String)>,
}

impl Row {
    /// Creates an empty row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `name` to `value`.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Value stored under `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in header order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = Row::new();
        for (k, v) in iter {
            row.insert(k, v);
        }
        row
    }
}

impl Serialize for Row {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

/// Tabular input after header resolution.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(untagged)]
pub enum Shaped {
    /// No header: each record is a list of fields.
    ListOfLists(RawTable),
    /// Header present: each record is a map from header name to field.
    ListOfMaps(Vec<Row>),
}

impl Shaped {
    /// Number of records.
    pub fn len(&self) -> usize {
        match self {
            Shaped::ListOfLists(rows) => rows.len(),
            Shaped::ListOfMaps(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Combines a raw table with an optional header.
///
/// Without a header the table is returned as is. With one, each record maps
/// `header[i]` to `record[i]` for every `i` below both lengths; header names
/// past the end of a short record and fields past the end of the header are
/// left out, never filled with nulls.
pub fn shape(table: RawTable, header: Option<&[String]>) -> Shaped {
    let Some(header) = header else {
        return Shaped::ListOfLists(table);
    };

    let rows = table
        .into_iter()
        .map(|record| header.iter().cloned().zip(record).collect::<Row>())
        .collect();
    Shaped::ListOfMaps(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn table(rows: &[&[&str]]) -> RawTable {
        rows.iter()
            .map(|r| r.iter().map(|s| s.to_string()).collect())
            .collect()
    }

    fn names(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn absent_header_keeps_lists() {
        let raw = table(&[&["a", "b"], &["c"]]);
        assert_eq!(shape(raw.clone(), None), Shaped::ListOfLists(raw));
    }

    #[test]
    fn header_maps_by_position() {
        let shaped = shape(table(&[&["A", "1"], &["B", "2"]]), Some(&names(&["name", "age"])));
        assert_eq!(
            serde_json::to_value(&shaped).unwrap(),
            json!([{"name": "A", "age": "1"}, {"name": "B", "age": "2"}])
        );
    }

    #[test]
    fn short_record_omits_missing_keys() {
        let shaped = shape(table(&[&["A"]]), Some(&names(&["name", "age"])));
        let Shaped::ListOfMaps(rows) = shaped else {
            panic!("expected maps");
        };
        assert_eq!(rows[0].len(), 1);
        assert_eq!(rows[0].get("name"), Some("A"));
        assert_eq!(rows[0].get("age"), None);
    }

    #[test]
    fn long_record_drops_extra_fields() {
        let shaped = shape(table(&[&["A", "1", "extra"]]), Some(&names(&["name", "age"])));
        assert_eq!(
            serde_json::to_value(&shaped).unwrap(),
            json!([{"name": "A", "age": "1"}])
        );
    }

    #[test]
    fn empty_record_becomes_empty_map() {
        let shaped = shape(table(&[&[]]), Some(&names(&["k"])));
        assert_eq!(serde_json::to_value(&shaped).unwrap(), json!([{}]));
    }

    #[test]
    fn duplicate_names_keep_last_position() {
        let shaped = shape(table(&[&["1", "2"]]), Some(&names(&["x", "x"])));
        let Shaped::ListOfMaps(rows) = shaped else {
            panic!("expected maps");
        };
        assert_eq!(rows[0].len(), 1);
        assert_eq!(rows[0].get("x"), Some("2"));
    }

    #[test]
    fn row_serializes_in_header_order() {
        let row: Row = [("z", "1"), ("a", "2")].into_iter().collect();
        assert_eq!(serde_json::to_string(&row).unwrap(), r#"{"z":"1","a":"2"}"#);
    }
}
