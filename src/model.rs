//! Records produced by one generator run.
use serde::ser::{Serialize, SerializeStruct, Serializer};

/// One documented constant of the master definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyRecord {
    pub identifier: String,
    pub value: i32,
    pub display_name: String,
    /// Cross-reference tag values as written, duplicates included.
    pub data_enums: Vec<String>,
}

/// Serialized constant set of one definition file.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct EnumRecord {
    pub name: String,
    pub package: String,
    pub values: Vec<ValueEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueEntry {
    pub name: String,
    pub value: i32,
    pub data_enums: Vec<String>,
}

impl ValueEntry {
    /// Bare name/value pair, as used for auxiliary definitions.
    pub fn plain(name: impl Into<String>, value: i32) -> Self {
        Self {
            name: name.into(),
            value,
            data_enums: Vec::new(),
        }
    }
}

impl From<PropertyRecord> for ValueEntry {
    fn from(record: PropertyRecord) -> Self {
        Self {
            name: record.display_name,
            value: record.value,
            data_enums: record.data_enums,
        }
    }
}

// Keys are written in a fixed order: name, value, then data_enums and the
// singular data_enum only when at least one cross-reference exists.
impl Serialize for ValueEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let first = self.data_enums.first();
        let len = if first.is_some() { 4 } else { 2 };
        let mut state = serializer.serialize_struct("ValueEntry", len)?;
        state.serialize_field("name", &self.name)?;
        state.serialize_field("value", &self.value)?;
        if let Some(first) = first {
            state.serialize_field("data_enums", &self.data_enums)?;
            state.serialize_field("data_enum", first)?;
        }
        state.end()
    }
}

/// Ordered list of enum records: master first, then auxiliaries in
/// first-discovery order.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(transparent)]
pub struct MetadataDocument {
    pub enums: Vec<EnumRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn property_record_becomes_value_entry_under_display_name() {
        let record = PropertyRecord {
            identifier: "GEAR_SELECTION".to_string(),
            value: 289408000,
            display_name: "Currently selected gear".to_string(),
            data_enums: vec!["VehicleGear".to_string()],
        };
        let entry = ValueEntry::from(record);
        assert_eq!(entry.name, "Currently selected gear");
        assert_eq!(entry.data_enums, ["VehicleGear"]);
    }

    #[test]
    fn serializes_cross_references_in_both_forms() {
        let entry = ValueEntry {
            name: "Lane keep".to_string(),
            value: 7,
            data_enums: vec!["LaneKeepState".to_string(), "ErrorState".to_string()],
        };
        let json = serde_json::to_string(&entry).expect("serialize");
        assert_eq!(
            json,
            r#"{"name":"Lane keep","value":7,"data_enums":["LaneKeepState","ErrorState"],"data_enum":"LaneKeepState"}"#
        );
    }

    #[test]
    fn omits_cross_reference_keys_when_empty() {
        let json = serde_json::to_string(&ValueEntry::plain("GEAR_PARK", -4)).expect("serialize");
        assert_eq!(json, r#"{"name":"GEAR_PARK","value":-4}"#);
    }
}
