//! JSON export.
//!
//! The dump is a direct image of the mapping representation: the provenance
//! slot re-appears as a leading `"template"` string or `"meta"` object at
//! every level, data keys follow in insertion order, and positional keys
//! are stringified. [`PropertyDict::merge`] is the inverse.

use std::fs;
use std::path::Path;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::dict::{PropertyDict, Provenance};
use crate::value::{DictValue, Scalar};
use crate::{Error, Result};

impl Serialize for PropertyDict {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let entries = self.len() + usize::from(self.provenance().is_some());
        let mut map = serializer.serialize_map(Some(entries))?;

        match self.provenance() {
            Some(Provenance::Template(template)) => {
                map.serialize_entry("template", template)?;
            }
            Some(Provenance::Node(attrs)) => {
                let meta: serde_json::Map<String, serde_json::Value> = attrs
                    .to_attr_pairs(&self.options().dialect)
                    .into_iter()
                    .map(|(k, v)| (k, serde_json::Value::String(v)))
                    .collect();
                map.serialize_entry("meta", &meta)?;
            }
            None => {}
        }

        for (key, value) in self.iter() {
            map.serialize_entry(&key.to_string(), value)?;
        }

        map.end()
    }
}

impl Serialize for DictValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            DictValue::Null => serializer.serialize_unit(),
            DictValue::Scalar(Scalar::Str(s)) => serializer.serialize_str(s),
            DictValue::Scalar(Scalar::Int(i)) => serializer.serialize_i64(*i),
            DictValue::Scalar(Scalar::Float(f)) => serializer.serialize_f64(*f),
            DictValue::Scalar(Scalar::Bool(b)) => serializer.serialize_bool(*b),
            DictValue::Dict(dict) => dict.serialize(serializer),
        }
    }
}

impl PropertyDict {
    /// Render this dictionary as compact JSON.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Render this dictionary as pretty-printed JSON.
    pub fn to_json_string_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write this dictionary as a JSON file.
    ///
    /// A dictionary with no data slots is an [`Error::EmptyDict`]; nothing
    /// is written.
    pub fn write_json(&self, target: impl AsRef<Path>) -> Result<()> {
        if self.is_empty() {
            return Err(Error::EmptyDict);
        }
        fs::write(target, self.to_json_string()?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Dialect, DictOptions};

    #[test]
    fn test_json_dump_shape() {
        let text = r#"<Data template="T">
            <Property name="X" value="1"/>
            <Property name="L">
                <Property value="a"/>
                <Property value="b"/>
            </Property>
            <Property name="Empty"/>
        </Data>"#;

        let opts = DictOptions::new()
            .with_dialect(Dialect::EXML)
            .with_casting(true);
        let dict = PropertyDict::from_str(text, opts).unwrap();

        let json = dict.to_json_string().unwrap();
        assert_eq!(
            json,
            r#"{"template":"T","X":1,"L":{"meta":{"name":"L"},"0":"a","1":"b"},"Empty":null}"#
        );
    }

    #[test]
    fn test_json_merge_round_trip() {
        let text = r#"<Data template="T">
            <Property name="X" value="3.5"/>
            <Property name="Flags">
                <Property value="True"/>
                <Property value="False"/>
            </Property>
        </Data>"#;

        let opts = DictOptions::new()
            .with_dialect(Dialect::EXML)
            .with_casting(true);
        let dict = PropertyDict::from_str(text, opts).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&dict.to_json_string().unwrap()).unwrap();
        let mut rebuilt = PropertyDict::new(opts);
        rebuilt.merge(json.as_object().unwrap()).unwrap();

        assert_eq!(rebuilt, dict);
    }

    #[test]
    fn test_json_empty_dict_is_reported() {
        let dict = PropertyDict::with_template("T", DictOptions::new());
        assert!(matches!(
            dict.write_json("/tmp/should-not-exist.json"),
            Err(Error::EmptyDict)
        ));
    }
}
