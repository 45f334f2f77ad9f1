//! The property dictionary: an insertion-ordered mapping with a provenance
//! slot, the in-memory shape of one markup section or document.

use std::fmt;

use indexmap::IndexMap;
use serde_json::Value as JsonValue;

use crate::attrs::PropAttrs;
use crate::dialect::DictOptions;
use crate::value::{encode, DictValue, Scalar};
use crate::{Error, Result};

/// A key into a [`PropertyDict`].
///
/// Name keys give direct lookup where the markup exposed a unique name.
/// Positional keys are assigned as the dictionary's size at insertion time,
/// so ordered-list sections keep append order without overwriting
/// same-named siblings.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DictKey {
    /// Human-readable name key.
    Name(String),
    /// Positional key inside an ordered-list section.
    Index(usize),
}

impl fmt::Display for DictKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DictKey::Name(n) => f.write_str(n),
            DictKey::Index(i) => write!(f, "{i}"),
        }
    }
}

impl From<&str> for DictKey {
    fn from(name: &str) -> Self {
        DictKey::Name(name.to_string())
    }
}

impl From<String> for DictKey {
    fn from(name: String) -> Self {
        DictKey::Name(name)
    }
}

impl From<usize> for DictKey {
    fn from(index: usize) -> Self {
        DictKey::Index(index)
    }
}

/// How a dictionary was reached from its markup parent.
///
/// A root document carries a `template` string; any other section carries
/// the attribute combination of the node that opened it. The serializer
/// reconstructs attributes from this, and the parser's classification of a
/// section's children depends on it.
#[derive(Debug, Clone, PartialEq)]
pub enum Provenance {
    /// Root document with a `template=` attribute.
    Template(String),
    /// Section opened by a node with the given attribute combination.
    Node(PropAttrs),
}

impl Provenance {
    /// The section's own name, if its attributes carry one.
    pub fn name(&self) -> Option<&str> {
        match self {
            Provenance::Template(_) => None,
            Provenance::Node(attrs) => attrs.name(),
        }
    }

    /// Whether this provenance marks an ordered-list section.
    pub fn is_list_marker(&self) -> bool {
        matches!(self, Provenance::Node(attrs) if attrs.is_list_marker())
    }
}

/// An insertion-ordered dictionary parsed from property markup.
///
/// Data slots map [`DictKey`]s to [`DictValue`]s. The provenance slot is
/// held out of band rather than as a reserved in-map entry, so iteration,
/// counting, and flattening can never observe it.
#[derive(Debug, Clone, Default)]
pub struct PropertyDict {
    slots: IndexMap<DictKey, DictValue>,
    provenance: Option<Provenance>,
    options: DictOptions,
}

impl PropertyDict {
    /// Create an empty dictionary with the given options.
    pub fn new(options: DictOptions) -> Self {
        Self {
            slots: IndexMap::new(),
            provenance: None,
            options,
        }
    }

    /// Create an empty root document for the given template.
    pub fn with_template(template: impl Into<String>, options: DictOptions) -> Self {
        Self::with_provenance(Some(Provenance::Template(template.into())), options)
    }

    /// Create an empty dictionary with explicit provenance.
    pub fn with_provenance(provenance: Option<Provenance>, options: DictOptions) -> Self {
        Self {
            slots: IndexMap::new(),
            provenance,
            options,
        }
    }

    /// The options this dictionary was built with.
    pub fn options(&self) -> DictOptions {
        self.options
    }

    /// The provenance slot.
    pub fn provenance(&self) -> Option<&Provenance> {
        self.provenance.as_ref()
    }

    /// Replace the provenance slot.
    pub fn set_provenance(&mut self, provenance: Option<Provenance>) {
        self.provenance = provenance;
    }

    /// The template name, if this is a root document.
    pub fn template(&self) -> Option<&str> {
        match &self.provenance {
            Some(Provenance::Template(t)) => Some(t),
            _ => None,
        }
    }

    /// The list name, if this is an ordered-list section.
    pub fn list_name(&self) -> Option<&str> {
        match &self.provenance {
            Some(p) if p.is_list_marker() => p.name(),
            _ => None,
        }
    }

    /// Number of data slots. Provenance is not counted.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the dictionary has no data slots.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Iterate data keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &DictKey> {
        self.slots.keys()
    }

    /// Iterate data slots in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&DictKey, &DictValue)> {
        self.slots.iter()
    }

    /// Look up a slot by key.
    pub fn get(&self, key: &DictKey) -> Option<&DictValue> {
        self.slots.get(key)
    }

    /// Look up a slot by name key.
    pub fn get_name(&self, name: &str) -> Option<&DictValue> {
        self.slots.get(&DictKey::Name(name.to_string()))
    }

    /// Look up a slot by positional key.
    pub fn get_index(&self, index: usize) -> Option<&DictValue> {
        self.slots.get(&DictKey::Index(index))
    }

    /// Look up a slot mutably.
    pub fn get_mut(&mut self, key: &DictKey) -> Option<&mut DictValue> {
        self.slots.get_mut(key)
    }

    /// Insert a slot, replacing any previous value at the same key.
    pub fn insert(&mut self, key: DictKey, value: DictValue) -> Option<DictValue> {
        self.slots.insert(key, value)
    }

    /// Insert at the next positional key.
    pub(crate) fn push_positional(&mut self, value: DictValue) {
        let key = DictKey::Index(self.len());
        self.slots.insert(key, value);
    }

    /// Add a value: positionally when this dictionary is an ordered-list
    /// section (the given key, if any, is ignored), otherwise at the
    /// required explicit key.
    pub fn append(&mut self, key: Option<DictKey>, value: DictValue) -> Result<()> {
        if self.list_name().is_some() {
            self.push_positional(value);
            return Ok(());
        }
        match key {
            Some(key) => {
                self.insert(key, value);
                Ok(())
            }
            None => Err(Error::MissingKey),
        }
    }

    /// Deep-import an external JSON mapping into this dictionary.
    ///
    /// Nested objects become dictionaries inheriting this dictionary's
    /// options; arrays become ordered-list sections with positional entries.
    /// A `"template"` string member or `"meta"` object member at any level
    /// sets that dictionary's provenance instead of becoming data, which is
    /// the inverse of the JSON dump shape produced by
    /// [`to_json_string`](Self::to_json_string).
    pub fn merge(&mut self, external: &serde_json::Map<String, JsonValue>) -> Result<()> {
        for (key, value) in external {
            match (key.as_str(), value) {
                ("template", JsonValue::String(t)) => {
                    self.provenance = Some(Provenance::Template(t.clone()));
                }
                ("meta", JsonValue::Object(meta)) => {
                    let pairs: Vec<(String, String)> = meta
                        .iter()
                        .map(|(k, v)| (k.clone(), json_attr_text(v)))
                        .collect();
                    let attrs = PropAttrs::classify(&pairs, &self.options)?;
                    self.provenance = Some(Provenance::Node(attrs));
                }
                _ => {
                    let slot = self.import_json(key, value)?;
                    // Stringified positional keys from a JSON dump can only
                    // occur inside list sections; elsewhere an all-digit key
                    // is a genuine property name.
                    let is_digits = !key.is_empty() && key.chars().all(|c| c.is_ascii_digit());
                    let key = if is_digits && self.list_name().is_some() {
                        DictKey::Index(self.len())
                    } else {
                        DictKey::Name(key.clone())
                    };
                    self.insert(key, slot);
                }
            }
        }
        Ok(())
    }

    fn import_json(&self, key: &str, value: &JsonValue) -> Result<DictValue> {
        Ok(match value {
            JsonValue::Null => DictValue::Null,
            JsonValue::Bool(b) => DictValue::Scalar(Scalar::Bool(*b)),
            JsonValue::Number(n) => DictValue::Scalar(match n.as_i64() {
                Some(i) => Scalar::Int(i),
                None => Scalar::Float(n.as_f64().unwrap_or(0.0)),
            }),
            JsonValue::String(s) => DictValue::Scalar(Scalar::Str(s.clone())),
            JsonValue::Object(obj) => {
                // Default provenance from the key it was merged under; a
                // "meta"/"template" member inside overrides it.
                let mut nested = PropertyDict::with_provenance(
                    Some(Provenance::Node(PropAttrs::Name(key.to_string()))),
                    self.options,
                );
                nested.merge(obj)?;
                DictValue::Dict(nested)
            }
            JsonValue::Array(items) => {
                let mut list = PropertyDict::with_provenance(
                    Some(Provenance::Node(PropAttrs::Name(key.to_string()))),
                    self.options,
                );
                for item in items {
                    let slot = list.import_json(key, item)?;
                    list.push_positional(slot);
                }
                DictValue::Dict(list)
            }
        })
    }

    /// Join every leaf value into one delimited line, with the default
    /// separators `;` and `,`.
    pub fn one_liner(&self) -> Option<String> {
        self.one_liner_with(";", ",")
    }

    /// Join every leaf value into one delimited line, depth-first in key
    /// order. Nested sections join with `sep2` at their own level; the
    /// outer join uses `sep1` only when the leading entry already contains
    /// `sep2`, so flat and one-level documents both come out with a single
    /// separator. Returns `None` for a dictionary with no data slots, or
    /// whose sole datum is the empty stub.
    pub fn one_liner_with(&self, sep1: &str, sep2: &str) -> Option<String> {
        if self.is_empty() {
            return None;
        }
        if self.len() == 1 && matches!(self.iter().next(), Some((_, DictValue::Null))) {
            return None;
        }

        let dialect = self.options.dialect;
        let parts: Vec<String> = self
            .iter()
            .map(|(_, value)| flatten_value(value, sep2, &dialect))
            .collect();

        let outer = if parts[0].contains(sep2) { sep1 } else { sep2 };
        Some(parts.join(outer))
    }
}

fn flatten_value(value: &DictValue, sep2: &str, dialect: &crate::Dialect) -> String {
    match value {
        DictValue::Dict(dict) => dict
            .iter()
            .map(|(_, v)| flatten_value(v, sep2, dialect))
            .collect::<Vec<_>>()
            .join(sep2),
        DictValue::Scalar(scalar) => encode(scalar, dialect),
        DictValue::Null => "null".to_string(),
    }
}

fn json_attr_text(value: &JsonValue) -> String {
    match value {
        JsonValue::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Equality compares provenance and data slots in insertion order; the
/// carried options are construction config, not content.
impl PartialEq for PropertyDict {
    fn eq(&self, other: &Self) -> bool {
        self.provenance == other.provenance
            && self.len() == other.len()
            && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}
