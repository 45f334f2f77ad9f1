//! Attribute-shape classification.
//!
//! Every markup node carries some subset of `{name, value, template, linked,
//! _id, _index}`. The combinations observed in real data form a small fixed
//! vocabulary; classifying them into one exhaustive enum up front is what
//! lets the parser and serializer branch on shape instead of repeatedly
//! probing an attribute bag.

use crate::dialect::{Dialect, DictOptions};
use crate::value::{decode, encode, Scalar};
use crate::{Error, Result};

/// The classified attribute combination of one markup node.
///
/// A dictionary records the combination of the node it was parsed from as
/// its provenance, and the serializer re-emits the exact attributes from it.
#[derive(Debug, Clone, PartialEq)]
pub enum PropAttrs {
    /// `template=`: a document root.
    Template(String),
    /// `name=` alone: an ordered-list marker (or an empty stub on a leaf).
    Name(String),
    /// `value=` alone: an anonymous list element.
    Value(Scalar),
    /// `name=` + `value=`: a regular property.
    NameValue { name: String, value: Scalar },
    /// `name=` + `value=` + `linked=`: a property linked to another field.
    NameValueLinked {
        name: String,
        value: Scalar,
        linked: String,
    },
    /// `name=` + `_id=` (+ optional `value=`): an id-addressable section.
    NameId {
        name: String,
        value: Option<Scalar>,
        id: String,
    },
    /// `name=` + `_index=` (+ optional `value=`): an index-stamped section.
    NameIndex {
        name: String,
        value: Option<Scalar>,
        index: String,
    },
}

impl PropAttrs {
    /// Classify a node's attribute pairs.
    ///
    /// The `value` attribute is decoded through the value codec; identifier
    /// attributes stay strings. A combination outside the vocabulary is an
    /// [`Error::UnknownAttributes`].
    pub fn classify(pairs: &[(String, String)], options: &DictOptions) -> Result<Self> {
        let mut name = None;
        let mut value = None;
        let mut template = None;
        let mut linked = None;
        let mut id = None;
        let mut index = None;

        for (key, text) in pairs {
            match key.as_str() {
                "name" => name = Some(text.clone()),
                "value" => value = Some(decode(text, options.casting, &options.dialect)),
                "template" => template = Some(text.clone()),
                "linked" => linked = Some(text.clone()),
                "_id" => id = Some(text.clone()),
                "_index" => index = Some(text.clone()),
                _ => return Err(Error::UnknownAttributes { found: describe(pairs) }),
            }
        }

        match (template, name, value, linked, id, index) {
            (Some(t), None, None, None, None, None) => Ok(PropAttrs::Template(t)),
            (None, Some(n), None, None, None, None) => Ok(PropAttrs::Name(n)),
            (None, None, Some(v), None, None, None) => Ok(PropAttrs::Value(v)),
            (None, Some(n), Some(v), None, None, None) => {
                Ok(PropAttrs::NameValue { name: n, value: v })
            }
            (None, Some(n), Some(v), Some(l), None, None) => Ok(PropAttrs::NameValueLinked {
                name: n,
                value: v,
                linked: l,
            }),
            (None, Some(n), v, None, Some(i), None) => Ok(PropAttrs::NameId {
                name: n,
                value: v,
                id: i,
            }),
            (None, Some(n), v, None, None, Some(i)) => Ok(PropAttrs::NameIndex {
                name: n,
                value: v,
                index: i,
            }),
            _ => Err(Error::UnknownAttributes { found: describe(pairs) }),
        }
    }

    /// The `name` attribute, if this combination carries one.
    pub fn name(&self) -> Option<&str> {
        match self {
            PropAttrs::Template(_) | PropAttrs::Value(_) => None,
            PropAttrs::Name(n)
            | PropAttrs::NameValue { name: n, .. }
            | PropAttrs::NameValueLinked { name: n, .. }
            | PropAttrs::NameId { name: n, .. }
            | PropAttrs::NameIndex { name: n, .. } => Some(n),
        }
    }

    /// Whether this is the lone-name marker that opens an ordered list.
    pub fn is_list_marker(&self) -> bool {
        matches!(self, PropAttrs::Name(_))
    }

    /// Reconstruct the attribute pairs this combination was classified from.
    pub fn to_attr_pairs(&self, dialect: &Dialect) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        let mut push = |key: &str, text: String| pairs.push((key.to_string(), text));

        match self {
            PropAttrs::Template(t) => push("template", t.clone()),
            PropAttrs::Name(n) => push("name", n.clone()),
            PropAttrs::Value(v) => push("value", encode(v, dialect)),
            PropAttrs::NameValue { name, value } => {
                push("name", name.clone());
                push("value", encode(value, dialect));
            }
            PropAttrs::NameValueLinked { name, value, linked } => {
                push("name", name.clone());
                push("value", encode(value, dialect));
                push("linked", linked.clone());
            }
            PropAttrs::NameId { name, value, id } => {
                push("name", name.clone());
                if let Some(v) = value {
                    push("value", encode(v, dialect));
                }
                push("_id", id.clone());
            }
            PropAttrs::NameIndex { name, value, index } => {
                push("name", name.clone());
                if let Some(v) = value {
                    push("value", encode(v, dialect));
                }
                push("_index", index.clone());
            }
        }

        pairs
    }
}

fn describe(pairs: &[(String, String)]) -> String {
    if pairs.is_empty() {
        return "(none)".to_string();
    }
    pairs
        .iter()
        .map(|(k, _)| k.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_classify_vocabulary() {
        let opts = DictOptions::new();

        assert_eq!(
            PropAttrs::classify(&pairs(&[("template", "GcRewardTable")]), &opts).unwrap(),
            PropAttrs::Template("GcRewardTable".into())
        );
        assert_eq!(
            PropAttrs::classify(&pairs(&[("name", "List")]), &opts).unwrap(),
            PropAttrs::Name("List".into())
        );
        assert_eq!(
            PropAttrs::classify(&pairs(&[("value", "x")]), &opts).unwrap(),
            PropAttrs::Value(Scalar::Str("x".into()))
        );
        assert_eq!(
            PropAttrs::classify(&pairs(&[("name", "A"), ("value", "1")]), &opts).unwrap(),
            PropAttrs::NameValue {
                name: "A".into(),
                value: Scalar::Str("1".into()),
            }
        );
        assert_eq!(
            PropAttrs::classify(
                &pairs(&[("name", "A"), ("value", "1"), ("linked", "B")]),
                &opts
            )
            .unwrap(),
            PropAttrs::NameValueLinked {
                name: "A".into(),
                value: Scalar::Str("1".into()),
                linked: "B".into(),
            }
        );
        assert_eq!(
            PropAttrs::classify(&pairs(&[("name", "S"), ("_id", "XYZ")]), &opts).unwrap(),
            PropAttrs::NameId {
                name: "S".into(),
                value: None,
                id: "XYZ".into(),
            }
        );
        assert_eq!(
            PropAttrs::classify(
                &pairs(&[("name", "S"), ("value", "v"), ("_index", "3")]),
                &opts
            )
            .unwrap(),
            PropAttrs::NameIndex {
                name: "S".into(),
                value: Some(Scalar::Str("v".into())),
                index: "3".into(),
            }
        );
    }

    #[test]
    fn test_classify_decodes_value_through_codec() {
        let opts = DictOptions::new().with_casting(true);
        let attrs = PropAttrs::classify(&pairs(&[("name", "A"), ("value", "7")]), &opts).unwrap();
        assert_eq!(
            attrs,
            PropAttrs::NameValue {
                name: "A".into(),
                value: Scalar::Int(7),
            }
        );
    }

    #[test]
    fn test_classify_rejects_unknown() {
        let opts = DictOptions::new();
        assert!(matches!(
            PropAttrs::classify(&pairs(&[("colour", "red")]), &opts),
            Err(Error::UnknownAttributes { .. })
        ));
        // Legal keys in an illegal combination
        assert!(matches!(
            PropAttrs::classify(&pairs(&[("value", "1"), ("linked", "B")]), &opts),
            Err(Error::UnknownAttributes { .. })
        ));
        assert!(matches!(
            PropAttrs::classify(&[], &opts),
            Err(Error::UnknownAttributes { .. })
        ));
    }

    #[test]
    fn test_attr_pairs_round_trip() {
        let opts = DictOptions::new().with_casting(true);
        let dialect = opts.dialect;
        let originals = [
            pairs(&[("template", "T")]),
            pairs(&[("name", "L")]),
            pairs(&[("value", "x")]),
            pairs(&[("name", "A"), ("value", "42")]),
            pairs(&[("name", "A"), ("value", "true"), ("linked", "B")]),
            pairs(&[("name", "S"), ("_id", "ID1")]),
            pairs(&[("name", "S"), ("value", "v"), ("_index", "0")]),
        ];

        for original in originals {
            let attrs = PropAttrs::classify(&original, &opts).unwrap();
            assert_eq!(attrs.to_attr_pairs(&dialect), original);
        }
    }
}
