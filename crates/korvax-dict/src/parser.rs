//! Markup-to-dictionary conversion.
//!
//! The source format is ambiguous by construction: one generic node shape
//! must be disambiguated purely from its attribute combination and its
//! parent's. The parent's provenance is recorded before children are
//! processed and threaded through the recursion, because the key chosen for
//! a child depends on it.

use std::fs;
use std::path::Path;

use korvax_mxml::MxmlNode;

use crate::attrs::PropAttrs;
use crate::dialect::DictOptions;
use crate::dict::{DictKey, PropertyDict, Provenance};
use crate::value::DictValue;
use crate::{Error, Result};

impl PropertyDict {
    /// Parse a markup file into a dictionary.
    ///
    /// The existence check lives here; no partial dictionary escapes a
    /// failed parse.
    pub fn from_file(path: impl AsRef<Path>, options: DictOptions) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::MissingInput {
                path: path.to_path_buf(),
            });
        }
        let text = fs::read_to_string(path)?;
        Self::from_str(&text, options)
    }

    /// Parse markup text into a dictionary.
    pub fn from_str(text: &str, options: DictOptions) -> Result<Self> {
        let root = korvax_mxml::read_document(text, options.max_depth)?;
        Self::from_node(&root, options)
    }

    /// Convert an already-materialized node tree into a dictionary.
    pub fn from_node(root: &MxmlNode, options: DictOptions) -> Result<Self> {
        let provenance = root_provenance(root, &options)?;
        let mut dict = PropertyDict::with_provenance(provenance, options);
        parse_children(root, &mut dict, 0)?;
        Ok(dict)
    }
}

/// A root with a `template` attribute is a document; a bare root is a
/// synthetic container whose children classify in named-section mode.
fn root_provenance(root: &MxmlNode, options: &DictOptions) -> Result<Option<Provenance>> {
    if root.attrs.is_empty() {
        return Ok(None);
    }
    Ok(Some(match PropAttrs::classify(&root.attrs, options)? {
        PropAttrs::Template(t) => Provenance::Template(t),
        other => Provenance::Node(other),
    }))
}

fn parse_children(node: &MxmlNode, dict: &mut PropertyDict, depth: usize) -> Result<()> {
    let options = dict.options();
    if depth > options.max_depth {
        return Err(Error::TooDeep {
            limit: options.max_depth,
        });
    }

    for child in &node.children {
        let attrs = PropAttrs::classify(&child.attrs, &options)?;

        if child.has_children() {
            let key = section_key(dict, &attrs);
            let mut nested =
                PropertyDict::with_provenance(Some(Provenance::Node(attrs)), options);
            parse_children(child, &mut nested, depth + 1)?;
            dict.insert(key, DictValue::Dict(nested));
        } else {
            insert_leaf(dict, attrs);
        }
    }

    Ok(())
}

/// Choose the key for a child that opens a nested section.
fn section_key(parent: &PropertyDict, attrs: &PropAttrs) -> DictKey {
    let options = parent.options();

    if options.dialect.honor_ids {
        match attrs {
            PropAttrs::NameId { id, .. } => {
                return if options.use_id {
                    DictKey::Name(id.clone())
                } else {
                    DictKey::Index(parent.len())
                };
            }
            PropAttrs::NameIndex { .. } => return DictKey::Index(parent.len()),
            _ => {}
        }
    }

    match parent.list_name() {
        // Parent is an ordered-list section. Keying by name would overwrite
        // semantically-identical siblings, so positional. The exception is a
        // lone-name singleton with a name distinct from the list's own, in
        // the dialect revision that keeps those addressable.
        Some(list_name) => match attrs {
            PropAttrs::Name(name)
                if options.dialect.named_singletons && name != list_name =>
            {
                DictKey::Name(name.clone())
            }
            _ => DictKey::Index(parent.len()),
        },
        // Template root, container, or named class section: the child's
        // name gives direct lookup when it has one.
        None => match attrs.name() {
            Some(name) => DictKey::Name(name.to_string()),
            None => DictKey::Index(parent.len()),
        },
    }
}

fn insert_leaf(dict: &mut PropertyDict, attrs: PropAttrs) {
    match attrs {
        // Anonymous list element
        PropAttrs::Value(value) => {
            let key = DictKey::Index(dict.len());
            dict.insert(key, DictValue::Scalar(value));
        }
        // Empty stub
        PropAttrs::Name(name) => {
            dict.insert(DictKey::Name(name), DictValue::Null);
        }
        PropAttrs::NameValue { name, value } => {
            // A leaf repeating the enclosing list's own name is an ordered
            // list element; list order wins over name uniqueness.
            let key = match dict.list_name() {
                Some(list_name) if name == list_name => DictKey::Index(dict.len()),
                _ => DictKey::Name(name),
            };
            dict.insert(key, DictValue::Scalar(value));
        }
        // Leaves carrying linked/_id/_index keep the full combination as a
        // childless section so the extra attributes survive a round trip.
        other => {
            let key = section_key(dict, &other);
            let nested = PropertyDict::with_provenance(
                Some(Provenance::Node(other)),
                dict.options(),
            );
            dict.insert(key, DictValue::Dict(nested));
        }
    }
}
