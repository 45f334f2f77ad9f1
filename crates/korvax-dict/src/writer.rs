//! Dictionary-to-markup conversion, the structural inverse of the parser.

use std::fs;
use std::path::Path;

use korvax_mxml::{MxmlNode, PROPERTY_TAG, ROOT_TAG};

use crate::dict::{DictKey, PropertyDict, Provenance};
use crate::value::{encode, DictValue};
use crate::{Error, Result};

impl PropertyDict {
    /// Convert this dictionary to a markup node tree.
    ///
    /// A template dictionary becomes the document root directly; a
    /// dictionary with node provenance is wrapped in a synthetic container
    /// root with one section child carrying its attributes, so any section
    /// of a document can be saved standalone.
    pub fn to_node(&self) -> Result<MxmlNode> {
        let limit = self.options().max_depth;
        let mut root = MxmlNode::new(ROOT_TAG);

        match self.provenance() {
            Some(Provenance::Template(template)) => {
                root = root.attr("template", template);
                write_slots(self, &mut root, 0, limit)?;
            }
            None => {
                write_slots(self, &mut root, 0, limit)?;
            }
            Some(Provenance::Node(attrs)) => {
                let mut section = MxmlNode::new(PROPERTY_TAG);
                section.attrs = attrs.to_attr_pairs(&self.options().dialect);
                write_slots(self, &mut section, 1, limit)?;
                root.children.push(section);
            }
        }

        Ok(root)
    }

    /// Render this dictionary as markup text.
    pub fn to_mxml_string(&self) -> Result<String> {
        let node = self.to_node()?;
        Ok(korvax_mxml::document_to_string(&node)?)
    }

    /// Write this dictionary back to a markup file.
    ///
    /// A dictionary with no data slots is an [`Error::EmptyDict`]; nothing
    /// is written.
    pub fn write_mxml(&self, target: impl AsRef<Path>) -> Result<()> {
        if self.is_empty() {
            return Err(Error::EmptyDict);
        }
        let node = self.to_node()?;
        let mut file = fs::File::create(target)?;
        korvax_mxml::write_document(&mut file, &node)?;
        Ok(())
    }
}

fn write_slots(
    dict: &PropertyDict,
    parent: &mut MxmlNode,
    depth: usize,
    limit: usize,
) -> Result<()> {
    if depth > limit {
        return Err(Error::TooDeep { limit });
    }

    let dialect = dict.options().dialect;

    for (key, value) in dict.iter() {
        let mut node = MxmlNode::new(PROPERTY_TAG);

        match value {
            DictValue::Dict(nested) => {
                node.attrs = match nested.provenance() {
                    Some(Provenance::Node(attrs)) => attrs.to_attr_pairs(&dialect),
                    Some(Provenance::Template(t)) => {
                        vec![("template".to_string(), t.clone())]
                    }
                    // A merged-in section without provenance: fall back to
                    // the key it sits under.
                    None => match key {
                        DictKey::Name(name) => vec![("name".to_string(), name.clone())],
                        DictKey::Index(_) => Vec::new(),
                    },
                };
                write_slots(nested, &mut node, depth + 1, limit)?;
            }
            DictValue::Scalar(scalar) => {
                let rendered = encode(scalar, &dialect);
                match key {
                    DictKey::Index(_) => {
                        // Ordered list element: the newer dialect repeats
                        // the enclosing list's name on every element.
                        match dict.list_name().filter(|_| dialect.named_list_elements) {
                            Some(list_name) => {
                                node = node.attr("name", list_name).attr("value", rendered);
                            }
                            None => node = node.attr("value", rendered),
                        }
                    }
                    DictKey::Name(name) => {
                        node = node.attr("name", name.as_str()).attr("value", rendered);
                    }
                }
            }
            DictValue::Null => {
                node = node.attr("name", key.to_string());
            }
        }

        parent.children.push(node);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attrs::PropAttrs;
    use crate::{Dialect, DictOptions, Scalar};

    fn exml() -> DictOptions {
        DictOptions::new().with_dialect(Dialect::EXML)
    }

    #[test]
    fn test_write_template_root() {
        let mut dict = PropertyDict::with_template("GcRewardTable", exml());
        dict.insert("A".into(), "1".into());

        let node = dict.to_node().unwrap();
        assert_eq!(node.tag, "Data");
        assert_eq!(node.get("template"), Some("GcRewardTable"));
        assert_eq!(node.children.len(), 1);
        assert_eq!(node.children[0].get("name"), Some("A"));
        assert_eq!(node.children[0].get("value"), Some("1"));
    }

    #[test]
    fn test_write_list_elements_per_dialect() {
        let build = |opts: DictOptions| {
            let mut dict = PropertyDict::with_template("T", opts);
            let mut list = PropertyDict::with_provenance(
                Some(Provenance::Node(PropAttrs::Name("L".into()))),
                opts,
            );
            list.append(None, "a".into()).unwrap();
            list.append(None, "b".into()).unwrap();
            dict.insert("L".into(), DictValue::Dict(list));
            dict
        };

        // EXML: bare value-only elements
        let node = build(exml()).to_node().unwrap();
        let list = &node.children[0];
        assert_eq!(list.get("name"), Some("L"));
        assert_eq!(list.children[0].attrs, vec![("value".to_string(), "a".to_string())]);

        // MXML: every element repeats the list's name
        let node = build(DictOptions::new()).to_node().unwrap();
        let list = &node.children[0];
        assert_eq!(list.children[0].get("name"), Some("L"));
        assert_eq!(list.children[0].get("value"), Some("a"));
        assert_eq!(list.children[1].get("value"), Some("b"));
    }

    #[test]
    fn test_write_null_stubs() {
        let mut dict = PropertyDict::with_template("T", exml());
        dict.insert("Empty".into(), DictValue::Null);

        let node = dict.to_node().unwrap();
        assert_eq!(node.children[0].attrs, vec![("name".to_string(), "Empty".to_string())]);
    }

    #[test]
    fn test_write_scalars_through_codec() {
        let mut dict = PropertyDict::with_template("T", exml());
        dict.insert("B".into(), DictValue::Scalar(Scalar::Bool(true)));
        dict.insert("F".into(), DictValue::Scalar(Scalar::Float(2.0)));

        let node = dict.to_node().unwrap();
        assert_eq!(node.children[0].get("value"), Some("True"));
        assert_eq!(node.children[1].get("value"), Some("2.0"));
    }

    #[test]
    fn test_write_sectional_dict_gets_container() {
        let mut section = PropertyDict::with_provenance(
            Some(Provenance::Node(PropAttrs::NameValue {
                name: "Video".into(),
                value: Scalar::Str("GcVideo".into()),
            })),
            exml(),
        );
        section.insert("Fov".into(), "90".into());

        let node = section.to_node().unwrap();
        assert_eq!(node.tag, "Data");
        assert!(node.attrs.is_empty());
        assert_eq!(node.children.len(), 1);
        let wrapped = &node.children[0];
        assert_eq!(wrapped.get("name"), Some("Video"));
        assert_eq!(wrapped.get("value"), Some("GcVideo"));
        assert_eq!(wrapped.children[0].get("name"), Some("Fov"));
    }

    #[test]
    fn test_write_reemits_extra_attributes() {
        let text = r#"<Data template="T">
            <Property name="Entries">
                <Property name="GcEntry" _id="AAA">
                    <Property name="V" value="1"/>
                </Property>
            </Property>
            <Property name="Amount" value="5" linked="Scale"/>
        </Data>"#;

        let dict = PropertyDict::from_str(text, DictOptions::new()).unwrap();
        let node = dict.to_node().unwrap();

        let entries = &node.children[0];
        assert_eq!(entries.children[0].get("_id"), Some("AAA"));
        let amount = &node.children[1];
        assert_eq!(amount.get("linked"), Some("Scale"));
        assert!(!amount.has_children());
    }

    #[test]
    fn test_write_empty_dict_is_reported() {
        let dict = PropertyDict::with_template("T", DictOptions::new());
        let err = dict.write_mxml("/tmp/should-not-exist.mxml").unwrap_err();
        assert!(matches!(err, Error::EmptyDict));
    }

    #[test]
    fn test_write_depth_guard() {
        let mut inner = PropertyDict::with_provenance(
            Some(Provenance::Node(PropAttrs::Name("N".into()))),
            DictOptions::new().with_max_depth(2),
        );
        inner.insert("X".into(), "1".into());
        for i in 0..4 {
            let mut next = PropertyDict::with_provenance(
                Some(Provenance::Node(PropAttrs::Name(format!("N{i}")))),
                DictOptions::new().with_max_depth(2),
            );
            next.insert(DictKey::Index(0), DictValue::Dict(inner));
            inner = next;
        }

        assert!(matches!(inner.to_node(), Err(Error::TooDeep { limit: 2 })));
    }
}
