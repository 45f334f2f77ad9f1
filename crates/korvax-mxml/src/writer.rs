//! Render an [`MxmlNode`] tree back to XML text.

use std::io::Write;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::Writer;

use crate::{MxmlNode, Result};

/// Render a node tree to a string.
pub fn document_to_string(root: &MxmlNode) -> Result<String> {
    let mut output = Vec::new();
    write_document(&mut output, root)?;
    String::from_utf8(output).map_err(|e| crate::Error::Malformed(e.to_string()))
}

/// Write a node tree as an XML document with declaration and 2-space indent.
pub fn write_document<W: Write>(writer: &mut W, root: &MxmlNode) -> Result<()> {
    let mut xml = Writer::new_with_indent(writer, b' ', 2);

    xml.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))
        .map_err(|e| crate::Error::Malformed(e.to_string()))?;

    write_element(&mut xml, root)
}

fn write_element<W: Write>(xml: &mut Writer<W>, node: &MxmlNode) -> Result<()> {
    let mut elem = BytesStart::new(node.tag.as_str());
    for (key, value) in &node.attrs {
        elem.push_attribute((key.as_str(), value.as_str()));
    }

    if node.children.is_empty() {
        xml.write_event(Event::Empty(elem))
            .map_err(|e| crate::Error::Malformed(e.to_string()))?;
    } else {
        xml.write_event(Event::Start(elem))
            .map_err(|e| crate::Error::Malformed(e.to_string()))?;

        for child in &node.children {
            write_element(xml, child)?;
        }

        xml.write_event(Event::End(BytesEnd::new(node.tag.as_str())))
            .map_err(|e| crate::Error::Malformed(e.to_string()))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::read_document;

    #[test]
    fn test_write_empty_element() {
        let node = MxmlNode::new("Data").attr("template", "T");
        let text = document_to_string(&node).unwrap();
        assert!(text.starts_with("<?xml version=\"1.0\" encoding=\"utf-8\"?>"));
        assert!(text.contains(r#"<Data template="T"/>"#));
    }

    #[test]
    fn test_write_nested() {
        let node = MxmlNode::new("Data").attr("template", "T").child(
            MxmlNode::new("Property")
                .attr("name", "List")
                .child(MxmlNode::new("Property").attr("value", "a")),
        );

        let text = document_to_string(&node).unwrap();
        assert!(text.contains(r#"<Property name="List">"#));
        assert!(text.contains(r#"<Property value="a"/>"#));
        assert!(text.contains("</Property>"));
    }

    #[test]
    fn test_write_read_round_trip() {
        let node = MxmlNode::new("Data")
            .attr("template", "T")
            .child(MxmlNode::new("Property").attr("name", "A").attr("value", "1 < 2 & \"so\""))
            .child(
                MxmlNode::new("Property")
                    .attr("name", "L")
                    .child(MxmlNode::new("Property").attr("value", "x"))
                    .child(MxmlNode::new("Property").attr("value", "y")),
            );

        let text = document_to_string(&node).unwrap();
        let reparsed = read_document(&text, 64).unwrap();
        assert_eq!(reparsed, node);
    }
}
