//! Parse XML text into an [`MxmlNode`] tree.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::{Error, MxmlNode, Result};

/// Parse markup text into a node tree.
///
/// Text content, comments, and processing instructions are skipped; the
/// property dialect never carries any. Nesting beyond `max_depth` levels is
/// rejected with [`Error::TooDeep`].
pub fn read_document(text: &str, max_depth: usize) -> Result<MxmlNode> {
    let mut reader = Reader::from_str(text);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<MxmlNode> = Vec::new();
    let mut root: Option<MxmlNode> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                if stack.len() >= max_depth {
                    return Err(Error::TooDeep { limit: max_depth });
                }
                stack.push(node_from_element(&e)?);
            }
            Ok(Event::Empty(e)) => {
                let node = node_from_element(&e)?;
                match stack.last_mut() {
                    Some(parent) => parent.children.push(node),
                    None => finish_root(&mut root, node)?,
                }
            }
            Ok(Event::End(_)) => {
                if let Some(node) = stack.pop() {
                    match stack.last_mut() {
                        Some(parent) => parent.children.push(node),
                        None => finish_root(&mut root, node)?,
                    }
                }
            }
            Ok(Event::Eof) => break,
            // Declarations, comments, text between elements
            Ok(_) => {}
            Err(e) => return Err(Error::Malformed(e.to_string())),
        }
    }

    root.ok_or(Error::NoRoot)
}

fn finish_root(root: &mut Option<MxmlNode>, node: MxmlNode) -> Result<()> {
    if root.is_some() {
        return Err(Error::Malformed("content after document root".into()));
    }
    *root = Some(node);
    Ok(())
}

fn node_from_element(e: &BytesStart) -> Result<MxmlNode> {
    let tag = String::from_utf8_lossy(e.name().as_ref()).into_owned();
    let mut node = MxmlNode::new(tag);

    for attr in e.attributes() {
        let attr = attr.map_err(|e| Error::Malformed(e.to_string()))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        // Unescape here so entities round-trip exactly once
        let value = attr
            .unescape_value()
            .map_err(|e| Error::Malformed(e.to_string()))?
            .into_owned();
        node.attrs.push((key, value));
    }

    Ok(node)
}
