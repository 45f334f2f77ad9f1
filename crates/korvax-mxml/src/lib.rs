//! Property markup node model and XML text I/O for No Man's Sky files.
//!
//! No Man's Sky ships its game data as compiled MBIN files; the community
//! tooling decompiles those into a property markup dialect (`.exml` in older
//! game versions, `.mxml` since Worlds Part I). Every element uses the same
//! generic tag with a small attribute vocabulary:
//!
//! ```xml
//! <Data template="GcRewardTable">
//!   <Property name="DefaultReward" value="NONE" />
//!   <Property name="List">
//!     <Property value="BROKEN_TECH" />
//!   </Property>
//! </Data>
//! ```
//!
//! This crate only deals with the markup container: reading XML text into an
//! [`MxmlNode`] tree and writing a tree back out. Interpreting the attribute
//! combinations lives in `korvax-dict`.
//!
//! # Example
//!
//! ```
//! use korvax_mxml::{read_document, document_to_string};
//!
//! let text = r#"<Data template="GcDebugOptions">
//!     <Property name="SkipIntroLogos" value="True" />
//! </Data>"#;
//!
//! let root = read_document(text, 64)?;
//! assert_eq!(root.tag, "Data");
//! assert_eq!(root.children.len(), 1);
//!
//! let rendered = document_to_string(&root)?;
//! assert!(rendered.contains("SkipIntroLogos"));
//! # Ok::<(), korvax_mxml::Error>(())
//! ```

mod error;
mod node;
mod reader;
mod writer;

pub use error::{Error, Result};
pub use node::MxmlNode;
pub use reader::read_document;
pub use writer::{document_to_string, write_document};

/// Tag used for the document root element.
pub const ROOT_TAG: &str = "Data";

/// Tag used for every non-root element.
pub const PROPERTY_TAG: &str = "Property";
