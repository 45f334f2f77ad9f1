//! Korvax - No Man's Sky property markup conversion library.
//!
//! This crate provides a unified interface to the Korvax library ecosystem
//! for working with No Man's Sky `.exml`/`.mxml` property files.
//!
//! # Crates
//!
//! - [`korvax_mxml`] - Markup node model and XML text I/O
//! - [`korvax_dict`] - Property dictionary, dialects, value codec, JSON export
//!
//! # Example
//!
//! ```
//! use korvax::prelude::*;
//!
//! let markup = r#"<Data template="GcDebugOptions">
//!     <Property name="SkipIntroLogos" value="true" />
//! </Data>"#;
//!
//! let options = DictOptions::new().with_casting(true);
//! let dict = PropertyDict::from_str(markup, options)?;
//!
//! assert_eq!(dict.get_name("SkipIntroLogos").and_then(|v| v.as_bool()), Some(true));
//!
//! // Back to markup
//! let saved = dict.to_mxml_string()?;
//! assert!(saved.contains("SkipIntroLogos"));
//! # Ok::<(), korvax::dict::Error>(())
//! ```

// Re-export the sub-crates
pub use korvax_dict as dict;
pub use korvax_mxml as mxml;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use korvax_dict::{
        Dialect, DictKey, DictOptions, DictValue, PropertyDict, Provenance, Scalar,
    };
    pub use korvax_mxml::{document_to_string, read_document, MxmlNode};
}

// Re-export the main entry type at the crate root
pub use korvax_dict::PropertyDict;

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
