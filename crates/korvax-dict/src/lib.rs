//! Property dictionary model for No Man's Sky markup files.
//!
//! Converts the `.exml`/`.mxml` property markup dialect family into an
//! insertion-ordered, directly-addressable dictionary tree and back, with
//! JSON export. One parser/serializer pair covers every format revision,
//! parameterized by a [`Dialect`].
//!
//! The markup is ambiguous by construction: every element is the same
//! generic `<Property>` tag, and whether a node opens a nested section,
//! starts an ordered list, or is a terminal property has to be decided from
//! its attribute combination and its parent's. The [`PropAttrs`] enum names
//! the legal combinations; a dictionary records the combination it was
//! parsed from as its [`Provenance`] so serialization is the exact inverse.
//!
//! # Example
//!
//! ```
//! use korvax_dict::{Dialect, DictOptions, PropertyDict};
//!
//! let markup = r#"<Data template="GcRewardTable">
//!     <Property name="DefaultReward" value="NONE" />
//!     <Property name="List">
//!         <Property value="BROKEN_TECH" />
//!         <Property value="SALVAGE" />
//!     </Property>
//! </Data>"#;
//!
//! let options = DictOptions::new().with_dialect(Dialect::EXML);
//! let dict = PropertyDict::from_str(markup, options)?;
//!
//! assert_eq!(dict.template(), Some("GcRewardTable"));
//! assert_eq!(dict.get_name("DefaultReward").and_then(|v| v.as_str()), Some("NONE"));
//!
//! let list = dict.get_name("List").and_then(|v| v.as_dict()).unwrap();
//! assert_eq!(list.get_index(1).and_then(|v| v.as_str()), Some("SALVAGE"));
//! # Ok::<(), korvax_dict::Error>(())
//! ```

mod attrs;
mod dialect;
mod dict;
mod error;
mod json;
mod parser;
mod value;
mod writer;

pub use attrs::PropAttrs;
pub use dialect::{Dialect, DictOptions, DEFAULT_MAX_DEPTH};
pub use dict::{DictKey, PropertyDict, Provenance};
pub use error::{Error, Result};
pub use value::{decode, encode, DictValue, Scalar};
