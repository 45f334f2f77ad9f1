//! Markup dialect configuration.
//!
//! The property format went through several incompatible revisions (`.exml`
//! up to game version 5.2x, `.mxml` since Worlds Part I). One parser and one
//! serializer cover both, parameterized by a [`Dialect`] instead of one
//! engine per revision.

/// Default recursion bound for parsing and serialization.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Encoding conventions of one markup format revision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dialect {
    /// Literal spelling of boolean true.
    pub true_literal: &'static str,
    /// Literal spelling of boolean false.
    pub false_literal: &'static str,
    /// Positional list scalars repeat the enclosing list's name on every
    /// element instead of being written as bare `value=` nodes.
    pub named_list_elements: bool,
    /// `_id` and `_index` attributes participate in keying.
    pub honor_ids: bool,
    /// A lone-name singleton section inside an ordered list keeps its own
    /// name as key rather than being keyed positionally.
    pub named_singletons: bool,
}

impl Dialect {
    /// The `.exml` revision: capitalized booleans, bare list elements.
    pub const EXML: Dialect = Dialect {
        true_literal: "True",
        false_literal: "False",
        named_list_elements: false,
        honor_ids: false,
        named_singletons: false,
    };

    /// The `.mxml` revision: lower-case booleans, named list elements,
    /// `_id`/`_index` keying, named singleton sections.
    pub const MXML: Dialect = Dialect {
        true_literal: "true",
        false_literal: "false",
        named_list_elements: true,
        honor_ids: true,
        named_singletons: true,
    };
}

impl Default for Dialect {
    fn default() -> Self {
        Self::MXML
    }
}

/// Constructor-time options carried by every dictionary and inherited by
/// nested dictionaries. There is no mid-parse reconfiguration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DictOptions {
    /// Markup dialect to parse and emit.
    pub dialect: Dialect,
    /// Cast textual values to typed scalars. All values stay strings if false.
    pub casting: bool,
    /// Use the `_id` attribute as dictionary keys where available.
    pub use_id: bool,
    /// Maximum nesting depth for parse and serialize.
    pub max_depth: usize,
}

impl Default for DictOptions {
    fn default() -> Self {
        Self {
            dialect: Dialect::default(),
            casting: false,
            use_id: false,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl DictOptions {
    /// Default options: MXML dialect, no casting, no id keying.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the markup dialect.
    pub fn with_dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = dialect;
        self
    }

    /// Enable or disable value casting.
    pub fn with_casting(mut self, casting: bool) -> Self {
        self.casting = casting;
        self
    }

    /// Enable or disable `_id` keying.
    pub fn with_use_id(mut self, use_id: bool) -> Self {
        self.use_id = use_id;
        self
    }

    /// Set the recursion bound.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_differ() {
        assert_ne!(Dialect::EXML, Dialect::MXML);
        assert_eq!(Dialect::EXML.true_literal, "True");
        assert_eq!(Dialect::MXML.true_literal, "true");
        assert!(!Dialect::EXML.honor_ids);
        assert!(Dialect::MXML.named_list_elements);
    }

    #[test]
    fn test_builder_chain() {
        let opts = DictOptions::new()
            .with_dialect(Dialect::EXML)
            .with_casting(true)
            .with_use_id(true)
            .with_max_depth(16);

        assert_eq!(opts.dialect, Dialect::EXML);
        assert!(opts.casting);
        assert!(opts.use_id);
        assert_eq!(opts.max_depth, 16);
    }
}
