//! Configuration types for TypeScript emission.

/// Configuration for TypeScript emission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmitConfig {
    /// Emit one exported declaration per named type
    pub(crate) declaration: bool,
    /// Spell the top type `unknown` instead of `any`
    pub(crate) use_unknown: bool,
    /// Leave out the generated-file banner
    pub(crate) no_descriptive_header: bool,
    /// Package the output is generated for
    pub(crate) user_package: Option<String>,
    /// Link to the package the output is generated for
    pub(crate) user_package_url: Option<String>,
}

impl Default for EmitConfig {
    fn default() -> Self {
        Self {
            declaration: true,
            use_unknown: false,
            no_descriptive_header: false,
            user_package: None,
            user_package_url: None,
        }
    }
}

impl EmitConfig {
    /// Create a new EmitConfig with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether to emit exported declarations.
    ///
    /// Without declarations the output is a single type expression, which only
    /// works for documents with exactly one type.
    pub fn declaration(mut self, value: bool) -> Self {
        self.declaration = value;
        self
    }

    /// Set whether the top type is written as `unknown`.
    pub fn use_unknown(mut self, value: bool) -> Self {
        self.use_unknown = value;
        self
    }

    /// Set whether to suppress the generated-file banner.
    pub fn no_descriptive_header(mut self, value: bool) -> Self {
        self.no_descriptive_header = value;
        self
    }

    /// Name the package the output is generated on behalf of.
    pub fn user_package(mut self, value: impl Into<String>) -> Self {
        self.user_package = Some(value.into());
        self
    }

    /// Link to the package the output is generated on behalf of.
    pub fn user_package_url(mut self, value: impl Into<String>) -> Self {
        self.user_package_url = Some(value.into());
        self
    }
}
