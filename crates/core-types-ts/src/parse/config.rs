//! Configuration types for TypeScript parsing.

/// What to do with declarations that are not exported.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NonExported {
    /// Keep them like exported ones
    #[default]
    Include,
    /// Keep them only when an exported declaration refers to them, directly or not
    IncludeIfReferenced,
    /// Reject the source
    Fail,
}

/// Configuration for TypeScript parsing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParseConfig {
    /// Policy for declarations without `export`
    pub(crate) non_exported: NonExported,
}

impl ParseConfig {
    /// Create a new ParseConfig with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the policy for non-exported declarations.
    pub fn non_exported(mut self, value: NonExported) -> Self {
        self.non_exported = value;
        self
    }
}
