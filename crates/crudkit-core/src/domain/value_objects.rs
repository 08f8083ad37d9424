//! Small value objects shared by the record service, the HTTP layer and the
//! scaffold.

use std::fmt;
use std::str::FromStr;

use crate::domain::error::DomainError;

// ============================================================================
// ResourceNames
// ============================================================================

/// Display and route naming for the record type.
///
/// The generated service ships either as `entity/entities` or as
/// `product/products`; both use the same code with different names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceNames {
    singular: String,
    plural: String,
}

impl ResourceNames {
    pub fn new(singular: impl Into<String>, plural: impl Into<String>) -> Result<Self, DomainError> {
        let singular = singular.into().trim().to_lowercase();
        let plural = plural.into().trim().to_lowercase();
        if singular.is_empty() || plural.is_empty() {
            return Err(DomainError::EntityValidation(
                "resource names cannot be empty".into(),
            ));
        }
        if singular.contains('/') || plural.contains('/') {
            return Err(DomainError::EntityValidation(
                "resource names cannot contain '/'".into(),
            ));
        }
        Ok(Self { singular, plural })
    }

    pub fn entity() -> Self {
        Self {
            singular: "entity".into(),
            plural: "entities".into(),
        }
    }

    pub fn product() -> Self {
        Self {
            singular: "product".into(),
            plural: "products".into(),
        }
    }

    pub fn singular(&self) -> &str {
        &self.singular
    }

    pub fn plural(&self) -> &str {
        &self.plural
    }

    /// Singular name with the first letter upper-cased ("Entity").
    pub fn display_singular(&self) -> String {
        let mut chars = self.singular.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    /// JSON key carrying the id in not-found bodies ("entity_id").
    pub fn id_key(&self) -> String {
        format!("{}_id", self.singular)
    }

    /// Message used for not-found responses: `Entity 'abc' not found`.
    pub fn not_found_message(&self, id: &str) -> String {
        format!("{} '{}' not found", self.display_singular(), id)
    }
}

impl Default for ResourceNames {
    fn default() -> Self {
        Self::entity()
    }
}

// ============================================================================
// Page
// ============================================================================

/// Pagination request: skip `offset`, then take at most `limit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Page {
    pub offset: usize,
    pub limit: Option<usize>,
}

impl Page {
    pub const fn new(offset: usize, limit: Option<usize>) -> Self {
        Self { offset, limit }
    }

    /// Every record.
    pub const fn all() -> Self {
        Self {
            offset: 0,
            limit: None,
        }
    }

    /// Slice an ordered sequence.
    ///
    /// The result has `max(0, min(limit, total - offset))` items.
    pub fn apply<I, T>(&self, items: I) -> Vec<T>
    where
        I: IntoIterator<Item = T>,
    {
        let iter = items.into_iter().skip(self.offset);
        match self.limit {
            Some(limit) => iter.take(limit).collect(),
            None => iter.collect(),
        }
    }
}

// ============================================================================
// RepositoryKind
// ============================================================================

/// Storage backend selected by configuration. Only memory exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RepositoryKind {
    #[default]
    Memory,
}

impl RepositoryKind {
    pub const ALL: &'static [RepositoryKind] = &[RepositoryKind::Memory];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Memory => "memory",
        }
    }
}

impl FromStr for RepositoryKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "memory" | "mem" | "in-memory" => Ok(Self::Memory),
            other => Err(DomainError::EntityValidation(format!(
                "unknown repository kind '{other}' (supported: memory)"
            ))),
        }
    }
}

impl fmt::Display for RepositoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
