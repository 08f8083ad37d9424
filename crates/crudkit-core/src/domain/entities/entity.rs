//! The example CRUD record.
//!
//! An [`Entity`] is immutable once built: construction validates every field
//! and updates produce a fresh value through [`Entity::with_changes`].

use std::fmt;

use crate::domain::error::DomainError;

/// Identifier of a stored record. Never blank.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(String);

impl EntityId {
    /// Fallible constructor; rejects empty or whitespace-only ids.
    pub fn new(id: impl Into<String>) -> Result<Self, DomainError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(DomainError::EmptyId);
        }
        Ok(Self(id))
    }

    /// A fresh random id, as the HTTP layer assigns on create.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for EntityId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for EntityId {
    type Error = DomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<String> for EntityId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// A validated record: identifier, name, price and stock flag.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    id: EntityId,
    name: String,
    price: f64,
    in_stock: bool,
}

impl Entity {
    /// Build an in-stock record.
    ///
    /// # Errors
    ///
    /// - `EmptyId` / `EmptyName` when the trimmed text is empty
    /// - `NegativePrice` when `price < 0`
    /// - `NonFinitePrice` for NaN or infinities
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        price: f64,
    ) -> Result<Self, DomainError> {
        Self::with_stock(id, name, price, true)
    }

    pub fn with_stock(
        id: impl Into<String>,
        name: impl Into<String>,
        price: f64,
        in_stock: bool,
    ) -> Result<Self, DomainError> {
        Self::from_parts(EntityId::new(id)?, name.into(), price, in_stock)
    }

    /// Build from an already validated id.
    pub fn from_parts(
        id: EntityId,
        name: String,
        price: f64,
        in_stock: bool,
    ) -> Result<Self, DomainError> {
        validate_name(&name)?;
        validate_price(price)?;
        Ok(Self {
            id,
            name,
            price,
            in_stock,
        })
    }

    /// Fields are checked on construction; this re-checks a value that may
    /// have been assembled outside this module, such as a test double.
    pub fn validate(&self) -> Result<(), DomainError> {
        validate_name(&self.name)?;
        validate_price(self.price)
    }

    pub fn id(&self) -> &EntityId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn in_stock(&self) -> bool {
        self.in_stock
    }

    /// Merge a patch into a new record with the same id.
    ///
    /// Absent fields keep their current value; the merged record is
    /// validated again.
    pub fn with_changes(&self, patch: EntityPatch) -> Result<Self, DomainError> {
        Self::from_parts(
            self.id.clone(),
            patch.name.unwrap_or_else(|| self.name.clone()),
            patch.price.unwrap_or(self.price),
            patch.in_stock.unwrap_or(self.in_stock),
        )
    }
}

/// Optional field updates applied by [`Entity::with_changes`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntityPatch {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub in_stock: Option<bool>,
}

impl EntityPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    pub fn in_stock(mut self, in_stock: bool) -> Self {
        self.in_stock = Some(in_stock);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.price.is_none() && self.in_stock.is_none()
    }
}

fn validate_name(name: &str) -> Result<(), DomainError> {
    if name.trim().is_empty() {
        return Err(DomainError::EmptyName);
    }
    Ok(())
}

fn validate_price(price: f64) -> Result<(), DomainError> {
    if !price.is_finite() {
        return Err(DomainError::NonFinitePrice);
    }
    if price < 0.0 {
        return Err(DomainError::NegativePrice { price });
    }
    Ok(())
}
