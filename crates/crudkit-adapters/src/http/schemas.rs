//! Wire format of the record.

use serde::{Deserialize, Serialize};

use crudkit_core::domain::{DomainError, Entity, EntityId, EntityPatch};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityResponse {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub in_stock: bool,
}

impl From<Entity> for EntityResponse {
    fn from(entity: Entity) -> Self {
        Self {
            id: entity.id().as_str().to_string(),
            name: entity.name().to_string(),
            price: entity.price(),
            in_stock: entity.in_stock(),
        }
    }
}

fn default_in_stock() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEntityRequest {
    pub name: String,
    pub price: f64,
    #[serde(default = "default_in_stock")]
    pub in_stock: bool,
}

impl CreateEntityRequest {
    /// Build a record under a freshly generated id.
    pub fn into_entity(self) -> Result<Entity, DomainError> {
        Entity::from_parts(EntityId::generate(), self.name, self.price, self.in_stock)
    }
}

/// Every field optional; absent fields keep their stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateEntityRequest {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub in_stock: Option<bool>,
}

impl From<UpdateEntityRequest> for EntityPatch {
    fn from(request: UpdateEntityRequest) -> Self {
        EntityPatch {
            name: request.name,
            price: request.price,
            in_stock: request.in_stock,
        }
    }
}
