//! Entity traits shared by every GraphQL object type

use anyhow::Result;
use async_graphql::Context;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::core::field::FieldValue;

/// Base trait for all entities exposed through the resolver factories.
///
/// All entities have:
/// - id: Unique identifier
/// - name / name_en: Local and English display names
/// - lastchange: Last modification timestamp
/// - created_by / changedby: Identifiers of the users that created or last changed it
pub trait Entity: Clone + Send + Sync + 'static {
    /// Get the unique identifier for this entity instance
    fn id(&self) -> Uuid;

    /// Get the name of this entity
    fn name(&self) -> &str;

    /// Get the English name of this entity
    fn name_en(&self) -> &str;

    /// Get the last update timestamp
    fn lastchange(&self) -> DateTime<Utc>;

    /// Get the creation timestamp.
    ///
    /// Entities that do not track creation separately report their last change.
    fn created(&self) -> Option<DateTime<Utc>> {
        Some(self.lastchange())
    }

    /// Id of the user who created the entity
    fn created_by(&self) -> Option<Uuid> {
        None
    }

    /// Id of the user who made the last change
    fn changedby(&self) -> Option<Uuid> {
        None
    }

    /// Read an attribute by name.
    ///
    /// Returns `None` when the entity has no attribute of that name, and
    /// `Some(FieldValue::Null)` when the attribute exists but is empty.
    /// The default implementation knows the base attributes only; entities
    /// with foreign keys override it and fall back to [`base_attribute`].
    fn attribute(&self, name: &str) -> Option<FieldValue> {
        base_attribute(self, name)
    }
}

/// Attribute lookup for the fields every [`Entity`] carries
pub fn base_attribute<E: Entity + ?Sized>(entity: &E, name: &str) -> Option<FieldValue> {
    match name {
        "id" => Some(FieldValue::Uuid(entity.id())),
        "name" => Some(FieldValue::String(entity.name().to_string())),
        "name_en" => Some(FieldValue::String(entity.name_en().to_string())),
        "lastchange" => Some(FieldValue::DateTime(entity.lastchange())),
        "created" => Some(
            entity
                .created()
                .map(FieldValue::DateTime)
                .unwrap_or(FieldValue::Null),
        ),
        "created_by" => Some(entity.created_by().into()),
        "changedby" => Some(entity.changedby().into()),
        _ => None,
    }
}

/// An entity that is published as a GraphQL object type and can be fetched by id.
#[async_trait]
pub trait GraphType: Entity {
    /// The GraphQL object type name (e.g. "UserGQLModel")
    fn type_name() -> &'static str;

    /// Resolve an entity from its primary key
    ///
    /// `info` is the request context of the field being resolved; implementations
    /// usually pull their loader out of it.
    async fn resolve_reference(info: &Context<'_>, id: Uuid) -> Result<Option<Self>>;
}
