//! Scalar reference resolvers (foreign key on the parent → one entity)

use async_graphql::ErrorExtensions;
use async_graphql::dynamic::{Field, FieldFuture, FieldValue, TypeRef};
use std::marker::PhantomData;
use std::sync::Arc;

use super::{field_name_for, parent};
use crate::config::ResolverConfig;
use crate::core::permission::{self, PermissionRef};
use crate::core::{Entity, GraphType, ResolverError};

/// Start building a scalar reference resolver from `P` to `T`
pub fn scalar_resolver<P: Entity, T: GraphType>() -> ScalarResolverBuilder<P, T> {
    ScalarResolverBuilder::new()
}

/// Builder for a field resolving the foreign key of a `P` into a `T`.
///
/// The built field:
/// - checks its permissions first,
/// - fails if `P` has no attribute named after the foreign key,
/// - resolves to `null` without calling [`GraphType::resolve_reference`] when the key is empty,
/// - otherwise returns exactly what `T::resolve_reference` returns.
pub struct ScalarResolverBuilder<P, T> {
    foreign_key: Option<String>,
    name: Option<String>,
    description: Option<String>,
    permissions: Vec<PermissionRef>,
    config: ResolverConfig,
    _marker: PhantomData<fn() -> (P, T)>,
}

impl<P: Entity, T: GraphType> ScalarResolverBuilder<P, T> {
    pub fn new() -> Self {
        Self {
            foreign_key: None,
            name: None,
            description: None,
            permissions: Vec::new(),
            config: ResolverConfig::default(),
            _marker: PhantomData,
        }
    }

    /// Attribute of `P` holding the id of the related `T`
    pub fn foreign_key(mut self, foreign_key: impl Into<String>) -> Self {
        self.foreign_key = Some(foreign_key.into());
        self
    }

    /// GraphQL field name; defaults to the foreign key without its `_id` suffix
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Guard the field with a permission; all permissions must pass
    pub fn permission(mut self, permission: PermissionRef) -> Self {
        self.permissions.push(permission);
        self
    }

    pub fn permissions(mut self, permissions: impl IntoIterator<Item = PermissionRef>) -> Self {
        self.permissions.extend(permissions);
        self
    }

    /// Description used when none was set explicitly
    pub fn config(mut self, config: &ResolverConfig) -> Self {
        self.config = config.clone();
        self
    }

    pub fn build(self) -> Result<Field, ResolverError> {
        let foreign_key = self
            .foreign_key
            .filter(|fk| !fk.is_empty())
            .ok_or_else(|| ResolverError::MissingForeignKey {
                target_type: T::type_name().to_string(),
            })?;
        let name = self.name.unwrap_or_else(|| field_name_for(&foreign_key));
        let description = self
            .description
            .unwrap_or(self.config.descriptions.by_id);
        let permissions = Arc::new(self.permissions);

        let field = Field::new(name, TypeRef::named(T::type_name()), move |ctx| {
            let foreign_key = foreign_key.clone();
            let permissions = permissions.clone();
            FieldFuture::new(async move {
                if let Err(message) = permission::check_all(&permissions, ctx.ctx).await {
                    tracing::warn!(target_type = T::type_name(), "Permission denied: {}", message);
                    return Err(ResolverError::PermissionDenied { message }.extend());
                }

                let parent = parent::<P>(&ctx, std::any::type_name::<P>())?;
                let value = parent.attribute(&foreign_key).ok_or_else(|| {
                    ResolverError::UnknownAttribute {
                        parent_type: std::any::type_name::<P>().to_string(),
                        attribute: foreign_key.clone(),
                    }
                    .extend()
                })?;

                if value.is_null() {
                    return Ok(None);
                }
                let id = value.as_uuid().ok_or_else(|| {
                    ResolverError::InvalidForeignKey {
                        attribute: foreign_key.clone(),
                        value: value.to_json().to_string(),
                    }
                    .extend()
                })?;

                tracing::debug!(
                    target_type = T::type_name(),
                    foreign_key = %foreign_key,
                    id = %id,
                    "Resolving reference"
                );

                let entity = T::resolve_reference(ctx.ctx, id)
                    .await
                    .map_err(|e| ResolverError::loader(T::type_name(), e).extend())?;

                Ok(entity.map(FieldValue::owned_any))
            })
        })
        .description(description);

        Ok(field)
    }
}

impl<P: Entity, T: GraphType> Default for ScalarResolverBuilder<P, T> {
    fn default() -> Self {
        Self::new()
    }
}
