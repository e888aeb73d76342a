//! Paged vector resolvers (children whose foreign key points at the parent)

use async_graphql::ErrorExtensions;
use async_graphql::dynamic::{Field, FieldFuture, FieldValue, TypeRef};
use std::marker::PhantomData;

use super::{PageArgs, parent, with_page_arguments};
use crate::config::ResolverConfig;
use crate::core::filter::{self, WhereFilter};
use crate::core::{Entity, GraphType, LoaderLambda, ResolverError};

/// Start building a paged relation from `P` to the `T`s referencing it
pub fn vector_resolver<P: Entity, T: GraphType>() -> VectorResolverBuilder<P, T> {
    VectorResolverBuilder::new()
}

/// Builder for a paged list of `T` constrained by `{foreign_key: parent.id}`.
///
/// The built field takes `skip`, `limit` and, when a where-filter type is set,
/// an optional `where` argument. The loader receives the caller's `where` as a
/// plain mapping (or `None`) and the foreign-key constraint as `extendedfilter`.
pub struct VectorResolverBuilder<P, T> {
    foreign_key: Option<String>,
    name: Option<String>,
    description: Option<String>,
    loader: Option<LoaderLambda<T>>,
    where_type: Option<&'static str>,
    skip: Option<i64>,
    limit: Option<i64>,
    config: ResolverConfig,
    _marker: PhantomData<fn() -> P>,
}

impl<P: Entity, T: GraphType> VectorResolverBuilder<P, T> {
    pub fn new() -> Self {
        Self {
            foreign_key: None,
            name: None,
            description: None,
            loader: None,
            where_type: None,
            skip: None,
            limit: None,
            config: ResolverConfig::default(),
            _marker: PhantomData,
        }
    }

    /// Attribute of `T` holding the id of its `P`
    pub fn foreign_key(mut self, foreign_key: impl Into<String>) -> Self {
        self.foreign_key = Some(foreign_key.into());
        self
    }

    /// GraphQL field name; defaults to the target type name
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Where the loader comes from at query time
    pub fn loader(mut self, loader: LoaderLambda<T>) -> Self {
        self.loader = Some(loader);
        self
    }

    /// Input object type accepted by the `where` argument
    pub fn where_filter<W: WhereFilter>(mut self) -> Self {
        self.where_type = Some(W::type_name());
        self
    }

    /// Default `skip` argument value
    pub fn skip(mut self, skip: i64) -> Self {
        self.skip = Some(skip);
        self
    }

    /// Default `limit` argument value
    pub fn limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Paging defaults and description used where no explicit value was set
    pub fn config(mut self, config: &ResolverConfig) -> Self {
        self.config = config.clone();
        self
    }

    pub fn build(self) -> Result<Field, ResolverError> {
        let target_type = T::type_name();
        let foreign_key = self
            .foreign_key
            .filter(|fk| !fk.is_empty())
            .ok_or_else(|| ResolverError::MissingForeignKey {
                target_type: target_type.to_string(),
            })?;
        let loader = self.loader.ok_or_else(|| ResolverError::MissingLoader {
            target_type: target_type.to_string(),
        })?;
        let name = self.name.unwrap_or_else(|| target_type.to_string());
        let paging = self.config.paging.with_overrides(self.skip, self.limit);
        let description = self
            .description
            .unwrap_or(self.config.descriptions.paged);
        let arguments = paging.clone();

        let field = Field::new(name, TypeRef::named_nn_list_nn(target_type), move |ctx| {
            let foreign_key = foreign_key.clone();
            let lambda = loader.clone();
            let paging = paging.clone();
            FieldFuture::new(async move {
                let parent = parent::<P>(&ctx, std::any::type_name::<P>())?;
                let args = PageArgs::read(&ctx.args, &paging)?;
                let extended = filter::eq(&foreign_key, parent.id().to_string());
                tracing::trace!(target_type, ?extended, "Extended filter");

                let Some(loader) = lambda(ctx.ctx) else {
                    tracing::warn!(target_type, "No loader available");
                    return Err(ResolverError::LoaderUnavailable {
                        target_type: target_type.to_string(),
                    }
                    .extend());
                };

                tracing::debug!(
                    target_type,
                    foreign_key = %foreign_key,
                    parent_id = %parent.id(),
                    skip = args.skip,
                    limit = args.limit,
                    has_where = args.where_.is_some(),
                    "Loading page"
                );

                let items = loader
                    .page(args.skip, args.limit, args.where_, Some(extended))
                    .await
                    .map_err(|e| ResolverError::loader(target_type, e).extend())?;

                Ok(Some(FieldValue::list(
                    items.into_iter().map(FieldValue::owned_any),
                )))
            })
        })
        .description(description);

        Ok(with_page_arguments(field, &arguments, self.where_type))
    }
}

impl<P: Entity, T: GraphType> Default for VectorResolverBuilder<P, T> {
    fn default() -> Self {
        Self::new()
    }
}
