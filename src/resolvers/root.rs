//! Root query resolvers: lookup by id and paging

use async_graphql::ErrorExtensions;
use async_graphql::dynamic::{Field, FieldFuture, FieldValue, InputValue, TypeRef};
use std::marker::PhantomData;
use uuid::Uuid;

use super::{PageArgs, UUID_SCALAR, with_page_arguments};
use crate::config::ResolverConfig;
use crate::core::filter::WhereFilter;
use crate::core::{GraphType, LoaderLambda, ResolverError};

/// Start building a root `T` lookup named `name`
pub fn root_by_id<T: GraphType>(name: impl Into<String>) -> RootByIdBuilder<T> {
    RootByIdBuilder::new(name)
}

/// Start building a root `T` paging query named `name`
pub fn root_page<T: GraphType>(name: impl Into<String>) -> RootPageBuilder<T> {
    RootPageBuilder::new(name)
}

/// Builder for a root field `name(id: UUID!): T` backed by [`GraphType::resolve_reference`]
pub struct RootByIdBuilder<T> {
    name: String,
    description: Option<String>,
    config: ResolverConfig,
    _marker: PhantomData<fn() -> T>,
}

impl<T: GraphType> RootByIdBuilder<T> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            config: ResolverConfig::default(),
            _marker: PhantomData,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Description used when none was set explicitly
    pub fn config(mut self, config: &ResolverConfig) -> Self {
        self.config = config.clone();
        self
    }

    pub fn build(self) -> Result<Field, ResolverError> {
        let description = self
            .description
            .unwrap_or(self.config.descriptions.by_id);
        let field = Field::new(self.name, TypeRef::named(T::type_name()), |ctx| {
            FieldFuture::new(async move {
                let id_arg = ctx.args.try_get("id")?;
                let raw = id_arg.string()?;
                let id = Uuid::parse_str(raw).map_err(|e| {
                    ResolverError::InvalidArgument {
                        name: "id".to_string(),
                        message: e.to_string(),
                    }
                    .extend()
                })?;

                tracing::debug!(target_type = T::type_name(), id = %id, "Resolving by id");

                let entity = T::resolve_reference(ctx.ctx, id)
                    .await
                    .map_err(|e| ResolverError::loader(T::type_name(), e).extend())?;

                Ok(entity.map(FieldValue::owned_any))
            })
        })
        .description(description)
        .argument(InputValue::new("id", TypeRef::named_nn(UUID_SCALAR)));

        Ok(field)
    }
}

/// Builder for a root paged field `name(skip, limit, where): [T!]!`
///
/// The loader is called without an `extendedfilter`. A where-filter type is required.
pub struct RootPageBuilder<T> {
    name: String,
    description: Option<String>,
    loader: Option<LoaderLambda<T>>,
    where_type: Option<&'static str>,
    skip: Option<i64>,
    limit: Option<i64>,
    config: ResolverConfig,
    _marker: PhantomData<fn() -> T>,
}

impl<T: GraphType> RootPageBuilder<T> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            loader: None,
            where_type: None,
            skip: None,
            limit: None,
            config: ResolverConfig::default(),
            _marker: PhantomData,
        }
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
        let where_type = self
            .where_type
            .ok_or_else(|| ResolverError::MissingWhereFilter {
                target_type: target_type.to_string(),
            })?;
        let loader = self.loader.ok_or_else(|| ResolverError::MissingLoader {
            target_type: target_type.to_string(),
        })?;
        let paging = self.config.paging.with_overrides(self.skip, self.limit);
        let description = self
            .description
            .unwrap_or(self.config.descriptions.paged);
        let arguments = paging.clone();

        let field = Field::new(self.name, TypeRef::named_nn_list_nn(target_type), move |ctx| {
            let lambda = loader.clone();
            let paging = paging.clone();
            FieldFuture::new(async move {
                let args = PageArgs::read(&ctx.args, &paging)?;

                let Some(loader) = lambda(ctx.ctx) else {
                    tracing::warn!(target_type, "No loader available");
                    return Err(ResolverError::LoaderUnavailable {
                        target_type: target_type.to_string(),
                    }
                    .extend());
                };

                tracing::debug!(
                    target_type,
                    skip = args.skip,
                    limit = args.limit,
                    has_where = args.where_.is_some(),
                    "Loading root page"
                );

                let items = loader
                    .page(args.skip, args.limit, args.where_, None)
                    .await
                    .map_err(|e| ResolverError::loader(target_type, e).extend())?;

                Ok(Some(FieldValue::list(
                    items.into_iter().map(FieldValue::owned_any),
                )))
            })
        })
        .description(description);

        Ok(with_page_arguments(field, &arguments, Some(where_type)))
    }
}
