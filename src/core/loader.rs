//! Loader abstraction used by paged resolvers

use anyhow::Result;
use async_graphql::Context;
use async_trait::async_trait;
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::core::Entity;
use crate::core::filter::Filter;

/// Paged data access for one entity type
///
/// Implementations own the filtering and ordering semantics; the resolvers only
/// forward what the caller asked for.
#[async_trait]
pub trait Loader<T: Entity>: Send + Sync {
    /// Return one page of entities
    ///
    /// * `where_` - the caller-supplied filter, `None` when the caller gave none
    /// * `extendedfilter` - fixed constraints added by the resolver (e.g. a foreign key)
    async fn page(
        &self,
        skip: i64,
        limit: i64,
        where_: Option<Filter>,
        extendedfilter: Option<Filter>,
    ) -> Result<Vec<T>>;

    /// Load a single entity by primary key
    async fn load(&self, id: Uuid) -> Result<Option<T>>;
}

/// Supplies a loader from the request context
pub type LoaderLambda<T> = Arc<dyn Fn(&Context<'_>) -> Option<Arc<dyn Loader<T>>> + Send + Sync>;

/// Wrap a closure as a [`LoaderLambda`]
pub fn loader_lambda<T, F>(f: F) -> LoaderLambda<T>
where
    T: Entity,
    F: Fn(&Context<'_>) -> Option<Arc<dyn Loader<T>>> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Registry of loaders keyed by entity type
///
/// Put it into the schema (or request) data; [`LoaderRegistry::lambda`] then reads
/// the right loader back while resolving.
#[derive(Default, Clone)]
pub struct LoaderRegistry {
    loaders: HashMap<TypeId, Arc<dyn Any + Send + Sync>>,
}

impl LoaderRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            loaders: HashMap::new(),
        }
    }

    /// Register the loader for entity type `T`, replacing any previous one
    pub fn register<T: Entity>(&mut self, loader: Arc<dyn Loader<T>>) {
        self.loaders.insert(TypeId::of::<T>(), Arc::new(loader));
    }

    /// Builder-style [`register`](Self::register)
    pub fn with<T: Entity>(mut self, loader: Arc<dyn Loader<T>>) -> Self {
        self.register(loader);
        self
    }

    /// Get the loader for entity type `T`
    pub fn get<T: Entity>(&self) -> Option<Arc<dyn Loader<T>>> {
        self.loaders
            .get(&TypeId::of::<T>())
            .and_then(|any| any.downcast_ref::<Arc<dyn Loader<T>>>())
            .cloned()
    }

    /// Number of registered loaders
    pub fn len(&self) -> usize {
        self.loaders.len()
    }

    /// Whether no loader is registered
    pub fn is_empty(&self) -> bool {
        self.loaders.is_empty()
    }

    /// A loader lambda that looks `T`'s loader up in the context's registry
    pub fn lambda<T: Entity>() -> LoaderLambda<T> {
        loader_lambda(|info: &Context<'_>| Self::from_context::<T>(info))
    }

    /// Look `T`'s loader up from a resolver context
    pub fn from_context<T: Entity>(info: &Context<'_>) -> Option<Arc<dyn Loader<T>>> {
        info.data_opt::<LoaderRegistry>()
            .and_then(|registry| registry.get::<T>())
    }
}
