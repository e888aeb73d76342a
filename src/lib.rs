//! # gql-ug
//!
//! Generic resolver factories for GraphQL data-access layers built on
//! `async-graphql`'s dynamic schema.
//!
//! ## Features
//!
//! - **Scalar references**: follow a foreign key on the parent to a single entity
//! - **Paged relations**: list the entities whose foreign key points at the parent
//! - **Root queries**: lookup by id and paging with a `where` filter
//! - **Shared entity fields**: id, names, timestamps, createdby/changedby
//! - **Field permissions**: policies checked before any collaborator is called
//! - **In-memory loader**: for tests, demos and development
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use gql_ug::prelude::*;
//!
//! let memberships = InMemoryLoader::<Membership>::new();
//! let loaders = LoaderRegistry::new().with::<Membership>(memberships.shared());
//!
//! let group = with_fields(Object::new("GroupGQLModel"), entity_fields::<Group, User>()?)
//!     .field(
//!         vector_resolver::<Group, Membership>()
//!             .foreign_key("group_id")
//!             .loader(LoaderRegistry::lambda::<Membership>())
//!             .where_filter::<MembershipWhereFilter>()
//!             .name("memberships")
//!             .build()?,
//!     );
//!
//! let query = Object::new("Query")
//!     .field(root_by_id::<Group>("groupById").build()?)
//!     .field(
//!         root_page::<Group>("groupPage")
//!             .loader(LoaderRegistry::lambda::<Group>())
//!             .where_filter::<GroupWhereFilter>()
//!             .build()?,
//!     );
//! ```

pub mod config;
pub mod core;
pub mod resolvers;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core Traits ===
    pub use crate::core::{
        AuthContext, AuthPolicy, Entity, FieldValue, Filter, GraphType, Loader, LoaderLambda,
        LoaderRegistry, Permission, PermissionRef, ResolverError, WhereFilter, base_attribute,
        loader_lambda,
    };

    // === Resolver factories ===
    pub use crate::resolvers::common::{
        changedby_field, created_field, createdby_field, id_field, lastchange_field,
        name_en_field, name_field, with_fields,
    };
    pub use crate::resolvers::{
        OperationResult, entity_fields, register_scalars, root_by_id, root_page, scalar_resolver,
        vector_resolver,
    };

    // === Storage ===
    pub use crate::storage::InMemoryLoader;

    // === Config ===
    pub use crate::config::{PagingConfig, ResolverConfig};

    // === Server ===
    pub use crate::server::{GraphQLExposure, serve};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_graphql::Context;
    pub use async_graphql::dynamic::{InputObject, InputValue, Object, Schema, TypeRef};
    pub use async_trait::async_trait;
    pub use chrono::{DateTime, Utc};
    pub use uuid::Uuid;
}
