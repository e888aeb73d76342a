//! Resolver factories
//!
//! Each factory is a builder that validates its preconditions in `build()` and
//! returns an [`async_graphql::dynamic::Field`] ready to be added to an object:
//!
//! - [`ScalarResolverBuilder`]: follow a foreign key on the parent to a single entity
//! - [`VectorResolverBuilder`]: page the entities whose foreign key points at the parent
//! - [`RootByIdBuilder`]: root lookup by primary key
//! - [`RootPageBuilder`]: root paging query
//!
//! ```rust,ignore
//! let group = Object::new(Group::type_name())
//!     .field(common::id_field::<Group>())
//!     .field(
//!         vector_resolver::<Group, Membership>()
//!             .foreign_key("group_id")
//!             .loader(LoaderRegistry::lambda::<Membership>())
//!             .where_filter::<MembershipWhereFilter>()
//!             .name("memberships")
//!             .build()?,
//!     );
//! ```

pub mod common;
pub mod root;
pub mod scalar;
pub mod vector;

pub use common::{OperationResult, entity_fields, register_scalars};
pub use root::{RootByIdBuilder, RootPageBuilder, root_by_id, root_page};
pub use scalar::{ScalarResolverBuilder, scalar_resolver};
pub use vector::{VectorResolverBuilder, vector_resolver};

use async_graphql::ErrorExtensions;
use async_graphql::dynamic::{Field, InputValue, ObjectAccessor, ResolverContext, TypeRef};

use crate::config::PagingConfig;
use crate::core::ResolverError;
use crate::core::filter::{self, Filter};

/// GraphQL scalar used for primary and foreign keys
pub const UUID_SCALAR: &str = "UUID";

/// GraphQL scalar used for timestamps
pub const DATETIME_SCALAR: &str = "DateTime";

/// Borrow the parent entity of the field being resolved
pub(crate) fn parent<'a, P: 'static>(
    ctx: &ResolverContext<'a>,
    expected: &str,
) -> async_graphql::Result<&'a P> {
    ctx.parent_value.downcast_ref::<P>().ok_or_else(|| {
        ResolverError::Downcast {
            expected: expected.to_string(),
        }
        .extend()
    })
}

/// Arguments of a paged field after defaults and bounds are applied
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PageArgs {
    pub skip: i64,
    pub limit: i64,
    pub where_: Option<Filter>,
}

impl PageArgs {
    /// Read `skip`, `limit` and `where` from the field arguments.
    ///
    /// `skip` and `limit` pass through as given, except that a configured
    /// `max_limit` caps `limit`. A missing or null `where` yields `None`, never
    /// an empty mapping.
    pub fn read(args: &ObjectAccessor<'_>, paging: &PagingConfig) -> async_graphql::Result<Self> {
        let skip = int_arg(args, "skip", paging.skip)?;
        let limit = paging.cap_limit(int_arg(args, "limit", paging.limit)?);

        let where_ = match args.get("where") {
            Some(value) if !value.is_null() => filter::from_gql(value.as_value()),
            _ => None,
        };

        Ok(Self {
            skip,
            limit,
            where_,
        })
    }
}

fn int_arg(args: &ObjectAccessor<'_>, name: &str, default: i64) -> async_graphql::Result<i64> {
    match args.get(name) {
        Some(value) if !value.is_null() => value.i64().map_err(|e| {
            ResolverError::InvalidArgument {
                name: name.to_string(),
                message: e.message,
            }
            .extend()
        }),
        _ => Ok(default),
    }
}

/// Add the `skip`, `limit` and optional `where` arguments to a paged field
pub(crate) fn with_page_arguments(
    field: Field,
    paging: &PagingConfig,
    where_type: Option<&str>,
) -> Field {
    let field = field
        .argument(InputValue::new("skip", TypeRef::named_nn(TypeRef::INT)).default_value(paging.skip))
        .argument(
            InputValue::new("limit", TypeRef::named_nn(TypeRef::INT)).default_value(paging.limit),
        );

    match where_type {
        Some(where_type) => field.argument(InputValue::new("where", TypeRef::named(where_type))),
        None => field,
    }
}

/// Default field name for a foreign key: `group_id` becomes `group`
pub(crate) fn field_name_for(foreign_key: &str) -> String {
    foreign_key
        .strip_suffix("_id")
        .filter(|name| !name.is_empty())
        .unwrap_or(foreign_key)
        .to_string()
}
