//! Core module containing the traits and types the resolver factories build on

pub mod entity;
pub mod error;
pub mod field;
pub mod filter;
pub mod loader;
pub mod permission;

pub use entity::{Entity, GraphType, base_attribute};
pub use error::ResolverError;
pub use field::FieldValue;
pub use filter::{Filter, WhereFilter};
pub use loader::{Loader, LoaderLambda, LoaderRegistry, loader_lambda};
pub use permission::{AuthContext, AuthPolicy, Permission, PermissionRef};
