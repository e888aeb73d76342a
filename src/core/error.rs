//! Typed errors for resolver construction and execution
//!
//! Construction errors are returned by the factory builders before any field
//! exists. Execution errors surface as GraphQL errors carrying a `code`
//! extension (see [`ResolverError::error_code`]).
//!
//! # Example
//!
//! ```rust,ignore
//! match vector_resolver::<Group, Membership>().build() {
//!     Err(ResolverError::MissingForeignKey { target_type }) => {
//!         eprintln!("forgot the foreign key for {}", target_type);
//!     }
//!     Err(e) => eprintln!("Other error: {}", e),
//!     Ok(field) => query = query.field(field),
//! }
//! ```

use async_graphql::ErrorExtensions;
use std::fmt;

/// Errors raised by the resolver factories and the resolvers they build
#[derive(Debug, Clone, PartialEq)]
pub enum ResolverError {
    /// A factory was built without a foreign-key attribute name
    MissingForeignKey { target_type: String },

    /// A paged factory was built without a loader lambda
    MissingLoader { target_type: String },

    /// A root paging factory was built without a where-filter type
    MissingWhereFilter { target_type: String },

    /// The parent entity has no attribute with the configured name
    UnknownAttribute {
        parent_type: String,
        attribute: String,
    },

    /// The foreign-key attribute holds something other than an identifier
    InvalidForeignKey { attribute: String, value: String },

    /// The loader lambda returned no loader for this request
    LoaderUnavailable { target_type: String },

    /// A permission refused access to the field
    PermissionDenied { message: String },

    /// The parent value is not of the expected entity type
    Downcast { expected: String },

    /// An argument could not be interpreted
    InvalidArgument { name: String, message: String },

    /// The loader or reference resolver failed
    Loader { target_type: String, message: String },
}

impl fmt::Display for ResolverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolverError::MissingForeignKey { target_type } => {
                write!(f, "Resolver for {} requires a foreign key name", target_type)
            }
            ResolverError::MissingLoader { target_type } => {
                write!(f, "Resolver for {} requires a loader", target_type)
            }
            ResolverError::MissingWhereFilter { target_type } => {
                write!(f, "Resolver for {} requires a where filter type", target_type)
            }
            ResolverError::UnknownAttribute {
                parent_type,
                attribute,
            } => {
                write!(f, "{} has no attribute '{}'", parent_type, attribute)
            }
            ResolverError::InvalidForeignKey { attribute, value } => {
                write!(f, "Attribute '{}' is not an identifier: {}", attribute, value)
            }
            ResolverError::LoaderUnavailable { target_type } => {
                write!(f, "No loader available for {}", target_type)
            }
            ResolverError::PermissionDenied { message } => write!(f, "{}", message),
            ResolverError::Downcast { expected } => {
                write!(f, "Parent value is not a {}", expected)
            }
            ResolverError::InvalidArgument { name, message } => {
                write!(f, "Invalid argument '{}': {}", name, message)
            }
            ResolverError::Loader {
                target_type,
                message,
            } => {
                write!(f, "Failed to load {}: {}", target_type, message)
            }
        }
    }
}

impl std::error::Error for ResolverError {}

impl ResolverError {
    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            ResolverError::MissingForeignKey { .. } => "MISSING_FOREIGN_KEY",
            ResolverError::MissingLoader { .. } => "MISSING_LOADER",
            ResolverError::MissingWhereFilter { .. } => "MISSING_WHERE_FILTER",
            ResolverError::UnknownAttribute { .. } => "UNKNOWN_ATTRIBUTE",
            ResolverError::InvalidForeignKey { .. } => "INVALID_FOREIGN_KEY",
            ResolverError::LoaderUnavailable { .. } => "LOADER_UNAVAILABLE",
            ResolverError::PermissionDenied { .. } => "FORBIDDEN",
            ResolverError::Downcast { .. } => "INTERNAL_ERROR",
            ResolverError::InvalidArgument { .. } => "BAD_USER_INPUT",
            ResolverError::Loader { .. } => "LOADER_ERROR",
        }
    }

    pub(crate) fn loader(target_type: &str, err: anyhow::Error) -> Self {
        ResolverError::Loader {
            target_type: target_type.to_string(),
            message: err.to_string(),
        }
    }
}

impl ErrorExtensions for ResolverError {
    fn extend(&self) -> async_graphql::Error {
        async_graphql::Error::new(self.to_string()).extend_with(|_, e| e.set("code", self.error_code()))
    }
}
