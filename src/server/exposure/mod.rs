//! API Exposure modules
//!
//! Each exposure type consumes a finished schema and produces a Router for its protocol.

pub mod graphql;

pub use graphql::GraphQLExposure;
