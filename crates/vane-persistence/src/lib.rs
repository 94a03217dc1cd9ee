//! Vane Persistence - Relational storage for feature-flag content
//!
//! This crate provides:
//! - SeaORM entity definitions for namespaces, flags, segments, constraints, and rules
//! - Cursor-based pagination (page token codec, query options, list executor)
//! - Storage traits and the SQL-backed implementation
//! - The content reset engine that restores the default namespace

pub mod entity;
pub mod model;
pub mod pagination;
pub mod schema;
pub mod sql;
pub mod traits;

// Re-export sea-orm for convenience
pub use sea_orm;

// Re-export storage traits
pub use traits::{FlagStore, NamespaceStore, RuleStore, SegmentStore, Store};

// Re-export SQL backend
pub use sql::{BackendCapabilities, SqlStore, TimestampPrecision};

// Re-export pagination API
pub use pagination::{NamespaceScope, Order, QueryOption, QueryParams, QueryPlan};

// Re-export model types
pub use model::{
    ComparisonType, Constraint, CreateConstraintRequest, CreateFlagRequest,
    CreateNamespaceRequest, CreateRuleRequest, CreateSegmentRequest, Flag, MatchType, Namespace,
    ResultSet, Rule, Segment, UpdateNamespaceRequest,
};
