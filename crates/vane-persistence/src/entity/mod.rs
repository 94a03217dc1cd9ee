//! SeaORM entity definitions
//!
//! Every child table references `namespaces."key"` with `ON DELETE CASCADE`;
//! see `conf/*-schema.sql` for the DDL.

pub mod constraints;
pub mod flags;
pub mod namespaces;
pub mod rules;
pub mod segments;

pub mod prelude {
    pub use super::constraints::Entity as Constraints;
    pub use super::flags::Entity as Flags;
    pub use super::namespaces::Entity as Namespaces;
    pub use super::rules::Entity as Rules;
    pub use super::segments::Entity as Segments;
}
