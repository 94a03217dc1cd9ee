//! Namespace entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::pagination::Paginated;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "namespaces")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub key: String,
    pub name: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub protected: bool,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::flags::Entity")]
    Flags,
    #[sea_orm(has_many = "super::segments::Entity")]
    Segments,
}

impl Related<super::flags::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Flags.def()
    }
}

impl Related<super::segments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Segments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Paginated for Entity {
    const SCOPED: bool = false;

    fn created_column() -> Column {
        Column::CreatedAt
    }

    fn key_column() -> Column {
        Column::Key
    }

    fn tie_break_columns() -> Vec<Column> {
        vec![Column::Key]
    }

    fn cursor_key(model: &Model) -> &str {
        &model.key
    }
}
