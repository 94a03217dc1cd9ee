//! Flag entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::pagination::Paginated;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "flags")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub namespace_key: String,
    #[sea_orm(primary_key, auto_increment = false)]
    pub key: String,
    pub name: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub enabled: bool,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::namespaces::Entity",
        from = "Column::NamespaceKey",
        to = "super::namespaces::Column::Key",
        on_delete = "Cascade"
    )]
    Namespace,
}

impl Related<super::namespaces::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Namespace.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Paginated for Entity {
    fn created_column() -> Column {
        Column::CreatedAt
    }

    fn key_column() -> Column {
        Column::Key
    }

    fn tie_break_columns() -> Vec<Column> {
        vec![Column::NamespaceKey, Column::Key]
    }

    fn cursor_key(model: &Model) -> &str {
        &model.key
    }
}
