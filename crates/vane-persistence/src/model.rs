//! Domain model types for the storage layer
//!
//! These types are returned from the storage traits, decoupled from the
//! SeaORM entities that back them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::{constraints, flags, namespaces, rules, segments};

/// A page of results plus the cursor for the following page
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultSet<T> {
    pub results: Vec<T>,
    /// Absent once the end of the sequence is reached
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
}

impl<T> ResultSet<T> {
    pub fn new(results: Vec<T>, next_page_token: Option<String>) -> Self {
        Self {
            results,
            next_page_token,
        }
    }

    pub fn empty() -> Self {
        Self {
            results: Vec::new(),
            next_page_token: None,
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> ResultSet<U> {
        ResultSet {
            results: self.results.into_iter().map(f).collect(),
            next_page_token: self.next_page_token,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Namespace {
    pub key: String,
    pub name: String,
    pub description: String,
    pub protected: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<namespaces::Model> for Namespace {
    fn from(m: namespaces::Model) -> Self {
        Self {
            key: m.key,
            name: m.name,
            description: m.description,
            protected: m.protected,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flag {
    pub namespace_key: String,
    pub key: String,
    pub name: String,
    pub description: String,
    pub enabled: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<flags::Model> for Flag {
    fn from(m: flags::Model) -> Self {
        Self {
            namespace_key: m.namespace_key,
            key: m.key,
            name: m.name,
            description: m.description,
            enabled: m.enabled,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

/// How a segment combines its constraints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchType {
    #[default]
    All,
    Any,
}

impl From<i32> for MatchType {
    fn from(value: i32) -> Self {
        match value {
            1 => MatchType::Any,
            _ => MatchType::All,
        }
    }
}

impl From<MatchType> for i32 {
    fn from(value: MatchType) -> Self {
        match value {
            MatchType::All => 0,
            MatchType::Any => 1,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    pub namespace_key: String,
    pub key: String,
    pub name: String,
    pub description: String,
    pub match_type: MatchType,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<segments::Model> for Segment {
    fn from(m: segments::Model) -> Self {
        Self {
            namespace_key: m.namespace_key,
            key: m.key,
            name: m.name,
            description: m.description,
            match_type: MatchType::from(m.match_type),
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

/// Value type a constraint compares against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComparisonType {
    #[default]
    Unknown,
    String,
    Number,
    Boolean,
    DateTime,
}

impl From<i32> for ComparisonType {
    fn from(value: i32) -> Self {
        match value {
            1 => ComparisonType::String,
            2 => ComparisonType::Number,
            3 => ComparisonType::Boolean,
            4 => ComparisonType::DateTime,
            _ => ComparisonType::Unknown,
        }
    }
}

impl From<ComparisonType> for i32 {
    fn from(value: ComparisonType) -> Self {
        match value {
            ComparisonType::Unknown => 0,
            ComparisonType::String => 1,
            ComparisonType::Number => 2,
            ComparisonType::Boolean => 3,
            ComparisonType::DateTime => 4,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Constraint {
    pub id: String,
    pub namespace_key: String,
    pub segment_key: String,
    pub r#type: ComparisonType,
    pub property: String,
    pub operator: String,
    pub value: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<constraints::Model> for Constraint {
    fn from(m: constraints::Model) -> Self {
        Self {
            id: m.id,
            namespace_key: m.namespace_key,
            segment_key: m.segment_key,
            r#type: ComparisonType::from(m.r#type),
            property: m.property,
            operator: m.operator,
            value: m.value,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rule {
    pub id: String,
    pub namespace_key: String,
    pub flag_key: String,
    pub segment_key: String,
    pub rank: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<rules::Model> for Rule {
    fn from(m: rules::Model) -> Self {
        Self {
            id: m.id,
            namespace_key: m.namespace_key,
            flag_key: m.flag_key,
            segment_key: m.segment_key,
            rank: m.rank,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateNamespaceRequest {
    pub key: String,
    pub name: String,
    pub description: String,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateNamespaceRequest {
    pub key: String,
    pub name: String,
    pub description: String,
}

/// An empty `namespace_key` targets the default namespace
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFlagRequest {
    pub namespace_key: String,
    pub key: String,
    pub name: String,
    pub description: String,
    pub enabled: bool,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSegmentRequest {
    pub namespace_key: String,
    pub key: String,
    pub name: String,
    pub description: String,
    pub match_type: MatchType,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateConstraintRequest {
    pub namespace_key: String,
    pub segment_key: String,
    pub r#type: ComparisonType,
    pub property: String,
    pub operator: String,
    pub value: String,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRuleRequest {
    pub namespace_key: String,
    pub flag_key: String,
    pub segment_key: String,
    pub rank: i32,
}
