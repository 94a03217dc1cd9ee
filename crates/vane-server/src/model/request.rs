//! Request and response models for server operations

use serde::{Deserialize, Serialize};

use vane_common::{ALL_NAMESPACES, Result, StorageError, is_valid_key};
use vane_persistence::{
    CreateNamespaceRequest, Flag, Namespace, NamespaceScope, Order, QueryOption, QueryParams,
    Segment, UpdateNamespaceRequest,
};

/// Validation run before a request reaches the store
pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn validate_key(field: &str, key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(StorageError::invalid_field(field, "must not be empty"));
    }
    if !is_valid_key(key) {
        return Err(StorageError::invalid_field(
            field,
            "contains invalid characters",
        ));
    }
    Ok(())
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetNamespaceRequest {
    pub key: String,
}

impl Validate for GetNamespaceRequest {
    fn validate(&self) -> Result<()> {
        validate_key("key", &self.key)
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteNamespaceRequest {
    pub key: String,
}

impl Validate for DeleteNamespaceRequest {
    fn validate(&self) -> Result<()> {
        validate_key("key", &self.key)
    }
}

impl Validate for CreateNamespaceRequest {
    fn validate(&self) -> Result<()> {
        validate_key("key", &self.key)?;
        if self.name.is_empty() {
            return Err(StorageError::invalid_field("name", "must not be empty"));
        }
        Ok(())
    }
}

impl Validate for UpdateNamespaceRequest {
    fn validate(&self) -> Result<()> {
        validate_key("key", &self.key)?;
        if self.name.is_empty() {
            return Err(StorageError::invalid_field("name", "must not be empty"));
        }
        Ok(())
    }
}

/// Paging parameters shared by every list operation.
///
/// Zero limit means unbounded; an empty order means ascending.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ListRequest {
    pub namespace_key: String,
    pub limit: i64,
    pub offset: i64,
    pub page_token: String,
    pub order: String,
}

impl ListRequest {
    pub fn scope(&self) -> NamespaceScope {
        NamespaceScope::parse(&self.namespace_key)
    }

    /// Options in request order: an explicit offset overrides the token's
    pub fn query_params(&self) -> Result<QueryParams> {
        let mut options = Vec::new();

        if !self.order.is_empty() {
            options.push(QueryOption::Order(self.order.parse::<Order>()?));
        }
        if !self.namespace_key.is_empty() {
            options.push(QueryOption::Namespace(self.namespace_key.clone()));
        }
        if self.limit > 0 {
            options.push(QueryOption::Limit(self.limit));
        }
        if !self.page_token.is_empty() {
            options.push(QueryOption::PageToken(self.page_token.clone()));
        }
        if self.offset != 0 {
            options.push(QueryOption::Offset(self.offset));
        }

        Ok(QueryParams::with_options(options))
    }
}

impl Validate for ListRequest {
    fn validate(&self) -> Result<()> {
        if self.limit < 0 {
            return Err(StorageError::invalid_field("limit", "must be non-negative"));
        }
        if self.offset < 0 {
            return Err(StorageError::invalid_field("offset", "must be non-negative"));
        }
        if !self.namespace_key.is_empty() && self.namespace_key != ALL_NAMESPACES {
            validate_key("namespaceKey", &self.namespace_key)?;
        }
        Ok(())
    }
}

/// One page of namespaces plus the total across all pages
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NamespaceList {
    pub namespaces: Vec<Namespace>,
    pub next_page_token: String,
    pub total_count: u64,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlagList {
    pub flags: Vec<Flag>,
    pub next_page_token: String,
    pub total_count: u64,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentList {
    pub segments: Vec<Segment>,
    pub next_page_token: String,
    pub total_count: u64,
}
