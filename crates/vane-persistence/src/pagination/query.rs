//! Query option builder
//!
//! Callers describe a listing as an ordered sequence of [`QueryOption`]s folded
//! left to right into [`QueryParams`]. Later options of the same kind replace
//! earlier ones. `QueryParams::build` validates the result and produces the
//! [`QueryPlan`] consumed by the list executor, before any backend call is made.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use vane_common::{ALL_NAMESPACES, DEFAULT_NAMESPACE, Result, StorageError};

use super::page_token;

/// Sort direction over the creation timestamp
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Order {
    #[default]
    Asc,
    Desc,
}

impl Order {
    pub fn as_str(self) -> &'static str {
        match self {
            Order::Asc => "asc",
            Order::Desc => "desc",
        }
    }
}

impl Display for Order {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Order {
    type Err = StorageError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(Order::Asc),
            "desc" => Ok(Order::Desc),
            _ => Err(StorageError::invalid_field(
                "order",
                &format!("unsupported value {:?}", s),
            )),
        }
    }
}

impl From<Order> for sea_orm::Order {
    fn from(order: Order) -> Self {
        match order {
            Order::Asc => sea_orm::Order::Asc,
            Order::Desc => sea_orm::Order::Desc,
        }
    }
}

/// Which namespaces a listing covers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NamespaceScope {
    Namespace(String),
    All,
}

impl NamespaceScope {
    /// `"*"` selects every namespace; an empty key selects the default one.
    pub fn parse(namespace: &str) -> Self {
        match namespace {
            ALL_NAMESPACES => NamespaceScope::All,
            "" => NamespaceScope::Namespace(DEFAULT_NAMESPACE.to_string()),
            key => NamespaceScope::Namespace(key.to_string()),
        }
    }
}

impl Default for NamespaceScope {
    fn default() -> Self {
        NamespaceScope::Namespace(DEFAULT_NAMESPACE.to_string())
    }
}

/// A single option setter
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryOption {
    Order(Order),
    /// Values `<= 0` mean unbounded
    Limit(i64),
    Offset(i64),
    PageToken(String),
    Namespace(String),
}

impl QueryOption {
    /// Apply this option, returning the updated parameters.
    pub fn apply(self, mut params: QueryParams) -> QueryParams {
        match self {
            QueryOption::Order(order) => params.order = order,
            QueryOption::Limit(limit) => params.limit = limit,
            QueryOption::Offset(offset) => {
                params.offset = Some(offset);
                params.offset_follows_token = params.page_token.is_some();
            }
            QueryOption::PageToken(token) => {
                params.page_token = Some(token);
                params.offset_follows_token = false;
            }
            QueryOption::Namespace(namespace) => params.namespace = Some(namespace),
        }
        params
    }
}

/// Raw, unvalidated listing parameters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    order: Order,
    limit: i64,
    offset: Option<i64>,
    page_token: Option<String>,
    namespace: Option<String>,
    /// Set when an explicit offset was applied after the page token
    offset_follows_token: bool,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: impl IntoIterator<Item = QueryOption>) -> Self {
        Self::default().apply(options)
    }

    pub fn apply(self, options: impl IntoIterator<Item = QueryOption>) -> Self {
        options
            .into_iter()
            .fold(self, |params, option| option.apply(params))
    }

    pub fn order(&self) -> Order {
        self.order
    }

    pub fn limit(&self) -> i64 {
        self.limit
    }

    /// Validate and normalize into a plan.
    pub fn build(&self) -> Result<QueryPlan> {
        let explicit_offset = match self.offset {
            Some(offset) if offset < 0 => {
                return Err(StorageError::invalid_field("offset", "must be non-negative"));
            }
            Some(offset) => offset as u64,
            None => 0,
        };

        let cursor = match self.page_token.as_deref() {
            Some(token) if !token.is_empty() => {
                let (key, offset) = page_token::decode(token)?;
                Some(PageCursor {
                    raw: token.to_string(),
                    key,
                    offset,
                })
            }
            _ => None,
        };

        let offset = match &cursor {
            Some(cursor) if !self.offset_follows_token => cursor.offset,
            _ => explicit_offset,
        };

        let limit = u64::try_from(self.limit).ok().filter(|limit| *limit > 0);

        let namespace = self
            .namespace
            .as_deref()
            .map(NamespaceScope::parse)
            .unwrap_or_default();

        Ok(QueryPlan {
            order: self.order,
            limit,
            offset,
            cursor,
            namespace,
        })
    }
}

/// Decoded page token kept alongside its raw form for error reporting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageCursor {
    pub raw: String,
    pub key: String,
    pub offset: u64,
}

/// Normalized listing plan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryPlan {
    pub order: Order,
    /// `None` means unbounded
    pub limit: Option<u64>,
    pub offset: u64,
    pub cursor: Option<PageCursor>,
    pub namespace: NamespaceScope,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let plan = QueryParams::new().build().unwrap();
        assert_eq!(plan.order, Order::Asc);
        assert_eq!(plan.limit, None);
        assert_eq!(plan.offset, 0);
        assert!(plan.cursor.is_none());
        assert_eq!(
            plan.namespace,
            NamespaceScope::Namespace(DEFAULT_NAMESPACE.to_string())
        );
    }

    #[test]
    fn test_later_option_wins() {
        let plan = QueryParams::with_options([
            QueryOption::Order(Order::Desc),
            QueryOption::Limit(5),
            QueryOption::Order(Order::Asc),
            QueryOption::Limit(2),
        ])
        .build()
        .unwrap();
        assert_eq!(plan.order, Order::Asc);
        assert_eq!(plan.limit, Some(2));
    }

    #[test]
    fn test_non_positive_limit_is_unbounded() {
        for limit in [0, -1, i64::MIN] {
            let plan = QueryParams::with_options([QueryOption::Limit(limit)])
                .build()
                .unwrap();
            assert_eq!(plan.limit, None);
        }
    }

    #[test]
    fn test_negative_offset_rejected() {
        let err = QueryParams::with_options([QueryOption::Offset(-1)])
            .build()
            .unwrap_err();
        assert!(matches!(err, StorageError::InvalidArgument(_)));
    }

    #[test]
    fn test_token_offset_overrides_earlier_offset() {
        let token = page_token::encode("b", 4).unwrap();
        let plan = QueryParams::with_options([
            QueryOption::Offset(1),
            QueryOption::PageToken(token.clone()),
        ])
        .build()
        .unwrap();
        assert_eq!(plan.offset, 4);
        let cursor = plan.cursor.unwrap();
        assert_eq!(cursor.key, "b");
        assert_eq!(cursor.raw, token);
    }

    #[test]
    fn test_offset_after_token_wins() {
        let token = page_token::encode("b", 4).unwrap();
        let plan = QueryParams::with_options([
            QueryOption::PageToken(token),
            QueryOption::Offset(1),
        ])
        .build()
        .unwrap();
        assert_eq!(plan.offset, 1);
        assert!(plan.cursor.is_some());
    }

    #[test]
    fn test_new_token_after_offset_wins_again() {
        let first = page_token::encode("a", 2).unwrap();
        let second = page_token::encode("c", 6).unwrap();
        let plan = QueryParams::with_options([
            QueryOption::PageToken(first),
            QueryOption::Offset(1),
            QueryOption::PageToken(second),
        ])
        .build()
        .unwrap();
        assert_eq!(plan.offset, 6);
    }

    #[test]
    fn test_invalid_token_fails_build() {
        let err = QueryParams::with_options([QueryOption::PageToken("Hello World".to_string())])
            .build()
            .unwrap_err();
        assert_eq!(err.to_string(), "pageToken is not valid: \"Hello World\"");
    }

    #[test]
    fn test_empty_token_is_ignored() {
        let plan = QueryParams::with_options([QueryOption::PageToken(String::new())])
            .build()
            .unwrap();
        assert!(plan.cursor.is_none());
    }

    #[test]
    fn test_namespace_scope() {
        let plan = QueryParams::with_options([QueryOption::Namespace("*".to_string())])
            .build()
            .unwrap();
        assert_eq!(plan.namespace, NamespaceScope::All);

        let plan = QueryParams::with_options([QueryOption::Namespace("team".to_string())])
            .build()
            .unwrap();
        assert_eq!(plan.namespace, NamespaceScope::Namespace("team".to_string()));
    }

    #[test]
    fn test_order_from_str() {
        assert_eq!("DESC".parse::<Order>().unwrap(), Order::Desc);
        assert_eq!("asc".parse::<Order>().unwrap(), Order::Asc);
        assert!(matches!(
            "sideways".parse::<Order>(),
            Err(StorageError::InvalidArgument(_))
        ));
    }
}
