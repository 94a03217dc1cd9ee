//! Constraint and rule storage trait

use async_trait::async_trait;

use vane_common::Result;

use crate::model::{Constraint, CreateConstraintRequest, CreateRuleRequest, Rule};

#[async_trait]
pub trait RuleStore: Send + Sync {
    async fn create_constraint(&self, request: &CreateConstraintRequest) -> Result<Constraint>;

    /// Constraints of a segment in creation order
    async fn list_constraints(&self, namespace_key: &str, segment_key: &str)
    -> Result<Vec<Constraint>>;

    async fn create_rule(&self, request: &CreateRuleRequest) -> Result<Rule>;

    /// Rules of a flag ordered by rank
    async fn list_rules(&self, namespace_key: &str, flag_key: &str) -> Result<Vec<Rule>>;
}
