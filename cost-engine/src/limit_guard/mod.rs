use crate::engine::CostReport;
use crate::models::{
    BudgetConfig, Catalog, CenterId, CenterKind, OptionId, ResourceCategory, ResourceRequest,
};
use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub mod class_budget;
pub mod option_capacity;
pub mod single_center_budget;

pub use class_budget::ClassBudgetPolicy;
pub use option_capacity::OptionCapacityPolicy;
pub use single_center_budget::SingleCenterBudgetPolicy;

/// What a violation applies to, from finest to coarsest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "scope", rename_all = "snake_case")]
pub enum Scope {
    Option {
        center_id: CenterId,
        category: ResourceCategory,
        option_id: OptionId,
    },
    Center {
        center_id: CenterId,
    },
    Class {
        kind: CenterKind,
    },
}

/// An advisory finding. Nothing is blocked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Violation {
    pub policy: String,
    #[serde(flatten)]
    pub scope: Scope,
    pub amount: f64,
    pub limit: f64,
    pub message: String,
}

/// Everything a policy may look at.
pub struct AuditContext<'a> {
    pub catalog: &'a Catalog,
    pub requests: &'a [ResourceRequest],
    pub report: &'a CostReport,
    pub budget: &'a BudgetConfig,
}

impl AuditContext<'_> {
    pub fn request(&self, id: &CenterId) -> Option<&ResourceRequest> {
        self.requests.iter().find(|r| r.center_id() == id)
    }

    pub fn kinds(&self) -> HashMap<&CenterId, CenterKind> {
        self.catalog.centers().map(|c| (c.id(), c.kind())).collect()
    }
}

pub trait Policy: Send + Sync {
    fn name(&self) -> &str;
    fn check(&self, ctx: &AuditContext) -> Vec<Violation>;
}

pub struct LimitGuard {
    policies: Vec<Box<dyn Policy>>,
}

impl Default for LimitGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl LimitGuard {
    pub fn new() -> Self {
        Self {
            policies: Vec::new(),
        }
    }

    /// Guard with the option, center and class checks.
    pub fn standard() -> Self {
        let mut guard = Self::new();
        guard.add_policy(Box::new(OptionCapacityPolicy));
        guard.add_policy(Box::new(SingleCenterBudgetPolicy));
        guard.add_policy(Box::new(ClassBudgetPolicy));
        guard
    }

    pub fn add_policy(&mut self, policy: Box<dyn Policy>) {
        self.policies.push(policy);
    }

    /// Runs every policy and collects all violations. Unlike a risk check
    /// this never short-circuits: the caller wants the full list.
    pub fn audit(&self, ctx: &AuditContext) -> Vec<Violation> {
        let mut violations = Vec::new();
        for policy in &self.policies {
            for violation in policy.check(ctx) {
                warn!("{}: {}", policy.name(), violation.message);
                violations.push(violation);
            }
        }
        violations
    }
}
