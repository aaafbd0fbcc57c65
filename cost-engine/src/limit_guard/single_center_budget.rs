use super::{AuditContext, Policy, Scope, Violation};
use crate::models::CenterKind;

/// Flags metered centers whose total exceeds the single-center ceiling.
pub struct SingleCenterBudgetPolicy;

impl Policy for SingleCenterBudgetPolicy {
    fn name(&self) -> &str {
        "SingleCenterBudget"
    }

    fn check(&self, ctx: &AuditContext) -> Vec<Violation> {
        let kinds = ctx.kinds();
        let limit = ctx.budget.metered_single_center_limit();

        ctx.report
            .breakdowns
            .iter()
            .filter(|b| kinds.get(&b.center_id) == Some(&CenterKind::Metered))
            .filter(|b| b.is_over_limit)
            .map(|b| Violation {
                policy: self.name().to_string(),
                scope: Scope::Center {
                    center_id: b.center_id.clone(),
                },
                amount: b.total,
                limit,
                message: format!(
                    "{} total {:.0} {} exceeds {:.0}",
                    b.center_id,
                    b.total,
                    ctx.budget.currency(),
                    limit
                ),
            })
            .collect()
    }
}
