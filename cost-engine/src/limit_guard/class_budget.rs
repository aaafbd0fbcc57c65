use super::{AuditContext, Policy, Scope, Violation};
use crate::models::CenterKind;

/// Flags class totals above their class ceiling.
pub struct ClassBudgetPolicy;

impl Policy for ClassBudgetPolicy {
    fn name(&self) -> &str {
        "ClassBudget"
    }

    fn check(&self, ctx: &AuditContext) -> Vec<Violation> {
        let report = ctx.report;
        [
            (
                CenterKind::Metered,
                report.metered_class_over,
                ctx.budget.metered_class_total_limit(),
            ),
            (
                CenterKind::FlatFee,
                report.flat_fee_class_over,
                ctx.budget.flatfee_class_total_limit(),
            ),
        ]
        .into_iter()
        .filter(|(_, over, _)| *over)
        .map(|(kind, _, limit)| (kind, report.total(kind), limit))
        .map(|(kind, total, limit)| Violation {
            policy: self.name().to_string(),
            scope: Scope::Class { kind },
            amount: total,
            limit,
            message: format!(
                "{} class total {:.0} {} exceeds {:.0}",
                kind,
                total,
                ctx.budget.currency(),
                limit
            ),
        })
        .collect()
    }
}
