use super::{AuditContext, Policy, Scope, Violation};
use crate::engine::option_over_limit;

/// Flags metered options requested beyond their capacity limit.
pub struct OptionCapacityPolicy;

impl Policy for OptionCapacityPolicy {
    fn name(&self) -> &str {
        "OptionCapacity"
    }

    fn check(&self, ctx: &AuditContext) -> Vec<Violation> {
        let mut violations = Vec::new();
        for center in ctx.catalog.centers() {
            let Some(request) = ctx.request(center.id()) else {
                continue;
            };
            for (category, option) in center.all_options() {
                let quantity = request.quantity(category, option.id());
                if option_over_limit(center, option, quantity) {
                    violations.push(Violation {
                        policy: self.name().to_string(),
                        scope: Scope::Option {
                            center_id: center.id().clone(),
                            category,
                            option_id: option.id().clone(),
                        },
                        amount: quantity,
                        limit: option.limit(),
                        message: format!(
                            "{} / {}: requested {} {} > limit {}",
                            center.name(),
                            option.name(),
                            quantity,
                            center.unit(category),
                            option.limit()
                        ),
                    });
                }
            }
        }
        violations
    }
}
