use crate::display::{usage_percent, utilization_percent, HardwareStats};
use crate::engine::{option_over_limit, CostReport};
use crate::limit_guard::{LimitGuard, Violation};
use crate::models::{CenterId, OptionId, ResourceCategory};
use crate::session::SessionState;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// One non-zero selection with its display figures.
#[derive(Debug, Clone, Serialize)]
pub struct SelectionLine {
    pub center_id: CenterId,
    pub category: ResourceCategory,
    pub option_id: OptionId,
    pub quantity: f64,
    pub unit: &'static str,
    pub usage_percent: f64,
    pub over_limit: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hardware: Option<HardwareStats>,
}

/// Everything the `report` command prints.
#[derive(Debug, Clone, Serialize)]
pub struct PlanReport {
    pub generated_at: DateTime<Utc>,
    pub currency: String,
    pub costs: CostReport,
    pub metered_utilization_percent: f64,
    pub flat_fee_utilization_percent: f64,
    pub selections: Vec<SelectionLine>,
    pub violations: Vec<Violation>,
}

impl PlanReport {
    pub fn build(session: &mut SessionState, guard: &LimitGuard) -> Self {
        let costs = session.recompute().clone();
        let violations = session.audit(guard);
        let budget = session.budget();

        let mut selections = Vec::new();
        for center in session.catalog().centers() {
            let Some(request) = session.request(center.id()) else {
                continue;
            };
            for (category, option) in center.all_options() {
                let quantity = request.quantity(category, option.id());
                if quantity <= 0.0 {
                    continue;
                }
                selections.push(SelectionLine {
                    center_id: center.id().clone(),
                    category,
                    option_id: option.id().clone(),
                    quantity,
                    unit: center.unit(category),
                    usage_percent: usage_percent(center, option, quantity),
                    over_limit: option_over_limit(center, option, quantity),
                    hardware: HardwareStats::for_packs(center, category, quantity),
                });
            }
        }

        Self {
            generated_at: Utc::now(),
            currency: budget.currency().to_string(),
            metered_utilization_percent: utilization_percent(
                costs.metered_total,
                budget.metered_class_total_limit(),
            ),
            flat_fee_utilization_percent: utilization_percent(
                costs.flat_fee_total,
                budget.flatfee_class_total_limit(),
            ),
            costs,
            selections,
            violations,
        }
    }
}
