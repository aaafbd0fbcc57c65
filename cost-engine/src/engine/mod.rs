use crate::models::{
    BudgetConfig, Catalog, CenterId, CenterKind, CenterSpec, CostBreakdown, ResourceCategory,
    ResourceOption, ResourceRequest,
};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Output of one recomputation: a breakdown per catalog center plus the
/// class-level totals and flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostReport {
    pub breakdowns: Vec<CostBreakdown>,
    pub metered_total: f64,
    pub flat_fee_total: f64,
    pub metered_class_over: bool,
    pub flat_fee_class_over: bool,
}

impl CostReport {
    pub fn get(&self, id: &CenterId) -> Option<&CostBreakdown> {
        self.breakdowns.iter().find(|b| &b.center_id == id)
    }

    pub fn total(&self, kind: CenterKind) -> f64 {
        match kind {
            CenterKind::Metered => self.metered_total,
            CenterKind::FlatFee => self.flat_fee_total,
        }
    }
}

/// Cost of one category: sum of quantity * price over the catalog's options.
/// Selections naming options the catalog does not have contribute nothing.
pub fn category_cost(
    center: &CenterSpec,
    request: Option<&ResourceRequest>,
    category: ResourceCategory,
) -> f64 {
    let Some(request) = request else {
        return 0.0;
    };
    center
        .options(category)
        .iter()
        .map(|o| request.quantity(category, o.id()) * o.price())
        .sum()
}

/// Per-option capacity check. Only metered centers enforce option limits,
/// flat-fee limits are informational.
pub fn option_over_limit(center: &CenterSpec, option: &ResourceOption, quantity: f64) -> bool {
    center.is_metered() && quantity > option.limit()
}

/// True if any option of a metered center is requested beyond its limit.
pub fn center_has_option_violation(center: &CenterSpec, request: &ResourceRequest) -> bool {
    center
        .all_options()
        .any(|(category, o)| option_over_limit(center, o, request.quantity(category, o.id())))
}

/// Flat-fee class total: the whole pool once any flat-fee center is active,
/// never more than one pool however many are active.
pub fn flat_fee_total(
    catalog: &Catalog,
    requests: &HashMap<&CenterId, &ResourceRequest>,
    budget: &BudgetConfig,
) -> f64 {
    let any_active = catalog
        .centers()
        .filter(|c| c.kind() == CenterKind::FlatFee)
        .any(|c| requests.get(c.id()).is_some_and(|r| r.is_active()));

    if any_active {
        budget.flatfee_class_total_limit()
    } else {
        0.0
    }
}

/// Pure recomputation of every center's cost and the class totals.
///
/// Requests are matched to centers by id. A center without a request costs
/// nothing; a request whose center is not in the catalog is ignored.
pub fn compute_costs(
    catalog: &Catalog,
    requests: &[ResourceRequest],
    budget: &BudgetConfig,
) -> CostReport {
    let by_center: HashMap<&CenterId, &ResourceRequest> =
        requests.iter().map(|r| (r.center_id(), r)).collect();

    for (id, request) in &by_center {
        match catalog.get(id) {
            None => debug!("Ignoring request for unknown center {}", id),
            Some(center) => log_drift(center, request),
        }
    }

    let raw: Vec<(CenterKind, CostBreakdown)> = catalog
        .centers()
        .map(|center| {
            let request = by_center.get(center.id()).copied();
            let breakdown = CostBreakdown::new(
                center.id().clone(),
                category_cost(center, request, ResourceCategory::Cpu),
                category_cost(center, request, ResourceCategory::Gpu),
                category_cost(center, request, ResourceCategory::Storage),
            );
            (center.kind(), breakdown)
        })
        .collect();

    let metered_total: f64 = raw
        .iter()
        .filter(|(kind, _)| *kind == CenterKind::Metered)
        .map(|(_, b)| b.total)
        .sum();
    let flat_fee_total = flat_fee_total(catalog, &by_center, budget);

    let metered_class_over = metered_total > budget.metered_class_total_limit();
    let flat_fee_class_over = flat_fee_total > budget.flatfee_class_total_limit();

    let breakdowns = raw
        .into_iter()
        .map(|(kind, b)| {
            let over = match kind {
                CenterKind::Metered => b.total > budget.metered_single_center_limit(),
                CenterKind::FlatFee => flat_fee_class_over,
            };
            b.with_over_limit(over)
        })
        .collect();

    debug!(
        "Recomputed costs: metered {:.2}, flat-fee {:.2}",
        metered_total, flat_fee_total
    );

    CostReport {
        breakdowns,
        metered_total,
        flat_fee_total,
        metered_class_over,
        flat_fee_class_over,
    }
}

fn log_drift(center: &CenterSpec, request: &ResourceRequest) {
    for category in ResourceCategory::ALL {
        for id in request.selections().category(category).keys() {
            if !center.options(category).iter().any(|o| o.id() == id) {
                debug!(
                    "Selection {} has no {} option at {}, counted as zero",
                    id,
                    category,
                    center.id()
                );
            }
        }
    }
}
