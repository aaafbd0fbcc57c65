use crate::catalog_edit::set_option_limit;
use crate::engine::{compute_costs, CostReport};
use crate::estimate::Estimate;
use crate::input::parse_quantity;
use crate::limit_guard::{AuditContext, LimitGuard, Violation};
use crate::models::{
    BudgetConfig, Catalog, CatalogError, CenterId, OptionId, RequestError, ResourceCategory,
    ResourceRequest,
};
use crate::search::{match_capability, Thresholds};
use log::{info, warn};
use std::collections::BTreeSet;

struct CachedReport {
    catalog_version: u64,
    requests_version: u64,
    report: CostReport,
}

/// Owner of the catalog and the requests for one planning session.
///
/// Every edit replaces state and bumps a version counter; the last cost
/// report is reused until either version moves.
pub struct SessionState {
    catalog: Catalog,
    requests: Vec<ResourceRequest>,
    budget: BudgetConfig,
    catalog_version: u64,
    requests_version: u64,
    cache: Option<CachedReport>,
}

impl SessionState {
    /// Starts a session with one empty request per center.
    pub fn new(catalog: Catalog, budget: BudgetConfig) -> Self {
        Self::with_requests(catalog, Vec::new(), budget)
    }

    /// Starts a session from saved requests. Centers without a usable
    /// request get an empty one; requests for unknown centers, or whose
    /// class disagrees with the catalog, are dropped.
    pub fn with_requests(
        catalog: Catalog,
        mut requests: Vec<ResourceRequest>,
        budget: BudgetConfig,
    ) -> Self {
        let normalized = catalog
            .centers()
            .map(|center| {
                let expected = ResourceRequest::empty(center).kind();
                match requests.iter().position(|r| r.center_id() == center.id()) {
                    Some(i) => {
                        let request = requests.swap_remove(i);
                        if std::mem::discriminant(&request.kind())
                            == std::mem::discriminant(&expected)
                        {
                            request
                        } else {
                            warn!("Request for {} has the wrong class, reset", center.id());
                            ResourceRequest::empty(center)
                        }
                    }
                    None => ResourceRequest::empty(center),
                }
            })
            .collect();

        for stray in &requests {
            warn!("Dropping request for unknown center {}", stray.center_id());
        }

        Self {
            catalog,
            requests: normalized,
            budget,
            catalog_version: 0,
            requests_version: 0,
            cache: None,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn requests(&self) -> &[ResourceRequest] {
        &self.requests
    }

    pub fn budget(&self) -> &BudgetConfig {
        &self.budget
    }

    pub fn versions(&self) -> (u64, u64) {
        (self.catalog_version, self.requests_version)
    }

    pub fn request(&self, id: &CenterId) -> Option<&ResourceRequest> {
        self.requests.iter().find(|r| r.center_id() == id)
    }

    fn request_mut(&mut self, id: &CenterId) -> Result<&mut ResourceRequest, RequestError> {
        self.requests
            .iter_mut()
            .find(|r| r.center_id() == id)
            .ok_or_else(|| RequestError::UnknownCenter(id.clone()))
    }

    /// Current cost report, recomputed only if the catalog or the requests
    /// changed since the last call.
    pub fn recompute(&mut self) -> &CostReport {
        let cached = match self.cache.take() {
            Some(c)
                if c.catalog_version == self.catalog_version
                    && c.requests_version == self.requests_version =>
            {
                c
            }
            _ => CachedReport {
                catalog_version: self.catalog_version,
                requests_version: self.requests_version,
                report: compute_costs(&self.catalog, &self.requests, &self.budget),
            },
        };
        &self.cache.insert(cached).report
    }

    pub fn audit(&mut self, guard: &LimitGuard) -> Vec<Violation> {
        let report = self.recompute().clone();
        let ctx = AuditContext {
            catalog: &self.catalog,
            requests: &self.requests,
            report: &report,
            budget: &self.budget,
        };
        guard.audit(&ctx)
    }

    pub fn search(&self, thresholds: &Thresholds) -> BTreeSet<CenterId> {
        match_capability(&self.catalog, thresholds)
    }

    pub fn set_quantity(
        &mut self,
        center_id: &CenterId,
        category: ResourceCategory,
        option_id: OptionId,
        quantity: f64,
    ) -> Result<(), RequestError> {
        self.request_mut(center_id)?
            .set_quantity(category, option_id, quantity)?;
        self.requests_version += 1;
        Ok(())
    }

    /// Quantity typed into a form field. Unparsable text clears the
    /// selection to 0; a negative number is rejected.
    pub fn set_quantity_text(
        &mut self,
        center_id: &CenterId,
        category: ResourceCategory,
        option_id: OptionId,
        raw: &str,
    ) -> Result<f64, RequestError> {
        let quantity = parse_quantity(raw)?;
        self.set_quantity(center_id, category, option_id, quantity)?;
        Ok(quantity)
    }

    /// Flips a flat-fee center's activation and returns the new state.
    pub fn toggle_active(&mut self, center_id: &CenterId) -> Result<bool, RequestError> {
        let active = self.request_mut(center_id)?.toggle_active()?;
        self.requests_version += 1;
        info!("{} is now {}", center_id, if active { "active" } else { "inactive" });
        Ok(active)
    }

    /// Replaces every request with an empty, inactive one.
    pub fn reset(&mut self) {
        self.requests = self.catalog.centers().map(ResourceRequest::empty).collect();
        self.requests_version += 1;
        info!("All requests reset");
    }

    /// Writes an estimate into the center's first CPU and first GPU option,
    /// exactly as if the user had typed the numbers. A center without an
    /// option in a category keeps that category unchanged.
    pub fn apply_estimate(
        &mut self,
        center_id: &CenterId,
        estimate: &Estimate,
    ) -> Result<(), RequestError> {
        let center = self
            .catalog
            .get(center_id)
            .ok_or_else(|| RequestError::UnknownCenter(center_id.clone()))?;
        let targets: Vec<(ResourceCategory, OptionId, f64)> = [
            (ResourceCategory::Cpu, estimate.node_hours),
            (ResourceCategory::Gpu, estimate.gpu_hours),
        ]
        .into_iter()
        .filter_map(|(category, value)| {
            center
                .options(category)
                .first()
                .map(|o| (category, o.id().clone(), value))
        })
        .collect();

        let request = self.request_mut(center_id)?;
        for (category, option_id, value) in targets {
            request.set_quantity(category, option_id, value)?;
        }
        self.requests_version += 1;
        Ok(())
    }

    /// Settings edit: swaps in a catalog with one option's limit changed.
    pub fn set_option_limit(
        &mut self,
        center_id: &CenterId,
        category: ResourceCategory,
        option_id: &OptionId,
        new_limit: f64,
    ) -> Result<(), CatalogError> {
        self.catalog = set_option_limit(&self.catalog, center_id, category, option_id, new_limit)?;
        self.catalog_version += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::default_catalog;

    fn session() -> SessionState {
        SessionState::new(default_catalog(), BudgetConfig::default())
    }

    fn id(s: &str) -> CenterId {
        CenterId::new(s)
    }

    #[test]
    fn test_one_request_per_center() {
        let s = session();
        assert_eq!(s.requests().len(), s.catalog().len());
        assert!(s.requests().iter().all(|r| !r.is_active()));
    }

    #[test]
    fn test_recompute_is_memoized_per_version() {
        let mut s = session();
        let first = s.recompute().clone();
        assert_eq!(s.versions(), (0, 0));
        assert_eq!(s.recompute(), &first);

        s.set_quantity(
            &id("hpci-tokyo"),
            ResourceCategory::Cpu,
            OptionId::new("tok-cpu-1"),
            1000.0,
        )
        .unwrap();
        assert_eq!(s.versions(), (0, 1));
        let b = s.recompute().get(&id("hpci-tokyo")).unwrap().clone();
        assert_eq!(b.cpu_cost, 10_000.0);
    }

    #[test]
    fn test_quantity_text_goes_through_input_rules() {
        let mut s = session();
        let tokyo = id("hpci-tokyo");
        let opt = OptionId::new("tok-cpu-1");

        assert_eq!(
            s.set_quantity_text(&tokyo, ResourceCategory::Cpu, opt.clone(), " 350 "),
            Ok(350.0)
        );
        assert_eq!(s.recompute().get(&tokyo).unwrap().cpu_cost, 3_500.0);

        assert_eq!(
            s.set_quantity_text(&tokyo, ResourceCategory::Cpu, opt.clone(), "-4"),
            Err(RequestError::InvalidQuantity(-4.0))
        );
        assert_eq!(s.request(&tokyo).unwrap().quantity(ResourceCategory::Cpu, &opt), 350.0);

        assert_eq!(
            s.set_quantity_text(&tokyo, ResourceCategory::Cpu, opt.clone(), ""),
            Ok(0.0)
        );
        assert_eq!(s.recompute().get(&tokyo).unwrap().total, 0.0);
    }

    #[test]
    fn test_toggle_and_reset() {
        let mut s = session();
        assert_eq!(s.toggle_active(&id("mdx-tokyo")), Ok(true));
        assert_eq!(s.recompute().flat_fee_total, 1_000_000.0);
        assert_eq!(
            s.toggle_active(&id("hpci-kyoto")),
            Err(RequestError::NotActivatable(id("hpci-kyoto")))
        );

        s.set_quantity(
            &id("hpci-kyoto"),
            ResourceCategory::Storage,
            OptionId::new("kyo-str-1"),
            10.0,
        )
        .unwrap();
        s.reset();
        let report = s.recompute();
        assert_eq!(report.flat_fee_total, 0.0);
        assert_eq!(report.metered_total, 0.0);
        assert!(s.requests().iter().all(|r| r.selections().is_empty()));
    }

    #[test]
    fn test_apply_estimate_targets_first_options() {
        let mut s = session();
        let estimate = Estimate {
            node_hours: 1200.0,
            gpu_hours: 80.0,
            reasoning: String::new(),
            confidence: None,
        };
        s.apply_estimate(&id("hpci-tokyo"), &estimate).unwrap();
        let req = s.request(&id("hpci-tokyo")).unwrap();
        assert_eq!(req.quantity(ResourceCategory::Cpu, &OptionId::new("tok-cpu-1")), 1200.0);
        assert_eq!(req.quantity(ResourceCategory::Gpu, &OptionId::new("tok-gpu-1")), 80.0);
        assert_eq!(req.quantity(ResourceCategory::Gpu, &OptionId::new("tok-gpu-2")), 0.0);

        // Tohoku has no GPU queue: only the CPU side is written.
        s.apply_estimate(&id("hpci-tohoku"), &estimate).unwrap();
        let req = s.request(&id("hpci-tohoku")).unwrap();
        assert_eq!(req.quantity(ResourceCategory::Cpu, &OptionId::new("toh-cpu-1")), 1200.0);
        assert!(req.selections().category(ResourceCategory::Gpu).is_empty());
    }

    #[test]
    fn test_limit_edit_feeds_next_audit() {
        let mut s = session();
        let kyushu = id("hpci-kyushu");
        let opt = OptionId::new("kyu-str-2");
        s.set_quantity(&kyushu, ResourceCategory::Storage, opt.clone(), 8.0)
            .unwrap();
        assert!(s.audit(&LimitGuard::standard()).is_empty());

        s.set_option_limit(&kyushu, ResourceCategory::Storage, &opt, 5.0)
            .unwrap();
        assert_eq!(s.versions().0, 1);
        let violations = s.audit(&LimitGuard::standard());
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].limit, 5.0);

        assert!(s
            .set_option_limit(&kyushu, ResourceCategory::Storage, &opt, -5.0)
            .is_err());
        assert_eq!(s.versions().0, 1);
    }

    #[test]
    fn test_with_requests_normalizes() {
        let catalog = default_catalog();
        let tokyo = catalog.get(&id("hpci-tokyo")).unwrap().clone();
        let saved = ResourceRequest::empty(&tokyo)
            .with_quantity(ResourceCategory::Cpu, "tok-cpu-1", 5.0)
            .unwrap();
        let stray = ResourceRequest::empty(&crate::models::CenterSpec::metered("gone", "Gone", ""));

        let s = SessionState::with_requests(catalog, vec![stray, saved], BudgetConfig::default());
        assert_eq!(s.requests().len(), 10);
        assert_eq!(
            s.request(&id("hpci-tokyo"))
                .unwrap()
                .quantity(ResourceCategory::Cpu, &OptionId::new("tok-cpu-1")),
            5.0
        );
        assert!(s.request(&id("gone")).is_none());
    }
}
