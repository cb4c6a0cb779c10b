//! Planner facade over the rate table and every planning entry point
//!
//! Loads the rate table once, then serves any number of projections,
//! scores and recommendations without re-reading CSV files.

use crate::advisory::{
    self, advise_on_comparison, AdvisoryRequest, Advisor, ComparisonAdvice, PortfolioTemplate,
    Recommendations,
};
use crate::error::PlannerResult;
use crate::health::{self, CapacityReport, HealthInputs, HealthScore};
use crate::projection::{
    self, GrowthProjector, LumpSumResult, ProjectionConfig, ProjectionRequest, ProjectionResult,
    SipComparison, SipResult,
};
use crate::rates::{AssetClass, RateTable, ZoneContext};
use crate::risk::{
    self, AllocationMix, InvestmentAssessment, RebalanceAction, RiskProfile, RiskScore,
    RiskTiering,
};
use crate::advice::ActionItem;
use log::debug;
use rayon::prelude::*;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

/// Shared, read-only planning engine
///
/// # Example
/// ```ignore
/// let planner = Planner::from_csv()?;
///
/// for months in [12, 60, 120] {
///     let result = planner.project(500_000.0, months, AssetClass::Sip, None)?;
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Planner {
    rates: Arc<RateTable>,
    projector: GrowthProjector,
    tiering: RiskTiering,
    advisor: Advisor,
}

impl Planner {
    /// Planner over the built-in rate table
    pub fn new() -> Self {
        Self::with_rates(RateTable::default_table())
    }

    /// Planner with the rate table loaded from data/rates/
    pub fn from_csv() -> PlannerResult<Self> {
        Ok(Self::with_rates(RateTable::from_csv()?))
    }

    /// Planner with the rate table loaded from a specific directory
    pub fn from_csv_path(path: &Path) -> PlannerResult<Self> {
        Ok(Self::with_rates(RateTable::from_csv_path(path)?))
    }

    /// Planner over a pre-built rate table
    pub fn with_rates(rates: RateTable) -> Self {
        let rates = Arc::new(rates);
        Self {
            projector: GrowthProjector::new(Arc::clone(&rates), ProjectionConfig::default()),
            rates,
            tiering: RiskTiering::default(),
            advisor: Advisor::fallback_only(),
        }
    }

    /// Replace the projection configuration
    pub fn with_projection_config(mut self, config: ProjectionConfig) -> Self {
        self.projector = GrowthProjector::new(Arc::clone(&self.rates), config);
        self
    }

    /// Replace the tiering used for portfolio scores
    pub fn with_tiering(mut self, tiering: RiskTiering) -> Self {
        self.tiering = tiering;
        self
    }

    /// Route recommendations through an advisory provider
    pub fn with_advisor(mut self, advisor: Advisor) -> Self {
        self.advisor = advisor;
        self
    }

    pub fn rates(&self) -> &RateTable {
        &self.rates
    }

    pub fn projection_config(&self) -> &ProjectionConfig {
        self.projector.config()
    }

    pub fn tiering(&self) -> RiskTiering {
        self.tiering
    }

    pub fn project(
        &self,
        amount: f64,
        horizon_months: u32,
        asset_class: AssetClass,
        zone: Option<&ZoneContext>,
    ) -> PlannerResult<ProjectionResult> {
        self.projector.project(amount, horizon_months, asset_class, zone)
    }

    /// Project many requests in parallel, one result per request in input order
    pub fn project_batch(&self, requests: &[ProjectionRequest]) -> Vec<PlannerResult<ProjectionResult>> {
        debug!("Projecting batch of {} requests", requests.len());
        requests
            .par_iter()
            .map(|request| self.projector.project_request(request))
            .collect()
    }

    /// Run one request under several projection configurations
    pub fn project_scenarios(
        &self,
        request: &ProjectionRequest,
        configs: &[ProjectionConfig],
    ) -> PlannerResult<Vec<ProjectionResult>> {
        configs
            .iter()
            .map(|config| {
                GrowthProjector::new(Arc::clone(&self.rates), *config).project_request(request)
            })
            .collect()
    }

    /// Projections for several classes, best ROI first
    pub fn compare(
        &self,
        amount: f64,
        horizon_months: u32,
        zone: Option<&ZoneContext>,
        classes: &[AssetClass],
    ) -> PlannerResult<Vec<ProjectionResult>> {
        self.projector.compare(amount, horizon_months, zone, classes)
    }

    pub fn compute_sip(
        &self,
        monthly_contribution: f64,
        annual_return_pct: f64,
        years: u32,
    ) -> PlannerResult<SipResult> {
        projection::compute_sip(monthly_contribution, annual_return_pct, years)
    }

    pub fn compare_lump_sum(
        &self,
        principal: f64,
        annual_return_pct: f64,
        years: u32,
    ) -> PlannerResult<LumpSumResult> {
        projection::compare_lump_sum(principal, annual_return_pct, years)
    }

    pub fn compare_sip_to_lump_sum(
        &self,
        monthly_contribution: f64,
        annual_return_pct: f64,
        years: u32,
    ) -> PlannerResult<SipComparison> {
        projection::compare_sip_to_lump_sum(monthly_contribution, annual_return_pct, years)
    }

    pub fn score_allocation(&self, mix: &AllocationMix) -> PlannerResult<RiskScore> {
        risk::score_allocation(&self.rates, mix, self.tiering)
    }

    pub fn risk_advice(&self, risk: &RiskScore) -> Vec<ActionItem> {
        risk::risk_advice(risk)
    }

    /// Trades that move holdings toward a target mix
    pub fn rebalance<I>(&self, holdings: I, target: &AllocationMix) -> PlannerResult<Vec<RebalanceAction>>
    where
        I: IntoIterator<Item = (AssetClass, f64)>,
    {
        risk::rebalance(holdings, target)
    }

    pub fn assess_investment(
        &self,
        asset_class: AssetClass,
        amount: f64,
        horizon_months: u32,
        zone: Option<&ZoneContext>,
        profile: RiskProfile,
    ) -> PlannerResult<InvestmentAssessment> {
        risk::assess_investment(asset_class, amount, horizon_months, zone, profile)
    }

    pub fn score_health(&self, inputs: &HealthInputs) -> HealthScore {
        health::score_health(inputs)
    }

    pub fn investment_capacity(
        &self,
        monthly_income: f64,
        expenses: &BTreeMap<String, f64>,
    ) -> PlannerResult<CapacityReport> {
        health::investment_capacity(monthly_income, expenses)
    }

    /// Fixed templates for a profile
    pub fn recommend(&self, profile: RiskProfile) -> Vec<PortfolioTemplate> {
        advisory::recommend(profile)
    }

    /// Recommendations through the configured advisor, falling back to templates
    pub fn advise(&self, request: &AdvisoryRequest) -> Recommendations {
        self.advisor.recommend(request)
    }

    pub fn advise_on_comparison(
        &self,
        results: &[ProjectionResult],
        profile: RiskProfile,
        horizon_months: u32,
    ) -> Vec<ComparisonAdvice> {
        advise_on_comparison(results, profile, horizon_months)
    }
}

impl Default for Planner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PlannerError;
    use crate::projection::StressBanding;
    use crate::rates::{Confidence, Outlook};
    use approx::assert_abs_diff_eq;

    fn request(amount: f64, asset_class: AssetClass) -> ProjectionRequest {
        ProjectionRequest {
            amount,
            horizon_months: 60,
            asset_class,
            zone_context: None,
        }
    }

    #[test]
    fn test_planner_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Planner>();
    }

    #[test]
    fn test_project_matches_projector() {
        let planner = Planner::new();
        let zone = ZoneContext::new(Outlook::High, Confidence::High);
        let result = planner
            .project(1_000_000.0, 60, AssetClass::RealEstate, Some(&zone))
            .unwrap();
        assert_abs_diff_eq!(result.future_value, 1_925_414.58, epsilon = 0.01);
    }

    #[test]
    fn test_batch_preserves_order_and_errors() {
        let planner = Planner::new();
        let requests = vec![
            request(1_000.0, AssetClass::Stocks),
            request(-5.0, AssetClass::Gold),
            request(2_000.0, AssetClass::Ppf),
        ];
        let results = planner.project_batch(&requests);

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_ref().unwrap().asset_class, AssetClass::Stocks);
        assert!(matches!(results[1], Err(PlannerError::InvalidAmount { .. })));
        assert_eq!(results[2].as_ref().unwrap().amount, 2_000.0);
    }

    #[test]
    fn test_project_scenarios() {
        let planner = Planner::new();
        let configs = [ProjectionConfig::default(), ProjectionConfig::zone_roi()];
        let results = planner
            .project_scenarios(&request(10_000.0, AssetClass::Stocks), &configs)
            .unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].stress.optimistic.rate_pct, 18.0);
        assert_abs_diff_eq!(results[1].stress.optimistic.rate_pct, 18.0, epsilon = 1e-9);
        assert!(results[1].future_value > results[0].future_value);
    }

    #[test]
    fn test_configuration_builders() {
        let planner = Planner::new()
            .with_projection_config(ProjectionConfig {
                stress: StressBanding::multiplicative(),
                ..Default::default()
            })
            .with_tiering(RiskTiering::Assessment);

        assert_eq!(planner.projection_config().stress, StressBanding::multiplicative());
        assert_eq!(planner.tiering(), RiskTiering::Assessment);

        let mix = AllocationMix::from_pairs([(AssetClass::Stocks, 80.0), (AssetClass::Ppf, 20.0)]).unwrap();
        let risk = planner.score_allocation(&mix).unwrap();
        assert_abs_diff_eq!(risk.score, 66.0, epsilon = 1e-9);
        assert_eq!(risk.tier, crate::rates::Tier::High);
    }

    #[test]
    fn test_rebalance_toward_recommended_template() {
        let planner = Planner::new();
        let template = planner.recommend(RiskProfile::Conservative).remove(0);
        let holdings: Vec<(AssetClass, f64)> = template
            .allocation
            .iter()
            .map(|(class, pct)| (class, pct * 1_000.0))
            .collect();

        assert!(planner.rebalance(holdings.iter().copied(), &template.allocation).unwrap().is_empty());

        let mut skewed = holdings;
        skewed[0].1 += 10_000.0;
        let actions = planner.rebalance(skewed, &template.allocation).unwrap();
        assert!(!actions.is_empty());
        assert!(actions.iter().all(|a| a.amount > crate::risk::REBALANCE_THRESHOLD));
    }

    #[test]
    fn test_from_csv_path_missing_dir() {
        assert!(matches!(
            Planner::from_csv_path(Path::new("no/such/dir")),
            Err(PlannerError::Io(_))
        ));
    }

    #[test]
    fn test_advise_without_provider_uses_templates() {
        let planner = Planner::new();
        let recs = planner.advise(&AdvisoryRequest::for_profile(RiskProfile::Moderate));
        assert_eq!(recs.portfolios, planner.recommend(RiskProfile::Moderate));
    }
}
