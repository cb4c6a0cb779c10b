//! Wealth Planner CLI
//!
//! Command-line front end for projections, risk scores and recommendations

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::PathBuf;
use wealth_planner::advisory::AdvisoryRequest;
use wealth_planner::health::{AssetHoldings, HealthInputs};
use wealth_planner::projection::{
    default_comparison_set, Compounding, ProjectionConfig, StressBanding,
};
use wealth_planner::rates::{Confidence, Outlook};
use wealth_planner::risk::RiskTiering;
use wealth_planner::{AllocationMix, AssetClass, Planner, RateTable, RiskProfile, ZoneContext};

#[derive(Parser)]
#[command(
    name = "wealth-planner",
    version,
    about = "Investment projections, risk scores and portfolio recommendations"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Directory containing rate_table.csv (built-in rates when omitted)
    #[arg(long, env = "PLANNER_RATES_PATH", global = true)]
    rates: Option<PathBuf>,

    /// Print a short text summary instead of JSON
    #[arg(long, global = true)]
    text: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Project a lump-sum investment with stress bands
    Project(ProjectArgs),
    /// Compare projections across asset classes
    Compare(CompareArgs),
    /// SIP future value and lump-sum comparison
    Sip(SipArgs),
    /// Score a portfolio allocation
    Risk(RiskArgs),
    /// Trades that bring holdings to a target allocation
    Rebalance(RebalanceArgs),
    /// Assess the risk of a single investment
    Assess(AssessArgs),
    /// Composite financial health score
    Health(HealthArgs),
    /// Monthly investment capacity and expense breakdown
    Capacity(CapacityArgs),
    /// Model portfolios for a risk profile
    Recommend(RecommendArgs),
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum BandingArg {
    Additive,
    Multiplicative,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CompoundingArg {
    Annual,
    Monthly,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum TieringArg {
    Portfolio,
    Assessment,
}

#[derive(Args)]
struct ZoneArgs {
    /// Zone market outlook (LOW, MODERATE, HIGH)
    #[arg(long, requires = "confidence")]
    outlook: Option<Outlook>,

    /// Confidence in the zone outlook (LOW, MEDIUM, HIGH)
    #[arg(long, requires = "outlook")]
    confidence: Option<Confidence>,
}

impl ZoneArgs {
    fn context(&self) -> Option<ZoneContext> {
        match (self.outlook, self.confidence) {
            (Some(outlook), Some(confidence)) => Some(ZoneContext::new(outlook, confidence)),
            _ => None,
        }
    }
}

#[derive(Args)]
struct ProjectArgs {
    #[arg(long)]
    amount: f64,

    /// Horizon in months
    #[arg(long)]
    months: u32,

    #[arg(long = "asset-class")]
    asset_class: AssetClass,

    #[command(flatten)]
    zone: ZoneArgs,

    #[arg(long, value_enum, default_value = "additive")]
    banding: BandingArg,

    #[arg(long, value_enum, default_value = "annual")]
    compounding: CompoundingArg,
}

#[derive(Args)]
struct CompareArgs {
    #[arg(long)]
    amount: f64,

    #[arg(long)]
    months: u32,

    /// Asset classes to compare (defaults to the six core options)
    #[arg(long, value_delimiter = ',')]
    classes: Vec<AssetClass>,

    #[command(flatten)]
    zone: ZoneArgs,

    /// Risk profile used to tailor the advice
    #[arg(long, default_value = "MODERATE")]
    profile: RiskProfile,
}

#[derive(Args)]
struct SipArgs {
    /// Monthly contribution
    #[arg(long)]
    monthly: f64,

    /// Expected annual return in percent
    #[arg(long, default_value_t = 12.0)]
    rate: f64,

    #[arg(long, default_value_t = 10)]
    years: u32,
}

#[derive(Args)]
struct RiskArgs {
    /// Allocation as class=pct pairs, e.g. stocks=60,ppf=40
    #[arg(long, value_delimiter = ',', value_parser = parse_pair, required_unless_present = "amounts")]
    mix: Vec<(String, f64)>,

    /// Holdings as class=amount pairs, converted to percentages
    #[arg(long, value_delimiter = ',', value_parser = parse_pair, conflicts_with = "mix")]
    amounts: Vec<(String, f64)>,

    #[arg(long, value_enum, default_value = "portfolio")]
    tiering: TieringArg,
}

#[derive(Args)]
struct RebalanceArgs {
    /// Current holdings as class=amount pairs
    #[arg(long, value_delimiter = ',', value_parser = parse_pair, required = true)]
    holdings: Vec<(String, f64)>,

    /// Target allocation as class=pct pairs
    #[arg(long, value_delimiter = ',', value_parser = parse_pair, required = true)]
    target: Vec<(String, f64)>,
}

#[derive(Args)]
struct AssessArgs {
    #[arg(long = "asset-class")]
    asset_class: AssetClass,

    #[arg(long)]
    amount: f64,

    #[arg(long)]
    months: u32,

    #[command(flatten)]
    zone: ZoneArgs,

    #[arg(long, default_value = "MODERATE")]
    profile: RiskProfile,
}

#[derive(Args)]
struct HealthArgs {
    /// JSON file with health inputs; flags below are ignored when given
    #[arg(long)]
    input: Option<PathBuf>,

    #[arg(long)]
    income: Option<f64>,

    #[arg(long)]
    expenses: Option<f64>,

    #[arg(long)]
    liabilities: Option<f64>,

    #[arg(long, default_value_t = 0)]
    goals: u32,

    /// Holdings as bucket=amount pairs (savings, mutual_funds, stocks, gold, epf, real_estate)
    #[arg(long, value_delimiter = ',', value_parser = parse_pair)]
    assets: Vec<(String, f64)>,
}

#[derive(Args)]
struct CapacityArgs {
    #[arg(long)]
    income: f64,

    /// Expenses as category=amount pairs, e.g. housing=25000,food=12000
    #[arg(long, value_delimiter = ',', value_parser = parse_pair)]
    expense: Vec<(String, f64)>,
}

#[derive(Args)]
struct RecommendArgs {
    #[arg(long, default_value = "MODERATE")]
    profile: RiskProfile,
}

/// Command output: JSON document plus the lines shown with --text
struct Report {
    value: Value,
    summary: Vec<String>,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let planner = build_planner(cli.rates.as_ref())?;

    let report = match cli.command {
        Commands::Project(args) => run_project(&planner, args)?,
        Commands::Compare(args) => run_compare(&planner, args)?,
        Commands::Sip(args) => run_sip(&planner, args)?,
        Commands::Risk(args) => run_risk(&planner, args)?,
        Commands::Rebalance(args) => run_rebalance(&planner, args)?,
        Commands::Assess(args) => run_assess(&planner, args)?,
        Commands::Health(args) => run_health(&planner, args)?,
        Commands::Capacity(args) => run_capacity(&planner, args)?,
        Commands::Recommend(args) => run_recommend(&planner, args)?,
    };

    if cli.text {
        for line in &report.summary {
            println!("{}", line);
        }
    } else {
        println!("{}", serde_json::to_string_pretty(&report.value)?);
    }
    Ok(())
}

fn build_planner(rates: Option<&PathBuf>) -> Result<Planner> {
    match rates {
        Some(dir) => {
            let table = RateTable::from_csv_path(dir)
                .with_context(|| format!("loading rate table from {}", dir.display()))?;
            Ok(Planner::with_rates(table))
        }
        None => Ok(Planner::new()),
    }
}

fn run_project(planner: &Planner, args: ProjectArgs) -> Result<Report> {
    let config = ProjectionConfig {
        stress: match args.banding {
            BandingArg::Additive => StressBanding::additive(),
            BandingArg::Multiplicative => StressBanding::multiplicative(),
        },
        compounding: match args.compounding {
            CompoundingArg::Annual => Compounding::Annual,
            CompoundingArg::Monthly => Compounding::Monthly,
        },
    };
    let planner = planner.clone().with_projection_config(config);
    let zone = args.zone.context();

    let result = planner.project(args.amount, args.months, args.asset_class, zone.as_ref())?;
    let mut summary = vec![
        format!(
            "{} over {} months at {:.2}%",
            result.asset_class.display_name(),
            result.horizon_months,
            result.base_rate_pct
        ),
        format!(
            "Future value {:.2} (returns {:.2}, ROI {:.2}%)",
            result.future_value, result.total_returns, result.roi_percentage
        ),
        format!(
            "Range {:.2} to {:.2}",
            result.stress.pessimistic.future_value, result.stress.optimistic.future_value
        ),
    ];
    if result.rate_clamped {
        summary.push("Note: growth factor clamped at the minimum".to_string());
    }

    Ok(Report {
        value: serde_json::to_value(&result)?,
        summary,
    })
}

fn run_compare(planner: &Planner, args: CompareArgs) -> Result<Report> {
    let classes = if args.classes.is_empty() {
        default_comparison_set().to_vec()
    } else {
        args.classes
    };
    let zone = args.zone.context();

    let results = planner.compare(args.amount, args.months, zone.as_ref(), &classes)?;
    let advice = planner.advise_on_comparison(&results, args.profile, args.months);

    let mut summary: Vec<String> = results
        .iter()
        .enumerate()
        .map(|(rank, r)| {
            format!(
                "{}. {:<14} {:>8.2}%  FV {:.2}  risk {}",
                rank + 1,
                r.asset_class.display_name(),
                r.roi_percentage,
                r.future_value,
                r.risk_tier
            )
        })
        .collect();
    summary.extend(advice.iter().map(|a| format!("- {}: {}", a.title, a.description)));

    Ok(Report {
        value: serde_json::json!({ "comparisons": results, "recommendations": advice }),
        summary,
    })
}

fn run_sip(planner: &Planner, args: SipArgs) -> Result<Report> {
    let comparison = planner.compare_sip_to_lump_sum(args.monthly, args.rate, args.years)?;
    let summary = vec![
        format!(
            "SIP: invested {:.2}, value {:.2}",
            comparison.sip.total_invested, comparison.sip.future_value
        ),
        format!(
            "Lump sum: invested {:.2}, value {:.2}",
            comparison.lump_sum.principal, comparison.lump_sum.future_value
        ),
        format!("Recommendation: {:?}", comparison.recommendation),
    ];

    Ok(Report {
        value: serde_json::to_value(&comparison)?,
        summary,
    })
}

fn run_risk(planner: &Planner, args: RiskArgs) -> Result<Report> {
    let mix = if args.amounts.is_empty() {
        AllocationMix::from_names(args.mix.iter().map(|(k, v)| (k.as_str(), *v)))?
    } else {
        let amounts = args
            .amounts
            .iter()
            .map(|(k, v)| -> Result<(AssetClass, f64)> { Ok((k.parse()?, *v)) })
            .collect::<Result<Vec<_>>>()?;
        AllocationMix::from_amounts(amounts)?
    };
    let tiering = match args.tiering {
        TieringArg::Portfolio => RiskTiering::Portfolio,
        TieringArg::Assessment => RiskTiering::Assessment,
    };

    let planner = planner.clone().with_tiering(tiering);
    let risk = planner.score_allocation(&mix)?;
    let advice = planner.risk_advice(&risk);

    let mut summary = vec![format!(
        "Risk {:.2} ({}), diversification {}, volatility {:.2}",
        risk.score, risk.tier, risk.diversification_score, risk.volatility_estimate
    )];
    summary.extend(advice.iter().map(|a| format!("- {}", a.title)));

    Ok(Report {
        value: serde_json::json!({ "allocation": mix, "risk": risk, "recommendations": advice }),
        summary,
    })
}

fn run_rebalance(planner: &Planner, args: RebalanceArgs) -> Result<Report> {
    let target = AllocationMix::from_names(args.target.iter().map(|(k, v)| (k.as_str(), *v)))?;
    let holdings = args
        .holdings
        .iter()
        .map(|(k, v)| -> Result<(AssetClass, f64)> { Ok((k.parse()?, *v)) })
        .collect::<Result<Vec<_>>>()?;
    let actions = planner.rebalance(holdings, &target)?;

    let summary = if actions.is_empty() {
        vec!["Holdings are within tolerance of the target".to_string()]
    } else {
        actions
            .iter()
            .map(|a| format!("{:?} {} {:.2}", a.side, a.asset_class, a.amount))
            .collect()
    };

    Ok(Report {
        value: serde_json::json!({ "target": target, "actions": actions }),
        summary,
    })
}

fn run_assess(planner: &Planner, args: AssessArgs) -> Result<Report> {
    let zone = args.zone.context();
    let assessment =
        planner.assess_investment(args.asset_class, args.amount, args.months, zone.as_ref(), args.profile)?;

    let mut summary = vec![format!(
        "Risk {} ({}): {}",
        assessment.risk_score, assessment.risk_tier, assessment.description
    )];
    summary.extend(assessment.risk_factors.iter().map(|f| format!("- {}", f)));
    summary.extend(assessment.mitigation_strategies.iter().map(|m| format!("* {}", m)));

    Ok(Report {
        value: serde_json::to_value(&assessment)?,
        summary,
    })
}

fn run_health(planner: &Planner, args: HealthArgs) -> Result<Report> {
    let inputs = match &args.input {
        Some(path) => {
            let file = std::fs::File::open(path)
                .with_context(|| format!("opening health inputs {}", path.display()))?;
            serde_json::from_reader(file)
                .with_context(|| format!("parsing health inputs {}", path.display()))?
        }
        None => HealthInputs {
            monthly_income: args.income,
            monthly_expenses: args.expenses,
            liabilities: args.liabilities,
            assets: holdings(&args.assets)?,
            goal_count: args.goals,
        },
    };

    let health = planner.score_health(&inputs);
    let mut summary = vec![format!("Health score {} ({})", health.score, health.rating)];
    summary.extend(
        health
            .factor_ratings
            .iter()
            .map(|(factor, rating)| format!("  {:?}: {}", factor, rating)),
    );
    summary.extend(health.recommendations.iter().map(|r| format!("- {}", r)));

    Ok(Report {
        value: serde_json::to_value(&health)?,
        summary,
    })
}

fn run_capacity(planner: &Planner, args: CapacityArgs) -> Result<Report> {
    let mut expenses: BTreeMap<String, f64> = BTreeMap::new();
    for (category, amount) in args.expense {
        *expenses.entry(category).or_insert(0.0) += amount;
    }

    let report = planner.investment_capacity(args.income, &expenses)?;
    let mut summary = vec![format!(
        "Available {:.2} of {:.2} ({:.1}%)",
        report.available_for_investment, report.monthly_income, report.investment_pct
    )];
    summary.extend(report.actions.iter().map(|a| format!("- {}: {}", a.title, a.description)));
    summary.extend(
        report
            .expense_analysis
            .actions
            .iter()
            .map(|a| format!("- {}", a.description)),
    );

    Ok(Report {
        value: serde_json::to_value(&report)?,
        summary,
    })
}

fn run_recommend(planner: &Planner, args: RecommendArgs) -> Result<Report> {
    let recommendations = planner.advise(&AdvisoryRequest::for_profile(args.profile));
    let summary = recommendations
        .portfolios
        .iter()
        .map(|p| {
            let allocation: Vec<String> = p
                .allocation
                .iter()
                .map(|(class, pct)| format!("{} {:.0}%", class.display_name(), pct))
                .collect();
            format!("{} [{:?}]: {}", p.name, p.confidence, allocation.join(", "))
        })
        .collect();

    Ok(Report {
        value: serde_json::to_value(&recommendations)?,
        summary,
    })
}

fn holdings(pairs: &[(String, f64)]) -> Result<Option<AssetHoldings>> {
    if pairs.is_empty() {
        return Ok(None);
    }
    let mut holdings = AssetHoldings::default();
    for (bucket, amount) in pairs {
        let slot = match bucket.as_str() {
            "savings" => &mut holdings.savings,
            "mutual_funds" => &mut holdings.mutual_funds,
            "stocks" => &mut holdings.stocks,
            "gold" => &mut holdings.gold,
            "epf" => &mut holdings.epf,
            "real_estate" => &mut holdings.real_estate,
            other => bail!("unknown holding bucket: {}", other),
        };
        *slot += amount;
    }
    Ok(Some(holdings))
}

fn parse_pair(s: &str) -> std::result::Result<(String, f64), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{}'", s))?;
    let value = value
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("invalid number '{}': {}", value, e))?;
    Ok((key.trim().to_string(), value))
}
