//! Payoff Engine CLI
//!
//! Command-line interface for payoff plans, strategy comparisons, and
//! liquidity checks against a finance document

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand, ValueEnum};

use payoff_engine::debt::load_debts;
use payoff_engine::liquidity::{
    biweekly_known_expenses, days_until, next_paycheck, LiquidityReport, LiquiditySnapshot,
    ScheduledPayment,
};
use payoff_engine::payoff::{PayoffProjector, ProjectorConfig};
use payoff_engine::summary::{total_minimum_payments, total_monthly_budget};
use payoff_engine::{
    plan_payoff, CascadeModel, FinanceConfig, PayoffPlan, PortfolioSummary, ScenarioRunner,
    Strategy,
};

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliStrategy {
    Baseline,
    Snowball,
    Avalanche,
    Custom,
}

impl From<CliStrategy> for Strategy {
    fn from(value: CliStrategy) -> Self {
        match value {
            CliStrategy::Baseline => Strategy::Baseline,
            CliStrategy::Snowball => Strategy::Snowball,
            CliStrategy::Avalanche => Strategy::Avalanche,
            CliStrategy::Custom => Strategy::Custom,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliModel {
    Sequential,
    Simultaneous,
}

impl From<CliModel> for CascadeModel {
    fn from(value: CliModel) -> Self {
        match value {
            CliModel::Sequential => CascadeModel::Sequential,
            CliModel::Simultaneous => CascadeModel::Simultaneous,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "payoff-engine", version, about = "Debt payoff and liquidity planner")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Project the payoff timeline for the configured debts
    Plan {
        #[arg(long)]
        config: PathBuf,

        /// Replace the document's debts with a CSV debt list
        #[arg(long)]
        debts: Option<PathBuf>,

        #[arg(long, value_enum)]
        strategy: Option<CliStrategy>,

        /// Monthly extra payment (defaults to the budget's debt_snowball_extra)
        #[arg(long)]
        extra: Option<f64>,

        #[arg(long, value_enum, default_value = "sequential")]
        model: CliModel,

        /// First projection month (defaults to today)
        #[arg(long)]
        start: Option<NaiveDate>,

        /// Write the timeline to CSV
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Compare every ordering strategy side by side
    Compare {
        #[arg(long)]
        config: PathBuf,

        #[arg(long)]
        extra: Option<f64>,
    },

    /// Effect of paying more each month and/or a one-time windfall
    WhatIf {
        #[arg(long)]
        config: PathBuf,

        #[arg(long)]
        extra_delta: f64,

        #[arg(long, default_value_t = 0.0)]
        windfall: f64,
    },

    /// Safe-to-spend, overage, and cash-flow status
    Liquidity {
        #[arg(long)]
        config: PathBuf,

        #[arg(long)]
        checking: f64,

        #[arg(long)]
        savings: f64,

        #[arg(long)]
        paycheck: f64,

        #[arg(long = "autopay")]
        autopays: Vec<f64>,

        #[arg(long = "irregular")]
        irregular: Vec<f64>,
    },

    /// Next biweekly payday after a reference date
    Payday {
        #[arg(long)]
        anchor: NaiveDate,

        /// Defaults to today
        #[arg(long)]
        reference: Option<NaiveDate>,
    },
}

fn load_config(path: &Path) -> Result<FinanceConfig> {
    FinanceConfig::from_json_path(path)
        .with_context(|| format!("failed to load finance document {}", path.display()))
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn print_plan(plan: &PayoffPlan) {
    println!(
        "Strategy: {}  Extra: ${:.2}/mo  Model: {:?}",
        plan.strategy.strategy.as_str(),
        plan.monthly_extra,
        plan.projection.model
    );
    println!();
    println!(
        "{:<24} {:>12} {:>10} {:>12} {:>8} {:>12} {:>12}",
        "Debt", "Balance", "Payment", "Isolated", "Months", "Payoff", "Interest"
    );
    println!("{}", "-".repeat(96));

    for (item, entry) in plan.ordered.iter().zip(&plan.projection.entries) {
        let isolated = if item.payoff.is_converged() {
            item.payoff.months().to_string()
        } else {
            "never".to_string()
        };
        println!(
            "{:<24} {:>12.2} {:>10.2} {:>12} {:>8} {:>12} {:>12.2}{}",
            entry.debt_name,
            item.debt.balance,
            item.monthly_payment,
            isolated,
            entry.months_to_payoff,
            entry.payoff_date.format("%Y-%m"),
            entry.total_interest_paid,
            if entry.converged { "" } else { "  (capped)" },
        );
    }

    let summary = plan.projection.summary();
    println!("\nSummary:");
    println!("  Total Balance: ${:.2}", plan.total_balance());
    println!("  Monthly Outlay: ${:.2}", plan.monthly_outlay());
    println!("  Total Interest: ${:.2}", summary.total_interest);
    match summary.debt_free_date {
        Some(date) => println!(
            "  Debt-Free: {} ({} months)",
            date.format("%B %Y"),
            summary.debt_free_months
        ),
        None => println!("  Debt-Free: no active debts"),
    }
    if summary.non_convergent_count > 0 {
        println!(
            "  Warning: {} debt(s) never clear at the current payment",
            summary.non_convergent_count
        );
    }

    if !plan.projection.cascade.is_empty() {
        println!("\nCascade:");
        for step in &plan.projection.cascade {
            println!(
                "  Month {:>3}: {} retired, extra now ${:.2}, minimums ${:.2}",
                step.month, step.debt_id, step.remaining_extra, step.outstanding_minimums
            );
        }
    }
}

fn write_timeline(plan: &PayoffPlan, path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("unable to create {}", path.display()))?;
    for entry in &plan.projection.entries {
        writer.serialize(entry)?;
    }
    writer.flush()?;
    Ok(())
}

fn run_plan(
    config_path: PathBuf,
    debts_path: Option<PathBuf>,
    strategy: Option<CliStrategy>,
    extra: Option<f64>,
    model: CliModel,
    start: Option<NaiveDate>,
    output: Option<PathBuf>,
) -> Result<()> {
    let mut config = load_config(&config_path)?;
    if let Some(path) = debts_path {
        config.debts = load_debts(&path)
            .with_context(|| format!("failed to load debt list {}", path.display()))?;
    }

    let mut strategy_config = config.strategy.clone();
    if let Some(strategy) = strategy {
        strategy_config.strategy = strategy.into();
    }

    let projector = PayoffProjector::new(ProjectorConfig::with_model(model.into()));
    let plan = plan_payoff(
        &config.debts,
        &strategy_config,
        extra.unwrap_or_else(|| config.monthly_extra()),
        start.unwrap_or_else(today),
        &projector,
    )?;

    let today = today();
    for debt in config.debts.iter().filter(|d| d.promo_expired(today)) {
        log::warn!("promotional rate on {} has ended", debt.name);
    }

    print_plan(&plan);

    if let Some(path) = output {
        write_timeline(&plan, &path)?;
        println!("\nTimeline written to: {}", path.display());
    }
    Ok(())
}

fn run_compare(config_path: PathBuf, extra: Option<f64>) -> Result<()> {
    let config = load_config(&config_path)?;
    let extra = extra.unwrap_or_else(|| config.monthly_extra());
    let runner = ScenarioRunner::from_config(&config, today())?;

    let outcomes = runner.compare_strategies(extra)?;

    println!("Strategy comparison at ${:.2}/mo extra\n", extra);
    println!("{:<12} {:>8} {:>12} {:>14}", "Strategy", "Months", "Debt-Free", "Interest");
    println!("{}", "-".repeat(50));
    for outcome in &outcomes {
        let date = outcome
            .summary
            .debt_free_date
            .map(|d| d.format("%Y-%m").to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<12} {:>8} {:>12} {:>14.2}",
            outcome.strategy.as_str(),
            outcome.summary.debt_free_months,
            date,
            outcome.summary.total_interest
        );
    }
    Ok(())
}

fn run_what_if(config_path: PathBuf, extra_delta: f64, windfall: f64) -> Result<()> {
    let config = load_config(&config_path)?;
    let runner = ScenarioRunner::from_config(&config, today())?;
    let result = runner.what_if(config.monthly_extra(), extra_delta, windfall)?;

    println!(
        "What if: +${:.2}/mo extra, ${:.2} one-time payment\n",
        extra_delta, windfall
    );
    println!("{:<10} {:>8} {:>14}", "", "Months", "Interest");
    println!(
        "{:<10} {:>8} {:>14.2}",
        "Current", result.base.debt_free_months, result.base.total_interest
    );
    println!(
        "{:<10} {:>8} {:>14.2}",
        "Scenario", result.scenario.debt_free_months, result.scenario.total_interest
    );
    println!("\n  Months Saved: {}", result.months_saved);
    println!("  Interest Saved: ${:.2}", result.interest_saved);
    Ok(())
}

fn run_liquidity(
    config_path: PathBuf,
    checking: f64,
    savings: f64,
    paycheck: f64,
    autopays: Vec<f64>,
    irregular: Vec<f64>,
) -> Result<()> {
    let config = load_config(&config_path)?;

    let numbered = |label: &str, amounts: Vec<f64>| -> Vec<ScheduledPayment> {
        amounts
            .into_iter()
            .enumerate()
            .map(|(i, amount)| ScheduledPayment::new(format!("{} {}", label, i + 1), amount))
            .collect()
    };

    let snapshot = LiquiditySnapshot {
        checking_balance: checking,
        savings_balance: savings,
        upcoming_paycheck_amount: paycheck,
        auto_pays: numbered("Auto-pay", autopays),
        irregular_expenses: numbered("Irregular", irregular),
        emergency_buffer_target: config.emergency_buffer_target,
    };

    let monthly_budget = total_monthly_budget(&config.budget);
    let known = biweekly_known_expenses(monthly_budget, total_minimum_payments(&config.debts));
    let report = LiquidityReport::build(&snapshot, &config.accounts, known, monthly_budget);

    let today = today();
    let payday = next_paycheck(config.income.last_paycheck_date, today);
    let portfolio = PortfolioSummary::from_config(&config, checking, savings);

    println!("Liquidity");
    println!("  Safe to Spend: ${:.2}", report.safe_to_spend);
    println!("  Overage: ${:.2}", report.overage);
    println!("  Status: {}", report.status.as_str());
    println!("  Month-End Estimate: ${:.2}", report.month_end_estimate);
    println!(
        "  Next Paycheck: {} ({} days)",
        payday.format("%a %b %-d, %Y"),
        days_until(payday, today)
    );
    println!("\nPortfolio");
    println!("  Total Debt: ${:.2}", portfolio.total_debt);
    println!("  Property Equity: ${:.2}", portfolio.property_equity);
    println!("  Retirement: ${:.2}", portfolio.retirement_total);
    println!("  Net Worth: ${:.2}", portfolio.net_worth);
    Ok(())
}

fn run_payday(anchor: NaiveDate, reference: Option<NaiveDate>) {
    let reference = reference.unwrap_or_else(today);
    let payday = next_paycheck(anchor, reference);
    println!(
        "Next paycheck: {} ({} days from {})",
        payday,
        days_until(payday, reference),
        reference
    );
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    match cli.command {
        Command::Plan {
            config,
            debts,
            strategy,
            extra,
            model,
            start,
            output,
        } => run_plan(config, debts, strategy, extra, model, start, output),
        Command::Compare { config, extra } => run_compare(config, extra),
        Command::WhatIf {
            config,
            extra_delta,
            windfall,
        } => run_what_if(config, extra_delta, windfall),
        Command::Liquidity {
            config,
            checking,
            savings,
            paycheck,
            autopays,
            irregular,
        } => run_liquidity(config, checking, savings, paycheck, autopays, irregular),
        Command::Payday { anchor, reference } => {
            run_payday(anchor, reference);
            Ok(())
        }
    }
}
