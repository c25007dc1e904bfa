use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use ledgerlens_core::Category;
use ledgerlens_finance::summary::{
    category_growth, in_category, monthly_by_category, monthly_by_kind, top_categories,
    top_recipients,
};
use ledgerlens_finance::{
    Categorizer, NormalizedTransaction, RuleTable, Summary, TransactionStore, forecast_monthly,
    monthly_expense_series, normalize_all, write_fresh,
};
use ledgerlens_ingest::StatementBatch;
use ledgerlens_ingest::input::is_statement_file;
use std::fs;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod state;

use config::{Config, load_config};

#[derive(Parser, Debug)]
#[command(name = "ledgerlens", version, about = "Bank statement extraction and spending summaries")]
struct Cli {
    /// Config file (default: ~/.ledgerlens/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// More log output (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract statements and append their transactions to the store
    Import {
        /// Statement files (.pdf or extracted .txt) or directories of them
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
    },

    /// Extract statements into a fresh CSV without touching the store
    Extract {
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        #[arg(long)]
        out: PathBuf,
    },

    /// Income, spending and savings over the stored transactions
    Summary {
        #[arg(long)]
        json: bool,

        /// How many categories and recipients to rank
        #[arg(long, default_value_t = 5)]
        top: usize,
    },

    /// Per-month totals by category and by transaction type
    Monthly {
        #[arg(long)]
        json: bool,
    },

    /// Project monthly spending along its linear trend
    Forecast {
        /// Months to project (default: from config)
        #[arg(long)]
        months: Option<usize>,

        /// Restrict to one category, e.g. "Rent" or "Food & Dining"
        #[arg(long)]
        category: Option<Category>,
    },

    /// Show the category and sign a description would get
    Categorize {
        #[arg(required = true)]
        description: Vec<String>,
    },

    /// List stored transactions of one category, oldest first
    List { category: Category },

    /// Configuration file management
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default config if none exists
    Init,
    /// Print the effective configuration
    Show,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config_path = cli.config.as_deref();
    let cfg = load_config(config_path)?;
    let rules = RuleTable::standard(&cfg.internal_accounts());

    match cli.command {
        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config(config_path)?,
            ConfigCommand::Show => {
                print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
                println!("# store file: {}", cfg.store_path()?.display());
            }
        },

        Command::Import { inputs } => {
            let batch = run_batch(&inputs)?;
            let store = TransactionStore::new(cfg.store_path()?);
            let written = import_batch(&store, &batch)?;
            println!("Appended {written} transactions to {}", store.path().display());
        }

        Command::Extract { inputs, out } => {
            let batch = run_batch(&inputs)?;
            ensure_extracted(&batch)?;
            write_fresh(&out, &batch.transactions)?;
            println!("Wrote {} transactions to {}", batch.transactions.len(), out.display());
        }

        Command::Summary { json, top } => {
            let txns = load_normalized(&cfg, &rules)?;
            print_summary(&txns, top, json)?;
        }

        Command::Monthly { json } => {
            let txns = load_normalized(&cfg, &rules)?;
            let by_category = monthly_by_category(&txns);
            let by_kind = monthly_by_kind(txns.iter().map(|t| &t.transaction));
            if json {
                let out = serde_json::json!({ "by_category": by_category, "by_type": by_kind });
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                for (month, cats) in &by_category {
                    println!("{month}");
                    for (category, amount) in cats {
                        println!("  {:<20} {:>12.2}", category.label(), amount);
                    }
                    if let Some(kinds) = by_kind.get(month) {
                        for (kind, amount) in kinds {
                            println!("  [{kind}] {amount:.2}");
                        }
                    }
                }
            }
        }

        Command::Forecast { months, category } => {
            let txns = load_normalized(&cfg, &rules)?;
            let horizon = months.unwrap_or(cfg.forecast.horizon_months);
            if horizon == 0 {
                bail!("--months must be at least 1");
            }

            let targets = match category {
                Some(c) => vec![Some(c)],
                None => vec![None, Some(Category::Rent), Some(Category::FoodAndDining)],
            };
            for target in targets {
                let label = target.map_or("All spending", |c| c.label());
                let history = monthly_expense_series(&txns, target);
                if history.is_empty() {
                    println!("{label}: no dated history");
                    continue;
                }
                println!("{label}:");
                for p in forecast_monthly(&history, horizon) {
                    println!("  {}  {:>10.2}", p.month, p.amount);
                }
            }
        }

        Command::Categorize { description } => {
            let description = description.join(" ");
            let category = rules.categorize(&description);
            println!("{} ({:?})", category.label(), category.policy());
        }

        Command::List { category } => {
            let txns = load_normalized(&cfg, &rules)?;
            for t in in_category(&txns, category) {
                println!(
                    "{}  {:>10.2}  {:<18} {}",
                    t.transaction.date, t.signed_amount, t.transaction.source, t.transaction.description
                );
            }
        }
    }

    Ok(())
}

/// Files named directly plus statement files found one level inside directories.
fn collect_inputs(inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for input in inputs {
        if input.is_dir() {
            let mut found: Vec<PathBuf> = fs::read_dir(input)
                .with_context(|| format!("read {}", input.display()))?
                .filter_map(|e| e.ok().map(|e| e.path()))
                .filter(|p| p.is_file() && is_statement_file(p))
                .collect();
            found.sort();
            files.extend(found);
        } else {
            files.push(input.clone());
        }
    }
    Ok(files)
}

fn run_batch(inputs: &[PathBuf]) -> Result<StatementBatch> {
    let files = collect_inputs(inputs)?;
    if files.is_empty() {
        bail!("no statement files found");
    }

    let mut batch = StatementBatch::new();
    for file in &files {
        if let Some(report) = batch.add_file(file) {
            let issuer = report.issuer.map_or("unknown".to_string(), |i| i.to_string());
            println!(
                "{:<40} {:<24} {:>4} rows  {:>3} skipped",
                report.filename, issuer, report.extracted, report.skipped
            );
        }
    }
    batch.finish();

    let rejections = batch.rejections();
    if !rejections.is_empty() {
        println!("\nRejected:");
        for r in &rejections {
            println!("- {r}");
        }
    }
    if !batch.failed.is_empty() {
        println!("\nFailed:");
        for (f, e) in &batch.failed {
            println!("- {f}: {e}");
        }
    }
    info!(files = files.len(), transactions = batch.transactions.len(), "batch complete");
    Ok(batch)
}

/// A run that extracted nothing is an error, so nothing gets written.
fn ensure_extracted(batch: &StatementBatch) -> Result<()> {
    if batch.transactions.is_empty() {
        let files = batch.reports.len() + batch.failed.len();
        bail!("nothing extracted from {files} file(s)");
    }
    Ok(())
}

fn import_batch(store: &TransactionStore, batch: &StatementBatch) -> Result<usize> {
    ensure_extracted(batch)?;
    store.append(&batch.transactions)
}

fn load_normalized(cfg: &Config, rules: &RuleTable) -> Result<Vec<NormalizedTransaction>> {
    let store = TransactionStore::new(cfg.store_path()?);
    let txns = store
        .load()
        .with_context(|| format!("loading {}", store.path().display()))?;
    if txns.is_empty() {
        bail!("no transactions in {} (run: ledgerlens import <files>)", store.path().display());
    }
    Ok(normalize_all(rules, txns))
}

fn print_summary(txns: &[NormalizedTransaction], top: usize, json: bool) -> Result<()> {
    let summary = Summary::from_transactions(txns);
    let categories = top_categories(txns, top);
    let recipients = top_recipients(txns, top);
    let growth = category_growth(txns);

    if json {
        let out = serde_json::json!({
            "summary": summary,
            "top_categories": categories,
            "top_recipients": recipients,
            "category_growth": growth,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!("Transactions:  {}", summary.transaction_count);
    println!("Income:        {:.2}", summary.total_income);
    println!("Expenses:      {:.2}", summary.total_expenses);
    println!("Savings:       {:.2}", summary.savings);
    println!("Savings rate:  {:.1}%", summary.savings_rate);

    println!("\nTop categories:");
    for (category, amount) in &categories {
        let change = match growth.get(category).copied().flatten() {
            Some(g) => format!("{g:+.1}% vs previous month"),
            None => "-".to_string(),
        };
        println!("- {:<18} {:>10.2}  {change}", category.label(), amount);
    }

    if !recipients.is_empty() {
        println!("\nTop transfer recipients:");
        for (name, count) in &recipients {
            println!("- {name}: {count} transfers");
        }
    }
    Ok(())
}
