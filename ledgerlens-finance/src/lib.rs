//! ledgerlens-finance: categorization, sign normalization, aggregation, forecasting and
//! the flat transaction store

pub mod category_rules;
pub mod forecast;
pub mod normalize;
pub mod store;
pub mod summary;

pub use category_rules::{
    Categorizer, Classifier, ClassifierCategorizer, InternalAccounts, Rule, RuleTable, clean_text,
};
pub use forecast::{ForecastCache, MonthlyPoint, forecast_monthly, monthly_expense_series};
pub use normalize::{Normalized, NormalizedTransaction, normalize, normalize_all, normalize_transaction};
pub use store::{TransactionStore, load_csv, write_fresh};
pub use summary::{CategoryTotal, Summary, YearMonth};
