//! ledgerlens-core: transaction model, categories and statement date resolution

pub mod category;
pub mod dates;
pub mod transaction;

pub use category::{Category, SignPolicy};
pub use dates::{FALLBACK_YEAR, resolve, year_from_filename};
pub use transaction::{CheckingSection, RECORD_HEADER, StatementDate, Transaction, TxnKind};
