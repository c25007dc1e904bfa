//! Spending categories and the sign policy attached to each.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Closed set of categories a transaction can be assigned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Category {
    FoodAndDining,
    Transport,
    Rent,
    Utilities,
    Shopping,
    Subscription,
    VendingMachine,
    Entertainment,
    Pharmacy,
    Games,
    Tuition,
    CashWithdrawal,
    Investments,
    Groceries,
    Transfer,
    Income,
    InternalTransfer,
    Returns,
    Other,
}

/// How a category's amounts are signed and aggregated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignPolicy {
    /// Negative; counted in total expenses
    Expense,
    /// Positive; counted in total income
    Income,
    /// Positive; counted in neither total
    Excluded,
}

impl Category {
    pub const ALL: [Category; 19] = [
        Category::FoodAndDining,
        Category::Transport,
        Category::Rent,
        Category::Utilities,
        Category::Shopping,
        Category::Subscription,
        Category::VendingMachine,
        Category::Entertainment,
        Category::Pharmacy,
        Category::Games,
        Category::Tuition,
        Category::CashWithdrawal,
        Category::Investments,
        Category::Groceries,
        Category::Transfer,
        Category::Income,
        Category::InternalTransfer,
        Category::Returns,
        Category::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::FoodAndDining => "Food & Dining",
            Category::Transport => "Transport",
            Category::Rent => "Rent",
            Category::Utilities => "Utilities",
            Category::Shopping => "Shopping",
            Category::Subscription => "Subscription",
            Category::VendingMachine => "Vending Machine",
            Category::Entertainment => "Entertainment",
            Category::Pharmacy => "Pharmacy",
            Category::Games => "Games",
            Category::Tuition => "Tuition",
            Category::CashWithdrawal => "Cash Withdrawal",
            Category::Investments => "Investments",
            Category::Groceries => "Groceries",
            Category::Transfer => "Transfer",
            Category::Income => "Income",
            Category::InternalTransfer => "Internal Transfer",
            Category::Returns => "Returns",
            Category::Other => "Other",
        }
    }

    pub fn policy(&self) -> SignPolicy {
        match self {
            Category::Income => SignPolicy::Income,
            Category::InternalTransfer | Category::Returns => SignPolicy::Excluded,
            _ => SignPolicy::Expense,
        }
    }

    pub fn is_expense(&self) -> bool {
        self.policy() == SignPolicy::Expense
    }

    pub fn is_income(&self) -> bool {
        self.policy() == SignPolicy::Income
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = String;

    /// Accepts the display label, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Category::ALL
            .iter()
            .find(|c| c.label().eq_ignore_ascii_case(s))
            .copied()
            .ok_or_else(|| format!("unknown category: {s}"))
    }
}

impl TryFrom<String> for Category {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Category> for String {
    fn from(c: Category) -> Self {
        c.label().to_string()
    }
}
