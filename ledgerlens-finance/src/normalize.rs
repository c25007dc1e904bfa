//! Category assignment plus sign normalization.

use ledgerlens_core::{Category, SignPolicy, Transaction};
use serde::Serialize;

use crate::category_rules::Categorizer;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normalized {
    pub category: Category,
    pub signed_amount: f64,
}

/// A transaction with its category and signed amount. The wrapped transaction keeps
/// the unsigned amount as printed on the statement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedTransaction {
    pub transaction: Transaction,
    pub category: Category,
    pub signed_amount: f64,
}

/// Expense categories come out negative, everything else positive.
pub fn normalize<C: Categorizer + ?Sized>(
    categorizer: &C,
    description: &str,
    unsigned_amount: f64,
) -> Normalized {
    let category = categorizer.categorize(description);
    let magnitude = unsigned_amount.abs();
    let signed_amount = match category.policy() {
        SignPolicy::Expense => -magnitude,
        SignPolicy::Income | SignPolicy::Excluded => magnitude,
    };
    Normalized {
        category,
        signed_amount,
    }
}

pub fn normalize_transaction<C: Categorizer + ?Sized>(
    categorizer: &C,
    transaction: Transaction,
) -> NormalizedTransaction {
    let Normalized {
        category,
        signed_amount,
    } = normalize(categorizer, &transaction.description, transaction.amount);
    NormalizedTransaction {
        transaction,
        category,
        signed_amount,
    }
}

pub fn normalize_all<C, I>(categorizer: &C, transactions: I) -> Vec<NormalizedTransaction>
where
    C: Categorizer + ?Sized,
    I: IntoIterator<Item = Transaction>,
{
    transactions
        .into_iter()
        .map(|t| normalize_transaction(categorizer, t))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category_rules::{InternalAccounts, RuleTable};
    use ledgerlens_core::{StatementDate, TxnKind};

    #[test]
    fn test_sign_follows_policy() {
        let t = RuleTable::standard(&InternalAccounts::default());

        let n = normalize(&t, "AMAZON.COM*ABC123", 42.17);
        assert_eq!(n.category, Category::Shopping);
        assert_eq!(n.signed_amount, -42.17);

        let n = normalize(&t, "Direct Deposit - Payroll", 1700.0);
        assert_eq!(n.category, Category::Income);
        assert_eq!(n.signed_amount, 1700.0);

        // excluded group stays positive
        let n = normalize(&t, "Online Transfer To Sav", 1000.0);
        assert_eq!(n.category, Category::InternalTransfer);
        assert_eq!(n.signed_amount, 1000.0);

        // unmatched falls to Other, which is spending
        let n = normalize(&t, "INTERNET PAYMENT - THANK YOU", 300.0);
        assert_eq!(n.category, Category::Other);
        assert_eq!(n.signed_amount, -300.0);
    }

    #[test]
    fn test_negative_input_is_treated_as_magnitude() {
        let t = RuleTable::standard(&InternalAccounts::default());
        assert_eq!(normalize(&t, "Netflix.com", -15.99).signed_amount, -15.99);
        assert_eq!(normalize(&t, "payroll", -10.0).signed_amount, 10.0);
    }

    #[test]
    fn test_sign_invariant_over_every_category() {
        struct Always(Category);
        impl Categorizer for Always {
            fn categorize(&self, _: &str) -> Category {
                self.0
            }
        }

        for category in Category::ALL {
            let n = normalize(&Always(category), "x", 12.5);
            match category.policy() {
                SignPolicy::Expense => assert!(n.signed_amount <= 0.0, "{category}"),
                _ => assert!(n.signed_amount >= 0.0, "{category}"),
            }
        }
    }

    #[test]
    fn test_normalize_transaction_keeps_source_amount() {
        let t = RuleTable::standard(&InternalAccounts::default());
        let txn = Transaction::new(
            StatementDate::Unparsed("??".into()),
            23.41,
            TxnKind::Purchase,
            "UBER *TRIP",
            "Chase Credit Card",
        );
        let n = normalize_transaction(&t, txn);
        assert_eq!(n.transaction.amount, 23.41);
        assert_eq!(n.signed_amount, -23.41);
        assert_eq!(n.category, Category::Transport);
    }
}
