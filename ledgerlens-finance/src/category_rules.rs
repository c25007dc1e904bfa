//! Deterministic keyword rules mapping a transaction description to a [`Category`].
//!
//! Rules are checked in table order and the first rule with a keyword contained in the
//! lower-cased description wins. Nothing matching falls through to `Other`.

use ledgerlens_core::Category;

/// Anything that can assign a category to a raw description.
pub trait Categorizer {
    fn categorize(&self, description: &str) -> Category;
}

/// A trained text classifier. Receives [`clean_text`] output, not the raw description.
pub trait Classifier {
    fn predict(&self, cleaned: &str) -> Category;
}

/// Adapts a [`Classifier`] to the [`Categorizer`] seam.
pub struct ClassifierCategorizer<C> {
    classifier: C,
}

impl<C: Classifier> ClassifierCategorizer<C> {
    pub fn new(classifier: C) -> Self {
        Self { classifier }
    }
}

impl<C: Classifier> Categorizer for ClassifierCategorizer<C> {
    fn categorize(&self, description: &str) -> Category {
        self.classifier.predict(&clean_text(description))
    }
}

/// Lower-case and drop punctuation, keeping letters, digits, underscores and whitespace.
pub fn clean_text(description: &str) -> String {
    description
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || c.is_whitespace())
        .collect()
}

/// Description fragments identifying the user's own accounts.
///
/// A movement mentioning one of these is money going between the user's accounts,
/// neither earned nor spent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InternalAccounts {
    fragments: Vec<String>,
}

impl InternalAccounts {
    pub fn new<I, S>(fragments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            fragments: fragments
                .into_iter()
                .map(|f| f.as_ref().trim().to_string())
                .filter(|f| !f.is_empty())
                .collect(),
        }
    }

    pub fn fragments(&self) -> &[String] {
        &self.fragments
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    pub category: Category,
    /// Lower-cased substrings
    pub keywords: Vec<String>,
}

impl Rule {
    pub fn new<I, S>(category: Category, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            category,
            keywords: keywords
                .into_iter()
                .map(|k| k.as_ref().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect(),
        }
    }

    fn matches(&self, lowered: &str) -> bool {
        self.keywords.iter().any(|k| lowered.contains(k.as_str()))
    }
}

/// Ordered rule list; the order decides between overlapping keywords.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleTable {
    rules: Vec<Rule>,
}

impl RuleTable {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// The stock rule set, led by the internal-transfer rule built from `accounts`.
    pub fn standard(accounts: &InternalAccounts) -> Self {
        let mut internal: Vec<&str> = accounts.fragments().iter().map(String::as_str).collect();
        internal.push("transfer");

        Self::new(vec![
            Rule::new(Category::InternalTransfer, internal),
            Rule::new(
                Category::Groceries,
                ["meijer", "walmart", "costco", "kroger", "grocery", "aldi", "whole foods"],
            ),
            Rule::new(
                Category::FoodAndDining,
                [
                    "uber eats",
                    "doordash",
                    "grubhub",
                    "restaurant",
                    "dining",
                    "mcdonald's",
                    "coffee",
                    "cafe",
                    "chick-fil-a",
                    "raising canes",
                    "chipotle",
                    "aramark",
                    "china food",
                    "fortune noodle house",
                    "starbucks",
                    "subway",
                    "the 86",
                    "deli",
                    "halal food",
                    "thai express",
                    "adeep india",
                    "drunken",
                    "adriaticos",
                    "cheesecake",
                    "united dairy farm",
                    "popeyes",
                ],
            ),
            Rule::new(
                Category::Transport,
                ["uber", "lyft", "ride", "taxi", "masabi_sorta", "american airlines", "masabi"],
            ),
            Rule::new(
                Category::Subscription,
                [
                    "netflix",
                    "spotify",
                    "subscription",
                    "apple.com",
                    "openai",
                    "chatgpt",
                    "crunchyroll",
                    "chegg",
                ],
            ),
            Rule::new(
                Category::Rent,
                ["rent", "lease", "apartment", "rebecca", "mclean", "Rebecca "],
            ),
            Rule::new(
                Category::Transfer,
                [
                    "zelle to",
                    "venmo",
                    "paypal",
                    "zel to",
                    "zelle payment to",
                    "domestic incoming wire fee",
                ],
            ),
            Rule::new(
                Category::Income,
                [
                    "salary",
                    "payroll",
                    "deposit",
                    "income",
                    "fedwire",
                    "zelle from",
                    "zel from",
                    "desposit",
                    "zelle payment from",
                    "credit",
                    "new checking",
                    "Daily Cash Deposit",
                ],
            ),
            Rule::new(Category::CashWithdrawal, ["atm", "cash", "withdrawal"]),
            Rule::new(
                Category::Shopping,
                [
                    "amazon",
                    "online",
                    "purchase",
                    "target",
                    "clifton market",
                    "the 86",
                    "ravine",
                    "amzn",
                    "prime video",
                    "viv makret",
                    "bana market",
                ],
            ),
            Rule::new(Category::Utilities, ["dukeenergycorpor", "vzwrlss", "visible"]),
            Rule::new(
                Category::Tuition,
                ["universitycinti", "univ cinti", "university of cincinnati", "uc", "univ of cinti"],
            ),
            Rule::new(Category::VendingMachine, ["parlevel texas"]),
            Rule::new(Category::Investments, ["robinhood"]),
            Rule::new(Category::Entertainment, ["fandango", "amc"]),
            Rule::new(Category::Pharmacy, ["cvs"]),
            Rule::new(
                Category::Games,
                ["epic", "steamgames", "playstationnetwork", "nvidia"],
            ),
            Rule::new(Category::Returns, ["Interest"]),
        ])
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// First rule hit for a description, if any.
    pub fn matching_rule(&self, description: &str) -> Option<&Rule> {
        let lowered = description.to_lowercase();
        self.rules.iter().find(|r| r.matches(&lowered))
    }
}

impl Categorizer for RuleTable {
    fn categorize(&self, description: &str) -> Category {
        self.matching_rule(description)
            .map_or(Category::Other, |r| r.category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> RuleTable {
        RuleTable::standard(&InternalAccounts::new(["Sav ...5521", "account ending in 1234"]))
    }

    #[test]
    fn test_rule_order_breaks_ties() {
        let t = table();
        assert_eq!(t.categorize("uber grocery"), Category::Groceries);
        assert_eq!(t.categorize("UBER EATS SAN FRANCISCO"), Category::FoodAndDining);
        assert_eq!(t.categorize("UBER *TRIP HELP.UBER.COM"), Category::Transport);
        // rent is checked before transfers
        assert_eq!(t.categorize("Zelle Payment To Rebecca Rent"), Category::Rent);
        assert_eq!(t.categorize("Zelle Payment To Alex 2139876"), Category::Transfer);
    }

    #[test]
    fn test_known_merchants() {
        let t = table();
        let cases = [
            ("AMAZON.COM*ABC123", Category::Shopping),
            ("POS Purchase Kroger #945 Cincinnati OH", Category::Groceries),
            ("Direct Deposit - Payroll University Of Cinti PPD", Category::Income),
            ("ATM Withdrawal 1234 Clifton Ave", Category::CashWithdrawal),
            ("Dukeenergycorpor Web Pmt", Category::Utilities),
            ("Robinhood Debits Ppd ID: 8889", Category::Investments),
            ("CVS/PHARMACY #05566", Category::Pharmacy),
            ("Steamgames.Com 4259522985", Category::Games),
            ("FANDANGO 866-8575191 CA", Category::Entertainment),
            ("PARLEVEL TEXAS 0042", Category::VendingMachine),
            ("INTERNET PAYMENT - THANK YOU", Category::Other),
        ];
        for (desc, expected) in cases {
            assert_eq!(t.categorize(desc), expected, "{desc}");
        }
    }

    #[test]
    fn test_internal_transfers_lead() {
        let t = table();
        assert_eq!(
            t.categorize("Online Transfer To Sav ...5521 Transaction#: 4411"),
            Category::InternalTransfer
        );
        assert_eq!(
            t.categorize("ACH Deposit Internet transfer from account ending in 1234"),
            Category::InternalTransfer
        );
        // an account fragment alone is enough, without the word "transfer"
        assert_eq!(
            t.categorize("Payment from account ending in 1234"),
            Category::InternalTransfer
        );
    }

    #[test]
    fn test_empty_fragments_are_ignored() {
        let accounts = InternalAccounts::new(["", "   "]);
        assert!(accounts.fragments().is_empty());
        let t = RuleTable::standard(&accounts);
        assert_eq!(t.rules()[0].keywords, vec!["transfer".to_string()]);
        assert_eq!(t.categorize("Netflix.Com"), Category::Subscription);
    }

    /// Keyword literals are lower-cased when the table is built, so mixed-case entries
    /// now match. Previously "Interest Paid" fell through to Other.
    #[test]
    fn test_mixed_case_keywords_now_match() {
        let t = table();
        assert_eq!(t.categorize("Interest Paid"), Category::Returns);
        assert_eq!(t.categorize("Daily Cash Deposit"), Category::Income);
        assert!(t.rules().iter().all(|r| r.keywords.iter().all(|k| *k == k.to_lowercase())));
    }

    #[test]
    fn test_categorizer_is_total() {
        let t = table();
        for desc in ["", "   ", "???", "zzzz qqqq"] {
            assert_eq!(t.categorize(desc), Category::Other);
        }
    }

    struct FixedClassifier;

    impl Classifier for FixedClassifier {
        fn predict(&self, cleaned: &str) -> Category {
            if cleaned == "amazoncomabc123 order" {
                Category::Shopping
            } else {
                Category::Other
            }
        }
    }

    #[test]
    fn test_classifier_gets_cleaned_text() {
        assert_eq!(clean_text("AMAZON.COM*ABC123 Order!"), "amazoncomabc123 order");
        let c = ClassifierCategorizer::new(FixedClassifier);
        assert_eq!(c.categorize("AMAZON.COM*ABC123 Order!"), Category::Shopping);
        assert_eq!(c.categorize("something else"), Category::Other);
    }
}
