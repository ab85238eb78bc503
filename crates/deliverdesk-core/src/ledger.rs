// Credit/debit inference for wallet transactions
//
// The backend has no sign field; direction comes from the category alone.
// A new backend category lands on the debit side until it is added here.
use deliverdesk_api::Transaction;
use tracing::warn;

/// Categories that move money into a wallet
pub const CREDIT_CATEGORIES: &[&str] = &[
    "WALLET_FUNDING",
    "DEPOSIT",
    "REFUND",
    "ORDER_EARNING",
    "DELIVERY_EARNING",
    "CONSULTATION_EARNING",
    "REFERRAL_BONUS",
    "CASHBACK",
    "MANUAL_CREDIT",
    "REVERSAL",
];

/// Categories that move money out of a wallet
pub const DEBIT_CATEGORIES: &[&str] = &[
    "ORDER_PAYMENT",
    "CONSULTATION_PAYMENT",
    "WITHDRAWAL",
    "PAYOUT",
    "SERVICE_FEE",
    "DELIVERY_FEE",
    "MANUAL_DEBIT",
    "TRANSFER",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    Credit,
    Debit,
}

impl Sign {
    pub fn symbol(&self) -> &'static str {
        match self {
            Sign::Credit => "+",
            Sign::Debit => "-",
        }
    }

    /// Apply the sign to an absolute amount
    pub fn apply(&self, amount: f64) -> f64 {
        match self {
            Sign::Credit => amount.abs(),
            Sign::Debit => -amount.abs(),
        }
    }
}

impl std::fmt::Display for Sign {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}

fn normalize(category: &str) -> String {
    category.trim().to_ascii_uppercase()
}

pub fn is_credit_category(category: &str) -> bool {
    let category = normalize(category);
    CREDIT_CATEGORIES.iter().any(|c| *c == category)
}

/// Whether the console has classified this category on purpose
pub fn is_known_category(category: &str) -> bool {
    let category = normalize(category);
    CREDIT_CATEGORIES
        .iter()
        .chain(DEBIT_CATEGORIES.iter())
        .any(|c| *c == category)
}

/// Display sign for a category: allow-listed credits are `+`, everything else `-`
pub fn sign_for_category(category: &str) -> Sign {
    if is_credit_category(category) {
        return Sign::Credit;
    }

    if !is_known_category(category) {
        warn!("Unclassified transaction category '{}' shown as debit", category);
    }
    Sign::Debit
}

pub fn transaction_sign(tx: &Transaction) -> Sign {
    sign_for_category(&tx.category)
}

/// Signed amount, e.g. `-1500.0` for a withdrawal
pub fn signed_amount(tx: &Transaction) -> f64 {
    transaction_sign(tx).apply(tx.amount)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_credit_category_is_plus() {
        for category in CREDIT_CATEGORIES {
            assert_eq!(sign_for_category(category), Sign::Credit, "{}", category);
            assert_eq!(sign_for_category(category).symbol(), "+");
        }
    }

    #[test]
    fn test_every_other_category_is_minus() {
        for category in DEBIT_CATEGORIES {
            assert_eq!(sign_for_category(category).symbol(), "-", "{}", category);
        }
        assert_eq!(sign_for_category("SOMETHING_NEW").symbol(), "-");
        assert_eq!(sign_for_category("").symbol(), "-");
    }

    #[test]
    fn test_matching_ignores_case_and_padding() {
        assert_eq!(sign_for_category(" wallet_funding "), Sign::Credit);
        assert!(is_known_category("payout"));
    }

    /// Regression guard: if the backend grows a category, it has to be
    /// placed on a side here on purpose.
    #[test]
    fn test_known_categories_are_exactly_enumerated() {
        let expected: &[(&str, Sign)] = &[
            ("WALLET_FUNDING", Sign::Credit),
            ("DEPOSIT", Sign::Credit),
            ("REFUND", Sign::Credit),
            ("ORDER_EARNING", Sign::Credit),
            ("DELIVERY_EARNING", Sign::Credit),
            ("CONSULTATION_EARNING", Sign::Credit),
            ("REFERRAL_BONUS", Sign::Credit),
            ("CASHBACK", Sign::Credit),
            ("MANUAL_CREDIT", Sign::Credit),
            ("REVERSAL", Sign::Credit),
            ("ORDER_PAYMENT", Sign::Debit),
            ("CONSULTATION_PAYMENT", Sign::Debit),
            ("WITHDRAWAL", Sign::Debit),
            ("PAYOUT", Sign::Debit),
            ("SERVICE_FEE", Sign::Debit),
            ("DELIVERY_FEE", Sign::Debit),
            ("MANUAL_DEBIT", Sign::Debit),
            ("TRANSFER", Sign::Debit),
        ];

        assert_eq!(CREDIT_CATEGORIES.len() + DEBIT_CATEGORIES.len(), expected.len());
        for (category, sign) in expected {
            assert!(is_known_category(category), "{} not classified", category);
            assert_eq!(sign_for_category(category), *sign, "{}", category);
        }

        // No category sits on both sides
        for credit in CREDIT_CATEGORIES {
            assert!(!DEBIT_CATEGORIES.contains(credit), "{} is on both sides", credit);
        }
    }

    #[test]
    fn test_signed_amount_ignores_wire_sign() {
        let tx: Transaction = serde_json::from_str(
            r#"{"id":"t1","category":"WITHDRAWAL","amount":-1500}"#,
        )
        .unwrap();
        assert_eq!(signed_amount(&tx), -1500.0);

        let tx: Transaction =
            serde_json::from_str(r#"{"id":"t2","category":"REFUND","amount":700}"#).unwrap();
        assert_eq!(signed_amount(&tx), 700.0);
    }
}
