use rust_decimal::Decimal;
use std::fmt;

/// Application routes the wallet page links or redirects to. The embedding
/// shell owns actual navigation; this core only names the destinations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Login,
    Deposit,
    Withdraw,
    Trade,
    TransactionHistory,
    RedeemHistory,
    RedeemConfirmation { size_grams: Decimal, quantity: u32 },
    RedeemDetails(String),
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Self::Login => "/".to_string(),
            Self::Deposit => "/deposit".to_string(),
            Self::Withdraw => "/withdraw".to_string(),
            Self::Trade => "/trade".to_string(),
            Self::TransactionHistory => "/transaction-history".to_string(),
            Self::RedeemHistory => "/redeem-history".to_string(),
            Self::RedeemConfirmation {
                size_grams,
                quantity,
            } => format!("/redeem-confirmation/{size_grams}g/{quantity}"),
            Self::RedeemDetails(id) => format!("/redeem-details/{id}"),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
