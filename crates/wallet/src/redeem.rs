//! Custom bulk-redemption calculator. Inputs arrive as raw form strings and
//! are gated client-side only; the confirmation step re-checks the balance
//! authoritatively.

use crate::routes::Route;
use rust_decimal::Decimal;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedeemPlan {
    pub size_grams: Decimal,
    pub quantity: u32,
    pub total_grams: Decimal,
    pub sufficient: bool,
}

impl RedeemPlan {
    /// Confirmation route, only when the balance covers the request.
    pub fn route(&self) -> Option<Route> {
        self.sufficient.then(|| Route::RedeemConfirmation {
            size_grams: self.size_grams,
            quantity: self.quantity,
        })
    }
}

/// Build a plan from raw form inputs. Anything that does not parse to a
/// positive size and quantity yields a zero-gram, insufficient plan.
pub fn plan(size: &str, quantity: &str, balance_grams: Decimal) -> RedeemPlan {
    let parsed_size = Decimal::from_str(size.trim()).ok().filter(|s| *s > Decimal::ZERO);
    let parsed_quantity = quantity.trim().parse::<u32>().ok().filter(|q| *q > 0);

    let (size_grams, quantity, total_grams) = match (parsed_size, parsed_quantity) {
        (Some(size), Some(qty)) => (size, qty, size * Decimal::from(qty)),
        _ => (Decimal::ZERO, 0, Decimal::ZERO),
    };
    RedeemPlan {
        size_grams,
        quantity,
        total_grams,
        sufficient: total_grams > Decimal::ZERO && balance_grams >= total_grams,
    }
}

/// Whether `size` is one of the coin sizes the form offers.
pub fn is_offered_size(size: Decimal, coin_sizes: &[Decimal]) -> bool {
    coin_sizes.contains(&size)
}
