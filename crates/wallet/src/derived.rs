//! Pure view-model computations over the fetched snapshots. Absent data is
//! treated as empty/zero, never as an error.

use crate::routes::Route;
use common::types::{MarketSummary, Transaction, TransactionKind, TransactionStatus, UserAccount};
use rust_decimal::Decimal;

/// Wallet valuation in LKR; zero when the market snapshot is absent.
pub fn gold_value_lkr(user: Option<&UserAccount>, market: Option<&MarketSummary>) -> Decimal {
    match (user, market) {
        (Some(user), Some(market)) => user.gold_balance_grams * market.latest_price_per_gram,
        _ => Decimal::ZERO,
    }
}

/// Most recent completed transaction of `kind`, by date; equal dates break
/// toward the smaller id, matching the list ordering.
pub fn last_completed<'a>(
    transactions: &'a [Transaction],
    kind: TransactionKind,
) -> Option<&'a Transaction> {
    transactions
        .iter()
        .filter(|tx| tx.kind() == Some(kind) && tx.status == TransactionStatus::Completed)
        .max_by(|a, b| a.date.cmp(&b.date).then_with(|| b.id.cmp(&a.id)))
}

pub fn last_deposit(user: Option<&UserAccount>) -> Option<&Transaction> {
    last_completed(user?.transactions.as_slice(), TransactionKind::Deposit)
}

pub fn last_purchase(user: Option<&UserAccount>) -> Option<&Transaction> {
    last_completed(user?.transactions.as_slice(), TransactionKind::Investment)
}

const ONE_HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Percent of `target` covered by `balance`, clamped to [0, 100]. Zero for
/// non-positive targets or balances.
pub fn redeem_progress(balance: Decimal, target: Decimal) -> Decimal {
    if target <= Decimal::ZERO || balance <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    (balance / target * ONE_HUNDRED).min(ONE_HUNDRED)
}

/// One quick-redeem shortcut: a fixed gram target plus how close the balance
/// is to covering it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuickRedeemTarget {
    pub target_grams: Decimal,
    pub progress_percent: Decimal,
    pub redeemable: bool,
    pub route: Route,
}

pub fn quick_redeem_targets(balance: Decimal, targets: &[Decimal]) -> Vec<QuickRedeemTarget> {
    targets
        .iter()
        .map(|&target_grams| {
            let progress_percent = redeem_progress(balance, target_grams);
            QuickRedeemTarget {
                target_grams,
                progress_percent,
                redeemable: progress_percent == ONE_HUNDRED,
                route: Route::RedeemConfirmation {
                    size_grams: target_grams,
                    quantity: 1,
                },
            }
        })
        .collect()
}
