//! Display-string row models for the overview card and the two tables. The
//! rendering layer consumes these verbatim; all per-type branching and
//! zero guards live here, not at the render site.

use crate::derived::{gold_value_lkr, last_deposit, last_purchase};
use crate::routes::Route;
use common::format::{fixed_dp, format_currency, format_date, format_day};
use common::types::{MarketSummary, PriceTrend, Transaction, TransactionDetail, UserAccount};
use rust_decimal::Decimal;

const EMPTY_CELL: &str = "—";

fn grams_cell(value: Decimal) -> String {
    format!("{} g", fixed_dp(value, 3))
}

/// One row of the transaction-history table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionRow {
    pub date: String,
    pub kind: String,
    pub cash: String,
    pub gold: String,
    pub rate: String,
    pub fee: String,
    pub total: String,
    pub status: String,
}

pub fn transaction_row(tx: &Transaction) -> TransactionRow {
    let mut cash = EMPTY_CELL.to_string();
    let mut gold = EMPTY_CELL.to_string();
    let mut rate = EMPTY_CELL.to_string();
    let mut fee = EMPTY_CELL.to_string();
    let mut total = EMPTY_CELL.to_string();

    match &tx.detail {
        TransactionDetail::Deposit { amount_lkr } => {
            cash = format!("+ {}", format_currency(*amount_lkr));
            total = format_currency(*amount_lkr);
        }
        TransactionDetail::Withdrawal { amount_lkr } => {
            cash = format!("- {}", format_currency(*amount_lkr));
            total = format_currency(*amount_lkr);
        }
        TransactionDetail::Investment {
            amount_lkr,
            amount_grams,
        } => {
            cash = format!("- {}", format_currency(*amount_lkr));
            gold = format!("+ {}", grams_cell(*amount_grams));
            rate = rate_cell(tx);
            total = grams_cell(*amount_grams);
        }
        TransactionDetail::SellGold {
            amount_lkr,
            amount_grams,
        } => {
            cash = format!("+ {}", format_currency(*amount_lkr));
            gold = format!("- {}", grams_cell(*amount_grams));
            rate = rate_cell(tx);
            total = format_currency(*amount_lkr);
        }
        TransactionDetail::Redemption {
            amount_grams,
            fee_lkr,
            ..
        } => {
            gold = format!("- {}", grams_cell(*amount_grams));
            if let Some(fee_lkr) = nonzero(*fee_lkr) {
                fee = format!("- {}", format_currency(fee_lkr));
            }
            total = grams_cell(*amount_grams);
        }
        TransactionDetail::Bonus {
            amount_lkr,
            amount_grams,
        } => {
            if let Some(amount_lkr) = nonzero(*amount_lkr) {
                cash = format!("+ {}", format_currency(amount_lkr));
            }
            if let Some(amount_grams) = nonzero(*amount_grams) {
                gold = format!("+ {}", grams_cell(amount_grams));
            }
            total = if cash != EMPTY_CELL {
                cash.clone()
            } else {
                gold.clone()
            };
        }
        TransactionDetail::Fee { amount_lkr } => {
            if !amount_lkr.is_zero() {
                cash = format!("- {}", format_currency(*amount_lkr));
            }
            fee = format_currency(*amount_lkr);
            total = format_currency(*amount_lkr);
        }
        TransactionDetail::Other => {}
    }

    TransactionRow {
        date: format_date(tx.date),
        kind: tx
            .kind()
            .map_or_else(|| "N/A".to_string(), |kind| kind.label().to_string()),
        cash,
        gold,
        rate,
        fee,
        total,
        status: tx.status.as_str().to_string(),
    }
}

fn rate_cell(tx: &Transaction) -> String {
    match tx.unit_rate_lkr() {
        Some(rate) => format!("{}/g", format_currency(rate)),
        None => "N/A".to_string(),
    }
}

fn nonzero(value: Option<Decimal>) -> Option<Decimal> {
    value.filter(|v| !v.is_zero())
}

/// One row of the redemption-history table. Only built from redemption
/// transactions; other kinds never reach this table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedemptionRow {
    pub date: String,
    pub item: String,
    pub quantity: u32,
    pub total_gold: String,
    pub fees: String,
    pub status: String,
    pub tracking: Option<String>,
    pub details_route: Route,
}

pub fn redemption_row(tx: &Transaction) -> Option<RedemptionRow> {
    let TransactionDetail::Redemption {
        amount_grams,
        fee_lkr,
        item_description,
        quantity,
        tracking_number,
    } = &tx.detail
    else {
        return None;
    };
    let item = item_description
        .clone()
        .unwrap_or_else(|| format!("{}g Item", fixed_dp(*amount_grams, 3)));
    let fees = match nonzero(*fee_lkr) {
        Some(fee) => format_currency(fee),
        None => "Rs. 0.00".to_string(),
    };
    Some(RedemptionRow {
        date: format_date(tx.date),
        item,
        quantity: *quantity,
        total_gold: grams_cell(*amount_grams),
        fees,
        status: tx.status.as_str().to_string(),
        tracking: tracking_number.clone(),
        details_route: Route::RedeemDetails(tx.id.clone()),
    })
}

/// The wallet-overview card: cash and gold balances plus last-activity lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverviewCard {
    pub cash_balance: String,
    pub cash_activity: String,
    pub gold_balance: String,
    pub gold_value: String,
    pub trend: Option<String>,
    pub gold_activity: String,
}

pub fn overview_card(user: &UserAccount, market: Option<&MarketSummary>) -> OverviewCard {
    let cash_activity = match last_deposit(Some(user)).and_then(|tx| {
        tx.amount_lkr()
            .map(|lkr| (format_currency(lkr), format_day(tx.date)))
    }) {
        Some((amount, day)) => format!("Last Deposit: {amount} on {day}"),
        None => "No recent deposits".to_string(),
    };
    let gold_activity = match last_purchase(Some(user)).and_then(|tx| {
        tx.amount_grams()
            .map(|grams| (grams_cell(grams), format_day(tx.date)))
    }) {
        Some((grams, day)) => format!("Last Purchase: {grams} on {day}"),
        None => "No recent purchases".to_string(),
    };
    let gold_value = match market {
        Some(_) => format!(
            "≈ {}",
            format_currency(gold_value_lkr(Some(user), market))
        ),
        None => "≈ N/A".to_string(),
    };
    let trend = market.map(|market| {
        let arrow = match market.trend {
            PriceTrend::Up => "▲ ",
            PriceTrend::Down => "▼ ",
            PriceTrend::Stable => "",
        };
        format!(
            "{arrow}{}% today",
            fixed_dp(market.price_change_percent, 1)
        )
    });
    OverviewCard {
        cash_balance: format_currency(user.cash_balance_lkr),
        cash_activity,
        gold_balance: grams_cell(user.gold_balance_grams),
        gold_value,
        trend,
        gold_activity,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tx(id: &str, body: &str) -> Transaction {
        let json = format!(r#"{{"_id": "{id}", {body}}}"#);
        serde_json::from_str(&json).unwrap()
    }

    #[test]
    fn test_deposit_row() {
        let tx = tx(
            "t1",
            r#""date": "2026-01-05T15:04:00Z", "type": "deposit", "amountLKR": 5000"#,
        );
        let row = transaction_row(&tx);
        assert_eq!(row.date, "Jan 5, 2026, 3:04 PM");
        assert_eq!(row.kind, "deposit");
        assert_eq!(row.cash, "+ Rs. 5,000.00");
        assert_eq!(row.gold, "—");
        assert_eq!(row.rate, "—");
        assert_eq!(row.total, "Rs. 5,000.00");
        assert_eq!(row.status, "completed");
    }

    #[test]
    fn test_investment_row_with_rate() {
        let tx = tx(
            "t2",
            r#""date": "2026-01-05T15:04:00Z", "type": "investment", "amountLKR": 4000, "amountGrams": 2"#,
        );
        let row = transaction_row(&tx);
        assert_eq!(row.cash, "- Rs. 4,000.00");
        assert_eq!(row.gold, "+ 2.000 g");
        assert_eq!(row.rate, "Rs. 2,000.00/g");
        assert_eq!(row.total, "2.000 g");
    }

    #[test]
    fn test_sell_gold_zero_grams_has_no_rate() {
        let tx = tx(
            "t3",
            r#""date": "2026-01-05T15:04:00Z", "type": "sell_gold", "amountLKR": 500, "amountGrams": 0"#,
        );
        let row = transaction_row(&tx);
        assert_eq!(row.cash, "+ Rs. 500.00");
        assert_eq!(row.rate, "N/A");
        assert_eq!(row.total, "Rs. 500.00");
    }

    #[test]
    fn test_bonus_row_prefers_cash_total() {
        let cash_bonus = tx(
            "t4",
            r#""date": "2026-01-05T15:04:00Z", "type": "bonus", "amountLKR": 100"#,
        );
        let row = transaction_row(&cash_bonus);
        assert_eq!(row.cash, "+ Rs. 100.00");
        assert_eq!(row.gold, "—");
        assert_eq!(row.total, "+ Rs. 100.00");

        let gold_bonus = tx(
            "t5",
            r#""date": "2026-01-05T15:04:00Z", "type": "bonus", "amountGrams": 0.25"#,
        );
        let row = transaction_row(&gold_bonus);
        assert_eq!(row.cash, "—");
        assert_eq!(row.gold, "+ 0.250 g");
        assert_eq!(row.total, "+ 0.250 g");
    }

    #[test]
    fn test_unknown_kind_row_is_empty_cells() {
        let tx = tx(
            "t6",
            r#""date": "2026-01-05T15:04:00Z", "type": "airdrop""#,
        );
        let row = transaction_row(&tx);
        assert_eq!(row.kind, "N/A");
        assert_eq!(row.cash, "—");
        assert_eq!(row.gold, "—");
        assert_eq!(row.total, "—");
    }

    #[test]
    fn test_redemption_row_fallbacks() {
        let bare = tx(
            "r1",
            r#""date": "2026-02-10T12:00:00Z", "type": "redemption", "amountGrams": 5, "status": "shipped""#,
        );
        let row = redemption_row(&bare).unwrap();
        assert_eq!(row.item, "5.000g Item");
        assert_eq!(row.quantity, 1);
        assert_eq!(row.total_gold, "5.000 g");
        assert_eq!(row.fees, "Rs. 0.00");
        assert_eq!(row.status, "shipped");
        assert!(row.tracking.is_none());
        assert_eq!(row.details_route.path(), "/redeem-details/r1");

        let full = tx(
            "r2",
            r#""date": "2026-02-10T12:00:00Z", "type": "redemption", "amountGrams": 1,
               "itemDescription": "1g Coin", "quantity": 2, "feeLKR": 250,
               "trackingNumber": "TRK-99", "status": "delivered""#,
        );
        let row = redemption_row(&full).unwrap();
        assert_eq!(row.item, "1g Coin");
        assert_eq!(row.quantity, 2);
        assert_eq!(row.fees, "Rs. 250.00");
        assert_eq!(row.tracking.as_deref(), Some("TRK-99"));
    }

    #[test]
    fn test_redemption_row_rejects_other_kinds() {
        let deposit = tx(
            "t7",
            r#""date": "2026-01-05T15:04:00Z", "type": "deposit", "amountLKR": 10"#,
        );
        assert!(redemption_row(&deposit).is_none());
    }

    #[test]
    fn test_overview_card() {
        let user: UserAccount = serde_json::from_str(
            r#"{
                "goldBalanceGrams": 12.5,
                "cashBalanceLKR": 25000,
                "transactions": [
                    {"_id": "d1", "date": "2026-01-01T10:00:00Z", "type": "deposit",
                     "amountLKR": 5000, "status": "completed"},
                    {"_id": "i1", "date": "2026-01-03T10:00:00Z", "type": "investment",
                     "amountLKR": 4000, "amountGrams": 2, "status": "completed"}
                ]
            }"#,
        )
        .unwrap();
        let market: MarketSummary = serde_json::from_str(
            r#"{"latestPricePerGram": 100, "priceChangePercent": 0.4, "trend": "up"}"#,
        )
        .unwrap();

        let card = overview_card(&user, Some(&market));
        assert_eq!(card.cash_balance, "Rs. 25,000.00");
        assert_eq!(card.cash_activity, "Last Deposit: Rs. 5,000.00 on Jan 1");
        assert_eq!(card.gold_balance, "12.500 g");
        assert_eq!(card.gold_value, "≈ Rs. 1,250.00");
        assert_eq!(card.trend.as_deref(), Some("▲ 0.4% today"));
        assert_eq!(card.gold_activity, "Last Purchase: 2.000 g on Jan 3");
    }

    #[test]
    fn test_overview_card_degrades_without_market() {
        let user: UserAccount = serde_json::from_str(r#"{"goldBalanceGrams": 1}"#).unwrap();
        let card = overview_card(&user, None);
        assert_eq!(card.gold_value, "≈ N/A");
        assert!(card.trend.is_none());
        assert_eq!(card.cash_activity, "No recent deposits");
        assert_eq!(card.gold_activity, "No recent purchases");
    }
}
