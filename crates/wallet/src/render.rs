//! Plain-text rendering of the page view-model, used by the CLI binary to
//! inspect what the real frontend would show.

use std::fmt::Write;

use crate::challenges::{badge_views, evaluate, star_display, ChallengeCta};
use crate::derived::quick_redeem_targets;
use crate::pipeline::{RedemptionListState, TransactionListState};
use crate::redeem;
use crate::rows::{overview_card, redemption_row, transaction_row};
use crate::session::{Severity, WalletState};
use common::config::Config;
use common::format::fixed_dp;

pub fn render_page(state: &WalletState, config: &Config) -> String {
    let mut out = String::new();

    if let Some(error) = state.error.as_ref() {
        let prefix = match error.severity() {
            Severity::Blocking => "error",
            Severity::Advisory => "warning",
        };
        let _ = writeln!(out, "[{prefix}] {error}");
    }
    let Some(user) = state.user.as_ref() else {
        return out;
    };

    let card = overview_card(user, state.market.as_ref());
    let _ = writeln!(out, "== Wallet Overview ==");
    let _ = writeln!(out, "Cash Balance: {}", card.cash_balance);
    let _ = writeln!(out, "  {}", card.cash_activity);
    let _ = writeln!(out, "Gold Owned: {}", card.gold_balance);
    match card.trend.as_ref() {
        Some(trend) => {
            let _ = writeln!(out, "  {} ({trend})", card.gold_value);
        }
        None => {
            let _ = writeln!(out, "  {}", card.gold_value);
        }
    }
    let _ = writeln!(out, "  {}", card.gold_activity);

    let _ = writeln!(out, "\n== Transaction History ==");
    let page = TransactionListState::new().apply(
        &user.transactions,
        config.pagination.transactions_per_page,
    );
    for tx in &page.items {
        let row = transaction_row(tx);
        let _ = writeln!(
            out,
            "{} | {} | cash {} | gold {} | rate {} | fee {} | total {} | {}",
            row.date, row.kind, row.cash, row.gold, row.rate, row.fee, row.total, row.status
        );
    }
    let _ = writeln!(out, "page {} of {}", page.page, page.total_pages);

    let _ = writeln!(out, "\n== Quick Redeem ==");
    for target in quick_redeem_targets(user.gold_balance_grams, &config.redeem.quick_targets_grams)
    {
        let marker = if target.redeemable { "ready" } else { "locked" };
        let _ = writeln!(
            out,
            "{}g coin: {}% [{marker}]",
            target.target_grams,
            fixed_dp(target.progress_percent, 1)
        );
    }

    let _ = writeln!(out, "\n== Custom Redemption ==");
    for size in &config.redeem.coin_sizes_grams {
        let plan = redeem::plan(&size.to_string(), "1", user.gold_balance_grams);
        let line = match plan.route() {
            Some(route) => format!("available -> {route}"),
            None => "insufficient balance".to_string(),
        };
        let _ = writeln!(out, "{size}g coin x1 ({} total): {line}", plan.total_grams);
    }

    let _ = writeln!(out, "\n== Redemption History ==");
    let redeems =
        RedemptionListState::new().apply(&user.transactions, config.pagination.redeems_per_page);
    for tx in &redeems.items {
        if let Some(row) = redemption_row(tx) {
            let _ = writeln!(
                out,
                "{} | {} x{} | {} | fees {} | {} | {}",
                row.date,
                row.item,
                row.quantity,
                row.total_gold,
                row.fees,
                row.status,
                row.tracking.as_deref().unwrap_or("—")
            );
        }
    }
    let _ = writeln!(out, "page {} of {}", redeems.page, redeems.total_pages);

    let _ = writeln!(out, "\n== Challenges ==");
    let stars = star_display(user.star_count, config.gamification.max_stars);
    let _ = writeln!(out, "{} ({})", stars.row, stars.summary);
    for def in &user.gamification_defs.challenges {
        let view = evaluate(def, user.challenge_progress_for(&def.id));
        let cta = match &view.cta {
            ChallengeCta::Claim => "[Claim]".to_string(),
            ChallengeCta::ClaimedBadge => "[Claimed]".to_string(),
            ChallengeCta::DoneBadge => "[Done]".to_string(),
            ChallengeCta::ActionLink { href, label } => format!("[{label} -> {href}]"),
        };
        let _ = writeln!(
            out,
            "{}: {}% ({}) {cta}",
            view.name,
            fixed_dp(view.progress_percent, 1),
            view.remaining_text
        );
    }
    for badge in badge_views(&user.gamification_defs.badges, &user.earned_badge_ids) {
        let marker = if badge.earned { "earned" } else { "locked" };
        let _ = writeln!(out, "badge {}: {marker}", badge.name);
    }

    out
}
