//! Challenge and badge evaluation for the gamification panel.

use common::format::{fixed_dp, format_currency, format_grams};
use common::types::{BadgeDef, ChallengeDef, ChallengeProgress, ChallengeUnit, RewardType};
use rust_decimal::Decimal;

const ONE_HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// The one affordance a challenge card shows; variants are mutually
/// exclusive and exhaustive over `{completed, claimed, can_claim}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChallengeCta {
    Claim,
    ClaimedBadge,
    DoneBadge,
    ActionLink { href: String, label: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChallengeView {
    pub id: String,
    pub name: String,
    pub progress_percent: Decimal,
    pub completed: bool,
    pub claimed: bool,
    pub can_claim: bool,
    pub remaining_text: String,
    pub stars_awarded: u32,
    pub reward_text: Option<String>,
    pub cta: ChallengeCta,
}

/// Evaluate one challenge definition against the user's progress.
pub fn evaluate(def: &ChallengeDef, progress: ChallengeProgress) -> ChallengeView {
    // A missing or non-positive goal counts as a one-shot challenge.
    let goal = match def.goal {
        Some(goal) if goal > Decimal::ZERO => goal,
        _ => Decimal::ONE,
    };
    let progress_percent =
        (progress.progress / goal * ONE_HUNDRED).clamp(Decimal::ZERO, ONE_HUNDRED);
    let completed = progress.progress >= goal;
    let claimed = progress.claimed;
    let can_claim = completed && def.reward_type == RewardType::Claimable && !claimed;

    let remaining_text = if completed {
        "Completed!".to_string()
    } else if progress.progress > Decimal::ZERO {
        format!("{} more", format_amount(goal - progress.progress, def.unit))
    } else {
        "Not yet started".to_string()
    };

    let cta = if can_claim {
        ChallengeCta::Claim
    } else if claimed {
        ChallengeCta::ClaimedBadge
    } else if completed {
        ChallengeCta::DoneBadge
    } else {
        ChallengeCta::ActionLink {
            href: def.cta_link.clone().unwrap_or_else(|| "/trade".to_string()),
            label: def
                .cta_text
                .clone()
                .unwrap_or_else(|| "Start Now".to_string()),
        }
    };

    ChallengeView {
        id: def.id.clone(),
        name: def.name.clone(),
        progress_percent,
        completed,
        claimed,
        can_claim,
        remaining_text,
        stars_awarded: def.stars_awarded,
        reward_text: def.reward_text.clone(),
        cta,
    }
}

fn format_amount(value: Decimal, unit: ChallengeUnit) -> String {
    match unit {
        ChallengeUnit::Lkr => format_currency(value),
        ChallengeUnit::Grams => format_grams(value),
        ChallengeUnit::Count => fixed_dp(value, 0),
    }
}

/// "★★★☆☆" style star row plus a summary line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StarDisplay {
    pub row: String,
    pub summary: String,
}

pub fn star_display(count: u32, max: u32) -> StarDisplay {
    let filled = count.min(max) as usize;
    let mut row = "★".repeat(filled);
    row.push_str(&"☆".repeat(max as usize - filled));
    StarDisplay {
        row,
        summary: format!("{count} of {max} stars earned"),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BadgeView {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub earned: bool,
}

pub fn badge_views(defs: &[BadgeDef], earned_ids: &[String]) -> Vec<BadgeView> {
    defs.iter()
        .map(|def| BadgeView {
            id: def.id.clone(),
            name: def.name.clone(),
            description: def.description.clone(),
            icon: def.icon.clone(),
            earned: earned_ids.iter().any(|id| id == &def.id),
        })
        .collect()
}
