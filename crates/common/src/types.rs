use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    #[default]
    Completed,
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
    Failed,
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TransactionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
            Self::Failed => "failed",
        }
    }

    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "completed" => Some(Self::Completed),
            "pending" => Some(Self::Pending),
            "processing" => Some(Self::Processing),
            "shipped" => Some(Self::Shipped),
            "delivered" => Some(Self::Delivered),
            "cancelled" => Some(Self::Cancelled),
            "failed" => Some(Self::Failed),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionKind {
    Deposit,
    Withdrawal,
    Investment,
    SellGold,
    Redemption,
    Bonus,
    Fee,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Deposit => "deposit",
            Self::Withdrawal => "withdrawal",
            Self::Investment => "investment",
            Self::SellGold => "sell_gold",
            Self::Redemption => "redemption",
            Self::Bonus => "bonus",
            Self::Fee => "fee",
        }
    }

    /// Filter/display label: the wire name with underscores as spaces.
    pub fn label(&self) -> &'static str {
        match self {
            Self::SellGold => "sell gold",
            other => other.as_str(),
        }
    }

    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "deposit" => Some(Self::Deposit),
            "withdrawal" => Some(Self::Withdrawal),
            "investment" => Some(Self::Investment),
            "sell_gold" => Some(Self::SellGold),
            "redemption" => Some(Self::Redemption),
            "bonus" => Some(Self::Bonus),
            "fee" => Some(Self::Fee),
            _ => None,
        }
    }
}

/// Per-type transaction payload. The backend sends one flat record with a
/// `type` discriminator and optional fields; each variant declares exactly
/// the fields that type carries.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TransactionDetail {
    Deposit {
        #[serde(rename = "amountLKR", default)]
        amount_lkr: Decimal,
    },
    Withdrawal {
        #[serde(rename = "amountLKR", default)]
        amount_lkr: Decimal,
    },
    Investment {
        #[serde(rename = "amountLKR", default)]
        amount_lkr: Decimal,
        #[serde(rename = "amountGrams", default)]
        amount_grams: Decimal,
    },
    SellGold {
        #[serde(rename = "amountLKR", default)]
        amount_lkr: Decimal,
        #[serde(rename = "amountGrams", default)]
        amount_grams: Decimal,
    },
    Redemption {
        #[serde(rename = "amountGrams", default)]
        amount_grams: Decimal,
        #[serde(rename = "feeLKR")]
        fee_lkr: Option<Decimal>,
        #[serde(rename = "itemDescription")]
        item_description: Option<String>,
        #[serde(default = "default_quantity")]
        quantity: u32,
        #[serde(rename = "trackingNumber")]
        tracking_number: Option<String>,
    },
    Bonus {
        #[serde(rename = "amountLKR")]
        amount_lkr: Option<Decimal>,
        #[serde(rename = "amountGrams")]
        amount_grams: Option<Decimal>,
    },
    Fee {
        #[serde(rename = "amountLKR", default)]
        amount_lkr: Decimal,
    },
    /// Unknown `type` values; kept so one odd record never fails the whole
    /// account payload.
    #[serde(other)]
    Other,
}

fn default_quantity() -> u32 {
    1
}

#[derive(Debug, Clone, Deserialize)]
pub struct Transaction {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub status: TransactionStatus,
    #[serde(flatten)]
    pub detail: TransactionDetail,
}

impl Transaction {
    pub fn kind(&self) -> Option<TransactionKind> {
        match self.detail {
            TransactionDetail::Deposit { .. } => Some(TransactionKind::Deposit),
            TransactionDetail::Withdrawal { .. } => Some(TransactionKind::Withdrawal),
            TransactionDetail::Investment { .. } => Some(TransactionKind::Investment),
            TransactionDetail::SellGold { .. } => Some(TransactionKind::SellGold),
            TransactionDetail::Redemption { .. } => Some(TransactionKind::Redemption),
            TransactionDetail::Bonus { .. } => Some(TransactionKind::Bonus),
            TransactionDetail::Fee { .. } => Some(TransactionKind::Fee),
            TransactionDetail::Other => None,
        }
    }

    pub fn amount_lkr(&self) -> Option<Decimal> {
        match &self.detail {
            TransactionDetail::Deposit { amount_lkr }
            | TransactionDetail::Withdrawal { amount_lkr }
            | TransactionDetail::Investment { amount_lkr, .. }
            | TransactionDetail::SellGold { amount_lkr, .. }
            | TransactionDetail::Fee { amount_lkr } => Some(*amount_lkr),
            TransactionDetail::Bonus { amount_lkr, .. } => *amount_lkr,
            TransactionDetail::Redemption { .. } | TransactionDetail::Other => None,
        }
    }

    pub fn amount_grams(&self) -> Option<Decimal> {
        match &self.detail {
            TransactionDetail::Investment { amount_grams, .. }
            | TransactionDetail::SellGold { amount_grams, .. }
            | TransactionDetail::Redemption { amount_grams, .. } => Some(*amount_grams),
            TransactionDetail::Bonus { amount_grams, .. } => *amount_grams,
            _ => None,
        }
    }

    /// LKR paid/received per gram for priced gold trades. `None` unless the
    /// gram amount is strictly positive; never divides by zero.
    pub fn unit_rate_lkr(&self) -> Option<Decimal> {
        match &self.detail {
            TransactionDetail::Investment {
                amount_lkr,
                amount_grams,
            }
            | TransactionDetail::SellGold {
                amount_lkr,
                amount_grams,
            } if *amount_grams > Decimal::ZERO => Some(amount_lkr / amount_grams),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceTrend {
    Up,
    Down,
    #[default]
    Stable,
}

impl PriceTrend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Stable => "stable",
        }
    }
}

/// Public gold-market summary from `/api/market/gold-summary`.
#[derive(Debug, Clone, Deserialize)]
pub struct MarketSummary {
    #[serde(rename = "latestPricePerGram")]
    pub latest_price_per_gram: Decimal,
    #[serde(rename = "priceChangePercent", default)]
    pub price_change_percent: Decimal,
    #[serde(default)]
    pub trend: PriceTrend,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum ChallengeUnit {
    #[serde(rename = "LKR")]
    Lkr,
    #[serde(rename = "g")]
    Grams,
    #[serde(rename = "count")]
    #[default]
    Count,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RewardType {
    Claimable,
    #[default]
    Passive,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChallengeDef {
    pub id: String,
    pub name: String,
    pub goal: Option<Decimal>,
    #[serde(default)]
    pub unit: ChallengeUnit,
    #[serde(rename = "rewardType", default)]
    pub reward_type: RewardType,
    #[serde(rename = "starsAwarded", default)]
    pub stars_awarded: u32,
    #[serde(rename = "rewardText")]
    pub reward_text: Option<String>,
    #[serde(rename = "ctaLink")]
    pub cta_link: Option<String>,
    #[serde(rename = "ctaText")]
    pub cta_text: Option<String>,
    pub icon: Option<String>,
    #[serde(rename = "type")]
    pub category: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BadgeDef {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub icon: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GamificationDefs {
    #[serde(default)]
    pub badges: Vec<BadgeDef>,
    #[serde(default)]
    pub challenges: Vec<ChallengeDef>,
}

/// Progress and claim state for one challenge, split into two explicit
/// fields. The wire format is a flat legacy map where the claim flag hides
/// behind a `<id>_claimed` key; see `de_challenge_progress`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChallengeProgress {
    pub progress: Decimal,
    pub claimed: bool,
}

/// Account snapshot from `/api/users/me`. Immutable per fetch cycle; absent
/// fields come back empty/zero rather than failing the payload.
#[derive(Debug, Clone, Deserialize)]
pub struct UserAccount {
    #[serde(rename = "goldBalanceGrams", default)]
    pub gold_balance_grams: Decimal,
    #[serde(rename = "cashBalanceLKR", default)]
    pub cash_balance_lkr: Decimal,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(rename = "earnedBadgeIds", default)]
    pub earned_badge_ids: Vec<String>,
    #[serde(
        rename = "challengeProgress",
        default,
        deserialize_with = "de_challenge_progress"
    )]
    pub challenge_progress: HashMap<String, ChallengeProgress>,
    #[serde(rename = "starCount", default)]
    pub star_count: u32,
    #[serde(rename = "gamificationDefs", default)]
    pub gamification_defs: GamificationDefs,
}

impl UserAccount {
    pub fn challenge_progress_for(&self, id: &str) -> ChallengeProgress {
        self.challenge_progress.get(id).copied().unwrap_or_default()
    }
}

/// Fold the legacy flat map `{ "<id>": number|bool, "<id>_claimed": bool }`
/// into one entry per challenge, so the string-suffix convention never
/// leaks past deserialization.
fn de_challenge_progress<'de, D>(
    deserializer: D,
) -> Result<HashMap<String, ChallengeProgress>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = BTreeMap::<String, serde_json::Value>::deserialize(deserializer)?;
    let mut folded: HashMap<String, ChallengeProgress> = HashMap::new();
    for (key, value) in raw {
        if let Some(id) = key.strip_suffix("_claimed") {
            folded.entry(id.to_string()).or_default().claimed = value.as_bool().unwrap_or(false);
        } else {
            folded.entry(key).or_default().progress = decimal_from_json(&value);
        }
    }
    Ok(folded)
}

fn decimal_from_json(value: &serde_json::Value) -> Decimal {
    match value {
        serde_json::Value::Number(n) => Decimal::from_str(&n.to_string()).unwrap_or_default(),
        serde_json::Value::String(s) => Decimal::from_str(s).unwrap_or_default(),
        // Boolean challenges count as done-once.
        serde_json::Value::Bool(true) => Decimal::ONE,
        _ => Decimal::ZERO,
    }
}
