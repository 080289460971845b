//! Wire types of the odds backend.

use chrono::{DateTime, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// An upcoming match as listed by `/api/matches`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchSummary {
    pub match_id: i64,
    pub home_team: String,
    pub away_team: String,
    #[serde(deserialize_with = "timestamp")]
    pub start_time: DateTime<Utc>,
    #[serde(default)]
    pub league: Option<String>,
    #[serde(default)]
    pub sport: Option<String>,
}

impl MatchSummary {
    /// "Home vs Away".
    pub fn title(&self) -> String {
        format!("{} vs {}", self.home_team, self.away_team)
    }

    /// League label, falling back to the sport.
    pub fn competition(&self) -> &str {
        self.league
            .as_deref()
            .or(self.sport.as_deref())
            .unwrap_or_default()
    }
}

/// One bookmaker price for one outcome of one market.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OddsQuote {
    pub market_code: String,
    pub outcome: String,
    pub bookmaker_name: String,
    pub price: Decimal,
    /// Point-spread or total threshold. `None` when the market has no line.
    #[serde(default)]
    pub line: Option<Decimal>,
}

/// Reference no-vig price for one outcome of a base market.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FairQuote {
    pub market_code: String,
    pub outcome: String,
    pub fair_probability: Decimal,
    pub no_vig_odds: Decimal,
    pub margin: Decimal,
    pub reference_bookmaker_name: String,
}

/// A positive expected-value bet from `/api/ev/top`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvItem {
    pub match_id: i64,
    #[serde(default)]
    pub home_team: Option<String>,
    #[serde(default)]
    pub away_team: Option<String>,
    pub market_code: String,
    pub outcome: String,
    pub bookmaker_name: String,
    pub reference_bookmaker_name: String,
    pub odds: Decimal,
    pub fair_probability: Decimal,
    pub ev_fraction: Decimal,
    #[serde(default, deserialize_with = "optional_timestamp")]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub league: Option<String>,
}

/// One leg of an arbitrage: where to bet an outcome and at what price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArbLeg {
    pub book: String,
    pub odds: Decimal,
}

/// An arbitrage opportunity from `/api/arbs/latest`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArbItem {
    pub match_id: i64,
    #[serde(default)]
    pub home_team: Option<String>,
    #[serde(default)]
    pub away_team: Option<String>,
    pub market_code: String,
    pub roi_fraction: Decimal,
    pub legs: BTreeMap<String, ArbLeg>,
    #[serde(default)]
    pub stake_split: Option<BTreeMap<String, Decimal>>,
    #[serde(default, deserialize_with = "optional_timestamp")]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub league: Option<String>,
}

/// "Home vs Away" for feed items whose match fields are optional.
pub fn fixture_label(home: Option<&str>, away: Option<&str>, match_id: i64) -> String {
    match (home, away) {
        (Some(home), Some(away)) => format!("{home} vs {away}"),
        _ => format!("match #{match_id}"),
    }
}

/// Pagination and time window for the EV and arbitrage feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FeedQuery {
    pub limit: u32,
    pub offset: u32,
    pub hours: Option<u32>,
}

impl FeedQuery {
    pub const MAX_LIMIT: u32 = 100;
    pub const MAX_HOURS: u32 = 168;

    pub fn new(limit: u32, hours: Option<u32>) -> Self {
        Self {
            limit: limit.clamp(1, Self::MAX_LIMIT),
            offset: 0,
            hours: hours.map(|h| h.min(Self::MAX_HOURS)),
        }
    }

    pub fn next_page(self) -> Self {
        Self {
            offset: self.offset + self.limit,
            ..self
        }
    }

    pub fn prev_page(self) -> Self {
        Self {
            offset: self.offset.saturating_sub(self.limit),
            ..self
        }
    }

    /// 1-based page number for display.
    pub fn page(&self) -> u32 {
        self.offset / self.limit.max(1) + 1
    }

    /// Query string pairs in request order.
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("limit", self.limit.to_string()),
            ("offset", self.offset.to_string()),
        ];
        if let Some(hours) = self.hours {
            pairs.push(("hours", hours.to_string()));
        }
        pairs
    }
}

/// Timestamps arrive either as RFC 3339 or as naive ISO strings (read as UTC).
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|naive| naive.and_utc())
        })
}

fn timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {raw}")))
}

fn optional_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(raw) => parse_timestamp(&raw)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {raw}"))),
        None => Ok(None),
    }
}
