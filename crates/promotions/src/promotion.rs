use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use storefront_core::{DocumentId, DomainError, DomainResult, Record};

/// Promotion status. Only `Active` promotions can be effective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PromotionStatus {
    Active,
    Inactive,
    Expired,
    Scheduled,
}

/// How `Promotion::discount` is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscountType {
    /// `discount` is a percentage of the base price (20 = 20%).
    Percentage,
    /// `discount` is an amount subtracted from the base price.
    Fixed,
}

/// A start/end date as found on stored promotion documents.
///
/// Older documents carry store timestamps (`{ seconds, nanoseconds }`) or
/// free-form ISO strings instead of RFC 3339 instants. Anything else (null,
/// bare numbers, odd objects, a missing field) lands in `Other` and never
/// normalizes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PromotionDate {
    Instant(DateTime<Utc>),
    Timestamp {
        #[serde(alias = "_seconds")]
        seconds: i64,
        #[serde(default, alias = "_nanoseconds")]
        nanoseconds: u32,
    },
    Text(String),
    Other(Value),
}

impl Default for PromotionDate {
    fn default() -> Self {
        PromotionDate::Other(Value::Null)
    }
}

impl PromotionDate {
    /// Normalize into a comparable instant.
    ///
    /// Text accepts RFC 3339, a naive `YYYY-MM-DDTHH:MM:SS[.fff]` (read as
    /// UTC), or a bare `YYYY-MM-DD` (midnight UTC).
    pub fn to_instant(&self) -> DomainResult<DateTime<Utc>> {
        match self {
            PromotionDate::Instant(at) => Ok(*at),
            PromotionDate::Timestamp {
                seconds,
                nanoseconds,
            } => DateTime::from_timestamp(*seconds, *nanoseconds).ok_or_else(|| {
                DomainError::validation(format!("timestamp out of range: {seconds}s"))
            }),
            PromotionDate::Text(raw) => parse_iso(raw),
            PromotionDate::Other(value) => Err(DomainError::validation(format!(
                "unsupported date value: {value}"
            ))),
        }
    }
}

impl From<DateTime<Utc>> for PromotionDate {
    fn from(value: DateTime<Utc>) -> Self {
        PromotionDate::Instant(value)
    }
}

fn parse_iso(raw: &str) -> DomainResult<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
        return Ok(at.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(naive.and_utc());
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return Ok(midnight.and_utc());
        }
    }
    Err(DomainError::validation(format!("unrecognized date: {raw:?}")))
}

/// A promotion as stored in the `promotions` collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Promotion {
    #[serde(skip)]
    pub id: Option<DocumentId>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub status: PromotionStatus,
    #[serde(default)]
    pub start_date: PromotionDate,
    #[serde(default)]
    pub end_date: PromotionDate,
    pub discount_type: DiscountType,
    pub discount: Decimal,
    #[serde(default)]
    pub product_ids: Vec<DocumentId>,
    #[serde(default)]
    pub service_ids: Vec<DocumentId>,
}

impl Promotion {
    /// Normalized `(start, end)` instants.
    pub fn validity_window(&self) -> DomainResult<(DateTime<Utc>, DateTime<Utc>)> {
        Ok((self.start_date.to_instant()?, self.end_date.to_instant()?))
    }

    /// Effective iff ACTIVE and `start <= now <= end`.
    ///
    /// Errors only when a date cannot be normalized.
    pub fn is_effective_at(&self, now: DateTime<Utc>) -> DomainResult<bool> {
        if self.status != PromotionStatus::Active {
            return Ok(false);
        }
        let (start, end) = self.validity_window()?;
        Ok(start <= now && now <= end)
    }

    /// True if `key` is in the product-id or service-id set.
    pub fn covers_key(&self, key: &str) -> bool {
        self.product_ids
            .iter()
            .chain(self.service_ids.iter())
            .any(|id| id.matches_key(key))
    }

    pub fn covers(&self, item_id: &DocumentId) -> bool {
        self.covers_key(&item_id.as_key())
    }

    /// Validate the fields a create must carry.
    pub fn validate(&self) -> DomainResult<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("promotion name cannot be empty"));
        }
        if self.discount.is_sign_negative() {
            return Err(DomainError::validation("discount cannot be negative"));
        }
        if self.discount_type == DiscountType::Percentage && self.discount > Decimal::ONE_HUNDRED
        {
            return Err(DomainError::validation("percentage discount cannot exceed 100"));
        }
        let (start, end) = self.validity_window()?;
        if end < start {
            return Err(DomainError::validation("promotion ends before it starts"));
        }
        if self.product_ids.is_empty() && self.service_ids.is_empty() {
            return Err(DomainError::validation(
                "promotion must apply to at least one product or service",
            ));
        }
        Ok(())
    }
}

impl Record for Promotion {
    const COLLECTION: &'static str = "promotions";

    fn id(&self) -> Option<&DocumentId> {
        self.id.as_ref()
    }

    fn set_id(&mut self, id: DocumentId) {
        self.id = Some(id);
    }
}
