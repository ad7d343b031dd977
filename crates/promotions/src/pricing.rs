//! Promotion pricing resolver.

use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use storefront_catalog::Item;
use storefront_core::DocumentId;

use crate::promotion::{DiscountType, Promotion};

/// Transaction fee surcharged on top of the item price.
///
/// `rate` is a fraction (`0.03` = 3%). A disabled fee leaves prices untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionFee {
    pub rate: Decimal,
    pub enabled: bool,
}

impl TransactionFee {
    pub fn none() -> Self {
        Self {
            rate: Decimal::ZERO,
            enabled: false,
        }
    }

    pub fn new(rate: Decimal) -> Self {
        Self { rate, enabled: true }
    }

    /// Surcharge `price` and round to cents. Saturates at the `Decimal` bounds.
    pub fn apply(&self, price: Decimal) -> Decimal {
        let total = if self.enabled {
            price.saturating_mul(Decimal::ONE.saturating_add(self.rate))
        } else {
            price
        };
        total.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    }
}

impl Default for TransactionFee {
    fn default() -> Self {
        Self::none()
    }
}

/// First effective promotion (in input order) covering `item`, as of now.
pub fn find_item_promotion<'a>(item: &Item, promotions: &'a [Promotion]) -> Option<&'a Promotion> {
    find_item_promotion_at(item, promotions, Utc::now())
}

/// First effective promotion (in input order) covering `item` at `now`.
///
/// Returns `None` when the item has no id. Promotions whose dates cannot be
/// normalized are skipped. First match wins; there is no best-discount
/// selection.
pub fn find_item_promotion_at<'a>(
    item: &Item,
    promotions: &'a [Promotion],
    now: DateTime<Utc>,
) -> Option<&'a Promotion> {
    let item_id = item.id.as_ref()?;
    let key = item_id.as_key();

    promotions
        .iter()
        .filter(|promotion| is_effective(promotion, now))
        .find(|promotion| promotion.covers_key(&key))
}

fn is_effective(promotion: &Promotion, now: DateTime<Utc>) -> bool {
    match promotion.is_effective_at(now) {
        Ok(effective) => effective,
        Err(err) => {
            tracing::warn!(
                promotion_id = ?promotion.id,
                error = %err,
                "skipping promotion with malformed dates"
            );
            false
        }
    }
}

/// Discounted price; never negative.
///
/// Stored discounts are not re-validated, so the arithmetic saturates instead
/// of overflowing and the zero floor absorbs the negative side.
pub fn calculate_promotion_price(base_price: Decimal, promotion: &Promotion) -> Decimal {
    let discounted = match promotion.discount_type {
        DiscountType::Percentage => {
            let remaining =
                Decimal::ONE.saturating_sub(promotion.discount / Decimal::ONE_HUNDRED);
            base_price.saturating_mul(remaining)
        }
        DiscountType::Fixed => base_price.saturating_sub(promotion.discount),
    };
    discounted.max(Decimal::ZERO)
}

/// Final price shown to the customer: `price` plus the configured fee.
pub fn calculate_final_price(price: Decimal, fee: &TransactionFee) -> Decimal {
    fee.apply(price)
}

/// Promotion price if `promotion` is given, else the base price, then the fee.
pub fn get_item_effective_price(
    item: &Item,
    promotion: Option<&Promotion>,
    fee: &TransactionFee,
) -> Decimal {
    let price = match promotion {
        Some(promotion) => calculate_promotion_price(item.base_price(), promotion),
        None => item.base_price(),
    };
    calculate_final_price(price, fee)
}

/// Pricing breakdown for one item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemPrice {
    pub base_price: Decimal,
    pub promotion_id: Option<DocumentId>,
    pub promotion_price: Option<Decimal>,
    pub final_price: Decimal,
}

impl ItemPrice {
    pub fn is_discounted(&self) -> bool {
        self.promotion_id.is_some()
    }
}

/// Resolve the applicable promotion at `now` and price `item` with it.
pub fn price_item_at(
    item: &Item,
    promotions: &[Promotion],
    fee: &TransactionFee,
    now: DateTime<Utc>,
) -> ItemPrice {
    let promotion = find_item_promotion_at(item, promotions, now);
    ItemPrice {
        base_price: item.base_price(),
        promotion_id: promotion.and_then(|p| p.id.clone()),
        promotion_price: promotion.map(|p| calculate_promotion_price(item.base_price(), p)),
        final_price: get_item_effective_price(item, promotion, fee),
    }
}
