//! Promotions domain module.
//!
//! Promotion records and the pricing resolver that decides which promotion
//! (if any) applies to an item and what the item then costs. Everything here
//! is a pure function of its inputs; loading promotions is the caller's job.

pub mod pricing;
pub mod promotion;

pub use pricing::{
    ItemPrice, TransactionFee, calculate_final_price, calculate_promotion_price,
    find_item_promotion, find_item_promotion_at, get_item_effective_price, price_item_at,
};
pub use promotion::{DiscountType, Promotion, PromotionDate, PromotionStatus};
