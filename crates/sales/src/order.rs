use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use storefront_catalog::Item;
use storefront_core::{
    DocumentId, DomainError, DomainResult, LifecycleStatus, Record, TransitionRules,
};

/// Order status lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Pending,
    Paid,
    Shipped,
    Completed,
    Canceled,
    Refunded,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::Paid => "PAID",
            OrderStatus::Shipped => "SHIPPED",
            OrderStatus::Completed => "COMPLETED",
            OrderStatus::Canceled => "CANCELED",
            OrderStatus::Refunded => "REFUNDED",
        }
    }
}

impl core::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Terminal states: COMPLETED, CANCELED, REFUNDED.
/// Explicit terminal entries: PAID -> REFUNDED, SHIPPED -> COMPLETED.
pub static ORDER_TRANSITIONS: TransitionRules<OrderStatus> = TransitionRules::new(
    &[
        OrderStatus::Completed,
        OrderStatus::Canceled,
        OrderStatus::Refunded,
    ],
    OrderStatus::Completed,
    &[
        (OrderStatus::Paid, OrderStatus::Refunded),
        (OrderStatus::Shipped, OrderStatus::Completed),
    ],
);

impl LifecycleStatus for OrderStatus {
    const ALL: &'static [Self] = &[
        OrderStatus::Pending,
        OrderStatus::Paid,
        OrderStatus::Shipped,
        OrderStatus::Completed,
        OrderStatus::Canceled,
        OrderStatus::Refunded,
    ];

    fn rules() -> &'static TransitionRules<Self> {
        &ORDER_TRANSITIONS
    }
}

/// Order line: item, quantity, unit price charged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub item_id: DocumentId,
    pub name: String,
    pub quantity: u32,
    pub unit_price: Decimal,
}

impl OrderLine {
    /// Build a line for a stored catalog item at the given unit price
    /// (usually the item's effective price).
    pub fn for_item(item: &Item, quantity: u32, unit_price: Decimal) -> DomainResult<Self> {
        let item_id = item
            .id
            .clone()
            .ok_or_else(|| DomainError::validation("order line item must have an id"))?;
        Ok(Self {
            item_id,
            name: item.name.clone(),
            quantity,
            unit_price,
        })
    }

    pub fn subtotal(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// Input for creating an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrder {
    pub customer_name: String,
    pub customer_email: String,
    pub lines: Vec<OrderLine>,
}

impl NewOrder {
    pub fn validate(&self) -> DomainResult<()> {
        if self.customer_name.trim().is_empty() {
            return Err(DomainError::validation("customer name is required"));
        }
        if !self.customer_email.contains('@') {
            return Err(DomainError::validation("customer email is invalid"));
        }
        if self.lines.is_empty() {
            return Err(DomainError::validation("order must have at least one line"));
        }
        if self.lines.iter().any(|l| l.quantity == 0) {
            return Err(DomainError::validation("quantity must be positive"));
        }
        if self.lines.iter().any(|l| l.unit_price.is_sign_negative()) {
            return Err(DomainError::validation("unit price cannot be negative"));
        }
        Ok(())
    }
}

/// A storefront order as stored in the `orders` collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(skip)]
    pub id: Option<DocumentId>,
    pub customer_name: String,
    pub customer_email: String,
    pub lines: Vec<OrderLine>,
    pub total: Decimal,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Validate input and build a PENDING order.
    pub fn place(new: NewOrder, now: DateTime<Utc>) -> DomainResult<Self> {
        new.validate()?;
        let total: Decimal = new.lines.iter().map(OrderLine::subtotal).sum();
        Ok(Self {
            id: None,
            customer_name: new.customer_name,
            customer_email: new.customer_email,
            lines: new.lines,
            total,
            status: OrderStatus::Pending,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Apply a status change if the lifecycle rules admit it.
    pub fn change_status(&mut self, proposed: OrderStatus, at: DateTime<Utc>) -> DomainResult<()> {
        self.status = self.status.transition_to(proposed)?;
        self.updated_at = at;
        Ok(())
    }

    /// Cancellation is allowed from any non-terminal state.
    pub fn can_cancel(&self) -> bool {
        !self.is_terminal()
    }

    pub fn cancel(&mut self, at: DateTime<Utc>) -> DomainResult<()> {
        if !self.can_cancel() {
            return Err(DomainError::invalid_transition(self.status, OrderStatus::Canceled));
        }
        self.status = OrderStatus::Canceled;
        self.updated_at = at;
        Ok(())
    }
}

impl Record for Order {
    const COLLECTION: &'static str = "orders";

    fn id(&self) -> Option<&DocumentId> {
        self.id.as_ref()
    }

    fn set_id(&mut self, id: DocumentId) {
        self.id = Some(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn test_time() -> DateTime<Utc> {
        Utc::now()
    }

    fn test_line() -> OrderLine {
        OrderLine {
            item_id: DocumentId::from("p-1"),
            name: "Mug".to_string(),
            quantity: 2,
            unit_price: Decimal::new(1250, 2),
        }
    }

    fn test_new_order() -> NewOrder {
        NewOrder {
            customer_name: "Ada".to_string(),
            customer_email: "ada@example.com".to_string(),
            lines: vec![test_line()],
        }
    }

    #[test]
    fn refund_and_terminal_examples() {
        assert!(OrderStatus::Paid.can_transition_to(OrderStatus::Refunded));
        assert!(!OrderStatus::Pending.can_transition_to(OrderStatus::Refunded));
        assert!(!OrderStatus::Completed.can_transition_to(OrderStatus::Paid));
    }

    #[test]
    fn forward_flow_is_allowed() {
        assert!(OrderStatus::Pending.can_transition_to(OrderStatus::Paid));
        assert!(OrderStatus::Paid.can_transition_to(OrderStatus::Shipped));
        assert!(OrderStatus::Shipped.can_transition_to(OrderStatus::Completed));
        assert!(OrderStatus::Pending.can_transition_to(OrderStatus::Completed));
    }

    #[test]
    fn unlisted_terminal_entries_are_rejected() {
        assert!(!OrderStatus::Shipped.can_transition_to(OrderStatus::Refunded));
        assert!(!OrderStatus::Pending.can_transition_to(OrderStatus::Canceled));
    }

    #[test]
    fn place_computes_total_and_starts_pending() {
        let order = Order::place(test_new_order(), test_time()).unwrap();
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.total, Decimal::new(2500, 2));
        assert!(order.id.is_none());
    }

    #[test]
    fn place_rejects_empty_lines() {
        let mut new = test_new_order();
        new.lines.clear();
        match Order::place(new, test_time()).unwrap_err() {
            DomainError::Validation(msg) if msg.contains("at least one line") => {}
            other => panic!("Expected Validation error, got {other:?}"),
        }
    }

    #[test]
    fn place_rejects_zero_quantity() {
        let mut new = test_new_order();
        new.lines[0].quantity = 0;
        assert!(matches!(
            Order::place(new, test_time()),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn change_status_rejection_leaves_order_untouched() {
        let created = test_time();
        let mut order = Order::place(test_new_order(), created).unwrap();
        let before = order.clone();

        let err = order
            .change_status(OrderStatus::Refunded, created + chrono::Duration::minutes(5))
            .unwrap_err();

        assert_eq!(err, DomainError::invalid_transition("PENDING", "REFUNDED"));
        assert_eq!(order, before);
    }

    #[test]
    fn cancel_only_from_non_terminal() {
        let mut order = Order::place(test_new_order(), test_time()).unwrap();
        order.cancel(test_time()).unwrap();
        assert_eq!(order.status, OrderStatus::Canceled);
        assert!(order.cancel(test_time()).is_err());
    }

    #[test]
    fn status_serializes_in_upper_case() {
        assert_eq!(
            serde_json::to_string(&OrderStatus::Shipped).unwrap(),
            "\"SHIPPED\""
        );
        let parsed: OrderStatus = serde_json::from_str("\"REFUNDED\"").unwrap();
        assert_eq!(parsed, OrderStatus::Refunded);
        assert_eq!(OrderStatus::Refunded.to_string(), "REFUNDED");
    }

    fn any_status() -> impl Strategy<Value = OrderStatus> {
        proptest::sample::select(OrderStatus::ALL.to_vec())
    }

    proptest! {
        /// Property: every status may transition to itself.
        #[test]
        fn identity_is_always_valid(s in any_status()) {
            prop_assert!(s.can_transition_to(s));
        }

        /// Property: terminal states are absorbing.
        #[test]
        fn terminal_states_are_absorbing(t in any_status(), x in any_status()) {
            if t.is_terminal() && t != x {
                prop_assert!(!t.can_transition_to(x));
            }
        }

        /// Property: every non-terminal status may complete.
        #[test]
        fn non_terminal_can_complete(s in any_status()) {
            if !s.is_terminal() {
                prop_assert!(s.can_transition_to(OrderStatus::Completed));
            }
        }
    }
}
