use chrono::Utc;
use serde_json::json;

use storefront_core::DocumentId;
use storefront_observability::Analytics;
use storefront_sales::{NewOrder, Order, OrderStatus};

use super::notifications::{NotificationKind, NotificationService};
use super::status_patch;
use crate::document_store::{DocumentStore, Query, SortDirection};
use crate::error::InfraResult;
use crate::repository::Repository;

#[derive(Debug, Clone)]
pub struct OrderService<S> {
    orders: Repository<Order, S>,
    notifications: NotificationService<S>,
    analytics: Analytics,
}

impl<S> OrderService<S>
where
    S: DocumentStore + Clone,
{
    pub fn new(store: S, analytics: Analytics) -> Self {
        Self {
            orders: Repository::new(store.clone()),
            notifications: NotificationService::new(store),
            analytics,
        }
    }

    pub fn create_order(&self, new: NewOrder) -> InfraResult<Order> {
        let order = Order::place(new, Utc::now())?;
        let created = self.orders.create(&order)?;

        tracing::info!(order_id = ?created.id, total = %created.total, "order created");
        self.analytics.track(
            "order_created",
            &json!({ "orderId": created.id, "total": created.total }),
        );
        Ok(created)
    }

    pub fn get_order(&self, id: &DocumentId) -> InfraResult<Order> {
        self.orders.get(id)
    }

    /// Newest first, optionally restricted to one status.
    pub fn list_orders(
        &self,
        status: Option<OrderStatus>,
        limit: Option<usize>,
    ) -> InfraResult<Vec<Order>> {
        let mut query = Query::new().order_by("createdAt", SortDirection::Descending);
        if let Some(status) = status {
            query = query.filter_eq("status", status.as_str());
        }
        if let Some(limit) = limit {
            query = query.limit(limit);
        }
        self.orders.query(&query)
    }

    /// Move an order to `proposed` if the lifecycle rules admit it.
    ///
    /// Rejected transitions leave the stored order untouched. A no-op
    /// transition succeeds without writing.
    pub fn update_status(&self, id: &DocumentId, proposed: OrderStatus) -> InfraResult<Order> {
        let mut order = self.orders.get(id)?;
        let from = order.status;
        let now = Utc::now();

        if let Err(err) = order.change_status(proposed, now) {
            tracing::warn!(order_id = %id, from = %from, to = %proposed, "rejected order status change");
            return Err(err.into());
        }
        if from != proposed {
            self.persist_status(id, from, &order)?;
        }
        Ok(order)
    }

    pub fn cancel_order(&self, id: &DocumentId) -> InfraResult<Order> {
        let mut order = self.orders.get(id)?;
        let from = order.status;

        if let Err(err) = order.cancel(Utc::now()) {
            tracing::warn!(order_id = %id, from = %from, "rejected order cancellation");
            return Err(err.into());
        }
        self.persist_status(id, from, &order)?;
        Ok(order)
    }

    pub fn delete_order(&self, id: &DocumentId) -> InfraResult<()> {
        self.orders.delete(id)?;
        tracing::info!(order_id = %id, "order deleted");
        Ok(())
    }

    fn persist_status(&self, id: &DocumentId, from: OrderStatus, order: &Order) -> InfraResult<()> {
        self.orders
            .update(id, status_patch(order.status, order.updated_at)?)?;
        self.notifications.notify_status_change(
            NotificationKind::OrderStatus,
            id,
            from.as_str(),
            order.status.as_str(),
            order.updated_at,
        )?;

        tracing::info!(order_id = %id, from = %from, to = %order.status, "order status changed");
        self.analytics.track(
            "order_status_changed",
            &json!({ "orderId": id, "from": from, "to": order.status }),
        );
        Ok(())
    }
}
