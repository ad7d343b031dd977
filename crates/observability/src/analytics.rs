use serde::Serialize;

/// Analytics context.
///
/// Holds the enable toggle and the business id that every event is tagged
/// with. Built once at startup and passed to whoever records events; there is
/// no process-global state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Analytics {
    enabled: bool,
    business_id: Option<String>,
}

impl Analytics {
    pub fn new(enabled: bool, business_id: impl Into<String>) -> Self {
        Self {
            enabled,
            business_id: Some(business_id.into()),
        }
    }

    pub fn disabled() -> Self {
        Self::default()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn business_id(&self) -> Option<&str> {
        self.business_id.as_deref()
    }

    /// Record an event. Returns whether it was dispatched.
    ///
    /// Events go out as `tracing` records on the `storefront::analytics`
    /// target; shipping them elsewhere is the subscriber's concern.
    pub fn track<P: Serialize>(&self, event: &str, properties: &P) -> bool {
        if !self.enabled {
            return false;
        }
        let properties = match serde_json::to_string(properties) {
            Ok(json) => json,
            Err(err) => {
                tracing::warn!(event, error = %err, "dropping analytics event with unserializable properties");
                return false;
            }
        };
        tracing::info!(
            target: "storefront::analytics",
            event,
            business_id = self.business_id.as_deref().unwrap_or_default(),
            properties = %properties,
            "analytics event"
        );
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn disabled_context_drops_events() {
        let analytics = Analytics::disabled();
        assert!(!analytics.track("order_created", &json!({ "total": "10.00" })));
        assert_eq!(analytics.business_id(), None);
    }

    #[test]
    fn enabled_context_dispatches_with_business_id() {
        let analytics = Analytics::new(true, "biz-1");
        assert!(analytics.is_enabled());
        assert_eq!(analytics.business_id(), Some("biz-1"));
        assert!(analytics.track("order_created", &json!({ "orderId": "o-1" })));
    }

    #[test]
    fn toggle_is_per_context() {
        let on = Analytics::new(true, "biz-1");
        let off = Analytics::new(false, "biz-1");
        assert!(on.track("page_view", &()));
        assert!(!off.track("page_view", &()));
    }
}
