//! # Notification Rendering
//!
//! Turns [`CartEvent`] descriptors and rejection errors into user-facing
//! notifications - the storefront shows them as toasts.
//!
//! The channel is advisory: notifications are not part of the state
//! contract, and a sink that drops them on the floor changes nothing about
//! cart behavior.

use std::sync::Mutex;

use tracing::{info, warn};

use crate::error::StoreError;
use velora_core::CartEvent;

// =============================================================================
// Notification
// =============================================================================

/// Visual weight of a notification, mirroring the storefront toast kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Warning,
}

/// A user-facing notification.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub severity: Severity,
    pub message: String,
}

impl Notification {
    fn info(message: impl Into<String>) -> Self {
        Notification {
            severity: Severity::Info,
            message: message.into(),
        }
    }

    fn success(message: impl Into<String>) -> Self {
        Notification {
            severity: Severity::Success,
            message: message.into(),
        }
    }

    fn warning(message: impl Into<String>) -> Self {
        Notification {
            severity: Severity::Warning,
            message: message.into(),
        }
    }
}

// =============================================================================
// Sinks
// =============================================================================

/// Receiver of user-facing notifications.
pub trait NotificationSink: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Default sink: structured log lines via `tracing`.
#[derive(Debug, Default)]
pub struct TracingSink;

impl NotificationSink for TracingSink {
    fn notify(&self, notification: Notification) {
        match notification.severity {
            Severity::Warning => warn!(message = %notification.message, "cart notification"),
            _ => info!(message = %notification.message, "cart notification"),
        }
    }
}

/// Capturing sink for tests.
#[derive(Debug, Default)]
pub struct BufferSink {
    entries: Mutex<Vec<Notification>>,
}

impl BufferSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns and clears the captured notifications.
    pub fn drain(&self) -> Vec<Notification> {
        let mut entries = self.entries.lock().expect("notification buffer poisoned");
        std::mem::take(&mut *entries)
    }

    /// Returns the captured messages without clearing.
    pub fn messages(&self) -> Vec<String> {
        self.entries
            .lock()
            .expect("notification buffer poisoned")
            .iter()
            .map(|n| n.message.clone())
            .collect()
    }
}

impl NotificationSink for BufferSink {
    fn notify(&self, notification: Notification) {
        self.entries
            .lock()
            .expect("notification buffer poisoned")
            .push(notification);
    }
}

// =============================================================================
// Rendering
// =============================================================================

/// Renders a transition event as a notification.
pub fn render_event(event: &CartEvent) -> Notification {
    match event {
        CartEvent::ItemAdded { name, quantity } => {
            if *quantity == 1 {
                Notification::success(format!("{} added to cart", name))
            } else {
                Notification::success(format!("{} quantity increased to {}", name, quantity))
            }
        }
        CartEvent::ItemRemoved { name } => {
            Notification::info(format!("{} removed from cart", name))
        }
        CartEvent::QuantityChanged { name, quantity } => {
            Notification::info(format!("{} quantity set to {}", name, quantity))
        }
        CartEvent::CartCleared => Notification::info("Cart cleared"),
        CartEvent::BundleActivated { saved } => {
            Notification::success(format!("Bundle offer applied - you save {}", saved))
        }
        CartEvent::CouponApplied { code, discount } => {
            Notification::success(format!("Coupon {} applied - you save {}", code, discount))
        }
        CartEvent::CouponRemoved { code } => {
            Notification::info(format!("Coupon {} removed", code))
        }
        CartEvent::CouponSuperseded { code } => Notification::warning(format!(
            "Coupon {} was removed - the bundle offer gives a better price",
            code
        )),
    }
}

/// Renders a rejected operation as a notification carrying the reason.
pub fn render_error(err: &StoreError) -> Notification {
    Notification::warning(match err {
        StoreError::CouponNotFound { code } => format!("Coupon {} not recognized", code),
        StoreError::CouponNotYetActive { code } => format!("Coupon {} is not active yet", code),
        StoreError::CouponExpired { code } => format!("Coupon {} has expired", code),
        StoreError::CouponExhausted { code } => {
            format!("Coupon {} has reached its usage limit", code)
        }
        other => other.to_string(),
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use velora_core::Money;

    #[test]
    fn test_item_added_messages() {
        let first = render_event(&CartEvent::ItemAdded {
            name: "Rose Toner".to_string(),
            quantity: 1,
        });
        assert_eq!(first.severity, Severity::Success);
        assert_eq!(first.message, "Rose Toner added to cart");

        let repeat = render_event(&CartEvent::ItemAdded {
            name: "Rose Toner".to_string(),
            quantity: 3,
        });
        assert_eq!(repeat.message, "Rose Toner quantity increased to 3");
    }

    #[test]
    fn test_bundle_and_coupon_messages() {
        let bundle = render_event(&CartEvent::BundleActivated {
            saved: Money::from_cents(20100),
        });
        assert_eq!(bundle.message, "Bundle offer applied - you save 201.00");

        let superseded = render_event(&CartEvent::CouponSuperseded {
            code: "GLOW10".to_string(),
        });
        assert_eq!(superseded.severity, Severity::Warning);
        assert!(superseded.message.contains("GLOW10"));
    }

    #[test]
    fn test_buffer_sink_captures_in_order() {
        let sink = BufferSink::new();
        sink.notify(render_event(&CartEvent::CartCleared));
        sink.notify(render_event(&CartEvent::CouponRemoved {
            code: "GLOW10".to_string(),
        }));

        let drained = sink.drain();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0].message, "Cart cleared");
        assert!(sink.drain().is_empty());
    }

    #[test]
    fn test_render_error_carries_reason() {
        let err = StoreError::CouponExpired {
            code: "SUMMER".to_string(),
        };
        let n = render_error(&err);
        assert_eq!(n.severity, Severity::Warning);
        assert_eq!(n.message, "Coupon SUMMER has expired");
    }
}
