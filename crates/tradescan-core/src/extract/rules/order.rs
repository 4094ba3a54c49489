//! Order ticket number.

use super::patterns::ORDER_ID;
use super::{FieldRule, FieldValue};
use crate::extract::line::Line;
use crate::models::trade::TradeField;

/// Digits directly after `#`.
pub struct OrderIdRule;

impl FieldRule for OrderIdRule {
    fn name(&self) -> &'static str {
        "order_id"
    }

    fn targets(&self) -> &'static [TradeField] {
        &[TradeField::OrderId]
    }

    fn try_extract(&self, line: &Line<'_>) -> Option<FieldValue> {
        ORDER_ID
            .captures(&line.normalized)
            .map(|caps| FieldValue::OrderId(caps[1].to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_id() {
        assert_eq!(
            OrderIdRule.try_extract(&Line::new("Order #48213377 closed")),
            Some(FieldValue::OrderId("48213377".to_string()))
        );
        assert_eq!(OrderIdRule.try_extract(&Line::new("# 123")), None);
        assert_eq!(OrderIdRule.try_extract(&Line::new("ticket 123")), None);
    }
}
