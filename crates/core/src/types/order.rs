//! Order submission payload.

use serde::{Deserialize, Serialize};

use super::id::OrderId;
use super::price::Price;

/// Customer details sent with an order.
///
/// Field names follow the wire format (`tel`, `payment`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderUser {
    pub name: String,
    pub tel: String,
    pub email: String,
    pub address: String,
    pub payment: String,
}

impl OrderUser {
    /// Whether every field holds some text.
    ///
    /// This is the only validation performed before an order is sent.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.fields().iter().all(|value| !value.is_empty())
    }

    /// The five fields in form order.
    #[must_use]
    pub fn fields(&self) -> [&str; 5] {
        [
            &self.name,
            &self.tel,
            &self.email,
            &self.address,
            &self.payment,
        ]
    }

    /// Reset every field to empty.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Order confirmation returned by the server. Only a few fields are kept.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OrderConfirmation {
    pub id: OrderId,
    pub total: Price,
}
