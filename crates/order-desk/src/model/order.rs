use super::customer::CustomerId;
use super::params::FieldValue;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::str::FromStr;

/// Store-assigned order identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub u32);

impl Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for OrderId {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl FromStr for OrderId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

/// A request by one customer for a quantity of one product.
///
/// Every stored order satisfies the order rules: a non-blank product name, a count in
/// `1..100` and a customer that existed when the order was last saved.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Order {
    pub id: OrderId,
    pub product_name: String,
    pub product_count: u32,
    pub customer_id: CustomerId,
}

/// The permitted order attributes of a create or update request, exactly as submitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderParams {
    pub product_name: Option<FieldValue>,
    pub product_count: Option<FieldValue>,
    pub customer_id: Option<FieldValue>,
}

impl OrderParams {
    pub fn new(
        product_name: impl Into<FieldValue>,
        product_count: impl Into<FieldValue>,
        customer_id: impl Into<FieldValue>,
    ) -> Self {
        Self {
            product_name: Some(product_name.into()),
            product_count: Some(product_count.into()),
            customer_id: Some(customer_id.into()),
        }
    }

    /// Fills every unsubmitted attribute from `order`.
    pub fn merged_over(self, order: &Order) -> Self {
        Self {
            product_name: self
                .product_name
                .or_else(|| Some(order.product_name.clone().into())),
            product_count: self
                .product_count
                .or_else(|| Some(order.product_count.into())),
            customer_id: self
                .customer_id
                .or_else(|| Some(order.customer_id.0.into())),
        }
    }
}

impl From<&Order> for OrderParams {
    fn from(order: &Order) -> Self {
        Self::default().merged_over(order)
    }
}

/// Order attributes that passed every rule.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidOrder {
    pub product_name: String,
    pub product_count: u32,
    pub customer_id: CustomerId,
}
