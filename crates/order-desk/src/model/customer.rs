use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::str::FromStr;

/// Store-assigned customer identifier. Displays as the bare number so it drops straight into
/// paths like `/customers/3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomerId(pub u32);

impl Display for CustomerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for CustomerId {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl FromStr for CustomerId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

/// A person who places orders.
///
/// # Actor Framework
/// Managed by a [`ResourceActor`](actor_framework::ResourceActor); see
/// [`customer_actor`](crate::customer_actor) for its validation rules.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Customer {
    pub id: CustomerId,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub email: String,
}

impl Customer {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// The permitted customer attributes of a create or update request.
///
/// Unknown keys are dropped during deserialization. `None` means "not submitted"; on update the
/// stored value is kept.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomerParams {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

impl CustomerParams {
    /// Fills every unsubmitted attribute from `customer`.
    pub fn merged_over(self, customer: &Customer) -> Self {
        Self {
            first_name: self.first_name.or_else(|| Some(customer.first_name.clone())),
            last_name: self.last_name.or_else(|| Some(customer.last_name.clone())),
            phone: self.phone.or_else(|| Some(customer.phone.clone())),
            email: self.email.or_else(|| Some(customer.email.clone())),
        }
    }
}

impl From<&Customer> for CustomerParams {
    fn from(customer: &Customer) -> Self {
        Self::default().merged_over(customer)
    }
}
