//! [`ActorEntity`] implementation for [`Customer`].

use super::CustomerError;
use crate::model::{Customer, CustomerId, CustomerParams, ValidationErrors};
use actor_framework::ActorEntity;
use async_trait::async_trait;

#[async_trait]
impl ActorEntity for Customer {
    type Id = CustomerId;
    type Create = CustomerParams;
    type Update = CustomerParams;
    type Context = ();
    type Error = CustomerError;

    async fn from_create_params(
        id: CustomerId,
        params: CustomerParams,
        _ctx: &Self::Context,
    ) -> Result<Self, Self::Error> {
        validate(id, params)
    }

    /// Merges the submitted attributes over the stored ones and re-checks the result.
    async fn on_update(
        &mut self,
        update: CustomerParams,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error> {
        *self = validate(self.id, update.merged_over(self))?;
        Ok(())
    }
}

/// Checks names and email, collecting one reason per failing attribute.
pub fn validate(id: CustomerId, params: CustomerParams) -> Result<Customer, CustomerError> {
    let mut errors = ValidationErrors::new();

    let first_name = required(&mut errors, "first_name", params.first_name);
    let last_name = required(&mut errors, "last_name", params.last_name);
    let email = required(&mut errors, "email", params.email);
    if !email.trim().is_empty() && !email.contains('@') {
        errors.add("email", "is invalid");
    }

    errors
        .into_result(Customer {
            id,
            first_name,
            last_name,
            phone: params.phone.unwrap_or_default(),
            email,
        })
        .map_err(CustomerError::Invalid)
}

fn required(errors: &mut ValidationErrors, field: &'static str, value: Option<String>) -> String {
    let value = value.unwrap_or_default();
    if value.trim().is_empty() {
        errors.add(field, "can't be blank");
    }
    value
}
