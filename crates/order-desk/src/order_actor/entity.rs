//! [`ActorEntity`] implementation for [`Order`].
//!
//! Both hooks funnel through [`validation::validate`], so a stored order always satisfies
//! every order rule. The actor runs `on_update` against a copy, which keeps a rejected
//! update from touching the stored record.

use super::{validation, OrderError};
use crate::clients::CustomerClient;
use crate::model::{Order, OrderId, OrderParams};
use actor_framework::ActorEntity;
use async_trait::async_trait;

#[async_trait]
impl ActorEntity for Order {
    type Id = OrderId;
    type Create = OrderParams;
    type Update = OrderParams;
    type Context = CustomerClient;
    type Error = OrderError;

    async fn from_create_params(
        id: OrderId,
        params: OrderParams,
        customers: &CustomerClient,
    ) -> Result<Self, Self::Error> {
        let valid = validation::validate(&params, customers).await?;
        Ok(Self {
            id,
            product_name: valid.product_name,
            product_count: valid.product_count,
            customer_id: valid.customer_id,
        })
    }

    async fn on_update(
        &mut self,
        update: OrderParams,
        customers: &CustomerClient,
    ) -> Result<(), Self::Error> {
        let candidate = update.merged_over(self);
        let valid = validation::validate(&candidate, customers).await?;
        self.product_name = valid.product_name;
        self.product_count = valid.product_count;
        self.customer_id = valid.customer_id;
        Ok(())
    }
}
