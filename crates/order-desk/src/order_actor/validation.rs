//! Order rules.
//!
//! Every attribute is checked and every failing attribute contributes its first failing
//! rule. The customer lookup only happens once `customer_id` is a well-formed positive
//! integer.

use super::OrderError;
use crate::clients::CustomerClient;
use crate::model::{CustomerId, FieldValue, OrderParams, ValidOrder, ValidationErrors};
use actor_framework::ActorClient;
use tracing::debug;

pub const MIN_PRODUCT_COUNT: i64 = 1;
pub const MAX_PRODUCT_COUNT: i64 = 100;

/// Validates a complete candidate, resolving its customer through `customers`.
///
/// Returns [`OrderError::Invalid`] for rule failures and
/// [`OrderError::StoreUnavailable`] when the customer store cannot be reached.
pub async fn validate(
    params: &OrderParams,
    customers: &CustomerClient,
) -> Result<ValidOrder, OrderError> {
    let mut errors = ValidationErrors::new();

    let product_name = check_product_name(&mut errors, params.product_name.as_ref());
    let product_count = check_product_count(&mut errors, params.product_count.as_ref());
    let customer_id = match check_customer_id(&mut errors, params.customer_id.as_ref()) {
        Some(id) => resolve_customer(&mut errors, id, customers).await?,
        None => None,
    };

    match (product_name, product_count, customer_id) {
        (Some(product_name), Some(product_count), Some(customer_id)) if errors.is_empty() => {
            Ok(ValidOrder {
                product_name,
                product_count,
                customer_id,
            })
        }
        _ => {
            debug!(%errors, "Order rejected");
            Err(OrderError::Invalid(errors))
        }
    }
}

fn check_product_name(errors: &mut ValidationErrors, value: Option<&FieldValue>) -> Option<String> {
    match value {
        Some(value) if value.is_scalar() && !value.is_blank() => Some(value.to_string()),
        _ => {
            errors.add("product_name", "can't be blank");
            None
        }
    }
}

fn check_product_count(errors: &mut ValidationErrors, value: Option<&FieldValue>) -> Option<u32> {
    let count = integer(errors, "product_count", value)?;
    if !(MIN_PRODUCT_COUNT..=MAX_PRODUCT_COUNT).contains(&count) {
        errors.add(
            "product_count",
            format!("must be in {}..{}", MIN_PRODUCT_COUNT, MAX_PRODUCT_COUNT),
        );
        return None;
    }
    u32::try_from(count).ok()
}

fn check_customer_id(errors: &mut ValidationErrors, value: Option<&FieldValue>) -> Option<i64> {
    let id = integer(errors, "customer_id", value)?;
    if id <= 0 {
        errors.add("customer_id", "must be greater than 0");
        return None;
    }
    Some(id)
}

async fn resolve_customer(
    errors: &mut ValidationErrors,
    id: i64,
    customers: &CustomerClient,
) -> Result<Option<CustomerId>, OrderError> {
    let Ok(id) = u32::try_from(id).map(CustomerId) else {
        errors.add("customer_id", "must exist");
        return Ok(None);
    };
    let found = customers
        .get(id)
        .await
        .map_err(|e| OrderError::StoreUnavailable(e.to_string()))?;
    if found.is_none() {
        errors.add("customer_id", "must exist");
        return Ok(None);
    }
    Ok(Some(id))
}

fn integer(errors: &mut ValidationErrors, field: &'static str, value: Option<&FieldValue>) -> Option<i64> {
    match value {
        Some(value) if !value.is_blank() => match value.to_integer() {
            Ok(number) => Some(number),
            Err(e) => {
                errors.add(field, e.reason());
                None
            }
        },
        _ => {
            errors.add(field, "can't be blank");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Customer;
    use actor_framework::mock::{create_mock_client, MockClient};

    fn ada(id: u32) -> Customer {
        Customer {
            id: CustomerId(id),
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            phone: String::new(),
            email: "ada@example.com".into(),
        }
    }

    fn reasons(result: Result<ValidOrder, OrderError>) -> ValidationErrors {
        match result {
            Err(OrderError::Invalid(errors)) => errors,
            other => panic!("expected validation failure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_valid_order_resolves_customer() {
        let mut mock = MockClient::<Customer>::new();
        mock.expect_get(CustomerId(3)).return_ok(Some(ada(3)));
        let customers = CustomerClient::new(mock.client());

        let order = validate(&OrderParams::new(" Lamp ", "100", 3i64), &customers)
            .await
            .unwrap();
        assert_eq!(
            order,
            ValidOrder {
                product_name: " Lamp ".into(),
                product_count: 100,
                customer_id: CustomerId(3),
            }
        );
        mock.verify();
    }

    #[tokio::test]
    async fn test_all_attributes_are_checked() {
        let mock = MockClient::<Customer>::new();
        let customers = CustomerClient::new(mock.client());

        let errors = reasons(validate(&OrderParams::default(), &customers).await);
        assert_eq!(errors.on("product_name"), vec!["can't be blank"]);
        assert_eq!(errors.on("product_count"), vec!["can't be blank"]);
        assert_eq!(errors.on("customer_id"), vec!["can't be blank"]);
    }

    #[tokio::test]
    async fn test_product_count_rules() {
        let mut mock = MockClient::<Customer>::new();
        let customers = CustomerClient::new(mock.client());

        for (count, reason) in [
            (FieldValue::from("0"), "must be in 1..100"),
            (FieldValue::from("101"), "must be in 1..100"),
            (FieldValue::from("2.5"), "must be an integer"),
            (FieldValue::Decimal(3.0), "must be an integer"),
            (FieldValue::from("many"), "is not a number"),
            (FieldValue::Other(serde_json::json!([5])), "is not a number"),
            (FieldValue::Other(serde_json::json!(true)), "is not a number"),
        ] {
            mock.expect_get(CustomerId(1)).return_ok(Some(ada(1)));
            let params = OrderParams {
                product_count: Some(count),
                ..OrderParams::new("Lamp", 1i64, 1i64)
            };
            let errors = reasons(validate(&params, &customers).await);
            assert_eq!(errors.on("product_count"), vec![reason]);
            assert_eq!(errors.len(), 1);
        }
        mock.verify();
    }

    #[tokio::test]
    async fn test_structured_product_name_is_blank() {
        let mut mock = MockClient::<Customer>::new();
        mock.expect_get(CustomerId(1)).return_ok(Some(ada(1)));
        let customers = CustomerClient::new(mock.client());

        let params = OrderParams {
            product_name: Some(FieldValue::Other(serde_json::json!({"name": "Lamp"}))),
            ..OrderParams::new("", 1i64, 1i64)
        };
        let errors = reasons(validate(&params, &customers).await);
        assert_eq!(errors.on("product_name"), vec!["can't be blank"]);
        assert_eq!(errors.len(), 1);
        mock.verify();
    }

    #[tokio::test]
    async fn test_customer_id_rules() {
        let mut mock = MockClient::<Customer>::new();
        mock.expect_get(CustomerId(5001)).return_ok(None);
        let customers = CustomerClient::new(mock.client());

        for (id, reason) in [
            (FieldValue::from("0"), "must be greater than 0"),
            (FieldValue::from("-4"), "must be greater than 0"),
            (FieldValue::from("x"), "is not a number"),
            (FieldValue::Other(serde_json::json!(false)), "is not a number"),
            (FieldValue::from("99999999999"), "must exist"),
            (FieldValue::from("5001"), "must exist"),
        ] {
            let params = OrderParams {
                customer_id: Some(id),
                ..OrderParams::new("Lamp", 1i64, 1i64)
            };
            let errors = reasons(validate(&params, &customers).await);
            assert_eq!(errors.on("customer_id"), vec![reason]);
        }
        mock.verify();
    }

    #[tokio::test]
    async fn test_unreachable_customer_store_is_not_a_validation_failure() {
        let (client, receiver) = create_mock_client::<Customer>(1);
        drop(receiver);
        let customers = CustomerClient::new(client);

        let result = validate(&OrderParams::new("Lamp", 1i64, 1i64), &customers).await;
        assert!(matches!(result, Err(OrderError::StoreUnavailable(_))));
    }
}
