use actor_framework::ActorClient;
use order_desk::config::StoreConfig;
use order_desk::customer_actor::CustomerError;
use order_desk::lifecycle::OrderSystem;
use order_desk::model::{CustomerId, CustomerParams, OrderParams};
use order_desk::order_actor::OrderError;

fn alice() -> CustomerParams {
    CustomerParams {
        first_name: Some("Alice".into()),
        last_name: Some("Smith".into()),
        phone: Some("555-0100".into()),
        email: Some("alice@example.com".into()),
    }
}

/// Full system with real actors.
#[tokio::test]
async fn test_full_order_system_integration() {
    let system = OrderSystem::new(&StoreConfig::default());

    let customer_id = system
        .customer_client
        .create_customer(alice())
        .await
        .expect("Failed to create customer");
    assert_eq!(customer_id, CustomerId(1));

    let order_id = system
        .order_client
        .create_order(OrderParams::new("Super Widget", 5i64, 1i64))
        .await
        .expect("Failed to create order");

    let order = system.order_client.find(order_id).await.unwrap();
    assert_eq!(order.customer_id, customer_id);
    assert_eq!(order.product_count, 5);

    // Out of range count is rejected and nothing new is stored.
    let result = system
        .order_client
        .create_order(OrderParams::new("Super Widget", 101i64, 1i64))
        .await;
    assert!(matches!(result, Err(OrderError::Invalid(_))));
    assert_eq!(system.order_client.list().await.unwrap().len(), 1);

    // Order deletion is unconditional.
    system.order_client.delete(order_id).await.unwrap();
    assert!(system.order_client.list().await.unwrap().is_empty());

    system.shutdown().await.expect("Failed to shutdown");
}

#[tokio::test]
async fn test_customer_with_orders_cannot_be_deleted() {
    let system = OrderSystem::new(&StoreConfig::default());

    let keep = system.customer_client.create_customer(alice()).await.unwrap();
    let free = system.customer_client.create_customer(alice()).await.unwrap();
    let order_id = system
        .order_client
        .create_order(OrderParams::new("Lamp", 1i64, i64::from(keep.0)))
        .await
        .unwrap();

    let result = system
        .customer_client
        .delete_unless_ordered(keep, &system.order_client)
        .await;
    assert_eq!(result, Err(CustomerError::HasOrders));
    assert_eq!(system.customer_client.list().await.unwrap().len(), 2);

    system
        .customer_client
        .delete_unless_ordered(free, &system.order_client)
        .await
        .unwrap();
    assert_eq!(system.customer_client.list().await.unwrap().len(), 1);

    // Once its orders are gone the customer can go too.
    system.order_client.delete(order_id).await.unwrap();
    system
        .customer_client
        .delete_unless_ordered(keep, &system.order_client)
        .await
        .unwrap();
    assert!(system.customer_client.list().await.unwrap().is_empty());

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_invalid_customer_is_rejected() {
    let system = OrderSystem::new(&StoreConfig::default());

    let params = CustomerParams {
        email: Some("no-at-sign".into()),
        ..alice()
    };
    match system.customer_client.create_customer(params).await {
        Err(CustomerError::Invalid(errors)) => {
            assert_eq!(errors.full_messages(), vec!["Email is invalid"]);
        }
        other => panic!("expected validation failure, got {:?}", other),
    }

    system.shutdown().await.unwrap();
}
