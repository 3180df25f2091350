use chrono::Duration;
use dharmacart::application::checkout::{checkout, quote};
use dharmacart::application::ledger::CommerceLedger;
use dharmacart::domain::order::OrderStatus;
use dharmacart::domain::product::Product;
use dharmacart::domain::profile::Address;
use dharmacart::domain::shipping::ShippingMethod;
use dharmacart::error::LedgerError;
use dharmacart::infrastructure::gateway::SimulatedGateway;
use dharmacart::infrastructure::in_memory::InMemoryKvStore;
use rust_decimal_macros::dec;

fn address() -> Address {
    Address {
        full_name: "Arjuna Kumar".to_string(),
        street: "12 Temple Road".to_string(),
        city: "Vrindavan".to_string(),
        state: "UP".to_string(),
        zip_code: "281121".to_string(),
        country: "India".to_string(),
        phone: Some("9876543210".to_string()),
    }
}

fn gita() -> Product {
    Product::new("bg-1", "Bhagavad Gita As It Is", "Prabhupada", dec!(800))
        .unwrap()
        .with_weight(dec!(0.6))
        .with_category("hinduism")
}

fn bible() -> Product {
    Product::new("bible-1", "The Holy Bible - NIV", "Zondervan", dec!(900))
        .unwrap()
        .with_weight(dec!(1.1))
        .with_category("christianity")
}

#[tokio::test]
async fn full_checkout_flow() {
    let store = InMemoryKvStore::new();
    let mut ledger = CommerceLedger::load(Box::new(store.clone())).await.unwrap();
    let gateway = SimulatedGateway::new(std::time::Duration::ZERO);

    ledger.add_to_cart(&gita(), 1).await.unwrap();
    ledger.add_to_cart(&bible(), 1).await.unwrap();
    assert_eq!(ledger.cart_total(), dec!(1700));

    // Subtotal 1700 >= 1500, so shipping is free for any method and
    // the total is subtotal plus 8% tax.
    let totals = quote(ledger.cart(), ShippingMethod::Express, None);
    assert_eq!(totals.shipping, dec!(0));
    assert_eq!(totals.tax, dec!(136.00));
    assert_eq!(totals.total, dec!(1836.00));

    let order = checkout(
        &mut ledger,
        &gateway,
        address(),
        "4111111111111234",
        ShippingMethod::Express,
    )
    .await
    .unwrap();

    assert_eq!(order.shipping, dec!(0));
    assert_eq!(order.total, dec!(1836.00));
    assert_eq!(order.status, OrderStatus::Confirmed);
    assert!(order.tracking_id.starts_with("DV"));
    assert!(order.transaction_id.starts_with("txn_"));
    assert_eq!(order.payment_card.as_str(), "**** **** **** 1234");
    assert!(ledger.cart().is_empty());
}

#[tokio::test]
async fn ledger_state_survives_restart() {
    let store = InMemoryKvStore::new();
    let gateway = SimulatedGateway::new(std::time::Duration::ZERO);

    let order_id = {
        let mut ledger = CommerceLedger::load(Box::new(store.clone())).await.unwrap();
        ledger.add_to_cart(&gita(), 2).await.unwrap();
        ledger.add_to_cart(&bible(), 1).await.unwrap();
        let order = checkout(
            &mut ledger,
            &gateway,
            address(),
            "4111111111111234",
            ShippingMethod::Standard,
        )
        .await
        .unwrap();
        order.id
    };

    // A fresh ledger over the same store recovers everything.
    let mut ledger = CommerceLedger::load(Box::new(store.clone())).await.unwrap();
    assert!(ledger.cart().is_empty());
    assert_eq!(ledger.orders().len(), 1);

    let order = ledger.order(&order_id).unwrap();
    assert_eq!(order.items.len(), 2);
    assert_eq!(order.subtotal, dec!(2500));

    // And the order is still live state: it can move along the FSM.
    ledger
        .update_order_status(&order_id, OrderStatus::Processing)
        .await
        .unwrap();
    ledger
        .update_order_status(&order_id, OrderStatus::Cancelled)
        .await
        .unwrap();

    let reloaded = CommerceLedger::load(Box::new(store)).await.unwrap();
    assert_eq!(
        reloaded.order(&order_id).unwrap().status,
        OrderStatus::Cancelled
    );
}

#[tokio::test]
async fn tracking_view_advances_with_time() {
    let store = InMemoryKvStore::new();
    let mut ledger = CommerceLedger::load(Box::new(store)).await.unwrap();
    let gateway = SimulatedGateway::new(std::time::Duration::ZERO);

    ledger.add_to_cart(&gita(), 1).await.unwrap();
    let order = checkout(
        &mut ledger,
        &gateway,
        address(),
        "4111111111111234",
        ShippingMethod::Standard,
    )
    .await
    .unwrap();

    let early = ledger
        .tracking_info_at(&order.tracking_id, order.created_at)
        .unwrap();
    assert_eq!(early.current_stage, "Order Confirmed");

    let late = ledger
        .tracking_info_at(&order.tracking_id, order.created_at + Duration::days(7))
        .unwrap();
    assert_eq!(late.current_stage, "Delivered");
    assert!(late.events.iter().all(|e| e.at.is_some()));

    assert!(ledger.tracking_info("DVUNKNOWN00").is_none());
}

#[tokio::test]
async fn delivered_orders_are_final() {
    let store = InMemoryKvStore::new();
    let mut ledger = CommerceLedger::load(Box::new(store)).await.unwrap();
    let gateway = SimulatedGateway::new(std::time::Duration::ZERO);

    ledger.add_to_cart(&bible(), 1).await.unwrap();
    let order = checkout(
        &mut ledger,
        &gateway,
        address(),
        "4111111111111234",
        ShippingMethod::Overnight,
    )
    .await
    .unwrap();

    for status in [
        OrderStatus::Processing,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
    ] {
        ledger.update_order_status(&order.id, status).await.unwrap();
    }

    let result = ledger
        .update_order_status(&order.id, OrderStatus::Cancelled)
        .await;
    assert!(matches!(
        result,
        Err(LedgerError::InvalidTransition {
            from: OrderStatus::Delivered,
            to: OrderStatus::Cancelled,
        })
    ));
}
