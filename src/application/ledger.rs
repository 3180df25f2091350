use crate::domain::cart::{Cart, CartLine};
use crate::domain::order::{CheckoutData, Order, OrderStatus};
use crate::domain::payment::MaskedCard;
use crate::domain::ports::KvStoreBox;
use crate::domain::product::Product;
use crate::domain::profile::{Address, SavedAddress, SavedPaymentMethod};
use crate::domain::tracking::TrackingInfo;
use crate::error::{LedgerError, Result};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

const CART_KEY: &str = "cart";
const ORDERS_KEY: &str = "orders";
const ADDRESSES_KEY: &str = "addresses";
const PAYMENT_METHODS_KEY: &str = "paymentMethods";

/// The authoritative cart and order state for one client.
///
/// All derived values are computed from the in-memory state; the store is
/// purely a durability mechanism, written through after every mutation.
/// Mutations persist first and commit to memory only on success, so a
/// failed write always leaves prior state untouched.
pub struct CommerceLedger {
    store: KvStoreBox,
    cart: Cart,
    orders: Vec<Order>,
    addresses: Vec<SavedAddress>,
    payment_methods: Vec<SavedPaymentMethod>,
}

impl CommerceLedger {
    /// Loads the ledger from the store. Absent keys mean empty
    /// collections, so a fresh client starts with an empty cart and no
    /// orders.
    pub async fn load(store: KvStoreBox) -> Result<Self> {
        let cart = read_or_default(&store, CART_KEY).await?;
        let orders = read_or_default(&store, ORDERS_KEY).await?;
        let addresses = read_or_default(&store, ADDRESSES_KEY).await?;
        let payment_methods = read_or_default(&store, PAYMENT_METHODS_KEY).await?;
        Ok(Self {
            store,
            cart,
            orders,
            addresses,
            payment_methods,
        })
    }

    // Cart

    pub fn cart(&self) -> &[CartLine] {
        self.cart.lines()
    }

    /// Sum of unit price times quantity, recomputed on every call.
    pub fn cart_total(&self) -> Decimal {
        self.cart.subtotal()
    }

    /// Sum of quantities, recomputed on every call.
    pub fn cart_count(&self) -> u32 {
        self.cart.count()
    }

    /// Adds `quantity` units of `product`, merging duplicate adds into
    /// one line. A zero quantity is a silent no-op.
    pub async fn add_to_cart(&mut self, product: &Product, quantity: u32) -> Result<&[CartLine]> {
        let mut next = self.cart.clone();
        next.add(product, quantity, Utc::now());
        self.persist(CART_KEY, &next).await?;
        self.cart = next;
        debug!(product_id = %product.id, quantity, "added to cart");
        Ok(self.cart.lines())
    }

    /// Sets the quantity of the line for `product_id`; zero removes it,
    /// an unknown id is a silent no-op.
    pub async fn update_quantity(&mut self, product_id: &str, quantity: u32) -> Result<&[CartLine]> {
        let mut next = self.cart.clone();
        next.set_quantity(product_id, quantity);
        self.persist(CART_KEY, &next).await?;
        self.cart = next;
        debug!(product_id, quantity, "updated cart quantity");
        Ok(self.cart.lines())
    }

    /// Removes the line for `product_id`. Idempotent.
    pub async fn remove_from_cart(&mut self, product_id: &str) -> Result<&[CartLine]> {
        let mut next = self.cart.clone();
        next.remove(product_id);
        self.persist(CART_KEY, &next).await?;
        self.cart = next;
        debug!(product_id, "removed from cart");
        Ok(self.cart.lines())
    }

    pub async fn clear_cart(&mut self) -> Result<()> {
        self.persist(CART_KEY, &Cart::new()).await?;
        self.cart.clear();
        Ok(())
    }

    // Orders

    /// Turns the current cart into a confirmed order.
    ///
    /// The caller has already authorized payment; the checkout data
    /// carries the transaction id and the totals as shown to the
    /// customer, which are captured verbatim. The order append and the
    /// cart clear are one logical step: if clearing the cart fails, the
    /// order write is compensated before the error surfaces.
    pub async fn create_order(&mut self, data: CheckoutData) -> Result<Order> {
        if self.cart.is_empty() {
            return Err(LedgerError::EmptyCart);
        }
        let now = Utc::now();
        let order = Order::create(data, self.cart.lines().to_vec(), now);

        let mut next_orders = self.orders.clone();
        next_orders.push(order.clone());

        let prev_orders = serde_json::to_string(&self.orders)?;
        self.persist(ORDERS_KEY, &next_orders).await?;
        if let Err(e) = self.persist(CART_KEY, &Cart::new()).await {
            let _ = self.store.set(ORDERS_KEY, &prev_orders).await;
            return Err(e);
        }

        self.orders = next_orders;
        self.cart.clear();
        info!(order_id = %order.id, total = %order.total, "order created");
        Ok(order)
    }

    /// All orders, most recent first.
    pub fn orders(&self) -> Vec<&Order> {
        let mut all: Vec<&Order> = self.orders.iter().collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        all
    }

    pub fn order(&self, order_id: &str) -> Option<&Order> {
        self.orders.iter().find(|o| o.id == order_id)
    }

    /// Moves an order along the status state machine. Unknown ids and
    /// transitions outside the table are errors, and nothing is persisted
    /// for a rejected transition.
    pub async fn update_order_status(
        &mut self,
        order_id: &str,
        status: OrderStatus,
    ) -> Result<&Order> {
        let idx = self
            .orders
            .iter()
            .position(|o| o.id == order_id)
            .ok_or_else(|| LedgerError::OrderNotFound(order_id.to_string()))?;

        let mut next = self.orders.clone();
        next[idx].transition(status, Utc::now())?;
        self.persist(ORDERS_KEY, &next).await?;
        self.orders = next;
        info!(order_id, status = %status, "order status updated");
        Ok(&self.orders[idx])
    }

    // Tracking

    /// Synthesizes the delivery-progress view as observed right now.
    pub fn tracking_info(&self, tracking_id: &str) -> Option<TrackingInfo> {
        self.tracking_info_at(tracking_id, Utc::now())
    }

    /// Deterministic core of [`Self::tracking_info`]: the view for an
    /// explicit observation instant.
    pub fn tracking_info_at(
        &self,
        tracking_id: &str,
        now: DateTime<Utc>,
    ) -> Option<TrackingInfo> {
        self.orders
            .iter()
            .find(|o| o.tracking_id == tracking_id)
            .map(|o| TrackingInfo::synthesize(o, now))
    }

    // Address book and saved payment methods

    pub fn addresses(&self) -> &[SavedAddress] {
        &self.addresses
    }

    pub async fn add_address(&mut self, address: Address) -> Result<SavedAddress> {
        let now = Utc::now();
        let saved = SavedAddress {
            id: format!("addr{}", now.timestamp_micros()),
            address,
            created_at: now,
        };
        let mut next = self.addresses.clone();
        next.push(saved.clone());
        self.persist(ADDRESSES_KEY, &next).await?;
        self.addresses = next;
        Ok(saved)
    }

    pub fn payment_methods(&self) -> &[SavedPaymentMethod] {
        &self.payment_methods
    }

    /// Saves a payment method for reuse. The card number is masked before
    /// it is stored; the full number never reaches the store.
    pub async fn add_payment_method(
        &mut self,
        label: impl Into<String>,
        card_number: &str,
    ) -> Result<SavedPaymentMethod> {
        let now = Utc::now();
        let saved = SavedPaymentMethod {
            id: format!("pm{}", now.timestamp_micros()),
            label: label.into(),
            card: MaskedCard::from_full(card_number),
            created_at: now,
        };
        let mut next = self.payment_methods.clone();
        next.push(saved.clone());
        self.persist(PAYMENT_METHODS_KEY, &next).await?;
        self.payment_methods = next;
        Ok(saved)
    }

    async fn persist<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let raw = serde_json::to_string(value)?;
        self.store.set(key, &raw).await?;
        Ok(())
    }
}

async fn read_or_default<T: DeserializeOwned + Default>(
    store: &KvStoreBox,
    key: &str,
) -> Result<T> {
    match store.get(key).await? {
        Some(raw) => Ok(serde_json::from_str(&raw)?),
        None => Ok(T::default()),
    }
}
