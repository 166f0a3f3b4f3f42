//! # Checkout
//!
//! The hand-off between the cart and the order tracker: cart totals, the checkout form and
//! its validation rules, and the [`OrderCreate`] a valid submission turns into.
//!
//! ```rust
//! use order_tracker::checkout::{Cart, CheckoutForm, PaymentMethod};
//! use order_tracker::model::{DeliveryAddress, LineItem};
//!
//! let mut cart = Cart::new();
//! cart.add(LineItem::new("Margherita Pizza", 12.99, 1));
//!
//! let form = CheckoutForm {
//!     delivery_address: DeliveryAddress {
//!         street: "123 Main St".into(),
//!         city: "Springfield".into(),
//!         state: "IL".into(),
//!         zip: "62701".into(),
//!         country: "USA".into(),
//!     },
//!     payment_method: Some(PaymentMethod::Card),
//!     notes: None,
//!     agree_terms: true,
//! };
//!
//! let params = form.submit(&cart, "The Pizza Place").unwrap();
//! assert_eq!(params.total_amount, 12.99);
//! ```

use crate::model::{DeliveryAddress, LineItem, OrderCreate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::sync::LazyLock;
use thiserror::Error;
use tracing::{debug, warn};

/// Promo code accepted by the cart, case-insensitive.
pub const PROMO_CODE: &str = "SAVE10";
const PROMO_RATE: f64 = 0.10;

/// The cart being checked out.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    items: Vec<LineItem>,
    discount_rate: f64,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a line. A line with the same name has its quantity increased instead.
    pub fn add(&mut self, item: LineItem) {
        match self.items.iter_mut().find(|i| i.name == item.name) {
            Some(existing) => existing.quantity += item.quantity,
            None => self.items.push(item),
        }
    }

    /// Sets a line's quantity. Zero removes the line.
    pub fn set_quantity(&mut self, name: &str, quantity: u32) {
        if quantity == 0 {
            self.remove(name);
        } else if let Some(item) = self.items.iter_mut().find(|i| i.name == name) {
            item.quantity = quantity;
        }
    }

    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|i| i.name != name);
        self.items.len() != before
    }

    /// Applies a promo code. An unknown code clears any discount and returns `false`.
    pub fn apply_promo(&mut self, code: &str) -> bool {
        if code.trim().eq_ignore_ascii_case(PROMO_CODE) {
            self.discount_rate = PROMO_RATE;
            true
        } else {
            self.discount_rate = 0.0;
            false
        }
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn subtotal(&self) -> f64 {
        self.items.iter().map(LineItem::line_total).sum()
    }

    pub fn discount(&self) -> f64 {
        self.subtotal() * self.discount_rate
    }

    pub fn final_total(&self) -> f64 {
        self.subtotal() - self.discount()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Card,
    Paypal,
    /// Cash on delivery.
    Cod,
}

/// What the customer fills in at checkout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutForm {
    pub delivery_address: DeliveryAddress,
    pub payment_method: Option<PaymentMethod>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub agree_terms: bool,
}

/// A single rejected field, e.g. `deliveryAddress.zip: Invalid ZIP code`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

impl Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CheckoutError {
    #[error("Your cart is empty.")]
    EmptyCart,

    #[error("Checkout form invalid: {}", join(.0))]
    Invalid(Vec<FieldError>),
}

fn join(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl CheckoutForm {
    /// Every rule the form breaks, in field order.
    pub fn validate(&self) -> Vec<FieldError> {
        let address = &self.delivery_address;
        let mut errors = Vec::new();
        let mut check = |ok: bool, field, message| {
            if !ok {
                errors.push(FieldError { field, message });
            }
        };

        check(
            address.street.chars().count() >= 5,
            "deliveryAddress.street",
            "Street address is too short",
        );
        check(
            address.city.chars().count() >= 2,
            "deliveryAddress.city",
            "City name is too short",
        );
        check(
            address.state.chars().count() >= 2,
            "deliveryAddress.state",
            "State is required",
        );
        check(
            is_zip(&address.zip),
            "deliveryAddress.zip",
            "Invalid ZIP code",
        );
        check(
            address.country.chars().count() >= 2,
            "deliveryAddress.country",
            "Country is required",
        );
        check(
            self.payment_method.is_some(),
            "paymentMethod",
            "Payment method is required",
        );
        check(
            self.agree_terms,
            "agreeTerms",
            "You must agree to the terms and conditions.",
        );
        errors
    }

    /// Validates the form against `cart` and builds the order to place.
    ///
    /// The order total is the cart's final total, discount included.
    pub fn submit(&self, cart: &Cart, restaurant_name: &str) -> Result<OrderCreate, CheckoutError> {
        if cart.is_empty() {
            warn!("Checkout with empty cart");
            return Err(CheckoutError::EmptyCart);
        }
        let errors = self.validate();
        if !errors.is_empty() {
            warn!(count = errors.len(), "Checkout form rejected");
            return Err(CheckoutError::Invalid(errors));
        }
        debug!(restaurant_name, total = cart.final_total(), "Checkout accepted");
        Ok(OrderCreate::new(
            cart.items().to_vec(),
            cart.final_total(),
            restaurant_name,
            Some(self.delivery_address.clone()),
        ))
    }
}

static ZIP: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[0-9]{5}(-[0-9]{4})?$").ok());

fn is_zip(zip: &str) -> bool {
    ZIP.as_ref().is_some_and(|re| re.is_match(zip))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn address() -> DeliveryAddress {
        DeliveryAddress {
            street: "123 Main St".into(),
            city: "Springfield".into(),
            state: "IL".into(),
            zip: "62701".into(),
            country: "USA".into(),
        }
    }

    fn form() -> CheckoutForm {
        CheckoutForm {
            delivery_address: address(),
            payment_method: Some(PaymentMethod::Paypal),
            notes: Some("Ring the bell".into()),
            agree_terms: true,
        }
    }

    fn pizza_cart() -> Cart {
        let mut cart = Cart::new();
        cart.add(LineItem::new("Margherita Pizza", 12.99, 1));
        cart.add(LineItem::new("Garlic Bread", 4.50, 2));
        cart
    }

    #[test]
    fn test_cart_totals_with_promo() {
        let mut cart = pizza_cart();
        assert!((cart.subtotal() - 21.99).abs() < 1e-9);
        assert_eq!(cart.discount(), 0.0);

        assert!(cart.apply_promo("save10"));
        assert!((cart.discount() - 2.199).abs() < 1e-9);
        assert!((cart.final_total() - 19.791).abs() < 1e-9);

        assert!(!cart.apply_promo("FREEFOOD"));
        assert_eq!(cart.final_total(), cart.subtotal());
    }

    #[test]
    fn test_cart_quantity_changes() {
        let mut cart = pizza_cart();
        cart.add(LineItem::new("Garlic Bread", 4.50, 1));
        assert_eq!(cart.items()[1].quantity, 3);

        cart.set_quantity("Garlic Bread", 0);
        assert_eq!(cart.items().len(), 1);
        assert!(!cart.remove("Garlic Bread"));
        assert!(cart.remove("Margherita Pizza"));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_zip_formats() {
        assert!(is_zip("90210"));
        assert!(is_zip("90210-1234"));
        assert!(!is_zip("9021"));
        assert!(!is_zip("90210-12"));
        assert!(!is_zip("ABCDE"));
        assert!(!is_zip(""));
        assert!(!is_zip("90210-"));
        assert!(!is_zip(" 90210"));
        assert!(!is_zip("902101234"));
        assert!(!is_zip("\u{0669}0210"));
    }

    #[test]
    fn test_submit_uses_final_total() {
        let mut cart = pizza_cart();
        cart.apply_promo("SAVE10");
        let params = form().submit(&cart, "The Pizza Place").unwrap();

        assert_eq!(params.restaurant_name, "The Pizza Place");
        assert_eq!(params.items.len(), 2);
        assert!((params.total_amount - cart.final_total()).abs() < 1e-9);
        assert_eq!(params.delivery_address, Some(address()));
    }

    #[test]
    fn test_empty_cart_rejected() {
        let err = form().submit(&Cart::new(), "The Pizza Place").unwrap_err();
        assert_eq!(err, CheckoutError::EmptyCart);
    }

    #[test]
    fn test_collects_every_field_error() {
        let mut bad = form();
        bad.delivery_address.street = "1 A".into();
        bad.delivery_address.zip = "ABC".into();
        bad.payment_method = None;
        bad.agree_terms = false;

        let Err(CheckoutError::Invalid(errors)) = bad.submit(&pizza_cart(), "The Pizza Place")
        else {
            panic!("expected field errors");
        };
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            [
                "deliveryAddress.street",
                "deliveryAddress.zip",
                "paymentMethod",
                "agreeTerms"
            ]
        );
        assert_eq!(errors[1].to_string(), "deliveryAddress.zip: Invalid ZIP code");
    }

    #[test]
    fn test_form_from_json() {
        let json = r#"{
            "deliveryAddress": {
                "street": "123 Main St",
                "city": "Springfield",
                "state": "IL",
                "zip": "62701-0001",
                "country": "USA"
            },
            "paymentMethod": "cod",
            "agreeTerms": true
        }"#;
        let parsed: CheckoutForm = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.payment_method, Some(PaymentMethod::Cod));
        assert_eq!(parsed.notes, None);
        assert!(parsed.validate().is_empty());

        let unknown = json.replace("\"cod\"", "\"bitcoin\"");
        assert!(serde_json::from_str::<CheckoutForm>(&unknown).is_err());

        // A rejected field names the payload key it came from.
        let unpaid = json.replace("\"paymentMethod\": \"cod\",", "");
        let parsed: CheckoutForm = serde_json::from_str(&unpaid).unwrap();
        let fields: Vec<_> = parsed.validate().iter().map(|e| e.field).collect();
        assert_eq!(fields, ["paymentMethod"]);
    }
}
