//! Wire DTOs for the `/api/v1` backend.
//!
//! DESIGN
//! ======
//! The backend omits or zero-fills fields freely, so every field carries a
//! serde default. Responses are deserialized leniently; requests are built
//! from the small `*Request` structs at the bottom of this file.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

// =============================================================================
// SESSION
// =============================================================================

/// Identity of the logged-in user as persisted under `currentUser`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub username: String,
}

/// Client-held authentication state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Session {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub user: Option<SessionUser>,
}

/// Body returned by `/auth/login` and `/auth/register`.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub user: Option<SessionUser>,
}

/// Body returned by `/auth/refresh`.
#[derive(Clone, Debug, Deserialize)]
pub struct RefreshResponse {
    pub token: String,
    pub refresh_token: String,
}

// =============================================================================
// DESIGNS
// =============================================================================

/// An AI-generated image tied to the prompt that produced it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Design {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub prompt: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub style: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Result of `POST /designs/generate`.
///
/// The backend may or may not echo the stored design id.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct GeneratedDesign {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub message: Option<String>,
}

// =============================================================================
// CATALOG
// =============================================================================

/// A design published for sale.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub base_price: f64,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub creator_name: String,
    #[serde(default)]
    pub design_prompt: String,
    #[serde(default)]
    pub design_style: String,
}

// =============================================================================
// CART
// =============================================================================

/// Design summary embedded in a cart line.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CartDesign {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub prompt: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub style: String,
}

/// One line of the server-side cart.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: u64,
    #[serde(default)]
    pub product_id: u64,
    #[serde(default)]
    pub design_id: u64,
    #[serde(default)]
    pub quantity: u32,
    #[serde(default)]
    pub product: Option<Product>,
    #[serde(default)]
    pub design: Option<CartDesign>,
}

impl CartItem {
    /// Line total: unit price times quantity, zero without a product.
    #[must_use]
    pub fn line_total(&self) -> f64 {
        self.product
            .as_ref()
            .map_or(0.0, |product| product.base_price * f64::from(self.quantity))
    }
}

/// Body of `GET /cart`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    #[serde(default, deserialize_with = "deserialize_null_as_default")]
    pub items: Vec<CartItem>,
    #[serde(default)]
    pub total_items: u32,
    #[serde(default)]
    pub total_value: f64,
}

impl Cart {
    /// Ids of every line, in server order.
    #[must_use]
    pub fn item_ids(&self) -> Vec<u64> {
        self.items.iter().map(|item| item.id).collect()
    }
}

// =============================================================================
// ORDERS
// =============================================================================

/// Order lifecycle as reported by the server.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum OrderStatus {
    #[default]
    Pending,
    Paid,
    Shipped,
    Completed,
    Cancelled,
    /// Any status this client does not know; shown verbatim.
    Other(String),
}

impl OrderStatus {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "pending",
            Self::Paid => "paid",
            Self::Shipped => "shipped",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
            Self::Other(raw) => raw,
        }
    }
}

impl From<&str> for OrderStatus {
    fn from(raw: &str) -> Self {
        match raw {
            "pending" => Self::Pending,
            "paid" => Self::Paid,
            "shipped" => Self::Shipped,
            "completed" => Self::Completed,
            "cancelled" => Self::Cancelled,
            other => Self::Other(other.to_owned()),
        }
    }
}

impl Serialize for OrderStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for OrderStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::from(raw.as_str()))
    }
}

/// A line of a placed order, snapshotted at checkout.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub product_name: String,
    #[serde(default)]
    pub design_image_url: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub quantity: u32,
}

/// A placed order. Immutable from the client's side.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Order {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub order_sn: String,
    #[serde(default)]
    pub status: OrderStatus,
    #[serde(default, deserialize_with = "deserialize_null_as_default")]
    pub order_items: Vec<OrderItem>,
    #[serde(default)]
    pub total_amount: f64,
    #[serde(default)]
    pub created_at: Option<String>,
}

// =============================================================================
// REQUEST BODIES
// =============================================================================

#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
pub struct RegisterRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
    pub email: &'a str,
}

#[derive(Debug, Serialize)]
pub struct GenerateRequest<'a> {
    pub prompt: &'a str,
    pub category: &'a str,
    pub style: &'a str,
}

#[derive(Debug, Serialize)]
pub struct PublishRequest<'a> {
    pub design_id: u64,
    pub product_name: &'a str,
    pub description: &'a str,
    pub price: f64,
}

#[derive(Debug, Serialize)]
pub struct AddToCartRequest {
    pub product_id: u64,
    pub design_id: u64,
    pub quantity: u32,
}

#[derive(Debug, Serialize)]
pub struct UpdateCartRequest {
    pub quantity: u32,
}

#[derive(Debug, Serialize)]
pub struct CreateOrderRequest<'a> {
    pub cart_item_ids: &'a [u64],
}

// Go encodes empty slices as `null`.
fn deserialize_null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
