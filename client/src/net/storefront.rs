//! Typed storefront endpoints on top of [`ApiClient::request`].
//!
//! Each method maps one backend route to request/response DTOs. Collection
//! responses are accepted wrapped (`{"orders": [...]}`) or bare; anything
//! else reads as empty.

#[cfg(test)]
#[path = "storefront_test.rs"]
mod storefront_test;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::api::{ApiClient, ApiError};
use super::transport::Method;
use super::types::{
    AddToCartRequest, AuthResponse, Cart, CreateOrderRequest, Design, GenerateRequest, GeneratedDesign,
    LoginRequest, Order, Product, PublishRequest, RegisterRequest, Session, SessionUser, UpdateCartRequest,
};
use crate::state::session::SessionContext;

pub(crate) fn my_designs_endpoint(category: Option<&str>) -> String {
    with_category("/designs/my-designs", category)
}

pub(crate) fn products_endpoint(category: Option<&str>) -> String {
    match non_empty(category) {
        Some(_) => with_category("/products/category", category),
        None => "/products".to_owned(),
    }
}

pub(crate) fn product_endpoint(product_id: u64) -> String {
    format!("/products/{product_id}")
}

pub(crate) fn cart_item_endpoint(item_id: u64) -> String {
    format!("/cart/{item_id}")
}

fn with_category(path: &str, category: Option<&str>) -> String {
    match non_empty(category) {
        Some(category) => {
            let encoded: String = url::form_urlencoded::byte_serialize(category.as_bytes()).collect();
            format!("{path}?category={encoded}")
        }
        None => path.to_owned(),
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Pull a list out of `value[key]`, or `value` itself when it is an array.
pub(crate) fn collection<T: DeserializeOwned>(value: Value, key: &str) -> Result<Vec<T>, ApiError> {
    let items = match value {
        Value::Array(_) => value,
        Value::Object(mut map) => match map.remove(key) {
            Some(items @ Value::Array(_)) => items,
            _ => return Ok(Vec::new()),
        },
        _ => return Ok(Vec::new()),
    };
    decode(items)
}

/// Pull an object out of `value[key]`, or use `value` itself.
pub(crate) fn entity<T: DeserializeOwned>(mut value: Value, key: &str) -> Result<T, ApiError> {
    match value.get_mut(key).map(Value::take) {
        Some(inner @ Value::Object(_)) => decode(inner),
        _ => decode(value),
    }
}

fn decode<T: DeserializeOwned>(value: Value) -> Result<T, ApiError> {
    serde_json::from_value(value).map_err(|e| ApiError::Parse(format!("unexpected response shape: {e}")))
}

fn encode(body: &impl Serialize) -> Result<Value, ApiError> {
    serde_json::to_value(body).map_err(|e| ApiError::Parse(format!("request body encode failed: {e}")))
}

/// Turn a login/register body into a session. Returns the adopted user.
fn adopt_auth(session: &mut SessionContext, body: Value, username: &str) -> Result<SessionUser, ApiError> {
    let auth: AuthResponse = decode(body)?;
    let Some(token) = auth.token.filter(|t| !t.is_empty()) else {
        return Err(ApiError::Parse("authentication response carried no token".to_owned()));
    };
    let user = auth
        .user
        .filter(|u| !u.username.is_empty())
        .unwrap_or_else(|| SessionUser { username: username.to_owned() });
    session.establish(Session {
        access_token: Some(token),
        refresh_token: auth.refresh_token.filter(|t| !t.is_empty()),
        user: Some(user.clone()),
    })?;
    tracing::info!(username = %user.username, "session established");
    Ok(user)
}

impl ApiClient {
    /// `POST /auth/login`, then adopt the issued session.
    ///
    /// # Errors
    ///
    /// Returns the request error, or [`ApiError::Parse`] when no token came back.
    pub async fn login(
        &self,
        session: &mut SessionContext,
        username: &str,
        password: &str,
    ) -> Result<SessionUser, ApiError> {
        let body = encode(&LoginRequest { username, password })?;
        let response = self.request(session, "/auth/login", Method::Post, Some(&body), false).await?;
        adopt_auth(session, response, username)
    }

    /// `POST /auth/register`; the backend logs the new user in directly.
    ///
    /// # Errors
    ///
    /// Returns the request error, or [`ApiError::Parse`] when no token came back.
    pub async fn register(
        &self,
        session: &mut SessionContext,
        username: &str,
        password: &str,
        email: &str,
    ) -> Result<SessionUser, ApiError> {
        let body = encode(&RegisterRequest { username, password, email })?;
        let response = self.request(session, "/auth/register", Method::Post, Some(&body), false).await?;
        adopt_auth(session, response, username)
    }

    /// `POST /designs/generate`.
    ///
    /// # Errors
    ///
    /// Returns the request error.
    pub async fn generate_design(
        &self,
        session: &mut SessionContext,
        prompt: &str,
        category: &str,
        style: &str,
    ) -> Result<GeneratedDesign, ApiError> {
        let body = encode(&GenerateRequest { prompt, category, style })?;
        let response = self.request(session, "/designs/generate", Method::Post, Some(&body), true).await?;
        decode(response)
    }

    /// `GET /designs/my-designs[?category=]`, oldest first as served.
    ///
    /// # Errors
    ///
    /// Returns the request error.
    pub async fn my_designs(
        &self,
        session: &mut SessionContext,
        category: Option<&str>,
    ) -> Result<Vec<Design>, ApiError> {
        let endpoint = my_designs_endpoint(category);
        let response = self.request(session, &endpoint, Method::Get, None, true).await?;
        collection(response, "designs")
    }

    /// `POST /designs/publish`. Returns the created product when echoed.
    ///
    /// # Errors
    ///
    /// Returns the request error.
    pub async fn publish_design(
        &self,
        session: &mut SessionContext,
        design_id: u64,
        product_name: &str,
        description: &str,
        price: f64,
    ) -> Result<Option<Product>, ApiError> {
        let body = encode(&PublishRequest { design_id, product_name, description, price })?;
        let response = self.request(session, "/designs/publish", Method::Post, Some(&body), true).await?;
        Ok(optional_entity(response, "product"))
    }

    /// `GET /products`, or `GET /products/category?category=` when filtered.
    ///
    /// # Errors
    ///
    /// Returns the request error.
    pub async fn list_products(
        &self,
        session: &mut SessionContext,
        category: Option<&str>,
    ) -> Result<Vec<Product>, ApiError> {
        let endpoint = products_endpoint(category);
        let response = self.request(session, &endpoint, Method::Get, None, false).await?;
        collection(response, "products")
    }

    /// `GET /products/{id}`.
    ///
    /// # Errors
    ///
    /// Returns the request error.
    pub async fn get_product(&self, session: &mut SessionContext, product_id: u64) -> Result<Product, ApiError> {
        let endpoint = product_endpoint(product_id);
        let response = self.request(session, &endpoint, Method::Get, None, false).await?;
        entity(response, "product")
    }

    /// `POST /cart/add`.
    ///
    /// # Errors
    ///
    /// Returns the request error.
    pub async fn add_to_cart(
        &self,
        session: &mut SessionContext,
        product_id: u64,
        design_id: u64,
        quantity: u32,
    ) -> Result<(), ApiError> {
        let body = encode(&AddToCartRequest { product_id, design_id, quantity })?;
        self.request(session, "/cart/add", Method::Post, Some(&body), true).await?;
        Ok(())
    }

    /// `GET /cart`.
    ///
    /// # Errors
    ///
    /// Returns the request error.
    pub async fn get_cart(&self, session: &mut SessionContext) -> Result<Cart, ApiError> {
        let response = self.request(session, "/cart", Method::Get, None, true).await?;
        if response.is_null() {
            return Ok(Cart::default());
        }
        decode(response)
    }

    /// `PUT /cart/{id}`.
    ///
    /// # Errors
    ///
    /// Returns the request error.
    pub async fn update_cart_item(
        &self,
        session: &mut SessionContext,
        item_id: u64,
        quantity: u32,
    ) -> Result<(), ApiError> {
        let body = encode(&UpdateCartRequest { quantity })?;
        let endpoint = cart_item_endpoint(item_id);
        self.request(session, &endpoint, Method::Put, Some(&body), true).await?;
        Ok(())
    }

    /// `DELETE /cart/{id}`.
    ///
    /// # Errors
    ///
    /// Returns the request error.
    pub async fn remove_cart_item(&self, session: &mut SessionContext, item_id: u64) -> Result<(), ApiError> {
        let endpoint = cart_item_endpoint(item_id);
        self.request(session, &endpoint, Method::Delete, None, true).await?;
        Ok(())
    }

    /// `POST /orders` for the given cart lines. Returns the order when echoed.
    ///
    /// # Errors
    ///
    /// Returns the request error.
    pub async fn create_order(
        &self,
        session: &mut SessionContext,
        cart_item_ids: &[u64],
    ) -> Result<Option<Order>, ApiError> {
        let body = encode(&CreateOrderRequest { cart_item_ids })?;
        let response = self.request(session, "/orders", Method::Post, Some(&body), true).await?;
        Ok(optional_entity(response, "order"))
    }

    /// `GET /orders`.
    ///
    /// # Errors
    ///
    /// Returns the request error.
    pub async fn list_orders(&self, session: &mut SessionContext) -> Result<Vec<Order>, ApiError> {
        let response = self.request(session, "/orders", Method::Get, None, true).await?;
        collection(response, "orders")
    }
}

fn optional_entity<T: DeserializeOwned>(mut value: Value, key: &str) -> Option<T> {
    value
        .get_mut(key)
        .map(Value::take)
        .and_then(|inner| serde_json::from_value(inner).ok())
}
