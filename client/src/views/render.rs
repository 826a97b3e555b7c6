//! Plain-text renderers, one per screen region.
//!
//! Renderers are pure: they take server DTOs and return display text. All
//! label lookups go through [`super::labels`].

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use super::labels::{category_name, format_date, format_date_time, format_price, order_status_label};
use crate::net::types::{Cart, CartItem, Design, GeneratedDesign, Order, Product, SessionUser};
use crate::state::ui::{UiState, ViewId};

pub const APP_NAME: &str = "AI Creative Studio";
pub const NO_DESCRIPTION: &str = "No description";
pub const ANONYMOUS: &str = "Anonymous";
pub const STATIC_PREFIX: &str = "/static";

const PRODUCT_FALLBACK: &str = "Creative product";
const DESIGN_FALLBACK: &str = "Custom design";

fn join(lines: Vec<String>) -> String {
    lines.join("\n")
}

/// Title bar, navigation with the active section marked, and the account line.
#[must_use]
pub fn header(user: Option<&SessionUser>, ui: &UiState) -> String {
    let nav = ViewId::ALL
        .iter()
        .map(|view| {
            let label = match (*view, &ui.cart_badge) {
                (ViewId::Cart, Some(badge)) => format!("{} ({badge})", view.title()),
                _ => view.title().to_owned(),
            };
            if *view == ui.active_view { format!("[{label}]") } else { label }
        })
        .collect::<Vec<_>>()
        .join(" | ");
    let account = match user {
        Some(user) => format!("Welcome, {}", user.username),
        None => "Not logged in (login / register)".to_owned(),
    };
    join(vec![APP_NAME.to_owned(), nav, account])
}

#[must_use]
pub fn home() -> String {
    join(vec![
        "Turn ideas into art with AI.".to_owned(),
        "Describe an idea in Design Studio, keep the results in My Gallery,".to_owned(),
        "and publish your favourites to the Creative Shop.".to_owned(),
    ])
}

/// Design workspace: the latest generation result, or the empty canvas.
#[must_use]
pub fn design_workspace(current: Option<&GeneratedDesign>) -> String {
    let Some(design) = current else {
        return "Your design will appear here. Describe an idea to generate one.".to_owned();
    };
    let mut lines = vec![format!("Latest design: {}", design.image_url)];
    if let Some(id) = design.id {
        lines.push(format!("Design #{id} is ready to publish."));
    }
    join(lines)
}

#[must_use]
pub fn gallery_login_required() -> String {
    "Log in to see your designs.".to_owned()
}

#[must_use]
pub fn gallery(designs: &[Design]) -> String {
    if designs.is_empty() {
        return "No designs yet. Go create something!".to_owned();
    }
    let lines = designs.iter().map(gallery_item).collect();
    join(lines)
}

fn gallery_item(design: &Design) -> String {
    let mut tags = format!("#{} [{}]", design.id, category_name(&design.category));
    if !design.style.is_empty() {
        tags = format!("{tags} [{}]", design.style);
    }
    let prompt = if design.prompt.is_empty() { "Creative artwork" } else { &design.prompt };
    let created = design
        .created_at
        .as_deref()
        .map(format_date)
        .filter(|date| !date.is_empty())
        .unwrap_or_else(|| "Just created".to_owned());
    join(vec![tags, format!("  {prompt}"), format!("  {created}  {}", design.image_url)])
}

#[must_use]
pub fn products(products: &[Product]) -> String {
    if products.is_empty() {
        return "No creative products yet.".to_owned();
    }
    let lines = products
        .iter()
        .map(|product| {
            format!(
                "#{} {} by {} [{}] {}",
                product.id,
                product.name,
                creator(product),
                category_name(&product.category),
                format_price(product.base_price),
            )
        })
        .collect();
    join(lines)
}

fn creator(product: &Product) -> &str {
    if product.creator_name.is_empty() { ANONYMOUS } else { &product.creator_name }
}

#[must_use]
pub fn product_detail(product: &Product) -> String {
    let description = if product.description.is_empty() { NO_DESCRIPTION } else { &product.description };
    let mut lines = vec![format!("{} (#{})", product.name, product.id)];
    if !product.image_url.is_empty() {
        lines.push(format!("Image: {STATIC_PREFIX}{}", product.image_url));
    }
    lines.push(description.to_owned());
    lines.push(format!("Price: {}", format_price(product.base_price)));
    lines.push(format!("Category: {}", category_name(&product.category)));
    lines.push(format!("Creator: {}", creator(product)));
    if !product.design_prompt.is_empty() {
        lines.push(format!("Prompt: \"{}\"", product.design_prompt));
    }
    if !product.design_style.is_empty() {
        lines.push(format!("Style: {}", product.design_style));
    }
    join(lines)
}

#[must_use]
pub fn cart_login_required() -> String {
    join(vec!["Please log in".to_owned(), "Log in to view and manage your cart.".to_owned()])
}

/// Cart lines followed by the summary; the summary is omitted when empty.
#[must_use]
pub fn cart(cart: &Cart) -> String {
    if cart.items.is_empty() {
        return join(vec![
            "Your cart is empty".to_owned(),
            "Browse the shop to find something you like.".to_owned(),
        ]);
    }
    let mut lines: Vec<String> = cart.items.iter().map(cart_line).collect();
    lines.push(cart_summary(cart));
    join(lines)
}

fn cart_line(item: &CartItem) -> String {
    let name = item
        .product
        .as_ref()
        .map(|product| product.name.as_str())
        .filter(|name| !name.is_empty())
        .unwrap_or(PRODUCT_FALLBACK);
    let prompt = item
        .design
        .as_ref()
        .map(|design| design.prompt.as_str())
        .filter(|prompt| !prompt.is_empty())
        .unwrap_or(DESIGN_FALLBACK);
    format!(
        "#{} {name} x{} {}\n   {prompt}",
        item.id,
        item.quantity,
        format_price(item.line_total())
    )
}

#[must_use]
pub fn cart_summary(cart: &Cart) -> String {
    format!("Items: {}  Total: {}", cart.total_items, format_price(cart.total_value))
}

/// Order preview shown before confirming checkout.
#[must_use]
pub fn checkout_summary(cart: &Cart) -> String {
    let mut lines: Vec<String> = cart
        .items
        .iter()
        .map(|item| {
            let name = item.product.as_ref().map_or(PRODUCT_FALLBACK, |product| product.name.as_str());
            format!("{name} x{} {}", item.quantity, format_price(item.line_total()))
        })
        .collect();
    lines.push(format!("Order total: {}", format_price(cart.total_value)));
    join(lines)
}

#[must_use]
pub fn orders_login_required() -> String {
    join(vec!["Please log in".to_owned(), "Log in to see your order history.".to_owned()])
}

#[must_use]
pub fn orders(orders: &[Order]) -> String {
    if orders.is_empty() {
        return join(vec!["No orders yet".to_owned(), "You have not placed any orders.".to_owned()]);
    }
    let blocks = orders.iter().map(order_block).collect();
    join(blocks)
}

fn order_block(order: &Order) -> String {
    let created = order.created_at.as_deref().map(format_date_time).unwrap_or_default();
    let mut lines = vec![format!(
        "Order {} {created} [{}]",
        order.order_sn,
        order_status_label(&order.status)
    )];
    for item in &order.order_items {
        lines.push(format!("  {} x{} {}", item.product_name, item.quantity, format_price(item.price)));
    }
    lines.push(format!("  Total: {}", format_price(order.total_amount)));
    join(lines)
}

#[must_use]
pub fn load_error(message: &str) -> String {
    format!("Failed to load: {message}")
}
