//! Command dispatcher: user actions in, notifications and screens out.
//!
//! DESIGN
//! ======
//! `Studio` owns the API client, the session context and the UI state. Each
//! [`Command`] is handled start to finish inside [`Studio::dispatch`]; errors
//! never escape it, they are folded into the returned [`Outcome`] as
//! notifications. Collections are always re-fetched after a mutation, the
//! server stays the source of truth.

#[cfg(test)]
#[path = "app_test.rs"]
mod app_test;

use crate::net::api::{ApiClient, ApiError, SESSION_EXPIRED_MESSAGE};
use crate::state::session::{SessionContext, save_cart_cache};
use crate::state::ui::{Notification, UiState, ViewId};
use crate::views::labels::{cart_badge, full_prompt};
use crate::views::{Region, Screen, failed_section, render, render_section};

pub const DEFAULT_CATEGORY: &str = "general";

/// A user action.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    Navigate { view: ViewId, category: Option<String> },
    Login { username: String, password: String },
    Register { username: String, password: String, email: String },
    Logout,
    Generate { prompt: String, category: String, style: String },
    /// Publish `design_id`, or the latest generated design when `None`.
    Publish { design_id: Option<u64>, name: String, description: String, price: f64 },
    ShowProduct { product_id: u64 },
    /// Add one unit of a product, printed with the newest design.
    AddToCart { product_id: u64 },
    /// Quantities below 1 remove the line.
    UpdateQuantity { item_id: u64, quantity: i64 },
    Remove { item_id: u64 },
    Checkout,
    PlaceOrder,
    RefreshBadge,
}

impl Command {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Navigate { .. } => "navigate",
            Self::Login { .. } => "login",
            Self::Register { .. } => "register",
            Self::Logout => "logout",
            Self::Generate { .. } => "generate",
            Self::Publish { .. } => "publish",
            Self::ShowProduct { .. } => "show_product",
            Self::AddToCart { .. } => "add_to_cart",
            Self::UpdateQuantity { .. } => "update_quantity",
            Self::Remove { .. } => "remove",
            Self::Checkout => "checkout",
            Self::PlaceOrder => "place_order",
            Self::RefreshBadge => "refresh_badge",
        }
    }
}

/// Everything a presentation layer needs to show after one command.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Outcome {
    pub notifications: Vec<Notification>,
    pub screens: Vec<Screen>,
    /// Section the dispatcher switched to, if any.
    pub navigate: Option<ViewId>,
    /// The user must authenticate before retrying.
    pub prompt_login: bool,
}

impl Outcome {
    fn notify(&mut self, notification: Notification) {
        self.notifications.push(notification);
    }

    fn screen(&mut self, screen: Screen) {
        self.screens.push(screen);
    }
}

pub struct Studio {
    api: ApiClient,
    session: SessionContext,
    ui: UiState,
}

impl Studio {
    pub fn new(api: ApiClient, session: SessionContext) -> Self {
        Self { api, session, ui: UiState::default() }
    }

    #[must_use]
    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    #[must_use]
    pub fn ui(&self) -> &UiState {
        &self.ui
    }

    #[must_use]
    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// Rendered title bar for the current session and section.
    #[must_use]
    pub fn header(&self) -> Screen {
        Screen::new(Region::Header, render::header(self.session.user(), &self.ui))
    }

    pub async fn dispatch(&mut self, command: Command) -> Outcome {
        tracing::debug!(command = command.name(), "dispatch");
        let mut outcome = Outcome::default();
        match command {
            Command::Navigate { view, category } => self.show(view, category.as_deref(), &mut outcome).await,
            Command::Login { username, password } => self.login(&username, &password, &mut outcome).await,
            Command::Register { username, password, email } => {
                self.register(&username, &password, &email, &mut outcome).await;
            }
            Command::Logout => self.logout(&mut outcome),
            Command::Generate { prompt, category, style } => {
                self.generate(&prompt, &category, &style, &mut outcome).await;
            }
            Command::Publish { design_id, name, description, price } => {
                self.publish(design_id, &name, &description, price, &mut outcome).await;
            }
            Command::ShowProduct { product_id } => self.show_product(product_id, &mut outcome).await,
            Command::AddToCart { product_id } => self.add_to_cart(product_id, &mut outcome).await,
            Command::UpdateQuantity { item_id, quantity } => {
                self.update_quantity(item_id, quantity, &mut outcome).await;
            }
            Command::Remove { item_id } => self.remove(item_id, &mut outcome).await,
            Command::Checkout => self.checkout(&mut outcome).await,
            Command::PlaceOrder => self.place_order(&mut outcome).await,
            Command::RefreshBadge => self.refresh_badge(&mut outcome).await,
        }
        outcome
    }

    // =========================================================================
    // NAVIGATION
    // =========================================================================

    async fn show(&mut self, view: ViewId, category: Option<&str>, outcome: &mut Outcome) {
        self.ui.active_view = view;
        outcome.navigate = Some(view);
        match render_section(&self.api, &mut self.session, &self.ui, view, category).await {
            Ok(screen) => outcome.screen(screen),
            Err(e) => {
                tracing::warn!(view = %view, error = %e, "section load failed");
                outcome.screen(failed_section(view, &e));
                if e.is_session_expired() {
                    self.session_expired(outcome);
                }
            }
        }
    }

    // =========================================================================
    // AUTH
    // =========================================================================

    async fn login(&mut self, username: &str, password: &str, outcome: &mut Outcome) {
        if username.is_empty() || password.is_empty() {
            outcome.notify(Notification::error("Please enter username and password"));
            return;
        }
        match self.api.login(&mut self.session, username, password).await {
            Ok(_) => {
                outcome.notify(Notification::success("Logged in successfully!"));
                outcome.screen(self.header());
            }
            Err(e) => self.fail(None, &e, outcome),
        }
    }

    async fn register(&mut self, username: &str, password: &str, email: &str, outcome: &mut Outcome) {
        if username.is_empty() || password.is_empty() {
            outcome.notify(Notification::error("Please enter username and password"));
            return;
        }
        match self.api.register(&mut self.session, username, password, email).await {
            Ok(_) => {
                outcome.notify(Notification::success("Registered and logged in!"));
                self.show(ViewId::Design, None, outcome).await;
                outcome.screen(self.header());
            }
            Err(e) => self.fail(None, &e, outcome),
        }
    }

    fn logout(&mut self, outcome: &mut Outcome) {
        let username = self.session.user().map(|user| user.username.clone());
        self.ui.cart_badge = None;
        self.ui.current_design = None;
        match self.session.clear() {
            Ok(()) => {
                tracing::info!(username = username.as_deref().unwrap_or_default(), "logged out");
                outcome.notify(Notification::success("Logged out"));
            }
            Err(e) => outcome.notify(Notification::error(format!("Logout failed: {e}"))),
        }
        outcome.screen(self.header());
    }

    fn require_login(&self, message: &str, outcome: &mut Outcome) -> bool {
        if self.session.is_authenticated() {
            return true;
        }
        outcome.notify(Notification::error(message));
        outcome.prompt_login = true;
        false
    }

    // =========================================================================
    // DESIGNS
    // =========================================================================

    async fn generate(&mut self, prompt: &str, category: &str, style: &str, outcome: &mut Outcome) {
        if !self.require_login("Please log in to generate designs", outcome) {
            return;
        }
        let prompt = prompt.trim();
        if prompt.is_empty() {
            outcome.notify(Notification::error("Please describe your idea"));
            return;
        }
        let sent_prompt = full_prompt(prompt, category, style);
        let category = if category.is_empty() { DEFAULT_CATEGORY } else { category };

        match self.api.generate_design(&mut self.session, &sent_prompt, category, style).await {
            Ok(design) => {
                self.ui.current_design = Some(design);
                outcome.notify(Notification::success("Design generated!"));
                let body = render::design_workspace(self.ui.current_design.as_ref());
                outcome.screen(Screen::new(Region::Section(ViewId::Design), body));
            }
            Err(e) => self.fail(None, &e, outcome),
        }
    }

    async fn publish(
        &mut self,
        design_id: Option<u64>,
        name: &str,
        description: &str,
        price: f64,
        outcome: &mut Outcome,
    ) {
        let held_id = match (design_id, self.ui.current_design.as_ref()) {
            (Some(id), _) => Some(id),
            (None, Some(design)) => design.id,
            (None, None) => {
                outcome.notify(Notification::error("Generate a design before publishing"));
                return;
            }
        };
        let name = name.trim();
        if name.is_empty() {
            outcome.notify(Notification::error("Please enter a product name"));
            return;
        }
        if !price.is_finite() || price <= 0.0 {
            outcome.notify(Notification::error("Please enter a valid price"));
            return;
        }
        // Generate responses carry no id; the saved copy is the newest design.
        let design_id = match held_id {
            Some(id) => id,
            None => match self.api.my_designs(&mut self.session, None).await {
                Ok(designs) => match designs.last() {
                    Some(design) => design.id,
                    None => {
                        outcome.notify(Notification::error("Generate a design before publishing"));
                        return;
                    }
                },
                Err(e) => return self.fail(Some("Publish failed"), &e, outcome),
            },
        };

        match self
            .api
            .publish_design(&mut self.session, design_id, name, description.trim(), price)
            .await
        {
            Ok(_) => {
                outcome.notify(Notification::success("Published to the shop!"));
                self.show(ViewId::Shop, None, outcome).await;
            }
            Err(e) => self.fail(Some("Publish failed"), &e, outcome),
        }
    }

    // =========================================================================
    // CATALOG / CART
    // =========================================================================

    async fn show_product(&mut self, product_id: u64, outcome: &mut Outcome) {
        match self.api.get_product(&mut self.session, product_id).await {
            Ok(product) => outcome.screen(Screen::new(Region::ProductDetail, render::product_detail(&product))),
            Err(e) => self.fail(Some("Failed to load product details"), &e, outcome),
        }
    }

    async fn add_to_cart(&mut self, product_id: u64, outcome: &mut Outcome) {
        if !self.require_login("Please log in to add products to your cart", outcome) {
            return;
        }
        let designs = match self.api.my_designs(&mut self.session, None).await {
            Ok(designs) => designs,
            Err(e) => return self.fail(Some("Add to cart failed"), &e, outcome),
        };
        // Newest design is last in server order.
        let Some(design) = designs.last() else {
            outcome.notify(Notification::error("Create a design before buying a product"));
            self.show(ViewId::Design, None, outcome).await;
            return;
        };

        match self.api.add_to_cart(&mut self.session, product_id, design.id, 1).await {
            Ok(()) => {
                outcome.notify(Notification::success("Added to cart"));
                self.refresh_badge(outcome).await;
            }
            Err(e) => self.fail(Some("Add to cart failed"), &e, outcome),
        }
    }

    async fn update_quantity(&mut self, item_id: u64, quantity: i64, outcome: &mut Outcome) {
        if quantity < 1 {
            return self.remove(item_id, outcome).await;
        }
        if !self.require_login("Please log in to manage your cart", outcome) {
            return;
        }
        let Ok(quantity) = u32::try_from(quantity) else {
            outcome.notify(Notification::error("Please enter a valid quantity"));
            return;
        };
        match self.api.update_cart_item(&mut self.session, item_id, quantity).await {
            Ok(()) => self.reload_cart(outcome).await,
            Err(e) => self.fail(Some("Update quantity failed"), &e, outcome),
        }
    }

    async fn remove(&mut self, item_id: u64, outcome: &mut Outcome) {
        if !self.require_login("Please log in to manage your cart", outcome) {
            return;
        }
        match self.api.remove_cart_item(&mut self.session, item_id).await {
            Ok(()) => {
                outcome.notify(Notification::success("Removed from cart"));
                self.reload_cart(outcome).await;
            }
            Err(e) => self.fail(Some("Remove failed"), &e, outcome),
        }
    }

    /// Re-fetch the cart once; it feeds the cart section, the cache and the badge.
    async fn reload_cart(&mut self, outcome: &mut Outcome) {
        match self.api.get_cart(&mut self.session).await {
            Ok(cart) => {
                if let Err(e) = save_cart_cache(self.session.store_mut(), &cart.items) {
                    tracing::warn!(error = %e, "cart cache write failed");
                }
                self.ui.cart_badge = cart_badge(cart.total_items);
                if self.ui.active_view == ViewId::Cart {
                    outcome.screen(Screen::new(Region::Section(ViewId::Cart), render::cart(&cart)));
                }
            }
            Err(e) => {
                self.ui.cart_badge = None;
                if self.ui.active_view == ViewId::Cart {
                    outcome.screen(failed_section(ViewId::Cart, &e));
                }
                if e.is_session_expired() {
                    self.session_expired(outcome);
                }
            }
        }
    }

    async fn refresh_badge(&mut self, outcome: &mut Outcome) {
        if !self.session.is_authenticated() {
            self.ui.cart_badge = None;
            return;
        }
        match self.api.get_cart(&mut self.session).await {
            Ok(cart) => self.ui.cart_badge = cart_badge(cart.total_items),
            Err(e) => {
                tracing::warn!(error = %e, "cart badge refresh failed");
                self.ui.cart_badge = None;
                if e.is_session_expired() {
                    self.session_expired(outcome);
                }
            }
        }
    }

    // =========================================================================
    // ORDERS
    // =========================================================================

    async fn checkout(&mut self, outcome: &mut Outcome) {
        if !self.require_login("Please log in to check out", outcome) {
            return;
        }
        match self.api.get_cart(&mut self.session).await {
            Ok(cart) if cart.items.is_empty() => outcome.notify(Notification::info("Your cart is empty")),
            Ok(cart) => outcome.screen(Screen::new(Region::Checkout, render::checkout_summary(&cart))),
            Err(e) => self.fail(Some("Failed to load order summary"), &e, outcome),
        }
    }

    async fn place_order(&mut self, outcome: &mut Outcome) {
        if !self.require_login("Please log in to check out", outcome) {
            return;
        }
        let cart = match self.api.get_cart(&mut self.session).await {
            Ok(cart) => cart,
            Err(e) => return self.fail(Some("Order failed"), &e, outcome),
        };
        let item_ids = cart.item_ids();
        if item_ids.is_empty() {
            outcome.notify(Notification::error("Your cart is empty"));
            return;
        }

        match self.api.create_order(&mut self.session, &item_ids).await {
            Ok(order) => {
                if let Some(order) = order {
                    tracing::info!(order_sn = %order.order_sn, "order placed");
                }
                outcome.notify(Notification::success("Order placed!"));
                self.reload_cart(outcome).await;
                self.show(ViewId::Orders, None, outcome).await;
            }
            Err(e) => self.fail(Some("Order failed"), &e, outcome),
        }
    }

    // =========================================================================
    // ERRORS
    // =========================================================================

    fn fail(&mut self, context: Option<&str>, error: &ApiError, outcome: &mut Outcome) {
        if error.is_session_expired() {
            self.session_expired(outcome);
            return;
        }
        let message = match context {
            Some(context) => format!("{context}: {error}"),
            None => error.to_string(),
        };
        outcome.notify(Notification::error(message));
    }

    // The API client has already cleared the session.
    fn session_expired(&mut self, outcome: &mut Outcome) {
        if outcome.prompt_login {
            return;
        }
        self.ui.cart_badge = None;
        outcome.notify(Notification::error(SESSION_EXPIRED_MESSAGE));
        outcome.prompt_login = true;
        outcome.screen(self.header());
    }
}
