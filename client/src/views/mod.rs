//! Presentation: label lookups, text renderers, and the section router.
//!
//! SYSTEM CONTEXT
//! ==============
//! `router` maps a [`ViewId`] to its loader and renderer. Home and Design
//! render from local state; Gallery, Shop, Cart and Orders fetch first.

pub mod labels;
pub mod render;


use crate::net::api::{ApiClient, ApiError};
use crate::state::session::{SessionContext, save_cart_cache};
use crate::state::ui::{UiState, ViewId};

/// A rendered section of the storefront.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Region {
    Header,
    Section(ViewId),
    ProductDetail,
    Checkout,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Screen {
    pub region: Region,
    pub body: String,
}

impl Screen {
    pub fn new(region: Region, body: impl Into<String>) -> Self {
        Self { region, body: body.into() }
    }

    /// Section heading line followed by the body.
    #[must_use]
    pub fn titled(&self) -> String {
        match &self.region {
            Region::Section(view) => format!("== {} ==\n{}", view.title(), self.body),
            Region::ProductDetail => format!("== Product ==\n{}", self.body),
            Region::Checkout => format!("== Checkout ==\n{}", self.body),
            Region::Header => self.body.clone(),
        }
    }
}

/// Load and render `view`. `category` filters Gallery and Shop.
///
/// Sections that need an account render their login placeholder without
/// touching the network.
///
/// # Errors
///
/// Returns the API error of the backing fetch; the caller decides how to
/// surface it.
pub async fn render_section(
    api: &ApiClient,
    session: &mut SessionContext,
    ui: &UiState,
    view: ViewId,
    category: Option<&str>,
) -> Result<Screen, ApiError> {
    let body = match view {
        ViewId::Home => render::home(),
        ViewId::Design => render::design_workspace(ui.current_design.as_ref()),
        ViewId::Gallery if !session.is_authenticated() => render::gallery_login_required(),
        ViewId::Gallery => render::gallery(&api.my_designs(session, category).await?),
        ViewId::Shop => render::products(&api.list_products(session, category).await?),
        ViewId::Cart if !session.is_authenticated() => render::cart_login_required(),
        ViewId::Cart => {
            let cart = api.get_cart(session).await?;
            save_cart_cache(session.store_mut(), &cart.items)?;
            render::cart(&cart)
        }
        ViewId::Orders if !session.is_authenticated() => render::orders_login_required(),
        ViewId::Orders => render::orders(&api.list_orders(session).await?),
    };
    Ok(Screen::new(Region::Section(view), body))
}

/// The placeholder shown in place of a section whose load failed.
#[must_use]
pub fn failed_section(view: ViewId, error: &ApiError) -> Screen {
    let body = match (view, error) {
        (ViewId::Gallery, ApiError::SessionExpired) => render::gallery_login_required(),
        (ViewId::Cart, ApiError::SessionExpired) => render::cart_login_required(),
        (ViewId::Orders, ApiError::SessionExpired) => render::orders_login_required(),
        _ => render::load_error(&error.to_string()),
    };
    Screen::new(Region::Section(view), body)
}
