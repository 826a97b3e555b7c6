//! Local UI state: active section, the last generated design, cart badge.
//!
//! DESIGN
//! ======
//! Keeps transient presentation concerns out of the session so the
//! dispatcher can evolve its screens without touching persisted state.

#[cfg(test)]
#[path = "ui_test.rs"]
mod ui_test;

use std::fmt;
use std::str::FromStr;

use crate::net::types::GeneratedDesign;

/// Top-level storefront sections.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ViewId {
    #[default]
    Home,
    Design,
    Gallery,
    Shop,
    Cart,
    Orders,
}

impl ViewId {
    pub const ALL: [Self; 6] = [Self::Home, Self::Design, Self::Gallery, Self::Shop, Self::Cart, Self::Orders];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Design => "design",
            Self::Gallery => "gallery",
            Self::Shop => "shop",
            Self::Cart => "cart",
            Self::Orders => "orders",
        }
    }

    /// Section heading shown above the rendered region.
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Design => "Design Studio",
            Self::Gallery => "My Gallery",
            Self::Shop => "Creative Shop",
            Self::Cart => "Shopping Cart",
            Self::Orders => "My Orders",
        }
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown view: {0}")]
pub struct UnknownView(pub String);

impl FromStr for ViewId {
    type Err = UnknownView;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let wanted = raw.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|view| view.as_str() == wanted)
            .ok_or_else(|| UnknownView(raw.to_owned()))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Error,
    Info,
}

/// A transient user-visible message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self { level: NotificationLevel::Success, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { level: NotificationLevel::Error, message: message.into() }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self { level: NotificationLevel::Info, message: message.into() }
    }
}

#[derive(Clone, Debug, Default)]
pub struct UiState {
    pub active_view: ViewId,
    /// Most recent generation result, the default target for publishing.
    pub current_design: Option<GeneratedDesign>,
    /// Badge text for the cart nav item; `None` hides it.
    pub cart_badge: Option<String>,
}
