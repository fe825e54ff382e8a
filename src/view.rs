use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Every screen the application can display
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ViewState {
    #[default]
    Home,
    Listings,
    Details,
    Login,
    Register,
    CreateListing,
    LandlordLanding,
    LandlordDashboard,
    Legal,
    Favorites,
    Messages,
    DbListings,
}

impl ViewState {
    pub const ALL: [ViewState; 12] = [
        ViewState::Home,
        ViewState::Listings,
        ViewState::Details,
        ViewState::Login,
        ViewState::Register,
        ViewState::CreateListing,
        ViewState::LandlordLanding,
        ViewState::LandlordDashboard,
        ViewState::Legal,
        ViewState::Favorites,
        ViewState::Messages,
        ViewState::DbListings,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ViewState::Home => "home",
            ViewState::Listings => "listings",
            ViewState::Details => "details",
            ViewState::Login => "login",
            ViewState::Register => "register",
            ViewState::CreateListing => "create-listing",
            ViewState::LandlordLanding => "landlord-landing",
            ViewState::LandlordDashboard => "landlord-dashboard",
            ViewState::Legal => "legal",
            ViewState::Favorites => "favorites",
            ViewState::Messages => "messages",
            ViewState::DbListings => "db-listings",
        }
    }
}

impl fmt::Display for ViewState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown view: {0}")]
pub struct UnknownView(pub String);

impl FromStr for ViewState {
    type Err = UnknownView;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ViewState::ALL
            .into_iter()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| UnknownView(s.to_string()))
    }
}

/// Holds the one active view. Any view may follow any other.
#[derive(Debug, Clone, Default)]
pub struct ViewController {
    active: ViewState,
}

impl ViewController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> ViewState {
        self.active
    }

    pub fn is_active(&self, view: ViewState) -> bool {
        self.active == view
    }

    /// Switch to `view`, returning the one it replaces
    pub fn show(&mut self, view: ViewState) -> ViewState {
        debug!("view {} -> {}", self.active, view);
        std::mem::replace(&mut self.active, view)
    }
}
