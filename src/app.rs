//! Client-side session state: what the user sees, has saved and is
//! searching for, plus the listings loaded from the backend.

use crate::auth::{AuthError, AuthForm, Role};
use crate::catalog::Catalog;
use crate::messaging::{seed_conversations, Inbox, MessagingError};
use crate::models::{ChatSession, Listing};
use crate::search::{filter_listings, FilterCriteria};
use crate::sources::ListingSource;
use crate::view::{ViewController, ViewState};
use crate::wizard::{ListingSubmission, ListingWizard};
use chrono::{DateTime, Utc};
use std::collections::HashSet;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// Shown when the backend cannot be reached
pub const REMOTE_FAILURE_MESSAGE: &str = "Verbindung zur Datenbank-API fehlgeschlagen.";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("please sign in first")]
    NotLoggedIn,
    #[error("no listing selected")]
    NoListingSelected,
    #[error("unknown listing {0}")]
    UnknownListing(u64),
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Messaging(#[from] MessagingError),
}

/// Outcome of the last backend fetch
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RemoteStatus {
    /// Nothing fetched yet
    #[default]
    Idle,
    Loaded(usize),
    Failed(String),
}

pub struct AppSession {
    view: ViewController,
    criteria: FilterCriteria,
    catalog: Catalog,
    remote: Vec<Listing>,
    remote_status: RemoteStatus,
    logged_in: bool,
    admin: bool,
    saved: HashSet<u64>,
    selected: Option<u64>,
    inbox: Inbox,
}

impl AppSession {
    pub fn new(listings: Vec<Listing>) -> Self {
        Self::with_inbox(listings, Inbox::default())
    }

    pub fn with_inbox(listings: Vec<Listing>, inbox: Inbox) -> Self {
        Self {
            view: ViewController::new(),
            criteria: FilterCriteria::default(),
            catalog: Catalog::new(listings),
            remote: Vec::new(),
            remote_status: RemoteStatus::Idle,
            logged_in: false,
            admin: false,
            saved: HashSet::new(),
            selected: None,
            inbox,
        }
    }

    pub fn view(&self) -> ViewState {
        self.view.current()
    }

    pub fn show(&mut self, view: ViewState) {
        self.view.show(view);
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn criteria_mut(&mut self) -> &mut FilterCriteria {
        &mut self.criteria
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn is_logged_in(&self) -> bool {
        self.logged_in
    }

    pub fn is_admin(&self) -> bool {
        self.admin
    }

    pub fn inbox(&self) -> &Inbox {
        &self.inbox
    }

    /// Listings matching the current search
    pub fn visible_listings(&self) -> Vec<&Listing> {
        filter_listings(self.catalog.as_slice(), &self.criteria)
    }

    /// Fresh search over everything, on the results page
    pub fn reset_search(&mut self) {
        self.criteria.reset();
        self.view.show(ViewState::Listings);
    }

    pub async fn login(&mut self, as_admin: bool) {
        self.logged_in = true;
        self.admin = as_admin;
        self.inbox.replace(seed_conversations(Utc::now())).await;
        self.view.show(if as_admin { ViewState::CreateListing } else { ViewState::Home });
        info!("Signed in{}", if as_admin { " as admin" } else { "" });
    }

    /// Submit the sign-in or registration form. Rejected forms leave the
    /// session unchanged.
    pub async fn authenticate(&mut self, form: &AuthForm, now: DateTime<Utc>) -> Result<Role, SessionError> {
        let role = form.submit(now)?;
        self.login(role == Role::Admin).await;
        Ok(role)
    }

    pub async fn logout(&mut self) {
        self.logged_in = false;
        self.admin = false;
        self.saved.clear();
        self.inbox.replace(Vec::new()).await;
        self.view.show(ViewState::Home);
    }

    /// Add or remove a favourite; returns whether it is saved afterwards
    pub fn toggle_saved(&mut self, id: u64) -> Result<bool, SessionError> {
        if !self.logged_in {
            return Err(SessionError::NotLoggedIn);
        }
        if self.saved.remove(&id) {
            return Ok(false);
        }
        self.saved.insert(id);
        Ok(true)
    }

    pub fn is_saved(&self, id: u64) -> bool {
        self.saved.contains(&id)
    }

    /// Favourites in catalog order
    pub fn saved_listings(&self) -> Vec<&Listing> {
        self.catalog
            .as_slice()
            .iter()
            .filter(|l| self.saved.contains(&l.id))
            .collect()
    }

    pub fn open_details(&mut self, id: u64) -> Result<&Listing, SessionError> {
        if !self.catalog.contains(id) {
            return Err(SessionError::UnknownListing(id));
        }
        self.selected = Some(id);
        self.view.show(ViewState::Details);
        self.catalog.get(id).ok_or(SessionError::UnknownListing(id))
    }

    pub fn selected_listing(&self) -> Option<&Listing> {
        self.selected.and_then(|id| self.catalog.get(id))
    }

    /// Contact the landlord of the selected listing and open the inbox
    pub async fn start_chat(&mut self, text: &str) -> Result<String, SessionError> {
        if !self.logged_in {
            return Err(SessionError::NotLoggedIn);
        }
        let listing = self.selected_listing().ok_or(SessionError::NoListingSelected)?;
        let (partner, title) = (listing.contact_name.clone(), listing.title.clone());

        let chat_id = self.inbox.start_chat(&partner, &title, text).await?;
        self.view.show(ViewState::Messages);
        Ok(chat_id)
    }

    pub async fn send_message(&self, chat_id: &str, text: &str) -> Result<JoinHandle<()>, SessionError> {
        Ok(self.inbox.send_message(chat_id, text).await?)
    }

    pub async fn chats(&self) -> Vec<ChatSession> {
        self.inbox.chats().await
    }

    /// A wizard carrying this session's privileges
    pub fn open_wizard(&mut self) -> ListingWizard {
        self.view.show(ViewState::CreateListing);
        ListingWizard::new(self.admin)
    }

    /// Publishing is simulated: the submission is only logged
    pub fn finish_wizard(&mut self, submission: &ListingSubmission) {
        info!(
            "Listing created (simulated): {} in {}",
            submission.title,
            submission.district.as_deref().unwrap_or("-")
        );
        self.view.show(ViewState::Home);
    }

    /// Leave the wizard without publishing
    pub fn cancel_wizard(&mut self) {
        self.view.show(ViewState::Home);
    }

    /// Load listings from `source`. On failure the remote set stays empty and
    /// the status carries a static message.
    pub async fn load_remote(&mut self, source: &dyn ListingSource) -> &RemoteStatus {
        match source.fetch().await {
            Ok(listings) => {
                info!("Loaded {} listings from {}", listings.len(), source.source_name());
                self.remote = listings;
                self.remote_status = RemoteStatus::Loaded(self.remote.len());
            }
            Err(e) => {
                error!("Failed to load listings from {}: {:#}", source.source_name(), e);
                self.remote.clear();
                self.remote_status = RemoteStatus::Failed(REMOTE_FAILURE_MESSAGE.to_string());
            }
        }
        &self.remote_status
    }

    pub fn remote_status(&self) -> &RemoteStatus {
        &self.remote_status
    }

    /// Listings from the backend, as shown on the database page
    pub fn remote_listings(&self) -> &[Listing] {
        &self.remote
    }

    /// Put the backend listings into the searchable catalog; returns how many were new
    pub fn merge_remote(&mut self) -> usize {
        self.catalog.extend(self.remote.iter().cloned())
    }
}
