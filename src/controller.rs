//! View state controller.
//!
//! Ties the normalizer, the lookup client and the name store together and
//! holds the state a front-end renders: the record on display, whether a
//! lookup is in flight, and the recents list.
//!
//! ```text
//! input ──▶ normalize ──▶ in recents? ──yes──▶ display cached record
//!                              │
//!                              no
//!                              ▼
//!                      Loading ─▶ LookupClient::fetch ─▶ store.upsert
//!                              │                            │
//!                              └──────────▶ Idle ◀──────────┘
//! ```
//!
//! The storage handle and the client are injected at construction. View
//! state is published through a `tokio::sync::watch` channel; the recents
//! list is the store's own subscription. Overlapping submissions are not
//! serialized, so the last one to finish decides what is displayed.

use std::sync::{Arc, Mutex};

use tokio::sync::watch;

use crate::error::LookupError;
use crate::lookup::LookupClient;
use crate::models::NameRecord;
use crate::normalize::normalize;
use crate::store::NameStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadingState {
    Idle,
    Loading,
}

/// Everything a front-end needs to draw the main view.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub displayed: NameRecord,
    pub loading: LoadingState,
    /// Message of the most recent failed submission, cleared on success.
    pub last_error: Option<String>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            displayed: NameRecord::placeholder(),
            loading: LoadingState::Idle,
            last_error: None,
        }
    }
}

/// How a successful submission was satisfied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Served from the recents list without touching the network.
    Cached,
    /// Fetched from the inference services and written to the store.
    Fetched,
}

pub struct ViewController {
    store: Arc<dyn NameStore>,
    client: Arc<dyn LookupClient>,
    country_hint: Option<String>,
    state: watch::Sender<ViewState>,
    recents: watch::Receiver<Vec<NameRecord>>,
    input_name: Mutex<String>,
}

impl ViewController {
    pub fn new(
        store: Arc<dyn NameStore>,
        client: Arc<dyn LookupClient>,
        country_hint: Option<String>,
    ) -> Self {
        let recents = store.subscribe();
        let (state, _rx) = watch::channel(ViewState::default());
        Self {
            store,
            client,
            country_hint,
            state,
            recents,
            input_name: Mutex::new(String::new()),
        }
    }

    /// Observe view state changes.
    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.state.subscribe()
    }

    /// Observe the recents list (the store's ordered contents).
    pub fn subscribe_recents(&self) -> watch::Receiver<Vec<NameRecord>> {
        self.recents.clone()
    }

    pub fn view_state(&self) -> ViewState {
        self.state.borrow().clone()
    }

    pub fn displayed_record(&self) -> NameRecord {
        self.state.borrow().displayed.clone()
    }

    pub fn loading_state(&self) -> LoadingState {
        self.state.borrow().loading
    }

    pub fn recents(&self) -> Vec<NameRecord> {
        self.recents.borrow().clone()
    }

    pub fn input_name(&self) -> String {
        lock(&self.input_name).clone()
    }

    pub fn set_input_name(&self, name: impl Into<String>) {
        *lock(&self.input_name) = name.into();
    }

    /// Look up the current input name.
    ///
    /// A name already in recents is displayed from the cache with no network
    /// call. Otherwise the services are queried and the result is stored.
    /// The loading state is `Idle` again when this returns, whatever the
    /// outcome.
    pub async fn submit(&self) -> Result<Resolution, LookupError> {
        let name = self.normalized_input()?;

        if let Some(cached) = self.cached(&name) {
            tracing::debug!(name = %name, "serving from recents");
            self.state.send_modify(|s| {
                s.displayed = cached;
                s.last_error = None;
            });
            return Ok(Resolution::Cached);
        }

        self.fetch_and_store(&name).await
    }

    /// Like [`submit`](Self::submit) but always queries the services, even
    /// for a cached name, and replaces the stored record.
    pub async fn refresh(&self) -> Result<Resolution, LookupError> {
        let name = self.normalized_input()?;
        self.fetch_and_store(&name).await
    }

    /// Display a record picked from the recents list.
    pub fn select_recent(&self, record: &NameRecord) {
        let record = record.clone();
        self.state.send_modify(|s| s.displayed = record);
    }

    /// Remove `name` (normalized) from the store. Returns whether it existed.
    pub async fn forget(&self, name: &str) -> Result<bool, LookupError> {
        let name = normalize(name);
        if name.is_empty() {
            return Err(LookupError::EmptyName);
        }
        match self.store.get(&name).await? {
            Some(record) => {
                self.store.delete(&record).await?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn normalized_input(&self) -> Result<String, LookupError> {
        let name = normalize(&self.input_name());
        if name.is_empty() {
            return Err(LookupError::EmptyName);
        }
        Ok(name)
    }

    fn cached(&self, name: &str) -> Option<NameRecord> {
        self.recents.borrow().iter().find(|r| r.name == name).cloned()
    }

    async fn fetch_and_store(&self, name: &str) -> Result<Resolution, LookupError> {
        self.state.send_modify(|s| s.loading = LoadingState::Loading);

        let result = self.fetch_inner(name).await;

        self.state.send_modify(|s| {
            s.loading = LoadingState::Idle;
            match &result {
                Ok(_) => s.last_error = None,
                Err(e) => s.last_error = Some(e.to_string()),
            }
        });

        result.map(|_| Resolution::Fetched)
    }

    async fn fetch_inner(&self, name: &str) -> Result<(), LookupError> {
        let record = match self.client.fetch(name, self.country_hint.as_deref()).await {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!(name = %name, error = %e, "lookup failed");
                return Err(e);
            }
        };

        tracing::info!(name = %record.name, age = record.age, "lookup succeeded");
        let displayed = record.clone();
        self.state.send_modify(|s| s.displayed = displayed);

        self.store.upsert(&record).await.map_err(|e| {
            tracing::error!(name = %record.name, error = %e, "failed to cache lookup");
            LookupError::Storage(e)
        })
    }
}

fn lock(m: &Mutex<String>) -> std::sync::MutexGuard<'_, String> {
    m.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
