//! In-process Pages backend.
//!
//! [`MemoryTransport`] answers every route the way the Pages server does,
//! against accounts and pages held in memory. It lets the adapter and the
//! application driver run end-to-end without a network.

use super::codec::WireFormat;
use super::request::{
    ConnectRequest, Empty, PageCreateRequest, PageDeleteRequest, PageGetRequest,
    PageUpdateRequest, RegisterRequest,
};
use super::route::{AccountRoute, PageRoute, Route};
use super::transport::{StatusCode, Transport, TransportFailure};
use crate::core::{Account, Page, PagesSet, Session};
use async_trait::async_trait;
use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use uuid::Uuid;

#[derive(Default)]
struct Backend {
    accounts: HashMap<String, Account>,
    passwords: HashMap<String, String>,
    tokens: HashMap<String, String>,
    pages: HashMap<String, Page>,
}

/// Transport backed by an in-memory accounts and pages store.
pub struct MemoryTransport {
    format: WireFormat,
    backend: Mutex<Backend>,
}

type Reply = Result<Vec<u8>, TransportFailure>;

impl MemoryTransport {
    pub fn new(format: WireFormat) -> Self {
        Self {
            format,
            backend: Mutex::new(Backend::default()),
        }
    }

    /// Number of pages stored across all accounts.
    pub fn page_count(&self) -> usize {
        self.lock().pages.len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Backend> {
        self.backend.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn decode<T: DeserializeOwned>(&self, payload: &[u8]) -> Result<T, TransportFailure> {
        self.format.decode(payload).map_err(|e| {
            TransportFailure::new(StatusCode::InvalidArgument, format!("malformed request: {e}"))
        })
    }

    fn encode<T: Serialize>(&self, value: &T) -> Reply {
        self.format
            .encode(value)
            .map_err(|e| TransportFailure::new(StatusCode::Internal, e.to_string()))
    }

    fn dispatch(&self, route: Route, payload: &[u8], token: Option<&str>) -> Reply {
        let mut backend = self.lock();
        match route {
            Route::Account(AccountRoute::Register) => {
                let request: RegisterRequest = self.decode(payload)?;
                let session = backend.register(request)?;
                self.encode(&session)
            }
            Route::Account(AccountRoute::Connect) => {
                let request: ConnectRequest = self.decode(payload)?;
                let session = backend.connect(request)?;
                self.encode(&session)
            }
            Route::Page(PageRoute::Create) => {
                let request: PageCreateRequest = self.decode(payload)?;
                let account_id = backend.authorize(token)?;
                let page = backend.create(account_id, request.text);
                self.encode(&page)
            }
            Route::Page(PageRoute::Update) => {
                let request: PageUpdateRequest = self.decode(payload)?;
                let account_id = backend.authorize(token)?;
                let page = backend.update(&account_id, &request.id, request.text)?;
                self.encode(&page)
            }
            Route::Page(PageRoute::Delete) => {
                let request: PageDeleteRequest = self.decode(payload)?;
                let account_id = backend.authorize(token)?;
                let page = backend.delete(&account_id, &request.id)?;
                self.encode(&page)
            }
            Route::Page(PageRoute::Get) => {
                let request: PageGetRequest = self.decode(payload)?;
                let page = backend.page(&request.id)?.clone();
                self.encode(&page)
            }
            Route::Page(PageRoute::List) => {
                let _: Empty = self.decode(payload)?;
                self.encode(&backend.list())
            }
        }
    }
}

impl Default for MemoryTransport {
    fn default() -> Self {
        Self::new(WireFormat::default())
    }
}

#[async_trait]
impl Transport for MemoryTransport {
    async fn call(&self, route: &str, payload: Vec<u8>, token: Option<&str>) -> Reply {
        let Some(route) = Route::from_path(route) else {
            return Err(TransportFailure::new(
                StatusCode::Unimplemented,
                format!("unknown method {route}"),
            ));
        };
        self.dispatch(route, &payload, token)
    }
}

impl Backend {
    fn register(&mut self, request: RegisterRequest) -> Result<Session, TransportFailure> {
        if self.accounts.values().any(|a| a.email == request.email) {
            return Err(TransportFailure::new(
                StatusCode::AlreadyExists,
                "Account already exists",
            ));
        }
        let now = Utc::now();
        let account = Account {
            id: Uuid::new_v4().to_string(),
            name: request.name,
            email: request.email,
            created: now,
            modified: now,
        };
        self.passwords.insert(account.id.clone(), request.password);
        self.accounts.insert(account.id.clone(), account.clone());
        Ok(self.open_session(account))
    }

    fn connect(&mut self, request: ConnectRequest) -> Result<Session, TransportFailure> {
        let account = self
            .accounts
            .values()
            .find(|a| a.email == request.identifier)
            .filter(|a| self.passwords.get(&a.id) == Some(&request.password))
            .cloned()
            .ok_or_else(|| TransportFailure::new(StatusCode::NotFound, "Account not found"))?;
        Ok(self.open_session(account))
    }

    fn open_session(&mut self, account: Account) -> Session {
        let token = Uuid::new_v4().simple().to_string();
        self.tokens.insert(token.clone(), account.id.clone());
        Session {
            token,
            account: Some(account),
        }
    }

    fn authorize(&self, token: Option<&str>) -> Result<String, TransportFailure> {
        let token = token.filter(|t| !t.is_empty()).ok_or_else(|| {
            TransportFailure::new(StatusCode::Unauthenticated, "Access denied: missing token")
        })?;
        self.tokens.get(token).cloned().ok_or_else(|| {
            TransportFailure::new(StatusCode::Unauthenticated, "Access denied: invalid token")
        })
    }

    fn page(&self, id: &str) -> Result<&Page, TransportFailure> {
        self.pages
            .get(id)
            .ok_or_else(|| TransportFailure::new(StatusCode::NotFound, "Page not found"))
    }

    fn owned_page(&mut self, account_id: &str, id: &str) -> Result<&mut Page, TransportFailure> {
        let page = self
            .pages
            .get_mut(id)
            .ok_or_else(|| TransportFailure::new(StatusCode::NotFound, "Page not found"))?;
        if page.account_id != account_id {
            return Err(TransportFailure::new(
                StatusCode::PermissionDenied,
                "Page does not belong to account",
            ));
        }
        Ok(page)
    }

    fn create(&mut self, account_id: String, text: String) -> Page {
        let now = Utc::now();
        let page = Page {
            id: Uuid::new_v4().to_string(),
            account_id,
            text,
            created: now,
            modified: now,
        };
        self.pages.insert(page.id.clone(), page.clone());
        page
    }

    fn update(
        &mut self,
        account_id: &str,
        id: &str,
        text: String,
    ) -> Result<Page, TransportFailure> {
        let page = self.owned_page(account_id, id)?;
        page.text = text;
        page.modified = Utc::now();
        Ok(page.clone())
    }

    fn delete(&mut self, account_id: &str, id: &str) -> Result<Page, TransportFailure> {
        self.owned_page(account_id, id)?;
        self.pages
            .remove(id)
            .ok_or_else(|| TransportFailure::new(StatusCode::NotFound, "Page not found"))
    }

    fn list(&self) -> PagesSet {
        let mut pages: Vec<Page> = self.pages.values().cloned().collect();
        pages.sort_by(|a, b| a.created.cmp(&b.created).then_with(|| a.id.cmp(&b.id)));
        PagesSet {
            total: pages.len() as i64,
            page: 1,
            pages,
        }
    }
}
