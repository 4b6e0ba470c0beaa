//! Typed operations over a [`Transport`].

use super::codec::WireFormat;
use super::request::{
    ConnectRequest, Empty, PageCreateRequest, PageDeleteRequest, PageGetRequest,
    PageUpdateRequest, RegisterRequest,
};
use super::route::Route;
use super::transport::Transport;
use crate::config::ClientConfig;
use crate::core::{Page, PagesSet, Session};
use crate::error::ServiceError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::Instrument;
use uuid::Uuid;

/// Result of a service operation.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Adapter between typed domain calls and the transport.
///
/// Every operation issues exactly one call and resolves exactly once, with
/// either the decoded value or a [`ServiceError`]. The adapter holds no
/// state beyond its transport and endpoint and never retries.
pub struct Service<T: Transport> {
    transport: T,
    endpoint: String,
    format: WireFormat,
}

impl<T: Transport> Service<T> {
    pub fn new(transport: T, config: &ClientConfig) -> Self {
        Self {
            transport,
            endpoint: config.endpoint().to_string(),
            format: config.wire_format(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Create an account and open a session for it.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> ServiceResult<Session> {
        let request = RegisterRequest {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        };
        self.call(Route::REGISTER, &request, None).await
    }

    /// Open a session for an existing account.
    pub async fn connect(&self, identifier: &str, password: &str) -> ServiceResult<Session> {
        let request = ConnectRequest {
            identifier: identifier.to_string(),
            password: password.to_string(),
        };
        self.call(Route::CONNECT, &request, None).await
    }

    pub async fn page_create(&self, text: &str, token: Option<&str>) -> ServiceResult<Page> {
        let request = PageCreateRequest {
            text: text.to_string(),
        };
        self.call(Route::PAGE_CREATE, &request, token).await
    }

    pub async fn page_update(
        &self,
        id: &str,
        text: &str,
        token: Option<&str>,
    ) -> ServiceResult<Page> {
        let request = PageUpdateRequest {
            id: id.to_string(),
            text: text.to_string(),
        };
        self.call(Route::PAGE_UPDATE, &request, token).await
    }

    /// Delete a page; resolves to the page as it was before deletion.
    pub async fn page_delete(&self, id: &str, token: Option<&str>) -> ServiceResult<Page> {
        let request = PageDeleteRequest { id: id.to_string() };
        self.call(Route::PAGE_DELETE, &request, token).await
    }

    pub async fn page_get(&self, id: &str, token: Option<&str>) -> ServiceResult<Page> {
        let request = PageGetRequest { id: id.to_string() };
        self.call(Route::PAGE_GET, &request, token).await
    }

    /// List pages. Authorization, if any, is left to the server.
    pub async fn page_list(&self, token: Option<&str>) -> ServiceResult<PagesSet> {
        self.call(Route::PAGE_LIST, &Empty {}, token).await
    }

    async fn call<Req, Resp>(
        &self,
        route: Route,
        request: &Req,
        token: Option<&str>,
    ) -> ServiceResult<Resp>
    where
        Req: Serialize + Sync,
        Resp: DeserializeOwned,
    {
        let span = tracing::debug_span!(
            "rpc",
            endpoint = %self.endpoint,
            route = %route,
            call_id = %Uuid::new_v4(),
            authenticated = token.is_some(),
        );
        self.dispatch(route, request, token).instrument(span).await
    }

    async fn dispatch<Req, Resp>(
        &self,
        route: Route,
        request: &Req,
        token: Option<&str>,
    ) -> ServiceResult<Resp>
    where
        Req: Serialize + Sync,
        Resp: DeserializeOwned,
    {
        let payload = self
            .format
            .encode(request)
            .map_err(|e| ServiceError::Unknown(format!("failed to encode request: {e}")))?;

        let result = match self.transport.call(&route.to_string(), payload, token).await {
            Ok(bytes) => self
                .format
                .decode(&bytes)
                .map_err(|e| ServiceError::Unknown(format!("failed to decode response: {e}"))),
            Err(failure) => {
                tracing::debug!(code = %failure.code, "transport failure");
                Err(ServiceError::from(failure))
            }
        };

        match &result {
            Ok(_) => tracing::debug!("call completed"),
            Err(err) => tracing::warn!(kind = err.kind(), error = %err, "call failed"),
        }
        result
    }
}
