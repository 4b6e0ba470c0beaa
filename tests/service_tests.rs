//! Service adapter tests against scripted and in-process transports.

use async_trait::async_trait;
use pagekit::config::ClientConfig;
use pagekit::core::Page;
use pagekit::error::ServiceError;
use pagekit::service::{
    MemoryTransport, Service, StatusCode, Transport, TransportFailure, WireFormat,
};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Transport that replays canned replies and records every call.
#[derive(Default)]
struct Scripted {
    replies: Mutex<VecDeque<Result<Vec<u8>, TransportFailure>>>,
    calls: Mutex<Vec<(String, Option<String>)>>,
}

impl Scripted {
    fn reply(self, reply: Result<Vec<u8>, TransportFailure>) -> Self {
        self.replies.lock().unwrap().push_back(reply);
        self
    }

    fn calls(&self) -> Vec<(String, Option<String>)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for Scripted {
    async fn call(
        &self,
        route: &str,
        _payload: Vec<u8>,
        token: Option<&str>,
    ) -> Result<Vec<u8>, TransportFailure> {
        self.calls
            .lock()
            .unwrap()
            .push((route.to_string(), token.map(str::to_string)));
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(TransportFailure::new(StatusCode::Internal, "no reply")))
    }
}

fn json_config() -> ClientConfig {
    ClientConfig::builder()
        .wire_format(WireFormat::Json)
        .build()
        .unwrap()
}

#[tokio::test]
async fn delete_permission_denied_is_restricted() {
    let transport = Arc::new(Scripted::default().reply(Err(TransportFailure::new(
        StatusCode::PermissionDenied,
        "Page does not belong to account",
    ))));
    let service = Service::new(Arc::clone(&transport), &json_config());

    let result = service.page_delete("a", Some("t1")).await;

    assert_eq!(
        result,
        Err(ServiceError::Restricted(
            "Page does not belong to account".to_string()
        ))
    );
    assert_eq!(
        transport.calls(),
        vec![("/Pages/PageDelete".to_string(), Some("t1".to_string()))]
    );
}

#[tokio::test]
async fn every_failure_kind_is_normalized() {
    for code in StatusCode::ALL {
        let transport = Scripted::default().reply(Err(TransportFailure::new(code, "boom")));
        let service = Service::new(transport, &json_config());

        let err = service.page_get("a", None).await.unwrap_err();

        let expected = ServiceError::from(TransportFailure::new(code, "boom"));
        assert_eq!(err, expected, "code {code}");
    }
}

#[tokio::test]
async fn one_call_per_operation_without_retry() {
    let transport = Arc::new(
        Scripted::default()
            .reply(Err(TransportFailure::new(StatusCode::Unavailable, "down")))
            .reply(Err(TransportFailure::new(StatusCode::Unavailable, "down"))),
    );
    let service = Service::new(Arc::clone(&transport), &json_config());

    let result = service.page_list(None).await;

    assert_eq!(result, Err(ServiceError::Invalid("down".to_string())));
    assert_eq!(transport.calls().len(), 1);
}

#[tokio::test]
async fn account_and_list_routes_carry_no_token() {
    let transport = Arc::new(Scripted::default());
    let service = Service::new(Arc::clone(&transport), &json_config());

    let _ = service.register("Ada", "ada@example.com", "secret").await;
    let _ = service.connect("ada@example.com", "secret").await;
    let _ = service.page_list(None).await;

    assert_eq!(
        transport.calls(),
        vec![
            ("/Accounts/Register".to_string(), None),
            ("/Accounts/Connect".to_string(), None),
            ("/Pages/PageList".to_string(), None),
        ]
    );
}

#[tokio::test]
async fn wrong_response_shape_is_unknown() {
    let body = WireFormat::Json.encode(&vec![1u8, 2, 3]).unwrap();
    let transport = Scripted::default().reply(Ok(body));
    let service = Service::new(transport, &json_config());

    let result = service.page_create("hi", Some("t1")).await;

    assert!(matches!(result, Err(ServiceError::Unknown(_))));
}

#[tokio::test]
async fn page_lifecycle_against_memory_backend() {
    for format in [WireFormat::Json, WireFormat::Binary] {
        let config = ClientConfig::builder().wire_format(format).build().unwrap();
        let service = Service::new(MemoryTransport::new(format), &config);

        let session = service
            .register("Ada", "ada@example.com", "secret")
            .await
            .unwrap();
        let token = Some(session.token.as_str());
        assert_eq!(
            session.account.as_ref().map(|a| a.email.as_str()),
            Some("ada@example.com")
        );

        let created = service.page_create("first draft", token).await.unwrap();
        let updated = service
            .page_update(&created.id, "second draft", token)
            .await
            .unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.text, "second draft");

        let fetched = service.page_get(&created.id, None).await.unwrap();
        assert_eq!(fetched, updated);

        let listed = service.page_list(None).await.unwrap();
        assert_eq!(listed.total, 1);
        assert_eq!(listed.pages, vec![updated.clone()]);

        let deleted: Page = service.page_delete(&created.id, token).await.unwrap();
        assert_eq!(deleted.id, created.id);

        let missing = service.page_get(&created.id, None).await;
        assert_eq!(missing, Err(ServiceError::Invalid("Page not found".to_string())));
    }
}

#[tokio::test]
async fn memory_backend_rejects_missing_token() {
    let service = Service::new(MemoryTransport::default(), &ClientConfig::default());

    let result = service.page_create("hi", None).await;

    assert_eq!(
        result,
        Err(ServiceError::Restricted(
            "Access denied: missing token".to_string()
        ))
    );
}
