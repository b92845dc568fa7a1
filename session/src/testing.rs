//! In-memory doubles for the transport and navigator seams.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::error::TransportError;
use crate::gateway::{Gateway, Navigator, OutboundRequest, RawResponse, Transport};
use crate::model::{Session, UserProfile, UserRole};
use crate::route::Route;
use crate::store::SessionStore;

/// Replays queued responses in order and records every request it saw.
/// Running out of responses yields a network error.
#[derive(Default)]
pub(crate) struct ScriptedTransport {
    responses: Mutex<VecDeque<Result<RawResponse, TransportError>>>,
    requests: Mutex<Vec<OutboundRequest>>,
}

impl ScriptedTransport {
    pub(crate) fn push(&self, status: u16, body: &str) {
        self.responses.lock().unwrap().push_back(Ok(RawResponse::new(status, body)));
    }

    pub(crate) fn push_error(&self, err: TransportError) {
        self.responses.lock().unwrap().push_back(Err(err));
    }

    pub(crate) fn requests(&self) -> Vec<OutboundRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait(?Send)]
impl Transport for ScriptedTransport {
    async fn send(&self, request: &OutboundRequest) -> Result<RawResponse, TransportError> {
        self.requests.lock().unwrap().push(request.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Network("no scripted response".to_owned())))
    }
}

#[derive(Default)]
pub(crate) struct RecordingNavigator {
    redirects: Mutex<Vec<Route>>,
}

impl RecordingNavigator {
    pub(crate) fn redirects(&self) -> Vec<Route> {
        self.redirects.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn redirect(&self, route: &Route) {
        self.redirects.lock().unwrap().push(route.clone());
    }
}

pub(crate) struct Harness {
    pub(crate) store: SessionStore,
    pub(crate) transport: Arc<ScriptedTransport>,
    pub(crate) navigator: Arc<RecordingNavigator>,
    pub(crate) gateway: Gateway,
}

impl Harness {
    pub(crate) fn new() -> Self {
        Self::with_store(SessionStore::in_memory())
    }

    pub(crate) fn with_store(store: SessionStore) -> Self {
        let transport = Arc::new(ScriptedTransport::default());
        let navigator = Arc::new(RecordingNavigator::default());
        let gateway = Gateway::new(store.clone(), transport.clone(), navigator.clone());
        Self { store, transport, navigator, gateway }
    }
}

pub(crate) fn profile(role: &str) -> UserProfile {
    UserProfile {
        id: "0b7e".to_owned(),
        username: "pat".to_owned(),
        role: UserRole::from(role.to_owned()),
        email: Some("pat@example.com".to_owned()),
        first_name: None,
        last_name: None,
        is_verified: true,
    }
}

pub(crate) fn signed_in(role: &str) -> Session {
    Session::new("tok1", "ref1", profile(role))
}

/// JSON body of a successful login for a user of `role`.
pub(crate) fn login_body(access: &str, role: &str) -> String {
    serde_json::json!({
        "access": access,
        "refresh": format!("ref-{access}"),
        "user": {
            "id": "0b7e",
            "username": "pat",
            "email": "pat@example.com",
            "user_type": role,
            "first_name": "",
            "last_name": "",
            "is_verified": true
        }
    })
    .to_string()
}
