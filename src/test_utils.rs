//! Shared doubles for exercising the facades without a real backend.

use std::cell::RefCell;

use serde_json::Value;

use crate::transport::{Transport, TransportError};

/// A recorded request: method, path, and body for the verbs that carry one.
pub type RecordedRequest = (&'static str, String, Option<Value>);

/// A scripted transport double: answers from a fixed queue and records every
/// request it sees.
#[derive(Default)]
pub struct FakeTransport {
    responses: RefCell<Vec<Result<Value, TransportError>>>,
    /// The requests dispatched so far, oldest first.
    pub requests: RefCell<Vec<RecordedRequest>>,
}

impl FakeTransport {
    /// A transport that answers requests with `responses`, in order.
    pub fn with_responses(responses: Vec<Result<Value, TransportError>>) -> Self {
        Self {
            responses: RefCell::new(responses),
            requests: RefCell::new(Vec::new()),
        }
    }

    fn answer(
        &self,
        method: &'static str,
        path: &str,
        body: Option<Value>,
    ) -> Result<Value, TransportError> {
        self.requests.borrow_mut().push((method, path.to_owned(), body));

        let mut responses = self.responses.borrow_mut();
        assert!(!responses.is_empty(), "the transport ran out of scripted responses");
        responses.remove(0)
    }
}

impl Transport for FakeTransport {
    async fn get(&self, path: &str) -> Result<Value, TransportError> {
        self.answer("GET", path, None)
    }

    async fn post(&self, path: &str, body: Value) -> Result<Value, TransportError> {
        self.answer("POST", path, Some(body))
    }

    async fn put(&self, path: &str, body: Value) -> Result<Value, TransportError> {
        self.answer("PUT", path, Some(body))
    }

    async fn delete(&self, path: &str) -> Result<Value, TransportError> {
        self.answer("DELETE", path, None)
    }
}

/// A 404 response for scripting missing-resource cases.
pub fn not_found() -> TransportError {
    TransportError {
        status: Some(404),
        message: "not found".to_owned(),
    }
}
