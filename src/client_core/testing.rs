use crate::client_core::error::BoxError;
use crate::client_core::transport::{HttpRequest, HttpResponse, Transport};
use async_trait::async_trait;
use bytes::Bytes;
use http::StatusCode;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::oneshot;

struct Scripted {
    gate: Option<oneshot::Receiver<()>>,
    outcome: Result<HttpResponse, String>,
}

/// Scripted transport. Answers are handed out in the order requests arrive.
#[derive(Default)]
pub struct FakeTransport {
    script: Mutex<VecDeque<Scripted>>,
    requests: Mutex<Vec<HttpRequest>>,
    calls: AtomicUsize,
}

impl FakeTransport {
    pub fn respond(&self, status: StatusCode, body: &str) {
        self.push(None, Ok(response(status, body)));
    }

    pub fn fail(&self, reason: &str) {
        self.push(None, Err(reason.to_string()));
    }

    /// The answer is held back until the returned sender fires or is dropped.
    pub fn respond_gated(&self, status: StatusCode, body: &str) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.push(Some(rx), Ok(response(status, body)));
        tx
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().clone()
    }

    fn push(&self, gate: Option<oneshot::Receiver<()>>, outcome: Result<HttpResponse, String>) {
        self.script.lock().push_back(Scripted { gate, outcome });
    }
}

fn response(status: StatusCode, body: &str) -> HttpResponse {
    HttpResponse {
        status,
        body: Bytes::copy_from_slice(body.as_bytes()),
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, BoxError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().push(request);

        let scripted = self
            .script
            .lock()
            .pop_front()
            .expect("no scripted response left");

        if let Some(gate) = scripted.gate {
            let _ = gate.await;
        }

        scripted.outcome.map_err(BoxError::from)
    }
}
