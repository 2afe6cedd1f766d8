#[cfg(test)]
#[path = "orchestrator_test.rs"]
mod tests;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use super::format_answer;
use crate::domain::models::DisplaySink;
use crate::domain::models::Event;
use crate::domain::models::RequestEnvelope;
use crate::domain::models::RequestError;
use crate::domain::models::RequestId;
use crate::domain::models::RequestKind;
use crate::domain::models::RequestOutcome;
use crate::domain::models::SharedBackend;

pub const MISSING_BASE_URL_NOTICE: &str = "Vui lòng nhập địa chỉ server.";

/// A transport failure seen after the token fired is the cancellation itself,
/// not a connectivity problem.
pub fn classify(outcome: RequestOutcome, cancel: &CancellationToken) -> RequestOutcome {
    match outcome {
        Err(RequestError::Connectivity(_)) if cancel.is_cancelled() => {
            return Err(RequestError::Cancelled);
        }
        other => return other,
    }
}

async fn run_request(
    backend: SharedBackend,
    base_url: String,
    kind: RequestKind,
    envelope: RequestEnvelope,
    cancel: CancellationToken,
    id: RequestId,
    tx: mpsc::UnboundedSender<Event>,
) {
    let outcome = tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(RequestError::Cancelled),
        res = backend.send(&base_url, kind, &envelope) => classify(res, &cancel),
    };

    if tx.send(Event::RequestFinished(id, outcome)).is_err() {
        tracing::debug!(request_id = id.0, "Event loop closed, dropping request outcome");
    }
}

pub struct InFlightRequest {
    pub id: RequestId,
    pub kind: RequestKind,
    cancel: CancellationToken,
    worker: JoinHandle<()>,
}

#[derive(Default)]
pub struct SessionState {
    last_answer: String,
    in_flight: Option<InFlightRequest>,
    next_id: u64,
}

/// Owns the one request allowed in flight. Every method is called from the
/// event loop, workers only ever report back through `Event::RequestFinished`.
pub struct RequestOrchestrator {
    backend: SharedBackend,
    tx: mpsc::UnboundedSender<Event>,
    state: SessionState,
}

impl RequestOrchestrator {
    pub fn new(backend: SharedBackend, tx: mpsc::UnboundedSender<Event>) -> RequestOrchestrator {
        return RequestOrchestrator {
            backend,
            tx,
            state: SessionState::default(),
        };
    }

    pub fn is_busy(&self) -> bool {
        return self.state.in_flight.is_some();
    }

    /// Most recent successful `ask` answer, empty until there is one.
    pub fn last_answer(&self) -> &str {
        return &self.state.last_answer;
    }

    pub fn ask(
        &mut self,
        sink: &mut dyn DisplaySink,
        question: &str,
        base_url: &str,
    ) -> Result<RequestId, RequestError> {
        return self.submit(sink, RequestKind::Ask, question.trim(), base_url);
    }

    pub fn translate(
        &mut self,
        sink: &mut dyn DisplaySink,
        text: &str,
        base_url: &str,
    ) -> Result<RequestId, RequestError> {
        return self.submit(sink, RequestKind::Translate, text, base_url);
    }

    pub fn summarize(
        &mut self,
        sink: &mut dyn DisplaySink,
        text: &str,
        base_url: &str,
    ) -> Result<RequestId, RequestError> {
        return self.submit(sink, RequestKind::Summary, text, base_url);
    }

    fn reject(
        &self,
        sink: &mut dyn DisplaySink,
        kind: RequestKind,
        err: RequestError,
    ) -> Result<RequestId, RequestError> {
        tracing::debug!(kind = %kind, reason = %err, "Rejected request");
        sink.notify_transient(&err.to_string());

        return Err(err);
    }

    fn submit(
        &mut self,
        sink: &mut dyn DisplaySink,
        kind: RequestKind,
        content: &str,
        base_url: &str,
    ) -> Result<RequestId, RequestError> {
        if content.trim().is_empty() {
            let notice = kind.empty_content_notice().to_string();
            return self.reject(sink, kind, RequestError::Validation(notice));
        }

        let base_url = base_url.trim();
        if base_url.is_empty() {
            let notice = MISSING_BASE_URL_NOTICE.to_string();
            return self.reject(sink, kind, RequestError::Validation(notice));
        }

        if self.is_busy() {
            return self.reject(sink, kind, RequestError::Busy);
        }

        sink.set_text(kind.progress_text());
        sink.set_busy(true);

        let id = RequestId(self.state.next_id);
        self.state.next_id += 1;

        let cancel = CancellationToken::new();
        let worker = tokio::spawn(run_request(
            self.backend.clone(),
            base_url.to_string(),
            kind,
            RequestEnvelope::new(kind, content),
            cancel.clone(),
            id,
            self.tx.clone(),
        ));

        tracing::info!(request_id = id.0, kind = %kind, base_url, "Request started");
        self.state.in_flight = Some(InFlightRequest {
            id,
            kind,
            cancel,
            worker,
        });

        return Ok(id);
    }

    /// Aborts the in-flight request. Returns false, touching nothing, when
    /// idle.
    pub fn cancel(&mut self, sink: &mut dyn DisplaySink) -> bool {
        let request = match self.state.in_flight.take() {
            Some(request) => request,
            None => return false,
        };

        request.cancel.cancel();
        tracing::info!(request_id = request.id.0, kind = %request.kind, "Request cancelled");

        sink.set_text(&RequestError::Cancelled.to_string());
        sink.set_busy(false);

        return true;
    }

    /// Applies a worker outcome. Outcomes of requests that are no longer in
    /// flight are dropped, their display was settled by `cancel`.
    pub fn complete(&mut self, sink: &mut dyn DisplaySink, id: RequestId, outcome: RequestOutcome) {
        let request = match self.state.in_flight.take() {
            Some(request) if request.id == id => request,
            other => {
                self.state.in_flight = other;
                tracing::debug!(request_id = id.0, "Dropping outcome of a stale request");
                return;
            }
        };

        match outcome {
            Ok(envelope) => {
                let answer = envelope.answer();
                let status = envelope.status();
                if request.kind == RequestKind::Ask {
                    self.state.last_answer = answer.clone();
                }

                tracing::info!(request_id = id.0, kind = %request.kind, status = ?status, "Request succeeded");
                sink.set_text(&format_answer(request.kind, &answer, &status));
            }
            Err(err) => {
                tracing::warn!(request_id = id.0, kind = %request.kind, error = %err, "Request failed");
                sink.set_text(&err.to_string());
            }
        }

        sink.set_busy(false);
    }

    /// Probes the server in the background, the report arrives as
    /// `Event::HealthChecked`. Doesn't count as an in-flight request.
    pub fn check_health(&self, base_url: &str) {
        let backend = self.backend.clone();
        let tx = self.tx.clone();
        let base_url = base_url.trim().to_string();

        tokio::spawn(async move {
            let res = backend
                .health_check(&base_url)
                .await
                .map_err(|err| return err.to_string());

            if tx.send(Event::HealthChecked(res)).is_err() {
                tracing::debug!("Event loop closed, dropping health check");
            }
        });
    }

    /// Tears the session down, nothing is reported for an aborted request.
    pub fn shutdown(&mut self) {
        if let Some(request) = self.state.in_flight.take() {
            request.cancel.cancel();
            request.worker.abort();
        }
    }
}
