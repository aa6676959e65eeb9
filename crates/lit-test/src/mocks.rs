//! Mock collaborators for driving a `SessionComposer`.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use lit_session::{IssuanceService, Navigator, SessionHandle, SessionRequest, View};

/// How a [`MockIssuer`] answers once its queue is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Fallback {
    /// Create a handle with a fresh id and the request's label.
    Succeed,
    /// Decline.
    Fail,
    /// Never answer.
    Stall,
}

/// Mock implementation of [`IssuanceService`].
///
/// Answers from a queue of canned responses, then from its fallback, and
/// records every request it receives. Clones share state.
#[derive(Debug, Clone)]
pub struct MockIssuer {
    /// Queued responses, consumed front to back.
    responses: Arc<Mutex<VecDeque<Option<SessionHandle>>>>,
    /// Captured requests.
    requests: Arc<Mutex<Vec<SessionRequest>>>,
    fallback: Fallback,
}

impl MockIssuer {
    /// An issuer that creates every session it is asked for.
    #[must_use]
    pub fn new() -> Self {
        Self::with_fallback(Fallback::Succeed)
    }

    /// An issuer that declines every session.
    #[must_use]
    pub fn failing() -> Self {
        Self::with_fallback(Fallback::Fail)
    }

    /// An issuer that never answers, for teardown tests.
    #[must_use]
    pub fn stalled() -> Self {
        Self::with_fallback(Fallback::Stall)
    }

    fn with_fallback(fallback: Fallback) -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
            fallback,
        }
    }

    /// Queue a response.
    #[must_use]
    pub fn with_response(self, response: Option<SessionHandle>) -> Self {
        self.queue_response(response);
        self
    }

    /// Queue a response.
    pub fn queue_response(&self, response: Option<SessionHandle>) {
        if let Ok(mut guard) = self.responses.lock() {
            guard.push_back(response);
        }
    }

    /// Requests received so far.
    #[must_use]
    pub fn requests(&self) -> Vec<SessionRequest> {
        self.requests
            .lock()
            .map(|g| g.clone())
            .unwrap_or_default()
    }

    /// The most recent request.
    #[must_use]
    pub fn last_request(&self) -> Option<SessionRequest> {
        self.requests.lock().ok().and_then(|g| g.last().cloned())
    }

    /// Number of requests received.
    #[must_use]
    pub fn request_count(&self) -> usize {
        self.requests.lock().map(|g| g.len()).unwrap_or_default()
    }
}

impl Default for MockIssuer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IssuanceService for MockIssuer {
    async fn add_session(&self, request: &SessionRequest) -> Option<SessionHandle> {
        if let Ok(mut guard) = self.requests.lock() {
            guard.push(request.clone());
        }

        let queued = self.responses.lock().ok().and_then(|mut g| g.pop_front());
        if let Some(response) = queued {
            return response;
        }

        match self.fallback {
            Fallback::Succeed => Some(SessionHandle::new(
                Uuid::new_v4().to_string(),
                request.label.clone(),
            )),
            Fallback::Fail => None,
            Fallback::Stall => std::future::pending().await,
        }
    }
}

/// [`Navigator`] that records every view it is sent to.
#[derive(Debug, Clone, Default)]
pub struct RecordingNavigator {
    views: Arc<Mutex<Vec<View>>>,
}

impl RecordingNavigator {
    /// Create an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every view navigated to, in order.
    #[must_use]
    pub fn views(&self) -> Vec<View> {
        self.views.lock().map(|g| g.clone()).unwrap_or_default()
    }

    /// The last view navigated to.
    #[must_use]
    pub fn last(&self) -> Option<View> {
        self.views.lock().ok().and_then(|g| g.last().copied())
    }

    /// Forget recorded views.
    pub fn clear(&self) {
        if let Ok(mut guard) = self.views.lock() {
            guard.clear();
        }
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, view: View) {
        if let Ok(mut guard) = self.views.lock() {
            guard.push(view);
        }
    }
}
