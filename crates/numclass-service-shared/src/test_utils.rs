//! Test utilities for handler testing.
//!
//! Handlers only reach the network through the fact provider, so these stubs
//! let the full router run without an upstream.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use numclass_lib::{FactProvider, FunFact};

use crate::state::AppState;

/// Upstream label used by [`test_state`].
pub const STUB_UPSTREAM: &str = "stub://facts";

/// Fact provider returning a fixed answer and counting lookups.
#[derive(Debug)]
pub struct StubFactProvider {
    fact: FunFact,
    calls: AtomicUsize,
}

impl StubFactProvider {
    pub fn new(fact: FunFact) -> Self {
        Self {
            fact,
            calls: AtomicUsize::new(0),
        }
    }

    /// Always answers with `text`.
    pub fn found(text: impl Into<String>) -> Self {
        Self::new(FunFact::found(text))
    }

    /// Always answers "no fun fact available".
    pub fn unavailable() -> Self {
        Self::new(FunFact::unavailable())
    }

    /// Always answers as if the upstream were down.
    pub fn unreachable() -> Self {
        Self::new(FunFact::unreachable())
    }

    /// Number of lookups served so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FactProvider for StubFactProvider {
    async fn fetch_fact(&self, _number: i64) -> FunFact {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.fact.clone()
    }
}

/// State wired to `provider`, returned with a handle for inspecting it.
pub fn test_state_with(provider: StubFactProvider) -> (AppState, Arc<StubFactProvider>) {
    let provider = Arc::new(provider);
    let state = AppState::from_shared_provider(provider.clone(), STUB_UPSTREAM);
    (state, provider)
}

/// State whose provider always finds `"test fact"`.
pub fn test_state() -> AppState {
    test_state_with(StubFactProvider::found("test fact")).0
}
