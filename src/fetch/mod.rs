// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Observable fetch state.
//!
//! A [`FetchStateHandle`] runs an async callback and publishes its result as a
//! [`FetchState`] triple (value, loaded, error). Every run gets its own cancellation
//! token; starting a new run cancels the previous one and its result is discarded.
//! A callback that fails with [`DashboardError::NotReadyError`] leaves the state
//! untouched: the data is simply not loaded yet.

pub mod entities;

use crate::error::{DashboardError, Result};
use futures::future::BoxFuture;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, Mutex};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Options handed to each callback invocation
#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// Cancelled once this invocation has been superseded or the handle is dropped
    pub cancel: CancellationToken,
}

pub type FetchCallback<T> =
    Arc<dyn Fn(FetchOptions) -> BoxFuture<'static, Result<T>> + Send + Sync>;

#[derive(Debug, Clone, Default)]
pub struct FetchStateOptions {
    /// Keep the last state when the callback changes instead of resetting to the default
    pub initial_promise_purity: bool,
    /// Re-run the callback on this interval while the handle is alive
    pub refresh_rate: Option<Duration>,
}

#[derive(Debug, Clone)]
pub struct FetchState<T> {
    pub value: T,
    pub loaded: bool,
    pub error: Option<Arc<DashboardError>>,
}

impl<T> FetchState<T> {
    pub fn new(initial: T) -> Self {
        Self {
            value: initial,
            loaded: false,
            error: None,
        }
    }

    pub fn resolve(&mut self, value: T) {
        self.value = value;
        self.loaded = true;
        self.error = None;
    }

    pub fn fail(&mut self, error: DashboardError) {
        self.error = Some(Arc::new(error));
    }
}

struct Inner<T> {
    initial: T,
    options: FetchStateOptions,
    callback: Mutex<FetchCallback<T>>,
    /// Token of the latest run; also guards result writes
    in_flight: Mutex<CancellationToken>,
    state: watch::Sender<FetchState<T>>,
    shutdown: CancellationToken,
}

impl<T> Inner<T>
where
    T: Clone + Send + Sync + 'static,
{
    async fn fetch(&self) -> FetchState<T> {
        let token = self.shutdown.child_token();
        {
            let mut in_flight = self.in_flight.lock().await;
            in_flight.cancel();
            *in_flight = token.clone();
        }
        let callback = self.callback.lock().await.clone();

        let result = tokio::select! {
            biased;
            _ = token.cancelled() => None,
            result = (*callback)(FetchOptions { cancel: token.clone() }) => Some(result),
        };

        let _guard = self.in_flight.lock().await;
        match result {
            Some(result) if !token.is_cancelled() => self.apply(result),
            _ => debug!("Discarding result of superseded fetch"),
        }

        self.state.borrow().clone()
    }

    fn apply(&self, result: Result<T>) {
        match result {
            Ok(value) => self.state.send_modify(|s| s.resolve(value)),
            Err(e) if e.is_not_ready() => debug!("Fetch skipped: {}", e),
            Err(e) => {
                warn!("Fetch failed: {}", e);
                self.state.send_modify(|s| s.fail(e));
            }
        }
    }
}

/// Owner of a fetch state; dropping it cancels any pending or periodic fetch
pub struct FetchStateHandle<T> {
    inner: Arc<Inner<T>>,
}

impl<T> FetchStateHandle<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn new(callback: FetchCallback<T>, initial: T, options: FetchStateOptions) -> Self {
        let (state, _) = watch::channel(FetchState::new(initial.clone()));

        Self {
            inner: Arc::new(Inner {
                initial,
                options,
                callback: Mutex::new(callback),
                in_flight: Mutex::new(CancellationToken::new()),
                state,
                shutdown: CancellationToken::new(),
            }),
        }
    }

    /// Run the first fetch in the background and keep polling if a refresh rate is set
    pub fn start(&self) {
        let inner = self.inner.clone();

        tokio::spawn(async move {
            inner.fetch().await;

            let Some(rate) = inner.options.refresh_rate else {
                return;
            };

            let mut ticker = tokio::time::interval(rate);
            // The first tick completes immediately
            ticker.tick().await;

            loop {
                tokio::select! {
                    _ = inner.shutdown.cancelled() => break,
                    _ = ticker.tick() => {
                        inner.fetch().await;
                    }
                }
            }
        });
    }

    /// Fetch again now, superseding any fetch in flight.
    ///
    /// Returns the state once this fetch is done. If it was itself superseded the state
    /// is returned unchanged.
    pub async fn refresh(&self) -> FetchState<T> {
        self.inner.fetch().await
    }

    /// Replace the callback, as when its inputs change, and fetch again
    pub async fn set_callback(&self, callback: FetchCallback<T>) {
        *self.inner.callback.lock().await = callback;

        {
            let in_flight = self.inner.in_flight.lock().await;
            in_flight.cancel();
            if !self.inner.options.initial_promise_purity {
                self.inner
                    .state
                    .send_replace(FetchState::new(self.inner.initial.clone()));
            }
        }

        let inner = self.inner.clone();
        tokio::spawn(async move {
            inner.fetch().await;
        });
    }

    pub fn state(&self) -> FetchState<T> {
        self.inner.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<FetchState<T>> {
        self.inner.state.subscribe()
    }
}

impl<T> Drop for FetchStateHandle<T> {
    fn drop(&mut self) {
        self.inner.shutdown.cancel();
    }
}

/// Wrap an async closure into a [`FetchCallback`]
pub fn callback<T, F, Fut>(f: F) -> FetchCallback<T>
where
    T: 'static,
    F: Fn(FetchOptions) -> Fut + Send + Sync + 'static,
    Fut: std::future::Future<Output = Result<T>> + Send + 'static,
{
    Arc::new(move |opts| -> BoxFuture<'static, Result<T>> { Box::pin(f(opts)) })
}
