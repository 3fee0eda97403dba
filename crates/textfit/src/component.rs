//! The embeddable component: owns the configuration, the generation guard,
//! the throttle, and the committed result, and drives the search engine
//! against a host surface.
//!
//! # Re-entrancy
//! `process` may be started again while a previous search is suspended in a
//! layout pass. The old session keeps polling its already-created futures,
//! but every step checks token currency and becomes a no-op once superseded,
//! so a stale session never commits a size or fires the ready callback.
//! Teardown retires the current generation synchronously, which makes any
//! continuation scheduled before teardown a guaranteed no-op.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, warn};

use crate::config::FitConfig;
use crate::errors::FitError;
use crate::guard::GenerationGuard;
use crate::measure::{Axis, TextSurface};
use crate::search::{self, SearchSession};
use crate::throttle::{Gate, Throttle};

// ────────────────────────────────────────────────────────────────────────────
// Result state
// ────────────────────────────────────────────────────────────────────────────

/// Committed outcome of the most recent completed search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FitResult {
    /// Final font size in pixels, always inside the configured window.
    pub font_size: Option<u32>,
    /// True once a search has completed without being superseded. Hosts can
    /// gate presentation on this to avoid visible intermediate jumps.
    pub ready: bool,
}

type ReadyCallback = Box<dyn Fn(u32) + Send + Sync>;

// ────────────────────────────────────────────────────────────────────────────
// Component
// ────────────────────────────────────────────────────────────────────────────

/// Best-fit font sizing component over a host [`TextSurface`].
///
/// Cheap to clone; clones share one instance. Each instance owns exactly one
/// current generation and one committed [`FitResult`].
pub struct Textfit<S: TextSurface> {
    inner: Arc<Inner<S>>,
}

impl<S: TextSurface> Clone for Textfit<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

struct Inner<S> {
    surface: S,
    config: Mutex<FitConfig>,
    guard: GenerationGuard,
    result: Mutex<FitResult>,
    on_ready: Mutex<Option<ReadyCallback>>,
    throttle: Mutex<Throttle>,
    resize_task: Mutex<Option<JoinHandle<()>>>,
    torn_down: AtomicBool,
}

impl<S> Drop for Inner<S> {
    fn drop(&mut self) {
        self.guard.retire_all();
        if let Some(task) = self.resize_task.lock().take() {
            task.abort();
        }
    }
}

impl<S: TextSurface + 'static> Textfit<S> {
    pub fn new(surface: S, config: FitConfig) -> Self {
        let throttle = Throttle::new(Duration::from_millis(config.throttle_ms));
        Self {
            inner: Arc::new(Inner {
                surface,
                config: Mutex::new(config),
                guard: GenerationGuard::new(),
                result: Mutex::new(FitResult::default()),
                on_ready: Mutex::new(None),
                throttle: Mutex::new(throttle),
                resize_task: Mutex::new(None),
                torn_down: AtomicBool::new(false),
            }),
        }
    }

    /// Registers the callback fired once per completed, non-aborted search
    /// with the final font size.
    pub fn set_on_ready(&self, callback: impl Fn(u32) + Send + Sync + 'static) {
        *self.inner.on_ready.lock() = Some(Box::new(callback));
    }

    /// Runs one full search against the surface.
    ///
    /// Aborts with a logged warning (and no state change) when the container
    /// reports unusable dimensions. Aborts silently when superseded by a
    /// newer search or by teardown. On success commits the size, flips
    /// `ready`, and fires the ready callback.
    pub async fn process(&self) {
        if self.inner.torn_down.load(Ordering::Relaxed) {
            return;
        }
        let config = self.inner.config.lock().clone();

        let (target_width, target_height) = match container_dimensions(&self.inner.surface) {
            Ok(dims) => dims,
            Err(err) => {
                warn!("{err}");
                return;
            }
        };

        self.inner.result.lock().ready = false;
        let token = self.inner.guard.begin_session();
        debug!(
            min = config.min,
            max = config.max,
            mode = ?config.mode,
            "fit search started"
        );

        let mut session =
            SearchSession::new(config.min, config.max, target_width, target_height);
        if search::run(&self.inner.surface, &config, &token, &mut session)
            .await
            .is_err()
        {
            debug!("fit search superseded");
            return;
        }
        if !token.is_current() {
            return;
        }

        let font_size = session.mid as u32;
        {
            let mut result = self.inner.result.lock();
            result.font_size = Some(font_size);
            result.ready = true;
        }
        debug!(font_size, "fit search committed");
        if let Some(on_ready) = self.inner.on_ready.lock().as_ref() {
            on_ready(font_size);
        }
    }

    /// Throttled re-trigger for host resize notifications. Runs the search
    /// immediately when the throttle window is open, otherwise coalesces
    /// into one trailing run at the end of the window.
    pub fn notify_resize(&self) {
        if self.inner.torn_down.load(Ordering::Relaxed) {
            return;
        }
        let gate = self.inner.throttle.lock().check(Instant::now());
        match gate {
            Gate::RunNow => self.spawn_search(),
            Gate::Deferred(deadline) => {
                let this = self.clone();
                tokio::spawn(async move {
                    tokio::time::sleep_until(deadline).await;
                    this.inner.throttle.lock().release(Instant::now());
                    this.process().await;
                });
            }
            Gate::Coalesced => {}
        }
    }

    /// Subscribes to the host's viewport-change notifications. A no-op when
    /// `auto_resize` is off. The listener is detached on teardown.
    pub fn attach_resize(&self, mut notifications: watch::Receiver<()>) {
        if !self.inner.config.lock().auto_resize {
            return;
        }
        let this = self.clone();
        let handle = tokio::spawn(async move {
            while notifications.changed().await.is_ok() {
                this.notify_resize();
            }
        });
        if let Some(previous) = self.inner.resize_task.lock().replace(handle) {
            previous.abort();
        }
    }

    /// Replaces the configuration. Re-runs the search only when the new
    /// configuration differs and a search has completed before.
    pub async fn update_config(&self, config: FitConfig) {
        let changed = {
            let mut current = self.inner.config.lock();
            if *current == config {
                false
            } else {
                *self.inner.throttle.lock() =
                    Throttle::new(Duration::from_millis(config.throttle_ms));
                *current = config;
                true
            }
        };
        if changed && self.inner.result.lock().ready {
            self.process().await;
        }
    }

    /// Permanently invalidates any in-flight search and detaches the resize
    /// listener. Further `process` and `notify_resize` calls are no-ops.
    pub fn teardown(&self) {
        self.inner.torn_down.store(true, Ordering::Relaxed);
        self.inner.guard.retire_all();
        if let Some(task) = self.inner.resize_task.lock().take() {
            task.abort();
        }
        debug!("textfit torn down");
    }

    pub fn font_size(&self) -> Option<u32> {
        self.inner.result.lock().font_size
    }

    pub fn is_ready(&self) -> bool {
        self.inner.result.lock().ready
    }

    pub fn result(&self) -> FitResult {
        *self.inner.result.lock()
    }

    fn spawn_search(&self) {
        let this = self.clone();
        tokio::spawn(async move {
            this.process().await;
        });
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Preconditions
// ────────────────────────────────────────────────────────────────────────────

/// Reads and validates the container's content box. Height is checked first;
/// a zero or NaN dimension means the element is not displayed or has no
/// static size yet.
fn container_dimensions<S: TextSurface>(surface: &S) -> Result<(f32, f32), FitError> {
    let height = surface.content_height();
    if height <= 0.0 || height.is_nan() {
        return Err(FitError::UnusableAxis(Axis::Height));
    }
    let width = surface.content_width();
    if width <= 0.0 || width.is_nan() {
        return Err(FitError::UnusableAxis(Axis::Width));
    }
    Ok((width, height))
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
