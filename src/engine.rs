use crate::anchor::AnchorSource;
use crate::compute::{Geometry, PositionResult, compute_position};
use crate::options::PositionOptions;
use crate::rect::{Rect, Size};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Host services the engine needs while active.
///
/// Implemented by the browser host in `dom` and by fakes in tests, so the
/// lifecycle can be exercised without a browser.
pub trait Environment {
    /// Listener registrations for one active period. Dropping it must detach
    /// every listener synchronously.
    type Subscription;

    /// The visible area the panel must stay inside.
    fn viewport(&self) -> Rect;

    /// Register resize, scroll and dismissal listeners for `anchor`.
    fn subscribe(&mut self, anchor: &AnchorSource) -> Self::Subscription;

    /// Ask for [`PositionEngine::on_frame`] to be called on the next rendering frame.
    ///
    /// Returns `false` when no frame could be scheduled; the next trigger
    /// asks again.
    fn request_frame(&mut self) -> bool;

    /// Withdraw an outstanding frame request.
    fn cancel_frame(&mut self);
}

/// Lifecycle state of the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EngineState {
    #[default]
    Inactive,
    Active,
}

/// Messages delivered by listeners while the engine is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// The window was resized.
    Resize,
    /// The window or a scrollable ancestor scrolled.
    Scroll,
    /// The host observed the anchor moving.
    AnchorMoved,
    /// Pointer or keyboard interaction outside the anchor and the panel.
    Dismiss,
}

/// Everything held only while active.
struct Session<S> {
    anchor: AnchorSource,
    floating: Box<dyn Fn() -> Size>,
    subscription: S,
}

/// Keeps a floating panel positioned against an anchor.
///
/// Created inactive. [`activate`](Self::activate) computes immediately and
/// subscribes to recomputation triggers; [`deactivate`](Self::deactivate)
/// drops every subscription. Listener-driven recomputation is coalesced to
/// one per frame; [`reposition`](Self::reposition) always runs immediately.
pub struct PositionEngine<E: Environment> {
    env: E,
    options: PositionOptions,
    session: Option<Session<E::Subscription>>,
    result: Option<PositionResult>,
    frame_pending: bool,
}

impl<E: Environment> PositionEngine<E> {
    #[must_use]
    pub fn new(env: E) -> Self {
        Self { env, options: PositionOptions::default(), session: None, result: None, frame_pending: false }
    }

    // --- Lifecycle ---

    /// Start positioning against `anchor`.
    ///
    /// A no-op returning the cached result when already active on the same
    /// anchor. Active on a different anchor, the anchor and its
    /// subscription are replaced.
    pub fn activate(
        &mut self,
        anchor: AnchorSource,
        floating: impl Fn() -> Size + 'static,
        options: PositionOptions,
    ) -> Option<PositionResult> {
        if let Some(session) = &self.session {
            if session.anchor.is_same(&anchor) {
                return self.result;
            }
        }
        self.options = options.sanitized();
        let floating: Box<dyn Fn() -> Size> = Box::new(floating);
        self.start_session(anchor, floating);
        tracing::debug!(placement = %self.options.placement, "positioning activated");
        self.recompute()
    }

    /// Stop positioning. Safe to call when already inactive.
    pub fn deactivate(&mut self) {
        let Some(session) = self.session.take() else {
            return;
        };
        if self.frame_pending {
            self.frame_pending = false;
            self.env.cancel_frame();
        }
        drop(session);
        tracing::debug!("positioning deactivated");
    }

    /// Swap the anchor of an active engine and recompute.
    ///
    /// Inactive engines ignore the call; pass the anchor to
    /// [`activate`](Self::activate) instead.
    pub fn set_anchor(&mut self, anchor: AnchorSource) -> Option<PositionResult> {
        let Some(session) = self.session.take() else {
            return self.result;
        };
        if session.anchor.is_same(&anchor) {
            self.session = Some(session);
            return self.result;
        }
        let Session { floating, subscription, .. } = session;
        drop(subscription);
        self.start_session(anchor, floating);
        self.recompute()
    }

    /// Replace the options, recomputing if active.
    pub fn set_options(&mut self, options: PositionOptions) -> Option<PositionResult> {
        self.options = options.sanitized();
        self.reposition()
    }

    fn start_session(&mut self, anchor: AnchorSource, floating: Box<dyn Fn() -> Size>) {
        // The previous subscription must be gone before the next is registered.
        self.session = None;
        let subscription = self.env.subscribe(&anchor);
        self.session = Some(Session { anchor, floating, subscription });
    }

    // --- Recomputation ---

    /// Recompute synchronously and return the result.
    ///
    /// Inactive, this returns the cached result without measuring anything.
    /// `None` only before the first successful computation.
    pub fn reposition(&mut self) -> Option<PositionResult> {
        if self.session.is_none() {
            return self.result;
        }
        self.recompute()
    }

    /// Deliver a listener message.
    ///
    /// Geometry triggers are coalesced: the first one in a frame requests a
    /// frame, the rest are absorbed until [`on_frame`](Self::on_frame) runs.
    pub fn notify(&mut self, trigger: Trigger) {
        if self.session.is_none() {
            return;
        }
        match trigger {
            Trigger::Dismiss => self.deactivate(),
            Trigger::Resize | Trigger::Scroll | Trigger::AnchorMoved => {
                if !self.frame_pending {
                    self.frame_pending = self.env.request_frame();
                    if !self.frame_pending {
                        tracing::debug!(?trigger, "frame request failed; waiting for next trigger");
                    }
                }
            }
        }
    }

    /// Run the coalesced recomputation, if one is pending.
    ///
    /// Returns the new result, or `None` when nothing was pending.
    pub fn on_frame(&mut self) -> Option<PositionResult> {
        if !self.frame_pending {
            return None;
        }
        self.frame_pending = false;
        self.reposition()
    }

    fn recompute(&mut self) -> Option<PositionResult> {
        let Some(session) = &self.session else {
            return self.result;
        };
        let anchor = session.anchor.resolve();
        if anchor.is_degenerate() {
            tracing::debug!("anchor could not be measured; keeping last position");
            return self.result;
        }
        let geometry = Geometry::new(anchor, (session.floating)(), self.env.viewport());
        let result = compute_position(&geometry, &self.options);
        self.result = Some(result);
        self.result
    }

    // --- Queries ---

    #[must_use]
    pub fn state(&self) -> EngineState {
        if self.session.is_some() { EngineState::Active } else { EngineState::Inactive }
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// The last computed result.
    #[must_use]
    pub fn result(&self) -> Option<PositionResult> {
        self.result
    }

    #[must_use]
    pub fn options(&self) -> PositionOptions {
        self.options
    }

    /// The current anchor, while active.
    #[must_use]
    pub fn anchor(&self) -> Option<&AnchorSource> {
        self.session.as_ref().map(|session| &session.anchor)
    }

    #[must_use]
    pub fn environment(&self) -> &E {
        &self.env
    }

    pub fn environment_mut(&mut self) -> &mut E {
        &mut self.env
    }
}
