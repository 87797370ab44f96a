use std::sync::Arc;

use crate::device::{PresentSurface, SurfaceErrorAction};

use super::{FrameJob, FrameOutcome, Renderer, Subscription};

/// What a refresh did.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum RefreshOutcome {
    /// Nothing pending and nothing invalidated.
    Idle,
    /// A job was drawn and presented.
    Presented { generation: u64 },
    /// The surface had no target; the view stays dirty.
    Dropped,
    /// The surface reported an unrecoverable error.
    Fatal,
}

/// The display side of the job channel.
///
/// Keeps the last job it received so a resize or a dropped frame can be
/// redrawn without waiting for the next edit.
pub struct GradientView {
    subscription: Subscription,
    current: Option<Arc<FrameJob>>,
    dirty: bool,
}

impl GradientView {
    pub fn new(renderer: &Renderer) -> Self {
        Self {
            subscription: renderer.subscribe(),
            current: None,
            dirty: false,
        }
    }

    /// Marks the last job for redraw, e.g. after a resize.
    pub fn invalidate(&mut self) {
        self.dirty = true;
    }

    /// Whether a refresh would draw anything.
    pub fn needs_refresh(&self) -> bool {
        self.subscription.has_pending() || (self.dirty && self.current.is_some())
    }

    pub fn current(&self) -> Option<&Arc<FrameJob>> {
        self.current.as_ref()
    }

    pub fn refresh<S>(&mut self, renderer: &mut Renderer, surface: &mut S) -> RefreshOutcome
    where
        S: PresentSurface + ?Sized,
    {
        if let Some(job) = self.subscription.take() {
            self.current = Some(job);
            self.dirty = true;
        }

        if !self.dirty {
            return RefreshOutcome::Idle;
        }
        let Some(job) = self.current.as_ref() else {
            self.dirty = false;
            return RefreshOutcome::Idle;
        };

        match renderer.draw_frame(job, surface) {
            FrameOutcome::Presented => {
                self.dirty = false;
                RefreshOutcome::Presented {
                    generation: job.generation(),
                }
            }
            FrameOutcome::Dropped(SurfaceErrorAction::Fatal) => RefreshOutcome::Fatal,
            FrameOutcome::Dropped(_) => RefreshOutcome::Dropped,
        }
    }
}
