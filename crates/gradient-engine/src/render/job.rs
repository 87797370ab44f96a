//! Frame jobs and the latest-wins broadcast channel that carries them to
//! display surfaces.
//!
//! Every subscriber owns a single slot. Publishing overwrites each slot, so a
//! surface that refreshes slower than the producer only ever sees the most
//! recent job. Nothing is queued and nothing is cancelled once it is taken.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use crate::gradient::{GradientKind, RotationMatrix};

use super::NormalizedStops;

/// Immutable snapshot of everything one frame needs.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameJob {
    stops: NormalizedStops,
    rotation: RotationMatrix,
    kind: GradientKind,
    generation: u64,
}

impl FrameJob {
    pub fn new(stops: NormalizedStops, rotation: RotationMatrix, kind: GradientKind) -> Self {
        Self {
            stops,
            rotation,
            kind,
            generation: 0,
        }
    }

    #[inline]
    pub fn stops(&self) -> &NormalizedStops {
        &self.stops
    }

    #[inline]
    pub fn rotation(&self) -> RotationMatrix {
        self.rotation
    }

    #[inline]
    pub fn kind(&self) -> GradientKind {
        self.kind
    }

    /// Publish sequence number, starting at 1. Zero for jobs never published.
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

type Slot = Mutex<Option<Arc<FrameJob>>>;

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    // Slots hold plain data; a panic mid-write cannot leave them inconsistent.
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

#[derive(Default)]
struct ChannelInner {
    subscribers: Mutex<Vec<Weak<Slot>>>,
    published: AtomicU64,
}

/// Single-producer, latest-wins broadcast of frame jobs.
///
/// Cloning yields another handle to the same channel.
#[derive(Clone, Default)]
pub struct JobChannel {
    inner: Arc<ChannelInner>,
}

impl JobChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new surface. It receives jobs published from now on.
    pub fn subscribe(&self) -> Subscription {
        let slot: Arc<Slot> = Arc::new(Mutex::new(None));
        lock(&self.inner.subscribers).push(Arc::downgrade(&slot));
        Subscription { slot }
    }

    /// Stamps `job` with the next generation and overwrites every live
    /// subscriber's slot with it. Returns the shared job.
    pub fn publish(&self, mut job: FrameJob) -> Arc<FrameJob> {
        job.generation = self.inner.published.fetch_add(1, Ordering::Relaxed) + 1;
        let job = Arc::new(job);

        let mut subscribers = lock(&self.inner.subscribers);
        subscribers.retain(|weak| match weak.upgrade() {
            Some(slot) => {
                if let Some(stale) = lock(&*slot).replace(Arc::clone(&job)) {
                    log::trace!(
                        "frame job {} superseded by {} before refresh",
                        stale.generation,
                        job.generation
                    );
                }
                true
            }
            None => false,
        });

        job
    }

    /// Number of subscriptions still alive.
    pub fn subscriber_count(&self) -> usize {
        lock(&self.inner.subscribers)
            .iter()
            .filter(|w| w.strong_count() > 0)
            .count()
    }

    /// Total number of jobs published so far.
    pub fn published(&self) -> u64 {
        self.inner.published.load(Ordering::Relaxed)
    }
}

/// One surface's view of a [`JobChannel`]. Dropping it unsubscribes.
pub struct Subscription {
    slot: Arc<Slot>,
}

impl Subscription {
    /// Reads and clears the pending job.
    pub fn take(&self) -> Option<Arc<FrameJob>> {
        lock(&*self.slot).take()
    }

    pub fn has_pending(&self) -> bool {
        lock(&*self.slot).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gradient::{Gradient, GradientStop, Rgba};
    use crate::render::normalize_stops;

    fn job(color: Rgba) -> FrameJob {
        let stops = [GradientStop::new(0.0, color), GradientStop::new(1.0, color)];
        FrameJob::new(
            normalize_stops(&stops).unwrap(),
            RotationMatrix::IDENTITY,
            GradientKind::Linear,
        )
    }

    #[test]
    fn latest_wins_before_refresh() {
        let channel = JobChannel::new();
        let sub = channel.subscribe();

        channel.publish(job(Rgba::WHITE));
        channel.publish(job(Rgba::BLACK));
        let third = channel.publish(job(Rgba::new(1.0, 0.0, 0.0, 1.0)));

        let taken = sub.take().unwrap();
        assert_eq!(taken.generation(), 3);
        assert_eq!(*taken, *third);
        assert!(sub.take().is_none());
    }

    #[test]
    fn take_clears_slot() {
        let channel = JobChannel::new();
        let sub = channel.subscribe();
        assert!(!sub.has_pending());
        channel.publish(job(Rgba::WHITE));
        assert!(sub.has_pending());
        sub.take();
        assert!(!sub.has_pending());
    }

    #[test]
    fn broadcast_reaches_every_subscriber() {
        let channel = JobChannel::new();
        let a = channel.subscribe();
        let b = channel.subscribe();

        channel.publish(job(Rgba::WHITE));

        assert_eq!(a.take().map(|j| j.generation()), Some(1));
        assert_eq!(b.take().map(|j| j.generation()), Some(1));
    }

    #[test]
    fn late_subscriber_misses_earlier_jobs() {
        let channel = JobChannel::new();
        channel.publish(job(Rgba::WHITE));
        let sub = channel.subscribe();
        assert!(sub.take().is_none());
        assert_eq!(channel.published(), 1);
    }

    #[test]
    fn dropped_subscription_is_pruned() {
        let channel = JobChannel::new();
        let keep = channel.subscribe();
        drop(channel.subscribe());
        assert_eq!(channel.subscriber_count(), 1);

        channel.publish(job(Rgba::WHITE));
        assert!(keep.has_pending());
    }

    #[test]
    fn unpublished_job_has_generation_zero() {
        let g = Gradient::default();
        let j = FrameJob::new(
            normalize_stops(&g.stops).unwrap(),
            g.rotation_matrix(),
            g.kind,
        );
        assert_eq!(j.generation(), 0);
    }

    #[test]
    fn channel_is_thread_safe() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<JobChannel>();
        assert_send_sync::<Subscription>();
    }
}
