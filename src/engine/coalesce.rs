// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::time::{Duration, Instant};

use super::history::Snapshot;

/// Debounce window that folds a burst of rapid edits into one history push.
///
/// The first change of a burst captures the pre-burst snapshot and arms the
/// deadline; every further change within the window only re-arms the
/// deadline. Once `poll` observes the deadline passing, the captured
/// snapshot is released exactly once. The coalescer is a plain value with
/// no runtime behind it, so hosts (and tests) drive it with explicit
/// instants and can cancel it at any point in the store's lifecycle.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Coalescer {
    delay: Duration,
    deadline: Option<Instant>,
    pending: Option<Snapshot>,
}

impl Coalescer {
    pub(crate) fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
            pending: None,
        }
    }

    pub(crate) fn note(&mut self, now: Instant, capture: impl FnOnce() -> Snapshot) {
        if self.pending.is_none() {
            self.pending = Some(capture());
        }
        self.deadline = Some(now + self.delay);
    }

    pub(crate) fn poll(&mut self, now: Instant) -> Option<Snapshot> {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                self.pending.take()
            }
            _ => None,
        }
    }

    pub(crate) fn cancel(&mut self) {
        self.deadline = None;
        self.pending = None;
    }

    pub(crate) fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::Coalescer;
    use crate::engine::history::Snapshot;
    use crate::model::fixtures;
    use crate::model::Canvas;

    fn empty_snapshot() -> Snapshot {
        Snapshot::capture(&Canvas::default())
    }

    fn demo_snapshot() -> Snapshot {
        Snapshot::capture(&fixtures::demo_canvas())
    }

    #[test]
    fn burst_releases_the_first_captured_snapshot_once() {
        let mut coalescer = Coalescer::new(Duration::from_millis(200));
        let t0 = Instant::now();

        coalescer.note(t0, demo_snapshot);
        coalescer.note(t0 + Duration::from_millis(50), empty_snapshot);
        coalescer.note(t0 + Duration::from_millis(100), empty_snapshot);

        assert_eq!(coalescer.poll(t0 + Duration::from_millis(250)), None);

        let released = coalescer
            .poll(t0 + Duration::from_millis(300))
            .expect("released snapshot");
        assert_eq!(released, demo_snapshot());

        assert_eq!(coalescer.poll(t0 + Duration::from_millis(600)), None);
    }

    #[test]
    fn repeat_changes_keep_pushing_the_deadline_out() {
        let mut coalescer = Coalescer::new(Duration::from_millis(200));
        let t0 = Instant::now();

        coalescer.note(t0, demo_snapshot);
        assert_eq!(coalescer.poll(t0 + Duration::from_millis(150)), None);

        coalescer.note(t0 + Duration::from_millis(150), empty_snapshot);
        assert_eq!(coalescer.poll(t0 + Duration::from_millis(250)), None);

        assert!(coalescer.poll(t0 + Duration::from_millis(350)).is_some());
    }

    #[test]
    fn cancel_drops_the_pending_snapshot() {
        let mut coalescer = Coalescer::new(Duration::from_millis(200));
        let t0 = Instant::now();

        coalescer.note(t0, demo_snapshot);
        assert!(coalescer.is_armed());
        coalescer.cancel();

        assert!(!coalescer.is_armed());
        assert_eq!(coalescer.poll(t0 + Duration::from_millis(500)), None);
    }
}
