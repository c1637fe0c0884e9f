//! Blade trail from pointer samples

use std::collections::VecDeque;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Trail point for slice testing and rendering
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrailPoint {
    pub pos: Vec2,
    /// Capture time (ms)
    pub t: f64,
}

/// Bounded, time-decaying pointer trail (oldest first)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GestureTracker {
    points: VecDeque<TrailPoint>,
    cap: usize,
    decay_ms: f64,
    held: bool,
}

impl GestureTracker {
    pub fn new(cap: usize, decay_ms: f64) -> Self {
        let cap = cap.max(2);
        Self {
            points: VecDeque::with_capacity(cap + 1),
            cap,
            decay_ms,
            held: false,
        }
    }

    /// Pointer down: start a fresh trail
    pub fn press(&mut self, pos: Vec2, t: f64) {
        self.points.clear();
        self.held = true;
        self.push(pos, t);
    }

    /// Pointer move while held; returns true if the point was recorded
    pub fn drag(&mut self, pos: Vec2, t: f64) -> bool {
        if !self.held {
            return false;
        }
        self.push(pos, t);
        true
    }

    /// Pointer up: stop recording and let the trail fade
    pub fn release(&mut self) {
        self.held = false;
    }

    /// Drop released points older than the decay window
    pub fn decay(&mut self, now: f64) {
        if self.held {
            return;
        }
        let cutoff = now - self.decay_ms;
        self.points.retain(|p| p.t >= cutoff);
    }

    /// Forget everything, including a held pointer
    pub fn clear(&mut self) {
        self.points.clear();
        self.held = false;
    }

    fn push(&mut self, pos: Vec2, t: f64) {
        self.points.push_back(TrailPoint { pos, t });
        while self.points.len() > self.cap {
            self.points.pop_front();
        }
    }

    pub fn is_held(&self) -> bool {
        self.held
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn points(&self) -> impl ExactSizeIterator<Item = &TrailPoint> {
        self.points.iter()
    }

    /// Consecutive point pairs, oldest first
    pub fn segments(&self) -> impl Iterator<Item = (Vec2, Vec2)> + '_ {
        self.points
            .iter()
            .zip(self.points.iter().skip(1))
            .map(|(a, b)| (a.pos, b.pos))
    }

    /// The newest `n` segments, oldest first
    pub fn recent_segments(&self, n: usize) -> impl Iterator<Item = (Vec2, Vec2)> + '_ {
        let total = self.points.len().saturating_sub(1);
        self.segments().skip(total.saturating_sub(n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f32) -> Vec2 {
        Vec2::new(x, 0.0)
    }

    #[test]
    fn test_press_resets_trail() {
        let mut trail = GestureTracker::new(20, 140.0);
        trail.press(p(0.0), 0.0);
        trail.drag(p(1.0), 10.0);
        trail.release();
        trail.press(p(5.0), 20.0);
        assert_eq!(trail.len(), 1);
        assert_eq!(trail.points().next().map(|tp| tp.pos), Some(p(5.0)));
        assert!(trail.is_held());
    }

    #[test]
    fn test_drag_requires_press() {
        let mut trail = GestureTracker::new(20, 140.0);
        assert!(!trail.drag(p(1.0), 0.0));
        assert!(trail.is_empty());
    }

    #[test]
    fn test_cap_drops_oldest() {
        let mut trail = GestureTracker::new(20, 140.0);
        trail.press(p(0.0), 0.0);
        for i in 1..30 {
            trail.drag(p(i as f32), i as f64);
        }
        assert_eq!(trail.len(), 20);
        assert_eq!(trail.points().next().map(|tp| tp.pos), Some(p(10.0)));
        assert_eq!(trail.segments().count(), 19);
    }

    #[test]
    fn test_decay_only_after_release() {
        let mut trail = GestureTracker::new(20, 140.0);
        trail.press(p(0.0), 0.0);
        trail.drag(p(1.0), 100.0);
        trail.drag(p(2.0), 200.0);

        // Held: nothing expires
        trail.decay(1000.0);
        assert_eq!(trail.len(), 3);

        trail.release();
        trail.decay(250.0);
        // Cutoff at 110ms keeps only the 200ms sample
        assert_eq!(trail.len(), 1);
        trail.decay(341.0);
        assert!(trail.is_empty());
    }

    #[test]
    fn test_release_stops_recording() {
        let mut trail = GestureTracker::new(20, 140.0);
        trail.press(p(0.0), 0.0);
        trail.release();
        assert!(!trail.drag(p(1.0), 5.0));
        assert_eq!(trail.len(), 1);
    }

    #[test]
    fn test_recent_segments_window() {
        let mut trail = GestureTracker::new(20, 140.0);
        trail.press(p(0.0), 0.0);
        for i in 1..=10 {
            trail.drag(p(i as f32), i as f64);
        }
        let recent: Vec<_> = trail.recent_segments(8).collect();
        assert_eq!(recent.len(), 8);
        assert_eq!(recent[0], (p(2.0), p(3.0)));
        assert_eq!(recent[7], (p(9.0), p(10.0)));

        // Short trails yield everything they have
        let mut short = GestureTracker::new(20, 140.0);
        short.press(p(0.0), 0.0);
        short.drag(p(1.0), 1.0);
        assert_eq!(short.recent_segments(8).count(), 1);
    }
}
