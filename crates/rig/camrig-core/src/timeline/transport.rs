//! Rewind the director to the start when playback stops.

use crate::timeline::{Director, PlayState};

/// Notices the transition into "stopped".
pub trait StopDetector: std::fmt::Debug + Send + Sync {
    /// Called once per host frame. Returns true on the frame the director
    /// stopped.
    fn poll(&mut self, director: &mut dyn Director) -> bool;
}

/// Compares the play state against the previous frame. Used in the editor,
/// where the host raises no stop notification.
#[derive(Debug, Default, Clone)]
pub struct PollingStopDetector {
    last_state: Option<PlayState>,
}

impl StopDetector for PollingStopDetector {
    fn poll(&mut self, director: &mut dyn Director) -> bool {
        let state = director.state();
        let previous = self.last_state.replace(state);
        previous == Some(PlayState::Playing) && state == PlayState::Paused
    }
}

/// Consumes the director's own stop notification.
#[derive(Debug, Default, Clone)]
pub struct EventStopDetector;

impl StopDetector for EventStopDetector {
    fn poll(&mut self, director: &mut dyn Director) -> bool {
        director.take_stopped()
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum HostEnvironment {
    Editor,
    Runtime,
}

pub fn detector_for(env: HostEnvironment) -> Box<dyn StopDetector> {
    match env {
        HostEnvironment::Editor => Box::new(PollingStopDetector::default()),
        HostEnvironment::Runtime => Box::new(EventStopDetector),
    }
}

#[derive(Debug)]
pub struct AutoRewind {
    /// Off unless the host opts in.
    pub auto_rewind_on_stop: bool,
    detector: Box<dyn StopDetector>,
}

impl AutoRewind {
    pub fn new(env: HostEnvironment) -> Self {
        Self::with_detector(detector_for(env))
    }

    pub fn with_detector(detector: Box<dyn StopDetector>) -> Self {
        Self {
            auto_rewind_on_stop: false,
            detector,
        }
    }

    pub fn enabled(mut self, on: bool) -> Self {
        self.auto_rewind_on_stop = on;
        self
    }

    /// Poll once. On a stop the director is set back to time 0 and
    /// re-evaluated. Returns whether a rewind happened.
    pub fn tick(&mut self, director: &mut dyn Director) -> bool {
        // Polled even when disabled so a later enable does not see a stale
        // transition.
        let stopped = self.detector.poll(director);
        if !stopped || !self.auto_rewind_on_stop {
            return false;
        }
        director.set_time(0.0);
        director.evaluate();
        log::info!("[TimelineTransport] stopped, rewound to 0");
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timeline::{PlayableDirector, TimelineAsset};

    fn director() -> PlayableDirector {
        PlayableDirector::new(TimelineAsset::new("shot", 4.0))
    }

    #[test]
    fn polling_sees_playing_to_paused_once() {
        let mut d = director();
        let mut det = PollingStopDetector::default();
        assert!(!det.poll(&mut d));
        d.play();
        assert!(!det.poll(&mut d));
        d.pause();
        assert!(det.poll(&mut d));
        assert!(!det.poll(&mut d));
    }

    #[test]
    fn event_detector_consumes_notification() {
        let mut d = director();
        let mut det = EventStopDetector;
        d.play();
        d.stop();
        assert!(det.poll(&mut d));
        assert!(!det.poll(&mut d));
    }

    #[test]
    fn disabled_by_default_leaves_time() {
        let mut d = director();
        let mut rewind = AutoRewind::new(HostEnvironment::Runtime);
        assert!(!rewind.auto_rewind_on_stop);
        d.play();
        d.advance(1.5);
        d.stop();
        assert!(!rewind.tick(&mut d));
        assert_eq!(d.time(), 1.5);
        assert_eq!(d.evaluations(), 0);
    }
}
