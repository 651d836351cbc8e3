//! In-memory session that replays scripted frames.

use std::collections::VecDeque;

use crate::domain::scan::{ArPlane, LightingCondition};
use crate::error::{EstimateError, EstimateResult};

use super::session::ArSession;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReplayFrame {
    pub tracking: bool,
    pub planes: Vec<ArPlane>,
    pub lighting: Option<LightingCondition>,
}

impl ReplayFrame {
    pub fn tracking(planes: Vec<ArPlane>) -> Self {
        Self {
            tracking: true,
            planes,
            lighting: None,
        }
    }

    pub fn lost() -> Self {
        Self::default()
    }

    pub fn with_lighting(mut self, lighting: LightingCondition) -> Self {
        self.lighting = Some(lighting);
        self
    }
}

/// Plays frames in order on each `update`, then holds the last one.
#[derive(Debug, Default)]
pub struct ReplaySession {
    pending: VecDeque<ReplayFrame>,
    current: ReplayFrame,
    paused: bool,
    closed: bool,
    pause_count: usize,
}

impl ReplaySession {
    pub fn new(frames: impl IntoIterator<Item = ReplayFrame>) -> Self {
        Self {
            pending: frames.into_iter().collect(),
            paused: true,
            ..Self::default()
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn pause_count(&self) -> usize {
        self.pause_count
    }
}

impl ArSession for ReplaySession {
    fn update(&mut self) -> EstimateResult<()> {
        if self.closed {
            return Err(EstimateError::SessionClosed);
        }
        if self.paused {
            return Err(EstimateError::Session("session is paused".into()));
        }
        if let Some(frame) = self.pending.pop_front() {
            self.current = frame;
        }
        Ok(())
    }

    fn is_tracking(&self) -> bool {
        self.current.tracking
    }

    fn planes(&self) -> Vec<ArPlane> {
        if self.current.tracking {
            self.current.planes.clone()
        } else {
            Vec::new()
        }
    }

    fn light_estimate(&self) -> Option<LightingCondition> {
        self.current.lighting
    }

    fn pause(&mut self) {
        if !self.paused {
            self.paused = true;
            self.pause_count += 1;
        }
    }

    fn resume(&mut self) -> EstimateResult<()> {
        if self.closed {
            return Err(EstimateError::SessionClosed);
        }
        self.paused = false;
        Ok(())
    }

    fn close(&mut self) {
        self.pause();
        self.closed = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::scan::PlaneType;

    #[test]
    fn replays_then_holds_last_frame() {
        let wall = ArPlane::new("w", PlaneType::Vertical, 3.0, 2.5);
        let mut session = ReplaySession::new([ReplayFrame::lost(), ReplayFrame::tracking(vec![wall.clone()])]);

        assert!(session.update().is_err(), "starts paused");
        session.resume().unwrap();

        session.update().unwrap();
        assert!(!session.is_tracking());
        assert!(session.planes().is_empty());

        session.update().unwrap();
        session.update().unwrap();
        assert!(session.is_tracking());
        assert_eq!(session.planes(), vec![wall]);
    }

    #[test]
    fn closed_session_refuses_work() {
        let mut session = ReplaySession::new([]);
        session.resume().unwrap();
        session.close();
        assert!(session.is_closed());
        assert_eq!(session.pause_count(), 1);
        assert_eq!(session.update().unwrap_err(), EstimateError::SessionClosed);
        assert_eq!(session.resume().unwrap_err(), EstimateError::SessionClosed);
    }
}
