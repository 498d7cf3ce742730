//! Test doubles shared by the integration tests.
#![allow(dead_code)]

use morse_core::core::types::ActuatorFault;
use morse_core::player::{Actuator, Pacer, PlaybackEvent};
use std::sync::mpsc::{Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Switch {
    On,
    Off,
}

/// Records every successful switch; optionally fails the n-th `turn_on`.
#[derive(Clone, Default)]
pub struct RecordingActuator {
    pub log: Arc<Mutex<Vec<Switch>>>,
    fail_on_call: Option<usize>,
    on_calls: usize,
}

impl RecordingActuator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fails the `n`-th (1-based) call to `turn_on`.
    pub fn failing_on(n: usize) -> Self {
        Self { fail_on_call: Some(n), ..Self::default() }
    }

    pub fn switches(&self) -> Vec<Switch> {
        self.log.lock().unwrap().clone()
    }
}

impl Actuator for RecordingActuator {
    fn turn_on(&mut self) -> Result<(), ActuatorFault> {
        self.on_calls += 1;
        if self.fail_on_call == Some(self.on_calls) {
            return Err(ActuatorFault::new("torch unavailable"));
        }
        self.log.lock().unwrap().push(Switch::On);
        Ok(())
    }

    fn turn_off(&mut self) -> Result<(), ActuatorFault> {
        self.log.lock().unwrap().push(Switch::Off);
        Ok(())
    }
}

/// Returns immediately; playback runs in virtual time.
pub struct InstantPacer;

impl Pacer for InstantPacer {
    fn pause(&self, _duration: Duration) {}
}

/// Reports each pause and blocks it until released. Dropping the release
/// sender lets every later pause through.
pub struct GatePacer {
    pub entered: Mutex<Sender<()>>,
    pub release: Mutex<Receiver<()>>,
}

impl Pacer for GatePacer {
    fn pause(&self, _duration: Duration) {
        let _ = self.entered.lock().unwrap().send(());
        let _ = self.release.lock().unwrap().recv();
    }
}

pub fn count_pulses_on(events: &[PlaybackEvent]) -> usize {
    events.iter().filter(|e| matches!(e, PlaybackEvent::PulseOn { .. })).count()
}

pub fn count_pulses_off(events: &[PlaybackEvent]) -> usize {
    events.iter().filter(|e| matches!(e, PlaybackEvent::PulseOff { .. })).count()
}

pub fn count_terminal(events: &[PlaybackEvent]) -> usize {
    events.iter().filter(|e| e.is_terminal()).count()
}
