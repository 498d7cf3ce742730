//! Timed playback of Morse signal strings.
//!
//! A [`SignalPlayer`] walks a signal string on a background worker and
//! drives an [`Actuator`] (a flashlight, a terminal lamp, anything with an
//! on/off state). A dash lasts three dots; elements are separated by one
//! unit of darkness and a space in the signal holds the light off for three.
//!
//! # States
//!
//! - **Idle**: nothing playing.
//! - **Playing**: a worker owns the actuator.
//! - **Cancelled**: the last playback was stopped before its end.
//!
//! Cancellation is cooperative: the worker checks it once per signal
//! character, never mid-pulse.

use crate::core::types::{ActuatorFault, MorseError, DASH, DOT, SEPARATOR};
use log::{debug, error, info};
use parking_lot::Mutex;
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Unit duration used by the reference app.
pub const DEFAULT_UNIT: Duration = Duration::from_millis(300);

/// Pulse-emitting peripheral.
pub trait Actuator: Send {
    fn turn_on(&mut self) -> Result<(), ActuatorFault>;
    fn turn_off(&mut self) -> Result<(), ActuatorFault>;
}

/// Paces playback. The default implementation sleeps the worker thread.
pub trait Pacer: Send + Sync {
    fn pause(&self, duration: Duration);
}

pub struct SleepPacer;

impl Pacer for SleepPacer {
    fn pause(&self, duration: Duration) {
        thread::sleep(duration);
    }
}

/// Morse timing derived from one unit duration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timing {
    unit: Duration,
}

impl Default for Timing {
    fn default() -> Self {
        Self { unit: DEFAULT_UNIT }
    }
}

impl Timing {
    pub fn new(unit: Duration) -> Self {
        Self { unit }
    }

    /// PARIS timing: one unit = 1.2 / WPM seconds.
    pub fn from_wpm(wpm: u32) -> Self {
        Self::new(Duration::from_micros(1_200_000 / u64::from(wpm.max(1))))
    }

    #[inline]
    pub fn unit(&self) -> Duration {
        self.unit
    }

    #[inline]
    pub fn dot(&self) -> Duration {
        self.unit
    }

    #[inline]
    pub fn dash(&self) -> Duration {
        self.unit * 3
    }

    #[inline]
    pub fn element_gap(&self) -> Duration {
        self.unit
    }

    #[inline]
    pub fn letter_gap(&self) -> Duration {
        self.unit * 3
    }
}

/// What one signal character expands to. `index` is the character's
/// position in the signal string.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    /// Light on for `on`, then off for `off`.
    Pulse { index: usize, on: Duration, off: Duration },
    /// Light stays off.
    Gap { index: usize, duration: Duration },
}

impl Step {
    pub fn index(&self) -> usize {
        match *self {
            Step::Pulse { index, .. } | Step::Gap { index, .. } => index,
        }
    }

    pub fn duration(&self) -> Duration {
        match *self {
            Step::Pulse { on, off, .. } => on + off,
            Step::Gap { duration, .. } => duration,
        }
    }
}

/// Expands a signal string into playback steps. Characters other than
/// dot, dash and space are skipped.
pub fn schedule(signal: &str, timing: Timing) -> Vec<Step> {
    signal
        .chars()
        .enumerate()
        .filter_map(|(index, c)| match c {
            DOT => Some(Step::Pulse { index, on: timing.dot(), off: timing.element_gap() }),
            DASH => Some(Step::Pulse { index, on: timing.dash(), off: timing.element_gap() }),
            SEPARATOR => Some(Step::Gap { index, duration: timing.letter_gap() }),
            _ => None,
        })
        .collect()
}

pub fn total_duration(signal: &str, timing: Timing) -> Duration {
    schedule(signal, timing).iter().map(Step::duration).sum()
}

/// Playback notifications. `at` is the scheduled offset from the start of
/// the playback.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PlaybackEvent {
    PulseOn { index: usize, at: Duration, duration: Duration },
    PulseOff { index: usize, at: Duration, duration: Duration },
    /// `index` is the last signal character fully played.
    Progress { index: usize },
    Completed,
    Cancelled,
    Failed(ActuatorFault),
}

impl PlaybackEvent {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            PlaybackEvent::Completed | PlaybackEvent::Cancelled | PlaybackEvent::Failed(_)
        )
    }
}

/// Receives events on the playback worker thread.
pub trait PlaybackObserver: Send {
    fn on_event(&mut self, event: PlaybackEvent);
}

impl<F> PlaybackObserver for F
where
    F: FnMut(PlaybackEvent) + Send,
{
    fn on_event(&mut self, event: PlaybackEvent) {
        self(event)
    }
}

/// Forwards events to another thread, typically the one owning the UI.
pub struct ChannelObserver(pub Sender<PlaybackEvent>);

impl PlaybackObserver for ChannelObserver {
    fn on_event(&mut self, event: PlaybackEvent) {
        // A dropped receiver just means nobody is watching any more.
        let _ = self.0.send(event);
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayerState {
    Idle,
    Playing,
    Cancelled,
}

struct Control {
    generation: u64,
    state: PlayerState,
    worker: Option<JoinHandle<()>>,
}

impl Control {
    fn is_current(&self, generation: u64) -> bool {
        self.generation == generation && self.state == PlayerState::Playing
    }
}

/// Cancels whatever playback is active on the player it came from.
#[derive(Clone)]
pub struct CancelHandle {
    control: Arc<Mutex<Control>>,
}

impl CancelHandle {
    pub fn cancel(&self) {
        let mut control = self.control.lock();
        if control.state == PlayerState::Playing {
            control.generation += 1;
            control.state = PlayerState::Cancelled;
            debug!("playback cancel requested");
        }
    }
}

/// Cancellable, single-worker Morse playback engine.
pub struct SignalPlayer {
    control: Arc<Mutex<Control>>,
    actuator: Arc<Mutex<Box<dyn Actuator>>>,
    pacer: Arc<dyn Pacer>,
}

impl SignalPlayer {
    pub fn new(actuator: impl Actuator + 'static) -> Self {
        Self::with_pacer(actuator, SleepPacer)
    }

    pub fn with_pacer(actuator: impl Actuator + 'static, pacer: impl Pacer + 'static) -> Self {
        let actuator: Box<dyn Actuator> = Box::new(actuator);
        Self {
            control: Arc::new(Mutex::new(Control {
                generation: 0,
                state: PlayerState::Idle,
                worker: None,
            })),
            actuator: Arc::new(Mutex::new(actuator)),
            pacer: Arc::new(pacer),
        }
    }

    pub fn state(&self) -> PlayerState {
        self.control.lock().state
    }

    pub fn is_playing(&self) -> bool {
        self.state() == PlayerState::Playing
    }

    pub fn cancel_handle(&self) -> CancelHandle {
        CancelHandle { control: Arc::clone(&self.control) }
    }

    /// Stops the active playback at its next character boundary.
    pub fn cancel(&self) {
        self.cancel_handle().cancel();
    }

    /// Starts playing `signal` on a background worker and returns at once.
    /// A playback already in progress is preempted; its worker turns the
    /// actuator off and reports `Cancelled` before the new one starts.
    pub fn play<O>(&self, signal: &str, timing: Timing, observer: O) -> Result<(), MorseError>
    where
        O: PlaybackObserver + 'static,
    {
        let mut control = self.control.lock();
        if control.state == PlayerState::Playing {
            debug!("preempting playback generation {}", control.generation);
        }
        control.generation += 1;
        control.state = PlayerState::Playing;
        let generation = control.generation;
        let previous = control.worker.take();

        let worker = Worker {
            generation,
            steps: schedule(signal, timing),
            control: Arc::clone(&self.control),
            actuator: Arc::clone(&self.actuator),
            pacer: Arc::clone(&self.pacer),
        };
        info!(
            "playback {} started: {} characters, unit {:?}",
            generation,
            signal.chars().count(),
            timing.unit()
        );

        let spawned = thread::Builder::new()
            .name("morse-playback".into())
            .spawn(move || {
                if let Some(previous) = previous {
                    let _ = previous.join();
                }
                worker.run(observer);
            });

        match spawned {
            Ok(handle) => {
                control.worker = Some(handle);
                Ok(())
            }
            Err(e) => {
                control.state = PlayerState::Idle;
                Err(e.into())
            }
        }
    }

    /// Blocks until the current playback, and any it preempted, has ended.
    pub fn wait(&self) {
        let handle = self.control.lock().worker.take();
        if let Some(handle) = handle {
            let _ = handle.join();
        }
    }
}

impl Drop for SignalPlayer {
    fn drop(&mut self) {
        self.cancel();
    }
}

struct Worker {
    generation: u64,
    steps: Vec<Step>,
    control: Arc<Mutex<Control>>,
    actuator: Arc<Mutex<Box<dyn Actuator>>>,
    pacer: Arc<dyn Pacer>,
}

impl Worker {
    fn is_current(&self) -> bool {
        self.control.lock().is_current(self.generation)
    }

    /// Returns the player to Idle if this worker is still the current one.
    /// False means the playback was cancelled or preempted meanwhile.
    fn finish(&self) -> bool {
        let mut control = self.control.lock();
        if control.is_current(self.generation) {
            control.state = PlayerState::Idle;
            true
        } else {
            false
        }
    }

    fn cancelled<O: PlaybackObserver>(&self, actuator: &mut Box<dyn Actuator>, observer: &mut O) {
        if let Err(fault) = actuator.turn_off() {
            error!("could not turn actuator off after cancel: {}", fault);
        }
        info!("playback {} cancelled", self.generation);
        observer.on_event(PlaybackEvent::Cancelled);
    }

    fn run<O: PlaybackObserver>(self, mut observer: O) {
        let mut actuator = self.actuator.lock();
        let mut at = Duration::ZERO;

        for step in &self.steps {
            if !self.is_current() {
                self.cancelled(&mut actuator, &mut observer);
                return;
            }

            match *step {
                Step::Pulse { index, on, off } => {
                    if let Err(fault) = actuator.turn_on() {
                        error!("playback {} aborted: {}", self.generation, fault);
                        let _ = actuator.turn_off();
                        self.finish();
                        observer.on_event(PlaybackEvent::Failed(fault));
                        return;
                    }
                    observer.on_event(PlaybackEvent::PulseOn { index, at, duration: on });
                    self.pacer.pause(on);
                    at += on;

                    if let Err(fault) = actuator.turn_off() {
                        error!("playback {} aborted: {}", self.generation, fault);
                        self.finish();
                        observer.on_event(PlaybackEvent::Failed(fault));
                        return;
                    }
                    observer.on_event(PlaybackEvent::PulseOff { index, at, duration: off });
                    self.pacer.pause(off);
                    at += off;
                }
                Step::Gap { index, duration } => {
                    observer.on_event(PlaybackEvent::PulseOff { index, at, duration });
                    self.pacer.pause(duration);
                    at += duration;
                }
            }
            observer.on_event(PlaybackEvent::Progress { index: step.index() });
        }

        // A cancel that landed during the last unit still wins.
        if !self.finish() {
            self.cancelled(&mut actuator, &mut observer);
            return;
        }
        info!("playback {} completed in {:?}", self.generation, at);
        observer.on_event(PlaybackEvent::Completed);
    }
}
