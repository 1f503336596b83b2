//! Simulated clock, delay and GPIO line for host tests
//!
//! All parts share one microsecond counter. The clock advances it by a
//! fixed step per read so busy-wait loops always make progress; delays
//! advance it by their duration. A line replays a scripted waveform
//! relative to the moment it starts being listened to.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::vec::Vec;

use embedded_hal::delay::DelayNs;
use watchpost_hal::{FlexPin, InputPin, Monotonic, OutputPin};

/// Shared simulated time
#[derive(Clone, Default)]
pub struct SimTime(Rc<Cell<u64>>);

impl SimTime {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> u64 {
        self.0.get()
    }

    pub fn advance(&self, us: u64) {
        self.0.set(self.0.get() + us);
    }
}

/// Monotonic clock over [`SimTime`]
pub struct SimClock {
    time: SimTime,
    step_us: u64,
}

impl SimClock {
    /// Clock that moves 1us forward every time it is read
    pub fn new(time: &SimTime) -> Self {
        Self {
            time: time.clone(),
            step_us: 1,
        }
    }

    /// Clock that only moves when the test advances [`SimTime`]
    pub fn manual(time: &SimTime) -> Self {
        Self {
            time: time.clone(),
            step_us: 0,
        }
    }
}

impl Monotonic for SimClock {
    fn now_us(&self) -> u64 {
        let now = self.time.now();
        self.time.advance(self.step_us);
        now
    }
}

/// Blocking delay that advances [`SimTime`]
pub struct SimDelay {
    time: SimTime,
}

impl SimDelay {
    pub fn new(time: &SimTime) -> Self {
        Self { time: time.clone() }
    }
}

impl DelayNs for SimDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.time.advance(u64::from(ns).div_ceil(1_000));
    }
}

struct LineState {
    time: SimTime,
    /// (duration_us, high) segments, played from `anchor`
    waveform: Vec<(u64, bool)>,
    idle: bool,
    anchor: Option<u64>,
    output: bool,
    driven: bool,
    /// (timestamp, driven level) for every write
    writes: Vec<(u64, bool)>,
    /// Direction changes
    switches: u32,
}

/// Scripted digital line
///
/// Cloning yields another handle to the same line, so a test can keep
/// one while a driver owns the other.
#[derive(Clone)]
pub struct SimLine(Rc<RefCell<LineState>>);

impl SimLine {
    /// Input line that reads low until scripted
    pub fn new(time: &SimTime) -> Self {
        Self(Rc::new(RefCell::new(LineState {
            time: time.clone(),
            waveform: Vec::new(),
            idle: false,
            anchor: None,
            output: false,
            driven: false,
            writes: Vec::new(),
            switches: 0,
        })))
    }

    /// Replace the waveform; it starts on the next read or input switch
    pub fn script(&self, waveform: &[(u64, bool)], idle: bool) {
        let mut s = self.0.borrow_mut();
        s.waveform = waveform.to_vec();
        s.idle = idle;
        s.anchor = None;
    }

    /// Read `level` from now on
    pub fn hold(&self, level: bool) {
        self.script(&[], level);
    }

    pub fn anchor(&self) -> Option<u64> {
        self.0.borrow().anchor
    }

    pub fn writes(&self) -> Vec<(u64, bool)> {
        self.0.borrow().writes.clone()
    }

    /// Number of writes and direction switches
    pub fn mutations(&self) -> usize {
        let s = self.0.borrow();
        s.writes.len() + s.switches as usize
    }

    pub fn is_output(&self) -> bool {
        self.0.borrow().output
    }

    fn drive(&mut self, high: bool) {
        let mut s = self.0.borrow_mut();
        let now = s.time.now();
        s.driven = high;
        s.writes.push((now, high));
    }
}

impl InputPin for SimLine {
    fn is_high(&self) -> bool {
        let mut s = self.0.borrow_mut();
        if s.output {
            return s.driven;
        }
        let now = s.time.now();
        let anchor = *s.anchor.get_or_insert(now);
        let mut elapsed = now - anchor;
        for &(duration, high) in &s.waveform {
            if elapsed < duration {
                return high;
            }
            elapsed -= duration;
        }
        s.idle
    }
}

impl OutputPin for SimLine {
    fn set_high(&mut self) {
        self.drive(true);
    }

    fn set_low(&mut self) {
        self.drive(false);
    }

    fn is_set_high(&self) -> bool {
        self.0.borrow().driven
    }
}

impl FlexPin for SimLine {
    fn set_as_input(&mut self) {
        let mut s = self.0.borrow_mut();
        let now = s.time.now();
        s.output = false;
        s.anchor = Some(now);
        s.switches += 1;
    }

    fn set_as_output(&mut self) {
        let mut s = self.0.borrow_mut();
        s.output = true;
        s.switches += 1;
    }
}
