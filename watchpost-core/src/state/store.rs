//! Mutex-guarded snapshot with per-owner writers
//!
//! Producers never hold the lock across a sensor transaction: they
//! finish the protocol, then take the lock only to copy their result
//! in. Write access is split into one handle per [`FieldOwner`], each
//! handed out once, so two tasks can never write the same field.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::blocking_mutex::Mutex;

use super::SensorReading;

/// Producer that owns a disjoint subset of [`SensorReading`] fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FieldOwner {
    /// `motion`
    Motion,
    /// `distance_cm`
    Ranging,
    /// `temperature_c`, `humidity_pct`
    Climate,
    /// `remote_motion`, `remote_connected`
    Remote,
}

impl FieldOwner {
    const fn bit(self) -> u8 {
        match self {
            FieldOwner::Motion => 1 << 0,
            FieldOwner::Ranging => 1 << 1,
            FieldOwner::Climate => 1 << 2,
            FieldOwner::Remote => 1 << 3,
        }
    }
}

struct Inner {
    reading: SensorReading,
    /// Bitmask of owners whose writer has been handed out
    claimed: u8,
}

/// The shared snapshot
///
/// Const-constructible so it can live in a `static`. The raw mutex is
/// chosen by the caller: a critical-section mutex when producers run
/// on different interrupt priorities.
pub struct SensorStore<M: RawMutex> {
    inner: Mutex<M, RefCell<Inner>>,
}

impl<M: RawMutex> Default for SensorStore<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: RawMutex> SensorStore<M> {
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(Inner {
                reading: SensorReading::new(),
                claimed: 0,
            })),
        }
    }

    /// Copy of the whole snapshot
    pub fn snapshot(&self) -> SensorReading {
        self.inner.lock(|inner| inner.borrow().reading)
    }

    /// Whether the writer for `owner` has already been handed out
    pub fn is_claimed(&self, owner: FieldOwner) -> bool {
        self.inner
            .lock(|inner| inner.borrow().claimed & owner.bit() != 0)
    }

    pub fn motion_writer(&self) -> Option<MotionWriter<'_, M>> {
        self.claim(FieldOwner::Motion)
            .then_some(MotionWriter { store: self })
    }

    pub fn range_writer(&self) -> Option<RangeWriter<'_, M>> {
        self.claim(FieldOwner::Ranging)
            .then_some(RangeWriter { store: self })
    }

    pub fn climate_writer(&self) -> Option<ClimateWriter<'_, M>> {
        self.claim(FieldOwner::Climate)
            .then_some(ClimateWriter { store: self })
    }

    pub fn remote_writer(&self) -> Option<RemoteWriter<'_, M>> {
        self.claim(FieldOwner::Remote)
            .then_some(RemoteWriter { store: self })
    }

    /// Mark `owner` as claimed; false if it already was
    fn claim(&self, owner: FieldOwner) -> bool {
        self.inner.lock(|inner| {
            let mut inner = inner.borrow_mut();
            if inner.claimed & owner.bit() != 0 {
                return false;
            }
            inner.claimed |= owner.bit();
            true
        })
    }

    fn update(&self, f: impl FnOnce(&mut SensorReading)) {
        self.inner.lock(|inner| f(&mut inner.borrow_mut().reading));
    }
}

/// Write access to `motion`
pub struct MotionWriter<'a, M: RawMutex> {
    store: &'a SensorStore<M>,
}

impl<M: RawMutex> MotionWriter<'_, M> {
    pub fn set_motion(&mut self, motion: bool) {
        self.store.update(|r| r.motion = motion);
    }
}

/// Write access to `distance_cm`
pub struct RangeWriter<'a, M: RawMutex> {
    store: &'a SensorStore<M>,
}

impl<M: RawMutex> RangeWriter<'_, M> {
    pub fn set_distance(&mut self, distance_cm: f32) {
        self.store.update(|r| r.distance_cm = distance_cm);
    }
}

/// Write access to `temperature_c` and `humidity_pct`
pub struct ClimateWriter<'a, M: RawMutex> {
    store: &'a SensorStore<M>,
}

impl<M: RawMutex> ClimateWriter<'_, M> {
    /// Both values are written under one lock so readers never see a
    /// temperature from one sample next to humidity from another.
    pub fn set_climate(&mut self, temperature_c: f32, humidity_pct: f32) {
        self.store.update(|r| {
            r.temperature_c = temperature_c;
            r.humidity_pct = humidity_pct;
        });
    }
}

/// Write access to the wireless link fields
pub struct RemoteWriter<'a, M: RawMutex> {
    store: &'a SensorStore<M>,
}

impl<M: RawMutex> RemoteWriter<'_, M> {
    pub fn publish_motion(&mut self, motion: bool) {
        self.store.update(|r| r.remote_motion = motion);
    }

    /// Dropping the link also clears the remote motion flag, since the
    /// last report can no longer be trusted.
    pub fn set_connected(&mut self, connected: bool) {
        self.store.update(|r| {
            r.remote_connected = connected;
            if !connected {
                r.remote_motion = false;
            }
        });
    }
}
