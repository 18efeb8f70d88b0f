//! Decision wheel state machine
//!
//! A spin adds 4 to 6 full turns (plus a random fraction) to the cumulative
//! rotation, waits for the animation to finish, then reads the option under
//! the fixed pointer at 12 o'clock. Rotation only ever grows, so the wheel
//! always animates forward.

use crate::{core::config::WheelConfig, runtime, Result};
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

#[cfg(feature = "tokio-runtime")]
use std::sync::Arc;

/// One labeled slice of the wheel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurntableOption {
    pub id: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl TurntableOption {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            color: None,
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TurntableState {
    pub is_spinning: bool,
    pub rotation_deg: f64,
    pub result: Option<TurntableOption>,
}

/// Supplies the extra rotation of a spin, in `[min, max)` degrees
pub trait RotationSource: Send {
    fn draw(&mut self, min: f64, max: f64) -> f64;
}

/// Uniform draws from any `rand` generator
#[derive(Debug, Clone)]
pub struct RngSource<R>(pub R);

impl RngSource<StdRng> {
    pub fn from_entropy() -> Self {
        Self(StdRng::from_os_rng())
    }

    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng + Send> RotationSource for RngSource<R> {
    fn draw(&mut self, min: f64, max: f64) -> f64 {
        self.0.random_range(min..max)
    }
}

/// Angular size of one segment, `None` for an empty wheel
pub fn segment_angle(option_count: usize) -> Option<f64> {
    (option_count > 0).then(|| 360.0 / option_count as f64)
}

/// Index of the option under the pointer once the wheel rests at `rotation_deg`.
///
/// The wheel turns clockwise, so the segment under the pointer is the one at
/// `360 - rotation` in wheel coordinates. The result is clamped into range so
/// rounding at exactly 360° cannot produce `option_count`.
pub fn selected_index(rotation_deg: f64, option_count: usize) -> Option<usize> {
    let segment = segment_angle(option_count)?;
    let normalized = (360.0 - rotation_deg.rem_euclid(360.0)).rem_euclid(360.0);
    let index = (normalized / segment).floor();
    let index = if index.is_finite() && index > 0.0 {
        index as usize
    } else {
        0
    };
    Some(index.min(option_count - 1))
}

static NEXT_SPIN_ID: AtomicU64 = AtomicU64::new(1);

/// A spin that has started but not yet settled.
///
/// Consumed by [`Turntable::finish_spin`]; only the wheel that issued it can
/// settle it, and only once.
#[derive(Debug, PartialEq)]
pub struct PendingSpin {
    id: u64,
    final_rotation_deg: f64,
}

impl PendingSpin {
    /// Cumulative rotation the wheel animates to
    pub fn final_rotation_deg(&self) -> f64 {
        self.final_rotation_deg
    }
}

/// Callback invoked with the settled option
pub type ResultCallback = Box<dyn Fn(&TurntableOption) + Send + Sync>;

struct WheelInner {
    state: TurntableState,
    active_spin: Option<u64>,
}

/// Returns the wheel to idle if a spin is dropped before it settles.
/// Rotation and result are left as they are.
struct SpinGuard<'a> {
    wheel: &'a Turntable,
    id: u64,
}

impl Drop for SpinGuard<'_> {
    fn drop(&mut self) {
        let mut inner = self.wheel.lock();
        if inner.active_spin == Some(self.id) {
            inner.active_spin = None;
            inner.state.is_spinning = false;
            log::debug!("spin abandoned before settling");
        }
    }
}

pub struct Turntable {
    options: Vec<TurntableOption>,
    config: WheelConfig,
    inner: Mutex<WheelInner>,
    source: Mutex<Box<dyn RotationSource>>,
    on_result: Option<ResultCallback>,
}

impl std::fmt::Debug for Turntable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Turntable")
            .field("options", &self.options)
            .field("config", &self.config)
            .field("state", &self.lock().state)
            .finish()
    }
}

impl Turntable {
    pub fn new(options: Vec<TurntableOption>, config: WheelConfig) -> Result<Self> {
        Self::with_source(options, config, Box::new(RngSource::from_entropy()))
    }

    pub fn with_source(
        options: Vec<TurntableOption>,
        config: WheelConfig,
        source: Box<dyn RotationSource>,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            options,
            config,
            inner: Mutex::new(WheelInner {
                state: TurntableState::default(),
                active_spin: None,
            }),
            source: Mutex::new(source),
            on_result: None,
        })
    }

    pub fn on_result(mut self, callback: impl Fn(&TurntableOption) + Send + Sync + 'static) -> Self {
        self.on_result = Some(Box::new(callback));
        self
    }

    fn lock(&self) -> MutexGuard<'_, WheelInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn options(&self) -> &[TurntableOption] {
        &self.options
    }

    pub fn segment_angle(&self) -> Option<f64> {
        segment_angle(self.options.len())
    }

    pub fn state(&self) -> TurntableState {
        self.lock().state.clone()
    }

    pub fn is_spinning(&self) -> bool {
        self.lock().state.is_spinning
    }

    pub fn rotation_deg(&self) -> f64 {
        self.lock().state.rotation_deg
    }

    pub fn result(&self) -> Option<TurntableOption> {
        self.lock().state.result.clone()
    }

    /// Start a spin: draw the extra rotation and enter the spinning state.
    ///
    /// Returns `None` when there are no options or a spin is already running.
    pub fn begin_spin(&self) -> Option<PendingSpin> {
        if self.options.is_empty() {
            return None;
        }
        let mut inner = self.lock();
        if inner.state.is_spinning {
            log::debug!("spin ignored, wheel already spinning");
            return None;
        }
        let extra = self
            .source
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .draw(self.config.min_rotation_deg, self.config.max_rotation_deg);
        let id = NEXT_SPIN_ID.fetch_add(1, Ordering::Relaxed);
        inner.active_spin = Some(id);
        inner.state.rotation_deg += extra;
        inner.state.is_spinning = true;
        inner.state.result = None;
        log::debug!("spin started, rotating to {:.1}°", inner.state.rotation_deg);
        Some(PendingSpin {
            id,
            final_rotation_deg: inner.state.rotation_deg,
        })
    }

    /// Settle a spin: pick the option under the pointer, go idle and notify.
    ///
    /// Returns `None` without touching the wheel when `pending` is not the
    /// spin currently running on this wheel.
    pub fn finish_spin(&self, pending: PendingSpin) -> Option<TurntableOption> {
        let option = {
            let mut inner = self.lock();
            if !inner.state.is_spinning || inner.active_spin != Some(pending.id) {
                log::debug!("ignoring settle for a spin this wheel is not running");
                return None;
            }
            let index = selected_index(pending.final_rotation_deg, self.options.len())?;
            let option = self.options.get(index)?.clone();
            inner.active_spin = None;
            inner.state.result = Some(option.clone());
            inner.state.is_spinning = false;
            option
        };
        log::debug!("spin settled on {:?}", option.label);
        if let Some(callback) = &self.on_result {
            callback(&option);
        }
        Some(option)
    }

    /// Full spin: start, wait out the animation, settle.
    ///
    /// Dropping the future before it completes returns the wheel to idle.
    pub async fn spin(&self) -> Option<TurntableOption> {
        let pending = self.begin_spin()?;
        let _guard = SpinGuard {
            wheel: self,
            id: pending.id,
        };
        runtime::delay(self.config.spin_duration()).await;
        self.finish_spin(pending)
    }

    /// Start a spin on the runtime and return immediately; the result is
    /// delivered through the `on_result` callback. Cancelling the handle
    /// returns the wheel to idle.
    #[cfg(feature = "tokio-runtime")]
    pub fn spin_in_background(self: &Arc<Self>) -> Option<Box<dyn runtime::AsyncHandle>> {
        let pending = self.begin_spin()?;
        let wheel = Arc::clone(self);
        Some(runtime::spawn(async move {
            let _guard = SpinGuard {
                wheel: &wheel,
                id: pending.id,
            };
            runtime::delay(wheel.config.spin_duration()).await;
            wheel.finish_spin(pending);
        }))
    }

    /// Zero the rotation and forget the last result; refused while spinning
    pub fn reset(&self) -> bool {
        let mut inner = self.lock();
        if inner.state.is_spinning {
            return false;
        }
        inner.state.rotation_deg = 0.0;
        inner.state.result = None;
        true
    }
}
