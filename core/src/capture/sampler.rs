//! Fixed-rate sampler and idle segmenter
//!
//! The sampler is driven at the capture rate with snapshots of both input
//! sources and an explicit clock. Each call either buffers one tick per
//! live channel or, once both channels have sat idle past the timeout,
//! trims and finalizes whatever is buffered.

use std::time::{Duration, Instant};

use super::recording::{Recording, StreamKind};
use super::stream::{GamepadStream, KeystrokeStream};
use super::tick::{GamepadTick, KeystrokeTick};
use crate::config::CaptureConfig;
use crate::input::{KeySnapshot, PadSnapshot};

/// Where the segmenter is in its capture cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SamplerPhase {
    /// Nothing buffered; waiting for input.
    Idle,
    /// Ticks buffered; the idle countdown decides when they finalize.
    Recording,
}

/// Arming indicator readout, refreshed faster than the sample rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndicatorState {
    /// No buffered input and nothing held.
    Off,
    /// Input held right now; the countdown is pinned at full.
    Held,
    /// Buffered input draining toward finalization.
    Draining { remaining_ms: u64 },
}

/// Segments sampled input into recordings separated by idle gaps.
///
/// Both channels share one idle clock: the countdown restarts on a change
/// to either device, and expiry finalizes both buffers in the same sample.
/// Each channel still produces its own [`Recording`], and a channel whose
/// buffer trims away to nothing produces none.
pub struct Sampler {
    config: CaptureConfig,
    phase: SamplerPhase,
    keystrokes: KeystrokeStream,
    gamepad: GamepadStream,
    /// Freshest change time seen across both channels.
    last_change: Option<Instant>,
    /// Whether the previous sample saw live input, for the indicator.
    input_active: bool,
}

impl Sampler {
    /// Create a sampler with empty buffers.
    pub fn new(config: CaptureConfig) -> Self {
        Self {
            config,
            phase: SamplerPhase::Idle,
            keystrokes: KeystrokeStream::new(),
            gamepad: GamepadStream::new(),
            last_change: None,
            input_active: false,
        }
    }

    /// Take one sample at `now`.
    ///
    /// Returns the recordings finalized by this sample, usually none.
    /// Ordering within a returned batch is keystroke first, then gamepad.
    pub fn sample(
        &mut self,
        now: Instant,
        keys: &KeySnapshot,
        pad: &PadSnapshot,
    ) -> Vec<Recording> {
        let active = keys.is_active() || (pad.connected && pad.is_active());
        self.input_active = active;

        // Fold the freshest change across both channels. Source clocks only
        // move forward, so a stale snapshot can never rewind the countdown.
        let latest = keys.last_change.max(pad.last_change);
        self.last_change = self.last_change.max(latest);

        let expired = match self.last_change {
            Some(changed) => now.saturating_duration_since(changed) > self.config.idle_timeout(),
            // No input seen yet counts as an already-expired window.
            None => true,
        };

        if !active && expired {
            return self.finalize();
        }

        // One tick per relevant channel. Keyboard is always present; the
        // gamepad channel only buffers while a pad is bound. Idle ticks
        // during short pauses are kept and only trimmed from the tail.
        self.keystrokes
            .append(KeystrokeTick::from_pressed(&keys.keys, keys.modifiers));
        if pad.connected {
            self.gamepad
                .append(GamepadTick::new(pad.x, pad.y, pad.buttons));
        }
        if self.phase == SamplerPhase::Idle {
            tracing::debug!("Capture window opened");
            self.phase = SamplerPhase::Recording;
        }

        Vec::new()
    }

    /// Trim both buffers and finalize whatever survives.
    fn finalize(&mut self) -> Vec<Recording> {
        if self.keystrokes.is_empty() && self.gamepad.is_empty() {
            return Vec::new();
        }

        // Trim before the emptiness check: a buffer of pure idle padding
        // must not become a recording.
        self.keystrokes.remove_trailing_idles();
        self.gamepad.remove_trailing_idles();

        let mut finalized = Vec::new();
        if !self.keystrokes.is_empty() {
            let recording = Recording::new(
                StreamKind::Keystroke,
                self.keystrokes.len(),
                self.keystrokes.encode(),
            );
            tracing::info!(
                "Produced keystroke recording: {} ticks, {} bytes, {} ms",
                recording.tick_count(),
                recording.size_in_bytes(),
                recording.duration_ms()
            );
            finalized.push(recording);
        }
        if !self.gamepad.is_empty() {
            let recording = Recording::new(
                StreamKind::Gamepad,
                self.gamepad.len(),
                self.gamepad.encode(),
            );
            tracing::info!(
                "Produced gamepad recording: {} ticks, {} bytes, {} ms",
                recording.tick_count(),
                recording.size_in_bytes(),
                recording.duration_ms()
            );
            finalized.push(recording);
        }

        if finalized.is_empty() {
            tracing::debug!("Capture window held only idle padding, dropped");
        }

        self.keystrokes.clear();
        self.gamepad.clear();
        self.phase = SamplerPhase::Idle;

        finalized
    }

    /// Current phase.
    pub fn phase(&self) -> SamplerPhase {
        self.phase
    }

    /// Keystroke ticks buffered for the recording in progress.
    pub fn keystroke_ticks_buffered(&self) -> usize {
        self.keystrokes.len()
    }

    /// Gamepad ticks buffered for the recording in progress.
    pub fn gamepad_ticks_buffered(&self) -> usize {
        self.gamepad.len()
    }

    /// Bytes buffered across both channels.
    pub fn buffered_bytes(&self) -> usize {
        self.keystrokes.size_in_bytes() + self.gamepad.size_in_bytes()
    }

    /// Indicator readout at `now`, safe to call between samples.
    pub fn indicator(&self, now: Instant) -> IndicatorState {
        if self.input_active {
            return IndicatorState::Held;
        }
        if self.phase == SamplerPhase::Idle {
            return IndicatorState::Off;
        }
        let remaining = match self.last_change {
            Some(changed) => self
                .config
                .idle_timeout()
                .saturating_sub(now.saturating_duration_since(changed)),
            None => Duration::ZERO,
        };
        IndicatorState::Draining {
            remaining_ms: remaining.as_millis() as u64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smallvec::SmallVec;

    fn cfg() -> CaptureConfig {
        CaptureConfig::default()
    }

    fn keys_held(codes: &[u8], changed: Instant) -> KeySnapshot {
        KeySnapshot {
            keys: SmallVec::from_slice(codes),
            modifiers: 0,
            last_change: Some(changed),
        }
    }

    fn keys_idle(changed: Option<Instant>) -> KeySnapshot {
        KeySnapshot {
            keys: SmallVec::new(),
            modifiers: 0,
            last_change: changed,
        }
    }

    fn pad_missing() -> PadSnapshot {
        PadSnapshot::default()
    }

    const STEP: Duration = Duration::from_millis(33);

    // ============================================================================
    // Segmentation Tests
    // ============================================================================

    #[test]
    fn test_segmentation_scenario() {
        // Key down at t=0, released at t=95 ms, then silence. The window
        // stays open for 2 s of idle padding and finalizes to just the
        // active head of the buffer.
        let mut sampler = Sampler::new(cfg());
        let base = Instant::now();
        let release = base + Duration::from_millis(95);

        for i in 0..70u32 {
            let now = base + STEP * i;
            let snapshot = if now < release {
                keys_held(&[0x1A], base)
            } else {
                keys_idle(Some(release))
            };
            let out = sampler.sample(now, &snapshot, &pad_missing());

            if i == 63 {
                // Still padding: 3 active ticks plus the idle tail
                assert_eq!(sampler.keystroke_ticks_buffered(), 64);
                assert_eq!(sampler.phase(), SamplerPhase::Recording);
            }
            if !out.is_empty() {
                assert_eq!(i, 64);
                assert_eq!(out.len(), 1);
                let rec = &out[0];
                assert_eq!(rec.kind(), StreamKind::Keystroke);
                assert_eq!(rec.tick_count(), 3);
                assert_eq!(rec.size_in_bytes(), 12);
                assert_eq!(rec.duration_ms(), 100);
                assert_eq!(sampler.phase(), SamplerPhase::Idle);
                assert_eq!(sampler.keystroke_ticks_buffered(), 0);
                return;
            }
        }
        panic!("sampler never finalized");
    }

    #[test]
    fn test_idle_session_produces_nothing() {
        let mut sampler = Sampler::new(cfg());
        let base = Instant::now();

        for i in 0..120u32 {
            let out = sampler.sample(base + STEP * i, &keys_idle(None), &pad_missing());
            assert!(out.is_empty());
        }

        assert_eq!(sampler.phase(), SamplerPhase::Idle);
        assert_eq!(sampler.keystroke_ticks_buffered(), 0);
        assert_eq!(sampler.gamepad_ticks_buffered(), 0);
    }

    #[test]
    fn test_idle_padding_only_never_finalizes() {
        // A tap between two samples leaves only idle padding in the buffer;
        // after trimming there is nothing left, so no recording comes out.
        let mut sampler = Sampler::new(cfg());
        let base = Instant::now();
        let tap = base + Duration::from_millis(10);

        for i in 1..=70u32 {
            let out = sampler.sample(base + STEP * i, &keys_idle(Some(tap)), &pad_missing());
            assert!(out.is_empty());
        }

        assert_eq!(sampler.phase(), SamplerPhase::Idle);
        assert_eq!(sampler.keystroke_ticks_buffered(), 0);
    }

    #[test]
    fn test_brief_pause_recorded_inline() {
        // Two bursts separated by a one-second pause stay in one recording,
        // with the pause encoded as interior idle ticks.
        let mut sampler = Sampler::new(cfg());
        let base = Instant::now();
        let at = |ms: u64| base + Duration::from_millis(ms);

        for i in 0..100u32 {
            let t = 33 * u64::from(i);
            let snapshot = match t {
                0..=65 => keys_held(&[0x04], base),
                66..=989 => keys_idle(Some(at(66))),
                990..=1022 => keys_held(&[0x05], at(990)),
                _ => keys_idle(Some(at(1023))),
            };
            let out = sampler.sample(at(t), &snapshot, &pad_missing());
            if !out.is_empty() {
                let ticks = out[0].decode_keystrokes().unwrap();
                assert_eq!(ticks.len(), 31);
                assert_eq!(ticks[0].keys()[0], 0x04);
                assert_eq!(ticks[1].keys()[0], 0x04);
                assert!(ticks[2..30].iter().all(|t| t.is_idle()));
                assert_eq!(ticks[30].keys()[0], 0x05);
                return;
            }
        }
        panic!("sampler never finalized");
    }

    // ============================================================================
    // Dual Channel Tests
    // ============================================================================

    #[test]
    fn test_dual_channel_finalizes_both() {
        let mut sampler = Sampler::new(cfg());
        let base = Instant::now();
        let at = |ms: u64| base + Duration::from_millis(ms);

        for i in 0..80u32 {
            let t = 33 * u64::from(i);
            let keys = if t < 120 {
                keys_held(&[0x04], base)
            } else {
                keys_idle(Some(at(120)))
            };
            let deflected = t < 60;
            let pad = PadSnapshot {
                x: if deflected { 12_000 } else { 0 },
                y: 0,
                buttons: 0,
                connected: true,
                last_change: Some(if deflected { base } else { at(60) }),
            };

            let out = sampler.sample(at(t), &keys, &pad);
            if !out.is_empty() {
                assert_eq!(out.len(), 2);
                assert_eq!(out[0].kind(), StreamKind::Keystroke);
                assert_eq!(out[0].tick_count(), 4);
                assert_eq!(out[1].kind(), StreamKind::Gamepad);
                assert_eq!(out[1].tick_count(), 2);
                assert_eq!(out[1].size_in_bytes(), 12);
                return;
            }
        }
        panic!("sampler never finalized");
    }

    #[test]
    fn test_disconnected_pad_buffers_nothing() {
        let mut sampler = Sampler::new(cfg());
        let base = Instant::now();

        for i in 0..70u32 {
            let now = base + STEP * i;
            let snapshot = if i < 2 {
                keys_held(&[0x04], base)
            } else {
                keys_idle(Some(base + STEP * 2))
            };
            let out = sampler.sample(now, &snapshot, &pad_missing());
            assert_eq!(sampler.gamepad_ticks_buffered(), 0);
            if !out.is_empty() {
                assert_eq!(out.len(), 1);
                assert_eq!(out[0].kind(), StreamKind::Keystroke);
                return;
            }
        }
        panic!("sampler never finalized");
    }

    #[test]
    fn test_gamepad_only_session() {
        // The keyboard channel buffers idle ticks alongside a gamepad
        // session, but they trim away and only the gamepad finalizes.
        let mut sampler = Sampler::new(cfg());
        let base = Instant::now();
        let at = |ms: u64| base + Duration::from_millis(ms);

        for i in 0..80u32 {
            let t = 33 * u64::from(i);
            let pressed = t < 60;
            let pad = PadSnapshot {
                x: 0,
                y: 0,
                buttons: if pressed { 0x0010 } else { 0 },
                connected: true,
                last_change: Some(if pressed { base } else { at(60) }),
            };
            let out = sampler.sample(at(t), &keys_idle(None), &pad);
            if !out.is_empty() {
                assert_eq!(out.len(), 1);
                assert_eq!(out[0].kind(), StreamKind::Gamepad);
                assert_eq!(out[0].tick_count(), 2);
                return;
            }
        }
        panic!("sampler never finalized");
    }

    #[test]
    fn test_modifier_hold_counts_as_activity() {
        let mut sampler = Sampler::new(cfg());
        let base = Instant::now();
        let shift = KeySnapshot {
            keys: SmallVec::new(),
            modifiers: 0b0000_0010,
            last_change: Some(base),
        };

        sampler.sample(base, &shift, &pad_missing());
        assert_eq!(sampler.phase(), SamplerPhase::Recording);
        assert_eq!(sampler.keystroke_ticks_buffered(), 1);

        // Release, then run out the idle window
        for i in 1..=70u32 {
            let out = sampler.sample(base + STEP * i, &keys_idle(Some(base + STEP)), &pad_missing());
            if !out.is_empty() {
                let ticks = out[0].decode_keystrokes().unwrap();
                assert_eq!(ticks.len(), 1);
                assert_eq!(ticks[0].modifiers(), 0b0000_0010);
                return;
            }
        }
        panic!("sampler never finalized");
    }

    // ============================================================================
    // Indicator Tests
    // ============================================================================

    #[test]
    fn test_indicator_states() {
        let mut sampler = Sampler::new(cfg());
        let base = Instant::now();
        assert_eq!(sampler.indicator(base), IndicatorState::Off);

        // Pinned at full while a key is down
        sampler.sample(base, &keys_held(&[0x04], base), &pad_missing());
        assert_eq!(sampler.indicator(base), IndicatorState::Held);

        // Drains once released
        let release = base + STEP;
        sampler.sample(release, &keys_idle(Some(release)), &pad_missing());
        let probe = release + Duration::from_millis(500);
        assert_eq!(
            sampler.indicator(probe),
            IndicatorState::Draining { remaining_ms: 1_500 }
        );

        // Off after the window expires and the buffer finalizes
        let end = release + Duration::from_millis(2_100);
        let out = sampler.sample(end, &keys_idle(Some(release)), &pad_missing());
        assert_eq!(out.len(), 1);
        assert_eq!(sampler.indicator(end), IndicatorState::Off);
    }

    #[test]
    fn test_indicator_floor_at_zero() {
        let mut sampler = Sampler::new(cfg());
        let base = Instant::now();
        sampler.sample(base, &keys_held(&[0x04], base), &pad_missing());
        let release = base + STEP;
        sampler.sample(release, &keys_idle(Some(release)), &pad_missing());

        // Probe past the deadline before the next sample lands
        let probe = release + Duration::from_millis(5_000);
        assert_eq!(
            sampler.indicator(probe),
            IndicatorState::Draining { remaining_ms: 0 }
        );
    }
}
