//! Ground station application shell
//!
//! A small status window owns the capture loop: key events feed the
//! keyboard source, the gamepad is polled, and the sampler runs on a
//! fixed timestep driven from `about_to_wait`. The window title doubles
//! as the arming indicator, refreshed faster than the sample rate.

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use winit::application::ApplicationHandler;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::PhysicalKey;
use winit::window::Window;

#[cfg(feature = "gamepad")]
use stratocast_core::GamepadSource;
use stratocast_core::{IndicatorState, KeyboardSource, Sampler};
#[cfg(not(feature = "gamepad"))]
use stratocast_core::PadSnapshot;

use crate::config::StationConfig;
use crate::history::RecordingHistory;

/// Cap on how far the sampler catches up after a stall.
const MAX_DELTA: Duration = Duration::from_millis(250);

/// Indicator refresh interval, display only.
const INDICATOR_INTERVAL: Duration = Duration::from_millis(1_000 / 60);

struct StationApp {
    window: Option<Arc<Window>>,
    sampler: Sampler,
    keyboard: KeyboardSource,
    #[cfg(feature = "gamepad")]
    gamepad: GamepadSource,
    #[cfg(feature = "gamepad")]
    pad_was_connected: bool,
    history: RecordingHistory,
    sample_interval: Duration,
    last_update: Instant,
    sample_accumulator: Duration,
    indicator_accumulator: Duration,
    last_title: String,
}

impl StationApp {
    fn new(config: StationConfig) -> Self {
        let sample_interval = config.capture.tick_duration();
        #[cfg(feature = "gamepad")]
        let gamepad = GamepadSource::new(&config.capture);
        let history = RecordingHistory::new(&config.export);

        Self {
            window: None,
            sampler: Sampler::new(config.capture),
            keyboard: KeyboardSource::new(),
            #[cfg(feature = "gamepad")]
            gamepad,
            #[cfg(feature = "gamepad")]
            pad_was_connected: false,
            history,
            sample_interval,
            last_update: Instant::now(),
            sample_accumulator: Duration::ZERO,
            indicator_accumulator: Duration::ZERO,
            last_title: String::new(),
        }
    }

    /// Advance the fixed-timestep clocks and run whatever is due.
    fn tick(&mut self) {
        let now = Instant::now();
        let mut delta = now.saturating_duration_since(self.last_update);
        self.last_update = now;
        // A stall (window drag, suspend) must not burst into phantom samples
        if delta > MAX_DELTA {
            delta = MAX_DELTA;
        }
        self.sample_accumulator += delta;
        self.indicator_accumulator += delta;

        while self.sample_accumulator >= self.sample_interval {
            self.sample_accumulator -= self.sample_interval;
            self.run_sample(now);
        }

        if self.indicator_accumulator >= INDICATOR_INTERVAL {
            self.indicator_accumulator = Duration::ZERO;
            self.refresh_indicator(now);
        }
    }

    /// One sampler invocation: poll sources, snapshot, sample.
    fn run_sample(&mut self, now: Instant) {
        #[cfg(feature = "gamepad")]
        let pad = {
            self.gamepad.poll(now);
            let pad = self.gamepad.snapshot();
            if pad.connected && !self.pad_was_connected {
                match self.gamepad.pad_name() {
                    Ok(name) => tracing::info!("Gamepad channel live: {}", name),
                    Err(e) => tracing::warn!("{}", e),
                }
            }
            self.pad_was_connected = pad.connected;
            pad
        };
        #[cfg(not(feature = "gamepad"))]
        let pad = PadSnapshot::default();

        let keys = self.keyboard.snapshot();
        for recording in self.sampler.sample(now, &keys, &pad) {
            self.history.push(recording);
        }
    }

    fn refresh_indicator(&mut self, now: Instant) {
        let Some(window) = &self.window else {
            return;
        };
        let title = match self.sampler.indicator(now) {
            IndicatorState::Off => "Stratocast - idle".to_string(),
            IndicatorState::Held => {
                format!(
                    "Stratocast - capturing, {} B buffered",
                    self.sampler.buffered_bytes()
                )
            }
            IndicatorState::Draining { remaining_ms } => {
                format!(
                    "Stratocast - closing in {:.1} s, {} B buffered",
                    remaining_ms as f64 / 1_000.0,
                    self.sampler.buffered_bytes()
                )
            }
        };
        if title != self.last_title {
            window.set_title(&title);
            self.last_title = title;
        }
    }
}

impl ApplicationHandler for StationApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attributes = Window::default_attributes()
            .with_title("Stratocast - idle")
            .with_inner_size(winit::dpi::LogicalSize::new(480, 160));

        match event_loop.create_window(attributes) {
            Ok(window) => {
                self.window = Some(Arc::new(window));
                self.last_update = Instant::now();
            }
            Err(e) => {
                tracing::error!("Failed to create window: {}", e);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                tracing::info!("Window close requested");
                self.history.summarize();
                event_loop.exit();
            }
            WindowEvent::KeyboardInput {
                event: key_event, ..
            } => {
                if let PhysicalKey::Code(code) = key_event.physical_key {
                    let pressed = key_event.state == ElementState::Pressed;
                    self.keyboard.key_event(code, pressed, Instant::now());
                }
            }
            WindowEvent::Focused(false) => {
                // Releases while unfocused never reach us, drop held keys
                self.keyboard.reset(Instant::now());
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            return;
        }
        self.tick();

        let next = self.last_update + self.sample_interval.min(INDICATOR_INTERVAL);
        event_loop.set_control_flow(ControlFlow::WaitUntil(next));
    }
}

/// Run the ground station until the window closes.
pub fn run(config: StationConfig) -> Result<()> {
    let event_loop = EventLoop::new()?;

    let mut app = StationApp::new(config);
    event_loop.run_app(&mut app)?;

    Ok(())
}
