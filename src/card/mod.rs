//! Headless solar view card
//!
//! [`SolarViewCard`] is the host-facing shell around the renderer and the
//! view controller. The host owns the event loop: it calls [`SolarViewCard::on_mount`]
//! once, [`SolarViewCard::on_tick`] every [`TICK_INTERVAL_SECS`] while mounted,
//! forwards button presses as [`NavAction`]s and pointer events as drags, and
//! delivers at most one [`GeolocationOutcome`]. Every state change that needs
//! repainting hands back a fresh [`CardView`].

pub mod config;

pub use config::CardConfig;

use crate::projection::Hemisphere;
use crate::scene::{self, svg};
use crate::time::{TimeStep, Timestamp};
use crate::viewport::{ViewBox, ViewController, ZoomPolicy};
use crate::SolarViewError;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Seconds between host ticks
pub const TICK_INTERVAL_SECS: u64 = 60;

/// Source of the current instant
pub trait Clock {
    fn now(&self) -> Timestamp;
}

/// Wall clock in the system's local offset
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }
}

/// Result of the host's one-shot position lookup
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GeolocationOutcome {
    Detected { latitude: f64 },
    Unavailable,
}

/// Navigation and zoom controls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavAction {
    MonthBack,
    DayBack,
    HourBack,
    Today,
    HourForward,
    DayForward,
    MonthForward,
    ZoomOut,
    ZoomIn,
}

impl NavAction {
    /// Controls in on-screen order
    pub const ALL: [NavAction; 9] = [
        NavAction::MonthBack,
        NavAction::DayBack,
        NavAction::HourBack,
        NavAction::Today,
        NavAction::HourForward,
        NavAction::DayForward,
        NavAction::MonthForward,
        NavAction::ZoomOut,
        NavAction::ZoomIn,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            NavAction::MonthBack => "month-back",
            NavAction::DayBack => "day-back",
            NavAction::HourBack => "hour-back",
            NavAction::Today => "today",
            NavAction::HourForward => "hour-forward",
            NavAction::DayForward => "day-forward",
            NavAction::MonthForward => "month-forward",
            NavAction::ZoomOut => "zoom-out",
            NavAction::ZoomIn => "zoom-in",
        }
    }

    /// The time step this control applies, if it is a time step
    pub fn time_step(&self) -> Option<TimeStep> {
        match self {
            NavAction::MonthBack => Some(TimeStep::MonthBack),
            NavAction::DayBack => Some(TimeStep::DayBack),
            NavAction::HourBack => Some(TimeStep::HourBack),
            NavAction::HourForward => Some(TimeStep::HourForward),
            NavAction::DayForward => Some(TimeStep::DayForward),
            NavAction::MonthForward => Some(TimeStep::MonthForward),
            NavAction::Today | NavAction::ZoomOut | NavAction::ZoomIn => None,
        }
    }
}

impl fmt::Display for NavAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NavAction {
    type Err = SolarViewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NavAction::ALL
            .iter()
            .copied()
            .find(|action| action.as_str() == s)
            .ok_or_else(|| SolarViewError::Config(format!("unknown action '{}'", s)))
    }
}

/// Everything the host needs to paint the card
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardView {
    pub svg: String,
    pub view_box: ViewBox,
    /// `YY-MM-DD HH:MM`
    pub readout: String,
    pub zoom_level: Option<u8>,
    pub hemisphere: Hemisphere,
}

/// Registration metadata advertised to the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CardRegistration {
    #[serde(rename = "type")]
    pub card_type: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

pub const REGISTRATION: CardRegistration = CardRegistration {
    card_type: "ha-solar-view-card",
    name: "Solar View Card",
    description: "Planetary solar system visualization card",
};

/// Layout height in host grid rows
pub fn card_size() -> u8 {
    6
}

/// Configuration offered when the card is first added
pub fn stub_config() -> CardConfig {
    CardConfig::with_default_zoom(2)
}

pub struct SolarViewCard<C: Clock = SystemClock> {
    clock: C,
    config: CardConfig,
    hemisphere: Hemisphere,
    controller: ViewController,
    mounted: bool,
    geolocation_pending: bool,
}

impl SolarViewCard<SystemClock> {
    pub fn new(config: CardConfig) -> Self {
        Self::with_clock(config, SystemClock)
    }
}

impl<C: Clock> SolarViewCard<C> {
    pub fn with_clock(config: CardConfig, clock: C) -> Self {
        Self::with_policy(config, clock, ZoomPolicy::Levels)
    }

    pub fn with_policy(config: CardConfig, clock: C, policy: ZoomPolicy) -> Self {
        let controller = ViewController::new(clock.now(), config.effective_zoom_level(), policy);
        Self {
            clock,
            config,
            hemisphere: Hemisphere::default(),
            controller,
            mounted: false,
            geolocation_pending: false,
        }
    }

    pub fn config(&self) -> &CardConfig {
        &self.config
    }

    /// Replace the configuration; the new default zoom applies on reset
    pub fn set_config(&mut self, config: CardConfig) {
        self.controller.set_default_level(config.effective_zoom_level());
        self.config = config;
    }

    pub fn hemisphere(&self) -> Hemisphere {
        self.hemisphere
    }

    pub fn timestamp(&self) -> &Timestamp {
        self.controller.timestamp()
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Whether a geolocation result is still expected
    pub fn wants_geolocation(&self) -> bool {
        self.geolocation_pending
    }

    /// Attach to the host: first render, start ticking, ask for a position
    pub fn on_mount(&mut self) -> CardView {
        self.mounted = true;
        self.geolocation_pending = true;
        log::debug!("Mounted at {}", self.controller.timestamp());
        self.render()
    }

    /// Detach from the host; later ticks are ignored
    pub fn on_unmount(&mut self) {
        self.mounted = false;
        log::debug!("Unmounted");
    }

    /// Periodic refresh, re-rendering only while showing today
    pub fn on_tick(&mut self) -> Option<CardView> {
        if !self.is_mounted() {
            return None;
        }
        let now = self.clock.now();
        if self.controller.tick(now) {
            Some(self.render())
        } else {
            None
        }
    }

    /// Consume the geolocation result, re-rendering if the hemisphere changed
    pub fn apply_geolocation(&mut self, outcome: GeolocationOutcome) -> Option<CardView> {
        if !self.geolocation_pending {
            log::debug!("Ignoring unrequested geolocation result {:?}", outcome);
            return None;
        }
        self.geolocation_pending = false;
        match outcome {
            GeolocationOutcome::Detected { latitude } => {
                let hemisphere = Hemisphere::from_latitude(latitude);
                if hemisphere == self.hemisphere {
                    return None;
                }
                log::debug!("Switching to {:?} hemisphere", hemisphere);
                self.hemisphere = hemisphere;
                Some(self.render())
            }
            GeolocationOutcome::Unavailable => {
                log::debug!("Geolocation unavailable, keeping {:?}", self.hemisphere);
                None
            }
        }
    }

    pub fn handle_action(&mut self, action: NavAction) -> CardView {
        match action {
            NavAction::Today => self.controller.reset(self.clock.now()),
            NavAction::ZoomIn => {
                self.controller.zoom_in();
            }
            NavAction::ZoomOut => {
                self.controller.zoom_out();
            }
            _ => {
                if let Some(step) = action.time_step() {
                    self.controller.navigate(step);
                }
            }
        }
        self.render()
    }

    pub fn pointer_down(&mut self, x: f64, y: f64) {
        self.controller.begin_drag(x, y);
    }

    /// Pan for a pointer move; returns the new view box when it moved
    pub fn pointer_move(
        &mut self,
        x: f64,
        y: f64,
        onscreen_width: f64,
        onscreen_height: f64,
    ) -> Option<ViewBox> {
        if self.controller.drag_to(x, y, onscreen_width, onscreen_height) {
            self.controller.view_box()
        } else {
            None
        }
    }

    pub fn pointer_up(&mut self) {
        self.controller.end_drag();
    }

    /// Render the current state
    pub fn render(&mut self) -> CardView {
        let (scene, bounds) = scene::render(self.controller.timestamp(), self.hemisphere);
        let view_box = self.controller.ensure_initialized(&bounds).view_box();
        CardView {
            svg: svg::to_svg(&scene, &view_box),
            view_box,
            readout: self.controller.timestamp().readout(),
            zoom_level: self.controller.zoom_level(),
            hemisphere: self.hemisphere,
        }
    }
}
