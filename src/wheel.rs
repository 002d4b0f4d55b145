//! The public wheel: items, rotation, spinning status and the selected item.

use std::time::Instant;

use tracing::{debug, info, warn};

use crate::config::WheelConfig;
use crate::render::render;
use crate::spin::{resolve_selection, RandomSource, SpinDriver};
use crate::surface::Surface;

/// Identifies one spin session.
///
/// The frame loop carries the token of the session it is animating; once the
/// wheel is rebuilt or a new session replaces it, ticks with the old token do
/// nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SpinToken(u64);

/// Outcome of one [`Wheel::advance`] call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Frame {
    /// The token no longer names the active session, nothing was drawn
    Stale,
    /// A frame was drawn and the spin goes on; request another tick
    Spinning { angle: f64 },
    /// The final frame was drawn and the selection is published
    Settled { index: usize },
}

#[derive(Debug, Clone)]
pub struct Wheel {
    config: WheelConfig,
    items: Vec<String>,
    driver: SpinDriver,
    selected: Option<usize>,
    session: Option<SpinToken>,
    next_token: u64,
}

impl Wheel {
    /// A wheel with no items. Nothing is drawn until [`Wheel::set_items`].
    pub fn new(config: WheelConfig) -> Self {
        Self {
            config,
            items: Vec::new(),
            driver: SpinDriver::new(),
            selected: None,
            session: None,
            next_token: 0,
        }
    }

    /// Builds a wheel over `items` and draws it at rotation 0.
    pub fn construct<S: Surface + ?Sized>(items: Vec<String>, config: WheelConfig, surface: &mut S) -> Self {
        let mut wheel = Self::new(config);
        wheel.set_items(items, surface);
        wheel
    }

    /// Replaces the items, cancels any spin in flight and redraws at rotation 0.
    ///
    /// Blank items are dropped; an empty list leaves a blank wheel.
    pub fn set_items<S: Surface + ?Sized>(&mut self, items: Vec<String>, surface: &mut S) {
        let before = items.len();
        self.items = items.into_iter().filter(|item| !item.trim().is_empty()).collect();
        if self.items.len() != before {
            warn!(dropped = before - self.items.len(), "ignoring blank wheel items");
        }
        if let Some(token) = self.session.take() {
            debug!(?token, "spin cancelled by new items");
        }
        self.driver.reset();
        self.selected = None;
        info!(count = self.items.len(), "wheel built");
        self.render(surface);
    }

    /// Starts a spin. Ignored on an empty wheel or while a spin is running.
    ///
    /// Returns the token the frame loop must pass to [`Wheel::advance`].
    pub fn spin(&mut self, now: Instant, rng: &mut dyn RandomSource) -> Option<SpinToken> {
        if self.items.is_empty() || self.driver.is_spinning() {
            return None;
        }
        self.driver.start(now, &self.config, rng)?;
        self.selected = None;
        self.next_token += 1;
        let token = SpinToken(self.next_token);
        self.session = Some(token);
        Some(token)
    }

    /// One tick of the frame loop for the session named by `token`.
    pub fn advance<S: Surface + ?Sized>(&mut self, token: SpinToken, now: Instant, surface: &mut S) -> Frame {
        if self.session != Some(token) {
            return Frame::Stale;
        }
        let Some(step) = self.driver.tick(now) else {
            self.session = None;
            return Frame::Stale;
        };
        render(surface, &self.items, step.angle, &self.config);

        if !step.done {
            return Frame::Spinning { angle: step.angle };
        }

        self.session = None;
        match resolve_selection(step.angle, self.items.len(), self.config.pointer_angle) {
            Some(index) => {
                self.selected = Some(index);
                info!(index, topic = %self.items[index], "wheel settled");
                Frame::Settled { index }
            }
            None => Frame::Stale,
        }
    }

    /// Redraws at the current rotation, e.g. after the surface was resized.
    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S) {
        render(surface, &self.items, self.driver.angle(), &self.config);
    }

    pub fn is_spinning(&self) -> bool {
        self.driver.is_spinning()
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.map(|index| self.items[index].as_str())
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn rotation(&self) -> f64 {
        self.driver.angle()
    }

    pub fn config(&self) -> &WheelConfig {
        &self.config
    }

    /// Token of the spin in flight, if any.
    pub fn active_session(&self) -> Option<SpinToken> {
        self.session
    }
}
