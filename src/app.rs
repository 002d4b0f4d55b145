//! Desktop shell: a winit window over a pixels frame buffer, driving a
//! [`Wheel`] from mouse, keyboard and a command channel.

use std::path::{Path, PathBuf};
use std::sync::mpsc::Receiver;
use std::sync::Arc;
use std::time::{Duration, Instant};

use pixels::{Pixels, SurfaceTexture};
use rusttype::Font;
use tracing::{debug, info, warn};
use winit::dpi::LogicalSize;
use winit::event::{ElementState, Event, KeyEvent, MouseButton, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::keyboard::{Key, NamedKey};
use winit::window::{CursorIcon, WindowBuilder};

use crate::canvas::{font_from_bytes, Canvas};
use crate::config::WheelConfig;
use crate::error::{Result, WheelError};
use crate::spin::{RandomSource, RngSource};
use crate::surface::Surface;
use crate::topics;
use crate::wheel::{Frame, SpinToken, Wheel};

/// How often an idle window checks the command channel.
const COMMAND_POLL: Duration = Duration::from_millis(100);

/// Commands accepted by a running wheel window.
#[derive(Debug, Clone, PartialEq)]
pub enum WheelCommand {
    Spin,
    SetItems(Vec<String>),
}

/// Reads one line of the command pipe.
///
/// A blank line or `spin` spins; `load PATH` reads a topic file; a line that
/// starts with `[` or `{` is inline topic JSON. Anything else is `None`.
pub fn parse_command(line: &str) -> Result<Option<WheelCommand>> {
    let line = line.trim();
    if line.is_empty() || line.eq_ignore_ascii_case("spin") {
        return Ok(Some(WheelCommand::Spin));
    }
    if let Some(path) = line.strip_prefix("load ") {
        let items = topics::load(Path::new(path.trim()))?;
        return Ok(Some(WheelCommand::SetItems(items)));
    }
    if line.starts_with('[') || line.starts_with('{') {
        let items = topics::parse(line).map_err(|source| WheelError::TopicsParse {
            path: PathBuf::from("<stdin>"),
            source,
        })?;
        return Ok(Some(WheelCommand::SetItems(items)));
    }
    Ok(None)
}

/// Window title for the wheel's current state.
pub fn status_title(wheel: &Wheel) -> String {
    if wheel.is_spinning() {
        return "SPINNING...".to_string();
    }
    match wheel.selected() {
        Some(topic) => format!("Your topic: {topic} (you have 1 minute to speak!)"),
        None => format!("{} topics available", wheel.item_count()),
    }
}

/// Wheel plus the spin the frame loop is animating.
pub struct WheelSession {
    wheel: Wheel,
    token: Option<SpinToken>,
    rng: Box<dyn RandomSource>,
}

impl WheelSession {
    pub fn new(wheel: Wheel, rng: Box<dyn RandomSource>) -> Self {
        Self {
            wheel,
            token: None,
            rng,
        }
    }

    pub fn wheel(&self) -> &Wheel {
        &self.wheel
    }

    /// Whether another frame is needed.
    pub fn is_animating(&self) -> bool {
        self.token.is_some()
    }

    pub fn apply<S: Surface + ?Sized>(&mut self, command: WheelCommand, now: Instant, surface: &mut S) {
        match command {
            WheelCommand::Spin => {
                if let Some(token) = self.wheel.spin(now, self.rng.as_mut()) {
                    debug!(?token, "spin requested");
                    self.token = Some(token);
                }
            }
            WheelCommand::SetItems(items) => {
                self.wheel.set_items(items, surface);
                self.token = None;
            }
        }
    }

    /// Draws one frame: the next animation step while spinning, otherwise
    /// the wheel at rest.
    pub fn draw<S: Surface + ?Sized>(&mut self, now: Instant, surface: &mut S) -> Option<Frame> {
        let Some(token) = self.token else {
            self.wheel.render(surface);
            return None;
        };
        let frame = self.wheel.advance(token, now, surface);
        if !matches!(frame, Frame::Spinning { .. }) {
            self.token = None;
        }
        if frame == Frame::Stale {
            self.wheel.render(surface);
        }
        Some(frame)
    }
}

/// A wheel in its own window.
pub struct WheelApp {
    config: WheelConfig,
    items: Vec<String>,
    font: Option<Font<'static>>,
    rng: Box<dyn RandomSource>,
}

impl WheelApp {
    pub fn new(config: WheelConfig, items: Vec<String>) -> Self {
        Self {
            config,
            items,
            font: None,
            rng: Box::new(RngSource::thread()),
        }
    }

    /// Font for labels and the hub caption, in place of the config's
    /// `font_data`.
    pub fn with_font(mut self, font: Font<'static>) -> Self {
        self.font = Some(font);
        self
    }

    pub fn with_rng(mut self, rng: impl RandomSource + 'static) -> Self {
        self.rng = Box::new(rng);
        self
    }

    pub fn show(self) -> Result<()> {
        self.run_window(None)
    }

    pub fn show_with_commands(self, receiver: Receiver<WheelCommand>) -> Result<()> {
        self.run_window(Some(receiver))
    }

    fn run_window(self, receiver: Option<Receiver<WheelCommand>>) -> Result<()> {
        let Self {
            config,
            items,
            font,
            rng,
        } = self;
        let logical_size = config.canvas_size as f64;
        let font = match font {
            Some(font) => font,
            None => font_from_bytes(config.font_data)?,
        };

        let event_loop = EventLoop::new()?;
        let window = WindowBuilder::new()
            .with_title(&config.title)
            .with_inner_size(LogicalSize::new(logical_size, logical_size))
            .with_min_inner_size(LogicalSize::new(120.0, 120.0))
            .build(&event_loop)?;
        let window = Arc::new(window);
        let window_clone = window.clone();

        let size = window.inner_size();
        let mut fb_width = size.width as usize;
        let mut fb_height = size.height as usize;
        let surface_texture = SurfaceTexture::new(size.width, size.height, &window);
        let mut pixels = Pixels::new(size.width, size.height, surface_texture)?;

        let frame_duration = Duration::from_secs_f64(1.0 / config.max_framerate.max(1.0));
        let base_title = config.title.clone();
        let mut session = WheelSession::new(Wheel::new(config), rng);
        {
            let mut canvas = Canvas::new(pixels.frame_mut(), fb_width, fb_height).with_font(&font);
            session.apply(WheelCommand::SetItems(items), Instant::now(), &mut canvas);
        }
        info!(topics = session.wheel().item_count(), "wheel window open");
        window.set_title(&format!("{base_title} - {}", status_title(session.wheel())));
        window.set_cursor_icon(CursorIcon::Pointer);

        let mut pending: Vec<WheelCommand> = Vec::new();
        let mut last_frame = Instant::now();
        let mut title = String::new();

        event_loop.run(move |event, window_target| match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => {
                    window_target.exit();
                }
                WindowEvent::Resized(new_size) => {
                    if new_size.width == 0 || new_size.height == 0 {
                        return;
                    }
                    if let Err(err) = pixels.resize_buffer(new_size.width, new_size.height) {
                        warn!(%err, "failed to resize frame buffer");
                        return;
                    }
                    if let Err(err) = pixels.resize_surface(new_size.width, new_size.height) {
                        warn!(%err, "failed to resize surface");
                    }
                    fb_width = new_size.width as usize;
                    fb_height = new_size.height as usize;
                    window_clone.request_redraw();
                }
                WindowEvent::MouseInput {
                    state: ElementState::Pressed,
                    button: MouseButton::Left,
                    ..
                } => {
                    pending.push(WheelCommand::Spin);
                    window_clone.request_redraw();
                }
                WindowEvent::KeyboardInput {
                    event:
                        KeyEvent {
                            logical_key,
                            state: ElementState::Pressed,
                            repeat: false,
                            ..
                        },
                    ..
                } => match logical_key {
                    Key::Named(NamedKey::Space | NamedKey::Enter) => {
                        pending.push(WheelCommand::Spin);
                        window_clone.request_redraw();
                    }
                    Key::Named(NamedKey::Escape) => window_target.exit(),
                    _ => {}
                },
                WindowEvent::RedrawRequested => {
                    let now = Instant::now();
                    let mut canvas = Canvas::new(pixels.frame_mut(), fb_width, fb_height).with_font(&font);
                    for command in pending.drain(..) {
                        session.apply(command, now, &mut canvas);
                    }
                    session.draw(now, &mut canvas);
                    last_frame = now;

                    let status = status_title(session.wheel());
                    if status != title {
                        window_clone.set_title(&format!("{base_title} - {status}"));
                        window_clone.set_cursor_icon(if session.wheel().is_spinning() {
                            CursorIcon::NotAllowed
                        } else {
                            CursorIcon::Pointer
                        });
                        title = status;
                    }

                    if let Err(err) = pixels.render() {
                        warn!(%err, "frame presentation failed");
                        window_target.exit();
                    }
                }
                _ => {}
            },
            Event::AboutToWait => {
                if let Some(receiver) = receiver.as_ref() {
                    let before = pending.len();
                    pending.extend(receiver.try_iter());
                    if pending.len() != before {
                        window_clone.request_redraw();
                    }
                }

                if session.is_animating() {
                    let next = last_frame + frame_duration;
                    if Instant::now() >= next {
                        window_clone.request_redraw();
                    } else {
                        window_target.set_control_flow(ControlFlow::WaitUntil(next));
                    }
                } else if receiver.is_some() {
                    window_target.set_control_flow(ControlFlow::WaitUntil(Instant::now() + COMMAND_POLL));
                } else {
                    window_target.set_control_flow(ControlFlow::Wait);
                }
            }
            _ => {}
        })?;

        Ok(())
    }
}
