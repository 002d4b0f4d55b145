//! A spinning topic wheel.
//!
//! Items are laid out as equal sectors of a circle, the wheel spins with an
//! eased animation to a random angle, and the item that comes to rest under
//! the pointer is the selection.
//!
//! ```no_run
//! use topic_wheel::{fallback_topics, WheelApp, WheelConfig};
//!
//! let config = WheelConfig::builder().title("Speech practice".to_string()).build();
//! WheelApp::new(config, fallback_topics()).show()?;
//! # Ok::<(), topic_wheel::WheelError>(())
//! ```
//!
//! The core is independent of any window: [`Wheel`] draws onto anything that
//! implements [`Surface`], and [`Scene`] records those calls for inspection.

pub mod app;
pub mod canvas;
pub mod config;
pub mod error;
pub mod geometry;
pub mod layout;
pub mod raster;
pub mod render;
pub mod scene;
pub mod spin;
pub mod surface;
pub mod topics;
pub mod wheel;

pub use app::{parse_command, status_title, WheelApp, WheelCommand, WheelSession};
pub use canvas::{font_from_bytes, load_font, Canvas};
pub use config::{Color, Palette, WheelConfig, BUNDLED_FONT};
pub use error::{Result, WheelError};
pub use geometry::{normalize_angle, resolve_index, resolve_index_at, sector_range, sector_width};
pub use layout::wrap_label;
pub use render::{render, WheelLayout};
pub use scene::{DrawCommand, Scene};
pub use spin::{ease_out_cubic, resolve_selection, RandomSource, RngSource, SpinDriver, SpinSession, SpinState, SpinStep};
pub use surface::{Surface, TextAlign, TextBaseline, TextStyle};
pub use topics::fallback_topics;
pub use wheel::{Frame, SpinToken, Wheel};
