//! Audio-reactive typography in Rust.
//!
//! The engine reads frequency magnitudes from a [`Source`](source/trait.Source.html),
//! averages them into bands and keeps a rolling history per band.  The band that is
//! furthest below its usual level picks the font weight of the title, a designated band
//! switches it to italic.  The raw magnitudes can be drawn as a waveform every frame.
//!
//! # Example
//! ```rust
//! # use type_core::{source, style};
//! fn main() -> type_core::Result<()> {
//!     // Initialize the logger.  Take a look at the sources if you want to customize
//!     // the logger.
//!     type_core::default_log();
//!
//!     // Load the default config source.  Every builder setting not given explicitly
//!     // is looked up there.
//!     type_core::default_config();
//!
//!     let source = source::SourceBuilder::new().kind("silent").build()?;
//!     let engine = type_core::EngineBuilder::new()
//!         .build(source, Box::new(style::LogTypesetter))?;
//!
//!     let mut waveform = type_core::render::Waveform::default();
//!     let mut frames = type_core::Frames::new(engine)?;
//!
//!     for frame in frames.iter() {
//!         // Inside this closure you have access to the latest data from
//!         // the engine
//!         frame.lock_info(|info| {
//!             let points = waveform.points((800.0, 100.0), &info.magnitudes);
//!             println!("{} points, style {:?}", points.len(), info.style);
//!         });
//! #
//! #       if frame.frame > 20 {
//! #           break;
//! #       }
//!     }
//!
//!     Ok(())
//! }
//! ```
pub mod analyzer;
pub mod cadence;
pub mod channel;
pub mod engine;
pub mod error;
pub mod frames;
pub mod glyphs;
pub mod render;
pub mod source;
pub mod style;

#[doc(inline)]
pub use crate::engine::{Engine, EngineBuilder};
#[doc(inline)]
pub use crate::error::{Error, Result};
#[doc(inline)]
pub use crate::frames::Frames;

/// `ezconf` configuration
///
/// Usually you will call [`default_config`](fn.default_config.html) in the beginning
/// which will populate this object, but you can also specify your own custom config
/// sources.
///
/// # Example
/// To make use of this config, use code similar to this:
///
/// ```rust
/// # type_core::default_config();
/// let interval = type_core::CONFIG.get_or(
///     // Toml path to value
///     "style.interval_ms",
///     // Default value.  Type gets inferred from this
///     200,
/// );
/// ```
pub static CONFIG: ezconf::Config = ezconf::INIT;

/// Initialize config from default sources
///
/// The default sources are:
/// * `./citytype.toml`
/// * `./config/citytype.toml`
/// * Defaults from code
pub fn default_config() {
    CONFIG
        .init(
            [
                ezconf::Source::File("citytype.toml"),
                ezconf::Source::File("config/citytype.toml"),
            ]
            .iter(),
        )
        .expect("Can't load config");
}

/// Initialize logger
///
/// By default, enable debug output in debug-builds.
pub fn default_log() {
    #[cfg(not(debug_assertions))]
    env_logger::init();

    #[cfg(debug_assertions)]
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Debug)
        .init();

    color_backtrace::install();
}
