//! # stepgrid-core
//!
//! Backend library for the stepgrid sequencer. Provides the live pattern
//! state, the step clock, and the codec that turns a pattern into a share
//! link and back, independent of any audio engine or UI.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use stepgrid_core::config::Config;
//! use stepgrid_core::sequencer::OfflineTransport;
//! use stepgrid_core::session::Session;
//!
//! let config = Config::load();
//! let mut session = Session::from_config(OfflineTransport::new(config.default_bpm()), &config);
//!
//! // Edit, then share
//! session.pattern_mut().toggle_step(stepgrid_types::SampleId::new(0), 0);
//! let url = session.share_url(config.share_base_url());
//!
//! // Somewhere else: load it back
//! if let Some(url) = url {
//!     session.load_from_location(&url);
//! }
//! ```
//!
//! ## Modules
//!
//! - [`codec`]: snapshot, compact form, token encoding and validation
//! - [`share`]: share URLs and reading a pattern back from a location
//! - [`sequencer`]: step clock and the transport/engine traits it drives
//! - [`state`]: editable pattern for the selected pack
//! - [`session`]: pattern plus clock plus feedback
//! - [`config`]: TOML configuration

pub mod codec;
pub mod config;
pub mod feedback;
pub mod sequencer;
pub mod session;
pub mod share;
pub mod state;
