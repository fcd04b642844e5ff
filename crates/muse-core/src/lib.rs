//! Muse Core Library
//!
//! Design schema, prompt construction, model response normalization and the
//! engine that replays a design onto a host canvas.

pub mod apply;
pub mod design;
pub mod error;
pub mod generate;
pub mod panel;
pub mod session;

pub use error::{MuseError, MuseResult};
