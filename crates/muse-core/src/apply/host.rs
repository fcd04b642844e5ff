//! Host drawing surface and clipboard boundaries.

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use crate::design::FontWeight;

/// Failure reported by the host for one element-creation call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HostError {
    /// The host refused this element; the surface is still usable.
    #[error("Element rejected: {0}")]
    Rejected(String),

    /// The surface itself cannot be reached.
    #[error("Host surface unavailable: {0}")]
    Unavailable(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Clipboard write failed: {0}")]
pub struct ClipboardError(pub String);

/// Request to place a text element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextRequest {
    pub text: String,
    pub font_size: u32,
    pub font_weight: FontWeight,
    pub color: String,
    pub top: u32,
    pub left: u32,
}

/// Coordinate space of a shape's path data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ViewBox {
    pub width: u32,
    pub height: u32,
    pub top: u32,
    pub left: u32,
}

/// Request to place a filled vector path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeRequest {
    pub path_data: String,
    pub fill_color: String,
    pub view_box: ViewBox,
    pub top: u32,
    pub left: u32,
    pub width: u32,
    pub height: u32,
}

/// The canvas a design is replayed onto.
///
/// Calls are independent: the host offers no transaction or rollback.
#[async_trait]
pub trait HostSurface: Send {
    async fn add_text(&mut self, request: TextRequest) -> Result<(), HostError>;

    async fn add_shape(&mut self, request: ShapeRequest) -> Result<(), HostError>;
}

/// Plain-text clipboard.
///
/// An unavailable clipboard is an expected condition, not an error.
#[async_trait]
pub trait Clipboard: Send {
    fn is_available(&self) -> bool;

    async fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}
