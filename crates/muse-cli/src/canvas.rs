//! File-backed SVG canvas.
//!
//! Collects element-creation calls in order and renders them as one SVG
//! document, so later calls paint over earlier ones. Every accepted call is
//! written through to the output file; a file that cannot be written makes
//! the surface unavailable.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use muse_core::apply::{HostError, HostSurface, ShapeRequest, TextRequest, CANVAS_HEIGHT, CANVAS_WIDTH};

#[derive(Debug, Clone)]
enum Element {
    Text(TextRequest),
    Shape(ShapeRequest),
}

#[derive(Debug)]
pub struct SvgCanvas {
    path: PathBuf,
    elements: Vec<Element>,
}

impl SvgCanvas {
    /// A canvas that writes to `path`. Nothing touches the disk until the
    /// first element is accepted.
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            elements: Vec::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn render(&self) -> String {
        let mut svg = String::new();
        let _ = writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = CANVAS_WIDTH,
            h = CANVAS_HEIGHT
        );

        for element in &self.elements {
            match element {
                Element::Text(t) => {
                    let _ = writeln!(
                        svg,
                        r#"  <text x="{}" y="{}" font-size="{}" font-weight="{}" fill="{}" dominant-baseline="hanging">{}</text>"#,
                        t.left,
                        t.top,
                        t.font_size,
                        escape(t.font_weight.as_str()),
                        escape(&t.color),
                        escape(&t.text)
                    );
                }
                Element::Shape(s) => {
                    let _ = writeln!(
                        svg,
                        r#"  <svg x="{}" y="{}" width="{}" height="{}" viewBox="{} {} {} {}"><path d="{}" fill="{}"/></svg>"#,
                        s.left,
                        s.top,
                        s.width,
                        s.height,
                        s.view_box.left,
                        s.view_box.top,
                        s.view_box.width,
                        s.view_box.height,
                        escape(&s.path_data),
                        escape(&s.fill_color)
                    );
                }
            }
        }

        svg.push_str("</svg>\n");
        svg
    }

    fn flush(&self) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, self.render())
    }

    /// Keep `element` only if the document can be written with it.
    fn push(&mut self, element: Element) -> Result<(), HostError> {
        self.elements.push(element);
        if let Err(e) = self.flush() {
            self.elements.pop();
            return Err(HostError::Unavailable(format!("{}: {}", self.path.display(), e)));
        }
        Ok(())
    }
}

#[async_trait]
impl HostSurface for SvgCanvas {
    async fn add_text(&mut self, request: TextRequest) -> Result<(), HostError> {
        check_color(&request.color)?;
        if request.font_size == 0 {
            return Err(HostError::Rejected("font size must be positive".to_string()));
        }
        self.push(Element::Text(request))
    }

    async fn add_shape(&mut self, request: ShapeRequest) -> Result<(), HostError> {
        check_color(&request.fill_color)?;
        self.push(Element::Shape(request))
    }
}

/// Accepts `#rgb`, `#rgba`, `#rrggbb` and `#rrggbbaa`.
fn check_color(color: &str) -> Result<(), HostError> {
    let hex = color
        .strip_prefix('#')
        .filter(|h| matches!(h.len(), 3 | 4 | 6 | 8) && h.chars().all(|c| c.is_ascii_hexdigit()));
    match hex {
        Some(_) => Ok(()),
        None => Err(HostError::Rejected(format!("unsupported color '{}'", color))),
    }
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
