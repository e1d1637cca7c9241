//! # svgo
//!
//! Parse a small subset of SVG (groups, paths, inline `style` attributes and
//! path data) into a scene graph, then render that graph against any vector
//! graphics backend.
//!
//! ## Features
//!
//! - **Scene graph**: `<g>` and `<path>` elements with inherited fill/stroke
//! - **Path data**: `M`, `L`, `H`, `V`, `C`, `A` and `Z` commands
//! - **Rendering**: drives a [`VectorBackend`] implementation
//! - **Backends**: [`RecordingBackend`] for inspection, [`SvgWriter`] for SVG output
//!
//! ## Example
//!
//! ```rust,ignore
//! use svgo::{RecordingBackend, RenderOptions, parse_document, render};
//!
//! let svg = std::fs::read_to_string("drawing.svg").unwrap();
//! let doc = parse_document(&svg).unwrap();
//! let mut backend = RecordingBackend::new();
//! render(&doc, &mut backend, &RenderOptions::default()).unwrap();
//! for call in backend.calls() {
//!     println!("{}", call);
//! }
//! ```

pub mod error;
pub mod parser;
pub mod path;
pub mod recording;
pub mod render;
pub mod style;
pub mod svg;
pub mod types;

// Re-export commonly used items
pub use error::{PathDataError, StyleError, SvgError, SvgWriteError};
pub use parser::{parse_document, parse_document_from_reader};
pub use path::parse_path_data;
pub use recording::{BackendCall, RecordingBackend};
pub use render::{RenderOptions, VectorBackend, render, render_group, render_path};
pub use style::{parse_color, parse_color_strict, parse_style};
pub use svg::SvgWriter;
pub use types::*;
