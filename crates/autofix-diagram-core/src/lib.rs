//! Autofix Diagram Core Types and Drawing Primitives
//!
//! This crate provides the foundational drawing types used to render the
//! autofix architecture diagram. It includes:
//!
//! - **Colors**: Color handling with CSS color support ([`color::Color`])
//! - **Geometry**: Basic geometric types ([`geometry`] module)
//! - **Draw**: Drawable primitives that render both to SVG nodes and to a
//!   raster [`Surface`](draw::Surface) ([`draw`] module)

pub mod color;
pub mod draw;
pub mod geometry;
