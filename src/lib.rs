//! Wireframe rendering of a static triangle mesh from a free-flying camera,
//! to a local canvas and to a Tektronix-style vector terminal.
pub mod camera;
pub mod canvas;
pub mod clip;
pub mod common;
pub mod config;
pub mod dedup;
pub mod error;
pub mod extract;
pub mod frame_loop;
pub mod mesh;
pub mod projection;
pub mod render;
pub mod tek;
pub mod transport;
pub mod viewport;

pub use camera::{ControlInput, MoveAxes, Pose};
pub use error::{Error, Result};
pub use frame_loop::FrameLoop;
pub use mesh::{Mesh, Triangle};
pub use render::{Frame, FrameStats, Renderer};
pub use tek::Tek4010;
