//! Error type for the I/O boundaries of the crate.
//!
//! The geometry pipeline itself never fails; only loading meshes, reading
//! configuration and talking to the remote terminal can.
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// A Wavefront OBJ file could not be parsed.
    #[error("obj parse error on line {line}: {message}")]
    Obj { line: usize, message: String },

    #[error("invalid config: {0}")]
    Config(#[from] toml::de::Error),

    #[error("face references missing vertex {0}")]
    MissingVertex(usize),

    #[error("mesh contains no triangles")]
    EmptyMesh,

    /// A config value parsed but is outside its usable range.
    #[error("invalid config value `{key}`: {reason}")]
    ConfigValue { key: &'static str, reason: String },

    #[error("invalid remote target `{0}`")]
    RemoteTarget(String),
}

pub type Result<T> = std::result::Result<T, Error>;
