use crate::camera::{ControlInput, MoveAxes, Pose};
use crate::common::*;
use crate::error::{Error, Result};
use crate::projection::Projection;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::warn;

fn default_fov_y_degrees() -> f64 {
    60.0
}
fn default_near() -> f64 {
    0.1
}
fn default_far() -> f64 {
    1000.0
}
fn default_turn_step() -> f64 {
    0.01
}
fn default_start() -> [f64; 3] {
    [0.0, 0.0, 0.0]
}
fn default_width() -> u32 {
    640
}
fn default_height() -> u32 {
    480
}
fn default_margin() -> f64 {
    crate::tek::DEFAULT_MARGIN
}
fn default_tolerance() -> f64 {
    crate::dedup::DEFAULT_TOLERANCE
}
fn default_frames() -> u32 {
    1
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct CameraConfig {
    #[serde(default = "default_fov_y_degrees")]
    pub fov_y_degrees: f64,
    #[serde(default = "default_near")]
    pub near: f64,
    #[serde(default = "default_far")]
    pub far: f64,
    /// Radians of pan per frame while a pan control is held.
    #[serde(default = "default_turn_step")]
    pub pan_step: f64,
    /// Radians of tilt per frame while a tilt control is held.
    #[serde(default = "default_turn_step")]
    pub tilt_step: f64,
    #[serde(default = "default_start")]
    pub start: [f64; 3],
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_y_degrees: default_fov_y_degrees(),
            near: default_near(),
            far: default_far(),
            pan_step: default_turn_step(),
            tilt_step: default_turn_step(),
            start: default_start(),
        }
    }
}

impl CameraConfig {
    pub fn projection(&self) -> Projection {
        Projection {
            fov_y: self.fov_y_degrees.to_radians(),
            znear: self.near,
            zfar: self.far,
        }
    }

    pub fn start_pose(&self) -> Pose {
        let [x, y, z] = self.start;
        Pose::at(Point3::new(x, y, z))
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct CanvasConfig {
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct RemoteConfig {
    /// `tcp://host:port` or a device path.
    pub target: String,
    #[serde(default = "default_margin")]
    pub margin: f64,
    /// Upper bound on a blocked TCP write.  Unset or zero: wait forever.
    #[serde(default)]
    pub write_timeout_ms: Option<u64>,
}

impl RemoteConfig {
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            margin: default_margin(),
            write_timeout_ms: None,
        }
    }

    pub fn write_timeout(&self) -> Option<Duration> {
        self.write_timeout_ms
            .filter(|&ms| ms > 0)
            .map(Duration::from_millis)
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct DedupConfig {
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
}

impl Default for DedupConfig {
    fn default() -> Self {
        Self {
            tolerance: default_tolerance(),
        }
    }
}

/// A run of identical frames of control input.
///
/// `pan` and `tilt` are held-control signals (-1, 0 or 1) scaled by the
/// camera's turn steps; the move axes are one unit per frame.
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct ScriptStep {
    #[serde(default = "default_frames")]
    pub frames: u32,
    #[serde(default)]
    pub pan: i8,
    #[serde(default)]
    pub tilt: i8,
    #[serde(default)]
    pub lateral: i8,
    #[serde(default)]
    pub vertical: i8,
    #[serde(default)]
    pub forward: i8,
    #[serde(default)]
    pub send: bool,
}

impl ScriptStep {
    pub fn input(&self, camera: &CameraConfig) -> ControlInput {
        ControlInput {
            pan: camera.pan_step * f64::from(self.pan.signum()),
            tilt: camera.tilt_step * f64::from(self.tilt.signum()),
            axes: MoveAxes::new(self.lateral, self.vertical, self.forward),
            send_remote: self.send,
        }
    }
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
pub struct FileConfig {
    #[serde(default)]
    pub mesh: Option<PathBuf>,
    #[serde(default)]
    pub out_dir: Option<PathBuf>,
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default)]
    pub canvas: CanvasConfig,
    #[serde(default)]
    pub remote: Option<RemoteConfig>,
    #[serde(default)]
    pub dedup: DedupConfig,
    #[serde(default)]
    pub script: Vec<ScriptStep>,
}

impl FileConfig {
    /// Parse and validate.  Values that would break the projection or the
    /// terminal area are rejected here rather than at the first frame.
    pub fn from_toml(src: &str) -> Result<Self> {
        let config: FileConfig = toml::from_str(src)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let camera = &self.camera;
        if !(camera.fov_y_degrees > 0.0 && camera.fov_y_degrees < 180.0) {
            return Err(invalid(
                "camera.fov_y_degrees",
                format!("{} is not in (0, 180)", camera.fov_y_degrees),
            ));
        }
        if !(camera.near > 0.0 && camera.near.is_finite()) {
            return Err(invalid("camera.near", format!("{} is not positive", camera.near)));
        }
        if !(camera.far > camera.near && camera.far.is_finite()) {
            return Err(invalid(
                "camera.far",
                format!("{} must be beyond near ({})", camera.far, camera.near),
            ));
        }
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(invalid("canvas", "width and height must be non-zero".into()));
        }
        if !(self.dedup.tolerance >= 0.0 && self.dedup.tolerance.is_finite()) {
            return Err(invalid(
                "dedup.tolerance",
                format!("{} is not a distance", self.dedup.tolerance),
            ));
        }
        if let Some(remote) = &self.remote {
            let limit = f64::from(crate::tek::SCREEN_HEIGHT) / 2.0;
            if !(remote.margin >= 0.0 && remote.margin < limit) {
                return Err(invalid(
                    "remote.margin",
                    format!("{} is not in [0, {})", remote.margin, limit),
                ));
            }
        }
        Ok(())
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Look for a config file in the working directory.  Files that fail
    /// to parse are reported and skipped.
    pub fn load() -> Option<Self> {
        for path in get_config_paths() {
            if !path.exists() {
                continue;
            }
            match Self::from_path(&path) {
                Ok(config) => return Some(config),
                Err(e) => warn!(path = %path.display(), error = %e, "ignoring config file"),
            }
        }
        None
    }

    /// Expand the script into one control input per frame.
    pub fn inputs(&self) -> Vec<ControlInput> {
        self.script
            .iter()
            .flat_map(|step| {
                let input = step.input(&self.camera);
                std::iter::repeat(input).take(step.frames as usize)
            })
            .collect()
    }
}

fn invalid(key: &'static str, reason: String) -> Error {
    Error::ConfigValue { key, reason }
}

fn get_config_paths() -> Vec<PathBuf> {
    vec![PathBuf::from("tekframe.toml"), PathBuf::from(".tekframe.toml")]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = r#"
mesh = "models/terrain.obj"

[camera]
fov_y_degrees = 45.0
start = [0.0, 5.0, 20.0]

[remote]
target = "tcp://localhost:4010"
write_timeout_ms = 250

[[script]]
frames = 3
forward = 1
send = true

[[script]]
pan = -1
tilt = 1
"#;

    #[test]
    fn empty_file_gives_defaults() {
        let config = FileConfig::from_toml("").unwrap();
        assert_eq!(config.canvas, CanvasConfig::default());
        assert_eq!(config.camera.projection(), Projection::default());
        assert_eq!(config.dedup.tolerance, 0.001);
        assert!(config.remote.is_none());
        assert!(config.inputs().is_empty());
    }

    #[test]
    fn parses_sample() {
        let config = FileConfig::from_toml(SAMPLE).unwrap();
        assert_eq!(config.mesh, Some(PathBuf::from("models/terrain.obj")));
        assert_eq!(config.camera.near, 0.1);
        assert_eq!(config.camera.start_pose().position, Point3::new(0.0, 5.0, 20.0));
        let remote = config.remote.as_ref().unwrap();
        assert_eq!(remote.margin, 10.0);
        assert_eq!(remote.write_timeout(), Some(Duration::from_millis(250)));

        let inputs = config.inputs();
        assert_eq!(inputs.len(), 4);
        assert!(inputs[..3].iter().all(|i| i.send_remote && i.axes.forward == 1));
        assert_eq!(inputs[3].pan, -0.01);
        assert_eq!(inputs[3].tilt, 0.01);
        assert!(!inputs[3].send_remote);
    }

    #[test]
    fn zero_timeout_means_blocking() {
        let remote = RemoteConfig {
            target: "/dev/null".into(),
            margin: 10.0,
            write_timeout_ms: Some(0),
        };
        assert_eq!(remote.write_timeout(), None);
    }

    #[test]
    fn bad_toml_is_a_config_error() {
        assert!(matches!(
            FileConfig::from_toml("[camera]\nnear = \"close\""),
            Err(crate::error::Error::Config(_))
        ));
    }

    fn rejected_key(src: &str) -> &'static str {
        match FileConfig::from_toml(src) {
            Err(Error::ConfigValue { key, .. }) => key,
            other => panic!("expected a rejected value, got {:?}", other),
        }
    }

    #[test]
    fn degenerate_camera_is_rejected() {
        assert_eq!(rejected_key("[camera]\nnear = 5.0\nfar = 5.0\n"), "camera.far");
        assert_eq!(rejected_key("[camera]\nnear = 0.0\n"), "camera.near");
        assert_eq!(rejected_key("[camera]\nnear = -1.0\n"), "camera.near");
        assert_eq!(rejected_key("[camera]\nfov_y_degrees = 0.0\n"), "camera.fov_y_degrees");
        assert_eq!(rejected_key("[camera]\nfov_y_degrees = 180.0\n"), "camera.fov_y_degrees");
        assert_eq!(rejected_key("[camera]\nfov_y_degrees = nan\n"), "camera.fov_y_degrees");
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        assert_eq!(rejected_key("[dedup]\ntolerance = -0.1\n"), "dedup.tolerance");
        assert_eq!(rejected_key("[canvas]\nwidth = 0\n"), "canvas");
        assert_eq!(
            rejected_key("[remote]\ntarget = \"/dev/null\"\nmargin = 390.0\n"),
            "remote.margin"
        );
    }

    #[test]
    fn validated_camera_builds_a_projection() {
        let config = FileConfig::from_toml("[camera]\nnear = 1.0\nfar = 50.0\n").unwrap();
        let m = config.camera.projection().matrix(640, 480);
        assert!(m.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn reads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();
        let config = FileConfig::from_path(file.path()).unwrap();
        assert_eq!(config.script.len(), 2);
    }
}
