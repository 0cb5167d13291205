pub use na::{Matrix4, Point2, Point3, UnitQuaternion, Vector3, Vector4};
pub use nalgebra as na;

/// A projected endpoint in normalized device coordinates.
pub type NdcPoint = Point2<f64>;
