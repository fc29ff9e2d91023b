//! This module contains the math types that mainly comes from `cgmath`.

pub use cgmath::*;

/// A 4x4 homogeneous transform that places a node relative to a reference frame.
///
/// Nothing checks that the rotation part is orthonormal, any matrix is accepted
/// and composed as it is.
pub type Pose = Matrix4<f64>;

/// Returns the identity pose.
#[inline]
pub fn identity() -> Pose {
    Pose::identity()
}

/// Returns a pure translation pose.
#[inline]
pub fn from_translation(x: f64, y: f64, z: f64) -> Pose {
    Pose::from_translation(Vector3::new(x, y, z))
}

/// Returns the translation part of `pose`.
#[inline]
pub fn translation(pose: &Pose) -> Vector3<f64> {
    pose.w.truncate()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn translate() {
        let pose = from_translation(1.0, 0.534, 0.3);
        assert_eq!(translation(&pose), Vector3::new(1.0, 0.534, 0.3));
        assert_eq!(pose * identity(), pose);
        assert_eq!(pose[3][0], 1.0);
    }
}
