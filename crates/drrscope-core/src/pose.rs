//! Rigid pose parameterization.
//!
//! The imaging rig is positioned by a rigid transform. Callers express the
//! rotation in one of several parameterizations ([`RotationParam`]) and the
//! [`convert`] utility turns raw components into a validated [`Pose`].

use std::fmt;
use std::str::FromStr;

use glam::{EulerRot, Mat4, Quat, Vec3};

use crate::error::{DrrscopeError, Result};

/// Rotation parameterizations accepted by [`convert`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationParam {
    /// Three Euler angles in radians, interpreted per an [`EulerConvention`].
    EulerAngles,
    /// A rotation axis (x, y, z) followed by an angle in radians.
    AxisAngle,
    /// A quaternion as (x, y, z, w); normalized during conversion.
    Quaternion,
}

impl FromStr for RotationParam {
    type Err = DrrscopeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "euler_angles" => Ok(RotationParam::EulerAngles),
            "axis_angle" => Ok(RotationParam::AxisAngle),
            "quaternion" => Ok(RotationParam::Quaternion),
            _ => Err(DrrscopeError::UnknownParameterization(s.to_string())),
        }
    }
}

/// Intrinsic Euler axis conventions (applied in the order named).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EulerConvention {
    Xyz,
    Xzy,
    Yxz,
    Yzx,
    Zxy,
    Zyx,
}

impl EulerConvention {
    /// Maps onto the corresponding `glam` rotation order.
    #[must_use]
    pub fn euler_rot(self) -> EulerRot {
        match self {
            EulerConvention::Xyz => EulerRot::XYZ,
            EulerConvention::Xzy => EulerRot::XZY,
            EulerConvention::Yxz => EulerRot::YXZ,
            EulerConvention::Yzx => EulerRot::YZX,
            EulerConvention::Zxy => EulerRot::ZXY,
            EulerConvention::Zyx => EulerRot::ZYX,
        }
    }
}

impl fmt::Display for EulerConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EulerConvention::Xyz => "XYZ",
            EulerConvention::Xzy => "XZY",
            EulerConvention::Yxz => "YXZ",
            EulerConvention::Yzx => "YZX",
            EulerConvention::Zxy => "ZXY",
            EulerConvention::Zyx => "ZYX",
        };
        f.write_str(s)
    }
}

impl FromStr for EulerConvention {
    type Err = DrrscopeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "XYZ" => Ok(EulerConvention::Xyz),
            "XZY" => Ok(EulerConvention::Xzy),
            "YXZ" => Ok(EulerConvention::Yxz),
            "YZX" => Ok(EulerConvention::Yzx),
            "ZXY" => Ok(EulerConvention::Zxy),
            "ZYX" => Ok(EulerConvention::Zyx),
            _ => Err(DrrscopeError::UnknownConvention(s.to_string())),
        }
    }
}

/// A rigid transform positioning the imaging rig in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub rotation: Quat,
    pub translation: Vec3,
}

impl Pose {
    /// The identity pose (rig frame coincides with world frame).
    pub const IDENTITY: Self = Self {
        rotation: Quat::IDENTITY,
        translation: Vec3::ZERO,
    };

    /// Creates a pose from a rotation and translation.
    #[must_use]
    pub fn new(rotation: Quat, translation: Vec3) -> Self {
        Self {
            rotation,
            translation,
        }
    }

    /// Creates a pose from Euler angles under the given convention.
    #[must_use]
    pub fn from_euler(angles: Vec3, convention: EulerConvention, translation: Vec3) -> Self {
        let rotation = Quat::from_euler(convention.euler_rot(), angles.x, angles.y, angles.z);
        Self {
            rotation,
            translation,
        }
    }

    /// The pose as a homogeneous transform matrix.
    #[must_use]
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.rotation, self.translation)
    }

    /// Transforms a point from rig space to world space.
    #[must_use]
    pub fn apply_point(&self, p: Vec3) -> Vec3 {
        self.rotation * p + self.translation
    }

    /// Rotates a direction from rig space to world space.
    #[must_use]
    pub fn apply_vector(&self, v: Vec3) -> Vec3 {
        self.rotation * v
    }

    /// The inverse pose (world space to rig space).
    #[must_use]
    pub fn inverse(&self) -> Self {
        let inv_rot = self.rotation.inverse();
        Self {
            rotation: inv_rot,
            translation: inv_rot * -self.translation,
        }
    }

    /// Composition: applies `self` after `other`.
    #[must_use]
    pub fn then(&self, other: &Pose) -> Self {
        Self {
            rotation: self.rotation * other.rotation,
            translation: self.rotation * other.translation + self.translation,
        }
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Converts raw rotation components and a translation into a [`Pose`].
///
/// `rotation` must carry 3 components for Euler angles and 4 for axis-angle
/// (axis then angle) or quaternion (x, y, z, w). Euler angles require a
/// `convention`; the other parameterizations reject one.
///
/// # Errors
///
/// Returns an error on a component-count mismatch, non-finite values, a
/// zero axis or zero quaternion, or a missing/extraneous convention.
pub fn convert(
    rotation: &[f32],
    translation: Vec3,
    param: RotationParam,
    convention: Option<EulerConvention>,
) -> Result<Pose> {
    if rotation.iter().any(|c| !c.is_finite()) || !translation.is_finite() {
        return Err(DrrscopeError::InvalidPose(
            "components must be finite".to_string(),
        ));
    }

    let expected = match param {
        RotationParam::EulerAngles => 3,
        RotationParam::AxisAngle | RotationParam::Quaternion => 4,
    };
    if rotation.len() != expected {
        return Err(DrrscopeError::SizeMismatch {
            expected,
            actual: rotation.len(),
        });
    }

    let rotation = match param {
        RotationParam::EulerAngles => {
            let Some(conv) = convention else {
                return Err(DrrscopeError::InvalidPose(
                    "Euler angles require an axis convention".to_string(),
                ));
            };
            Quat::from_euler(conv.euler_rot(), rotation[0], rotation[1], rotation[2])
        }
        RotationParam::AxisAngle => {
            if convention.is_some() {
                return Err(DrrscopeError::InvalidPose(
                    "axis-angle does not take an Euler convention".to_string(),
                ));
            }
            let axis = Vec3::new(rotation[0], rotation[1], rotation[2]);
            if axis.length_squared() < f32::EPSILON {
                return Err(DrrscopeError::InvalidPose(
                    "rotation axis must be non-zero".to_string(),
                ));
            }
            Quat::from_axis_angle(axis.normalize(), rotation[3])
        }
        RotationParam::Quaternion => {
            if convention.is_some() {
                return Err(DrrscopeError::InvalidPose(
                    "quaternion does not take an Euler convention".to_string(),
                ));
            }
            let q = Quat::from_xyzw(rotation[0], rotation[1], rotation[2], rotation[3]);
            if q.length_squared() < f32::EPSILON {
                return Err(DrrscopeError::InvalidPose(
                    "quaternion must be non-zero".to_string(),
                ));
            }
            q.normalize()
        }
    };

    Ok(Pose::new(rotation, translation))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    #[test]
    fn convention_parsing_is_case_insensitive() {
        assert_eq!(
            "zxy".parse::<EulerConvention>().unwrap(),
            EulerConvention::Zxy
        );
        assert!("ZZZ".parse::<EulerConvention>().is_err());
    }

    #[test]
    fn parameterization_parsing() {
        assert_eq!(
            "euler_angles".parse::<RotationParam>().unwrap(),
            RotationParam::EulerAngles
        );
        assert!("rodrigues".parse::<RotationParam>().is_err());
    }

    #[test]
    fn euler_requires_convention() {
        let err = convert(&[0.0, 0.0, 0.0], Vec3::ZERO, RotationParam::EulerAngles, None);
        assert!(err.is_err());
    }

    #[test]
    fn quaternion_rejects_convention() {
        let err = convert(
            &[0.0, 0.0, 0.0, 1.0],
            Vec3::ZERO,
            RotationParam::Quaternion,
            Some(EulerConvention::Zxy),
        );
        assert!(err.is_err());
    }

    #[test]
    fn component_count_is_checked() {
        let err = convert(&[0.0, 0.0], Vec3::ZERO, RotationParam::Quaternion, None);
        assert!(matches!(
            err,
            Err(crate::DrrscopeError::SizeMismatch {
                expected: 4,
                actual: 2
            })
        ));
    }

    #[test]
    fn zero_axis_is_rejected() {
        let err = convert(
            &[0.0, 0.0, 0.0, PI],
            Vec3::ZERO,
            RotationParam::AxisAngle,
            None,
        );
        assert!(err.is_err());
    }

    #[test]
    fn axis_angle_quarter_turn() {
        let pose = convert(
            &[0.0, 0.0, 1.0, FRAC_PI_2],
            Vec3::ZERO,
            RotationParam::AxisAngle,
            None,
        )
        .unwrap();
        let p = pose.apply_point(Vec3::X);
        assert!(p.abs_diff_eq(Vec3::Y, 1e-6));
    }

    #[test]
    fn inverse_round_trips_points() {
        let pose = Pose::from_euler(
            Vec3::new(0.3, -0.7, 1.1),
            EulerConvention::Zxy,
            Vec3::new(5.0, -2.0, 9.0),
        );
        let p = Vec3::new(1.0, 2.0, 3.0);
        let back = pose.inverse().apply_point(pose.apply_point(p));
        assert!(back.abs_diff_eq(p, 1e-4));
    }

    proptest! {
        #[test]
        fn convert_then_invert_is_identity(
            ax in -3.0f32..3.0,
            ay in -3.0f32..3.0,
            az in -3.0f32..3.0,
            tx in -100.0f32..100.0,
            ty in -100.0f32..100.0,
            tz in -100.0f32..100.0,
        ) {
            let pose = convert(
                &[ax, ay, az],
                Vec3::new(tx, ty, tz),
                RotationParam::EulerAngles,
                Some(EulerConvention::Zyx),
            ).unwrap();
            let p = Vec3::new(0.5, -1.5, 2.5);
            let back = pose.inverse().apply_point(pose.apply_point(p));
            prop_assert!(back.abs_diff_eq(p, 1e-3));
        }
    }
}
