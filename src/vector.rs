use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

/// A 3D cartesian vector, used for earth-centered-earth-fixed (ECEF)
/// coordinate math in the datum shift pipeline.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vector {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector {
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Vector {
        Vector { x, y, z }
    }

    /// Multiply by a scalar (also available as `v * factor`)
    #[must_use]
    pub fn scale(&self, factor: f64) -> Vector {
        Vector::new(self.x * factor, self.y * factor, self.z * factor)
    }

    /// Scalar product
    #[must_use]
    pub fn dot(&self, other: Vector) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Vector product
    #[must_use]
    pub fn cross(&self, other: Vector) -> Vector {
        Vector::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    /// The euclidean norm
    #[must_use]
    pub fn length(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// The corresponding unit vector. Unimodular and zero-length vectors
    /// are returned unchanged.
    #[must_use]
    pub fn unit(&self) -> Vector {
        let norm = self.length();
        if norm == 1.0 || norm == 0.0 {
            return *self;
        }
        self.scale(1.0 / norm)
    }

    /// The angle to `other`, in radians. When `plane_normal` is given, the
    /// angle is signed with respect to that normal; otherwise it is the
    /// unsigned angle in [0, π].
    #[must_use]
    pub fn angle_to(&self, other: Vector, plane_normal: Option<Vector>) -> f64 {
        let sign = match plane_normal {
            Some(normal) => self.cross(other).dot(normal).signum(),
            None => 1.0,
        };
        let sin_theta = self.cross(other).length() * sign;
        let cos_theta = self.dot(other);
        sin_theta.atan2(cos_theta)
    }

    /// Rotate the direction of this vector about `axis` by `theta` radians.
    /// The result is a unit vector.
    #[must_use]
    pub fn rotate_around(&self, axis: Vector, theta: f64) -> Vector {
        let p = self.unit();
        let a = axis.unit();
        let (s, c) = theta.sin_cos();

        // Rodrigues rotation matrix
        #[rustfmt::skip]
        let q = [
            [a.x * a.x * (1. - c) + c,       a.x * a.y * (1. - c) - a.z * s, a.x * a.z * (1. - c) + a.y * s],
            [a.y * a.x * (1. - c) + a.z * s, a.y * a.y * (1. - c) + c,       a.y * a.z * (1. - c) - a.x * s],
            [a.z * a.x * (1. - c) - a.y * s, a.z * a.y * (1. - c) + a.x * s, a.z * a.z * (1. - c) + c      ],
        ];

        Vector::new(
            q[0][0] * p.x + q[0][1] * p.y + q[0][2] * p.z,
            q[1][0] * p.x + q[1][1] * p.y + q[1][2] * p.z,
            q[2][0] * p.x + q[2][1] * p.y + q[2][2] * p.z,
        )
    }
}

impl Add for Vector {
    type Output = Vector;
    fn add(self, other: Vector) -> Vector {
        Vector::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl Sub for Vector {
    type Output = Vector;
    fn sub(self, other: Vector) -> Vector {
        Vector::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl Neg for Vector {
    type Output = Vector;
    fn neg(self) -> Vector {
        Vector::new(-self.x, -self.y, -self.z)
    }
}

impl Mul<f64> for Vector {
    type Output = Vector;
    fn mul(self, factor: f64) -> Vector {
        self.scale(factor)
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:.5}, {:.5}, {:.5}]", self.x, self.y, self.z)
    }
}

// ----- T E S T S ---------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use float_eq::assert_float_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn arithmetic() {
        let a = Vector::new(1., 2., 3.);
        let b = Vector::new(4., 3., 0.);
        assert_eq!(a + b, Vector::new(5., 5., 3.));
        assert_eq!(a - b, Vector::new(-3., -1., 3.));
        assert_eq!(-a, Vector::new(-1., -2., -3.));
        assert_eq!(a * 2., Vector::new(2., 4., 6.));
        assert_eq!(a.dot(b), 10.);
        assert_eq!(a.cross(b), Vector::new(-9., 12., -5.));
    }

    #[test]
    fn norms() {
        let v = Vector::new(3., 4., 12.);
        assert_eq!(v.length(), 13.);
        assert_float_eq!(v.unit().length(), 1.0, abs <= 1e-15);
        assert_eq!(Vector::default().unit(), Vector::default());
    }

    #[test]
    fn angles() {
        let x = Vector::new(1., 0., 0.);
        let y = Vector::new(0., 1., 0.);
        let z = Vector::new(0., 0., 1.);
        assert_float_eq!(x.angle_to(y, None), FRAC_PI_2, abs <= 1e-15);
        // The plane normal fixes the sign
        assert_float_eq!(y.angle_to(x, Some(z)), -FRAC_PI_2, abs <= 1e-15);
    }

    #[test]
    fn rotation() {
        let x = Vector::new(1., 0., 0.);
        let z = Vector::new(0., 0., 1.);
        let r = x.rotate_around(z, FRAC_PI_2);
        assert_float_eq!(r.x, 0.0, abs <= 1e-15);
        assert_float_eq!(r.y, 1.0, abs <= 1e-15);
        assert_float_eq!(r.z, 0.0, abs <= 1e-15);
    }
}
