use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector2 {
    pub x: f64,
    pub y: f64,
}

impl Point2 {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn distance_to(self, other: Point2) -> f64 {
        (other - self).length()
    }

    #[must_use]
    pub fn translate(self, v: Vector2) -> Point2 {
        Point2::new(self.x + v.x, self.y + v.y)
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl std::ops::Sub for Point2 {
    type Output = Vector2;

    fn sub(self, rhs: Point2) -> Vector2 {
        Vector2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Vector2 {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }

    #[must_use]
    pub fn dot(self, other: Vector2) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// z component of the 3D cross product.
    #[must_use]
    pub fn cross(self, other: Vector2) -> f64 {
        self.x * other.y - self.y * other.x
    }

    #[must_use]
    pub fn add(self, other: Vector2) -> Vector2 {
        Vector2::new(self.x + other.x, self.y + other.y)
    }

    #[must_use]
    pub fn scale(self, s: f64) -> Vector2 {
        Vector2::new(self.x * s, self.y * s)
    }

    /// Unit vector in the same direction, or `None` for a zero-length vector.
    #[must_use]
    pub fn normalized(self) -> Option<Vector2> {
        let len = self.length();
        if len <= f64::EPSILON || !len.is_finite() {
            return None;
        }
        Some(self.scale(1.0 / len))
    }

    /// Counter-clockwise perpendicular.
    #[must_use]
    pub fn perp(self) -> Vector2 {
        Vector2::new(-self.y, self.x)
    }

    /// Unsigned angle to `other` in radians, `0.0` when either vector is degenerate.
    #[must_use]
    pub fn angle_to(self, other: Vector2) -> f64 {
        if self.length() <= f64::EPSILON || other.length() <= f64::EPSILON {
            return 0.0;
        }
        self.cross(other).abs().atan2(self.dot(other))
    }

    /// Direction angle in radians, measured counter-clockwise from +x.
    #[must_use]
    pub fn angle(self) -> f64 {
        self.y.atan2(self.x)
    }

    #[must_use]
    pub fn rotate(self, angle_deg: f64) -> Vector2 {
        let (s, c) = angle_deg.to_radians().sin_cos();
        Vector2::new(self.x * c - self.y * s, self.x * s + self.y * c)
    }
}

/// Rigid 2D motion: rotation about the origin followed by a translation.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Transform2 {
    pub rotation_deg: f64,
    pub translation: Vector2,
}

impl Transform2 {
    pub const IDENTITY: Transform2 = Transform2 {
        rotation_deg: 0.0,
        translation: Vector2::new(0.0, 0.0),
    };

    #[must_use]
    pub fn new(rotation_deg: f64, translation: Vector2) -> Self {
        Self {
            rotation_deg,
            translation,
        }
    }

    #[must_use]
    pub fn apply(&self, p: Point2) -> Point2 {
        let rotated = Vector2::new(p.x, p.y).rotate(self.rotation_deg);
        Point2::new(
            rotated.x + self.translation.x,
            rotated.y + self.translation.y,
        )
    }

    /// `self` first, then `next`.
    #[must_use]
    pub fn then(&self, next: &Transform2) -> Transform2 {
        Transform2 {
            rotation_deg: self.rotation_deg + next.rotation_deg,
            translation: self
                .translation
                .rotate(next.rotation_deg)
                .add(next.translation),
        }
    }
}
