use glam::Vec3;

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    /// Minimum corner.
    pub min: Vec3,
    /// Maximum corner.
    pub max: Vec3,
}

impl BoundingBox {
    /// Box that contains nothing; including any point makes it non-empty.
    pub const EMPTY: Self = Self {
        min: Vec3::INFINITY,
        max: Vec3::NEG_INFINITY,
    };

    /// Box spanning two corners (order-independent).
    #[must_use]
    pub fn new(a: Vec3, b: Vec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Smallest box containing every point. Non-finite points are skipped.
    #[must_use]
    pub fn from_points<I>(points: I) -> Self
    where
        I: IntoIterator<Item = Vec3>,
    {
        points.into_iter().fold(Self::EMPTY, |mut bounds, p| {
            bounds.include(p);
            bounds
        })
    }

    /// Grow to contain `point`.
    pub fn include(&mut self, point: Vec3) {
        if !point.is_finite() {
            return;
        }
        self.min = self.min.min(point);
        self.max = self.max.max(point);
    }

    /// Smallest box containing both.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Whether no point has been included.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.min.cmpgt(self.max).any()
    }

    /// Edge lengths. Zero for an empty box.
    #[must_use]
    pub fn size(&self) -> Vec3 {
        if self.is_empty() {
            Vec3::ZERO
        } else {
            self.max - self.min
        }
    }

    /// Center point. The origin for an empty box.
    #[must_use]
    pub fn center(&self) -> Vec3 {
        if self.is_empty() {
            Vec3::ZERO
        } else {
            (self.min + self.max) * 0.5
        }
    }

    /// Translation that moves the box center onto the origin.
    #[must_use]
    pub fn center_offset(&self) -> Vec3 {
        -self.center()
    }

    /// This box moved by `offset`.
    #[must_use]
    pub fn translated(&self, offset: Vec3) -> Self {
        if self.is_empty() {
            return *self;
        }
        Self {
            min: self.min + offset,
            max: self.max + offset,
        }
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::EMPTY
    }
}
