/// 2×2 rotation derived from an angle in degrees.
///
/// Stored column-major to match WGSL `mat2x2<f32>`: `cols[0] = (cos θ, sin θ)`,
/// `cols[1] = (-sin θ, cos θ)`. Applying it rotates a point counter-clockwise.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RotationMatrix {
    pub cols: [[f32; 2]; 2],
}

impl RotationMatrix {
    pub const IDENTITY: Self = Self {
        cols: [[1.0, 0.0], [0.0, 1.0]],
    };

    pub fn from_degrees(angle: f32) -> Self {
        let (sin, cos) = angle.to_radians().sin_cos();
        Self {
            cols: [[cos, sin], [-sin, cos]],
        }
    }

    /// Returns `R · p`.
    #[inline]
    pub fn apply(&self, [x, y]: [f32; 2]) -> [f32; 2] {
        let [c0, c1] = self.cols;
        [c0[0] * x + c1[0] * y, c0[1] * x + c1[1] * y]
    }

    /// Column-major flat layout for uniform upload.
    #[inline]
    pub fn to_cols_array(&self) -> [f32; 4] {
        let [c0, c1] = self.cols;
        [c0[0], c0[1], c1[0], c1[1]]
    }
}

impl Default for RotationMatrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: [f32; 2], b: [f32; 2]) -> bool {
        (a[0] - b[0]).abs() < 1e-6 && (a[1] - b[1]).abs() < 1e-6
    }

    #[test]
    fn zero_degrees_is_identity() {
        assert_eq!(RotationMatrix::from_degrees(0.0), RotationMatrix::IDENTITY);
    }

    #[test]
    fn quarter_turn_is_counter_clockwise() {
        let r = RotationMatrix::from_degrees(90.0);
        assert!(close(r.apply([1.0, 0.0]), [0.0, 1.0]));
        assert!(close(r.apply([0.0, 1.0]), [-1.0, 0.0]));
    }

    #[test]
    fn full_turn_wraps() {
        let r = RotationMatrix::from_degrees(360.0);
        assert!(close(r.apply([0.3, -0.7]), [0.3, -0.7]));
    }

    #[test]
    fn cols_array_is_column_major() {
        let r = RotationMatrix::from_degrees(30.0);
        let (s, c) = 30f32.to_radians().sin_cos();
        assert_eq!(r.to_cols_array(), [c, s, -s, c]);
    }
}
