use crate::core::glam::{IVec3, Vec3A};

/// How one axis of a continuous point is snapped onto the voxel grid.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Round {
    Floor,
    Ceil,
    /// Round half away from zero.
    Nearest,
}

impl Round {
    #[inline]
    fn apply(self, x: f32) -> f32 {
        match self {
            Round::Floor => x.floor(),
            Round::Ceil => x.ceil(),
            Round::Nearest => x.round(),
        }
    }
}

/// A per-axis rounding strategy. The closed set of strategies readers use is provided as constants.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Rounding(pub [Round; 3]);

impl Rounding {
    pub const FLOOR: Self = Self([Round::Floor; 3]);
    pub const NEAREST: Self = Self([Round::Nearest; 3]);

    /// The eight corners of an interpolation cell. Corner `i` takes the ceiling on X when bit 0 of `i` is set, on Y for
    /// bit 1 and on Z for bit 2, so corner 0 is the all-floor anchor.
    pub const CORNERS: [Self; 8] = [
        Self([Round::Floor, Round::Floor, Round::Floor]),
        Self([Round::Ceil, Round::Floor, Round::Floor]),
        Self([Round::Floor, Round::Ceil, Round::Floor]),
        Self([Round::Ceil, Round::Ceil, Round::Floor]),
        Self([Round::Floor, Round::Floor, Round::Ceil]),
        Self([Round::Ceil, Round::Floor, Round::Ceil]),
        Self([Round::Floor, Round::Ceil, Round::Ceil]),
        Self([Round::Ceil, Round::Ceil, Round::Ceil]),
    ];

    /// The coordinates, in voxels of edge length `voxel_size`, of the voxel that `point` (given in finest-level voxel
    /// units) rounds to.
    #[inline]
    pub fn voxel_at(self, point: Vec3A, voxel_size: i32) -> IVec3 {
        let scaled = point / voxel_size as f32;
        let [rx, ry, rz] = self.0;
        IVec3::new(
            rx.apply(scaled.x) as i32,
            ry.apply(scaled.y) as i32,
            rz.apply(scaled.z) as i32,
        )
    }

    /// `point` snapped onto the grid of voxels with edge length `voxel_size`, in finest-level voxel units.
    #[inline]
    pub fn snap(self, point: Vec3A, voxel_size: i32) -> Vec3A {
        self.voxel_at(point, voxel_size).as_vec3a() * voxel_size as f32
    }
}

// ████████╗███████╗███████╗████████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝
//    ██║   █████╗  ███████╗   ██║
//    ██║   ██╔══╝  ╚════██║   ██║
//    ██║   ███████╗███████║   ██║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn corners_span_unit_cell() {
        let p = Vec3A::new(1.25, -0.5, 3.75);
        let anchor = Rounding::CORNERS[0].voxel_at(p, 1);
        assert_eq!(anchor, IVec3::new(1, -1, 3));
        for (i, rounding) in Rounding::CORNERS.iter().enumerate() {
            let offset = IVec3::new((i & 1) as i32, ((i >> 1) & 1) as i32, ((i >> 2) & 1) as i32);
            assert_eq!(rounding.voxel_at(p, 1), anchor + offset);
        }
    }

    #[test]
    fn coarse_voxel_sizes() {
        let p = Vec3A::new(5.0, -3.0, 0.5);
        assert_eq!(Rounding::FLOOR.voxel_at(p, 2), IVec3::new(2, -2, 0));
        assert_eq!(Rounding::FLOOR.snap(p, 2), Vec3A::new(4.0, -4.0, 0.0));
        assert_eq!(Rounding::CORNERS[7].snap(p, 4), Vec3A::new(8.0, 0.0, 4.0));
    }

    #[test]
    fn nearest_rounds_half_away_from_zero() {
        let p = Vec3A::new(0.5, -0.5, 1.49);
        assert_eq!(Rounding::NEAREST.voxel_at(p, 1), IVec3::new(1, -1, 1));
    }
}
