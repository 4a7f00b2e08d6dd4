use std::ops::{Mul, Sub};

/// Pivots with a magnitude at or below this value are treated as singular.
pub const SINGULAR_PIVOT_EPSILON: f32 = 1e-6;

/// Solves `A x = b` with Gaussian elimination and partial pivoting.
///
/// The right-hand side may be any vector-like `T` (a scalar, or an RGB triple), which lets one factorization serve every
/// channel. Returns `None` instead of propagating NaNs when `A` is singular or nearly so.
pub fn solve_linear_system<T, const N: usize>(mut a: [[f32; N]; N], mut b: [T; N]) -> Option<[T; N]>
where
    T: Copy + Default + Sub<Output = T> + Mul<f32, Output = T>,
{
    for col in 0..N {
        let pivot_row = (col..N).max_by(|&i, &j| a[i][col].abs().total_cmp(&a[j][col].abs()))?;
        let pivot = a[pivot_row][col];
        if !(pivot.abs() > SINGULAR_PIVOT_EPSILON) {
            return None;
        }
        a.swap(col, pivot_row);
        b.swap(col, pivot_row);

        let pivot_coeffs = a[col];
        let pivot_rhs = b[col];
        for row in (col + 1)..N {
            let factor = a[row][col] / pivot;
            if factor == 0.0 {
                continue;
            }
            for (k, coeff) in a[row].iter_mut().enumerate().skip(col) {
                *coeff -= factor * pivot_coeffs[k];
            }
            b[row] = b[row] - pivot_rhs * factor;
        }
    }

    let mut x = [T::default(); N];
    for row in (0..N).rev() {
        let mut acc = b[row];
        for k in (row + 1)..N {
            acc = acc - x[k] * a[row][k];
        }
        x[row] = acc * a[row][row].recip();
    }

    Some(x)
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
    use crate::glam::Vec3A;

    use approx::assert_relative_eq;

    #[test]
    fn solves_diagonal_system() {
        let a = [[2.0, 0.0, 0.0], [0.0, 4.0, 0.0], [0.0, 0.0, 0.5]];
        let x = solve_linear_system(a, [2.0f32, 2.0, 2.0]).unwrap();
        assert_relative_eq!(x[0], 1.0);
        assert_relative_eq!(x[1], 0.5);
        assert_relative_eq!(x[2], 4.0);
    }

    #[test]
    fn pivots_past_zero_leading_coefficient() {
        // Without row exchange the first pivot would be zero.
        let a = [[0.0, 1.0], [1.0, 1.0]];
        let x = solve_linear_system(a, [3.0f32, 5.0]).unwrap();
        assert_relative_eq!(x[0], 2.0);
        assert_relative_eq!(x[1], 3.0);
    }

    #[test]
    fn solves_vector_right_hand_side() {
        let a = [[1.0, 1.0], [1.0, -1.0]];
        let b = [Vec3A::new(3.0, 4.0, 5.0), Vec3A::new(1.0, 0.0, -1.0)];
        let x = solve_linear_system(a, b).unwrap();
        assert_relative_eq!(x[0].x, 2.0);
        assert_relative_eq!(x[0].y, 2.0);
        assert_relative_eq!(x[0].z, 2.0);
        assert_relative_eq!(x[1].x, 1.0);
        assert_relative_eq!(x[1].y, 2.0);
        assert_relative_eq!(x[1].z, 3.0);
    }

    #[test]
    fn singular_system_is_rejected() {
        let a = [[1.0, 2.0], [2.0, 4.0]];
        assert!(solve_linear_system(a, [1.0f32, 2.0]).is_none());
    }

    #[test]
    fn nan_coefficients_are_rejected() {
        let a = [[f32::NAN, 0.0], [0.0, 1.0]];
        assert!(solve_linear_system(a, [1.0f32, 2.0]).is_none());
    }
}
