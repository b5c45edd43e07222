//! Property-based tests for matrices and exact decimals.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::{io, DenseMatrix, ExactDecimal};

    // Strategy for small non-empty matrices with moderate entries
    fn matrix() -> impl Strategy<Value = DenseMatrix> {
        (1usize..6, 1usize..6).prop_flat_map(|(r, c)| {
            prop::collection::vec(-100.0f64..100.0, r * c)
                .prop_map(move |data| DenseMatrix::from_shape_vec((r, c), data).unwrap())
        })
    }

    // Strategy for strictly diagonally dominant square matrices, which are always invertible
    fn dominant_matrix() -> impl Strategy<Value = DenseMatrix> {
        (1usize..8).prop_flat_map(|n| {
            prop::collection::vec(-1.0f64..1.0, n * n).prop_map(move |data| {
                let mut m = DenseMatrix::from_shape_vec((n, n), data).unwrap();
                for i in 0..n {
                    m[(i, i)] += n as f64 + 1.0;
                }
                m
            })
        })
    }

    // A decimal with `scale` fraction digits, equal to `value / 10^scale`
    fn scaled(value: i64, scale: u32) -> ExactDecimal {
        let unit = 10i64.pow(scale);
        let sign = if value < 0 { "-" } else { "" };
        let abs = value.abs();
        format!(
            "{}{}.{:0width$}",
            sign,
            abs / unit,
            abs % unit,
            width = scale as usize
        )
        .parse()
        .unwrap()
    }

    // Strategy for matrices whose entries span the whole finite range of `f64`
    fn wide_matrix() -> impl Strategy<Value = DenseMatrix> {
        (1usize..5, 1usize..5).prop_flat_map(|(r, c)| {
            let value = prop::num::f64::NORMAL | prop::num::f64::SUBNORMAL | prop::num::f64::ZERO;
            prop::collection::vec(value, r * c)
                .prop_map(move |data| DenseMatrix::from_shape_vec((r, c), data).unwrap())
        })
    }

    fn hundredths() -> impl Strategy<Value = i64> {
        -10_000_000i64..10_000_000i64
    }

    // A fixed-point value with its own number of fraction digits
    fn fixed_point() -> impl Strategy<Value = (i64, u32)> {
        (-10_000_000i64..10_000_000i64, 0u32..6)
    }

    proptest! {
        // Matrix structure

        #[test]
        fn transpose_is_involution(m in matrix()) {
            prop_assert_eq!(m.transpose().transpose(), m);
        }

        #[test]
        fn reshape_round_trips(m in matrix()) {
            let (r, c) = m.shape();
            let mut n = m.clone();
            n.reshape((c, r)).unwrap();
            prop_assert_eq!(n.as_slice(), m.as_slice());
            n.reshape((r, c)).unwrap();
            prop_assert_eq!(n, m);
        }

        #[test]
        fn text_format_round_trips(m in wide_matrix()) {
            prop_assert_eq!(m.to_text().parse::<DenseMatrix>().unwrap(), m);
        }

        #[test]
        fn json_round_trips_exactly(m in wide_matrix()) {
            let json = io::to_json_string(&m).unwrap();
            prop_assert_eq!(io::from_json_str(&json).unwrap(), m);
        }

        // Matrix arithmetic

        #[test]
        fn add_negation_is_zero(m in matrix()) {
            let z = &m + &(-&m);
            prop_assert_eq!(z.shape(), m.shape());
            prop_assert!(z.iter().all(|x| x == 0.0));
        }

        #[test]
        fn transpose_reverses_product(a in matrix(), b in matrix()) {
            let b = DenseMatrix::build(a.cols(), b.rows(), |i, j| b[(j % b.rows(), i % b.cols())]);
            let left = a.try_mul(&b).unwrap().transpose();
            let right = b.transpose().try_mul(&a.transpose()).unwrap();
            prop_assert_eq!(left.shape(), right.shape());
            for (x, y) in left.iter().zip(right.iter()) {
                prop_assert!((x - y).abs() < 1e-9);
            }
        }

        // Elimination

        #[test]
        fn inverse_of_dominant_matrix(m in dominant_matrix()) {
            let inv = m.inverse().unwrap().unwrap();
            let product = m.try_mul(&inv).unwrap();
            let id = DenseMatrix::identity(m.rows());
            for (x, y) in product.iter().zip(id.iter()) {
                prop_assert!((x - y).abs() < 1e-9);
            }
        }

        #[test]
        fn det_invariant_under_transpose(m in dominant_matrix()) {
            let d = m.det().unwrap();
            let dt = m.transpose().det().unwrap();
            prop_assert!((d - dt).abs() <= 1e-9 * d.abs().max(1.0));
        }

        #[test]
        fn dominant_matrix_has_full_rank(m in dominant_matrix()) {
            prop_assert_eq!(m.rank(), m.rows());
        }

        // Exact decimal arithmetic agrees with scaled integers

        #[test]
        fn decimal_add_exact(a in hundredths(), b in hundredths()) {
            prop_assert_eq!(scaled(a, 2) + scaled(b, 2), scaled(a + b, 2));
        }

        #[test]
        fn decimal_sub_exact(a in hundredths(), b in hundredths()) {
            prop_assert_eq!(scaled(a, 2) - scaled(b, 2), scaled(a - b, 2));
        }

        #[test]
        fn decimal_mul_exact(a in hundredths(), b in hundredths()) {
            prop_assert_eq!(scaled(a, 2) * scaled(b, 2), scaled(a * b, 4));
        }

        #[test]
        fn decimal_add_sub_mixed_scales((a, sa) in fixed_point(), (b, sb) in fixed_point()) {
            let scale = sa.max(sb);
            let a_aligned = a * 10i64.pow(scale - sa);
            let b_aligned = b * 10i64.pow(scale - sb);
            prop_assert_eq!(scaled(a, sa) + scaled(b, sb), scaled(a_aligned + b_aligned, scale));
            prop_assert_eq!(scaled(a, sa) - scaled(b, sb), scaled(a_aligned - b_aligned, scale));
        }

        #[test]
        fn decimal_mul_mixed_scales((a, sa) in fixed_point(), (b, sb) in fixed_point()) {
            prop_assert_eq!(scaled(a, sa) * scaled(b, sb), scaled(a * b, sa + sb));
        }

        #[test]
        fn decimal_order_matches_integers(a in hundredths(), b in hundredths()) {
            prop_assert_eq!(scaled(a, 2).cmp(&scaled(b, 2)), a.cmp(&b));
        }

        #[test]
        fn decimal_display_round_trips(a in hundredths()) {
            let x = scaled(a, 2);
            prop_assert_eq!(x.to_string().parse::<ExactDecimal>().unwrap(), x);
        }
    }
}
