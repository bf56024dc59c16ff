/// Sum-of-squares cost pieces. The network sums `term` over output units and
/// dataset rows, then divides by the row count: mean over samples, sum over
/// output dimensions.
pub struct MseLoss;

impl MseLoss {
    /// Squared error of one output unit.
    pub fn term(predicted: f32, expected: f32) -> f32 {
        let d = predicted - expected;
        d * d
    }

    /// d/d(predicted) of `(predicted − expected)²`, the seed of the
    /// backward pass: `2·(predicted − expected)`.
    pub fn derivative(predicted: f32, expected: f32) -> f32 {
        2.0 * (predicted - expected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn term_is_zero_only_for_a_perfect_fit() {
        assert_eq!(MseLoss::term(0.5, 0.5), 0.0);
        assert!(MseLoss::term(0.9, 0.1) > 0.0);
        assert_eq!(MseLoss::term(1.0, 0.0), MseLoss::term(0.0, 1.0));
    }

    #[test]
    fn derivative_is_signed_twice_the_error() {
        assert_eq!(MseLoss::derivative(0.75, 0.25), 1.0);
        assert_eq!(MseLoss::derivative(0.25, 0.75), -1.0);
    }
}
