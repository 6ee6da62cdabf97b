///
/// log-domain probability
/// multiplication of long chains of small probabilities without underflow
///
use approx::AbsDiffEq;
use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::str::FromStr;

///
/// Non-negative real `x` stored as `ln(x)`.
///
/// `x = 0` is the distinguished zero, stored as `-inf`, so that
/// multiplication and ordering need no special cases:
/// `-inf + y = -inf` and `-inf < y` for every finite `y`.
///
#[derive(Clone, Copy, Debug, SerializeDisplay, DeserializeFromStr)]
pub struct LogProb(f64);

///
/// short-hand of `LogProb::from_prob`
///
pub fn p(p: f64) -> LogProb {
    LogProb::from_prob(p)
}

///
/// short-hand of `LogProb::from_log_prob`
///
pub fn lp(lp: f64) -> LogProb {
    LogProb::from_log_prob(lp)
}

impl LogProb {
    ///
    /// `x <= 0` (and NaN) becomes zero.
    ///
    pub fn from_prob(value: f64) -> LogProb {
        if value > 0.0 {
            LogProb(value.ln())
        } else {
            LogProb::zero()
        }
    }
    ///
    /// NaN becomes zero, and `-0.0` is stored as `0.0`.
    ///
    pub fn from_log_prob(log_value: f64) -> LogProb {
        if log_value.is_nan() {
            LogProb::zero()
        } else {
            LogProb(log_value + 0.0)
        }
    }
    ///
    /// Get the real value.
    ///
    /// `expm1(x) + 1` keeps precision for values close to 1, where most
    /// trained transition probabilities sit.
    pub fn to_value(self) -> f64 {
        if self.is_zero() {
            0.0
        } else {
            self.0.exp_m1() + 1.0
        }
    }
    ///
    /// Get the log value (`-inf` for zero)
    pub fn to_log_value(self) -> f64 {
        self.0
    }
    ///
    /// Is `p == 0` or not? (log p = -inf)
    ///
    pub fn is_zero(self) -> bool {
        self.0.is_infinite() && self.0.is_sign_negative()
    }
    ///
    /// Is `p == 1`? (log p = 0)
    ///
    pub fn is_one(self) -> bool {
        self.0 == 0.0
    }
    ///
    /// p=0.0
    ///
    pub fn zero() -> LogProb {
        LogProb(f64::NEG_INFINITY)
    }
    ///
    /// p=1.0
    ///
    pub fn one() -> LogProb {
        LogProb(0.0)
    }
    ///
    /// `self > other`.
    /// zero is never greater than anything, and anything non-zero is greater than zero.
    ///
    pub fn is_greater_than(self, other: LogProb) -> bool {
        !self.is_zero() && (other.is_zero() || self.0 > other.0)
    }
    ///
    /// product of any number of values, folded left to right
    ///
    pub fn product_of<I: IntoIterator<Item = LogProb>>(values: I) -> LogProb {
        values.into_iter().fold(LogProb::one(), |acc, x| acc * x)
    }
}

/// p=0 (LogProb(-inf)) as a default value
impl Default for LogProb {
    fn default() -> Self {
        LogProb::zero()
    }
}

impl num_traits::One for LogProb {
    fn one() -> Self {
        LogProb::one()
    }
}

impl num_traits::Zero for LogProb {
    fn zero() -> Self {
        LogProb::zero()
    }
    fn is_zero(&self) -> bool {
        LogProb::is_zero(*self)
    }
}

///
/// `{log value}({real value})`, real value with 6 digits
///
impl std::fmt::Display for LogProb {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}({:.6})", self.0, self.to_value())
    }
}

impl FromStr for LogProb {
    type Err = std::num::ParseFloatError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let front = match s.split_once('(') {
            Some((front, _)) => front,
            None => s,
        };
        front.trim().parse::<f64>().map(LogProb::from_log_prob)
    }
}

/// Addition of two probabilities `px + py` in log space
///
/// If `px > py`:
///
/// ```text
/// log(exp(x) + exp(y))
///  = x + log(1 + exp(y-x))
/// ```
impl std::ops::Add for LogProb {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        let x = self.0;
        let y = other.0;
        let (x, y) = if x >= y { (x, y) } else { (y, x) };
        if y == f64::NEG_INFINITY {
            LogProb(x)
        } else {
            LogProb(x + (y - x).exp().ln_1p())
        }
    }
}

/// Multiplication of two probabilities `px * py` in log space
///
/// ```text
/// log(px * py) = log(px) + log(py)
/// ```
impl std::ops::Mul for LogProb {
    type Output = Self;
    fn mul(self, other: Self) -> Self {
        if self.is_zero() || other.is_zero() {
            LogProb::zero()
        } else {
            LogProb(self.0 + other.0)
        }
    }
}

impl std::ops::AddAssign for LogProb {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}
impl std::ops::MulAssign for LogProb {
    fn mul_assign(&mut self, other: Self) {
        *self = *self * other;
    }
}
impl std::iter::Sum for LogProb {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(LogProb::zero(), |a, b| a + b)
    }
}
impl<'a> std::iter::Sum<&'a Self> for LogProb {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.fold(LogProb::zero(), |a, b| a + *b)
    }
}
impl std::iter::Product for LogProb {
    fn product<I: Iterator<Item = Self>>(iter: I) -> Self {
        LogProb::product_of(iter)
    }
}
impl<'a> std::iter::Product<&'a Self> for LogProb {
    fn product<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        LogProb::product_of(iter.copied())
    }
}

/// for approx `assert_abs_diff_eq`
impl AbsDiffEq for LogProb {
    type Epsilon = f64;

    fn default_epsilon() -> Self::Epsilon {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        if self.is_zero() || other.is_zero() {
            self.is_zero() == other.is_zero()
        } else {
            f64::abs_diff_eq(&self.0, &other.0, epsilon)
        }
    }
}

// NaN never enters a LogProb, so the order is total.
// Equality and ordering both follow `total_cmp`.
impl PartialEq for LogProb {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == std::cmp::Ordering::Equal
    }
}
impl Eq for LogProb {}
impl PartialOrd for LogProb {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for LogProb {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn zero_from_non_positive() {
        assert!(p(0.0).is_zero());
        assert!(p(-1.0).is_zero());
        assert!(p(f64::NAN).is_zero());
        assert!(!p(0.00001).is_zero());
        assert_eq!(LogProb::zero(), p(0.0));
        assert_eq!(LogProb::one(), p(1.0));
    }
    #[test_case(0.3, 0.3 ; "equal")]
    #[test_case(0.5, 0.00001 ; "small and mid")]
    #[test_case(1.0, 0.25 ; "one")]
    #[test_case(1e-200, 1e-200 ; "underflowing product")]
    #[test_case(0.0, 0.7 ; "left zero")]
    #[test_case(0.7, 0.0 ; "right zero")]
    fn mul_renders_to_product(x: f64, y: f64) {
        let z = p(x) * p(y);
        if x == 0.0 || y == 0.0 {
            assert!(z.is_zero());
        } else {
            assert_relative_eq!(z.to_log_value(), x.ln() + y.ln(), max_relative = 1e-12);
        }
        assert_relative_eq!(z.to_value(), x * y, max_relative = 1e-12);
    }
    #[test]
    fn zero_absorbs() {
        let z = LogProb::zero();
        assert!((z * p(0.5)).is_zero());
        assert!((p(0.5) * z).is_zero());
        assert!((z * z).is_zero());
        assert!(LogProb::product_of(vec![p(0.9), p(0.0), p(0.9)]).is_zero());
    }
    #[test]
    fn greater_than() {
        let z = LogProb::zero();
        assert!(!z.is_greater_than(z));
        assert!(!z.is_greater_than(p(1e-300)));
        assert!(p(1e-300).is_greater_than(z));
        assert!(p(0.2).is_greater_than(p(0.1)));
        assert!(!p(0.1).is_greater_than(p(0.1)));
        assert!(!p(0.1).is_greater_than(p(0.2)));
    }
    #[test]
    fn long_chain_does_not_underflow() {
        // 0.01^500 = 1e-1000 is far below f64::MIN_POSITIVE
        let x: LogProb = (0..500).map(|_| p(0.01)).product();
        assert!(!x.is_zero());
        assert_relative_eq!(x.to_log_value(), 500.0 * 0.01f64.ln(), max_relative = 1e-12);
        let y: LogProb = (0..501).map(|_| p(0.01)).product();
        assert!(x.is_greater_than(y));
        assert!(y.is_greater_than(LogProb::zero()));
    }
    #[test]
    fn variadic_product_is_left_fold() {
        let xs = [p(0.1), p(0.2), p(0.3)];
        let a = LogProb::product_of(xs.iter().copied());
        let b = (xs[0] * xs[1]) * xs[2];
        assert_abs_diff_eq!(a, b, epsilon = 1e-12);
        let empty: Vec<LogProb> = vec![];
        assert!(LogProb::product_of(empty).is_one());
    }
    #[test]
    fn sum_in_log_space() {
        let xs = vec![p(0.1), p(0.1), p(0.1)];
        let x: LogProb = xs.iter().sum();
        assert_relative_eq!(x.to_value(), 0.3, max_relative = 1e-12);
        assert_eq!(p(0.0) + p(1.0), p(1.0));
        let mut y = p(0.4);
        y += p(0.2);
        assert_abs_diff_eq!(y, p(0.6), epsilon = 1e-12);
        y *= p(0.5);
        assert_abs_diff_eq!(y, p(0.3), epsilon = 1e-12);
    }
    #[test]
    fn render_near_one() {
        let x = lp(-1e-17);
        assert!(x.to_value() <= 1.0);
        assert_abs_diff_eq!(x.to_value(), 1.0, epsilon = 1e-15);
        assert_eq!(LogProb::zero().to_value(), 0.0);
    }
    #[test]
    fn sort() {
        let mut ps = vec![p(0.9), p(0.2), p(0.5), p(0.1), p(1.0), p(0.0)];
        ps.sort();
        assert_eq!(ps[0], p(0.0));
        assert_eq!(ps[1], p(0.1));
        assert_eq!(ps[5], p(1.0));
        assert_eq!(*ps.iter().max().unwrap(), p(1.0));
    }
    #[test]
    fn display_and_serialize() {
        for x in [LogProb::one(), p(0.5), LogProb::zero()] {
            assert_eq!(LogProb::from_str(&x.to_string()).unwrap(), x);
            let json = serde_json::to_string(&x).unwrap();
            let y: LogProb = serde_json::from_str(&json).unwrap();
            assert_eq!(x, y);
        }
    }
    #[test]
    fn negative_zero_log_is_one() {
        let a = lp(-0.0);
        let b = lp(0.0);
        assert_eq!(a, b);
        assert_eq!(a.cmp(&b), std::cmp::Ordering::Equal);
        assert_eq!(a.partial_cmp(&b), Some(std::cmp::Ordering::Equal));
        assert!(a.is_one());
        assert!(a.to_log_value().is_sign_positive());
        assert!(lp(-1e-300) < a);
    }
}
