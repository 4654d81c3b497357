use std::cmp::{Eq, Ord, Ordering, PartialEq, PartialOrd};
use std::convert::TryInto;
use std::fmt;
use Number::*;

/// A numerical scalar.
///
/// `Number` captures the numeric leaves of a configuration tree: _unsigned integers_,
/// _signed integers_, and _floating point decimal_ numbers. The data is stored inside an enum
/// housing the maximum size of each numerical type (128 bits for integers, 64 bits for floats).
/// The numbers are canonicalized, that is `Eq` and `Ord` are implemented and comparisons can be
/// made between integers and floats.
///
/// The number line extends from negative infinity, through zero, to positive infinity. Nan is
/// above positive infinity. All zeroes are treated equally (`-0 == +0`), as well as all Nans.
///
/// `[ -∞, .., 0, .., +∞, NaN ]`
///
/// # Examples
/// `Number` can be constructed straight from any of the Rust numbers using the `From` trait.
/// ```rust
/// # use conftree::*;
/// let n: Number = 123456u32.into();
/// assert_eq!(n, Number::Uint(123456));
/// ```
///
/// Comparisons can be made between different number types.
/// ```rust
/// # use conftree::*;
/// let n = Number::from(100u8);
/// assert_eq!(n, Number::from(100.0f32));
/// assert_eq!(n, Number::from(100i32));
/// assert_ne!(n, Number::from(99.99f64));
/// ```
#[derive(Copy, Clone, Debug)]
#[allow(missing_docs)]
pub enum Number {
    Uint(u128),
    Int(i128),
    Float(f64),
}

/// Converting into a signed or unsigned integer can fail if the original number is outside the
/// integer's valid range.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct IntoIntError;

impl fmt::Display for IntoIntError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "number outside integer range")
    }
}

impl std::error::Error for IntoIntError {}

impl Number {
    /// Represent `Number` as an unsigned integer.
    ///
    /// Fails if negative, fractional, or not finite.
    ///
    /// # Example
    /// ```rust
    /// # use conftree::*;
    /// assert_eq!(Number::from(100i32).as_u128(), Ok(100));
    /// assert_eq!(Number::from(100.0).as_u128(), Ok(100));
    /// assert_eq!(Number::from(-100i32).as_u128().is_err(), true);
    /// assert_eq!(Number::from(0.5).as_u128().is_err(), true);
    /// ```
    pub fn as_u128(&self) -> Result<u128, IntoIntError> {
        match self {
            Uint(x) => Ok(*x),
            Int(x) => (*x).try_into().map_err(|_| IntoIntError),
            Float(x) => {
                if x.is_finite() && *x >= 0.0 && x.fract() == 0.0 {
                    Ok(*x as u128)
                } else {
                    Err(IntoIntError)
                }
            }
        }
    }

    /// Represent `Number` as a signed integer.
    ///
    /// # Example
    /// ```rust
    /// # use conftree::*;
    /// assert_eq!(Number::from(-100i32).as_i128(), Ok(-100));
    /// assert_eq!(Number::from(100u8).as_i128(), Ok(100));
    /// assert_eq!(Number::from(0.5).as_i128().is_err(), true);
    /// ```
    pub fn as_i128(&self) -> Result<i128, IntoIntError> {
        match self {
            Uint(x) => (*x).try_into().map_err(|_| IntoIntError),
            Int(x) => Ok(*x),
            Float(x) => {
                if x.is_finite() && x.fract() == 0.0 {
                    Ok(*x as i128)
                } else {
                    Err(IntoIntError)
                }
            }
        }
    }

    /// Represent `Number` as a floating point decimal. Integers outside the exactly-representable
    /// range lose precision.
    pub fn as_f64(&self) -> f64 {
        match self {
            Uint(x) => *x as f64,
            Int(x) => *x as f64,
            Float(x) => *x,
        }
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Number {}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Number {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Uint(a), Uint(b)) => a.cmp(b),
            (Int(a), Int(b)) => a.cmp(b),
            (Uint(a), Int(b)) => cmp_uint_int(*a, *b),
            (Int(a), Uint(b)) => cmp_uint_int(*b, *a).reverse(),
            (Float(a), Float(b)) => cmp_floats(*a, *b),
            (Float(a), b) => cmp_floats(*a, b.as_f64()),
            (a, Float(b)) => cmp_floats(a.as_f64(), *b),
        }
    }
}

fn cmp_uint_int(a: u128, b: i128) -> Ordering {
    if b < 0 {
        Ordering::Greater
    } else {
        a.cmp(&(b as u128))
    }
}

// Nan sits at the top of the number line, zeroes are conflated.
fn cmp_floats(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Uint(x) => write!(f, "{}", x),
            Int(x) => write!(f, "{}", x),
            Float(x) => write!(f, "{}", x),
        }
    }
}

macro_rules! uint_from {
    ( $( $x:ty ) * ) => {
        $(
            impl From<$x> for Number {
                fn from(x: $x) -> Self {
                    Uint(x as u128)
                }
            }
        )*
    };
}

macro_rules! int_from {
    ( $( $x:ty ) * ) => {
        $(
            impl From<$x> for Number {
                fn from(x: $x) -> Self {
                    if x < 0 {
                        Int(x as i128)
                    } else {
                        Uint(x as u128)
                    }
                }
            }
        )*
    };
}

uint_from!(usize u8 u16 u32 u64 u128);
int_from!(isize i8 i16 i32 i64 i128);

impl From<f32> for Number {
    fn from(x: f32) -> Self {
        Float(x as f64)
    }
}

impl From<f64> for Number {
    fn from(x: f64) -> Self {
        Float(x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cross_variant_equality() {
        assert_eq!(Number::from(100u8), Number::from(100i64));
        assert_eq!(Number::from(100u8), Number::from(100.0f32));
        assert_ne!(Number::from(100u8), Number::from(-100i64));
        assert_ne!(Number::from(0.5), Number::from(0));
    }

    #[test]
    fn zeroes_and_nans_conflate() {
        assert_eq!(Number::from(-0.0), Number::from(0.0));
        assert_eq!(Number::from(f64::NAN), Number::from(f64::NAN));
        assert!(Number::from(f64::NAN) > Number::from(f64::INFINITY));
    }

    #[test]
    fn ordering_spans_variants() {
        assert!(Number::from(-1) < Number::from(0u8));
        assert!(Number::from(u128::MAX) > Number::from(i128::MAX));
        assert!(Number::from(3.14) > Number::from(3));
        assert!(Number::from(f64::NEG_INFINITY) < Number::from(i128::MIN));
    }

    #[test]
    fn integer_conversions() {
        assert_eq!(Number::from(42u8).as_i128(), Ok(42));
        assert_eq!(Number::from(-42).as_u128(), Err(IntoIntError));
        assert_eq!(Number::from(3.0).as_u128(), Ok(3));
        assert_eq!(Number::from(f64::INFINITY).as_i128(), Err(IntoIntError));
        assert_eq!(Number::from(1234).as_f64(), 1234.0);
    }

    #[test]
    fn negative_literals_take_int_variant() {
        assert_eq!(Number::from(-1), Number::Int(-1));
        assert_eq!(Number::from(1), Number::Uint(1));
    }
}
