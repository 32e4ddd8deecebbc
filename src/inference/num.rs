use serde_json::Number;

/// Numeric evidence for one position.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NumC {
    pub saw_int: bool,
    /// Fraction or exponent in the source text, or an integer beyond the signed 64-bit range.
    pub saw_float: bool,
    /// An integer outside the 32-bit range.
    pub saw_wide: bool,
}

impl NumC {
    pub fn observe(n: &Number) -> Self {
        let mut num = NumC::default();
        if let Some(i) = n.as_i64() {
            num.saw_int = true;
            num.saw_wide = i32::try_from(i).is_err();
        } else {
            // fraction, exponent, or an unsigned value past i64::MAX
            num.saw_float = true;
        }
        num
    }

    pub(super) fn join(a: &Self, b: &Self) -> Self {
        NumC {
            saw_int: a.saw_int || b.saw_int,
            saw_float: a.saw_float || b.saw_float,
            saw_wide: a.saw_wide || b.saw_wide,
        }
    }
}
