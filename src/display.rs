//! Canonical text rendering of linear combinations
//!
//! Terms render as `<sign><coefficient>*<vector>` with vectors in sorted
//! order, concatenated without separators and with the leading `+` stripped.
//! Real and imaginary parts are formatted independently at a fixed number of
//! decimal places; a part that rounds to zero at that precision drops out of
//! the rendering even when the stored value is technically nonzero.

use core::fmt;

use crate::combination::LinearCombination;
use crate::traits::Vector;
use crate::Scalar;

const DEFAULT_PRECISION: usize = 3;

fn rounds_to_zero(formatted: &str) -> bool {
    matches!(formatted.parse::<f64>(), Ok(value) if value == 0.0)
}

fn format_coefficient(precision: usize, coefficient: Scalar) -> String {
    let real = format!("{:.precision$}", coefficient.re);
    let imag = format!("{:.precision$}", coefficient.im);
    match (rounds_to_zero(&real), rounds_to_zero(&imag)) {
        (true, true) => String::new(),
        (false, true) => real,
        (true, false) => format!("{imag}j"),
        (false, false) => {
            if real.starts_with('-') && imag.starts_with('-') {
                format!("-({}+{}j)", &real[1..], &imag[1..])
            } else if imag.starts_with(['+', '-']) {
                format!("({real}{imag}j)")
            } else {
                format!("({real}+{imag}j)")
            }
        }
    }
}

fn format_term<V: fmt::Display>(precision: usize, vector: &V, coefficient: Scalar) -> String {
    let coefficient = format_coefficient(precision, coefficient);
    if coefficient.is_empty() {
        return coefficient;
    }
    let term = format!("{coefficient}*{vector}");
    if term.starts_with(['+', '-']) {
        term
    } else {
        format!("+{term}")
    }
}

impl<V: Vector + Ord + fmt::Display> LinearCombination<V> {
    /// Renders the combination at a fixed number of decimal places per real
    /// and imaginary part.
    ///
    /// Vectors appear in their natural sort order. A combination with no
    /// renderable terms formats as the zero literal at the same precision.
    pub fn format_with(&self, precision: usize) -> String {
        let mut vectors: Vec<&V> = self.vectors().collect();
        vectors.sort_unstable();
        let rendered: String = vectors
            .into_iter()
            .map(|v| format_term(precision, v, self.coefficient(v)))
            .collect();
        if rendered.is_empty() {
            return format!("{:.precision$}", 0.0);
        }
        match rendered.strip_prefix('+') {
            Some(stripped) => stripped.to_string(),
            None => rendered,
        }
    }
}

impl<V: Vector + Ord + fmt::Display> fmt::Display for LinearCombination<V> {
    /// Formatter precision selects the decimal places (`{:.5}`); the default
    /// is three, so `{}` matches [`format_with(3)`](LinearCombination::format_with).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_with(f.precision().unwrap_or(DEFAULT_PRECISION)))
    }
}
