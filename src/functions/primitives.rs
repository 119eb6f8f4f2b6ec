//! Built-in primitives.
//!
//! Every primitive is total over `f64`: inputs that would raise or overflow in
//! ordinary arithmetic map to a documented fallback instead, so evolution can
//! explore numerically degenerate candidates without aborting.

use crate::functions::traits::Primitive;

/// Large offset returned by primitives whose input is undefined.
pub const C_UNDEF: f64 = 10e9;

// --- Arithmetic ---
pub struct Addition;
impl Primitive for Addition {
    fn ui_name(&self) -> &str { "Addition" }
    fn alias(&self) -> &str { "add" }
    fn symbol(&self) -> &str { "+" }
    fn arity(&self) -> usize { 2 }
    fn apply(&self, args: &[f64]) -> f64 {
        args[0] + args[1]
    }
}

pub struct Subtraction;
impl Primitive for Subtraction {
    fn ui_name(&self) -> &str { "Subtraction" }
    fn alias(&self) -> &str { "sub" }
    fn symbol(&self) -> &str { "-" }
    fn arity(&self) -> usize { 2 }
    fn apply(&self, args: &[f64]) -> f64 {
        args[0] - args[1]
    }
}

pub struct Multiplication;
impl Primitive for Multiplication {
    fn ui_name(&self) -> &str { "Multiplication" }
    fn alias(&self) -> &str { "mul" }
    fn symbol(&self) -> &str { "*" }
    fn arity(&self) -> usize { 2 }
    fn apply(&self, args: &[f64]) -> f64 {
        args[0] * args[1]
    }
}

/// Protected division: a zero divisor is treated as 1.
pub struct Division;
impl Primitive for Division {
    fn ui_name(&self) -> &str { "Protected Division" }
    fn alias(&self) -> &str { "div" }
    fn symbol(&self) -> &str { "/" }
    fn arity(&self) -> usize { 2 }
    fn apply(&self, args: &[f64]) -> f64 {
        let divisor = if args[1] == 0.0 { 1.0 } else { args[1] };
        args[0] / divisor
    }
}

pub struct Negation;
impl Primitive for Negation {
    fn ui_name(&self) -> &str { "Negation" }
    fn alias(&self) -> &str { "neg" }
    fn symbol(&self) -> &str { "-" }
    fn arity(&self) -> usize { 1 }
    fn apply(&self, args: &[f64]) -> f64 {
        -args[0]
    }
}

/// `1 / x`; zero maps to `x + C_UNDEF`.
pub struct Inverse;
impl Primitive for Inverse {
    fn ui_name(&self) -> &str { "Inverse" }
    fn alias(&self) -> &str { "inv" }
    fn symbol(&self) -> &str { "inv" }
    fn arity(&self) -> usize { 1 }
    fn apply(&self, args: &[f64]) -> f64 {
        if args[0] != 0.0 {
            1.0 / args[0]
        } else {
            args[0] + C_UNDEF
        }
    }
}

pub struct Square;
impl Primitive for Square {
    fn ui_name(&self) -> &str { "Square" }
    fn alias(&self) -> &str { "square" }
    fn symbol(&self) -> &str { "square" }
    fn arity(&self) -> usize { 1 }
    fn apply(&self, args: &[f64]) -> f64 {
        args[0] * args[0]
    }
}

pub struct Cube;
impl Primitive for Cube {
    fn ui_name(&self) -> &str { "Cube" }
    fn alias(&self) -> &str { "cube" }
    fn symbol(&self) -> &str { "cube" }
    fn arity(&self) -> usize { 1 }
    fn apply(&self, args: &[f64]) -> f64 {
        args[0].powi(3)
    }
}

/// Negative inputs give 0.
pub struct SquareRoot;
impl Primitive for SquareRoot {
    fn ui_name(&self) -> &str { "Protected Square Root" }
    fn alias(&self) -> &str { "sqrt" }
    fn symbol(&self) -> &str { "sqrt" }
    fn arity(&self) -> usize { 1 }
    fn apply(&self, args: &[f64]) -> f64 {
        if args[0] >= 0.0 {
            args[0].sqrt()
        } else {
            0.0
        }
    }
}

/// `|x|^y`; exponents with `|y| > 10` map to `x + y + C_UNDEF`.
pub struct Exponent;
impl Primitive for Exponent {
    fn ui_name(&self) -> &str { "Protected Exponent" }
    fn alias(&self) -> &str { "pow" }
    fn symbol(&self) -> &str { "^" }
    fn arity(&self) -> usize { 2 }
    fn apply(&self, args: &[f64]) -> f64 {
        if args[1].abs() <= 10.0 {
            args[0].abs().powf(args[1])
        } else {
            args[0] + args[1] + C_UNDEF
        }
    }
}

/// `ln|x|`; zero maps to `x + C_UNDEF`.
pub struct NaturalLog;
impl Primitive for NaturalLog {
    fn ui_name(&self) -> &str { "Protected Natural Log" }
    fn alias(&self) -> &str { "ln" }
    fn symbol(&self) -> &str { "ln" }
    fn arity(&self) -> usize { 1 }
    fn apply(&self, args: &[f64]) -> f64 {
        if args[0] != 0.0 {
            args[0].abs().ln()
        } else {
            args[0] + C_UNDEF
        }
    }
}

// --- Trigonometric ---
pub struct Sine;
impl Primitive for Sine {
    fn ui_name(&self) -> &str { "Sine" }
    fn alias(&self) -> &str { "sin" }
    fn symbol(&self) -> &str { "sin" }
    fn arity(&self) -> usize { 1 }
    fn apply(&self, args: &[f64]) -> f64 {
        args[0].sin()
    }
}

pub struct Cosine;
impl Primitive for Cosine {
    fn ui_name(&self) -> &str { "Cosine" }
    fn alias(&self) -> &str { "cos" }
    fn symbol(&self) -> &str { "cos" }
    fn arity(&self) -> usize { 1 }
    fn apply(&self, args: &[f64]) -> f64 {
        args[0].cos()
    }
}

pub struct Tangent;
impl Primitive for Tangent {
    fn ui_name(&self) -> &str { "Tangent" }
    fn alias(&self) -> &str { "tan" }
    fn symbol(&self) -> &str { "tan" }
    fn arity(&self) -> usize { 1 }
    fn apply(&self, args: &[f64]) -> f64 {
        args[0].tan()
    }
}

pub struct HyperbolicTangent;
impl Primitive for HyperbolicTangent {
    fn ui_name(&self) -> &str { "Hyperbolic Tangent" }
    fn alias(&self) -> &str { "tanh" }
    fn symbol(&self) -> &str { "tanh" }
    fn arity(&self) -> usize { 1 }
    fn apply(&self, args: &[f64]) -> f64 {
        args[0].tanh()
    }
}
