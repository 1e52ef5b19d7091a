//! Operation names and operand classification

use core::fmt;

/// Every operation the adapter can delegate to a backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
    Divide,
    Compare,
    Modulo,
    Power,
    SquareRoot,
    Absolute,
    Negate,
    Factorial,
    Gcd,
    Root,
    NextPrime,
    IsPrime,
    IsPerfectSquare,
    Gamma,
    LogGamma,
}

impl Operation {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Subtract => "subtract",
            Self::Multiply => "multiply",
            Self::Divide => "divide",
            Self::Compare => "compare",
            Self::Modulo => "modulo",
            Self::Power => "power",
            Self::SquareRoot => "square_root",
            Self::Absolute => "absolute",
            Self::Negate => "negate",
            Self::Factorial => "factorial",
            Self::Gcd => "gcd",
            Self::Root => "root",
            Self::NextPrime => "next_prime",
            Self::IsPrime => "is_prime",
            Self::IsPerfectSquare => "is_perfect_square",
            Self::Gamma => "gamma",
            Self::LogGamma => "log_gamma",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Numeric domain of a call, inferred from the shape of its operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationType {
    Integer,
    Float,
}

impl OperationType {
    /// `Float` if any operand contains a decimal point, otherwise `Integer`.
    pub fn infer(operands: &[&str]) -> Self {
        if operands.iter().any(|operand| operand.contains('.')) {
            Self::Float
        } else {
            Self::Integer
        }
    }

    pub const fn is_integer(self) -> bool {
        matches!(self, Self::Integer)
    }
}

impl fmt::Display for OperationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer => f.write_str("integer"),
            Self::Float => f.write_str("float"),
        }
    }
}
