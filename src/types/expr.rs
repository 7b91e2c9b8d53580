//! Colour expression trees.
//!
//! An [`Expr`] describes an image: evaluating it at a point `(x, y)` of the
//! square `[-1, 1] x [-1, 1]` yields that point's colour. Every node owns its
//! children, so a tree is never shared or cyclic.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::{ops, ContinuousColour};

/// Anything that maps a point to a colour.
pub trait Evaluate {
    fn eval(&self, x: f64, y: f64) -> ContinuousColour;
}

/// The kind of an expression node, without its children or parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    VarX,
    VarY,
    Constant,
    Sum,
    Product,
    Sin,
    Level,
    Mix,
    Mod,
    Well,
    Tent,
}

impl Op {
    /// Every operator, in generation order.
    pub const ALL: [Op; 11] = [
        Op::VarX,
        Op::VarY,
        Op::Constant,
        Op::Sum,
        Op::Product,
        Op::Sin,
        Op::Level,
        Op::Mix,
        Op::Mod,
        Op::Well,
        Op::Tent,
    ];

    /// Operators with no children.
    pub const LEAVES: [Op; 3] = [Op::VarX, Op::VarY, Op::Constant];

    /// Operators with at least one child.
    pub const BRANCHES: [Op; 8] = [
        Op::Sum,
        Op::Product,
        Op::Sin,
        Op::Level,
        Op::Mix,
        Op::Mod,
        Op::Well,
        Op::Tent,
    ];

    /// Number of subexpressions this operator takes.
    pub const fn arity(self) -> usize {
        match self {
            Op::VarX | Op::VarY | Op::Constant => 0,
            Op::Sin | Op::Well | Op::Tent => 1,
            Op::Sum | Op::Product | Op::Mod => 2,
            Op::Level | Op::Mix => 3,
        }
    }
}

/// A colour expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Expr {
    /// All channels equal to `x`.
    VarX,
    /// All channels equal to `y`.
    VarY,
    Constant {
        colour: ContinuousColour,
    },
    /// Mean of two colours.
    Sum {
        a: Box<Expr>,
        b: Box<Expr>,
    },
    Product {
        a: Box<Expr>,
        b: Box<Expr>,
    },
    /// `a mod b`, or black when any channel of `b` is exactly zero.
    Mod {
        a: Box<Expr>,
        b: Box<Expr>,
    },
    Well {
        a: Box<Expr>,
    },
    Tent {
        a: Box<Expr>,
    },
    Sin {
        phase: f64,
        freq: f64,
        a: Box<Expr>,
    },
    /// Per channel: `a` where `level < threshold`, else `b`.
    Level {
        threshold: f64,
        level: Box<Expr>,
        a: Box<Expr>,
        b: Box<Expr>,
    },
    /// Blend of `a` and `b` weighted by the red channel of `weight`.
    Mix {
        weight: Box<Expr>,
        a: Box<Expr>,
        b: Box<Expr>,
    },
}

impl Expr {
    pub fn constant(r: f64, g: f64, b: f64) -> Self {
        Expr::Constant {
            colour: ContinuousColour::new(r, g, b),
        }
    }

    pub fn sum(a: Expr, b: Expr) -> Self {
        Expr::Sum {
            a: Box::new(a),
            b: Box::new(b),
        }
    }

    pub fn product(a: Expr, b: Expr) -> Self {
        Expr::Product {
            a: Box::new(a),
            b: Box::new(b),
        }
    }

    pub fn modulo(a: Expr, b: Expr) -> Self {
        Expr::Mod {
            a: Box::new(a),
            b: Box::new(b),
        }
    }

    pub fn well(a: Expr) -> Self {
        Expr::Well { a: Box::new(a) }
    }

    pub fn tent(a: Expr) -> Self {
        Expr::Tent { a: Box::new(a) }
    }

    pub fn sin(phase: f64, freq: f64, a: Expr) -> Self {
        Expr::Sin {
            phase,
            freq,
            a: Box::new(a),
        }
    }

    pub fn level(threshold: f64, level: Expr, a: Expr, b: Expr) -> Self {
        Expr::Level {
            threshold,
            level: Box::new(level),
            a: Box::new(a),
            b: Box::new(b),
        }
    }

    pub fn mix(weight: Expr, a: Expr, b: Expr) -> Self {
        Expr::Mix {
            weight: Box::new(weight),
            a: Box::new(a),
            b: Box::new(b),
        }
    }

    /// The operator at the root of this expression.
    pub fn op(&self) -> Op {
        match self {
            Expr::VarX => Op::VarX,
            Expr::VarY => Op::VarY,
            Expr::Constant { .. } => Op::Constant,
            Expr::Sum { .. } => Op::Sum,
            Expr::Product { .. } => Op::Product,
            Expr::Mod { .. } => Op::Mod,
            Expr::Well { .. } => Op::Well,
            Expr::Tent { .. } => Op::Tent,
            Expr::Sin { .. } => Op::Sin,
            Expr::Level { .. } => Op::Level,
            Expr::Mix { .. } => Op::Mix,
        }
    }

    /// Direct subexpressions, in argument order.
    pub fn children(&self) -> Vec<&Expr> {
        match self {
            Expr::VarX | Expr::VarY | Expr::Constant { .. } => vec![],
            Expr::Well { a } | Expr::Tent { a } | Expr::Sin { a, .. } => vec![&**a],
            Expr::Sum { a, b } | Expr::Product { a, b } | Expr::Mod { a, b } => vec![&**a, &**b],
            Expr::Level { level, a, b, .. } => vec![&**level, &**a, &**b],
            Expr::Mix { weight, a, b } => vec![&**weight, &**a, &**b],
        }
    }

    /// Total number of nodes in the tree.
    pub fn node_count(&self) -> usize {
        1 + self.children().iter().map(|c| c.node_count()).sum::<usize>()
    }

    /// Length of the longest root-to-leaf path, counting nodes.
    pub fn depth(&self) -> usize {
        1 + self.children().iter().map(|c| c.depth()).max().unwrap_or(0)
    }

    /// Whether this node has no children.
    pub fn is_leaf(&self) -> bool {
        self.op().arity() == 0
    }
}

impl Evaluate for Expr {
    fn eval(&self, x: f64, y: f64) -> ContinuousColour {
        match self {
            Expr::VarX => ContinuousColour::grey(x),
            Expr::VarY => ContinuousColour::grey(y),
            Expr::Constant { colour } => *colour,
            Expr::Sum { a, b } => ops::average(a.eval(x, y), b.eval(x, y), 0.5),
            Expr::Product { a, b } => ops::product(a.eval(x, y), b.eval(x, y)),
            Expr::Mod { a, b } => guarded_modulo(a.eval(x, y), b.eval(x, y)),
            Expr::Well { a } => ops::well(a.eval(x, y)),
            Expr::Tent { a } => ops::tent(a.eval(x, y)),
            Expr::Sin { phase, freq, a } => ops::sin(a.eval(x, y), *phase, *freq),
            Expr::Level {
                threshold,
                level,
                a,
                b,
            } => ops::level(*threshold, level.eval(x, y), a.eval(x, y), b.eval(x, y)),
            Expr::Mix { weight, a, b } => {
                ops::average(a.eval(x, y), b.eval(x, y), mix_weight(weight.eval(x, y)))
            }
        }
    }
}

/// `a mod b`, short-circuiting to black if `b` has an exactly-zero channel.
pub(crate) fn guarded_modulo(a: ContinuousColour, b: ContinuousColour) -> ContinuousColour {
    if b.to_array().contains(&0.0) {
        ContinuousColour::ZERO
    } else {
        ops::modulo(a, b)
    }
}

/// Map the red channel of a weight colour from `[-1, 1]` onto `[0, 1]`.
pub(crate) fn mix_weight(w: ContinuousColour) -> f64 {
    0.5 * (w.r + 1.0)
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::VarX => write!(f, "x"),
            Expr::VarY => write!(f, "y"),
            Expr::Constant { colour } => {
                write!(f, "Constant({}, {}, {})", colour.r, colour.g, colour.b)
            }
            Expr::Sum { a, b } => write!(f, "Sum({}, {})", a, b),
            Expr::Product { a, b } => write!(f, "Product({}, {})", a, b),
            Expr::Mod { a, b } => write!(f, "Mod({}, {})", a, b),
            Expr::Well { a } => write!(f, "Well({})", a),
            Expr::Tent { a } => write!(f, "Tent({})", a),
            Expr::Sin { phase, freq, a } => write!(f, "Sin({} + {} * {})", phase, freq, a),
            Expr::Level {
                threshold,
                level,
                a,
                b,
            } => write!(f, "Level({}, {}, {}, {})", threshold, level, a, b),
            Expr::Mix { weight, a, b } => write!(f, "Mix({}, {}, {})", weight, a, b),
        }
    }
}
