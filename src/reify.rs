//! Reified expressions.
//!
//! Reifying an [`Expr`] compiles it once into a tree of boxed closures. Each
//! closure owns the closures of its children and captures its parameters by
//! value, so evaluation never matches on node kinds and the source tree can be
//! dropped afterwards.

use std::fmt;

use crate::types::{guarded_modulo, mix_weight, ops, ContinuousColour, Evaluate, Expr};

type Kernel = Box<dyn Fn(f64, f64) -> ContinuousColour + Send + Sync>;

/// A compiled, self-contained form of an expression tree.
pub struct Reified {
    kernel: Kernel,
    nodes: usize,
}

impl Reified {
    /// Compile `expr`.
    pub fn new(expr: &Expr) -> Self {
        Self {
            kernel: compile(expr),
            nodes: expr.node_count(),
        }
    }

    /// Number of nodes in the source tree.
    pub fn node_count(&self) -> usize {
        self.nodes
    }
}

impl Evaluate for Reified {
    fn eval(&self, x: f64, y: f64) -> ContinuousColour {
        (self.kernel)(x, y)
    }
}

impl fmt::Debug for Reified {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Reified")
            .field("nodes", &self.nodes)
            .finish_non_exhaustive()
    }
}

impl Expr {
    /// Compile this tree into its reified form.
    pub fn reify(&self) -> Reified {
        Reified::new(self)
    }
}

fn compile(expr: &Expr) -> Kernel {
    match expr {
        Expr::VarX => Box::new(|x: f64, _: f64| ContinuousColour::grey(x)),
        Expr::VarY => Box::new(|_: f64, y: f64| ContinuousColour::grey(y)),
        Expr::Constant { colour } => {
            let colour = *colour;
            Box::new(move |_: f64, _: f64| colour)
        }
        Expr::Sum { a, b } => {
            let (a, b) = (compile(a), compile(b));
            Box::new(move |x, y| ops::average(a(x, y), b(x, y), 0.5))
        }
        Expr::Product { a, b } => {
            let (a, b) = (compile(a), compile(b));
            Box::new(move |x, y| ops::product(a(x, y), b(x, y)))
        }
        Expr::Mod { a, b } => {
            let (a, b) = (compile(a), compile(b));
            Box::new(move |x, y| guarded_modulo(a(x, y), b(x, y)))
        }
        Expr::Well { a } => {
            let a = compile(a);
            Box::new(move |x, y| ops::well(a(x, y)))
        }
        Expr::Tent { a } => {
            let a = compile(a);
            Box::new(move |x, y| ops::tent(a(x, y)))
        }
        Expr::Sin { phase, freq, a } => {
            let (phase, freq, a) = (*phase, *freq, compile(a));
            Box::new(move |x, y| ops::sin(a(x, y), phase, freq))
        }
        Expr::Level {
            threshold,
            level,
            a,
            b,
        } => {
            let threshold = *threshold;
            let (level, a, b) = (compile(level), compile(a), compile(b));
            Box::new(move |x, y| ops::level(threshold, level(x, y), a(x, y), b(x, y)))
        }
        Expr::Mix { weight, a, b } => {
            let (weight, a, b) = (compile(weight), compile(a), compile(b));
            Box::new(move |x, y| ops::average(a(x, y), b(x, y), mix_weight(weight(x, y))))
        }
    }
}
