//! Random expression generation.
//!
//! [`generate`] grows a tree from a size budget. Each branch splits its
//! budget, minus one for itself, between its children at random cut points,
//! so a tree for budget `k` never has more than `3k + 1` nodes.

use std::f64::consts::PI;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::types::{ContinuousColour, Expr, Op};

/// Upper bound on the node count of any tree `generate(_, budget)` returns.
pub fn max_nodes(budget: i32) -> usize {
    if budget <= 0 {
        1
    } else {
        3 * budget as usize + 1
    }
}

/// Randomly generate an expression of the given size budget.
pub fn generate<R: Rng + ?Sized>(rng: &mut R, budget: i32) -> Expr {
    if budget <= 0 {
        let op = *Op::LEAVES.choose(rng).unwrap_or(&Op::VarX);
        return build(op, rng, Vec::new());
    }

    let op = *Op::BRANCHES.choose(rng).unwrap_or(&Op::Sum);

    let mut cuts: Vec<i32> = (1..op.arity()).map(|_| rng.gen_range(0..budget)).collect();
    cuts.sort_unstable();

    let mut used = 0;
    let mut children = Vec::with_capacity(op.arity());
    for cut in cuts {
        children.push(generate(rng, cut - used));
        used = cut;
    }
    children.push(generate(rng, budget - 1 - used));

    build(op, rng, children)
}

/// Draw a budget for a fresh artwork, uniformly in `[min, max)`.
pub fn random_budget<R: Rng + ?Sized>(rng: &mut R, min: i32, max: i32) -> i32 {
    if max <= min {
        min
    } else {
        rng.gen_range(min..max)
    }
}

/// Build a node of kind `op` over `children`, drawing its random parameters.
///
/// # Panics
///
/// Panics if `children.len()` differs from `op.arity()`.
pub fn build<R: Rng + ?Sized>(op: Op, rng: &mut R, children: Vec<Expr>) -> Expr {
    assert_eq!(
        children.len(),
        op.arity(),
        "{:?} takes {} subexpressions",
        op,
        op.arity()
    );

    let mut children = children.into_iter();
    let mut next = || Box::new(children.next().unwrap_or(Expr::VarX));

    match op {
        Op::VarX => Expr::VarX,
        Op::VarY => Expr::VarY,
        Op::Constant => Expr::Constant {
            colour: ContinuousColour::new(rng.gen(), rng.gen(), rng.gen()),
        },
        Op::Sum => Expr::Sum {
            a: next(),
            b: next(),
        },
        Op::Product => Expr::Product {
            a: next(),
            b: next(),
        },
        Op::Mod => Expr::Mod {
            a: next(),
            b: next(),
        },
        Op::Well => Expr::Well { a: next() },
        Op::Tent => Expr::Tent { a: next() },
        Op::Sin => Expr::Sin {
            phase: rng.gen_range(0.0..PI),
            freq: rng.gen_range(1.0..6.0),
            a: next(),
        },
        Op::Level => Expr::Level {
            threshold: rng.gen_range(-1.0..1.0),
            level: next(),
            a: next(),
            b: next(),
        },
        Op::Mix => Expr::Mix {
            weight: next(),
            a: next(),
            b: next(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn assert_well_formed(e: &Expr) {
        assert_eq!(e.children().len(), e.op().arity());
        e.children().into_iter().for_each(assert_well_formed);
    }

    fn leaves(e: &Expr) -> Vec<&Expr> {
        if e.is_leaf() {
            vec![e]
        } else {
            e.children().into_iter().flat_map(leaves).collect()
        }
    }

    #[test]
    fn test_zero_budget_is_leaf() {
        let mut rng = StdRng::seed_from_u64(7);
        for budget in [-5, -1, 0] {
            for _ in 0..50 {
                let e = generate(&mut rng, budget);
                assert!(e.is_leaf());
                assert_eq!(e.node_count(), 1);
            }
        }
    }

    #[test]
    fn test_positive_budget_is_branch() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..50 {
            assert!(!generate(&mut rng, 1).is_leaf());
        }
    }

    #[test]
    fn test_node_count_bounded_by_budget() {
        let mut rng = StdRng::seed_from_u64(42);
        for budget in 0..120 {
            let e = generate(&mut rng, budget);
            assert_well_formed(&e);
            assert!(
                e.node_count() <= max_nodes(budget),
                "budget {} produced {} nodes",
                budget,
                e.node_count()
            );
            assert!(e.depth() <= budget as usize + 1);
        }
    }

    #[test]
    fn test_leaves_are_zero_arity() {
        let mut rng = StdRng::seed_from_u64(3);
        let e = generate(&mut rng, 80);
        let found = leaves(&e);
        assert!(!found.is_empty());
        assert!(found.iter().all(|l| Op::LEAVES.contains(&l.op())));
    }

    #[test]
    fn test_same_seed_same_tree() {
        let a = generate(&mut StdRng::seed_from_u64(99), 60);
        let b = generate(&mut StdRng::seed_from_u64(99), 60);
        assert_eq!(a, b);
    }

    #[test]
    fn test_parameter_ranges() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..200 {
            match build(Op::Sin, &mut rng, vec![Expr::VarX]) {
                Expr::Sin { phase, freq, .. } => {
                    assert!((0.0..PI).contains(&phase));
                    assert!((1.0..6.0).contains(&freq));
                }
                other => panic!("expected Sin, got {}", other),
            }
            match build(Op::Level, &mut rng, vec![Expr::VarX, Expr::VarY, Expr::VarX]) {
                Expr::Level { threshold, .. } => assert!((-1.0..1.0).contains(&threshold)),
                other => panic!("expected Level, got {}", other),
            }
            match build(Op::Constant, &mut rng, vec![]) {
                Expr::Constant { colour } => {
                    assert!(colour.to_array().iter().all(|c| (0.0..1.0).contains(c)))
                }
                other => panic!("expected Constant, got {}", other),
            }
        }
    }

    #[test]
    fn test_build_keeps_child_order() {
        let mut rng = StdRng::seed_from_u64(1);
        let e = build(
            Op::Mix,
            &mut rng,
            vec![Expr::VarX, Expr::VarY, Expr::constant(0.1, 0.2, 0.3)],
        );
        assert_eq!(e, Expr::mix(Expr::VarX, Expr::VarY, Expr::constant(0.1, 0.2, 0.3)));
    }

    #[test]
    #[should_panic(expected = "takes 2 subexpressions")]
    fn test_build_rejects_wrong_arity() {
        let mut rng = StdRng::seed_from_u64(1);
        build(Op::Sum, &mut rng, vec![Expr::VarX]);
    }

    #[test]
    fn test_random_budget_range() {
        let mut rng = StdRng::seed_from_u64(8);
        for _ in 0..500 {
            let b = random_budget(&mut rng, 20, 150);
            assert!((20..150).contains(&b));
        }
        assert_eq!(random_budget(&mut rng, 30, 30), 30);
    }
}
