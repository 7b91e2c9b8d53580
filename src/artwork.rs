//! Artworks and tree persistence.
//!
//! An [`Artwork`] is the expression tree being rendered, plus its reified
//! form once [`Artwork::reify`] has been called. Evaluation goes through the
//! reified form when it exists.

use std::fs;
use std::path::Path;
use std::time::Instant;

use rand::Rng;

use crate::config::Backend;
use crate::error::{RaError, Result};
use crate::generate::{generate, random_budget};
use crate::reify::Reified;
use crate::types::{ContinuousColour, Evaluate, Expr};

/// An expression tree ready for rendering.
#[derive(Debug)]
pub struct Artwork {
    expr: Expr,
    reified: Option<Reified>,
}

impl Artwork {
    /// Wrap an existing tree. The artwork starts unreified.
    pub fn new(expr: Expr) -> Self {
        Self {
            expr,
            reified: None,
        }
    }

    /// Wrap `expr` and prepare it for `backend`.
    pub fn with_backend(expr: Expr, backend: Backend) -> Self {
        let mut art = Self::new(expr);
        if backend == Backend::Reified {
            art.reify();
        }
        art
    }

    /// Generate a fresh tree with a budget drawn from `[min_budget, max_budget)`.
    pub fn random<R: Rng + ?Sized>(rng: &mut R, min_budget: i32, max_budget: i32) -> Self {
        let budget = random_budget(rng, min_budget, max_budget);
        let expr = generate(rng, budget);
        log::debug!(
            "generated tree: budget {}, {} nodes, depth {}",
            budget,
            expr.node_count(),
            expr.depth()
        );
        Self::new(expr)
    }

    /// Compile the tree. Later evaluations use the compiled form.
    pub fn reify(&mut self) {
        let started = Instant::now();
        self.reified = Some(self.expr.reify());
        log::debug!("reified {} nodes in {:?}", self.expr.node_count(), started.elapsed());
    }

    /// Drop the compiled form, going back to walking the tree.
    pub fn unreify(&mut self) {
        self.reified = None;
    }

    pub fn is_reified(&self) -> bool {
        self.reified.is_some()
    }

    pub fn expr(&self) -> &Expr {
        &self.expr
    }

    pub fn into_expr(self) -> Expr {
        self.expr
    }
}

impl Evaluate for Artwork {
    fn eval(&self, x: f64, y: f64) -> ContinuousColour {
        match &self.reified {
            Some(reified) => reified.eval(x, y),
            None => self.expr.eval(x, y),
        }
    }
}

impl From<Expr> for Artwork {
    fn from(expr: Expr) -> Self {
        Self::new(expr)
    }
}

/// Write a tree as JSON.
pub fn save_tree(expr: &Expr, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(expr).map_err(|e| RaError::Parse {
        message: format!("Failed to serialize tree: {}", e),
        help: None,
    })?;

    fs::write(path, json).map_err(|e| RaError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to write tree: {}", e),
    })
}

/// Read a tree written by [`save_tree`].
pub fn load_tree(path: &Path) -> Result<Expr> {
    let source = fs::read_to_string(path).map_err(|e| RaError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to read tree: {}", e),
    })?;

    serde_json::from_str(&source).map_err(|e| RaError::Parse {
        message: format!("Invalid tree file {}: {}", path.display(), e),
        help: Some("Tree files are written by `randomart generate --output`".to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use tempfile::tempdir;

    #[test]
    fn test_reify_toggles_backend() {
        let mut art = Artwork::new(Expr::sum(Expr::VarX, Expr::VarY));
        assert!(!art.is_reified());
        let direct = art.eval(0.5, -0.25);

        art.reify();
        assert!(art.is_reified());
        assert_eq!(art.eval(0.5, -0.25), direct);

        art.unreify();
        assert!(!art.is_reified());
    }

    #[test]
    fn test_with_backend() {
        assert!(Artwork::with_backend(Expr::VarX, Backend::Reified).is_reified());
        assert!(!Artwork::with_backend(Expr::VarX, Backend::Tree).is_reified());
    }

    #[test]
    fn test_random_is_reproducible() {
        let a = Artwork::random(&mut StdRng::seed_from_u64(17), 20, 150);
        let b = Artwork::random(&mut StdRng::seed_from_u64(17), 20, 150);
        assert_eq!(a.expr(), b.expr());
        assert!(!a.expr().is_leaf());
    }

    #[test]
    fn test_save_load_round_trip() {
        let mut rng = StdRng::seed_from_u64(23);
        let expr = generate(&mut rng, 40);

        let dir = tempdir().unwrap();
        let path = dir.path().join("tree.json");
        save_tree(&expr, &path).unwrap();
        let loaded = load_tree(&path).unwrap();

        assert_eq!(loaded, expr);
        for (x, y) in [(0.1, 0.2), (-0.9, 0.4), (0.75, -0.75)] {
            assert_eq!(expr.eval(x, y).quantize(), loaded.eval(x, y).quantize());
        }
    }

    #[test]
    fn test_load_missing_tree() {
        let dir = tempdir().unwrap();
        let err = load_tree(&dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, RaError::Io { .. }));
    }

    #[test]
    fn test_load_invalid_tree() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, r#"{"op": "sum", "a": {"op": "var_x"}}"#).unwrap();
        let err = load_tree(&path).unwrap_err();
        assert!(matches!(err, RaError::Parse { .. }));
    }
}
