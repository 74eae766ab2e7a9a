//! The inference rules of the named opetope calculus.
//!
//! ```text
//!  ─────────────── point        E ▷ Γ ⊢ x : T
//!  ∅ ▷ x : ∅ ⊢ x : ∅           ───────────────────── degen
//!                               E ▷ Γ ⊢ _x : x → T
//!
//!      E ▷ Γ ⊢ t : T                E ▷ Γ ⊢ t : T     F ▷ Δ ⊢ x : S
//!  ──────────────────────── fill  ──────────────────────────────────── graft-a
//!  E ▷ Γ, y : t → T ⊢ y : t → T     E ∪ F ▷ Γ ∪ Δ ⊢ t(a ← x) : T[S/a]
//! ```
//!
//! Each rule takes its premises by reference and returns a fresh conclusion.

use crate::context::Context;
use crate::error::{DerivationError, Scope};
use crate::sequent::Sequent;
use crate::term::Term;
use crate::theory::EquationalTheory;
use crate::types::{Type, Typing};
use crate::variable::Variable;
use tracing::debug;

/// Introduce the 0-variable `x`.
pub fn point(x: &Variable) -> Result<Sequent, DerivationError> {
    if x.dimension() != 0 {
        return Err(reject(
            Scope::PointRule,
            format!(
                "new variable {x} must have dimension 0 (has dimension {})",
                x.dimension()
            ),
        ));
    }
    let typing = Typing::new(Term::var(x.clone()), Type::new(vec![Term::Empty])?)?;
    let context = Context::new().with_typing(typing.clone())?;
    debug!(rule = "point", variable = %x, "rule applied");
    Ok(Sequent::new(EquationalTheory::new(), context, typing))
}

/// Type the degeneracy at the variable typed by `seq`.
pub fn degen(seq: &Sequent) -> Result<Sequent, DerivationError> {
    let term = seq.term();
    let Some(x) = term.root().filter(|_| term.is_variable()) else {
        return Err(reject(
            Scope::DegenRule,
            format!("term {term} typed in premise sequent is expected to be a variable"),
        ));
    };
    let mut terms = vec![term.clone()];
    terms.extend(seq.ty().terms().iter().cloned());
    let typing = Typing::new(Term::degenerate(x.clone()), Type::new(terms)?)?;
    debug!(rule = "degen", variable = %x, dimension = typing.dimension(), "rule applied");
    Ok(Sequent::new(
        seq.theory().clone(),
        seq.context().clone(),
        typing,
    ))
}

/// Introduce a fresh (n+1)-variable `x` whose first source is the n-term
/// typed by `seq`.
pub fn fill(seq: &Sequent, x: &Variable) -> Result<Sequent, DerivationError> {
    let n = seq.dimension();
    if x.dimension() != n + 1 {
        return Err(reject(
            Scope::FillRule,
            format!(
                "new variable {x} must have dimension {} (has dimension {})",
                n + 1,
                x.dimension()
            ),
        ));
    }
    let mut terms = vec![seq.term().clone()];
    terms.extend(seq.ty().terms().iter().cloned());
    let typing = Typing::new(Term::var(x.clone()), Type::new(terms)?)?;
    let context = seq.context().with_typing(typing.clone())?;
    debug!(rule = "fill", variable = %x, dimension = typing.dimension(), "rule applied");
    Ok(Sequent::new(seq.theory().clone(), context, typing))
}

/// `degen` followed by `fill`.
pub fn degen_fill(seq: &Sequent, x: &Variable) -> Result<Sequent, DerivationError> {
    fill(&degen(seq)?, x)
}

/// Graft the variable typed by `seqx` on the term typed by `seqt`, at `a`.
///
/// The contexts of both premises must share exactly the variables needed to
/// type `a`, and `a` must be a not yet used leaf of `seqt`'s term whose
/// source matches the 2-source of the grafted variable.
pub fn graft(seqt: &Sequent, seqx: &Sequent, a: &Variable) -> Result<Sequent, DerivationError> {
    let n = seqt.dimension();
    if a.dimension() != n - 1 {
        return Err(reject(
            Scope::GraftRule,
            format!(
                "graft variable {a} must have dimension {} (has dimension {})",
                n - 1,
                a.dimension()
            ),
        ));
    }
    if seqt.term().is_empty() {
        return Err(reject(
            Scope::GraftRule,
            "first premise sequent types the empty term",
        ));
    }
    if seqx.term().is_empty() {
        return Err(reject(
            Scope::GraftRule,
            "second premise sequent types the empty term",
        ));
    }
    if !seqt.context().contains(a) {
        return Err(reject(
            Scope::GraftRule,
            format!("graft variable {a} is not typed in first premise sequent"),
        ));
    }
    let typea = seqt.type_of(a)?;
    let inter = seqt.context().intersection(seqx.context());
    for i in 0..a.dimension() {
        if let Some(v) = typea.variables(i).into_iter().find(|v| !inter.contains(v)) {
            return Err(reject(
                Scope::GraftRule,
                format!(
                    "intersection of the premise contexts does not type \
                     variable {v}, which is needed to type {a}"
                ),
            ));
        }
    }
    if let Some(w) = inter.variables().into_iter().find(|w| !typea.contains(w)) {
        return Err(reject(
            Scope::GraftRule,
            format!(
                "variable {w} is typed in both premise contexts, \
                 but is not needed to type {a}"
            ),
        ));
    }
    let Some(x) = seqx.term().root().filter(|_| seqx.term().is_variable()) else {
        return Err(reject(
            Scope::GraftRule,
            format!(
                "second premise sequent is expected to type a variable (types {})",
                seqx.term()
            ),
        ));
    };
    if !seqt.ty().first().contains(a) {
        return Err(reject(
            Scope::GraftRule,
            format!(
                "graft variable {a} does not occur in the source of {}",
                seqt.term()
            ),
        ));
    }
    if seqt.term().contains(a) {
        return Err(reject(
            Scope::GraftRule,
            format!(
                "graft variable {a} occurs in {}, so it has already been grafted on",
                seqt.term()
            ),
        ));
    }
    let sa = seqt.source(a, 1)?;
    let ssx = seqx.source(x, 2)?;
    if !seqt.equal(&sa, &ssx) {
        return Err(reject(
            Scope::GraftRule,
            format!("{a} and {x} have incompatible shapes: s{a} = {sa}, while ss{x} = {ssx}"),
        ));
    }

    let mut theory = seqt.theory().union(seqx.theory())?;
    let context = seqt.context().union(seqx.context());
    let term = seqt.graft(seqt.term(), a, seqx.term())?;
    let (first, equation) = seqt.substitute(seqt.ty().first(), seqx.ty().first(), a)?;
    if let Some((left, right)) = equation {
        debug!(left = %left, right = %right, "graft adds equation");
        theory = theory.with_equation(left, right)?;
    }
    let mut terms = seqt.ty().terms().to_vec();
    terms[0] = first;
    let typing = Typing::new(term, Type::new(terms)?)?;
    debug!(rule = "graft", variable = %a, grafted = %x, dimension = n, "rule applied");
    Ok(Sequent::new(theory, context, typing))
}

fn reject(scope: Scope, message: impl Into<String>) -> DerivationError {
    let err = DerivationError::new(scope, message);
    debug!(scope = %err.scope, message = %err.message, "rule rejected");
    err
}
