//! # Opetope Kernel
//!
//! A derivation engine for the named opetope calculus. Opetopes are built
//! one rule application at a time; each application either yields the
//! unique conclusion sequent or is rejected with a [`DerivationError`]
//! naming the precondition it violates.
//!
//! ## Architecture
//!
//! ```text
//! Variable              ← name + dimension
//!     │
//! Term                  ← ∅ | _x | x(a ← t, …)
//!     │
//! Type, Typing          ← iterated sources, t : T
//!     │
//! Context               ← x : T for distinct variables
//! EquationalTheory      ← classes of equal variables
//!     │
//! Ocmt                  ← graft, substitute, equality modulo theory
//!     │
//! Sequent               ← E ▷ Γ ⊢ t : T
//!     │
//! rules                 ← point, degen, fill, degen-fill, graft
//!     │
//! RuleInstance          ← proof trees, evaluated bottom-up
//! ```
//!
//! Everything is a value: rules take premises by reference and build fresh
//! conclusions. The crate installs no `tracing` subscriber; rule
//! applications and rejections are emitted as `debug` events.

pub mod context;
pub mod error;
pub mod fingerprint;
pub mod ocmt;
pub mod proof;
pub mod render;
pub mod rules;
pub mod sequent;
pub mod term;
pub mod theory;
pub mod types;
pub mod variable;

pub use context::Context;
pub use error::{DerivationError, Scope};
pub use fingerprint::Fingerprint;
pub use ocmt::{Equation, Ocmt, TARGET_SYMBOL};
pub use proof::{Rule, RuleInstance};
pub use render::{Style, Tex};
pub use sequent::Sequent;
pub use term::Term;
pub use theory::EquationalTheory;
pub use types::{Type, Typing};
pub use variable::Variable;
