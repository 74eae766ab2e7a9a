//! TeX rendering.
//!
//! Every construct of the calculus renders to math-mode TeX. Sequents need
//! the `\smalltriangleright` symbol (from `stix` or `MnSymbol`); proof trees
//! built on top of these are typeset with `bussproofs`.

use crate::context::Context;
use crate::ocmt::Ocmt;
use crate::sequent::Sequent;
use crate::term::Term;
use crate::theory::EquationalTheory;
use crate::types::{Type, Typing};
use crate::variable::Variable;
use serde::Deserialize;

/// Presentation settings, passed explicitly to every rendering call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Style {
    /// Print the context of each sequent. Contexts grow quickly, and large
    /// proof trees are easier to read without them.
    pub print_contexts: bool,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            print_contexts: true,
        }
    }
}

pub trait Tex {
    fn to_tex(&self, style: &Style) -> String;
}

impl Tex for Variable {
    fn to_tex(&self, _: &Style) -> String {
        self.name().to_string()
    }
}

impl Tex for Term {
    fn to_tex(&self, style: &Style) -> String {
        match self {
            Term::Empty => "\\emptyset".to_string(),
            Term::Degenerate(v) => format!("\\underline{{{}}}", v.to_tex(style)),
            Term::Node { root, grafts } if grafts.is_empty() => root.to_tex(style),
            Term::Node { root, grafts } => {
                let grafts: Vec<String> = grafts
                    .iter()
                    .map(|(k, u)| format!("{} \\leftarrow {}", k.to_tex(style), u.to_tex(style)))
                    .collect();
                format!("{}({})", root.to_tex(style), grafts.join(", "))
            }
        }
    }
}

impl Tex for Type {
    fn to_tex(&self, style: &Style) -> String {
        join(self.terms(), " \\rightarrow ", style)
    }
}

impl Tex for Typing {
    fn to_tex(&self, style: &Style) -> String {
        format!("{} : {}", self.term().to_tex(style), self.ty().to_tex(style))
    }
}

impl Tex for Context {
    fn to_tex(&self, style: &Style) -> String {
        self.iter()
            .map(|(v, ty)| format!("{} : {}", v.to_tex(style), ty.to_tex(style)))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl Tex for EquationalTheory {
    fn to_tex(&self, style: &Style) -> String {
        if self.is_empty() {
            return "\\emptyset".to_string();
        }
        self.classes()
            .iter()
            .map(|class| {
                let members: Vec<&Variable> = class.iter().collect();
                format!("\\left\\{{{}\\right\\}}", join(&members, ", ", style))
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl Tex for Ocmt {
    fn to_tex(&self, style: &Style) -> String {
        format!(
            "{} \\smalltriangleright {}",
            self.theory().to_tex(style),
            self.context().to_tex(style)
        )
    }
}

impl Tex for Sequent {
    fn to_tex(&self, style: &Style) -> String {
        let lhs = if style.print_contexts {
            self.ocmt().to_tex(style)
        } else {
            self.theory().to_tex(style)
        };
        format!(
            "{lhs} \\vdash_{{{}}} {}",
            self.dimension(),
            self.typing().to_tex(style)
        )
    }
}

impl<T: Tex + ?Sized> Tex for &T {
    fn to_tex(&self, style: &Style) -> String {
        (**self).to_tex(style)
    }
}

fn join<T: Tex>(items: &[T], sep: &str, style: &Style) -> String {
    items
        .iter()
        .map(|item| item.to_tex(style))
        .collect::<Vec<_>>()
        .join(sep)
}
