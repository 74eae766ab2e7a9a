//! Fingerprints of sequents and proof trees.
//!
//! A fingerprint is the SHA-256 digest of a canonical encoding. Sequents
//! are encoded up to the presentation of their theory: classes are sorted
//! before hashing, so theories that differ only in the order equations were
//! merged fingerprint the same, even though they print differently.

use crate::context::Context;
use crate::theory::EquationalTheory;
use crate::types::Typing;
use crate::variable::Variable;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::fmt;

/// Hex-encoded SHA-256 digest of a canonical encoding.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Fingerprint(String);

impl Fingerprint {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The first 12 hex digits.
    pub fn short(&self) -> &str {
        &self.0[..self.0.len().min(12)]
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Writes tagged records into a hasher. Each record is `tag`, `:`, the
/// payload, and a newline; variables carry their dimension so that `f` at
/// dimension 1 and `f` at dimension 2 encode differently.
pub(crate) struct Encoder {
    hasher: Sha256,
}

impl Encoder {
    pub(crate) fn new() -> Self {
        Self {
            hasher: Sha256::new(),
        }
    }

    pub(crate) fn record(mut self, tag: &str, payload: impl fmt::Display) -> Self {
        self.hasher.update(format!("{tag}:{payload}\n").as_bytes());
        self
    }

    pub(crate) fn theory(self, theory: &EquationalTheory) -> Self {
        let mut classes: Vec<_> = theory.classes().iter().collect();
        classes.sort();
        let encoded: Vec<String> = classes
            .into_iter()
            .map(|class| {
                let members: Vec<String> = class.iter().map(encode_variable).collect();
                format!("{{{}}}", members.join(","))
            })
            .collect();
        self.record("theory", encoded.join(";"))
    }

    /// Contexts iterate in variable order, so this is already canonical.
    pub(crate) fn context(self, context: &Context) -> Self {
        let encoded: Vec<String> = context
            .iter()
            .map(|(v, ty)| format!("{}={ty}", encode_variable(v)))
            .collect();
        self.record("context", encoded.join(";"))
    }

    pub(crate) fn typing(self, typing: &Typing) -> Self {
        self.record("dimension", typing.dimension())
            .record("typing", typing)
    }

    pub(crate) fn finish(self) -> Fingerprint {
        Fingerprint(format!("{:x}", self.hasher.finalize()))
    }
}

fn encode_variable(v: &Variable) -> String {
    format!("{}/{}", v.name(), v.dimension())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(name: &str) -> Variable {
        Variable::new(name, 0).unwrap()
    }

    #[test]
    fn theory_encoding_ignores_merge_order() {
        let ab_cd = EquationalTheory::new()
            .with_equation(v("a"), v("b"))
            .unwrap()
            .with_equation(v("c"), v("d"))
            .unwrap();
        let cd_ab = EquationalTheory::new()
            .with_equation(v("d"), v("c"))
            .unwrap()
            .with_equation(v("b"), v("a"))
            .unwrap();
        assert_ne!(ab_cd.to_string(), cd_ab.to_string());
        assert_eq!(
            Encoder::new().theory(&ab_cd).finish(),
            Encoder::new().theory(&cd_ab).finish()
        );
        assert_ne!(
            Encoder::new().theory(&ab_cd).finish(),
            Encoder::new().theory(&EquationalTheory::new()).finish()
        );
    }

    #[test]
    fn variables_are_encoded_with_their_dimension() {
        let f1 = Variable::new("f", 1).unwrap();
        let f2 = Variable::new("f", 2).unwrap();
        assert_eq!(encode_variable(&f1), "f/1");
        assert_ne!(encode_variable(&f1), encode_variable(&f2));
    }

    #[test]
    fn digests_are_hex_sha256() {
        let fp = Encoder::new().finish();
        assert_eq!(
            fp.as_str(),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
        assert_eq!(fp.short(), "e3b0c44298fc");
        assert_ne!(Encoder::new().record("proof", "Point(a)").finish(), fp);
    }
}
