//! Proof expressions.
//!
//! ```text
//! rule := Point(name)
//!       | Degen(rule)
//!       | Fill(rule, name)
//!       | DegenFill(rule, name)
//!       | Graft(rule, rule, name)
//! ```
//!
//! A name is any non-empty run of characters other than whitespace,
//! parentheses and commas. The `Display` form of a `RuleInstance` parses
//! back to the same tree. Rules nest at most [`MAX_DEPTH`] deep.

use opetope_kernel::RuleInstance;

pub const MAX_DEPTH: usize = 256;

pub fn parse(input: &str) -> Result<RuleInstance, String> {
    let mut parser = Parser {
        input,
        pos: 0,
        depth: 0,
    };
    let rule = parser.rule()?;
    parser.skip_whitespace();
    if parser.pos < input.len() {
        return Err(format!(
            "unexpected trailing input at offset {}: {:?}",
            parser.pos,
            &input[parser.pos..]
        ));
    }
    Ok(rule)
}

struct Parser<'a> {
    input: &'a str,
    pos: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn skip_whitespace(&mut self) {
        let rest = self.rest();
        self.pos += rest.len() - rest.trim_start().len();
    }

    fn expect(&mut self, c: char) -> Result<(), String> {
        self.skip_whitespace();
        match self.rest().chars().next() {
            Some(found) if found == c => {
                self.pos += c.len_utf8();
                Ok(())
            }
            Some(found) => Err(format!(
                "expected `{c}` at offset {}, found `{found}`",
                self.pos
            )),
            None => Err(format!("expected `{c}` at offset {}, found end of input", self.pos)),
        }
    }

    fn name(&mut self) -> Result<&'a str, String> {
        self.skip_whitespace();
        let rest = self.rest();
        let len = rest
            .find(|c: char| c.is_whitespace() || matches!(c, '(' | ')' | ','))
            .unwrap_or(rest.len());
        if len == 0 {
            return Err(format!("expected a name at offset {}", self.pos));
        }
        self.pos += len;
        Ok(&rest[..len])
    }

    fn rule(&mut self) -> Result<RuleInstance, String> {
        if self.depth == MAX_DEPTH {
            return Err(format!(
                "rules nested deeper than {MAX_DEPTH} levels at offset {}",
                self.pos
            ));
        }
        self.depth += 1;
        let rule = self.application();
        self.depth -= 1;
        rule
    }

    fn application(&mut self) -> Result<RuleInstance, String> {
        let start = self.pos;
        let head = self.name()?;
        self.expect('(')?;
        let rule = match head {
            "Point" => RuleInstance::point(self.name()?),
            "Degen" => RuleInstance::degen(self.rule()?),
            "Fill" | "DegenFill" => {
                let premise = self.rule()?;
                self.expect(',')?;
                let name = self.name()?;
                if head == "Fill" {
                    RuleInstance::fill(premise, name)
                } else {
                    RuleInstance::degen_fill(premise, name)
                }
            }
            "Graft" => {
                let left = self.rule()?;
                self.expect(',')?;
                let right = self.rule()?;
                self.expect(',')?;
                RuleInstance::graft(left, right, self.name()?)
            }
            other => {
                return Err(format!(
                    "unknown rule `{other}` at offset {start}; expected one of \
                     Point, Degen, Fill, DegenFill, Graft"
                ));
            }
        };
        self.expect(')')?;
        Ok(rule)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CLASSIC: &str = "Fill(Graft(Fill(Graft(Fill(Point(c), h), Fill(Point(a), i), c), β), \
                           Fill(Graft(Fill(Point(b), g), Fill(Point(a), f), b), α), i), A)";

    #[test]
    fn parses_every_rule() {
        let parsed = parse("Graft(Fill(Point(b),g),DegenFill(Degen(Point(a)) , x),b)").unwrap();
        let expected = RuleInstance::graft(
            RuleInstance::fill(RuleInstance::point("b"), "g"),
            RuleInstance::degen_fill(RuleInstance::degen(RuleInstance::point("a")), "x"),
            "b",
        );
        assert_eq!(parsed, expected);
    }

    #[test]
    fn canonical_printing_parses_back() {
        let proof = parse(CLASSIC).unwrap();
        assert_eq!(parse(&proof.to_string()).unwrap(), proof);
        assert_eq!(proof.to_string(), CLASSIC);
    }

    #[test]
    fn names_may_be_unicode() {
        let proof = parse("  Fill( Point(⋆) , ∂f )  ").unwrap();
        assert_eq!(proof, RuleInstance::fill(RuleInstance::point("⋆"), "∂f"));
    }

    #[test]
    fn malformed_expressions() {
        let unknown = parse("Glue(Point(a), b)").unwrap_err();
        assert!(unknown.contains("unknown rule `Glue`"), "{unknown}");
        assert!(parse("Fill(Point(a)").unwrap_err().contains("expected `,`"));
        assert!(parse("Point()").unwrap_err().contains("expected a name"));
        assert!(parse("Point(a) extra").unwrap_err().contains("trailing input"));
        assert!(parse("").unwrap_err().contains("expected a name"));
        assert!(parse("Point(a").unwrap_err().contains("end of input"));
    }

    fn nested_degens(levels: usize) -> String {
        format!("{}Point(x){}", "Degen(".repeat(levels), ")".repeat(levels))
    }

    #[test]
    fn nesting_is_bounded() {
        assert!(parse(&nested_degens(MAX_DEPTH - 1)).is_ok());
        let err = parse(&nested_degens(100_000)).unwrap_err();
        assert!(err.contains("nested deeper than 256"), "{err}");
    }
}
