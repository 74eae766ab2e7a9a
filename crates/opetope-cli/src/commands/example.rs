use crate::cli::RenderArgs;
use crate::commands::eval;
use crate::config::{Config, Format};
use crate::support::{fail, parse_or_exit, print_json};
use serde_json::json;

pub struct Example {
    pub name: &'static str,
    pub description: &'static str,
    pub expression: &'static str,
}

pub const EXAMPLES: &[Example] = &[
    Example {
        name: "arrow",
        description: "a single arrow f : a → ∅",
        expression: "Fill(Point(a), f)",
    },
    Example {
        name: "composition",
        description: "three composed arrows h(c ← g(b ← f))",
        expression: "Graft(Graft(Fill(Point(c), h), Fill(Point(b), g), c), Fill(Point(a), f), b)",
    },
    Example {
        name: "classic",
        description: "the 3-opetope grafting α onto β along i",
        expression: "Fill(Graft(Fill(Graft(Fill(Point(c), h), Fill(Point(a), i), c), β), \
                     Fill(Graft(Fill(Point(b), g), Fill(Point(a), f), b), α), i), A)",
    },
    Example {
        name: "degenerate",
        description: "grafting a degenerate 2-cell, which identifies a and c",
        expression: "Graft(Fill(Graft(Fill(Point(c), h), Fill(Point(a), i), c), β), \
                     DegenFill(Point(a), ι), i)",
    },
];

pub fn find(name: &str) -> Option<&'static Example> {
    EXAMPLES.iter().find(|ex| ex.name == name)
}

pub fn run(name: Option<String>, list: bool, render: RenderArgs, config: &Config) {
    let (format, style) = config.resolve(&render);
    let json_output = format == Format::Json;

    if list {
        if json_output {
            let items: Vec<_> = EXAMPLES
                .iter()
                .map(|ex| {
                    json!({
                        "name": ex.name,
                        "description": ex.description,
                        "expression": ex.expression,
                    })
                })
                .collect();
            print_json(&json!({ "examples": items }));
        } else {
            for ex in EXAMPLES {
                println!("{:<12} {}", ex.name, ex.description);
            }
        }
        return;
    }

    let name = name.unwrap_or_default();
    let Some(example) = find(&name) else {
        let known: Vec<&str> = EXAMPLES.iter().map(|ex| ex.name).collect();
        fail(
            json_output,
            "example",
            &format!("unknown example `{name}` (expected one of: {})", known.join(", ")),
        );
    };
    if format == Format::Text {
        println!("# {}: {}", example.name, example.description);
    }
    let proof = parse_or_exit(example.expression, json_output);
    eval::report(&proof, format, &style);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax;
    use opetope_kernel::Rule;

    #[test]
    fn every_example_derives() {
        for ex in EXAMPLES {
            let proof = syntax::parse(ex.expression)
                .unwrap_or_else(|e| panic!("{} does not parse: {e}", ex.name));
            assert_eq!(proof.to_string(), ex.expression, "{} is not canonical", ex.name);
            proof
                .eval()
                .unwrap_or_else(|e| panic!("{} does not derive: {e}", ex.name));
        }
    }

    #[test]
    fn lookup_by_name() {
        assert_eq!(find("classic").map(|ex| ex.name), Some("classic"));
        assert!(find("glue").is_none());
    }
}
