use crate::cli::RenderArgs;
use crate::config::{Config, Format};
use crate::support::{derivation_failed, parse_or_exit, print_json, read_expression_or_exit};
use opetope_kernel::{Rule, RuleInstance, Sequent, Style, Tex};
use serde_json::json;
use tracing::info;

pub fn run(expr: Option<String>, file: Option<String>, render: RenderArgs, config: &Config) {
    let (format, style) = config.resolve(&render);
    let source = read_expression_or_exit(expr, file);
    let proof = parse_or_exit(source.trim(), format == Format::Json);
    report(&proof, format, &style);
}

/// Evaluate `proof` and print its conclusion in `format`.
pub fn report(proof: &RuleInstance, format: Format, style: &Style) {
    let json_output = format == Format::Json;
    let seq = proof
        .eval()
        .unwrap_or_else(|err| derivation_failed(&err, json_output));
    info!(expression = %proof, dimension = seq.dimension(), "derivation succeeded");

    match format {
        Format::Json => print_json(&summary(proof, &seq, style)),
        Format::Tex => println!("{}", seq.to_tex(style)),
        Format::Text => {
            println!("{proof}");
            println!("  Dimension: {}", seq.dimension());
            println!("  Typing: {}", seq.typing());
            if style.print_contexts {
                println!("  Context: {}", seq.context());
            }
            println!("  Theory: {}", seq.theory());
            println!("  Fingerprint: {}", seq.fingerprint().short());
        }
    }
}

fn summary(proof: &RuleInstance, seq: &Sequent, style: &Style) -> serde_json::Value {
    let theory: Vec<Vec<String>> = seq
        .theory()
        .classes()
        .iter()
        .map(|class| class.iter().map(ToString::to_string).collect())
        .collect();
    let mut payload = json!({
        "ok": true,
        "expression": proof.to_string(),
        "dimension": seq.dimension(),
        "term": seq.term().to_string(),
        "type": seq.ty().to_string(),
        "typing": seq.typing().to_string(),
        "theory": theory,
        "fingerprint": seq.fingerprint(),
        "proof_fingerprint": proof.fingerprint(),
    });
    if style.print_contexts {
        payload["context"] = seq
            .context()
            .iter()
            .map(|(v, ty)| {
                json!({
                    "variable": v.name(),
                    "dimension": v.dimension(),
                    "type": ty.to_string(),
                })
            })
            .collect();
    }
    payload
}
