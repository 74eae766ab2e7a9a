use crate::config::Config;
use crate::support::{derivation_failed, parse_or_exit};
use opetope_kernel::{Rule, Style};

pub fn run(expr: String, no_contexts: bool, config: &Config) {
    let proof = parse_or_exit(expr.trim(), false);
    let style = Style {
        print_contexts: config.render.style.print_contexts && !no_contexts,
    };
    let tex = proof
        .to_tex(&style)
        .unwrap_or_else(|err| derivation_failed(&err, false));
    println!("{tex}");
}
