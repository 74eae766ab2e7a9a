use crate::config::Config;
use crate::syntax;
use opetope_kernel::{DerivationError, RuleInstance};
use serde_json::{Value, json};
use std::fs;

pub fn load_config_or_exit(path: Option<&str>) -> Config {
    match path {
        Some(path) => Config::load(path).unwrap_or_else(|e| {
            eprintln!("error: {e}");
            std::process::exit(1);
        }),
        None => Config::default(),
    }
}

pub fn read_expression_or_exit(expr: Option<String>, file: Option<String>) -> String {
    match (expr, file) {
        (Some(expr), _) => expr,
        (None, Some(path)) => fs::read_to_string(&path).unwrap_or_else(|e| {
            eprintln!("error: failed to read expression from {path}: {e}");
            std::process::exit(1);
        }),
        (None, None) => {
            eprintln!("error: expected an expression or --file");
            std::process::exit(1);
        }
    }
}

pub fn parse_or_exit(source: &str, json_output: bool) -> RuleInstance {
    syntax::parse(source).unwrap_or_else(|e| fail(json_output, "syntax", &e))
}

/// Report a rejected derivation and exit with status 1.
pub fn derivation_failed(err: &DerivationError, json_output: bool) -> ! {
    if json_output {
        print_json(&json!({
            "ok": false,
            "scope": err.scope,
            "message": err.message,
        }));
        std::process::exit(1);
    }
    eprintln!("error: {}: {}", err.scope, err.message);
    std::process::exit(1);
}

/// Report a front-end failure and exit with status 1.
pub fn fail(json_output: bool, scope: &str, message: &str) -> ! {
    if json_output {
        print_json(&json!({
            "ok": false,
            "scope": scope,
            "message": message,
        }));
    } else {
        eprintln!("error: {scope}: {message}");
    }
    std::process::exit(1);
}

pub fn print_json(value: &Value) {
    println!(
        "{}",
        serde_json::to_string_pretty(value).expect("json serialization")
    );
}
