use clap::{ArgAction, Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "opetope",
    about = "Opetope: derive named opetopes from proof expressions",
    version
)]
pub struct Cli {
    /// Raise log verbosity (-v debug, -vv trace); OPETOPE_LOG takes precedence
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Path to a TOML configuration file
    #[arg(long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Evaluate a proof expression and print its conclusion sequent
    Eval {
        /// Proof expression, e.g. `Fill(Point(a), f)`
        #[arg(required_unless_present = "file", conflicts_with = "file")]
        expr: Option<String>,

        /// Read the proof expression from a file
        #[arg(long)]
        file: Option<String>,

        #[command(flatten)]
        render: RenderArgs,
    },

    /// Print the proof tree of an expression as bussproofs TeX
    Tex {
        /// Proof expression
        expr: String,

        /// Omit contexts from the sequents of the tree
        #[arg(long)]
        no_contexts: bool,
    },

    /// Evaluate one of the built-in example derivations
    Example {
        /// Example name (see --list)
        #[arg(required_unless_present = "list")]
        name: Option<String>,

        /// List the available examples
        #[arg(long)]
        list: bool,

        #[command(flatten)]
        render: RenderArgs,
    },
}

#[derive(Args, Clone, Copy, Debug, Default)]
pub struct RenderArgs {
    /// Print the conclusion as TeX
    #[arg(long, conflicts_with = "json")]
    pub tex: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Omit the context of the conclusion
    #[arg(long)]
    pub no_contexts: bool,
}
