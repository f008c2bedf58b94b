//! CLI argument definitions

use clap::Args;

/// Arguments for generating one launch configuration
#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    /// Label of the config
    #[arg(value_name = "LABEL")]
    pub label: String,

    /// Template to use for the launch config, a JSON file or the name of a
    /// file (without suffix) in the templates directory [default: gdb]
    #[arg(short, long, value_name = "TEMPLATE")]
    pub template: Option<String>,

    /// Only print the launch config
    #[arg(short, long)]
    pub dry_run: bool,

    /// Task to run before launching
    #[arg(short, long, value_name = "TASK")]
    pub build_task: Option<String>,

    /// Command to run, e.g. `make test TEST=... JTREG=VERBOSE=all`
    #[arg(
        value_name = "COMMAND",
        required = true,
        num_args = 1..,
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub command: Vec<String>,
}
