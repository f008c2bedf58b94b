//! CLI command handling
//!
//! Runs the pipeline for one label and reports what happened.

use std::path::Path;

use colored::Colorize;

use crate::commands::GenerateArgs;
use crate::common::config::Config;
use crate::common::{paths, Result};
use crate::launch::{build_launch_config, load_template, LaunchConfig, LaunchConfigs, Upsert};
use crate::rerun;
use crate::runner::{self, CommandResult};

/// Run the build command and add (or print) its launch configuration
pub async fn dispatch(args: GenerateArgs, config: &Config) -> Result<()> {
    // Cheap checks first, the build can take minutes
    runner::split_command(&args.command, &config.rerun.build_tool)?;
    let template = load_template(template_id(&args, config), &config.templates_dir())?;

    let result = runner::run_command(&args.command, &config.rerun.build_tool).await?;
    let launch = generate(&args, config, template, &result)?;

    if args.dry_run {
        println!("{}", launch.to_pretty_json()?);
        return Ok(());
    }

    let path = paths::launch_file(&config.launch.file);
    let name = launch.name().unwrap_or(&args.label).to_string();
    match save(launch, &path)? {
        Upsert::Added => println!("{} launch config {}", "Adding".green().bold(), name),
        Upsert::Replaced => println!("{} launch config {}", "Replacing".yellow().bold(), name),
    }
    tracing::debug!(path = %path.display(), "Launch file written");

    Ok(())
}

/// Template named on the command line, or the configured default
pub fn template_id<'a>(args: &'a GenerateArgs, config: &'a Config) -> &'a str {
    args.template
        .as_deref()
        .unwrap_or(config.defaults.template.as_str())
}

/// Parse captured output and overlay it onto `template`
pub fn generate(
    args: &GenerateArgs,
    config: &Config,
    template: LaunchConfig,
    result: &CommandResult,
) -> Result<LaunchConfig> {
    let invocation = rerun::parse(result, &config.rerun.executable)?;
    Ok(build_launch_config(
        template,
        &args.label,
        &invocation,
        args.build_task.as_deref(),
        &config.launch.diagnostic_args,
    ))
}

/// Insert or replace `launch` in the launch file at `path`
pub fn save(launch: LaunchConfig, path: &Path) -> Result<Upsert> {
    let mut configs = LaunchConfigs::read_or_default(path)?;
    let action = configs.upsert(launch);
    configs.write(path)?;
    Ok(action)
}
