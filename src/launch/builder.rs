//! Overlay a parsed invocation onto a template

use serde_json::{json, Value};

use crate::rerun::ParsedInvocation;

use super::template::PLACEHOLDER;
use super::LaunchConfig;

/// Build the launch configuration named after `label`
///
/// `diagnostic_args` go in front of the parsed arguments; the environment
/// is emitted as `{name, value}` pairs sorted by name.
pub fn build_launch_config(
    mut template: LaunchConfig,
    label: &str,
    invocation: &ParsedInvocation,
    build_task: Option<&str>,
    diagnostic_args: &[String],
) -> LaunchConfig {
    let name = match template.name() {
        Some(name) if name.contains(PLACEHOLDER) => name.replace(PLACEHOLDER, label),
        _ => label.to_string(),
    };
    template.set("name", name);

    template.set("cwd", invocation.cwd.display().to_string());

    // BTreeMap iteration is already sorted by name
    let environment: Vec<Value> = invocation
        .env
        .iter()
        .map(|(name, value)| json!({ "name": name, "value": value }))
        .collect();
    template.set("environment", environment);

    template.set("program", invocation.program.display().to_string());

    let args: Vec<String> = diagnostic_args
        .iter()
        .chain(&invocation.args)
        .cloned()
        .collect();
    template.set("args", args);

    if let Some(task) = build_task {
        template.set("preLaunchTask", task);
    }

    template
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::BTreeMap;
    use std::path::PathBuf;

    fn template(value: Value) -> LaunchConfig {
        serde_json::from_value(value).unwrap()
    }

    fn invocation() -> ParsedInvocation {
        ParsedInvocation {
            cwd: PathBuf::from("/home/u/build"),
            env: BTreeMap::from([
                ("PATH".to_string(), "/bin".to_string()),
                ("CLASSPATH".to_string(), "/a:/b".to_string()),
                ("JAVA_HOME".to_string(), "/x".to_string()),
            ]),
            program: PathBuf::from("/usr/bin/java"),
            args: vec!["-cp".to_string(), "foo".to_string(), "Main".to_string()],
        }
    }

    fn diagnostic_args() -> Vec<String> {
        vec![
            "-XX:+UnlockDiagnosticVMOptions".to_string(),
            "-XX:+WhiteBoxAPI".to_string(),
        ]
    }

    #[test]
    fn test_placeholder_is_substituted() {
        let cfg = build_launch_config(
            template(json!({"name": "Debug $NAME"})),
            "t1",
            &invocation(),
            None,
            &diagnostic_args(),
        );
        assert_eq!(cfg.name(), Some("Debug t1"));
    }

    #[test]
    fn test_name_without_placeholder_is_replaced() {
        let cfg = build_launch_config(
            template(json!({"name": "fixed"})),
            "t1",
            &invocation(),
            None,
            &diagnostic_args(),
        );
        assert_eq!(cfg.name(), Some("t1"));
    }

    #[test]
    fn test_missing_name_is_set() {
        let cfg = build_launch_config(template(json!({})), "t1", &invocation(), None, &[]);
        assert_eq!(cfg.name(), Some("t1"));
    }

    #[test]
    fn test_invocation_fields_are_overlaid() {
        let cfg = build_launch_config(
            template(json!({
                "name": "$NAME (gdb)",
                "type": "cppdbg",
                "cwd": "${workspaceFolder}",
                "args": ["stale"],
                "MIMode": "gdb"
            })),
            "t1",
            &invocation(),
            None,
            &diagnostic_args(),
        );

        assert_eq!(cfg.get("type"), Some(&json!("cppdbg")));
        assert_eq!(cfg.get("MIMode"), Some(&json!("gdb")));
        assert_eq!(cfg.get("cwd"), Some(&json!("/home/u/build")));
        assert_eq!(cfg.get("program"), Some(&json!("/usr/bin/java")));
        assert_eq!(
            cfg.get("args"),
            Some(&json!([
                "-XX:+UnlockDiagnosticVMOptions",
                "-XX:+WhiteBoxAPI",
                "-cp",
                "foo",
                "Main"
            ]))
        );
        assert_eq!(cfg.get("preLaunchTask"), None);
    }

    #[test]
    fn test_environment_sorted_by_name() {
        let cfg = build_launch_config(template(json!({})), "t1", &invocation(), None, &[]);
        assert_eq!(
            cfg.get("environment"),
            Some(&json!([
                {"name": "CLASSPATH", "value": "/a:/b"},
                {"name": "JAVA_HOME", "value": "/x"},
                {"name": "PATH", "value": "/bin"}
            ]))
        );
    }

    #[test]
    fn test_build_task_sets_pre_launch_task() {
        let cfg = build_launch_config(
            template(json!({"name": "$NAME"})),
            "t1",
            &invocation(),
            Some("build hotspot"),
            &[],
        );
        assert_eq!(cfg.get("preLaunchTask"), Some(&json!("build hotspot")));
    }
}
