//! Template lookup
//!
//! A template is either an explicit `*.json` path or a bare name resolved in
//! the templates directory (`gdb` -> `<templates_dir>/gdb.json`).

use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::common::{Error, Result};

use super::LaunchConfig;

/// Token in a template's `name` replaced by the label
pub const PLACEHOLDER: &str = "$NAME";

const TEMPLATE_SUFFIX: &str = ".json";

/// Map a template identifier to a file
pub fn resolve_template(id: &str, templates_dir: &Path) -> PathBuf {
    if id.ends_with(TEMPLATE_SUFFIX) {
        PathBuf::from(id)
    } else {
        templates_dir.join(format!("{id}{TEMPLATE_SUFFIX}"))
    }
}

/// Load a template as the base of a new launch configuration
pub fn load_template(id: &str, templates_dir: &Path) -> Result<LaunchConfig> {
    let path = resolve_template(id, templates_dir);
    if !path.exists() {
        return Err(Error::TemplateNotFound(path));
    }

    let content = std::fs::read_to_string(&path).map_err(|e| Error::file_read(&path, e))?;
    tracing::debug!(template = %path.display(), "Loaded template");

    match serde_json::from_str(&content)? {
        Value::Object(fields) => Ok(LaunchConfig::new(fields)),
        _ => Err(Error::TemplateNotObject(path)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_bare_name_resolves_in_templates_dir() {
        let dir = Path::new("/opt/jtreg-launch/templates");
        assert_eq!(resolve_template("gdb", dir), dir.join("gdb.json"));
    }

    #[test]
    fn test_json_path_is_used_directly() {
        let dir = Path::new("/opt/jtreg-launch/templates");
        assert_eq!(
            resolve_template("my/custom.json", dir),
            PathBuf::from("my/custom.json")
        );
    }

    #[test]
    fn test_load_named_template() {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join("lldb.json"),
            r#"{"name": "$NAME (lldb)", "type": "cppdbg", "MIMode": "lldb"}"#,
        )
        .unwrap();

        let template = load_template("lldb", dir.path()).unwrap();
        assert_eq!(template.name(), Some("$NAME (lldb)"));
        assert_eq!(template.get("MIMode"), Some(&serde_json::json!("lldb")));
    }

    #[test]
    fn test_missing_template() {
        let dir = tempdir().unwrap();
        let err = load_template("nope", dir.path()).unwrap_err();
        assert!(matches!(err, Error::TemplateNotFound(ref p) if p == &dir.path().join("nope.json")));
    }

    #[test]
    fn test_template_must_be_object() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("list.json");
        std::fs::write(&path, "[1, 2]").unwrap();

        let err = load_template(path.to_str().unwrap(), dir.path()).unwrap_err();
        assert!(matches!(err, Error::TemplateNotObject(_)));
    }

    #[test]
    fn test_template_must_be_json() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("broken.json"), "{ name: ").unwrap();

        let err = load_template("broken", dir.path()).unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_bundled_templates_are_valid() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("templates");
        for id in ["gdb", "lldb"] {
            let template = load_template(id, &dir).unwrap();
            assert!(template.name().unwrap().contains(PLACEHOLDER));
        }
    }
}
