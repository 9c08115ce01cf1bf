//! LaTeX template discovery across the configured template directories.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::Config;

/// Offered when no template directory holds any `.tex` file.
pub const DEFAULT_TEMPLATES: &[&str] = &["modern.tex", "classic.tex", "professional.tex"];

/// `.tex` file names across every template directory, de-duplicated in
/// directory order.
pub fn list_templates(config: &Config) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for dir in &config.templates_dirs {
        for name in tex_files_in(dir) {
            if !names.contains(&name) {
                names.push(name);
            }
        }
    }

    if names.is_empty() {
        debug!("No templates found; offering defaults");
        return DEFAULT_TEMPLATES.iter().map(|s| s.to_string()).collect();
    }
    names
}

/// First template directory holding `name`. Names that try to leave the
/// directory are never resolved.
pub fn find_template(config: &Config, name: &str) -> Option<PathBuf> {
    if name.is_empty() || name.contains(['/', '\\']) || name.contains("..") {
        return None;
    }
    config
        .templates_dirs
        .iter()
        .map(|dir| dir.join(name))
        .find(|path| path.is_file())
}

fn tex_files_in(dir: &Path) -> Vec<String> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };
    let mut names: Vec<String> = entries
        .filter_map(|e| e.ok())
        .filter(|e| e.path().is_file())
        .filter_map(|e| e.file_name().to_str().map(str::to_string))
        .filter(|n| n.to_lowercase().ends_with(".tex"))
        .collect();
    names.sort();
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with(dirs: Vec<PathBuf>) -> Config {
        Config {
            templates_dirs: dirs,
            ..Config::default()
        }
    }

    #[test]
    fn test_lists_and_dedupes_across_dirs() {
        let a = tempfile::tempdir().unwrap();
        let b = tempfile::tempdir().unwrap();
        std::fs::write(a.path().join("modern.tex"), "").unwrap();
        std::fs::write(a.path().join("notes.md"), "").unwrap();
        std::fs::write(b.path().join("modern.tex"), "").unwrap();
        std::fs::write(b.path().join("classic.tex"), "").unwrap();

        let config = config_with(vec![a.path().to_path_buf(), b.path().to_path_buf()]);
        assert_eq!(list_templates(&config), vec!["modern.tex", "classic.tex"]);
    }

    #[test]
    fn test_defaults_when_nothing_found() {
        let config = config_with(vec![PathBuf::from("/no/such/dir")]);
        assert_eq!(
            list_templates(&config),
            vec!["modern.tex", "classic.tex", "professional.tex"]
        );
    }

    #[test]
    fn test_find_template_rejects_traversal() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("modern.tex"), "").unwrap();
        let config = config_with(vec![dir.path().to_path_buf()]);

        assert_eq!(find_template(&config, "modern.tex"), Some(dir.path().join("modern.tex")));
        assert_eq!(find_template(&config, "../modern.tex"), None);
        assert_eq!(find_template(&config, "missing.tex"), None);
    }
}
