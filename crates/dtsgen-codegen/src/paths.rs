//! Output path mapping and relative module specifiers.

use std::path::PathBuf;

use dtsgen_core::DtsgenConfig;

/// Maps source file paths into the output tree.
#[derive(Debug, Clone)]
pub struct OutputLayout {
    root: String,
    output: PathBuf,
    extension: String,
}

impl OutputLayout {
    /// Create a layout from the run configuration.
    pub fn new(config: &DtsgenConfig) -> Self {
        Self {
            root: config.normalized_root(),
            output: config.output.clone(),
            extension: config.extension.clone(),
        }
    }

    /// Source path relative to the configured root, `/`-separated.
    ///
    /// Paths that do not start with the root are cut after the first
    /// occurrence of it; paths that do not contain it at all are kept whole.
    pub fn relative_source(&self, source_path: &str) -> String {
        let path = source_path.replace('\\', "/");
        let root = self.root.as_str();

        let relative = if root.is_empty() {
            path.as_str()
        } else if let Some(rest) = path.strip_prefix(root) {
            rest
        } else if let Some(index) = path.find(root) {
            &path[index + root.len()..]
        } else {
            path.as_str()
        };

        segments(relative).collect::<Vec<_>>().join("/")
    }

    /// Where the generated file for `source_path` is written.
    pub fn output_path(&self, source_path: &str) -> PathBuf {
        let relative = self.relative_source(source_path);
        let (dir, file) = match relative.rsplit_once('/') {
            Some((dir, file)) => (Some(dir), file),
            None => (None, relative.as_str()),
        };

        let file_name = format!("{}{}", file_stem(file), self.extension);
        let mut path = self.output.clone();
        if let Some(dir) = dir {
            path.push(dir);
        }
        path.push(file_name);
        path
    }

    /// Module path segments of the generated file, without extension.
    pub fn module_segments(&self, source_path: &str) -> Vec<String> {
        let relative = self.relative_source(source_path);
        let mut parts: Vec<String> = segments(&relative).map(str::to_string).collect();
        if let Some(last) = parts.last_mut() {
            *last = file_stem(last).to_string();
        }
        parts
    }

    /// Module specifier importing `to` from the file generated for `from`.
    pub fn import_specifier(&self, from: &str, to: &str) -> String {
        relative_import_path(&self.module_segments(from), &self.module_segments(to))
    }

    /// Module specifier of an output-root module (such as the environment
    /// handle) as seen from the file generated for `from`.
    pub fn root_module_specifier(&self, from: &str, module: &str) -> String {
        let target: Vec<String> = segments(module).map(str::to_string).collect();
        relative_import_path(&self.module_segments(from), &target)
    }
}

/// Relative module path between two files given as path segments, the last
/// segment being the file name.
pub fn relative_import_path(from: &[String], to: &[String]) -> String {
    let from_dirs = from.len().saturating_sub(1);
    let to_dirs = to.len().saturating_sub(1);
    let common = from[..from_dirs]
        .iter()
        .zip(to[..to_dirs].iter())
        .take_while(|(a, b)| a == b)
        .count();

    let ups = from_dirs - common;
    let mut parts = Vec::new();
    if ups == 0 {
        parts.push(".".to_string());
    } else {
        parts.extend(std::iter::repeat("..".to_string()).take(ups));
    }
    parts.extend(to[common..].iter().cloned());
    parts.join("/")
}

fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty() && *s != ".")
}

/// File name without its extension. Dotfiles keep their name.
fn file_stem(file: &str) -> &str {
    match file.rfind('.') {
        Some(index) if index > 0 => &file[..index],
        _ => file,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn layout(root: &str) -> OutputLayout {
        OutputLayout::new(&DtsgenConfig::new(root, "out"))
    }

    fn segs(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_relative_source() {
        let layout = layout("/src/Backend/");
        assert_eq!(
            layout.relative_source("/src/Backend/Models/User.cs"),
            "Models/User.cs"
        );
        assert_eq!(
            layout.relative_source("C:\\work/src/Backend/Models/User.cs"),
            "Models/User.cs"
        );
        assert_eq!(layout.relative_source("/elsewhere/User.cs"), "elsewhere/User.cs");
    }

    #[test]
    fn test_output_path_swaps_extension() {
        let layout = layout("/src/Backend");
        assert_eq!(
            layout.output_path("/src/Backend/Models/User.cs"),
            Path::new("out/Models/User.ts")
        );

        let mut config = DtsgenConfig::new("C:\\repo\\Api\\", "web/types");
        config.extension = ".d.ts".to_string();
        let layout = OutputLayout::new(&config);
        assert_eq!(
            layout.output_path("C:\\repo\\Api\\Dto\\Order.Line.cs"),
            Path::new("web/types/Dto/Order.Line.d.ts")
        );
    }

    #[test]
    fn test_import_specifier() {
        let layout = layout("/src/");
        assert_eq!(
            layout.import_specifier("/src/Models/User.cs", "/src/Models/Role.cs"),
            "./Role"
        );
        assert_eq!(
            layout.import_specifier("/src/Controllers/Users/UsersController.cs", "/src/Models/User.cs"),
            "../../Models/User"
        );
        assert_eq!(
            layout.root_module_specifier("/src/Models/User.cs", "environment"),
            "../environment"
        );
        assert_eq!(
            layout.root_module_specifier("/src/Program.cs", "config/environment"),
            "./config/environment"
        );
    }

    #[test]
    fn test_relative_import_path() {
        assert_eq!(
            relative_import_path(&segs(&["a", "b", "c"]), &segs(&["a", "b", "d"])),
            "./d"
        );
        assert_eq!(
            relative_import_path(&segs(&["a", "b"]), &segs(&["c", "d"])),
            "../c/d"
        );
        assert_eq!(relative_import_path(&segs(&["x"]), &segs(&["y"])), "./y");
    }
}
