use anyhow::Result;
use clap::Parser;
use console::style;
use std::fs;
use std::path::PathBuf;

/// Starter configuration written by `dtsgen init`.
const CONFIG_TEMPLATE: &str = r#"# dtsgen configuration
#
# Values may reference environment variables as ${VAR_NAME}.

# Source root prefix stripped from every IR file path (required).
root = "src/"

# Directory the generated modules are written under.
output = "frontend/src/app/api"

# Extension of generated files.
extension = ".ts"

# namespace = "Api"

omit_file_path_comment = false
omit_semicolon = false
omit_base_classes = ["ControllerBase", "Controller"]
omit_unresolved_imports = false

camel_case = true
camel_case_enums = false
numeric_enums = false
string_literal_types_instead_of_enums = false

[camel_case_options]
pascal_case = false
preserve_consecutive_uppercase = false

[custom_type_translations]
# DateTime = "Date"

[wrappers]
collections = []
dictionaries = []
transparent = []

[client]
environment_module = "environments/environment"
environment_symbol = "environment"
api_base_property = "apiUrl"
"#;

/// Write a starter configuration file.
#[derive(Parser)]
pub struct InitCommand {
    /// Path of the configuration file to create.
    #[arg(short, long, default_value = "dtsgen.toml")]
    pub config: PathBuf,

    /// Overwrite an existing file.
    #[arg(long)]
    pub force: bool,
}

impl InitCommand {
    /// Execute the init command.
    pub fn execute(self) -> Result<()> {
        if self.config.exists() && !self.force {
            anyhow::bail!(
                "Config file already exists: {} (use --force to overwrite)",
                self.config.display()
            );
        }

        if let Some(parent) = self.config.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.config, CONFIG_TEMPLATE)?;

        println!();
        println!(
            "{} Created {}",
            style("✓").green(),
            style(self.config.display()).cyan()
        );
        println!();
        println!("Next steps:");
        println!("  Set {} to your backend source root", style("root").dim());
        println!(
            "  {} to generate",
            style("dtsgen generate --input models.json").dim()
        );
        println!();

        Ok(())
    }
}
