use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Duration;

use dtsgen_codegen::{FileWriter, FsWriter, MemoryWriter, TypeScriptGenerator};
use dtsgen_core::{ir, DtsgenConfig, SourceFile};

/// Generate TypeScript from an IR document.
#[derive(Parser)]
pub struct GenerateCommand {
    /// Configuration file.
    #[arg(short, long, default_value = "dtsgen.toml")]
    pub config: PathBuf,

    /// IR document (reads stdin when omitted or `-`).
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Output directory, overriding the config.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Source root prefix, overriding the config.
    #[arg(long)]
    pub root: Option<String>,

    /// Namespace wrapping every module, overriding the config.
    #[arg(long)]
    pub namespace: Option<String>,

    /// Render everything but write nothing.
    #[arg(long)]
    pub dry_run: bool,

    /// Print the combined output to stdout.
    #[arg(long)]
    pub print: bool,

    /// Enable debug logging.
    #[arg(short, long)]
    pub verbose: bool,
}

impl GenerateCommand {
    /// Execute the generate command.
    pub fn execute(self) -> Result<()> {
        super::init_tracing(self.verbose);

        let config = self.load_config()?;
        let generator = TypeScriptGenerator::new(&config)?;

        let pb = ProgressBar::new_spinner();
        pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
        pb.enable_steady_tick(Duration::from_millis(100));

        pb.set_message("Reading IR...");
        let files = self.read_input()?;
        tracing::debug!(files = files.len(), "IR loaded");

        pb.set_message("Generating TypeScript...");
        let mut fs_writer = FsWriter::new();
        let mut memory_writer = MemoryWriter::new();
        let writer: &mut dyn FileWriter = if self.dry_run {
            &mut memory_writer
        } else {
            &mut fs_writer
        };
        let report = generator.generate(&files, writer);

        pb.finish_and_clear();

        if self.print {
            print!("{}", report.aggregate);
        } else {
            print_summary(&files, &config, report.written.len(), self.dry_run);
        }

        if !report.is_success() {
            for path in &report.failed {
                eprintln!("  {} {}", style("✗").red(), path.display());
            }
            anyhow::bail!("{} file(s) could not be written", report.failed.len());
        }

        Ok(())
    }

    /// Load the config file and apply command-line overrides.
    ///
    /// A missing file is only an error when `--root` does not make up for it.
    fn load_config(&self) -> Result<DtsgenConfig> {
        let mut config = if self.config.exists() {
            DtsgenConfig::from_file(&self.config)?
        } else {
            tracing::debug!(path = %self.config.display(), "No config file, using defaults");
            DtsgenConfig::default()
        };

        if let Some(output) = &self.output {
            config.output = output.clone();
        }
        if let Some(root) = &self.root {
            config.root = root.clone();
        }
        if let Some(namespace) = &self.namespace {
            config.namespace = Some(namespace.clone());
        }

        config.validate()?;
        Ok(config)
    }

    fn read_input(&self) -> Result<Vec<SourceFile>> {
        match &self.input {
            Some(path) if path.as_os_str() != "-" => ir::load_ir(path)
                .with_context(|| format!("Failed to load IR from {}", path.display())),
            _ => ir::read_ir(std::io::stdin().lock()).context("Failed to read IR from stdin"),
        }
    }
}

fn print_summary(files: &[SourceFile], config: &DtsgenConfig, written: usize, dry_run: bool) {
    let models: usize = files.iter().map(|f| f.models.len()).sum();
    let enums: usize = files.iter().map(|f| f.enums.len()).sum();
    let controllers: usize = files.iter().map(|f| f.controllers.len()).sum();

    println!();
    println!(
        "  {} Generated {} models, {} enums and {} controllers",
        style("✓").green(),
        style(models).cyan(),
        style(enums).cyan(),
        style(controllers).cyan()
    );
    if dry_run {
        println!(
            "  {} Dry run, {} files rendered and not written",
            style("ℹ").blue(),
            style(files.len()).cyan()
        );
    } else {
        println!(
            "  {} {} files written to {}",
            style("📁").dim(),
            style(written).cyan(),
            style(config.output.display()).cyan()
        );
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const IR: &str = r#"[
        {
            "FileName": "/app/Models/User.cs",
            "Models": [
                {"ModelName": "User", "BaseClasses": [], "Fields": [],
                 "Properties": [{"Identifier": "Role", "Type": "Role"}]}
            ],
            "Enums": [{"Identifier": "Role", "Values": {"Admin": null, "Member": null}}],
            "Controllers": []
        }
    ]"#;

    fn command(dir: &std::path::Path) -> GenerateCommand {
        GenerateCommand {
            config: dir.join("dtsgen.toml"),
            input: Some(dir.join("ir.json")),
            output: Some(dir.join("out")),
            root: None,
            namespace: None,
            dry_run: false,
            print: false,
            verbose: false,
        }
    }

    #[test]
    fn test_load_config_with_overrides() {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join("dtsgen.toml"),
            "root = \"/app/\"\nnamespace = \"Old\"\n",
        )
        .unwrap();

        let mut cmd = command(dir.path());
        cmd.namespace = Some("Api".to_string());

        let config = cmd.load_config().unwrap();
        assert_eq!(config.root, "/app/");
        assert_eq!(config.namespace.as_deref(), Some("Api"));
        assert_eq!(config.output, dir.path().join("out"));
    }

    #[test]
    fn test_missing_root_fails() {
        let dir = tempdir().unwrap();
        let cmd = command(dir.path());
        assert!(cmd.load_config().is_err());
    }

    #[test]
    fn test_execute_writes_files() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("ir.json"), IR).unwrap();

        let mut cmd = command(dir.path());
        cmd.root = Some("/app/".to_string());
        cmd.execute().unwrap();

        let user = std::fs::read_to_string(dir.path().join("out/Models/User.ts")).unwrap();
        assert!(user.contains("export interface User {"));
        assert!(user.contains("export enum Role {"));
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("ir.json"), IR).unwrap();

        let mut cmd = command(dir.path());
        cmd.root = Some("/app/".to_string());
        cmd.dry_run = true;
        cmd.execute().unwrap();

        assert!(!dir.path().join("out").exists());
    }
}
