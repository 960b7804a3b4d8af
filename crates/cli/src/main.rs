//! provider-codegen CLI
//!
//! Command-line interface for generating provider resources and docs from
//! OpenAPI documents.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use provider_codegen_common::{GeneratorConfig, ResourceDef, SchemaSpec};
use provider_codegen_generator::{GeneratedFile, ResourceGenerator, TemplateSet};
use provider_codegen_parser::OpenApiParser;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "provider-codegen")]
#[command(version, about = "Generate provider resources and docs from OpenAPI documents", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse an OpenAPI document and display the inferred resources
    #[command(after_help = "EXAMPLES:\n  \
        # List resources\n  \
        provider-codegen parse --spec openapi.yaml\n\n  \
        # Dump the resource model as JSON\n  \
        provider-codegen parse --spec openapi.json --json")]
    Parse {
        /// Path to the OpenAPI document (JSON or YAML)
        #[arg(short, long)]
        spec: PathBuf,

        /// Print resources as pretty JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate resource, data source and documentation files
    #[command(after_help = "EXAMPLES:\n  \
        provider-codegen generate \\\n    \
        --spec openapi.json \\\n    \
        --provider-name acme \\\n    \
        --output ./internal/provider \\\n    \
        --docs ./docs")]
    Generate {
        /// Path to the OpenAPI document (JSON or YAML)
        #[arg(short, long)]
        spec: PathBuf,

        /// Output directory for generated source files
        #[arg(short, long, default_value = "generated")]
        output: PathBuf,

        /// Output root for generated documentation
        #[arg(long, default_value = "docs")]
        docs: PathBuf,

        /// Provider name used as the resource type prefix
        #[arg(long)]
        provider_name: Option<String>,

        /// Go package name of the generated sources
        #[arg(long)]
        package: Option<String>,

        /// YAML generator configuration
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Directory with template overrides
        #[arg(long)]
        templates: Option<PathBuf>,

        /// Skip resources that fail to render instead of aborting
        #[arg(long)]
        keep_going: bool,
    },
}

/// Options of the generate command
struct GenerateOptions<'a> {
    spec: &'a Path,
    output: &'a Path,
    docs: &'a Path,
    provider_name: Option<&'a str>,
    package: Option<&'a str>,
    config: Option<&'a Path>,
    templates: Option<&'a Path>,
    keep_going: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Parse { spec, json } => {
            parse_command(spec.as_path(), json)?;
        }
        Commands::Generate {
            spec,
            output,
            docs,
            provider_name,
            package,
            config,
            templates,
            keep_going,
        } => {
            generate_command(GenerateOptions {
                spec: spec.as_path(),
                output: output.as_path(),
                docs: docs.as_path(),
                provider_name: provider_name.as_deref(),
                package: package.as_deref(),
                config: config.as_deref(),
                templates: templates.as_deref(),
                keep_going,
            })?;
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_resources(spec_path: &Path) -> Result<Vec<ResourceDef>> {
    let parser = OpenApiParser::from_file(spec_path)
        .with_context(|| format!("Failed to load OpenAPI document {}", spec_path.display()))?;
    parser.parse().context("Failed to infer resources")
}

fn parse_command(spec_path: &Path, json: bool) -> Result<()> {
    let resources = load_resources(spec_path)?;

    if json {
        let dump = serde_json::to_string_pretty(&resources)
            .context("Failed to serialize resources")?;
        println!("{}", dump);
        return Ok(());
    }

    println!(
        "{} Parsed {} resources from {}",
        "✓".green(),
        resources.len(),
        spec_path.display()
    );

    for resource in &resources {
        println!("\n  • {}", resource.name.cyan());
        println!("    Collection: {}", resource.collection_path);
        if resource.has_item_path() {
            println!("    Item: {}", resource.item_path);
        }
        let count = |schema: &Option<SchemaSpec>| schema.as_ref().map_or(0, SchemaSpec::len);
        println!(
            "    Fields: create {}, read {}, update {}",
            count(&resource.create_schema),
            count(&resource.read_schema),
            count(&resource.update_schema)
        );
        if resource.has_delete {
            println!("    Delete: {}", "yes".yellow());
        }
    }

    Ok(())
}

fn generate_command(options: GenerateOptions<'_>) -> Result<()> {
    let config = resolve_config(&options)?;
    debug!(
        provider = %config.provider_name,
        package = %config.package_name,
        "resolved generator config"
    );

    println!(
        "{} Generating from: {}",
        "→".cyan(),
        options.spec.display()
    );
    let resources = load_resources(options.spec)?;
    println!("{} Parsed {} resources", "✓".green(), resources.len());

    let templates = match options.templates {
        Some(dir) => TemplateSet::from_dir(dir)
            .with_context(|| format!("Failed to load templates from {}", dir.display()))?,
        None => TemplateSet::embedded().context("Failed to load embedded templates")?,
    };
    let generator = ResourceGenerator::new(templates, config);

    let files = if options.keep_going {
        let report = generator.generate_all_lenient(&resources);
        for (name, error) in &report.failures {
            eprintln!("{} Skipping {}: {}", "⚠".yellow(), name, error);
        }
        report.files
    } else {
        generator
            .generate_all(&resources)
            .context("Failed to generate resources")?
    };

    for file in &files {
        let target = destination(file, options.output, options.docs);
        write_file(&target, &file.contents)?;
        println!("  {} {}", "✓".green(), target.display());
    }

    println!(
        "\n{}",
        format!("✓ Generated {} files", files.len()).green().bold()
    );
    Ok(())
}

/// Config file values, then command-line overrides
fn resolve_config(options: &GenerateOptions<'_>) -> Result<GeneratorConfig> {
    let mut config = match options.config {
        Some(path) => GeneratorConfig::from_yaml_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => GeneratorConfig::default(),
    };

    if let Some(name) = options.provider_name {
        config = config.with_provider_name(name);
    }
    if let Some(package) = options.package {
        config = config.with_package_name(package);
    }
    config.validate().context("Invalid generator config")?;
    Ok(config)
}

/// Where a generated file lands on disk
///
/// Documentation paths (`docs/...`) are re-rooted under the docs directory;
/// everything else goes into the output directory.
fn destination(file: &GeneratedFile, output: &Path, docs: &Path) -> PathBuf {
    if file.kind.is_documentation() {
        match file.path.strip_prefix("docs") {
            Ok(relative) => docs.join(relative),
            Err(_) => docs.join(&file.path),
        }
    } else {
        output.join(&file.path)
    }
}

fn write_file(path: &Path, contents: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    fs::write(path, contents).with_context(|| format!("Failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use provider_codegen_generator::ArtifactKind;
    use tempfile::TempDir;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_spec_is_required() {
        assert!(Cli::try_parse_from(["provider-codegen", "generate"]).is_err());
    }

    #[test]
    fn test_generate_defaults() {
        let cli = Cli::try_parse_from(["provider-codegen", "generate", "--spec", "api.json"])
            .unwrap();
        match cli.command {
            Commands::Generate {
                output,
                docs,
                keep_going,
                ..
            } => {
                assert_eq!(output, PathBuf::from("generated"));
                assert_eq!(docs, PathBuf::from("docs"));
                assert!(!keep_going);
            }
            _ => panic!("expected generate"),
        }
    }

    #[test]
    fn test_destination_reroots_docs() {
        let doc = GeneratedFile {
            kind: ArtifactKind::ResourceDoc,
            path: PathBuf::from("docs/resources/widget.md"),
            contents: Vec::new(),
        };
        let source = GeneratedFile {
            kind: ArtifactKind::Resource,
            path: PathBuf::from("resource_widget.go"),
            contents: Vec::new(),
        };

        let output = Path::new("out");
        let docs = Path::new("site/docs");
        assert_eq!(
            destination(&doc, output, docs),
            PathBuf::from("site/docs/resources/widget.md")
        );
        assert_eq!(
            destination(&source, output, docs),
            PathBuf::from("out/resource_widget.go")
        );
    }

    #[test]
    fn test_flags_override_config_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("codegen.yaml");
        fs::write(&config_path, "provider_name: acme\npackage_name: acmeprovider\n").unwrap();

        let options = GenerateOptions {
            spec: Path::new("api.json"),
            output: Path::new("generated"),
            docs: Path::new("docs"),
            provider_name: None,
            package: Some("internal"),
            config: Some(&config_path),
            templates: None,
            keep_going: false,
        };
        let config = resolve_config(&options).unwrap();
        assert_eq!(config.provider_name, "acme");
        assert_eq!(config.package_name, "internal");
    }

    #[test]
    fn test_invalid_provider_name_is_rejected() {
        let options = GenerateOptions {
            spec: Path::new("api.json"),
            output: Path::new("generated"),
            docs: Path::new("docs"),
            provider_name: Some("Not Valid"),
            package: None,
            config: None,
            templates: None,
            keep_going: false,
        };
        assert!(resolve_config(&options).is_err());
    }

    #[test]
    fn test_write_file_creates_parents() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("docs/resources/widget.md");
        write_file(&path, b"# widget\n").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "# widget\n");
    }
}
