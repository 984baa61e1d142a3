//! openapi-ingress CLI
//!
//! Command-line interface for generating Kubernetes resources from OpenAPI
//! documents. Every registered generator becomes a subcommand whose flags
//! come from the generator itself.

use anyhow::{Context, Result};
use clap::{
    crate_version, value_parser, Arg, ArgAction, ArgMatches, Args, Command, FromArgMatches,
};
use colored::*;
use openapi_ingress_common::Options;
use openapi_ingress_generator::{FlagKind, Generator, GeneratorRegistry};
use openapi_ingress_parser::OpenApiParser;
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Arguments shared by every generator
#[derive(Args, Debug)]
struct GlobalArgs {
    /// OpenAPI document to read (JSON or YAML)
    #[arg(short = 'i', long = "in", global = true, value_name = "FILE")]
    input: Option<PathBuf>,

    /// YAML file with generation options
    #[arg(long, global = true, value_name = "FILE")]
    options: Option<PathBuf>,

    /// Namespace of the generated resources
    #[arg(long, global = true)]
    namespace: Option<String>,

    /// Name of the backend service
    #[arg(long = "service.name", global = true)]
    service_name: Option<String>,

    /// Port of the backend service
    #[arg(long = "service.port", global = true)]
    service_port: Option<u16>,

    /// Host the routing rules apply to
    #[arg(long, global = true)]
    host: Option<String>,

    /// Path template to leave out (repeatable)
    #[arg(long = "disable-path", global = true, value_name = "PATH")]
    disable_path: Vec<String>,

    /// Write output to a file instead of stdout
    #[arg(short, long, global = true, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

fn main() -> Result<()> {
    let registry =
        GeneratorRegistry::with_builtin_generators().context("Failed to register generators")?;
    let matches = build_cli(&registry).get_matches();

    match matches.subcommand() {
        Some(("list", _)) => list_command(&registry),
        Some((name, sub_matches)) => {
            let global = GlobalArgs::from_arg_matches(sub_matches)?;
            init_tracing(global.verbose);

            let generated = generate_command(&registry, name, &global, sub_matches)?;
            write_output(global.output.as_deref(), &generated)
        }
        None => unreachable!("subcommand_required is set"),
    }
}

/// Build the command tree from the registered generators
fn build_cli(registry: &GeneratorRegistry) -> Command {
    let mut cli = Command::new("openapi-ingress")
        .version(crate_version!())
        .about("Generate Kubernetes Ingress resources from OpenAPI documents")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .after_help(
            "EXAMPLES:\n  \
            # One Ingress for the whole API\n  \
            openapi-ingress ingress -i petstore.yaml --service.name petstore\n\n  \
            # One Ingress per path, mounted under /api\n  \
            openapi-ingress ingress -i petstore.yaml --service.name petstore \\\n    \
            --path.base /api --path.split",
        );

    cli = GlobalArgs::augment_args(cli);
    cli = cli.subcommand(Command::new("list").about("List available generators"));

    for generator in registry.iter() {
        cli = cli.subcommand(generator_command(generator));
    }

    cli
}

/// Subcommand for one generator, with an argument per generator flag
fn generator_command(generator: &dyn Generator) -> Command {
    let mut command = Command::new(generator.name()).about(generator.description());

    for flag in generator.flags() {
        let help = if flag.default.is_empty() {
            flag.help.to_string()
        } else {
            format!("{} [default: {}]", flag.help, flag.default)
        };

        let arg = Arg::new(flag.name).long(flag.name).help(help);
        let arg = match flag.kind {
            FlagKind::String => arg.value_name("VALUE").action(ArgAction::Set),
            FlagKind::Bool => arg
                .value_name("BOOL")
                .value_parser(value_parser!(bool))
                .num_args(0..=1)
                .default_missing_value("true")
                .action(ArgAction::Set),
        };
        command = command.arg(arg);
    }

    command
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn list_command(registry: &GeneratorRegistry) -> Result<()> {
    println!("{}", "Available generators:".bold());
    for generator in registry.iter() {
        println!("  • {} - {}", generator.name().cyan(), generator.description());
        for flag in generator.flags() {
            println!("      --{:<16} {}", flag.name, flag.help);
        }
    }
    Ok(())
}

fn generate_command(
    registry: &GeneratorRegistry,
    name: &str,
    global: &GlobalArgs,
    matches: &ArgMatches,
) -> Result<String> {
    let generator = registry.require(name)?;

    let input = global
        .input
        .as_deref()
        .context("An OpenAPI document is required, pass it with --in <FILE>")?;

    eprintln!(
        "{} Parsing OpenAPI document: {}",
        "→".cyan(),
        input.display()
    );
    let api = OpenApiParser::from_file(input)
        .context("Failed to load OpenAPI document")?
        .parse()
        .context("Failed to parse OpenAPI document")?;

    if global.verbose {
        eprintln!("  Title: {}", api.title);
        eprintln!("  Version: {}", api.version);
        eprintln!("  Paths: {}", api.paths.len());
    }

    let options = build_options(global, generator, matches)?;

    eprintln!("{} Running {} generator", "→".cyan(), generator.name().yellow());
    let generated = generator
        .generate(&options, &api)
        .with_context(|| format!("Failed to generate {} resources", generator.name()))?;

    eprintln!("{}", "✓ Generation complete!".green().bold());
    Ok(generated)
}

/// Assemble options: defaults < options file < flags
///
/// Path overrides declared in the document are applied by the generator and
/// only fill in paths these options leave unset.
fn build_options(
    global: &GlobalArgs,
    generator: &dyn Generator,
    matches: &ArgMatches,
) -> Result<Options> {
    let mut options = match global.options.as_deref() {
        Some(path) => Options::load(path).context("Failed to load options file")?,
        None => Options::default(),
    };

    if let Some(namespace) = &global.namespace {
        options.namespace = namespace.clone();
    }
    if let Some(name) = &global.service_name {
        options.service.name = name.clone();
    }
    if let Some(port) = global.service_port {
        options.service.port = port;
    }
    if let Some(host) = &global.host {
        options.host = host.clone();
    }
    for path in &global.disable_path {
        options.disable_path(path.as_str());
    }

    for flag in generator.flags() {
        match flag.kind {
            FlagKind::String => {
                if let Some(value) = matches.get_one::<String>(flag.name) {
                    options
                        .set(flag.name, value)
                        .with_context(|| format!("Invalid value for --{}", flag.name))?;
                }
            }
            FlagKind::Bool => {
                if let Some(value) = matches.get_one::<bool>(flag.name) {
                    options.set(flag.name, &value.to_string())?;
                }
            }
        }
    }

    tracing::debug!(?options, "resolved generation options");
    Ok(options)
}

fn write_output(path: Option<&Path>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            fs::write(path, content)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!("{} Wrote {}", "✓".green(), path.display());
        }
        None => print!("{}", content),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const PETSTORE: &str = r#"openapi: 3.0.0
info:
  title: Petstore
  version: 1.0.0
paths:
  /pets:
    get: {}
  /pets/{id}:
    get: {}
  /admin:
    x-ingress:
      disabled: true
    get: {}
"#;

    fn spec_file() -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        file.write_all(PETSTORE.as_bytes()).unwrap();
        file
    }

    fn run(args: &[&str]) -> Result<String> {
        let registry = GeneratorRegistry::with_builtin_generators()?;
        let matches = build_cli(&registry).try_get_matches_from(args)?;
        let (name, sub_matches) = matches.subcommand().expect("subcommand");
        let global = GlobalArgs::from_arg_matches(sub_matches)?;
        generate_command(&registry, name, &global, sub_matches)
    }

    #[test]
    fn test_cli_definition_is_valid() {
        let registry = GeneratorRegistry::with_builtin_generators().unwrap();
        build_cli(&registry).debug_assert();
    }

    #[test]
    fn test_generator_flags_become_arguments() {
        let registry = GeneratorRegistry::with_builtin_generators().unwrap();
        let cli = build_cli(&registry);
        let ingress = cli.find_subcommand("ingress").unwrap();
        let longs: Vec<&str> = ingress.get_arguments().filter_map(|a| a.get_long()).collect();
        assert!(longs.contains(&"path.base"));
        assert!(longs.contains(&"path.split"));
        assert!(longs.contains(&"ingress.class"));
    }

    #[test]
    fn test_document_override_splits_output() {
        let spec = spec_file();
        let path = spec.path().to_str().unwrap();

        let yaml = run(&[
            "openapi-ingress",
            "ingress",
            "-i",
            path,
            "--service.name",
            "petstore",
        ])
        .unwrap();

        assert!(yaml.starts_with("---\n"));
        assert!(yaml.contains("name: petstore-pets\n"));
        assert!(yaml.contains("name: petstore-pets-id\n"));
        assert!(!yaml.contains("petstore-admin"));
    }

    #[test]
    fn test_options_file_can_reenable_path() {
        let spec = spec_file();
        let mut opts = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            opts,
            "service:\n  name: petstore\npaths:\n  /admin:\n    disabled: false"
        )
        .unwrap();

        let yaml = run(&[
            "openapi-ingress",
            "--options",
            opts.path().to_str().unwrap(),
            "ingress",
            "-i",
            spec.path().to_str().unwrap(),
            "--path.base",
            "/api",
        ])
        .unwrap();

        assert!(!yaml.starts_with("---"));
        assert!(yaml.contains("name: petstore-ingress"));
        assert!(yaml.contains("/api/admin"));
    }

    #[test]
    fn test_flags_override_options_file() {
        let spec = spec_file();
        let mut opts = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            opts,
            "namespace: shop\nservice:\n  name: petstore\ningress:\n  class: traefik"
        )
        .unwrap();

        let yaml = run(&[
            "openapi-ingress",
            "ingress",
            "--options",
            opts.path().to_str().unwrap(),
            "-i",
            spec.path().to_str().unwrap(),
            "--ingress.class",
            "nginx",
            "--namespace",
            "pets",
        ])
        .unwrap();

        assert!(yaml.contains("ingressClassName: nginx"));
        assert!(yaml.contains("namespace: pets"));
    }

    #[test]
    fn test_split_flag_overrides_options_file() {
        let spec = spec_file();
        let mut opts = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            opts,
            "service:\n  name: petstore\npath:\n  split: true\n\
             paths:\n  /admin:\n    disabled: false"
        )
        .unwrap();
        let opts_path = opts.path().to_str().unwrap();
        let spec_path = spec.path().to_str().unwrap();

        let from_file = run(&[
            "openapi-ingress",
            "ingress",
            "--options",
            opts_path,
            "-i",
            spec_path,
        ])
        .unwrap();
        assert!(from_file.starts_with("---\n"));

        let overridden = run(&[
            "openapi-ingress",
            "ingress",
            "--options",
            opts_path,
            "--path.split",
            "false",
            "-i",
            spec_path,
        ])
        .unwrap();
        assert!(!overridden.starts_with("---"));
        assert!(overridden.contains("name: petstore-ingress"));
    }

    #[test]
    fn test_bare_split_flag_enables_split() {
        let spec = spec_file();
        let mut opts = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            opts,
            "service:\n  name: petstore\npaths:\n  /admin:\n    disabled: false"
        )
        .unwrap();

        let yaml = run(&[
            "openapi-ingress",
            "ingress",
            "--options",
            opts.path().to_str().unwrap(),
            "--path.split",
            "-i",
            spec.path().to_str().unwrap(),
        ])
        .unwrap();
        assert!(yaml.starts_with("---\n"));
        assert!(yaml.contains("name: petstore-admin\n"));
    }

    #[test]
    fn test_missing_input_is_an_error() {
        let err = run(&["openapi-ingress", "ingress", "--service.name", "petstore"]).unwrap_err();
        assert!(err.to_string().contains("--in"));
    }

    #[test]
    fn test_missing_service_name_fails() {
        let spec = spec_file();
        let result = run(&[
            "openapi-ingress",
            "ingress",
            "-i",
            spec.path().to_str().unwrap(),
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_write_output_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("ingress.yaml");

        write_output(Some(&target), "kind: Ingress\n").unwrap();
        assert_eq!(fs::read_to_string(&target).unwrap(), "kind: Ingress\n");
    }
}
