//! CloudStack client generator CLI.

use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::{filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use cloudstack_gen::{
    CompileWarning, EventMap, FileSource, Generator, GeneratorConfig, ManifestRenderer,
};

mod ui;

#[derive(Parser)]
#[command(name = "cloudstack-gen")]
#[command(version)]
#[command(about = "Compiles a CloudStack API listing into a typed client model")]
struct Cli {
    /// Log debug detail to stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile the API listing and write the generated output
    Generate {
        /// Generator configuration (YAML)
        #[arg(short, long)]
        config: PathBuf,

        /// listApis output (JSON)
        #[arg(short, long)]
        apis: PathBuf,

        /// listCapabilities output (JSON)
        #[arg(long)]
        capabilities: PathBuf,

        /// Async API to event type map (JSON)
        #[arg(short, long)]
        event_map: Option<PathBuf>,

        /// Output directory
        #[arg(short, long, default_value = "generated")]
        output: PathBuf,
    },

    /// Compile the API listing without writing anything
    Check {
        /// Generator configuration (YAML)
        #[arg(short, long)]
        config: PathBuf,

        /// listApis output (JSON)
        #[arg(short, long)]
        apis: PathBuf,

        /// Async API to event type map (JSON)
        #[arg(short, long)]
        event_map: Option<PathBuf>,
    },
}

fn main() -> miette::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Generate {
            config,
            apis,
            capabilities,
            event_map,
            output,
        } => generate(&config, apis, capabilities, event_map.as_deref(), &output),

        Commands::Check {
            config,
            apis,
            event_map,
        } => check(&config, apis, event_map.as_deref()),
    }
}

/// Compile warnings are printed from the result, so the library's own
/// `warn!` events stay quiet unless debug logging was asked for.
fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "info,cloudstack_gen=debug"
    } else {
        "warn,cloudstack_gen=error"
    }
}

fn init_tracing(verbose: bool) {
    let base_filter =
        std::env::var("RUST_LOG").unwrap_or_else(|_| default_filter(verbose).to_string());

    let filter = EnvFilter::try_new(&base_filter).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(verbose)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}

fn load_inputs(
    config_path: &Path,
    event_map_path: Option<&Path>,
) -> miette::Result<(GeneratorConfig, EventMap)> {
    let config = GeneratorConfig::load(config_path)?;
    let event_map = match event_map_path {
        Some(path) => EventMap::load(path)?,
        None => EventMap::default(),
    };
    debug!(
        config = %config_path.display(),
        overloads = config.overloads.len(),
        events = event_map.len(),
        "loaded inputs"
    );
    Ok((config, event_map))
}

fn generate(
    config_path: &Path,
    apis: PathBuf,
    capabilities: PathBuf,
    event_map_path: Option<&Path>,
    output: &Path,
) -> miette::Result<()> {
    let start = Instant::now();
    ui::print_compact_header(env!("CARGO_PKG_VERSION"));

    let (config, event_map) = load_inputs(config_path, event_map_path)?;
    print_config_box(&config, event_map.len());

    let source = FileSource::new(apis, Some(capabilities));
    let generator = Generator::new(config);

    let spinner = ui::spinner("Generating...");
    let result = generator.generate(&source, &event_map, &ManifestRenderer, output);
    spinner.finish_and_clear();
    let result = result?;

    ui::summary_line("APIs", result.apis, None);
    ui::summary_line("Shared objects", result.shared_objects, None);
    println!();
    print_warnings(&result.warnings);

    for file in &result.files {
        ui::dim(&output.join(file).display().to_string());
    }
    ui::success(&format!("Wrote {} file(s) to {}", result.files.len(), output.display()));
    ui::timing("Generated", start.elapsed().as_millis());

    Ok(())
}

fn check(
    config_path: &Path,
    apis: PathBuf,
    event_map_path: Option<&Path>,
) -> miette::Result<()> {
    let start = Instant::now();
    let (config, event_map) = load_inputs(config_path, event_map_path)?;

    let source = FileSource::new(apis, None);
    let generator = Generator::new(config);

    let spinner = ui::spinner("Checking API listing...");
    let model = generator.compile(&source, &event_map);
    spinner.finish_and_clear();
    let model = model?;

    let async_apis = model.apis.iter().filter(|api| api.is_async).count();
    let note = format!("{} async", async_apis);
    ui::summary_line("APIs", model.apis.len(), Some(&note));
    ui::summary_line("Shared objects", model.shared_objects.len(), None);
    println!();
    print_warnings(&model.warnings);

    if model.warnings.is_empty() {
        ui::looking_good();
    }
    ui::timing("Checked", start.elapsed().as_millis());

    Ok(())
}

fn print_config_box(config: &GeneratorConfig, events: usize) {
    let namespace = if config.namespace.is_empty() {
        "(none)"
    } else {
        config.namespace.as_str()
    };

    ui::box_header("Configuration");
    ui::box_line(&format!("namespace        {}", namespace));
    ui::box_line(&format!("swagger version  {}", config.swagger_version.as_number()));
    ui::box_line(&format!("overloads        {}", config.overloads.len()));
    ui::box_line(&format!("event types      {}", events));
    ui::box_footer();
    println!();
}

fn print_warnings(warnings: &[CompileWarning]) {
    if warnings.is_empty() {
        return;
    }
    ui::info(&format!("{} warning(s)", warnings.len()));
    for warning in warnings {
        ui::warning(&warning.to_string());
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_silences_library_warnings() {
        let quiet = default_filter(false);
        assert!(quiet.contains("cloudstack_gen=error"));
        assert!(EnvFilter::try_new(quiet).is_ok());

        let verbose = default_filter(true);
        assert!(verbose.contains("cloudstack_gen=debug"));
        assert!(EnvFilter::try_new(verbose).is_ok());
    }

    #[test]
    fn test_cli_parses_generate() {
        let cli = Cli::try_parse_from([
            "cloudstack-gen",
            "generate",
            "--config",
            "generator.yml",
            "--apis",
            "apis.json",
            "--capabilities",
            "caps.json",
        ])
        .unwrap();

        assert!(!cli.verbose);
        match cli.command {
            Commands::Generate { output, event_map, .. } => {
                assert_eq!(output, PathBuf::from("generated"));
                assert!(event_map.is_none());
            }
            Commands::Check { .. } => panic!("expected generate"),
        }
    }
}
