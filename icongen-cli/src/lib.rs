//! icongen CLI: parse an icon source and render generated code through a
//! template.
//!
//! The pipeline is strictly batch: one source file in, one rendered output
//! out, plus a sidecar JSON manifest when the output is a file. Rendering
//! failures are fatal and leave nothing on disk; write failures after a
//! successful render are reported and the run still finishes.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueHint};

use icongen_core::context;
use icongen_core::error::Error;
use icongen_core::filters::EscapeStyle;
use icongen_core::manifest::{manifest_path, Manifest};
use icongen_core::output::{OutputDestination, WriteOutcome};
use icongen_core::parser;

const TEMPLATE_PREFIX: &str = "icons";
const TEMPLATE_EXTENSION: &str = "hbs";

/// CLI entrypoint for icongen.
#[derive(Debug, Parser)]
#[command(
    name = "icongen",
    about = "Generate source code from icon-font glyph metadata"
)]
pub struct Cli {
    /// Icons.ttf|otf|json file to parse
    #[arg(value_name = "FILE", value_hint = ValueHint::FilePath)]
    file: PathBuf,

    /// Name of the template to use (without the "icons-" prefix nor extension)
    #[arg(short = 't', long = "template", default_value = "default")]
    template: String,

    /// Path of the template to use. Overrides --template
    #[arg(short = 'p', long = "template-path", value_hint = ValueHint::FilePath)]
    template_path: Option<PathBuf>,

    /// Path of the file to generate (omit to print to stdout)
    #[arg(short = 'o', long = "output", value_hint = ValueHint::FilePath)]
    output: Option<PathBuf>,

    /// Name of the enum to generate
    #[arg(short = 'e', long = "enum-name", default_value = "Icon")]
    enum_name: String,
}

/// Directories searched for named templates, in priority order.
///
/// Kept explicit rather than as process globals so the lookup is testable
/// against temporary directories.
#[derive(Debug, Clone)]
pub struct TemplateLocations {
    roots: Vec<PathBuf>,
}

impl TemplateLocations {
    pub fn new<I, P>(roots: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        TemplateLocations {
            roots: roots.into_iter().map(Into::into).collect(),
        }
    }

    /// Build the search list: the `ICONGEN_TEMPLATES` override wins
    /// outright, otherwise the user template directory is tried before the
    /// templates shipped next to the executable.
    pub fn discover() -> Self {
        if let Ok(raw) = env::var("ICONGEN_TEMPLATES") {
            let roots: Vec<PathBuf> = raw
                .split([':', ';'])
                .filter(|s| !s.is_empty())
                .map(PathBuf::from)
                .collect();

            if !roots.is_empty() {
                return TemplateLocations { roots };
            }
        }

        let mut roots = Vec::new();

        if let Some(dir) = app_support_dir() {
            roots.push(dir.join("icongen").join("templates"));
        }

        if let Ok(exe) = env::current_exe() {
            if let Some(parent) = exe.parent() {
                roots.push(parent.join("../templates"));
            }
        }

        TemplateLocations { roots }
    }
}

fn app_support_dir() -> Option<PathBuf> {
    #[cfg(target_os = "macos")]
    {
        env::var_os("HOME").map(|home| PathBuf::from(home).join("Library/Application Support"))
    }

    #[cfg(not(target_os = "macos"))]
    {
        env::var_os("XDG_DATA_HOME")
            .map(PathBuf::from)
            .or_else(|| env::var_os("HOME").map(|home| PathBuf::from(home).join(".local/share")))
    }
}

/// Resolve the template to read: an explicit path wins, otherwise the named
/// template is looked up root by root.
fn find_template(
    locations: &TemplateLocations,
    prefix: &str,
    short_name: &str,
    full_path: Option<&Path>,
) -> Result<PathBuf> {
    if let Some(path) = full_path {
        if path.is_file() {
            return Ok(path.to_path_buf());
        }
        return Err(Error::TemplateNotFound {
            name: path.display().to_string(),
        }
        .into());
    }

    let file_name = format!("{prefix}-{short_name}.{TEMPLATE_EXTENSION}");
    for root in &locations.roots {
        let candidate = root.join(&file_name);
        if candidate.is_file() {
            return Ok(candidate);
        }
    }

    Err(Error::TemplateNotFound {
        name: short_name.to_string(),
    }
    .into())
}

/// Parse CLI args and run the pipeline.
pub fn run() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    run_generate(&cli, &TemplateLocations::discover())
}

fn run_generate(cli: &Cli, locations: &TemplateLocations) -> Result<()> {
    let set = parser::parse(&cli.file)?;

    let template_file = find_template(
        locations,
        TEMPLATE_PREFIX,
        &cli.template,
        cli.template_path.as_deref(),
    )?;
    let template_source = fs::read_to_string(&template_file)
        .with_context(|| format!("reading template {}", template_file.display()))?;

    let rendered = context::render(&template_source, &set, &cli.enum_name, EscapeStyle::default())?;

    let destination = match &cli.output {
        Some(path) => OutputDestination::File(path.clone()),
        None => OutputDestination::Console,
    };

    match destination.write(&rendered, true) {
        Ok(WriteOutcome::Written) => {
            if let OutputDestination::File(path) = &destination {
                println!("File written: {}", path.display());
            }
        }
        Ok(WriteOutcome::Unchanged) => {
            println!("Not writing the file as content is unchanged");
        }
        Err(err) => log::error!("{err}"),
    }

    // Console runs produce no manifest; file runs always write one, with no
    // change detection.
    if let OutputDestination::File(path) = &destination {
        write_manifest(&cli.file, &set, path);
    }

    Ok(())
}

fn write_manifest(source: &Path, set: &parser::IconSet, output: &Path) {
    let manifest = Manifest::from_icon_set(source, set);
    let sidecar = manifest_path(output);

    match manifest.to_json_pretty() {
        Ok(json) => match OutputDestination::File(sidecar.clone()).write(&json, false) {
            Ok(_) => println!("File written: {}", sidecar.display()),
            Err(err) => log::error!("{err}"),
        },
        Err(err) => log::error!("serializing manifest for {}: {err}", source.display()),
    }
}
