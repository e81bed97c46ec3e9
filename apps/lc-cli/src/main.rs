use clap::{Args, Parser, Subcommand, ValueEnum};
use lc_catalog::{CatalogError, PresetCatalog};
use lc_core::{CoreError, Field, FieldValue, FitClass, JointKind};
use lc_panel::{EventLog, PanelConfig, PanelError, ParameterPanel};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser)]
#[command(name = "lc-cli")]
#[command(about = "Laser-cut parameter presets and export settings", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the selectable presets of a catalog
    Presets {
        /// Catalog file (.yaml, .yml, .json or .csv)
        catalog: PathBuf,
    },
    /// Load and validate a catalog
    Validate {
        /// Catalog file (.yaml, .yml, .json or .csv)
        catalog: PathBuf,
    },
    /// Resolve the parameters handed to the SVG exporter
    Params(ParamsArgs),
    /// Convert a preset sheet exported as CSV to YAML or JSON
    ImportCsv {
        /// Preset sheet
        csv: PathBuf,
        /// Output catalog (.yaml, .yml or .json)
        output: PathBuf,
    },
    /// Print the fit adjustment of one joint in a preset
    Fit {
        /// Catalog file
        catalog: PathBuf,
        /// Preset name
        preset: String,
        /// Joint kind (box, tab, slot)
        joint: String,
        /// Fit class (clearance, friction, press)
        fit: String,
    },
}

#[derive(Args)]
struct ParamsArgs {
    /// Catalog to load; its first preset is applied unless --preset is given
    #[arg(long)]
    catalog: Option<PathBuf>,
    /// Panel config (YAML)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Preset to select; other options, if given, override it
    #[arg(long)]
    preset: Option<String>,
    /// Material thickness (mm)
    #[arg(long, allow_negative_numbers = true)]
    thickness: Option<f64>,
    /// Material width (mm)
    #[arg(long, allow_negative_numbers = true)]
    width: Option<f64>,
    /// Material height (mm)
    #[arg(long, allow_negative_numbers = true)]
    height: Option<f64>,
    /// Cut width (mm)
    #[arg(long, allow_negative_numbers = true)]
    kerf: Option<f64>,
    /// Clearance fit adjustment for box joints (mm)
    #[arg(long = "boxC", allow_negative_numbers = true)]
    box_c: Option<f64>,
    /// Friction fit adjustment for box joints (mm)
    #[arg(long = "boxL", allow_negative_numbers = true)]
    box_l: Option<f64>,
    /// Press fit adjustment for box joints (mm)
    #[arg(long = "boxI", allow_negative_numbers = true)]
    box_i: Option<f64>,
    /// Clearance fit adjustment for tab-and-slot joints (mm)
    #[arg(long = "tabC", allow_negative_numbers = true)]
    tab_c: Option<f64>,
    /// Friction fit adjustment for tab-and-slot joints (mm)
    #[arg(long = "tabL", allow_negative_numbers = true)]
    tab_l: Option<f64>,
    /// Press fit adjustment for tab-and-slot joints (mm)
    #[arg(long = "tabI", allow_negative_numbers = true)]
    tab_i: Option<f64>,
    /// Clearance fit adjustment for slotted joints (mm)
    #[arg(long = "slotC", allow_negative_numbers = true)]
    slot_c: Option<f64>,
    /// Friction fit adjustment for slotted joints (mm)
    #[arg(long = "slotL", allow_negative_numbers = true)]
    slot_l: Option<f64>,
    /// Press fit adjustment for slotted joints (mm)
    #[arg(long = "slotI", allow_negative_numbers = true)]
    slot_i: Option<f64>,
    /// Style appended to the output svg
    #[arg(long)]
    style: Option<String>,
    /// Free-form notes
    #[arg(long)]
    notes: Option<String>,
    /// Scale factor
    #[arg(long, allow_negative_numbers = true)]
    scale: Option<f64>,
    /// Extra overrides as field=value (e.g. sheetWidth=600, tab.inset=NA)
    #[arg(long = "set", value_name = "FIELD=VALUE")]
    set: Vec<String>,
    /// Output layout
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Full snapshot as JSON
    Json,
    /// Full snapshot as YAML
    Yaml,
    /// Flat exporter record as JSON
    Laser,
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Panel(#[from] PanelError),

    #[error(transparent)]
    Field(#[from] CoreError),

    #[error("Preset not found: {0}")]
    PresetNotFound(String),

    #[error("Invalid override '{0}', expected FIELD=VALUE")]
    Override(String),

    #[error("Output error: {0}")]
    Output(String),
}

type CliResult<T> = Result<T, CliError>;

fn main() -> CliResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Presets { catalog } => cmd_presets(&catalog),
        Commands::Validate { catalog } => cmd_validate(&catalog),
        Commands::Params(args) => cmd_params(args),
        Commands::ImportCsv { csv, output } => cmd_import_csv(&csv, &output),
        Commands::Fit {
            catalog,
            preset,
            joint,
            fit,
        } => cmd_fit(&catalog, &preset, &joint, &fit),
    }
}

fn cmd_presets(path: &Path) -> CliResult<()> {
    let catalog = lc_catalog::load(path)?;
    println!("Presets in {}:", path.display());
    for choice in lc_panel::build_choices(&catalog) {
        match catalog.get(&choice) {
            Some(preset) if !preset.values().notes.is_empty() => {
                println!("  {} - {}", choice, preset.values().notes)
            }
            _ => println!("  {}", choice),
        }
    }
    Ok(())
}

fn cmd_validate(path: &Path) -> CliResult<()> {
    println!("Validating catalog: {}", path.display());
    let catalog = if matches!(
        lc_catalog::CatalogFormat::from_path(path)?,
        lc_catalog::CatalogFormat::Csv
    ) {
        let import = lc_catalog::load_csv(path)?;
        print_skipped(&import.skipped);
        import.catalog
    } else {
        lc_catalog::load(path)?
    };
    println!("✓ Catalog is valid ({} presets)", catalog.len());
    Ok(())
}

fn cmd_params(args: ParamsArgs) -> CliResult<()> {
    let config = match &args.config {
        Some(path) => PanelConfig::load(path)?,
        None => PanelConfig::default(),
    };
    let mut panel = ParameterPanel::with_config(config, EventLog::new());

    if let Some(path) = &args.catalog {
        panel.on_catalog_replaced(lc_catalog::load(path)?);
    }
    if let Some(name) = &args.preset {
        info!(preset = %name, "selecting preset");
        panel.select_preset(name)?;
    }
    for (field, value) in overrides(&args)? {
        info!(%field, %value, "override");
        panel.edit_field(field, value)?;
    }

    let snapshot = panel.snapshot();
    let output = match args.format {
        OutputFormat::Json => serde_json::to_string_pretty(&snapshot)
            .map_err(|e| CliError::Output(e.to_string()))?,
        OutputFormat::Yaml => {
            serde_yaml::to_string(&snapshot).map_err(|e| CliError::Output(e.to_string()))?
        }
        OutputFormat::Laser => serde_json::to_string_pretty(&snapshot.laser_params())
            .map_err(|e| CliError::Output(e.to_string()))?,
    };
    println!("{}", output.trim_end());
    Ok(())
}

/// Collect overrides in a fixed order: named options first, then `--set`.
fn overrides(args: &ParamsArgs) -> CliResult<Vec<(Field, FieldValue)>> {
    let numeric = [
        ("scale", args.scale),
        ("thickness", args.thickness),
        ("width", args.width),
        ("height", args.height),
        ("kerf", args.kerf),
        ("boxC", args.box_c),
        ("boxL", args.box_l),
        ("boxI", args.box_i),
        ("tabC", args.tab_c),
        ("tabL", args.tab_l),
        ("tabI", args.tab_i),
        ("slotC", args.slot_c),
        ("slotL", args.slot_l),
        ("slotI", args.slot_i),
    ];

    let mut out = Vec::new();
    for (name, value) in numeric {
        if let Some(x) = value {
            out.push((name.parse::<Field>()?, FieldValue::Number(x)));
        }
    }
    if let Some(style) = &args.style {
        out.push((Field::Style, FieldValue::Text(style.clone())));
    }
    if let Some(notes) = &args.notes {
        out.push((Field::Notes, FieldValue::Text(notes.clone())));
    }
    for item in &args.set {
        let (name, raw) = item
            .split_once('=')
            .ok_or_else(|| CliError::Override(item.clone()))?;
        let field: Field = name.parse()?;
        out.push((field, FieldValue::parse(field, raw)?));
    }
    Ok(out)
}

fn cmd_import_csv(csv: &Path, output: &Path) -> CliResult<()> {
    let import = lc_catalog::load_csv(csv)?;
    print_skipped(&import.skipped);
    lc_catalog::save(output, &import.catalog)?;
    println!(
        "✓ Wrote {} presets to {}",
        import.catalog.len(),
        output.display()
    );
    Ok(())
}

fn print_skipped(rows: &[lc_catalog::SkippedRow]) {
    for row in rows {
        println!(
            "  ! line {}: skipped {} ({})",
            row.line,
            row.name.as_deref().unwrap_or("<unnamed>"),
            row.reason
        );
    }
}

fn cmd_fit(path: &Path, preset: &str, joint: &str, fit: &str) -> CliResult<()> {
    let catalog: PresetCatalog = lc_catalog::load(path)?;
    let preset = catalog
        .get(preset)
        .ok_or_else(|| CliError::PresetNotFound(preset.to_string()))?;
    let joint: JointKind = joint.parse()?;
    let fit: FitClass = fit.parse()?;
    println!("{}", preset.values().fit(joint, fit));
    Ok(())
}
