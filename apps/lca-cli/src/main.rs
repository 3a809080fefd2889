use clap::{Parser, Subcommand, ValueEnum};
use lca_form::{
    CategorySchema, DocFormat, FieldValues, FormError, StepOutcome, Validation, WizardSession,
    humanize_field_id, load_schema, load_schema_or_default, load_values, validate_category,
};
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error(transparent)]
    Form(#[from] FormError),

    #[error("{missing} required field(s) missing in category '{category}'")]
    Incomplete { category: String, missing: usize },

    #[error("Submission ended without a result: {outcome}")]
    UnexpectedOutcome { outcome: String },
}

type CliResult<T> = Result<T, CliError>;

#[derive(Parser)]
#[command(name = "lca-cli")]
#[command(
    about = "Mine LCA - required-field checks for the mine data input wizard",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List wizard categories and their required fields
    Categories {
        /// Category table (YAML or JSON); defaults to the built-in India table
        #[arg(long)]
        schema: Option<PathBuf>,
    },
    /// Check one category of a values document
    Validate {
        /// Path to the values YAML/JSON file
        values_path: PathBuf,
        /// Category to check
        #[arg(short, long)]
        category: String,
        #[arg(long)]
        schema: Option<PathBuf>,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Submit a values document through every category in order
    Walk {
        /// Path to the values YAML/JSON file
        values_path: PathBuf,
        #[arg(long)]
        schema: Option<PathBuf>,
        /// Print the outcome as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print a blank values document for every schema field
    Template {
        #[arg(long)]
        schema: Option<PathBuf>,
        #[arg(long, value_enum, default_value_t = Format::Yaml)]
        format: Format,
    },
    /// Load a category table and check its structure
    CheckSchema {
        /// Path to the schema YAML/JSON file
        schema_path: PathBuf,
    },
    /// Show the display label for a field identifier
    Label {
        /// Field identifier, e.g. fuelOilConsumption
        field_id: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Yaml,
    Json,
}

impl From<Format> for DocFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Yaml => DocFormat::Yaml,
            Format::Json => DocFormat::Json,
        }
    }
}

#[derive(Serialize)]
struct ValidateReport<'a> {
    category: &'a str,
    is_valid: bool,
    #[serde(flatten)]
    validation: &'a Validation,
}

fn main() -> CliResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Categories { schema } => cmd_categories(schema.as_deref()),
        Commands::Validate {
            values_path,
            category,
            schema,
            json,
        } => cmd_validate(&values_path, &category, schema.as_deref(), json),
        Commands::Walk {
            values_path,
            schema,
            json,
        } => cmd_walk(&values_path, schema.as_deref(), json),
        Commands::Template { schema, format } => cmd_template(schema.as_deref(), format),
        Commands::CheckSchema { schema_path } => cmd_check_schema(&schema_path),
        Commands::Label { field_id } => {
            println!("{}", humanize_field_id(&field_id));
            Ok(())
        }
    }
}

fn cmd_categories(schema_path: Option<&Path>) -> CliResult<()> {
    let schema = load_schema_or_default(schema_path)?;
    print_categories(&schema);
    Ok(())
}

fn print_categories(schema: &CategorySchema) {
    for (i, category) in schema.categories.iter().enumerate() {
        println!(
            "  {:>2}. {} - {} ({} required)",
            i + 1,
            category.id,
            category.title,
            category.required.len()
        );
        for field in &category.required {
            println!("        {} ({})", field, humanize_field_id(field));
        }
    }
}

fn cmd_validate(
    values_path: &Path,
    category: &str,
    schema_path: Option<&Path>,
    json: bool,
) -> CliResult<()> {
    let schema = load_schema_or_default(schema_path)?;
    if schema.category(category).is_none() {
        tracing::warn!(category, "unknown category, nothing is required");
    }
    let values = load_values(values_path, &schema)?;
    let validation = validate_category(&schema, category, &values);

    if json {
        let report = ValidateReport {
            category,
            is_valid: validation.is_valid(),
            validation: &validation,
        };
        println!("{}", lca_form::to_string(&report, DocFormat::Json)?);
    } else if validation.is_valid() {
        println!("✓ Category '{}' is complete", category);
    } else {
        println!("✗ Category '{}' is incomplete:", category);
        for (field, message) in validation.errors.iter() {
            println!("  {}: {}", field, message);
        }
    }

    if validation.is_valid() {
        Ok(())
    } else {
        Err(CliError::Incomplete {
            category: category.to_string(),
            missing: validation.errors.len(),
        })
    }
}

fn cmd_walk(values_path: &Path, schema_path: Option<&Path>, json: bool) -> CliResult<()> {
    let schema = load_schema_or_default(schema_path)?;
    let values = load_values(values_path, &schema)?;
    let mut wizard = WizardSession::with_values(schema, values);
    let outcome = wizard.submit();

    if json {
        println!("{}", lca_form::to_string(&outcome, DocFormat::Json)?);
    }

    match outcome {
        StepOutcome::Blocked(rejection) => {
            if !json {
                let (step, total) = wizard.progress();
                println!(
                    "✗ Stopped at step {}/{}: {}",
                    step, total, rejection.category
                );
                println!(
                    "  {}: {}",
                    rejection.notification.title, rejection.notification.description
                );
                for (field, message) in rejection.errors.iter() {
                    let marker = if field == rejection.focus { ">" } else { " " };
                    println!("  {} {}: {}", marker, field, message);
                }
            }
            Err(CliError::Incomplete {
                category: rejection.category,
                missing: rejection.errors.len(),
            })
        }
        StepOutcome::Submitted { values } => {
            if !json {
                println!(
                    "✓ All {} categories complete ({} values)",
                    wizard.schema().len(),
                    values.len()
                );
            }
            Ok(())
        }
        other => Err(CliError::UnexpectedOutcome {
            outcome: format!("{other:?}"),
        }),
    }
}

fn cmd_template(schema_path: Option<&Path>, format: Format) -> CliResult<()> {
    let schema = load_schema_or_default(schema_path)?;
    let values = FieldValues::blank_for(&schema);
    print!("{}", lca_form::to_string(&values, format.into())?);
    if matches!(format, Format::Json) {
        println!();
    }
    Ok(())
}

fn cmd_check_schema(schema_path: &Path) -> CliResult<()> {
    println!("Checking schema: {}", schema_path.display());
    let schema = load_schema(schema_path)?;
    println!(
        "✓ Schema is valid ({} categories, {} fields)",
        schema.len(),
        schema.all_fields().len()
    );
    print_categories(&schema);
    Ok(())
}
