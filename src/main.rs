use clap::{Parser, Subcommand};
use origine_mini::catalog::{self, ValueKind};
use origine_mini::imaging::FsInspector;
use origine_mini::resolve::{self, Submission};
use origine_mini::store::{FileStore, Namespace};
use origine_mini::theme::Theme;
use origine_mini::{config, output};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "origine-mini")]
#[command(about = "Settings and stylesheet generator for the Origine Mini blog theme")]
#[command(long_about = "\
Settings and stylesheet generator for the Origine Mini blog theme

Settings live in a JSON store, one namespace per theme. Only values that
differ from their default are stored; the stylesheet is regenerated on
every save and kept in the store under the 'styles' id.

A save behaves like submitting the whole admin form: settings not named on
the command line go back to their default.

  origine-mini save global_page_width=35 global_font_family=atkinson
  origine-mini save header_image=/public/banner.jpg footer_enabled=0

Run 'origine-mini catalog' to list every setting with its allowed values,
and 'origine-mini gen-config' to generate a documented origine-mini.toml.")]
#[command(version)]
struct Cli {
    /// Configuration file
    #[arg(long, default_value = config::CONFIG_FILE, global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Validate and store settings, then regenerate the stylesheet
    Save {
        /// Settings as ID=VALUE; checkboxes take 1 or 0
        #[arg(value_parser = parse_assignment)]
        assignments: Vec<(String, String)>,
    },
    /// Remove every stored setting
    Reset,
    /// Print the stored stylesheet
    Styles,
    /// List stored settings
    List,
    /// List every setting with its type, default and choices
    Catalog,
    /// Print a stock origine-mini.toml with all options documented
    GenConfig,
}

fn parse_assignment(arg: &str) -> Result<(String, String), String> {
    let (id, value) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected ID=VALUE, got '{arg}'"))?;
    match catalog::find(id) {
        Some(def) if !def.derived || id == "header_image" => {
            Ok((id.to_string(), value.to_string()))
        }
        Some(_) => Err(format!("'{id}' is computed and cannot be set")),
        None => Err(format!("unknown setting '{id}'")),
    }
}

/// The default form with `assignments` typed in.
fn build_submission(assignments: Vec<(String, String)>) -> Submission {
    let mut submission = resolve::default_form();
    for (id, value) in assignments {
        let is_checkbox = matches!(
            catalog::find(&id).map(|def| &def.kind),
            Some(ValueKind::Boolean { .. })
        );
        if is_checkbox && (value.is_empty() || value == "0") {
            submission.remove(&id);
        } else {
            submission.insert(id, value);
        }
    }
    submission
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match cli.command {
        Command::Catalog => {
            output::print_catalog_output();
            return Ok(());
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
            return Ok(());
        }
        _ => {}
    }

    let config = config::load_config(&cli.config)?;
    log::debug!("using store {}", config.store_path.display());
    let mut store = FileStore::open(&config.store_path)?;

    if let Command::List = cli.command {
        output::print_list_output(store.data().entries(&config.namespace));
        return Ok(());
    }

    let theme = Theme::new(config.blog.clone(), FsInspector::new());
    let mut ns = Namespace::new(&mut store, &config.namespace);

    match cli.command {
        Command::Save { assignments } => {
            let outcome = theme.save(&mut ns, &build_submission(assignments))?;
            output::print_save_output(&outcome);
        }
        Command::Reset => {
            theme.reset(&mut ns)?;
            println!("All settings reset to defaults");
        }
        Command::Styles => match theme.stylesheet(&ns)? {
            Some(css) => println!("{css}"),
            None => println!("No stylesheet (all defaults)"),
        },
        Command::List | Command::Catalog | Command::GenConfig => {}
    }

    Ok(())
}
