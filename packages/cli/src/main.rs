#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Command-line dashboard for the Zurich dog registry.
//!
//! `dog_map render` runs one filter selection end to end and writes a
//! choropleth `GeoJSON`, `dog_map options` lists the selectable values, and
//! running without a subcommand opens an interactive menu that re-renders
//! the map after every change.

mod interactive;
mod session;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use dog_map_analytics::options::FilterOptions;
use dog_map_dataset::DatasetCache;
use dog_map_dog_models::ALL_BREEDS_LABEL;
use dog_map_render::table;

use crate::session::{
    InputPaths, Session, TableViews, age_group_selection, default_output_path, write_summary,
};

#[derive(Parser)]
#[command(name = "dog_map", about = "Dog registry map of Zurich districts")]
struct Cli {
    #[command(flatten)]
    inputs: InputArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args)]
struct InputArgs {
    /// Registry CSV (defaults to `DOG_MAP_DOGS_CSV` or `data/dog.csv`)
    #[arg(long, global = true)]
    dogs: Option<PathBuf>,
    /// District boundaries `GeoJSON` (defaults to `DOG_MAP_DISTRICTS_GEOJSON`)
    #[arg(long, global = true)]
    districts: Option<PathBuf>,
    /// Custom map style TOML file
    #[arg(long, global = true)]
    style: Option<PathBuf>,
    /// Field delimiter of the registry CSV
    #[arg(long, global = true, default_value_t = ',')]
    delimiter: char,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the map for one filter selection
    Render {
        /// Primary breed, or "All"
        #[arg(long, default_value = ALL_BREEDS_LABEL)]
        breed: String,
        /// Owner gender (defaults to the first gender in the registry)
        #[arg(long)]
        gender: Option<String>,
        /// Comma-separated age groups (e.g. "teenager,adult,missing").
        /// Omit for every group; pass "" to select none.
        #[arg(long)]
        age_groups: Option<String>,
        /// Output `GeoJSON` path (defaults to `<output dir>/dog_map.geojson`)
        #[arg(long)]
        output: Option<PathBuf>,
        /// Also write the filtered table as CSV to this path
        #[arg(long)]
        table_csv: Option<PathBuf>,
        /// Print the full table with source (German) headers
        #[arg(long)]
        show_source: bool,
        /// Print the full table with normalized headers
        #[arg(long)]
        show_renamed: bool,
        /// Maximum rows printed per table
        #[arg(long)]
        limit: Option<usize>,
    },
    /// List the selectable breeds, genders, and age groups
    Options,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    let delimiter = cli.inputs.delimiter;
    if !delimiter.is_ascii() {
        return Err(format!("Delimiter '{delimiter}' must be an ASCII character").into());
    }
    let inputs = InputPaths::resolve(cli.inputs.dogs, cli.inputs.districts, cli.inputs.style);
    let mut cache = DatasetCache::new().with_delimiter(u8::try_from(delimiter)?);

    let Some(command) = cli.command else {
        return interactive::run(&inputs, &mut cache);
    };

    match command {
        Commands::Options => {
            let dataset = cache.dataset(&inputs.dogs)?;
            print_options(&FilterOptions::from_records(dataset.records()));
        }
        Commands::Render {
            breed,
            gender,
            age_groups,
            output,
            table_csv,
            show_source,
            show_renamed,
            limit,
        } => {
            let session = Session::load(&inputs, &mut cache)?;
            let options = session.options();

            let gender = match gender {
                Some(gender) => gender,
                None => options.default_criteria()?.gender,
            };
            let age_groups = age_group_selection(options, age_groups.as_deref())?;
            let criteria = options.criteria(&breed, &gender, &age_groups)?;

            let output = output.unwrap_or_else(default_output_path);
            let summary = session.run(&criteria, &output)?;

            let mut stdout = std::io::stdout().lock();
            write_summary(&summary, &mut stdout)?;
            session.write_tables(
                &summary,
                TableViews {
                    show_source,
                    show_renamed,
                    limit,
                },
                &mut stdout,
            )?;

            if let Some(path) = table_csv {
                table::save_csv(&summary.filtered, &path)?;
            }
        }
    }

    Ok(())
}

fn print_options(options: &FilterOptions) {
    println!("Breeds ({}):", options.breeds.len() + 1);
    for breed in options.breed_labels() {
        println!("  {breed}");
    }
    println!("Genders ({}):", options.genders.len());
    for gender in &options.genders {
        println!("  {gender}");
    }
    println!("Age groups ({}):", options.age_groups.len());
    for group in options.age_group_labels() {
        println!("  {group}");
    }
}
