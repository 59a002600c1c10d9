//! Loaded inputs and one render pass over them.
//!
//! A [`Session`] owns the dataset, the district boundaries, and the map
//! style. Those are read once; every filter change only re-runs the
//! pipeline, the join, and the renderer against them.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use dog_map_analytics::{FilterError, options::FilterOptions, pipeline};
use dog_map_dataset::{Dataset, DatasetCache, Table, paths};
use dog_map_dog_models::{AgeGroup, DistrictKey, FilterCriteria, MISSING_AGE_GROUP_LABEL};
use dog_map_geography::{DistrictMap, join_markers};
use dog_map_render::{MapStyle, render_choropleth, table, write_geojson};

/// File name of the choropleth written to the output directory.
pub const DEFAULT_OUTPUT_FILE: &str = "dog_map.geojson";

/// Resolves the `--age-groups` flag against the dataset's options.
///
/// `None` selects every group present, an empty string selects none, and
/// otherwise the comma-separated labels are parsed.
///
/// # Errors
///
/// Returns [`FilterError::NotInDomain`] for unrecognized labels.
pub fn age_group_selection(
    options: &FilterOptions,
    flag: Option<&str>,
) -> Result<Vec<Option<AgeGroup>>, FilterError> {
    let Some(list) = flag else {
        return Ok(options.age_groups.clone());
    };
    let labels: Vec<&str> = list
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();
    FilterOptions::parse_age_groups(&labels)
}

/// Where inputs are read from.
#[derive(Debug, Clone)]
pub struct InputPaths {
    /// Registry CSV.
    pub dogs: PathBuf,
    /// District boundaries `GeoJSON`.
    pub districts: PathBuf,
    /// Optional custom map style.
    pub style: Option<PathBuf>,
}

impl InputPaths {
    /// Fills unset paths from [`paths`] defaults and environment overrides.
    #[must_use]
    pub fn resolve(
        dogs: Option<PathBuf>,
        districts: Option<PathBuf>,
        style: Option<PathBuf>,
    ) -> Self {
        Self {
            dogs: dogs.unwrap_or_else(paths::dogs_csv_path),
            districts: districts.unwrap_or_else(paths::districts_geojson_path),
            style,
        }
    }
}

/// Returns the default choropleth path inside the output directory.
#[must_use]
pub fn default_output_path() -> PathBuf {
    paths::output_dir().join(DEFAULT_OUTPUT_FILE)
}

/// Which tables to print after a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TableViews {
    /// Print the full table with source (German) headers.
    pub show_source: bool,
    /// Print the full table with normalized headers.
    pub show_renamed: bool,
    /// Maximum rows printed per table.
    pub limit: Option<usize>,
}

/// One row of the per-run summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryRow {
    /// District label.
    pub district: DistrictKey,
    /// Matching dogs in the district.
    pub count: u64,
    /// Most common breed among them.
    pub top_breed: String,
}

/// Result of one render pass.
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// The selection that produced this run.
    pub criteria: FilterCriteria,
    /// Matching dogs overall.
    pub total: usize,
    /// Per-district counts and top breeds, ordered by district.
    pub districts: Vec<SummaryRow>,
    /// Number of breed markers placed on the map.
    pub markers: usize,
    /// Matching records projected onto the display columns.
    pub filtered: Table,
    /// Where the choropleth was written.
    pub output: PathBuf,
}

/// The shell's long-lived state.
#[derive(Debug)]
pub struct Session {
    dataset: Dataset,
    map: DistrictMap,
    options: FilterOptions,
    style: MapStyle,
}

impl Session {
    /// Builds a session from already loaded inputs.
    #[must_use]
    pub fn new(dataset: Dataset, map: DistrictMap, style: MapStyle) -> Self {
        let options = FilterOptions::from_records(dataset.records());
        Self {
            dataset,
            map,
            options,
            style,
        }
    }

    /// Loads every input named by `inputs`, reading the registry through
    /// `cache`.
    ///
    /// # Errors
    ///
    /// Returns an error if any input is missing or malformed.
    pub fn load(
        inputs: &InputPaths,
        cache: &mut DatasetCache,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let dataset = cache.dataset(&inputs.dogs)?;
        let map = DistrictMap::load(&inputs.districts)?;
        let style = match &inputs.style {
            Some(path) => MapStyle::load(path)?,
            None => MapStyle::default_style(),
        };

        log::info!(
            "Loaded {} dogs and {} districts",
            dataset.records().len(),
            map.len()
        );

        Ok(Self::new(dataset, map, style))
    }

    /// The filter domains of the loaded dataset.
    #[must_use]
    pub const fn options(&self) -> &FilterOptions {
        &self.options
    }

    /// The loaded dataset.
    #[must_use]
    pub const fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Runs filter, aggregation, join, and rendering for `criteria` and
    /// writes the choropleth to `output`.
    ///
    /// # Errors
    ///
    /// Returns an error if the output directory or file cannot be written.
    pub fn run(
        &self,
        criteria: &FilterCriteria,
        output: &Path,
    ) -> Result<RunSummary, Box<dyn std::error::Error>> {
        let result = pipeline::run(self.dataset.records(), criteria);
        let markers = join_markers(&self.map, &result.top_breeds);
        let collection =
            render_choropleth(&self.map, &result.district_counts, &markers, &self.style);

        if let Some(dir) = output.parent().filter(|d| !d.as_os_str().is_empty()) {
            paths::ensure_dir(dir)?;
        }
        write_geojson(&collection, output)?;

        let top: BTreeMap<&DistrictKey, &str> = result
            .top_breeds
            .iter()
            .map(|t| (&t.district, t.breed.as_str()))
            .collect();
        let districts = result
            .district_counts
            .iter()
            .map(|c| SummaryRow {
                district: c.district.clone(),
                count: c.count,
                top_breed: top
                    .get(&c.district)
                    .map_or_else(String::new, |b| (*b).to_string()),
            })
            .collect();

        Ok(RunSummary {
            criteria: criteria.clone(),
            total: result.total(),
            districts,
            markers: markers.len(),
            filtered: table::filtered_table(&result.filtered),
            output: output.to_path_buf(),
        })
    }

    /// Prints the filtered table and whichever full tables `views` asks
    /// for.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if writing to `out` fails.
    pub fn write_tables<W: Write>(
        &self,
        summary: &RunSummary,
        views: TableViews,
        out: &mut W,
    ) -> std::io::Result<()> {
        writeln!(out)?;
        writeln!(out, "Filtered dogs:")?;
        table::write_text(&summary.filtered, out, views.limit)?;

        if views.show_source {
            writeln!(out)?;
            writeln!(out, "Full table (source labels):")?;
            table::write_text(self.dataset.source(), out, views.limit)?;
        }
        if views.show_renamed {
            writeln!(out)?;
            writeln!(out, "Full table (normalized labels):")?;
            table::write_text(self.dataset.renamed(), out, views.limit)?;
        }
        Ok(())
    }
}

/// Writes the short per-run summary.
///
/// # Errors
///
/// Returns an I/O error if writing to `out` fails.
pub fn write_summary<W: Write>(summary: &RunSummary, out: &mut W) -> std::io::Result<()> {
    let chosen = &summary.criteria.age_groups;
    let mut groups: Vec<String> = chosen.iter().flatten().map(ToString::to_string).collect();
    if chosen.contains(&None) {
        groups.push(MISSING_AGE_GROUP_LABEL.to_string());
    }
    writeln!(
        out,
        "Breed: {} | Gender: {} | Age groups: {}",
        summary.criteria.breed,
        summary.criteria.gender,
        if groups.is_empty() {
            "(none)".to_string()
        } else {
            groups.join(", ")
        }
    )?;
    writeln!(
        out,
        "{} matching dogs in {} districts",
        summary.total,
        summary.districts.len()
    )?;

    if !summary.districts.is_empty() {
        writeln!(out, "{:<12} {:>6}  TOP BREED", "DISTRICT", "DOGS")?;
        for row in &summary.districts {
            writeln!(
                out,
                "{:<12} {:>6}  {}",
                row.district.as_str(),
                row.count,
                row.top_breed
            )?;
        }
    }

    writeln!(
        out,
        "Map written to {} ({} markers)",
        summary.output.display(),
        summary.markers
    )
}
