//! Interactive menu for the dog map.
//!
//! Loads the registry and the district boundaries once, then keeps asking
//! for a breed, a gender, age groups, and table toggles. Every answer set
//! re-renders the map into the output directory.

use dialoguer::{Confirm, Input, MultiSelect, Select};
use dog_map_dataset::DatasetCache;

use crate::session::{InputPaths, Session, TableViews, default_output_path, write_summary};

/// Runs the interactive loop until the user declines to continue.
///
/// # Errors
///
/// Returns an error if an input cannot be loaded, a prompt fails, or the
/// map cannot be written.
pub fn run(
    inputs: &InputPaths,
    cache: &mut DatasetCache,
) -> Result<(), Box<dyn std::error::Error>> {
    let session = Session::load(inputs, cache)?;
    let options = session.options();
    let output = default_output_path();

    let breeds = options.breed_labels();
    let age_labels = options.age_group_labels();

    println!("Dog Map of Zurich");
    println!("{} dogs registered", session.dataset().records().len());
    println!();

    let mut breed_idx = 0;
    let mut gender_idx = 0;
    let mut age_checked = vec![true; age_labels.len()];
    let mut views = TableViews::default();

    loop {
        breed_idx = Select::new()
            .with_prompt("Breed")
            .items(&breeds)
            .default(breed_idx)
            .max_length(15)
            .interact()?;

        gender_idx = Select::new()
            .with_prompt("Owner gender")
            .items(&options.genders)
            .default(gender_idx)
            .interact()?;

        let picked = MultiSelect::new()
            .with_prompt("Owner age groups (space to toggle)")
            .items(&age_labels)
            .defaults(&age_checked)
            .interact()?;
        age_checked = (0..age_labels.len()).map(|i| picked.contains(&i)).collect();

        views.show_source = Confirm::new()
            .with_prompt("Show full table with source labels?")
            .default(views.show_source)
            .interact()?;
        views.show_renamed = Confirm::new()
            .with_prompt("Show full table with normalized labels?")
            .default(views.show_renamed)
            .interact()?;
        if views.show_source || views.show_renamed {
            let limit: String = Input::new()
                .with_prompt("Rows per table (leave empty for all)")
                .allow_empty(true)
                .interact_text()?;
            views.limit = if limit.trim().is_empty() {
                None
            } else {
                Some(
                    limit
                        .trim()
                        .parse()
                        .map_err(|e| format!("Invalid row limit '{limit}': {e}"))?,
                )
            };
        }

        let groups: Vec<_> = picked.iter().map(|&i| options.age_groups[i]).collect();
        let criteria = options.criteria(&breeds[breed_idx], &options.genders[gender_idx], &groups)?;

        let summary = session.run(&criteria, &output)?;

        println!();
        let mut stdout = std::io::stdout().lock();
        write_summary(&summary, &mut stdout)?;
        session.write_tables(&summary, views, &mut stdout)?;
        drop(stdout);
        println!();

        let again = Confirm::new()
            .with_prompt("Change the selection?")
            .default(true)
            .interact()?;
        if !again {
            break;
        }
    }

    Ok(())
}
