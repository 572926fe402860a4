use crate::output::{print_json, print_table};
use activities_core::Listing;
use anyhow::Result;
use std::path::Path;

pub fn run(seed: Option<&Path>, json: bool) -> Result<()> {
    let listing = super::load_directory(seed)?.list();
    if json {
        return print_json(&listing);
    }
    print_table(&["NAME", "SCHEDULE", "ENROLLED", "SPOTS LEFT"], &rows(&listing));
    Ok(())
}

fn rows(listing: &Listing) -> Vec<Vec<String>> {
    listing
        .iter()
        .map(|(name, a)| {
            vec![
                name.to_string(),
                a.schedule.clone(),
                format!("{}/{}", a.participants.len(), a.max_participants),
                a.spots_left().to_string(),
            ]
        })
        .collect()
}
