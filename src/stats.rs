use crate::precompute::{format_template, parse_template, Precomputation};
use crate::utils::format_size;
use anyhow::{Context, Result};
use std::path::Path;

/// Templates listed in the stats report
const TOP_TEMPLATES: usize = 15;

/// Records printed by a lookup before eliding the rest
const MAX_LOOKUP_RECORDS: usize = 50;

/// Display collocation index statistics
pub fn show_stats(path: &Path) -> Result<()> {
    let precomputation = Precomputation::read_from_file(path)
        .with_context(|| format!("failed to load collocation index {}", path.display()))?;
    let index = precomputation.collocations();
    let stats = index.stats();

    println!("Collocation Index Statistics");
    println!("============================");
    println!();
    println!("Index file:       {}", path.display());
    if let Ok(meta) = std::fs::metadata(path) {
        println!("File size:        {}", format_size(meta.len()));
    }
    println!("Templates:        {}", stats.entries);
    println!("  binary:         {}", stats.binary_templates);
    println!("  ternary:        {}", stats.ternary_templates);
    println!("Occurrences:      {}", stats.occurrences);
    println!("Largest entry:    {}", stats.largest_entry);

    if stats.entries == 0 {
        return Ok(());
    }

    println!();
    println!("Most frequent templates:");
    for (template, count) in index.top_templates(TOP_TEMPLATES) {
        println!("  {:30} {}", format_template(template), count);
    }

    if stats.entries > TOP_TEMPLATES {
        println!("  ... and {} more", stats.entries - TOP_TEMPLATES);
    }

    Ok(())
}

/// Print the occurrence records of one template
pub fn show_lookup(path: &Path, template: &str) -> Result<()> {
    let template = parse_template(template)?;
    let precomputation = Precomputation::read_from_file(path)
        .with_context(|| format!("failed to load collocation index {}", path.display()))?;

    let Some(occurrences) = precomputation.collocations().get(&template) else {
        println!("No occurrences of {}", format_template(&template));
        return Ok(());
    };

    println!("{}: {} occurrences", format_template(&template), occurrences.len());
    for occurrence in occurrences.iter().take(MAX_LOOKUP_RECORDS) {
        let starts: Vec<String> = occurrence.starts().iter().map(|s| s.to_string()).collect();
        println!("  ({})", starts.join(", "));
    }

    if occurrences.len() > MAX_LOOKUP_RECORDS {
        println!("  ... and {} more", occurrences.len() - MAX_LOOKUP_RECORDS);
    }

    Ok(())
}
