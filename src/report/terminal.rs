use std::collections::HashMap;

use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};

use crate::license::classifier::classify;
use crate::models::{LicenseRisk, PackageCuration};

/// Render a colored terminal report for `curations` found among `queried` packages.
pub fn render(curations: &[PackageCuration], queried: usize, quiet: bool) {
    let licensed = curations
        .iter()
        .filter(|c| c.concluded_license.is_some())
        .count();
    let with_source = curations
        .iter()
        .filter(|c| c.vcs.is_some() || c.source_artifact.is_some())
        .count();

    if quiet {
        println!(
            "Queried: {}  Curated: {}  Licensed: {}  Sources: {}",
            queried,
            curations.len().to_string().green(),
            licensed,
            with_source,
        );
        return;
    }

    println!(
        "\n {} v{}\n",
        "curation-checkr".bold(),
        env!("CARGO_PKG_VERSION")
    );

    println!(" ┌────────────────────────────────────────────────────┐");
    println!(" │  {:<48} │", "SUMMARY".bold());
    println!(" │  {:<48} │", format!("Packages queried   : {:>4}", queried));
    println!(
        " │  {:<48} │",
        format!("Curations found    : {:>4}", curations.len())
    );
    println!(" │  {:<48} │", format!("With license       : {:>4}", licensed));
    println!(
        " │  {:<48} │",
        format!("With source        : {:>4}", with_source)
    );
    let risks = summarize_risks(curations);
    if !risks.is_empty() {
        println!(" │  {:<48} │", risks);
    }
    println!(" └────────────────────────────────────────────────────┘\n");

    if curations.is_empty() {
        println!(" {} No curations found.\n", "[INFO]".cyan().bold());
        return;
    }

    render_table(curations);
    println!();
}

fn render_table(curations: &[PackageCuration]) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Package").add_attribute(Attribute::Bold),
            Cell::new("Concluded License").add_attribute(Attribute::Bold),
            Cell::new("Risk").add_attribute(Attribute::Bold),
            Cell::new("Homepage").add_attribute(Attribute::Bold),
            Cell::new("Source").add_attribute(Attribute::Bold),
        ]);

    for curation in curations {
        let (license, risk) = match &curation.concluded_license {
            Some(expr) => (expr.to_string(), Some(classify(expr))),
            None => ("-".to_string(), None),
        };

        let risk_cell = match risk {
            Some(risk) => {
                let color = risk_color(&risk);
                Cell::new(risk.to_string()).fg(color)
            }
            None => Cell::new("-"),
        };

        table.add_row(vec![
            Cell::new(curation.id.to_string()),
            Cell::new(license),
            risk_cell,
            Cell::new(curation.homepage_url.as_deref().unwrap_or("-")),
            Cell::new(describe_source(curation)),
        ]);
    }

    println!("{}", table);
}

/// One-line description of where a curation says the sources are.
fn describe_source(curation: &PackageCuration) -> String {
    if let Some(vcs) = &curation.vcs {
        let mut source = format!(
            "{} {}",
            vcs.vcs_type.map(|t| t.to_string()).unwrap_or_default(),
            vcs.url.as_deref().unwrap_or("?")
        );
        if let Some(revision) = &vcs.revision {
            source.push_str(&format!(" @ {}", revision));
        }
        if let Some(path) = vcs.path.as_deref().filter(|p| !p.is_empty()) {
            source.push_str(&format!(" ({})", path));
        }
        return source.trim().to_string();
    }

    if let Some(artifact) = &curation.source_artifact {
        return artifact.url.clone();
    }

    "-".to_string()
}

fn risk_color(risk: &LicenseRisk) -> Color {
    match risk {
        LicenseRisk::Permissive => Color::Green,
        LicenseRisk::WeakCopyleft => Color::Yellow,
        LicenseRisk::StrongCopyleft => Color::Red,
        LicenseRisk::Proprietary => Color::Magenta,
        LicenseRisk::Unknown => Color::DarkGrey,
    }
}

fn summarize_risks(curations: &[PackageCuration]) -> String {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for expr in curations.iter().filter_map(|c| c.concluded_license.as_ref()) {
        *counts.entry(classify(expr).to_string()).or_insert(0) += 1;
    }

    let mut pairs: Vec<(String, usize)> = counts.into_iter().collect();
    pairs.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    let summary: Vec<String> = pairs
        .iter()
        .take(3)
        .map(|(risk, cnt)| format!("{} ({})", risk, cnt))
        .collect();

    if summary.is_empty() {
        String::new()
    } else {
        format!("[{}]", summary.join(", "))
    }
}
