use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::catalog::{self, Catalog};
use crate::error::{CrewbookError, Result};
use crate::settings::{load_settings, shellexpand_path};

fn load_catalog() -> Result<Catalog> {
    let settings = load_settings();
    let dir = settings
        .catalog_dir
        .as_deref()
        .map(|d| std::path::PathBuf::from(shellexpand_path(d)));
    Catalog::load(dir.as_deref())
}

pub fn format_themes(catalog: &Catalog) -> String {
    let mut table = Table::new();
    table.set_header(vec!["ID", "Title", "Images", "Description"]);
    for t in &catalog.themes {
        table.add_row(vec![
            Cell::new(t.id),
            Cell::new(&t.title),
            Cell::new(t.images.len()),
            Cell::new(&t.description),
        ]);
    }
    format!("{}\n{table}", "Themes".bold())
}

pub fn format_models(catalog: &Catalog) -> String {
    let mut table = Table::new();
    table.set_header(vec!["ID", "Name", "Height"]);
    for m in &catalog.models {
        table.add_row(vec![Cell::new(&m.id), Cell::new(&m.name), Cell::new(&m.height)]);
    }
    format!("{}\n{table}", "Models".bold())
}

pub fn format_packages() -> String {
    let mut table = Table::new();
    table.set_header(vec!["ID", "Package", "Includes"]);
    for p in catalog::PACKAGES {
        let includes = catalog::package_details(p.id)
            .map(|d| d.description)
            .unwrap_or_default();
        table.add_row(vec![Cell::new(p.id), Cell::new(p.title), Cell::new(includes)]);
    }
    format!("{}\n{table}", "Packages".bold())
}

pub fn format_locations(state: Option<&str>) -> Result<String> {
    match state {
        Some(id) => {
            let entry = catalog::location(&id.to_uppercase())
                .ok_or_else(|| CrewbookError::UnknownState(id.to_string()))?;
            let mut table = Table::new();
            table.set_header(vec!["City"]);
            for option in catalog::city_options(Some(entry.id)) {
                table.add_row(vec![Cell::new(option.label)]);
            }
            Ok(format!("{}\n{table}", format!("Cities in {}", entry.state).bold()))
        }
        None => {
            let mut table = Table::new();
            table.set_header(vec!["ID", "State", "Cities"]);
            for l in catalog::LOCATIONS {
                table.add_row(vec![Cell::new(l.id), Cell::new(l.state), Cell::new(l.cities.len())]);
            }
            Ok(format!("{}\n{table}", "States".bold()))
        }
    }
}

pub fn themes() -> Result<()> {
    println!("{}", format_themes(&load_catalog()?));
    Ok(())
}

pub fn models() -> Result<()> {
    println!("{}", format_models(&load_catalog()?));
    Ok(())
}

pub fn packages() -> Result<()> {
    println!("{}", format_packages());
    Ok(())
}

pub fn locations(state: Option<&str>) -> Result<()> {
    println!("{}", format_locations(state)?);
    Ok(())
}
