use comfy_table::{Cell, Table};

use crate::cache::FileCache;
use crate::catalog;
use crate::cli::{csv_unsupported, emit, to_json, Globals, OutputArgs, OutputFormat};
use crate::error::Result;
use crate::models::{GymClass, Member};
use crate::settings::load_settings;

fn dash(val: &Option<String>) -> &str {
    val.as_deref().unwrap_or("-")
}

pub fn members(globals: &Globals, refresh: bool, output: OutputArgs) -> Result<()> {
    let settings = load_settings();
    let source = globals.open_source(&settings)?;
    let cache = FileCache::new(&settings.cache_dir());
    let items = catalog::members(source.as_ref(), &cache, refresh)?;

    let content = match output.format {
        OutputFormat::Json => to_json(&items)?,
        OutputFormat::Csv => return Err(csv_unsupported("members")),
        OutputFormat::Text => format_members(&items),
    };
    emit(&content, output.output.as_deref())
}

pub fn classes(globals: &Globals, refresh: bool, output: OutputArgs) -> Result<()> {
    let settings = load_settings();
    let source = globals.open_source(&settings)?;
    let cache = FileCache::new(&settings.cache_dir());
    let items = catalog::classes(source.as_ref(), &cache, refresh)?;

    let content = match output.format {
        OutputFormat::Json => to_json(&items)?,
        OutputFormat::Csv => return Err(csv_unsupported("classes")),
        OutputFormat::Text => format_classes(&items),
    };
    emit(&content, output.output.as_deref())
}

pub fn format_members(items: &[Member]) -> String {
    if items.is_empty() {
        return "No members found.".to_string();
    }
    let mut table = Table::new();
    table.set_header(vec!["ID", "Name", "Email", "Phone", "Plan", "Status"]);
    for m in items {
        table.add_row(vec![
            Cell::new(&m.id),
            Cell::new(&m.name),
            Cell::new(dash(&m.email)),
            Cell::new(dash(&m.phone)),
            Cell::new(dash(&m.plan)),
            Cell::new(&m.status),
        ]);
    }
    table.to_string()
}

pub fn format_classes(items: &[GymClass]) -> String {
    if items.is_empty() {
        return "No classes found.".to_string();
    }
    let mut table = Table::new();
    table.set_header(vec!["ID", "Class", "Trainer", "Schedule", "Booked"]);
    for c in items {
        table.add_row(vec![
            Cell::new(&c.id),
            Cell::new(&c.name),
            Cell::new(dash(&c.trainer)),
            Cell::new(dash(&c.schedule)),
            Cell::new(format!("{}/{}", c.booked, c.capacity)),
        ]);
    }
    table.to_string()
}
