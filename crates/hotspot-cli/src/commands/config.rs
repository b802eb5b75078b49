//! Config command implementation

use super::Workspace;
use crate::output::OutputWriter;
use crate::output_types::ConfigRow;
use anyhow::Result;

pub fn execute(workspace: &Workspace, output: &OutputWriter) -> Result<()> {
    let mut entries: Vec<_> = workspace.config.to_inspection_map().into_iter().collect();
    entries.sort_by(|a, b| a.0.cmp(&b.0));

    let rows: Vec<ConfigRow> = entries
        .into_iter()
        .map(|(key, (value, source))| ConfigRow::new(key, value, source))
        .collect();

    if !output.is_json() {
        output.section("Configuration");
        output.kv("Workspace", workspace.root.display());
    }
    output.table(rows)
}
