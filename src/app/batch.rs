//! Non-interactive modes: print search results, render snapshots.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::core::{
    catalog::Catalog,
    destination::Destination,
    search::search,
    snapshot::{RenderRequest, Snapshot, SnapshotHarness},
};
use crate::screens::router;
use crate::ui::{code_view::CodeViewConfig, raster::CellRasterizer};

/// Write the filtered catalog as an indented tree.
pub fn print_search(catalog: &Catalog, query: &str, out: &mut impl Write) -> anyhow::Result<usize> {
    let results = search(catalog, query);
    if results.is_empty() {
        writeln!(out, "No matches for \"{query}\".")?;
        return Ok(0);
    }
    let mut count = 0;
    for result in &results {
        writeln!(out, "{} {}", result.category.icon, result.category.name)?;
        for item in &result.items {
            writeln!(out, "  {:<12} {}", item.name, item.destination.id())?;
            count += 1;
        }
    }
    Ok(count)
}

/// Render one fresh (default-state) screen per destination.
///
/// `base` supplies size and scale; each file is written to
/// `<dir>/<id>.png`.  The first failure stops the run.
pub fn write_snapshots(
    destinations: &[Destination],
    dir: &Path,
    base: &RenderRequest,
    code: CodeViewConfig,
) -> anyhow::Result<Vec<Snapshot>> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create snapshot directory {}", dir.display()))?;
    let harness = SnapshotHarness::new(CellRasterizer::new(code));

    let mut written = Vec::with_capacity(destinations.len());
    for &destination in destinations {
        let screen = router::resolve(destination);
        let request = RenderRequest {
            path: snapshot_file(dir, destination),
            ..base.clone()
        };
        let snapshot = harness
            .render(screen.as_ref(), &request)
            .with_context(|| format!("snapshot of `{destination}` failed"))?;
        written.push(snapshot);
    }
    Ok(written)
}

pub fn snapshot_file(dir: &Path, destination: Destination) -> PathBuf {
    dir.join(format!("{}.png", destination.id()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::snapshot::LogicalSize;

    #[test]
    fn search_output_is_a_category_tree() -> anyhow::Result<()> {
        let mut out = Vec::new();
        let count = print_search(Catalog::builtin(), "but", &mut out)?;
        let text = String::from_utf8(out)?;
        assert_eq!(count, 1);
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("Controls"));
        assert!(lines[1].starts_with("  Button"));
        assert!(lines[1].ends_with("button"));
        Ok(())
    }

    #[test]
    fn search_without_matches_says_so() -> anyhow::Result<()> {
        let mut out = Vec::new();
        assert_eq!(print_search(Catalog::builtin(), " zzz ", &mut out)?, 0);
        assert_eq!(String::from_utf8(out)?, "No matches for \" zzz \".\n");
        Ok(())
    }

    #[test]
    fn every_destination_gets_a_png() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let out = dir.path().join("shots");
        let base = RenderRequest::default().size(LogicalSize::new(200, 320)).scale(1.0);
        let written = write_snapshots(Destination::ALL, &out, &base, CodeViewConfig::default())?;
        assert_eq!(written.len(), Destination::ALL.len());
        for dest in Destination::ALL {
            let path = snapshot_file(&out, *dest);
            assert!(std::fs::metadata(&path)?.len() > 0, "{}", path.display());
        }
        assert!(written.iter().all(|s| (s.width, s.height) == (200, 320)));
        Ok(())
    }
}
