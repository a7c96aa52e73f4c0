use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::Context;
use pursuit::{try_remove, Cell, GridGraph};
use serde::{Deserialize, Serialize};

/// A region described as a rectangle and the cells carved out of it.
///
/// Example file:
///
/// ```json
/// { "rows": 4, "cols": 5, "remove": [{ "row": 0, "col": 0 }, { "row": 0, "col": 1 }] }
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionConfig {
    pub rows: usize,
    pub cols: usize,
    /// Removed one after the other, each with the same checks as in the editor.
    #[serde(default)]
    pub remove: Vec<Cell>,
}

impl RegionConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Could not open region file '{}'", path.display()))?;
        let config = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Could not parse region file '{}'", path.display()))?;
        Ok(config)
    }

    pub fn build(&self) -> anyhow::Result<GridGraph> {
        let mut graph = GridGraph::build(self.rows, self.cols)?;
        for (idx, &cell) in self.remove.iter().enumerate() {
            if let Err(err) = try_remove(&mut graph, cell) {
                anyhow::bail!("Removal #{} of the region file failed: {}", idx + 1, err);
            }
        }
        Ok(graph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_builds() {
        let json = r#"{ "rows": 2, "cols": 3, "remove": [{ "row": 0, "col": 0 }] }"#;
        let config: RegionConfig = serde_json::from_str(json).unwrap();
        let graph = config.build().unwrap();
        assert_eq!(graph.len(), 5);
        assert!(!graph.contains(Cell::new(0, 0)));
    }

    #[test]
    fn removals_are_optional() {
        let config: RegionConfig = serde_json::from_str(r#"{ "rows": 3, "cols": 3 }"#).unwrap();
        assert_eq!(config.build().unwrap().len(), 9);
    }

    #[test]
    fn rejects_unsafe_removals() {
        let config = RegionConfig {
            rows: 3,
            cols: 3,
            remove: vec![Cell::new(1, 1)],
        };
        let err = config.build().unwrap_err();
        assert!(err.to_string().starts_with("Removal #1"));
    }

    #[test]
    fn rejects_bad_dimensions() {
        let config = RegionConfig {
            rows: 0,
            cols: 3,
            remove: vec![],
        };
        assert!(config.build().is_err());
    }
}
