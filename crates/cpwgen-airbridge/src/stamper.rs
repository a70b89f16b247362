use std::collections::BTreeMap;

use cpwgen_components::Footprint;
use cpwgen_core::Point;
use cpwgen_geometry::region::Region;
use cpwgen_geometry::LayerExport;

/// One stamped shape and the layer it goes on.
#[derive(Debug, Clone)]
pub struct GeometryRow {
    pub shape: Region,
    pub layer: u32,
}

#[derive(Debug, Clone, Default)]
pub struct GeometryTable {
    pub rows: Vec<GeometryRow>,
}

impl GeometryTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &GeometryRow> {
        self.rows.iter()
    }

    pub fn extend(&mut self, other: GeometryTable) {
        self.rows.extend(other.rows);
    }

    #[must_use]
    pub fn translate(&self, dx: f64, dy: f64) -> Self {
        Self {
            rows: self
                .rows
                .iter()
                .map(|row| GeometryRow {
                    shape: row.shape.translated(dx, dy),
                    layer: row.layer,
                })
                .collect(),
        }
    }

    /// Row count per layer, ascending by layer id.
    pub fn layer_counts(&self) -> Vec<(u32, usize)> {
        let mut counts: BTreeMap<u32, usize> = BTreeMap::new();
        for row in &self.rows {
            *counts.entry(row.layer).or_default() += 1;
        }
        counts.into_iter().collect()
    }

    /// Add every row to the export as a positive shape on its layer.
    pub fn merge_into(&self, export: &mut LayerExport) {
        for row in &self.rows {
            export.add(row.layer, row.shape.clone(), false);
        }
    }
}

/// Copy every footprint shape to every placement: rotate about the origin by the
/// placement angle, then translate to its position.
pub fn stamp(footprint: &Footprint, placements: &[Point]) -> GeometryTable {
    let mut rows = Vec::with_capacity(footprint.len() * placements.len());
    for p in placements {
        for (_, shape) in footprint.iter() {
            rows.push(GeometryRow {
                shape: shape.region.rotated(p.r).translated(p.x, p.y),
                layer: shape.layer,
            });
        }
    }
    GeometryTable { rows }
}
