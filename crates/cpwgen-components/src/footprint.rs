use cpwgen_geometry::region::Region;
use indexmap::IndexMap;

use crate::geometry::ComponentGeometry;

/// One labelled shape of a footprint.
#[derive(Debug, Clone)]
pub struct FootprintShape {
    pub region: Region,
    pub layer: u32,
    pub subtract: bool,
}

/// The set of labelled shapes stamped at every placement point. Immutable once built.
#[derive(Debug, Clone, Default)]
pub struct Footprint {
    pub shapes: IndexMap<String, FootprintShape>,
}

impl Footprint {
    pub fn insert(&mut self, label: &str, region: Region, layer: u32, subtract: bool) {
        self.shapes.insert(
            label.to_string(),
            FootprintShape {
                region,
                layer,
                subtract,
            },
        );
    }

    pub fn get(&self, label: &str) -> Option<&FootprintShape> {
        self.shapes.get(label)
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FootprintShape)> {
        self.shapes.iter()
    }

    /// Keep only a component's polygon table; paths and pins are dropped.
    pub fn from_polys(geometry: ComponentGeometry) -> Self {
        let mut fp = Self::default();
        for poly in geometry.polys {
            fp.insert(&poly.name, poly.region, poly.layer, poly.subtract);
        }
        fp
    }
}
