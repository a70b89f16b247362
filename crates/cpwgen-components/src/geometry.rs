//! Geometry tables a component produces: routed paths, polygons, and pins.

use cpwgen_geometry::band::band_outline;
use cpwgen_geometry::region::Region;
use cpwgen_geometry::LayerExport;
use indexmap::IndexMap;

use crate::pin::Pin;

/// A routed conductor: the unfilleted control polygon plus its cross-section.
#[derive(Debug, Clone, PartialEq)]
pub struct PathRecord {
    pub name: String,
    pub points: Vec<(f64, f64)>,
    pub width: f64,
    pub fillet: f64,
    pub layer: u32,
    /// Airbridges are placed along this path when set.
    pub make_airbridge: bool,
}

impl PathRecord {
    /// Outline of the conductor itself, rounded at each vertex by `fillet`.
    pub fn outline(&self) -> Option<Region> {
        band_outline(&self.points, self.width / 2.0, self.fillet).map(Region::single)
    }
}

#[derive(Debug, Clone)]
pub struct PolyRecord {
    pub name: String,
    pub region: Region,
    pub layer: u32,
    pub subtract: bool,
}

#[derive(Debug, Clone, Default)]
pub struct ComponentGeometry {
    pub paths: Vec<PathRecord>,
    pub polys: Vec<PolyRecord>,
    pub pins: IndexMap<String, Pin>,
}

impl ComponentGeometry {
    pub fn path(&self, name: &str) -> Option<&PathRecord> {
        self.paths.iter().find(|p| p.name == name)
    }

    pub fn poly(&self, name: &str) -> Option<&PolyRecord> {
        self.polys.iter().find(|p| p.name == name)
    }

    pub fn pin(&self, name: &str) -> Option<&Pin> {
        self.pins.get(name)
    }

    pub fn add_path(&mut self, path: PathRecord) {
        self.paths.push(path);
    }

    pub fn add_poly(&mut self, name: &str, region: Region, layer: u32, subtract: bool) {
        self.polys.push(PolyRecord {
            name: name.to_string(),
            region,
            layer,
            subtract,
        });
    }

    pub fn add_pin(&mut self, name: &str, pin: Pin) {
        self.pins.insert(name.to_string(), pin);
    }

    /// Merge into the per-layer export. Paths are exported as their conductor outlines.
    pub fn export_into(&self, export: &mut LayerExport) {
        for path in &self.paths {
            match path.outline() {
                Some(region) => export.add(path.layer, region, false),
                None => tracing::warn!(path = %path.name, "skipping degenerate path outline"),
            }
        }
        for poly in &self.polys {
            export.add(poly.layer, poly.region.clone(), poly.subtract);
        }
    }
}
