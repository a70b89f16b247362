//! In-memory design: resolved variables plus the geometry of every named component.

use cpwgen_geometry::LayerExport;
use cpwgen_parser::{RawConfig, Units};
use indexmap::IndexMap;

use crate::class::ComponentClass;
use crate::error::ComponentError;
use crate::geometry::{ComponentGeometry, PathRecord};

#[derive(Debug, Clone, Default)]
pub struct Design {
    pub units: Units,
    pub components: IndexMap<String, ComponentGeometry>,
}

impl Design {
    pub fn new(units: Units) -> Self {
        Self {
            units,
            components: IndexMap::new(),
        }
    }

    /// Resolve variables and build every component in file order.
    pub fn from_config(config: &RawConfig) -> Result<Self, ComponentError> {
        let units = Units::parse(config.variables.as_ref())?;
        let mut design = Self::new(units);
        for (name, raw) in &config.components {
            let class = ComponentClass::from_name(&raw.class).ok_or_else(|| {
                ComponentError::UnknownClass {
                    class: raw.class.clone(),
                }
            })?;
            let geometry = class.build(&raw.options, &design.units)?;
            tracing::debug!(
                component = %name,
                class = class.name(),
                paths = geometry.paths.len(),
                polys = geometry.polys.len(),
                "built component"
            );
            design.add_component(name, geometry)?;
        }
        Ok(design)
    }

    pub fn add_component(&mut self, name: &str, geometry: ComponentGeometry) -> Result<(), ComponentError> {
        if self.components.contains_key(name) {
            return Err(ComponentError::DuplicateName {
                name: name.to_string(),
            });
        }
        self.components.insert(name.to_string(), geometry);
        Ok(())
    }

    /// Every path in the design under its qualified name `component.path`.
    pub fn paths(&self) -> impl Iterator<Item = (String, &PathRecord)> {
        self.components.iter().flat_map(|(component, geom)| {
            geom.paths
                .iter()
                .map(move |path| (qualified_name(component, &path.name), path))
        })
    }

    /// Look up a path by its qualified name. Component names may contain dots, path names may not.
    pub fn path(&self, qualified: &str) -> Option<&PathRecord> {
        let (component, path) = qualified.rsplit_once('.')?;
        self.components.get(component)?.path(path)
    }

    pub fn export(&self) -> LayerExport {
        let mut export = LayerExport::new();
        for geometry in self.components.values() {
            geometry.export_into(&mut export);
        }
        export
    }
}

pub fn qualified_name(component: &str, path: &str) -> String {
    format!("{component}.{path}")
}
