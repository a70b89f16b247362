use cpwgen_parser::Units;

use crate::airbridge::{self, AirbridgeOptions};
use crate::coupled_line_tee::{self, CoupledLineTeeOptions};
use crate::error::ComponentError;
use crate::footprint::Footprint;
use crate::geometry::ComponentGeometry;
use crate::options::parse_options;
use crate::route::{self, RouteOptions};

/// Component classes a design file may name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentClass {
    Airbridge,
    CoupledLineTee,
    Route,
}

impl ComponentClass {
    pub const ALL: [ComponentClass; 3] = [Self::Airbridge, Self::CoupledLineTee, Self::Route];

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.name() == name)
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Airbridge => airbridge::CLASS,
            Self::CoupledLineTee => coupled_line_tee::CLASS,
            Self::Route => route::CLASS,
        }
    }

    /// Parse `options` for this class and build its geometry tables.
    pub fn build(
        self,
        options: &serde_yaml::Mapping,
        units: &Units,
    ) -> Result<ComponentGeometry, ComponentError> {
        let class = self.name();
        match self {
            Self::Airbridge => {
                airbridge::make(&parse_options::<AirbridgeOptions>(class, options)?, units)
            }
            Self::CoupledLineTee => coupled_line_tee::make(
                &parse_options::<CoupledLineTeeOptions>(class, options)?,
                units,
            ),
            Self::Route => route::make(&parse_options::<RouteOptions>(class, options)?, units),
        }
    }
}

/// Build a component of `class` and keep only its polygon table.
///
/// Fails with [`ComponentError::UnknownClass`] for an unregistered name and with
/// [`ComponentError::Degenerate`] when the class produced no polygons.
pub fn extract_footprint(
    class: &str,
    options: &serde_yaml::Mapping,
    units: &Units,
) -> Result<Footprint, ComponentError> {
    let kind = ComponentClass::from_name(class).ok_or_else(|| ComponentError::UnknownClass {
        class: class.to_string(),
    })?;
    let footprint = Footprint::from_polys(kind.build(options, units)?);
    if footprint.is_empty() {
        return Err(ComponentError::Degenerate {
            name: class.to_string(),
            message: "component has no polygons to use as a footprint".to_string(),
        });
    }
    tracing::debug!(class, shapes = footprint.len(), "extracted footprint");
    Ok(footprint)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for class in ComponentClass::ALL {
            assert_eq!(ComponentClass::from_name(class.name()), Some(class));
        }
        assert_eq!(ComponentClass::from_name("transmon"), None);
    }

    #[test]
    fn airbridge_footprint_keeps_three_shapes() {
        let fp = extract_footprint("airbridge", &serde_yaml::Mapping::new(), &Units::default()).unwrap();
        let labels: Vec<_> = fp.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(labels, ["bridge_struct", "inside_struct", "outside_struct"]);
    }

    #[test]
    fn tee_footprint_keeps_only_etch_polys() {
        let fp = extract_footprint("coupled_line_tee", &serde_yaml::Mapping::new(), &Units::default())
            .unwrap();
        let labels: Vec<_> = fp.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(labels, ["prime_cpw_sub", "second_cpw_sub"]);
        assert!(fp.iter().all(|(_, s)| s.subtract));
    }

    #[test]
    fn unknown_class_is_reported() {
        let err = extract_footprint("transmon", &serde_yaml::Mapping::new(), &Units::default())
            .unwrap_err();
        assert!(matches!(err, ComponentError::UnknownClass { ref class } if class == "transmon"));
    }

    #[test]
    fn unknown_option_is_rejected() {
        let options: serde_yaml::Mapping = serde_yaml::from_str("bridge_length: 1").unwrap();
        let err = extract_footprint("airbridge", &options, &Units::default()).unwrap_err();
        assert!(matches!(err, ComponentError::Options { .. }));
    }
}
