use indexmap::IndexMap;

use crate::region::Region;

/// Per-layer export structure: everything that ends up on each layer, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct LayerExport {
    layers: IndexMap<u32, LayerShapes>,
}

#[derive(Debug, Clone, Default)]
pub struct LayerShapes {
    pub positive: Vec<Region>,
    pub subtract: Vec<Region>,
}

impl LayerExport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, layer: u32, shape: Region, subtract: bool) {
        let entry = self.layers.entry(layer).or_default();
        if subtract {
            entry.subtract.push(shape);
        } else {
            entry.positive.push(shape);
        }
    }

    pub fn layer(&self, layer: u32) -> Option<&LayerShapes> {
        self.layers.get(&layer)
    }

    /// Layer ids in ascending order.
    pub fn layer_ids(&self) -> Vec<u32> {
        let mut ids: Vec<u32> = self.layers.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    pub fn iter(&self) -> impl Iterator<Item = (&u32, &LayerShapes)> {
        self.layers.iter()
    }

    pub fn shape_count(&self) -> usize {
        self.layers
            .values()
            .map(|l| l.positive.len() + l.subtract.len())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::rectangle;

    #[test]
    fn shapes_are_grouped_by_layer_and_flag() {
        let mut export = LayerExport::new();
        let r = Region::single(rectangle((0.0, 0.0), (1.0, 1.0), 0.0));
        export.add(31, r.clone(), false);
        export.add(1, r.clone(), true);
        export.add(31, r, false);

        assert_eq!(export.layer_ids(), vec![1, 31]);
        assert_eq!(export.layer(31).unwrap().positive.len(), 2);
        assert_eq!(export.layer(1).unwrap().subtract.len(), 1);
        assert!(export.layer(2).is_none());
        assert_eq!(export.shape_count(), 3);
    }
}
