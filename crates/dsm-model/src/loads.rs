//! Static load sets (FORCE, MOMENT, SLOAD, GRAV, LOAD).

use serde::{Deserialize, Serialize};

/// An atomic static load
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "UPPERCASE")]
pub enum Load {
    /// Concentrated force: magnitude times a direction in the basic frame
    Force {
        node: i32,
        magnitude: f64,
        direction: [f64; 3],
    },
    /// Concentrated moment: magnitude times a direction in the basic frame
    Moment {
        node: i32,
        magnitude: f64,
        direction: [f64; 3],
    },
    /// Scalar load on one component of a grid (T1 unless stated)
    Sload {
        node: i32,
        #[serde(default = "default_sload_component")]
        component: u8,
        magnitude: f64,
    },
    /// Acceleration load on the whole model
    Grav { magnitude: f64, direction: [f64; 3] },
}

fn default_sload_component() -> u8 {
    1
}

impl Load {
    /// Concentrated force
    pub fn force(node: i32, magnitude: f64, direction: [f64; 3]) -> Self {
        Load::Force {
            node,
            magnitude,
            direction,
        }
    }

    /// Card name
    pub fn card(&self) -> &'static str {
        match self {
            Load::Force { .. } => "FORCE",
            Load::Moment { .. } => "MOMENT",
            Load::Sload { .. } => "SLOAD",
            Load::Grav { .. } => "GRAV",
        }
    }

    /// Whether this is a body (gravity) load
    pub fn is_gravity(&self) -> bool {
        matches!(self, Load::Grav { .. })
    }

    /// Force or moment vector in the global frame. Only the basic frame
    /// exists, so this is magnitude times direction.
    pub fn to_global(&self) -> Option<[f64; 3]> {
        match self {
            Load::Force {
                magnitude,
                direction,
                ..
            }
            | Load::Moment {
                magnitude,
                direction,
                ..
            } => Some(direction.map(|d| d * magnitude)),
            _ => None,
        }
    }
}

/// A load set: atomic loads or a scaled combination of other sets (LOAD)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "UPPERCASE")]
pub enum LoadSet {
    /// Atomic loads sharing one set ID
    Atomic { loads: Vec<Load> },
    /// LOAD: overall scale and (scale, set) pairs
    Combination { scale: f64, entries: Vec<(f64, i32)> },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn force_to_global_scales_direction() {
        let f = Load::force(1, 2.0, [0.0, 1.0, -0.5]);
        assert_eq!(f.to_global(), Some([0.0, 2.0, -1.0]));
        assert!(!f.is_gravity());
    }

    #[test]
    fn sload_has_no_vector() {
        let s = Load::Sload {
            node: 1,
            component: 1,
            magnitude: 3.0,
        };
        assert_eq!(s.to_global(), None);
        assert_eq!(s.card(), "SLOAD");
    }
}
