//! Read-only structural model consumed by the dsm solver.
//!
//! Holds the bulk data (grids, materials, properties, elements, constraint
//! and load sets) and the case control, and answers the cross-reference
//! questions the solver asks: element lengths, rod sections, spring rates,
//! and flattened constraint/load sets.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub mod bulk;
pub mod case_control;
pub mod constraints;
pub mod error;
pub mod loads;

pub use bulk::{tube_section, Element, ElementKind, Grid, Material, Property, RodSection};
pub use case_control::{CaseEntry, Subcase, GLOBAL_SUBCASE};
pub use constraints::{Constraint, ConstraintSet};
pub use error::{ModelError, Result};
pub use loads::{Load, LoadSet};

/// Complete structural model
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StructuralModel {
    /// Solution sequence code (101 static, 103 modes, ...)
    pub sol: Option<i32>,
    /// Grid points by ID
    pub grids: BTreeMap<i32, Grid>,
    /// Materials by ID
    pub materials: BTreeMap<i32, Material>,
    /// Properties by ID
    pub properties: BTreeMap<i32, Property>,
    /// Elements by ID
    pub elements: BTreeMap<i32, Element>,
    /// Constraint sets by set ID
    pub constraint_sets: BTreeMap<i32, ConstraintSet>,
    /// Load sets by set ID
    pub load_sets: BTreeMap<i32, LoadSet>,
    /// Subcases by ID (0 = global defaults)
    pub subcases: BTreeMap<i32, Subcase>,
}

/// Flattened load set: atomic loads, their scale factors, and whether any
/// gravity load was found
pub type ResolvedLoads = (Vec<Load>, Vec<f64>, bool);

impl StructuralModel {
    /// Create an empty model
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the solution sequence
    pub fn set_sol(&mut self, sol: i32) {
        self.sol = Some(sol);
    }

    /// Add a grid point
    pub fn add_grid(&mut self, grid: Grid) {
        self.grids.insert(grid.id, grid);
    }

    /// Add a material
    pub fn add_material(&mut self, material: Material) {
        self.materials.insert(material.id, material);
    }

    /// Add a property
    pub fn add_property(&mut self, property: Property) {
        self.properties.insert(property.id(), property);
    }

    /// Add an element after checking its node count
    pub fn add_element(&mut self, element: Element) -> Result<()> {
        element.validate()?;
        self.elements.insert(element.id, element);
        Ok(())
    }

    /// Append atomic constraints to a set
    pub fn add_constraint(&mut self, set_id: i32, constraint: Constraint) {
        let set = self
            .constraint_sets
            .entry(set_id)
            .or_insert_with(|| ConstraintSet::Atomic {
                constraints: Vec::new(),
            });
        if let ConstraintSet::SpcAdd { .. } = set {
            *set = ConstraintSet::Atomic {
                constraints: Vec::new(),
            };
        }
        if let ConstraintSet::Atomic { constraints } = set {
            constraints.push(constraint);
        }
    }

    /// Define an SPCADD combination
    pub fn add_spcadd(&mut self, set_id: i32, sets: Vec<i32>) {
        self.constraint_sets
            .insert(set_id, ConstraintSet::SpcAdd { sets });
    }

    /// Append an atomic load to a set
    pub fn add_load(&mut self, set_id: i32, load: Load) {
        let set = self
            .load_sets
            .entry(set_id)
            .or_insert_with(|| LoadSet::Atomic { loads: Vec::new() });
        if let LoadSet::Combination { .. } = set {
            *set = LoadSet::Atomic { loads: Vec::new() };
        }
        if let LoadSet::Atomic { loads } = set {
            loads.push(load);
        }
    }

    /// Define a LOAD combination
    pub fn add_load_combination(&mut self, set_id: i32, scale: f64, entries: Vec<(f64, i32)>) {
        self.load_sets
            .insert(set_id, LoadSet::Combination { scale, entries });
    }

    /// Add a subcase
    pub fn add_subcase(&mut self, subcase: Subcase) {
        self.subcases.insert(subcase.id, subcase);
    }

    /// Get a grid by ID
    pub fn grid(&self, id: i32) -> Result<&Grid> {
        self.grids.get(&id).ok_or(ModelError::MissingGrid(id))
    }

    /// Get a material by ID
    pub fn material(&self, id: i32) -> Result<&Material> {
        self.materials.get(&id).ok_or(ModelError::MissingMaterial(id))
    }

    fn property(&self, eid: i32, pid: i32) -> Result<&Property> {
        self.properties
            .get(&pid)
            .ok_or(ModelError::MissingProperty { eid, pid })
    }

    /// Vector from the first to the second end grid of a two-node element
    pub fn element_axis(&self, element: &Element) -> Result<[f64; 3]> {
        let (n1, n2) = element.end_nodes()?;
        let p1 = self.grid(n1)?.position();
        let p2 = self.grid(n2)?.position();
        Ok([p2[0] - p1[0], p2[1] - p1[1], p2[2] - p1[2]])
    }

    /// Euclidean distance between the two end grids
    pub fn element_length(&self, element: &Element) -> Result<f64> {
        let [dx, dy, dz] = self.element_axis(element)?;
        Ok((dx * dx + dy * dy + dz * dz).sqrt())
    }

    /// Section and material constants of a rod-like element, or `None` for
    /// other element kinds
    pub fn rod_section(&self, element: &Element) -> Result<Option<RodSection>> {
        let (mid, area, torsion_constant) = match &element.kind {
            ElementKind::Conrod { mid, a, j } => (*mid, *a, *j),
            ElementKind::Crod { pid } => match self.property(element.id, *pid)? {
                Property::Prod { mid, a, j, .. } => (*mid, *a, *j),
                other => return Err(wrong_property(*pid, "PROD", other)),
            },
            ElementKind::Ctube { pid } => match self.property(element.id, *pid)? {
                Property::Ptube { mid, od, t, .. } => {
                    let (a, j) = tube_section(*od, *t);
                    (*mid, a, j)
                }
                other => return Err(wrong_property(*pid, "PTUBE", other)),
            },
            _ => return Ok(None),
        };

        let material = self.material(mid)?;
        Ok(Some(RodSection {
            area,
            torsion_constant,
            youngs_modulus: material.youngs_modulus(),
            shear_modulus: material.shear_modulus(),
        }))
    }

    /// Spring rate and connected components of a scalar spring, or `None`
    /// for other element kinds
    pub fn spring_rate(&self, element: &Element) -> Result<Option<(f64, [u8; 2])>> {
        match &element.kind {
            ElementKind::Celas2 { k, components } => Ok(Some((*k, *components))),
            ElementKind::Celas1 { pid, components } => match self.property(element.id, *pid)? {
                Property::Pelas { k, .. } => Ok(Some((*k, *components))),
                other => Err(wrong_property(*pid, "PELAS", other)),
            },
            _ => Ok(None),
        }
    }

    /// Flatten a constraint set (following SPCADD combinations) into its
    /// atomic constraints
    pub fn resolve_constraints(&self, set_id: i32) -> Result<Vec<Constraint>> {
        let mut out = Vec::new();
        let mut stack = Vec::new();
        self.collect_constraints(set_id, &mut stack, &mut out)?;
        Ok(out)
    }

    fn collect_constraints(
        &self,
        set_id: i32,
        stack: &mut Vec<i32>,
        out: &mut Vec<Constraint>,
    ) -> Result<()> {
        if stack.contains(&set_id) {
            return Err(ModelError::CyclicSet {
                kind: "constraint",
                id: set_id,
            });
        }
        let set = self
            .constraint_sets
            .get(&set_id)
            .ok_or(ModelError::MissingConstraintSet(set_id))?;

        stack.push(set_id);
        match set {
            ConstraintSet::Atomic { constraints } => out.extend(constraints.iter().cloned()),
            ConstraintSet::SpcAdd { sets } => {
                for &child in sets {
                    self.collect_constraints(child, stack, out)?;
                }
            }
        }
        stack.pop();
        Ok(())
    }

    /// Flatten a load set (following LOAD combinations) into atomic loads
    /// and the product of every scale factor on the path to each of them
    pub fn resolve_loads(&self, set_id: i32, scale: f64) -> Result<ResolvedLoads> {
        let mut loads = Vec::new();
        let mut scales = Vec::new();
        let mut stack = Vec::new();
        self.collect_loads(set_id, scale, &mut stack, &mut loads, &mut scales)?;
        let is_grav = loads.iter().any(Load::is_gravity);
        Ok((loads, scales, is_grav))
    }

    fn collect_loads(
        &self,
        set_id: i32,
        scale: f64,
        stack: &mut Vec<i32>,
        loads: &mut Vec<Load>,
        scales: &mut Vec<f64>,
    ) -> Result<()> {
        if stack.contains(&set_id) {
            return Err(ModelError::CyclicSet {
                kind: "load",
                id: set_id,
            });
        }
        let set = self
            .load_sets
            .get(&set_id)
            .ok_or(ModelError::MissingLoadSet(set_id))?;

        stack.push(set_id);
        match set {
            LoadSet::Atomic { loads: atomic } => {
                for load in atomic {
                    loads.push(load.clone());
                    scales.push(scale);
                }
            }
            LoadSet::Combination {
                scale: overall,
                entries,
            } => {
                for &(factor, child) in entries {
                    self.collect_loads(child, scale * overall * factor, stack, loads, scales)?;
                }
            }
        }
        stack.pop();
        Ok(())
    }

    /// Subcase `id` with missing keys inherited from the global subcase
    pub fn effective_subcase(&self, id: i32) -> Option<Subcase> {
        let subcase = self.subcases.get(&id)?;
        Some(match self.subcases.get(&GLOBAL_SUBCASE) {
            Some(defaults) if id != GLOBAL_SUBCASE => subcase.overlay_on(defaults),
            _ => subcase.clone(),
        })
    }

    /// Number of elements of each card type
    pub fn card_counts(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for element in self.elements.values() {
            *counts.entry(element.card().to_string()).or_insert(0) += 1;
        }
        counts
    }
}

fn wrong_property(pid: i32, expected: &'static str, found: &Property) -> ModelError {
    ModelError::WrongPropertyType {
        pid,
        expected,
        found: found.card(),
    }
}
