//! Recipe validation for generated facility documents.
//!
//! Pure functions over a [`Recipe`] that return validation errors; a recipe
//! read back from disk can be checked the same way as a freshly generated one.

use std::collections::HashSet;

use crate::components::Entity;
use crate::recipe::Recipe;

const AREA_TOLERANCE: f64 = 1e-6;
const POSITION_TOLERANCE: f64 = 1e-9;

/// A recipe validation error.
#[derive(Debug, Clone)]
pub struct ValidationError {
    pub category: &'static str,
    pub severity: Severity,
    pub message: String,
}

/// Error severity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Severity {
    Error,
    Warning,
}

// ── A. Entity groups ───────────────────────────────────────────────────

/// Check that ids are unique within each group.
pub fn check_duplicate_ids(recipe: &Recipe) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for (group, entities) in recipe.groups() {
        let mut seen = HashSet::new();
        for e in entities {
            if !seen.insert(e.id.as_str()) {
                errors.push(ValidationError {
                    category: "entity_ids",
                    severity: Severity::Error,
                    message: format!("Duplicate id `{}` in group `{}`", e.id, group),
                });
            }
        }
    }
    errors
}

/// Check that every entity has non-negative extent and a center at half of it.
pub fn check_entity_geometry(recipe: &Recipe) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for (group, entities) in recipe.groups() {
        for e in entities {
            let d = e.dimensions();
            if d.x < 0.0 || d.y < 0.0 || d.z < 0.0 {
                errors.push(ValidationError {
                    category: "entity_geometry",
                    severity: Severity::Error,
                    message: format!("{group}/{} has negative dimensions {:?}", e.id, d.to_array()),
                });
            }
            let half = d * 0.5;
            let c = e.center();
            if (c - half).to_array().iter().any(|v| v.abs() > POSITION_TOLERANCE) {
                errors.push(ValidationError {
                    category: "entity_geometry",
                    severity: Severity::Error,
                    message: format!(
                        "{group}/{} center {:?} is not half of {:?}",
                        e.id,
                        c.to_array(),
                        d.to_array()
                    ),
                });
            }
        }
    }
    errors
}

// ── B. Interior ────────────────────────────────────────────────────────

/// Check that interior placements lie within the envelope.
pub fn check_interior_within_envelope(recipe: &Recipe) -> Vec<ValidationError> {
    let [x, y, z] = recipe.env_size;
    let mut errors = Vec::new();
    for e in &recipe.interior {
        let l = e.location;
        let inside = (0.0..=x).contains(&l.x)
            && (0.0..=y).contains(&l.y)
            && (0.0..=z).contains(&l.z);
        if !inside {
            errors.push(ValidationError {
                category: "interior_bounds",
                severity: Severity::Error,
                message: format!(
                    "{} at {:?} is outside the {}×{}×{} envelope",
                    e.id,
                    l.to_array(),
                    x,
                    y,
                    z
                ),
            });
        }
    }
    if recipe.env_type.has_interior() && recipe.interior.is_empty() {
        errors.push(ValidationError {
            category: "interior_bounds",
            severity: Severity::Warning,
            message: format!("{} has no interior placements", recipe.name()),
        });
    }
    errors
}

// ── C. Auxiliary solids ────────────────────────────────────────────────

/// Check that the boolean program resolves against the solid group.
pub fn check_boolean_program(recipe: &Recipe) -> Vec<ValidationError> {
    let Some(program) = recipe.boolean_program() else {
        let message = if recipe.gaden_bools.is_empty() {
            "Boolean program is empty".to_string()
        } else {
            "Boolean records do not share a single target".to_string()
        };
        return vec![ValidationError {
            category: "boolean_program",
            severity: Severity::Error,
            message,
        }];
    };

    match program.replay(&recipe.gaden_geom) {
        Ok(_) => Vec::new(),
        Err(e) => vec![ValidationError {
            category: "boolean_program",
            severity: Severity::Error,
            message: e.to_string(),
        }],
    }
}

// ── D. Boundary ────────────────────────────────────────────────────────

fn face_area(planes: &[&Entity]) -> f64 {
    planes.iter().map(|e| e.dx() * e.dy()).sum()
}

/// Check that each split side face plus its opening covers the whole face.
pub fn check_side_face_areas(recipe: &Recipe) -> Vec<ValidationError> {
    let [x, y, z] = recipe.env_size;
    let full = y * z;
    let mut errors = Vec::new();

    let faces = [
        ("inlet", 0.0, recipe.inlet_size),
        ("outlet", x, recipe.outlet_size),
    ];
    for (name, face_x, [oy, oz]) in faces {
        let planes: Vec<&Entity> = recipe
            .sides
            .iter()
            .filter(|e| {
                e.id.starts_with("side_") && (e.location.x - face_x).abs() < POSITION_TOLERANCE
            })
            .collect();
        let expected = full - oy * oz;
        let actual = face_area(&planes);
        if (actual - expected).abs() > AREA_TOLERANCE {
            errors.push(ValidationError {
                category: "side_faces",
                severity: Severity::Error,
                message: format!(
                    "{name} face planes cover {actual:.4} m², expected {expected:.4} m²"
                ),
            });
        }
    }
    errors
}

/// Run every check.
pub fn validate_recipe(recipe: &Recipe) -> Vec<ValidationError> {
    let mut all = Vec::new();
    all.extend(check_duplicate_ids(recipe));
    all.extend(check_entity_geometry(recipe));
    all.extend(check_interior_within_envelope(recipe));
    all.extend(check_boolean_program(recipe));
    all.extend(check_side_face_areas(recipe));
    all
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::Vec3;
    use crate::config::GeneratorConfig;
    use crate::generation::FacilityType;
    use crate::recipe::generate_batch;

    fn recipe(env_type: FacilityType, env_size: [f64; 3]) -> Recipe {
        let config = GeneratorConfig {
            env_type,
            env_size,
            env_amount: 1,
            seed: Some(21),
            ..Default::default()
        };
        generate_batch(&config).unwrap().remove(0)
    }

    fn errors_only(errors: &[ValidationError]) -> Vec<&ValidationError> {
        errors.iter().filter(|e| e.severity == Severity::Error).collect()
    }

    #[test]
    fn generated_recipes_are_valid() {
        for (t, size) in [
            (FacilityType::Empty, [10.0, 16.0, 8.0]),
            (FacilityType::Simple, [10.0, 16.0, 8.0]),
            (FacilityType::Simple, [23.0, 41.0, 11.0]),
            (FacilityType::Complex, [15.0, 15.0, 8.0]),
        ] {
            let r = recipe(t, size);
            let errors = validate_recipe(&r);
            assert!(errors.is_empty(), "{}: {errors:?}", r.name());
        }
    }

    #[test]
    fn duplicate_id_is_reported() {
        let mut r = recipe(FacilityType::Simple, [10.0, 16.0, 8.0]);
        let dup = r.isaac_lights[0].clone();
        r.isaac_lights.push(dup);
        let errors = check_duplicate_ids(&r);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("isaac_lights"));
    }

    #[test]
    fn stray_interior_entity_is_reported() {
        let mut r = recipe(FacilityType::Simple, [10.0, 16.0, 8.0]);
        r.interior[0].location = Vec3::new(-1.0, 4.0, 0.0);
        let errors = check_interior_within_envelope(&r);
        assert_eq!(errors_only(&errors).len(), 1);
        assert_eq!(errors[0].category, "interior_bounds");
    }

    #[test]
    fn missing_operand_breaks_the_program() {
        let mut r = recipe(FacilityType::Simple, [10.0, 16.0, 8.0]);
        r.gaden_geom.retain(|e| e.id != "inlet");
        let errors = check_boolean_program(&r);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("inlet"));
    }

    #[test]
    fn empty_program_is_reported() {
        let mut r = recipe(FacilityType::Empty, [10.0, 16.0, 8.0]);
        r.gaden_bools.clear();
        assert_eq!(check_boolean_program(&r).len(), 1);
    }

    #[test]
    fn shrunken_side_plane_is_reported() {
        let mut r = recipe(FacilityType::Simple, [10.0, 16.0, 8.0]);
        let side = r.sides.iter_mut().find(|e| e.id == "side_003").unwrap();
        let d = side.dimensions();
        side.set_dimensions(Vec3::new(d.x, d.y - 1.0, d.z));
        let errors = check_side_face_areas(&r);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.starts_with("outlet"));
    }

    #[test]
    fn empty_rack_grid_is_only_a_warning() {
        let r = recipe(FacilityType::Simple, [10.0, 8.0, 8.0]);
        let errors = validate_recipe(&r);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].severity, Severity::Warning);
    }
}
