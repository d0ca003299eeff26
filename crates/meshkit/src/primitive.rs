//! Procedural primitive synthesis.
//!
//! Generators take an extent box, segment counts, and a geometry kind and
//! produce a fully-indexed [`Mesh`]. Degenerate parameters are rejected with a
//! [`PrimitiveError`] rather than producing broken geometry.

use std::f32::consts::{PI, TAU};

use crate::mesh::{GeometryKind, Mesh, Submesh};

#[derive(Debug, thiserror::Error)]
pub enum PrimitiveError {
    #[error("primitive needs at least 3 radial and 1 vertical segments (got [{radial}, {vertical}])")]
    TooFewSegments { radial: u32, vertical: u32 },
    #[error("extent must be positive on every axis (got [{0}, {1}, {2}])")]
    NonPositiveExtent(f32, f32, f32),
}

impl Mesh {
    /// Builds a cone filling `extent`, subdivided into `segments[0]` radial
    /// and `segments[1]` vertical steps. The apex points up (+Y) and the base
    /// sits at -Y; `cap` closes the base with a disc. `inward_normals` flips
    /// every normal toward the interior.
    pub fn cone(
        extent: [f32; 3],
        segments: [u32; 2],
        inward_normals: bool,
        cap: bool,
        geometry: GeometryKind,
    ) -> Result<Mesh, PrimitiveError> {
        validate(extent, segments)?;
        let [radial, vertical] = segments;
        let radius_x = extent[0] * 0.5;
        let height = extent[1];
        let radius_z = extent[2] * 0.5;
        let top = height * 0.5;

        let mut mesh = Mesh::empty("cone");

        // Side surface: rings from the apex down to the base rim. The apex
        // ring is degenerate so each radial column owns its own apex copy.
        for ring in 0..=vertical {
            let t = ring as f32 / vertical as f32;
            let y = top - t * height;
            for step in 0..radial {
                let theta = step as f32 / radial as f32 * TAU;
                let (sin, cos) = theta.sin_cos();
                let position = [cos * radius_x * t, y, sin * radius_z * t];
                let normal = slant_normal(cos, sin, height, radius_x, radius_z);
                mesh.push_vertex(position, flip(normal, inward_normals));
            }
        }

        let mut indices = Vec::with_capacity((vertical * radial * 6) as usize);
        for ring in 0..vertical {
            let upper = ring * radial;
            let lower = (ring + 1) * radial;
            for step in 0..radial {
                let next = (step + 1) % radial;
                indices.extend_from_slice(&[
                    upper + step,
                    lower + step,
                    upper + next,
                    upper + next,
                    lower + step,
                    lower + next,
                ]);
            }
        }

        if cap {
            // The disc gets its own rim vertices so the downward-facing
            // normals stay sharp against the slanted side.
            let rim = mesh.vertex_count() as u32;
            let down = flip([0.0, -1.0, 0.0], inward_normals);
            for step in 0..radial {
                let theta = step as f32 / radial as f32 * TAU;
                let (sin, cos) = theta.sin_cos();
                mesh.push_vertex([cos * radius_x, -top, sin * radius_z], down);
            }
            let center = mesh.vertex_count() as u32;
            mesh.push_vertex([0.0, -top, 0.0], down);
            for step in 0..radial {
                let next = (step + 1) % radial;
                indices.extend_from_slice(&[center, rim + step, rim + next]);
            }
        }

        mesh.push_submesh(Submesh::new(indices, geometry));
        tracing::debug!(
            vertices = mesh.vertex_count(),
            indices = mesh.submeshes()[0].index_count(),
            cap,
            "generated cone"
        );
        Ok(mesh)
    }

    /// Builds an ellipsoid filling `extent` with `segments[0]` longitude and
    /// `segments[1]` latitude subdivisions.
    pub fn sphere(
        extent: [f32; 3],
        segments: [u32; 2],
        inward_normals: bool,
        geometry: GeometryKind,
    ) -> Result<Mesh, PrimitiveError> {
        validate(extent, segments)?;
        let [longitude, latitude] = segments;
        let radius_x = extent[0] * 0.5;
        let radius_y = extent[1] * 0.5;
        let radius_z = extent[2] * 0.5;

        let mut mesh = Mesh::empty("sphere");

        for ring in 0..=latitude {
            let phi = ring as f32 / latitude as f32 * PI;
            let ring_radius = phi.sin();
            let y = phi.cos();
            for step in 0..longitude {
                let theta = step as f32 / longitude as f32 * TAU;
                let (sin, cos) = theta.sin_cos();
                let direction = [cos * ring_radius, y, sin * ring_radius];
                let position = [
                    direction[0] * radius_x,
                    direction[1] * radius_y,
                    direction[2] * radius_z,
                ];
                let normal = normalize([
                    direction[0] / radius_x,
                    direction[1] / radius_y,
                    direction[2] / radius_z,
                ]);
                mesh.push_vertex(position, flip(normal, inward_normals));
            }
        }

        let mut indices = Vec::with_capacity((latitude * longitude * 6) as usize);
        for ring in 0..latitude {
            let upper = ring * longitude;
            let lower = (ring + 1) * longitude;
            for step in 0..longitude {
                let next = (step + 1) % longitude;
                indices.extend_from_slice(&[
                    upper + step,
                    lower + step,
                    upper + next,
                    upper + next,
                    lower + step,
                    lower + next,
                ]);
            }
        }

        mesh.push_submesh(Submesh::new(indices, geometry));
        tracing::debug!(
            vertices = mesh.vertex_count(),
            indices = mesh.submeshes()[0].index_count(),
            "generated sphere"
        );
        Ok(mesh)
    }
}

fn validate(extent: [f32; 3], segments: [u32; 2]) -> Result<(), PrimitiveError> {
    if segments[0] < 3 || segments[1] < 1 {
        return Err(PrimitiveError::TooFewSegments {
            radial: segments[0],
            vertical: segments[1],
        });
    }
    if extent.iter().any(|&axis| axis <= 0.0) {
        return Err(PrimitiveError::NonPositiveExtent(
            extent[0], extent[1], extent[2],
        ));
    }
    Ok(())
}

/// Outward normal of the slanted cone surface at angle (`cos`, `sin`).
fn slant_normal(cos: f32, sin: f32, height: f32, radius_x: f32, radius_z: f32) -> [f32; 3] {
    let rim = (radius_x + radius_z) * 0.5;
    normalize([cos * height, rim, sin * height])
}

fn normalize(vector: [f32; 3]) -> [f32; 3] {
    let length = (vector[0] * vector[0] + vector[1] * vector[1] + vector[2] * vector[2]).sqrt();
    [vector[0] / length, vector[1] / length, vector[2] / length]
}

fn flip(normal: [f32; 3], inward: bool) -> [f32; 3] {
    if inward {
        [-normal[0], -normal[1], -normal[2]]
    } else {
        normal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cone_matches_tutorial_parameters() {
        let mesh = Mesh::cone([1.0, 1.0, 1.0], [10, 10], false, true, GeometryKind::Triangles)
            .expect("cone generation");
        // 11 rings of 10 side vertices, plus 10 rim vertices and a center.
        assert_eq!(mesh.vertex_count(), 11 * 10 + 10 + 1);
        assert_eq!(mesh.submeshes().len(), 1);
        let submesh = &mesh.submeshes()[0];
        assert!(submesh.index_count() > 0);
        assert_eq!(submesh.index_count() % 3, 0);
        assert_eq!(submesh.geometry(), GeometryKind::Triangles);
    }

    #[test]
    fn cone_without_cap_skips_base_disc() {
        let capped =
            Mesh::cone([1.0, 1.0, 1.0], [10, 10], false, true, GeometryKind::Triangles).unwrap();
        let open =
            Mesh::cone([1.0, 1.0, 1.0], [10, 10], false, false, GeometryKind::Triangles).unwrap();
        assert_eq!(capped.vertex_count() - open.vertex_count(), 10 + 1);
        assert_eq!(
            capped.submeshes()[0].index_count() - open.submeshes()[0].index_count(),
            10 * 3
        );
    }

    #[test]
    fn cone_fits_inside_extent() {
        let mesh =
            Mesh::cone([2.0, 4.0, 2.0], [12, 3], false, true, GeometryKind::Triangles).unwrap();
        for position in mesh.positions() {
            assert!(position[0].abs() <= 1.0 + f32::EPSILON);
            assert!(position[1].abs() <= 2.0 + f32::EPSILON);
            assert!(position[2].abs() <= 1.0 + f32::EPSILON);
        }
        // Apex at the top of the extent box, base plane at the bottom.
        assert!(mesh.positions().iter().any(|p| (p[1] - 2.0).abs() < 1e-6));
        assert!(mesh.positions().iter().any(|p| (p[1] + 2.0).abs() < 1e-6));
    }

    #[test]
    fn cone_indices_reference_existing_vertices() {
        let mesh =
            Mesh::cone([1.0, 1.0, 1.0], [5, 2], false, true, GeometryKind::Triangles).unwrap();
        let max = mesh.vertex_count() as u32;
        assert!(mesh.submeshes()[0].indices().iter().all(|&index| index < max));
    }

    #[test]
    fn inward_normals_point_the_other_way() {
        let outward =
            Mesh::cone([1.0, 1.0, 1.0], [6, 2], false, true, GeometryKind::Triangles).unwrap();
        let inward =
            Mesh::cone([1.0, 1.0, 1.0], [6, 2], true, true, GeometryKind::Triangles).unwrap();
        for (a, b) in outward.normals().iter().zip(inward.normals()) {
            assert_eq!(a[0], -b[0]);
            assert_eq!(a[1], -b[1]);
            assert_eq!(a[2], -b[2]);
        }
    }

    #[test]
    fn degenerate_parameters_are_rejected() {
        assert!(matches!(
            Mesh::cone([1.0, 1.0, 1.0], [0, 10], false, true, GeometryKind::Triangles),
            Err(PrimitiveError::TooFewSegments { .. })
        ));
        assert!(matches!(
            Mesh::cone([1.0, 0.0, 1.0], [10, 10], false, true, GeometryKind::Triangles),
            Err(PrimitiveError::NonPositiveExtent(..))
        ));
    }

    #[test]
    fn sphere_touches_its_poles() {
        let mesh = Mesh::sphere([1.5, 1.5, 1.5], [16, 8], false, GeometryKind::Triangles).unwrap();
        assert!(mesh.positions().iter().any(|p| (p[1] - 0.75).abs() < 1e-6));
        assert!(mesh.positions().iter().any(|p| (p[1] + 0.75).abs() < 1e-6));
        assert_eq!(mesh.submeshes()[0].index_count() % 3, 0);
    }
}
