use crate::core::geometry::{PrimitiveTopology, Vertex};
use crate::io::error::LoadError;
use crate::scene::mesh::Mesh;
use log::{info, warn};
use nalgebra::{Point3, Vector2, Vector3};
use std::path::Path;

/// Options applied while converting OBJ data into a [`Mesh`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ObjOptions {
    pub topology: PrimitiveTopology,
    /// Negate z, swap the 2nd and 3rd index of each triangle and flip v,
    /// turning a right-handed asset into the left-handed scene space.
    pub flip_handedness: bool,
}

/// Loads an OBJ file and returns a unified Mesh.
///
/// All sub-models are merged. Missing normals default to +Y, missing texture
/// coordinates to (0, 0). Tangents are generated from the UV layout.
pub fn load_obj<P: AsRef<Path>>(path: P, options: ObjOptions) -> Result<Mesh, LoadError> {
    let path = path.as_ref();
    info!("Loading OBJ file: {:?}", path);

    let load_options = tobj::LoadOptions {
        triangulate: options.topology == PrimitiveTopology::TriangleList,
        single_index: true, // Unifies indices for Position/Normal/UV
        ..Default::default()
    };

    let (models, _materials) =
        tobj::load_obj(path, &load_options).map_err(|source| LoadError::Obj {
            path: path.to_path_buf(),
            source,
        })?;

    let mut vertices = Vec::new();
    let mut indices = Vec::new();

    for model in models {
        let mesh = &model.mesh;
        let index_offset = vertices.len() as u32;
        let num_vertices = mesh.positions.len() / 3;

        let has_normals = !mesh.normals.is_empty();
        let has_texcoords = !mesh.texcoords.is_empty();
        if !has_normals {
            warn!("Mesh '{}' is missing normals. Using default (0, 1, 0).", model.name);
        }

        for i in 0..num_vertices {
            let mut position = Point3::new(
                mesh.positions[i * 3],
                mesh.positions[i * 3 + 1],
                mesh.positions[i * 3 + 2],
            );
            let mut normal = if has_normals {
                Vector3::new(mesh.normals[i * 3], mesh.normals[i * 3 + 1], mesh.normals[i * 3 + 2])
            } else {
                Vector3::y()
            };
            let mut uv = if has_texcoords {
                Vector2::new(mesh.texcoords[i * 2], mesh.texcoords[i * 2 + 1])
            } else {
                Vector2::zeros()
            };

            if options.flip_handedness {
                position.z = -position.z;
                normal.z = -normal.z;
                uv.y = 1.0 - uv.y;
            }

            vertices.push(Vertex::new(position, normal, uv));
        }

        let mut local: Vec<u32> = mesh.indices.iter().map(|i| i + index_offset).collect();
        if options.flip_handedness && options.topology == PrimitiveTopology::TriangleList {
            for tri in local.chunks_exact_mut(3) {
                tri.swap(1, 2);
            }
        }
        indices.extend(local);
    }

    generate_tangents(&mut vertices, &indices, options.topology);

    info!(
        "OBJ loaded successfully. Total vertices: {}, Total indices: {}",
        vertices.len(),
        indices.len()
    );

    Mesh::new(vertices, indices, options.topology)
}

/// Computes per-vertex tangents from texture-coordinate derivatives.
///
/// Face tangents are accumulated on their vertices, then each sum is made
/// orthogonal to the vertex normal and normalized. Vertices whose faces have
/// no usable UV layout keep a zero tangent.
pub fn generate_tangents(vertices: &mut [Vertex], indices: &[u32], topology: PrimitiveTopology) {
    let mut accum = vec![Vector3::<f32>::zeros(); vertices.len()];

    for n in 0..topology.triangle_count(indices.len()) {
        let [i0, i1, i2] = topology.triangle_indices(indices, n).map(|i| i as usize);
        let (Some(v0), Some(v1), Some(v2)) = (vertices.get(i0), vertices.get(i1), vertices.get(i2))
        else {
            continue;
        };

        let e1 = v1.position - v0.position;
        let e2 = v2.position - v0.position;
        let d1 = v1.uv - v0.uv;
        let d2 = v2.uv - v0.uv;

        let det = d1.x * d2.y - d2.x * d1.y;
        if det.abs() < f32::EPSILON {
            continue;
        }
        let tangent = (e1 * d2.y - e2 * d1.y) / det;

        for i in [i0, i1, i2] {
            accum[i] += tangent;
        }
    }

    for (vertex, t) in vertices.iter_mut().zip(accum) {
        // Gram-Schmidt
        let n = vertex.normal;
        let t = t - n * n.dot(&t);
        vertex.tangent = t.try_normalize(1e-8).unwrap_or_else(Vector3::zeros);
    }
}
