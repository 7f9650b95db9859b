use crate::bounding_volume::BoundingSphere;
use crate::math::{Point, Real, Vector};

/// Indicates an inconsistency while building a [`Mesh`].
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq, Eq)]
pub enum MeshError {
    /// The length of the index buffer is not a multiple of 3.
    #[error("the index buffer length {0} is not a multiple of 3.")]
    IndicesNotTriangles(usize),
    /// A triangle references a vertex that does not exist.
    #[error("the triangle {triangle} references the vertex {index} but the mesh only has {num_vertices} vertices.")]
    IndexOutOfBounds {
        /// The triangle referencing the missing vertex.
        triangle: u32,
        /// The out-of-bounds vertex index.
        index: u32,
        /// The number of vertices of the mesh.
        num_vertices: u32,
    },
}

/// A triangle soup with derived per-vertex normals and bounding sphere.
///
/// A `Mesh` owns its data: it is always built from copies of (or moved) vertex
/// and index buffers, and its index buffer is validated at construction. The
/// collision generation pipeline never mutates a `Mesh` in place and always
/// outputs new instances.
///
/// The derived data (normals and bounding sphere) is not invalidated
/// automatically. After mutating the vertices through [`Mesh::vertices_mut`],
/// call [`Mesh::compute_bounds`] and [`Mesh::generate_normals`] again.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct Mesh {
    vertices: Vec<Point<Real>>,
    indices: Vec<u32>,
    normals: Vec<Vector<Real>>,
    bounding_sphere: BoundingSphere,
}

impl Mesh {
    /// Creates a new mesh from its vertex buffer and flat index buffer.
    ///
    /// Fails if `indices.len()` is not a multiple of 3 or if any index is out of
    /// bounds. The bounding sphere is computed immediately, the normals are not
    /// (see [`Mesh::generate_normals`]).
    pub fn new(vertices: Vec<Point<Real>>, indices: Vec<u32>) -> Result<Self, MeshError> {
        if indices.len() % 3 != 0 {
            return Err(MeshError::IndicesNotTriangles(indices.len()));
        }

        let num_vertices = vertices.len() as u32;
        if let Some(pos) = indices.iter().position(|i| *i >= num_vertices) {
            return Err(MeshError::IndexOutOfBounds {
                triangle: (pos / 3) as u32,
                index: indices[pos],
                num_vertices,
            });
        }

        let mut result = Mesh {
            vertices,
            indices,
            normals: Vec::new(),
            bounding_sphere: BoundingSphere::default(),
        };
        result.compute_bounds();
        Ok(result)
    }

    /// Creates a new mesh from its vertex buffer and a triangle index buffer.
    pub fn from_triangles(
        vertices: Vec<Point<Real>>,
        triangles: &[[u32; 3]],
    ) -> Result<Self, MeshError> {
        let indices = triangles.iter().flatten().copied().collect();
        Self::new(vertices, indices)
    }

    /// Creates a new mesh by copying the given vertex and index buffers.
    pub fn from_slices(vertices: &[Point<Real>], indices: &[u32]) -> Result<Self, MeshError> {
        Self::new(vertices.to_vec(), indices.to_vec())
    }

    // The caller guarantees that every index is in bounds.
    pub(crate) fn from_trusted_parts(vertices: Vec<Point<Real>>, triangles: &[[u32; 3]]) -> Self {
        Mesh {
            vertices,
            indices: triangles.iter().flatten().copied().collect(),
            normals: Vec::new(),
            bounding_sphere: BoundingSphere::default(),
        }
        .with_derived_data()
    }

    /// Computes the normals and the bounding sphere of this mesh, and returns it.
    #[must_use]
    pub fn with_derived_data(mut self) -> Self {
        self.generate_normals();
        self.compute_bounds();
        self
    }

    /// Recomputes the per-vertex normals.
    ///
    /// Each vertex normal is the normalized sum of the (non-normalized) normals
    /// of its adjacent triangles, so larger triangles weight more. Vertices not
    /// referenced by any triangle, or with a degenerate neighborhood, get a zero
    /// normal.
    pub fn generate_normals(&mut self) {
        let mut normals = vec![Vector::zeros(); self.vertices.len()];

        for tri in self.triangles() {
            let a = self.vertices[tri[0] as usize];
            let b = self.vertices[tri[1] as usize];
            let c = self.vertices[tri[2] as usize];
            let n = (b - a).cross(&(c - a));

            for i in tri {
                normals[i as usize] += n;
            }
        }

        for n in &mut normals {
            let _ = n.try_normalize_mut(Real::EPSILON);
        }

        self.normals = normals;
    }

    /// Recomputes the bounding sphere of this mesh.
    pub fn compute_bounds(&mut self) {
        self.bounding_sphere = BoundingSphere::from_points(&self.vertices);
    }

    /// The vertex buffer of this mesh.
    #[inline]
    pub fn vertices(&self) -> &[Point<Real>] {
        &self.vertices
    }

    /// A mutable reference to the vertex buffer of this mesh.
    ///
    /// The derived data is not updated automatically.
    #[inline]
    pub fn vertices_mut(&mut self) -> &mut [Point<Real>] {
        &mut self.vertices
    }

    /// The flat index buffer of this mesh.
    #[inline]
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// An iterator through the vertex indices of every triangle of this mesh.
    pub fn triangles(&self) -> impl ExactSizeIterator<Item = [u32; 3]> + '_ {
        self.indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }

    /// The vertex indices of every triangle of this mesh.
    pub fn triangle_indices(&self) -> Vec<[u32; 3]> {
        self.triangles().collect()
    }

    /// The per-vertex normals of this mesh.
    ///
    /// Empty until [`Mesh::generate_normals`] is called.
    #[inline]
    pub fn normals(&self) -> &[Vector<Real>] {
        &self.normals
    }

    /// The bounding sphere of this mesh, as of the last call to [`Mesh::compute_bounds`].
    #[inline]
    pub fn bounding_sphere(&self) -> &BoundingSphere {
        &self.bounding_sphere
    }

    /// The number of vertices of this mesh.
    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// The number of triangles of this mesh.
    #[inline]
    pub fn num_triangles(&self) -> usize {
        self.indices.len() / 3
    }

    /// Does this mesh have no triangle?
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// The signed volume enclosed by this mesh.
    ///
    /// Only meaningful for closed meshes. It is positive if the triangles are
    /// wound counter-clockwise when seen from outside.
    pub fn volume(&self) -> Real {
        let mut volume = 0.0;

        for tri in self.triangles() {
            let a = self.vertices[tri[0] as usize].coords;
            let b = self.vertices[tri[1] as usize].coords;
            let c = self.vertices[tri[2] as usize].coords;
            volume += a.dot(&b.cross(&c));
        }

        volume / 6.0
    }

    /// Returns a copy of this mesh uniformly scaled by `scale` around `center`.
    pub fn scaled_about(&self, center: &Point<Real>, scale: Real) -> Mesh {
        let vertices = self
            .vertices
            .iter()
            .map(|pt| center + (pt - center) * scale)
            .collect();
        let mut result = Mesh {
            vertices,
            indices: self.indices.clone(),
            normals: Vec::new(),
            bounding_sphere: BoundingSphere::default(),
        };

        if !self.normals.is_empty() {
            result.generate_normals();
        }
        result.compute_bounds();
        result
    }
}
