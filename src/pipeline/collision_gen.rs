use crate::math::{Point, Real};
use crate::pipeline::{
    CollisionGenSettings, CollisionTechnique, ConvexDecomposer, GenerationReport, InputOutcome,
    SkipReason, VhacdDecomposer,
};
use crate::repair::{repair_mesh, repair_to_solid, RepairParameters};
use crate::shape::Mesh;
use crate::transformation::{
    exact_convex_decomposition, simplify_hull, try_convex_hull, ConvexHullError,
    DecompositionError,
};
#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// The registry of the meshes feeding the collision generation.
///
/// The registry borrows the input meshes: they must outlive it, and cannot be
/// modified while they are registered. Every generation works on the set of
/// meshes registered when it is called, and returns new meshes owned by the
/// caller.
#[derive(Clone, Debug, Default)]
pub struct CollisionGen<'a> {
    inputs: Vec<&'a Mesh>,
    repair_params: RepairParameters,
}

impl<'a> CollisionGen<'a> {
    /// Creates an empty registry with the default repair parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty registry with the given repair parameters.
    pub fn with_repair_parameters(repair_params: RepairParameters) -> Self {
        Self {
            inputs: Vec::new(),
            repair_params,
        }
    }

    /// The parameters used to repair the inputs of the decomposition techniques.
    pub fn repair_parameters(&self) -> &RepairParameters {
        &self.repair_params
    }

    /// Registers a new input mesh.
    pub fn add_input_mesh(&mut self, mesh: &'a Mesh) {
        self.inputs.push(mesh);
    }

    /// Unregisters all the input meshes.
    pub fn clear_input_meshes(&mut self) {
        self.inputs.clear();
    }

    /// The registered input meshes.
    pub fn input_meshes(&self) -> &[&'a Mesh] {
        &self.inputs
    }

    /// The vertices of every input mesh, pushed outward by `padding`.
    ///
    /// Each vertex is moved along the direction from the bounding sphere center
    /// of its mesh by `padding` times the bounding sphere diameter. With a zero
    /// padding, the vertices are returned unmodified.
    pub fn input_points(&self, padding: Real) -> Vec<Point<Real>> {
        let mut points = Vec::with_capacity(self.inputs.iter().map(|m| m.num_vertices()).sum());

        for mesh in &self.inputs {
            if padding == 0.0 {
                points.extend_from_slice(mesh.vertices());
                continue;
            }

            let sphere = mesh.bounding_sphere();
            let shift = padding * sphere.diameter();

            points.extend(mesh.vertices().iter().map(|pt| {
                match (pt - sphere.center()).try_normalize(Real::EPSILON) {
                    Some(dir) => pt + dir * shift,
                    None => *pt,
                }
            }));
        }

        points
    }

    /// Computes the convex hull of the (padded) points of all the inputs.
    ///
    /// Fails if the inputs have less than four points, or if they are all coplanar.
    pub fn generate_simple_hull(
        &self,
        settings: &CollisionGenSettings,
    ) -> Result<Mesh, ConvexHullError> {
        let points = self.input_points(settings.padding);
        let (vertices, triangles) = try_convex_hull(&points)?;
        let hull = scaled(Mesh::from_trusted_parts(vertices, &triangles), settings.scale);

        log::info!(
            "Simple hull generated from {} points: {} vertices, {} triangles.",
            points.len(),
            hull.num_vertices(),
            hull.num_triangles()
        );

        Ok(hull)
    }

    /// Decomposes every repaired input into exact convex cells.
    pub fn generate_exact_decomposition(&self, settings: &CollisionGenSettings) -> GenerationReport {
        let results = self.map_inputs(|mesh| {
            let solid = repair_to_solid(mesh, &self.repair_params)?;
            let cells = exact_convex_decomposition(&solid)?;
            Ok(cells.iter().map(|cell| cell.to_mesh()).collect())
        });

        let report = collect_report(results, settings);
        log::info!(
            "Exact convex decomposition generated {} hulls ({} inputs skipped).",
            report.hulls.len(),
            report.num_skipped()
        );
        report
    }

    /// Decomposes every repaired input with the VHACD approximate convex decomposition.
    pub fn generate_approximate_decomposition(
        &self,
        settings: &CollisionGenSettings,
    ) -> GenerationReport {
        self.generate_approximate_decomposition_with(&VhacdDecomposer::default(), settings)
    }

    /// Decomposes every repaired input with the given approximate convex decomposition.
    ///
    /// Every hull is simplified to at most `settings.max_hull_vertices` vertices
    /// (but at least 4). An input decomposed into more than `settings.max_hulls`
    /// hulls is skipped.
    pub fn generate_approximate_decomposition_with(
        &self,
        decomposer: &impl ConvexDecomposer,
        settings: &CollisionGenSettings,
    ) -> GenerationReport {
        let results = self.map_inputs(|mesh| {
            let repaired = repair_mesh(mesh, &self.repair_params)?;
            let triangles = repaired.triangle_indices();
            let hulls = decomposer.decompose(repaired.vertices(), &triangles, settings)?;

            let max_hulls = settings.max_hulls as usize;
            if hulls.len() > max_hulls {
                return Err(DecompositionError::TooManyHulls {
                    num_hulls: hulls.len(),
                    max_hulls,
                }
                .into());
            }

            let mut meshes = Vec::with_capacity(hulls.len());
            for points in &hulls {
                let (vertices, triangles) =
                    simplify_hull(points, settings.max_hull_vertices as usize)
                        .map_err(DecompositionError::from)?;
                meshes.push(Mesh::from_trusted_parts(vertices, &triangles));
            }

            Ok(meshes)
        });

        let report = collect_report(results, settings);
        log::info!(
            "Approximate convex decomposition generated {} hulls ({} inputs skipped).",
            report.hulls.len(),
            report.num_skipped()
        );
        report
    }

    /// Generates collision hulls with the given technique.
    ///
    /// The simple hull is reported as generated by every input, or as skipped
    /// by every input if it could not be computed.
    pub fn generate(
        &self,
        technique: CollisionTechnique,
        settings: &CollisionGenSettings,
    ) -> GenerationReport {
        match technique {
            CollisionTechnique::SimpleHull => match self.generate_simple_hull(settings) {
                Ok(hull) => GenerationReport {
                    hulls: vec![hull],
                    outcomes: (0..self.inputs.len())
                        .map(|input| InputOutcome::Generated {
                            input,
                            num_hulls: 1,
                        })
                        .collect(),
                },
                Err(err) => {
                    log::warn!("Simple hull generation failed: {}", err);
                    GenerationReport {
                        hulls: Vec::new(),
                        outcomes: (0..self.inputs.len())
                            .map(|input| InputOutcome::Skipped {
                                input,
                                reason: SkipReason::ConvexHull(err.clone()),
                            })
                            .collect(),
                    }
                }
            },
            CollisionTechnique::ExactDecomposition => self.generate_exact_decomposition(settings),
            CollisionTechnique::ApproximateDecomposition => {
                self.generate_approximate_decomposition(settings)
            }
        }
    }

    // Runs `f` on every input, in parallel if enabled. The results are in input order.
    fn map_inputs<F>(&self, f: F) -> Vec<Result<Vec<Mesh>, SkipReason>>
    where
        F: Fn(&Mesh) -> Result<Vec<Mesh>, SkipReason> + Send + Sync,
    {
        #[cfg(feature = "parallel")]
        let results = self.inputs.par_iter().map(|mesh| f(*mesh)).collect();
        #[cfg(not(feature = "parallel"))]
        let results = self.inputs.iter().map(|mesh| f(*mesh)).collect();

        results
    }
}

fn scaled(mesh: Mesh, scale: Real) -> Mesh {
    if scale == 1.0 {
        mesh
    } else {
        let center = *mesh.bounding_sphere().center();
        mesh.scaled_about(&center, scale)
    }
}

fn collect_report(
    results: Vec<Result<Vec<Mesh>, SkipReason>>,
    settings: &CollisionGenSettings,
) -> GenerationReport {
    let mut report = GenerationReport::default();

    for (input, result) in results.into_iter().enumerate() {
        match result {
            Ok(hulls) => {
                log::debug!("Input mesh {} generated {} hulls.", input, hulls.len());
                report.outcomes.push(InputOutcome::Generated {
                    input,
                    num_hulls: hulls.len(),
                });
                report
                    .hulls
                    .extend(hulls.into_iter().map(|hull| scaled(hull, settings.scale)));
            }
            Err(reason) => {
                log::warn!("Skipping input mesh {}: {}", input, reason);
                report.outcomes.push(InputOutcome::Skipped { input, reason });
            }
        }
    }

    report
}
