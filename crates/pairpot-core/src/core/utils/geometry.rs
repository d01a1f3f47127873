use nalgebra::{Point3, Vector3};

/// Separation `pos_i - pos_j` and its length, floored by `min_distance_sq`.
///
/// The floor is added to `|d|²` before the square root so that coincident
/// atoms yield a tiny positive distance instead of a division by zero.
#[inline]
pub fn separation(
    pos_i: &Point3<f64>,
    pos_j: &Point3<f64>,
    min_distance_sq: f64,
) -> (Vector3<f64>, f64) {
    let d = pos_i - pos_j;
    let r = guarded_distance(&d, min_distance_sq);
    (d, r)
}

#[inline]
pub fn guarded_distance(d: &Vector3<f64>, min_distance_sq: f64) -> f64 {
    (d.norm_squared() + min_distance_sq).sqrt()
}

pub fn flatten_vectors(vectors: &[Vector3<f64>]) -> Vec<f64> {
    vectors.iter().flat_map(|v| [v.x, v.y, v.z]).collect()
}
