//! Pairwise non-penetration collision resolver.
//!
//! Reference O(N²) pass: every unordered pair `(i, k)` with `i < k` is
//! tested once, in ascending index order. Overlapping pairs are pushed
//! apart along the center-to-center normal, scaled by the response
//! coefficient and, optionally, split by radius-proportional mass ratios
//! (the larger particle moves less).
//!
//! After one pass the total penetration depth never increases; repeated
//! sub-steps drive it toward zero.

use crate::simulation::states::{NVec2, Particle};

/// Resolve all pairwise overlaps once.
///
/// `response_coef` scales the positional correction (1.0 separates a pair
/// fully in a single pass, lower values damp the response). With
/// `mass_weighted` the correction is split `r_k/(r_i+r_k)` to particle `i`
/// and `r_i/(r_i+r_k)` to particle `k`; otherwise both sides get the full
/// half-correction.
pub fn resolve(particles: &mut [Particle], response_coef: f32, mass_weighted: bool) {
    let count = particles.len();
    for i in 0..count {
        let (head, tail) = particles.split_at_mut(i + 1);
        let p1 = &mut head[i];
        for p2 in tail.iter_mut() {
            let v = p1.position - p2.position;
            let dist2 = v.x * v.x + v.y * v.y;
            let min_dist = p1.radius + p2.radius;
            if dist2 >= min_dist * min_dist {
                continue;
            }
            let (n, dist) = if dist2 > 0.0 {
                let dist = dist2.sqrt();
                (v / dist, dist)
            } else {
                // Coincident centers: canonical normal, full penetration
                (NVec2::new(1.0, 0.0), 0.0)
            };
            let (w1, w2) = if mass_weighted {
                (p2.radius / min_dist, p1.radius / min_dist)
            } else {
                (1.0, 1.0)
            };
            let delta = 0.5 * response_coef * (dist - min_dist);
            p1.position -= n * (w1 * delta);
            p2.position += n * (w2 * delta);
        }
    }
}
