use crate::node::Node;

/// All candidates strictly closer than `radius` to `node`, excluding `node` itself.
///
/// Candidates are compared by id, so a copy of `node` inside the candidate set
/// is skipped as well. The area has no wrap-around.
pub fn within<'a, I>(node: &Node, candidates: I, radius: f64) -> Vec<&'a Node>
where
    I: IntoIterator<Item = &'a Node>,
{
    candidates
        .into_iter()
        .filter(|c| c.id() != node.id() && node.distance_to(c) < radius)
        .collect()
}

/// Distance from `node` to the closest candidate, or `None` if there is none.
pub fn nearest_distance<'a, I>(node: &Node, candidates: I) -> Option<f64>
where
    I: IntoIterator<Item = &'a Node>,
{
    candidates
        .into_iter()
        .filter(|c| c.id() != node.id())
        .map(|c| node.distance_to(c))
        .min_by(f64::total_cmp)
}
