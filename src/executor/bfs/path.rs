//! Shortest-path reconstruction over the per-side discovery history
//!
//! Each side's back-edges form a DAG whose links go strictly from depth d
//! to depth d - 1, so a depth-first walk terminates without cycle checks.
//! Left partials run seed → meeting vertex; right partials run meeting
//! vertex → seed and are already forward-oriented. Full paths are the
//! concatenated Cartesian product, deduplicated through a set.

use std::collections::BTreeSet;

use super::{BackEdge, SideState};
use crate::error::{PathloomError, Result};
use crate::value::{Path, Step, Vertex, Vid};

pub(super) fn build_paths(
    left: &SideState,
    right: &SideState,
    meets: &[Vid],
    edge_name: &str,
) -> Result<Vec<Path>> {
    let mut out: BTreeSet<Path> = BTreeSet::new();
    for m in meets {
        let dl = left
            .depth(m)
            .ok_or_else(|| PathloomError::internal(format!("meeting vertex {m} missing on the left side")))?;
        let dr = right
            .depth(m)
            .ok_or_else(|| PathloomError::internal(format!("meeting vertex {m} missing on the right side")))?;
        let lefts = left_partials(left, m, dl, edge_name)?;
        let rights = right_partials(right, m, dr, edge_name)?;
        for lp in &lefts {
            for rp in &rights {
                let mut path = lp.clone();
                path.steps.extend(rp.iter().cloned());
                out.insert(path);
            }
        }
    }
    Ok(out.into_iter().collect())
}

fn back_edges<'a>(side: &'a SideState, vid: &Vid, depth: usize) -> Result<&'a [BackEdge]> {
    let layer = side
        .layers
        .get(depth)
        .ok_or_else(|| PathloomError::internal(format!("no layer at depth {depth}")))?;
    let backs = layer
        .get(vid)
        .ok_or_else(|| PathloomError::internal(format!("vertex {vid} missing from its layer")))?;
    if backs.is_empty() {
        return Err(PathloomError::internal(format!(
            "vertex {vid} has no predecessors at depth {depth}"
        )));
    }
    Ok(backs)
}

/// All seed → … → `vid` paths, built back-to-front through the DAG
fn left_partials(side: &SideState, vid: &Vid, depth: usize, edge_name: &str) -> Result<Vec<Path>> {
    if depth == 0 {
        return Ok(vec![Path::new(Vertex::new(vid.clone()))]);
    }
    let mut out = Vec::new();
    for back in back_edges(side, vid, depth)? {
        let step = make_step(vid.clone(), back, edge_name);
        for mut partial in left_partials(side, &back.pred, depth - 1, edge_name)? {
            partial.steps.push(step.clone());
            out.push(partial);
        }
    }
    Ok(out)
}

/// All `vid` → … → seed step chains. Each back-edge points one depth
/// closer to the seeds and already carries the forward edge direction.
fn right_partials(
    side: &SideState,
    vid: &Vid,
    depth: usize,
    edge_name: &str,
) -> Result<Vec<Vec<Step>>> {
    if depth == 0 {
        return Ok(vec![Vec::new()]);
    }
    let mut out = Vec::new();
    for back in back_edges(side, vid, depth)? {
        let step = make_step(back.pred.clone(), back, edge_name);
        for mut chain in right_partials(side, &back.pred, depth - 1, edge_name)? {
            chain.insert(0, step.clone());
            out.push(chain);
        }
    }
    Ok(out)
}

fn make_step(dst: Vid, back: &BackEdge, edge_name: &str) -> Step {
    Step {
        dst: Vertex::new(dst),
        edge_type: back.edge_type,
        name: edge_name.to_string(),
        rank: back.rank,
        props: Default::default(),
    }
}
