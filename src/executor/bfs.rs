//! Bidirectional BFS shortest-path operator
//!
//! Each tick consumes one layer of out-neighbors on the left side and one
//! layer of in-neighbors on the right side, publishes the next frontier
//! back to the variable table, and emits fully reconstructed shortest
//! paths once the two sides meet. The two sides share one expansion
//! implementation parameterised by [`Side`]; right-side discoveries store
//! their edge metadata in forward orientation so reconstruction needs no
//! inversion.

mod path;

use std::collections::{BTreeMap, HashMap};

use tracing::debug;

use super::Status;
use crate::context::ExecutionContext;
use crate::error::{PathloomError, Result};
use crate::value::{DataSet, Path, Value, Vid, COL_EDGE_PREFIX, COL_VID};

/// Configuration for [`BfsShortestPathOperator`]
#[derive(Debug, Clone)]
pub struct BfsOptions {
    /// Variable holding the left frontier's out-neighbors
    pub left_input_var: String,
    /// Variable holding the right frontier's in-neighbors
    pub right_input_var: String,
    /// Seed / next-frontier variable for the left side
    pub left_vid_var: String,
    /// Seed / next-frontier variable for the right side
    pub right_vid_var: String,
    /// Variable the finished path dataset is written to
    pub output_var: String,
    /// Maximum total path length (left depth + right depth)
    pub step_bound: i64,
    /// Label applied to reconstructed steps
    pub edge_name: String,
    /// Column names of the output dataset
    pub col_names: Vec<String>,
}

impl BfsOptions {
    pub fn new(output_var: impl Into<String>, step_bound: i64) -> Self {
        BfsOptions {
            left_input_var: "leftGNInput".to_string(),
            right_input_var: "rightGNInput".to_string(),
            left_vid_var: "leftVid".to_string(),
            right_vid_var: "rightVid".to_string(),
            output_var: output_var.into(),
            step_bound,
            edge_name: "edge".to_string(),
            col_names: vec!["path".to_string()],
        }
    }

    fn validate(&self) -> Result<()> {
        if self.step_bound <= 0 {
            return Err(PathloomError::Bounds(self.step_bound));
        }
        Ok(())
    }
}

/// Which frontier an expansion step works on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

/// Discovery record: the predecessor one depth closer to the seeds, plus
/// the forward-oriented edge metadata used to reach the vertex
#[derive(Debug, Clone, PartialEq, Eq)]
struct BackEdge {
    pred: Vid,
    edge_type: i64,
    rank: i64,
}

/// One side's discovery history.
///
/// `layers[d]` maps each vertex first reached at depth d to its back-edges;
/// every predecessor lives at depth d - 1, so the structure is acyclic by
/// construction. `depth_of` enforces the BFS invariant that a vertex is
/// never re-inserted at a later depth.
#[derive(Debug, Default)]
struct SideState {
    layers: Vec<HashMap<Vid, Vec<BackEdge>>>,
    depth_of: HashMap<Vid, usize>,
}

impl SideState {
    fn seed(&mut self, vids: Vec<Vid>) {
        self.layers.push(HashMap::new());
        for vid in vids {
            if self.depth_of.insert(vid.clone(), 0).is_none() {
                self.layers[0].insert(vid, Vec::new());
            }
        }
    }

    fn depth(&self, vid: &Vid) -> Option<usize> {
        self.depth_of.get(vid).copied()
    }

    fn reached(&self) -> usize {
        self.depth_of.len()
    }

    /// Record a discovery at `depth`. Vertices already reached at an
    /// earlier depth are ignored; at the same depth back-edges merge.
    /// Returns true when the vertex is new to this side.
    fn record(&mut self, depth: usize, vid: Vid, back: BackEdge) -> bool {
        while self.layers.len() <= depth {
            self.layers.push(HashMap::new());
        }
        match self.depth_of.get(&vid) {
            Some(&d) if d == depth => {
                let backs = self.layers[depth].entry(vid).or_default();
                if !backs.contains(&back) {
                    backs.push(back);
                }
                false
            }
            Some(_) => false,
            None => {
                self.depth_of.insert(vid.clone(), depth);
                self.layers[depth].entry(vid).or_default().push(back);
                true
            }
        }
    }
}

/// An edge triple parsed out of a neighbor dataset row
#[derive(Debug)]
struct EdgeTriple {
    edge_type: i64,
    dst: Vid,
    rank: i64,
}

/// Bidirectional BFS between two seed vertex sets.
///
/// Seeds are read from the frontier variables on the first tick; every
/// expansion tick consumes the neighbor inputs written by the upstream
/// stages and publishes the next frontier for them. Once the sides meet,
/// all shortest paths are written to the output variable and the operator
/// completes; further ticks are no-ops.
#[derive(Debug)]
pub struct BfsShortestPathOperator {
    opts: BfsOptions,
    step: usize,
    finished: bool,
    left: SideState,
    right: SideState,
    meeting: Vec<Vid>,
}

impl BfsShortestPathOperator {
    pub fn new(opts: BfsOptions) -> Self {
        BfsShortestPathOperator {
            opts,
            step: 0,
            finished: false,
            left: SideState::default(),
            right: SideState::default(),
            meeting: Vec::new(),
        }
    }

    pub fn options(&self) -> &BfsOptions {
        &self.opts
    }

    pub fn finished(&self) -> bool {
        self.finished
    }

    /// Meeting vertices of the tick that completed the search (sorted)
    pub fn meeting(&self) -> &[Vid] {
        &self.meeting
    }

    /// Discard frontier state, returning the operator to its pre-first-tick
    /// state. Used when the surrounding query is cancelled between ticks.
    pub fn reset(&mut self) {
        self.step = 0;
        self.finished = false;
        self.left = SideState::default();
        self.right = SideState::default();
        self.meeting.clear();
    }

    #[tracing::instrument(skip(self, ctx), fields(step = self.step, bound = self.opts.step_bound))]
    pub async fn execute(&mut self, ctx: &mut ExecutionContext) -> Result<Status> {
        if self.finished {
            return Ok(Status::Finished);
        }
        self.opts.validate()?;

        if self.step == 0 {
            self.seed_sides(ctx)?;
            let meets = self.meeting_at_depth_zero();
            if !meets.is_empty() {
                return self.complete_with_paths(ctx, meets);
            }
        }

        self.step += 1;
        let depth = self.step;
        let new_left = self.expand_side(ctx, Side::Left, depth)?;
        let new_right = self.expand_side(ctx, Side::Right, depth)?;
        self.publish_frontier(ctx, &new_left, &new_right);
        debug!(
            left = new_left.len(),
            right = new_right.len(),
            "expanded one layer per side"
        );

        let meets = self.collect_meetings(&new_left, &new_right);
        if !meets.is_empty() {
            return self.complete_with_paths(ctx, meets);
        }
        let exhausted = new_left.is_empty() && new_right.is_empty();
        if 2 * depth as i64 >= self.opts.step_bound || exhausted {
            return self.complete_empty(ctx);
        }
        Ok(Status::Running)
    }

    fn seed_sides(&mut self, ctx: &ExecutionContext) -> Result<()> {
        let left = read_vid_column(ctx, &self.opts.left_vid_var)?;
        let right = read_vid_column(ctx, &self.opts.right_vid_var)?;
        self.left.seed(left);
        self.right.seed(right);
        debug!(
            left = self.left.reached(),
            right = self.right.reached(),
            "seeded"
        );
        Ok(())
    }

    fn meeting_at_depth_zero(&self) -> Vec<Vid> {
        let Some(layer) = self.left.layers.first() else {
            return Vec::new();
        };
        let mut meets: Vec<Vid> = layer
            .keys()
            .filter(|vid| self.right.depth(vid) == Some(0))
            .cloned()
            .collect();
        meets.sort();
        meets
    }

    /// Consume one side's neighbor input, recording discoveries at `depth`.
    /// Returns the vertices new to that side, sorted.
    fn expand_side(&mut self, ctx: &ExecutionContext, side: Side, depth: usize) -> Result<Vec<Vid>> {
        let var = match side {
            Side::Left => self.opts.left_input_var.clone(),
            Side::Right => self.opts.right_input_var.clone(),
        };
        let rows = read_neighbor_rows(ctx, &var)?;
        let state = match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        };

        let mut added: Vec<Vid> = Vec::new();
        for (src, edges) in rows {
            if state.depth(&src) != Some(depth - 1) {
                return Err(PathloomError::bad_shape(
                    var.as_str(),
                    format!("row for {src}, which is not on the current frontier"),
                ));
            }
            for edge in edges {
                if !edge_matches_side(edge.edge_type, side) {
                    continue;
                }
                let back = BackEdge {
                    pred: src.clone(),
                    edge_type: edge.edge_type.abs(),
                    rank: edge.rank,
                };
                if state.record(depth, edge.dst.clone(), back) {
                    added.push(edge.dst);
                }
            }
        }
        added.sort();
        Ok(added)
    }

    fn publish_frontier(&self, ctx: &mut ExecutionContext, new_left: &[Vid], new_right: &[Vid]) {
        ctx.set(
            self.opts.left_vid_var.clone(),
            Value::DataSet(vid_dataset(new_left)),
        );
        ctx.set(
            self.opts.right_vid_var.clone(),
            Value::DataSet(vid_dataset(new_right)),
        );
    }

    /// Vertices newly reached this tick that the other side has reached at
    /// any depth, filtered to the minimal total length. The sides may meet
    /// at unequal depths, which is how odd-length paths are found.
    fn collect_meetings(&self, new_left: &[Vid], new_right: &[Vid]) -> Vec<Vid> {
        let mut meets: BTreeMap<Vid, usize> = BTreeMap::new();
        for vid in new_left.iter().chain(new_right) {
            if let (Some(dl), Some(dr)) = (self.left.depth(vid), self.right.depth(vid)) {
                meets.entry(vid.clone()).or_insert(dl + dr);
            }
        }
        let Some(&min_len) = meets.values().min() else {
            return Vec::new();
        };
        meets
            .into_iter()
            .filter(|(_, len)| *len == min_len)
            .map(|(vid, _)| vid)
            .collect()
    }

    fn total_length(&self, vid: &Vid) -> Result<usize> {
        let dl = self
            .left
            .depth(vid)
            .ok_or_else(|| PathloomError::internal(format!("meeting vertex {vid} missing on the left side")))?;
        let dr = self
            .right
            .depth(vid)
            .ok_or_else(|| PathloomError::internal(format!("meeting vertex {vid} missing on the right side")))?;
        Ok(dl + dr)
    }

    fn complete_with_paths(&mut self, ctx: &mut ExecutionContext, meets: Vec<Vid>) -> Result<Status> {
        let Some(first) = meets.first() else {
            return self.complete_empty(ctx);
        };
        let total = self.total_length(first)?;
        self.meeting = meets;
        let paths = if total as i64 <= self.opts.step_bound {
            path::build_paths(&self.left, &self.right, &self.meeting, &self.opts.edge_name)?
        } else {
            Vec::new()
        };
        debug!(
            paths = paths.len(),
            total_length = total,
            meets = self.meeting.len(),
            "frontiers met"
        );
        self.write_output(ctx, paths);
        self.finished = true;
        Ok(Status::Finished)
    }

    fn complete_empty(&mut self, ctx: &mut ExecutionContext) -> Result<Status> {
        debug!(step = self.step, "search exhausted without meeting");
        self.write_output(ctx, Vec::new());
        self.finished = true;
        Ok(Status::Finished)
    }

    fn write_output(&self, ctx: &mut ExecutionContext, paths: Vec<Path>) {
        let mut ds = DataSet::new(self.opts.col_names.clone());
        for p in paths {
            ds.push_row(vec![Value::Path(p)]);
        }
        ctx.set(self.opts.output_var.clone(), Value::DataSet(ds));
    }
}

fn edge_matches_side(edge_type: i64, side: Side) -> bool {
    match side {
        Side::Left => edge_type > 0,
        Side::Right => edge_type < 0,
    }
}

fn vid_dataset(vids: &[Vid]) -> DataSet {
    let mut ds = DataSet::new([COL_VID]);
    for vid in vids {
        ds.push_row(vec![Value::from(vid.clone())]);
    }
    ds
}

fn read_vid_column(ctx: &ExecutionContext, var: &str) -> Result<Vec<Vid>> {
    let value = ctx.get_required(var)?;
    let ds = value
        .as_dataset()
        .ok_or_else(|| PathloomError::bad_shape(var, "expected a dataset"))?;
    let col = ds
        .column_index(COL_VID)
        .ok_or_else(|| PathloomError::bad_shape(var, "missing `_vid` column"))?;
    let mut vids = Vec::with_capacity(ds.len());
    for row in &ds.rows {
        let cell = row
            .get(col)
            .ok_or_else(|| PathloomError::bad_shape(var, "row shorter than header"))?;
        vids.push(Vid::try_from(cell)?);
    }
    Ok(vids)
}

fn read_neighbor_rows(ctx: &ExecutionContext, var: &str) -> Result<Vec<(Vid, Vec<EdgeTriple>)>> {
    let value = ctx.get_required(var)?;
    let ds = value
        .as_dataset()
        .ok_or_else(|| PathloomError::bad_shape(var, "expected a dataset"))?;
    let vid_col = ds
        .column_index(COL_VID)
        .ok_or_else(|| PathloomError::bad_shape(var, "missing `_vid` column"))?;
    let edge_col = ds
        .column_index_by_prefix(COL_EDGE_PREFIX)
        .ok_or_else(|| PathloomError::bad_shape(var, "missing `_edge:` column"))?;

    let mut rows = Vec::with_capacity(ds.len());
    for row in &ds.rows {
        let vid_cell = row
            .get(vid_col)
            .ok_or_else(|| PathloomError::bad_shape(var, "row shorter than header"))?;
        let edge_cell = row
            .get(edge_col)
            .ok_or_else(|| PathloomError::bad_shape(var, "row shorter than header"))?;
        rows.push((Vid::try_from(vid_cell)?, parse_edge_list(var, edge_cell)?));
    }
    Ok(rows)
}

fn parse_edge_list(var: &str, cell: &Value) -> Result<Vec<EdgeTriple>> {
    let items = match cell {
        // no edges for this row
        Value::Null => return Ok(Vec::new()),
        Value::List(items) => items,
        _ => return Err(PathloomError::bad_shape(var, "edge column is not a list")),
    };
    items.iter().map(|item| parse_edge(var, item)).collect()
}

fn parse_edge(var: &str, item: &Value) -> Result<EdgeTriple> {
    let triple = item
        .as_list()
        .ok_or_else(|| PathloomError::bad_shape(var, "edge entry is not a list"))?;
    let [etype, dst, rank] = triple else {
        return Err(PathloomError::bad_shape(
            var,
            "edge entry must be a [type, dst, rank] triple",
        ));
    };
    let edge_type = etype
        .as_int()
        .ok_or_else(|| PathloomError::bad_shape(var, "edge type is not an integer"))?;
    let rank = rank
        .as_int()
        .ok_or_else(|| PathloomError::bad_shape(var, "edge rank is not an integer"))?;
    Ok(EdgeTriple {
        edge_type,
        dst: Vid::try_from(dst)?,
        rank,
    })
}
