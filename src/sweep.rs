// polytess: sweep-line polygon tessellation
// License: MIT
//
// The sweep-line driver. Events (vertices) come off the priority queue
// in lexicographic (s, t) order; the dictionary holds the regions that
// currently intersect the sweep line, bracketed by two sentinel regions
// whose edges sit far above and below the input. Each event finishes
// the regions its left-going edges close off, inserts its right-going
// edges, and then repairs the neighborhood with the dirty-region work
// list until the dictionary ordering is consistent again.
//
// Numeric degeneracies are never errors here: coincident vertices are
// merged, misordered origins and destinations are spliced back into
// monotone position, and intersections computed behind the sweep line
// are clamped to the current event.

use tracing::trace;

use crate::dict::{self, Dict, NodeId};
use crate::geom::{
    edge_intersect, edge_sign, vert_eq, vert_l1_dist, vert_leq, Real,
};
use crate::mesh::{EdgeId, Mesh, VertId, E_HEAD, V_HEAD};
use crate::pool::{Pool, PoolId};
use crate::priorityq::{Handle, PriorityQ};
use crate::tess::Tessellator;

/// Handle to an active region in the tessellator's region pool.
pub type RegionId = PoolId;

/// The strip between two sweep-adjacent edges.
#[derive(Clone, Debug)]
pub struct ActiveRegion {
    /// Upper bounding edge, directed right to left.
    pub e_up: EdgeId,
    /// Dictionary node holding this region.
    pub node_up: NodeId,
    /// Winding number of the strip (left of `e_up`).
    pub winding_number: i32,
    /// Interior of the polygon, per the winding rule.
    pub inside: bool,
    /// Fake region bracketing the dictionary at t = ±infinity.
    pub sentinel: bool,
    /// An edge changed; intersection not re-checked yet.
    pub dirty: bool,
    /// `e_up` is a temporary stand-in added for a vertex with no
    /// right-going edges, to be replaced when a real edge arrives.
    pub fix_upper_edge: bool,
}

impl Default for ActiveRegion {
    fn default() -> Self {
        ActiveRegion {
            e_up: EdgeId::NONE,
            node_up: dict::HEAD,
            winding_number: 0,
            inside: false,
            sentinel: false,
            dirty: false,
            fix_upper_edge: false,
        }
    }
}

/// "Does r1's upper edge sit at or below r2's at the sweep position?"
///
/// Both edges must intersect the sweep line at `event`'s s-coordinate;
/// the answer is found by evaluating each edge at the event, with
/// slope comparisons breaking the tie when an edge ends exactly there.
fn edge_leq(
    mesh: &Mesh,
    regions: &Pool<ActiveRegion>,
    event: VertId,
    r1: RegionId,
    r2: RegionId,
) -> bool {
    let e1 = regions[r1].e_up;
    let e2 = regions[r2].e_up;
    let ev = mesh.st(event);

    if mesh.dst(e1) == event {
        if mesh.dst(e2) == event {
            // Both edges end at the event; sort by slope.
            if vert_leq(mesh.st(mesh[e1].org), mesh.st(mesh[e2].org)) {
                return edge_sign(
                    mesh.st(mesh.dst(e2)),
                    mesh.st(mesh[e1].org),
                    mesh.st(mesh[e2].org),
                ) <= 0.0;
            }
            return edge_sign(
                mesh.st(mesh.dst(e1)),
                mesh.st(mesh[e2].org),
                mesh.st(mesh[e1].org),
            ) >= 0.0;
        }
        return edge_sign(mesh.st(mesh.dst(e2)), ev, mesh.st(mesh[e2].org)) <= 0.0;
    }
    if mesh.dst(e2) == event {
        return edge_sign(mesh.st(mesh.dst(e1)), ev, mesh.st(mesh[e1].org)) >= 0.0;
    }

    let t1 = crate::geom::edge_eval(mesh.st(mesh.dst(e1)), ev, mesh.st(mesh[e1].org));
    let t2 = crate::geom::edge_eval(mesh.st(mesh.dst(e2)), ev, mesh.st(mesh[e2].org));
    t1 >= t2
}

/// Fold `src`'s winding contribution into `dst` (both directions).
fn add_winding(mesh: &mut Mesh, dst: EdgeId, src: EdgeId) {
    let w = mesh[src].winding;
    let ws = mesh[src.sym()].winding;
    mesh[dst].winding += w;
    mesh[dst.sym()].winding += ws;
}

impl Tessellator {
    // ──────────────────────── Region plumbing ────────────────────────

    fn region_above(&self, reg: RegionId) -> RegionId {
        self.dict.key(self.dict.succ(self.regions[reg].node_up))
    }

    fn region_below(&self, reg: RegionId) -> RegionId {
        self.dict.key(self.dict.pred(self.regions[reg].node_up))
    }

    fn dict_insert_before(&mut self, hint: NodeId, reg: RegionId) -> NodeId {
        let Tessellator {
            dict,
            mesh,
            regions,
            event,
            ..
        } = self;
        let (mesh, regions, ev) = (&*mesh, &*regions, *event);
        dict.insert_before(hint, reg, move |a, b| edge_leq(mesh, regions, ev, a, b))
    }

    /// Region containing the sweep position probed by `tmp_e_up`.
    fn dict_search(&mut self, tmp_e_up: EdgeId) -> RegionId {
        let tmp = self.regions.alloc();
        self.regions[tmp].e_up = tmp_e_up;

        let node = {
            let Tessellator {
                dict,
                mesh,
                regions,
                event,
                ..
            } = self;
            let (mesh, regions, ev) = (&*mesh, &*regions, *event);
            dict.search(tmp, move |a, b| edge_leq(mesh, regions, ev, a, b))
        };
        let key = self.dict.key(node);

        self.regions.free(tmp);
        key
    }

    fn pq_insert(&mut self, v: VertId) -> Handle {
        let Tessellator { pq, mesh, .. } = self;
        let mesh = &*mesh;
        pq.insert(v, &|a, b| vert_leq(mesh.st(a), mesh.st(b)))
    }

    fn pq_minimum(&self) -> VertId {
        self.pq.minimum()
    }

    fn pq_extract_min(&mut self) -> VertId {
        let Tessellator { pq, mesh, .. } = self;
        let mesh = &*mesh;
        pq.extract_min(&|a, b| vert_leq(mesh.st(a), mesh.st(b)))
    }

    fn pq_delete(&mut self, handle: Handle) {
        let Tessellator { pq, mesh, .. } = self;
        let mesh = &*mesh;
        pq.delete(handle, &|a, b| vert_leq(mesh.st(a), mesh.st(b)));
    }

    /// New region below `reg_above`, with the hint making the insertion
    /// scan O(1) in the common case.
    fn add_region_below(&mut self, reg_above: RegionId, e_new_up: EdgeId) -> RegionId {
        let reg_new = self.regions.alloc();
        self.regions[reg_new].e_up = e_new_up;

        let hint = self.regions[reg_above].node_up;
        let node = self.dict_insert_before(hint, reg_new);
        self.regions[reg_new].node_up = node;
        self.mesh[e_new_up].active_region = reg_new;
        reg_new
    }

    fn compute_winding(&mut self, reg: RegionId) {
        let above = self.region_above(reg);
        let e_up = self.regions[reg].e_up;
        let w = self.regions[above].winding_number + self.mesh[e_up].winding;
        let inside = self.winding_rule.is_inside(w);
        let r = &mut self.regions[reg];
        r.winding_number = w;
        r.inside = inside;
    }

    fn delete_region(&mut self, reg: RegionId) {
        if self.regions[reg].fix_upper_edge {
            // Temporary edges are created with zero winding and must not
            // have merged with a real edge in the meantime.
            debug_assert_eq!(self.mesh[self.regions[reg].e_up].winding, 0);
        }
        let e_up = self.regions[reg].e_up;
        self.mesh[e_up].active_region = RegionId::NONE;
        let node = self.regions[reg].node_up;
        self.dict.delete(node);
        self.regions.free(reg);
    }

    /// Replace a temporary upper edge with a real one.
    fn fix_upper_edge(&mut self, reg: RegionId, new_edge: EdgeId) {
        debug_assert!(self.regions[reg].fix_upper_edge);
        let old = self.regions[reg].e_up;
        self.mesh.delete_edge(old);

        let r = &mut self.regions[reg];
        r.fix_upper_edge = false;
        r.e_up = new_edge;
        self.mesh[new_edge].active_region = reg;
    }

    /// Region above the topmost dictionary edge sharing `reg`'s upper
    /// origin, fixing a temporary edge found on the way.
    fn top_left_region(&mut self, mut reg: RegionId) -> RegionId {
        let org = self.mesh[self.regions[reg].e_up].org;
        loop {
            reg = self.region_above(reg);
            if self.mesh[self.regions[reg].e_up].org != org {
                break;
            }
        }
        if self.regions[reg].fix_upper_edge {
            let below = self.region_below(reg);
            let below_sym = self.regions[below].e_up.sym();
            let lnext = self.mesh[self.regions[reg].e_up].lnext;
            let e = self.mesh.connect(below_sym, lnext);
            self.fix_upper_edge(reg, e);
            reg = self.region_above(reg);
        }
        reg
    }

    /// Region above the topmost dictionary edge sharing `reg`'s upper
    /// destination.
    fn top_right_region(&self, mut reg: RegionId) -> RegionId {
        let dst = self.mesh.dst(self.regions[reg].e_up);
        loop {
            reg = self.region_above(reg);
            if self.mesh.dst(self.regions[reg].e_up) != dst {
                break;
            }
        }
        reg
    }

    /// Mark the face left of the region's upper edge with the region's
    /// interior flag and retire the region.
    fn finish_region(&mut self, reg: RegionId) {
        let e = self.regions[reg].e_up;
        let f = self.mesh[e].lface;
        let inside = self.regions[reg].inside;
        self.mesh[f].inside = inside;
        // Anchoring the face here lets the monotone scan start at the
        // rightmost vertex without searching.
        self.mesh[f].an_edge = e;
        self.delete_region(reg);
    }

    /// Finish the chain of regions between `reg_first` and `reg_last`
    /// whose upper edges all end at the event, relinking the mesh so the
    /// left-going edges agree with the dictionary order. Pass
    /// `RegionId::NONE` as `reg_last` to finish to the bottom of the
    /// chain. Returns the bottommost left-going edge.
    fn finish_left_regions(&mut self, reg_first: RegionId, reg_last: RegionId) -> EdgeId {
        let mut reg_prev = reg_first;
        let mut e_prev = self.regions[reg_first].e_up;

        while reg_prev != reg_last {
            // Placement of this edge is final.
            self.regions[reg_prev].fix_upper_edge = false;
            let reg = self.region_below(reg_prev);
            let mut e = self.regions[reg].e_up;

            if self.mesh[e].org != self.mesh[e_prev].org {
                if !self.regions[reg].fix_upper_edge {
                    self.finish_region(reg_prev);
                    break;
                }
                // The edge below is the temporary edge from
                // connect_right_vertex; give it its real endpoint now.
                let lprev = self.mesh.lprev(e_prev);
                let new_e = self.mesh.connect(lprev, e.sym());
                self.fix_upper_edge(reg, new_e);
                e = new_e;
            }

            if self.mesh[e_prev].onext != e {
                let oprev = self.mesh.oprev(e);
                self.mesh.splice(oprev, e);
                self.mesh.splice(e_prev, e);
            }

            self.finish_region(reg_prev);
            e_prev = self.regions[reg].e_up;
            reg_prev = reg;
        }

        e_prev
    }

    /// Insert the right-going edges `e_first..e_last` (an onext run at
    /// the event) into the dictionary, compute their regions' winding
    /// numbers, and relink the mesh to match the dictionary order.
    fn add_right_edges(
        &mut self,
        reg_up: RegionId,
        e_first: EdgeId,
        e_last: EdgeId,
        e_top_left: EdgeId,
        clean_up: bool,
    ) {
        let mut e = e_first;
        loop {
            debug_assert!(self.mesh.edge_goes_right(e));
            self.add_region_below(reg_up, e.sym());
            e = self.mesh[e].onext;
            if e == e_last {
                break;
            }
        }

        let mut e_top_left = e_top_left;
        if e_top_left.is_none() {
            let below = self.region_below(reg_up);
            e_top_left = self.mesh.rprev(self.regions[below].e_up);
        }

        let mut reg_prev = reg_up;
        let mut e_prev = e_top_left;
        let mut first_time = true;
        loop {
            let reg = self.region_below(reg_prev);
            let e = self.regions[reg].e_up.sym();
            if self.mesh[e].org != self.mesh[e_prev].org {
                break;
            }

            if self.mesh[e].onext != e_prev {
                // Unlink e and relink it below e_prev.
                let oprev = self.mesh.oprev(e);
                self.mesh.splice(oprev, e);
                let ep_oprev = self.mesh.oprev(e_prev);
                self.mesh.splice(ep_oprev, e);
            }

            // Winding of the region below comes from the region above
            // minus this edge's contribution.
            let w = self.regions[reg_prev].winding_number - self.mesh[e].winding;
            let inside = self.winding_rule.is_inside(w);
            self.regions[reg].winding_number = w;
            self.regions[reg].inside = inside;

            // Collinear pairs must be merged before any intersection
            // tests see them.
            self.regions[reg_prev].dirty = true;
            if !first_time && self.check_for_right_splice(reg_prev) {
                add_winding(&mut self.mesh, e, e_prev);
                self.delete_region(reg_prev);
                self.mesh.delete_edge(e_prev);
            }
            first_time = false;
            reg_prev = reg;
            e_prev = e;
        }
        self.regions[reg_prev].dirty = true;

        if clean_up {
            self.walk_dirty_regions(reg_prev);
        }
    }

    fn get_intersect_data(
        &mut self,
        isect: VertId,
        org_up: VertId,
        dst_up: VertId,
        org_lo: VertId,
        dst_lo: VertId,
    ) {
        self.mesh[isect].coords = [0.0; 3];
        self.vertex_weights(isect, org_up, dst_up);
        self.vertex_weights(isect, org_lo, dst_lo);
    }

    /// Accumulate an L1-weighted share of the original coordinates of
    /// `org` and `dst` into the intersection vertex.
    fn vertex_weights(&mut self, isect: VertId, org: VertId, dst: VertId) {
        let t1 = vert_l1_dist(self.mesh.st(org), self.mesh.st(isect));
        let t2 = vert_l1_dist(self.mesh.st(dst), self.mesh.st(isect));
        let w0 = 0.5 * t2 / (t1 + t2);
        let w1 = 0.5 * t1 / (t1 + t2);

        let oc = self.mesh[org].coords;
        let dc = self.mesh[dst].coords;
        let v = &mut self.mesh[isect];
        for i in 0..3 {
            v.coords[i] += w0 * oc[i] + w1 * dc[i];
        }
    }

    // ──────────────────────── Structural repairs ────────────────────────

    /// Restore the dictionary invariant at the right (origin) end of
    /// `reg_up`'s edges: if one origin has drifted past the other edge,
    /// splice it onto that edge. Returns true if anything changed.
    fn check_for_right_splice(&mut self, reg_up: RegionId) -> bool {
        let reg_lo = self.region_below(reg_up);
        let e_up = self.regions[reg_up].e_up;
        let e_lo = self.regions[reg_lo].e_up;

        let up_org = self.mesh[e_up].org;
        let lo_org = self.mesh[e_lo].org;
        let up_org_st = self.mesh.st(up_org);
        let lo_org_st = self.mesh.st(lo_org);
        let up_dst_st = self.mesh.st(self.mesh.dst(e_up));
        let lo_dst_st = self.mesh.st(self.mesh.dst(e_lo));

        if vert_leq(up_org_st, lo_org_st) {
            if edge_sign(lo_dst_st, up_org_st, lo_org_st) > 0.0 {
                return false;
            }
            // up.org is at or below the lower edge.
            if !vert_eq(up_org_st, lo_org_st) {
                // Split the lower edge and splice up.org into it.
                self.mesh.split_edge(e_lo.sym());
                let oprev = self.mesh.oprev(e_lo);
                self.mesh.splice(e_up, oprev);
                self.regions[reg_up].dirty = true;
                self.regions[reg_lo].dirty = true;
            } else if up_org != lo_org {
                // Same position, distinct vertices: merge them, keeping
                // the earlier one (lo.org) and unqueueing up.org.
                let h = self.mesh[up_org].pq_handle;
                self.pq_delete(h);
                let oprev = self.mesh.oprev(e_lo);
                self.mesh.splice(oprev, e_up);
            }
        } else {
            if edge_sign(up_dst_st, lo_org_st, up_org_st) < 0.0 {
                return false;
            }
            // lo.org is at or above the upper edge; split that one.
            let above = self.region_above(reg_up);
            self.regions[above].dirty = true;
            self.regions[reg_up].dirty = true;
            self.mesh.split_edge(e_up.sym());
            let oprev = self.mesh.oprev(e_lo);
            self.mesh.splice(oprev, e_up);
        }
        true
    }

    /// The symmetric repair at the left (destination) end. Unlike the
    /// right end, both destinations have already been processed, so the
    /// misordered edge is split and the piece spliced into the other
    /// edge, with the new face inheriting `reg_up`'s interior flag.
    fn check_for_left_splice(&mut self, reg_up: RegionId) -> bool {
        let reg_lo = self.region_below(reg_up);
        let e_up = self.regions[reg_up].e_up;
        let e_lo = self.regions[reg_lo].e_up;

        let up_dst_st = self.mesh.st(self.mesh.dst(e_up));
        let lo_dst_st = self.mesh.st(self.mesh.dst(e_lo));
        debug_assert!(!vert_eq(up_dst_st, lo_dst_st));
        let up_org_st = self.mesh.st(self.mesh[e_up].org);
        let lo_org_st = self.mesh.st(self.mesh[e_lo].org);

        if vert_leq(up_dst_st, lo_dst_st) {
            if edge_sign(up_dst_st, lo_dst_st, up_org_st) < 0.0 {
                return false;
            }
            // lo.dst is above the upper edge; split the upper edge there.
            let above = self.region_above(reg_up);
            self.regions[above].dirty = true;
            self.regions[reg_up].dirty = true;
            let e = self.mesh.split_edge(e_up);
            self.mesh.splice(e_lo.sym(), e);
            let f = self.mesh[e].lface;
            let inside = self.regions[reg_up].inside;
            self.mesh[f].inside = inside;
        } else {
            if edge_sign(lo_dst_st, up_dst_st, lo_org_st) > 0.0 {
                return false;
            }
            // up.dst is below the lower edge; split the lower edge.
            self.regions[reg_up].dirty = true;
            self.regions[reg_lo].dirty = true;
            let e = self.mesh.split_edge(e_lo);
            let up_lnext = self.mesh[e_up].lnext;
            self.mesh.splice(up_lnext, e_lo.sym());
            let f = self.mesh.rface(e);
            let inside = self.regions[reg_up].inside;
            self.mesh[f].inside = inside;
        }
        true
    }

    /// Check whether `reg_up`'s upper and lower edges cross ahead of the
    /// sweep line; if so, split both at the intersection and queue the
    /// new vertex. Intersections that round off to at or behind the
    /// sweep position are clamped to the event instead of creating a
    /// time-travel event. Returns true if the region topology was
    /// rebuilt (the current dirty walk must stop).
    fn check_for_intersect(&mut self, mut reg_up: RegionId) -> bool {
        let mut reg_lo = self.region_below(reg_up);
        let e_up = self.regions[reg_up].e_up;
        let e_lo = self.regions[reg_lo].e_up;

        let org_up = self.mesh[e_up].org;
        let org_lo = self.mesh[e_lo].org;
        let dst_up = self.mesh.dst(e_up);
        let dst_lo = self.mesh.dst(e_lo);

        debug_assert!(!vert_eq(self.mesh.st(dst_up), self.mesh.st(dst_lo)));
        debug_assert!(
            !self.regions[reg_up].fix_upper_edge && !self.regions[reg_lo].fix_upper_edge
        );

        if org_up == org_lo {
            return false; // right endpoints coincide
        }

        let ou = self.mesh.st(org_up);
        let ol = self.mesh.st(org_lo);
        let du = self.mesh.st(dst_up);
        let dl = self.mesh.st(dst_lo);
        let ev = self.mesh.st(self.event);

        let t_min_up = ou.1.min(du.1);
        let t_max_lo = ol.1.max(dl.1);
        if t_min_up > t_max_lo {
            return false; // t ranges don't overlap
        }

        if vert_leq(ou, ol) {
            if edge_sign(dl, ou, ol) > 0.0 {
                return false;
            }
        } else if edge_sign(du, ol, ou) < 0.0 {
            return false;
        }

        let mut isect = edge_intersect(du, ou, dl, ol);
        debug_assert!(ou.1.min(du.1) <= isect.1 && isect.1 <= ol.1.max(dl.1));
        debug_assert!(dl.0.min(du.0) <= isect.0 && isect.0 <= ol.0.max(ou.0));

        if vert_leq(isect, ev) {
            // Round-off put the intersection at or behind the sweep
            // line; pull it forward to the event.
            isect = ev;
        }
        let org_min = if vert_leq(ou, ol) { ou } else { ol };
        if vert_leq(org_min, isect) {
            // Likewise, never move past the nearer right endpoint.
            isect = org_min;
        }

        if vert_eq(isect, ou) || vert_eq(isect, ol) {
            // Intersection at one of the right endpoints; an origin
            // splice is all that's needed.
            self.check_for_right_splice(reg_up);
            return false;
        }

        if (!vert_eq(du, ev) && edge_sign(du, ev, isect) >= 0.0)
            || (!vert_eq(dl, ev) && edge_sign(dl, ev, isect) <= 0.0)
        {
            // The new edge would pass on the wrong side of the sweep
            // event, or through it, from tiny errors in the
            // intersection arithmetic.
            if dst_lo == self.event {
                // Splice dst_lo into e_up and process the new regions.
                self.mesh.split_edge(e_up.sym());
                self.mesh.splice(e_lo.sym(), e_up);
                reg_up = self.top_left_region(reg_up);
                let below = self.region_below(reg_up);
                let e_up2 = self.regions[below].e_up;
                self.finish_left_regions(below, reg_lo);
                let oprev = self.mesh.oprev(e_up2);
                self.add_right_edges(reg_up, oprev, e_up2, e_up2, true);
                return true;
            }
            if dst_up == self.event {
                // Splice dst_up into e_lo.
                self.mesh.split_edge(e_lo.sym());
                let up_lnext = self.mesh[e_up].lnext;
                let lo_oprev = self.mesh.oprev(e_lo);
                self.mesh.splice(up_lnext, lo_oprev);
                reg_lo = reg_up;
                reg_up = self.top_right_region(reg_up);
                let below = self.region_below(reg_up);
                let e = self.mesh.rprev(self.regions[below].e_up);
                let lo_oprev = self.mesh.oprev(e_lo);
                self.regions[reg_lo].e_up = lo_oprev;
                let e_lo2 = self.finish_left_regions(reg_lo, RegionId::NONE);
                let onext = self.mesh[e_lo2].onext;
                let up_rprev = self.mesh.rprev(e_up);
                self.add_right_edges(reg_up, onext, up_rprev, e, true);
                return true;
            }
            // Split whichever edge crosses the event's side; the caller
            // (connect_right_vertex) splices things up afterwards.
            if edge_sign(du, ev, isect) >= 0.0 {
                let above = self.region_above(reg_up);
                self.regions[above].dirty = true;
                self.regions[reg_up].dirty = true;
                self.mesh.split_edge(e_up.sym());
                let org = self.mesh[e_up].org;
                self.mesh[org].s = ev.0;
                self.mesh[org].t = ev.1;
            }
            if edge_sign(dl, ev, isect) <= 0.0 {
                self.regions[reg_up].dirty = true;
                self.regions[reg_lo].dirty = true;
                self.mesh.split_edge(e_lo.sym());
                let org = self.mesh[e_lo].org;
                self.mesh[org].s = ev.0;
                self.mesh[org].t = ev.1;
            }
            return false;
        }

        // General case: split both edges and splice them together at a
        // new vertex, which becomes a future sweep event.
        self.mesh.split_edge(e_up.sym());
        self.mesh.split_edge(e_lo.sym());
        let lo_oprev = self.mesh.oprev(e_lo);
        self.mesh.splice(lo_oprev, e_up);

        let v = self.mesh[e_up].org;
        self.mesh[v].s = isect.0;
        self.mesh[v].t = isect.1;
        self.get_intersect_data(v, org_up, dst_up, org_lo, dst_lo);
        let h = self.pq_insert(v);
        self.mesh[v].pq_handle = h;
        trace!("intersection vertex queued at ({}, {})", isect.0, isect.1);

        let above = self.region_above(reg_up);
        self.regions[above].dirty = true;
        self.regions[reg_up].dirty = true;
        self.regions[reg_lo].dirty = true;
        false
    }

    /// Run the three repairs over the dirty work list until every
    /// region's neighborhood is consistent again.
    fn walk_dirty_regions(&mut self, mut reg_up: RegionId) {
        let mut reg_lo = self.region_below(reg_up);

        loop {
            // Start from the lowest dirty region; they fix bottom-up.
            while !reg_lo.is_none() && self.regions[reg_lo].dirty {
                reg_up = reg_lo;
                reg_lo = self.region_below(reg_lo);
            }
            if !self.regions[reg_up].dirty {
                reg_lo = reg_up;
                reg_up = self.region_above(reg_up);
                if reg_up.is_none() || !self.regions[reg_up].dirty {
                    return;
                }
            }

            self.regions[reg_up].dirty = false;
            let mut e_up = self.regions[reg_up].e_up;
            let mut e_lo = self.regions[reg_lo].e_up;

            if self.mesh.dst(e_up) != self.mesh.dst(e_lo)
                && self.check_for_left_splice(reg_up)
            {
                // If either region's edge was temporary, the splice has
                // made it redundant.
                if self.regions[reg_lo].fix_upper_edge {
                    self.delete_region(reg_lo);
                    self.mesh.delete_edge(e_lo);
                    reg_lo = self.region_below(reg_up);
                    e_lo = self.regions[reg_lo].e_up;
                } else if self.regions[reg_up].fix_upper_edge {
                    self.delete_region(reg_up);
                    self.mesh.delete_edge(e_up);
                    reg_up = self.region_above(reg_lo);
                    e_up = self.regions[reg_up].e_up;
                }
            }

            if self.mesh[e_up].org != self.mesh[e_lo].org {
                let up_dst = self.mesh.dst(e_up);
                let lo_dst = self.mesh.dst(e_lo);
                if up_dst != lo_dst
                    && !self.regions[reg_up].fix_upper_edge
                    && !self.regions[reg_lo].fix_upper_edge
                    && (up_dst == self.event || lo_dst == self.event)
                {
                    // check_for_intersect may fall back to using the
                    // event as the intersection point, which requires
                    // the event to lie between the two edges and neither
                    // to be temporary.
                    if self.check_for_intersect(reg_up) {
                        // It rebuilt the regions and walked recursively.
                        return;
                    }
                } else {
                    // Even without an intersection test, the origins may
                    // violate the dictionary order.
                    self.check_for_right_splice(reg_up);
                }
            }

            if self.mesh[e_up].org == self.mesh[e_lo].org
                && self.mesh.dst(e_up) == self.mesh.dst(e_lo)
            {
                // Degenerate two-edge loop; fold it away.
                add_winding(&mut self.mesh, e_lo, e_up);
                self.delete_region(reg_up);
                self.mesh.delete_edge(e_up);
                reg_up = self.region_above(reg_lo);
            }
        }
    }

    // ──────────────────────── Event dispatch ────────────────────────

    /// The event has left-going edges but none going right: connect it
    /// rightward with a temporary edge to the nearer chain vertex, so
    /// the region interior stays decidable. The temporary edge is
    /// flagged `fix_upper_edge` and replaced when a real edge arrives.
    fn connect_right_vertex(&mut self, mut reg_up: RegionId, mut e_bottom_left: EdgeId) {
        let mut e_top_left = self.mesh[e_bottom_left].onext;
        let reg_lo = self.region_below(reg_up);
        let e_up = self.regions[reg_up].e_up;
        let e_lo = self.regions[reg_lo].e_up;
        let mut degenerate = false;

        if self.mesh.dst(e_up) != self.mesh.dst(e_lo) {
            self.check_for_intersect(reg_up);
        }

        // The intersection repair may have left either edge passing
        // exactly through the event; splice those cases first.
        let ev = self.mesh.st(self.event);
        if vert_eq(self.mesh.st(self.mesh[e_up].org), ev) {
            let oprev = self.mesh.oprev(e_top_left);
            self.mesh.splice(oprev, e_up);
            reg_up = self.top_left_region(reg_up);
            let below = self.region_below(reg_up);
            e_top_left = self.regions[below].e_up;
            self.finish_left_regions(below, reg_lo);
            degenerate = true;
        }
        if vert_eq(self.mesh.st(self.mesh[e_lo].org), ev) {
            let oprev = self.mesh.oprev(e_lo);
            self.mesh.splice(e_bottom_left, oprev);
            e_bottom_left = self.finish_left_regions(reg_lo, RegionId::NONE);
            degenerate = true;
        }
        if degenerate {
            let onext = self.mesh[e_bottom_left].onext;
            self.add_right_edges(reg_up, onext, e_top_left, e_top_left, true);
            return;
        }

        // Non-degenerate: connect to the closer of lo.org and up.org.
        let target = if vert_leq(
            self.mesh.st(self.mesh[e_lo].org),
            self.mesh.st(self.mesh[e_up].org),
        ) {
            self.mesh.oprev(e_lo)
        } else {
            e_up
        };
        let lprev = self.mesh.lprev(e_bottom_left);
        let e_new = self.mesh.connect(lprev, target);
        trace!("temporary right edge added");

        // Hold off cleanup until the new edge is marked temporary, or
        // it could be spliced away before the flag lands.
        let onext = self.mesh[e_new].onext;
        self.add_right_edges(reg_up, e_new, onext, onext, false);
        let ar = self.mesh[e_new.sym()].active_region;
        self.regions[ar].fix_upper_edge = true;
        self.walk_dirty_regions(reg_up);
    }

    /// The event lies exactly on `reg_up`'s upper edge (or coincides
    /// with one of its endpoints). Merge or split as needed and resume.
    fn connect_left_degenerate(&mut self, reg_up: RegionId, v_event: VertId) {
        let e = self.regions[reg_up].e_up;
        let ev = self.mesh.st(v_event);

        if vert_eq(self.mesh.st(self.mesh[e].org), ev) {
            // e.org is an unprocessed vertex at the same position; merge
            // and let it come off the queue in due course.
            let an = self.mesh[v_event].an_edge;
            self.mesh.splice(e, an);
            return;
        }

        if !vert_eq(self.mesh.st(self.mesh.dst(e)), ev) {
            // General case: the event splits e in the middle.
            self.mesh.split_edge(e.sym());
            if self.regions[reg_up].fix_upper_edge {
                // The leftover half of the temporary edge is garbage.
                let onext = self.mesh[e].onext;
                self.mesh.delete_edge(onext);
                self.regions[reg_up].fix_upper_edge = false;
            }
            let an = self.mesh[v_event].an_edge;
            self.mesh.splice(an, e);
            self.sweep_event(v_event);
            return;
        }

        // The event coincides with e.dst, which was already processed;
        // splice in the additional right-going edges.
        let reg_up = self.top_right_region(reg_up);
        let reg = self.region_below(reg_up);
        let mut e_top_right = self.regions[reg].e_up.sym();
        let e_last = self.mesh[e_top_right].onext;
        let mut e_top_left = e_last;
        if self.regions[reg].fix_upper_edge {
            // e.dst's only right-going edge was the temporary one, and
            // real ones have now arrived.
            debug_assert!(e_top_left != e_top_right);
            self.delete_region(reg);
            self.mesh.delete_edge(e_top_right);
            e_top_right = self.mesh.oprev(e_top_left);
        }
        let an = self.mesh[v_event].an_edge;
        self.mesh.splice(an, e_top_right);
        if !self.mesh.edge_goes_left(e_top_left) {
            // e.dst had no left-going edges.
            e_top_left = EdgeId::NONE;
        }
        let onext = self.mesh[e_top_right].onext;
        self.add_right_edges(reg_up, onext, e_last, e_top_left, true);
    }

    /// The event has only right-going edges: locate its containing
    /// region and, if that region is interior (or capped by a temporary
    /// edge), connect the event leftward so the new regions have a
    /// well-defined winding.
    fn connect_left_vertex(&mut self, v_event: VertId) {
        let an = self.mesh[v_event].an_edge;

        // Probe the dictionary with the event's leftmost edge.
        let reg_up = self.dict_search(an.sym());
        if reg_up.is_none() {
            return; // possible only for coplanar/degenerate input
        }
        let reg_lo = self.region_below(reg_up);
        if reg_lo.is_none() {
            return;
        }
        let e_up = self.regions[reg_up].e_up;
        let e_lo = self.regions[reg_lo].e_up;

        // The event may lie exactly on e_up.
        let du = self.mesh.st(self.mesh.dst(e_up));
        let ou = self.mesh.st(self.mesh[e_up].org);
        let ev = self.mesh.st(v_event);
        if edge_sign(du, ev, ou) == 0.0 {
            self.connect_left_degenerate(reg_up, v_event);
            return;
        }

        // Connect to the rightmost already-processed vertex of either
        // bounding chain.
        let lo_dst = self.mesh.st(self.mesh.dst(e_lo));
        let reg = if vert_leq(lo_dst, du) { reg_up } else { reg_lo };

        if self.regions[reg_up].inside || self.regions[reg].fix_upper_edge {
            let e_new = if reg == reg_up {
                let lnext = self.mesh[e_up].lnext;
                self.mesh.connect(an.sym(), lnext)
            } else {
                let dnext = self.mesh.dnext(e_lo);
                self.mesh.connect(dnext, an).sym()
            };
            if self.regions[reg].fix_upper_edge {
                self.fix_upper_edge(reg, e_new);
            } else {
                let r = self.add_region_below(reg_up, e_new);
                self.compute_winding(r);
            }
            self.sweep_event(v_event);
        } else {
            // Exterior region: just start the event's edges.
            self.add_right_edges(reg_up, an, an, EdgeId::NONE, true);
        }
    }

    /// Process one sweep event.
    fn sweep_event(&mut self, v_event: VertId) {
        self.event = v_event;
        trace!(
            "sweep event {} at ({}, {})",
            self.mesh[v_event].id,
            self.mesh[v_event].s,
            self.mesh[v_event].t
        );

        // If the event is the right endpoint of an edge already in the
        // dictionary, that edge tells us where we are.
        let an = self.mesh[v_event].an_edge;
        let mut e = an;
        while self.mesh[e].active_region.is_none() {
            e = self.mesh[e].onext;
            if e == an {
                // Every incident edge goes right; nothing processed yet
                // touches this vertex.
                self.connect_left_vertex(v_event);
                return;
            }
        }

        // Finish the regions closed off by the event's left-going edges,
        // marking their faces with the winding-rule interior flag...
        let ar = self.mesh[e].active_region;
        let reg_up = self.top_left_region(ar);
        let reg = self.region_below(reg_up);
        let e_top_left = self.regions[reg].e_up;
        let e_bottom_left = self.finish_left_regions(reg, RegionId::NONE);

        // ...then take care of the right-going edges.
        if self.mesh[e_bottom_left].onext == e_top_left {
            // None at all: bridge rightward with a temporary edge.
            self.connect_right_vertex(reg_up, e_bottom_left);
        } else {
            let onext = self.mesh[e_bottom_left].onext;
            self.add_right_edges(reg_up, onext, e_top_left, e_top_left, true);
        }
    }

    // ──────────────────────── Setup / teardown ────────────────────────

    /// A fake edge spanning the whole sweep range at height `t`, so that
    /// every real edge has dictionary neighbors above and below.
    fn add_sentinel(&mut self, smin: Real, smax: Real, t: Real) {
        let e = self.mesh.make_edge();
        let org = self.mesh[e].org;
        let dst = self.mesh.dst(e);
        self.mesh[org].s = smax;
        self.mesh[org].t = t;
        self.mesh[dst].s = smin;
        self.mesh[dst].t = t;
        // Gives edge_leq a reference point during the insertion below.
        self.event = dst;

        let reg = self.regions.alloc();
        {
            let r = &mut self.regions[reg];
            r.e_up = e;
            r.sentinel = true;
        }
        let node = self.dict_insert_before(dict::HEAD, reg);
        self.regions[reg].node_up = node;
        self.mesh[e].active_region = reg;
    }

    fn init_edge_dict(&mut self) {
        self.dict = Dict::new();

        let w = (self.bmax[0] - self.bmin[0]) + 0.01;
        let h = (self.bmax[1] - self.bmin[1]) + 0.01;
        let smin = self.bmin[0] - w;
        let smax = self.bmax[0] + w;
        let tmin = self.bmin[1] - h;
        let tmax = self.bmax[1] + h;

        self.add_sentinel(smin, smax, tmin);
        self.add_sentinel(smin, smax, tmax);
    }

    fn done_edge_dict(&mut self) {
        let mut fixed_edges = 0;
        loop {
            let reg = self.dict.key(self.dict.min());
            if reg.is_none() {
                break;
            }
            // Only the sentinels and at most one temporary edge from
            // connect_right_vertex may remain.
            if !self.regions[reg].sentinel {
                debug_assert!(self.regions[reg].fix_upper_edge);
                fixed_edges += 1;
                debug_assert_eq!(fixed_edges, 1);
            }
            debug_assert_eq!(self.regions[reg].winding_number, 0);
            self.delete_region(reg);
        }
    }

    /// Delete zero-length edges and collapse one- or two-edge contours
    /// before the sweep sees them.
    fn remove_degenerate_edges(&mut self) {
        let mut e = self.mesh[E_HEAD].next;
        while e != E_HEAD {
            let mut e_next = self.mesh[e].next;
            let mut e_lnext = self.mesh[e].lnext;

            let org_st = self.mesh.st(self.mesh[e].org);
            let dst_st = self.mesh.st(self.mesh.dst(e));
            if vert_eq(org_st, dst_st) && self.mesh[e_lnext].lnext != e {
                // Zero-length edge in a contour of three or more edges.
                self.mesh.splice(e_lnext, e);
                self.mesh.delete_edge(e);
                e = e_lnext;
                e_lnext = self.mesh[e].lnext;
            }
            if self.mesh[e_lnext].lnext == e {
                // One- or two-edge contour; discard it.
                if e_lnext != e {
                    if e_lnext == e_next || e_lnext == e_next.sym() {
                        e_next = self.mesh[e_next].next;
                    }
                    self.mesh.delete_edge(e_lnext);
                }
                if e == e_next || e == e_next.sym() {
                    e_next = self.mesh[e_next].next;
                }
                self.mesh.delete_edge(e);
            }

            e = e_next;
        }
    }

    fn init_priority_queue(&mut self) {
        self.pq = PriorityQ::new();

        let mut v = self.mesh[V_HEAD].next;
        while v != V_HEAD {
            let h = self.pq_insert(v);
            self.mesh[v].pq_handle = h;
            v = self.mesh[v].next;
        }

        let Tessellator { pq, mesh, .. } = self;
        let mesh = &*mesh;
        pq.init(&|a, b| vert_leq(mesh.st(a), mesh.st(b)));
    }

    /// Run the sweep: convert the contour soup into a planar subdivision
    /// with every face's `inside` flag set by the winding rule.
    pub(crate) fn compute_interior(&mut self) {
        self.remove_degenerate_edges();
        self.init_priority_queue();
        self.init_edge_dict();

        loop {
            let v = self.pq_extract_min();
            if v.is_none() {
                break;
            }
            loop {
                let v_next = self.pq_minimum();
                if v_next.is_none() || !vert_eq(self.mesh.st(v_next), self.mesh.st(v)) {
                    break;
                }
                // Merge coincident vertices into a single event; the
                // degenerate-splice repairs rely on each position being
                // processed exactly once.
                let v_next = self.pq_extract_min();
                trace!("merged coincident vertex {}", self.mesh[v_next].id);
                let an1 = self.mesh[v].an_edge;
                let an2 = self.mesh[v_next].an_edge;
                self.mesh.splice(an1, an2);
            }
            self.sweep_event(v);
            self.mesh.check();
        }

        self.done_edge_dict();
        self.mesh.merge_degenerate_faces();
        self.mesh.check();
    }
}
