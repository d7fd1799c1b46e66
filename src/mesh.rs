// polytess: sweep-line polygon tessellation
// License: MIT
//
// The half-edge mesh, in the spirit of the Guibas/Stolfi quad-edge
// structure. All cross-references are typed indices into Vec arenas:
//
//   - slot 0 of each arena is a dummy list header (V_HEAD, F_HEAD, and
//     the E_HEAD half-edge pair at slots 0/1);
//   - half-edges are allocated in pairs at adjacent even/odd slots, so
//     sym(e) is just the index with its low bit flipped;
//   - deleted slots are unlinked from the circular lists but never
//     reclaimed; the arenas live for one tessellation call.
//
// New vertices and faces are inserted in the global lists *before* a
// named neighbor, so passes that walk a list forward never visit
// entries created during that same pass. When a face is split, the new
// face inherits the old face's `inside` flag.

use std::ops::{Index, IndexMut};

use crate::geom::{vert_leq, Coord, Real};
use crate::pool::PoolId;
use crate::priorityq::{Handle, INVALID_HANDLE};

/// Index into the vertex arena.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct VertId(pub u32);

/// Index into the face arena.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct FaceId(pub u32);

/// Index into the half-edge arena.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct EdgeId(pub u32);

impl VertId {
    pub const NONE: VertId = VertId(u32::MAX);

    #[inline]
    pub fn is_none(self) -> bool {
        self == Self::NONE
    }
}

impl FaceId {
    pub const NONE: FaceId = FaceId(u32::MAX);

    #[inline]
    pub fn is_none(self) -> bool {
        self == Self::NONE
    }
}

impl EdgeId {
    pub const NONE: EdgeId = EdgeId(u32::MAX);

    #[inline]
    pub fn is_none(self) -> bool {
        self == Self::NONE
    }

    /// The mate: same geometric edge, opposite direction.
    #[inline]
    pub fn sym(self) -> EdgeId {
        EdgeId(self.0 ^ 1)
    }

    /// The even half of this edge's pair.
    #[inline]
    fn even(self) -> EdgeId {
        EdgeId(self.0 & !1)
    }
}

/// Dummy vertex list header.
pub const V_HEAD: VertId = VertId(0);
/// Dummy face list header.
pub const F_HEAD: FaceId = FaceId(0);
/// Dummy edge list header (its mate sits at slot 1).
pub const E_HEAD: EdgeId = EdgeId(0);

/// Output slot value meaning "not assigned yet".
pub const UNDEF: u32 = u32::MAX;

#[derive(Clone, Debug)]
pub struct Vertex {
    pub next: VertId,
    pub prev: VertId,
    /// One half-edge whose origin is this vertex.
    pub an_edge: EdgeId,
    /// Stable identity, from a counter local to the mesh.
    pub id: u32,
    /// Original input position.
    pub coords: [Real; 3],
    /// Sweep-plane projection.
    pub s: Real,
    pub t: Real,
    /// Event-queue handle while the vertex is queued.
    pub pq_handle: Handle,
    /// Output index slot, assigned on first use.
    pub n: u32,
}

impl Default for Vertex {
    fn default() -> Self {
        Vertex {
            next: VertId::NONE,
            prev: VertId::NONE,
            an_edge: EdgeId::NONE,
            id: 0,
            coords: [0.0; 3],
            s: 0.0,
            t: 0.0,
            pq_handle: INVALID_HANDLE,
            n: UNDEF,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Face {
    pub next: FaceId,
    pub prev: FaceId,
    /// One half-edge whose left face is this face.
    pub an_edge: EdgeId,
    /// Transient stack link used while walking faces.
    pub trail: FaceId,
    /// Output slot.
    pub n: u32,
    /// Transient mark used while walking faces.
    pub marked: bool,
    /// Interior of the polygon, per the winding rule.
    pub inside: bool,
}

impl Default for Face {
    fn default() -> Self {
        Face {
            next: FaceId::NONE,
            prev: FaceId::NONE,
            an_edge: EdgeId::NONE,
            trail: FaceId::NONE,
            n: UNDEF,
            marked: false,
            inside: false,
        }
    }
}

#[derive(Clone, Debug)]
pub struct HalfEdge {
    /// Next edge in the global list. Following `next` from E_HEAD visits
    /// each pair once (the even halves); an odd half's `next` stores the
    /// backward link, so `e.sym.next.sym.next == e` always holds.
    pub next: EdgeId,
    /// Next edge CCW around the origin vertex.
    pub onext: EdgeId,
    /// Next edge CCW around the left face.
    pub lnext: EdgeId,
    pub org: VertId,
    pub lface: FaceId,
    /// Active region having this edge as its upper edge, while in the
    /// sweep dictionary.
    pub active_region: PoolId,
    /// Change in winding number when crossing from right to left.
    pub winding: i32,
}

impl Default for HalfEdge {
    fn default() -> Self {
        HalfEdge {
            next: EdgeId::NONE,
            onext: EdgeId::NONE,
            lnext: EdgeId::NONE,
            org: VertId::NONE,
            lface: FaceId::NONE,
            active_region: PoolId::NONE,
            winding: 0,
        }
    }
}

pub struct Mesh {
    verts: Vec<Vertex>,
    faces: Vec<Face>,
    edges: Vec<HalfEdge>,
    next_vertex_id: u32,
}

impl Index<VertId> for Mesh {
    type Output = Vertex;

    #[inline]
    fn index(&self, v: VertId) -> &Vertex {
        &self.verts[v.0 as usize]
    }
}

impl IndexMut<VertId> for Mesh {
    #[inline]
    fn index_mut(&mut self, v: VertId) -> &mut Vertex {
        &mut self.verts[v.0 as usize]
    }
}

impl Index<FaceId> for Mesh {
    type Output = Face;

    #[inline]
    fn index(&self, f: FaceId) -> &Face {
        &self.faces[f.0 as usize]
    }
}

impl IndexMut<FaceId> for Mesh {
    #[inline]
    fn index_mut(&mut self, f: FaceId) -> &mut Face {
        &mut self.faces[f.0 as usize]
    }
}

impl Index<EdgeId> for Mesh {
    type Output = HalfEdge;

    #[inline]
    fn index(&self, e: EdgeId) -> &HalfEdge {
        &self.edges[e.0 as usize]
    }
}

impl IndexMut<EdgeId> for Mesh {
    #[inline]
    fn index_mut(&mut self, e: EdgeId) -> &mut HalfEdge {
        &mut self.edges[e.0 as usize]
    }
}

impl Mesh {
    /// An empty mesh: just the three dummy list headers.
    pub fn new() -> Self {
        let mut m = Mesh {
            verts: Vec::new(),
            faces: Vec::new(),
            edges: Vec::new(),
            next_vertex_id: 1,
        };

        m.verts.push(Vertex {
            next: V_HEAD,
            prev: V_HEAD,
            ..Vertex::default()
        });
        m.faces.push(Face {
            next: F_HEAD,
            prev: F_HEAD,
            ..Face::default()
        });
        m.edges.push(HalfEdge {
            next: E_HEAD,
            ..HalfEdge::default()
        });
        m.edges.push(HalfEdge {
            next: E_HEAD.sym(),
            ..HalfEdge::default()
        });

        m
    }

    // ──────────────────────── Navigation ────────────────────────

    /// Destination vertex: `sym.org`.
    #[inline]
    pub fn dst(&self, e: EdgeId) -> VertId {
        self[e.sym()].org
    }

    /// Right face: `sym.lface`.
    #[inline]
    pub fn rface(&self, e: EdgeId) -> FaceId {
        self[e.sym()].lface
    }

    /// Previous edge CW around the origin: `sym.lnext`.
    #[inline]
    pub fn oprev(&self, e: EdgeId) -> EdgeId {
        self[e.sym()].lnext
    }

    /// Previous edge CW around the left face: `onext.sym`.
    #[inline]
    pub fn lprev(&self, e: EdgeId) -> EdgeId {
        self[e].onext.sym()
    }

    /// Previous edge CW around the destination: `lnext.sym`.
    #[inline]
    pub fn dprev(&self, e: EdgeId) -> EdgeId {
        self[e].lnext.sym()
    }

    /// Previous edge CW around the right face: `sym.onext`.
    #[inline]
    pub fn rprev(&self, e: EdgeId) -> EdgeId {
        self[e.sym()].onext
    }

    /// Next edge CCW around the destination: `rprev.sym`.
    #[inline]
    pub fn dnext(&self, e: EdgeId) -> EdgeId {
        self.rprev(e).sym()
    }

    /// Next edge CCW around the right face: `oprev.sym`.
    #[inline]
    pub fn rnext(&self, e: EdgeId) -> EdgeId {
        self.oprev(e).sym()
    }

    /// Sweep-plane position of a vertex.
    #[inline]
    pub fn st(&self, v: VertId) -> Coord {
        let vert = &self[v];
        (vert.s, vert.t)
    }

    /// True if the edge points left (or up) in sweep order.
    #[inline]
    pub fn edge_goes_left(&self, e: EdgeId) -> bool {
        vert_leq(self.st(self.dst(e)), self.st(self[e].org))
    }

    /// True if the edge points right (or down) in sweep order.
    #[inline]
    pub fn edge_goes_right(&self, e: EdgeId) -> bool {
        vert_leq(self.st(self[e].org), self.st(self.dst(e)))
    }

    // ──────────────────────── Allocation primitives ────────────────────────

    /// Allocate a fresh half-edge pair forming an isolated self-loop, and
    /// insert it in the global edge list before `e_next`'s pair. Origin
    /// and face are left unset.
    fn make_edge_pair(&mut self, e_next: EdgeId) -> EdgeId {
        let e_next = e_next.even();
        let e_prev = self[e_next.sym()].next;

        let e = EdgeId(self.edges.len() as u32);
        let e_sym = e.sym();

        self.edges.push(HalfEdge {
            next: e_next,
            onext: e,
            lnext: e_sym,
            ..HalfEdge::default()
        });
        self.edges.push(HalfEdge {
            next: e_prev,
            onext: e_sym,
            lnext: e,
            ..HalfEdge::default()
        });

        self[e_prev.sym()].next = e;
        self[e_next.sym()].next = e_sym;

        e
    }

    /// Attach a new vertex as the origin of every edge in `e_orig`'s
    /// onext ring, inserting it before `v_next` in the global list.
    fn make_vertex(&mut self, e_orig: EdgeId, v_next: VertId) -> VertId {
        let v_new = VertId(self.verts.len() as u32);
        let v_prev = self[v_next].prev;

        let id = self.next_vertex_id;
        self.next_vertex_id += 1;
        self.verts.push(Vertex {
            next: v_next,
            prev: v_prev,
            an_edge: e_orig,
            id,
            ..Vertex::default()
        });
        self[v_prev].next = v_new;
        self[v_next].prev = v_new;

        let mut e = e_orig;
        loop {
            self[e].org = v_new;
            e = self[e].onext;
            if e == e_orig {
                break;
            }
        }

        v_new
    }

    /// Attach a new face as the left face of every edge in `e_orig`'s
    /// lnext loop, inserting it before `f_next` in the global list.
    /// The new face copies `f_next`'s `inside` flag.
    fn make_face(&mut self, e_orig: EdgeId, f_next: FaceId) -> FaceId {
        let f_new = FaceId(self.faces.len() as u32);
        let f_prev = self[f_next].prev;
        let inside = self[f_next].inside;

        self.faces.push(Face {
            next: f_next,
            prev: f_prev,
            an_edge: e_orig,
            inside,
            ..Face::default()
        });
        self[f_prev].next = f_new;
        self[f_next].prev = f_new;

        let mut e = e_orig;
        loop {
            self[e].lface = f_new;
            e = self[e].lnext;
            if e == e_orig {
                break;
            }
        }

        f_new
    }

    /// Unlink a vertex and re-point its onext ring to `new_org` (which
    /// may be NONE when the ring is about to disappear).
    fn kill_vertex(&mut self, v_del: VertId, new_org: VertId) {
        let e_start = self[v_del].an_edge;
        if !e_start.is_none() {
            let mut e = e_start;
            loop {
                self[e].org = new_org;
                e = self[e].onext;
                if e == e_start {
                    break;
                }
            }
        }

        let v_prev = self[v_del].prev;
        let v_next = self[v_del].next;
        self[v_prev].next = v_next;
        self[v_next].prev = v_prev;

        let dead = &mut self[v_del];
        dead.next = VertId::NONE;
        dead.prev = VertId::NONE;
        dead.an_edge = EdgeId::NONE;
    }

    /// Unlink a face and re-point its lnext loop to `new_lface`.
    fn kill_face(&mut self, f_del: FaceId, new_lface: FaceId) {
        let e_start = self[f_del].an_edge;
        if !e_start.is_none() {
            let mut e = e_start;
            loop {
                self[e].lface = new_lface;
                e = self[e].lnext;
                if e == e_start {
                    break;
                }
            }
        }

        let f_prev = self[f_del].prev;
        let f_next = self[f_del].next;
        self[f_prev].next = f_next;
        self[f_next].prev = f_prev;

        let dead = &mut self[f_del];
        dead.next = FaceId::NONE;
        dead.prev = FaceId::NONE;
        dead.an_edge = EdgeId::NONE;
    }

    /// Unlink an edge pair from the global edge list.
    fn kill_edge(&mut self, e_del: EdgeId) {
        let e_del = e_del.even();
        let e_next = self[e_del].next;
        let e_prev = self[e_del.sym()].next;

        self[e_next.sym()].next = e_prev;
        self[e_prev.sym()].next = e_next;

        self[e_del].next = EdgeId::NONE;
        self[e_del.sym()].next = EdgeId::NONE;
    }

    /// The splice primitive: exchange `a.onext` and `b.onext`, patching
    /// the corresponding lnext links. Merges the origin rings if a and b
    /// have distinct origins, splits the ring otherwise; same for the
    /// left face loops.
    fn splice_edges(&mut self, a: EdgeId, b: EdgeId) {
        let a_onext = self[a].onext;
        let b_onext = self[b].onext;

        self[a_onext.sym()].lnext = b;
        self[b_onext.sym()].lnext = a;
        self[a].onext = b_onext;
        self[b].onext = a_onext;
    }

    // ──────────────────────── Derived operations ────────────────────────

    /// Create one edge, two vertices, and a loop (the face bounded by
    /// the two new half-edges).
    pub fn make_edge(&mut self) -> EdgeId {
        let e = self.make_edge_pair(E_HEAD);
        self.make_vertex(e, V_HEAD);
        self.make_vertex(e.sym(), V_HEAD);
        self.make_face(e, F_HEAD);
        e
    }

    /// The basic connectivity-changing operation: afterwards
    /// `e_org.onext` and `e_dst.onext` are exchanged.
    ///
    /// If the edges had distinct origins the two vertices are merged
    /// (`e_dst`'s origin is destroyed); if they shared an origin it is
    /// split in two. Independently, sharing a left face splits the loop
    /// and distinct left faces are joined. In every case `e_org`'s
    /// vertex and face survive.
    pub fn splice(&mut self, e_org: EdgeId, e_dst: EdgeId) {
        if e_org == e_dst {
            return;
        }

        let org_org = self[e_org].org;
        let dst_org = self[e_dst].org;
        let org_lface = self[e_org].lface;
        let dst_lface = self[e_dst].lface;

        let joining_vertices = dst_org != org_org;
        let joining_loops = dst_lface != org_lface;

        if joining_vertices {
            self.kill_vertex(dst_org, org_org);
        }
        if joining_loops {
            self.kill_face(dst_lface, org_lface);
        }

        self.splice_edges(e_dst, e_org);

        if !joining_vertices {
            self.make_vertex(e_dst, org_org);
            self[org_org].an_edge = e_org;
        }
        if !joining_loops {
            self.make_face(e_dst, org_lface);
            self[org_lface].an_edge = e_org;
        }
        self.check();
    }

    /// Remove an edge. Distinct left and right faces are joined into one
    /// (the left face is destroyed); a shared face is split in two.
    /// Vertices left isolated by the removal are destroyed with it.
    pub fn delete_edge(&mut self, e_del: EdgeId) {
        let e_del_sym = e_del.sym();

        // Disconnect the origin end first, keeping the mesh consistent.
        let joining_loops = self[e_del].lface != self.rface(e_del);
        if joining_loops {
            let lface = self[e_del].lface;
            let rf = self.rface(e_del);
            self.kill_face(lface, rf);
        }

        if self[e_del].onext == e_del {
            let org = self[e_del].org;
            self.kill_vertex(org, VertId::NONE);
        } else {
            let rf = self.rface(e_del);
            let oprev = self.oprev(e_del);
            self[rf].an_edge = oprev;
            let org = self[e_del].org;
            let onext = self[e_del].onext;
            self[org].an_edge = onext;

            self.splice_edges(e_del, oprev);
            if !joining_loops {
                let lface = self[e_del].lface;
                self.make_face(e_del, lface);
            }
        }

        // Now the destination end.
        if self[e_del_sym].onext == e_del_sym {
            let org = self[e_del_sym].org;
            let lface = self[e_del_sym].lface;
            self.kill_vertex(org, VertId::NONE);
            self.kill_face(lface, FaceId::NONE);
        } else {
            let lface = self[e_del].lface;
            let sym_oprev = self.oprev(e_del_sym);
            self[lface].an_edge = sym_oprev;
            let org = self[e_del_sym].org;
            let onext = self[e_del_sym].onext;
            self[org].an_edge = onext;

            self.splice_edges(e_del_sym, sym_oprev);
        }

        self.kill_edge(e_del);
        self.check();
    }

    /// Create a new edge `e_new` with `e_new == e_org.lnext` and a fresh
    /// destination vertex. `e_org` and `e_new` share a left face.
    pub fn add_edge_vertex(&mut self, e_org: EdgeId) -> EdgeId {
        let e_new = self.make_edge_pair(e_org);
        let e_new_sym = e_new.sym();

        let lnext = self[e_org].lnext;
        self.splice_edges(e_new, lnext);

        let org = self.dst(e_org);
        self[e_new].org = org;
        self.make_vertex(e_new_sym, org);

        let lface = self[e_org].lface;
        self[e_new].lface = lface;
        self[e_new_sym].lface = lface;

        self.check();
        e_new
    }

    /// Split `e_org` with a new degree-2 vertex; the new edge is
    /// `e_org.lnext` and inherits `e_org`'s winding.
    pub fn split_edge(&mut self, e_org: EdgeId) -> EdgeId {
        let temp = self.add_edge_vertex(e_org);
        let e_new = temp.sym();

        // Disconnect e_org from its destination, reconnect to the new vertex.
        let e_org_sym = e_org.sym();
        let oprev = self.oprev(e_org_sym);
        self.splice_edges(e_org_sym, oprev);
        self.splice_edges(e_org_sym, e_new);

        let new_org = self[e_new].org;
        self[e_org_sym].org = new_org;
        let new_dst = self.dst(e_new);
        self[new_dst].an_edge = e_new.sym();
        let rf = self.rface(e_org);
        self[e_new.sym()].lface = rf;
        let w = self[e_org].winding;
        let ws = self[e_org_sym].winding;
        self[e_new].winding = w;
        self[e_new.sym()].winding = ws;

        self.check();
        e_new
    }

    /// Connect `e_org.dst` to `e_dst.org` with a new edge. A shared left
    /// face is split in two (the new loop is `e_new.lface`); otherwise
    /// the two loops are joined and `e_dst.lface` is destroyed.
    pub fn connect(&mut self, e_org: EdgeId, e_dst: EdgeId) -> EdgeId {
        let e_new = self.make_edge_pair(e_org);
        let e_new_sym = e_new.sym();

        let joining_loops = self[e_dst].lface != self[e_org].lface;
        if joining_loops {
            let dst_lface = self[e_dst].lface;
            let org_lface = self[e_org].lface;
            self.kill_face(dst_lface, org_lface);
        }

        let lnext = self[e_org].lnext;
        self.splice_edges(e_new, lnext);
        self.splice_edges(e_new_sym, e_dst);

        let org = self.dst(e_org);
        self[e_new].org = org;
        let dst_org = self[e_dst].org;
        self[e_new_sym].org = dst_org;
        let lface = self[e_org].lface;
        self[e_new].lface = lface;
        self[e_new_sym].lface = lface;

        // Keep the surviving face anchored on a half-edge it still owns.
        self[lface].an_edge = e_new_sym;

        if !joining_loops {
            self.make_face(e_new, lface);
        }

        self.check();
        e_new
    }

    /// Destroy a face and unlink it from the global list. Every boundary
    /// edge gets a NONE left face; edges whose right face is already
    /// NONE are deleted entirely, along with vertices this isolates.
    /// A zapped face must not be used in further mesh operations.
    pub fn zap_face(&mut self, f_zap: FaceId) {
        let e_start = self[f_zap].an_edge;

        let mut e_next = self[e_start].lnext;
        loop {
            let e = e_next;
            e_next = self[e].lnext;

            self[e].lface = FaceId::NONE;
            if self.rface(e).is_none() {
                // Delete e the way delete_edge would.
                if self[e].onext == e {
                    let org = self[e].org;
                    if !org.is_none() {
                        self.kill_vertex(org, VertId::NONE);
                    }
                } else {
                    let org = self[e].org;
                    let onext = self[e].onext;
                    self[org].an_edge = onext;
                    let oprev = self.oprev(e);
                    self.splice_edges(e, oprev);
                }

                let e_sym = e.sym();
                if self[e_sym].onext == e_sym {
                    let org = self[e_sym].org;
                    if !org.is_none() {
                        self.kill_vertex(org, VertId::NONE);
                    }
                } else {
                    let org = self[e_sym].org;
                    let onext = self[e_sym].onext;
                    self[org].an_edge = onext;
                    let oprev = self.oprev(e_sym);
                    self.splice_edges(e_sym, oprev);
                }

                self.kill_edge(e);
            }

            if e == e_start {
                break;
            }
        }

        let f_prev = self[f_zap].prev;
        let f_next = self[f_zap].next;
        self[f_prev].next = f_next;
        self[f_next].prev = f_prev;

        let dead = &mut self[f_zap];
        dead.next = FaceId::NONE;
        dead.prev = FaceId::NONE;
        dead.an_edge = EdgeId::NONE;
        self.check();
    }

    // ──────────────────────── Consistency check ────────────────────────

    /// Assert the structural invariants of the whole mesh: list links,
    /// the quad-edge identities, and ring/loop back-pointers. Debug
    /// builds only; compiles to nothing in release.
    pub fn check(&self) {
        if !cfg!(debug_assertions) {
            return;
        }

        // Face list and left-face loops.
        let mut f_prev = F_HEAD;
        loop {
            let f = self[f_prev].next;
            if f == F_HEAD {
                break;
            }
            assert_eq!(self[f].prev, f_prev);
            let e_start = self[f].an_edge;
            let mut e = e_start;
            loop {
                assert_eq!(self[self[e].lnext].onext.sym(), e);
                assert_eq!(self[self[e].onext.sym()].lnext, e);
                assert_eq!(self[e].lface, f);
                e = self[e].lnext;
                if e == e_start {
                    break;
                }
            }
            f_prev = f;
        }
        assert!(self[F_HEAD].an_edge.is_none());

        // Vertex list and origin rings.
        let mut v_prev = V_HEAD;
        loop {
            let v = self[v_prev].next;
            if v == V_HEAD {
                break;
            }
            assert_eq!(self[v].prev, v_prev);
            let e_start = self[v].an_edge;
            let mut e = e_start;
            loop {
                assert_eq!(self[self[e].lnext].onext.sym(), e);
                assert_eq!(self[self[e].onext.sym()].lnext, e);
                assert_eq!(self[e].org, v);
                e = self[e].onext;
                if e == e_start {
                    break;
                }
            }
            v_prev = v;
        }
        assert!(self[V_HEAD].an_edge.is_none());

        // Global edge list: pair linkage and endpoint validity.
        let mut e_prev = E_HEAD;
        loop {
            let e = self[e_prev].next;
            if e == E_HEAD {
                break;
            }
            assert_eq!(self[e.sym()].next, e_prev.sym());
            assert!(!self[e].org.is_none());
            assert!(!self.dst(e).is_none());
            assert_eq!(self[self[e].lnext].onext.sym(), e);
            assert_eq!(self[self[e].onext.sym()].lnext, e);
            e_prev = e;
        }
        assert!(self[E_HEAD].org.is_none());
        assert!(self[E_HEAD].lface.is_none());
    }
}

impl Default for Mesh {
    fn default() -> Self {
        Self::new()
    }
}
