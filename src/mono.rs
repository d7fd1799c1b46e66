// polytess: sweep-line polygon tessellation
// License: MIT
//
// Triangulation of the swept mesh. After the sweep every interior face
// is monotone with respect to the sweep axis, so each one triangulates
// in linear time with the two-chain scan below.

use crate::geom::{edge_sign, vert_leq};
use crate::mesh::{FaceId, Mesh, F_HEAD};

impl Mesh {
    /// Triangulate one monotone face.
    ///
    /// The face must be a simple polygon oriented CCW in (s, t) with no
    /// interior vertices. The scan keeps `up` on the upper chain and
    /// `lo` on the lower chain, emitting triangles whenever the next
    /// boundary vertex makes the chain top convex, then fans out the
    /// rest from the leftmost vertex.
    pub fn triangulate_monotone(&mut self, face: FaceId) {
        let mut up = self[face].an_edge;
        assert!(self[up].lnext != up && self[self[up].lnext].lnext != up);

        // Position `up` so its origin is the rightmost vertex.
        while vert_leq(self.st(self.dst(up)), self.st(self[up].org)) {
            up = self.lprev(up);
        }
        while vert_leq(self.st(self[up].org), self.st(self.dst(up))) {
            up = self[up].lnext;
        }
        let mut lo = self.lprev(up);

        while self[up].lnext != lo {
            if vert_leq(self.st(self.dst(up)), self.st(self[lo].org)) {
                // up.dst is on the left. Triangles can be formed from
                // lo.org as long as the lower chain stays convex; the
                // edge_goes_left test keeps the scan moving even when
                // some triangles come out CW (possible while the chains
                // are merely monotone, not strictly so).
                while self[lo].lnext != up {
                    let lo_lnext = self[lo].lnext;
                    let convex = self.edge_goes_left(lo_lnext)
                        || edge_sign(
                            self.st(self[lo].org),
                            self.st(self.dst(lo)),
                            self.st(self.dst(lo_lnext)),
                        ) <= 0.0;
                    if !convex {
                        break;
                    }
                    let temp = self.connect(lo_lnext, lo);
                    lo = temp.sym();
                }
                lo = self.lprev(lo);
            } else {
                // lo.org is on the left; symmetric scan on the upper chain.
                while self[lo].lnext != up {
                    let up_lprev = self.lprev(up);
                    let convex = self.edge_goes_right(up_lprev)
                        || edge_sign(
                            self.st(self.dst(up)),
                            self.st(self[up].org),
                            self.st(self[up_lprev].org),
                        ) >= 0.0;
                    if !convex {
                        break;
                    }
                    let temp = self.connect(up, up_lprev);
                    up = temp.sym();
                }
                up = self[up].lnext;
            }
        }

        // The chains have met at the leftmost vertex; fan out what is left.
        assert!(self[lo].lnext != up);
        while self[self[lo].lnext].lnext != up {
            let lo_lnext = self[lo].lnext;
            let temp = self.connect(lo_lnext, lo);
            lo = temp.sym();
        }
    }

    /// Triangulate every interior face.
    pub fn triangulate_interior(&mut self) {
        let mut f = self[F_HEAD].next;
        while f != F_HEAD {
            let next = self[f].next;
            if self[f].inside {
                self.triangulate_monotone(f);
            }
            f = next;
        }
    }

    /// Merge away faces reduced to two edges by the sweep's splice
    /// repairs, folding their winding into the surviving edge.
    pub fn merge_degenerate_faces(&mut self) {
        let mut f = self[F_HEAD].next;
        while f != F_HEAD {
            let next = self[f].next;
            let e = self[f].an_edge;
            assert!(self[e].lnext != e);

            if self[self[e].lnext].lnext == e {
                let onext = self[e].onext;
                let w = self[e].winding;
                let ws = self[e.sym()].winding;
                self[onext].winding += w;
                self[onext.sym()].winding += ws;
                self.delete_edge(e);
            }
            f = next;
        }
    }

    /// Zap every face outside the polygon interior, leaving exactly the
    /// interior faces in the mesh.
    pub fn discard_exterior(&mut self) {
        let mut f = self[F_HEAD].next;
        while f != F_HEAD {
            let next = self[f].next;
            if !self[f].inside {
                self.zap_face(f);
            }
            f = next;
        }
    }

    /// Number of edges in a face's boundary loop.
    pub fn face_degree(&self, f: FaceId) -> usize {
        let e_start = self[f].an_edge;
        let mut e = e_start;
        let mut n = 0;
        loop {
            n += 1;
            e = self[e].lnext;
            if e == e_start {
                break;
            }
        }
        n
    }
}
