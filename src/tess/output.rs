// polytess: sweep-line polygon tessellation
// License: MIT
//
// Output assembly: compact the triangulated interior into an index
// array and a deduplicated vertex array.

use crate::mesh::{F_HEAD, UNDEF, V_HEAD};
use crate::tess::{Tessellation, Tessellator};

impl Tessellator {
    /// Walk the interior faces, assigning each vertex an output slot on
    /// first use (cached in its `n` field), and emit three indices per
    /// face. Must run after triangulation; every interior face is a
    /// triangle by then.
    pub(crate) fn assemble_output(&mut self) -> Tessellation {
        let mesh = &mut self.mesh;

        let mut v = mesh[V_HEAD].next;
        while v != V_HEAD {
            mesh[v].n = UNDEF;
            v = mesh[v].next;
        }

        // First pass: count faces and assign vertex slots in the order
        // the faces reference them.
        let mut n_verts: u32 = 0;
        let mut n_faces: usize = 0;
        let mut f = mesh[F_HEAD].next;
        while f != F_HEAD {
            if mesh[f].inside {
                let e_start = mesh[f].an_edge;
                let mut e = e_start;
                loop {
                    let org = mesh[e].org;
                    if mesh[org].n == UNDEF {
                        mesh[org].n = n_verts;
                        n_verts += 1;
                    }
                    e = mesh[e].lnext;
                    if e == e_start {
                        break;
                    }
                }
                n_faces += 1;
            }
            f = mesh[f].next;
        }

        let mut vertices = vec![[0.0; 3]; n_verts as usize];
        let mut v = mesh[V_HEAD].next;
        while v != V_HEAD {
            let n = mesh[v].n;
            if n != UNDEF {
                vertices[n as usize] = mesh[v].coords;
            }
            v = mesh[v].next;
        }

        let mut indices = Vec::with_capacity(n_faces * 3);
        let mut f = mesh[F_HEAD].next;
        while f != F_HEAD {
            if mesh[f].inside {
                debug_assert_eq!(mesh.face_degree(f), 3);
                let e_start = mesh[f].an_edge;
                let mut e = e_start;
                loop {
                    let org = mesh[e].org;
                    indices.push(mesh[org].n);
                    e = mesh[e].lnext;
                    if e == e_start {
                        break;
                    }
                }
            }
            f = mesh[f].next;
        }

        Tessellation { indices, vertices }
    }
}
