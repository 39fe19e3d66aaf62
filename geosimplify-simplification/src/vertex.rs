//! Vertex arena with open (polyline) and closed (ring) traversal
//!
//! Vertices live in a `Vec` and refer to their neighbours by index, so the
//! doubly-linked topology needs no shared ownership. A removed vertex keeps
//! its slot but is unlinked for good.

use geosimplify_core::{BoundingBox, Point};

/// Stable handle to a vertex within one [`VertexCollection`]
pub type VertexId = usize;

/// A vertex together with the state the simplifier caches for it
#[derive(Debug, Clone)]
pub struct Vertex {
    pub point: Point,
    /// Area of the triangle formed with both neighbours; infinite while a
    /// neighbour is missing
    pub area: f64,
    /// Box under which the vertex is currently indexed
    pub bbox: Option<BoundingBox>,
    prev: Option<VertexId>,
    next: Option<VertexId>,
    linked: bool,
}

impl Vertex {
    fn new(point: Point) -> Self {
        Self {
            point,
            area: f64::INFINITY,
            bbox: None,
            prev: None,
            next: None,
            linked: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Topology {
    /// A polyline: the ends have no neighbour beyond them
    Open {
        head: Option<VertexId>,
        tail: Option<VertexId>,
    },
    /// A ring: every vertex has both neighbours. Removing the root promotes
    /// its successor.
    Closed { root: Option<VertexId> },
}

/// Ordered vertices of a polyline or a closed ring
#[derive(Debug, Clone)]
pub struct VertexCollection {
    vertices: Vec<Vertex>,
    topology: Topology,
    len: usize,
}

impl VertexCollection {
    /// An empty open collection
    pub fn list() -> Self {
        Self {
            vertices: Vec::new(),
            topology: Topology::Open {
                head: None,
                tail: None,
            },
            len: 0,
        }
    }

    /// A closed collection starting at `root`
    pub fn ring(root: Point) -> Self {
        let mut ring = Self {
            vertices: Vec::new(),
            topology: Topology::Closed { root: None },
            len: 0,
        };
        ring.push_back(root);
        ring
    }

    pub fn from_polyline(points: &[Point]) -> Self {
        let mut list = Self::list();
        for &point in points {
            list.push_back(point);
        }
        list
    }

    pub fn from_loop(points: &[Point]) -> Self {
        match points.split_first() {
            Some((&root, rest)) => {
                let mut ring = Self::ring(root);
                for &point in rest {
                    ring.push_back(point);
                }
                ring
            }
            None => Self {
                vertices: Vec::new(),
                topology: Topology::Closed { root: None },
                len: 0,
            },
        }
    }

    /// Append a vertex at the end of the traversal order
    pub fn push_back(&mut self, point: Point) -> VertexId {
        let id = self.vertices.len();
        let mut vertex = Vertex::new(point);

        match self.topology {
            Topology::Open { head, tail } => {
                vertex.prev = tail;
                if let Some(t) = tail {
                    self.vertices[t].next = Some(id);
                }
                self.topology = Topology::Open {
                    head: head.or(Some(id)),
                    tail: Some(id),
                };
            }
            Topology::Closed { root: Some(root) } => {
                // Insert just before the root, i.e. at the end of the cycle
                let last = self.vertices[root].prev.unwrap_or(root);
                vertex.prev = Some(last);
                vertex.next = Some(root);
                self.vertices[last].next = Some(id);
                self.vertices[root].prev = Some(id);
            }
            Topology::Closed { root: None } => {
                vertex.prev = Some(id);
                vertex.next = Some(id);
                self.topology = Topology::Closed { root: Some(id) };
            }
        }

        self.vertices.push(vertex);
        self.len += 1;
        id
    }

    /// Number of linked vertices
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_closed(&self) -> bool {
        matches!(self.topology, Topology::Closed { .. })
    }

    /// First vertex in traversal order: the head of a list or the root of a ring
    pub fn first(&self) -> Option<VertexId> {
        match self.topology {
            Topology::Open { head, .. } => head,
            Topology::Closed { root } => root,
        }
    }

    pub fn is_linked(&self, id: VertexId) -> bool {
        self.vertices.get(id).map_or(false, |v| v.linked)
    }

    /// Predecessor of `id`; `None` at the start of a list or for unlinked vertices
    pub fn prev(&self, id: VertexId) -> Option<VertexId> {
        self.vertices.get(id).and_then(|v| v.prev)
    }

    /// Successor of `id`; `None` at the end of a list or for unlinked vertices
    pub fn next(&self, id: VertexId) -> Option<VertexId> {
        self.vertices.get(id).and_then(|v| v.next)
    }

    /// Borrow a vertex.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not issued by this collection.
    pub fn vertex(&self, id: VertexId) -> &Vertex {
        &self.vertices[id]
    }

    /// Mutably borrow a vertex.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not issued by this collection.
    pub fn vertex_mut(&mut self, id: VertexId) -> &mut Vertex {
        &mut self.vertices[id]
    }

    /// Unlink `id`, joining its neighbours to each other.
    ///
    /// Returns `false` if the vertex was already removed.
    pub fn remove(&mut self, id: VertexId) -> bool {
        if !self.is_linked(id) {
            return false;
        }
        let prev = self.vertices[id].prev;
        let next = self.vertices[id].next;

        if let Some(p) = prev {
            self.vertices[p].next = next;
        }
        if let Some(n) = next {
            self.vertices[n].prev = prev;
        }

        self.topology = match self.topology {
            Topology::Open { head, tail } => Topology::Open {
                head: if head == Some(id) { next } else { head },
                tail: if tail == Some(id) { prev } else { tail },
            },
            Topology::Closed { root } if root == Some(id) => Topology::Closed {
                root: if self.len == 1 { None } else { next },
            },
            closed => closed,
        };

        let vertex = &mut self.vertices[id];
        vertex.prev = None;
        vertex.next = None;
        vertex.linked = false;
        self.len -= 1;
        true
    }

    /// Linked vertices in traversal order
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            collection: self,
            cursor: self.first(),
            remaining: self.len,
        }
    }

    /// Locations of the linked vertices in traversal order
    pub fn points(&self) -> Vec<Point> {
        self.iter().map(|id| self.vertices[id].point).collect()
    }
}

/// Single forward pass over the linked vertices of a [`VertexCollection`]
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    collection: &'a VertexCollection,
    cursor: Option<VertexId>,
    remaining: usize,
}

impl Iterator for Iter<'_> {
    type Item = VertexId;

    fn next(&mut self) -> Option<VertexId> {
        if self.remaining == 0 {
            return None;
        }
        let id = self.cursor?;
        self.cursor = self.collection.next(id);
        self.remaining -= 1;
        Some(id)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Iter<'_> {}
