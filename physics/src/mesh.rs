//! Polyhedron mesh with incidence information.
//!
//! Points, edges and triangles live in three arenas addressed by small integer
//! handles. Freed slots are recycled through a free-list and every arena keeps
//! its live features in insertion order through prev/next links. Edges know
//! the (at most two) triangles using them and triangles know their points and
//! edges, so algorithms can walk the surface without searching. Removing a
//! feature clears every back-reference to it.
//!
//! The mesh does not check that the edges handed to [`PolyhedronMesh::add_triangle`]
//! actually connect its points; the hull builder is consistent by construction.

use glam::Vec3;
use std::cell::Cell;
use std::ops::{Index, IndexMut};

macro_rules! feature_id {
    ($name:ident) => {
        #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(u32);

        impl $name {
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }
    };
}

feature_id!(PointId);
feature_id!(EdgeId);
feature_id!(TriangleId);

#[derive(Clone, Debug, PartialEq)]
pub struct MeshPoint {
    pub position: Vec3,
    /// Scratch space for algorithms.
    pub mark: u32,
    /// Scratch edge reference, used by the hull builder to share cone edges.
    pub saved_edge: Option<EdgeId>,
    /// Index of the input point this vertex was created from.
    pub tag: Option<usize>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MeshEdge {
    a: PointId,
    b: PointId,
    triangles: [Option<TriangleId>; 2],
    pub mark: u32,
}

impl MeshEdge {
    pub fn a(&self) -> PointId {
        self.a
    }

    pub fn b(&self) -> PointId {
        self.b
    }

    /// Incident triangle slots, in no particular order.
    pub fn triangles(&self) -> [Option<TriangleId>; 2] {
        self.triangles
    }

    pub fn num_triangles(&self) -> usize {
        self.triangles.iter().filter(|t| t.is_some()).count()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct MeshTriangle {
    points: [PointId; 3],
    edges: [Option<EdgeId>; 3],
    pub mark: u32,
}

impl MeshTriangle {
    /// Points in winding order.
    pub fn points(&self) -> [PointId; 3] {
        self.points
    }

    pub fn edges(&self) -> [Option<EdgeId>; 3] {
        self.edges
    }

    /// True if the triangle's winding walks from `a` straight to `b`.
    pub fn traverses(&self, a: PointId, b: PointId) -> bool {
        (0..3).any(|i| self.points[i] == a && self.points[(i + 1) % 3] == b)
    }
}

#[derive(Clone, Debug)]
struct Slot<T> {
    value: Option<T>,
    prev: Option<u32>,
    next: Option<u32>,
}

#[derive(Clone, Debug)]
struct FeatureList<T> {
    slots: Vec<Slot<T>>,
    free: Vec<u32>,
    first: Option<u32>,
    last: Option<u32>,
    // None until the next count query
    count: Cell<Option<usize>>,
}

impl<T> Default for FeatureList<T> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            first: None,
            last: None,
            count: Cell::new(Some(0)),
        }
    }
}

impl<T> FeatureList<T> {
    fn insert(&mut self, value: T) -> u32 {
        let slot = Slot {
            value: Some(value),
            prev: self.last,
            next: None,
        };
        let index = match self.free.pop() {
            Some(index) => {
                self.slots[index as usize] = slot;
                index
            }
            None => {
                self.slots.push(slot);
                self.slots.len() as u32 - 1
            }
        };

        match self.last {
            Some(last) => self.slots[last as usize].next = Some(index),
            None => self.first = Some(index),
        }
        self.last = Some(index);
        self.count.set(None);
        index
    }

    fn remove(&mut self, index: u32) -> Option<T> {
        let slot = self.slots.get_mut(index as usize)?;
        let value = slot.value.take()?;
        let (prev, next) = (slot.prev.take(), slot.next.take());

        match prev {
            Some(prev) => self.slots[prev as usize].next = next,
            None => self.first = next,
        }
        match next {
            Some(next) => self.slots[next as usize].prev = prev,
            None => self.last = prev,
        }

        self.free.push(index);
        self.count.set(None);
        Some(value)
    }

    fn get(&self, index: u32) -> Option<&T> {
        self.slots.get(index as usize)?.value.as_ref()
    }

    fn get_mut(&mut self, index: u32) -> Option<&mut T> {
        self.slots.get_mut(index as usize)?.value.as_mut()
    }

    fn iter(&self) -> FeatureIter<'_, T> {
        FeatureIter {
            list: self,
            cursor: self.first,
        }
    }

    fn len(&self) -> usize {
        if let Some(count) = self.count.get() {
            return count;
        }
        let count = self.iter().count();
        self.count.set(Some(count));
        count
    }
}

struct FeatureIter<'a, T> {
    list: &'a FeatureList<T>,
    cursor: Option<u32>,
}

impl<'a, T> Iterator for FeatureIter<'a, T> {
    type Item = (u32, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.cursor?;
        let slot = &self.list.slots[index as usize];
        self.cursor = slot.next;
        slot.value.as_ref().map(|value| (index, value))
    }
}

/// A polyhedron as three linked collections of points, edges and triangles.
///
/// The mesh may be incomplete (holes, loose points) while an algorithm is
/// working on it, but an edge never has more than two incident triangles.
#[derive(Clone, Debug, Default)]
pub struct PolyhedronMesh {
    points: FeatureList<MeshPoint>,
    edges: FeatureList<MeshEdge>,
    triangles: FeatureList<MeshTriangle>,
}

impl PolyhedronMesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_point(&mut self, position: Vec3) -> PointId {
        PointId(self.points.insert(MeshPoint {
            position,
            mark: 0,
            saved_edge: None,
            tag: None,
        }))
    }

    pub fn add_tagged_point(&mut self, position: Vec3, tag: usize) -> PointId {
        let id = self.add_point(position);
        self[id].tag = Some(tag);
        id
    }

    pub fn add_edge(&mut self, p1: PointId, p2: PointId) -> EdgeId {
        EdgeId(self.edges.insert(MeshEdge {
            a: p1,
            b: p2,
            triangles: [None, None],
            mark: 0,
        }))
    }

    /// Adds the triangle `abc` bounded by `e1`, `e2` and `e3` and registers it
    /// in the first free triangle slot of each edge.
    pub fn add_triangle(
        &mut self,
        a: PointId,
        b: PointId,
        c: PointId,
        e1: EdgeId,
        e2: EdgeId,
        e3: EdgeId,
    ) -> TriangleId {
        let id = TriangleId(self.triangles.insert(MeshTriangle {
            points: [a, b, c],
            edges: [Some(e1), Some(e2), Some(e3)],
            mark: 0,
        }));

        for edge_id in [e1, e2, e3] {
            match self.edges.get_mut(edge_id.0) {
                Some(edge) => {
                    if let Some(slot) = edge.triangles.iter_mut().find(|slot| slot.is_none()) {
                        *slot = Some(id);
                    } else {
                        log::warn!(
                            "edge {:?} already has two triangles, not linking {:?}",
                            edge_id,
                            id
                        );
                    }
                }
                None => log::warn!("triangle {:?} references missing edge {:?}", id, edge_id),
            }
        }

        id
    }

    /// Removes a point together with every edge and triangle still using it.
    pub fn remove_point(&mut self, id: PointId) {
        let edges: Vec<EdgeId> = self
            .edges_iter()
            .filter(|(_, edge)| edge.a == id || edge.b == id)
            .map(|(edge_id, _)| edge_id)
            .collect();
        for edge_id in edges {
            self.remove_edge(edge_id);
        }

        let triangles: Vec<TriangleId> = self
            .triangles_iter()
            .filter(|(_, tri)| tri.points.contains(&id))
            .map(|(tri_id, _)| tri_id)
            .collect();
        for tri_id in triangles {
            self.remove_triangle(tri_id);
        }

        self.points.remove(id.0);
    }

    /// Removes an edge, clearing its slot in the incident triangles.
    pub fn remove_edge(&mut self, id: EdgeId) {
        let edge = match self.edges.remove(id.0) {
            Some(edge) => edge,
            None => return,
        };
        for tri_id in edge.triangles.iter().flatten() {
            if let Some(tri) = self.triangles.get_mut(tri_id.0) {
                for slot in tri.edges.iter_mut().filter(|slot| **slot == Some(id)) {
                    *slot = None;
                }
            }
        }
    }

    /// Removes a triangle, clearing its slot in its edges.
    pub fn remove_triangle(&mut self, id: TriangleId) {
        let tri = match self.triangles.remove(id.0) {
            Some(tri) => tri,
            None => return,
        };
        for edge_id in tri.edges.iter().flatten() {
            if let Some(edge) = self.edges.get_mut(edge_id.0) {
                for slot in edge.triangles.iter_mut().filter(|slot| **slot == Some(id)) {
                    *slot = None;
                }
            }
        }
    }

    pub fn num_points(&self) -> usize {
        self.points.len()
    }

    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    pub fn num_triangles(&self) -> usize {
        self.triangles.len()
    }

    pub fn get_point(&self, id: PointId) -> Option<&MeshPoint> {
        self.points.get(id.0)
    }

    pub fn get_edge(&self, id: EdgeId) -> Option<&MeshEdge> {
        self.edges.get(id.0)
    }

    pub fn get_triangle(&self, id: TriangleId) -> Option<&MeshTriangle> {
        self.triangles.get(id.0)
    }

    pub fn edge_mark_mut(&mut self, id: EdgeId) -> Option<&mut u32> {
        self.edges.get_mut(id.0).map(|edge| &mut edge.mark)
    }

    pub fn triangle_mark_mut(&mut self, id: TriangleId) -> Option<&mut u32> {
        self.triangles.get_mut(id.0).map(|tri| &mut tri.mark)
    }

    pub fn points_iter(&self) -> impl Iterator<Item = (PointId, &MeshPoint)> + '_ {
        self.points.iter().map(|(i, p)| (PointId(i), p))
    }

    pub fn edges_iter(&self) -> impl Iterator<Item = (EdgeId, &MeshEdge)> + '_ {
        self.edges.iter().map(|(i, e)| (EdgeId(i), e))
    }

    pub fn triangles_iter(&self) -> impl Iterator<Item = (TriangleId, &MeshTriangle)> + '_ {
        self.triangles.iter().map(|(i, t)| (TriangleId(i), t))
    }

    pub fn point_ids(&self) -> Vec<PointId> {
        self.points_iter().map(|(id, _)| id).collect()
    }

    pub fn edge_ids(&self) -> Vec<EdgeId> {
        self.edges_iter().map(|(id, _)| id).collect()
    }

    pub fn triangle_ids(&self) -> Vec<TriangleId> {
        self.triangles_iter().map(|(id, _)| id).collect()
    }

    /// Positions of all points in insertion order.
    pub fn positions(&self) -> Vec<Vec3> {
        self.points_iter().map(|(_, p)| p.position).collect()
    }

    pub fn triangle_positions(&self, id: TriangleId) -> [Vec3; 3] {
        let [a, b, c] = self[id].points;
        [self[a].position, self[b].position, self[c].position]
    }

    /// Resets the scratch state of points and edges.
    pub fn clear_marks(&mut self) {
        for slot in self.points.slots.iter_mut() {
            if let Some(point) = slot.value.as_mut() {
                point.mark = 0;
                point.saved_edge = None;
            }
        }
        for slot in self.edges.slots.iter_mut() {
            if let Some(edge) = slot.value.as_mut() {
                edge.mark = 0;
            }
        }
    }
}

impl Index<PointId> for PolyhedronMesh {
    type Output = MeshPoint;

    fn index(&self, id: PointId) -> &MeshPoint {
        match self.points.get(id.0) {
            Some(point) => point,
            None => panic!("stale point handle {:?}", id),
        }
    }
}

impl IndexMut<PointId> for PolyhedronMesh {
    fn index_mut(&mut self, id: PointId) -> &mut MeshPoint {
        match self.points.get_mut(id.0) {
            Some(point) => point,
            None => panic!("stale point handle {:?}", id),
        }
    }
}

impl Index<EdgeId> for PolyhedronMesh {
    type Output = MeshEdge;

    fn index(&self, id: EdgeId) -> &MeshEdge {
        match self.edges.get(id.0) {
            Some(edge) => edge,
            None => panic!("stale edge handle {:?}", id),
        }
    }
}

impl Index<TriangleId> for PolyhedronMesh {
    type Output = MeshTriangle;

    fn index(&self, id: TriangleId) -> &MeshTriangle {
        match self.triangles.get(id.0) {
            Some(tri) => tri,
            None => panic!("stale triangle handle {:?}", id),
        }
    }
}
