use std::collections::{HashSet, VecDeque};

use super::types::Point;

/// Snake body with head at the front and a cell index for O(1) collision
/// lookups. The body is never empty.
#[derive(Clone, Debug)]
pub struct Snake {
    body: VecDeque<Point>,
    body_set: HashSet<Point>,
}

impl Snake {
    pub fn new(head: Point) -> Self {
        let mut body = VecDeque::new();
        let mut body_set = HashSet::new();
        body.push_back(head);
        body_set.insert(head);
        Self { body, body_set }
    }

    pub fn head(&self) -> Point {
        *self.body.front().expect("Snake body should never be empty")
    }

    pub fn tail(&self) -> Point {
        *self.body.back().expect("Snake body should never be empty")
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn contains(&self, cell: &Point) -> bool {
        self.body_set.contains(cell)
    }

    pub fn cells(&self) -> impl Iterator<Item = &Point> {
        self.body.iter()
    }

    pub fn push_head(&mut self, cell: Point) {
        self.body.push_front(cell);
        self.body_set.insert(cell);
    }

    pub fn pop_tail(&mut self) -> Point {
        let tail = self.body.pop_back().expect("Snake body should never be empty");
        self.body_set.remove(&tail);
        tail
    }

    #[cfg(test)]
    pub(crate) fn from_cells(cells: Vec<Point>) -> Self {
        let body: VecDeque<Point> = cells.into_iter().collect();
        let body_set: HashSet<Point> = body.iter().copied().collect();
        assert!(!body.is_empty());
        Self { body, body_set }
    }
}
