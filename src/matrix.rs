//! Toroidal doubly linked incidence matrix ("dancing links").
//!
//! Nodes live in one arena and refer to each other by index. Every node sits
//! in a circular row list and a circular column list, and knows the first
//! node of its row and the header node of its column. Removing a row or a
//! column only rewires its neighbours; the removed nodes keep their own
//! links, so the same call with the same node puts them back exactly where
//! they were. Removals must be undone in reverse order.
//!
//! The matrix is filled by [`Matrix::append`], one value at a time, row by
//! row. Row 0 is the header row whose payloads are the column indices; its
//! first node (column 0) is the head of the whole structure. Column 0 of
//! every other row holds the row's piece name.

use crate::placement::Row;

/// Handle of a node in the arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// Value carried by a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Payload {
    /// Header row: the column index.
    Column(usize),
    /// Column 0 of a placement row: the piece name.
    Piece(char),
    /// The posture's value for this cell; zero when not covered.
    Cell(u8),
}

impl Payload {
    /// Zero payloads are present in the structure but skipped when looking
    /// for covering rows or covered columns. Column index 0 counts as zero.
    pub const fn is_nonzero(self) -> bool {
        match self {
            Self::Column(index) => index != 0,
            Self::Piece(_) => true,
            Self::Cell(value) => value != 0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct Node {
    up: NodeId,
    down: NodeId,
    left: NodeId,
    right: NodeId,
    /// First node of this node's row.
    row_head: NodeId,
    /// Header-row node of this node's column.
    col_head: NodeId,
    payload: Payload,
}

/// Direction of a traversal along a row or a column.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// The incidence matrix. Cloning it snapshots the full link structure, and
/// equality compares every link, which makes restore checks trivial.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Matrix {
    width: usize,
    nodes: Vec<Node>,
    head: Option<NodeId>,
}

impl Matrix {
    /// An empty matrix whose rows will hold `width` values each.
    pub fn new(width: usize) -> Self {
        Self {
            width,
            nodes: Vec::new(),
            head: None,
        }
    }

    /// Appends every value of every row, header first.
    pub fn from_rows(width: usize, rows: impl IntoIterator<Item = Row>) -> Self {
        let mut matrix = Self::new(width);
        for row in rows {
            match row {
                Row::Header { columns } => {
                    for column in 0..columns {
                        matrix.append(Payload::Column(column));
                    }
                }
                Row::Placement(placement) => {
                    matrix.append(Payload::Piece(placement.piece));
                    for value in placement.values {
                        matrix.append(Payload::Cell(value));
                    }
                }
            }
        }
        matrix
    }

    /// Appends one value after the last appended node, starting a new row
    /// every `width` values.
    pub fn append(&mut self, payload: Payload) -> NodeId {
        let id = NodeId(self.nodes.len());

        let (up, down, left, right) = match self.head {
            None => (id, id, id, id),
            Some(head) if self.nodes.len() % self.width == 0 => {
                // first value of a new row, in column 0
                (self.node(head).up, head, id, id)
            }
            Some(head) => {
                let left = self.node(self.node(head).up).left;
                let right = self.node(left).right;
                if self.node(left).up == left {
                    // still in the header row: the column starts here
                    (id, id, left, right)
                } else {
                    let up = self.node(self.node(left).up).right;
                    (up, self.node(up).down, left, right)
                }
            }
        };

        self.nodes.push(Node {
            up,
            down,
            left,
            right,
            row_head: right,
            col_head: down,
            payload,
        });
        self.node_mut(up).down = id;
        self.node_mut(down).up = id;
        self.node_mut(right).left = id;
        self.node_mut(left).right = id;

        if self.head.is_none() {
            self.head = Some(id);
        }
        id
    }

    /// The first header node, or `None` if nothing was appended.
    pub const fn head(&self) -> Option<NodeId> {
        self.head
    }

    /// Values per row, header included.
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Nodes in the arena, linked or not.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// True while some row other than the header is linked.
    pub fn has_rows(&self) -> bool {
        self.head.is_some_and(|head| self.node(head).down != head)
    }

    /// True while some column other than column 0 is linked.
    pub fn has_columns(&self) -> bool {
        self.head.is_some_and(|head| self.node(head).right != head)
    }

    pub fn payload(&self, id: NodeId) -> Payload {
        self.node(id).payload
    }

    pub fn row_head(&self, id: NodeId) -> NodeId {
        self.node(id).row_head
    }

    pub fn col_head(&self, id: NodeId) -> NodeId {
        self.node(id).col_head
    }

    pub fn neighbour(&self, id: NodeId, direction: Direction) -> NodeId {
        let node = self.node(id);
        match direction {
            Direction::Up => node.up,
            Direction::Down => node.down,
            Direction::Left => node.left,
            Direction::Right => node.right,
        }
    }

    /// Walks a circular list from `start` (inclusive) until it wraps.
    pub fn line(&self, start: NodeId, direction: Direction) -> Line<'_> {
        Line {
            matrix: self,
            start,
            next: Some(start),
            direction,
        }
    }

    /// Nodes of `node`'s row with a non-zero value, outside column 0.
    pub fn row_nonzero_nodes(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.line(node, Direction::Right).filter(move |&id| {
            self.payload(id).is_nonzero() && Some(self.col_head(id)) != self.head
        })
    }

    /// Nodes of `node`'s column with a non-zero value, outside the header row.
    pub fn col_nonzero_nodes(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.line(node, Direction::Down).filter(move |&id| {
            self.payload(id).is_nonzero() && Some(self.row_head(id)) != self.head
        })
    }

    /// The live column with the fewest covering rows, and that count.
    ///
    /// Ties go to the first column in header order. `None` when no column
    /// is left.
    pub fn sparsest_column(&self) -> Option<(NodeId, usize)> {
        let head = self.head?;
        let mut best: Option<(NodeId, usize)> = None;
        for column in self.row_nonzero_nodes(head) {
            let covering = self.col_nonzero_nodes(column).count();
            if best.map_or(true, |(_, fewest)| covering < fewest) {
                best = Some((column, covering));
            }
        }
        best
    }

    /// Unlinks every node of `node`'s row from its column.
    pub fn delete_row(&mut self, node: NodeId) {
        let mut current = node;
        loop {
            let Node { up, down, .. } = *self.node(current);
            if Some(current) == self.head {
                self.head = (down != current).then_some(down);
            }
            self.node_mut(up).down = down;
            self.node_mut(down).up = up;

            current = self.node(current).right;
            if current == node {
                break;
            }
        }
    }

    /// Relinks a row removed by [`Matrix::delete_row`] with the same node.
    pub fn insert_row(&mut self, node: NodeId) {
        let mut current = node;
        loop {
            let Node { up, down, .. } = *self.node(current);
            self.node_mut(up).down = current;
            self.node_mut(down).up = current;

            current = self.node(current).right;
            if current == node {
                break;
            }
        }
    }

    /// Unlinks every node of `node`'s column from its row.
    pub fn delete_col(&mut self, node: NodeId) {
        let mut current = node;
        loop {
            let Node { left, right, .. } = *self.node(current);
            if Some(current) == self.head {
                self.head = (right != current).then_some(right);
            }
            self.node_mut(left).right = right;
            self.node_mut(right).left = left;

            current = self.node(current).down;
            if current == node {
                break;
            }
        }
    }

    /// Relinks a column removed by [`Matrix::delete_col`] with the same node.
    pub fn insert_col(&mut self, node: NodeId) {
        let mut current = node;
        loop {
            let Node { left, right, .. } = *self.node(current);
            self.node_mut(left).right = current;
            self.node_mut(right).left = current;

            current = self.node(current).down;
            if current == node {
                break;
            }
        }
    }

    fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }
}

/// Iterator over one circular row or column list.
pub struct Line<'m> {
    matrix: &'m Matrix,
    start: NodeId,
    next: Option<NodeId>,
    direction: Direction,
}

impl Iterator for Line<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        let following = self.matrix.neighbour(current, self.direction);
        self.next = (following != self.start).then_some(following);
        Some(current)
    }
}
