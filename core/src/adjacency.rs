//! Arena-backed, cross-linked adjacency lists.
//!
//! Each undirected edge is stored as two [`Relation`] records, one in each
//! endpoint's list. A relation holds the arena index of its mirror, so the
//! reverse record can be unlinked in O(1) without searching the neighbor's list.

/// Stable arena index of a relation record.
pub(crate) type RelationId = usize;

/// One endpoint's view of an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Relation {
    /// Node slot of the node at the other end of the edge.
    pub neighbor: usize,
    /// The matching relation in `neighbor`'s list.
    pub mirror: RelationId,
    prev: Option<RelationId>,
    next: Option<RelationId>,
}

/// Head of one node's doubly linked relation list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct AdjacencyList {
    head: Option<RelationId>,
    len: usize,
}

impl AdjacencyList {
    pub fn len(&self) -> usize {
        self.len
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn head(&self) -> Option<RelationId> {
        self.head
    }
}

/// Storage for every relation record in a graph. Freed slots are reused.
#[derive(Debug, Clone, Default)]
pub(crate) struct RelationArena {
    slots: Vec<Option<Relation>>,
    free: Vec<RelationId>,
    live: usize,
}

impl RelationArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: RelationId) -> Option<&Relation> {
        self.slots.get(id).and_then(Option::as_ref)
    }

    /// Number of live relation records (two per edge).
    pub fn live(&self) -> usize {
        self.live
    }

    /// Push a relation to `neighbor` onto the front of `list`. Its mirror is
    /// unset until [`RelationArena::pair`] is called.
    pub fn insert_front(&mut self, list: &mut AdjacencyList, neighbor: usize) -> RelationId {
        let relation = Relation {
            neighbor,
            mirror: RelationId::MAX,
            prev: None,
            next: list.head,
        };
        let id = self.alloc(relation);
        if let Some(old_head) = list.head {
            if let Some(r) = self.slots[old_head].as_mut() {
                r.prev = Some(id);
            }
        }
        list.head = Some(id);
        list.len += 1;
        id
    }

    /// Make `a` and `b` each other's mirror.
    pub fn pair(&mut self, a: RelationId, b: RelationId) {
        if let Some(r) = self.slots[a].as_mut() {
            r.mirror = b;
        }
        if let Some(r) = self.slots[b].as_mut() {
            r.mirror = a;
        }
    }

    /// Unlink `id` from `list` in O(1) and free its slot.
    ///
    /// `id` must belong to `list`.
    pub fn unlink(&mut self, list: &mut AdjacencyList, id: RelationId) -> Option<Relation> {
        let relation = self.slots.get_mut(id)?.take()?;
        match relation.prev {
            Some(prev) => {
                if let Some(r) = self.slots[prev].as_mut() {
                    r.next = relation.next;
                }
            }
            None => list.head = relation.next,
        }
        if let Some(next) = relation.next {
            if let Some(r) = self.slots[next].as_mut() {
                r.prev = relation.prev;
            }
        }
        list.len -= 1;
        self.free.push(id);
        self.live -= 1;
        Some(relation)
    }

    /// Free every record of a list that is being discarded, returning them in
    /// list order. Neighbor lists are left untouched.
    pub fn drain(&mut self, list: &mut AdjacencyList) -> Vec<Relation> {
        let mut drained = Vec::with_capacity(list.len);
        let mut cursor = list.head();
        while let Some(id) = cursor {
            let Some(relation) = self.slots.get_mut(id).and_then(Option::take) else {
                break;
            };
            cursor = relation.next;
            self.free.push(id);
            self.live -= 1;
            drained.push(relation);
        }
        *list = AdjacencyList::default();
        drained
    }

    /// Walk `list` from its head.
    pub fn iter<'a>(&'a self, list: &AdjacencyList) -> Relations<'a> {
        Relations {
            arena: self,
            cursor: list.head(),
        }
    }

    pub fn memory_usage(&self) -> usize {
        use std::mem::size_of;

        self.slots.capacity() * size_of::<Option<Relation>>()
            + self.free.capacity() * size_of::<RelationId>()
    }

    fn alloc(&mut self, relation: Relation) -> RelationId {
        self.live += 1;
        match self.free.pop() {
            Some(id) => {
                self.slots[id] = Some(relation);
                id
            }
            None => {
                self.slots.push(Some(relation));
                self.slots.len() - 1
            }
        }
    }
}

/// Iterator over `(RelationId, &Relation)` of one adjacency list.
pub(crate) struct Relations<'a> {
    arena: &'a RelationArena,
    cursor: Option<RelationId>,
}

impl<'a> Iterator for Relations<'a> {
    type Item = (RelationId, &'a Relation);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.cursor?;
        let relation = self.arena.get(id)?;
        self.cursor = relation.next;
        Some((id, relation))
    }
}
