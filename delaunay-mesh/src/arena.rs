use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::ops::{Index, IndexMut};

/// Append-only storage whose elements are addressed by a typed index.
///
/// Slots are never freed: editing an element overwrites it in place so ids
/// handed out earlier stay valid for the lifetime of the arena.
#[derive(Debug, Clone)]
pub struct Arena<T> {
    data: Vec<T>,
}

pub struct ArenaId<Tag> {
    ix: usize,
    tag: PhantomData<Tag>,
}

impl<T> Arena<T> {
    pub fn new() -> Self {
        Arena { data: vec![] }
    }

    pub fn push(&mut self, v: T) -> ArenaId<T> {
        self.data.push(v);
        ArenaId::new(self.data.len() - 1)
    }

    /// Id the next pushed element will get.
    pub fn next_id(&self) -> ArenaId<T> {
        ArenaId::new(self.data.len())
    }

    pub fn get(&self, id: ArenaId<T>) -> Option<&T> {
        self.data.get(id.ix)
    }

    pub fn get_mut(&mut self, id: ArenaId<T>) -> Option<&mut T> {
        self.data.get_mut(id.ix)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ArenaId<T>, &T)> + '_ {
        self.data
            .iter()
            .enumerate()
            .map(|(ix, v)| (ArenaId::new(ix), v))
    }

    pub fn values(&self) -> &[T] {
        &self.data
    }
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Arena::new()
    }
}

impl<T> Index<ArenaId<T>> for Arena<T> {
    type Output = T;

    fn index(&self, ix: ArenaId<T>) -> &Self::Output {
        &self.data[ix.ix]
    }
}

impl<T> IndexMut<ArenaId<T>> for Arena<T> {
    fn index_mut(&mut self, ix: ArenaId<T>) -> &mut T {
        &mut self.data[ix.ix]
    }
}

impl<Tag> ArenaId<Tag> {
    pub(crate) fn new(ix: usize) -> Self {
        ArenaId {
            ix,
            tag: PhantomData,
        }
    }

    pub fn index(self) -> usize {
        self.ix
    }
}

// manual impls: deriving would put needless bounds on `Tag`
impl<T> Copy for ArenaId<T> {}
impl<T> Clone for ArenaId<T> {
    fn clone(&self) -> Self {
        ArenaId {
            ix: self.ix,
            tag: self.tag,
        }
    }
}

impl<T> PartialEq for ArenaId<T> {
    fn eq(&self, other: &Self) -> bool {
        self.ix == other.ix
    }
}

impl<T> Eq for ArenaId<T> {}

impl<T> Hash for ArenaId<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.ix.hash(state);
    }
}

impl<T> fmt::Debug for ArenaId<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.ix)
    }
}
