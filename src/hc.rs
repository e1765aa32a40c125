use std::hash;
use std::ops::Deref;
use std::rc::Rc;

use ahash::AHashMap;

// A consed handle: equality and hashing go through the pointer, so two
// handles from the same table compare in constant time.
#[derive(Debug, Clone)]
pub struct Hc<T>(Rc<T>);

impl<T> Hc<T> {
    fn ptr(&self) -> *const T {
        Rc::as_ptr(&self.0)
    }
}

impl<T: Clone> Hc<T> {
    pub fn cloned(&self) -> T {
        (*self.0).clone()
    }
}

impl<T> PartialEq for Hc<T> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.ptr() == other.ptr()
    }
}
impl<T> Eq for Hc<T> { }

impl<T> hash::Hash for Hc<T> {
    #[inline]
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        hash::Hash::hash(&self.ptr(), state);
    }
}

impl<T> Deref for Hc<T> {
    type Target = T;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

// Entries hold strong references; a table lives only for one checking session.
#[derive(Debug)]
pub struct HcTable<T: hash::Hash + Eq + Clone> {
    table: AHashMap<T, Hc<T>>,
}

impl<T: hash::Hash + Eq + Clone> HcTable<T> {
    pub fn with_capacity(capacity: usize) -> HcTable<T> {
        HcTable {
            table: AHashMap::with_capacity(capacity)
        }
    }

    pub fn make(&mut self, element: T) -> Hc<T> {
        if let Some(hc) = self.table.get(&element) {
            return hc.clone()
        }
        let hc = Hc(Rc::new(element.clone()));
        self.table.insert(element, hc.clone());
        hc
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}
