use std::ops::Deref;

/// A set of elements, stored in a sorted vector.
///
/// The sets in this workspace are small (deduplication keys, picker
/// labels); a sorted vector beats a `HashSet` at that size and iterates in
/// a stable order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VecSet<T: Ord> {
    /// Elements in the set, always sorted.
    sorted_elements: Vec<T>,
}

impl<T: Ord> VecSet<T> {
    pub fn new() -> Self {
        VecSet {
            sorted_elements: Vec::new(),
        }
    }

    /// Insert `item` into the set.
    ///
    /// Returns `true` if the item was not already in the set.
    pub fn insert(&mut self, item: T) -> bool {
        match self.sorted_elements.binary_search(&item) {
            Ok(_) => false,
            Err(idx) => {
                self.sorted_elements.insert(idx, item);
                true
            }
        }
    }

    /// Check if the set contains `item`.
    pub fn contains(&self, item: &T) -> bool {
        self.sorted_elements.binary_search(item).is_ok()
    }
}

impl<T: Ord> Default for VecSet<T> {
    fn default() -> Self {
        VecSet::new()
    }
}

impl<T: Ord> Deref for VecSet<T> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        &self.sorted_elements
    }
}

impl<T: Ord> FromIterator<T> for VecSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = VecSet::new();
        for item in iter {
            set.insert(item);
        }
        set
    }
}
