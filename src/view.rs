use std::cmp::Reverse;
use std::collections::{HashMap, HashSet};
use rand::Rng;
use rand::seq::SliceRandom;
use crate::descriptor::Descriptor;

/// The peer sample of one process: an ordered sequence of descriptors,
/// bounded by the view size parameter after every merge.
///
/// The view is shared between the activity threads behind a single mutex;
/// multi-step sequences must hold one guard for their full duration.
pub struct View {
    /// Rank of the owning process, filtered out of merged buffers
    own_rank: i32,
    /// The current peer sample
    descriptors: Vec<Descriptor>,
}

impl View {
    /// Creates an empty view for the process with the given rank
    pub fn new(own_rank: i32) -> View {
        View {
            own_rank,
            descriptors: Vec::new(),
        }
    }

    /// Replaces the contents with one fresh descriptor per distinct seed rank.
    /// Called once at bootstrap with the topology neighbors.
    ///
    /// # Arguments
    ///
    /// * `seed_ranks` - Ranks of the initial neighbors
    pub fn init(&mut self, seed_ranks: &[i32]) {
        let mut seen = HashSet::new();
        self.descriptors = seed_ranks.iter()
            .filter(|&&rank| seen.insert(rank))
            .map(|&rank| Descriptor::new(rank))
            .collect();
    }

    /// Returns the number of descriptors in the view
    pub fn size(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Returns a copy of the current descriptors
    pub fn descriptors(&self) -> Vec<Descriptor> {
        self.descriptors.clone()
    }

    /// Increases by one the age of each descriptor in the view
    pub fn increase_age(&mut self) {
        for descriptor in self.descriptors.iter_mut() {
            descriptor.increase_age();
        }
    }

    /// Randomly reorders the current view
    pub fn shuffle(&mut self) {
        self.descriptors.shuffle(&mut rand::thread_rng());
    }

    /// Concatenates `buffer` at the end of the view. The view may
    /// transiently exceed the size bound until the next merge completes.
    pub fn append(&mut self, buffer: &[Descriptor]) {
        self.descriptors.extend_from_slice(buffer);
    }

    /// Returns a copy of the first `min(n, size)` descriptors
    pub fn head(&self, n: usize) -> Vec<Descriptor> {
        self.descriptors.iter().take(n).cloned().collect()
    }

    /// Returns the rank of a uniformly chosen descriptor, or `None` when
    /// the view is empty
    pub fn random_peer(&self) -> Option<i32> {
        if self.descriptors.is_empty() {
            None
        }
        else {
            let index = rand::thread_rng().gen_range(0, self.descriptors.len());
            Some(self.descriptors[index].rank())
        }
    }

    /// Relocates the `h` descriptors with the largest age to the tail of
    /// the view, preserving the relative order of the remaining entries.
    /// No-op when `h` is zero or not smaller than the view size.
    ///
    /// # Arguments
    ///
    /// * `h` - The healing parameter
    pub fn move_oldest_to_back(&mut self, h: usize) {
        if h == 0 || h >= self.descriptors.len() {
            return;
        }
        let oldest = self.oldest_indices(h);
        let mut front = Vec::with_capacity(self.descriptors.len() - h);
        let mut back = Vec::with_capacity(h);
        for (index, descriptor) in self.descriptors.drain(..).enumerate() {
            if oldest.contains(&index) {
                back.push(descriptor);
            }
            else {
                front.push(descriptor);
            }
        }
        front.append(&mut back);
        self.descriptors = front;
    }

    /// Deletes the `k` descriptors with the largest age. Ties are broken by
    /// position, earliest first. No-op when `k` is zero or not smaller than
    /// the view size, so the view is never drained.
    pub fn remove_oldest(&mut self, k: usize) {
        if k == 0 || k >= self.descriptors.len() {
            return;
        }
        let victims = self.oldest_indices(k);
        let mut index = 0;
        self.descriptors.retain(|_| {
            let keep = !victims.contains(&index);
            index += 1;
            keep
        });
    }

    /// Deletes the first `k` descriptors. No-op when `k` is zero or larger
    /// than the view size.
    pub fn remove_head(&mut self, k: usize) {
        if k == 0 || k > self.descriptors.len() {
            return;
        }
        self.descriptors.drain(0..k);
    }

    /// Deletes `k` uniformly chosen descriptors, sampled without
    /// replacement. Guards as [View::remove_oldest].
    pub fn remove_at_random(&mut self, k: usize) {
        if k == 0 || k >= self.descriptors.len() {
            return;
        }
        let mut rng = rand::thread_rng();
        for _ in 0..k {
            let index = rng.gen_range(0, self.descriptors.len());
            self.descriptors.remove(index);
        }
    }

    /// Keeps, for each rank, only the descriptor with the smallest age, at
    /// the position of its first occurrence. Discards the rest.
    pub fn remove_duplicates(&mut self) {
        let mut freshest: HashMap<i32, i32> = HashMap::new();
        for descriptor in &self.descriptors {
            let age = freshest.entry(descriptor.rank()).or_insert_with(|| descriptor.age());
            if descriptor.age() < *age {
                *age = descriptor.age();
            }
        }
        let mut kept: HashSet<i32> = HashSet::new();
        self.descriptors.retain(|descriptor| {
            descriptor.age() == freshest[&descriptor.rank()] && kept.insert(descriptor.rank())
        });
    }

    /// Merges a buffer received from a peer into the view: append the
    /// buffer omitting the local rank, resolve duplicates to the freshest
    /// entry, then evict down to the view size with the healing, swap and
    /// random policies.
    ///
    /// # Arguments
    ///
    /// * `c` - The view size
    /// * `h` - The healing parameter
    /// * `s` - The swap parameter
    /// * `buffer` - The buffer received
    pub fn select(&mut self, c: usize, h: usize, s: usize, buffer: &[Descriptor]) {
        let own_rank = self.own_rank;
        self.descriptors.extend(buffer.iter().filter(|descriptor| descriptor.rank() != own_rank));
        self.remove_duplicates();
        let excess = self.descriptors.len().saturating_sub(c);
        self.remove_oldest(excess.min(h));
        let excess = self.descriptors.len().saturating_sub(c);
        self.remove_head(excess.min(s));
        let excess = self.descriptors.len().saturating_sub(c);
        self.remove_at_random(excess);
    }

    /// Indices of the `k` largest-age descriptors; among equal ages the
    /// earliest-positioned entries are considered oldest.
    fn oldest_indices(&self, k: usize) -> HashSet<usize> {
        let mut indices: Vec<usize> = (0..self.descriptors.len()).collect();
        indices.sort_by_key(|&index| (Reverse(self.descriptors[index].age()), index));
        indices.truncate(k);
        indices.into_iter().collect()
    }
}
