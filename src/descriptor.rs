/// Information about a peer: its rank in the cohort and the number of
/// gossip rounds since the descriptor was produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Descriptor {
    /// Rank of the peer
    rank: i32,
    /// Age of the descriptor
    age: i32,
}

/// Marks an unused slot in a fixed-size wire buffer. Never stored in a view.
pub const NULL_DESCRIPTOR: Descriptor = Descriptor { rank: -1, age: -1 };

impl Descriptor {
    /// Creates a fresh descriptor for the specified rank, with age 0
    ///
    /// # Arguments
    ///
    /// * `rank` - Rank of the peer
    pub fn new(rank: i32) -> Descriptor {
        Descriptor { rank, age: 0 }
    }

    /// Creates a descriptor with an explicit age
    pub fn with_age(rank: i32, age: i32) -> Descriptor {
        Descriptor { rank, age }
    }

    /// Returns the rank of the peer
    pub fn rank(&self) -> i32 {
        self.rank
    }

    /// Returns the age of the descriptor
    pub fn age(&self) -> i32 {
        self.age
    }

    /// Increments the age of the descriptor by one
    pub fn increase_age(&mut self) {
        if self.age < i32::MAX {
            self.age += 1;
        }
    }

    /// Whether this entry is wire padding rather than peer data
    pub fn is_null(&self) -> bool {
        *self == NULL_DESCRIPTOR
    }
}
