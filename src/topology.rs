use std::error::Error;

/// A periodic two-dimensional cartesian topology over the cohort ranks,
/// built from two near-square factors of the cohort size. Ranks are laid
/// out row-major; both axes wrap around.
///
/// Used only to seed the initial views: each process starts with its four
/// torus neighbors and the gossip exchanges take over from there.
pub struct Torus2d {
    rows: usize,
    cols: usize,
}

impl Torus2d {
    /// Builds the torus for a cohort of `process_count` ranks.
    ///
    /// Fails when the cohort size is 3 or less, or prime: the topology
    /// requires two non-trivial factors.
    pub fn new(process_count: usize) -> Result<Torus2d, Box<dyn Error>> {
        if process_count <= 3 || is_prime(process_count) {
            Err("the number of processes does not allow the creation of a 2D cartesian topology")?
        }
        let (rows, cols) = close_factors(process_count);
        Ok(Torus2d { rows, cols })
    }

    /// Returns the dimensions as (rows, columns), rows being the smaller
    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// The wrap-around neighbors (up, down, left, right) of a rank,
    /// deduplicated: on small tori the same rank can appear on two sides.
    pub fn neighbors(&self, rank: i32) -> Vec<i32> {
        let row = rank as usize / self.cols;
        let col = rank as usize % self.cols;
        let candidates = [
            self.rank_at((row + self.rows - 1) % self.rows, col),
            self.rank_at((row + 1) % self.rows, col),
            self.rank_at(row, (col + self.cols - 1) % self.cols),
            self.rank_at(row, (col + 1) % self.cols),
        ];
        let mut neighbors = Vec::with_capacity(candidates.len());
        for candidate in &candidates {
            if !neighbors.contains(candidate) {
                neighbors.push(*candidate);
            }
        }
        neighbors
    }

    fn rank_at(&self, row: usize, col: usize) -> i32 {
        (row * self.cols + col) as i32
    }
}

fn is_prime(n: usize) -> bool {
    if n <= 1 {
        return false;
    }
    for i in 2..n {
        if n % i == 0 {
            return false;
        }
    }
    true
}

/// Factors `n` as `a * b` with `a` the largest divisor not exceeding
/// `round(sqrt(n))`, so the torus is as square as possible
fn close_factors(n: usize) -> (usize, usize) {
    let mut a = (n as f64).sqrt().round() as usize;
    while n % a != 0 {
        a -= 1;
    }
    (a, n / a)
}
