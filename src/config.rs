use std::error::Error;

/// The peer sampling parameters
///
/// See: [Gossip-based Peer Sampling](https://infoscience.epfl.ch/record/109297/files/all.pdf)
#[derive(Clone)]
pub struct PeerSamplingConfig {
    push: bool,
    pull: bool,
    sampling_period: u64,
    sampling_deviation: u64,
    view_size: usize,
    healing_factor: usize,
    swapping_factor: usize,
}

impl PeerSamplingConfig {
    /// Creates a new peer sampling configuration
    ///
    /// # Arguments
    ///
    /// * `push` - Does the node push its view to other peers
    /// * `pull` - When active, if the node will pull views from other peers; when passive, if it responds with its view to push requests
    /// * `sampling_period` - The interval between each cycle of push/pull, in milliseconds
    /// * `view_size` - The number of peers in the view of the node
    /// * `healing_factor` - The number of aged entries replaced at each cycle
    /// * `swapping_factor` - The number of entries swapped at each cycle
    ///
    /// The parameters must satisfy `view_size >= 2`,
    /// `healing_factor + swapping_factor <= view_size / 2` and a non-zero
    /// period.
    pub fn new(push: bool, pull: bool, sampling_period: u64, view_size: usize, healing_factor: usize, swapping_factor: usize) -> Result<Self, Box<dyn Error>> {
        Self::new_with_deviation(push, pull, sampling_period, 0, view_size, healing_factor, swapping_factor)
    }

    /// Creates a new configuration with the possibility to randomize the period; this is useful when testing locally in order to avoid network saturation
    ///
    /// # Arguments
    ///
    /// * `sampling_deviation` - The maximum value of the random value added to the period, in milliseconds
    pub fn new_with_deviation(push: bool, pull: bool, sampling_period: u64, sampling_deviation: u64, view_size: usize, healing_factor: usize, swapping_factor: usize) -> Result<Self, Box<dyn Error>> {
        if view_size < 2 {
            Err("view size must be at least 2")?
        }
        if healing_factor + swapping_factor > view_size / 2 {
            Err("healing and swapping factors must not exceed half the view size")?
        }
        if sampling_period == 0 {
            Err("sampling period must be greater than zero")?
        }
        Ok(PeerSamplingConfig {
            push,
            pull,
            sampling_period,
            sampling_deviation,
            view_size,
            healing_factor,
            swapping_factor,
        })
    }

    pub fn sampling_period(&self) -> u64 {
        self.sampling_period
    }

    pub fn sampling_deviation(&self) -> u64 {
        self.sampling_deviation
    }

    pub fn healing_factor(&self) -> usize {
        self.healing_factor
    }

    pub fn swapping_factor(&self) -> usize {
        self.swapping_factor
    }

    pub fn view_size(&self) -> usize {
        self.view_size
    }

    pub fn is_pull(&self) -> bool {
        self.pull
    }

    pub fn is_push(&self) -> bool {
        self.push
    }
}

impl Default for PeerSamplingConfig {
    fn default() -> Self {
        PeerSamplingConfig {
            push: true,
            pull: true,
            sampling_period: 1000,
            sampling_deviation: 0,
            view_size: 30,
            healing_factor: 3,
            swapping_factor: 12,
        }
    }
}
