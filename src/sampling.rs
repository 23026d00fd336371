use std::error::Error;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use rand::Rng;
use crate::config::PeerSamplingConfig;
use crate::descriptor::Descriptor;
use crate::message::{Message, MessageTag};
use crate::network::Transport;
use crate::topology::Torus2d;
use crate::view::View;

/// Peer sampling service to be used by the application
///
/// Runs one periodic sampling thread and one receive thread per message
/// tag, all sharing the view behind its mutex.
pub struct PeerSamplingService {
    /// Protocol parameters
    config: PeerSamplingConfig,
    /// Message transport shared by the activity threads
    transport: Arc<dyn Transport>,
    /// View containing the current peer sample
    view: Arc<Mutex<View>>,
    // Handles for activity threads
    thread_handles: Vec<JoinHandle<()>>,
    /// Handle for shutting down threads
    shutdown: Arc<AtomicBool>,
}

impl PeerSamplingService {
    /// Creates a new peer sampling service with the provided parameters
    ///
    /// # Arguments
    ///
    /// * `transport` - The message transport of the local process
    /// * `config` - The parameters for the peer sampling protocol [PeerSamplingConfig]
    pub fn new(transport: Arc<dyn Transport>, config: PeerSamplingConfig) -> PeerSamplingService {
        let own_rank = transport.own_rank();
        PeerSamplingService {
            config,
            transport,
            view: Arc::new(Mutex::new(View::new(own_rank))),
            thread_handles: Vec::new(),
            shutdown: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Initializes the service: seeds the view with the torus neighbors of
    /// the local rank and starts the activity threads.
    ///
    /// Aborts the process with exit code -1 when the transport cannot be
    /// driven from multiple threads or when the cohort size admits no
    /// two-dimensional torus.
    pub fn init(&mut self) {
        if !self.transport.concurrent() {
            eprintln!("The transport does not support concurrent send and receive!");
            eprintln!("Aborting...");
            self.transport.abort(-1);
        }
        let topology = match Torus2d::new(self.transport.process_count()) {
            Ok(topology) => topology,
            Err(e) => {
                eprintln!("{}", e);
                eprintln!("Aborting...");
                self.transport.abort(-1)
            }
        };
        let neighbors = topology.neighbors(self.transport.own_rank());
        log::debug!("Seeding view with neighbors {:?}", neighbors);
        self.view.lock().unwrap().init(&neighbors);

        // handle received messages
        let push_handle = self.start_receiver(MessageTag::Push);
        self.thread_handles.push(push_handle);
        let pull_handle = self.start_receiver(MessageTag::Pull);
        self.thread_handles.push(pull_handle);

        // start peer sampling
        let sampling_handle = self.start_sampling_activity();
        self.thread_handles.push(sampling_handle);

        log::info!("All activity threads were started");
    }

    /// Returns a random peer for the client application.
    /// The peer is a pseudo-random peer from the set of all peers.
    /// The local view is built using [Gossip-Based Peer Sampling].
    pub fn get_peer(&self) -> Option<i32> {
        self.view.lock().unwrap().random_peer()
    }

    /// Returns a copy of the descriptors in the node view
    pub fn view(&self) -> Vec<Descriptor> {
        self.view.lock().unwrap().descriptors()
    }

    /// Stops the threads related to peer sampling activity
    pub fn shutdown(&mut self) -> Result<(), Box<dyn Error>> {
        // request shutdown
        self.shutdown.store(true, Ordering::SeqCst);
        // wake the receive threads with an empty message to the local rank
        let own_rank = self.transport.own_rank();
        self.transport.send_async(own_rank, MessageTag::Push, Vec::new())?;
        self.transport.send_async(own_rank, MessageTag::Pull, Vec::new())?;
        // wait for termination
        let mut join_error = false;
        for handle in self.thread_handles.drain(..) {
            if let Err(e) = handle.join() {
                log::error!("Error joining thread: {:?}", e);
                join_error = true;
            }
        }
        log::info!("All activity threads were stopped");
        if join_error {
            Err("An error occurred during thread joining")?
        }
        else {
            Ok(())
        }
    }

    /// Builds the buffer to be exchanged with another peer: the own
    /// descriptor followed by the freshest half of the shuffled view
    ///
    /// # Arguments
    ///
    /// * `own_rank` - Rank of the local process
    /// * `config` - The configuration parameters
    /// * `view` - The current view
    fn build_buffer(own_rank: i32, config: &PeerSamplingConfig, view: &mut View) -> Vec<Descriptor> {
        let mut buffer = vec![ Descriptor::new(own_rank) ];
        view.shuffle();
        view.move_oldest_to_back(config.healing_factor());
        buffer.append(&mut view.head(config.view_size() / 2 - 1));
        buffer
    }

    /// A message is discarded when its sender or any carried rank falls
    /// outside the cohort, or when an age is negative
    fn is_valid(message: &Message, process_count: usize) -> bool {
        let count = process_count as i32;
        if message.sender() < 0 || message.sender() >= count {
            return false;
        }
        message.buffer().iter()
            .all(|descriptor| descriptor.rank() >= 0 && descriptor.rank() < count && descriptor.age() >= 0)
    }

    /// Creates a thread handling messages received with `tag`. A PUSH
    /// receiver answers with the local buffer when pull is enabled; both
    /// receivers merge the received buffer into the view.
    fn start_receiver(&self, tag: MessageTag) -> JoinHandle<()> {
        let config = self.config.clone();
        let transport = Arc::clone(&self.transport);
        let view_arc = Arc::clone(&self.view);
        let shutdown_requested = Arc::clone(&self.shutdown);
        let own_rank = self.transport.own_rank();
        std::thread::Builder::new().name(format!("{} - {:?} receiver", own_rank, tag)).spawn(move || {
            log::info!("Started {:?} handling thread", tag);
            while let Ok(bytes) = transport.recv_blocking(tag) {
                // check for shutdown request
                if shutdown_requested.load(Ordering::SeqCst) {
                    break;
                }
                let message = match Message::from_bytes(&bytes, config.view_size()) {
                    Ok(message) => message,
                    Err(e) => {
                        log::warn!("Could not parse message: {}", e);
                        continue;
                    }
                };
                if !Self::is_valid(&message, transport.process_count()) {
                    log::warn!("Discarding malformed message from {}", message.sender());
                    continue;
                }
                log::debug!("Received {:?} message from {}", tag, message.sender());

                let mut view = view_arc.lock().unwrap();
                if tag == MessageTag::Push && config.is_pull() {
                    let buffer = Self::build_buffer(own_rank, &config, &mut view);
                    log::debug!("Built response buffer: {:?}", buffer);
                    let response = Message::new(own_rank, buffer);
                    match transport.send_async(message.sender(), MessageTag::Pull, response.as_bytes(config.view_size())) {
                        Ok(()) => log::trace!("Response buffer sent to {}", message.sender()),
                        Err(e) => log::error!("Error sending response buffer: {}", e),
                    }
                }
                view.select(config.view_size(), config.healing_factor(), config.swapping_factor(), message.buffer());
                view.increase_age();
            }
            log::info!("{:?} handling thread exiting", tag);
        }).unwrap()
    }

    /// Creates a thread that periodically executes the peer sampling
    fn start_sampling_activity(&self) -> JoinHandle<()> {
        let config = self.config.clone();
        let transport = Arc::clone(&self.transport);
        let view_arc = Arc::clone(&self.view);
        let shutdown_requested = Arc::clone(&self.shutdown);
        let own_rank = self.transport.own_rank();
        std::thread::Builder::new().name(format!("{} - sampling activity", own_rank)).spawn(move || {
            log::info!("Started peer sampling thread");
            loop {
                // Compute time for sleep cycle
                let deviation =
                    if config.sampling_deviation() == 0 { 0 }
                    else { rand::thread_rng().gen_range(0, config.sampling_deviation()) };
                let sleep_time = config.sampling_period() + deviation;
                std::thread::sleep(std::time::Duration::from_millis(sleep_time));

                // check for shutdown request
                if shutdown_requested.load(Ordering::SeqCst) {
                    break;
                }

                if own_rank == 0 {
                    Self::print_view(&view_arc.lock().unwrap());
                }

                let mut view = view_arc.lock().unwrap();
                if let Some(peer) = view.random_peer() {
                    let buffer = Self::build_buffer(own_rank, &config, &mut view);
                    log::debug!("Built buffer: {:?}", buffer);
                    let message = Message::new(own_rank, buffer);
                    match transport.send_async(peer, MessageTag::Push, message.as_bytes(config.view_size())) {
                        Ok(()) => log::trace!("Buffer sent to {}", peer),
                        Err(e) => log::error!("Error sending buffer: {}", e),
                    }
                    view.increase_age();
                }
                else {
                    log::warn!("No peer found for sampling");
                }
            }
            log::info!("Peer sampling thread exiting");
        }).unwrap()
    }

    /// Prints the view of the local process, one descriptor per line
    fn print_view(view: &View) {
        for descriptor in view.descriptors() {
            println!("rank: {}, age: {}", descriptor.rank(), descriptor.age());
        }
        println!("--------------");
    }
}
