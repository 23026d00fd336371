use std::error::Error;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::{Arc, Mutex};
use crate::message::MessageTag;

/// Point-to-point message transport consumed by the sampling service.
///
/// Implementations must be safe for concurrent use: the service issues
/// sends and receives from three threads at once.
pub trait Transport: Send + Sync {
    /// Number of processes in the cohort
    fn process_count(&self) -> usize;

    /// Rank of the local process
    fn own_rank(&self) -> i32;

    /// Whether the transport may be driven from multiple threads at once
    fn concurrent(&self) -> bool;

    /// Queues `bytes` for delivery to `peer`. Returns before the peer has
    /// observed the message.
    fn send_async(&self, peer: i32, tag: MessageTag, bytes: Vec<u8>) -> Result<(), Box<dyn Error>>;

    /// Blocks until a message with `tag` arrives from any source. An error
    /// means the endpoint was closed and the receive loop should exit.
    fn recv_blocking(&self, tag: MessageTag) -> Result<Vec<u8>, Box<dyn Error>>;

    /// Terminates the process with `code`
    fn abort(&self, code: i32) -> !;
}

/// The tagged inbound channels of one endpoint
struct Mailbox {
    push: Mutex<Sender<Vec<u8>>>,
    pull: Mutex<Sender<Vec<u8>>>,
}

/// One endpoint of an in-process cluster, connected to every other
/// endpoint through a channel per message tag
pub struct LoopbackTransport {
    rank: i32,
    mailboxes: Arc<Vec<Mailbox>>,
    push_inbox: Mutex<Receiver<Vec<u8>>>,
    pull_inbox: Mutex<Receiver<Vec<u8>>>,
}

/// Creates a fully connected in-process cluster of `process_count`
/// endpoints, one per rank
pub fn loopback_cluster(process_count: usize) -> Vec<LoopbackTransport> {
    let mut mailboxes = Vec::with_capacity(process_count);
    let mut inboxes = Vec::with_capacity(process_count);
    for _ in 0..process_count {
        let (push_sender, push_inbox) = channel();
        let (pull_sender, pull_inbox) = channel();
        mailboxes.push(Mailbox {
            push: Mutex::new(push_sender),
            pull: Mutex::new(pull_sender),
        });
        inboxes.push((push_inbox, pull_inbox));
    }
    let mailboxes = Arc::new(mailboxes);
    inboxes.into_iter().enumerate()
        .map(|(rank, (push_inbox, pull_inbox))| LoopbackTransport {
            rank: rank as i32,
            mailboxes: Arc::clone(&mailboxes),
            push_inbox: Mutex::new(push_inbox),
            pull_inbox: Mutex::new(pull_inbox),
        })
        .collect()
}

impl Transport for LoopbackTransport {
    fn process_count(&self) -> usize {
        self.mailboxes.len()
    }

    fn own_rank(&self) -> i32 {
        self.rank
    }

    fn concurrent(&self) -> bool {
        true
    }

    fn send_async(&self, peer: i32, tag: MessageTag, bytes: Vec<u8>) -> Result<(), Box<dyn Error>> {
        if peer < 0 || peer as usize >= self.mailboxes.len() {
            Err(format!("no such peer: {}", peer))?
        }
        let mailbox = &self.mailboxes[peer as usize];
        let sender = match tag {
            MessageTag::Push => mailbox.push.lock().unwrap(),
            MessageTag::Pull => mailbox.pull.lock().unwrap(),
        };
        sender.send(bytes).map_err(|_| "peer endpoint closed")?;
        Ok(())
    }

    fn recv_blocking(&self, tag: MessageTag) -> Result<Vec<u8>, Box<dyn Error>> {
        let inbox = match tag {
            MessageTag::Push => self.push_inbox.lock().unwrap(),
            MessageTag::Pull => self.pull_inbox.lock().unwrap(),
        };
        let bytes = inbox.recv().map_err(|_| "transport closed")?;
        Ok(bytes)
    }

    fn abort(&self, code: i32) -> ! {
        log::error!("Transport abort requested with code {}", code);
        std::process::exit(code);
    }
}
