//! Work queue shared by scan workers.

use crate::types::{Port, PortRange};
use std::collections::{HashSet, VecDeque};
use std::sync::{Mutex, MutexGuard};

/// Thread-safe FIFO of ports still waiting to be probed.
///
/// Every seeded port is handed out by [`WorkQueue::pop`] exactly once. Popping
/// never blocks on an empty queue: once drained it keeps returning `None`.
#[derive(Debug)]
pub struct WorkQueue {
    pending: Mutex<VecDeque<Port>>,
}

impl WorkQueue {
    /// Seed the queue with every port of a range, ascending.
    pub fn from_range(range: PortRange) -> Self {
        Self {
            pending: Mutex::new(range.iter().collect()),
        }
    }

    /// Seed the queue from a list; repeated ports are queued once.
    pub fn from_ports(ports: &[Port]) -> Self {
        let mut seen = HashSet::with_capacity(ports.len());
        let pending = ports.iter().copied().filter(|p| seen.insert(*p)).collect();
        Self {
            pending: Mutex::new(pending),
        }
    }

    /// Take the next port, or `None` once the queue is drained.
    pub fn pop(&self) -> Option<Port> {
        self.lock().pop_front()
    }

    /// Ports still pending.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // A worker that panicked while holding the lock cannot have left the
    // deque half-modified, so a poisoned guard is still usable.
    fn lock(&self) -> MutexGuard<'_, VecDeque<Port>> {
        self.pending.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    fn ports(raw: &[u16]) -> Vec<Port> {
        raw.iter().map(|&p| Port::new(p).unwrap()).collect()
    }

    #[test]
    fn test_drains_range_in_order() {
        let queue = WorkQueue::from_range(PortRange::from_bounds(10, 12).unwrap());
        assert_eq!(queue.len(), 3);
        assert_eq!(queue.pop().map(Port::as_u16), Some(10));
        assert_eq!(queue.pop().map(Port::as_u16), Some(11));
        assert_eq!(queue.pop().map(Port::as_u16), Some(12));
        assert_eq!(queue.pop(), None);
        assert_eq!(queue.pop(), None);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_from_ports_drops_duplicates() {
        let queue = WorkQueue::from_ports(&ports(&[80, 22, 80, 443, 22]));
        let drained: Vec<u16> = std::iter::from_fn(|| queue.pop()).map(Port::as_u16).collect();
        assert_eq!(drained, vec![80, 22, 443]);
    }

    #[test]
    fn test_empty_list_is_drained() {
        let queue = WorkQueue::from_ports(&[]);
        assert!(queue.is_empty());
        assert_eq!(queue.pop(), None);
    }

    #[test]
    fn test_concurrent_pops_hand_out_each_port_once() {
        let queue = Arc::new(WorkQueue::from_range(PortRange::from_bounds(1, 5000).unwrap()));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let queue = Arc::clone(&queue);
                thread::spawn(move || std::iter::from_fn(|| queue.pop()).collect::<Vec<_>>())
            })
            .collect();

        let mut all: Vec<u16> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .map(Port::as_u16)
            .collect();
        all.sort_unstable();

        assert_eq!(all, (1..=5000).collect::<Vec<_>>());
    }
}
