use parking_lot::Mutex;

/// Ring storage guarded by the buffer's lock
#[derive(Debug)]
struct Ring {
    slots: Box<[i64]>,
    /// Index of the oldest element
    head: usize,
    len: usize,
}

/// Outcome of a single [`BoundedBuffer::push`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushOutcome {
    Stored,
    /// The buffer was full and this oldest value was overwritten
    Evicted(i64),
}

/// A fixed-capacity buffer of integers that overwrites its oldest element
/// when full and is emptied atomically by [`drain_and_clear`](Self::drain_and_clear).
///
/// A single lock covers the whole ring, so `push` and `drain_and_clear` are
/// mutually exclusive with each other and with concurrent pushes. Eviction
/// uses modular indexing: retained values are never shifted.
#[derive(Debug)]
pub struct BoundedBuffer {
    ring: Mutex<Ring>,
    capacity: usize,
}

impl BoundedBuffer {
    /// Create an empty buffer holding at most `capacity` values.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "capacity must be non-zero");
        Self {
            ring: Mutex::new(Ring {
                slots: vec![0; capacity].into_boxed_slice(),
                head: 0,
                len: 0,
            }),
            capacity,
        }
    }

    /// Append `value` as the newest element, evicting the oldest when full
    pub fn push(&self, value: i64) -> PushOutcome {
        let mut ring = self.ring.lock();
        if ring.len == self.capacity {
            let head = ring.head;
            let evicted = std::mem::replace(&mut ring.slots[head], value);
            ring.head = (head + 1) % self.capacity;
            PushOutcome::Evicted(evicted)
        } else {
            let tail = (ring.head + ring.len) % self.capacity;
            ring.slots[tail] = value;
            ring.len += 1;
            PushOutcome::Stored
        }
    }

    /// Take every held value, oldest first, and leave the buffer empty
    pub fn drain_and_clear(&self) -> Vec<i64> {
        let mut ring = self.ring.lock();
        let drained = (0..ring.len)
            .map(|i| ring.slots[(ring.head + i) % self.capacity])
            .collect();
        ring.head = 0;
        ring.len = 0;
        drained
    }

    pub fn len(&self) -> usize {
        self.ring.lock().len
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
