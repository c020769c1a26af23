//! Blocking FIFO queue shared between the kernel controller and its worker.

use std::collections::VecDeque;

use parking_lot::{Condvar, Mutex};

/// Thread-safe FIFO queue using `parking_lot::Mutex` and a condition variable.
pub struct MessageQueue<T> {
    items: Mutex<VecDeque<T>>,
    /// Signalled on every push
    not_empty: Condvar,
}

impl<T> MessageQueue<T> {
    pub fn new() -> Self {
        Self {
            items: Mutex::new(VecDeque::new()),
            not_empty: Condvar::new(),
        }
    }

    /// Append a message and wake one waiting consumer.
    pub fn push(&self, item: T) {
        let mut items = self.items.lock();
        items.push_back(item);
        self.not_empty.notify_one();
    }

    /// Pop the oldest message without blocking.
    pub fn try_pop(&self) -> Option<T> {
        self.items.lock().pop_front()
    }

    /// Pop the oldest message, blocking until one is available.
    pub fn wait_and_pop(&self) -> T {
        let mut items = self.items.lock();
        loop {
            if let Some(item) = items.pop_front() {
                return item;
            }
            self.not_empty.wait(&mut items);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.lock().is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.lock().len()
    }
}

impl<T> Default for MessageQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_fifo_order() {
        let queue = MessageQueue::new();
        queue.push(1);
        queue.push(2);
        queue.push(3);
        assert_eq!(queue.len(), 3);
        assert_eq!(queue.try_pop(), Some(1));
        assert_eq!(queue.wait_and_pop(), 2);
        assert_eq!(queue.try_pop(), Some(3));
        assert!(queue.is_empty());
    }

    #[test]
    fn test_try_pop_empty() {
        let queue: MessageQueue<String> = MessageQueue::new();
        assert!(queue.is_empty());
        assert_eq!(queue.try_pop(), None);
    }

    #[test]
    fn test_wait_and_pop_blocks_until_push() {
        let queue = Arc::new(MessageQueue::new());
        let producer = {
            let queue = Arc::clone(&queue);
            thread::spawn(move || {
                thread::sleep(Duration::from_millis(20));
                queue.push("hello".to_string());
            })
        };
        assert_eq!(queue.wait_and_pop(), "hello");
        producer.join().unwrap();
    }

    #[test]
    fn test_many_producers_one_consumer() {
        let queue = Arc::new(MessageQueue::new());
        let producers: Vec<_> = (0..4)
            .map(|id| {
                let queue = Arc::clone(&queue);
                thread::spawn(move || {
                    for n in 0..25 {
                        queue.push(id * 100 + n);
                    }
                })
            })
            .collect();

        let mut received = Vec::new();
        for _ in 0..100 {
            received.push(queue.wait_and_pop());
        }
        for producer in producers {
            producer.join().unwrap();
        }

        // Each producer's messages arrive in the order they were pushed
        for id in 0..4 {
            let own: Vec<i32> = received.iter().copied().filter(|v| v / 100 == id).collect();
            assert_eq!(own, (0..25).map(|n| id * 100 + n).collect::<Vec<_>>());
        }
        assert!(queue.is_empty());
    }
}
