use std::{
    collections::VecDeque,
    sync::{Arc, Condvar, Mutex},
    time::{Duration, Instant},
};

/// Blocking multi-producer queue between the accept thread and `recv()` callers.
///
/// `pop()` returning `None` means a blocked thread was released
/// with [`MessagesQueue::unblock`].
pub(crate) struct MessagesQueue<T> {
    condvar: Condvar,
    state: Mutex<QueueState<T>>,
}

struct QueueState<T> {
    queue: VecDeque<T>,
    // number of threads to release without a message
    unblocked: usize,
}

impl<T> MessagesQueue<T> {
    pub(crate) fn with_capacity(capacity: usize) -> Arc<Self> {
        Arc::new(MessagesQueue {
            condvar: Condvar::new(),
            state: Mutex::new(QueueState {
                queue: VecDeque::with_capacity(capacity),
                unblocked: 0,
            }),
        })
    }

    pub(crate) fn push(&self, value: T) {
        let mut state = self.state.lock().unwrap();
        state.queue.push_back(value);
        self.condvar.notify_one();
    }

    /// Blocks until a message is available.
    pub(crate) fn pop(&self) -> Option<T> {
        let mut state = self.state.lock().unwrap();

        loop {
            if let Some(value) = state.queue.pop_front() {
                return Some(value);
            }

            if state.unblocked > 0 {
                state.unblocked -= 1;
                return None;
            }

            state = self.condvar.wait(state).unwrap();
        }
    }

    /// Same as `pop()` but doesn't block.
    pub(crate) fn try_pop(&self) -> Option<T> {
        let mut state = self.state.lock().unwrap();
        state.queue.pop_front()
    }

    /// Same as `pop()` but doesn't block longer than `timeout`.
    pub(crate) fn pop_timeout(&self, timeout: Duration) -> Option<T> {
        let deadline = Instant::now() + timeout;
        let mut state = self.state.lock().unwrap();

        loop {
            if let Some(value) = state.queue.pop_front() {
                return Some(value);
            }

            if state.unblocked > 0 {
                state.unblocked -= 1;
                return None;
            }

            let now = Instant::now();
            if now >= deadline {
                return None;
            }

            let (next_state, _) = self.condvar.wait_timeout(state, deadline - now).unwrap();
            state = next_state;
        }
    }

    /// Releases one thread stuck in `pop()`.
    pub(crate) fn unblock(&self) {
        let mut state = self.state.lock().unwrap();
        state.unblocked += 1;
        self.condvar.notify_one();
    }
}

#[cfg(test)]
mod tests {
    use std::{thread, time::Duration};

    use super::MessagesQueue;

    #[test]
    fn test_push_pop() {
        let queue = MessagesQueue::with_capacity(2);
        queue.push(1);
        queue.push(2);

        assert_eq!(queue.pop(), Some(1));
        assert_eq!(queue.try_pop(), Some(2));
        assert_eq!(queue.try_pop(), None);
    }

    #[test]
    fn test_pop_timeout() {
        let queue: std::sync::Arc<MessagesQueue<u8>> = MessagesQueue::with_capacity(1);
        assert_eq!(queue.pop_timeout(Duration::from_millis(20)), None);

        queue.push(7);
        assert_eq!(queue.pop_timeout(Duration::from_millis(20)), Some(7));
    }

    #[test]
    fn test_unblock() {
        let queue: std::sync::Arc<MessagesQueue<u8>> = MessagesQueue::with_capacity(1);
        let inside = std::sync::Arc::clone(&queue);

        let guard = thread::spawn(move || inside.pop());
        thread::sleep(Duration::from_millis(50));
        queue.unblock();

        assert_eq!(guard.join().unwrap(), None);
    }
}
