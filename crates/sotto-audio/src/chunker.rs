use std::collections::VecDeque;

/// Reassembles arbitrarily sized sample chunks into fixed-size frames.
///
/// Completed frames queue in arrival order; a trailing remainder accumulates
/// until the next `enqueue` completes it. Concatenating every frame ever
/// produced plus the current partial accumulator equals the concatenation of
/// every input ever enqueued.
pub struct FrameChunker {
    frame_size: usize,
    queue: VecDeque<Vec<f32>>,
    partial: Vec<f32>,
}

impl FrameChunker {
    pub fn new(frame_size: usize) -> Self {
        Self {
            frame_size,
            queue: VecDeque::new(),
            partial: Vec::with_capacity(frame_size),
        }
    }

    pub fn frame_size(&self) -> usize {
        self.frame_size
    }

    /// Accept a chunk of any length, queueing each completed frame.
    pub fn enqueue(&mut self, input: &[f32]) {
        // Frame-aligned input with nothing pending skips the accumulator.
        if self.partial.is_empty() && input.len() == self.frame_size {
            self.queue.push_back(input.to_vec());
            return;
        }

        let mut pos = 0;
        while pos < input.len() {
            let take = (self.frame_size - self.partial.len()).min(input.len() - pos);
            self.partial.extend_from_slice(&input[pos..pos + take]);
            pos += take;

            if self.partial.len() == self.frame_size {
                let frame =
                    std::mem::replace(&mut self.partial, Vec::with_capacity(self.frame_size));
                self.queue.push_back(frame);
            }
        }
    }

    /// Pop the next complete frame, or `None` when nothing is ready.
    /// Never blocks; an empty queue is the normal underrun case.
    pub fn dequeue(&mut self) -> Option<Vec<f32>> {
        self.queue.pop_front()
    }

    /// Number of complete frames waiting in the queue.
    pub fn ready(&self) -> usize {
        self.queue.len()
    }

    /// Number of samples sitting in the partial accumulator.
    pub fn partial_len(&self) -> usize {
        self.partial.len()
    }

    /// Discard queued frames and the partial accumulator.
    pub fn clear(&mut self) {
        self.queue.clear();
        self.partial.clear();
    }
}
