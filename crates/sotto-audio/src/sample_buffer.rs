/// Fixed-capacity circular buffer over audio samples.
///
/// Keeps the most recent `capacity` samples as a sliding window so the
/// segmenter can reach back for pre-speech padding after the fact. Range
/// reads are addressed logically: index 0 is the oldest retained sample.
pub struct SampleBuffer {
    data: Vec<f32>,
    /// Next physical write index.
    write_pos: usize,
    /// Logical length, always <= capacity.
    len: usize,
}

impl SampleBuffer {
    /// Create a buffer holding at most `capacity` samples.
    pub fn new(capacity: usize) -> Self {
        Self {
            data: vec![0.0; capacity],
            write_pos: 0,
            len: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Append samples, overwriting the oldest when full. Writing more than
    /// `capacity` samples at once keeps only the trailing `capacity`.
    pub fn write(&mut self, samples: &[f32]) {
        let cap = self.data.len();
        if cap == 0 || samples.is_empty() {
            return;
        }

        let src = if samples.len() > cap {
            tracing::debug!(
                "Write of {} samples exceeds capacity {}, keeping trailing window",
                samples.len(),
                cap
            );
            &samples[samples.len() - cap..]
        } else {
            samples
        };

        // Write may wrap; fill both regions.
        let first = (cap - self.write_pos).min(src.len());
        self.data[self.write_pos..self.write_pos + first].copy_from_slice(&src[..first]);
        let rest = src.len() - first;
        if rest > 0 {
            self.data[..rest].copy_from_slice(&src[first..]);
        }

        self.write_pos = (self.write_pos + src.len()) % cap;
        self.len = (self.len + src.len()).min(cap);
    }

    /// Read the logical range `[start, end)` as a contiguous copy.
    ///
    /// Bounds are clamped to the current content; `start >= end` yields an
    /// empty result. Out-of-range bounds never panic and never fabricate
    /// samples.
    pub fn read_range(&self, start: usize, end: usize) -> Vec<f32> {
        let end = end.min(self.len);
        if start >= end {
            return Vec::new();
        }

        let cap = self.data.len();
        let head = (self.write_pos + cap - self.len) % cap;
        let from = (head + start) % cap;
        let count = end - start;

        let mut out = Vec::with_capacity(count);
        let first = (cap - from).min(count);
        out.extend_from_slice(&self.data[from..from + first]);
        out.extend_from_slice(&self.data[..count - first]);
        out
    }

    /// Read the entire logical content, oldest first.
    pub fn read(&self) -> Vec<f32> {
        self.read_range(0, self.len)
    }

    /// Reset to empty without changing capacity.
    pub fn clear(&mut self) {
        self.write_pos = 0;
        self.len = 0;
    }
}
