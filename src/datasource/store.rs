//! Ring-buffer sample set with per-slot flags and status codes.

use chrono::{DateTime, Local};

use crate::datasource::{
    AppendError, ChannelId, ChannelSource, SampleFlags, SampleSet, SampleValues, ValueKind,
    ring_indices,
};
use crate::view::Range;

/// One channel's contribution to a sample row.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    values: Vec<f64>,
    status: char,
    missing: bool,
    restart: bool,
}

impl Sample {
    /// A scalar sample.
    pub fn value(value: f64) -> Self {
        Self::array(vec![value])
    }

    /// An array sample with one value per element.
    pub fn array(values: Vec<f64>) -> Self {
        Self {
            values,
            status: ' ',
            missing: false,
            restart: false,
        }
    }

    /// A slot with no acquired value.
    pub fn missing() -> Self {
        Self {
            values: Vec::new(),
            status: ' ',
            missing: true,
            restart: false,
        }
    }

    /// Attach a status code.
    pub fn with_status(mut self, status: char) -> Self {
        self.status = status;
        self
    }

    /// Flag the sample as the start of a new acquisition run.
    pub fn restart(mut self) -> Self {
        self.restart = true;
        self
    }
}

/// Storage and metadata of one channel.
#[derive(Debug, Clone)]
pub struct ChannelStore {
    name: String,
    limits: Range,
    elements: usize,
    states: Vec<String>,
    connected: bool,
    values: SampleValues,
    flags: Vec<SampleFlags>,
    codes: Vec<char>,
    observed: Option<Range>,
}

impl ChannelStore {
    /// Describe a scalar channel of the given kind.
    pub fn new(name: impl Into<String>, kind: ValueKind) -> Self {
        Self {
            name: name.into(),
            limits: Range::point(0.0),
            elements: 1,
            states: Vec::new(),
            connected: true,
            values: SampleValues::with_len(kind, 0),
            flags: Vec::new(),
            codes: Vec::new(),
            observed: None,
        }
    }

    /// Set the display limits.
    pub fn with_limits(mut self, low: f64, high: f64) -> Self {
        self.limits = Range { min: low, max: high };
        self
    }

    /// Set the number of elements per sample.
    pub fn with_elements(mut self, elements: usize) -> Self {
        self.elements = elements.max(1);
        self
    }

    /// Set the state labels of an enumerated channel.
    pub fn with_states<I, S>(mut self, states: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.states = states.into_iter().map(Into::into).collect();
        self
    }

    /// Mark the channel as never connected.
    pub fn disconnected(mut self) -> Self {
        self.connected = false;
        self
    }

    fn allocate(&mut self, capacity: usize) {
        self.values = SampleValues::with_len(self.values.kind(), capacity * self.elements);
        self.flags = vec![SampleFlags::default(); capacity];
        self.codes = vec![' '; capacity];
    }

    fn write(&mut self, slot: usize, sample: &Sample) {
        self.flags[slot] = SampleFlags {
            missing: sample.missing,
            restart: sample.restart,
            filled: false,
        };
        self.codes[slot] = sample.status;
        if sample.missing {
            return;
        }
        let base = slot * self.elements;
        for (element, value) in sample.values.iter().enumerate() {
            self.values.store(base + element, *value);
            let stored = self.values.decode(base + element);
            if !stored.is_finite() {
                continue;
            }
            match self.observed.as_mut() {
                Some(range) => range.expand_to_include(stored),
                None => self.observed = Some(Range::point(stored)),
            }
        }
    }
}

impl ChannelSource for ChannelStore {
    fn name(&self) -> &str {
        &self.name
    }

    fn value_kind(&self) -> ValueKind {
        self.values.kind()
    }

    fn element_count(&self) -> usize {
        self.elements
    }

    fn has_data(&self) -> bool {
        self.connected
    }

    fn display_limits(&self) -> Range {
        self.limits
    }

    fn data_range(&self) -> Option<Range> {
        self.observed
    }

    fn state_labels(&self) -> &[String] {
        &self.states
    }

    fn element(&self, index: usize, element: usize) -> f64 {
        if element >= self.elements {
            return f64::NAN;
        }
        self.values.decode(index * self.elements + element)
    }

    fn flags(&self, index: usize) -> SampleFlags {
        self.flags.get(index).copied().unwrap_or_default()
    }

    fn status_code(&self, index: usize) -> char {
        self.codes.get(index).copied().unwrap_or(' ')
    }
}

/// Circular synchronous sample set.
///
/// Appending into a full store overwrites the oldest slot. Overwriting a
/// slot always clears its flags, so a `filled` mark never survives into a
/// newer sample.
#[derive(Debug, Clone)]
pub struct SyncStore {
    capacity: usize,
    requested: usize,
    reference: Option<DateTime<Local>>,
    offsets: Vec<f64>,
    channels: Vec<ChannelStore>,
    first: Option<usize>,
    last: Option<usize>,
    count: usize,
}

impl SyncStore {
    /// Create an empty store with room for `capacity` samples.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            requested: capacity,
            reference: None,
            offsets: vec![0.0; capacity],
            channels: Vec::new(),
            first: None,
            last: None,
            count: 0,
        }
    }

    /// Set the time the offsets are measured from.
    pub fn with_reference_time(mut self, reference: DateTime<Local>) -> Self {
        self.reference = Some(reference);
        self
    }

    /// Set the number of samples the acquisition was asked for.
    pub fn with_requested_count(mut self, requested: usize) -> Self {
        self.requested = requested;
        self
    }

    /// Add a channel and return its id.
    ///
    /// Channels added after samples were pushed start out with all slots
    /// missing.
    pub fn add_channel(&mut self, mut channel: ChannelStore) -> ChannelId {
        channel.allocate(self.capacity);
        if self.count > 0 {
            for flags in &mut channel.flags {
                flags.missing = true;
            }
        }
        self.channels.push(channel);
        ChannelId(self.channels.len() - 1)
    }

    /// Find a channel by name.
    pub fn find_channel(&self, name: &str) -> Option<ChannelId> {
        self.channels
            .iter()
            .position(|channel| channel.name == name)
            .map(ChannelId)
    }

    /// Number of channels.
    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Append a row with one sample per channel, returning the slot used.
    pub fn push(&mut self, offset: f64, row: &[Sample]) -> Result<usize, AppendError> {
        if row.len() != self.channels.len() {
            return Err(AppendError::ChannelCount {
                expected: self.channels.len(),
                got: row.len(),
            });
        }
        for (index, (channel, sample)) in self.channels.iter().zip(row).enumerate() {
            if !sample.missing && sample.values.len() != channel.elements {
                return Err(AppendError::ElementCount {
                    channel: ChannelId(index),
                    expected: channel.elements,
                    got: sample.values.len(),
                });
            }
        }

        let slot = match self.last {
            Some(last) => (last + 1) % self.capacity,
            None => 0,
        };
        if self.count == self.capacity {
            self.first = Some((slot + 1) % self.capacity);
        } else {
            self.count += 1;
            if self.first.is_none() {
                self.first = Some(slot);
            }
        }
        self.last = Some(slot);
        self.offsets[slot] = offset;
        for (channel, sample) in self.channels.iter_mut().zip(row) {
            channel.write(slot, sample);
        }
        Ok(slot)
    }

    /// Flag slots `begin..=end` (wrapping) of every channel as already drawn.
    pub fn mark_filled(&mut self, begin: usize, end: usize) {
        for index in ring_indices(begin, end, self.capacity) {
            for channel in &mut self.channels {
                channel.flags[index].filled = true;
            }
        }
    }
}

impl SampleSet for SyncStore {
    fn capacity(&self) -> usize {
        self.capacity
    }

    fn sample_count(&self) -> usize {
        self.count
    }

    fn requested_count(&self) -> usize {
        self.requested
    }

    fn first_index(&self) -> Option<usize> {
        self.first
    }

    fn last_index(&self) -> Option<usize> {
        self.last
    }

    fn time_offset(&self, index: usize) -> f64 {
        self.offsets.get(index).copied().unwrap_or(f64::NAN)
    }

    fn reference_time(&self) -> Option<DateTime<Local>> {
        self.reference
    }

    fn channel(&self, id: ChannelId) -> Option<&dyn ChannelSource> {
        self.channels
            .get(id.0)
            .map(|channel| channel as &dyn ChannelSource)
    }
}
