//! Channel sources and synchronous sample sets.
//!
//! A sample set holds the samples of several channels taken at the same
//! instants, in a circular buffer of fixed capacity. Every slot carries a
//! time offset (seconds past the reference time) and, per channel, the
//! value(s), flags and a one-character status code.
//!
//! The plotting engine only reads through the [`SampleSet`] and
//! [`ChannelSource`] traits; [`SyncStore`] is the in-memory implementation.

mod store;
mod values;

pub use store::{ChannelStore, Sample, SyncStore};
pub use values::SampleValues;

use chrono::{DateTime, Local};

use crate::view::Range;

/// Storage type of a channel's values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ValueKind {
    /// Unsigned 8-bit integer.
    Char,
    /// Signed 16-bit integer.
    Short,
    /// Signed 32-bit integer.
    Long,
    /// Single precision float.
    Float,
    /// Double precision float.
    Double,
    /// Enumerated state index.
    Enum,
    /// Free-form text.
    String,
}

impl ValueKind {
    /// Check whether values of this kind can be plotted.
    pub fn is_numeric(self) -> bool {
        !matches!(self, Self::String)
    }

    /// Check whether this is an enumerated (state) kind.
    pub fn is_enum(self) -> bool {
        matches!(self, Self::Enum)
    }
}

/// Per-sample flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SampleFlags {
    /// No value was acquired for this slot.
    pub missing: bool,
    /// Acquisition restarted here; the sample must not connect to its
    /// predecessor.
    pub restart: bool,
    /// A previous drawing pass already rendered this slot.
    pub filled: bool,
}

/// Identifier of a channel within a sample set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChannelId(pub usize);

/// Read access to one channel of a sample set.
pub trait ChannelSource {
    /// Channel name.
    fn name(&self) -> &str;

    /// Storage type of the values.
    fn value_kind(&self) -> ValueKind;

    /// Number of elements per sample (1 for scalar channels).
    fn element_count(&self) -> usize;

    /// Whether the channel ever delivered data.
    fn has_data(&self) -> bool;

    /// Declared display limits.
    fn display_limits(&self) -> Range;

    /// Observed range of the data, if any finite value was stored.
    fn data_range(&self) -> Option<Range>;

    /// State labels of an enumerated channel.
    fn state_labels(&self) -> &[String];

    /// Element `element` of the sample in slot `index`, widened to `f64`.
    fn element(&self, index: usize, element: usize) -> f64;

    /// First element of the sample in slot `index`.
    fn value(&self, index: usize) -> f64 {
        self.element(index, 0)
    }

    /// Flags of the sample in slot `index`.
    fn flags(&self, index: usize) -> SampleFlags;

    /// Status code of the sample in slot `index` (`' '` when blank).
    fn status_code(&self, index: usize) -> char;
}

/// Read access to a synchronous, circular sample set.
pub trait SampleSet {
    /// Number of slots in the circular buffer.
    fn capacity(&self) -> usize;

    /// Number of slots currently holding samples.
    fn sample_count(&self) -> usize;

    /// Number of samples the acquisition was asked for.
    fn requested_count(&self) -> usize;

    /// Slot of the oldest sample.
    fn first_index(&self) -> Option<usize>;

    /// Slot of the newest sample.
    fn last_index(&self) -> Option<usize>;

    /// Seconds past the reference time for slot `index`.
    fn time_offset(&self, index: usize) -> f64;

    /// Reference time the offsets are measured from.
    fn reference_time(&self) -> Option<DateTime<Local>>;

    /// Look up a channel.
    fn channel(&self, id: ChannelId) -> Option<&dyn ChannelSource>;
}

/// Errors that can occur when appending data.
///
/// These errors indicate a sample row that does not match the channels of
/// the store it is appended to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AppendError {
    /// The row does not carry one sample per channel.
    #[error("row has {got} samples, store has {expected} channels")]
    ChannelCount {
        /// Channels in the store.
        expected: usize,
        /// Samples in the row.
        got: usize,
    },
    /// A sample does not carry the channel's element count.
    #[error("channel {channel:?} expects {expected} elements, got {got}")]
    ElementCount {
        /// Offending channel.
        channel: ChannelId,
        /// Elements per sample of the channel.
        expected: usize,
        /// Elements supplied.
        got: usize,
    },
}

/// Walk slots `begin..=end` of a circular buffer, wrapping at `capacity`.
///
/// Yields `begin` first and stops after yielding `end`. When `end` is not a
/// valid slot the walk stops after one full lap.
pub fn ring_indices(begin: usize, end: usize, capacity: usize) -> impl Iterator<Item = usize> {
    let capacity = capacity.max(1);
    let mut next = Some(begin % capacity);
    let mut remaining = capacity;
    std::iter::from_fn(move || {
        let index = next?;
        remaining -= 1;
        next = if index == end || remaining == 0 {
            None
        } else {
            Some((index + 1) % capacity)
        };
        Some(index)
    })
}
