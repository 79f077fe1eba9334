//! Typed value buffers with a single decode path.

use crate::datasource::ValueKind;

/// Flat value buffer of one channel, `slots * elements` long.
#[derive(Debug, Clone, PartialEq)]
pub enum SampleValues {
    /// Unsigned 8-bit integers.
    Char(Vec<u8>),
    /// Signed 16-bit integers.
    Short(Vec<i16>),
    /// Signed 32-bit integers.
    Long(Vec<i32>),
    /// Single precision floats.
    Float(Vec<f32>),
    /// Double precision floats.
    Double(Vec<f64>),
    /// Enumerated state indices.
    Enum(Vec<u16>),
    /// Text values.
    String(Vec<String>),
}

impl SampleValues {
    /// Allocate a zeroed buffer of `len` values.
    pub fn with_len(kind: ValueKind, len: usize) -> Self {
        match kind {
            ValueKind::Char => Self::Char(vec![0; len]),
            ValueKind::Short => Self::Short(vec![0; len]),
            ValueKind::Long => Self::Long(vec![0; len]),
            ValueKind::Float => Self::Float(vec![0.0; len]),
            ValueKind::Double => Self::Double(vec![0.0; len]),
            ValueKind::Enum => Self::Enum(vec![0; len]),
            ValueKind::String => Self::String(vec![String::new(); len]),
        }
    }

    /// Storage type of the buffer.
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Char(_) => ValueKind::Char,
            Self::Short(_) => ValueKind::Short,
            Self::Long(_) => ValueKind::Long,
            Self::Float(_) => ValueKind::Float,
            Self::Double(_) => ValueKind::Double,
            Self::Enum(_) => ValueKind::Enum,
            Self::String(_) => ValueKind::String,
        }
    }

    /// Number of values in the buffer.
    pub fn len(&self) -> usize {
        match self {
            Self::Char(values) => values.len(),
            Self::Short(values) => values.len(),
            Self::Long(values) => values.len(),
            Self::Float(values) => values.len(),
            Self::Double(values) => values.len(),
            Self::Enum(values) => values.len(),
            Self::String(values) => values.len(),
        }
    }

    /// Check whether the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Widen the value at `slot` to `f64`.
    ///
    /// Enumerated values decode to their state index. Text and out-of-range
    /// slots decode to NaN.
    pub fn decode(&self, slot: usize) -> f64 {
        let value = match self {
            Self::Char(values) => values.get(slot).map(|v| f64::from(*v)),
            Self::Short(values) => values.get(slot).map(|v| f64::from(*v)),
            Self::Long(values) => values.get(slot).map(|v| f64::from(*v)),
            Self::Float(values) => values.get(slot).map(|v| f64::from(*v)),
            Self::Double(values) => values.get(slot).copied(),
            Self::Enum(values) => values.get(slot).map(|v| f64::from(*v)),
            Self::String(_) => None,
        };
        value.unwrap_or(f64::NAN)
    }

    /// Store `value` at `slot`, narrowing to the buffer's type.
    ///
    /// Integer kinds saturate at their bounds. Out-of-range slots are ignored.
    pub fn store(&mut self, slot: usize, value: f64) {
        match self {
            Self::Char(values) => put(values, slot, value as u8),
            Self::Short(values) => put(values, slot, value as i16),
            Self::Long(values) => put(values, slot, value as i32),
            Self::Float(values) => put(values, slot, value as f32),
            Self::Double(values) => put(values, slot, value),
            Self::Enum(values) => put(values, slot, value as u16),
            Self::String(values) => put(values, slot, value.to_string()),
        }
    }
}

fn put<T>(values: &mut [T], slot: usize, value: T) {
    if let Some(target) = values.get_mut(slot) {
        *target = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers_widen_exactly() {
        let mut values = SampleValues::with_len(ValueKind::Short, 2);
        values.store(1, -1234.0);
        assert_eq!(values.decode(1), -1234.0);
        assert_eq!(values.decode(0), 0.0);
    }

    #[test]
    fn narrowing_saturates() {
        let mut values = SampleValues::with_len(ValueKind::Char, 1);
        values.store(0, 300.0);
        assert_eq!(values.decode(0), 255.0);
    }

    #[test]
    fn enum_decodes_to_state_index() {
        let mut values = SampleValues::with_len(ValueKind::Enum, 3);
        values.store(2, 2.0);
        assert_eq!(values.kind(), ValueKind::Enum);
        assert_eq!(values.decode(2), 2.0);
    }

    #[test]
    fn text_and_out_of_range_decode_to_nan() {
        let mut text = SampleValues::with_len(ValueKind::String, 1);
        text.store(0, 1.5);
        assert!(text.decode(0).is_nan());
        let values = SampleValues::with_len(ValueKind::Double, 1);
        assert!(values.decode(5).is_nan());
    }
}
