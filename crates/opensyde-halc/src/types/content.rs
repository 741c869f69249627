// crates/opensyde-halc/src/types/content.rs

//! Typed values as they appear in definition templates and configured parameters.

use std::cmp::Ordering;
use std::fmt;

/// Scalar base types supported by HALC values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarType {
    U8,
    U16,
    U32,
    U64,
    S8,
    S16,
    S32,
    S64,
    F32,
    F64,
}

impl ScalarType {
    /// The tag used in the `type` / `base-type` attributes.
    pub fn as_str(self) -> &'static str {
        match self {
            ScalarType::U8 => "uint8",
            ScalarType::U16 => "uint16",
            ScalarType::U32 => "uint32",
            ScalarType::U64 => "uint64",
            ScalarType::S8 => "sint8",
            ScalarType::S16 => "sint16",
            ScalarType::S32 => "sint32",
            ScalarType::S64 => "sint64",
            ScalarType::F32 => "float32",
            ScalarType::F64 => "float64",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "uint8" => Some(ScalarType::U8),
            "uint16" => Some(ScalarType::U16),
            "uint32" => Some(ScalarType::U32),
            "uint64" => Some(ScalarType::U64),
            "sint8" => Some(ScalarType::S8),
            "sint16" => Some(ScalarType::S16),
            "sint32" => Some(ScalarType::S32),
            "sint64" => Some(ScalarType::S64),
            "float32" => Some(ScalarType::F32),
            "float64" => Some(ScalarType::F64),
            _ => None,
        }
    }

    pub fn is_integer(self) -> bool {
        !matches!(self, ScalarType::F32 | ScalarType::F64)
    }

    /// Smallest value representable by this type.
    pub fn min_value(self) -> Scalar {
        match self {
            ScalarType::U8 => Scalar::U8(u8::MIN),
            ScalarType::U16 => Scalar::U16(u16::MIN),
            ScalarType::U32 => Scalar::U32(u32::MIN),
            ScalarType::U64 => Scalar::U64(u64::MIN),
            ScalarType::S8 => Scalar::S8(i8::MIN),
            ScalarType::S16 => Scalar::S16(i16::MIN),
            ScalarType::S32 => Scalar::S32(i32::MIN),
            ScalarType::S64 => Scalar::S64(i64::MIN),
            ScalarType::F32 => Scalar::F32(f32::MIN),
            ScalarType::F64 => Scalar::F64(f64::MIN),
        }
    }

    /// Largest value representable by this type.
    pub fn max_value(self) -> Scalar {
        match self {
            ScalarType::U8 => Scalar::U8(u8::MAX),
            ScalarType::U16 => Scalar::U16(u16::MAX),
            ScalarType::U32 => Scalar::U32(u32::MAX),
            ScalarType::U64 => Scalar::U64(u64::MAX),
            ScalarType::S8 => Scalar::S8(i8::MAX),
            ScalarType::S16 => Scalar::S16(i16::MAX),
            ScalarType::S32 => Scalar::S32(i32::MAX),
            ScalarType::S64 => Scalar::S64(i64::MAX),
            ScalarType::F32 => Scalar::F32(f32::MAX),
            ScalarType::F64 => Scalar::F64(f64::MAX),
        }
    }

    /// The zero value of this type.
    pub fn zero(self) -> Scalar {
        match self {
            ScalarType::U8 => Scalar::U8(0),
            ScalarType::U16 => Scalar::U16(0),
            ScalarType::U32 => Scalar::U32(0),
            ScalarType::U64 => Scalar::U64(0),
            ScalarType::S8 => Scalar::S8(0),
            ScalarType::S16 => Scalar::S16(0),
            ScalarType::S32 => Scalar::S32(0),
            ScalarType::S64 => Scalar::S64(0),
            ScalarType::F32 => Scalar::F32(0.0),
            ScalarType::F64 => Scalar::F64(0.0),
        }
    }

    /// Parses a textual value. Integers accept decimal or `0x` hexadecimal.
    pub fn parse_value(self, text: &str) -> Option<Scalar> {
        // Helper macro to share the decimal/hex split between all integer widths
        macro_rules! parse_integer {
            ($text:expr, $variant:path, $type:ty) => {{
                let text = $text;
                match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
                    Some(hex) => <$type>::from_str_radix(hex, 16).ok().map($variant),
                    None => text.parse::<$type>().ok().map($variant),
                }
            }};
        }

        let text = text.trim();
        match self {
            ScalarType::U8 => parse_integer!(text, Scalar::U8, u8),
            ScalarType::U16 => parse_integer!(text, Scalar::U16, u16),
            ScalarType::U32 => parse_integer!(text, Scalar::U32, u32),
            ScalarType::U64 => parse_integer!(text, Scalar::U64, u64),
            ScalarType::S8 => parse_integer!(text, Scalar::S8, i8),
            ScalarType::S16 => parse_integer!(text, Scalar::S16, i16),
            ScalarType::S32 => parse_integer!(text, Scalar::S32, i32),
            ScalarType::S64 => parse_integer!(text, Scalar::S64, i64),
            ScalarType::F32 => text.parse::<f32>().ok().map(Scalar::F32),
            ScalarType::F64 => text.parse::<f64>().ok().map(Scalar::F64),
        }
    }

    /// Converts a bit pattern into this (integer) type, if it fits.
    pub fn from_bits(self, bits: u64) -> Option<Scalar> {
        match self {
            ScalarType::U8 => u8::try_from(bits).ok().map(Scalar::U8),
            ScalarType::U16 => u16::try_from(bits).ok().map(Scalar::U16),
            ScalarType::U32 => u32::try_from(bits).ok().map(Scalar::U32),
            ScalarType::U64 => Some(Scalar::U64(bits)),
            // Signed types take the pattern as two's complement of their width.
            ScalarType::S8 => u8::try_from(bits).ok().map(|v| Scalar::S8(v as i8)),
            ScalarType::S16 => u16::try_from(bits).ok().map(|v| Scalar::S16(v as i16)),
            ScalarType::S32 => u32::try_from(bits).ok().map(|v| Scalar::S32(v as i32)),
            ScalarType::S64 => Some(Scalar::S64(bits as i64)),
            ScalarType::F32 | ScalarType::F64 => None,
        }
    }
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single value of one of the `ScalarType`s.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scalar {
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    S8(i8),
    S16(i16),
    S32(i32),
    S64(i64),
    F32(f32),
    F64(f64),
}

impl Scalar {
    pub fn scalar_type(&self) -> ScalarType {
        match self {
            Scalar::U8(_) => ScalarType::U8,
            Scalar::U16(_) => ScalarType::U16,
            Scalar::U32(_) => ScalarType::U32,
            Scalar::U64(_) => ScalarType::U64,
            Scalar::S8(_) => ScalarType::S8,
            Scalar::S16(_) => ScalarType::S16,
            Scalar::S32(_) => ScalarType::S32,
            Scalar::S64(_) => ScalarType::S64,
            Scalar::F32(_) => ScalarType::F32,
            Scalar::F64(_) => ScalarType::F64,
        }
    }

    fn as_i128(&self) -> Option<i128> {
        match *self {
            Scalar::U8(v) => Some(v.into()),
            Scalar::U16(v) => Some(v.into()),
            Scalar::U32(v) => Some(v.into()),
            Scalar::U64(v) => Some(v.into()),
            Scalar::S8(v) => Some(v.into()),
            Scalar::S16(v) => Some(v.into()),
            Scalar::S32(v) => Some(v.into()),
            Scalar::S64(v) => Some(v.into()),
            Scalar::F32(_) | Scalar::F64(_) => None,
        }
    }

    fn as_f64(&self) -> f64 {
        match *self {
            Scalar::F32(v) => v.into(),
            Scalar::F64(v) => v,
            // Integers are compared exactly through `as_i128` first.
            other => other.as_i128().unwrap_or_default() as f64,
        }
    }

    /// The raw bit pattern of an integer value (two's complement for signed types).
    pub fn as_bits(&self) -> Option<u64> {
        match *self {
            Scalar::U8(v) => Some(v.into()),
            Scalar::U16(v) => Some(v.into()),
            Scalar::U32(v) => Some(v.into()),
            Scalar::U64(v) => Some(v),
            Scalar::S8(v) => Some(v as u8 as u64),
            Scalar::S16(v) => Some(v as u16 as u64),
            Scalar::S32(v) => Some(v as u32 as u64),
            Scalar::S64(v) => Some(v as u64),
            Scalar::F32(_) | Scalar::F64(_) => None,
        }
    }

    /// Numeric comparison across scalar types; `None` only for NaN.
    pub fn compare(&self, other: &Scalar) -> Option<Ordering> {
        match (self.as_i128(), other.as_i128()) {
            (Some(a), Some(b)) => Some(a.cmp(&b)),
            _ => self.as_f64().partial_cmp(&other.as_f64()),
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::U8(v) => write!(f, "{}", v),
            Scalar::U16(v) => write!(f, "{}", v),
            Scalar::U32(v) => write!(f, "{}", v),
            Scalar::U64(v) => write!(f, "{}", v),
            Scalar::S8(v) => write!(f, "{}", v),
            Scalar::S16(v) => write!(f, "{}", v),
            Scalar::S32(v) => write!(f, "{}", v),
            Scalar::S64(v) => write!(f, "{}", v),
            Scalar::F32(v) => write!(f, "{}", v),
            Scalar::F64(v) => write!(f, "{}", v),
        }
    }
}

/// One selectable entry of an enum value (`<enum-item>`).
#[derive(Debug, Clone, PartialEq)]
pub struct EnumItem {
    pub display: String,
    pub value: Scalar,
}

/// One flag of a bitmask value (`<bitmask-selection>`).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BitMaskItem {
    pub display: String,
    pub value: u64,
    pub apply_by_default: bool,
    pub comment: String,
}

/// The type of a `TypedContent`, including the items enum and bitmask types select from.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentKind {
    Plain(ScalarType),
    Enum {
        base: ScalarType,
        items: Vec<EnumItem>,
    },
    BitMask {
        base: ScalarType,
        items: Vec<BitMaskItem>,
    },
    /// Zero terminated string; the storage size is always `strlen + 1`.
    String { strlen: u32 },
}

impl ContentKind {
    /// The tag written to the `type` attribute.
    pub fn type_tag(&self) -> &'static str {
        match self {
            ContentKind::Plain(scalar) => scalar.as_str(),
            ContentKind::Enum { .. } => "enum",
            ContentKind::BitMask { .. } => "bitmask",
            ContentKind::String { .. } => "string",
        }
    }

    /// Scalar type of the stored values; `None` for strings.
    pub fn scalar_type(&self) -> Option<ScalarType> {
        match self {
            ContentKind::Plain(scalar) => Some(*scalar),
            ContentKind::Enum { base, .. } | ContentKind::BitMask { base, .. } => Some(*base),
            ContentKind::String { .. } => None,
        }
    }
}

/// The stored data of a `TypedContent`.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentValue {
    Scalar(Scalar),
    Array(Vec<Scalar>),
    Text(String),
}

/// A typed value: its kind and the current data.
///
/// Enum and bitmask data are stored as the underlying scalar (the selected
/// item value, respectively the combined mask).
#[derive(Debug, Clone, PartialEq)]
pub struct TypedContent {
    pub kind: ContentKind,
    pub value: ContentValue,
}

impl TypedContent {
    /// A non-array plain value.
    pub fn plain(value: Scalar) -> Self {
        TypedContent {
            kind: ContentKind::Plain(value.scalar_type()),
            value: ContentValue::Scalar(value),
        }
    }

    /// A string value with the given maximum length.
    pub fn string(strlen: u32, text: impl Into<String>) -> Self {
        TypedContent {
            kind: ContentKind::String { strlen },
            value: ContentValue::Text(text.into()),
        }
    }

    pub fn is_array(&self) -> bool {
        matches!(
            self.value,
            ContentValue::Array(_) | ContentValue::Text(_)
        )
    }

    /// Number of stored elements; for strings `strlen + 1`.
    pub fn array_size(&self) -> u32 {
        match (&self.kind, &self.value) {
            (ContentKind::String { strlen }, _) => strlen.saturating_add(1),
            (_, ContentValue::Array(values)) => values.len() as u32,
            _ => 0,
        }
    }

    /// `true` if both contents have the same kind (ignoring item lists) and array layout.
    pub fn same_type(&self, other: &TypedContent) -> bool {
        let same_kind = match (&self.kind, &other.kind) {
            (ContentKind::Plain(a), ContentKind::Plain(b)) => a == b,
            (ContentKind::Enum { base: a, .. }, ContentKind::Enum { base: b, .. }) => a == b,
            (ContentKind::BitMask { base: a, .. }, ContentKind::BitMask { base: b, .. }) => a == b,
            (ContentKind::String { strlen: a }, ContentKind::String { strlen: b }) => a == b,
            _ => false,
        };
        same_kind && self.is_array() == other.is_array() && self.array_size() == other.array_size()
    }

    /// Scalars stored in this content (empty for strings).
    pub fn scalars(&self) -> &[Scalar] {
        match &self.value {
            ContentValue::Scalar(value) => std::slice::from_ref(value),
            ContentValue::Array(values) => values,
            ContentValue::Text(_) => &[],
        }
    }
}

impl Default for TypedContent {
    fn default() -> Self {
        TypedContent::plain(Scalar::U8(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_decimal_and_hex() {
        assert_eq!(ScalarType::U16.parse_value("42"), Some(Scalar::U16(42)));
        assert_eq!(ScalarType::U16.parse_value("0x2A"), Some(Scalar::U16(42)));
        assert_eq!(ScalarType::S8.parse_value("-128"), Some(Scalar::S8(-128)));
        assert_eq!(ScalarType::F32.parse_value("0.5"), Some(Scalar::F32(0.5)));
    }

    #[test]
    fn test_parse_rejects_out_of_range_and_garbage() {
        assert_eq!(ScalarType::U8.parse_value("256"), None);
        assert_eq!(ScalarType::U8.parse_value("-1"), None);
        assert_eq!(ScalarType::S32.parse_value("ten"), None);
        assert_eq!(ScalarType::F64.parse_value(""), None);
    }

    #[test]
    fn test_float_display_round_trips() {
        let value = Scalar::F32(0.1);
        let text = value.to_string();
        assert_eq!(ScalarType::F32.parse_value(&text), Some(value));
    }

    #[test]
    fn test_compare_across_signedness() {
        assert_eq!(
            Scalar::S8(-1).compare(&Scalar::U64(0)),
            Some(Ordering::Less)
        );
        assert_eq!(
            Scalar::U32(7).compare(&Scalar::F64(7.0)),
            Some(Ordering::Equal)
        );
    }

    #[test]
    fn test_string_array_size_invariant() {
        let content = TypedContent::string(15, "abc");
        assert!(content.is_array());
        assert_eq!(content.array_size(), 16);
    }

    #[test]
    fn test_same_type_ignores_value_but_not_layout() {
        let a = TypedContent::plain(Scalar::U8(1));
        let b = TypedContent::plain(Scalar::U8(2));
        let c = TypedContent::plain(Scalar::U16(1));
        let d = TypedContent {
            kind: ContentKind::Plain(ScalarType::U8),
            value: ContentValue::Array(vec![Scalar::U8(1)]),
        };
        assert!(a.same_type(&b));
        assert!(!a.same_type(&c));
        assert!(!a.same_type(&d));
    }

    #[test]
    fn test_bits_fit_base_type() {
        assert_eq!(ScalarType::U8.from_bits(0xFF), Some(Scalar::U8(0xFF)));
        assert_eq!(ScalarType::U8.from_bits(0x100), None);
        assert_eq!(ScalarType::F32.from_bits(1), None);
    }
}
