//! Endianness-aware byte codec for the supported scalar types
//!
//! Pure functions, no I/O. Every decode consumes exactly the type's width;
//! a byte sequence of any other length is a contract violation, never
//! silently truncated or padded. Floats travel through their raw bit
//! patterns so round trips are bit-exact, NaN payloads included.

use crate::core::types::{MemoryError, MemoryResult, ScalarType, ScalarValue};
use serde::{Deserialize, Serialize};

/// Byte order used to interpret multi-byte values.
///
/// Fixed per target process at resolution time; 8-bit types ignore it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ByteOrder {
    #[default]
    Little,
    Big,
}

mod sealed {
    pub trait Sealed {}
}

/// A fixed-width scalar the codec can marshal.
///
/// Sealed: implemented exactly for `i8 i16 i32 i64 f32 f64`, matching the
/// closed [`ScalarType`] enum.
pub trait Scalar: Copy + sealed::Sealed {
    /// The type tag corresponding to `Self`
    const TYPE: ScalarType;
    /// Width in bytes
    const WIDTH: usize;

    /// Decodes a byte sequence of exactly `WIDTH` bytes
    fn decode(bytes: &[u8], order: ByteOrder) -> MemoryResult<Self>;

    /// Encodes the value into `WIDTH` bytes
    fn encode(self, order: ByteOrder) -> Vec<u8>;
}

fn exact_width<const N: usize>(ty: ScalarType, bytes: &[u8]) -> MemoryResult<[u8; N]> {
    bytes
        .try_into()
        .map_err(|_| MemoryError::decode_contract(ty, N, bytes.len()))
}

macro_rules! impl_int_scalar {
    ($t:ty, $tag:expr, $width:expr) => {
        impl sealed::Sealed for $t {}

        impl Scalar for $t {
            const TYPE: ScalarType = $tag;
            const WIDTH: usize = $width;

            fn decode(bytes: &[u8], order: ByteOrder) -> MemoryResult<Self> {
                let raw = exact_width::<$width>(Self::TYPE, bytes)?;
                Ok(match order {
                    ByteOrder::Little => <$t>::from_le_bytes(raw),
                    ByteOrder::Big => <$t>::from_be_bytes(raw),
                })
            }

            fn encode(self, order: ByteOrder) -> Vec<u8> {
                match order {
                    ByteOrder::Little => self.to_le_bytes().to_vec(),
                    ByteOrder::Big => self.to_be_bytes().to_vec(),
                }
            }
        }
    };
}

impl_int_scalar!(i8, ScalarType::I8, 1);
impl_int_scalar!(i16, ScalarType::I16, 2);
impl_int_scalar!(i32, ScalarType::I32, 4);
impl_int_scalar!(i64, ScalarType::I64, 8);

impl sealed::Sealed for f32 {}

impl Scalar for f32 {
    const TYPE: ScalarType = ScalarType::F32;
    const WIDTH: usize = 4;

    fn decode(bytes: &[u8], order: ByteOrder) -> MemoryResult<Self> {
        let raw = exact_width::<4>(Self::TYPE, bytes)?;
        let bits = match order {
            ByteOrder::Little => u32::from_le_bytes(raw),
            ByteOrder::Big => u32::from_be_bytes(raw),
        };
        Ok(f32::from_bits(bits))
    }

    fn encode(self, order: ByteOrder) -> Vec<u8> {
        let bits = self.to_bits();
        match order {
            ByteOrder::Little => bits.to_le_bytes().to_vec(),
            ByteOrder::Big => bits.to_be_bytes().to_vec(),
        }
    }
}

impl sealed::Sealed for f64 {}

impl Scalar for f64 {
    const TYPE: ScalarType = ScalarType::F64;
    const WIDTH: usize = 8;

    fn decode(bytes: &[u8], order: ByteOrder) -> MemoryResult<Self> {
        let raw = exact_width::<8>(Self::TYPE, bytes)?;
        let bits = match order {
            ByteOrder::Little => u64::from_le_bytes(raw),
            ByteOrder::Big => u64::from_be_bytes(raw),
        };
        Ok(f64::from_bits(bits))
    }

    fn encode(self, order: ByteOrder) -> Vec<u8> {
        let bits = self.to_bits();
        match order {
            ByteOrder::Little => bits.to_le_bytes().to_vec(),
            ByteOrder::Big => bits.to_be_bytes().to_vec(),
        }
    }
}

/// Decodes a byte sequence into a tagged scalar value
pub fn decode(bytes: &[u8], ty: ScalarType, order: ByteOrder) -> MemoryResult<ScalarValue> {
    Ok(match ty {
        ScalarType::I8 => ScalarValue::I8(i8::decode(bytes, order)?),
        ScalarType::I16 => ScalarValue::I16(i16::decode(bytes, order)?),
        ScalarType::I32 => ScalarValue::I32(i32::decode(bytes, order)?),
        ScalarType::I64 => ScalarValue::I64(i64::decode(bytes, order)?),
        ScalarType::F32 => ScalarValue::F32(f32::decode(bytes, order)?),
        ScalarType::F64 => ScalarValue::F64(f64::decode(bytes, order)?),
    })
}

/// Encodes a tagged scalar value into its byte representation
pub fn encode(value: ScalarValue, order: ByteOrder) -> Vec<u8> {
    match value {
        ScalarValue::I8(v) => v.encode(order),
        ScalarValue::I16(v) => v.encode(order),
        ScalarValue::I32(v) => v.encode(order),
        ScalarValue::I64(v) => v.encode(order),
        ScalarValue::F32(v) => v.encode(order),
        ScalarValue::F64(v) => v.encode(order),
    }
}
