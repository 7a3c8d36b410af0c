//! Typed memory writes composed from the byte codec and the raw channel

use super::handle::ProcessHandle;
use crate::codec::{self, ByteOrder, Scalar};
use crate::core::types::{
    Address, MemoryError, MemoryResult, ScalarValue, TypedSlice, Vector2, Vector3,
};

/// Writes typed values into a target process.
///
/// Writes are not verified by a follow-up read; a reported success means
/// the host accepted the full transfer, nothing more.
pub struct TypedWriter<'a> {
    handle: &'a ProcessHandle,
    order: ByteOrder,
}

impl<'a> TypedWriter<'a> {
    /// Creates a writer over an open handle
    pub fn new(handle: &'a ProcessHandle, order: ByteOrder) -> Self {
        TypedWriter { handle, order }
    }

    /// Writes one scalar of type `T` at `address`
    pub fn write<T: Scalar>(&self, address: Address, value: T) -> MemoryResult<()> {
        let bytes = value.encode(self.order);
        self.handle.write_bytes(address, &bytes)?;
        Ok(())
    }

    pub fn write_i8(&self, address: Address, value: i8) -> MemoryResult<()> {
        self.write(address, value)
    }

    pub fn write_i16(&self, address: Address, value: i16) -> MemoryResult<()> {
        self.write(address, value)
    }

    pub fn write_i32(&self, address: Address, value: i32) -> MemoryResult<()> {
        self.write(address, value)
    }

    pub fn write_i64(&self, address: Address, value: i64) -> MemoryResult<()> {
        self.write(address, value)
    }

    pub fn write_f32(&self, address: Address, value: f32) -> MemoryResult<()> {
        self.write(address, value)
    }

    pub fn write_f64(&self, address: Address, value: f64) -> MemoryResult<()> {
        self.write(address, value)
    }

    /// Writes one tagged scalar value
    pub fn write_value(&self, address: Address, value: ScalarValue) -> MemoryResult<()> {
        let bytes = codec::encode(value, self.order);
        self.handle.write_bytes(address, &bytes)?;
        Ok(())
    }

    /// Writes two float32 fields at offsets 0 and 4.
    ///
    /// Aborts at the first failing field; the error names the field's
    /// address. Remaining fields are left unwritten.
    pub fn write_vector2(&self, address: Address, vec: Vector2) -> MemoryResult<()> {
        self.write_f32(address, vec.x)?;
        self.write_f32(address.offset(4), vec.y)?;
        Ok(())
    }

    /// Writes three float32 fields at offsets 0, 4 and 8.
    pub fn write_vector3(&self, address: Address, vec: Vector3) -> MemoryResult<()> {
        self.write_f32(address, vec.x)?;
        self.write_f32(address.offset(4), vec.y)?;
        self.write_f32(address.offset(8), vec.z)?;
        Ok(())
    }

    /// Writes a homogeneous sequence, element `i` at `address + i * width`.
    ///
    /// The element type is taken from the first element; a mixed sequence
    /// is rejected before anything is written. An empty sequence is a
    /// no-op.
    pub fn write_array(&self, address: Address, elements: &[ScalarValue]) -> MemoryResult<()> {
        let Some(first) = elements.first() else {
            return Ok(());
        };
        let ty = first.scalar_type();

        for (index, value) in elements.iter().enumerate() {
            if value.scalar_type() != ty {
                return Err(MemoryError::HeterogeneousArray {
                    expected: ty,
                    found: value.scalar_type(),
                    index,
                });
            }
        }

        for (i, value) in elements.iter().enumerate() {
            self.write_value(address.offset(i * ty.width()), *value)?;
        }
        Ok(())
    }

    /// Writes a [`TypedSlice`] back with the same stride it was read with
    pub fn write_slice(&self, address: Address, slice: &TypedSlice) -> MemoryResult<()> {
        let width = slice.element_type().width();
        for (i, value) in slice.iter().enumerate() {
            self.write_value(address.offset(i * width), *value)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::ScalarType;
    use crate::host::mock::{MockHost, MockProcess, SharedMemory};
    use crate::host::ProcessHost;

    fn fixture() -> (ProcessHandle, SharedMemory) {
        let mut host = MockHost::new();
        let memory = host.add(MockProcess::new(7, "target.exe", Address::new(0x1000), 0x100));
        (ProcessHandle::new(7, host.open(7).unwrap()), memory)
    }

    #[test]
    fn test_scalar_writes_honor_byte_order() {
        let (handle, memory) = fixture();

        let writer = TypedWriter::new(&handle, ByteOrder::Big);
        writer.write_i32(Address::new(0x1000), 0x12345678).unwrap();
        assert_eq!(
            memory.snapshot(Address::new(0x1000), 4),
            vec![0x12, 0x34, 0x56, 0x78]
        );

        let writer = TypedWriter::new(&handle, ByteOrder::Little);
        writer.write_i32(Address::new(0x1000), 0x12345678).unwrap();
        assert_eq!(
            memory.snapshot(Address::new(0x1000), 4),
            vec![0x78, 0x56, 0x34, 0x12]
        );
    }

    #[test]
    fn test_vector_writes_place_fields() {
        let (handle, memory) = fixture();
        let writer = TypedWriter::new(&handle, ByteOrder::Little);

        writer
            .write_vector3(Address::new(0x1010), Vector3::new(1.0, 2.0, 3.0))
            .unwrap();
        assert_eq!(memory.snapshot(Address::new(0x1010), 4), 1.0f32.to_le_bytes());
        assert_eq!(memory.snapshot(Address::new(0x1014), 4), 2.0f32.to_le_bytes());
        assert_eq!(memory.snapshot(Address::new(0x1018), 4), 3.0f32.to_le_bytes());
    }

    #[test]
    fn test_vector_write_aborts_at_failing_field() {
        let (handle, memory) = fixture();
        let writer = TypedWriter::new(&handle, ByteOrder::Little);

        // y lands inside the region, z crosses its end at 0x1100
        let base = Address::new(0x10F8);
        let err = writer
            .write_vector3(base, Vector3::new(1.0, 2.0, 3.0))
            .unwrap_err();
        match err {
            MemoryError::TransferFailed { address, .. } => {
                assert_eq!(address, base.offset(8));
            }
            other => panic!("expected TransferFailed, got {:?}", other),
        }

        // The fields before the failure were written
        assert_eq!(memory.snapshot(base, 4), 1.0f32.to_le_bytes());
        assert_eq!(memory.snapshot(base.offset(4), 4), 2.0f32.to_le_bytes());
    }

    #[test]
    fn test_write_array_empty_is_noop() {
        let (handle, _memory) = fixture();
        let writer = TypedWriter::new(&handle, ByteOrder::Little);
        writer.write_array(Address::new(0x1000), &[]).unwrap();
    }

    #[test]
    fn test_write_array_rejects_mixed_types_before_writing() {
        let (handle, memory) = fixture();
        let writer = TypedWriter::new(&handle, ByteOrder::Little);

        let err = writer
            .write_array(
                Address::new(0x1020),
                &[ScalarValue::I16(1), ScalarValue::I64(2)],
            )
            .unwrap_err();
        match err {
            MemoryError::HeterogeneousArray {
                expected,
                found,
                index,
            } => {
                assert_eq!(expected, ScalarType::I16);
                assert_eq!(found, ScalarType::I64);
                assert_eq!(index, 1);
            }
            other => panic!("expected HeterogeneousArray, got {:?}", other),
        }

        // Nothing was written, not even the valid leading element
        assert_eq!(memory.snapshot(Address::new(0x1020), 2), vec![0, 0]);
    }

    #[test]
    fn test_write_slice_round_trips_with_reader() {
        let (handle, _memory) = fixture();
        let writer = TypedWriter::new(&handle, ByteOrder::Big);
        let reader = crate::memory::TypedReader::new(&handle, ByteOrder::Big);

        let slice = TypedSlice::from_values(
            ScalarType::I64,
            vec![ScalarValue::I64(i64::MIN), ScalarValue::I64(42)],
        )
        .unwrap();
        writer.write_slice(Address::new(0x1040), &slice).unwrap();

        let back = reader
            .read_array(Address::new(0x1040), ScalarType::I64, 2)
            .unwrap();
        assert_eq!(back, slice);
    }
}
