//! Typed memory reads composed from the byte codec and the raw channel

use super::handle::ProcessHandle;
use crate::codec::{self, ByteOrder, Scalar};
use crate::core::types::{Address, MemoryResult, ScalarType, ScalarValue, TypedSlice, Vector2, Vector3};

/// Reads typed values out of a target process.
///
/// Borrows the handle; the byte order is the owning process's, fixed at
/// resolution time. Errors from the channel or the codec propagate
/// unchanged, and no partially decoded value is ever returned.
pub struct TypedReader<'a> {
    handle: &'a ProcessHandle,
    order: ByteOrder,
}

impl<'a> TypedReader<'a> {
    /// Creates a reader over an open handle
    pub fn new(handle: &'a ProcessHandle, order: ByteOrder) -> Self {
        TypedReader { handle, order }
    }

    /// Reads one scalar of type `T` at `address`
    pub fn read<T: Scalar>(&self, address: Address) -> MemoryResult<T> {
        let bytes = self.handle.read_bytes(address, T::WIDTH)?;
        T::decode(&bytes, self.order)
    }

    pub fn read_i8(&self, address: Address) -> MemoryResult<i8> {
        self.read(address)
    }

    pub fn read_i16(&self, address: Address) -> MemoryResult<i16> {
        self.read(address)
    }

    pub fn read_i32(&self, address: Address) -> MemoryResult<i32> {
        self.read(address)
    }

    pub fn read_i64(&self, address: Address) -> MemoryResult<i64> {
        self.read(address)
    }

    pub fn read_f32(&self, address: Address) -> MemoryResult<f32> {
        self.read(address)
    }

    pub fn read_f64(&self, address: Address) -> MemoryResult<f64> {
        self.read(address)
    }

    /// Reads one scalar selected by a runtime type tag
    pub fn read_value(&self, address: Address, ty: ScalarType) -> MemoryResult<ScalarValue> {
        let bytes = self.handle.read_bytes(address, ty.width())?;
        codec::decode(&bytes, ty, self.order)
    }

    /// Reads two consecutive float32 fields at offsets 0 and 4.
    ///
    /// A failure on either field fails the whole call; a zero vector is
    /// only ever a legitimately zero in-memory value.
    pub fn read_vector2(&self, address: Address) -> MemoryResult<Vector2> {
        let x = self.read_f32(address)?;
        let y = self.read_f32(address.offset(4))?;
        Ok(Vector2::new(x, y))
    }

    /// Reads three consecutive float32 fields at offsets 0, 4 and 8.
    pub fn read_vector3(&self, address: Address) -> MemoryResult<Vector3> {
        let x = self.read_f32(address)?;
        let y = self.read_f32(address.offset(4))?;
        let z = self.read_f32(address.offset(8))?;
        Ok(Vector3::new(x, y, z))
    }

    /// Reads `count` consecutive elements of `ty`, element `i` at
    /// `address + i * width`.
    ///
    /// Aborts at the first failing element; the result never mixes read
    /// and unread elements.
    pub fn read_array(
        &self,
        address: Address,
        ty: ScalarType,
        count: usize,
    ) -> MemoryResult<TypedSlice> {
        let mut slice = TypedSlice::new(ty);
        for i in 0..count {
            let value = self.read_value(address.offset(i * ty.width()), ty)?;
            slice.push(value);
        }
        Ok(slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::MemoryError;
    use crate::host::mock::{MockHost, MockProcess, SharedMemory};
    use crate::host::ProcessHost;

    fn fixture() -> (ProcessHandle, SharedMemory) {
        let mut host = MockHost::new();
        let memory = host.add(MockProcess::new(7, "target.exe", Address::new(0x1000), 0x100));
        (ProcessHandle::new(7, host.open(7).unwrap()), memory)
    }

    #[test]
    fn test_scalar_reads_honor_byte_order() {
        let (handle, memory) = fixture();
        memory.load(Address::new(0x1000), &[0x12, 0x34]);

        let le = TypedReader::new(&handle, ByteOrder::Little);
        let be = TypedReader::new(&handle, ByteOrder::Big);
        assert_eq!(le.read_i16(Address::new(0x1000)).unwrap(), 0x3412);
        assert_eq!(be.read_i16(Address::new(0x1000)).unwrap(), 0x1234);
    }

    #[test]
    fn test_generic_and_tagged_reads_agree() {
        let (handle, memory) = fixture();
        memory.load(Address::new(0x1010), &2.5f32.to_le_bytes());

        let reader = TypedReader::new(&handle, ByteOrder::Little);
        assert_eq!(reader.read::<f32>(Address::new(0x1010)).unwrap(), 2.5);
        assert_eq!(
            reader.read_value(Address::new(0x1010), ScalarType::F32).unwrap(),
            ScalarValue::F32(2.5)
        );
    }

    #[test]
    fn test_vector3_reads_consecutive_fields() {
        let (handle, memory) = fixture();
        memory.load(Address::new(0x1020), &1.0f32.to_le_bytes());
        memory.load(Address::new(0x1024), &2.0f32.to_le_bytes());
        memory.load(Address::new(0x1028), &3.0f32.to_le_bytes());

        let reader = TypedReader::new(&handle, ByteOrder::Little);
        assert_eq!(
            reader.read_vector3(Address::new(0x1020)).unwrap(),
            Vector3::new(1.0, 2.0, 3.0)
        );
    }

    #[test]
    fn test_vector3_field_failure_fails_the_whole_read() {
        let (handle, memory) = fixture();
        // x and y sit inside the region, z at offset 8 straddles its end
        let base = Address::new(0x10F8);
        memory.load(base, &1.0f32.to_le_bytes());
        memory.load(base.offset(4), &2.0f32.to_le_bytes());

        let reader = TypedReader::new(&handle, ByteOrder::Little);
        let err = reader.read_vector3(base).unwrap_err();
        assert!(matches!(err, MemoryError::TransferFailed { .. }));
    }

    #[test]
    fn test_read_array_strides_by_element_width() {
        let (handle, memory) = fixture();
        for (i, v) in [100i32, -200, 300].iter().enumerate() {
            memory.load(Address::new(0x1030 + i * 4), &v.to_le_bytes());
        }

        let reader = TypedReader::new(&handle, ByteOrder::Little);
        let slice = reader
            .read_array(Address::new(0x1030), ScalarType::I32, 3)
            .unwrap();
        assert_eq!(slice.element_type(), ScalarType::I32);
        assert_eq!(
            slice.values(),
            &[
                ScalarValue::I32(100),
                ScalarValue::I32(-200),
                ScalarValue::I32(300)
            ]
        );
    }

    #[test]
    fn test_read_array_count_zero() {
        let (handle, _memory) = fixture();
        let reader = TypedReader::new(&handle, ByteOrder::Little);
        let slice = reader
            .read_array(Address::new(0x1000), ScalarType::F64, 0)
            .unwrap();
        assert!(slice.is_empty());
    }

    #[test]
    fn test_read_array_aborts_on_first_failing_element() {
        let (handle, _memory) = fixture();
        let reader = TypedReader::new(&handle, ByteOrder::Little);
        // Fourth element crosses the region end at 0x1100
        let err = reader
            .read_array(Address::new(0x10F2), ScalarType::I32, 4)
            .unwrap_err();
        assert!(matches!(err, MemoryError::TransferFailed { .. }));
    }
}
