//! Async I2C bus sharing
//!
//! Register reads on the BMP280 are addressed: a write of the register pointer
//! followed by a repeated-start read. If another task's transaction slipped in
//! between those two halves the pointer would be wrong, so the bus lock is
//! taken for one complete operation (start to stop) and never per byte.

use embassy_sync::blocking_mutex::raw::{CriticalSectionRawMutex, RawMutex};
use embassy_sync::mutex::Mutex;
use embedded_hal_async::i2c::{ErrorType, I2c, Operation};

/// Handle to a bus shared behind an embassy [`Mutex`].
///
/// Every consumer of the bus gets its own `SharedBusDevice`; all of them point
/// at the same mutex. The lock is held across the await points of a single
/// operation, so the executor keeps running other tasks while the transfer is
/// in flight but no other device can interleave with it.
///
/// ```ignore
/// static I2C_BUS: StaticCell<Mutex<CriticalSectionRawMutex, I2c<'static, Async>>> =
///     StaticCell::new();
///
/// let bus = I2C_BUS.init(Mutex::new(i2c));
/// let bmp280 = SharedBusDevice::new(bus);
/// let other = SharedBusDevice::new(bus);
/// ```
pub struct SharedBusDevice<'a, M: RawMutex, T> {
    bus: &'a Mutex<M, T>,
}

/// The variant used on the device, safe to share with interrupt handlers.
pub type CriticalSectionBusDevice<'a, T> = SharedBusDevice<'a, CriticalSectionRawMutex, T>;

impl<'a, M: RawMutex, T> SharedBusDevice<'a, M, T> {
    #[inline]
    pub const fn new(bus: &'a Mutex<M, T>) -> Self {
        Self { bus }
    }
}

impl<M: RawMutex, T> ErrorType for SharedBusDevice<'_, M, T>
where
    T: ErrorType,
{
    type Error = T::Error;
}

impl<M: RawMutex, T> I2c for SharedBusDevice<'_, M, T>
where
    T: I2c,
{
    #[inline]
    async fn read(&mut self, address: u8, read: &mut [u8]) -> Result<(), Self::Error> {
        let mut bus = self.bus.lock().await;
        bus.read(address, read).await
    }

    #[inline]
    async fn write(&mut self, address: u8, write: &[u8]) -> Result<(), Self::Error> {
        let mut bus = self.bus.lock().await;
        bus.write(address, write).await
    }

    /// Register-pointer write and repeated-start read under one lock.
    #[inline]
    async fn write_read(
        &mut self,
        address: u8,
        write: &[u8],
        read: &mut [u8],
    ) -> Result<(), Self::Error> {
        let mut bus = self.bus.lock().await;
        bus.write_read(address, write, read).await
    }

    #[inline]
    async fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        let mut bus = self.bus.lock().await;
        bus.transaction(address, operations).await
    }
}
