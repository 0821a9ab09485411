// src/recorder/session/io_helpers.rs

use super::Session;
use crate::common::{
    error::MeterError,
    hal_traits::{MeterSerial, MeterTimer},
};
use core::time::Duration;
use nb::Result as NbResult;

// Implementation block for I/O related helpers
impl<IF> Session<IF>
where
    IF: MeterSerial + MeterTimer,
{
    /// Executes a non-blocking I/O operation (`f`) repeatedly until it
    /// stops returning `WouldBlock`, returning the final result or a timeout error.
    pub(super) fn execute_blocking_io_with_timeout<FN, T>(
        &mut self,
        timeout: Duration,
        mut f: FN,
    ) -> Result<T, MeterError<IF::Error>>
    where
        FN: FnMut(&mut IF) -> NbResult<T, IF::Error>,
    {
        let deadline = self.interface.now() + timeout;
        let poll_delay = self.config.poll_delay_us.max(1);

        loop {
            match f(&mut self.interface) {
                Ok(result) => return Ok(result),
                Err(nb::Error::WouldBlock) => {
                    if self.interface.now() >= deadline {
                        return Err(MeterError::Timeout);
                    }
                    // Small delay so an idle line does not spin the CPU
                    self.interface.delay_us(poll_delay);
                }
                Err(nb::Error::Other(e)) => return Err(MeterError::Io(e)),
            }
        }
    }

    /// Blocking single-byte read bounded by the configured read timeout.
    pub(super) fn read_byte_with_timeout(&mut self) -> Result<u8, MeterError<IF::Error>> {
        let timeout = self.config.read_timeout();
        self.execute_blocking_io_with_timeout(timeout, |iface| iface.read_byte())
    }
}
