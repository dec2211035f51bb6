/// Simple bus interface for an Intel 8080-compatible CPU core.
///
/// The CPU uses this trait to access memory and IO ports without knowing
/// anything about the concrete machine it is plugged into. Reads take
/// `&mut self` so that instrumented doubles can record every access.
pub trait Bus8080 {
    fn read(&mut self, addr: u16) -> u8;
    fn write(&mut self, addr: u16, value: u8);

    /// Read an input port (`IN port`). Buses without peripherals read 0.
    fn io_read(&mut self, _port: u8) -> u8 {
        0
    }

    /// Write an output port (`OUT port`). Ignored by default.
    fn io_write(&mut self, _port: u8, _value: u8) {}
}

impl<B: Bus8080 + ?Sized> Bus8080 for &mut B {
    fn read(&mut self, addr: u16) -> u8 {
        (**self).read(addr)
    }

    fn write(&mut self, addr: u16, value: u8) {
        (**self).write(addr, value)
    }

    fn io_read(&mut self, port: u8) -> u8 {
        (**self).io_read(port)
    }

    fn io_write(&mut self, port: u8, value: u8) {
        (**self).io_write(port, value)
    }
}
