use crate::bus::Bus8080;
use crate::cpu::Cpu8080;

impl<B: Bus8080> Cpu8080<B> {
    /// HLT: stop fetching until an interrupt is accepted.
    pub(super) fn exec_hlt(&mut self) -> u32 {
        log::debug!(
            "HLT at PC {:04X} after {} cycles",
            self.regs.pc().wrapping_sub(1),
            self.cycles
        );
        self.halted = true;
        7
    }

    /// EI
    pub(super) fn exec_ei(&mut self) -> u32 {
        self.interrupts_enabled = true;
        4
    }

    /// DI
    pub(super) fn exec_di(&mut self) -> u32 {
        self.interrupts_enabled = false;
        4
    }

    /// IN port
    pub(super) fn exec_in(&mut self) -> u32 {
        let port = self.fetch_byte();
        let value = self.bus.io_read(port);
        self.regs.set_a(value);
        10
    }

    /// OUT port
    pub(super) fn exec_out(&mut self) -> u32 {
        let port = self.fetch_byte();
        self.bus.io_write(port, self.regs.a());
        10
    }
}
