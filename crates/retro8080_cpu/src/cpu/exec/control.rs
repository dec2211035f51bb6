use crate::bus::Bus8080;
use crate::cpu::Cpu8080;
use crate::decode::Condition;

impl<B: Bus8080> Cpu8080<B> {
    /// JMP a16
    pub(super) fn exec_jmp(&mut self) -> u32 {
        let addr = self.fetch_word();
        self.regs.set_pc(addr);
        10
    }

    /// Jcc a16. The address is consumed whether or not the jump is taken.
    pub(super) fn exec_jmp_if(&mut self, cc: Condition) -> u32 {
        let addr = self.fetch_word();
        if self.condition(cc) {
            self.regs.set_pc(addr);
        }
        10
    }

    /// CALL a16: push the address of the next instruction, then jump.
    pub(super) fn exec_call(&mut self) -> u32 {
        let addr = self.fetch_word();
        let ret = self.regs.pc();
        self.push_word(ret);
        self.regs.set_pc(addr);
        17
    }

    /// Ccc a16
    pub(super) fn exec_call_if(&mut self, cc: Condition) -> u32 {
        let addr = self.fetch_word();
        if self.condition(cc) {
            let ret = self.regs.pc();
            self.push_word(ret);
            self.regs.set_pc(addr);
            17
        } else {
            11
        }
    }

    /// RET
    pub(super) fn exec_ret(&mut self) -> u32 {
        let addr = self.pop_word();
        self.regs.set_pc(addr);
        10
    }

    /// Rcc
    pub(super) fn exec_ret_if(&mut self, cc: Condition) -> u32 {
        if self.condition(cc) {
            let addr = self.pop_word();
            self.regs.set_pc(addr);
            11
        } else {
            5
        }
    }

    /// RST n: call 8 * n.
    pub(super) fn exec_rst(&mut self, vector: u8) -> u32 {
        let ret = self.regs.pc();
        self.push_word(ret);
        self.regs.set_pc(u16::from(vector & 0x07) << 3);
        11
    }

    /// PCHL
    pub(super) fn exec_pchl(&mut self) -> u32 {
        let hl = self.regs.hl();
        self.regs.set_pc(hl);
        5
    }
}
