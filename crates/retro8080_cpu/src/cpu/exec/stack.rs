use crate::bus::Bus8080;
use crate::cpu::Cpu8080;
use crate::error::CpuError;
use crate::regs::PAIR_SP;

impl<B: Bus8080> Cpu8080<B> {
    /// PUSH B/D/H/PSW. Pair index 3 is PSW here, not SP.
    pub(super) fn exec_push(&mut self, rp: u8) -> Result<u32, CpuError> {
        let value = if rp == PAIR_SP {
            self.regs.psw()
        } else {
            self.regs.read_pair(rp)?
        };
        self.push_word(value);
        Ok(11)
    }

    /// POP B/D/H/PSW
    pub(super) fn exec_pop(&mut self, rp: u8) -> Result<u32, CpuError> {
        let value = self.pop_word();
        if rp == PAIR_SP {
            self.regs.set_psw(value);
        } else {
            self.regs.write_pair(rp, value)?;
        }
        Ok(10)
    }

    /// XTHL: exchange HL with the word at the top of the stack.
    pub(super) fn exec_xthl(&mut self) -> u32 {
        let sp = self.regs.sp();
        let top = self.read_word(sp);
        let hl = self.regs.hl();
        self.write_word(sp, hl);
        self.regs.set_hl(top);
        18
    }

    /// SPHL
    pub(super) fn exec_sphl(&mut self) -> u32 {
        let hl = self.regs.hl();
        self.regs.set_sp(hl);
        5
    }
}
