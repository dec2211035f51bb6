use crate::bus::Bus8080;
use crate::cpu::Cpu8080;
use crate::error::CpuError;
use crate::regs::REG_M;

impl<B: Bus8080> Cpu8080<B> {
    /// LXI rp,d16
    pub(super) fn exec_lxi(&mut self, rp: u8) -> Result<u32, CpuError> {
        let value = self.fetch_word();
        self.regs.write_pair(rp, value)?;
        Ok(10)
    }

    /// MVI r,d8 (and MVI M,d8)
    pub(super) fn exec_mvi(&mut self, r: u8) -> Result<u32, CpuError> {
        let value = self.fetch_byte();
        self.write_reg(r, value)?;
        Ok(if r == REG_M { 10 } else { 7 })
    }

    /// MOV r1,r2. Either side may be M.
    pub(super) fn exec_mov(&mut self, dst: u8, src: u8) -> Result<u32, CpuError> {
        let value = self.read_reg(src)?;
        self.write_reg(dst, value)?;
        Ok(if dst == REG_M || src == REG_M { 7 } else { 5 })
    }

    /// STAX B / STAX D
    pub(super) fn exec_stax(&mut self, rp: u8) -> Result<u32, CpuError> {
        let addr = self.regs.read_pair(rp)?;
        self.bus.write(addr, self.regs.a());
        Ok(7)
    }

    /// LDAX B / LDAX D
    pub(super) fn exec_ldax(&mut self, rp: u8) -> Result<u32, CpuError> {
        let addr = self.regs.read_pair(rp)?;
        let value = self.bus.read(addr);
        self.regs.set_a(value);
        Ok(7)
    }

    /// STA a16
    pub(super) fn exec_sta(&mut self) -> u32 {
        let addr = self.fetch_word();
        self.bus.write(addr, self.regs.a());
        13
    }

    /// LDA a16
    pub(super) fn exec_lda(&mut self) -> u32 {
        let addr = self.fetch_word();
        let value = self.bus.read(addr);
        self.regs.set_a(value);
        13
    }

    /// SHLD a16: store L then H.
    pub(super) fn exec_shld(&mut self) -> u32 {
        let addr = self.fetch_word();
        let hl = self.regs.hl();
        self.write_word(addr, hl);
        16
    }

    /// LHLD a16
    pub(super) fn exec_lhld(&mut self) -> u32 {
        let addr = self.fetch_word();
        let value = self.read_word(addr);
        self.regs.set_hl(value);
        16
    }

    /// XCHG: swap DE and HL.
    pub(super) fn exec_xchg(&mut self) -> u32 {
        let de = self.regs.de();
        let hl = self.regs.hl();
        self.regs.set_de(hl);
        self.regs.set_hl(de);
        4
    }
}
