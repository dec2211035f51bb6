use crate::bus::Bus8080;
use crate::cpu::Cpu8080;
use crate::error::CpuError;
use crate::flags::{FlagKind, Operands};
use crate::regs::REG_M;

impl<B: Bus8080> Cpu8080<B> {
    /// INR r / INR M. Carry is not affected.
    pub(super) fn exec_inr(&mut self, r: u8) -> Result<u32, CpuError> {
        let value = self.read_reg(r)?;
        let flags = self.regs.flags().evaluate(
            i32::from(value) + 1,
            FlagKind::SZAP,
            Some(Operands::Add {
                lhs: value,
                rhs: 1,
                carry_in: false,
            }),
        );
        self.regs.set_flags(flags);
        self.write_reg(r, value.wrapping_add(1))?;
        Ok(if r == REG_M { 10 } else { 5 })
    }

    /// DCR r / DCR M. Carry is not affected.
    pub(super) fn exec_dcr(&mut self, r: u8) -> Result<u32, CpuError> {
        let value = self.read_reg(r)?;
        let flags = self.regs.flags().evaluate(
            i32::from(value) - 1,
            FlagKind::SZAP,
            Some(Operands::Sub {
                lhs: value,
                rhs: 1,
                borrow_in: false,
            }),
        );
        self.regs.set_flags(flags);
        self.write_reg(r, value.wrapping_sub(1))?;
        Ok(if r == REG_M { 10 } else { 5 })
    }

    /// INX rp
    pub(super) fn exec_inx(&mut self, rp: u8) -> Result<u32, CpuError> {
        let value = self.regs.read_pair(rp)?.wrapping_add(1);
        self.regs.write_pair(rp, value)?;
        Ok(5)
    }

    /// DCX rp
    pub(super) fn exec_dcx(&mut self, rp: u8) -> Result<u32, CpuError> {
        let value = self.regs.read_pair(rp)?.wrapping_sub(1);
        self.regs.write_pair(rp, value)?;
        Ok(5)
    }
}
