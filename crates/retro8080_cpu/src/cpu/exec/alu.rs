use crate::bus::Bus8080;
use crate::cpu::Cpu8080;
use crate::decode::AluOp;
use crate::error::CpuError;
use crate::flags::{FlagKind, Operands};
use crate::regs::REG_M;

impl<B: Bus8080> Cpu8080<B> {
    /// Core 8-bit accumulator operation shared by the register, M and
    /// immediate forms.
    ///
    /// All five flags are recomputed. CMP leaves A untouched.
    pub(super) fn alu(&mut self, op: AluOp, value: u8) {
        let a = self.regs.a();
        let carry = self.regs.flags().contains(FlagKind::CARRY);
        let (lhs, rhs) = (i32::from(a), i32::from(value));

        let (result, operands) = match op {
            AluOp::Add | AluOp::Adc => {
                let carry_in = op == AluOp::Adc && carry;
                (
                    lhs + rhs + i32::from(carry_in),
                    Some(Operands::Add {
                        lhs: a,
                        rhs: value,
                        carry_in,
                    }),
                )
            }
            AluOp::Sub | AluOp::Sbb | AluOp::Cmp => {
                let borrow_in = op == AluOp::Sbb && carry;
                (
                    lhs - rhs - i32::from(borrow_in),
                    Some(Operands::Sub {
                        lhs: a,
                        rhs: value,
                        borrow_in,
                    }),
                )
            }
            AluOp::Ana => (lhs & rhs, Some(Operands::And { lhs: a, rhs: value })),
            AluOp::Xra => (lhs ^ rhs, None),
            AluOp::Ora => (lhs | rhs, None),
        };

        let flags = self
            .regs
            .flags()
            .evaluate(result, FlagKind::all(), operands);
        self.regs.set_flags(flags);
        if op != AluOp::Cmp {
            self.regs.set_a(result as u8);
        }
    }

    /// 80–BF: ADD/ADC/SUB/SBB/ANA/XRA/ORA/CMP r (and M).
    pub(super) fn exec_alu_reg(&mut self, op: AluOp, src: u8) -> Result<u32, CpuError> {
        let value = self.read_reg(src)?;
        self.alu(op, value);
        Ok(if src == REG_M { 7 } else { 4 })
    }

    /// ADI/ACI/SUI/SBI/ANI/XRI/ORI/CPI d8
    pub(super) fn exec_alu_imm(&mut self, op: AluOp) -> u32 {
        let value = self.fetch_byte();
        self.alu(op, value);
        7
    }

    /// DAD rp: HL += rp, only carry is affected.
    pub(super) fn exec_dad(&mut self, rp: u8) -> Result<u32, CpuError> {
        let hl = self.regs.hl();
        let value = self.regs.read_pair(rp)?;
        let result = u32::from(hl) + u32::from(value);
        let flags = self.regs.flags().evaluate_pair(result);
        self.regs.set_flags(flags);
        self.regs.set_hl(result as u16);
        Ok(10)
    }

    /// DAA, based on the Intel 8080 documentation.
    pub(super) fn exec_daa(&mut self) -> u32 {
        let a = self.regs.a();
        let flags = self.regs.flags();
        let mut carry = flags.contains(FlagKind::CARRY);
        let low = a & 0x0f;
        let high = a >> 4;

        let mut adjust: u8 = 0;
        if low > 9 || flags.contains(FlagKind::AUX_CARRY) {
            adjust |= 0x06;
        }
        if high > 9 || carry || (high >= 9 && low > 9) {
            adjust |= 0x60;
            carry = true;
        }

        let result = i32::from(a) + i32::from(adjust);
        let flags = flags
            .evaluate(
                result,
                FlagKind::SZAP,
                Some(Operands::Add {
                    lhs: a,
                    rhs: adjust,
                    carry_in: false,
                }),
            )
            .with_carry(carry);
        self.regs.set_flags(flags);
        self.regs.set_a(result as u8);
        4
    }

    /// RLC
    pub(super) fn exec_rlc(&mut self) -> u32 {
        let a = self.regs.a();
        self.regs.set_a(a.rotate_left(1));
        let flags = self.regs.flags().with_carry(a & 0x80 != 0);
        self.regs.set_flags(flags);
        4
    }

    /// RRC
    pub(super) fn exec_rrc(&mut self) -> u32 {
        let a = self.regs.a();
        self.regs.set_a(a.rotate_right(1));
        let flags = self.regs.flags().with_carry(a & 0x01 != 0);
        self.regs.set_flags(flags);
        4
    }

    /// RAL: rotate left through carry.
    pub(super) fn exec_ral(&mut self) -> u32 {
        let a = self.regs.a();
        let flags = self.regs.flags();
        let carry_in = u8::from(flags.contains(FlagKind::CARRY));
        self.regs.set_a((a << 1) | carry_in);
        self.regs.set_flags(flags.with_carry(a & 0x80 != 0));
        4
    }

    /// RAR: rotate right through carry.
    pub(super) fn exec_rar(&mut self) -> u32 {
        let a = self.regs.a();
        let flags = self.regs.flags();
        let carry_in = if flags.contains(FlagKind::CARRY) { 0x80 } else { 0 };
        self.regs.set_a((a >> 1) | carry_in);
        self.regs.set_flags(flags.with_carry(a & 0x01 != 0));
        4
    }

    /// CMA: complement A, no flags.
    pub(super) fn exec_cma(&mut self) -> u32 {
        let a = self.regs.a();
        self.regs.set_a(!a);
        4
    }

    /// STC
    pub(super) fn exec_stc(&mut self) -> u32 {
        let flags = self.regs.flags().with_carry(true);
        self.regs.set_flags(flags);
        4
    }

    /// CMC
    pub(super) fn exec_cmc(&mut self) -> u32 {
        let flags = self.regs.flags();
        let carry = flags.contains(FlagKind::CARRY);
        self.regs.set_flags(flags.with_carry(!carry));
        4
    }
}
