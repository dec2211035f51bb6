mod alu;
mod control;
mod incdec;
mod ld;
mod stack;
mod system;

use crate::bus::Bus8080;
use crate::decode::Instruction;
use crate::error::CpuError;

use super::Cpu8080;

impl<B: Bus8080> Cpu8080<B> {
    /// Execute one decoded instruction and return its cycle cost.
    ///
    /// The opcode byte has already been fetched and PC points past it;
    /// `pc` is the address it was fetched from.
    pub(super) fn execute(
        &mut self,
        instruction: Instruction,
        opcode: u8,
        pc: u16,
    ) -> Result<u32, CpuError> {
        let cycles = match instruction {
            Instruction::Nop => 4,

            // Data transfer.
            Instruction::Lxi { rp } => self.exec_lxi(rp)?,
            Instruction::Mvi { r } => self.exec_mvi(r)?,
            Instruction::Mov { dst, src } => self.exec_mov(dst, src)?,
            Instruction::Stax { rp } => self.exec_stax(rp)?,
            Instruction::Ldax { rp } => self.exec_ldax(rp)?,
            Instruction::Sta => self.exec_sta(),
            Instruction::Lda => self.exec_lda(),
            Instruction::Shld => self.exec_shld(),
            Instruction::Lhld => self.exec_lhld(),
            Instruction::Xchg => self.exec_xchg(),

            // Increment / decrement.
            Instruction::Inr { r } => self.exec_inr(r)?,
            Instruction::Dcr { r } => self.exec_dcr(r)?,
            Instruction::Inx { rp } => self.exec_inx(rp)?,
            Instruction::Dcx { rp } => self.exec_dcx(rp)?,

            // Arithmetic and logic.
            Instruction::Alu { op, src } => self.exec_alu_reg(op, src)?,
            Instruction::AluImm { op } => self.exec_alu_imm(op),
            Instruction::Dad { rp } => self.exec_dad(rp)?,
            Instruction::Daa => self.exec_daa(),
            Instruction::Rlc => self.exec_rlc(),
            Instruction::Rrc => self.exec_rrc(),
            Instruction::Ral => self.exec_ral(),
            Instruction::Rar => self.exec_rar(),
            Instruction::Cma => self.exec_cma(),
            Instruction::Stc => self.exec_stc(),
            Instruction::Cmc => self.exec_cmc(),

            // Branches.
            Instruction::Jmp => self.exec_jmp(),
            Instruction::JmpIf { cc } => self.exec_jmp_if(cc),
            Instruction::Call => self.exec_call(),
            Instruction::CallIf { cc } => self.exec_call_if(cc),
            Instruction::Ret => self.exec_ret(),
            Instruction::RetIf { cc } => self.exec_ret_if(cc),
            Instruction::Rst { vector } => self.exec_rst(vector),
            Instruction::Pchl => self.exec_pchl(),

            // Stack.
            Instruction::Push { rp } => self.exec_push(rp)?,
            Instruction::Pop { rp } => self.exec_pop(rp)?,
            Instruction::Xthl => self.exec_xthl(),
            Instruction::Sphl => self.exec_sphl(),

            // Machine control and IO.
            Instruction::Hlt => self.exec_hlt(),
            Instruction::Ei => self.exec_ei(),
            Instruction::Di => self.exec_di(),
            Instruction::In => self.exec_in(),
            Instruction::Out => self.exec_out(),

            Instruction::Unimplemented => {
                return Err(CpuError::UnimplementedOpcode {
                    opcode,
                    pc,
                    cycles: self.cycles,
                })
            }
        };
        Ok(cycles)
    }
}
