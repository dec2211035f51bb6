//! Opcode decoding.
//!
//! Every opcode byte maps to exactly one [`Instruction`]. Register and pair
//! operands are taken from the opcode bitfields:
//!
//! - bits 3–5: destination register, ALU operation or branch condition
//! - bits 4–5: register pair
//! - bits 0–2: source register
//!
//! The tables are built at compile time by running [`decode`] over all 256
//! values, so there is no index without an entry.

use std::fmt;

use crate::regs::{pair_name, register_name};

/// 8-bit accumulator operation selected by bits 3–5 of `80–BF` and the
/// immediate forms `C6..FE`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AluOp {
    Add,
    Adc,
    Sub,
    Sbb,
    Ana,
    Xra,
    Ora,
    Cmp,
}

impl AluOp {
    const fn from_bits(bits: u8) -> AluOp {
        match bits & 0x07 {
            0 => AluOp::Add,
            1 => AluOp::Adc,
            2 => AluOp::Sub,
            3 => AluOp::Sbb,
            4 => AluOp::Ana,
            5 => AluOp::Xra,
            6 => AluOp::Ora,
            _ => AluOp::Cmp,
        }
    }

    fn mnemonic(self, immediate: bool) -> &'static str {
        match (self, immediate) {
            (AluOp::Add, false) => "ADD",
            (AluOp::Adc, false) => "ADC",
            (AluOp::Sub, false) => "SUB",
            (AluOp::Sbb, false) => "SBB",
            (AluOp::Ana, false) => "ANA",
            (AluOp::Xra, false) => "XRA",
            (AluOp::Ora, false) => "ORA",
            (AluOp::Cmp, false) => "CMP",
            (AluOp::Add, true) => "ADI",
            (AluOp::Adc, true) => "ACI",
            (AluOp::Sub, true) => "SUI",
            (AluOp::Sbb, true) => "SBI",
            (AluOp::Ana, true) => "ANI",
            (AluOp::Xra, true) => "XRI",
            (AluOp::Ora, true) => "ORI",
            (AluOp::Cmp, true) => "CPI",
        }
    }
}

/// Branch condition selected by bits 3–5 of conditional jumps, calls and returns.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Condition {
    NotZero,
    Zero,
    NoCarry,
    Carry,
    ParityOdd,
    ParityEven,
    Plus,
    Minus,
}

impl Condition {
    const fn from_bits(bits: u8) -> Condition {
        match bits & 0x07 {
            0 => Condition::NotZero,
            1 => Condition::Zero,
            2 => Condition::NoCarry,
            3 => Condition::Carry,
            4 => Condition::ParityOdd,
            5 => Condition::ParityEven,
            6 => Condition::Plus,
            _ => Condition::Minus,
        }
    }

    fn suffix(self) -> &'static str {
        match self {
            Condition::NotZero => "NZ",
            Condition::Zero => "Z",
            Condition::NoCarry => "NC",
            Condition::Carry => "C",
            Condition::ParityOdd => "PO",
            Condition::ParityEven => "PE",
            Condition::Plus => "P",
            Condition::Minus => "M",
        }
    }
}

/// Decoded instruction semantic.
///
/// `r`, `dst` and `src` are 3-bit register indices (6 = M); `rp` is a 2-bit
/// pair index (3 = SP, or PSW for `Push`/`Pop`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Instruction {
    Nop,
    Lxi { rp: u8 },
    Stax { rp: u8 },
    Ldax { rp: u8 },
    Shld,
    Lhld,
    Sta,
    Lda,
    Inx { rp: u8 },
    Dcx { rp: u8 },
    Dad { rp: u8 },
    Inr { r: u8 },
    Dcr { r: u8 },
    Mvi { r: u8 },
    Rlc,
    Rrc,
    Ral,
    Rar,
    Daa,
    Cma,
    Stc,
    Cmc,
    Mov { dst: u8, src: u8 },
    Hlt,
    Alu { op: AluOp, src: u8 },
    AluImm { op: AluOp },
    Ret,
    RetIf { cc: Condition },
    Jmp,
    JmpIf { cc: Condition },
    Call,
    CallIf { cc: Condition },
    Push { rp: u8 },
    Pop { rp: u8 },
    Rst { vector: u8 },
    Out,
    In,
    Xthl,
    Xchg,
    Pchl,
    Sphl,
    Di,
    Ei,
    /// Opcode with no documented 8080 meaning.
    Unimplemented,
}

/// Decode one opcode byte using only the documented instruction set.
pub const fn decode(opcode: u8) -> Instruction {
    let dst = (opcode >> 3) & 0x07;
    let src = opcode & 0x07;
    let rp = (opcode >> 4) & 0x03;
    let odd_row = opcode & 0x08 != 0;

    match opcode >> 6 {
        0 => match src {
            0 if opcode == 0x00 => Instruction::Nop,
            0 => Instruction::Unimplemented,
            1 if odd_row => Instruction::Dad { rp },
            1 => Instruction::Lxi { rp },
            2 => match dst {
                0 | 2 => Instruction::Stax { rp },
                1 | 3 => Instruction::Ldax { rp },
                4 => Instruction::Shld,
                5 => Instruction::Lhld,
                6 => Instruction::Sta,
                _ => Instruction::Lda,
            },
            3 if odd_row => Instruction::Dcx { rp },
            3 => Instruction::Inx { rp },
            4 => Instruction::Inr { r: dst },
            5 => Instruction::Dcr { r: dst },
            6 => Instruction::Mvi { r: dst },
            _ => match dst {
                0 => Instruction::Rlc,
                1 => Instruction::Rrc,
                2 => Instruction::Ral,
                3 => Instruction::Rar,
                4 => Instruction::Daa,
                5 => Instruction::Cma,
                6 => Instruction::Stc,
                _ => Instruction::Cmc,
            },
        },
        1 if opcode == 0x76 => Instruction::Hlt,
        1 => Instruction::Mov { dst, src },
        2 => Instruction::Alu {
            op: AluOp::from_bits(dst),
            src,
        },
        _ => match src {
            0 => Instruction::RetIf {
                cc: Condition::from_bits(dst),
            },
            1 => match dst {
                1 => Instruction::Ret,
                3 => Instruction::Unimplemented,
                5 => Instruction::Pchl,
                7 => Instruction::Sphl,
                _ => Instruction::Pop { rp },
            },
            2 => Instruction::JmpIf {
                cc: Condition::from_bits(dst),
            },
            3 => match dst {
                0 => Instruction::Jmp,
                1 => Instruction::Unimplemented,
                2 => Instruction::Out,
                3 => Instruction::In,
                4 => Instruction::Xthl,
                5 => Instruction::Xchg,
                6 => Instruction::Di,
                _ => Instruction::Ei,
            },
            4 => Instruction::CallIf {
                cc: Condition::from_bits(dst),
            },
            5 if !odd_row => Instruction::Push { rp },
            5 if opcode == 0xcd => Instruction::Call,
            5 => Instruction::Unimplemented,
            6 => Instruction::AluImm {
                op: AluOp::from_bits(dst),
            },
            _ => Instruction::Rst { vector: dst },
        },
    }
}

/// Decode one opcode byte, giving the undocumented opcodes the meaning real
/// silicon gives them (NOP, JMP, RET, CALL).
pub const fn decode_with_aliases(opcode: u8) -> Instruction {
    match opcode {
        0x08 | 0x10 | 0x18 | 0x20 | 0x28 | 0x30 | 0x38 => Instruction::Nop,
        0xcb => Instruction::Jmp,
        0xd9 => Instruction::Ret,
        0xdd | 0xed | 0xfd => Instruction::Call,
        _ => decode(opcode),
    }
}

const fn build_table(aliases: bool) -> [Instruction; 256] {
    let mut table = [Instruction::Unimplemented; 256];
    let mut opcode = 0usize;
    while opcode < 256 {
        table[opcode] = if aliases {
            decode_with_aliases(opcode as u8)
        } else {
            decode(opcode as u8)
        };
        opcode += 1;
    }
    table
}

/// Documented 8080 instruction set; undocumented opcodes are `Unimplemented`.
pub static DOCUMENTED: [Instruction; 256] = build_table(false);

/// Documented instruction set plus the undocumented aliases.
pub static WITH_ALIASES: [Instruction; 256] = build_table(true);

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Instruction::Nop => f.write_str("NOP"),
            Instruction::Lxi { rp } => write!(f, "LXI {}", pair_name(rp, false)),
            Instruction::Stax { rp } => write!(f, "STAX {}", pair_name(rp, false)),
            Instruction::Ldax { rp } => write!(f, "LDAX {}", pair_name(rp, false)),
            Instruction::Shld => f.write_str("SHLD"),
            Instruction::Lhld => f.write_str("LHLD"),
            Instruction::Sta => f.write_str("STA"),
            Instruction::Lda => f.write_str("LDA"),
            Instruction::Inx { rp } => write!(f, "INX {}", pair_name(rp, false)),
            Instruction::Dcx { rp } => write!(f, "DCX {}", pair_name(rp, false)),
            Instruction::Dad { rp } => write!(f, "DAD {}", pair_name(rp, false)),
            Instruction::Inr { r } => write!(f, "INR {}", register_name(r)),
            Instruction::Dcr { r } => write!(f, "DCR {}", register_name(r)),
            Instruction::Mvi { r } => write!(f, "MVI {}", register_name(r)),
            Instruction::Rlc => f.write_str("RLC"),
            Instruction::Rrc => f.write_str("RRC"),
            Instruction::Ral => f.write_str("RAL"),
            Instruction::Rar => f.write_str("RAR"),
            Instruction::Daa => f.write_str("DAA"),
            Instruction::Cma => f.write_str("CMA"),
            Instruction::Stc => f.write_str("STC"),
            Instruction::Cmc => f.write_str("CMC"),
            Instruction::Mov { dst, src } => {
                write!(f, "MOV {},{}", register_name(dst), register_name(src))
            }
            Instruction::Hlt => f.write_str("HLT"),
            Instruction::Alu { op, src } => write!(f, "{} {}", op.mnemonic(false), register_name(src)),
            Instruction::AluImm { op } => f.write_str(op.mnemonic(true)),
            Instruction::Ret => f.write_str("RET"),
            Instruction::RetIf { cc } => write!(f, "R{}", cc.suffix()),
            Instruction::Jmp => f.write_str("JMP"),
            Instruction::JmpIf { cc } => write!(f, "J{}", cc.suffix()),
            Instruction::Call => f.write_str("CALL"),
            Instruction::CallIf { cc } => write!(f, "C{}", cc.suffix()),
            Instruction::Push { rp } => write!(f, "PUSH {}", pair_name(rp, true)),
            Instruction::Pop { rp } => write!(f, "POP {}", pair_name(rp, true)),
            Instruction::Rst { vector } => write!(f, "RST {vector}"),
            Instruction::Out => f.write_str("OUT"),
            Instruction::In => f.write_str("IN"),
            Instruction::Xthl => f.write_str("XTHL"),
            Instruction::Xchg => f.write_str("XCHG"),
            Instruction::Pchl => f.write_str("PCHL"),
            Instruction::Sphl => f.write_str("SPHL"),
            Instruction::Di => f.write_str("DI"),
            Instruction::Ei => f.write_str("EI"),
            Instruction::Unimplemented => f.write_str("???"),
        }
    }
}
