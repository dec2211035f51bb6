use crate::bus::Bus8080;
use crate::error::CpuError;
use crate::flags::Flags;

/// Register indices as encoded in opcode bitfields.
pub const REG_B: u8 = 0;
pub const REG_C: u8 = 1;
pub const REG_D: u8 = 2;
pub const REG_E: u8 = 3;
pub const REG_H: u8 = 4;
pub const REG_L: u8 = 5;
/// Pseudo-register: the byte at address HL.
pub const REG_M: u8 = 6;
pub const REG_A: u8 = 7;

/// Register-pair indices as encoded in bits 4–5 of an opcode.
pub const PAIR_BC: u8 = 0;
pub const PAIR_DE: u8 = 1;
pub const PAIR_HL: u8 = 2;
pub const PAIR_SP: u8 = 3;

/// Register file of the Intel 8080.
///
/// BC, DE and HL are stored as whole 16-bit words; the 8-bit halves are
/// views over them (high byte = first-named register). Nothing outside this
/// type touches the packed words directly.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Registers {
    a: u8,
    flags: Flags,
    bc: u16,
    de: u16,
    hl: u16,
    sp: u16,
    pc: u16,
}

#[inline]
fn high(word: u16) -> u8 {
    word.to_be_bytes()[0]
}

#[inline]
fn low(word: u16) -> u8 {
    word.to_be_bytes()[1]
}

#[inline]
fn with_high(word: u16, value: u8) -> u16 {
    u16::from_be_bytes([value, low(word)])
}

#[inline]
fn with_low(word: u16, value: u8) -> u16 {
    u16::from_be_bytes([high(word), value])
}

impl Registers {
    /// Power-on register state with the given program counter and stack pointer.
    pub fn new(pc: u16, sp: u16) -> Self {
        Self {
            pc,
            sp,
            ..Self::default()
        }
    }

    #[inline]
    pub fn a(&self) -> u8 {
        self.a
    }

    #[inline]
    pub fn set_a(&mut self, value: u8) {
        self.a = value;
    }

    #[inline]
    pub fn flags(&self) -> Flags {
        self.flags
    }

    #[inline]
    pub fn set_flags(&mut self, flags: Flags) {
        self.flags = flags;
    }

    #[inline]
    pub fn pc(&self) -> u16 {
        self.pc
    }

    #[inline]
    pub fn set_pc(&mut self, value: u16) {
        self.pc = value;
    }

    #[inline]
    pub fn sp(&self) -> u16 {
        self.sp
    }

    #[inline]
    pub fn set_sp(&mut self, value: u16) {
        self.sp = value;
    }

    #[inline]
    pub fn bc(&self) -> u16 {
        self.bc
    }

    #[inline]
    pub fn set_bc(&mut self, value: u16) {
        self.bc = value;
    }

    #[inline]
    pub fn de(&self) -> u16 {
        self.de
    }

    #[inline]
    pub fn set_de(&mut self, value: u16) {
        self.de = value;
    }

    #[inline]
    pub fn hl(&self) -> u16 {
        self.hl
    }

    #[inline]
    pub fn set_hl(&mut self, value: u16) {
        self.hl = value;
    }

    /// Program status word: accumulator in the high byte, flags in the low byte.
    #[inline]
    pub fn psw(&self) -> u16 {
        u16::from_be_bytes([self.a, self.flags.bits()])
    }

    #[inline]
    pub fn set_psw(&mut self, value: u16) {
        let [a, f] = value.to_be_bytes();
        self.a = a;
        self.flags = Flags::from_psw(f);
    }

    pub fn b(&self) -> u8 {
        high(self.bc)
    }

    pub fn c(&self) -> u8 {
        low(self.bc)
    }

    pub fn d(&self) -> u8 {
        high(self.de)
    }

    pub fn e(&self) -> u8 {
        low(self.de)
    }

    pub fn h(&self) -> u8 {
        high(self.hl)
    }

    pub fn l(&self) -> u8 {
        low(self.hl)
    }

    /// Read a register pair by its 2-bit index: 0=BC, 1=DE, 2=HL, 3=SP.
    pub fn read_pair(&self, idx: u8) -> Result<u16, CpuError> {
        match idx {
            PAIR_BC => Ok(self.bc),
            PAIR_DE => Ok(self.de),
            PAIR_HL => Ok(self.hl),
            PAIR_SP => Ok(self.sp),
            _ => Err(CpuError::InvalidPairIndex { idx }),
        }
    }

    /// Write a register pair by index. Encoding matches `read_pair`.
    pub fn write_pair(&mut self, idx: u8, value: u16) -> Result<(), CpuError> {
        match idx {
            PAIR_BC => self.bc = value,
            PAIR_DE => self.de = value,
            PAIR_HL => self.hl = value,
            PAIR_SP => self.sp = value,
            _ => return Err(CpuError::InvalidPairIndex { idx }),
        }
        Ok(())
    }

    /// Read an 8-bit register by its 3-bit index.
    ///
    /// The encoding matches the 8080 opcode tables:
    /// 0=B, 1=C, 2=D, 3=E, 4=H, 5=L, 6=M, 7=A.
    /// Index 6 reads the bus at address HL.
    pub fn read_register<B: Bus8080 + ?Sized>(&self, bus: &mut B, idx: u8) -> Result<u8, CpuError> {
        match idx {
            REG_B => Ok(high(self.bc)),
            REG_C => Ok(low(self.bc)),
            REG_D => Ok(high(self.de)),
            REG_E => Ok(low(self.de)),
            REG_H => Ok(high(self.hl)),
            REG_L => Ok(low(self.hl)),
            REG_M => Ok(bus.read(self.hl)),
            REG_A => Ok(self.a),
            _ => Err(CpuError::InvalidRegisterIndex { idx }),
        }
    }

    /// Write an 8-bit register by index. Encoding matches `read_register`;
    /// index 6 writes the bus at address HL.
    pub fn write_register<B: Bus8080 + ?Sized>(
        &mut self,
        bus: &mut B,
        idx: u8,
        value: u8,
    ) -> Result<(), CpuError> {
        match idx {
            REG_B => self.bc = with_high(self.bc, value),
            REG_C => self.bc = with_low(self.bc, value),
            REG_D => self.de = with_high(self.de, value),
            REG_E => self.de = with_low(self.de, value),
            REG_H => self.hl = with_high(self.hl, value),
            REG_L => self.hl = with_low(self.hl, value),
            REG_M => bus.write(self.hl, value),
            REG_A => self.a = value,
            _ => return Err(CpuError::InvalidRegisterIndex { idx }),
        }
        Ok(())
    }
}

/// Mnemonic of a register index, `?` when out of range.
pub fn register_name(idx: u8) -> &'static str {
    match idx {
        REG_B => "B",
        REG_C => "C",
        REG_D => "D",
        REG_E => "E",
        REG_H => "H",
        REG_L => "L",
        REG_M => "M",
        REG_A => "A",
        _ => "?",
    }
}

/// Mnemonic of a pair index. `psw` selects the PUSH/POP spelling of index 3.
pub fn pair_name(idx: u8, psw: bool) -> &'static str {
    match idx {
        PAIR_BC => "B",
        PAIR_DE => "D",
        PAIR_HL => "H",
        PAIR_SP if psw => "PSW",
        PAIR_SP => "SP",
        _ => "?",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FlatBus([u8; 0x10000]);

    impl Bus8080 for FlatBus {
        fn read(&mut self, addr: u16) -> u8 {
            self.0[addr as usize]
        }

        fn write(&mut self, addr: u16, value: u8) {
            self.0[addr as usize] = value;
        }
    }

    #[test]
    fn halves_compose_into_pairs() {
        let mut bus = FlatBus([0; 0x10000]);
        let mut regs = Registers::default();
        regs.write_register(&mut bus, REG_B, 0x12).unwrap();
        regs.write_register(&mut bus, REG_C, 0x34).unwrap();
        regs.write_register(&mut bus, REG_D, 0x56).unwrap();
        regs.write_register(&mut bus, REG_E, 0x78).unwrap();
        regs.write_register(&mut bus, REG_H, 0x9a).unwrap();
        regs.write_register(&mut bus, REG_L, 0xbc).unwrap();

        assert_eq!(regs.read_pair(PAIR_BC).unwrap(), 0x1234);
        assert_eq!(regs.read_pair(PAIR_DE).unwrap(), 0x5678);
        assert_eq!(regs.read_pair(PAIR_HL).unwrap(), 0x9abc);
        assert_eq!((regs.b(), regs.c()), (0x12, 0x34));
    }

    #[test]
    fn pairs_decompose_into_halves() {
        let mut bus = FlatBus([0; 0x10000]);
        let mut regs = Registers::default();
        regs.write_pair(PAIR_DE, 0xbeef).unwrap();
        regs.write_pair(PAIR_SP, 0x2400).unwrap();

        assert_eq!(regs.read_register(&mut bus, REG_D).unwrap(), 0xbe);
        assert_eq!(regs.read_register(&mut bus, REG_E).unwrap(), 0xef);
        assert_eq!(regs.sp(), 0x2400);
    }

    #[test]
    fn m_goes_through_the_bus_at_hl() {
        let mut bus = FlatBus([0; 0x10000]);
        let mut regs = Registers::default();
        regs.set_hl(0x2345);
        regs.write_register(&mut bus, REG_M, 0x99).unwrap();
        assert_eq!(bus.0[0x2345], 0x99);
        assert_eq!(regs.hl(), 0x2345);

        bus.0[0x2345] = 0x42;
        assert_eq!(regs.read_register(&mut bus, REG_M).unwrap(), 0x42);
    }

    #[test]
    fn out_of_range_indices_fail() {
        let mut bus = FlatBus([0; 0x10000]);
        let mut regs = Registers::default();
        assert_eq!(
            regs.read_register(&mut bus, 8),
            Err(CpuError::InvalidRegisterIndex { idx: 8 })
        );
        assert_eq!(
            regs.write_register(&mut bus, 9, 0),
            Err(CpuError::InvalidRegisterIndex { idx: 9 })
        );
        assert_eq!(regs.read_pair(4), Err(CpuError::InvalidPairIndex { idx: 4 }));
        assert_eq!(
            regs.write_pair(7, 0),
            Err(CpuError::InvalidPairIndex { idx: 7 })
        );
    }

    #[test]
    fn psw_round_trip_masks_reserved_bits() {
        let mut regs = Registers::default();
        regs.set_psw(0x42ff);
        assert_eq!(regs.a(), 0x42);
        assert_eq!(regs.psw(), 0x42d7);
    }
}
