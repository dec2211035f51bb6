use crate::bus::Bus8080;
use crate::decode::Condition;
use crate::error::CpuError;
use crate::flags::FlagKind;

use super::Cpu8080;

impl<B: Bus8080> Cpu8080<B> {
    #[inline]
    pub(super) fn fetch_byte(&mut self) -> u8 {
        let pc = self.regs.pc();
        let value = self.bus.read(pc);
        self.regs.set_pc(pc.wrapping_add(1));
        value
    }

    #[inline]
    pub(super) fn fetch_word(&mut self) -> u16 {
        let lo = self.fetch_byte();
        let hi = self.fetch_byte();
        u16::from_le_bytes([lo, hi])
    }

    #[inline]
    pub(super) fn read_word(&mut self, addr: u16) -> u16 {
        let lo = self.bus.read(addr);
        let hi = self.bus.read(addr.wrapping_add(1));
        u16::from_le_bytes([lo, hi])
    }

    #[inline]
    pub(super) fn write_word(&mut self, addr: u16, value: u16) {
        let [lo, hi] = value.to_le_bytes();
        self.bus.write(addr, lo);
        self.bus.write(addr.wrapping_add(1), hi);
    }

    /// Stack grows downward: high byte at SP-1, low byte at SP-2, then SP -= 2.
    #[inline]
    pub(super) fn push_word(&mut self, value: u16) {
        let [lo, hi] = value.to_le_bytes();
        let sp = self.regs.sp();
        self.bus.write(sp.wrapping_sub(1), hi);
        self.bus.write(sp.wrapping_sub(2), lo);
        self.regs.set_sp(sp.wrapping_sub(2));
    }

    #[inline]
    pub(super) fn pop_word(&mut self) -> u16 {
        let sp = self.regs.sp();
        let value = self.read_word(sp);
        self.regs.set_sp(sp.wrapping_add(2));
        value
    }

    /// Read an 8-bit register or M by index.
    #[inline]
    pub(super) fn read_reg(&mut self, idx: u8) -> Result<u8, CpuError> {
        self.regs.read_register(&mut self.bus, idx)
    }

    /// Write an 8-bit register or M by index.
    #[inline]
    pub(super) fn write_reg(&mut self, idx: u8, value: u8) -> Result<(), CpuError> {
        self.regs.write_register(&mut self.bus, idx, value)
    }

    pub(super) fn condition(&self, cc: Condition) -> bool {
        let flags = self.regs.flags();
        match cc {
            Condition::NotZero => !flags.contains(FlagKind::ZERO),
            Condition::Zero => flags.contains(FlagKind::ZERO),
            Condition::NoCarry => !flags.contains(FlagKind::CARRY),
            Condition::Carry => flags.contains(FlagKind::CARRY),
            Condition::ParityOdd => !flags.contains(FlagKind::PARITY),
            Condition::ParityEven => flags.contains(FlagKind::PARITY),
            Condition::Plus => !flags.contains(FlagKind::SIGN),
            Condition::Minus => flags.contains(FlagKind::SIGN),
        }
    }
}
