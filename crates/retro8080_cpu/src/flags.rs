use bitflags::bitflags;

bitflags! {
    /// Status bits of the 8080 flags byte (low half of PSW).
    ///
    /// Layout (bit index in the byte, from MSB to LSB):
    /// - bit 7: S (sign)
    /// - bit 6: Z (zero)
    /// - bit 4: AC (auxiliary carry)
    /// - bit 2: P (parity)
    /// - bit 0: CY (carry)
    ///
    /// Bit 1 always reads as 1; bits 3 and 5 always read as 0.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct FlagKind: u8 {
        const SIGN = 0x80;
        const ZERO = 0x40;
        const AUX_CARRY = 0x10;
        const PARITY = 0x04;
        const CARRY = 0x01;
    }
}

impl FlagKind {
    /// Flags touched by INR/DCR: everything except carry.
    pub const SZAP: FlagKind = FlagKind::SIGN
        .union(FlagKind::ZERO)
        .union(FlagKind::AUX_CARRY)
        .union(FlagKind::PARITY);
}

/// Reserved bit that is hard-wired to 1.
const RESERVED_SET: u8 = 0x02;
/// Reserved bits that are hard-wired to 0.
const RESERVED_CLEAR: u8 = 0x28;

/// Operands of the operation that produced a result.
///
/// Only the auxiliary carry needs them; every other flag is derived from the
/// untruncated result alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operands {
    /// `lhs + rhs + carry_in`
    Add { lhs: u8, rhs: u8, carry_in: bool },
    /// `lhs - rhs - borrow_in`, performed by the ALU as
    /// `lhs + !rhs + !borrow_in`.
    Sub { lhs: u8, rhs: u8, borrow_in: bool },
    /// Logical AND; the 8080 reports bit 3 of `lhs | rhs` as AC.
    And { lhs: u8, rhs: u8 },
}

impl Operands {
    fn aux_carry(self) -> bool {
        match self {
            Operands::Add { lhs, rhs, carry_in } => {
                (lhs & 0x0f) + (rhs & 0x0f) + u8::from(carry_in) > 0x0f
            }
            Operands::Sub {
                lhs,
                rhs,
                borrow_in,
            } => (lhs & 0x0f) + (!rhs & 0x0f) + u8::from(!borrow_in) > 0x0f,
            Operands::And { lhs, rhs } => (lhs | rhs) & 0x08 != 0,
        }
    }
}

/// The processor status byte.
///
/// A `Flags` value can only be produced by [`Flags::evaluate`] and its
/// siblings, all of which re-apply the reserved-bit mask, so the byte held
/// here is always one the hardware could report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Flags(u8);

impl Default for Flags {
    fn default() -> Self {
        Flags(RESERVED_SET)
    }
}

impl Flags {
    #[inline]
    fn normalize(bits: u8) -> Flags {
        Flags((bits & !RESERVED_CLEAR) | RESERVED_SET)
    }

    /// Rebuild the flags from a PSW byte (e.g. `POP PSW`).
    pub fn from_psw(byte: u8) -> Flags {
        Flags::normalize(byte)
    }

    /// Raw flags byte as pushed by `PUSH PSW`.
    #[inline]
    pub fn bits(self) -> u8 {
        self.0
    }

    #[inline]
    pub fn contains(self, kind: FlagKind) -> bool {
        self.0 & kind.bits() == kind.bits()
    }

    /// Compute the flags after an 8-bit operation.
    ///
    /// `result` is the untruncated value (`a + b + c`, `a - b - c`, ...). Only
    /// the flags in `affected` are recomputed; every other flag keeps its
    /// current value. When `operands` is `None` and AC is requested, AC is
    /// cleared.
    pub fn evaluate(self, result: i32, affected: FlagKind, operands: Option<Operands>) -> Flags {
        let value = result as u8;

        let mut computed = FlagKind::empty();
        computed.set(FlagKind::SIGN, value & 0x80 != 0);
        computed.set(FlagKind::ZERO, value == 0);
        computed.set(
            FlagKind::AUX_CARRY,
            operands.is_some_and(Operands::aux_carry),
        );
        computed.set(FlagKind::PARITY, parity(value));
        computed.set(FlagKind::CARRY, !(0..=0xff).contains(&result));

        self.merge(computed, affected)
    }

    /// Compute the carry after a 16-bit register-pair operation (`DAD`).
    pub fn evaluate_pair(self, result: u32) -> Flags {
        let mut computed = FlagKind::empty();
        computed.set(FlagKind::CARRY, result > 0xffff);
        self.merge(computed, FlagKind::CARRY)
    }

    /// Replace only the carry bit (rotates, `STC`, `CMC`, `DAA`).
    pub fn with_carry(self, carry: bool) -> Flags {
        let computed = if carry {
            FlagKind::CARRY
        } else {
            FlagKind::empty()
        };
        self.merge(computed, FlagKind::CARRY)
    }

    fn merge(self, computed: FlagKind, affected: FlagKind) -> Flags {
        let mask = affected.bits();
        Flags::normalize((self.0 & !mask) | (computed.bits() & mask))
    }
}

/// True when `value` has an even number of set bits.
#[inline]
pub fn parity(value: u8) -> bool {
    value.count_ones() % 2 == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_has_only_the_reserved_bit() {
        assert_eq!(Flags::default().bits(), 0x02);
    }

    #[test]
    fn reserved_bits_are_forced_on_every_path() {
        assert_eq!(Flags::from_psw(0xff).bits(), 0xd7);
        assert_eq!(Flags::from_psw(0x00).bits(), 0x02);
        let f = Flags::from_psw(0xff).evaluate(0, FlagKind::all(), None);
        assert_eq!(f.bits() & 0x2a, 0x02);
    }

    #[test]
    fn parity_matches_popcount_for_every_byte() {
        for v in 0..=255u8 {
            let f = Flags::default().evaluate(i32::from(v), FlagKind::PARITY, None);
            assert_eq!(f.contains(FlagKind::PARITY), v.count_ones() % 2 == 0, "{v:#04x}");
        }
    }

    #[test]
    fn sign_zero_and_carry_follow_result() {
        let f = Flags::default().evaluate(0x80, FlagKind::all(), None);
        assert!(f.contains(FlagKind::SIGN));
        assert!(!f.contains(FlagKind::ZERO));
        assert!(!f.contains(FlagKind::CARRY));

        let f = Flags::default().evaluate(0x100, FlagKind::all(), None);
        assert!(f.contains(FlagKind::ZERO));
        assert!(f.contains(FlagKind::CARRY));

        let f = Flags::default().evaluate(-1, FlagKind::all(), None);
        assert!(f.contains(FlagKind::SIGN));
        assert!(f.contains(FlagKind::CARRY));

        let f = Flags::default().evaluate(0x7f, FlagKind::all(), None);
        assert!(!f.contains(FlagKind::SIGN));
        assert!(!f.contains(FlagKind::PARITY));
    }

    #[test]
    fn unrequested_flags_are_preserved() {
        let set = Flags::from_psw(0xff);
        let f = set.evaluate(0x01, FlagKind::ZERO, None);
        assert!(!f.contains(FlagKind::ZERO));
        assert!(f.contains(FlagKind::CARRY));
        assert!(f.contains(FlagKind::SIGN));
        assert!(f.contains(FlagKind::AUX_CARRY));
        assert!(f.contains(FlagKind::PARITY));
    }

    #[test]
    fn additive_aux_carry() {
        let add = |lhs, rhs, carry_in| {
            Flags::default()
                .evaluate(
                    0,
                    FlagKind::AUX_CARRY,
                    Some(Operands::Add { lhs, rhs, carry_in }),
                )
                .contains(FlagKind::AUX_CARRY)
        };
        assert!(add(0x0f, 0x01, false));
        assert!(!add(0x0e, 0x01, false));
        assert!(add(0x0e, 0x01, true));
        assert!(!add(0xf0, 0xf0, false));
    }

    #[test]
    fn subtractive_aux_carry_is_the_twos_complement_carry() {
        let sub = |lhs, rhs, borrow_in| {
            Flags::default()
                .evaluate(
                    0,
                    FlagKind::AUX_CARRY,
                    Some(Operands::Sub {
                        lhs,
                        rhs,
                        borrow_in,
                    }),
                )
                .contains(FlagKind::AUX_CARRY)
        };
        // No borrow out of bit 4: the complemented addition carries.
        assert!(sub(0x05, 0x03, false));
        assert!(sub(0x00, 0x00, false));
        // Borrow out of bit 4: no carry.
        assert!(!sub(0x03, 0x05, false));
        assert!(!sub(0x10, 0x01, false));
        assert!(!sub(0x05, 0x05, true));
    }

    #[test]
    fn logical_and_reports_bit3() {
        let f = Flags::default().evaluate(
            0,
            FlagKind::AUX_CARRY,
            Some(Operands::And {
                lhs: 0x08,
                rhs: 0x00,
            }),
        );
        assert!(f.contains(FlagKind::AUX_CARRY));
    }

    #[test]
    fn pair_carry() {
        assert!(Flags::default().evaluate_pair(0x1_0000).contains(FlagKind::CARRY));
        assert!(!Flags::default().evaluate_pair(0xffff).contains(FlagKind::CARRY));
        let f = Flags::from_psw(0xc4).evaluate_pair(0x1_0000);
        assert_eq!(f.bits(), 0xc7);
    }

    #[test]
    fn with_carry_only_touches_carry() {
        let f = Flags::from_psw(0xd7).with_carry(false);
        assert_eq!(f.bits(), 0xd6);
        assert_eq!(f.with_carry(true).bits(), 0xd7);
    }
}
