use std::fmt;

/// Fatal conditions raised by the CPU core.
///
/// None of these are recoverable: once one is returned the engine enters
/// the errored state and replays the same error on every later step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CpuError {
    /// An opcode without a defined semantic was fetched.
    UnimplementedOpcode { opcode: u8, pc: u16, cycles: u64 },
    /// A single-register index outside `0..=7` reached the register file.
    InvalidRegisterIndex { idx: u8 },
    /// A register-pair index outside `0..=3` reached the register file.
    InvalidPairIndex { idx: u8 },
}

impl fmt::Display for CpuError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnimplementedOpcode { opcode, pc, cycles } => write!(
                f,
                "unimplemented opcode 0x{opcode:02X} at PC 0x{pc:04X} after {cycles} cycles"
            ),
            Self::InvalidRegisterIndex { idx } => write!(f, "invalid register index {idx}"),
            Self::InvalidPairIndex { idx } => write!(f, "invalid register pair index {idx}"),
        }
    }
}

impl std::error::Error for CpuError {}

/// Errors that can occur while placing a ROM image into memory.
#[derive(Debug)]
pub enum RomError {
    /// Underlying I/O error (file not found, permission denied, etc.)
    Io(std::io::Error),

    /// The image does not fit in the addressable RAM.
    RomTooLarge { size: usize, capacity: usize },
}

impl fmt::Display for RomError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::RomTooLarge { size, capacity } => {
                write!(f, "ROM is {size} bytes, memory holds only {capacity}")
            }
        }
    }
}

impl std::error::Error for RomError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::RomTooLarge { .. } => None,
        }
    }
}

impl From<std::io::Error> for RomError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
