use std::path::Path;

use crate::bus::Bus8080;
use crate::error::RomError;

/// Physical RAM size. Addresses at or above this mirror lower addresses.
///
/// The arcade board maps:
/// - 0x0000–0x1fff: program ROM
/// - 0x2000–0x23ff: work RAM
/// - 0x2400–0x3fff: video RAM
pub const MEMORY_SIZE: usize = 0x4000;

/// Flat, mirrored memory for the arcade board.
pub struct Memory {
    ram: Box<[u8; MEMORY_SIZE]>,
}

impl Memory {
    pub fn new() -> Self {
        Self {
            ram: Box::new([0; MEMORY_SIZE]),
        }
    }

    /// Copy a ROM image into memory starting at 0x0000.
    ///
    /// Images that do not fit are rejected and memory is left untouched.
    pub fn load_bytes(&mut self, rom: &[u8]) -> Result<(), RomError> {
        if rom.len() > MEMORY_SIZE {
            return Err(RomError::RomTooLarge {
                size: rom.len(),
                capacity: MEMORY_SIZE,
            });
        }
        self.ram[..rom.len()].copy_from_slice(rom);
        Ok(())
    }

    /// Read a ROM file from disk and load it at 0x0000.
    ///
    /// Returns the number of bytes placed in memory.
    pub fn load_rom(&mut self, path: impl AsRef<Path>) -> Result<usize, RomError> {
        let path = path.as_ref();
        let data = std::fs::read(path)?;
        self.load_bytes(&data)?;
        log::info!("Loaded {} byte ROM from '{}'", data.len(), path.display());
        Ok(data.len())
    }

    /// Raw view of the physical store.
    pub fn as_slice(&self) -> &[u8] {
        &self.ram[..]
    }

    #[inline]
    fn index(addr: u16) -> usize {
        addr as usize % MEMORY_SIZE
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

impl Bus8080 for Memory {
    fn read(&mut self, addr: u16) -> u8 {
        self.ram[Self::index(addr)]
    }

    fn write(&mut self, addr: u16, value: u8) {
        self.ram[Self::index(addr)] = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upper_addresses_mirror_lower_ones() {
        let mut mem = Memory::new();
        mem.write(0x2000, 0xab);
        assert_eq!(mem.read(0x6000), 0xab);
        assert_eq!(mem.read(0xa000), 0xab);
        assert_eq!(mem.read(0xe000), 0xab);

        mem.write(0xffff, 0x12);
        assert_eq!(mem.read(0x3fff), 0x12);
    }

    #[test]
    fn load_bytes_places_rom_at_zero() {
        let mut mem = Memory::new();
        mem.load_bytes(&[0x01, 0x02, 0x03]).unwrap();
        assert_eq!(&mem.as_slice()[..4], &[0x01, 0x02, 0x03, 0x00]);
    }

    #[test]
    fn full_size_rom_fits() {
        let mut mem = Memory::new();
        let rom = vec![0x55; MEMORY_SIZE];
        mem.load_bytes(&rom).unwrap();
        assert_eq!(mem.read(0x3fff), 0x55);
    }

    #[test]
    fn oversized_rom_is_rejected_without_partial_load() {
        let mut mem = Memory::new();
        let rom = vec![0xff; MEMORY_SIZE + 1];
        let err = mem.load_bytes(&rom).unwrap_err();
        assert!(matches!(
            err,
            RomError::RomTooLarge {
                size,
                capacity: MEMORY_SIZE
            } if size == MEMORY_SIZE + 1
        ));
        assert!(mem.as_slice().iter().all(|&b| b == 0));
    }

    #[test]
    fn load_rom_reads_from_disk() {
        let path = std::env::temp_dir().join(format!("retro8080-rom-{}.bin", std::process::id()));
        std::fs::write(&path, [0xc3, 0x00, 0x10]).unwrap();

        let mut mem = Memory::new();
        let loaded = mem.load_rom(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(loaded, 3);
        assert_eq!(mem.read(0x0000), 0xc3);
        assert_eq!(mem.read(0x0002), 0x10);
    }

    #[test]
    fn missing_rom_is_an_io_error() {
        let mut mem = Memory::new();
        let err = mem
            .load_rom("/nonexistent/retro8080/invaders.rom")
            .unwrap_err();
        assert!(matches!(err, RomError::Io(_)));
    }
}
