#![allow(non_snake_case)]

use crate::error::Chip8Error;
use crate::font::{FONT_CHAR_SIZE, FONT_DATA, FONT_START_ADDRESS};
use crate::framebuffer::Framebuffer;
use crate::instruction::Instruction;
use crate::keystate::KeyState;
use crate::memory::Memory;
use crate::quirks::Quirks;
use crate::stack::Stack;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::io;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

mod execute;


/// The number of general-purpose variable registers (`V0`..=`VF`).
const VARIABLE_REGISTER_COUNT: usize = 16;
/// The address at which loaded ROMs are placed, and where `pc` starts.
const PROGRAM_START_ADDRESS: u16 = 0x200;
/// The largest ROM that fits between [PROGRAM_START_ADDRESS] and the top of memory.
const MAX_ROM_SIZE_BYTES: usize = crate::memory::MEMORY_SIZE_BYTES - PROGRAM_START_ADDRESS as usize;

/// Whether the CPU is able to execute further instructions, and, if not, why it stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
enum CpuStatus {
    Running,
    Halted(Chip8Error),
}

/// A complete CHIP-8 virtual machine: memory, registers, stack, keypad, framebuffer, and
/// the configured quirk set, driven one fetch-decode-execute cycle at a time via [Cpu::step].
pub struct Cpu {
    memory: Memory,
    stack: Stack,
    framebuffer: Framebuffer,
    keystate: KeyState,
    quirks: Quirks,
    v: [u8; VARIABLE_REGISTER_COUNT],
    ir: u16,
    pc: u16,
    dt: u8,
    st: u8,
    rng: StdRng,
    status: CpuStatus,
}

impl Cpu {
    /// Constructs a freshly-initialized [Cpu]: memory zeroed, fontset preloaded at
    /// [FONT_START_ADDRESS], `pc` set to [PROGRAM_START_ADDRESS], and the random number
    /// generator seeded once from the wall clock (never reseeded thereafter, so that
    /// `CXNN` draws from a single evolving sequence rather than a fresh one each call).
    pub fn init(quirks: Quirks) -> Self {
        let mut memory = Memory::new();
        memory
            .write_bytes(FONT_START_ADDRESS, &FONT_DATA)
            .expect("fontset fits within addressable memory by construction");
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|duration| duration.as_nanos() as u64)
            .unwrap_or(0);
        log::debug!("initializing CPU with quirks {:?}, rng seed {}", quirks, seed);
        Cpu {
            memory,
            stack: Stack::new(),
            framebuffer: Framebuffer::new(),
            keystate: KeyState::new(),
            quirks,
            v: [0; VARIABLE_REGISTER_COUNT],
            ir: 0,
            pc: PROGRAM_START_ADDRESS,
            dt: 0,
            st: 0,
            rng: StdRng::seed_from_u64(seed),
            status: CpuStatus::Running,
        }
    }

    /// Resets the machine to the freshly-initialized state described by [Cpu::init],
    /// optionally adopting a new quirk set. This is the only other way (besides a fresh
    /// [Cpu::init]) for a Halted machine to return to Running.
    pub fn reset(&mut self, quirks: Quirks) {
        *self = Cpu::init(quirks);
    }

    /// Loads `bytes` as a ROM at [PROGRAM_START_ADDRESS]. Fails with
    /// [Chip8Error::RomExceedsMaxMemory] if `bytes` is longer than the machine can
    /// address; on failure, memory is left untouched.
    pub fn load_rom_bytes(&mut self, bytes: &[u8]) -> Result<(), Chip8Error> {
        if bytes.len() > MAX_ROM_SIZE_BYTES {
            return Err(Chip8Error::RomExceedsMaxMemory { len: bytes.len() });
        }
        log::debug!("loading ROM of {} bytes at {:#06X}", bytes.len(), PROGRAM_START_ADDRESS);
        self.memory
            .write_bytes(PROGRAM_START_ADDRESS as usize, bytes)
            .expect("size already checked against MAX_ROM_SIZE_BYTES");
        Ok(())
    }

    /// Loads the ROM found at `path` as per [Cpu::load_rom_bytes]. `io::ErrorKind::NotFound`
    /// is reported as [Chip8Error::RomNotFound]; any other failure to open or read the file
    /// as [Chip8Error::RomOpenFailed] / [Chip8Error::RomReadFailed] respectively. On failure,
    /// memory is left untouched.
    pub fn load_rom_file(&mut self, path: impl AsRef<Path>) -> Result<(), Chip8Error> {
        use io::Read;
        let path = path.as_ref();
        let path_string = path.display().to_string();
        let mut file = std::fs::File::open(path).map_err(|err| match err.kind() {
            io::ErrorKind::NotFound => Chip8Error::RomNotFound { path: path_string.clone() },
            _ => Chip8Error::RomOpenFailed { path: path_string.clone() },
        })?;
        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes)
            .map_err(|_| Chip8Error::RomReadFailed { path: path_string })?;
        self.load_rom_bytes(&bytes)
    }

    /// Runs a single fetch-decode-execute cycle.
    ///
    /// If the machine is [CpuStatus::Running], fetches the opcode at `pc`, advances `pc`
    /// by 2, decodes and executes the instruction, then decrements `dt` and `st` (if
    /// nonzero) exactly once. Any error transitions the machine to Halted and is
    /// returned; a Halted machine re-returns that same error on every subsequent call
    /// without touching state further.
    pub fn step(&mut self) -> Result<(), Chip8Error> {
        if let CpuStatus::Halted(error) = &self.status {
            return Err(error.clone());
        }
        match self.step_inner() {
            Ok(()) => Ok(()),
            Err(error) => {
                log::warn!("step halted: {}", error);
                self.status = CpuStatus::Halted(error.clone());
                Err(error)
            }
        }
    }

    fn step_inner(&mut self) -> Result<(), Chip8Error> {
        let opcode = self.memory.read_two_bytes(self.pc as usize)?;
        self.pc = self.pc.wrapping_add(2);
        let instruction = Instruction::decode_from(opcode)?;
        log::trace!("{:#06X}: {}", opcode, instruction.name());
        self.execute(instruction)?;
        if self.dt > 0 {
            self.dt -= 1;
        }
        if self.st > 0 {
            self.st -= 1;
        }
        Ok(())
    }

    fn execute(&mut self, instruction: Instruction) -> Result<(), Chip8Error> {
        match instruction {
            Instruction::Op00E0 => self.execute_00E0(),
            Instruction::Op00EE => self.execute_00EE(),
            Instruction::Op1NNN { nnn } => self.execute_1NNN(nnn),
            Instruction::Op2NNN { nnn } => self.execute_2NNN(nnn),
            Instruction::Op3XNN { x, nn } => self.execute_3XNN(x, nn),
            Instruction::Op4XNN { x, nn } => self.execute_4XNN(x, nn),
            Instruction::Op5XY0 { x, y } => self.execute_5XY0(x, y),
            Instruction::Op6XNN { x, nn } => self.execute_6XNN(x, nn),
            Instruction::Op7XNN { x, nn } => self.execute_7XNN(x, nn),
            Instruction::Op8XY0 { x, y } => self.execute_8XY0(x, y),
            Instruction::Op8XY1 { x, y } => self.execute_8XY1(x, y),
            Instruction::Op8XY2 { x, y } => self.execute_8XY2(x, y),
            Instruction::Op8XY3 { x, y } => self.execute_8XY3(x, y),
            Instruction::Op8XY4 { x, y } => self.execute_8XY4(x, y),
            Instruction::Op8XY5 { x, y } => self.execute_8XY5(x, y),
            Instruction::Op8XY6 { x, y } => self.execute_8XY6(x, y),
            Instruction::Op8XY7 { x, y } => self.execute_8XY7(x, y),
            Instruction::Op8XYE { x, y } => self.execute_8XYE(x, y),
            Instruction::Op9XY0 { x, y } => self.execute_9XY0(x, y),
            Instruction::OpANNN { nnn } => self.execute_ANNN(nnn),
            Instruction::OpBNNN { nnn } => self.execute_BNNN(nnn),
            Instruction::OpCXNN { x, nn } => self.execute_CXNN(x, nn),
            Instruction::OpDXYN { x, y, n } => self.execute_DXYN(x, y, n),
            Instruction::OpEX9E { x } => self.execute_EX9E(x),
            Instruction::OpEXA1 { x } => self.execute_EXA1(x),
            Instruction::OpFX07 { x } => self.execute_FX07(x),
            Instruction::OpFX0A { x } => self.execute_FX0A(x),
            Instruction::OpFX15 { x } => self.execute_FX15(x),
            Instruction::OpFX18 { x } => self.execute_FX18(x),
            Instruction::OpFX1E { x } => self.execute_FX1E(x),
            Instruction::OpFX29 { x } => self.execute_FX29(x),
            Instruction::OpFX33 { x } => self.execute_FX33(x),
            Instruction::OpFX55 { x } => self.execute_FX55(x),
            Instruction::OpFX65 { x } => self.execute_FX65(x),
        }
    }

    /// Sets the pressed/not-pressed state of hex keypad key `index` (`0..=15`).
    pub fn set_key(&mut self, index: u8, down: bool) -> Result<(), Chip8Error> {
        self.keystate.set_key_status(index, down)
    }

    /// Returns whether hex keypad key `index` (`0..=15`) is currently held.
    pub fn get_key(&self, index: u8) -> Result<bool, Chip8Error> {
        self.keystate.is_key_pressed(index)
    }

    /// Replaces the active quirk set wholesale.
    pub fn set_quirks(&mut self, quirks: Quirks) {
        self.quirks = quirks;
    }

    /// Returns the currently active quirk set.
    pub fn quirks(&self) -> Quirks {
        self.quirks
    }

    /// Returns the program counter.
    pub fn pc(&self) -> u16 {
        self.pc
    }

    /// Returns the index register.
    pub fn ir(&self) -> u16 {
        self.ir
    }

    /// Returns the number of entries currently on the call stack.
    pub fn sp(&self) -> usize {
        self.stack.len()
    }

    /// Returns the delay timer.
    pub fn dt(&self) -> u8 {
        self.dt
    }

    /// Returns the sound timer.
    pub fn st(&self) -> u8 {
        self.st
    }

    /// Returns a copy of the 16 general-purpose variable registers `V0..=VF`.
    pub fn v(&self) -> [u8; VARIABLE_REGISTER_COUNT] {
        self.v
    }

    /// Returns a snapshot of the 16-entry call stack backing array (entries at or
    /// beyond [Cpu::sp] are not meaningful).
    pub fn stack_entries(&self) -> [u16; 16] {
        self.stack.entries()
    }

    /// Returns the 64x32 framebuffer, one byte (0 or 1) per cell, row-major.
    pub fn framebuffer(&self) -> &[u8; 2048] {
        self.framebuffer.pixels()
    }

    /// Returns whether the machine has halted, and if so, the error that halted it.
    pub fn halted(&self) -> Option<Chip8Error> {
        match &self.status {
            CpuStatus::Running => None,
            CpuStatus::Halted(error) => Some(error.clone()),
        }
    }
}
