use std::env;
use std::process::ExitCode;
use vipchip::{Cpu, Quirks, FRAMEBUFFER_HEIGHT, FRAMEBUFFER_WIDTH};

/// Upper bound on fetch-decode-execute cycles run by this demonstration harness before it
/// gives up and prints whatever state the machine reached.
const MAX_STEPS: u32 = 100_000;

fn main() -> ExitCode {
    env_logger::init();

    let mut args = env::args();
    let program_name = args.next().unwrap_or_else(|| "vipchip".to_string());
    let Some(rom_path) = args.next() else {
        eprintln!("usage: {} <rom-path>", program_name);
        return ExitCode::FAILURE;
    };

    let mut cpu = Cpu::init(Quirks::default());
    if let Err(error) = cpu.load_rom_file(&rom_path) {
        eprintln!("failed to load ROM {}: {}", rom_path, error);
        return ExitCode::FAILURE;
    }

    let mut steps_run = 0;
    for _ in 0..MAX_STEPS {
        steps_run += 1;
        if cpu.step().is_err() {
            break;
        }
    }

    println!("ran {} cycle(s)", steps_run);
    println!(
        "pc={:#06X} ir={:#06X} sp={} dt={} st={}",
        cpu.pc(),
        cpu.ir(),
        cpu.sp(),
        cpu.dt(),
        cpu.st()
    );
    println!("v={:02X?}", cpu.v());
    if let Some(error) = cpu.halted() {
        println!("halted: {}", error);
    }
    print_framebuffer(&cpu);
    ExitCode::SUCCESS
}

fn print_framebuffer(cpu: &Cpu) {
    let pixels = cpu.framebuffer();
    for row in 0..FRAMEBUFFER_HEIGHT {
        let mut line = String::with_capacity(FRAMEBUFFER_WIDTH);
        for col in 0..FRAMEBUFFER_WIDTH {
            line.push(if pixels[row * FRAMEBUFFER_WIDTH + col] == 1 { '#' } else { ' ' });
        }
        println!("{}", line);
    }
}
