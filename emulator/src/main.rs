use std::path::PathBuf;
use std::process;

mod display;
mod keymap;
mod run;

fn usage(program: &str) -> ! {
    eprintln!("usage: {} <scale> <delay_ms> <rom>", program);
    process::exit(1);
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() != 4 {
        usage(&args[0]);
    }
    let scale: u32 = args[1].parse().unwrap_or_else(|_| usage(&args[0]));
    let delay_ms: u64 = args[2].parse().unwrap_or_else(|_| usage(&args[0]));
    let rom = PathBuf::from(&args[3]);

    run::run(scale, delay_ms, rom);
}
