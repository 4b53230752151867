use std::process::ExitCode;

use ripfile::main as ripfile_main;

fn main() -> ExitCode {
    ripfile_main(std::env::args_os())
}
