use std::process::ExitCode;

fn main() -> ExitCode {
    respawn::app::measure_main()
}
