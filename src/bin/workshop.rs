use std::process::ExitCode;

fn main() -> ExitCode {
    respawn::app::workshop_main()
}
