use std::process::ExitCode;

use pyproject_migrate::main as pyproject_migrate_main;

fn main() -> ExitCode {
    pyproject_migrate_main(std::env::args_os())
}
