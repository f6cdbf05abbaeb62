// Platform and interpreter resolution

use crate::platform::types::{ExecutorKind, InterpreterPath, Platform};

const CMD_EXE: InterpreterPath = InterpreterPath::new(r"C:\Windows\System32\cmd.exe");
const POWERSHELL_EXE: InterpreterPath =
    InterpreterPath::new(r"C:\Windows\System32\WindowsPowerShell\v1.0\powershell.exe");
const BIN_SH: InterpreterPath = InterpreterPath::new("/bin/sh");
const BIN_BASH: InterpreterPath = InterpreterPath::new("/bin/bash");

/// Map an OS identifier to a platform tag.
///
/// `darwin` becomes `macos`; every other name is lowercased and passed through.
pub fn platform_from_os_name(os_name: &str) -> Platform {
    let name = os_name.to_lowercase();
    if name == "darwin" {
        return Platform::Macos;
    }
    Platform::from(name)
}

/// Platform of the running host, read on every call
pub fn local_platform() -> Platform {
    platform_from_os_name(std::env::consts::OS)
}

/// Look up the interpreter for an executor on a platform.
///
/// `None` means the test cannot run here; callers treat it as a skip.
pub fn resolve_interpreter(kind: ExecutorKind, platform: &Platform) -> Option<InterpreterPath> {
    match kind {
        ExecutorKind::Manual => None,
        ExecutorKind::CommandPrompt => match platform {
            Platform::Windows => Some(CMD_EXE),
            Platform::Linux | Platform::Macos | Platform::Default => Some(BIN_SH),
            Platform::Other(_) => None,
        },
        ExecutorKind::Powershell => match platform {
            Platform::Windows => Some(POWERSHELL_EXE),
            _ => None,
        },
        ExecutorKind::Sh => match platform {
            Platform::Linux | Platform::Macos => Some(BIN_SH),
            _ => None,
        },
        ExecutorKind::Bash => match platform {
            Platform::Linux | Platform::Macos => Some(BIN_BASH),
            _ => None,
        },
    }
}
