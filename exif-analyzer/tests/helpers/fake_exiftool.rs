//! Stand-in ExifTool for tests
//!
//! A shell script that answers `-ver` and prints the contents of the file it
//! is given. File names select failure modes:
//! - `*broken*`: error on stderr, exit status 1
//! - `*slow*`: sleeps far past any test timeout

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::time::Duration;

const FAKE_EXIFTOOL: &str = r#"#!/bin/sh
if [ "$1" = "-ver" ]; then
    echo "12.76"
    exit 0
fi
case "$(basename "$1")" in
    *broken*)
        echo "Error: File format error - $1" >&2
        exit 1
        ;;
    *slow*)
        exec sleep 30
        ;;
esac
cat "$1"
"#;

/// Answers `-ver`, then removes itself once `<script>.armed` exists
const VANISHING_EXIFTOOL: &str = r#"#!/bin/sh
if [ "$1" = "-ver" ]; then
    echo "12.76"
    if [ -f "$0.armed" ]; then
        rm -f "$0" "$0.armed"
    fi
    exit 0
fi
cat "$1"
"#;

const FAILING_EXIFTOOL: &str = "#!/bin/sh\necho \"Can't locate Image/ExifTool.pm\" >&2\nexit 2\n";

/// Install the working fake in `dir`, returning its path
pub fn install_fake_exiftool(dir: &Path) -> PathBuf {
    install_script(dir, "exiftool", FAKE_EXIFTOOL)
}

/// Install a fake whose `-ver` already fails (broken installation)
pub fn install_failing_exiftool(dir: &Path) -> PathBuf {
    install_script(dir, "exiftool-broken", FAILING_EXIFTOOL)
}

/// Install a fake that passes the version check and is gone right after it
pub fn install_vanishing_exiftool(dir: &Path) -> PathBuf {
    let path = install_script(dir, "exiftool-vanishing", VANISHING_EXIFTOOL);
    fs::write(format!("{}.armed", path.display()), "").unwrap();
    path
}

fn install_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, body).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    wait_until_executable(&path);
    path
}

/// Another test thread may fork while the script is still open for writing,
/// which makes exec fail with "text file busy" for a moment
fn wait_until_executable(path: &Path) {
    for _ in 0..20 {
        match std::process::Command::new(path).arg("-ver").output() {
            Ok(_) => return,
            Err(_) => std::thread::sleep(Duration::from_millis(50)),
        }
    }
    panic!("fake exiftool at {} never became executable", path.display());
}
