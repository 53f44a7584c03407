//! Embed rpaths to the interpreter's LIBDIR so test binaries that attach to
//! the embedded runtime can find libpython without LD_LIBRARY_PATH.

fn main() {
    println!("cargo:rerun-if-env-changed=PYO3_PYTHON");

    let Ok(target) = std::env::var("TARGET") else {
        return;
    };

    if target.contains("apple-darwin") || target.contains("linux") {
        if let Some(libdir) = find_python_libdir() {
            println!("cargo:rustc-link-arg=-Wl,-rpath,{libdir}");
        }
    }
}

/// Ask the build interpreter where libpython lives.
fn find_python_libdir() -> Option<String> {
    let python = std::env::var("PYO3_PYTHON").unwrap_or_else(|_| "python3".to_string());
    let output = std::process::Command::new(&python)
        .args([
            "-c",
            "import sysconfig; print(sysconfig.get_config_var('LIBDIR') or '')",
        ])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let libdir = String::from_utf8(output.stdout).ok()?;
    let libdir = libdir.trim();
    if libdir.is_empty() {
        return None;
    }
    Some(libdir.to_string())
}
