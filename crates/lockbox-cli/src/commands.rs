//! Seal and open command flows.
//!
//! Thin glue between the file system, the password prompt, and the
//! protocol core. Naming policy: sealing `foo.txt` produces `foo.lb`;
//! opening recovers `foo_decrypted.txt` beside the container.

use std::{
    fs, io,
    path::{Path, PathBuf},
    time::Duration,
};

use lockbox_core::{FilePayload, LockboxError, SntpClock, TrustedClock, open, seal};
use zeroize::Zeroizing;

use crate::expiry;

/// User-facing command failures, one distinct message per kind.
#[derive(thiserror::Error, Debug)]
pub enum CliError {
    /// Protocol outcome, displayed verbatim
    #[error("{0}")]
    Lockbox(#[from] LockboxError),

    /// Unparseable expiry argument
    #[error("invalid expiry: {0}")]
    Expiry(String),

    /// Seal-time confirmation mismatch
    #[error("passwords do not match")]
    PasswordMismatch,

    /// Terminal interaction failed
    #[error("cannot read password: {0}")]
    Prompt(io::Error),

    /// Input file unreadable
    #[error("cannot read {}: {source}", .path.display())]
    ReadInput {
        /// Path that failed
        path: PathBuf,
        /// Underlying failure
        source: io::Error,
    },

    /// Output file unwritable
    #[error("cannot write {}: {source}", .path.display())]
    WriteOutput {
        /// Path that failed
        path: PathBuf,
        /// Underlying failure
        source: io::Error,
    },
}

/// Seal `file` until `expiry_text`, prompting for a password.
pub fn run_seal(
    file: &Path,
    expiry_text: &str,
    output: Option<PathBuf>,
) -> Result<String, CliError> {
    let expiry = expiry::parse(expiry_text).map_err(CliError::Expiry)?;
    let password = prompt_new_password()?;
    seal_file(file, expiry, output, &password)
}

/// Open `file`, prompting for a password and querying `ntp_server`.
pub fn run_open(
    file: &Path,
    output: Option<PathBuf>,
    ntp_server: &str,
    timeout_secs: u64,
) -> Result<String, CliError> {
    let password =
        Zeroizing::new(rpassword::prompt_password("Password: ").map_err(CliError::Prompt)?);

    let clock = SntpClock::new(ntp_server).with_timeout(Duration::from_secs(timeout_secs));
    open_file(file, output, &password, &clock)
}

/// Prompt-free seal flow (also the testable path).
fn seal_file(
    file: &Path,
    expiry: chrono::DateTime<chrono::Utc>,
    output: Option<PathBuf>,
    password: &str,
) -> Result<String, CliError> {
    let contents = fs::read(file)
        .map_err(|source| CliError::ReadInput { path: file.to_path_buf(), source })?;
    let payload = payload_from_path(file, contents);

    let sealed = seal(&payload, expiry, password)?;

    let output = output.unwrap_or_else(|| file.with_extension("lb"));
    write_atomic(&output, &sealed)?;
    tracing::info!(container = %output.display(), %expiry, "container written");

    Ok(format!("sealed {} until {expiry} -> {}", file.display(), output.display()))
}

/// Prompt-free open flow (also the testable path).
fn open_file(
    file: &Path,
    output: Option<PathBuf>,
    password: &str,
    clock: &impl TrustedClock,
) -> Result<String, CliError> {
    let path = container_path(file);
    let bytes =
        fs::read(&path).map_err(|source| CliError::ReadInput { path: path.clone(), source })?;

    let payload = open(&bytes, password, clock)?;

    let output = output.unwrap_or_else(|| recovered_output_path(&path, &payload));
    write_atomic(&output, &payload.contents)?;
    tracing::info!(file = %output.display(), "recovered file written");

    Ok(format!("recovered {} -> {}", recovered_file_name(&payload), output.display()))
}

/// Build the cleartext payload from the input path and contents.
fn payload_from_path(path: &Path, contents: Vec<u8>) -> FilePayload {
    let name = path.file_stem().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default();
    let extension = path.extension().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default();
    FilePayload::new(name, extension, contents)
}

/// Append ".lb" unless the argument already names a container.
fn container_path(file: &Path) -> PathBuf {
    match file.extension() {
        Some(ext) if ext.eq_ignore_ascii_case("lb") => file.to_path_buf(),
        _ => {
            let mut name = file.as_os_str().to_owned();
            name.push(".lb");
            PathBuf::from(name)
        },
    }
}

/// `<name>_decrypted.<ext>` beside the container. Recovered names that
/// would escape the directory fall back to a fixed stem.
fn recovered_output_path(container: &Path, payload: &FilePayload) -> PathBuf {
    let stem = if is_safe_component(&payload.name) { payload.name.as_str() } else { "recovered" };

    let file_name = if payload.extension.is_empty() || !is_safe_component(&payload.extension) {
        format!("{stem}_decrypted")
    } else {
        format!("{stem}_decrypted.{}", payload.extension)
    };

    match container.parent() {
        Some(parent) => parent.join(file_name),
        None => PathBuf::from(file_name),
    }
}

/// The payload name travels inside an attacker-suppliable container;
/// never let it smuggle path separators or dot-dot into the output path.
fn is_safe_component(text: &str) -> bool {
    !text.is_empty() && !text.contains(['/', '\\', '\0']) && text != ".." && text != "."
}

fn recovered_file_name(payload: &FilePayload) -> String {
    if payload.extension.is_empty() {
        payload.name.clone()
    } else {
        format!("{}.{}", payload.name, payload.extension)
    }
}

fn prompt_new_password() -> Result<Zeroizing<String>, CliError> {
    let first =
        Zeroizing::new(rpassword::prompt_password("Password: ").map_err(CliError::Prompt)?);
    let second =
        Zeroizing::new(rpassword::prompt_password("Confirm password: ").map_err(CliError::Prompt)?);

    if *first != *second {
        return Err(CliError::PasswordMismatch);
    }
    if first.is_empty() {
        eprintln!("warning: empty password; the container is only as strong as the password");
    }

    Ok(first)
}

/// Write through a temporary sibling so a failed write never leaves a
/// plausible-looking artifact at the destination.
fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), CliError> {
    let mut tmp_name = path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp = PathBuf::from(tmp_name);

    fs::write(&tmp, bytes)
        .map_err(|source| CliError::WriteOutput { path: path.to_path_buf(), source })?;

    if let Err(source) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(CliError::WriteOutput { path: path.to_path_buf(), source });
    }

    Ok(())
}
