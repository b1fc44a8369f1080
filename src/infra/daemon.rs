use std::{
    fs::{File, OpenOptions},
    io::{Seek, SeekFrom, Write},
    os::unix::fs::OpenOptionsExt,
    path::{Path, PathBuf},
    process,
};

use daemonize_me::Daemon;
use fs2::FileExt;

use crate::infra::error::AppError;

const PID_FILE_MODE: u32 = 0o644;
const LOG_FILE_MODE: u32 = 0o640;
const UMASK: u16 = 0o027;

/// Parameters governing process detachment.
#[derive(Debug, Clone)]
pub struct DaemonContext {
    pub pid_file: PathBuf,
    pub log_file: PathBuf,
    pub work_dir: PathBuf,
    pub umask: u16,
}

impl DaemonContext {
    pub fn new(pid_file: PathBuf, log_file: PathBuf) -> Self {
        Self {
            pid_file,
            log_file,
            work_dir: PathBuf::from("./"),
            umask: UMASK,
        }
    }
}

/// Exclusive lock on the PID file, held for the daemon's lifetime. A live
/// process on the same path makes acquisition fail, so a stale file left
/// by a crashed run does not block a restart.
pub struct PidLock {
    file: File,
    path: PathBuf,
}

impl PidLock {
    pub fn acquire(path: &Path) -> Result<Self, AppError> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .mode(PID_FILE_MODE)
            .open(path)
            .map_err(|source| AppError::PidFileOpen {
                path: path.to_path_buf(),
                source,
            })?;

        file.try_lock_exclusive()
            .map_err(|_| AppError::PidFileLocked {
                path: path.to_path_buf(),
            })?;

        Ok(Self {
            file,
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_pid(&mut self, pid: u32) -> Result<(), AppError> {
        fn write_to(file: &mut File, pid: u32) -> std::io::Result<()> {
            file.set_len(0)?;
            file.seek(SeekFrom::Start(0))?;
            writeln!(file, "{pid}")?;
            file.flush()
        }

        write_to(&mut self.file, pid).map_err(|source| AppError::PidFileWrite {
            path: self.path.clone(),
            source,
        })
    }
}

impl Drop for PidLock {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.file);
    }
}

/// Detaches from the controlling terminal. On success the caller is
/// running in the daemonized child: stdout/stderr point at the context's
/// log file and the PID file is locked and holds the child's PID. A
/// second process on the same PID file fails before forking.
pub fn detach(context: &DaemonContext) -> Result<PidLock, AppError> {
    // The flock rides on the open descriptor and survives the fork below.
    let mut lock = PidLock::acquire(&context.pid_file)?;

    let stdout = open_daemon_log(&context.log_file)?;
    let stderr = stdout
        .try_clone()
        .map_err(|source| AppError::DaemonLogOpen {
            path: context.log_file.clone(),
            source,
        })?;

    Daemon::new()
        .work_dir(&context.work_dir)
        .umask(context.umask)
        .stdout(stdout)
        .stderr(stderr)
        .start()
        .map_err(AppError::DaemonDetach)?;

    lock.write_pid(process::id())?;
    Ok(lock)
}

fn open_daemon_log(path: &Path) -> Result<File, AppError> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .mode(LOG_FILE_MODE)
        .open(path)
        .map_err(|source| AppError::DaemonLogOpen {
            path: path.to_path_buf(),
            source,
        })
}
