use crate::error::ToolError;
use log::{debug, warn};
use std::ffi::OsString;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// 預設逾時：5 分鐘
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

/// 輪詢子程序狀態的間隔
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// 外部工具的輸出
#[derive(Debug, Clone)]
pub struct ToolOutput {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

/// 外部工具呼叫（附逾時）
///
/// 逾時的程序會被終止，並以 [`ToolError::Timeout`] 回報，
/// 呼叫端應將其視同非零結束碼處理。
#[derive(Debug, Clone)]
pub struct ToolCommand {
    program: PathBuf,
    args: Vec<OsString>,
    timeout: Duration,
}

impl ToolCommand {
    #[must_use]
    pub fn new(program: &Path) -> Self {
        Self {
            program: program.to_path_buf(),
            args: Vec::new(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn arg(&mut self, arg: impl Into<OsString>) -> &mut Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(&mut self, args: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub const fn timeout(&mut self, timeout: Duration) -> &mut Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn get_args(&self) -> &[OsString] {
        &self.args
    }

    fn program_name(&self) -> String {
        self.program
            .file_name()
            .map_or_else(
                || self.program.to_string_lossy(),
                |name| name.to_string_lossy(),
            )
            .to_string()
    }

    /// 執行並等待結束，非零結束碼視為失敗
    pub fn execute(&self) -> Result<ToolOutput, ToolError> {
        let program = self.program_name();
        debug!(
            "執行 {} {}",
            program,
            self.args
                .iter()
                .map(|a| a.to_string_lossy())
                .collect::<Vec<_>>()
                .join(" ")
        );

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| ToolError::Spawn {
                program: program.clone(),
                source,
            })?;

        // 必須持續讀取管線，否則輸出量大時子程序會卡在寫入
        let stdout_reader = spawn_pipe_reader(child.stdout.take());
        let stderr_reader = spawn_pipe_reader(child.stderr.take());

        let status = match wait_with_deadline(&mut child, self.timeout) {
            Some(status) => status,
            None => {
                warn!("{program} 超過 {:?} 未結束，終止程序", self.timeout);
                let _ = child.kill();
                let _ = child.wait();
                // 孫程序可能仍持有管線，不等待讀取執行緒
                drop(stdout_reader);
                drop(stderr_reader);
                return Err(ToolError::Timeout {
                    program,
                    timeout: self.timeout,
                });
            }
        };

        let stdout = join_reader(stdout_reader);
        let stderr = join_reader(stderr_reader);

        if !status.success() {
            return Err(ToolError::Failed {
                program,
                status,
                stderr: stderr.trim().to_string(),
            });
        }

        Ok(ToolOutput {
            status,
            stdout,
            stderr,
        })
    }
}

fn wait_with_deadline(child: &mut Child, timeout: Duration) -> Option<ExitStatus> {
    let deadline = Instant::now() + timeout;
    loop {
        match child.try_wait() {
            Ok(Some(status)) => return Some(status),
            Ok(None) => {}
            Err(e) => {
                warn!("無法檢查程序狀態 [{}]: {e}", child.id());
                return None;
            }
        }

        if Instant::now() >= deadline {
            return None;
        }
        thread::sleep(POLL_INTERVAL);
    }
}

fn spawn_pipe_reader<R>(pipe: Option<R>) -> Option<JoinHandle<String>>
where
    R: Read + Send + 'static,
{
    pipe.map(|mut pipe| {
        thread::spawn(move || {
            let mut buffer = Vec::new();
            let _ = pipe.read_to_end(&mut buffer);
            String::from_utf8_lossy(&buffer).to_string()
        })
    })
}

fn join_reader(handle: Option<JoinHandle<String>>) -> String {
    handle
        .and_then(|h| h.join().ok())
        .unwrap_or_default()
}
