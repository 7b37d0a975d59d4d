use crate::cfg::HumanDur;
use crate::log::counters::Counters;
use crate::log::error::{LogError, Result};
use crate::log::formatter::format_batch;
use crate::log::log_entry::LogEntry;
use crate::log::logger::Logger;
use crate::log::severity::Severity;
use crossbeam::channel::{self, Receiver, Sender};
use crossbeam::queue::SegQueue;
use serde::Deserialize;
use serde_with::serde_as;
use smart_default::SmartDefault;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use std::thread::{self, JoinHandle, ThreadId};
use std::time::Duration;

/// 写入失败回调：参数为底层 I/O 错误和这一批丢失条目的正文
pub type ErrorHandler = Box<dyn Fn(&io::Error, &[String]) + Send + Sync>;

/// FileLogger 配置
#[serde_as]
#[derive(Debug, Clone, Deserialize, SmartDefault)]
#[serde(default)]
pub struct FileLoggerConfig {
    /// 日志文件路径，不能为空白
    pub file_path: String,

    /// 后台刷新间隔，如 "50ms"、"1s"
    #[default(Duration::from_secs(1))]
    #[serde_as(as = "HumanDur")]
    pub flush_interval: Duration,
}

impl FileLoggerConfig {
    pub fn new(file_path: impl Into<String>, flush_interval: Duration) -> Self {
        Self {
            file_path: file_path.into(),
            flush_interval,
        }
    }
}

/// 后台线程的控制命令
enum Command {
    SetInterval(Duration),
    Shutdown,
}

/// 生产者和后台线程共享的状态
struct Shared {
    path: PathBuf,
    buffer: SegQueue<LogEntry>,
    counters: Counters,
    // 同一时刻只允许一次刷新；里面是复用的行缓冲
    flush_lock: Mutex<String>,
    on_error: Option<ErrorHandler>,
}

impl Shared {
    /// 一次刷新周期：取出当前全部条目、格式化、一次追加写入
    ///
    /// 只取开始时已在队列中的条目，期间新入队的留给下一周期。
    ///
    /// 错误回调在释放刷新锁之后调用，回调里可以再次 `flush` 或 `close`。
    fn flush(&self) {
        let failure = {
            let mut lines = self
                .flush_lock
                .lock()
                .unwrap_or_else(PoisonError::into_inner);

            let pending = self.buffer.len();
            if pending == 0 {
                return;
            }
            let mut batch = Vec::with_capacity(pending);
            for _ in 0..pending {
                match self.buffer.pop() {
                    Some(entry) => batch.push(entry),
                    None => break,
                }
            }

            lines.clear();
            format_batch(&mut lines, &batch);
            let result = append(&self.path, &lines);
            lines.clear();

            match result {
                Ok(()) => {
                    tracing::debug!(path = %self.path.display(), entries = batch.len(), "flushed log batch");
                    None
                }
                Err(err) => Some((err, batch)),
            }
        };

        if let Some((err, batch)) = failure {
            self.report_failure(&err, batch);
        }
    }

    /// 写入失败：条目视为丢失，不重新入队
    fn report_failure(&self, err: &io::Error, batch: Vec<LogEntry>) {
        let lost: Vec<String> = batch.into_iter().map(LogEntry::into_text).collect();

        let Some(handler) = &self.on_error else {
            tracing::error!(
                path = %self.path.display(),
                error = %err,
                lost = lost.len(),
                "failed to flush log batch"
            );
            return;
        };

        if panic::catch_unwind(AssertUnwindSafe(|| handler(err, &lost))).is_err() {
            tracing::error!(
                path = %self.path.display(),
                error = %err,
                lost = lost.len(),
                "log error handler panicked"
            );
        }
    }
}

/// 以追加方式一次写入整批文本
fn append(path: &Path, contents: &str) -> io::Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    file.write_all(contents.as_bytes())
}

fn run_worker(shared: Arc<Shared>, commands: Receiver<Command>, interval: Duration) {
    let mut ticker = channel::tick(interval);
    loop {
        let rearm = crossbeam::select! {
            recv(commands) -> command => match command {
                Ok(Command::SetInterval(next)) => Some(next),
                Ok(Command::Shutdown) | Err(_) => break,
            },
            recv(ticker) -> _ => {
                shared.flush();
                None
            }
        };
        if let Some(next) = rearm {
            tracing::debug!(path = %shared.path.display(), interval = ?next, "re-arming flush timer");
            ticker = channel::tick(next);
        }
    }
}

/// 带缓冲、定时刷新的文件输出
///
/// 生产者线程只做计数和无锁入队，不会碰到 I/O；后台线程按 `flush_interval`
/// 把队列整批追加到文件。写入失败时这一批条目交给错误回调后丢弃（至多一次投递），
/// sink 继续工作。
///
/// 生命周期：`Running -> Closed`。`close`（或 drop）先停止并回收后台线程，
/// 再做最后一次刷新，所以关闭前接受的条目都会落盘。关闭后的
/// `info` / `warn` / `error` 返回 [`LogError::Closed`]，既不计数也不入队。
///
/// # 示例
///
/// ```no_run
/// use sinklog::log::{FileLogger, FileLoggerConfig, Logger};
/// use std::time::Duration;
///
/// let logger = FileLogger::with_error_handler(
///     FileLoggerConfig::new("/tmp/app.log", Duration::from_millis(50)),
///     |err, lost| eprintln!("lost {} entries: {}", lost.len(), err),
/// )?;
/// logger.info("service started", None)?;
/// logger.close()?;
/// # Ok::<(), sinklog::log::LogError>(())
/// ```
pub struct FileLogger {
    shared: Arc<Shared>,
    flush_interval: Mutex<Duration>,
    command_tx: Sender<Command>,
    worker: Mutex<Option<JoinHandle<()>>>,
    worker_id: ThreadId,
    // 生产者持读锁完成"检查 closed + 入队"，close 持写锁翻转 closed
    gate: RwLock<()>,
    closed: AtomicBool,
}

impl FileLogger {
    /// 创建 FileLogger，写入失败只通过 tracing 报告
    pub fn new(config: FileLoggerConfig) -> Result<Self> {
        Self::build(config, None)
    }

    /// 创建 FileLogger，写入失败时调用 `on_error`
    pub fn with_error_handler<F>(config: FileLoggerConfig, on_error: F) -> Result<Self>
    where
        F: Fn(&io::Error, &[String]) + Send + Sync + 'static,
    {
        Self::build(config, Some(Box::new(on_error)))
    }

    fn build(config: FileLoggerConfig, on_error: Option<ErrorHandler>) -> Result<Self> {
        if config.file_path.trim().is_empty() {
            return Err(LogError::invalid_argument(
                "file_path cannot be empty or whitespace",
            ));
        }
        if config.flush_interval.is_zero() {
            return Err(LogError::invalid_argument("flush_interval must be positive"));
        }

        let path = PathBuf::from(&config.file_path);
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let shared = Arc::new(Shared {
            path,
            buffer: SegQueue::new(),
            counters: Counters::new(),
            flush_lock: Mutex::new(String::new()),
            on_error,
        });

        let (command_tx, command_rx) = channel::unbounded();
        let worker = {
            let shared = Arc::clone(&shared);
            let interval = config.flush_interval;
            thread::Builder::new()
                .name("sinklog-flush".to_string())
                .spawn(move || run_worker(shared, command_rx, interval))?
        };

        Ok(Self {
            shared,
            flush_interval: Mutex::new(config.flush_interval),
            command_tx,
            worker_id: worker.thread().id(),
            worker: Mutex::new(Some(worker)),
            gate: RwLock::new(()),
            closed: AtomicBool::new(false),
        })
    }

    /// 日志文件路径
    pub fn path(&self) -> &Path {
        &self.shared.path
    }

    /// 当前刷新间隔
    pub fn flush_interval(&self) -> Duration {
        *self
            .flush_interval
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// 运行时调整刷新间隔，后台定时器按新间隔重新计时
    pub fn set_flush_interval(&self, interval: Duration) -> Result<()> {
        if interval.is_zero() {
            return Err(LogError::invalid_argument("flush_interval must be positive"));
        }
        // 发送和记录在同一把锁下，保证记录的值就是后台线程最后收到的值
        let mut current = self
            .flush_interval
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if self.is_closed() {
            return Err(LogError::Closed);
        }
        self.command_tx
            .send(Command::SetInterval(interval))
            .map_err(|_| LogError::Closed)?;
        *current = interval;
        Ok(())
    }

    /// 队列中尚未刷新的条目数
    pub fn pending(&self) -> usize {
        self.shared.buffer.len()
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }
}

impl Logger for FileLogger {
    fn log(&self, severity: Severity, text: &str, name: Option<&str>) -> Result<()> {
        let _gate = self.gate.read().unwrap_or_else(PoisonError::into_inner);
        if self.is_closed() {
            return Err(LogError::Closed);
        }
        self.shared.counters.increment(severity);
        self.shared.buffer.push(LogEntry::new(severity, text, name));
        Ok(())
    }

    fn get_entries_count(&self, severity: Severity) -> u64 {
        self.shared.counters.get(severity)
    }

    fn flush(&self) -> Result<()> {
        self.shared.flush();
        Ok(())
    }

    fn close(&self) -> Result<()> {
        {
            // 写锁等待所有已通过检查的生产者完成入队，最后一次刷新一定能看到它们
            let _gate = self.gate.write().unwrap_or_else(PoisonError::into_inner);
            if self.closed.swap(true, Ordering::AcqRel) {
                return Ok(());
            }
        }

        // 先停掉定时器，保证最后一次刷新之后不会再有定时刷新
        let _ = self.command_tx.send(Command::Shutdown);
        let worker = self
            .worker
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(worker) = worker {
            // 错误回调在后台线程上调用 close 时不能 join 自己，线程收到 Shutdown 后自行退出
            if thread::current().id() == self.worker_id {
                drop(worker);
            } else if worker.join().is_err() {
                tracing::error!(path = %self.shared.path.display(), "log flush worker panicked");
            }
        }

        self.shared.flush();
        Ok(())
    }
}

impl Drop for FileLogger {
    fn drop(&mut self) {
        let _ = self.close();
    }
}

impl TryFrom<FileLoggerConfig> for FileLogger {
    type Error = LogError;

    fn try_from(config: FileLoggerConfig) -> Result<Self> {
        Self::new(config)
    }
}

crate::impl_box_from!(FileLogger => dyn Logger);
