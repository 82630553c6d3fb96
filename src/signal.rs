use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// 設定 Ctrl-C 處理器
///
/// 執行中的外部程序不會被中斷；呼叫端在流程結束後檢查此旗標，
/// 若已中斷則捨棄結果。
pub fn setup_shutdown_signal() -> anyhow::Result<Arc<AtomicBool>> {
    let shutdown_signal = Arc::new(AtomicBool::new(false));
    let signal_clone = Arc::clone(&shutdown_signal);

    ctrlc::set_handler(move || {
        signal_clone.store(true, Ordering::SeqCst);
        eprintln!("\n收到中斷信號，目前的轉碼結果將被捨棄...");
    })?;

    Ok(shutdown_signal)
}
