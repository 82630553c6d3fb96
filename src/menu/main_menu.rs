use crate::config::Config;
use crate::menu::handlers::{run_publish, run_transcode, show_catalog};
use anyhow::Result;
use console::{Term, style};
use dialoguer::Select;
use dialoguer::theme::ColorfulTheme;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

pub fn show_main_menu(
    term: &Term,
    shutdown_signal: &Arc<AtomicBool>,
    config: &mut Config,
) -> Result<bool> {
    term.clear_screen()?;

    println!("{}", style("=== 自適應串流轉碼 ===").cyan().bold());
    println!("{}", style("按 ESC 離開").dim());

    let options = vec!["轉碼影片", "上傳轉碼結果", "檢視解析度階梯表", "離開"];

    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("請選擇功能")
        .items(&options)
        .default(0)
        .interact_on_opt(term)?;

    match selection {
        Some(0) => {
            run_transcode(term, shutdown_signal, config)?;
            Ok(true)
        }
        Some(1) => {
            run_publish(term, shutdown_signal, config)?;
            Ok(true)
        }
        Some(2) => {
            show_catalog(term, config)?;
            Ok(true)
        }
        Some(3) | None => Ok(false),
        _ => unreachable!(),
    }
}
