use crate::component::{
    ArtifactPublisher, LocalObjectStore, PipelineOptions, TranscodeOrchestrator, TranscodeRun,
    validate_video_id,
};
use crate::config::Config;
use crate::config::save::{add_recent_source, save_settings};
use crate::pause;
use anyhow::{Result, bail};
use console::{Term, style};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, MultiSelect};
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use uuid::Uuid;

/// 來源路徑：存在則直接使用，否則視為 `input_dir` 下的檔名
#[must_use]
pub fn resolve_source_path(input_dir: &Path, raw: &str) -> PathBuf {
    let candidate = PathBuf::from(raw);
    if candidate.is_absolute() || candidate.exists() {
        candidate
    } else {
        input_dir.join(candidate)
    }
}

/// 已轉碼影片的輸出目錄，影片 ID 不合法或目錄不存在時回傳錯誤
pub fn existing_run_directory(output_root: &Path, video_id: &str) -> Result<PathBuf> {
    validate_video_id(video_id)?;

    let local_dir = output_root.join(video_id);
    if !local_dir.is_dir() {
        bail!("找不到轉碼輸出目錄: {}", local_dir.display());
    }
    Ok(local_dir)
}

pub fn run_transcode(term: &Term, shutdown_signal: &Arc<AtomicBool>, config: &mut Config) -> Result<()> {
    if let Err(e) = transcode_interactive(shutdown_signal, config) {
        eprintln!("{} {:#}", style("錯誤:").red().bold(), e);
    }

    pause(term)?;
    Ok(())
}

fn transcode_interactive(shutdown_signal: &Arc<AtomicBool>, config: &mut Config) -> Result<()> {
    println!("{}", style("=== 影片轉碼 ===").cyan().bold());

    let source_input = prompt_source(config)?;
    let source_path = resolve_source_path(&config.settings.input_dir, &source_input);

    let video_id: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("影片 ID")
        .default(Uuid::new_v4().to_string())
        .interact_text()?;

    let labels = prompt_labels(config)?;
    if labels.is_empty() {
        println!("{}", style("未選擇任何解析度").yellow());
        return Ok(());
    }

    let orchestrator = TranscodeOrchestrator::new(
        config.catalog.clone(),
        PipelineOptions::from_settings(&config.settings),
    )?;

    let progress_bar = ProgressBar::new_spinner();
    progress_bar.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .expect("Invalid progress bar template"),
    );
    progress_bar.enable_steady_tick(Duration::from_millis(120));

    let result = orchestrator.run_with_observer(&source_path, video_id.trim(), &labels, &|stage| {
        progress_bar.set_message(stage.to_string());
    });
    progress_bar.finish_and_clear();

    let run = result?;

    if shutdown_signal.load(Ordering::SeqCst) {
        warn!("轉碼期間收到中斷信號，捨棄結果: {}", run.output_dir.display());
        println!(
            "{}",
            style("已中斷，輸出目錄可能包含不完整的檔案，請自行清理").yellow()
        );
        return Ok(());
    }

    print_summary(&run, labels.len());

    add_recent_source(&mut config.settings, &source_input);
    if let Err(e) = save_settings(&config.settings) {
        warn!("無法儲存設定: {e:#}");
    }

    let show_json = Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt("顯示完整結果（JSON）？")
        .default(false)
        .interact()?;
    if show_json {
        println!("{}", serde_json::to_string_pretty(&run)?);
    }

    Ok(())
}

fn prompt_source(config: &Config) -> Result<String> {
    let theme = ColorfulTheme::default();
    let mut input = Input::<String>::with_theme(&theme).with_prompt("請輸入來源影片路徑");
    if let Some(recent) = config.settings.recent_sources.first() {
        input = input.default(recent.clone());
    }
    let path = input.interact_text()?;
    Ok(path.trim().to_string())
}

fn prompt_labels(config: &Config) -> Result<Vec<String>> {
    let defaults = &config.settings.default_labels;
    let items: Vec<String> = config
        .catalog
        .iter()
        .map(|p| {
            format!(
                "{:<6} {}x{}  {} kbps",
                p.label, p.width, p.height, p.video_bitrate_kbps
            )
        })
        .collect();
    let checked: Vec<bool> = config
        .catalog
        .iter()
        .map(|p| defaults.is_empty() || defaults.contains(&p.label))
        .collect();

    let selection = MultiSelect::with_theme(&ColorfulTheme::default())
        .with_prompt("選擇要輸出的解析度（空白鍵切換）")
        .items(&items)
        .defaults(&checked)
        .interact()?;

    let labels = config.catalog.labels();
    Ok(selection.into_iter().map(|i| labels[i].to_string()).collect())
}

fn print_summary(run: &TranscodeRun, requested: usize) {
    println!();
    println!("{}", style("=== 轉碼摘要 ===").cyan().bold());
    println!("  影片 ID: {}", run.video_id);
    println!("  長度: {:.2}s", run.metadata.duration_seconds);
    println!(
        "  解析度: {}/{} {:?}",
        style(run.renditions.len()).green(),
        requested,
        run.renditions.keys().collect::<Vec<_>>()
    );
    match &run.manifest {
        Some(manifest) => println!("  HLS: {}", manifest.master_path.display()),
        None => println!("  HLS: {}", style("未產生").red()),
    }
    println!("  縮圖: {}/{}", run.thumbnails.len(), run.expected_thumbnails);
    match &run.preview {
        Some(preview) => println!("  預覽: {}", preview.display()),
        None => println!("  預覽: {}", style("未產生").red()),
    }

    if !run.is_complete(requested) {
        println!();
        println!("{}", style("部分階段失敗，詳見日誌").yellow());
    }

    info!(
        "轉碼完成 - 影片 {}: {} 個解析度, {} 張縮圖",
        run.video_id,
        run.renditions.len(),
        run.thumbnails.len()
    );
}

pub fn run_publish(term: &Term, shutdown_signal: &Arc<AtomicBool>, config: &Config) -> Result<()> {
    if let Err(e) = publish_interactive(shutdown_signal, config) {
        eprintln!("{} {:#}", style("錯誤:").red().bold(), e);
    }

    pause(term)?;
    Ok(())
}

fn publish_interactive(shutdown_signal: &Arc<AtomicBool>, config: &Config) -> Result<()> {
    println!("{}", style("=== 上傳轉碼結果 ===").cyan().bold());

    let video_id: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("影片 ID")
        .interact_text()?;
    let video_id = video_id.trim();
    let local_dir = existing_run_directory(&config.settings.output_root, video_id)?;

    let publish = &config.settings.publish;
    let store = LocalObjectStore::new(&publish.bucket_dir, &publish.base_url);
    let uploaded = ArtifactPublisher::new(&store).publish(video_id, &local_dir);

    if shutdown_signal.load(Ordering::SeqCst) {
        println!("{}", style("已中斷，上傳可能不完整").yellow());
    }

    println!(
        "{}",
        style(format!("已上傳 {} 個檔案", uploaded.len())).green()
    );
    if let Some(url) = uploaded.get("hls/master.m3u8") {
        println!("  主播放清單: {url}");
    }

    Ok(())
}

pub fn show_catalog(term: &Term, config: &Config) -> Result<()> {
    println!("{}", style("=== 解析度階梯表 ===").cyan().bold());
    for preset in config.catalog.iter() {
        println!(
            "  {:<6} {:>4}x{:<4}  video {:>5} kbps  audio {:>3} kbps",
            preset.label,
            preset.width,
            preset.height,
            preset.video_bitrate_kbps,
            preset.audio_bitrate_kbps
        );
    }

    pause(term)?;
    Ok(())
}
