use crate::config::RenditionPreset;
use crate::tools::{ToolCommand, Toolchain};
use std::path::{Path, PathBuf};

/// 單一解析度的 ffmpeg 轉碼命令
///
/// 位元率同時作為目標值與上限（`-b:v` 與 `-maxrate` 相同），
/// 緩衝區為位元率的兩倍。
pub struct RenditionCommand {
    source_path: PathBuf,
    destination_path: PathBuf,
    preset: RenditionPreset,
}

impl RenditionCommand {
    #[must_use]
    pub fn new(source_path: &Path, output_dir: &Path, preset: &RenditionPreset) -> Self {
        Self {
            source_path: source_path.to_path_buf(),
            destination_path: output_dir.join(format!("{}.mp4", preset.label)),
            preset: preset.clone(),
        }
    }

    #[must_use]
    pub fn destination_path(&self) -> &Path {
        &self.destination_path
    }

    #[must_use]
    pub fn build_command(&self, toolchain: &Toolchain) -> ToolCommand {
        let preset = &self.preset;
        let video_bitrate = format!("{}k", preset.video_bitrate_kbps);

        let mut cmd = toolchain.ffmpeg(toolchain.timeouts.encode);
        cmd.arg("-i")
            .arg(&self.source_path)
            .args([
                "-vf".to_string(),
                format!("scale={}:{}", preset.width, preset.height),
                "-c:v".to_string(),
                "libx264".to_string(),
                "-preset".to_string(),
                "medium".to_string(),
                "-b:v".to_string(),
                video_bitrate.clone(),
                "-maxrate".to_string(),
                video_bitrate,
                "-bufsize".to_string(),
                format!("{}k", u64::from(preset.video_bitrate_kbps) * 2),
                "-c:a".to_string(),
                "aac".to_string(),
                "-b:a".to_string(),
                format!("{}k", preset.audio_bitrate_kbps),
                "-movflags".to_string(),
                "+faststart".to_string(),
                "-y".to_string(),
            ])
            .arg(&self.destination_path);
        cmd
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args_of(cmd: &ToolCommand) -> Vec<String> {
        cmd.get_args()
            .iter()
            .map(|a| a.to_string_lossy().to_string())
            .collect()
    }

    fn value_after(args: &[String], flag: &str) -> String {
        let index = args.iter().position(|a| a == flag).unwrap();
        args[index + 1].clone()
    }

    #[test]
    fn test_encoder_parameters_derive_from_preset() {
        let preset = RenditionPreset {
            label: "720p".to_string(),
            width: 1280,
            height: 720,
            video_bitrate_kbps: 2500,
            audio_bitrate_kbps: 128,
        };
        let command = RenditionCommand::new(Path::new("/in/source.mov"), Path::new("/out/v1"), &preset);
        let args = args_of(&command.build_command(&Toolchain::default()));

        assert_eq!(value_after(&args, "-i"), "/in/source.mov");
        assert_eq!(value_after(&args, "-vf"), "scale=1280:720");
        assert_eq!(value_after(&args, "-c:v"), "libx264");
        assert_eq!(value_after(&args, "-b:v"), "2500k");
        assert_eq!(value_after(&args, "-maxrate"), "2500k");
        assert_eq!(value_after(&args, "-bufsize"), "5000k");
        assert_eq!(value_after(&args, "-c:a"), "aac");
        assert_eq!(value_after(&args, "-b:a"), "128k");
        assert_eq!(value_after(&args, "-movflags"), "+faststart");
        assert_eq!(args.last().unwrap(), "/out/v1/720p.mp4");
        assert_eq!(command.destination_path(), Path::new("/out/v1/720p.mp4"));
    }
}
