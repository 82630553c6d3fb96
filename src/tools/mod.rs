mod ffprobe_info;
mod file_scanner;
mod path_validator;
mod tool_command;
mod toolchain;

pub use ffprobe_info::{
    AudioStreamInfo, SourceMetadata, VideoStreamInfo, parse_frame_rate, probe_source,
};
pub use file_scanner::{FileInfo, scan_all_files};
pub use path_validator::{ensure_directory_exists, reset_directory, validate_source_file};
pub use tool_command::{DEFAULT_TIMEOUT, ToolCommand, ToolOutput};
pub use toolchain::{StageTimeouts, Toolchain};
