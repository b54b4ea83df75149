use rust_embed::RustEmbed;

/// Tool payloads compiled into the executable.
///
/// Payloads are keyed by platform-qualified filename, so a Windows build
/// embeds `yt-dlp.exe` / `ffmpeg.exe` while everything else embeds the bare
/// names. A build without the payloads still compiles; provisioning then
/// fails at startup with a missing-asset error.
#[derive(RustEmbed)]
#[folder = "assets/"]
#[include = "yt-dlp*"]
#[include = "ffmpeg*"]
pub struct ToolAssets;
