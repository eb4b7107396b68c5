//! The per-request song pipeline: parse → search → download → materialize →
//! reply.
//!
//! One request is one sequential chain; every non-happy edge terminates it
//! with a user-visible message and leaves the bot ready for the next one.
//! Errors never cross request boundaries.

use crate::command::{self, SongRequest};
use crate::config::{self, Config};
use crate::download::{fetch, files, FileLocks, TempGuard};
use crate::error::{AppError, AppResult};
use crate::host::{InboundMessage, ReplySink};
use crate::ncm;
use crate::platform::Platform;
use crate::search::{SearchClient, SearchOutcome};
use std::path::Path;

/// Shared per-process state every request handler borrows.
pub struct PlayerDeps {
    pub config: Config,
    pub search: SearchClient,
    /// Client used for fetching the audio stream itself.
    pub audio_client: reqwest::Client,
    pub locks: FileLocks,
}

impl PlayerDeps {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            search: SearchClient::new(),
            audio_client: audio_client(),
            locks: FileLocks::new(),
        }
    }
}

/// HTTP client for audio downloads, built once.
pub fn audio_client() -> reqwest::Client {
    reqwest::Client::builder()
        .user_agent(config::search::USER_AGENT)
        .timeout(config::download::timeout())
        .connect_timeout(config::download::connect_timeout())
        .build()
        .expect("HTTP client build failed: user_agent + timeout config should always succeed")
}

/// Terminal state of one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayOutcome {
    /// Voice reply sent; `cached` is true when no download happened.
    Played { cached: bool },
    /// Search returned an empty result list.
    NotFound,
    /// First result carried no stream URL.
    NoPlayableSource,
    /// Search endpoint failed (status or transport).
    SearchFailed,
    /// Audio fetch or materialization failed.
    DownloadFailed,
    /// The final voice reply could not be delivered.
    ReplyFailed,
}

/// Entry point for raw chat text.
///
/// Returns `None` when the message is not a song request (no trigger, or
/// empty title) — no reply, no network call.
pub async fn handle_message(
    deps: &PlayerDeps,
    msg: &InboundMessage,
    sink: &dyn ReplySink,
) -> AppResult<Option<PlayOutcome>> {
    let Some(request) = command::parse_request(&msg.text, deps.config.default_platform) else {
        return Ok(None);
    };
    log::debug!("Song request from chat {}: {:?}", msg.chat_id, request);
    let outcome = handle_request(deps, &request, sink).await?;
    Ok(Some(outcome))
}

/// Acknowledge a parsed request, then run it.
///
/// The acknowledgment names the parsed title and resolved platform and goes
/// out before any network call.
pub async fn handle_request(deps: &PlayerDeps, request: &SongRequest, sink: &dyn ReplySink) -> AppResult<PlayOutcome> {
    sink.text(&format!(
        "正在搜索歌曲《{}》({})",
        request.title,
        request.platform.display_name()
    ))
    .await?;
    search_and_play(deps, &request.title, request.platform, sink).await
}

/// Search the aggregator and play the top match.
///
/// This is also the automation entry point: agent-initiated invocations call
/// straight in with (title, platform), bypassing trigger parsing.
pub async fn search_and_play(
    deps: &PlayerDeps,
    title: &str,
    platform: Platform,
    sink: &dyn ReplySink,
) -> AppResult<PlayOutcome> {
    let result = match deps.search.search(title, platform, &deps.config.results_file()).await {
        Ok(SearchOutcome::Found(result)) => result,
        Ok(SearchOutcome::NotFound) => {
            sink.text("没有找到符合要求的歌曲。").await?;
            return Ok(PlayOutcome::NotFound);
        }
        Err(e) => {
            log::error!("Search failed for 《{}》: {}", title, e);
            sink.text(&format!("搜索歌曲时出错：{e}")).await?;
            return Ok(PlayOutcome::SearchFailed);
        }
    };

    let Some(stream_url) = result.stream_url().map(str::to_owned) else {
        sink.text(&format!("无法获取《{}》的下载链接，请尝试其他歌曲。", result.title))
            .await?;
        return Ok(PlayOutcome::NoPlayableSource);
    };

    sink.text(&format!("找到歌曲：《{}》 - {}，正在准备播放...", result.title, result.author))
        .await?;

    let stem = files::track_stem(&result.title, &result.author);
    let target = files::target_path(&deps.config.songs_dir(), &stem);

    // Serializes concurrent requests for the same track: the cache check and
    // the download below must not interleave with another request's.
    let lock = deps.locks.for_stem(&stem);
    let _guard = lock.lock().await;

    let cached = target.exists();
    if cached {
        // Served as-is, even if this request named a different platform.
        sink.text(&format!("《{}》已在本地，直接播放...", result.title)).await?;
    } else {
        sink.text(&format!("下载歌曲《{}》中...", result.title)).await?;
        match download_track(deps, &stream_url, &stem, &target, sink).await {
            Ok(()) => {}
            Err(AppError::DownloadStatus(status)) => {
                sink.text(&format!("下载失败，错误码：{}", status.as_u16())).await?;
                return Ok(PlayOutcome::DownloadFailed);
            }
            Err(e) => {
                log::error!("Download failed for 《{}》: {}", result.title, e);
                sink.text(&format!("下载歌曲时出错：{e}")).await?;
                return Ok(PlayOutcome::DownloadFailed);
            }
        }
    }

    match sink
        .voice(&format!("🎵 正在播放：《{}》 - {}", result.title, result.author), &target)
        .await
    {
        Ok(()) => Ok(PlayOutcome::Played { cached }),
        Err(e) => {
            log::error!("Voice reply failed for 《{}》: {}", result.title, e);
            sink.text(&format!("播放歌曲时出错：{e}")).await?;
            Ok(PlayOutcome::ReplyFailed)
        }
    }
}

/// Fetch the stream into a temp artifact and materialize the cache file.
///
/// The temp artifact is removed when the guard drops, on every path out of
/// here — including the error ones.
async fn download_track(
    deps: &PlayerDeps,
    stream_url: &str,
    stem: &str,
    target: &Path,
    sink: &dyn ReplySink,
) -> AppResult<()> {
    let guard = TempGuard::new(files::temp_path(&deps.config.temp_dir(), stem));
    fetch::fetch_to_temp(&deps.audio_client, stream_url, guard.path()).await?;

    let decrypt = deps.config.enable_conversion && ncm::is_ncm(stream_url, guard.path());
    if decrypt {
        sink.text("检测到NCM格式，正在转换...").await?;
    }
    if ncm::materialize(guard.path(), target, decrypt)? == ncm::Materialized::FallbackCopy {
        sink.text("格式转换失败，可能是不支持的格式或文件已损坏。").await?;
    }
    Ok(())
}
