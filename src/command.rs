//! Inbound command parsing.
//!
//! A song request is a message starting with one of the trigger prefixes,
//! followed by free text. If the first whitespace-delimited token of that
//! text names a platform, it overrides the configured default and is
//! stripped from the title.

use crate::platform::Platform;

/// Trigger prefixes that start a song request (full-width and ASCII colon).
pub const TRIGGERS: [&str; 2] = ["点歌：", "点歌:"];

/// A parsed song request. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SongRequest {
    pub title: String,
    pub platform: Platform,
}

/// Parse a raw chat message into a song request.
///
/// Returns `None` when no trigger matches or the title is empty after
/// stripping — such messages are silently ignored.
pub fn parse_request(text: &str, default_platform: Platform) -> Option<SongRequest> {
    let rest = TRIGGERS.iter().find_map(|t| text.strip_prefix(t))?;
    parse_free_text(rest, default_platform)
}

/// Parse trigger-free request text: `[platform] <title>`.
///
/// Shared by the chat trigger and the automation entry points (`/play`),
/// which receive the text without a prefix.
pub fn parse_free_text(text: &str, default_platform: Platform) -> Option<SongRequest> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Some((head, tail)) = text.split_once(' ') {
        if let Some(platform) = Platform::from_token(head) {
            let title = tail.trim().to_string();
            if title.is_empty() {
                return None;
            }
            return Some(SongRequest { title, platform });
        }
    }

    Some(SongRequest {
        title: text.to_string(),
        platform: default_platform,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_trigger_ignored() {
        assert_eq!(parse_request("hello", Platform::Qq), None);
        assert_eq!(parse_request("放首歌：稻香", Platform::Qq), None);
        assert_eq!(parse_request("", Platform::Qq), None);
    }

    #[test]
    fn test_both_trigger_variants() {
        let full = parse_request("点歌：稻香", Platform::Qq).unwrap();
        let ascii = parse_request("点歌:稻香", Platform::Qq).unwrap();
        assert_eq!(full, ascii);
        assert_eq!(full.title, "稻香");
        assert_eq!(full.platform, Platform::Qq);
    }

    #[test]
    fn test_trigger_must_be_prefix() {
        assert_eq!(parse_request("请 点歌：稻香", Platform::Qq), None);
    }

    #[test]
    fn test_empty_title_ignored() {
        assert_eq!(parse_request("点歌：", Platform::Qq), None);
        assert_eq!(parse_request("点歌：   ", Platform::Qq), None);
    }

    #[test]
    fn test_platform_token_consumed() {
        let req = parse_request("点歌：netease 晴天", Platform::Qq).unwrap();
        assert_eq!(req.platform, Platform::Netease);
        assert_eq!(req.title, "晴天");
    }

    #[test]
    fn test_platform_token_only_is_a_title() {
        // No whitespace after the token: the whole text is the title.
        let req = parse_request("点歌：netease", Platform::Qq).unwrap();
        assert_eq!(req.platform, Platform::Qq);
        assert_eq!(req.title, "netease");
    }

    #[test]
    fn test_platform_token_with_empty_tail_ignored() {
        assert_eq!(parse_request("点歌：kuwo ", Platform::Qq), None);
    }

    #[test]
    fn test_default_platform_used() {
        let req = parse_request("点歌：稻香", Platform::Kugou).unwrap();
        assert_eq!(req.platform, Platform::Kugou);
    }

    #[test]
    fn test_multiword_title_preserved() {
        let req = parse_request("点歌：qq 七里香 周杰伦", Platform::Kuwo).unwrap();
        assert_eq!(req.platform, Platform::Qq);
        assert_eq!(req.title, "七里香 周杰伦");
    }
}
