//! Music platform identifiers understood by the aggregator.

/// Supported music-source platforms.
///
/// The aggregator multiplexes four upstream catalogs; the `type` form field
/// of a search request selects one of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    Qq,
    Netease,
    Kugou,
    Kuwo,
}

impl Platform {
    /// Parse from a request token (the word users type before the title).
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "qq" => Some(Self::Qq),
            "netease" => Some(Self::Netease),
            "kugou" => Some(Self::Kugou),
            "kuwo" => Some(Self::Kuwo),
            _ => None,
        }
    }

    /// Token sent to the aggregator (and accepted in chat requests).
    pub fn token(&self) -> &'static str {
        match self {
            Self::Qq => "qq",
            Self::Netease => "netease",
            Self::Kugou => "kugou",
            Self::Kuwo => "kuwo",
        }
    }

    /// Human-readable platform name shown in replies.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Qq => "QQ音乐",
            Self::Netease => "网易云音乐",
            Self::Kugou => "酷狗音乐",
            Self::Kuwo => "酷我音乐",
        }
    }
}

impl Default for Platform {
    fn default() -> Self {
        Self::Qq
    }
}
