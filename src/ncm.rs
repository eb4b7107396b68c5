//! NCM encrypted-container handling.
//!
//! Some aggregator results ship wrapped in the NCM container and are not
//! playable as-is. Detection is by the `.ncm` token in the source URL path
//! or the 8-byte magic at the start of the file; decryption is delegated to
//! the `ncmdump` crate. A failed decrypt falls back to copying the raw
//! bytes so the user still gets a file (with a warning that it may not
//! play).

use crate::error::AppResult;
use ncmdump::Ncmdump;
use std::io::Read;
use std::path::Path;
use url::Url;

/// Magic bytes at the start of every NCM container.
pub const NCM_MAGIC: &[u8; 8] = b"CTENFDAM";

/// True if the first bytes of `path` carry the NCM magic.
pub fn has_ncm_magic(path: &Path) -> bool {
    let mut header = [0u8; 8];
    match fs_err::File::open(path) {
        Ok(mut file) => file.read_exact(&mut header).is_ok() && header == *NCM_MAGIC,
        Err(_) => false,
    }
}

/// True if the downloaded resource should be treated as an NCM container.
pub fn is_ncm(source_url: &str, path: &Path) -> bool {
    let url_token = Url::parse(source_url)
        .map(|u| u.path().to_ascii_lowercase().contains(".ncm"))
        .unwrap_or_else(|_| source_url.to_ascii_lowercase().contains(".ncm"));
    url_token || has_ncm_magic(path)
}

/// What [`materialize`] did with the downloaded bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Materialized {
    /// NCM container decrypted into the target file.
    Decrypted,
    /// Bytes copied through unchanged.
    Copied,
    /// Decrypt failed; raw bytes copied as a best effort.
    FallbackCopy,
}

/// Produce the final cache file from the downloaded temp artifact.
///
/// With `decrypt` set the NCM routine runs first and any failure degrades to
/// a raw copy; otherwise the bytes are copied through. The temp artifact is
/// left in place — its guard owns the cleanup.
pub fn materialize(temp: &Path, target: &Path, decrypt: bool) -> AppResult<Materialized> {
    if decrypt {
        match decrypt_ncm(temp, target) {
            Ok(()) => {
                log::info!("🔓 NCM decrypted: {}", target.display());
                return Ok(Materialized::Decrypted);
            }
            Err(e) => {
                log::warn!("NCM decrypt failed, keeping raw bytes: {e}");
                fs_err::copy(temp, target)?;
                return Ok(Materialized::FallbackCopy);
            }
        }
    }

    fs_err::copy(temp, target)?;
    Ok(Materialized::Copied)
}

/// Run the external decrypt routine. Any error counts as a failed
/// conversion; the caller decides the fallback.
fn decrypt_ncm(input: &Path, output: &Path) -> anyhow::Result<()> {
    let file = fs_err::File::open(input)?;
    let mut ncm = Ncmdump::from_reader(file)?;
    let audio = ncm.get_data()?;
    fs_err::write(output, &audio)?;
    Ok(())
}
