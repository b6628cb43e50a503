use crate::error::{AppError, AppResult};

/// The first `pct` percent of `text`, counted in characters and rounded down.
pub fn preview(text: &str, pct: u32) -> AppResult<&str> {
    if pct > 100 {
        return Err(AppError::InvalidPercentage(pct));
    }
    let len = text.chars().count() as u64;
    let keep = (len * pct as u64 / 100) as usize;
    let end = text.char_indices().nth(keep).map(|(i, _)| i).unwrap_or(text.len());
    Ok(&text[..end])
}
