use crate::MediaType;

/// Highest media score a linked post can reach with a premium account.
pub const PREMIUM_LINK_CEILING: i32 = -20;
/// Highest media score a linked post can reach without premium.
pub const STANDARD_LINK_CEILING: i32 = -50;

pub fn link_ceiling(is_premium: bool) -> i32 {
    if is_premium {
        PREMIUM_LINK_CEILING
    } else {
        STANDARD_LINK_CEILING
    }
}

/// Media factor. A link caps the score instead of subtracting from it, so any
/// attachment bonus is lost once a link is present.
pub fn media_score(media: MediaType, has_link: bool, is_premium: bool) -> i32 {
    let score = media.base_score();
    if has_link {
        score.min(link_ceiling(is_premium))
    } else {
        score
    }
}
