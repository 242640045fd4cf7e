const PREMIUM_BONUS: i32 = 20;
const VERIFIED_BONUS: i32 = 10;

pub fn account_score(is_premium: bool, is_verified: bool) -> i32 {
    let premium = if is_premium { PREMIUM_BONUS } else { 0 };
    let verified = if is_verified { VERIFIED_BONUS } else { 0 };
    premium + verified
}
