use post_score::config::ScorerConfig;
use post_score::{
    parse_post_time, HookType, MediaType, PostInput, RankedAlternative, ScoreError, ScoreResult,
    ThreadScoreResult,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct ApiPostRequest {
    pub text: Option<String>,
    pub media: Option<String>,
    pub has_link: Option<bool>,
    pub is_premium: Option<bool>,
    pub is_verified: Option<bool>,
    pub post_time: Option<String>,
}

impl ApiPostRequest {
    /// Build engine input, filling account flags and media from the server
    /// config when the request leaves them out.
    pub fn into_input(self, config: &ScorerConfig) -> Result<PostInput, ScoreError> {
        let mut input = PostInput::new(self.text.unwrap_or_default());
        input.media = match self.media.as_deref() {
            Some(media) => media.parse::<MediaType>()?,
            None => config.post.media,
        };
        input.has_link = self.has_link.unwrap_or(false);
        input.is_premium = self.is_premium.unwrap_or(config.account.premium);
        input.is_verified = self.is_verified.unwrap_or(config.account.verified);
        if let Some(post_time) = self.post_time.as_deref() {
            input.post_time = Some(parse_post_time(post_time)?);
        }
        Ok(input)
    }
}

#[derive(Debug, Deserialize)]
pub struct ApiThreadRequest {
    pub posts: Vec<ApiPostRequest>,
}

impl ApiThreadRequest {
    pub fn into_inputs(self, config: &ScorerConfig) -> Result<Vec<PostInput>, ScoreError> {
        self.posts
            .into_iter()
            .map(|post| post.into_input(config))
            .collect()
    }
}

#[derive(Debug, Deserialize)]
pub struct ApiRankRequest {
    pub draft: ApiPostRequest,
    pub candidates: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ApiScoreResponse {
    #[serde(flatten)]
    pub result: ScoreResult,
    pub hook_type: HookType,
}

#[derive(Debug, Serialize)]
pub struct ApiThreadResponse {
    #[serde(flatten)]
    pub result: ThreadScoreResult,
    pub template_flow: i32,
}

#[derive(Debug, Serialize)]
pub struct ApiRankResponse {
    pub alternatives: Vec<RankedAlternative>,
}
