//! Acknowledgement text, the role catalog, and the best-effort AI review of
//! the acknowledgement. Nothing in this module may gate the submission
//! path: the review runs as a detached task and its outcome is discarded.

use tracing::warn;

/// Open roles, as presented in the role-selection dropdown.
pub const ROLES: &[&str] = &[
    "Content Writer / Copywriter",
    "Full-Stack Developer",
    "Performance Marketer",
    "AI / ML Implementation Specialist",
    "HR Manager (Talent Acquisition + People Operations)",
    "Office Manager / Operations Coordinator",
    "Graphic Designer",
    "UI/UX Designer",
    "Video Editor",
    "LinkedIn Expert",
];

/// Combined-internship-duration choices for fresh applicants.
pub const INTERNSHIP_OPTIONS: &[&str] = &[
    "Zero",
    "3 Months",
    "6 Months",
    "9 Months",
    "1 Year",
    "1.5 Years",
    "2 Years +",
];

const ROLE_PROMPTS: &[(&str, &str)] = &[
    (
        "Content Writer / Copywriter",
        "Portfolio links, published articles, or writing samples",
    ),
    (
        "Full-Stack Developer",
        "GitHub profile, live project links, or tech stack overview",
    ),
    (
        "Performance Marketer",
        "Campaign case studies, ROI reports, or ad account screenshots",
    ),
    (
        "AI / ML Implementation Specialist",
        "List of AI frameworks, models implemented, or research links",
    ),
    (
        "Graphic Designer",
        "Portfolio link (Behance/Dribbble) or design aesthetic summary",
    ),
    (
        "UI/UX Designer",
        "Case studies, Figma links, or user research methodologies",
    ),
    (
        "Video Editor",
        "Showreel link, YouTube channel, or recent raw-to-final work",
    ),
    (
        "LinkedIn Expert",
        "Personal branding stats, authored post links, or client growth summaries",
    ),
];

const DEFAULT_ROLE_PROMPT: &str = "Why are you interested in this role? (Cover Letter)";

/// Prompt describing what the role-specific note should contain, with an
/// explicit fallback for roles without a tailored prompt.
pub fn role_prompt(role: &str) -> &'static str {
    ROLE_PROMPTS
        .iter()
        .find(|(r, _)| *r == role)
        .map(|(_, prompt)| *prompt)
        .unwrap_or(DEFAULT_ROLE_PROMPT)
}

/// The static acknowledgement shown after every submission attempt,
/// templated only on the applying role.
pub fn acknowledgement_message(role: &str) -> String {
    format!(
        "Thank you for your application for the {role} at VRT Management Group LLC. \
         We are initiating the screening and verification process for your candidacy. \
         Our team will share an update within the next 24 to 48 hours."
    )
}

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
const REVIEW_MODEL: &str = "claude-sonnet-4-5";
const MAX_TOKENS: u32 = 256;

/// Fire-and-forget reviewer for the acknowledgement text.
#[derive(Clone)]
pub struct AckReviewer {
    http: reqwest::Client,
    api_key: String,
}

impl AckReviewer {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.into(),
        }
    }

    /// Spawns a detached review task. The handle is dropped on purpose:
    /// neither the result nor a failure ever reaches the caller.
    pub fn spawn_review(&self, role: &str, message: &str) {
        let http = self.http.clone();
        let api_key = self.api_key.clone();
        let prompt = format!("Review this professional acknowledgement for {role}: {message}");

        tokio::spawn(async move {
            if let Err(e) = post_review(&http, &api_key, &prompt).await {
                warn!("Acknowledgement review failed (ignored): {e}");
            }
        });
    }
}

async fn post_review(http: &reqwest::Client, api_key: &str, prompt: &str) -> anyhow::Result<()> {
    let body = serde_json::json!({
        "model": REVIEW_MODEL,
        "max_tokens": MAX_TOKENS,
        "messages": [{ "role": "user", "content": prompt }],
    });

    let response = http
        .post(ANTHROPIC_API_URL)
        .header("x-api-key", api_key)
        .header("anthropic-version", ANTHROPIC_VERSION)
        .json(&body)
        .send()
        .await?;

    if !response.status().is_success() {
        anyhow::bail!("review API returned {}", response.status());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_role_gets_its_tailored_prompt() {
        assert_eq!(
            role_prompt("Full-Stack Developer"),
            "GitHub profile, live project links, or tech stack overview"
        );
    }

    #[test]
    fn unknown_role_falls_back_to_cover_letter_prompt() {
        assert_eq!(role_prompt("Astronaut"), DEFAULT_ROLE_PROMPT);
        assert_eq!(role_prompt(""), DEFAULT_ROLE_PROMPT);
    }

    #[test]
    fn roles_without_tailored_prompts_also_fall_back() {
        // Two catalog roles deliberately have no tailored prompt.
        assert_eq!(
            role_prompt("HR Manager (Talent Acquisition + People Operations)"),
            DEFAULT_ROLE_PROMPT
        );
        assert_eq!(
            role_prompt("Office Manager / Operations Coordinator"),
            DEFAULT_ROLE_PROMPT
        );
    }

    #[test]
    fn acknowledgement_embeds_the_role() {
        let message = acknowledgement_message("Video Editor");
        assert!(message.contains("Video Editor"));
        assert!(message.contains("24 to 48 hours"));
    }
}
