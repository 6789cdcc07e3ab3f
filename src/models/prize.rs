//! Prize and prize template models
//!
//! Prizes belong to a raffle and may carry a voucher code and a template
//! text with placeholders that are rendered on assignment and on award.
//! Prize templates are reusable definitions copied into a prize.

use serde::{Deserialize, Serialize};
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Prize {
    pub id: i64,
    pub raffle_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub template_text: Option<String>,
    pub voucher_code: Option<String>,
    pub valid_until: Option<NaiveDate>,
    pub winner_participant_id: Option<i64>,
    pub winner_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePrizeRequest {
    pub raffle_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub template_text: Option<String>,
    pub voucher_code: Option<String>,
    pub valid_until: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePrizeRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub template_text: Option<String>,
    pub voucher_code: Option<String>,
    pub valid_until: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PrizeTemplate {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub template_text: Option<String>,
    pub voucher_code: Option<String>,
    pub valid_until: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePrizeTemplateRequest {
    pub name: String,
    pub description: Option<String>,
    pub template_text: Option<String>,
    pub voucher_code: Option<String>,
    pub valid_until: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePrizeTemplateRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub template_text: Option<String>,
    pub voucher_code: Option<String>,
    pub valid_until: Option<NaiveDate>,
}

/// Values substituted into a prize template text
#[derive(Debug, Clone, Default)]
pub struct TemplateContext<'a> {
    pub prize_name: &'a str,
    pub winner_name: Option<&'a str>,
    pub raffle_date: &'a str,
    pub voucher_code: Option<&'a str>,
    pub valid_until: Option<NaiveDate>,
}

/// Render a prize template text, replacing the documented placeholders.
/// Placeholders whose value is not known yet are left in place, so a later
/// render (at award time) can still fill them.
pub fn render_template_text(template: &str, ctx: &TemplateContext<'_>) -> String {
    let mut rendered = template
        .replace("{{PRIZE_NAME}}", ctx.prize_name)
        .replace("{{RAFFLE_DATE}}", ctx.raffle_date);

    if let Some(winner_name) = ctx.winner_name {
        rendered = rendered.replace("{{WINNER_NAME}}", winner_name);
    }
    if let Some(voucher_code) = ctx.voucher_code {
        rendered = rendered.replace("{{VOUCHER_CODE}}", voucher_code);
    }
    if let Some(valid_until) = ctx.valid_until {
        rendered = rendered.replace("{{VALID_UNTIL}}", &valid_until.format("%Y-%m-%d").to_string());
    }

    rendered
}

impl PrizeTemplate {
    /// Copy this template into a prize creation request for the given raffle
    pub fn to_prize_request(&self, raffle_id: i64) -> CreatePrizeRequest {
        CreatePrizeRequest {
            raffle_id,
            name: self.name.clone(),
            description: self.description.clone(),
            template_text: self.template_text.clone(),
            voucher_code: self.voucher_code.clone(),
            valid_until: self.valid_until,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_template_text() {
        let template =
            "Congrats {{WINNER_NAME}}! You won {{PRIZE_NAME}} at the {{RAFFLE_DATE}} meetup. \
             Code: {{VOUCHER_CODE}} (valid until {{VALID_UNTIL}})";
        let ctx = TemplateContext {
            prize_name: "IntelliJ License",
            winner_name: Some("Eula Lane"),
            raffle_date: "2025-05-19",
            voucher_code: Some("JB-1234"),
            valid_until: NaiveDate::from_ymd_opt(2025, 12, 31),
        };

        let rendered = render_template_text(template, &ctx);
        assert_eq!(
            rendered,
            "Congrats Eula Lane! You won IntelliJ License at the 2025-05-19 meetup. \
             Code: JB-1234 (valid until 2025-12-31)"
        );
    }

    #[test]
    fn test_render_template_text_keeps_unknown_placeholders() {
        let template = "{{RAFFLE_DATE}}: winner {{WINNER_NAME}}, code {{VOUCHER_CODE}}";
        let ctx = TemplateContext {
            prize_name: "Sticker Pack",
            raffle_date: "2025-06-02",
            voucher_code: Some("STK-1"),
            ..Default::default()
        };

        // Winner is unknown before the draw; a second render fills it in
        let first_pass = render_template_text(template, &ctx);
        assert_eq!(first_pass, "2025-06-02: winner {{WINNER_NAME}}, code STK-1");

        let award_ctx = TemplateContext {
            prize_name: "Sticker Pack",
            winner_name: Some("Leta Kelley"),
            raffle_date: "2025-06-02",
            ..Default::default()
        };
        let second_pass = render_template_text(&first_pass, &award_ctx);
        assert_eq!(second_pass, "2025-06-02: winner Leta Kelley, code STK-1");
    }

    #[test]
    fn test_template_to_prize_request() {
        let template = PrizeTemplate {
            id: 5,
            name: "OrbStack License".to_string(),
            description: Some("One year".to_string()),
            template_text: Some("{{PRIZE_NAME}} for {{WINNER_NAME}}".to_string()),
            voucher_code: Some("ORB-XYZ".to_string()),
            valid_until: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let request = template.to_prize_request(9);
        assert_eq!(request.raffle_id, 9);
        assert_eq!(request.name, "OrbStack License");
        assert_eq!(request.voucher_code.as_deref(), Some("ORB-XYZ"));
    }
}
